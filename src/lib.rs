//! gridmsg
//!
//! Decodes a "secret message" encoded as sparse `(character, x, y)` triples
//! and renders it as a dense 2D character grid. Sources come in two shapes:
//! a loosely formatted plain-text document export, and an HTML table with
//! one record per row. Each shape has its own parsing and rendering policy
//! (see [`SourceFormat`]); the policies differ on purpose and are never
//! mixed within a run.
//!
//! # Example
//!
//! ```
//! use gridmsg::pipeline::decode_document;
//!
//! # fn main() -> gridmsg::Result<()> {
//! let rows = decode_document("A 3 4\nB, 1, 2\nC 0 0\n")?;
//! assert_eq!(rows[0], "C   ");
//! assert_eq!(rows[4], "   A");
//! # Ok(())
//! # }
//! ```
//!
//! Fetching over HTTP lives behind the `net` feature; the decoding core has
//! no I/O of its own and can be driven from any string.

pub mod error;
pub use error::{BoxError, Error, Result};

pub mod parse;

pub mod grid;
pub use grid::{Bounds, Grid, Orientation};

// Row Extractor for the table source (scraper-backed)
pub mod rows;

pub mod pipeline;
pub use pipeline::{OutputSink, Pipeline, SourceFetcher, VecSink, WriteSink};

// HTTP + file fetchers; HTTP is feature-gated under `net`
pub mod fetch;

/// A parsed `(character, x, y)` triple destined for one grid cell.
///
/// `glyph` carries the full matched token; some table rows yield more than
/// one character. Truncation to a single cell happens at rasterization, not
/// here.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Record {
    /// Matched character token, one or more code points
    pub glyph: String,
    pub x: u32,
    pub y: u32,
}

/// Which input shape a pipeline run decodes.
///
/// The format fixes the whole policy bundle: parsing strictness, grid
/// origin, and render orientation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SourceFormat {
    /// Plain-text export: tolerant line cascade, bounds-normalized grid,
    /// rendered top-down.
    Document,
    /// HTML table: strict row validation, zero-origin grid, rendered
    /// bottom-up so (0,0) sits at the bottom-left.
    Table,
}

/// Configuration for source fetching
///
/// Defaults are conservative: a short timeout, a few retries with
/// exponential backoff, and a user agent that identifies the tool.
#[derive(Debug, Clone)]
pub struct FetchConfig {
    /// User agent string to send with requests
    pub user_agent: String,
    /// Per-request timeout in milliseconds
    pub timeout_ms: u64,
    /// Retries after the initial attempt, for transient failures only
    pub max_retries: u32,
    /// Base backoff delay in milliseconds, doubled per retry
    pub backoff_ms: u64,
}

impl Default for FetchConfig {
    fn default() -> Self {
        Self {
            user_agent: "gridmsg/0.1".to_string(),
            timeout_ms: 10_000,
            max_retries: 3,
            backoff_ms: 1_000,
        }
    }
}
