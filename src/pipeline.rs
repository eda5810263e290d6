//! Pipeline Orchestrator: fetch, parse, rasterize, render, emit.
//!
//! The core transformations are pure and synchronous; everything touching
//! the outside world sits behind the [`SourceFetcher`] and [`OutputSink`]
//! collaborator traits so the pipeline can be driven entirely in-memory
//! under test.

use std::io::{self, Write};

use crate::grid::{rasterize_normalized, rasterize_zero_origin};
use crate::{parse, rows, Result, SourceFormat};

/// Supplies the raw source text for an identifier (URL, path, ...).
///
/// Retry and backoff policy lives inside implementations, never in the
/// pipeline; the pipeline sees one final result per invocation.
pub trait SourceFetcher {
    fn fetch(&self, identifier: &str) -> Result<String>;
}

/// Receives the rendered rows, in order.
pub trait OutputSink {
    fn emit(&mut self, rows: &[String]) -> io::Result<()>;
}

/// Sink writing one line per row to any [`io::Write`].
pub struct WriteSink<W: Write> {
    writer: W,
}

impl<W: Write> WriteSink<W> {
    pub fn new(writer: W) -> Self {
        Self { writer }
    }
}

impl<W: Write> OutputSink for WriteSink<W> {
    fn emit(&mut self, rows: &[String]) -> io::Result<()> {
        for row in rows {
            writeln!(self.writer, "{row}")?;
        }
        self.writer.flush()
    }
}

/// Sink collecting rows into memory, for tests and embedding.
#[derive(Debug, Default)]
pub struct VecSink {
    pub rows: Vec<String>,
}

impl VecSink {
    pub fn new() -> Self {
        Self::default()
    }
}

impl OutputSink for VecSink {
    fn emit(&mut self, rows: &[String]) -> io::Result<()> {
        self.rows.extend_from_slice(rows);
        Ok(())
    }
}

/// Decode a plain-text document export into rendered rows.
///
/// Noise lines are dropped during parsing; an input with zero usable
/// records fails with [`crate::Error::NoData`] when bounds are computed.
pub fn decode_document(text: &str) -> Result<Vec<String>> {
    let records = parse::parse_document(text);
    log::debug!("parsed {} records from document text", records.len());
    Ok(rasterize_normalized(&records)?.render())
}

/// Decode extracted table-row texts into rendered rows.
///
/// Strict per-row validation; an empty row sequence (or a table that
/// produced no rows at all) renders as a single empty line rather than
/// failing, since an empty table is a valid, if silent, message.
pub fn decode_rows(row_texts: &[String]) -> Result<Vec<String>> {
    let records = parse::parse_rows(row_texts)?;
    log::debug!("parsed {} records from {} rows", records.len(), row_texts.len());
    if records.is_empty() {
        log::info!("no data rows found; rendering empty output");
        return Ok(vec![String::new()]);
    }
    Ok(rasterize_zero_origin(&records)?.render())
}

/// End-to-end decoder for one source format.
pub struct Pipeline<F: SourceFetcher> {
    fetcher: F,
    format: SourceFormat,
}

impl<F: SourceFetcher> Pipeline<F> {
    pub fn new(fetcher: F, format: SourceFormat) -> Self {
        Self { fetcher, format }
    }

    /// Fetch the source, decode it, and emit the rendered rows.
    ///
    /// Any stage failure short-circuits before the sink sees anything.
    pub fn run<S: OutputSink>(&self, identifier: &str, sink: &mut S) -> Result<()> {
        let text = self.fetcher.fetch(identifier)?;
        let lines = match self.format {
            SourceFormat::Document => decode_document(&text)?,
            SourceFormat::Table => {
                let row_texts = rows::extract_rows(&text)?;
                decode_rows(&row_texts)?
            }
        };
        sink.emit(&lines)?;
        Ok(())
    }
}
