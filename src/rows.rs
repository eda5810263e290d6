//! Row Extractor: HTML table markup into per-row text strings.
//!
//! The table source encodes one coordinate record per `<tr>`; the first row
//! is a header and carries no data. Cell text is flattened the way a
//! text-mode browser would read it, with single spaces between text nodes.

use scraper::{Html, Selector};

use crate::{Error, Result};

/// Extract the text content of every data row, skipping the header row.
///
/// A page without any `<tr>` elements yields an empty vector, not an error;
/// deciding what an empty table means belongs to the pipeline.
pub fn extract_rows(html: &str) -> Result<Vec<String>> {
    let document = Html::parse_document(html);
    let row_sel = Selector::parse("tr").map_err(|e| Error::Parse(format!("{e:?}")))?;

    let rows = document
        .select(&row_sel)
        .skip(1)
        .map(|tr| {
            tr.text()
                .map(str::trim)
                .filter(|t| !t.is_empty())
                .collect::<Vec<_>>()
                .join(" ")
        })
        .collect();

    Ok(rows)
}
