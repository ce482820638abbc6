// Copyright 2025 the Trellis Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! A table rendered from a published JSON sheet.

use serde_json::{Map, Value};
use tracing::{debug, warn};
use trellis_content::{ContentLoader, Element, LoadError, escape_text};

/// Errors produced while building a table.
#[derive(Debug, thiserror::Error)]
pub enum TableError {
    /// The block has no link to a `.json` resource.
    #[error("table block has no link to a JSON sheet")]
    MissingSource,
    /// The sheet could not be loaded.
    #[error(transparent)]
    Load(#[from] LoadError),
    /// The sheet is not JSON.
    #[error("table sheet is not valid JSON: {0}")]
    Json(#[from] serde_json::Error),
    /// The sheet has no `data` array.
    #[error("table sheet has no `data` array")]
    MissingData,
}

/// The first link in `block` whose target is a `.json` resource.
pub fn table_source(block: &Element) -> Option<&str> {
    block
        .descendants()
        .filter(|el| el.is("a"))
        .filter_map(|a| a.attr("href"))
        .find(|href| {
            let path = href.split(['?', '#']).next().unwrap_or_default();
            path.ends_with(".json")
        })
}

/// Render the `data` array of a sheet as a table.
///
/// The header row lists the first row's keys in authored order; every row
/// is rendered against those columns. Strings render as-is, `null` and
/// missing keys as empty cells, anything else as JSON text.
///
/// ```rust
/// use serde_json::json;
/// use trellis_blocks::render_table;
///
/// let sheet = json!({ "data": [{ "Country": "Peru", "Code": 51 }] });
/// assert_eq!(
///     render_table(&sheet).unwrap(),
///     "<table class=\"table\"><thead><tr><th>Country</th><th>Code</th></tr></thead>\
///      <tbody><tr><td>Peru</td><td>51</td></tr></tbody></table>",
/// );
/// ```
pub fn render_table(sheet: &Value) -> Result<String, TableError> {
    let rows = sheet
        .get("data")
        .and_then(Value::as_array)
        .ok_or(TableError::MissingData)?;
    let rows: Vec<&Map<String, Value>> = rows
        .iter()
        .filter_map(|row| {
            let object = row.as_object();
            if object.is_none() {
                warn!(%row, "skipping table row that is not an object");
            }
            object
        })
        .collect();
    let columns: Vec<&str> = rows
        .first()
        .map(|first| first.keys().map(String::as_str).collect())
        .unwrap_or_default();

    let mut out = String::from("<table class=\"table\">");
    if !columns.is_empty() {
        out.push_str("<thead><tr>");
        for column in &columns {
            push_cell(&mut out, "th", column);
        }
        out.push_str("</tr></thead>");
    }
    out.push_str("<tbody>");
    for row in &rows {
        out.push_str("<tr>");
        for column in &columns {
            push_cell(&mut out, "td", &cell_text(row.get(*column)));
        }
        out.push_str("</tr>");
    }
    out.push_str("</tbody></table>");
    debug!(rows = rows.len(), columns = columns.len(), "rendered table");
    Ok(out)
}

/// Parse a sheet document and render it with [`render_table`].
pub fn parse_table(json: &str) -> Result<String, TableError> {
    let sheet: Value = serde_json::from_str(json)?;
    render_table(&sheet)
}

/// Load the sheet linked from `block` and render it.
pub async fn decorate_table<L: ContentLoader>(
    block: &Element,
    loader: &L,
) -> Result<String, TableError> {
    let source = table_source(block).ok_or(TableError::MissingSource)?;
    let json = loader.load(source).await?;
    parse_table(&json)
}

fn cell_text(value: Option<&Value>) -> String {
    match value {
        None | Some(Value::Null) => String::new(),
        Some(Value::String(text)) => text.clone(),
        Some(other) => other.to_string(),
    }
}

fn push_cell(out: &mut String, tag: &str, text: &str) {
    out.push('<');
    out.push_str(tag);
    out.push('>');
    out.push_str(&escape_text(text));
    out.push_str("</");
    out.push_str(tag);
    out.push('>');
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;
    use trellis_content::{MemoryLoader, read_fragment};

    const SHEET: &str = r#"{
        "total": 2,
        "data": [
            { "Name": "Chile", "Capital": "Santiago", "Calling code": 56, "Note": null },
            { "Name": "Côte d'Ivoire", "Capital": "Yamoussoukro", "Calling code": 225 }
        ]
    }"#;

    #[test]
    fn columns_keep_authored_order() {
        let html = parse_table(SHEET).unwrap();
        assert!(html.contains(
            "<tr><th>Name</th><th>Capital</th><th>Calling code</th><th>Note</th></tr>"
        ));
        assert!(html.contains("<tr><td>Chile</td><td>Santiago</td><td>56</td><td></td></tr>"));
        // Missing keys become empty cells.
        assert!(html.contains("<td>225</td><td></td></tr>"));
    }

    #[test]
    fn cells_are_escaped() {
        let html = render_table(&json!({ "data": [{ "a<b": "x & y" }] })).unwrap();
        assert!(html.contains("<th>a&lt;b</th>"));
        assert!(html.contains("<td>x &amp; y</td>"));
    }

    #[test]
    fn non_string_values_render_as_json() {
        let html = render_table(&json!({ "data": [{ "list": [1, 2], "ok": true }] })).unwrap();
        assert!(html.contains("<td>[1,2]</td><td>true</td>"));
    }

    #[test]
    fn empty_and_malformed_sheets() {
        assert_eq!(
            render_table(&json!({ "data": [] })).unwrap(),
            "<table class=\"table\"><tbody></tbody></table>"
        );
        assert!(matches!(
            render_table(&json!({ "rows": [] })),
            Err(TableError::MissingData)
        ));
        assert!(matches!(parse_table("{"), Err(TableError::Json(_))));
    }

    #[test]
    fn source_link_must_be_json() {
        let block = read_fragment(
            r#"<div><a href="/about.html">About</a><a href="/countries.json?sheet=1">Data</a></div>"#,
        )
        .unwrap();
        assert_eq!(table_source(&block), Some("/countries.json?sheet=1"));

        let none = read_fragment(r#"<div><a href="/json-guide">Guide</a></div>"#).unwrap();
        assert_eq!(table_source(&none), None);
    }

    #[tokio::test]
    async fn decorate_loads_the_linked_sheet() {
        let block =
            read_fragment(r#"<div><p><a href="/countries.json">countries</a></p></div>"#).unwrap();
        let loader = MemoryLoader::new().with("/countries.json", SHEET);
        let html = decorate_table(&block, &loader).await.unwrap();
        assert!(html.contains("<td>Côte d'Ivoire</td>"));

        let missing = decorate_table(&block, &MemoryLoader::new()).await;
        assert!(matches!(missing, Err(TableError::Load(LoadError::NotFound { .. }))));

        let unlinked = read_fragment("<div>No data</div>").unwrap();
        let err = decorate_table(&unlinked, &loader).await.unwrap_err();
        assert!(matches!(err, TableError::MissingSource));
    }
}
