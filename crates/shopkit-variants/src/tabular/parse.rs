//! Tabular parsing.
//!
//! Line-oriented, RFC-4180-style: the first non-blank line is the header,
//! every following non-blank line is a data row, and fields may be wrapped in
//! double quotes with `""` escaping commas and literal quotes. Malformed
//! numeric cells degrade to defaults; the only hard failures are an input
//! with no data rows and a quoted field left open at the end of a line.

use crate::error::TableError;
use crate::tabular::row::{HeaderRole, ImportRow};

/// Cell tokens recognized as "enabled" in the is-active column.
const ACTIVE_TOKENS: [&str; 3] = ["true", "1", "启用"];

/// What one parsed header cell means for the rows beneath it.
#[derive(Debug, Clone, PartialEq, Eq)]
enum Column {
    /// A fixed column of the contract.
    Role(HeaderRole),
    /// An attribute column, keyed by its trimmed header text.
    Attribute(String),
    /// A repeat of an already-claimed fixed column. First match wins; the
    /// duplicate's cells are skipped.
    Ignored,
}

/// Resolve header cells to columns, letting the first header claim a role.
fn resolve_columns(headers: &[String]) -> Vec<Column> {
    let mut claimed: Vec<HeaderRole> = Vec::new();
    headers
        .iter()
        .map(|header| match HeaderRole::resolve(header) {
            Some(role) if !claimed.contains(&role) => {
                claimed.push(role);
                Column::Role(role)
            }
            Some(_) => Column::Ignored,
            None => Column::Attribute(header.trim().to_string()),
        })
        .collect()
}

/// Parse exchange-format text into import rows.
///
/// Returns [`TableError::NoDataRows`] for empty or header-only input and
/// [`TableError::UnterminatedQuote`] when a line ends inside a quoted field.
/// Everything else decodes; see [`ImportRow`] for the per-cell defaults.
pub fn parse(text: &str) -> Result<Vec<ImportRow>, TableError> {
    let mut lines = text
        .lines()
        .enumerate()
        .filter(|(_, line)| !line.trim().is_empty());

    let (header_index, header_line) = lines.next().ok_or(TableError::NoDataRows)?;
    let headers = split_fields(header_line, header_index + 1)?;
    let columns = resolve_columns(&headers);

    let mut rows = Vec::new();
    for (line_index, line) in lines {
        let fields = split_fields(line, line_index + 1)?;
        rows.push(decode_row(&columns, &fields, rows.len() + 1));
    }

    if rows.is_empty() {
        return Err(TableError::NoDataRows);
    }
    Ok(rows)
}

/// Split one line into fields, honoring double-quote delimiters.
///
/// `line_number` is 1-based over the raw input and only used for the
/// unterminated-quote error.
fn split_fields(line: &str, line_number: usize) -> Result<Vec<String>, TableError> {
    let mut fields = Vec::new();
    let mut current = String::new();
    let mut in_quotes = false;
    let mut chars = line.chars().peekable();

    while let Some(c) = chars.next() {
        if in_quotes {
            if c == '"' {
                if chars.peek() == Some(&'"') {
                    // Doubled quote inside a quoted field: one literal quote.
                    current.push('"');
                    chars.next();
                } else {
                    in_quotes = false;
                }
            } else {
                current.push(c);
            }
        } else {
            match c {
                '"' => in_quotes = true,
                ',' => fields.push(std::mem::take(&mut current)),
                _ => current.push(c),
            }
        }
    }

    if in_quotes {
        return Err(TableError::UnterminatedQuote { line: line_number });
    }
    fields.push(current);
    Ok(fields)
}

/// Decode one data row against the header's columns.
///
/// `row_index` is the 1-based data-row position used for the synthetic SKU
/// placeholder. Missing trailing cells behave like blank ones.
fn decode_row(columns: &[Column], fields: &[String], row_index: usize) -> ImportRow {
    let mut row = ImportRow::default();

    for (column, raw) in columns.iter().zip(fields) {
        let cell = raw.trim();
        match column {
            Column::Role(HeaderRole::Sku) => row.sku = cell.to_string(),
            Column::Role(HeaderRole::Price) => row.price = cell.parse().unwrap_or(0.0),
            Column::Role(HeaderRole::Stock) => row.stock = cell.parse().unwrap_or(0),
            Column::Role(HeaderRole::ComparePrice) => row.compare_price = cell.parse().ok(),
            Column::Role(HeaderRole::Images) => {
                row.images = cell
                    .split(',')
                    .map(str::trim)
                    .filter(|url| !url.is_empty())
                    .map(String::from)
                    .collect();
            }
            Column::Role(HeaderRole::IsActive) => {
                row.is_active = ACTIVE_TOKENS.iter().any(|t| cell.eq_ignore_ascii_case(t));
            }
            Column::Attribute(key) => {
                if !cell.is_empty() {
                    row.attributes.push((key.clone(), cell.to_string()));
                }
            }
            Column::Ignored => {}
        }
    }

    if row.sku.is_empty() {
        row.sku = format!("SKU-{row_index}");
    }
    row
}
