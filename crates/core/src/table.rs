//! Header-driven CSV table parsing.
//!
//! Sheet exports arrive as CSV text whose first line is a header row. The
//! parsers in [`crate::catalog`] address cells by column name, and the
//! use-case sheet additionally needs the original column order, so a parsed
//! [`Table`] keeps the headers as an ordered list rather than folding rows
//! into maps.

use crate::error::CoreError;

/// A parsed CSV table: ordered headers plus data rows.
///
/// Headers and cells are trimmed of surrounding whitespace at parse time.
#[derive(Debug, Clone, Default)]
pub struct Table {
    headers: Vec<String>,
    rows: Vec<Vec<String>>,
}

impl Table {
    /// Parse CSV text whose first line is a header row.
    ///
    /// Handles quoted fields with `""` escapes. Blank lines are skipped.
    /// Empty input yields a table with no headers and no rows.
    pub fn parse(text: &str) -> Self {
        let mut lines = text.lines();

        let headers = match lines.next() {
            Some(header_line) => parse_csv_line(header_line)
                .into_iter()
                .map(|h| h.trim().to_string())
                .collect(),
            None => Vec::new(),
        };

        let rows = lines
            .filter(|line| !line.trim().is_empty())
            .map(|line| {
                parse_csv_line(line)
                    .into_iter()
                    .map(|cell| cell.trim().to_string())
                    .collect()
            })
            .collect();

        Self { headers, rows }
    }

    /// Column headers in original sheet order.
    pub fn headers(&self) -> &[String] {
        &self.headers
    }

    /// True if the table has no data rows.
    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// Iterate over data rows.
    pub fn rows(&self) -> impl Iterator<Item = Row<'_>> {
        self.rows.iter().map(|cells| Row {
            headers: &self.headers,
            cells,
        })
    }
}

/// A borrowed view of one data row, addressed by column name.
#[derive(Debug, Clone, Copy)]
pub struct Row<'a> {
    headers: &'a [String],
    cells: &'a [String],
}

impl Row<'_> {
    /// Look up a cell by column name. A row shorter than the header still
    /// resolves its missing trailing cells as empty strings.
    pub fn get(&self, column: &str) -> Option<&str> {
        let index = self.headers.iter().position(|h| h == column)?;
        Some(self.cells.get(index).map(String::as_str).unwrap_or(""))
    }

    /// Look up a cell by column name, failing with [`CoreError::Schema`]
    /// if the table has no such column.
    pub fn require(&self, column: &str) -> Result<&str, CoreError> {
        self.get(column).ok_or_else(|| CoreError::Schema {
            column: column.to_string(),
        })
    }
}

/// Parse a single CSV line, handling quoted fields.
fn parse_csv_line(line: &str) -> Vec<String> {
    let mut result = Vec::new();
    let mut current = String::new();
    let mut in_quotes = false;
    let mut chars = line.chars().peekable();

    while let Some(ch) = chars.next() {
        if in_quotes {
            if ch == '"' {
                if chars.peek() == Some(&'"') {
                    // Escaped quote.
                    current.push('"');
                    chars.next();
                } else {
                    in_quotes = false;
                }
            } else {
                current.push(ch);
            }
        } else if ch == '"' {
            in_quotes = true;
        } else if ch == ',' {
            result.push(current.clone());
            current.clear();
        } else {
            current.push(ch);
        }
    }
    result.push(current);
    result
}
