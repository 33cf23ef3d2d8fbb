// src/core/loader.rs
//! Line-oriented CSV reader shared by the table loaders.

use crate::error::{GenderError, Result};
use std::fs::File;
use std::io::{BufRead, BufReader, Read};
use std::path::Path;

/// One non-blank CSV row and the 1-based line it came from.
#[derive(Debug, Clone, PartialEq)]
pub struct CsvRow {
    pub line: usize,
    pub fields: Vec<String>,
}

impl CsvRow {
    /// Field `idx`, or `None` when the column is absent or blank.
    pub fn field(&self, idx: usize) -> Option<&str> {
        self.fields
            .get(idx)
            .map(|f| f.trim())
            .filter(|f| !f.is_empty())
    }
}

/// Reads every row of the CSV file at `path`.
pub fn read_csv(path: &Path) -> Result<Vec<CsvRow>> {
    let file = File::open(path).map_err(|e| GenderError::io(path, e))?;
    read_csv_from(BufReader::new(file), path)
}

/// Reads CSV rows from any reader; `path` is only used in error messages.
pub fn read_csv_from<R: Read>(reader: BufReader<R>, path: &Path) -> Result<Vec<CsvRow>> {
    let mut rows = Vec::new();

    for (idx, line_result) in reader.lines().enumerate() {
        let line_num = idx + 1;
        let line = line_result.map_err(|e| GenderError::io(path, e))?;
        let line = if line_num == 1 {
            line.trim_start_matches('\u{feff}')
        } else {
            line.as_str()
        };

        if line.trim().is_empty() {
            continue;
        }

        let fields = split_fields(line)
            .ok_or_else(|| GenderError::malformed(path, line_num, "unterminated quoted field"))?;
        rows.push(CsvRow { line: line_num, fields });
    }

    Ok(rows)
}

/// Splits one CSV line. `None` if a quoted field is never closed.
fn split_fields(line: &str) -> Option<Vec<String>> {
    let mut fields = Vec::new();
    let mut field = String::new();
    let mut in_quotes = false;
    let mut chars = line.chars().peekable();

    while let Some(c) = chars.next() {
        if in_quotes {
            match c {
                '"' if chars.peek() == Some(&'"') => {
                    field.push('"');
                    chars.next();
                }
                '"' => in_quotes = false,
                _ => field.push(c),
            }
        } else {
            match c {
                '"' if field.trim().is_empty() => {
                    field.clear();
                    in_quotes = true;
                }
                ',' => fields.push(std::mem::take(&mut field)),
                '\r' => {}
                _ => field.push(c),
            }
        }
    }

    if in_quotes {
        return None;
    }
    fields.push(field);
    Some(fields)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Cursor;

    fn parse(text: &str) -> Result<Vec<CsvRow>> {
        read_csv_from(BufReader::new(Cursor::new(text.as_bytes().to_vec())), Path::new("test.csv"))
    }

    #[test]
    fn plain_rows() {
        let rows = parse("maria,120\n\njohn\n").unwrap();
        assert_eq!(rows.len(), 2);
        assert_eq!(rows[0].fields, vec!["maria", "120"]);
        assert_eq!(rows[1].line, 3);
        assert_eq!(rows[1].field(1), None);
    }

    #[test]
    fn quoted_fields() {
        let rows = parse("\"Smith, John\",\"say \"\"hi\"\"\",3\r\n").unwrap();
        assert_eq!(rows[0].fields, vec!["Smith, John", "say \"hi\"", "3"]);
    }

    #[test]
    fn blank_field_is_absent() {
        let rows = parse("ana, ,\n").unwrap();
        assert_eq!(rows[0].field(0), Some("ana"));
        assert_eq!(rows[0].field(1), None);
        assert_eq!(rows[0].field(2), None);
    }

    #[test]
    fn byte_order_mark_is_ignored() {
        let rows = parse("\u{feff}ana,1\n").unwrap();
        assert_eq!(rows[0].field(0), Some("ana"));
    }

    #[test]
    fn unterminated_quote_is_malformed() {
        match parse("ana,1\n\"broken,2\n") {
            Err(GenderError::Malformed { line, .. }) => assert_eq!(line, 2),
            other => panic!("expected malformed error, got {:?}", other),
        }
    }
}
