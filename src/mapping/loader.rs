use crate::error::RowError;
use std::io::{self, BufRead};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LoaderOptions {
    pub delimiter: char,
    /// Skip the first non-blank line.
    pub has_header_row: bool,
}

impl Default for LoaderOptions {
    fn default() -> Self {
        Self {
            delimiter: ',',
            has_header_row: true,
        }
    }
}

pub type NumberedRow = (usize, Vec<String>);

const UTF8_BOM: &[u8] = b"\xEF\xBB\xBF";

/// Splits a delimited dictionary into rows numbered by the line they start on. A quoted
/// field may span lines. Rows that cannot be split or decoded are returned as
/// diagnostics; only I/O failures abort.
pub fn read_rows<R: BufRead>(
    mut reader: R,
    options: &LoaderOptions,
) -> io::Result<(Vec<NumberedRow>, Vec<RowError>)> {
    let mut rows = Vec::new();
    let mut diagnostics = Vec::new();
    let mut header_pending = options.has_header_row;
    // Start line and text of a row whose quoted field is still open.
    let mut pending: Option<(usize, String)> = None;
    let mut bytes = Vec::new();
    let mut line_no = 0;

    loop {
        bytes.clear();
        if reader.read_until(b'\n', &mut bytes)? == 0 {
            break;
        }
        line_no += 1;
        let mut raw = trim_line_end(&bytes);
        if line_no == 1 {
            raw = raw.strip_prefix(UTF8_BOM).unwrap_or(raw);
        }

        let line = match std::str::from_utf8(raw) {
            Ok(line) => line,
            Err(_) => {
                match pending.take() {
                    Some(_) if header_pending => header_pending = false,
                    Some((start, _)) => {
                        diagnostics.push(RowError::InvalidEncoding { line: start })
                    }
                    None if header_pending => header_pending = false,
                    None => diagnostics.push(RowError::InvalidEncoding { line: line_no }),
                }
                continue;
            }
        };

        let (start, text) = match pending.take() {
            Some((start, mut text)) => {
                text.push('\n');
                text.push_str(line);
                (start, text)
            }
            None if line.trim().is_empty() => continue,
            None => (line_no, line.to_string()),
        };

        match split_row(&text, options.delimiter) {
            None => pending = Some((start, text)),
            Some(_) if header_pending => header_pending = false,
            Some(fields) => rows.push((start, fields)),
        }
    }

    if let Some((start, _)) = pending {
        diagnostics.push(RowError::UnterminatedQuote { line: start });
    }

    Ok((rows, diagnostics))
}

fn trim_line_end(line: &[u8]) -> &[u8] {
    let line = line.strip_suffix(b"\n").unwrap_or(line);
    line.strip_suffix(b"\r").unwrap_or(line)
}

/// Splits one row on `delimiter`, honouring double-quoted fields with `""` escapes.
/// Returns `None` when a quoted field is still open at the end of `line`.
pub fn split_row(line: &str, delimiter: char) -> Option<Vec<String>> {
    let mut fields = Vec::new();
    let mut field = String::new();
    let mut chars = line.chars().peekable();
    let mut in_quotes = false;
    let mut at_field_start = true;

    while let Some(c) = chars.next() {
        if in_quotes {
            if c == '"' {
                if chars.peek() == Some(&'"') {
                    chars.next();
                    field.push('"');
                } else {
                    in_quotes = false;
                }
            } else {
                field.push(c);
            }
            continue;
        }

        if c == '"' && at_field_start {
            in_quotes = true;
            at_field_start = false;
        } else if c == delimiter {
            fields.push(std::mem::take(&mut field));
            at_field_start = true;
        } else {
            field.push(c);
            at_field_start = false;
        }
    }

    if in_quotes {
        return None;
    }
    fields.push(field);
    Some(fields)
}
