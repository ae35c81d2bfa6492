//! Line tokenizer for delimited disclosure files.
//!
//! Splitting honors one quoting convention: a double-quoted stretch protects
//! delimiter characters from splitting, and the quote characters themselves
//! are dropped from the field. There is no escape sequence for a literal
//! quote inside a quoted field; inputs that need one are outside this
//! format's contract.

use thiserror::Error;

/// Per-field byte and per-line field-count ceilings. Exceeding either one is
/// a structural violation, not a value-level parse failure.
#[derive(Debug, Clone, Copy)]
pub struct TokenizerLimits {
    pub max_field_len: usize,
    pub max_fields: usize,
}

impl Default for TokenizerLimits {
    fn default() -> Self {
        Self {
            max_field_len: 64,
            max_fields: 80,
        }
    }
}

#[derive(Debug, Error, PartialEq, Eq)]
pub enum TokenizeError {
    #[error("field {index} exceeds the {limit}-byte field limit")]
    FieldTooLong { index: usize, limit: usize },
    #[error("line exceeds the {limit}-field limit")]
    TooManyFields { limit: usize },
}

/// A line with N unquoted delimiters yields exactly N + 1 fields, empty
/// fields included.
pub fn split_line(
    line: &str,
    delimiter: char,
    limits: TokenizerLimits,
) -> Result<Vec<String>, TokenizeError> {
    let mut fields = Vec::new();
    let mut field = String::new();
    let mut in_quotes = false;
    for ch in line.chars() {
        if ch == '"' {
            in_quotes = !in_quotes;
            continue;
        }
        if ch == delimiter && !in_quotes {
            if fields.len() + 1 == limits.max_fields {
                return Err(TokenizeError::TooManyFields {
                    limit: limits.max_fields,
                });
            }
            fields.push(std::mem::take(&mut field));
            continue;
        }
        if matches!(ch, '\r' | '\n') {
            break;
        }
        if field.len() + ch.len_utf8() > limits.max_field_len {
            return Err(TokenizeError::FieldTooLong {
                index: fields.len(),
                limit: limits.max_field_len,
            });
        }
        field.push(ch);
    }
    fields.push(field);
    Ok(fields)
}
