use std::io::BufRead;

use super::tokens::{Token, TokenError, TokenReader};

/// Consume the next value without decoding it
///
/// Scalars are consumed whole; objects and arrays are consumed up to their
/// matching close by tracking open/close balance, at any nesting depth.
/// String contents are scanned but never materialized.
///
/// # Errors
///
/// Returns `TokenError::Syntax` if the reader is not positioned at a value,
/// or any error from the underlying token stream.
pub fn skip_value<R: BufRead>(reader: &mut TokenReader<R>) -> Result<(), TokenError> {
    let mut depth: usize = 0;
    loop {
        let offset = reader.offset();
        match reader.next_token_skipping_payload()? {
            Token::BeginObject | Token::BeginArray => depth += 1,
            Token::EndObject | Token::EndArray => {
                depth = depth.checked_sub(1).ok_or_else(|| TokenError::Syntax {
                    offset,
                    message: "expected a value, found a closing delimiter".to_string(),
                })?;
            }
            Token::String(_) | Token::Number(_) | Token::Bool(_) | Token::Null => {}
        }
        if depth == 0 {
            return Ok(());
        }
    }
}
