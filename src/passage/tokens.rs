//! Pull-based JSON token reader over any `BufRead`.
//!
//! The reader yields one [`Token`] at a time and never buffers more than the
//! token being read, so documents of any size can be walked in a single
//! forward pass. Commas and colons are consumed implicitly and checked
//! against the enclosing container, so a caller only ever sees values,
//! object keys and container delimiters.
//!
//! String escapes and number syntax are validated with `serde_json`.

use std::io::BufRead;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum TokenError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Unexpected end of input at byte {0}")]
    UnexpectedEof(u64),

    #[error("Syntax error at byte {offset}: {message}")]
    Syntax { offset: u64, message: String },
}

/// A single JSON token
#[derive(Debug, Clone, PartialEq)]
pub enum Token {
    BeginObject,
    EndObject,
    BeginArray,
    EndArray,
    /// A string value or an object key
    String(String),
    /// The literal text of a number
    Number(String),
    Bool(bool),
    Null,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Container {
    Object,
    Array,
}

/// What the grammar allows next
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Expect {
    /// Any value (top level, after `:` or after `,` in an array)
    Value,
    /// A key or `}` right after `{`
    FirstKeyOrEnd,
    /// A key after `,` in an object
    Key,
    /// `:` after a key
    Colon,
    /// A value or `]` right after `[`
    FirstValueOrEnd,
    /// `,` or the closing delimiter after a value
    CommaOrEnd,
    /// The top-level value is complete
    Done,
}

/// Streaming JSON tokenizer
pub struct TokenReader<R> {
    reader: R,
    offset: u64,
    stack: Vec<Container>,
    expect: Expect,
}

impl<R: BufRead> TokenReader<R> {
    pub fn new(reader: R) -> Self {
        Self {
            reader,
            offset: 0,
            stack: Vec::new(),
            expect: Expect::Value,
        }
    }

    /// Byte offset of the next unread byte
    #[must_use]
    pub fn offset(&self) -> u64 {
        self.offset
    }

    /// Current container nesting depth
    #[must_use]
    pub fn depth(&self) -> usize {
        self.stack.len()
    }

    /// Read the next token, decoding string and number payloads
    ///
    /// # Errors
    ///
    /// Returns `TokenError::Syntax` for input that is not valid JSON,
    /// `TokenError::UnexpectedEof` if the input ends mid-document, or
    /// `TokenError::Io` for read failures.
    pub fn next_token(&mut self) -> Result<Token, TokenError> {
        self.read(true)
    }

    /// Read the next token without materializing string or number payloads
    ///
    /// Strings and numbers come back with empty text. Used to skip values.
    pub(crate) fn next_token_skipping_payload(&mut self) -> Result<Token, TokenError> {
        self.read(false)
    }

    /// Whether the current object or array has another element
    ///
    /// # Errors
    ///
    /// Returns `TokenError::UnexpectedEof` if the input ends while a
    /// container is still open, or `TokenError::Io` for read failures.
    pub fn more(&mut self) -> Result<bool, TokenError> {
        let Some(byte) = self.peek_non_ws()? else {
            if self.stack.is_empty() {
                return Ok(false);
            }
            return Err(TokenError::UnexpectedEof(self.offset));
        };
        Ok(match self.expect {
            Expect::FirstKeyOrEnd => byte != b'}',
            Expect::FirstValueOrEnd => byte != b']',
            Expect::CommaOrEnd => byte != b'}' && byte != b']',
            Expect::Done => false,
            Expect::Value | Expect::Key | Expect::Colon => true,
        })
    }

    fn read(&mut self, decode: bool) -> Result<Token, TokenError> {
        let byte = self.begin_token()?;

        match byte {
            b'{' | b'[' => {
                self.require_value_position(byte)?;
                self.bump();
                if byte == b'{' {
                    self.stack.push(Container::Object);
                    self.expect = Expect::FirstKeyOrEnd;
                    Ok(Token::BeginObject)
                } else {
                    self.stack.push(Container::Array);
                    self.expect = Expect::FirstValueOrEnd;
                    Ok(Token::BeginArray)
                }
            }
            b'}' | b']' => {
                let (container, allowed) = if byte == b'}' {
                    (Container::Object, Expect::FirstKeyOrEnd)
                } else {
                    (Container::Array, Expect::FirstValueOrEnd)
                };
                let closes_top = self.stack.last() == Some(&container);
                if !closes_top || !(self.expect == allowed || self.expect == Expect::CommaOrEnd) {
                    return Err(self.syntax(format!("unexpected '{}'", byte as char)));
                }
                self.bump();
                self.stack.pop();
                self.after_value();
                Ok(if container == Container::Object {
                    Token::EndObject
                } else {
                    Token::EndArray
                })
            }
            b'"' => {
                let key_position = matches!(self.expect, Expect::FirstKeyOrEnd | Expect::Key);
                if !key_position {
                    self.require_value_position(byte)?;
                }
                let text = self.read_string(decode)?;
                if key_position {
                    self.expect = Expect::Colon;
                } else {
                    self.after_value();
                }
                Ok(Token::String(text))
            }
            _ => {
                self.require_value_position(byte)?;
                let token = match byte {
                    b't' => {
                        self.read_literal(b"true")?;
                        Token::Bool(true)
                    }
                    b'f' => {
                        self.read_literal(b"false")?;
                        Token::Bool(false)
                    }
                    b'n' => {
                        self.read_literal(b"null")?;
                        Token::Null
                    }
                    b'-' | b'0'..=b'9' => Token::Number(self.read_number(decode)?),
                    _ => return Err(self.syntax(format!("unexpected byte 0x{byte:02x}"))),
                };
                self.after_value();
                Ok(token)
            }
        }
    }

    /// Consume separators allowed before the next token and return its first byte
    fn begin_token(&mut self) -> Result<u8, TokenError> {
        loop {
            let byte = self
                .peek_non_ws()?
                .ok_or(TokenError::UnexpectedEof(self.offset))?;
            match self.expect {
                Expect::Colon => {
                    if byte != b':' {
                        return Err(self.syntax("expected ':' after object key"));
                    }
                    self.bump();
                    self.expect = Expect::Value;
                }
                Expect::CommaOrEnd => match byte {
                    b',' => {
                        self.bump();
                        self.expect = if self.stack.last() == Some(&Container::Object) {
                            Expect::Key
                        } else {
                            Expect::Value
                        };
                    }
                    b'}' | b']' => return Ok(byte),
                    _ => return Err(self.syntax("expected ',' or a closing delimiter")),
                },
                Expect::Done => return Err(self.syntax("trailing data after top-level value")),
                Expect::Value | Expect::FirstKeyOrEnd | Expect::Key | Expect::FirstValueOrEnd => {
                    return Ok(byte)
                }
            }
        }
    }

    fn require_value_position(&self, byte: u8) -> Result<(), TokenError> {
        match self.expect {
            Expect::Value | Expect::FirstValueOrEnd => Ok(()),
            Expect::FirstKeyOrEnd | Expect::Key => Err(self.syntax(format!(
                "expected a string object key, found '{}'",
                byte as char
            ))),
            _ => Err(self.syntax(format!("unexpected '{}'", byte as char))),
        }
    }

    fn after_value(&mut self) {
        self.expect = if self.stack.is_empty() {
            Expect::Done
        } else {
            Expect::CommaOrEnd
        };
    }

    fn read_string(&mut self, decode: bool) -> Result<String, TokenError> {
        let start = self.offset;
        self.bump(); // opening quote
        let mut raw = Vec::new();
        if decode {
            raw.push(b'"');
        }

        loop {
            let byte = self.next_byte()?;
            match byte {
                b'"' => break,
                b'\\' => {
                    let escaped = self.next_byte()?;
                    if decode {
                        raw.push(b'\\');
                        raw.push(escaped);
                    }
                }
                0x00..=0x1f => return Err(self.syntax("control character in string")),
                _ => {
                    if decode {
                        raw.push(byte);
                    }
                }
            }
        }

        if !decode {
            return Ok(String::new());
        }
        raw.push(b'"');
        serde_json::from_slice(&raw).map_err(|e| TokenError::Syntax {
            offset: start,
            message: format!("invalid string: {e}"),
        })
    }

    fn read_number(&mut self, decode: bool) -> Result<String, TokenError> {
        let start = self.offset;
        let mut raw = Vec::new();
        while let Some(byte) = self.peek()? {
            if !matches!(byte, b'0'..=b'9' | b'-' | b'+' | b'.' | b'e' | b'E') {
                break;
            }
            self.bump();
            raw.push(byte);
        }

        serde_json::from_slice::<serde_json::Number>(&raw).map_err(|e| TokenError::Syntax {
            offset: start,
            message: format!("invalid number: {e}"),
        })?;

        if decode {
            // Validated above, so the bytes are ASCII
            Ok(String::from_utf8_lossy(&raw).into_owned())
        } else {
            Ok(String::new())
        }
    }

    fn read_literal(&mut self, literal: &[u8]) -> Result<(), TokenError> {
        for &expected in literal {
            let byte = self.next_byte()?;
            if byte != expected {
                return Err(self.syntax(format!(
                    "invalid literal, expected '{}'",
                    String::from_utf8_lossy(literal)
                )));
            }
        }
        Ok(())
    }

    fn peek(&mut self) -> Result<Option<u8>, TokenError> {
        let buf = self.reader.fill_buf()?;
        Ok(buf.first().copied())
    }

    fn peek_non_ws(&mut self) -> Result<Option<u8>, TokenError> {
        while let Some(byte) = self.peek()? {
            if !matches!(byte, b' ' | b'\t' | b'\n' | b'\r') {
                return Ok(Some(byte));
            }
            self.bump();
        }
        Ok(None)
    }

    fn next_byte(&mut self) -> Result<u8, TokenError> {
        let byte = self.peek()?.ok_or(TokenError::UnexpectedEof(self.offset))?;
        self.bump();
        Ok(byte)
    }

    fn bump(&mut self) {
        self.reader.consume(1);
        self.offset += 1;
    }

    fn syntax(&self, message: impl Into<String>) -> TokenError {
        TokenError::Syntax {
            offset: self.offset,
            message: message.into(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn tokens(json: &str) -> Result<Vec<Token>, TokenError> {
        let mut reader = TokenReader::new(json.as_bytes());
        let mut out = vec![reader.next_token()?];
        while reader.depth() > 0 {
            out.push(reader.next_token()?);
        }
        Ok(out)
    }

    #[test]
    fn test_object_tokens() {
        let toks = tokens(r#"{"a": [1, -2.5e3, true], "b": {"c": null}, "d": "x\"y"}"#).unwrap();
        assert_eq!(
            toks,
            vec![
                Token::BeginObject,
                Token::String("a".into()),
                Token::BeginArray,
                Token::Number("1".into()),
                Token::Number("-2.5e3".into()),
                Token::Bool(true),
                Token::EndArray,
                Token::String("b".into()),
                Token::BeginObject,
                Token::String("c".into()),
                Token::Null,
                Token::EndObject,
                Token::String("d".into()),
                Token::String("x\"y".into()),
                Token::EndObject,
            ]
        );
    }

    #[test]
    fn test_string_escapes_are_decoded() {
        let toks = tokens(r#"["café 😀\n"]"#).unwrap();
        assert_eq!(toks[1], Token::String("café 😀\n".into()));
    }

    #[test]
    fn test_utf8_passthrough() {
        let toks = tokens(r#"["Ἐν ἀρχῇ ἦν ὁ λόγος"]"#).unwrap();
        assert_eq!(toks[1], Token::String("Ἐν ἀρχῇ ἦν ὁ λόγος".into()));
    }

    #[test]
    fn test_more() {
        let mut reader = TokenReader::new(r#"{"a": 1, "b": []}"#.as_bytes());
        assert_eq!(reader.next_token().unwrap(), Token::BeginObject);
        assert!(reader.more().unwrap());
        reader.next_token().unwrap(); // "a"
        reader.next_token().unwrap(); // 1
        assert!(reader.more().unwrap());
        reader.next_token().unwrap(); // "b"
        assert_eq!(reader.next_token().unwrap(), Token::BeginArray);
        assert!(!reader.more().unwrap());
        assert_eq!(reader.next_token().unwrap(), Token::EndArray);
        assert!(!reader.more().unwrap());
        assert_eq!(reader.next_token().unwrap(), Token::EndObject);
        assert!(!reader.more().unwrap());
    }

    #[test]
    fn test_more_at_eof_inside_container() {
        let mut reader = TokenReader::new(r#"{"a": [1"#.as_bytes());
        reader.next_token().unwrap(); // {
        reader.next_token().unwrap(); // "a"
        reader.next_token().unwrap(); // [
        reader.next_token().unwrap(); // 1
        assert!(matches!(reader.more(), Err(TokenError::UnexpectedEof(_))));

        let mut reader = TokenReader::new("{".as_bytes());
        reader.next_token().unwrap();
        assert!(matches!(reader.more(), Err(TokenError::UnexpectedEof(1))));
    }

    #[test]
    fn test_more_after_complete_document() {
        let mut reader = TokenReader::new("[]  ".as_bytes());
        reader.next_token().unwrap();
        reader.next_token().unwrap();
        assert!(!reader.more().unwrap());
    }

    #[test]
    fn test_offset_tracks_bytes() {
        let mut reader = TokenReader::new(r#"  {"ab": 1}"#.as_bytes());
        reader.next_token().unwrap();
        assert_eq!(reader.offset(), 3);
        reader.next_token().unwrap();
        assert_eq!(reader.offset(), 7);
    }

    #[test]
    fn test_syntax_errors() {
        let bad = [
            r#"{"a" 1}"#,     // missing colon
            r#"{"a": 1 "b": 2}"#, // missing comma
            r"{1: 2}",        // non-string key
            r"[1, 2}",        // mismatched close
            r"[1,]x",         // value expected
            r"[tru]",         // bad literal
            r"[01x]",         // bad number
            "[\"a\u{1}\"]",   // raw control character
            r#"["\x"]"#,      // bad escape
            r"{} {}",         // trailing value
        ];
        for json in bad {
            let mut reader = TokenReader::new(json.as_bytes());
            let mut result = Ok(Token::Null);
            for _ in 0..10 {
                result = reader.next_token();
                if result.is_err() {
                    break;
                }
            }
            assert!(
                matches!(result, Err(TokenError::Syntax { .. })),
                "expected syntax error for {json}, got {result:?}"
            );
        }
    }

    #[test]
    fn test_truncated_input() {
        let err = tokens(r#"{"a": [1, 2"#).unwrap_err();
        assert!(matches!(err, TokenError::UnexpectedEof(_)));

        let err = tokens(r#"{"a": "unterminated"#).unwrap_err();
        assert!(matches!(err, TokenError::UnexpectedEof(_)));
    }

    #[test]
    fn test_skipping_payload_leaves_strings_empty() {
        let mut reader = TokenReader::new(r#"["long text", 12]"#.as_bytes());
        reader.next_token_skipping_payload().unwrap();
        assert_eq!(
            reader.next_token_skipping_payload().unwrap(),
            Token::String(String::new())
        );
        assert_eq!(
            reader.next_token_skipping_payload().unwrap(),
            Token::Number(String::new())
        );
    }
}
