//! Forward-only integer token streams.
//!
//! A checker run reads three of these. Tokens are maximal runs of
//! non-whitespace bytes and are pulled from the reader lazily, so a stream
//! is never consumed past the last token the decision procedure asks for.

use lazy_static::lazy_static;
use regex::Regex;
use std::io::{self, BufRead};
use thiserror::Error;

use crate::types::StreamSource;

/// Tokens longer than this cannot be an `i64` and are reported truncated.
const MAX_TOKEN_LEN: usize = 64;

lazy_static! {
    // Canonical decimal integer: no sign on zero, no leading zeros, no '+'.
    static ref INTEGER_TOKEN: Regex = Regex::new(r"^(0|-?[1-9][0-9]*)$").unwrap();
}

/// Errors raised while reading a token stream.
#[derive(Error, Debug)]
pub enum StreamError {
    #[error("expected {expected}, found end of stream")]
    UnexpectedEof {
        stream: StreamSource,
        expected: String,
    },

    #[error("expected {expected}, found `{token}`")]
    Malformed {
        stream: StreamSource,
        expected: String,
        token: String,
    },

    #[error("failed to read stream: {error}")]
    Io {
        stream: StreamSource,
        #[source]
        error: io::Error,
    },
}

impl StreamError {
    /// The stream the error occurred on.
    pub fn stream(&self) -> StreamSource {
        match self {
            StreamError::UnexpectedEof { stream, .. }
            | StreamError::Malformed { stream, .. }
            | StreamError::Io { stream, .. } => *stream,
        }
    }

    /// Whether this is a failure of the reader rather than of the content.
    pub fn is_io(&self) -> bool {
        matches!(self, StreamError::Io { .. })
    }
}

/// An ordered sequence of whitespace-delimited tokens backed by a reader.
pub struct TokenStream<R> {
    source: StreamSource,
    reader: R,
    tokens_read: usize,
}

impl<R: BufRead> TokenStream<R> {
    pub fn new(source: StreamSource, reader: R) -> Self {
        Self {
            source,
            reader,
            tokens_read: 0,
        }
    }

    /// Number of tokens consumed so far.
    pub fn tokens_read(&self) -> usize {
        self.tokens_read
    }

    /// Read the next raw token, or `None` at end of stream.
    ///
    /// Bytes past `MAX_TOKEN_LEN` are consumed but dropped; the returned
    /// token then ends with `...` so it can never parse as an integer.
    pub fn next_token(&mut self) -> Result<Option<String>, StreamError> {
        self.skip_whitespace()?;

        let mut token = Vec::new();
        let mut truncated = false;
        loop {
            let buf = self.fill()?;
            if buf.is_empty() {
                break;
            }

            let end = buf
                .iter()
                .position(|b| b.is_ascii_whitespace())
                .unwrap_or(buf.len());
            let room = MAX_TOKEN_LEN.saturating_sub(token.len());
            token.extend_from_slice(&buf[..end.min(room)]);
            truncated |= end > room;

            let at_boundary = end < buf.len();
            self.reader.consume(end);
            if at_boundary {
                break;
            }
        }

        if token.is_empty() {
            return Ok(None);
        }

        self.tokens_read += 1;
        let mut token = String::from_utf8_lossy(&token).into_owned();
        if truncated {
            token.push_str("...");
        }
        Ok(Some(token))
    }

    /// Read a signed 64-bit integer token.
    pub fn read_int(&mut self, expected: &str) -> Result<i64, StreamError> {
        let token = self.expect_token(expected)?;
        if !INTEGER_TOKEN.is_match(&token) {
            return Err(self.malformed(expected, token));
        }
        token
            .parse::<i64>()
            .map_err(|_| self.malformed(expected, token))
    }

    fn expect_token(&mut self, expected: &str) -> Result<String, StreamError> {
        self.next_token()?.ok_or_else(|| StreamError::UnexpectedEof {
            stream: self.source,
            expected: expected.to_string(),
        })
    }

    fn malformed(&self, expected: &str, token: String) -> StreamError {
        StreamError::Malformed {
            stream: self.source,
            expected: expected.to_string(),
            token,
        }
    }

    fn skip_whitespace(&mut self) -> Result<(), StreamError> {
        loop {
            let buf = self.fill()?;
            if buf.is_empty() {
                return Ok(());
            }
            let skip = buf
                .iter()
                .position(|b| !b.is_ascii_whitespace())
                .unwrap_or(buf.len());
            let done = skip < buf.len();
            self.reader.consume(skip);
            if done {
                return Ok(());
            }
        }
    }

    fn fill(&mut self) -> Result<&[u8], StreamError> {
        let source = self.source;
        self.reader
            .fill_buf()
            .map_err(|error| StreamError::Io {
                stream: source,
                error,
            })
    }
}
