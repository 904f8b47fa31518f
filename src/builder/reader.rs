//! Tokenizer adapter.
//!
//! Turns `quick-xml` pull events into the three tokens the tree builder
//! understands. Declarations, processing instructions, comments, CDATA and
//! doctypes never reach the builder.

use std::io::BufRead;

use quick_xml::{
    escape::unescape,
    events::{BytesStart, Event},
    Decoder, Reader,
};
use tracing::trace;

use crate::error::{ParseError, Result, SyntaxError};

/// One step of a document as seen by the tree builder
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Token {
    Start {
        name: String,
        attributes: Vec<(String, String)>,
        self_closing: bool,
    },
    Text(String),
    End,
}

impl Token {
    pub fn start(name: impl Into<String>) -> Self {
        Self::Start {
            name: name.into(),
            attributes: Vec::new(),
            self_closing: false,
        }
    }

    pub fn empty(name: impl Into<String>) -> Self {
        Self::Start {
            name: name.into(),
            attributes: Vec::new(),
            self_closing: true,
        }
    }
}

/// Anything that yields tokens in document order
pub trait TokenSource {
    /// Next token, or `None` once the input is exhausted
    fn next_token(&mut self) -> Result<Option<Token>>;

    /// Bytes consumed so far
    fn position(&self) -> u64 {
        0
    }
}

impl TokenSource for std::vec::IntoIter<Token> {
    fn next_token(&mut self) -> Result<Option<Token>> {
        Ok(self.next())
    }
}

/// Pull reader over any buffered byte source
pub struct TokenReader<R: BufRead> {
    reader: Reader<R>,
    buf: Vec<u8>,
    pending: Option<Token>,
    finished: bool,
}

impl<R: BufRead> TokenReader<R> {
    pub fn new(source: R) -> Self {
        let mut reader = Reader::from_reader(source);
        // Unbalanced end tags are the builder's business, not the tokenizer's.
        let config = reader.config_mut();
        config.check_end_names = false;
        config.allow_unmatched_ends = true;

        Self {
            reader,
            buf: Vec::with_capacity(1024),
            pending: None,
            finished: false,
        }
    }
}

fn offset<R>(reader: &Reader<R>) -> u64 {
    u64::try_from(reader.buffer_position()).unwrap_or(u64::MAX)
}

fn syntax_error<R>(reader: &Reader<R>, error: SyntaxError) -> ParseError {
    ParseError::new(error).with_location(offset(reader))
}

impl<R: BufRead> TokenSource for TokenReader<R> {
    fn next_token(&mut self) -> Result<Option<Token>> {
        if let Some(token) = self.pending.take() {
            return Ok(Some(token));
        }
        if self.finished {
            return Ok(None);
        }

        // Text may arrive in several pieces around entity references.
        let mut text = String::new();
        loop {
            self.buf.clear();
            let decoder = self.reader.decoder();
            let event = match self.reader.read_event_into(&mut self.buf) {
                Ok(event) => event,
                Err(err) => {
                    let message = err.to_string();
                    return Err(syntax_error(&self.reader, SyntaxError::Malformed(message)));
                }
            };

            let token = match event {
                Event::Start(ref e) => start_token(e, decoder, false),
                Event::Empty(ref e) => start_token(e, decoder, true),
                Event::End(_) => Ok(Token::End),
                Event::Text(ref e) => {
                    let piece = std::str::from_utf8(e)
                        .map_err(|_| SyntaxError::InvalidEncoding)
                        .and_then(|raw| {
                            unescape(raw)
                                .map(|s| s.into_owned())
                                .map_err(|err| SyntaxError::Malformed(err.to_string()))
                        });
                    match piece {
                        Ok(piece) => {
                            text.push_str(&piece);
                            continue;
                        }
                        Err(err) => Err(err),
                    }
                }
                Event::GeneralRef(ref e) => {
                    let resolved = std::str::from_utf8(e)
                        .map_err(|_| SyntaxError::InvalidEncoding)
                        .and_then(|name| {
                            unescape(&format!("&{};", name))
                                .map(|s| s.into_owned())
                                .map_err(|_| SyntaxError::UnknownEntity(name.to_string()))
                        });
                    match resolved {
                        Ok(resolved) => {
                            text.push_str(&resolved);
                            continue;
                        }
                        Err(err) => Err(err),
                    }
                }
                Event::Eof => {
                    self.finished = true;
                    return Ok(take_text(text));
                }
                Event::Decl(_)
                | Event::PI(_)
                | Event::Comment(_)
                | Event::CData(_)
                | Event::DocType(_) => continue,
            };

            let token = token.map_err(|err| syntax_error(&self.reader, err))?;
            trace!(?token, "token");
            return Ok(match take_text(text) {
                Some(text_token) => {
                    self.pending = Some(token);
                    Some(text_token)
                }
                None => Some(token),
            });
        }
    }

    fn position(&self) -> u64 {
        offset(&self.reader)
    }
}

/// Whitespace-only runs between tags are formatting, not content
fn take_text(text: String) -> Option<Token> {
    if text.trim().is_empty() {
        None
    } else {
        Some(Token::Text(text))
    }
}

fn start_token(
    e: &BytesStart<'_>,
    decoder: Decoder,
    self_closing: bool,
) -> std::result::Result<Token, SyntaxError> {
    let name = std::str::from_utf8(e.name().as_ref())
        .map_err(|_| SyntaxError::InvalidEncoding)?
        .to_string();

    let mut attributes = Vec::new();
    let mut iter = e.attributes();
    // Duplicates are rejected later, case-insensitively, by the tag model.
    iter.with_checks(false);
    for attribute in iter {
        let attribute =
            attribute.map_err(|err| SyntaxError::InvalidAttribute(err.to_string()))?;
        let key = std::str::from_utf8(attribute.key.as_ref())
            .map_err(|_| SyntaxError::InvalidEncoding)?
            .to_string();
        let value = attribute
            .decode_and_unescape_value(decoder)
            .map_err(|err| SyntaxError::InvalidAttribute(format!("{}: {}", key, err)))?
            .into_owned();
        attributes.push((key, value));
    }

    Ok(Token::Start {
        name,
        attributes,
        self_closing,
    })
}
