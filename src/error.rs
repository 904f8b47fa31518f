//! Error handling types for tag trees and coercion
//!
//! Tree construction reports [`ParseError`]s carrying a category, an optional
//! byte position in the input and free-form context. Coercion has its own
//! [`CoerceError`] because those failures never abort a document.

use std::{error::Error, fmt};
use thiserror::Error;

/// Main error type for tree construction
#[derive(Debug)]
pub struct ParseError {
    /// The specific kind of error
    kind: ParseErrorKind,
    /// Location where the error occurred
    location: Option<Location>,
    /// Source error that caused this error
    source: Option<Box<dyn Error + Send + Sync>>,
    /// Additional context for the error
    context: Option<String>,
}

/// Byte position in the input
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Location {
    pub offset: u64,
}

/// Top-level error categories
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ParseErrorKind {
    #[error(transparent)]
    IO(#[from] IOError),
    #[error(transparent)]
    Syntax(#[from] SyntaxError),
    #[error(transparent)]
    Structure(#[from] StructureError),
    #[error(transparent)]
    Security(#[from] SecurityError),
}

/// The tokenizer could not make sense of the input bytes
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SyntaxError {
    #[error("Malformed markup: {0}")]
    Malformed(String),
    #[error("Invalid attribute: {0}")]
    InvalidAttribute(String),
    #[error("Input is not valid UTF-8")]
    InvalidEncoding,
    #[error("Unknown entity reference '&{0};'")]
    UnknownEntity(String),
}

/// The markup is well-formed but violates the tag model
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum StructureError {
    /// Two attributes on one tag differ only in letter case (or not at all)
    #[error("Duplicate attribute '{0}'")]
    DuplicateAttribute(String),
    /// The tag id does not belong to the document
    #[error("Unknown tag")]
    UnknownTag,
}

/// Limits from the builder configuration
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SecurityError {
    #[error("Maximum nesting depth exceeded")]
    MaxDepthExceeded,
    #[error("Maximum input size exceeded")]
    MaxSizeExceeded,
    #[error("Maximum number of attributes per tag exceeded")]
    MaxAttributesExceeded,
}

/// IO operation errors
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum IOError {
    #[error("File not found: {0}")]
    FileNotFound(String),
    #[error("Permission denied: {0}")]
    PermissionDenied(String),
    #[error("Read error: {0}")]
    ReadError(String),
}

impl ParseError {
    pub fn new(kind: impl Into<ParseErrorKind>) -> Self {
        Self {
            kind: kind.into(),
            location: None,
            source: None,
            context: None,
        }
    }

    pub fn with_location(mut self, offset: u64) -> Self {
        self.location = Some(Location { offset });
        self
    }

    pub fn location(&self) -> Option<Location> {
        self.location
    }

    pub fn kind(&self) -> &ParseErrorKind {
        &self.kind
    }

    pub fn with_context(mut self, context: impl Into<String>) -> Self {
        self.context = Some(context.into());
        self
    }

    pub fn context(&self) -> Option<&str> {
        self.context.as_deref()
    }

    pub fn with_source<E>(mut self, source: E) -> Self
    where
        E: Error + Send + Sync + 'static,
    {
        self.source = Some(Box::new(source));
        self
    }
}

impl fmt::Display for ParseError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if let Some(loc) = &self.location {
            write!(f, "at byte {}: {}", loc.offset, self.kind)?;
        } else {
            write!(f, "Error: {}", self.kind)?;
        }

        if let Some(ctx) = &self.context {
            write!(f, "\nContext: {}", ctx)?;
        }

        if let Some(source) = &self.source {
            write!(f, "\nCaused by: {}", source)?;
        }

        Ok(())
    }
}

impl Error for ParseError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        self.source
            .as_ref()
            .map(|source| source.as_ref() as &(dyn Error + 'static))
    }
}

pub type Result<T> = std::result::Result<T, ParseError>;

/// Reasons a value could not be coerced onto a target type
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CoerceError {
    #[error("'{0}' is not a valid number")]
    InvalidNumber(String),
    #[error("'{0}' is not a valid boolean")]
    InvalidBoolean(String),
    #[error("'{0}' is not a single character")]
    InvalidCharacter(String),
    #[error("'{value}' is not a member of {target}")]
    UnknownMember { value: String, target: &'static str },
    #[error("{0} does not fit into the target type")]
    OutOfRange(String),
    #[error("{supplied} values supplied for {slots} slots")]
    TooManyElements { supplied: usize, slots: usize },
    #[error("cannot convert {found} into {target}")]
    Incompatible {
        found: &'static str,
        target: &'static str,
    },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display_with_location() {
        let err = ParseError::new(StructureError::DuplicateAttribute("Id".to_string()))
            .with_location(42);
        let display = err.to_string();
        assert!(display.starts_with("at byte 42"));
        assert!(display.contains("Duplicate attribute 'Id'"));
    }

    #[test]
    fn test_error_display_with_context() {
        let err = ParseError::new(IOError::FileNotFound("a.xml".to_string()))
            .with_context("loading upload configuration");
        let display = err.to_string();
        assert!(display.contains("File not found: a.xml"));
        assert!(display.contains("Context: loading upload configuration"));
    }

    #[test]
    fn test_kind_conversion() {
        let err = ParseError::new(SecurityError::MaxDepthExceeded);
        assert_eq!(
            err.kind(),
            &ParseErrorKind::Security(SecurityError::MaxDepthExceeded)
        );
        assert!(err.location().is_none());
    }
}
