use crate::error::{ParseError, Result, SecurityError};

pub const DEFAULT_MAX_DEPTH: usize = 100;
pub const DEFAULT_MAX_SIZE: u64 = 10 * 1024 * 1024; // 10MB
pub const DEFAULT_MAX_ATTRIBUTES: usize = 256;

/// Limits applied while building a tag tree
#[derive(Debug, Clone)]
pub struct BuilderConfig {
    /// Maximum nesting depth below the root tag
    pub max_depth: usize,
    /// Maximum input size in bytes
    pub max_size: u64,
    /// Maximum number of attributes on one tag
    pub max_attributes: usize,
}

/// Tracks nesting depth while the builder walks the token stream
#[derive(Debug, Default)]
pub struct BuildContext {
    current_depth: usize,
}

impl Default for BuilderConfig {
    fn default() -> Self {
        Self {
            max_depth: DEFAULT_MAX_DEPTH,
            max_size: DEFAULT_MAX_SIZE,
            max_attributes: DEFAULT_MAX_ATTRIBUTES,
        }
    }
}

impl BuilderConfig {
    pub fn validate_size(&self, size: u64) -> Result<()> {
        if size > self.max_size {
            return Err(ParseError::new(SecurityError::MaxSizeExceeded).with_context(format!(
                "Input size ({} bytes) exceeds maximum allowed ({})",
                size, self.max_size
            )));
        }
        Ok(())
    }

    pub fn validate_attributes(&self, count: usize) -> Result<()> {
        if count > self.max_attributes {
            return Err(ParseError::new(SecurityError::MaxAttributesExceeded)
                .with_context(format!("{} attributes on one tag", count)));
        }
        Ok(())
    }
}

impl BuildContext {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn depth(&self) -> usize {
        self.current_depth
    }

    pub fn enter_nested(&mut self, config: &BuilderConfig) -> Result<()> {
        self.current_depth += 1;
        if self.current_depth > config.max_depth {
            return Err(ParseError::new(SecurityError::MaxDepthExceeded));
        }
        Ok(())
    }

    pub fn exit_nested(&mut self) {
        self.current_depth = self.current_depth.saturating_sub(1);
    }
}
