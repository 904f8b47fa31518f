//! Single-pass tag tree builder.
//!
//! The builder walks the token stream once without recursion. The parent
//! links of the tree under construction double as the call stack: a start
//! tag descends into the new tag, an end tag ascends to the current tag's
//! parent. An end tag at the root is ignored, so unbalanced markup never
//! aborts the walk.

pub mod config;
pub mod reader;

pub use config::{BuildContext, BuilderConfig};
pub use reader::{Token, TokenReader, TokenSource};

use std::{
    fs::File,
    io::{BufRead, BufReader},
    path::Path,
};

use tracing::{debug, instrument};

use crate::{
    error::Result,
    tag::{Attribute, Document, TagId},
    utils::open_file,
};

/// Builds a [`Document`] from a token stream
#[derive(Debug, Clone, Default)]
pub struct TreeBuilder {
    config: BuilderConfig,
}

impl TreeBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_config(config: BuilderConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &BuilderConfig {
        &self.config
    }

    /// Consumes `source` and returns the tree it describes.
    ///
    /// The first start tag becomes the root. Later start tags are attached to
    /// the current tag; unless self-closing, the builder descends into them.
    /// Text replaces the current tag's value.
    ///
    /// # Errors
    ///
    /// Tokenizer failures, duplicate attribute names on one tag and
    /// configured limits abort the build.
    pub fn build<S: TokenSource>(&self, mut source: S) -> Result<Document> {
        let mut doc = Document::new();
        let mut context = BuildContext::new();
        let mut current = TagId::ROOT;
        let mut root_seen = false;
        let mut root_closed = false;
        // Open tags below one that could not be attached
        let mut skipped = 0usize;

        while let Some(token) = source.next_token()? {
            self.config.validate_size(source.position())?;

            match token {
                Token::Start {
                    name,
                    attributes,
                    self_closing,
                } => {
                    if skipped > 0 {
                        if !self_closing {
                            skipped += 1;
                        }
                        continue;
                    }
                    self.config.validate_attributes(attributes.len())?;

                    let id = if root_seen {
                        doc.create_tag(name)
                    } else {
                        doc.set_name(TagId::ROOT, name);
                        TagId::ROOT
                    };
                    for (name, value) in attributes {
                        doc.add_attribute(id, Attribute::new(name, value))
                            .map_err(|err| err.with_location(source.position()))?;
                    }

                    if !root_seen {
                        root_seen = true;
                        continue;
                    }

                    if !doc.add_tag(current, id) {
                        debug!(tag = id.index(), "dropping tag without a name");
                        if !self_closing {
                            skipped = 1;
                        }
                        continue;
                    }
                    if !self_closing {
                        context.enter_nested(&self.config)?;
                        current = id;
                    }
                }
                Token::Text(text) => {
                    // Text outside any element belongs to no tag
                    let outside = !root_seen || (root_closed && current == TagId::ROOT);
                    if !outside && skipped == 0 {
                        doc.set_value(current, text);
                    }
                }
                Token::End => {
                    if skipped > 0 {
                        skipped -= 1;
                        continue;
                    }
                    match doc.tag(current).and_then(|tag| tag.parent()) {
                        Some(parent) => {
                            current = parent.id();
                            context.exit_nested();
                        }
                        None => {
                            root_closed = true;
                            debug!("end tag at the root ignored");
                        }
                    }
                }
            }
        }

        Ok(doc)
    }

    /// Builds from XML text; anything before the first `<` is skipped.
    pub fn build_str(&self, text: &str) -> Result<Document> {
        let text = match text.find('<') {
            Some(start) => text.get(start..).unwrap_or(text),
            None => text,
        };
        self.build_bytes(text.as_bytes())
    }

    pub fn build_bytes(&self, bytes: &[u8]) -> Result<Document> {
        self.config
            .validate_size(u64::try_from(bytes.len()).unwrap_or(u64::MAX))?;
        self.build(TokenReader::new(bytes))
    }

    /// Builds from a reader. The reader is owned by the call and released
    /// when it returns, whether or not the build succeeded.
    pub fn build_reader<R: BufRead>(&self, reader: R) -> Result<Document> {
        self.build(TokenReader::new(reader))
    }
}

impl Document {
    /// Parses XML text with the default limits
    ///
    /// # Examples
    /// ```
    /// use tagbind::Document;
    ///
    /// let doc = Document::parse_str(r#"<Uploads><Video File="a.mp4"/></Uploads>"#)?;
    /// assert_eq!(doc.root().name(), "Uploads");
    /// assert!(doc.find_tag("video").is_some());
    /// # Ok::<(), tagbind::ParseError>(())
    /// ```
    pub fn parse_str(text: &str) -> Result<Self> {
        TreeBuilder::new().build_str(text)
    }

    pub fn parse_bytes(bytes: &[u8]) -> Result<Self> {
        TreeBuilder::new().build_bytes(bytes)
    }

    pub fn parse_reader<R: BufRead>(reader: R) -> Result<Self> {
        TreeBuilder::new().build_reader(reader)
    }

    #[instrument]
    pub fn load_file(path: &Path) -> Result<Self> {
        debug!("Opening XML document");
        let file: BufReader<File> = open_file(path)?;
        let doc = TreeBuilder::new()
            .build_reader(file)
            .map_err(|err| err.with_context(format!("while reading {}", path.display())))?;
        debug!(tags = doc.root().count(), "Document loaded");
        Ok(doc)
    }
}
