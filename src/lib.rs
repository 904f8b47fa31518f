//! tagbind: XML tag trees, typed node deserialization and value coercion
//!
//! This crate provides functionality to:
//! - Build an in-memory tag tree from XML in a single pass
//! - Look up, edit and deep-copy tags and their attributes
//! - Project a tag tree onto typed nodes chosen by tag name
//! - Coerce attribute text onto primitives, enumerations and vectors
//!
//! # Examples
//! ```
//! use tagbind::{uploads::UploadPlan, Result};
//!
//! fn example() -> Result<()> {
//!     let xml = r#"<Uploads Application="App" Secret="secret.json">
//!                      <Video File="a.mp4" Tags="one,two" Privacy="Unlisted"/>
//!                  </Uploads>"#;
//!     if let Some(plan) = UploadPlan::parse(xml)? {
//!         for video in &plan.videos {
//!             println!("{} -> {:?}", video.file, video.tags);
//!         }
//!     }
//!     Ok(())
//! }
//! # example().unwrap();
//! ```

pub mod builder;
pub mod coerce;
pub mod error;
pub mod node;
pub mod tag;
pub mod test_utils;
pub mod uploads;
pub mod utils;

// Re-exports
pub use builder::{BuilderConfig, TreeBuilder};
pub use coerce::{coerce, split_to_array, Coerce, Value};
pub use error::{CoerceError, ParseError, ParseErrorKind, Result};
pub use node::{Deserializer, NodeTree};
pub use tag::{Attribute, Document, TagId, TagRef};
