mod data;
mod fixtures;
mod helpers;

pub use data::{read_test_file, TestData};
pub use fixtures::{
    DUPLICATE_ATTRIBUTE_SAMPLES, MALFORMED_SAMPLES, NESTED, TEST_FILES, UNBALANCED_SAMPLES,
    UNKNOWN_SUBTREE,
};
pub use helpers::{generate_nested, generate_uploads, tmp_file_path};

// Re-export common test types/traits
pub use crate::{
    builder::{
        config::{DEFAULT_MAX_ATTRIBUTES, DEFAULT_MAX_DEPTH, DEFAULT_MAX_SIZE},
        BuilderConfig, Token, TokenReader, TokenSource, TreeBuilder,
    },
    coerce::{
        assign, coerce, coerce_or_default, split_to_array, try_coerce, Coerce, Shape, Value,
        Vector2, Vector3,
    },
    error::{
        CoerceError, IOError, ParseError, ParseErrorKind, Result, SecurityError, StructureError,
        SyntaxError,
    },
    node::{Deserializer, Field, NodeId, NodeKind, NodeTree, NodeType, TypeRegistry, VariantOf},
    tag::{Attribute, Document, TagId, TagRef},
    uploads::{Category, PlanIssue, Privacy, UploadNode, UploadPlan, Uploads, Video},
    utils::{open_file, read_file},
};
