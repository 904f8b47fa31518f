use std::fs;

use crate::error::{IOError, ParseError, ParseErrorKind, Result};

use super::helpers::generate_uploads;

pub struct TestData {
    pub small: String,
    pub uploads: String,
    pub large: String,
}

impl TestData {
    pub fn load() -> Result<Self> {
        Ok(Self {
            small: read_test_file("tests/input/small.xml")?,
            uploads: read_test_file("tests/input/uploads.xml")?,
            large: generate_uploads(2_000),
        })
    }
}

pub fn read_test_file(path: &str) -> Result<String> {
    fs::read_to_string(path).map_err(|e| {
        ParseError::new(ParseErrorKind::IO(IOError::ReadError(format!(
            "Failed to read {}: {}",
            path, e
        ))))
    })
}
