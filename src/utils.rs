use std::{
    fs::{self, File},
    io::{self, BufReader},
    path::Path,
};

use crate::error::{IOError, ParseError, ParseErrorKind, Result};

fn io_error(path: &Path, e: io::Error) -> ParseError {
    let path = path.display().to_string();
    let kind = match e.kind() {
        io::ErrorKind::NotFound => IOError::FileNotFound(path),
        io::ErrorKind::PermissionDenied => IOError::PermissionDenied(path),
        _ => IOError::ReadError(path),
    };
    ParseError::new(ParseErrorKind::IO(kind)).with_source(e)
}

pub fn open_file(path: &Path) -> Result<BufReader<File>> {
    File::open(path)
        .map(BufReader::new)
        .map_err(|e| io_error(path, e))
}

pub fn read_file(path: &Path) -> Result<String> {
    fs::read_to_string(path).map_err(|e| io_error(path, e))
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use std::error::Error;

    use super::*;

    #[test]
    fn test_missing_file_keeps_io_source() {
        let err = read_file(Path::new("missing/upload.xml")).unwrap_err();
        assert!(matches!(
            err.kind(),
            ParseErrorKind::IO(IOError::FileNotFound(path)) if path.contains("upload.xml")
        ));

        let source = err.source().unwrap();
        let io = source.downcast_ref::<io::Error>().unwrap();
        assert_eq!(io.kind(), io::ErrorKind::NotFound);
        assert!(err.to_string().contains("Caused by:"));
    }
}
