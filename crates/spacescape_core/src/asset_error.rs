//! Asset error types

use std::fmt;
use std::io;
use std::path::PathBuf;

/// Error type for texture and model loading
#[derive(Debug)]
pub enum AssetError {
    /// IO error (file not found, permission denied, etc.)
    Io(io::Error),
    /// The file was read but could not be decoded
    Decode { path: PathBuf, message: String },
    /// The file decoded to nothing usable (e.g. a model without meshes)
    Empty(PathBuf),
}

impl AssetError {
    /// Build a decode error for `path`
    pub fn decode(path: impl Into<PathBuf>, message: impl fmt::Display) -> Self {
        AssetError::Decode {
            path: path.into(),
            message: message.to_string(),
        }
    }
}

impl fmt::Display for AssetError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AssetError::Io(err) => write!(f, "Asset IO error: {}", err),
            AssetError::Decode { path, message } => {
                write!(f, "Failed to decode {}: {}", path.display(), message)
            }
            AssetError::Empty(path) => write!(f, "Asset contains no usable data: {}", path.display()),
        }
    }
}

impl std::error::Error for AssetError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            AssetError::Io(err) => Some(err),
            AssetError::Decode { .. } => None,
            AssetError::Empty(_) => None,
        }
    }
}

impl From<io::Error> for AssetError {
    fn from(err: io::Error) -> Self {
        AssetError::Io(err)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_io_error_display() {
        let err = AssetError::Io(io::Error::new(io::ErrorKind::NotFound, "file missing"));
        let msg = format!("{}", err);
        assert!(msg.contains("IO error"));
        assert!(msg.contains("file missing"));
    }

    #[test]
    fn test_decode_error_display() {
        let err = AssetError::decode("textures/sun.jpg", "bad huffman table");
        let msg = format!("{}", err);
        assert!(msg.contains("textures/sun.jpg"));
        assert!(msg.contains("bad huffman table"));
    }

    #[test]
    fn test_empty_display() {
        let err = AssetError::Empty(PathBuf::from("models/astronaut.glb"));
        assert!(format!("{}", err).contains("astronaut.glb"));
    }

    #[test]
    fn test_error_source() {
        use std::error::Error;

        let io_err: AssetError = io::Error::new(io::ErrorKind::PermissionDenied, "denied").into();
        assert!(io_err.source().is_some());
        assert!(AssetError::decode("x", "y").source().is_none());
    }
}
