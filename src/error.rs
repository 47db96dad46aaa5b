//! Error types for pageshrink operations.

use std::fmt;
use std::io;
use std::path::PathBuf;

/// Result type for pageshrink operations.
pub type Result<T> = std::result::Result<T, Error>;

/// Error type for pageshrink operations.
///
/// Every variant aborts a batch run; nothing is retried.
#[derive(Debug)]
#[non_exhaustive]
pub enum Error {
    /// Invalid input parameters (dimensions, buffer size, etc.)
    InvalidInput(String),
    /// Configuration validation failed
    InvalidConfig(String),
    /// Encoding failed
    EncodeFailed(EncodingError),
    /// Memory allocation failed
    OutOfMemory,
    /// Filesystem access failed (listing, creating, reading or writing).
    Io {
        /// Path the operation was acting on.
        path: PathBuf,
        /// Underlying I/O error.
        source: io::Error,
    },
    /// A source image could not be decoded.
    Decode {
        /// Source image path.
        path: PathBuf,
        /// Underlying decoder error.
        source: image::ImageError,
    },
}

impl Error {
    pub(crate) fn io(path: impl Into<PathBuf>, source: io::Error) -> Self {
        Error::Io {
            path: path.into(),
            source,
        }
    }

    /// Path of the file or directory involved, if the error carries one.
    pub fn path(&self) -> Option<&std::path::Path> {
        match self {
            Error::Io { path, .. } | Error::Decode { path, .. } => Some(path),
            _ => None,
        }
    }
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Error::InvalidInput(msg) => write!(f, "invalid input: {}", msg),
            Error::InvalidConfig(msg) => write!(f, "invalid config: {}", msg),
            Error::EncodeFailed(e) => write!(f, "encode failed: {}", e),
            Error::OutOfMemory => write!(f, "out of memory"),
            Error::Io { path, source } => write!(f, "{}: {}", path.display(), source),
            Error::Decode { path, source } => {
                write!(f, "cannot decode {}: {}", path.display(), source)
            }
        }
    }
}

impl std::error::Error for Error {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Error::Io { source, .. } => Some(source),
            Error::Decode { source, .. } => Some(source),
            _ => None,
        }
    }
}

/// Encoding error codes from libwebp.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[repr(i32)]
pub enum EncodingError {
    /// No error
    Ok = 0,
    /// Memory allocation error
    OutOfMemory = 1,
    /// Bitstream out of memory
    BitstreamOutOfMemory = 2,
    /// NULL parameter
    NullParameter = 3,
    /// Invalid configuration
    InvalidConfiguration = 4,
    /// Bad dimension (width or height is 0 or > 16383)
    BadDimension = 5,
    /// Partition is bigger than 512k
    Partition0Overflow = 6,
    /// Partition is bigger than 16M
    PartitionOverflow = 7,
    /// Bad write callback
    BadWrite = 8,
    /// File is bigger than 4G
    FileTooBig = 9,
    /// User abort
    UserAbort = 10,
    /// Last error (unknown)
    Last = 11,
}

impl From<i32> for EncodingError {
    fn from(code: i32) -> Self {
        match code {
            0 => EncodingError::Ok,
            1 => EncodingError::OutOfMemory,
            2 => EncodingError::BitstreamOutOfMemory,
            3 => EncodingError::NullParameter,
            4 => EncodingError::InvalidConfiguration,
            5 => EncodingError::BadDimension,
            6 => EncodingError::Partition0Overflow,
            7 => EncodingError::PartitionOverflow,
            8 => EncodingError::BadWrite,
            9 => EncodingError::FileTooBig,
            10 => EncodingError::UserAbort,
            _ => EncodingError::Last,
        }
    }
}

impl fmt::Display for EncodingError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let msg = match self {
            EncodingError::Ok => "ok",
            EncodingError::OutOfMemory => "out of memory",
            EncodingError::BitstreamOutOfMemory => "bitstream out of memory",
            EncodingError::NullParameter => "null parameter",
            EncodingError::InvalidConfiguration => "invalid configuration",
            EncodingError::BadDimension => "bad dimension",
            EncodingError::Partition0Overflow => "partition0 overflow",
            EncodingError::PartitionOverflow => "partition overflow",
            EncodingError::BadWrite => "bad write",
            EncodingError::FileTooBig => "file too big",
            EncodingError::UserAbort => "user abort",
            EncodingError::Last => "unknown error",
        };
        write!(f, "{}", msg)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::error::Error as _;

    #[test]
    fn test_io_error_display_names_path() {
        let err = Error::io(
            "raw_pages",
            io::Error::new(io::ErrorKind::NotFound, "no such directory"),
        );
        assert_eq!(err.to_string(), "raw_pages: no such directory");
        assert_eq!(err.path(), Some(std::path::Path::new("raw_pages")));
        assert!(err.source().is_some());
    }

    #[test]
    fn test_encode_error_has_no_path() {
        let err = Error::EncodeFailed(EncodingError::BadDimension);
        assert_eq!(err.to_string(), "encode failed: bad dimension");
        assert!(err.path().is_none());
        assert!(err.source().is_none());
    }

    #[test]
    fn test_encoding_error_from_i32() {
        assert_eq!(EncodingError::from(0), EncodingError::Ok);
        assert_eq!(EncodingError::from(5), EncodingError::BadDimension);
        assert_eq!(EncodingError::from(10), EncodingError::UserAbort);
        assert_eq!(EncodingError::from(42), EncodingError::Last);
        assert_eq!(EncodingError::from(-1), EncodingError::Last);
    }
}
