use std::io;

use thiserror::Error;

#[derive(Error, Debug)]
pub enum Error {
    /// The stream ended before a fixed-width field or string body was complete.
    #[error("Stream truncated: unexpected end of data")]
    StreamTruncated,

    /// A string could not be represented in the legacy single-byte encoding.
    #[error("Encoding error: {0}")]
    Encoding(String),

    #[error("I/O error: {0}")]
    Io(io::Error),
}

impl From<io::Error> for Error {
    fn from(err: io::Error) -> Self {
        if err.kind() == io::ErrorKind::UnexpectedEof {
            Self::StreamTruncated
        } else {
            Self::Io(err)
        }
    }
}

pub type Result<T> = std::result::Result<T, Error>;
