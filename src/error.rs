//! Error type for conversion operations

use std::fmt;
use std::io;

use crate::renderer::RenderError;
use crate::symbols::SymbolTableError;

/// Errors that can occur while converting a document
#[derive(Debug)]
pub enum Error {
    /// The symbol table is ambiguous or inconsistent
    Config(SymbolTableError),
    /// A construct was left open
    Render(RenderError),
    /// Reading the source or writing the destination failed
    Io(io::Error),
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Error::Config(err) => write!(f, "Invalid symbol table: {err}"),
            Error::Render(err) => write!(f, "Malformed document: {err}"),
            Error::Io(err) => write!(f, "{err}"),
        }
    }
}

impl std::error::Error for Error {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Error::Config(err) => Some(err),
            Error::Render(err) => Some(err),
            Error::Io(err) => Some(err),
        }
    }
}

impl From<SymbolTableError> for Error {
    fn from(err: SymbolTableError) -> Self {
        Error::Config(err)
    }
}

impl From<RenderError> for Error {
    fn from(err: RenderError) -> Self {
        Error::Render(err)
    }
}

impl From<io::Error> for Error {
    fn from(err: io::Error) -> Self {
        Error::Io(err)
    }
}

impl From<Error> for io::Error {
    fn from(err: Error) -> Self {
        match err {
            Error::Io(err) => err,
            other => io::Error::new(io::ErrorKind::InvalidData, other.to_string()),
        }
    }
}
