use std::string::FromUtf8Error;

/// Errors surfaced by query setup and the diagnostic writer.
///
/// Walking a tree never fails: a missing parent ends the chain and an
/// exhausted sequence yields `None`.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("namespace prefix `{prefix}` is not bound in the evaluation context")]
    UnboundPrefix { prefix: String },

    #[error("failed to write query diagnostics: {0}")]
    Io(#[from] std::io::Error),

    #[error("query diagnostics are not valid UTF-8: {0}")]
    Utf8(#[from] FromUtf8Error),
}

impl Error {
    pub fn unbound_prefix(prefix: impl Into<String>) -> Self {
        Self::UnboundPrefix { prefix: prefix.into() }
    }
}

pub type Result<T> = std::result::Result<T, Error>;
