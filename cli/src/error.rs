//! Fatal errors. Any of these aborts the run before results are written.

use thiserror::Error;

type BoxError = Box<dyn std::error::Error + Send + Sync>;

#[derive(Debug, Error)]
pub enum Error {
    #[error("cannot read {name}: {source}")]
    InputUnreadable {
        name: String,
        #[source]
        source: BoxError,
    },

    #[error("no users in {0}")]
    EmptyUserSet(String),

    #[error("no queries in {0}")]
    EmptyQuerySet(String),

    #[error("cannot write {name}: {source}")]
    OutputUnwritable {
        name: String,
        #[source]
        source: std::io::Error,
    },
}

impl Error {
    pub(crate) fn unreadable(name: &str, source: impl Into<BoxError>) -> Self {
        Error::InputUnreadable {
            name: name.to_string(),
            source: source.into(),
        }
    }
}

pub type Result<T, E = Error> = std::result::Result<T, E>;
