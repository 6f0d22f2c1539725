use thiserror::Error;

use crate::bencode::BencodeError;

pub type Result<T, E = Error> = std::result::Result<T, E>;

/// Every failure the tools report. All but [`Error::Usage`] end up in the
/// in-band JSON error report.
#[derive(Debug, Error)]
pub enum Error {
    #[error("{0}")]
    Usage(String),

    #[error("login failed: {0}")]
    Auth(String),

    #[error("request failed: {0}")]
    Transport(String),

    #[error("malformed torrent file: {0}")]
    MalformedEncoding(#[from] BencodeError),

    #[error("torrent file has no info dictionary")]
    MissingInfoDict,

    #[error("torrent info dictionary has no name")]
    MissingName,

    #[error("torrent field `{0}` has the wrong type")]
    InvalidField(&'static str),

    #[error("torrent field `{field}` is not valid UTF-8")]
    Encoding {
        field: &'static str,
        #[source]
        source: std::str::Utf8Error,
    },

    #[error("search failed in every category, last error: {0}")]
    AllCategoriesFailed(String),

    #[error("invalid configuration: {0}")]
    Config(String),

    #[error("io error: {0}")]
    Io(#[from] std::io::Error),
}

impl From<reqwest::Error> for Error {
    fn from(err: reqwest::Error) -> Self {
        Error::Transport(err.to_string())
    }
}
