use reqwest::{StatusCode, header::InvalidHeaderValue};
use thiserror::Error;

pub type Result<T> = std::result::Result<T, Error>;

#[derive(Debug, Error)]
pub enum Error {
    #[error("expected a repository of the form OWNER/REPO, got `{0}`")]
    InvalidTarget(String),
    #[error(
        "no access token configured: pass --access-token, set GITHUB_TOKEN or add `access-token` to the config file"
    )]
    MissingToken,
    #[error("access token cannot be sent in a header")]
    InvalidToken(#[from] InvalidHeaderValue),
    #[error("invalid API url `{url}`: {reason}")]
    InvalidApiUrl { url: String, reason: String },
    #[error("GitHub API returned {status}: {message}")]
    Api { status: StatusCode, message: String },
    #[error("gave up after {limit} pages of closed issues without reaching the last page")]
    PaginationLimit { limit: u32 },
    #[error(transparent)]
    Http(#[from] reqwest::Error),
    #[error(transparent)]
    Io(#[from] std::io::Error),
}
