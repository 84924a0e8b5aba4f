use cafs_resource::Error as ResourceError;

#[derive(thiserror::Error, Debug)]
pub enum Error {
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("request to {url} timed out")]
    Timeout { url: String },

    #[error("URL parse error: {0}")]
    UrlParse(#[from] url::ParseError),

    #[error("Invalid URL: {message}")]
    InvalidUrl { message: String },

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("HTTP {status} {status_text}: {body}")]
    Status {
        status: u16,
        status_text: String,
        body: String,
    },

    #[error("store rejected write: {message}")]
    Rejected { message: String },

    #[error("request failed: {message}")]
    Request { message: String },
}

impl From<Error> for ResourceError {
    fn from(error: Error) -> Self {
        ResourceError::Transport {
            message: error.to_string(),
        }
    }
}
