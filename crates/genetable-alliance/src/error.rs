//! Error type for gene fetching, table building and CSV I/O

use genetable_core::HttpError;

/// Error from a single remote call or a table file operation.
///
/// `NotFound` and `Remote` carry what the server said; `Transport` means no
/// response arrived at all.
#[derive(Debug)]
pub enum GeneError {
    /// Remote answered 404 for a gene identifier
    NotFound { gene_id: String },
    /// Any other non-200 response
    Remote { status: u16, body: String },
    /// Response body was not the expected JSON shape
    Parse(String),
    /// No HTTP response (connect, TLS, timeout, body read)
    Transport(String),
    Io(std::io::Error),
    Csv(csv::Error),
}

/// Longest response body echoed in error messages
const BODY_PREVIEW_LEN: usize = 200;

impl std::fmt::Display for GeneError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::NotFound { gene_id } => write!(f, "no data found for gene {gene_id}"),
            Self::Remote { status, body } => {
                let preview: String = body.chars().take(BODY_PREVIEW_LEN).collect();
                write!(f, "HTTP {status}: {}", preview.trim())
            }
            Self::Parse(msg) => write!(f, "invalid response: {msg}"),
            Self::Transport(msg) => write!(f, "{msg}"),
            Self::Io(e) => write!(f, "IO: {e}"),
            Self::Csv(e) => write!(f, "CSV: {e}"),
        }
    }
}

impl std::error::Error for GeneError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Io(e) => Some(e),
            Self::Csv(e) => Some(e),
            _ => None,
        }
    }
}

impl GeneError {
    pub fn is_not_found(&self) -> bool {
        matches!(self, Self::NotFound { .. })
    }

    /// HTTP status, if the server answered
    pub fn status(&self) -> Option<u16> {
        match self {
            Self::NotFound { .. } => Some(404),
            Self::Remote { status, .. } => Some(*status),
            _ => None,
        }
    }
}

impl From<HttpError> for GeneError {
    fn from(e: HttpError) -> Self {
        Self::Transport(e.to_string())
    }
}

impl From<std::io::Error> for GeneError {
    fn from(e: std::io::Error) -> Self {
        Self::Io(e)
    }
}

impl From<csv::Error> for GeneError {
    fn from(e: csv::Error) -> Self {
        Self::Csv(e)
    }
}
