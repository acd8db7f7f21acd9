use thiserror::Error;

pub type Result<T> = std::result::Result<T, DownloadError>;

#[derive(Debug, Error)]
pub enum DownloadError {
    #[error("Could not extract video ID from URL: {0}")]
    NoVideoId(String),

    #[error("Quality '{requested}' is not available. Available qualities: {}", .available.join(" "))]
    QualityUnavailable {
        requested: String,
        available: Vec<String>,
    },

    #[error("No quality was chosen")]
    NoQualityChosen,

    #[error("Expected exactly one stream, got {0}")]
    StreamCount(usize),

    #[error("Expected exactly one subtitle track, got {0}")]
    SubtitleTrackCount(usize),

    #[error("Expected exactly one '{format}' subtitle file, got {count}")]
    SubtitleFileCount { format: String, count: usize },

    #[error("Unexpected media content type: {}", .0.as_deref().unwrap_or("<none>"))]
    UnexpectedContentType(Option<String>),

    #[error("Could not determine content length")]
    MissingContentLength,

    #[error("Network operation timed out after {0:?}")]
    Timeout(std::time::Duration),

    #[error("Download incomplete: expected {expected} bytes, received {received}")]
    Incomplete { expected: u64, received: u64 },

    #[error(transparent)]
    Http(#[from] reqwest::Error),

    #[error(transparent)]
    Json(#[from] serde_json::Error),

    #[error(transparent)]
    Url(#[from] url::ParseError),

    #[error(transparent)]
    Io(#[from] std::io::Error),
}

impl DownloadError {
    /// Server responses that broke the API contract. These are never retried
    /// and never answered with a guessed fallback.
    pub fn is_contract_violation(&self) -> bool {
        matches!(
            self,
            DownloadError::StreamCount(_)
                | DownloadError::SubtitleTrackCount(_)
                | DownloadError::SubtitleFileCount { .. }
                | DownloadError::UnexpectedContentType(_)
                | DownloadError::MissingContentLength
                | DownloadError::Incomplete { .. }
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_quality_unavailable_lists_choices() {
        let err = DownloadError::QualityUnavailable {
            requested: "1080p".to_string(),
            available: vec!["360p".to_string(), "720p".to_string(), "audio".to_string()],
        };
        assert_eq!(
            err.to_string(),
            "Quality '1080p' is not available. Available qualities: 360p 720p audio"
        );
        assert!(!err.is_contract_violation());
    }

    #[test]
    fn test_contract_violations() {
        assert!(DownloadError::StreamCount(2).is_contract_violation());
        assert!(DownloadError::MissingContentLength.is_contract_violation());
        assert!(!DownloadError::NoVideoId("x".to_string()).is_contract_violation());
    }

    #[test]
    fn test_content_type_message() {
        assert_eq!(
            DownloadError::UnexpectedContentType(None).to_string(),
            "Unexpected media content type: <none>"
        );
    }
}
