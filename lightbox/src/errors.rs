//! Error types for the lightbox core.
//!
//! Nothing in the sequencer or carousel is fatal: asset-load failures pend,
//! playback rejections are swallowed, out-of-range navigation is a defined
//! no-op. The variants here cover the edges where data enters the process
//! (manifest payloads, configuration files).

use thiserror::Error;

/// The main error type for lightbox operations.
#[derive(Debug, Error)]
pub enum LightboxError {
    /// The content manifest could not be decoded.
    #[error("Manifest error: {0}")]
    Manifest(String),

    /// A configuration file could not be parsed.
    #[error("Config error: {0}")]
    Config(String),

    /// Serialization/deserialization error.
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    /// IO error.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

/// Errors raised by the playback seam.
///
/// These never propagate out of [`crate::sequence::VideoGate::start`]; they
/// are caught and logged, leaving the video paused until the user's own
/// gesture-triggered retry path.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum PlaybackError {
    /// The platform refused to start unmuted playback without a gesture.
    #[error("autoplay rejected by platform")]
    AutoplayRejected,

    /// The media source is not available.
    #[error("media source unavailable: {0}")]
    SourceUnavailable(String),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let err = LightboxError::Manifest("missing photos key".to_string());
        assert_eq!(err.to_string(), "Manifest error: missing photos key");

        let err = PlaybackError::AutoplayRejected;
        assert_eq!(err.to_string(), "autoplay rejected by platform");
    }

    #[test]
    fn test_serde_error_conversion() {
        let parse_err = serde_json::from_str::<serde_json::Value>("{broken").unwrap_err();
        let err: LightboxError = parse_err.into();
        assert!(matches!(err, LightboxError::Serialization(_)));
    }
}
