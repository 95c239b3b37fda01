//! Error types for the Brawl combat core.

use thiserror::Error;

use crate::state::FighterState;

/// Top-level error type for Brawl operations.
///
/// Sparse or malformed frame data is never an error (it degrades to empty
/// boxes); only setup problems surface here.
#[derive(Debug, Error)]
pub enum BrawlError {
    /// A state has no animation at all in the frame table.
    #[error("asset missing: no animation for state '{state}'")]
    AssetMissing {
        /// State whose animation was looked up
        state: FighterState,
    },

    /// Authored frame data could not be parsed.
    #[error("frame data error: {0}")]
    FrameData(String),

    /// Configuration errors
    #[error("config error: {0}")]
    Config(String),

    /// IO errors
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

impl BrawlError {
    /// Returns true if this is an [`BrawlError::AssetMissing`] failure.
    #[must_use]
    pub fn is_asset_missing(&self) -> bool {
        matches!(self, Self::AssetMissing { .. })
    }
}

/// Result type alias for Brawl operations.
pub type BrawlResult<T> = Result<T, BrawlError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_asset_missing_message_names_state() {
        let err = BrawlError::AssetMissing {
            state: FighterState::HeavyKick,
        };
        assert!(err.is_asset_missing());
        assert_eq!(
            err.to_string(),
            "asset missing: no animation for state 'heavyKick'"
        );
    }

    #[test]
    fn test_io_conversion() {
        let io = std::io::Error::new(std::io::ErrorKind::NotFound, "gone");
        let err: BrawlError = io.into();
        assert!(!err.is_asset_missing());
        assert!(err.to_string().starts_with("IO error"));
    }
}
