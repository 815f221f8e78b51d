use huekit_color::{Color, ColorError};
use thiserror::Error;

use crate::ai::AiRejection;
use crate::palette::{MAX_PALETTE_SIZE, MIN_PALETTE_SIZE};

pub type Result<T> = std::result::Result<T, EngineError>;

#[derive(Debug, Error)]
pub enum EngineError {
    #[error(transparent)]
    InvalidColor(#[from] ColorError),

    #[error("palette must keep at least {} colors (has {len})", MIN_PALETTE_SIZE)]
    MinPaletteSize { len: usize },

    #[error("palette cannot exceed {} colors (has {len})", MAX_PALETTE_SIZE)]
    MaxPaletteSize { len: usize },

    #[error("index {index} is out of range for a palette of {len} colors")]
    IndexOutOfRange { index: usize, len: usize },

    #[error("{color} is not part of the palette")]
    NotInPalette { color: Color },

    #[error("nothing to commit")]
    NothingToCommit,

    #[error("generated palette rejected: {0}")]
    AiRejected(#[from] AiRejection),

    #[error("invalid palette document: {0}")]
    Document(String),

    #[error("failed to save palette: {0}")]
    Persistence(String),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

impl EngineError {
    #[must_use]
    pub fn document(message: impl Into<String>) -> Self {
        Self::Document(message.into())
    }

    /// Whether the session can carry on unchanged after this error.
    ///
    /// Every engine error leaves state untouched; only I/O at the edges is
    /// outside the engine's control.
    #[must_use]
    pub fn is_recoverable(&self) -> bool {
        !matches!(self, Self::Io(_))
    }
}

#[cfg(test)]
mod tests {
    use super::EngineError;
    use huekit_color::Color;

    #[test]
    fn size_errors_mention_bounds() {
        let err = EngineError::MinPaletteSize { len: 2 };
        assert_eq!(err.to_string(), "palette must keep at least 2 colors (has 2)");
        let err = EngineError::MaxPaletteSize { len: 20 };
        assert_eq!(err.to_string(), "palette cannot exceed 20 colors (has 20)");
    }

    #[test]
    fn invalid_color_is_transparent() {
        let err: EngineError = Color::parse("#nope").unwrap_err().into();
        assert_eq!(err.to_string(), "invalid color: \"#nope\"");
        assert!(err.is_recoverable());
    }

    #[test]
    fn document_constructor_wraps_message() {
        let err = EngineError::document("too few colors");
        assert_eq!(err.to_string(), "invalid palette document: too few colors");
    }
}
