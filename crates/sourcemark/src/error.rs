//! Error taxonomy for the rendering pipeline.
//!
//! These errors never reach the caller of [`crate::render`]: the public
//! surface recovers from every one of them by returning an escaped
//! plain-text rendering instead. They exist so the pipeline's stages can
//! report failures uniformly and so the recovery path can log what went
//! wrong.

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// A failure inside the rendering pipeline.
#[derive(Debug, Clone, Error, Serialize, Deserialize)]
pub enum RenderError {
    /// The input exceeded the size guard and the pipeline was skipped.
    #[error("input exceeds maximum size of {limit} bytes (got {actual})")]
    InputTooLarge { limit: usize, actual: usize },

    /// A pipeline stage failed unexpectedly.
    #[error("render stage '{stage}' failed: {message}")]
    Stage { stage: String, message: String },
}

impl RenderError {
    /// Create a stage failure error.
    pub fn stage(stage: impl Into<String>, message: impl Into<String>) -> Self {
        Self::Stage {
            stage: stage.into(),
            message: message.into(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_stage_error_display() {
        let err = RenderError::stage("citations", "bad index");
        assert_eq!(
            err.to_string(),
            "render stage 'citations' failed: bad index"
        );
    }

    #[test]
    fn test_input_too_large_display() {
        let err = RenderError::InputTooLarge {
            limit: 10,
            actual: 20,
        };
        assert!(err.to_string().contains("maximum size of 10"));
        assert!(err.to_string().contains("got 20"));
    }

    #[test]
    fn test_serializable() {
        let err = RenderError::stage("links", "boom");
        let json = serde_json::to_string(&err).unwrap();
        assert!(json.contains("links"));
    }
}
