//! Typed error hierarchy for the lead board.
//!
//! Every board operation validates before it mutates, so receiving any of
//! these errors means the snapshot is exactly as it was before the call.
//! The variants fall into four groups:
//! - validation failures (bad input, rejected up front)
//! - referential gaps (ids that do not resolve in the current snapshot)
//! - malformed drag payloads (decoded at the drop boundary)
//! - storage failures from the persistence backend

use thiserror::Error;

/// Errors from board operations.
#[derive(Debug, Error)]
pub enum BoardError {
    #[error("{what} name must not be empty")]
    EmptyName { what: &'static str },

    #[error("Deleting column {column_id} with the move policy requires a target column")]
    MissingTargetColumn { column_id: String },

    #[error("Pipeline {pipeline_id} has no columns to place a lead in")]
    EmptyPipeline { pipeline_id: String },

    #[error("Invalid relocation target: {message}")]
    InvalidRelocationTarget { message: String },

    #[error("Pipeline {id} not found")]
    PipelineNotFound { id: String },

    #[error("Column {column_id} not found in pipeline {pipeline_id}")]
    ColumnNotFound {
        pipeline_id: String,
        column_id: String,
    },

    #[error("Lead {id} not found")]
    LeadNotFound { id: String },

    #[error("Malformed drag payload: {0}")]
    MalformedPayload(#[source] serde_json::Error),

    #[error("Storage error: {0}")]
    Storage(#[source] anyhow::Error),
}

impl BoardError {
    /// True for input the caller could have rejected before asking.
    pub fn is_validation(&self) -> bool {
        matches!(
            self,
            Self::EmptyName { .. }
                | Self::MissingTargetColumn { .. }
                | Self::EmptyPipeline { .. }
                | Self::InvalidRelocationTarget { .. }
        )
    }

    /// True when an id did not resolve against the current snapshot.
    pub fn is_referential_gap(&self) -> bool {
        matches!(
            self,
            Self::PipelineNotFound { .. } | Self::ColumnNotFound { .. } | Self::LeadNotFound { .. }
        )
    }
}

pub type BoardResult<T> = std::result::Result<T, BoardError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_name_mentions_the_entity() {
        let err = BoardError::EmptyName { what: "Column" };
        assert_eq!(err.to_string(), "Column name must not be empty");
        assert!(err.is_validation());
        assert!(!err.is_referential_gap());
    }

    #[test]
    fn column_not_found_carries_both_ids() {
        let err = BoardError::ColumnNotFound {
            pipeline_id: "pipeline1".into(),
            column_id: "col9".into(),
        };
        match &err {
            BoardError::ColumnNotFound {
                pipeline_id,
                column_id,
            } => {
                assert_eq!(pipeline_id, "pipeline1");
                assert_eq!(column_id, "col9");
            }
            _ => panic!("Expected ColumnNotFound"),
        }
        assert!(err.is_referential_gap());
        assert!(!err.is_validation());
    }

    #[test]
    fn malformed_payload_wraps_serde_error() {
        let serde_err = serde_json::from_str::<serde_json::Value>("{oops").unwrap_err();
        let err = BoardError::MalformedPayload(serde_err);
        assert!(err.to_string().starts_with("Malformed drag payload"));
        assert!(std::error::Error::source(&err).is_some());
    }

    #[test]
    fn storage_error_is_neither_validation_nor_gap() {
        let err = BoardError::Storage(anyhow::anyhow!("disk full"));
        assert!(!err.is_validation());
        assert!(!err.is_referential_gap());
        assert!(err.to_string().contains("disk full"));
    }

    #[test]
    fn board_error_implements_std_error() {
        fn assert_std_error<E: std::error::Error>(_: &E) {}
        assert_std_error(&BoardError::LeadNotFound { id: "lead1".into() });
    }
}
