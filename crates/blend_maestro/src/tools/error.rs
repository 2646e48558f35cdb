//! Tool failures and their JSON-RPC mapping.

use std::path::PathBuf;

use blend_croquis::CroquisError;
use blend_musea::MuseaError;
use serde_json::json;
use thiserror::Error;

use crate::protocol::{JsonRpcError, INTERNAL_ERROR, INVALID_PARAMS};

/// Why a tool call failed.
#[derive(Debug, Error)]
pub enum ToolError {
    /// Missing or malformed arguments, unknown tool or section type.
    #[error("{0}")]
    InvalidParameters(String),

    /// A component or file is absent on disk.
    #[error("{message}")]
    NotFound {
        message: String,
        attempted: Vec<PathBuf>,
    },

    /// Parsing or rendering failed.
    #[error("{0}")]
    Internal(String),
}

pub type Result<T> = std::result::Result<T, ToolError>;

impl ToolError {
    pub fn invalid(message: impl Into<String>) -> Self {
        ToolError::InvalidParameters(message.into())
    }

    /// Convert to the error object sent to the client.
    pub fn to_rpc_error(&self) -> JsonRpcError {
        match self {
            ToolError::InvalidParameters(message) => {
                JsonRpcError::new(INVALID_PARAMS, format!("Invalid params: {message}"))
            }
            ToolError::NotFound { message, attempted } => {
                let attempted: Vec<String> = attempted
                    .iter()
                    .map(|p| p.display().to_string())
                    .collect();
                JsonRpcError::new(INVALID_PARAMS, message.clone())
                    .with_data(json!({ "attemptedPaths": attempted }))
            }
            ToolError::Internal(message) => {
                JsonRpcError::new(INTERNAL_ERROR, format!("Internal error: {message}"))
            }
        }
    }
}

impl From<CroquisError> for ToolError {
    fn from(err: CroquisError) -> Self {
        if err.is_not_found() {
            let attempted = err.attempted_paths().to_vec();
            return ToolError::NotFound {
                message: err.to_string(),
                attempted,
            };
        }
        ToolError::Internal(err.to_string())
    }
}

impl From<MuseaError> for ToolError {
    fn from(err: MuseaError) -> Self {
        match err {
            MuseaError::Croquis(inner) => inner.into(),
            other => ToolError::InvalidParameters(other.to_string()),
        }
    }
}

impl From<serde_json::Error> for ToolError {
    fn from(err: serde_json::Error) -> Self {
        ToolError::InvalidParameters(err.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_not_found_carries_attempted_paths() {
        let err: ToolError = CroquisError::NotFound {
            component: "Tooltip".into(),
            attempted: vec![PathBuf::from("lib/Tooltip/types.ts")],
        }
        .into();
        let rpc = err.to_rpc_error();
        assert_eq!(rpc.code, INVALID_PARAMS);
        assert_eq!(
            rpc.data,
            Some(json!({ "attemptedPaths": ["lib/Tooltip/types.ts"] }))
        );
    }

    #[test]
    fn test_missing_props_is_internal() {
        let err: ToolError = CroquisError::PropsNotFound {
            component: "Chart".into(),
        }
        .into();
        assert_eq!(err.to_rpc_error().code, INTERNAL_ERROR);
        assert!(err.to_string().contains("ChartProps"));
    }

    #[test]
    fn test_unknown_section_is_invalid_params() {
        let err: ToolError = MuseaError::UnknownSection("pie".into()).into();
        assert!(matches!(err, ToolError::InvalidParameters(_)));
    }
}
