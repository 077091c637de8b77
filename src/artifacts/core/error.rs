use crate::artifacts::dom::node::NodeId;
use thiserror::Error;

/// Errors raised by the comparison engine
#[derive(Debug, Error)]
pub enum DiffError {
    /// A snapshot node is missing a field it must carry, or carries it with the wrong type
    #[error("malformed tree at node {}: {reason}", node_id.map_or_else(|| "<unknown>".to_string(), |id| id.to_string()))]
    MalformedTree {
        node_id: Option<NodeId>,
        reason: String,
    },

    /// A node referenced by a diff range is absent from the tree
    #[error("node {0} not found")]
    NodeNotFound(NodeId),

    /// An option value outside the known set
    #[error("invalid configuration: {0}")]
    InvalidConfiguration(String),

    /// Snapshot text that is not JSON at all
    #[error("invalid snapshot JSON: {0}")]
    Json(#[from] serde_json::Error),
}

impl DiffError {
    pub fn malformed(node_id: Option<NodeId>, reason: impl Into<String>) -> Self {
        DiffError::MalformedTree {
            node_id,
            reason: reason.into(),
        }
    }

    pub fn invalid_config(reason: impl Into<String>) -> Self {
        DiffError::InvalidConfiguration(reason.into())
    }
}

pub type Result<T> = std::result::Result<T, DiffError>;
