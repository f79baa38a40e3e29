use thiserror::Error;

use crate::session::SessionState;

#[derive(Debug, Error)]
pub enum SessionError {
    #[error("configuration integrity error: {0}")]
    Integrity(#[from] fieldtune_graph::GraphError),

    #[error("invalid configuration: {0}")]
    Model(#[from] fieldtune_model::ModelError),

    #[error(
        "safety violation: disabling would break active expansion(s) of: {}",
        broken.join(", ")
    )]
    SafetyViolation { broken: Vec<String> },

    #[error("candidate set was not simulated before apply")]
    NotSimulated,

    #[error("cannot {action} in session state {state:?}")]
    InvalidTransition {
        action: &'static str,
        state: SessionState,
    },

    #[error(transparent)]
    Store(#[from] fieldtune_store::StoreError),
}
