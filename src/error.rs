use crate::types::TransactionId;

/// Errors raised while configuring or running the miner.
#[derive(thiserror::Error, Debug, Clone, PartialEq)]
pub enum Error {
    /// A construction parameter is out of range or of the wrong kind.
    #[error("invalid parameter: {0}")]
    InvalidParameter(String),
    /// An item cannot be placed in the item order.
    #[error("malformed input in transaction {transaction}: {reason}")]
    MalformedInput {
        transaction: TransactionId,
        reason: String,
    },
    /// A root search task failed; the whole run is aborted.
    #[error("search from root {root} failed: {reason}")]
    Worker { root: String, reason: String },
}

pub type Result<T> = std::result::Result<T, Error>;
