use alloy_primitives::{B256, U256};
use thiserror::Error;

/// Errors that prevent a fork choice decision.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum ForkChoiceError {
    /// The total difficulty of one of the compared headers is unknown.
    #[error("missing total difficulty for block {number} ({hash})")]
    MissingTotalDifficulty {
        /// Hash of the block.
        hash: B256,
        /// Number of the block.
        number: u64,
    },
    /// A parent header needed to find the common ancestor is missing.
    #[error("broken chain: missing header {number} ({hash})")]
    BrokenChain {
        /// Hash of the missing header.
        hash: B256,
        /// Number of the missing header.
        number: u64,
    },
}

/// Reasons a [`ReorgPolicy`](crate::ReorgPolicy) refuses a reorg.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum PolicyError {
    /// The proposed subchain does not carry enough work for the age of the common ancestor.
    #[error(
        "ECBP-1100 reorg suppressed: proposed subchain work {got} below required {want} (common ancestor {ancestor}, span {span}s)"
    )]
    Suppressed {
        /// Number of the common ancestor.
        ancestor: u64,
        /// Seconds between the common ancestor and the local head.
        span: u64,
        /// Scaled total difficulty of the proposed subchain.
        got: U256,
        /// Scaled total difficulty the proposed subchain needed.
        want: U256,
    },
    /// A total difficulty needed by the policy is unknown.
    #[error("missing total difficulty for block {number} ({hash})")]
    MissingTotalDifficulty {
        /// Hash of the block.
        hash: B256,
        /// Number of the block.
        number: u64,
    },
}
