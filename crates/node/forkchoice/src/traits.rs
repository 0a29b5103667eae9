use crate::PolicyError;
use alloy_primitives::{B256, U256};
use forkline_hardforks::ChainConfig;
use forkline_storage::SealedHeader;

/// Header and total difficulty lookups the fork choice needs from the chain.
#[cfg_attr(test, mockall::automock)]
pub trait ChainHeaderReader {
    /// Returns the chain's fork schedule.
    fn config(&self) -> &ChainConfig;

    /// Returns the header with the given hash and number.
    fn header(&self, hash: B256, number: u64) -> Option<SealedHeader>;

    /// Returns the total difficulty of the block with the given hash and number.
    fn total_difficulty(&self, hash: B256, number: u64) -> Option<U256>;

    /// Returns `false` if deep-reorg protection has been switched off for this node.
    fn deep_reorg_protection_enabled(&self) -> bool {
        true
    }
}

/// Source of the coin flip used to break exact ties.
#[cfg_attr(test, mockall::automock)]
pub trait TieBreaker {
    /// Returns `true` with probability one half.
    fn coin_flip(&mut self) -> bool;
}

/// A veto over reorgs the total-difficulty rule would accept.
pub trait ReorgPolicy {
    /// Checks a reorg from `current` to `proposed`, whose chains meet at `ancestor`.
    ///
    /// `td` looks up the total difficulty of a block by hash and number. Any error suppresses
    /// the reorg.
    fn check(
        &self,
        ancestor: &SealedHeader,
        current: &SealedHeader,
        proposed: &SealedHeader,
        td: &dyn Fn(B256, u64) -> Option<U256>,
    ) -> Result<(), PolicyError>;
}
