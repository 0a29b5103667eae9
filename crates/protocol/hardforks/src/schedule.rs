//! The [`ForkSchedule`] capability trait.

use alloc::vec::Vec;
use alloy_primitives::U256;

use crate::{ConsensusEngine, ForkCondition, Hardfork};

/// Read access to a chain's fork schedule.
///
/// Implementors only provide the raw schedule; every activation query is derived from it.
pub trait ForkSchedule {
    /// Returns the activation condition of the given fork, [`ForkCondition::Never`] if the fork
    /// is not scheduled.
    fn fork(&self, fork: Hardfork) -> ForkCondition;

    /// Iterates over all scheduled forks.
    fn forks_iter(&self) -> impl Iterator<Item = (Hardfork, ForkCondition)> + '_;

    /// Returns the consensus engine.
    fn consensus_engine(&self) -> ConsensusEngine;

    /// Returns the total difficulty at which the chain stops accepting proof-of-work blocks.
    fn terminal_total_difficulty(&self) -> Option<U256>;

    /// Returns the block at which ECBP-1100 deep-reorg protection activates.
    fn ecbp1100_block(&self) -> Option<u64>;

    /// Returns the block at which ECBP-1100 deep-reorg protection is switched off again.
    fn ecbp1100_disable_block(&self) -> Option<u64>;

    /// Returns `true` if the fork is block based and active at the given block.
    fn is_active_at_block(&self, fork: Hardfork, number: u64) -> bool {
        self.fork(fork).active_at_block(number)
    }

    /// Returns `true` if the fork is timestamp based and active at the given timestamp.
    fn is_active_at_timestamp(&self, fork: Hardfork, timestamp: u64) -> bool {
        self.fork(fork).active_at_timestamp(timestamp)
    }

    /// Returns `true` if the EIP-1559 fee market is active at the given block.
    fn is_london_active_at_block(&self, number: u64) -> bool {
        self.is_active_at_block(Hardfork::London, number)
    }

    /// Returns `true` if withdrawals are active at the given head.
    fn is_shanghai_active(&self, number: u64, timestamp: u64) -> bool {
        self.fork(Hardfork::Shanghai).active_at_head(number, timestamp)
    }

    /// Returns `true` if blob gas accounting is active at the given timestamp.
    fn is_cancun_active_at_timestamp(&self, timestamp: u64) -> bool {
        self.is_active_at_timestamp(Hardfork::Cancun, timestamp)
    }

    /// Returns the fork that introduced EIP-155 replay protection on this chain.
    ///
    /// Ethereum shipped it with Spurious Dragon, Ethereum Classic with Die Hard.
    fn eip155_fork(&self) -> ForkCondition {
        match self.fork(Hardfork::SpuriousDragon) {
            ForkCondition::Never => self.fork(Hardfork::DieHard),
            condition => condition,
        }
    }

    /// Returns `true` if EIP-155 replay protection is active at the given block.
    fn is_eip155_active_at_block(&self, number: u64) -> bool {
        self.eip155_fork().active_at_block(number)
    }

    /// Returns `true` if ECBP-1100 deep-reorg protection applies at the given block.
    fn is_ecbp1100_active_at_block(&self, number: u64) -> bool {
        let activated = self.ecbp1100_block().is_some_and(|block| number >= block);
        let deactivated = self.ecbp1100_disable_block().is_some_and(|block| number >= block);
        activated && !deactivated
    }

    /// Returns all distinct, non-zero block activation points in ascending order.
    fn block_forks(&self) -> Vec<u64> {
        collect_points(self.forks_iter().filter_map(|(_, condition)| condition.as_block()))
    }

    /// Returns all distinct, non-zero timestamp activation points in ascending order.
    fn time_forks(&self) -> Vec<u64> {
        collect_points(self.forks_iter().filter_map(|(_, condition)| condition.as_timestamp()))
    }
}

fn collect_points(points: impl Iterator<Item = u64>) -> Vec<u64> {
    let mut points = points.filter(|point| *point != 0).collect::<Vec<_>>();
    points.sort_unstable();
    points.dedup();
    points
}
