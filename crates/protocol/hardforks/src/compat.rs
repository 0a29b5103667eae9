//! Compatibility checks between a stored and a newly configured schedule.

use strum::IntoEnumIterator;

use crate::{ChainConfig, ForkCondition, ForkSchedule, Hardfork};

/// A stored schedule conflicts with a newly configured one at a point the chain has already
/// passed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
#[error("mismatching {what} in database (have {stored}, want {new}, rewindto {})", self.rewind_point())]
pub struct CompatError {
    /// What differs.
    pub what: &'static str,
    /// Activation point in the stored schedule.
    pub stored: ForkCondition,
    /// Activation point in the new schedule.
    pub new: ForkCondition,
    /// Block to rewind to so that the new schedule applies, 0 if not block based.
    pub rewind_to_block: u64,
    /// Timestamp to rewind to so that the new schedule applies, 0 if not timestamp based.
    pub rewind_to_time: u64,
}

impl CompatError {
    /// Builds the error for a conflict between two activation points. The rewind target is one
    /// below the earlier of the two points.
    pub fn new(what: &'static str, stored: ForkCondition, new: ForkCondition) -> Self {
        let earliest = |a: Option<u64>, b: Option<u64>| match (a, b) {
            (Some(a), Some(b)) => Some(a.min(b)),
            (a, b) => a.or(b),
        };
        let rewind = |point: Option<u64>| point.map_or(0, |point| point.saturating_sub(1));

        Self {
            what,
            stored,
            new,
            rewind_to_block: rewind(earliest(stored.as_block(), new.as_block())),
            rewind_to_time: rewind(earliest(stored.as_timestamp(), new.as_timestamp())),
        }
    }

    /// Returns the rewind target as a [`ForkCondition`] for display.
    pub const fn rewind_point(&self) -> ForkCondition {
        if self.rewind_to_time > 0 {
            ForkCondition::Timestamp(self.rewind_to_time)
        } else {
            ForkCondition::Block(self.rewind_to_block)
        }
    }
}

impl ChainConfig {
    /// Checks whether `new` can replace this stored schedule for a chain whose head is at the
    /// given block number and timestamp.
    ///
    /// A fork is incompatible if its activation point moved and either schedule already has it
    /// active at the head. The check is repeated at each rewind target so the returned error
    /// carries the lowest point the chain must rewind to.
    pub fn check_compatible(&self, new: &Self, number: u64, timestamp: u64) -> Result<(), CompatError> {
        let (mut number, mut timestamp) = (number, timestamp);
        let mut last: Option<CompatError> = None;
        while let Err(err) = self.check_compatible_at(new, number, timestamp) {
            if last.is_some_and(|last| {
                last.rewind_to_block == err.rewind_to_block && last.rewind_to_time == err.rewind_to_time
            }) {
                break;
            }
            if err.rewind_to_time > 0 {
                timestamp = err.rewind_to_time;
            } else {
                number = err.rewind_to_block;
            }
            last = Some(err);
        }
        last.map_or(Ok(()), Err)
    }

    fn check_compatible_at(&self, new: &Self, number: u64, timestamp: u64) -> Result<(), CompatError> {
        for fork in Hardfork::iter() {
            let (stored, updated) = (self.fork(fork), new.fork(fork));
            if stored != updated &&
                (stored.active_at_head(number, timestamp) || updated.active_at_head(number, timestamp))
            {
                return Err(CompatError::new(fork.name(), stored, updated));
            }
        }

        let windows = [
            ("ECBP-1100", self.ecbp1100_block, new.ecbp1100_block),
            ("ECBP-1100 deactivation", self.ecbp1100_disable_block, new.ecbp1100_disable_block),
        ];
        for (what, stored, updated) in windows {
            let (stored, updated) = (as_block(stored), as_block(updated));
            if stored != updated && (stored.active_at_block(number) || updated.active_at_block(number)) {
                return Err(CompatError::new(what, stored, updated));
            }
        }

        if self.is_eip155_active_at_block(number) && self.chain_id != new.chain_id {
            return Err(CompatError::new("chain ID", self.eip155_fork(), new.eip155_fork()));
        }
        Ok(())
    }
}

const fn as_block(block: Option<u64>) -> ForkCondition {
    match block {
        Some(block) => ForkCondition::Block(block),
        None => ForkCondition::Never,
    }
}
