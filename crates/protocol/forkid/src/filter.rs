//! Validation of remote fork identifiers.

use alloc::{boxed::Box, vec::Vec};
use alloy_primitives::B256;
use forkline_hardforks::ForkSchedule;

use crate::{ForkHash, ForkId, Head, gather_forks};

/// Remote `next` values above this are treated as timestamps rather than block numbers.
///
/// This is the timestamp of the Ethereum mainnet genesis block.
pub const TIMESTAMP_THRESHOLD: u64 = 1_438_269_973;

/// Reasons a remote fork identifier is rejected.
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
pub enum ValidationError {
    /// The remote node is on a subset of the local schedule and has not scheduled the fork the
    /// local node passed next, so it needs a software update.
    #[error("remote needs update")]
    RemoteStale,
    /// The schedules diverge, or the remote expects a fork the local node already passed
    /// without activating.
    #[error("local incompatible or needs update")]
    LocalIncompatibleOrStale,
}

/// Decides whether a remote [`ForkId`] is compatible with the local chain.
///
/// Checksums over the local schedule are computed once; the local head is read through the
/// head provider on every validation so the filter can be shared for the lifetime of the node.
pub struct ForkFilter {
    forks: Vec<u64>,
    block_forks: usize,
    sums: Vec<ForkHash>,
    head: Box<dyn Fn() -> Head + Send + Sync>,
}

impl core::fmt::Debug for ForkFilter {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("ForkFilter")
            .field("forks", &self.forks)
            .field("block_forks", &self.block_forks)
            .field("sums", &self.sums)
            .finish_non_exhaustive()
    }
}

impl ForkFilter {
    /// Creates a filter for the given schedule and genesis, reading the local head from `head`.
    pub fn new<S, F>(schedule: &S, genesis_hash: B256, head: F) -> Self
    where
        S: ForkSchedule,
        F: Fn() -> Head + Send + Sync + 'static,
    {
        let (block_forks, time_forks) = gather_forks(schedule);
        let block_count = block_forks.len();

        let mut forks = block_forks;
        forks.extend(time_forks);

        let mut sums = Vec::with_capacity(forks.len() + 1);
        let mut hash = ForkHash::from(genesis_hash);
        sums.push(hash);
        for fork in &forks {
            hash += *fork;
            sums.push(hash);
        }
        forks.push(u64::MAX);

        Self { forks, block_forks: block_count, sums, head: Box::new(head) }
    }

    /// Creates a filter pinned to the given head.
    pub fn new_static<S: ForkSchedule>(schedule: &S, genesis_hash: B256, head: Head) -> Self {
        Self::new(schedule, genesis_hash, move || head)
    }

    /// Returns the fork identifier the local node currently advertises.
    pub fn current(&self) -> ForkId {
        let Head { number, timestamp } = (self.head)();
        self.forks
            .iter()
            .enumerate()
            .find(|(i, fork)| {
                let head = if *i >= self.block_forks { timestamp } else { number };
                head < **fork
            })
            .map(|(i, fork)| ForkId {
                hash: self.sums[i],
                next: if *fork == u64::MAX { 0 } else { *fork },
            })
            .unwrap_or(ForkId { hash: self.sums[self.sums.len() - 1], next: 0 })
    }

    /// Validates a remote fork identifier against the local schedule and head.
    pub fn validate(&self, id: ForkId) -> Result<(), ValidationError> {
        let Head { number, timestamp } = (self.head)();

        for (i, fork) in self.forks.iter().enumerate() {
            let head = if i >= self.block_forks { timestamp } else { number };
            if head >= *fork {
                continue;
            }

            // Same fork state. Reject only if the remote's next fork already passed locally.
            if self.sums[i] == id.hash {
                let passed = number >= id.next ||
                    (id.next > TIMESTAMP_THRESHOLD && timestamp >= id.next);
                if id.next > 0 && passed {
                    tracing::debug!(target: "forkid", ?id, number, timestamp, "Remote fork passed locally");
                    return Err(ValidationError::LocalIncompatibleOrStale);
                }
                return Ok(());
            }

            // Remote is behind on a subset of our history; it must be aware of our next fork.
            if let Some(j) = self.sums[..i].iter().position(|sum| *sum == id.hash) {
                if self.forks[j] != id.next {
                    tracing::debug!(target: "forkid", ?id, expected = self.forks[j], "Remote is stale");
                    return Err(ValidationError::RemoteStale);
                }
                return Ok(());
            }

            // Remote is ahead on a schedule we know about.
            if self.sums[i + 1..].contains(&id.hash) {
                return Ok(());
            }

            tracing::debug!(target: "forkid", ?id, local = ?self.sums[i], "Incompatible fork checksum");
            return Err(ValidationError::LocalIncompatibleOrStale);
        }

        tracing::error!(target: "forkid", ?id, "Fork filter ran past the terminal sentinel");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use forkline_hardforks::{ChainConfig, ForkCondition, Hardfork, MAINNET_GENESIS_HASH};
    use rstest::rstest;
    use std::sync::{
        Arc,
        atomic::{AtomicU64, Ordering},
    };

    fn legacy() -> ChainConfig {
        ChainConfig::mainnet().with_fork(Hardfork::Shanghai, ForkCondition::Never)
    }

    fn hash(checksum: u32) -> ForkHash {
        ForkHash::from(checksum)
    }

    #[rstest]
    // Same Gray Glacier state, no or uncertain future fork.
    #[case(legacy(), 15_050_000, 0, hash(0xf0afd0e3), 0, Ok(()))]
    #[case(legacy(), 15_050_000, 0, hash(0xf0afd0e3), u64::MAX, Ok(()))]
    // Last Byzantium block, remote announces nothing, Petersburg or an unknown fork.
    #[case(legacy(), 7_279_999, 0, hash(0xa00bc324), 0, Ok(()))]
    #[case(legacy(), 7_279_999, 0, hash(0xa00bc324), 7_280_000, Ok(()))]
    #[case(legacy(), 7_279_999, 0, hash(0xa00bc324), u64::MAX, Ok(()))]
    // Local Petersburg, remote Byzantium aware of Petersburg: remote out of sync.
    #[case(legacy(), 7_280_000, 0, hash(0xa00bc324), 7_280_000, Ok(()))]
    #[case(legacy(), 7_987_396, 0, hash(0xa00bc324), 7_280_000, Ok(()))]
    #[case(legacy(), 7_987_396, 0, hash(0x3edd5b10), 4_370_000, Ok(()))]
    // Local behind remote on a known schedule.
    #[case(legacy(), 7_279_999, 0, hash(0x668db0af), 0, Ok(()))]
    #[case(legacy(), 4_369_999, 0, hash(0xa00bc324), 0, Ok(()))]
    // Remote unaware of Petersburg.
    #[case(legacy(), 7_987_396, 0, hash(0xa00bc324), 0, Err(ValidationError::RemoteStale))]
    // Different chains.
    #[case(legacy(), 7_987_396, 0, hash(0x5cddc0e1), 0, Err(ValidationError::LocalIncompatibleOrStale))]
    #[case(legacy(), 7_279_999, 0, hash(0x5cddc0e1), 0, Err(ValidationError::LocalIncompatibleOrStale))]
    #[case(legacy(), 7_987_396, 0, hash(0xafec6b27), 0, Err(ValidationError::LocalIncompatibleOrStale))]
    // Remote announces a fork that already passed locally.
    #[case(legacy(), 88_888_888, 0, hash(0xf0afd0e3), 88_888_888, Err(ValidationError::LocalIncompatibleOrStale))]
    #[case(legacy(), 7_279_999, 0, hash(0xa00bc324), 7_279_999, Err(ValidationError::LocalIncompatibleOrStale))]
    // Block to timestamp transition.
    #[case(ChainConfig::mainnet(), 15_050_000, 0, hash(0xf0afd0e3), 0, Ok(()))]
    #[case(ChainConfig::mainnet(), 15_050_000, 0, hash(0xf0afd0e3), 1_681_338_455, Ok(()))]
    #[case(ChainConfig::mainnet(), 15_050_000, 0, hash(0xf0afd0e3), u64::MAX, Ok(()))]
    #[case(ChainConfig::mainnet(), 20_000_000, 1_681_338_455, hash(0xf0afd0e3), 1_681_338_455, Ok(()))]
    #[case(ChainConfig::mainnet(), 20_123_456, 1_681_338_456, hash(0xf0afd0e3), 1_681_338_455, Ok(()))]
    #[case(ChainConfig::mainnet(), 20_000_000, 1_681_338_455, hash(0x20c327fc), 15_050_000, Ok(()))]
    #[case(ChainConfig::mainnet(), 15_050_000, 0, hash(0xdce96c2d), 0, Ok(()))]
    #[case(ChainConfig::mainnet(), 13_773_000, 0, hash(0xf0afd0e3), 0, Ok(()))]
    #[case(ChainConfig::mainnet(), 20_000_000, 1_681_338_455, hash(0xf0afd0e3), 0, Err(ValidationError::RemoteStale))]
    #[case(ChainConfig::mainnet(), 15_050_000, 0, hash(0xf0afd0e3) + u64::MAX, 0, Err(ValidationError::LocalIncompatibleOrStale))]
    #[case(ChainConfig::mainnet(), 15_050_000, 0, hash(0xdce96c2d) + u64::MAX, 0, Err(ValidationError::LocalIncompatibleOrStale))]
    #[case(ChainConfig::mainnet(), 888_888_888, 1_660_000_000, hash(0xf0afd0e3), 1_660_000_000, Err(ValidationError::LocalIncompatibleOrStale))]
    #[case(ChainConfig::mainnet(), 19_999_999, 1_667_999_999, hash(0xf0afd0e3), 1_667_999_999, Err(ValidationError::LocalIncompatibleOrStale))]
    // Timestamp based.
    #[case(ChainConfig::mainnet(), 20_000_000, 1_681_338_455, hash(0xdce96c2d), 0, Ok(()))]
    #[case(ChainConfig::mainnet(), 20_000_000, 1_681_338_455, hash(0xdce96c2d), u64::MAX, Ok(()))]
    #[case(ChainConfig::mainnet(), 20_000_000, 1_681_338_455, hash(0xdce96c2d) + u64::MAX, 0, Err(ValidationError::LocalIncompatibleOrStale))]
    #[case(ChainConfig::mainnet(), 20_000_000, 1_681_338_455, hash(0x12345678), 0, Err(ValidationError::LocalIncompatibleOrStale))]
    #[case(ChainConfig::mainnet(), 88_888_888, 8_888_888_888, hash(0xdce96c2d), 8_888_888_888, Err(ValidationError::LocalIncompatibleOrStale))]
    fn test_validate(
        #[case] config: ChainConfig,
        #[case] number: u64,
        #[case] timestamp: u64,
        #[case] remote: ForkHash,
        #[case] next: u64,
        #[case] expected: Result<(), ValidationError>,
    ) {
        let filter = ForkFilter::new_static(&config, MAINNET_GENESIS_HASH, Head::new(number, timestamp));
        assert_eq!(filter.validate(ForkId { hash: remote, next }), expected);
    }

    #[test]
    fn test_filter_reads_live_head() {
        let head = Arc::new(AtomicU64::new(7_279_999));
        let provider = Arc::clone(&head);
        let filter = ForkFilter::new(&legacy(), MAINNET_GENESIS_HASH, move || {
            Head::new(provider.load(Ordering::SeqCst), 0)
        });

        let remote = ForkId { hash: hash(0xa00bc324), next: 0 };
        assert_eq!(filter.validate(remote), Ok(()));

        head.store(7_987_396, Ordering::SeqCst);
        assert_eq!(filter.validate(remote), Err(ValidationError::RemoteStale));
    }

    #[rstest]
    #[case(0, 0)]
    #[case(7_280_000, 0)]
    #[case(15_050_000, 0)]
    #[case(20_000_000, 1_681_338_454)]
    #[case(20_000_000, 1_681_338_455)]
    fn test_current_matches_fork_id(#[case] number: u64, #[case] timestamp: u64) {
        let config = ChainConfig::mainnet();
        let filter = ForkFilter::new_static(&config, MAINNET_GENESIS_HASH, Head::new(number, timestamp));
        assert_eq!(filter.current(), ForkId::new(&config, MAINNET_GENESIS_HASH, number, timestamp));
        assert_eq!(filter.validate(filter.current()), Ok(()));
    }

    #[test]
    fn test_filter_is_send_and_sync() {
        fn assert_send_sync<T: Send + Sync>() {}
        assert_send_sync::<ForkFilter>();
    }
}
