//! Fork identifier construction.

use alloc::vec::Vec;
use alloy_primitives::B256;
use alloy_rlp::{RlpDecodable, RlpEncodable};
use forkline_hardforks::ForkSchedule;

use crate::ForkHash;

/// The local chain position a fork identifier is computed for.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, derive_more::Constructor)]
pub struct Head {
    /// Block number of the head.
    pub number: u64,
    /// Timestamp of the head.
    pub timestamp: u64,
}

/// An [EIP-2124] fork identifier.
///
/// [EIP-2124]: https://eips.ethereum.org/EIPS/eip-2124
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, RlpEncodable, RlpDecodable)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ForkId {
    /// Checksum of the genesis hash and all passed forks.
    pub hash: ForkHash,
    /// The next scheduled fork, 0 if none is known.
    pub next: u64,
}

impl ForkId {
    /// Computes the fork identifier of a chain at the given head block number and timestamp.
    ///
    /// Block forks are folded into the checksum first, then timestamp forks. The first fork not
    /// yet passed becomes [`ForkId::next`].
    pub fn new<S: ForkSchedule>(schedule: &S, genesis_hash: B256, head: u64, time: u64) -> Self {
        let (block_forks, time_forks) = gather_forks(schedule);
        let mut hash = ForkHash::from(genesis_hash);

        for fork in block_forks {
            if fork > head {
                return Self { hash, next: fork };
            }
            hash += fork;
        }
        for fork in time_forks {
            if fork > time {
                return Self { hash, next: fork };
            }
            hash += fork;
        }
        Self { hash, next: 0 }
    }
}

/// Returns the block and timestamp activation points of a schedule, each sorted ascending with
/// duplicates and genesis-active (zero) points removed.
pub fn gather_forks<S: ForkSchedule>(schedule: &S) -> (Vec<u64>, Vec<u64>) {
    (schedule.block_forks(), schedule.time_forks())
}
