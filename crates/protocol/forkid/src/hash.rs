//! The fork checksum.

use alloy_primitives::B256;
use alloy_rlp::{RlpDecodableWrapper, RlpEncodableWrapper};
use crc32fast::Hasher;

/// CRC32 checksum of the genesis hash and all passed activation points.
#[derive(
    Clone, Copy, PartialEq, Eq, Hash, Default, RlpEncodableWrapper, RlpDecodableWrapper,
)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ForkHash(pub [u8; 4]);

impl ForkHash {
    /// Returns the checksum as a big-endian integer.
    pub const fn as_u32(&self) -> u32 {
        u32::from_be_bytes(self.0)
    }
}

impl From<B256> for ForkHash {
    fn from(genesis: B256) -> Self {
        Self(crc32fast::hash(genesis.as_slice()).to_be_bytes())
    }
}

impl From<u32> for ForkHash {
    fn from(checksum: u32) -> Self {
        Self(checksum.to_be_bytes())
    }
}

impl core::ops::AddAssign<u64> for ForkHash {
    fn add_assign(&mut self, fork: u64) {
        let mut hasher = Hasher::new_with_initial(self.as_u32());
        hasher.update(&fork.to_be_bytes());
        self.0 = hasher.finalize().to_be_bytes();
    }
}

impl core::ops::Add<u64> for ForkHash {
    type Output = Self;

    fn add(mut self, fork: u64) -> Self {
        self += fork;
        self
    }
}

impl core::fmt::Debug for ForkHash {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        write!(f, "ForkHash({self})")
    }
}

impl core::fmt::Display for ForkHash {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        write!(f, "{:#010x}", self.as_u32())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use forkline_hardforks::MAINNET_GENESIS_HASH;

    #[test]
    fn test_genesis_checksum() {
        assert_eq!(ForkHash::from(MAINNET_GENESIS_HASH), ForkHash::from(0xfc64ec04_u32));
    }

    #[test]
    fn test_fold_homestead() {
        let homestead = ForkHash::from(MAINNET_GENESIS_HASH) + 1_150_000;
        assert_eq!(homestead, ForkHash::from(0x97c2c34c_u32));
    }

    #[test]
    fn test_display() {
        assert_eq!(ForkHash::from(0xfc64ec04_u32).to_string(), "0xfc64ec04");
        assert_eq!(format!("{:?}", ForkHash::from(0xdeadbeef_u32)), "ForkHash(0xdeadbeef)");
    }
}
