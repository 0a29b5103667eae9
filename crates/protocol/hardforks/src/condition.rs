//! Activation points.

/// The point at which a [`Hardfork`](crate::Hardfork) activates.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "camelCase"))]
pub enum ForkCondition {
    /// Activates at the given block number.
    Block(u64),
    /// Activates at the given block timestamp.
    Timestamp(u64),
    /// Never activates.
    #[default]
    Never,
}

impl ForkCondition {
    /// Returns `true` if the fork is block based and active at the given block number.
    pub const fn active_at_block(&self, number: u64) -> bool {
        matches!(self, Self::Block(block) if number >= *block)
    }

    /// Returns `true` if the fork is timestamp based and active at the given timestamp.
    pub const fn active_at_timestamp(&self, timestamp: u64) -> bool {
        matches!(self, Self::Timestamp(time) if timestamp >= *time)
    }

    /// Returns `true` if the fork is active at the given head, whichever kind it is.
    pub const fn active_at_head(&self, number: u64, timestamp: u64) -> bool {
        self.active_at_block(number) || self.active_at_timestamp(timestamp)
    }

    /// Returns the activation block, if block based.
    pub const fn as_block(&self) -> Option<u64> {
        match self {
            Self::Block(block) => Some(*block),
            _ => None,
        }
    }

    /// Returns the activation timestamp, if timestamp based.
    pub const fn as_timestamp(&self) -> Option<u64> {
        match self {
            Self::Timestamp(time) => Some(*time),
            _ => None,
        }
    }

    /// Returns `true` if the fork never activates.
    pub const fn is_never(&self) -> bool {
        matches!(self, Self::Never)
    }
}

impl core::fmt::Display for ForkCondition {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        match self {
            Self::Block(block) => write!(f, "block {block}"),
            Self::Timestamp(time) => write!(f, "timestamp {time}"),
            Self::Never => f.write_str("never"),
        }
    }
}
