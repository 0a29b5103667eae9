use forkline_hardforks::{ChainConfig, ForkCondition, Hardfork};
use tracing::warn;

/// Operator supplied fork activation times that take precedence over the chain configuration.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ChainOverrides {
    /// Shanghai activation timestamp.
    pub shanghai_time: Option<u64>,
    /// Cancun activation timestamp.
    pub cancun_time: Option<u64>,
    /// Verkle activation timestamp. Not supported; only logged.
    pub verkle_time: Option<u64>,
}

impl ChainOverrides {
    /// Returns `true` if no override is set.
    pub const fn is_empty(&self) -> bool {
        self.shanghai_time.is_none() && self.cancun_time.is_none() && self.verkle_time.is_none()
    }

    /// Applies the overrides to `config`.
    pub fn apply(&self, config: &mut ChainConfig) {
        // Shanghai and Cancun are only ever scheduled by time.
        if let Some(time) = self.shanghai_time {
            config.set_fork(Hardfork::Shanghai, ForkCondition::Timestamp(time));
        }
        if let Some(time) = self.cancun_time {
            config.set_fork(Hardfork::Cancun, ForkCondition::Timestamp(time));
        }
        if self.verkle_time.is_some() {
            warn!(target: "genesis", "Verkle fork is not yet supported");
        }
    }
}
