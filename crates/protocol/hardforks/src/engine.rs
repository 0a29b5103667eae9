//! Consensus engine tags.

/// Clique proof-of-authority parameters.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct CliqueConfig {
    /// Seconds between blocks.
    pub period: u64,
    /// Epoch length after which votes are reset and a checkpoint is written.
    pub epoch: u64,
}

/// The consensus engine a chain seals blocks with.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "camelCase"))]
pub enum ConsensusEngine {
    /// Proof of work.
    #[default]
    Ethash,
    /// Clique proof of authority.
    Clique(CliqueConfig),
}

impl ConsensusEngine {
    /// Returns the clique parameters, if this is a clique engine.
    pub const fn clique(&self) -> Option<CliqueConfig> {
        match self {
            Self::Clique(config) => Some(*config),
            Self::Ethash => None,
        }
    }

    /// Returns `true` for clique chains.
    pub const fn is_clique(&self) -> bool {
        matches!(self, Self::Clique(_))
    }
}
