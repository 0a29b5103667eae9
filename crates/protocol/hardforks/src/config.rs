//! The plain-data fork schedule and its network presets.

use alloc::collections::BTreeMap;
use alloy_primitives::U256;

use crate::{CliqueConfig, ConsensusEngine, ForkCondition, ForkSchedule, Hardfork};

/// A chain's fork schedule.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "camelCase"))]
#[cfg_attr(feature = "serde", serde(from = "crate::json::ChainConfigJson"))]
pub struct ChainConfig {
    /// The EIP-155 chain id.
    #[cfg_attr(feature = "serde", serde(default))]
    pub chain_id: u64,
    /// The devp2p network id.
    #[cfg_attr(feature = "serde", serde(default))]
    pub network_id: u64,
    /// Activation points of the scheduled forks.
    #[cfg_attr(feature = "serde", serde(default))]
    pub hardforks: BTreeMap<Hardfork, ForkCondition>,
    /// The consensus engine.
    #[cfg_attr(feature = "serde", serde(default))]
    pub consensus: ConsensusEngine,
    /// Total difficulty at which proof-of-work ends.
    #[cfg_attr(feature = "serde", serde(default, skip_serializing_if = "Option::is_none"))]
    pub terminal_total_difficulty: Option<U256>,
    /// Block at which ECBP-1100 deep-reorg protection activates.
    #[cfg_attr(feature = "serde", serde(default, skip_serializing_if = "Option::is_none"))]
    pub ecbp1100_block: Option<u64>,
    /// Block at which ECBP-1100 deep-reorg protection is switched off.
    #[cfg_attr(feature = "serde", serde(default, skip_serializing_if = "Option::is_none"))]
    pub ecbp1100_disable_block: Option<u64>,
}

impl ChainConfig {
    /// Creates an empty schedule for the given chain and network ids.
    pub const fn new(chain_id: u64, network_id: u64) -> Self {
        Self {
            chain_id,
            network_id,
            hardforks: BTreeMap::new(),
            consensus: ConsensusEngine::Ethash,
            terminal_total_difficulty: None,
            ecbp1100_block: None,
            ecbp1100_disable_block: None,
        }
    }

    /// Schedules a fork, returning the updated config.
    pub fn with_fork(mut self, fork: Hardfork, condition: ForkCondition) -> Self {
        self.set_fork(fork, condition);
        self
    }

    /// Schedules a fork. [`ForkCondition::Never`] unschedules it.
    pub fn set_fork(&mut self, fork: Hardfork, condition: ForkCondition) {
        if condition.is_never() {
            self.hardforks.remove(&fork);
        } else {
            self.hardforks.insert(fork, condition);
        }
    }

    /// Sets the consensus engine, returning the updated config.
    pub const fn with_consensus(mut self, consensus: ConsensusEngine) -> Self {
        self.consensus = consensus;
        self
    }

    /// Sets the terminal total difficulty, returning the updated config.
    pub const fn with_terminal_total_difficulty(mut self, ttd: U256) -> Self {
        self.terminal_total_difficulty = Some(ttd);
        self
    }

    /// Returns `true` if both schedules are equal apart from their chain and network ids.
    pub fn is_identical_ignoring_ids(&self, other: &Self) -> bool {
        self.hardforks == other.hardforks &&
            self.consensus == other.consensus &&
            self.terminal_total_difficulty == other.terminal_total_difficulty &&
            self.ecbp1100_block == other.ecbp1100_block &&
            self.ecbp1100_disable_block == other.ecbp1100_disable_block
    }

    fn with_blocks(mut self, forks: &[(Hardfork, u64)]) -> Self {
        for (fork, block) in forks {
            self.hardforks.insert(*fork, ForkCondition::Block(*block));
        }
        self
    }

    /// The Ethereum mainnet schedule.
    pub fn mainnet() -> Self {
        Self::new(1, 1)
            .with_blocks(&[
                (Hardfork::Homestead, 1_150_000),
                (Hardfork::Dao, 1_920_000),
                (Hardfork::Tangerine, 2_463_000),
                (Hardfork::SpuriousDragon, 2_675_000),
                (Hardfork::Byzantium, 4_370_000),
                (Hardfork::Constantinople, 7_280_000),
                (Hardfork::Petersburg, 7_280_000),
                (Hardfork::Istanbul, 9_069_000),
                (Hardfork::MuirGlacier, 9_200_000),
                (Hardfork::Berlin, 12_244_000),
                (Hardfork::London, 12_965_000),
                (Hardfork::ArrowGlacier, 13_773_000),
                (Hardfork::GrayGlacier, 15_050_000),
            ])
            .with_fork(Hardfork::Shanghai, ForkCondition::Timestamp(1_681_338_455))
            .with_terminal_total_difficulty(U256::from(58_750_000_000_000_000_000_000_u128))
    }

    /// The Goerli proof-of-authority testnet schedule.
    pub fn goerli() -> Self {
        Self::new(5, 5)
            .with_blocks(&[
                (Hardfork::Homestead, 0),
                (Hardfork::Tangerine, 0),
                (Hardfork::SpuriousDragon, 0),
                (Hardfork::Byzantium, 0),
                (Hardfork::Constantinople, 0),
                (Hardfork::Petersburg, 0),
                (Hardfork::Istanbul, 1_561_651),
                (Hardfork::Berlin, 4_460_644),
                (Hardfork::London, 5_062_605),
            ])
            .with_fork(Hardfork::Shanghai, ForkCondition::Timestamp(1_678_832_736))
            .with_consensus(ConsensusEngine::Clique(CliqueConfig { period: 15, epoch: 30_000 }))
            .with_terminal_total_difficulty(U256::from(10_790_000_u64))
    }

    /// The Sepolia testnet schedule.
    pub fn sepolia() -> Self {
        Self::new(11_155_111, 11_155_111)
            .with_blocks(&[
                (Hardfork::Homestead, 0),
                (Hardfork::Tangerine, 0),
                (Hardfork::SpuriousDragon, 0),
                (Hardfork::Byzantium, 0),
                (Hardfork::Constantinople, 0),
                (Hardfork::Petersburg, 0),
                (Hardfork::Istanbul, 0),
                (Hardfork::MuirGlacier, 0),
                (Hardfork::Berlin, 0),
                (Hardfork::London, 0),
                (Hardfork::MergeNetsplit, 1_735_371),
            ])
            .with_fork(Hardfork::Shanghai, ForkCondition::Timestamp(1_677_557_088))
            .with_terminal_total_difficulty(U256::from(17_000_000_000_000_000_u64))
    }

    /// The Ethereum Classic mainnet schedule.
    ///
    /// Classic shares its genesis block with Ethereum mainnet, so it can only be selected
    /// explicitly.
    pub fn classic() -> Self {
        let mut config = Self::new(61, 1).with_blocks(&[
            (Hardfork::Homestead, 1_150_000),
            (Hardfork::Tangerine, 2_500_000),
            (Hardfork::DieHard, 3_000_000),
            (Hardfork::Gotham, 5_000_000),
            (Hardfork::DefuseDifficultyBomb, 5_900_000),
            (Hardfork::Atlantis, 8_772_000),
            (Hardfork::Agharta, 9_573_000),
            (Hardfork::Phoenix, 10_500_839),
            (Hardfork::Thanos, 11_700_000),
            (Hardfork::Magneto, 13_189_133),
            (Hardfork::Mystique, 14_525_000),
            (Hardfork::Spiral, 19_250_000),
        ]);
        config.ecbp1100_block = Some(11_380_000);
        config.ecbp1100_disable_block = Some(19_250_000);
        config
    }

    /// The Mordor Classic testnet schedule.
    pub fn mordor() -> Self {
        let mut config = Self::new(63, 7).with_blocks(&[
            (Hardfork::Homestead, 0),
            (Hardfork::Tangerine, 0),
            (Hardfork::DieHard, 0),
            (Hardfork::Gotham, 0),
            (Hardfork::DefuseDifficultyBomb, 0),
            (Hardfork::Atlantis, 0),
            (Hardfork::Agharta, 301_243),
            (Hardfork::Phoenix, 999_983),
            (Hardfork::Thanos, 2_520_000),
            (Hardfork::Magneto, 3_985_893),
            (Hardfork::Mystique, 5_520_000),
            (Hardfork::Spiral, 9_957_000),
        ]);
        config.ecbp1100_block = Some(2_380_000);
        config.ecbp1100_disable_block = Some(9_957_000);
        config
    }

    /// A development schedule with every block based Ethereum fork active from genesis.
    pub fn all_protocol_changes() -> Self {
        Self::new(1337, 1337).with_blocks(&[
            (Hardfork::Homestead, 0),
            (Hardfork::Tangerine, 0),
            (Hardfork::SpuriousDragon, 0),
            (Hardfork::Byzantium, 0),
            (Hardfork::Constantinople, 0),
            (Hardfork::Petersburg, 0),
            (Hardfork::Istanbul, 0),
            (Hardfork::MuirGlacier, 0),
            (Hardfork::Berlin, 0),
            (Hardfork::London, 0),
            (Hardfork::ArrowGlacier, 0),
            (Hardfork::GrayGlacier, 0),
        ])
    }
}

impl ForkSchedule for ChainConfig {
    fn fork(&self, fork: Hardfork) -> ForkCondition {
        self.hardforks.get(&fork).copied().unwrap_or_default()
    }

    fn forks_iter(&self) -> impl Iterator<Item = (Hardfork, ForkCondition)> + '_ {
        self.hardforks.iter().map(|(fork, condition)| (*fork, *condition))
    }

    fn consensus_engine(&self) -> ConsensusEngine {
        self.consensus
    }

    fn terminal_total_difficulty(&self) -> Option<U256> {
        self.terminal_total_difficulty
    }

    fn ecbp1100_block(&self) -> Option<u64> {
        self.ecbp1100_block
    }

    fn ecbp1100_disable_block(&self) -> Option<u64> {
        self.ecbp1100_disable_block
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_set_fork_never_unschedules() {
        let mut config = ChainConfig::mainnet();
        config.set_fork(Hardfork::Shanghai, ForkCondition::Never);
        assert_eq!(config.fork(Hardfork::Shanghai), ForkCondition::Never);
        assert!(config.time_forks().is_empty());
    }

    #[test]
    fn test_mainnet_block_forks() {
        assert_eq!(
            ChainConfig::mainnet().block_forks(),
            vec![
                1_150_000, 1_920_000, 2_463_000, 2_675_000, 4_370_000, 7_280_000, 9_069_000,
                9_200_000, 12_244_000, 12_965_000, 13_773_000, 15_050_000,
            ]
        );
        assert_eq!(ChainConfig::mainnet().time_forks(), vec![1_681_338_455]);
    }

    #[test]
    fn test_identical_ignoring_ids() {
        let mut other = ChainConfig::mainnet();
        other.chain_id = 5;
        other.network_id = 7;
        assert!(ChainConfig::mainnet().is_identical_ignoring_ids(&other));

        other.set_fork(Hardfork::Cancun, ForkCondition::Timestamp(1_710_338_135));
        assert!(!ChainConfig::mainnet().is_identical_ignoring_ids(&other));
    }

    #[test]
    fn test_goerli_is_clique() {
        let engine = ChainConfig::goerli().consensus_engine();
        assert_eq!(engine.clique(), Some(CliqueConfig { period: 15, epoch: 30_000 }));
        assert!(!ChainConfig::sepolia().consensus_engine().is_clique());
    }

    #[test]
    #[cfg(feature = "serde")]
    fn test_config_json_roundtrip() {
        let config = ChainConfig::goerli();
        let json = serde_json::to_string(&config).unwrap();
        assert!(json.contains(r#""istanbul":{"block":1561651}"#));
        assert!(json.contains(r#""shanghai":{"timestamp":1678832736}"#));
        let decoded: ChainConfig = serde_json::from_str(&json).unwrap();
        assert_eq!(decoded, config);
    }

    #[test]
    #[cfg(feature = "serde")]
    fn test_config_json_defaults() {
        let config: ChainConfig =
            serde_json::from_str(r#"{"chainId":1,"hardforks":{"homestead":{"block":0}}}"#)
                .unwrap();
        assert_eq!(config.chain_id, 1);
        assert_eq!(config.network_id, 0);
        assert_eq!(config.consensus, ConsensusEngine::Ethash);
        assert_eq!(config.fork(Hardfork::Homestead), ForkCondition::Block(0));
    }
}
