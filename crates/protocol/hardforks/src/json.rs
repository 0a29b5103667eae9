//! JSON decoding of [`ChainConfig`].
//!
//! Two layouts are accepted: the native one written by [`ChainConfig`]'s `Serialize` impl, with
//! a `hardforks` map, and the flat geth `genesis.json` one, with a `<fork>Block` or `<fork>Time`
//! key per fork. Both may be mixed. Unknown keys are rejected so that a schedule never silently
//! loses forks.

use alloc::collections::BTreeMap;
use alloy_primitives::U256;
use serde::{Deserialize, de::IgnoredAny};

use crate::{ChainConfig, CliqueConfig, ConsensusEngine, ForkCondition, Hardfork};

#[derive(Debug, Default, Deserialize)]
#[serde(default, rename_all = "camelCase", deny_unknown_fields)]
pub(crate) struct ChainConfigJson {
    chain_id: u64,
    network_id: u64,
    hardforks: BTreeMap<Hardfork, ForkCondition>,
    consensus: Option<ConsensusEngine>,
    #[serde(deserialize_with = "alloy_serde::ttd::deserialize_json_ttd_opt")]
    terminal_total_difficulty: Option<U256>,
    ecbp1100_block: Option<u64>,
    ecbp1100_disable_block: Option<u64>,

    homestead_block: Option<u64>,
    dao_fork_block: Option<u64>,
    #[serde(rename = "daoForkSupport")]
    _dao_fork_support: Option<bool>,
    eip150_block: Option<u64>,
    eip155_block: Option<u64>,
    eip158_block: Option<u64>,
    byzantium_block: Option<u64>,
    constantinople_block: Option<u64>,
    petersburg_block: Option<u64>,
    istanbul_block: Option<u64>,
    muir_glacier_block: Option<u64>,
    berlin_block: Option<u64>,
    london_block: Option<u64>,
    arrow_glacier_block: Option<u64>,
    gray_glacier_block: Option<u64>,
    merge_netsplit_block: Option<u64>,
    ecip1099_block: Option<u64>,
    shanghai_time: Option<u64>,
    cancun_time: Option<u64>,
    prague_time: Option<u64>,
    clique: Option<CliqueConfig>,
    // Accepted, but carry nothing the schedule models.
    #[serde(rename = "terminalTotalDifficultyPassed")]
    _terminal_total_difficulty_passed: Option<bool>,
    #[serde(rename = "ethash")]
    _ethash: Option<IgnoredAny>,
    #[serde(rename = "depositContractAddress")]
    _deposit_contract_address: Option<IgnoredAny>,
    #[serde(rename = "blobSchedule")]
    _blob_schedule: Option<IgnoredAny>,
}

impl ChainConfigJson {
    fn flat_forks(&self) -> [(Hardfork, Option<ForkCondition>); 18] {
        let block = |block: Option<u64>| block.map(ForkCondition::Block);
        let time = |time: Option<u64>| time.map(ForkCondition::Timestamp);
        // geth splits Spurious Dragon into its two EIPs.
        let spurious_dragon = self.eip158_block.or(self.eip155_block);
        [
            (Hardfork::Homestead, block(self.homestead_block)),
            (Hardfork::Dao, block(self.dao_fork_block)),
            (Hardfork::Tangerine, block(self.eip150_block)),
            (Hardfork::SpuriousDragon, block(spurious_dragon)),
            (Hardfork::Byzantium, block(self.byzantium_block)),
            (Hardfork::Constantinople, block(self.constantinople_block)),
            (Hardfork::Petersburg, block(self.petersburg_block)),
            (Hardfork::Istanbul, block(self.istanbul_block)),
            (Hardfork::MuirGlacier, block(self.muir_glacier_block)),
            (Hardfork::Berlin, block(self.berlin_block)),
            (Hardfork::London, block(self.london_block)),
            (Hardfork::ArrowGlacier, block(self.arrow_glacier_block)),
            (Hardfork::GrayGlacier, block(self.gray_glacier_block)),
            (Hardfork::MergeNetsplit, block(self.merge_netsplit_block)),
            (Hardfork::Thanos, block(self.ecip1099_block)),
            (Hardfork::Shanghai, time(self.shanghai_time)),
            (Hardfork::Cancun, time(self.cancun_time)),
            (Hardfork::Prague, time(self.prague_time)),
        ]
    }
}

impl From<ChainConfigJson> for ChainConfig {
    fn from(json: ChainConfigJson) -> Self {
        let flat = json.flat_forks();
        let mut config = Self::new(json.chain_id, json.network_id);
        config.hardforks = json.hardforks;
        for (fork, condition) in flat {
            if let Some(condition) = condition {
                config.set_fork(fork, condition);
            }
        }
        config.consensus = json.consensus.unwrap_or_else(|| {
            json.clique.map_or(ConsensusEngine::Ethash, ConsensusEngine::Clique)
        });
        config.terminal_total_difficulty = json.terminal_total_difficulty;
        config.ecbp1100_block = json.ecbp1100_block;
        config.ecbp1100_disable_block = json.ecbp1100_disable_block;
        config
    }
}
