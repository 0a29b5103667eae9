//! The total-difficulty fork choice.

use crate::{ChainHeaderReader, ForkChoiceError, RandomTieBreaker, ReorgPolicy, TieBreaker};
use alloy_consensus::Header;
use alloy_primitives::B256;
use core::{fmt, time::Duration};
use forkline_hardforks::ForkSchedule;
use forkline_storage::SealedHeader;
use tracing::{debug, info, warn};

/// Predicate marking headers the local node prefers to keep on an exact tie, typically blocks it
/// mined itself.
pub type PreserveFn = Box<dyn Fn(&Header) -> bool + Send + Sync>;

/// Decides whether a competing header should become the canonical head.
pub struct ForkChoice<R, T = RandomTieBreaker> {
    chain: R,
    preserve: Option<PreserveFn>,
    tie_breaker: T,
    policy: Option<Box<dyn ReorgPolicy + Send + Sync>>,
}

impl<R: fmt::Debug, T: fmt::Debug> fmt::Debug for ForkChoice<R, T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ForkChoice")
            .field("chain", &self.chain)
            .field("preserve", &self.preserve.is_some())
            .field("tie_breaker", &self.tie_breaker)
            .field("policy", &self.policy.is_some())
            .finish()
    }
}

impl<R: ChainHeaderReader> ForkChoice<R> {
    /// Creates a fork choice whose ties are broken by a generator seeded once from OS entropy.
    pub fn new(chain: R, preserve: Option<PreserveFn>) -> Self {
        Self { chain, preserve, tie_breaker: RandomTieBreaker::from_os_rng(), policy: None }
    }
}

impl<R: ChainHeaderReader, T: TieBreaker> ForkChoice<R, T> {
    /// Replaces the tie-break source.
    pub fn with_tie_breaker<U: TieBreaker>(self, tie_breaker: U) -> ForkChoice<R, U> {
        ForkChoice {
            chain: self.chain,
            preserve: self.preserve,
            tie_breaker,
            policy: self.policy,
        }
    }

    /// Installs a deep-reorg policy.
    pub fn with_policy(mut self, policy: impl ReorgPolicy + Send + Sync + 'static) -> Self {
        self.policy = Some(Box::new(policy));
        self
    }

    /// Returns the chain reader.
    pub const fn chain(&self) -> &R {
        &self.chain
    }

    /// Finds the most recent header shared by the chains ending in `a` and `b`.
    pub fn common_ancestor(
        &self,
        a: &SealedHeader,
        b: &SealedHeader,
    ) -> Result<SealedHeader, ForkChoiceError> {
        let (mut a, mut b) = (a.clone(), b.clone());
        while a.number() > b.number() {
            a = self.parent(&a)?;
        }
        while b.number() > a.number() {
            b = self.parent(&b)?;
        }
        while a.hash() != b.hash() {
            a = self.parent(&a)?;
            b = self.parent(&b)?;
        }
        Ok(a)
    }

    fn parent(&self, header: &SealedHeader) -> Result<SealedHeader, ForkChoiceError> {
        let hash = header.parent_hash;
        let number = header
            .number()
            .checked_sub(1)
            .ok_or(ForkChoiceError::BrokenChain { hash, number: 0 })?;
        self.chain.header(hash, number).ok_or(ForkChoiceError::BrokenChain { hash, number })
    }

    /// Returns `true` if `external` should replace `current` as the canonical head.
    pub fn reorg_needed(
        &mut self,
        current: &SealedHeader,
        external: &SealedHeader,
    ) -> Result<bool, ForkChoiceError> {
        let td = |header: &SealedHeader| {
            self.chain.total_difficulty(header.hash(), header.number()).ok_or(
                ForkChoiceError::MissingTotalDifficulty {
                    hash: header.hash(),
                    number: header.number(),
                },
            )
        };
        let local_td = td(current)?;
        let external_td = td(external)?;

        // Past the terminal total difficulty the consensus layer picks the head.
        if self.chain.config().terminal_total_difficulty().is_some_and(|ttd| ttd <= external_td) {
            return Ok(true);
        }

        let mut reorg = external_td > local_td;
        if external_td == local_td {
            // Preferring the shorter chain and the locally preserved block on equal work
            // reduces the payoff of selfish mining.
            if external.number() < current.number() {
                reorg = true;
            } else if external.number() == current.number() {
                let (current_preserve, external_preserve) = self
                    .preserve
                    .as_ref()
                    .map_or((false, false), |preserve| (preserve(current), preserve(external)));
                reorg = !current_preserve &&
                    (external_preserve || self.tie_breaker.coin_flip());
            }
        }
        debug!(
            target: "forkchoice",
            current = current.number(),
            external = external.number(),
            %local_td,
            %external_td,
            reorg,
            "Total difficulty fork choice"
        );
        if !reorg {
            return Ok(false);
        }

        let Some(policy) = self.policy.as_ref() else { return Ok(true) };
        if !self.chain.deep_reorg_protection_enabled() ||
            !self.chain.config().is_ecbp1100_active_at_block(current.number())
        {
            return Ok(true);
        }

        let ancestor = self.common_ancestor(current, external)?;
        let lookup = |hash: B256, number: u64| self.chain.total_difficulty(hash, number);
        if let Err(err) = policy.check(&ancestor, current, external, &lookup) {
            warn!(target: "forkchoice", %err, "Reorg disallowed");
            return Ok(false);
        }

        if current.number() - ancestor.number() > 2 {
            info!(
                target: "forkchoice",
                status = "accepted",
                age = ancestor.timestamp,
                current_span = ?Duration::from_secs(current.timestamp.saturating_sub(ancestor.timestamp)),
                proposed_span = ?Duration::from_secs(external.timestamp.saturating_sub(ancestor.timestamp)),
                common_number = ancestor.number(),
                common_hash = %ancestor.hash(),
                current_number = current.number(),
                current_hash = %current.hash(),
                current_td = %local_td,
                proposed_number = external.number(),
                proposed_hash = %external.hash(),
                proposed_td = %external_td,
                "ECBP1100-MESS deep reorg"
            );
        }
        Ok(true)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{
        Ecbp1100, MockChainHeaderReader, MockTieBreaker, StoreChainReader,
        test_utils::ChainBuilder,
    };
    use alloy_primitives::U256;
    use forkline_hardforks::ChainConfig;
    use forkline_storage::MemoryDb;

    struct Fixture {
        local: Vec<SealedHeader>,
        external: Vec<SealedHeader>,
        reader: StoreChainReader<MemoryDb>,
    }

    /// Builds two branches off genesis: `(blocks, difficulty)` for the local and external side,
    /// both with the given block time.
    fn fixture(
        config: ChainConfig,
        local: (u64, u64),
        external: (u64, u64),
        block_time: u64,
    ) -> Fixture {
        let builder = ChainBuilder::new(MemoryDb::new());
        let genesis = builder.genesis();
        let local = builder.extend(&genesis, local.0, local.1, block_time, 0);
        let external = builder.extend(&genesis, external.0, external.1, block_time, 1);
        Fixture { local, external, reader: StoreChainReader::new(builder.into_db(), config) }
    }

    fn never_flips() -> MockTieBreaker {
        let mut tie_breaker = MockTieBreaker::new();
        tie_breaker.expect_coin_flip().times(0);
        tie_breaker
    }

    fn flips(result: bool) -> MockTieBreaker {
        let mut tie_breaker = MockTieBreaker::new();
        tie_breaker.expect_coin_flip().times(1).return_const(result);
        tie_breaker
    }

    fn tips(fixture: &Fixture) -> (SealedHeader, SealedHeader) {
        (fixture.local.last().unwrap().clone(), fixture.external.last().unwrap().clone())
    }

    #[test]
    fn test_heavier_external_wins() {
        let f = fixture(ChainConfig::mainnet(), (3, 100), (3, 101), 13);
        let (current, external) = tips(&f);
        let mut choice = ForkChoice::new(f.reader, None).with_tie_breaker(never_flips());
        assert!(choice.reorg_needed(&current, &external).unwrap());
        assert!(!choice.reorg_needed(&external, &current).unwrap());
    }

    #[test]
    fn test_terminal_total_difficulty_accepts_lighter_external() {
        let config = ChainConfig::mainnet().with_terminal_total_difficulty(U256::from(300));
        let f = fixture(config, (3, 100), (2, 100), 13);
        let (current, external) = tips(&f);
        let mut choice = ForkChoice::new(f.reader, None).with_tie_breaker(never_flips());
        assert!(choice.reorg_needed(&current, &external).unwrap());
    }

    #[test]
    fn test_tie_prefers_lower_height() {
        // Local 100 + 3 * 100, external 100 + 2 * 150.
        let f = fixture(ChainConfig::mainnet(), (3, 100), (2, 150), 13);
        let (current, external) = tips(&f);
        let mut choice = ForkChoice::new(f.reader, None).with_tie_breaker(never_flips());
        assert!(choice.reorg_needed(&current, &external).unwrap());
        assert!(!choice.reorg_needed(&external, &current).unwrap());
    }

    #[test]
    fn test_tie_keeps_preserved_current() {
        let f = fixture(ChainConfig::mainnet(), (3, 100), (3, 100), 13);
        let (current, external) = tips(&f);
        let preserve: PreserveFn = Box::new(|header| header.extra_data[..] == [0u8]);
        let mut choice = ForkChoice::new(f.reader, Some(preserve)).with_tie_breaker(never_flips());
        assert!(!choice.reorg_needed(&current, &external).unwrap());
    }

    #[test]
    fn test_tie_takes_preserved_external() {
        let f = fixture(ChainConfig::mainnet(), (3, 100), (3, 100), 13);
        let (current, external) = tips(&f);
        let preserve: PreserveFn = Box::new(|header| header.extra_data[..] == [1u8]);
        let mut choice = ForkChoice::new(f.reader, Some(preserve)).with_tie_breaker(never_flips());
        assert!(choice.reorg_needed(&current, &external).unwrap());
    }

    #[test]
    fn test_tie_falls_back_to_coin_flip() {
        let f = fixture(ChainConfig::mainnet(), (3, 100), (3, 100), 13);
        let (current, external) = tips(&f);

        let mut choice = ForkChoice::new(f.reader, None).with_tie_breaker(flips(true));
        assert!(choice.reorg_needed(&current, &external).unwrap());

        let mut choice = choice.with_tie_breaker(flips(false));
        assert!(!choice.reorg_needed(&current, &external).unwrap());
    }

    #[test]
    fn test_tie_flips_about_half() {
        let f = fixture(ChainConfig::mainnet(), (3, 100), (3, 100), 13);
        let (current, external) = tips(&f);
        let mut choice =
            ForkChoice::new(f.reader, None).with_tie_breaker(RandomTieBreaker::seed_from_u64(42));
        let reorgs =
            (0..1_000).filter(|_| choice.reorg_needed(&current, &external).unwrap()).count();
        assert!((400..600).contains(&reorgs), "reorgs: {reorgs}");
    }

    #[test]
    fn test_missing_total_difficulty() {
        let f = fixture(ChainConfig::mainnet(), (1, 100), (1, 100), 13);
        let (current, external) = tips(&f);
        let external_hash = external.hash();

        let mut reader = MockChainHeaderReader::new();
        reader
            .expect_total_difficulty()
            .returning(move |hash, _| (hash != external_hash).then_some(U256::from(200)));
        let mut choice = ForkChoice::new(reader, None).with_tie_breaker(never_flips());
        assert_eq!(
            choice.reorg_needed(&current, &external),
            Err(ForkChoiceError::MissingTotalDifficulty { hash: external_hash, number: 1 })
        );
    }

    #[test]
    fn test_common_ancestor() {
        let builder = ChainBuilder::new(MemoryDb::new());
        let genesis = builder.genesis();
        let trunk = builder.extend(&genesis, 4, 100, 13, 0);
        let left = builder.extend(&trunk[3], 3, 100, 13, 1);
        let right = builder.extend(&trunk[3], 6, 100, 13, 2);
        let reader = StoreChainReader::new(builder.into_db(), ChainConfig::mainnet());
        let choice = ForkChoice::new(reader, None);

        assert_eq!(choice.common_ancestor(&left[2], &right[5]).unwrap(), trunk[3]);
        assert_eq!(choice.common_ancestor(&right[5], &left[0]).unwrap(), trunk[3]);
        assert_eq!(choice.common_ancestor(&left[2], &trunk[1]).unwrap(), trunk[1]);
        assert_eq!(choice.common_ancestor(&left[2], &left[2]).unwrap(), left[2]);
        assert_eq!(choice.common_ancestor(&right[0], &genesis).unwrap(), genesis);
    }

    #[test]
    fn test_common_ancestor_broken_chain() {
        let builder = ChainBuilder::new(MemoryDb::new());
        let chain = builder.extend(&builder.genesis(), 3, 100, 13, 0);
        let orphan = SealedHeader::seal_slow(Header {
            parent_hash: B256::repeat_byte(0xaa),
            number: 5,
            ..Default::default()
        });
        let reader = StoreChainReader::new(builder.into_db(), ChainConfig::mainnet());
        let choice = ForkChoice::new(reader, None);

        assert_eq!(
            choice.common_ancestor(&orphan, &chain[2]),
            Err(ForkChoiceError::BrokenChain { hash: B256::repeat_byte(0xaa), number: 4 })
        );
    }

    #[test]
    fn test_common_ancestor_different_genesis() {
        let builder = ChainBuilder::new(MemoryDb::new());
        let ours = builder.extend(&builder.genesis(), 2, 100, 13, 0);
        let reader = StoreChainReader::new(builder.into_db(), ChainConfig::mainnet());
        let choice = ForkChoice::new(reader, None);

        let foreign = SealedHeader::seal_slow(Header { gas_limit: 1, ..Default::default() });
        assert_eq!(
            choice.common_ancestor(&foreign, &ours[1]),
            Err(ForkChoiceError::BrokenChain { hash: B256::ZERO, number: 0 })
        );
    }

    fn mess_config(activation: u64) -> ChainConfig {
        let mut config = ChainConfig::mainnet();
        config.ecbp1100_block = Some(activation);
        config
    }

    #[test]
    fn test_policy_suppresses_deep_reorg() {
        // Ten blocks 2000s apart: the ancestor is 20000s old and 10% more work is not enough.
        let f = fixture(mess_config(0), (10, 100), (11, 100), 2_000);
        let (current, external) = tips(&f);
        let mut choice =
            ForkChoice::new(f.reader, None).with_tie_breaker(never_flips()).with_policy(Ecbp1100);
        assert!(!choice.reorg_needed(&current, &external).unwrap());
    }

    #[test]
    fn test_policy_accepts_overwhelming_work() {
        let f = fixture(mess_config(0), (10, 100), (11, 4_000), 2_000);
        let (current, external) = tips(&f);
        let mut choice =
            ForkChoice::new(f.reader, None).with_tie_breaker(never_flips()).with_policy(Ecbp1100);
        assert!(choice.reorg_needed(&current, &external).unwrap());
    }

    #[test]
    fn test_policy_accepts_shallow_reorg() {
        let f = fixture(mess_config(0), (2, 100), (3, 100), 13);
        let (current, external) = tips(&f);
        let mut choice =
            ForkChoice::new(f.reader, None).with_tie_breaker(never_flips()).with_policy(Ecbp1100);
        assert!(choice.reorg_needed(&current, &external).unwrap());
    }

    #[test]
    fn test_policy_skipped_when_protection_disabled() {
        let mut f = fixture(mess_config(0), (10, 100), (11, 100), 2_000);
        f.reader = f.reader.with_deep_reorg_protection(false);
        let (current, external) = tips(&f);
        let mut choice =
            ForkChoice::new(f.reader, None).with_tie_breaker(never_flips()).with_policy(Ecbp1100);
        assert!(choice.reorg_needed(&current, &external).unwrap());
    }

    #[test]
    fn test_policy_skipped_outside_window() {
        let f = fixture(mess_config(100), (10, 100), (11, 100), 2_000);
        let (current, external) = tips(&f);
        let mut choice =
            ForkChoice::new(f.reader, None).with_tie_breaker(never_flips()).with_policy(Ecbp1100);
        assert!(choice.reorg_needed(&current, &external).unwrap());

        let mut config = mess_config(0);
        config.ecbp1100_disable_block = Some(5);
        let f = fixture(config, (10, 100), (11, 100), 2_000);
        let (current, external) = tips(&f);
        let mut choice =
            ForkChoice::new(f.reader, None).with_tie_breaker(never_flips()).with_policy(Ecbp1100);
        assert!(choice.reorg_needed(&current, &external).unwrap());
    }

    #[test]
    fn test_no_policy_accepts_deep_reorg() {
        let f = fixture(mess_config(0), (10, 100), (11, 100), 2_000);
        let (current, external) = tips(&f);
        let mut choice = ForkChoice::new(f.reader, None).with_tie_breaker(never_flips());
        assert!(choice.reorg_needed(&current, &external).unwrap());
    }
}
