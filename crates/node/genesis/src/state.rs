//! Genesis allocation and its state root.

use alloy_primitives::{Address, B256, Bytes, U256, keccak256};
use alloy_trie::{
    KECCAK_EMPTY, TrieAccount,
    root::{state_root_unhashed, storage_root_unhashed},
};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// The initial account state, keyed by address.
pub type GenesisAlloc = BTreeMap<Address, GenesisAccount>;

/// An account in the genesis allocation.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GenesisAccount {
    /// Account nonce.
    #[serde(default, with = "alloy_serde::quantity")]
    pub nonce: u64,
    /// Balance in wei.
    #[serde(default)]
    pub balance: U256,
    /// Contract code.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub code: Option<Bytes>,
    /// Storage slots.
    #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
    pub storage: BTreeMap<B256, B256>,
}

impl GenesisAccount {
    /// An externally owned account holding `balance`.
    pub fn with_balance(balance: U256) -> Self {
        Self { balance, ..Default::default() }
    }

    /// Returns the account as it is stored in the state trie.
    pub fn trie_account(&self) -> TrieAccount {
        let storage = self
            .storage
            .iter()
            .filter(|(_, value)| !value.is_zero())
            .map(|(slot, value)| (*slot, U256::from_be_bytes(value.0)));
        TrieAccount {
            nonce: self.nonce,
            balance: self.balance,
            storage_root: storage_root_unhashed(storage),
            code_hash: self.code.as_ref().map_or(KECCAK_EMPTY, keccak256),
        }
    }
}

/// Computes the state root of a genesis allocation.
pub fn state_root(alloc: &GenesisAlloc) -> B256 {
    state_root_unhashed(alloc.iter().map(|(address, account)| (*address, account.trie_account())))
}

#[cfg(test)]
mod tests {
    use super::*;
    use alloy_primitives::{address, b256, bytes};
    use alloy_trie::EMPTY_ROOT_HASH;

    const ADDRESS: Address = address!("0x0000000000000000000000000000000000000001");

    #[test]
    fn test_empty_alloc_root() {
        assert_eq!(state_root(&GenesisAlloc::new()), EMPTY_ROOT_HASH);
    }

    #[test]
    fn test_zero_storage_slots_are_skipped() {
        let account = GenesisAccount {
            storage: BTreeMap::from([(B256::with_last_byte(1), B256::ZERO)]),
            ..Default::default()
        };
        let trie = account.trie_account();
        assert_eq!(trie.storage_root, EMPTY_ROOT_HASH);
        assert_eq!(trie.code_hash, KECCAK_EMPTY);
    }

    #[test]
    fn test_code_and_storage_feed_the_root() {
        let plain = GenesisAlloc::from([(ADDRESS, GenesisAccount::with_balance(U256::from(1)))]);
        let with_code = GenesisAlloc::from([(
            ADDRESS,
            GenesisAccount {
                balance: U256::from(1),
                code: Some(bytes!("6000")),
                ..Default::default()
            },
        )]);
        let with_storage = GenesisAlloc::from([(
            ADDRESS,
            GenesisAccount {
                balance: U256::from(1),
                storage: BTreeMap::from([(
                    B256::ZERO,
                    b256!("0x0000000000000000000000000000000000000000000000000000000000000001"),
                )]),
                ..Default::default()
            },
        )]);

        let roots = [state_root(&plain), state_root(&with_code), state_root(&with_storage)];
        assert!(roots.iter().all(|root| *root != EMPTY_ROOT_HASH));
        assert_ne!(roots[0], roots[1]);
        assert_ne!(roots[0], roots[2]);
        assert_ne!(roots[1], roots[2]);
        assert_eq!(with_code[&ADDRESS].trie_account().code_hash, keccak256(bytes!("6000")));
    }

    #[test]
    fn test_alloc_json() {
        let json = r#"{
            "0x0000000000000000000000000000000000000001": {
                "nonce": "0x1",
                "balance": "0x10",
                "code": "0x6000",
                "storage": {
                    "0x0000000000000000000000000000000000000000000000000000000000000000": "0x0000000000000000000000000000000000000000000000000000000000000002"
                }
            }
        }"#;
        let alloc: GenesisAlloc = serde_json::from_str(json).unwrap();
        let account = &alloc[&ADDRESS];
        assert_eq!(account.nonce, 1);
        assert_eq!(account.balance, U256::from(16));
        assert_eq!(account.code, Some(bytes!("6000")));
        assert_eq!(account.storage[&B256::ZERO], B256::with_last_byte(2));

        let blob = serde_json::to_vec(&alloc).unwrap();
        assert_eq!(serde_json::from_slice::<GenesisAlloc>(&blob).unwrap(), alloc);
    }
}
