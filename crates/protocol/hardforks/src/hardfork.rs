//! Named network upgrades.

/// A named network upgrade.
///
/// Variants are declared in rough activation order across both the Ethereum and the Ethereum
/// Classic lineages. Classic upgrades that bundle Ethereum EIPs under a different name
/// (`Atlantis`, `Agharta`, `Phoenix`, ...) are their own variants, since they activate at
/// different points and omit some of the Ethereum changes.
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    PartialOrd,
    Ord,
    Hash,
    strum::EnumIter,
    strum::EnumString,
    strum::Display,
    strum::IntoStaticStr,
)]
#[strum(serialize_all = "camelCase", ascii_case_insensitive)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "camelCase"))]
pub enum Hardfork {
    /// Homestead.
    Homestead,
    /// The DAO irregular state change.
    Dao,
    /// Tangerine Whistle (EIP-150).
    Tangerine,
    /// Classic: replay protection and difficulty bomb delay (ECIP-1010).
    DieHard,
    /// Spurious Dragon (EIP-155, EIP-158).
    SpuriousDragon,
    /// Classic: monetary policy (ECIP-1017).
    Gotham,
    /// Classic: difficulty bomb removal (ECIP-1041).
    DefuseDifficultyBomb,
    /// Byzantium.
    Byzantium,
    /// Constantinople.
    Constantinople,
    /// Petersburg.
    Petersburg,
    /// Classic: Byzantium equivalent (ECIP-1054).
    Atlantis,
    /// Classic: Constantinople and Petersburg equivalent (ECIP-1056).
    Agharta,
    /// Istanbul.
    Istanbul,
    /// Muir Glacier difficulty bomb delay.
    MuirGlacier,
    /// Classic: Istanbul equivalent (ECIP-1088).
    Phoenix,
    /// Berlin.
    Berlin,
    /// Classic: Ethash epoch size increase (ECIP-1099).
    Thanos,
    /// London (EIP-1559).
    London,
    /// Classic: Berlin equivalent (ECIP-1103).
    Magneto,
    /// Arrow Glacier difficulty bomb delay.
    ArrowGlacier,
    /// Classic: London without the fee market (ECIP-1104).
    Mystique,
    /// Gray Glacier difficulty bomb delay.
    GrayGlacier,
    /// Block based network split marker used around the merge.
    MergeNetsplit,
    /// Classic: Shanghai without withdrawals (ECIP-1109).
    Spiral,
    /// Shanghai (withdrawals).
    Shanghai,
    /// Cancun (blob transactions).
    Cancun,
    /// Prague.
    Prague,
}

impl Hardfork {
    /// Returns the name of the hardfork as a static string.
    pub fn name(self) -> &'static str {
        self.into()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use core::str::FromStr;
    use rstest::rstest;
    use strum::IntoEnumIterator;

    #[rstest]
    #[case("homestead", Hardfork::Homestead)]
    #[case("spuriousDragon", Hardfork::SpuriousDragon)]
    #[case("SPURIOUSDRAGON", Hardfork::SpuriousDragon)]
    #[case("mergeNetsplit", Hardfork::MergeNetsplit)]
    #[case("defuseDifficultyBomb", Hardfork::DefuseDifficultyBomb)]
    fn test_hardfork_from_str(#[case] name: &str, #[case] expected: Hardfork) {
        assert_eq!(Hardfork::from_str(name).unwrap(), expected);
    }

    #[test]
    fn test_hardfork_from_str_unknown() {
        assert!(Hardfork::from_str("bedrock").is_err());
    }

    #[test]
    fn test_hardfork_display_round_trips() {
        for fork in Hardfork::iter() {
            assert_eq!(Hardfork::from_str(&fork.to_string()).unwrap(), fork);
            assert_eq!(fork.name(), fork.to_string());
        }
    }

    #[test]
    #[cfg(feature = "serde")]
    fn test_hardfork_serde_name() {
        let json = serde_json::to_string(&Hardfork::GrayGlacier).unwrap();
        assert_eq!(json, "\"grayGlacier\"");
        let fork: Hardfork = serde_json::from_str("\"tangerine\"").unwrap();
        assert_eq!(fork, Hardfork::Tangerine);
    }
}
