//! Static chain parameters and the per-coin identity tags.
//!
//! The node reports its chain as a symbolic name (`main`, `test`,
//! `regtest`); this module maps that name to the network parameters used to
//! pick the adapter's network mode. The table is read-only, so concurrent
//! lookup needs no synchronization.

/// Network magic of the DeVault main network. Network mode is selected
/// purely by comparing a resolved magic against this constant.
pub const MAINNET_MAGIC: u32 = 0xe2b7_daaf;

const TESTNET_MAGIC: u32 = 0xf4b7_daaf;
const REGTEST_MAGIC: u32 = 0xdab5_bffa;

/// Static per-network constants identifying mainnet vs. alternative networks.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ChainParams {
    /// Network magic identifier.
    pub magic: u32,
    /// Human-readable chain name.
    pub name: &'static str,
}

const MAINNET: ChainParams = ChainParams {
    magic: MAINNET_MAGIC,
    name: "main",
};
const TESTNET: ChainParams = ChainParams {
    magic: TESTNET_MAGIC,
    name: "test",
};
const REGTEST: ChainParams = ChainParams {
    magic: REGTEST_MAGIC,
    name: "regtest",
};

/// All chain names the node is known to report.
static CHAIN_TABLE: &[(&str, &ChainParams)] = &[
    ("main", &MAINNET),
    ("test", &TESTNET),
    ("regtest", &REGTEST),
];

/// Resolve chain parameters from the node's symbolic chain name.
///
/// Unknown names fall back to the mainnet entry so initialization can always
/// proceed; the caller decides network mode by magic comparison, never by
/// whether the lookup "succeeded".
pub fn chain_params(name: &str) -> &'static ChainParams {
    CHAIN_TABLE
        .iter()
        .find(|(entry, _)| *entry == name)
        .map(|(_, params)| *params)
        .unwrap_or(&MAINNET)
}

/// Network mode derived once at initialization from the resolved magic.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NetworkMode {
    Livenet,
    Testnet,
}

impl NetworkMode {
    pub fn is_testnet(&self) -> bool {
        matches!(self, Self::Testnet)
    }
}

impl std::fmt::Display for NetworkMode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Livenet => write!(f, "livenet"),
            Self::Testnet => write!(f, "testnet"),
        }
    }
}

/// Coin-identity tag selecting fee-estimation behavior.
///
/// Resolved once from the configured coin shortcut instead of comparing the
/// raw string inside the fee logic.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CoinVariant {
    DeVault,
    /// BSV-lineage node software; still accepts the parameterized
    /// `estimatefee` call that the ABC lineage dropped.
    BitcoinSv,
}

impl CoinVariant {
    pub fn from_shortcut(shortcut: &str) -> Self {
        if shortcut == "BCHSV" {
            Self::BitcoinSv
        } else {
            Self::DeVault
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn known_chain_names_resolve() {
        assert_eq!(chain_params("main").magic, MAINNET_MAGIC);
        assert_eq!(chain_params("test").name, "test");
        assert_eq!(chain_params("regtest").name, "regtest");
        assert_ne!(chain_params("test").magic, MAINNET_MAGIC);
        assert_ne!(chain_params("regtest").magic, MAINNET_MAGIC);
    }

    #[test]
    fn unknown_chain_name_falls_back_to_mainnet() {
        let params = chain_params("florp");
        assert_eq!(params.magic, MAINNET_MAGIC);
        assert_eq!(params.name, "main");
    }

    #[test]
    fn variant_from_shortcut() {
        assert_eq!(CoinVariant::from_shortcut("BCHSV"), CoinVariant::BitcoinSv);
        assert_eq!(CoinVariant::from_shortcut("DVT"), CoinVariant::DeVault);
        assert_eq!(CoinVariant::from_shortcut(""), CoinVariant::DeVault);
    }

    #[test]
    fn network_mode_display() {
        assert_eq!(NetworkMode::Livenet.to_string(), "livenet");
        assert_eq!(NetworkMode::Testnet.to_string(), "testnet");
        assert!(NetworkMode::Testnet.is_testnet());
        assert!(!NetworkMode::Livenet.is_testnet());
    }
}
