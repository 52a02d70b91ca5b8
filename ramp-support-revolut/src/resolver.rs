//! Mapping of provider contract addresses to local token ids.

/// Resolves a token contract address on a chain to the token id used in
/// crypto keys.
///
/// Returning `None` means the token is unknown locally; ingestion then skips
/// the asset.
pub trait TokenIdResolver {
    /// Returns the token id for `contract_address` on `plugin_id`.
    fn token_id(&self, plugin_id: &str, contract_address: &str) -> Option<String>;
}

impl<F> TokenIdResolver for F
where
    F: Fn(&str, &str) -> Option<String>,
{
    fn token_id(&self, plugin_id: &str, contract_address: &str) -> Option<String> {
        self(plugin_id, contract_address)
    }
}

/// Token ids for EVM chains: the contract address, lowercased, without `0x`.
#[derive(Debug, Clone, Copy, Default)]
pub struct EvmTokenIds;

impl EvmTokenIds {
    /// Plugin ids of the EVM chains this resolver understands.
    pub const PLUGIN_IDS: [&'static str; 4] = ["avalanche", "ethereum", "optimism", "polygon"];
}

impl TokenIdResolver for EvmTokenIds {
    fn token_id(&self, plugin_id: &str, contract_address: &str) -> Option<String> {
        if !Self::PLUGIN_IDS.contains(&plugin_id) {
            return None;
        }
        let address = contract_address.to_ascii_lowercase();
        let hex = address.strip_prefix("0x").unwrap_or(&address);
        (hex.len() == 40 && hex.bytes().all(|b| b.is_ascii_hexdigit())).then(|| hex.to_owned())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_evm_token_ids() {
        assert_eq!(
            EvmTokenIds.token_id("ethereum", "0xA0b86991c6218b36c1d19D4a2e9Eb0cE3606eB48"),
            Some("a0b86991c6218b36c1d19d4a2e9eb0ce3606eb48".to_owned())
        );
        assert_eq!(
            EvmTokenIds.token_id("polygon", "c2132D05D31c914a87C6611C10748AEb04B58e8F"),
            Some("c2132d05d31c914a87c6611c10748aeb04b58e8f".to_owned())
        );
        assert_eq!(
            EvmTokenIds.token_id("tron", "TR7NHqjeKQxGTCi8q8ZY4pL8otSzgjLj6t"),
            None
        );
        assert_eq!(EvmTokenIds.token_id("ethereum", "0x1234"), None);
    }

    #[test]
    fn test_closure_resolver() {
        let only_ethereum = |plugin_id: &str, address: &str| {
            (plugin_id == "ethereum").then(|| address.to_lowercase().replacen("0x", "", 1))
        };
        assert_eq!(
            only_ethereum.token_id("ethereum", "0xABC"),
            Some("abc".to_owned())
        );
        assert_eq!(only_ethereum.token_id("solana", "EPjF"), None);
    }
}
