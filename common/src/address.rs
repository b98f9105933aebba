use serde::{Deserialize, Serialize};
use std::fmt;

/// Wallet extensions the connector knows how to switch between.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum WalletId {
    #[default]
    Freighter,
    XBull,
    Albedo,
}

impl WalletId {
    pub fn all() -> &'static [WalletId] {
        &[WalletId::Freighter, WalletId::XBull, WalletId::Albedo]
    }

    /// Identifier passed to the extension's `setWallet`.
    pub fn as_str(self) -> &'static str {
        match self {
            WalletId::Freighter => "freighter",
            WalletId::XBull => "xbull",
            WalletId::Albedo => "albedo",
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            WalletId::Freighter => "Freighter",
            WalletId::XBull => "xBull",
            WalletId::Albedo => "Albedo",
        }
    }

    pub fn parse(s: &str) -> Option<WalletId> {
        WalletId::all()
            .iter()
            .copied()
            .find(|w| w.as_str().eq_ignore_ascii_case(s))
    }
}

impl fmt::Display for WalletId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Compact form for display: first 4 and last 4 characters around an ellipsis.
///
/// Display only. Never compare or validate addresses with this.
pub fn format_address(address: &str) -> String {
    let chars: Vec<char> = address.chars().collect();
    if chars.len() <= 8 {
        return address.to_string();
    }
    let head: String = chars[..4].iter().collect();
    let tail: String = chars[chars.len() - 4..].iter().collect();
    format!("{head}...{tail}")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn long_address_is_shortened() {
        let addr = "GCKFBEIYV2U22IO2BJ4KVJOIP7XPWQGQFKKWXR6DOSJBV7STMAQSMTGG";
        assert_eq!(format_address(addr), "GCKF...MTGG");
    }

    #[test]
    fn short_address_is_kept_whole() {
        assert_eq!(format_address("GABCDEFG"), "GABCDEFG");
        assert_eq!(format_address(""), "");
    }

    #[test]
    fn wallet_ids_parse_case_insensitively() {
        assert_eq!(WalletId::parse("xBull"), Some(WalletId::XBull));
        assert_eq!(WalletId::parse("ALBEDO"), Some(WalletId::Albedo));
        assert_eq!(WalletId::parse("lobstr"), None);
    }
}
