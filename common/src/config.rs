use serde::{Deserialize, Serialize};

use crate::address::WalletId;
use crate::conversation::{Conversation, Participant, DEFAULT_REPLY_DELAY_MS, DEFAULT_REPLY_TEMPLATE};

pub const DEFAULT_INSTALL_URL: &str = "https://www.freighter.app/";

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Network {
    #[default]
    Testnet,
    Public,
}

impl Network {
    /// Network passphrase the wallet kit is configured with.
    pub fn passphrase(self) -> &'static str {
        match self {
            Network::Testnet => "Test SDF Network ; September 2015",
            Network::Public => "Public Global Stellar Network ; September 2015",
        }
    }
}

/// Runtime knobs shared by the web app and the simulator.
///
/// Missing fields in a JSON file fall back to the defaults.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct PassportConfig {
    pub network: Network,
    pub default_wallet: WalletId,
    /// Where the "Install wallet" button sends the user.
    pub install_url: String,
    pub reply_delay_ms: u64,
    /// `{name}` is replaced by the replying participant's display name.
    pub reply_template: String,
}

impl Default for PassportConfig {
    fn default() -> Self {
        Self {
            network: Network::default(),
            default_wallet: WalletId::default(),
            install_url: DEFAULT_INSTALL_URL.to_string(),
            reply_delay_ms: DEFAULT_REPLY_DELAY_MS,
            reply_template: DEFAULT_REPLY_TEMPLATE.to_string(),
        }
    }
}

impl PassportConfig {
    pub fn from_json(json: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(json)
    }

    /// Start a conversation using this config's reply settings.
    pub fn conversation(&self, me: Participant, other: Participant) -> Conversation {
        Conversation::new(me, other)
            .with_reply_delay_ms(self.reply_delay_ms)
            .with_reply_template(self.reply_template.clone())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::conversation::{ChatRole, MAX_REPLY_DELAY_MS};

    #[test]
    fn partial_json_keeps_defaults() {
        let cfg = PassportConfig::from_json(r#"{"default_wallet":"xbull","reply_delay_ms":250}"#)
            .unwrap();
        assert_eq!(cfg.default_wallet, WalletId::XBull);
        assert_eq!(cfg.reply_delay_ms, 250);
        assert_eq!(cfg.network, Network::Testnet);
        assert_eq!(cfg.install_url, DEFAULT_INSTALL_URL);
        assert_eq!(cfg.reply_template, DEFAULT_REPLY_TEMPLATE);
    }

    #[test]
    fn empty_object_is_default() {
        assert_eq!(PassportConfig::from_json("{}").unwrap(), PassportConfig::default());
        assert!(PassportConfig::from_json(r#"{"network":"mainnet"}"#).is_err());
    }

    #[test]
    fn conversation_inherits_reply_settings() {
        let cfg = PassportConfig {
            reply_delay_ms: 40,
            ..PassportConfig::default()
        };
        let convo = cfg.conversation(
            Participant::new("u1", "Raveesh", ChatRole::User),
            Participant::new("a1", "Sarah Smith", ChatRole::Advisor),
        );
        assert_eq!(convo.reply_delay().num_milliseconds(), 40);
    }

    #[test]
    fn huge_reply_delay_still_submits() {
        let cfg = PassportConfig::from_json(r#"{"reply_delay_ms":18446744073709551615}"#).unwrap();
        assert_eq!(cfg.reply_delay_ms, u64::MAX);
        let mut convo = cfg.conversation(
            Participant::new("u1", "Raveesh", ChatRole::User),
            Participant::new("a1", "Sarah Smith", ChatRole::Advisor),
        );
        assert_eq!(convo.reply_delay().num_milliseconds(), MAX_REPLY_DELAY_MS as i64);
        let pending = convo.submit("Hello", chrono::Utc::now()).unwrap();
        assert!(pending.delay > chrono::TimeDelta::zero());
    }
}
