//! Passport widget simulator.
//!
//! Runs the chat and wallet-connect flows natively against the mock
//! extension, printing what a browser user would see.
//!
//! ```text
//! passport-sim chat -m "Hi" -m "Can we talk about my portfolio?"
//! passport-sim wallet --switch xbull
//! passport-sim --config passport.json wallet --missing
//! ```

use std::path::PathBuf;

use anyhow::{bail, Context, Result};
use clap::{Parser, Subcommand};
use passport_common::address::WalletId;
use passport_common::config::PassportConfig;
use passport_common::conversation::{ChatRole, Participant};
use passport_common::mock_data;
use passport_sim::{run_wallet_flow, ChatRunner, WalletScript};
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "passport-sim", about = "Drive the Financial Passport widgets from a terminal")]
struct Cli {
    /// JSON config file. Missing fields use the built-in defaults.
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    /// Override the simulated reply delay (milliseconds).
    #[arg(long, global = true)]
    reply_delay_ms: Option<u64>,

    /// Override the wallet selected before any switch.
    #[arg(long, global = true)]
    default_wallet: Option<String>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Send messages and print the conversation once every reply lands.
    Chat {
        #[arg(long, default_value = mock_data::USER_ID)]
        me_id: String,
        #[arg(long, default_value = "Raveesh")]
        me_name: String,
        #[arg(long, default_value = mock_data::ADVISOR_ID)]
        other_id: String,
        #[arg(long, default_value = mock_data::ADVISOR_NAME)]
        other_name: String,
        /// Message to send; repeat for several.
        #[arg(short = 'm', long = "message", required = true)]
        messages: Vec<String>,
    },
    /// Connect, optionally switch, then disconnect a mock wallet.
    Wallet {
        /// Behave as if no extension is installed.
        #[arg(long)]
        missing: bool,
        /// Address returned for the default wallet.
        #[arg(long)]
        address: Option<String>,
        /// Page was authorized on an earlier visit.
        #[arg(long)]
        pre_authorized: bool,
        /// Make the extension reject address requests.
        #[arg(long)]
        fail_connect: bool,
        /// Wallet to switch to after connecting (freighter, xbull, albedo).
        #[arg(long)]
        switch: Option<String>,
    },
}

fn load_config(cli: &Cli) -> Result<PassportConfig> {
    let mut config = match &cli.config {
        Some(path) => {
            let raw = std::fs::read_to_string(path)
                .with_context(|| format!("reading {}", path.display()))?;
            PassportConfig::from_json(&raw)
                .with_context(|| format!("parsing {}", path.display()))?
        }
        None => PassportConfig::default(),
    };
    if let Some(ms) = cli.reply_delay_ms {
        config.reply_delay_ms = ms;
    }
    if let Some(name) = &cli.default_wallet {
        config.default_wallet = parse_wallet(name)?;
    }
    Ok(config)
}

fn parse_wallet(name: &str) -> Result<WalletId> {
    match WalletId::parse(name) {
        Some(wallet) => Ok(wallet),
        None => bail!("unknown wallet {name:?}; expected freighter, xbull or albedo"),
    }
}

#[tokio::main(flavor = "current_thread")]
async fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();

    let cli = Cli::parse();
    let config = load_config(&cli)?;
    tracing::debug!(?config, "loaded config");

    match cli.command {
        Command::Chat {
            me_id,
            me_name,
            other_id,
            other_name,
            messages,
        } => {
            let me = Participant::new(me_id, me_name, ChatRole::User);
            let other = Participant::new(other_id, other_name, ChatRole::Advisor);
            let mut chat = ChatRunner::new(config.conversation(me, other));

            let local = tokio::task::LocalSet::new();
            local
                .run_until(async {
                    for text in &messages {
                        if chat.send(text).is_none() {
                            tracing::warn!("skipping blank message");
                        }
                    }
                    chat.settle().await;
                })
                .await;

            let convo = chat.conversation();
            for msg in convo.messages() {
                let time = msg.timestamp.format("%H:%M:%S");
                println!("[{time}] {}: {}", convo.sender_name(msg), msg.content);
            }
        }
        Command::Wallet {
            missing,
            address,
            pre_authorized,
            fail_connect,
            switch,
        } => {
            let switch_to = switch.as_deref().map(parse_wallet).transpose()?;
            let script = WalletScript {
                missing,
                address,
                pre_authorized,
                fail_connect,
                switch_to,
            };
            for line in run_wallet_flow(&config, &script).await {
                println!("{line}");
            }
        }
    }

    Ok(())
}
