//! Native driver for the passport widgets.
//!
//! The browser host schedules reply timers with `gloo-timers` and renders
//! state through signals. This crate does the same on a single-threaded tokio
//! runtime so the chat and wallet flows can be exercised from a terminal and
//! from integration tests with a paused clock.

pub mod chat_runner;
pub mod wallet_flow;

pub use chat_runner::ChatRunner;
pub use wallet_flow::{run_wallet_flow, WalletScript};
