pub mod account;
pub mod address;
pub mod config;
pub mod conversation;
pub mod dashboard;
pub mod finance;
pub mod mock_data;
pub mod passport;
pub mod profile;
pub mod wallet_extension;
pub mod wallet_session;
