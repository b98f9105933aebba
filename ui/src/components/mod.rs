pub mod admin_dashboard;
pub mod advisor_dashboard;
pub mod app;
pub mod app_state;
pub mod chat_widget;
pub mod dashboard_view;
pub mod extension;
pub mod kyc_view;
pub mod profile_view;
pub mod settings_view;
pub mod wallet_connect;
pub mod widgets;
