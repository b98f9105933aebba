use dioxus::prelude::*;

use super::admin_dashboard::AdminDashboard;
use super::advisor_dashboard::AdvisorDashboard;
use super::app_state::{use_app_state, AppState};
use super::dashboard_view::DashboardView;
use super::kyc_view::KycView;
use super::profile_view::ProfileView;
use super::settings_view::SettingsView;

#[derive(Clone, Debug, PartialEq, Routable)]
pub enum Route {
    #[layout(AppLayout)]
    #[redirect("/", || Route::Dashboard {})]
    #[route("/dashboard")]
    Dashboard {},
    #[route("/profile")]
    Profile {},
    #[route("/settings")]
    Settings {},
    #[route("/kyc")]
    Kyc {},
    #[route("/advisor")]
    Advisor {},
    #[route("/admin")]
    Admin {},
}

impl Route {
    fn nav_label(&self) -> &'static str {
        match self {
            Route::Dashboard {} => "Dashboard",
            Route::Profile {} => "Profile",
            Route::Settings {} => "Settings",
            Route::Kyc {} => "KYC",
            Route::Advisor {} => "Advisor",
            Route::Admin {} => "Admin",
        }
    }
}

#[component]
pub fn App() -> Element {
    use_context_provider(|| Signal::new(AppState::new()));

    rsx! { Router::<Route> {} }
}

#[component]
fn AppLayout() -> Element {
    let app_state = use_app_state();
    let nav = use_navigator();
    let current = use_route::<Route>();

    let dark = app_state.read().preferences.dark_mode;
    let items = [
        Route::Dashboard {},
        Route::Profile {},
        Route::Settings {},
        Route::Kyc {},
        Route::Advisor {},
        Route::Admin {},
    ];

    rsx! {
        div { class: if dark { "passport-app dark" } else { "passport-app" },
            aside { class: "sidebar",
                div { class: "sidebar-brand",
                    h1 { "Financial Passport" }
                }
                nav {
                    for route in items {
                        {
                            let active = route == current;
                            let label = route.nav_label();
                            rsx! {
                                button {
                                    key: "{label}",
                                    class: if active { "nav-item active" } else { "nav-item" },
                                    onclick: move |_| { nav.push(route.clone()); },
                                    "{label}"
                                }
                            }
                        }
                    }
                }
            }
            main { class: "content",
                Outlet::<Route> {}
            }
        }
    }
}

/// Route component: the signed-in user's overview.
#[component]
fn Dashboard() -> Element {
    rsx! { DashboardView {} }
}

#[component]
fn Profile() -> Element {
    rsx! { ProfileView {} }
}

#[component]
fn Settings() -> Element {
    rsx! { SettingsView {} }
}

#[component]
fn Kyc() -> Element {
    rsx! { KycView {} }
}

#[component]
fn Advisor() -> Element {
    rsx! { AdvisorDashboard {} }
}

#[component]
fn Admin() -> Element {
    rsx! { AdminDashboard {} }
}
