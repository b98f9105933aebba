mod bootstrap;
mod components;

fn main() {
    bootstrap::install();
    dioxus::launch(components::app::App);
}
