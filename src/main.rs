use dioxus::prelude::*;

mod api;
mod auth;
mod components;
mod db;
mod library;
mod platform;
mod resolver;
mod state;
mod utils;

use components::AppShell;

const APP_CSS: Asset = asset!("/assets/styling/app.css");

fn main() {
    dioxus::launch(App);
}

#[component]
fn App() -> Element {
    rsx! {
        document::Title { "Netnix" }
        document::Meta { name: "viewport", content: "width=device-width, initial-scale=1" }
        document::Meta { name: "mobile-web-app-capable", content: "yes" }
        document::Meta { name: "apple-mobile-web-app-title", content: "Netnix" }

        document::Stylesheet { href: APP_CSS }

        AppShell {}
    }
}
