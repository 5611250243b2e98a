use crate::components::{AppView, Chrome, Navigation};
use crate::db::{save_settings, AppSettings};
use crate::state::AppState;
use dioxus::prelude::*;
use tracing::warn;

#[component]
pub fn HomeView() -> Element {
    let navigation = use_context::<Navigation>();
    let app_state = use_context::<Signal<AppState>>();
    let mut app_settings = use_context::<Signal<AppSettings>>();
    let is_empty = app_state.read().library().is_empty();
    let language = app_settings.read().preferred_language.clone();

    let on_language_change = move |e: Event<FormData>| {
        let mut settings = app_settings();
        if !settings.set_preferred_language(&e.value()) {
            return;
        }
        let settings_clone = settings.clone();
        app_settings.set(settings);
        spawn(async move {
            if let Err(e) = save_settings(settings_clone).await {
                warn!("failed to save settings: {e}");
            }
        });
    };

    rsx! {
        Chrome { class: "main-links".to_string(),
            a {
                class: "main-link",
                onclick: move |_| navigation.navigate_to(AppView::Films),
                span { "Films" }
            }
            a {
                class: "main-link",
                onclick: move |_| navigation.navigate_to(AppView::Series),
                span { "Series" }
            }
            if is_empty {
                p { class: "message", "The library is empty or still loading." }
            }
            div { class: "language",
                label { r#for: "subtitle-language", "Subtitle language" }
                input {
                    id: "subtitle-language",
                    r#type: "text",
                    size: "4",
                    placeholder: "en",
                    value: "{language}",
                    onchange: on_language_change,
                }
            }
        }
    }
}
