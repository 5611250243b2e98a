use crate::components::views::{FilmsView, HomeView, LoginView, SeriesView, ShowView};
use crate::components::{initial_view, use_route_listener, AppView, Navigation, Session};
use crate::db::{initialize_database, load_settings, AppSettings};
use crate::platform::PLATFORM;
use crate::resolver::Resolver;
use crate::state::AppState;
use dioxus::prelude::*;
use tracing::warn;

#[component]
pub fn AppShell() -> Element {
    let app_state = use_signal(AppState::default);
    let mut app_settings = use_signal(AppSettings::default);
    let current_view = use_signal(initial_view);
    let navigation_stack = use_signal(Vec::<AppView>::new);
    let navigation = Navigation::new(current_view, navigation_stack);
    use_route_listener(navigation);
    let resolver = use_hook(|| match Resolver::for_document(PLATFORM.client) {
        Ok(resolver) => Some(resolver),
        Err(e) => {
            warn!("library location unavailable: {e}");
            None
        }
    });

    let Some(resolver) = resolver else {
        return rsx! {
            p { class: "message", "This page cannot locate its media library." }
        };
    };
    let session = use_hook({
        let resolver = resolver.clone();
        move || Session::new(app_state, app_settings, &resolver)
    });

    // Provide state via context
    use_context_provider(|| app_state);
    use_context_provider(|| app_settings);
    use_context_provider(|| navigation);
    use_context_provider(|| resolver.clone());
    use_context_provider(|| session.clone());

    // Load saved preferences on mount
    use_hook(move || {
        spawn(async move {
            if let Err(e) = initialize_database().await {
                warn!("Failed to initialize settings store: {e}");
                return;
            }
            match load_settings().await {
                Ok(settings) => app_settings.set(settings),
                Err(e) => warn!("Failed to load settings: {e}"),
            }
        });
    });

    if !app_state.read().auth().is_determined() {
        return rsx! {
            LoginView {}
        };
    }

    match navigation.current() {
        AppView::Home => rsx! { HomeView {} },
        AppView::Series => rsx! { SeriesView {} },
        AppView::Show(name) => rsx! { ShowView { name } },
        AppView::Films => rsx! { FilmsView {} },
    }
}
