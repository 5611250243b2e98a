use crate::components::views::ItemRow;
use crate::components::Chrome;
use crate::state::AppState;
use dioxus::prelude::*;

#[component]
pub fn FilmsView() -> Element {
    let app_state = use_context::<Signal<AppState>>();
    let films: Vec<_> = app_state
        .read()
        .library()
        .films()
        .into_iter()
        .cloned()
        .collect();

    rsx! {
        Chrome { class: "files".to_string(),
            for item in films {
                ItemRow { key: "{item.path}", item: item.clone() }
            }
        }
    }
}
