use crate::components::views::ItemRow;
use crate::components::Chrome;
use crate::state::AppState;
use dioxus::prelude::*;

#[component]
pub fn ShowView(name: String) -> Element {
    let app_state = use_context::<Signal<AppState>>();
    let episodes: Vec<_> = app_state
        .read()
        .library()
        .episodes_of(&name)
        .into_iter()
        .cloned()
        .collect();

    rsx! {
        Chrome { class: "files".to_string(),
            for item in episodes {
                ItemRow { key: "{item.path}", item: item.clone() }
            }
        }
    }
}
