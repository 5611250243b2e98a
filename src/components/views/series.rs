use crate::components::{AppView, Chrome, Navigation};
use crate::resolver::Resolver;
use crate::state::AppState;
use dioxus::prelude::*;

#[derive(Clone, PartialEq)]
struct ShowTile {
    name: String,
    cover: Option<String>,
}

#[component]
pub fn SeriesView() -> Element {
    let app_state = use_context::<Signal<AppState>>();
    let resolver = use_context::<Resolver>();
    let navigation = use_context::<Navigation>();

    let tiles: Vec<ShowTile> = {
        let state = app_state.read();
        let library = state.library();
        library
            .list_shows()
            .into_iter()
            .map(|name| {
                let cover_path = library.cover_art_for(&name).map(|art| art.path.as_str());
                let cover = resolver
                    .to_absolute(cover_path, state.auth())
                    .unwrap_or_else(|e| {
                        tracing::warn!("skipping cover art for {name}: {e}");
                        None
                    });
                ShowTile { name, cover }
            })
            .collect()
    };

    rsx! {
        Chrome { class: "directories".to_string(),
            for tile in tiles {
                a {
                    key: "{tile.name}",
                    class: "nodefault",
                    style: tile.cover.as_ref().map(|cover| format!("background-image: url({cover})")).unwrap_or_default(),
                    onclick: {
                        let name = tile.name.clone();
                        move |_| navigation.navigate_to(AppView::Show(name.clone()))
                    },
                    span { "{tile.name}" }
                }
            }
        }
    }
}
