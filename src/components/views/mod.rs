mod films;
mod home;
mod login;
mod series;
mod show;

pub use films::*;
pub use home::*;
pub use login::*;
pub use series::*;
pub use show::*;

use crate::api::Item;
use crate::components::play_item;
use crate::db::AppSettings;
use crate::resolver::Resolver;
use crate::state::AppState;
use dioxus::prelude::*;

/// One playable row; episodes show their season and episode numbers.
#[component]
pub fn ItemRow(item: Item) -> Element {
    let app_state = use_context::<Signal<AppState>>();
    let settings = use_context::<Signal<AppSettings>>();
    let resolver = use_context::<Resolver>();
    let episode = item.kind.as_episode().cloned();
    let title = item.display_title().to_string();

    rsx! {
        div { class: "item",
            if let Some(episode) = episode {
                span { class: "square", "{episode.season}" }
                span { class: "square", "{episode.episode}" }
            }
            a {
                class: "grow",
                onclick: move |_| {
                    play_item(&item, &app_state.read(), &settings.read(), &resolver);
                },
                "{title}"
            }
        }
    }
}
