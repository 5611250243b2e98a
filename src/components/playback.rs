use crate::api::Item;
use crate::db::AppSettings;
use crate::resolver::Resolver;
use crate::state::AppState;
use tracing::{info, warn};

/// Resolve `item` (and its subtitle) and hand it to the player.
pub fn play_item(item: &Item, state: &AppState, settings: &AppSettings, resolver: &Resolver) {
    let subtitle = state
        .library()
        .subtitle_for(item, &settings.preferred_language)
        .map(|subtitle| subtitle.path.as_str());

    match resolver.to_playable(&item.path, subtitle, state.auth()) {
        Ok(link) => {
            info!(path = %item.path, has_subtitle = subtitle.is_some(), "starting playback");
            open_link(&link);
        }
        Err(e) => warn!("cannot play {}: {e}", item.path),
    }
}

#[cfg(target_arch = "wasm32")]
fn open_link(link: &str) {
    if let Some(window) = web_sys::window() {
        if let Err(e) = window.location().set_href(link) {
            warn!("navigation to player link failed: {e:?}");
        }
    }
}

#[cfg(not(target_arch = "wasm32"))]
fn open_link(_link: &str) {
    info!("no browser location to hand the player link to");
}
