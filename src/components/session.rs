use crate::api::ManifestClient;
use crate::auth::{probe, Auth, HttpProbe};
use crate::db::{save_settings, AppSettings};
use crate::platform::PLATFORM;
use crate::resolver::Resolver;
use crate::state::AppState;
use dioxus::prelude::*;
use tracing::warn;

/// Entry point for everything that changes [`Auth`]. Applies the new value
/// and kicks off the manifest fetch when it becomes possible.
#[derive(Clone)]
pub struct Session {
    app_state: Signal<AppState>,
    settings: Signal<AppSettings>,
    manifest_url: String,
}

impl Session {
    pub fn new(
        app_state: Signal<AppState>,
        settings: Signal<AppSettings>,
        resolver: &Resolver,
    ) -> Self {
        let manifest_url = resolver.manifest_url().unwrap_or_else(|e| {
            warn!("cannot locate the library manifest: {e}");
            String::new()
        });
        Self {
            app_state,
            settings,
            manifest_url,
        }
    }

    pub fn auth(&self) -> Auth {
        self.app_state.peek().auth().clone()
    }

    pub fn apply_auth(&self, auth: Auth) {
        if let Auth::Http(credentials) = &auth {
            self.remember_username(&credentials.username);
        }

        let mut app_state = self.app_state;
        let Some(ticket) = app_state.with_mut(|state| state.set_auth(auth)) else {
            return;
        };
        let client = ManifestClient::new(self.manifest_url.clone());
        spawn(async move {
            let result = client.fetch(&ticket.auth).await;
            app_state.with_mut(|state| state.apply_manifest(&ticket, result));
        });
    }

    /// Probe the manifest URL from `current` and apply the outcome.
    pub fn probe(&self, current: Auth) {
        let session = self.clone();
        spawn(async move {
            match probe(&HttpProbe, &session.manifest_url, PLATFORM.probe, &current).await {
                Ok(next) if current == Auth::Unknown => {
                    session.apply_auth(session.prefill_username(next))
                }
                Ok(next) => session.apply_auth(next),
                Err(e) => warn!("auth state left at {}: {e}", current.label()),
            }
        });
    }

    // First rejection of a visit: offer the last accepted username.
    fn prefill_username(&self, auth: Auth) -> Auth {
        match auth {
            Auth::Unfinished(mut credentials) if credentials.username.is_empty() => {
                if let Some(last) = self.settings.peek().last_username.clone() {
                    credentials.username = last;
                }
                Auth::Unfinished(credentials)
            }
            other => other,
        }
    }

    fn remember_username(&self, username: &str) {
        let mut settings = self.settings;
        let changed = settings.with_mut(|settings| settings.remember_username(username));
        if changed {
            let snapshot = settings.peek().clone();
            spawn(async move {
                if let Err(e) = save_settings(snapshot).await {
                    warn!("failed to save settings: {e}");
                }
            });
        }
    }
}
