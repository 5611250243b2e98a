//! The current authentication state and library, owned in one place.
//!
//! The negotiator hands new [`Auth`] values to [`AppState::set_auth`]; when
//! that makes the manifest fetchable a [`FetchTicket`] comes back. The
//! fetch result is only applied while the ticket is still current, so a
//! response that lands after the user was logged out is dropped.

use crate::api::{FetchError, Manifest};
use crate::auth::Auth;
use crate::library::Library;
use tracing::{debug, warn};

#[derive(Debug, Clone, PartialEq, Default)]
pub struct AppState {
    auth: Auth,
    library: Library,
    generation: u64,
}

#[derive(Debug, Clone, PartialEq)]
pub struct FetchTicket {
    generation: u64,
    pub auth: Auth,
}

impl AppState {
    pub fn auth(&self) -> &Auth {
        &self.auth
    }

    pub fn library(&self) -> &Library {
        &self.library
    }

    pub fn set_auth(&mut self, auth: Auth) -> Option<FetchTicket> {
        if auth == self.auth {
            return None;
        }
        debug!(from = self.auth.label(), to = auth.label(), "auth state changed");
        self.auth = auth;
        self.generation += 1;
        self.auth.is_determined().then(|| FetchTicket {
            generation: self.generation,
            auth: self.auth.clone(),
        })
    }

    /// Apply a finished manifest fetch. Returns false when the result was
    /// stale and discarded.
    pub fn apply_manifest(
        &mut self,
        ticket: &FetchTicket,
        result: Result<Manifest, FetchError>,
    ) -> bool {
        if ticket.generation != self.generation || !self.auth.is_determined() {
            debug!("discarding manifest fetched under an older auth state");
            return false;
        }
        match result {
            Ok(manifest) => {
                self.library = Library::from_manifest(manifest);
                debug!(items = self.library.item_count(), "library replaced");
            }
            Err(e) => {
                warn!("library unavailable, asking for credentials again: {e}");
                self.library = Library::default();
                self.set_auth(Auth::Unknown);
            }
        }
        true
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api::decode_manifest;
    use crate::auth::Credentials;

    fn manifest() -> Manifest {
        decode_manifest(
            r#"{"version": 1, "items": [{"path": "a.mkv", "type": ["video"], "meta": {"title": "A"}}]}"#,
        )
        .unwrap()
    }

    #[test]
    fn only_determined_states_request_a_fetch() {
        let mut state = AppState::default();
        assert!(state
            .set_auth(Auth::Unfinished(Credentials::default()))
            .is_none());
        let ticket = state.set_auth(Auth::None).unwrap();
        assert_eq!(ticket.auth, Auth::None);
        assert!(state.set_auth(Auth::None).is_none());
    }

    #[test]
    fn applies_current_fetch() {
        let mut state = AppState::default();
        let ticket = state.set_auth(Auth::None).unwrap();
        assert!(state.apply_manifest(&ticket, Ok(manifest())));
        assert_eq!(state.library().item_count(), 1);
    }

    #[test]
    fn discards_fetch_after_logout() {
        let mut state = AppState::default();
        let ticket = state
            .set_auth(Auth::Http(Credentials::new("u", "p")))
            .unwrap();
        state.set_auth(Auth::Unknown);
        assert!(!state.apply_manifest(&ticket, Ok(manifest())));
        assert!(state.library().is_empty());
    }

    #[test]
    fn discards_fetch_superseded_by_newer_auth() {
        let mut state = AppState::default();
        let old = state.set_auth(Auth::None).unwrap();
        let new = state
            .set_auth(Auth::Http(Credentials::new("u", "p")))
            .unwrap();
        assert!(!state.apply_manifest(&old, Ok(manifest())));
        assert!(state.apply_manifest(&new, Ok(manifest())));
    }

    #[test]
    fn failed_fetch_resets_auth() {
        let mut state = AppState::default();
        let ticket = state.set_auth(Auth::None).unwrap();
        state.apply_manifest(&ticket, Ok(manifest()));
        let ticket = state
            .set_auth(Auth::Http(Credentials::new("u", "p")))
            .unwrap();
        assert!(state.apply_manifest(&ticket, Err(FetchError::Status(403))));
        assert_eq!(state.auth(), &Auth::Unknown);
        assert!(state.library().is_empty());
    }
}
