//! Authentication state for the origin server.
//!
//! The server either accepts anonymous requests or wants HTTP Basic
//! credentials. [`Auth`] tracks what is known so far; [`probe`] finds out
//! without ever letting the browser open its own credential dialog, and the
//! [`capture`] sources feed user-entered or autofilled credentials back in.

pub mod capture;
pub mod probe;

pub use capture::*;
pub use probe::*;

use base64::{engine::general_purpose::STANDARD, Engine as _};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Default)]
pub struct Credentials {
    pub username: String,
    pub password: String,
}

impl Credentials {
    pub fn new(username: impl Into<String>, password: impl Into<String>) -> Self {
        Self {
            username: username.into(),
            password: password.into(),
        }
    }

    pub fn is_complete(&self) -> bool {
        !self.username.is_empty() && !self.password.is_empty()
    }

    /// `Authorization` header value for Basic auth.
    pub fn basic_header(&self) -> String {
        let token = STANDARD.encode(format!("{}:{}", self.username, self.password));
        format!("Basic {token}")
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum Auth {
    /// No probe has completed yet.
    #[default]
    Unknown,
    /// The server rejected us, or credentials are still being typed.
    Unfinished(Credentials),
    /// The server accepted these Basic credentials.
    Http(Credentials),
    /// The server needs no credentials.
    None,
}

impl Auth {
    pub fn credentials(&self) -> Option<&Credentials> {
        match self {
            Auth::Unfinished(credentials) | Auth::Http(credentials) => Some(credentials),
            Auth::Unknown | Auth::None => None,
        }
    }

    /// Whether the manifest may be requested in this state.
    pub fn is_determined(&self) -> bool {
        matches!(self, Auth::Http(_) | Auth::None)
    }

    pub fn label(&self) -> &'static str {
        match self {
            Auth::Unknown => "unknown",
            Auth::Unfinished(_) => "unfinished",
            Auth::Http(_) => "http",
            Auth::None => "none",
        }
    }

    /// Header map entry to attach to ordinary requests, if any.
    pub fn authorization_header(&self) -> Option<String> {
        self.credentials().map(Credentials::basic_header)
    }

    /// State after a probe reported `success` (anything but 401).
    pub fn after_probe(self, success: bool) -> Auth {
        match (success, self) {
            (true, Auth::Unfinished(credentials)) => Auth::Http(credentials),
            (true, _) => Auth::None,
            (false, Auth::Unfinished(credentials) | Auth::Http(credentials)) => {
                Auth::Unfinished(credentials)
            }
            (false, _) => Auth::Unfinished(Credentials::default()),
        }
    }
}
