//! Turns manifest-relative paths into URLs the page can navigate to.

use crate::auth::Auth;
use crate::platform::ClientClass;
use thiserror::Error;
use url::Url;

/// Well-known manifest location, relative to the page.
pub const MANIFEST_FILE: &str = ".ump-library.json";

#[cfg(not(target_arch = "wasm32"))]
const LIBRARY_URL_ENV: &str = "NETNIX_LIBRARY_URL";
#[cfg(not(target_arch = "wasm32"))]
const DEFAULT_LIBRARY_URL: &str = "http://localhost:8080/";

const ANDROID_PLAYER_SCHEME: &str = "vlc://";
const IOS_PLAYER_CALLBACK: &str = "vlc-x-callback://x-callback-url/stream";
const IOS_PLAYER_STORE: &str = "https://apps.apple.com/us/app/vlc-for-mobile/id650377962";
const ANDROID_PLAYER_STORE: &str = "https://play.google.com/store/apps/details?id=org.videolan.vlc";

#[derive(Debug, Error, PartialEq)]
pub enum ResolveError {
    #[error("invalid document location `{location}`: {source}")]
    Location {
        location: String,
        #[source]
        source: url::ParseError,
    },
    #[error("empty media path")]
    EmptyPath,
    #[error("`{0}` points outside the library origin")]
    NotRelative(String),
    #[error("cannot resolve `{path}`: {source}")]
    Parse {
        path: String,
        #[source]
        source: url::ParseError,
    },
    #[error("cannot attach credentials to `{0}`")]
    UserInfo(String),
}

/// Percent-encode everything except unreserved characters, so `! ' ( ) *`
/// are escaped too.
pub fn encode_component(value: &str) -> String {
    urlencoding::encode(value).into_owned()
}

/// Encode each `/`-separated segment on its own, keeping the separators.
pub fn encode_path(path: &str) -> String {
    path.split('/')
        .map(encode_component)
        .collect::<Vec<_>>()
        .join("/")
}

#[derive(Debug, Clone, PartialEq)]
pub struct Resolver {
    base: Url,
    client: ClientClass,
}

impl Resolver {
    /// Build a resolver for a page at `document_location`. Paths resolve
    /// against the directory holding the page (and therefore the manifest).
    pub fn new(document_location: &str, client: ClientClass) -> Result<Self, ResolveError> {
        let location_error = |source| ResolveError::Location {
            location: document_location.to_string(),
            source,
        };
        let mut location = Url::parse(document_location).map_err(location_error)?;
        location.set_fragment(None);
        location.set_query(None);
        let base = location.join("./").map_err(location_error)?;
        Ok(Self { base, client })
    }

    /// Resolver for the page the client is running in.
    #[cfg(target_arch = "wasm32")]
    pub fn for_document(client: ClientClass) -> Result<Self, ResolveError> {
        let href = web_sys::window()
            .and_then(|window| window.location().href().ok())
            .unwrap_or_default();
        Self::new(&href, client)
    }

    /// Desktop builds have no document; the library location comes from
    /// `NETNIX_LIBRARY_URL`.
    #[cfg(not(target_arch = "wasm32"))]
    pub fn for_document(client: ClientClass) -> Result<Self, ResolveError> {
        let location =
            std::env::var(LIBRARY_URL_ENV).unwrap_or_else(|_| DEFAULT_LIBRARY_URL.to_string());
        Self::new(&location, client)
    }

    pub fn client(&self) -> ClientClass {
        self.client
    }

    /// Manifest and probe target. Never carries credentials.
    pub fn manifest_url(&self) -> Result<String, ResolveError> {
        self.absolute_url(MANIFEST_FILE, &Auth::None)
            .map(|url| url.to_string())
    }

    fn absolute_url(&self, path: &str, auth: &Auth) -> Result<Url, ResolveError> {
        if path.is_empty() {
            return Err(ResolveError::EmptyPath);
        }
        if path.starts_with("//") {
            return Err(ResolveError::NotRelative(path.to_string()));
        }
        let mut url = self
            .base
            .join(&encode_path(path))
            .map_err(|source| ResolveError::Parse {
                path: path.to_string(),
                source,
            })?;

        if let Auth::Http(credentials) = auth {
            let user_info_error = |_| ResolveError::UserInfo(path.to_string());
            url.set_username(&credentials.username)
                .map_err(user_info_error)?;
            url.set_password(Some(&credentials.password))
                .map_err(user_info_error)?;
        }
        Ok(url)
    }

    /// Absolute URL for `path`, with user-info when `auth` is `http`.
    /// No path in, no URL out.
    pub fn to_absolute(&self, path: Option<&str>, auth: &Auth) -> Result<Option<String>, ResolveError> {
        path.map(|path| self.absolute_url(path, auth).map(|url| url.to_string()))
            .transpose()
    }

    /// What the page should navigate to in order to play `path`.
    pub fn to_playable(
        &self,
        path: &str,
        subtitle: Option<&str>,
        auth: &Auth,
    ) -> Result<String, ResolveError> {
        let media = self.absolute_url(path, auth)?.to_string();
        match self.client {
            ClientClass::Android => Ok(format!("{ANDROID_PLAYER_SCHEME}{media}")),
            ClientClass::Ios => {
                let mut link = format!("{IOS_PLAYER_CALLBACK}?url={}", encode_component(&media));
                let subtitle = subtitle.filter(|path| !path.is_empty());
                if let Some(subtitle) = self.to_absolute(subtitle, auth)? {
                    link.push_str("&sub=");
                    link.push_str(&encode_component(&subtitle));
                }
                Ok(link)
            }
            ClientClass::Other => Ok(media),
        }
    }

    /// Store page for the external player on mobile clients.
    pub fn player_app_url(&self) -> Option<&'static str> {
        match self.client {
            ClientClass::Ios => Some(IOS_PLAYER_STORE),
            ClientClass::Android => Some(ANDROID_PLAYER_STORE),
            ClientClass::Other => None,
        }
    }
}
