// Probing the origin for its authentication requirements.
use super::{Auth, Credentials};
use crate::api::HTTP_CLIENT;
use async_trait::async_trait;
use thiserror::Error;
use tracing::{debug, info, warn};

/// Marks probe traffic apart from a browser-issued authentication request.
pub const MARKER_HEADER: (&str, &str) = ("X-Requested-With", "XMLHttpRequest");
/// Sent when no credentials are known so the server still takes its
/// "requires auth" branch.
pub const PLACEHOLDER_AUTHORIZATION: &str = "Basic 000000";
const FORM_CONTENT_TYPE: (&str, &str) = ("Content-type", "application/x-www-form-urlencoded");
const STATUS_UNAUTHORIZED: u16 = 401;

#[derive(Debug, Error)]
pub enum ProbeError {
    #[error("probe request failed: {0}")]
    Transport(String),
}

/// How credentials travel in the probe request.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ProbeStrategy {
    /// Blocking request with credentials given as the request's own
    /// user/password parameters. Needed on Safari, which prompts on any
    /// asynchronous request that gets a 401.
    SyncCredentials,
    /// Asynchronous request with an explicit `Authorization` header.
    HeaderCredentials,
}

impl ProbeStrategy {
    pub fn for_user_agent(user_agent: &str) -> Self {
        let is_safari = user_agent
            .find("Version")
            .map(|start| user_agent[start..].contains("Safari"))
            .unwrap_or(false);
        if is_safari {
            ProbeStrategy::SyncCredentials
        } else {
            ProbeStrategy::HeaderCredentials
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProbeRequest {
    pub url: String,
    pub strategy: ProbeStrategy,
    /// Request-level user/password, only for [`ProbeStrategy::SyncCredentials`].
    pub login: Option<Credentials>,
    pub headers: Vec<(String, String)>,
}

impl ProbeRequest {
    pub fn new(url: &str, strategy: ProbeStrategy, current: &Auth) -> Self {
        let header = |(name, value): (&str, &str)| (name.to_string(), value.to_string());
        match strategy {
            ProbeStrategy::SyncCredentials => Self {
                url: url.to_string(),
                strategy,
                login: Some(current.credentials().cloned().unwrap_or_default()),
                headers: vec![header(FORM_CONTENT_TYPE), header(MARKER_HEADER)],
            },
            ProbeStrategy::HeaderCredentials => {
                let authorization = current
                    .authorization_header()
                    .unwrap_or_else(|| PLACEHOLDER_AUTHORIZATION.to_string());
                Self {
                    url: url.to_string(),
                    strategy,
                    login: None,
                    headers: vec![
                        ("Authorization".to_string(), authorization),
                        header(MARKER_HEADER),
                    ],
                }
            }
        }
    }
}

/// Sends a `HEAD` probe and reports the response status.
#[async_trait(?Send)]
pub trait ProbeTransport {
    async fn send(&self, request: &ProbeRequest) -> Result<u16, ProbeError>;
}

/// Probe `check_url` from `current` and return the next state.
///
/// Only a 401 counts as rejection. A request that could not be sent at all
/// is returned as an error and the caller keeps `current`.
pub async fn probe<T>(
    transport: &T,
    check_url: &str,
    strategy: ProbeStrategy,
    current: &Auth,
) -> Result<Auth, ProbeError>
where
    T: ProbeTransport + ?Sized,
{
    let request = ProbeRequest::new(check_url, strategy, current);
    let status = transport.send(&request).await?;
    let success = status != STATUS_UNAUTHORIZED;
    let next = current.clone().after_probe(success);
    if success {
        info!(from = current.label(), to = next.label(), status, "auth probe accepted");
    } else {
        debug!(from = current.label(), "auth probe rejected with 401");
    }
    Ok(next)
}

/// Probe transport backed by the shared HTTP client (and XHR for the
/// synchronous strategy in the browser).
#[derive(Debug, Clone, Copy, Default)]
pub struct HttpProbe;

#[async_trait(?Send)]
impl ProbeTransport for HttpProbe {
    async fn send(&self, request: &ProbeRequest) -> Result<u16, ProbeError> {
        match (request.strategy, request.login.as_ref()) {
            #[cfg(target_arch = "wasm32")]
            (ProbeStrategy::SyncCredentials, Some(login)) => sync_xhr_status(request, login),
            #[cfg(not(target_arch = "wasm32"))]
            (ProbeStrategy::SyncCredentials, Some(login)) => {
                let mut builder = HTTP_CLIENT
                    .head(&request.url)
                    .basic_auth(&login.username, Some(&login.password));
                for (name, value) in &request.headers {
                    builder = builder.header(name.as_str(), value.as_str());
                }
                send_head(builder).await
            }
            _ => {
                let mut builder = HTTP_CLIENT.head(&request.url);
                for (name, value) in &request.headers {
                    builder = builder.header(name.as_str(), value.as_str());
                }
                send_head(builder).await
            }
        }
    }
}

async fn send_head(builder: reqwest::RequestBuilder) -> Result<u16, ProbeError> {
    let response = builder.send().await.map_err(|e| {
        warn!("auth probe could not reach the server: {e}");
        ProbeError::Transport(e.to_string())
    })?;
    Ok(response.status().as_u16())
}

#[cfg(target_arch = "wasm32")]
fn sync_xhr_status(request: &ProbeRequest, login: &Credentials) -> Result<u16, ProbeError> {
    use web_sys::XmlHttpRequest;

    let transport = |e: wasm_bindgen::JsValue| ProbeError::Transport(format!("{e:?}"));
    let xhr = XmlHttpRequest::new().map_err(transport)?;
    xhr.open_with_async_and_user_and_password(
        "HEAD",
        &request.url,
        false,
        Some(&login.username),
        Some(&login.password),
    )
    .map_err(transport)?;
    for (name, value) in &request.headers {
        xhr.set_request_header(name, value).map_err(transport)?;
    }
    xhr.send().map_err(transport)?;
    xhr.status().map_err(transport)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::RefCell;

    struct FixedStatus {
        status: Result<u16, String>,
        seen: RefCell<Vec<ProbeRequest>>,
    }

    impl FixedStatus {
        fn new(status: u16) -> Self {
            Self {
                status: Ok(status),
                seen: RefCell::new(Vec::new()),
            }
        }

        fn failing() -> Self {
            Self {
                status: Err("connection refused".to_string()),
                seen: RefCell::new(Vec::new()),
            }
        }
    }

    #[async_trait(?Send)]
    impl ProbeTransport for FixedStatus {
        async fn send(&self, request: &ProbeRequest) -> Result<u16, ProbeError> {
            self.seen.borrow_mut().push(request.clone());
            self.status.clone().map_err(ProbeError::Transport)
        }
    }

    fn creds() -> Credentials {
        Credentials::new("bob", "hunter2")
    }

    fn header<'a>(request: &'a ProbeRequest, name: &str) -> Option<&'a str> {
        request
            .headers
            .iter()
            .find(|(key, _)| key == name)
            .map(|(_, value)| value.as_str())
    }

    const URL: &str = "https://media.example/library/.ump-library.json";
    const SAFARI: &str = "Mozilla/5.0 (Macintosh; Intel Mac OS X 14_4) AppleWebKit/605.1.15 (KHTML, like Gecko) Version/17.4 Safari/605.1.15";
    const CHROME: &str = "Mozilla/5.0 (X11; Linux x86_64) AppleWebKit/537.36 (KHTML, like Gecko) Chrome/124.0.0.0 Safari/537.36";

    #[test]
    fn picks_sync_strategy_for_safari_only() {
        assert_eq!(
            ProbeStrategy::for_user_agent(SAFARI),
            ProbeStrategy::SyncCredentials
        );
        assert_eq!(
            ProbeStrategy::for_user_agent(CHROME),
            ProbeStrategy::HeaderCredentials
        );
        assert_eq!(
            ProbeStrategy::for_user_agent("Safari/605 Version/17"),
            ProbeStrategy::HeaderCredentials
        );
    }

    #[test]
    fn header_probe_uses_placeholder_without_credentials() {
        let request = ProbeRequest::new(URL, ProbeStrategy::HeaderCredentials, &Auth::Unknown);
        assert_eq!(header(&request, "Authorization"), Some(PLACEHOLDER_AUTHORIZATION));
        assert_eq!(header(&request, "X-Requested-With"), Some("XMLHttpRequest"));
        assert!(request.login.is_none());
    }

    #[test]
    fn header_probe_replaces_placeholder_with_credentials() {
        let request = ProbeRequest::new(
            URL,
            ProbeStrategy::HeaderCredentials,
            &Auth::Unfinished(creds()),
        );
        assert_eq!(
            header(&request, "Authorization"),
            Some(creds().basic_header().as_str())
        );
        assert_eq!(
            request
                .headers
                .iter()
                .filter(|(key, _)| key == "Authorization")
                .count(),
            1
        );
    }

    #[test]
    fn sync_probe_carries_request_credentials() {
        let request = ProbeRequest::new(URL, ProbeStrategy::SyncCredentials, &Auth::Http(creds()));
        assert_eq!(request.login, Some(creds()));
        assert!(header(&request, "Authorization").is_none());
        assert_eq!(header(&request, "X-Requested-With"), Some("XMLHttpRequest"));

        let anonymous = ProbeRequest::new(URL, ProbeStrategy::SyncCredentials, &Auth::None);
        assert_eq!(anonymous.login, Some(Credentials::default()));
    }

    #[tokio::test]
    async fn unknown_with_open_server_becomes_none() {
        let transport = FixedStatus::new(200);
        let next = probe(&transport, URL, ProbeStrategy::HeaderCredentials, &Auth::Unknown)
            .await
            .unwrap();
        assert_eq!(next, Auth::None);
        assert_eq!(transport.seen.borrow()[0].url, URL);
    }

    #[tokio::test]
    async fn unfinished_accepted_becomes_http() {
        let transport = FixedStatus::new(204);
        let next = probe(
            &transport,
            URL,
            ProbeStrategy::SyncCredentials,
            &Auth::Unfinished(creds()),
        )
        .await
        .unwrap();
        assert_eq!(next, Auth::Http(creds()));
    }

    #[tokio::test]
    async fn any_state_rejected_becomes_unfinished() {
        let transport = FixedStatus::new(401);
        for (current, expected) in [
            (Auth::Unknown, Credentials::default()),
            (Auth::None, Credentials::default()),
            (Auth::Http(creds()), creds()),
            (Auth::Unfinished(creds()), creds()),
        ] {
            let next = probe(&transport, URL, ProbeStrategy::HeaderCredentials, &current)
                .await
                .unwrap();
            assert_eq!(next, Auth::Unfinished(expected));
        }
    }

    #[tokio::test]
    async fn non_401_errors_still_count_as_success() {
        let transport = FixedStatus::new(404);
        let next = probe(&transport, URL, ProbeStrategy::HeaderCredentials, &Auth::Unknown)
            .await
            .unwrap();
        assert_eq!(next, Auth::None);
    }

    #[tokio::test]
    async fn transport_failure_is_reported() {
        let transport = FixedStatus::failing();
        let result = probe(&transport, URL, ProbeStrategy::HeaderCredentials, &Auth::Unknown).await;
        assert!(matches!(result, Err(ProbeError::Transport(_))));
    }
}
