//! Client platform detection, evaluated once at startup.

use crate::auth::ProbeStrategy;
use once_cell::sync::Lazy;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ClientClass {
    Android,
    Ios,
    Other,
}

impl ClientClass {
    pub fn detect(user_agent: &str, platform: &str, max_touch_points: i32) -> Self {
        let is_ios = ["iPad", "iPhone", "iPod"]
            .iter()
            .any(|device| platform.contains(device))
            || (platform == "MacIntel" && max_touch_points > 1);
        if user_agent.to_lowercase().contains("android") {
            ClientClass::Android
        } else if is_ios {
            ClientClass::Ios
        } else {
            ClientClass::Other
        }
    }

    pub fn is_mobile(self) -> bool {
        !matches!(self, ClientClass::Other)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Platform {
    pub client: ClientClass,
    pub probe: ProbeStrategy,
}

impl Platform {
    pub fn detect(user_agent: &str, platform: &str, max_touch_points: i32) -> Self {
        Self {
            client: ClientClass::detect(user_agent, platform, max_touch_points),
            probe: ProbeStrategy::for_user_agent(user_agent),
        }
    }
}

impl Default for Platform {
    fn default() -> Self {
        Self {
            client: ClientClass::Other,
            probe: ProbeStrategy::HeaderCredentials,
        }
    }
}

pub static PLATFORM: Lazy<Platform> = Lazy::new(detect_current);

#[cfg(target_arch = "wasm32")]
fn detect_current() -> Platform {
    let Some(navigator) = web_sys::window().map(|window| window.navigator()) else {
        return Platform::default();
    };
    let user_agent = navigator.user_agent().unwrap_or_default();
    let platform = navigator.platform().unwrap_or_default();
    let detected = Platform::detect(&user_agent, &platform, navigator.max_touch_points());
    tracing::info!(client = ?detected.client, probe = ?detected.probe, "detected client platform");
    detected
}

#[cfg(not(target_arch = "wasm32"))]
fn detect_current() -> Platform {
    Platform::default()
}
