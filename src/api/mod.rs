//! Talking to the origin server that hosts the library.

pub mod manifest;
pub mod models;

pub use manifest::*;
pub use models::*;

use once_cell::sync::Lazy;

pub static HTTP_CLIENT: Lazy<reqwest::Client> = Lazy::new(reqwest::Client::new);
