//! The components module contains all shared components for our app.

mod app;
mod app_view;
mod chrome;
mod navigation;
mod playback;
mod session;
pub mod views;

pub use app::*;
pub use app_view::*;
pub use chrome::*;
pub use navigation::*;
pub use playback::*;
pub use session::*;
