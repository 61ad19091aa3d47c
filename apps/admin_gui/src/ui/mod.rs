//! UI layer for the admin console: app shell, screens, and layout chrome.

pub mod app;

pub use app::{AdminApp, StartupConfig};
