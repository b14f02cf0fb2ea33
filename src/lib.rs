//! Marquee-RS Library
//!
//! Receives "new media" webhooks from Plex, Jellyfin/Emby or Jellyseerr,
//! enriches them with TMDB metadata and announces them on Telegram.

use shadow_rs::shadow;
shadow!(build);

pub mod api;
pub mod cli;
pub mod config;
pub mod error;
pub mod external;
pub mod logger;
pub mod models;
pub mod server;
pub mod services;
pub mod state;
pub mod webhook;

pub use state::AppState;

pub fn pkg_version() -> &'static str {
    build::PKG_VERSION
}
