//! TMDB metadata lookup.

mod client;
mod provider;
mod types;

pub use client::TmdbClient;
pub use provider::{LookupError, LookupResult, MetadataProvider};
