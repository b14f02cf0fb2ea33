//! Producer payload normalization and the webhook pipeline.
//!
//! Each media server speaks its own dialect. A [`PayloadAdapter`] turns one
//! dialect into a [`NormalizedEvent`](crate::models::NormalizedEvent) and the
//! [`Dispatcher`] carries that event through metadata lookup and announcement.

mod adapter;
mod body;
mod dispatcher;
mod error;
mod jellyfin;
mod jellyseerr;
mod outcome;
mod plex;

pub use adapter::{PayloadAdapter, Producer};
pub use body::RawBody;
pub use dispatcher::Dispatcher;
pub use error::RejectReason;
pub use outcome::{AdapterOutcome, DispatchOutcome};
