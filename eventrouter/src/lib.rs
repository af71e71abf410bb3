pub mod builders;
pub mod cache;
pub mod config;
pub mod envelope;
pub mod error;
pub mod event;
pub mod prometheus;
pub mod router;
pub mod selection;
pub mod sinks;
