//! Types shared by every `chk` crate: the lookup target, resolved addresses,
//! per-address results, the error taxonomy and the run configuration.

pub mod config;
pub mod error;
pub mod network;
pub mod record;
