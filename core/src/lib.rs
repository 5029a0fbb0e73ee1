//! # chk core
//!
//! The concurrent lookup pipeline:
//!
//! * **[`resolver`]**: target to candidate addresses, plus the DNS seams.
//! * **[`metadata`]**: geolocation and organization data per address.
//! * **[`enricher`]**: one address in, one result out, both sub-lookups joined.
//! * **[`coordinator`]**: fan-out over selected addresses and result collection.
//! * **[`progress`]**: periodic "completed/total" reporting.
//! * **[`cancel`]**: interrupt and deadline handling.
//! * **[`pipeline`]**: ties the above together for one run.

pub mod cancel;
pub mod coordinator;
pub mod enricher;
pub mod metadata;
pub mod pipeline;
pub mod progress;
pub mod resolver;
