//! Shared job model for a distributed run manager.
//!
//! A run submitter authors [`JobSpec`](core::JobSpec)s, the submission layer
//! turns them into [`Job`](core::Job)s, listings work on
//! [`JobHead`](core::JobHead) projections, and schedulers and runners read
//! [`Requirements`](core::Requirements) and [`JobApp`](core::JobApp)s while
//! advancing the [`JobStatus`](core::JobStatus).

pub mod config;
pub mod core;
pub mod error;
pub mod utils;

pub use error::{ModelError, Result};
