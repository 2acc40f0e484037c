//! Volley Partition - Splits a load-test script across worker processes.
//!
//! Given a script and a worker count N, [`divide`] produces up to N
//! worker-local scripts whose aggregate traffic is statistically
//! equivalent to one worker running the original. The coordinating
//! process spawns one worker per returned script and passes each script
//! verbatim to that worker's execution engine; this crate does not
//! spawn, message, or supervise anything itself.
//!
//! # Guarantees
//!
//! - Integer load totals are preserved exactly; no load is silently
//!   dropped or duplicated
//! - Every worker script has the same phase count and order as the
//!   original
//! - Workers that would generate no load are never emitted
//! - Surviving workers carry `worker`/`totalWorkers` annotations on
//!   every phase for downstream reporting
//!
//! The computation is pure, synchronous, and deterministic for a given
//! (script, worker count) pair; concurrent calls need no coordination.

#![forbid(unsafe_code)]
#![deny(missing_docs)]
#![deny(clippy::all)]
#![warn(clippy::pedantic)]
#![warn(clippy::nursery)]

mod divide;
mod error;
mod share;

pub use divide::divide;
pub use error::{PartitionError, PartitionResult};
pub use share::{distribute, distribute_even};
