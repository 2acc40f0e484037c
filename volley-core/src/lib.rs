//! Volley Core - The load-test script document model.
//!
//! A Volley script is a declarative document (YAML or JSON on the wire)
//! describing the traffic phases to generate against a target, plus
//! arbitrary configuration the runtime interprets (scenarios, payloads,
//! plugins). This crate provides the typed model for that document:
//!
//! - [`Script`] / [`Config`]: the document itself, with every field the
//!   partitioner does not interpret preserved verbatim
//! - [`Phase`]: a closed sum type over the four phase shapes plus an
//!   explicit unknown fallback
//! - [`WorkerIdentity`]: the per-phase worker annotation stamped onto
//!   worker-local copies of a script
//!
//! It does NOT interpret phases at runtime - that is the execution
//! engine's job. This crate only models, loads, and serializes scripts.
//!
//! # Design Principles
//!
//! - **Closed phase union**: phase-kind dispatch is a property of the
//!   type, not ad-hoc field sniffing at use sites
//! - **Lossless documents**: unrecognized fields round-trip unchanged
//! - **Explicit types**: u32/u64 for counts, f64 only where shares are
//!   genuinely fractional
//! - **No unsafe code**

#![forbid(unsafe_code)]
#![deny(missing_docs)]
#![deny(clippy::all)]
#![warn(clippy::pedantic)]
#![warn(clippy::nursery)]

mod error;
mod phase;
mod script;

pub use error::{ScriptError, ScriptResult};
pub use phase::{
    ConstantPhase, CountPhase, PausePhase, Phase, RampPhase, WorkerIdentity,
};
pub use script::{Config, Script};
