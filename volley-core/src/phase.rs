//! Traffic phase model.
//!
//! A phase describes one segment of the load shape: a linear ramp, a
//! constant arrival rate, a fixed arrival count, or a pause. Anything
//! else in the phase list is carried as [`Phase::Unknown`] so a
//! malformed document degrades into a visible anomaly instead of a
//! parse failure.

use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Per-phase worker annotation.
///
/// Stamped onto every phase of a worker-local script after partitioning,
/// so downstream reporting can attribute results to a worker without any
/// extra coordination channel.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WorkerIdentity {
    /// 1-based index of this worker among the surviving workers.
    pub worker: u32,
    /// Total number of surviving workers.
    pub total_workers: u32,
}

/// A phase whose arrival rate changes linearly over its duration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RampPhase {
    /// Optional phase name for reporting.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    /// Phase duration in seconds.
    pub duration: u64,
    /// Starting arrival rate in arrivals per second. Absent means 0.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub arrival_rate: Option<f64>,
    /// Final arrival rate in arrivals per second.
    pub ramp_to: f64,
    /// Cap on concurrently active virtual users.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub max_vusers: Option<u64>,
    /// Worker annotation, present only on partitioned copies.
    #[serde(flatten)]
    pub identity: Option<WorkerIdentity>,
}

/// A phase with a fixed arrival rate sustained for its duration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ConstantPhase {
    /// Optional phase name for reporting.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    /// Phase duration in seconds.
    pub duration: u64,
    /// Arrival rate in arrivals per second.
    pub arrival_rate: u64,
    /// Cap on concurrently active virtual users.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub max_vusers: Option<u64>,
    /// Worker annotation, present only on partitioned copies.
    #[serde(flatten)]
    pub identity: Option<WorkerIdentity>,
}

/// A phase with a fixed total number of arrivals spread over its
/// duration (a count, not a rate).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CountPhase {
    /// Optional phase name for reporting.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    /// Phase duration in seconds.
    pub duration: u64,
    /// Total number of arrivals over the whole phase.
    pub arrival_count: u64,
    /// Cap on concurrently active virtual users.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub max_vusers: Option<u64>,
    /// Worker annotation, present only on partitioned copies.
    #[serde(flatten)]
    pub identity: Option<WorkerIdentity>,
}

/// A phase that generates no arrivals.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PausePhase {
    /// Optional phase name for reporting.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    /// Phase duration in seconds.
    pub duration: u64,
    /// Worker annotation, present only on partitioned copies.
    #[serde(flatten)]
    pub identity: Option<WorkerIdentity>,
}

/// One entry in a script's phase list.
///
/// The document carries no explicit tag; the kind is determined by which
/// fields are present. Variant order IS the dispatch order: a phase with
/// `rampTo` is a ramp even when `arrivalRate` is also present, a phase
/// with only a `duration` is a pause, and anything that matches no shape
/// at all is `Unknown`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Phase {
    /// Arrival rate ramps linearly between two endpoints.
    Ramp(RampPhase),
    /// Fixed arrival rate.
    Constant(ConstantPhase),
    /// Fixed total arrival count.
    Count(CountPhase),
    /// No arrivals.
    Pause(PausePhase),
    /// Structurally unrecognized phase, carried verbatim.
    Unknown(Value),
}

impl Phase {
    /// Returns the phase name, if one is set.
    #[must_use]
    pub fn name(&self) -> Option<&str> {
        match self {
            Self::Ramp(phase) => phase.name.as_deref(),
            Self::Constant(phase) => phase.name.as_deref(),
            Self::Count(phase) => phase.name.as_deref(),
            Self::Pause(phase) => phase.name.as_deref(),
            Self::Unknown(value) => value.get("name").and_then(Value::as_str),
        }
    }

    /// Returns the phase duration in seconds, if the shape carries one.
    #[must_use]
    pub const fn duration(&self) -> Option<u64> {
        match self {
            Self::Ramp(phase) => Some(phase.duration),
            Self::Constant(phase) => Some(phase.duration),
            Self::Count(phase) => Some(phase.duration),
            Self::Pause(phase) => Some(phase.duration),
            Self::Unknown(_) => None,
        }
    }

    /// Returns true if this phase can generate load for its worker.
    ///
    /// Pauses and phases whose effective rate, ramp, and count are all
    /// zero cannot. Unknown phases report true: their traffic cannot be
    /// proven absent, and a worker must never be dropped while it might
    /// still have load to emit.
    #[must_use]
    pub fn carries_load(&self) -> bool {
        match self {
            Self::Ramp(phase) => {
                phase.arrival_rate.unwrap_or(0.0) > 0.0 || phase.ramp_to > 0.0
            }
            Self::Constant(phase) => phase.arrival_rate > 0,
            Self::Count(phase) => phase.arrival_count > 0,
            Self::Pause(_) => false,
            Self::Unknown(_) => true,
        }
    }

    /// Returns the worker annotation, if this phase has been stamped.
    #[must_use]
    pub const fn identity(&self) -> Option<WorkerIdentity> {
        match self {
            Self::Ramp(phase) => phase.identity,
            Self::Constant(phase) => phase.identity,
            Self::Count(phase) => phase.identity,
            Self::Pause(phase) => phase.identity,
            Self::Unknown(_) => None,
        }
    }

    /// Stamps the worker annotation onto this phase.
    ///
    /// Unknown phases receive the annotation as plain `worker` /
    /// `totalWorkers` keys when they are objects; non-object unknown
    /// phases cannot carry keys and are left untouched.
    pub fn set_identity(&mut self, identity: WorkerIdentity) {
        match self {
            Self::Ramp(phase) => phase.identity = Some(identity),
            Self::Constant(phase) => phase.identity = Some(identity),
            Self::Count(phase) => phase.identity = Some(identity),
            Self::Pause(phase) => phase.identity = Some(identity),
            Self::Unknown(value) => {
                if let Value::Object(map) = value {
                    map.insert("worker".to_string(), Value::from(identity.worker));
                    map.insert(
                        "totalWorkers".to_string(),
                        Value::from(identity.total_workers),
                    );
                }
            }
        }
    }
}
