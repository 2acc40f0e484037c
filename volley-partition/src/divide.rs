//! Script division across workers.
//!
//! Turns one script into up to N worker-local scripts whose aggregate
//! traffic matches the original. Each phase kind splits differently:
//!
//! - Ramps split both endpoints evenly; every worker ramps through the
//!   same shape at 1/N scale.
//! - Constant rates split integrally so the aggregate rate is exact.
//! - Fixed counts are not divisible without changing burst semantics,
//!   so worker 0 keeps the whole count and the rest pause for the same
//!   duration to stay time-aligned.
//! - Pauses and unrecognized phases are copied to every worker.
//!
//! Workers whose every phase turned out load-free are dropped, and the
//! survivors are stamped with their identity for downstream reporting.

use tracing::{debug, warn};
use volley_core::{
    ConstantPhase, CountPhase, PausePhase, Phase, RampPhase, Script, WorkerIdentity,
};

use crate::error::{PartitionError, PartitionResult};
use crate::share::{distribute, distribute_even};

/// Divides `script` into at most `workers` worker-local scripts.
///
/// Every returned script is a deep copy of the original with its phase
/// list replaced by that worker's share of the load, the
/// `before`/`after` hooks removed (the coordinating process runs those
/// exactly once), and every phase stamped with the worker's identity.
/// Workers that would generate no load at all are omitted, so the
/// result may be shorter than `workers`; phase count and order are
/// preserved in each survivor.
///
/// # Errors
///
/// Returns [`PartitionError::InvalidWorkerCount`] if `workers` is 0.
pub fn divide(script: &Script, workers: u32) -> PartitionResult<Vec<Script>> {
    if workers == 0 {
        return Err(PartitionError::InvalidWorkerCount { workers });
    }
    let count = workers as usize;

    // Transpose: one split per phase, gathered into one list per worker.
    let mut worker_phases: Vec<Vec<Phase>> = (0..count)
        .map(|_| Vec::with_capacity(script.config.phases.len()))
        .collect();
    for phase in &script.config.phases {
        let splits = split_phase(phase, workers);
        debug_assert_eq!(splits.len(), count);
        for (worker, split) in splits.into_iter().enumerate() {
            worker_phases[worker].push(split);
        }
    }

    let mut scripts = Vec::with_capacity(count);
    for (worker, phases) in worker_phases.into_iter().enumerate() {
        if phases.iter().all(|phase| !phase.carries_load()) {
            debug!(worker, "dropping worker with no load to generate");
            continue;
        }
        let mut copy = script.clone();
        copy.config.phases = phases;
        copy.strip_hooks();
        scripts.push(copy);
    }

    #[allow(clippy::cast_possible_truncation)] // bounded by the worker count
    let survivors = scripts.len() as u32;
    for (index, script) in scripts.iter_mut().enumerate() {
        #[allow(clippy::cast_possible_truncation)] // bounded by the worker count
        let identity = WorkerIdentity {
            worker: index as u32 + 1,
            total_workers: survivors,
        };
        for phase in &mut script.config.phases {
            phase.set_identity(identity);
        }
    }

    Ok(scripts)
}

/// Produces one copy of `phase` per worker, split per the phase kind.
fn split_phase(phase: &Phase, workers: u32) -> Vec<Phase> {
    match phase {
        Phase::Ramp(ramp) => split_ramp(ramp, workers),
        Phase::Constant(constant) => split_constant(constant, workers),
        Phase::Count(count) => split_count(count, workers),
        Phase::Pause(_) => vec![phase.clone(); workers as usize],
        Phase::Unknown(value) => {
            // Malformed upstream input; carry it rather than crash.
            warn!(phase = %value, "unrecognized phase shape, passed through to every worker");
            vec![phase.clone(); workers as usize]
        }
    }
}

/// Both ramp endpoints split evenly across all workers. The vuser cap
/// splits only across workers that generate traffic through either
/// endpoint; an idle worker needs no share of the cap.
fn split_ramp(phase: &RampPhase, workers: u32) -> Vec<Phase> {
    let rates = distribute_even(phase.arrival_rate.unwrap_or(0.0), workers);
    let ramps = distribute_even(phase.ramp_to, workers);

    let active_rates = rates.iter().filter(|rate| **rate > 0.0).count();
    let active_ramps = ramps.iter().filter(|ramp| **ramp > 0.0).count();
    let active = active_rates.max(active_ramps);
    let caps = match phase.max_vusers {
        #[allow(clippy::cast_possible_truncation)] // active <= workers
        Some(cap) if active > 0 => distribute(cap, active as u32),
        _ => Vec::new(),
    };

    rates
        .into_iter()
        .zip(ramps)
        .enumerate()
        .map(|(worker, (rate, ramp))| {
            Phase::Ramp(RampPhase {
                name: phase.name.clone(),
                duration: phase.duration,
                arrival_rate: Some(rate),
                ramp_to: ramp,
                max_vusers: caps.get(worker).copied(),
                identity: None,
            })
        })
        .collect()
}

/// The rate splits integrally across all workers. The vuser cap splits
/// across workers that received a rate share; the rest get an explicit
/// cap of 0 along with their rate of 0.
fn split_constant(phase: &ConstantPhase, workers: u32) -> Vec<Phase> {
    let rates = distribute(phase.arrival_rate, workers);
    let active = rates.iter().filter(|rate| **rate > 0).count();
    let caps = match phase.max_vusers {
        #[allow(clippy::cast_possible_truncation)] // active <= workers
        Some(cap) if active > 0 => distribute(cap, active as u32),
        _ => Vec::new(),
    };

    rates
        .into_iter()
        .enumerate()
        .map(|(worker, rate)| {
            Phase::Constant(ConstantPhase {
                name: phase.name.clone(),
                duration: phase.duration,
                arrival_rate: rate,
                max_vusers: phase
                    .max_vusers
                    .map(|_| caps.get(worker).copied().unwrap_or(0)),
                identity: None,
            })
        })
        .collect()
}

/// A fixed count is a single burst: splitting it would multiply the
/// burst, so worker 0 keeps it whole and every other worker pauses for
/// the same duration to keep the phase lists time-aligned.
fn split_count(phase: &CountPhase, workers: u32) -> Vec<Phase> {
    let mut phases = Vec::with_capacity(workers as usize);
    phases.push(Phase::Count(phase.clone()));
    for _ in 1..workers {
        phases.push(Phase::Pause(PausePhase {
            name: phase.name.clone(),
            duration: phase.duration,
            identity: None,
        }));
    }
    phases
}
