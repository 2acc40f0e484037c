//! End-to-end partition scenarios over complete script documents.

use volley_core::{Phase, Script};
use volley_partition::{divide, PartitionError};

const FULL_SCRIPT: &str = r#"
config:
  target: "http://localhost:3000"
  http:
    timeout: 10
  phases:
    - name: warm-up
      duration: 60
      arrivalRate: 4
    - name: ramp
      duration: 120
      arrivalRate: 5
      rampTo: 50
      maxVusers: 200
    - name: burst
      duration: 30
      arrivalCount: 50
    - name: cooldown
      duration: 15
before:
  flow:
    - post:
        url: "/setup"
after:
  flow:
    - post:
        url: "/teardown"
scenarios:
  - name: browse
    flow:
      - get:
          url: "/products"
"#;

fn constant_rate(phase: &Phase) -> u64 {
    match phase {
        Phase::Constant(constant) => constant.arrival_rate,
        other => panic!("expected constant phase, got {other:?}"),
    }
}

#[test]
fn workers_get_hook_free_scripts_with_everything_else_intact() {
    let script = Script::from_yaml(FULL_SCRIPT).expect("script should parse");
    assert!(script.has_hooks());

    let scripts = divide(&script, 3).expect("divide");
    assert!(!scripts.is_empty());
    for worker_script in &scripts {
        assert!(!worker_script.has_hooks());
        assert_eq!(
            worker_script.config.rest["target"],
            serde_json::Value::from("http://localhost:3000")
        );
        assert_eq!(worker_script.config.rest["http"]["timeout"], 10);
        assert_eq!(worker_script.rest["scenarios"][0]["name"], "browse");
        assert_eq!(worker_script.config.phases.len(), 4);
    }
    // The original is untouched.
    assert!(script.has_hooks());
    assert_eq!(script.config.phases.len(), 4);
}

#[test]
fn aggregate_constant_rate_matches_original() {
    let script = Script::from_yaml(FULL_SCRIPT).expect("script should parse");
    let scripts = divide(&script, 3).expect("divide");

    let total: u64 = scripts
        .iter()
        .map(|s| constant_rate(&s.config.phases[0]))
        .sum();
    assert_eq!(total, 4);
}

#[test]
fn aggregate_ramp_endpoints_match_original() {
    let script = Script::from_yaml(FULL_SCRIPT).expect("script should parse");
    let scripts = divide(&script, 3).expect("divide");

    let mut rate_total = 0.0;
    let mut ramp_total = 0.0;
    let mut cap_total = 0;
    for worker_script in &scripts {
        match &worker_script.config.phases[1] {
            Phase::Ramp(ramp) => {
                rate_total += ramp.arrival_rate.unwrap_or(0.0);
                ramp_total += ramp.ramp_to;
                cap_total += ramp.max_vusers.unwrap_or(0);
            }
            other => panic!("expected ramp phase, got {other:?}"),
        }
    }
    assert!((rate_total - 5.0).abs() < 1e-9);
    assert!((ramp_total - 50.0).abs() < 1e-9);
    assert_eq!(cap_total, 200);
}

#[test]
fn fixed_count_burst_runs_on_exactly_one_worker() {
    let script = Script::from_yaml(FULL_SCRIPT).expect("script should parse");
    let scripts = divide(&script, 3).expect("divide");
    assert_eq!(scripts.len(), 3);

    match &scripts[0].config.phases[2] {
        Phase::Count(count) => {
            assert_eq!(count.arrival_count, 50);
            assert_eq!(count.duration, 30);
        }
        other => panic!("expected count phase on worker 0, got {other:?}"),
    }
    for worker_script in &scripts[1..] {
        match &worker_script.config.phases[2] {
            Phase::Pause(pause) => {
                assert_eq!(pause.duration, 30);
                assert_eq!(pause.name.as_deref(), Some("burst"));
            }
            other => panic!("expected pause placeholder, got {other:?}"),
        }
    }
}

#[test]
fn idle_workers_are_filtered_and_survivors_renumbered() {
    let script = Script::from_yaml(
        "config:\n  phases:\n    - {duration: 10, arrivalRate: 2}\n",
    )
    .expect("script should parse");

    let scripts = divide(&script, 4).expect("divide");
    assert_eq!(scripts.len(), 2);
    for (index, worker_script) in scripts.iter().enumerate() {
        assert_eq!(constant_rate(&worker_script.config.phases[0]), 1);
        let identity = worker_script.config.phases[0]
            .identity()
            .expect("survivors carry identity");
        assert_eq!(identity.worker, u32::try_from(index).unwrap() + 1);
        assert_eq!(identity.total_workers, 2);
    }
}

#[test]
fn annotations_reach_the_wire_format() {
    let script = Script::from_yaml(FULL_SCRIPT).expect("script should parse");
    let scripts = divide(&script, 2).expect("divide");

    let json: serde_json::Value =
        serde_json::from_str(&scripts[0].to_json()).expect("worker script serializes");
    for phase in json["config"]["phases"].as_array().expect("phases array") {
        assert_eq!(phase["worker"], 1);
        assert_eq!(phase["totalWorkers"], 2);
    }
    assert!(json.get("before").is_none());
    assert!(json.get("after").is_none());
}

#[test]
fn worker_scripts_parse_back_as_scripts() {
    let script = Script::from_yaml(FULL_SCRIPT).expect("script should parse");
    let scripts = divide(&script, 2).expect("divide");

    // A worker hands its script straight to an execution engine, which
    // parses the same document shape.
    let reparsed = Script::from_json(&scripts[1].to_json()).expect("worker script reparses");
    assert_eq!(reparsed, scripts[1]);
    assert_eq!(reparsed.config.phases.len(), 4);
}

#[test]
fn unknown_phases_pass_through_annotated() {
    let script = Script::from_yaml(
        "config:\n  phases:\n    - {duration: 10, arrivalRate: 3}\n    - {think: 5}\n",
    )
    .expect("script should parse");

    let scripts = divide(&script, 2).expect("divide");
    assert_eq!(scripts.len(), 2);
    for (index, worker_script) in scripts.iter().enumerate() {
        match &worker_script.config.phases[1] {
            Phase::Unknown(value) => {
                assert_eq!(value["think"], 5);
                assert_eq!(value["worker"], u64::try_from(index).unwrap() + 1);
                assert_eq!(value["totalWorkers"], 2);
            }
            other => panic!("expected unknown phase, got {other:?}"),
        }
    }
}

#[test]
fn zero_workers_is_a_caller_error() {
    let script = Script::from_yaml(FULL_SCRIPT).expect("script should parse");
    assert_eq!(
        divide(&script, 0),
        Err(PartitionError::InvalidWorkerCount { workers: 0 })
    );
}

#[test]
fn more_workers_than_load_never_duplicates_load() {
    let script = Script::from_yaml(
        "config:\n  phases:\n    - {duration: 10, arrivalRate: 1}\n",
    )
    .expect("script should parse");

    let scripts = divide(&script, 8).expect("divide");
    assert_eq!(scripts.len(), 1);
    assert_eq!(constant_rate(&scripts[0].config.phases[0]), 1);
    let identity = scripts[0].config.phases[0].identity().expect("identity");
    assert_eq!(identity.worker, 1);
    assert_eq!(identity.total_workers, 1);
}
