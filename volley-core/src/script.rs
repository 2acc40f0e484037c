//! Script document model and loading.
//!
//! A script is the whole load-test document. The partitioner only
//! interprets `config.phases` and the top-level `before`/`after` hooks;
//! everything else (target, scenarios, payloads, plugin blocks) is
//! carried verbatim so a worker receives a document the execution
//! engine can run unchanged.

use std::path::Path;

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use crate::error::{ScriptError, ScriptResult};
use crate::phase::Phase;

/// The `config` section of a script.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Config {
    /// Ordered traffic phases.
    #[serde(default)]
    pub phases: Vec<Phase>,
    /// Uninterpreted configuration, preserved verbatim.
    #[serde(flatten)]
    pub rest: Map<String, Value>,
}

/// A complete load-test script document.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Script {
    /// Test configuration, including the phase list.
    pub config: Config,
    /// Pre-test hook, run exactly once by the coordinating process.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub before: Option<Value>,
    /// Post-test hook, run exactly once by the coordinating process.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub after: Option<Value>,
    /// Uninterpreted top-level fields (scenarios etc.), preserved verbatim.
    #[serde(flatten)]
    pub rest: Map<String, Value>,
}

impl Script {
    /// Loads a script from a YAML or JSON file, dispatching on the
    /// file extension (`.json` is JSON, anything else is YAML).
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read or parsed.
    pub fn from_file<P: AsRef<Path>>(path: P) -> ScriptResult<Self> {
        let path = path.as_ref();
        let contents = std::fs::read_to_string(path).map_err(|e| ScriptError::Io {
            path: path.display().to_string(),
            source: e,
        })?;
        if path.extension().is_some_and(|ext| ext == "json") {
            Self::from_json(&contents)
        } else {
            Self::from_yaml(&contents)
        }
    }

    /// Parses a script from a YAML string.
    ///
    /// # Errors
    ///
    /// Returns an error if the YAML cannot be parsed.
    pub fn from_yaml(yaml: &str) -> ScriptResult<Self> {
        serde_yaml::from_str(yaml).map_err(|e| ScriptError::Parse {
            format: "yaml",
            message: e.to_string(),
        })
    }

    /// Parses a script from a JSON string.
    ///
    /// # Errors
    ///
    /// Returns an error if the JSON cannot be parsed.
    pub fn from_json(json: &str) -> ScriptResult<Self> {
        serde_json::from_str(json).map_err(|e| ScriptError::Parse {
            format: "json",
            message: e.to_string(),
        })
    }

    /// Serializes the script to YAML.
    #[must_use]
    pub fn to_yaml(&self) -> String {
        serde_yaml::to_string(self).unwrap_or_default()
    }

    /// Serializes the script to pretty-printed JSON.
    #[must_use]
    pub fn to_json(&self) -> String {
        serde_json::to_string_pretty(self).unwrap_or_default()
    }

    /// Removes the `before`/`after` hooks.
    ///
    /// Hooks run exactly once, in the coordinating process; a worker
    /// copy that kept them would run them once per worker.
    pub fn strip_hooks(&mut self) {
        self.before = None;
        self.after = None;
    }

    /// Returns true if the script has a `before` or `after` hook.
    #[must_use]
    pub const fn has_hooks(&self) -> bool {
        self.before.is_some() || self.after.is_some()
    }
}
