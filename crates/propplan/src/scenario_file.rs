//! Scenario files on disk
//!
//! Scenarios are stored as YAML by default; a `.json` extension selects JSON.
//! Missing fields fall back to the engine defaults, so a file only needs to
//! name what differs from the default investor.

use std::path::Path;

use propplan_core::config::Scenario;

use crate::util::io::atomic_write;

/// Error types for scenario file operations
#[derive(Debug)]
pub enum StorageError {
    Io(String),
    Parse(String),
    Serialize(String),
}

impl std::fmt::Display for StorageError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            StorageError::Io(msg) => write!(f, "IO error: {}", msg),
            StorageError::Parse(msg) => write!(f, "Parse error: {}", msg),
            StorageError::Serialize(msg) => write!(f, "Serialization error: {}", msg),
        }
    }
}

impl std::error::Error for StorageError {}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ScenarioFormat {
    Yaml,
    Json,
}

impl ScenarioFormat {
    /// Pick the format from a file extension
    pub fn from_path(path: &Path) -> Self {
        match path.extension().and_then(|ext| ext.to_str()) {
            Some(ext) if ext.eq_ignore_ascii_case("json") => ScenarioFormat::Json,
            _ => ScenarioFormat::Yaml,
        }
    }

    pub fn parse(self, content: &str) -> Result<Scenario, StorageError> {
        match self {
            ScenarioFormat::Yaml => serde_saphyr::from_str(content)
                .map_err(|e| StorageError::Parse(format!("Failed to parse YAML: {}", e))),
            ScenarioFormat::Json => serde_json::from_str(content)
                .map_err(|e| StorageError::Parse(format!("Failed to parse JSON: {}", e))),
        }
    }

    pub fn render(self, scenario: &Scenario) -> Result<String, StorageError> {
        match self {
            ScenarioFormat::Yaml => serde_saphyr::to_string(scenario)
                .map_err(|e| StorageError::Serialize(format!("Failed to serialize scenario: {}", e))),
            ScenarioFormat::Json => serde_json::to_string_pretty(scenario)
                .map_err(|e| StorageError::Serialize(format!("Failed to serialize scenario: {}", e))),
        }
    }
}

/// Read a scenario, naming it after the file when the file gives no name
pub fn load_scenario(path: &Path) -> Result<Scenario, StorageError> {
    let content = std::fs::read_to_string(path).map_err(|e| {
        StorageError::Io(format!("Failed to read {}: {}", path.display(), e))
    })?;

    let mut scenario = ScenarioFormat::from_path(path).parse(&content)?;
    if scenario.name.is_empty() {
        scenario.name = path
            .file_stem()
            .map(|stem| stem.to_string_lossy().into_owned())
            .unwrap_or_default();
    }

    tracing::debug!(
        path = %path.display(),
        name = %scenario.name,
        slots = scenario.slot_count(),
        "scenario loaded"
    );
    Ok(scenario)
}

pub fn save_scenario(path: &Path, scenario: &Scenario) -> Result<(), StorageError> {
    let content = ScenarioFormat::from_path(path).render(scenario)?;
    atomic_write(path, &content)
        .map_err(|e| StorageError::Io(format!("Failed to write {}: {}", path.display(), e)))?;
    tracing::info!(path = %path.display(), "scenario saved");
    Ok(())
}

/// Starter scenario written by `propplan init`
pub fn example_scenario() -> Scenario {
    propplan_core::config::ScenarioBuilder::new()
        .name("Starter portfolio")
        .buy("unit", 2)
        .buy("house", 1)
        .build()
}
