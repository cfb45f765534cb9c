use super::{CandidateSite, Device, FacilityType, Scenario};
use crate::error::EpResult;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;
use tracing::info;

/// On-disk form of a scenario. Distances are never stored; they are
/// recomputed when the scenario is built.
#[derive(Debug, Serialize, Deserialize)]
pub struct ScenarioDocument {
    pub devices: Vec<Device>,
    pub sites: Vec<CandidateSite>,
    pub facility_types: Vec<FacilityType>,
}

pub fn load_scenario(path: impl AsRef<Path>) -> EpResult<Scenario> {
    let raw = fs::read_to_string(path.as_ref())?;
    let doc: ScenarioDocument = serde_json::from_str(&raw)?;

    info!(
        "📂 Loaded scenario '{}': {} devices, {} sites, {} facility types",
        path.as_ref().display(),
        doc.devices.len(),
        doc.sites.len(),
        doc.facility_types.len()
    );

    Scenario::build(doc.devices, doc.sites, doc.facility_types)
}

pub fn save_scenario(path: impl AsRef<Path>, scenario: &Scenario) -> EpResult<()> {
    let doc = ScenarioDocument {
        devices: scenario.devices.clone(),
        sites: scenario.sites.clone(),
        facility_types: scenario.facility_types.clone(),
    };
    fs::write(path, serde_json::to_string_pretty(&doc)?)?;
    Ok(())
}
