pub mod generator;
pub mod loader;

use crate::error::{EdgePlaceError, EpResult};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use tracing::debug;

/// One quantity per demand dimension: cpu cores, memory GB, storage GB.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Resources {
    pub cpu: f64,
    pub memory: f64,
    pub storage: f64,
}

impl Resources {
    pub const ZERO: Resources = Resources {
        cpu: 0.0,
        memory: 0.0,
        storage: 0.0,
    };

    pub fn new(cpu: f64, memory: f64, storage: f64) -> Self {
        Self {
            cpu,
            memory,
            storage,
        }
    }

    pub fn add(&mut self, other: &Resources) {
        self.cpu += other.cpu;
        self.memory += other.memory;
        self.storage += other.storage;
    }

    /// True when every dimension is within `capacity`.
    pub fn fits_within(&self, capacity: &Resources) -> bool {
        self.cpu <= capacity.cpu && self.memory <= capacity.memory && self.storage <= capacity.storage
    }

    fn is_non_negative(&self) -> bool {
        self.cpu >= 0.0 && self.memory >= 0.0 && self.storage >= 0.0
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Device {
    pub id: u32,
    pub x: f64,
    pub y: f64,
    pub demand: Resources,
}

/// A deployable cloudlet class. Many sites may carry the same type.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FacilityType {
    pub id: u32,
    pub capacity: Resources,
    pub coverage_radius: f64,
    pub base_cost: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CandidateSite {
    pub id: u32,
    pub x: f64,
    pub y: f64,
    /// Multiplier applied to the base cost of whatever type lands here.
    pub cost_factor: f64,
}

/// Immutable problem instance: entities, a dense device-to-site distance
/// table, and the normalization bounds for the fitness function. Built
/// once, shared read-only (behind an `Arc`) for the whole run.
#[derive(Debug)]
pub struct Scenario {
    pub devices: Vec<Device>,
    pub sites: Vec<CandidateSite>,
    pub facility_types: Vec<FacilityType>,

    // Row-major: device index * site count + site index.
    distances: Vec<f64>,

    device_index: HashMap<u32, usize>,
    site_index: HashMap<u32, usize>,
    type_index: HashMap<u32, usize>,

    /// Every type deployed at the most expensive site.
    pub cost_bound: f64,
    /// Device count times the bounding-box diagonal of all positions.
    pub latency_bound: f64,
}

impl Scenario {
    pub fn build(
        devices: Vec<Device>,
        sites: Vec<CandidateSite>,
        facility_types: Vec<FacilityType>,
    ) -> EpResult<Scenario> {
        if devices.is_empty() {
            return Err(EdgePlaceError::Validation("Scenario has 0 devices".to_string()));
        }
        if sites.is_empty() {
            return Err(EdgePlaceError::Validation("Scenario has 0 candidate sites".to_string()));
        }
        if facility_types.is_empty() {
            return Err(EdgePlaceError::Validation(
                "Scenario has 0 facility types".to_string(),
            ));
        }

        // Id Mapping
        let mut device_index = HashMap::new();
        for (idx, d) in devices.iter().enumerate() {
            if device_index.insert(d.id, idx).is_some() {
                return Err(EdgePlaceError::Validation(format!("Duplicate device id: {}", d.id)));
            }
            if !d.demand.is_non_negative() {
                return Err(EdgePlaceError::Validation(format!(
                    "Device {} has a negative demand",
                    d.id
                )));
            }
        }
        let mut site_index = HashMap::new();
        for (idx, s) in sites.iter().enumerate() {
            if site_index.insert(s.id, idx).is_some() {
                return Err(EdgePlaceError::Validation(format!("Duplicate site id: {}", s.id)));
            }
            if s.cost_factor < 0.0 {
                return Err(EdgePlaceError::Validation(format!(
                    "Site {} has a negative cost factor",
                    s.id
                )));
            }
        }
        let mut type_index = HashMap::new();
        for (idx, t) in facility_types.iter().enumerate() {
            if type_index.insert(t.id, idx).is_some() {
                return Err(EdgePlaceError::Validation(format!(
                    "Duplicate facility type id: {}",
                    t.id
                )));
            }
            if !t.capacity.is_non_negative() || t.coverage_radius < 0.0 || t.base_cost < 0.0 {
                return Err(EdgePlaceError::Validation(format!(
                    "Facility type {} has a negative capacity, radius or cost",
                    t.id
                )));
            }
        }

        // Distance Table
        let site_count = sites.len();
        let mut distances = vec![0.0; devices.len() * site_count];
        for (di, d) in devices.iter().enumerate() {
            for (si, s) in sites.iter().enumerate() {
                let dx = d.x - s.x;
                let dy = d.y - s.y;
                distances[di * site_count + si] = (dx * dx + dy * dy).sqrt();
            }
        }

        // Normalization Bounds
        let max_factor = sites.iter().map(|s| s.cost_factor).fold(0.0, f64::max);
        let cost_bound = facility_types
            .iter()
            .map(|t| t.base_cost * max_factor)
            .sum::<f64>()
            .max(1e-9);

        let xs = devices.iter().map(|d| d.x).chain(sites.iter().map(|s| s.x));
        let ys = devices.iter().map(|d| d.y).chain(sites.iter().map(|s| s.y));
        let (min_x, max_x) = min_max(xs);
        let (min_y, max_y) = min_max(ys);
        let span_x = max_x - min_x;
        let span_y = max_y - min_y;
        let diagonal = (span_x * span_x + span_y * span_y).sqrt();
        let latency_bound = (devices.len() as f64 * diagonal).max(1e-9);

        debug!(
            devices = devices.len(),
            sites = site_count,
            facility_types = facility_types.len(),
            "scenario built"
        );

        Ok(Scenario {
            devices,
            sites,
            facility_types,
            distances,
            device_index,
            site_index,
            type_index,
            cost_bound,
            latency_bound,
        })
    }

    /// Distance for a (device id, site id) pair. Unknown pairs are
    /// unreachable, never an error.
    pub fn distance(&self, device_id: u32, site_id: u32) -> f64 {
        match (self.device_index.get(&device_id), self.site_index.get(&site_id)) {
            (Some(&di), Some(&si)) => self.distance_at(di, si),
            _ => f64::INFINITY,
        }
    }

    /// Distance by position in the entity vectors. Hot path.
    #[inline]
    pub fn distance_at(&self, device_idx: usize, site_idx: usize) -> f64 {
        self.distances[device_idx * self.sites.len() + site_idx]
    }

    pub fn device_idx(&self, id: u32) -> Option<usize> {
        self.device_index.get(&id).copied()
    }

    pub fn site_idx(&self, id: u32) -> Option<usize> {
        self.site_index.get(&id).copied()
    }

    pub fn type_idx(&self, id: u32) -> Option<usize> {
        self.type_index.get(&id).copied()
    }
}

fn min_max(values: impl Iterator<Item = f64>) -> (f64, f64) {
    values.fold((f64::INFINITY, f64::NEG_INFINITY), |(lo, hi), v| {
        (lo.min(v), hi.max(v))
    })
}
