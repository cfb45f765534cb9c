use crate::error::{EdgePlaceError, EpResult};
use crate::scenario::{Resources, Scenario};
use std::sync::Arc;

/// A candidate deployment: which facility type (if any) occupies each
/// candidate site, and which site (if any) serves each device.
///
/// Both genes are index vectors over the scenario's entity order, so a
/// clone is two flat copies and the scenario itself is shared. The cached
/// score fields are only meaningful after `evaluate` has run.
#[derive(Debug, Clone)]
pub struct PlacementSolution {
    pub scenario: Arc<Scenario>,

    /// Site index -> facility type index, `None` when the site is empty.
    pub placement: Vec<Option<usize>>,
    /// Device index -> site index, `None` when unassigned.
    pub assignment: Vec<Option<usize>>,

    pub total_cost: f64,
    pub total_latency: f64,
    pub feasible: bool,
    pub fitness: f64,
}

impl PlacementSolution {
    pub fn new(scenario: Arc<Scenario>) -> Self {
        let placement = vec![None; scenario.sites.len()];
        let assignment = vec![None; scenario.devices.len()];
        Self {
            scenario,
            placement,
            assignment,
            total_cost: 0.0,
            total_latency: 0.0,
            feasible: false,
            fitness: f64::INFINITY,
        }
    }

    // --- Id-based operations (strict: unknown ids are errors) ---

    pub fn place_facility(&mut self, site_id: u32, type_id: u32) -> EpResult<()> {
        let site_idx = self.lookup_site(site_id)?;
        let type_idx = self
            .scenario
            .type_idx(type_id)
            .ok_or_else(|| EdgePlaceError::Validation(format!("Unknown facility type id: {}", type_id)))?;
        self.place_at(site_idx, type_idx);
        Ok(())
    }

    pub fn remove_facility(&mut self, site_id: u32) -> EpResult<()> {
        let site_idx = self.lookup_site(site_id)?;
        self.remove_at(site_idx);
        Ok(())
    }

    /// Connect a device to a site that currently holds a facility. Radius
    /// and capacity are not checked here; `evaluate` judges those.
    pub fn assign_device(&mut self, device_id: u32, site_id: u32) -> EpResult<()> {
        let device_idx = self.lookup_device(device_id)?;
        let site_idx = self.lookup_site(site_id)?;
        if self.placement[site_idx].is_none() {
            return Err(EdgePlaceError::Validation(format!(
                "Site {} has no facility placed",
                site_id
            )));
        }
        self.assign_at(device_idx, site_idx);
        Ok(())
    }

    pub fn devices_assigned_to(&self, site_id: u32) -> EpResult<Vec<u32>> {
        let site_idx = self.lookup_site(site_id)?;
        Ok(self
            .assignment
            .iter()
            .enumerate()
            .filter(|(_, slot)| **slot == Some(site_idx))
            .map(|(device_idx, _)| self.scenario.devices[device_idx].id)
            .collect())
    }

    fn lookup_site(&self, site_id: u32) -> EpResult<usize> {
        self.scenario
            .site_idx(site_id)
            .ok_or_else(|| EdgePlaceError::Validation(format!("Unknown site id: {}", site_id)))
    }

    fn lookup_device(&self, device_id: u32) -> EpResult<usize> {
        self.scenario
            .device_idx(device_id)
            .ok_or_else(|| EdgePlaceError::Validation(format!("Unknown device id: {}", device_id)))
    }

    // --- Index-based operations (operator hot path) ---

    #[inline]
    pub fn place_at(&mut self, site_idx: usize, type_idx: usize) {
        self.placement[site_idx] = Some(type_idx);
    }

    /// Clearing a site also disconnects every device served by it.
    pub fn remove_at(&mut self, site_idx: usize) {
        self.placement[site_idx] = None;
        for slot in self.assignment.iter_mut() {
            if *slot == Some(site_idx) {
                *slot = None;
            }
        }
    }

    #[inline]
    pub fn assign_at(&mut self, device_idx: usize, site_idx: usize) {
        self.assignment[device_idx] = Some(site_idx);
    }

    pub fn clear_assignments(&mut self) {
        for slot in self.assignment.iter_mut() {
            *slot = None;
        }
    }

    /// (site index, facility type index) for every occupied site.
    pub fn occupied_sites(&self) -> impl Iterator<Item = (usize, usize)> + '_ {
        self.placement
            .iter()
            .enumerate()
            .filter_map(|(site_idx, slot)| slot.map(|type_idx| (site_idx, type_idx)))
    }

    /// Demand accumulated per site under the current assignment.
    pub fn site_usage(&self) -> Vec<Resources> {
        let mut usage = vec![Resources::ZERO; self.scenario.sites.len()];
        for (device_idx, slot) in self.assignment.iter().enumerate() {
            if let Some(site_idx) = slot {
                usage[*site_idx].add(&self.scenario.devices[device_idx].demand);
            }
        }
        usage
    }

    /// Recompute cost, latency, feasibility and fitness from the current
    /// genes. The single source of truth for feasibility: full assignment,
    /// coverage radius and all three capacity dimensions must hold or the
    /// fitness collapses to +infinity.
    pub fn evaluate(&mut self, alpha: f64) -> f64 {
        let scenario = &self.scenario;

        let mut cost = 0.0;
        for (site_idx, slot) in self.placement.iter().enumerate() {
            if let Some(type_idx) = slot {
                cost += scenario.facility_types[*type_idx].base_cost
                    * scenario.sites[site_idx].cost_factor;
            }
        }

        let mut latency = 0.0;
        let mut feasible = true;
        let mut usage = vec![Resources::ZERO; scenario.sites.len()];

        for (device_idx, slot) in self.assignment.iter().enumerate() {
            let site_idx = match slot {
                Some(s) => *s,
                None => {
                    feasible = false;
                    continue;
                }
            };
            let type_idx = match self.placement[site_idx] {
                Some(t) => t,
                None => {
                    feasible = false;
                    continue;
                }
            };
            let dist = scenario.distance_at(device_idx, site_idx);
            if dist > scenario.facility_types[type_idx].coverage_radius {
                feasible = false;
                continue;
            }
            usage[site_idx].add(&scenario.devices[device_idx].demand);
            latency += dist;
        }

        for (site_idx, slot) in self.placement.iter().enumerate() {
            if let Some(type_idx) = slot {
                if !usage[site_idx].fits_within(&scenario.facility_types[*type_idx].capacity) {
                    feasible = false;
                }
            }
        }

        self.total_cost = cost;
        self.total_latency = latency;
        self.feasible = feasible;
        self.fitness = if feasible {
            alpha * (cost / scenario.cost_bound)
                + (1.0 - alpha) * (latency / scenario.latency_bound)
        } else {
            f64::INFINITY
        };
        self.fitness
    }
}
