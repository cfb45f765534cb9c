// ===== edgeplace/src/reports/mod.rs =====
use comfy_table::presets::ASCII_FULL;
use comfy_table::{Attribute, Cell, CellAlignment, Color, ContentArrangement, Table};
use edgeplace::error::EpResult;
use edgeplace::optimizer::SolveOutcome;
use edgeplace::solution::PlacementSolution;
use serde::Serialize;
use std::fs;
use std::time::Duration;

/// Per-site deployment summary with capacity utilization.
pub fn print_solution_report(best: &PlacementSolution) {
    let scenario = &best.scenario;
    let usage = best.site_usage();

    let mut device_counts = vec![0usize; scenario.sites.len()];
    for slot in &best.assignment {
        if let Some(site_idx) = slot {
            device_counts[*site_idx] += 1;
        }
    }

    let mut table = Table::new();
    table
        .load_preset(ASCII_FULL)
        .set_content_arrangement(ContentArrangement::Dynamic);

    table.add_row(vec![
        Cell::new("Site").add_attribute(Attribute::Bold),
        Cell::new("Position"),
        Cell::new("Type"),
        Cell::new("Devices"),
        Cell::new("CPU %"),
        Cell::new("Mem %"),
        Cell::new("Disk %"),
        Cell::new("Cost").fg(Color::Cyan),
    ]);

    for i in 1..=7 {
        if let Some(col) = table.column_mut(i) {
            col.set_cell_alignment(CellAlignment::Right);
        }
    }

    for (site_idx, type_idx) in best.occupied_sites() {
        let site = &scenario.sites[site_idx];
        let ftype = &scenario.facility_types[type_idx];
        let used = &usage[site_idx];

        table.add_row(vec![
            Cell::new(site.id).add_attribute(Attribute::Bold),
            Cell::new(format!("({:.0}, {:.0})", site.x, site.y)),
            Cell::new(ftype.id),
            Cell::new(device_counts[site_idx]),
            utilization_cell(used.cpu, ftype.capacity.cpu),
            utilization_cell(used.memory, ftype.capacity.memory),
            utilization_cell(used.storage, ftype.capacity.storage),
            Cell::new(format!("{:.0}", ftype.base_cost * site.cost_factor)).fg(Color::Cyan),
        ]);
    }

    println!("\n{}", table);
    println!(
        "   Facilities: {} | Devices served: {}/{} | Cost: {:.2} | Latency: {:.2}",
        best.occupied_sites().count(),
        best.assignment.iter().filter(|slot| slot.is_some()).count(),
        scenario.devices.len(),
        best.total_cost,
        best.total_latency
    );
}

fn utilization_cell(used: f64, capacity: f64) -> Cell {
    let pct = if capacity > 0.0 {
        used / capacity * 100.0
    } else {
        0.0
    };
    let text = format!("{:.1}", pct);
    if pct > 90.0 {
        Cell::new(text).fg(Color::Red)
    } else if pct > 70.0 {
        Cell::new(text).fg(Color::Yellow)
    } else {
        Cell::new(text).fg(Color::Green)
    }
}

/// One row per alpha run, best (lowest fitness) highlighted.
pub fn print_alpha_comparison(results: &[(f64, SolveOutcome)]) {
    let best_alpha = results
        .iter()
        .filter_map(|(alpha, outcome)| outcome.best.as_ref().map(|b| (*alpha, b.fitness)))
        .min_by(|a, b| a.1.total_cmp(&b.1))
        .map(|(alpha, _)| alpha);

    let mut table = Table::new();
    table
        .load_preset(ASCII_FULL)
        .set_content_arrangement(ContentArrangement::Dynamic);

    table.add_row(vec![
        Cell::new("Alpha").add_attribute(Attribute::Bold),
        Cell::new("Fitness").fg(Color::Cyan),
        Cell::new("Cost"),
        Cell::new("Latency"),
        Cell::new("Facilities"),
        Cell::new("Feasible"),
    ]);

    for i in 1..=5 {
        if let Some(col) = table.column_mut(i) {
            col.set_cell_alignment(CellAlignment::Right);
        }
    }

    for (alpha, outcome) in results {
        match &outcome.best {
            Some(best) => {
                let alpha_cell = if Some(*alpha) == best_alpha {
                    Cell::new(format!("{:.2}", alpha))
                        .fg(Color::Green)
                        .add_attribute(Attribute::Bold)
                } else {
                    Cell::new(format!("{:.2}", alpha)).add_attribute(Attribute::Bold)
                };
                table.add_row(vec![
                    alpha_cell,
                    Cell::new(format!("{:.4}", best.fitness)).fg(Color::Cyan),
                    Cell::new(format!("{:.0}", best.total_cost)),
                    Cell::new(format!("{:.0}", best.total_latency)),
                    Cell::new(best.occupied_sites().count()),
                    Cell::new("yes"),
                ]);
            }
            None => {
                table.add_row(vec![
                    Cell::new(format!("{:.2}", alpha)).add_attribute(Attribute::Bold),
                    Cell::new("-"),
                    Cell::new("-"),
                    Cell::new("-"),
                    Cell::new("-"),
                    Cell::new("no").fg(Color::Red),
                ]);
            }
        }
    }

    println!("\n{}", table);
}

pub struct BenchRow {
    pub preset: String,
    pub devices: usize,
    pub sites: usize,
    pub types: usize,
    pub feasible: bool,
    pub best_fitness: f64,
    pub best_cost: f64,
    pub best_latency: f64,
    pub elapsed: Duration,
}

pub fn print_bench_table(rows: &[BenchRow]) {
    let mut table = Table::new();
    table
        .load_preset(ASCII_FULL)
        .set_content_arrangement(ContentArrangement::Dynamic);

    table.add_row(vec![
        Cell::new("Preset").add_attribute(Attribute::Bold),
        Cell::new("Devices"),
        Cell::new("Sites"),
        Cell::new("Types"),
        Cell::new("Fitness").fg(Color::Cyan),
        Cell::new("Cost"),
        Cell::new("Latency"),
        Cell::new("Time"),
    ]);

    for i in 1..=7 {
        if let Some(col) = table.column_mut(i) {
            col.set_cell_alignment(CellAlignment::Right);
        }
    }

    for row in rows {
        let (fitness, cost, latency) = if row.feasible {
            (
                Cell::new(format!("{:.4}", row.best_fitness)).fg(Color::Cyan),
                Cell::new(format!("{:.0}", row.best_cost)),
                Cell::new(format!("{:.0}", row.best_latency)),
            )
        } else {
            (
                Cell::new("-").fg(Color::Red),
                Cell::new("-"),
                Cell::new("-"),
            )
        };
        table.add_row(vec![
            Cell::new(&row.preset).add_attribute(Attribute::Bold),
            Cell::new(row.devices),
            Cell::new(row.sites),
            Cell::new(row.types),
            fitness,
            cost,
            latency,
            Cell::new(format!("{:.2?}", row.elapsed)),
        ]);
    }

    println!("\n{}", table);
}

#[derive(Serialize)]
struct SolutionExport {
    alpha: f64,
    fitness: f64,
    total_cost: f64,
    total_latency: f64,
    placements: Vec<PlacementEntry>,
    assignments: Vec<AssignmentEntry>,
}

#[derive(Serialize)]
struct PlacementEntry {
    site_id: u32,
    facility_type_id: u32,
}

#[derive(Serialize)]
struct AssignmentEntry {
    device_id: u32,
    site_id: u32,
}

pub fn write_solution_json(path: &str, alpha: f64, best: &PlacementSolution) -> EpResult<()> {
    let scenario = &best.scenario;

    let placements = best
        .occupied_sites()
        .map(|(site_idx, type_idx)| PlacementEntry {
            site_id: scenario.sites[site_idx].id,
            facility_type_id: scenario.facility_types[type_idx].id,
        })
        .collect();

    let assignments = best
        .assignment
        .iter()
        .enumerate()
        .filter_map(|(device_idx, slot)| {
            slot.map(|site_idx| AssignmentEntry {
                device_id: scenario.devices[device_idx].id,
                site_id: scenario.sites[site_idx].id,
            })
        })
        .collect();

    let export = SolutionExport {
        alpha,
        fitness: best.fitness,
        total_cost: best.total_cost,
        total_latency: best.total_latency,
        placements,
        assignments,
    };

    fs::write(path, serde_json::to_string_pretty(&export)?)?;
    Ok(())
}
