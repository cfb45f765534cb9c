use super::mutation::mutate;
use crate::solution::PlacementSolution;

pub const SA_STEPS: usize = 5;
pub const SA_TEMP_FLOOR: f64 = 0.1;

/// Short Metropolis walk around a candidate. Improving neighbors are taken
/// unconditionally, worsening ones with probability exp(-delta / temp); an
/// infeasible neighbor's infinite delta makes that probability zero. The
/// best state seen along the walk is returned, which is not necessarily
/// the endpoint.
pub fn polish(
    start: PlacementSolution,
    temperature: f64,
    alpha: f64,
    rng: &mut fastrand::Rng,
) -> PlacementSolution {
    if temperature < SA_TEMP_FLOOR {
        return start;
    }

    let mut current = start;
    let mut best = current.clone();

    for _ in 0..SA_STEPS {
        let mut neighbor = current.clone();
        mutate(&mut neighbor, 1.0, alpha, rng);

        let delta = neighbor.fitness - current.fitness;
        if delta < 0.0 || rng.f64() < (-delta / temperature).exp() {
            current = neighbor;
            if current.fitness < best.fitness {
                best = current.clone();
            }
        }
    }

    best
}
