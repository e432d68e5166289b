//! DIRECT (DIviding RECTangles) global optimizer.
//!
//! Jones, Perttunen & Stuckman (1993). The box is normalised to the unit
//! hypercube and repeatedly trisected. Every iteration divides the
//! "potentially optimal" rectangles: those on the lower-right convex hull of
//! (size, value) that could contain the global minimum for some Lipschitz
//! constant. No gradients are needed, which makes it suitable for treating a
//! finite-difference pricer as a black box.

use tracing::debug;
use uv_core::{ensure, Real, Result};

use super::{BoxBounds, Objective, OptimizationResult, Termination};

/// A hyper-rectangle of the normalised search space.
#[derive(Debug, Clone)]
struct Rect {
    /// Centre, in unit-cube coordinates.
    center: Vec<Real>,
    /// Number of trisections applied along each dimension (side = 3^-level).
    levels: Vec<u32>,
    /// Centre-to-vertex distance.
    size: Real,
    /// Objective value at the centre.
    value: Real,
}

impl Rect {
    fn new(center: Vec<Real>, levels: Vec<u32>, value: Real) -> Self {
        let size = half_diagonal(&levels);
        Self {
            center,
            levels,
            size,
            value,
        }
    }
}

/// Half the diagonal of a rectangle with sides `3^-levels[i]`.
///
/// Levels are summed in sorted order so that rectangles of the same shape get
/// bit-identical sizes regardless of orientation.
fn half_diagonal(levels: &[u32]) -> Real {
    let mut sorted = levels.to_vec();
    sorted.sort_unstable();
    let sum: Real = sorted.iter().map(|&k| 9.0_f64.powi(-(k as i32))).sum();
    0.5 * sum.sqrt()
}

/// DIRECT global minimizer with a fixed evaluation budget.
#[derive(Debug, Clone, Copy)]
pub struct Direct {
    max_evaluations: usize,
    max_iterations: usize,
    epsilon: Real,
}

impl Direct {
    /// Create an optimizer that stops after at most `max_evaluations`
    /// objective calls.
    pub fn new(max_evaluations: usize) -> Self {
        Self {
            max_evaluations,
            max_iterations: usize::MAX,
            epsilon: 1e-4,
        }
    }

    /// Cap the number of division rounds as well.
    pub fn with_max_iterations(mut self, max_iterations: usize) -> Self {
        self.max_iterations = max_iterations;
        self
    }

    /// Set the minimum relative improvement a rectangle must promise to be
    /// divided (the ε of Jones et al.).
    pub fn with_epsilon(mut self, epsilon: Real) -> Self {
        self.epsilon = epsilon;
        self
    }

    /// The evaluation budget.
    pub fn max_evaluations(&self) -> usize {
        self.max_evaluations
    }

    /// Minimize `objective` over `bounds`.
    ///
    /// A division is only started when all of its evaluations fit in the
    /// remaining budget, so the evaluation count never exceeds it.
    ///
    /// # Errors
    /// Returns an error if the budget is zero or `epsilon` is negative.
    pub fn minimize<O: Objective>(
        &self,
        objective: &mut O,
        bounds: &BoxBounds,
    ) -> Result<OptimizationResult> {
        ensure!(self.max_evaluations >= 1, "evaluation budget must be positive");
        ensure!(
            self.epsilon >= 0.0,
            "epsilon must be non-negative, got {}",
            self.epsilon
        );

        let n = bounds.dimension();
        let mut x = vec![0.0; n];
        let mut evaluate = |u: &[Real], x: &mut [Real]| {
            bounds.from_unit(u, x);
            objective.value(x)
        };

        let center = vec![0.5; n];
        let value = evaluate(&center, &mut x);
        let mut rects = vec![Rect::new(center, vec![0; n], value)];
        let mut evaluations = 1;
        let mut iterations = 0;

        let termination = 'search: loop {
            if evaluations >= self.max_evaluations {
                break Termination::MaxEvaluations;
            }
            if iterations >= self.max_iterations {
                break Termination::MaxIterations;
            }
            iterations += 1;

            for idx in potentially_optimal(&rects, self.epsilon) {
                let level = rects[idx].levels.iter().copied().min().unwrap_or(0);
                let dims: Vec<usize> = (0..n).filter(|&i| rects[idx].levels[i] == level).collect();
                if evaluations + 2 * dims.len() > self.max_evaluations {
                    break 'search Termination::MaxEvaluations;
                }

                let delta = 3.0_f64.powi(-(level as i32 + 1));
                let mut trials = Vec::with_capacity(dims.len());
                for &i in &dims {
                    let mut up = rects[idx].center.clone();
                    up[i] += delta;
                    let mut down = rects[idx].center.clone();
                    down[i] -= delta;
                    let f_up = evaluate(&up, &mut x);
                    let f_down = evaluate(&down, &mut x);
                    trials.push((f_up.min(f_down), i, up, f_up, down, f_down));
                }
                evaluations += 2 * dims.len();

                // Split along the most promising dimension first so that the
                // best new centres keep the largest rectangles.
                trials.sort_by(|a, b| a.0.total_cmp(&b.0).then(a.1.cmp(&b.1)));
                for (_, i, up, f_up, down, f_down) in trials {
                    rects[idx].levels[i] += 1;
                    let levels = rects[idx].levels.clone();
                    rects.push(Rect::new(up, levels.clone(), f_up));
                    rects.push(Rect::new(down, levels, f_down));
                }
                rects[idx].size = half_diagonal(&rects[idx].levels);
            }
        };

        let best = rects
            .iter()
            .reduce(|best, r| if r.value < best.value { r } else { best })
            .map(|r| (r.center.clone(), r.value))
            .unwrap_or_else(|| (vec![0.5; n], value));
        bounds.from_unit(&best.0, &mut x);

        debug!(
            evaluations,
            iterations,
            value = best.1,
            ?termination,
            "DIRECT search finished"
        );

        Ok(OptimizationResult {
            x,
            value: best.1,
            evaluations,
            termination,
        })
    }
}

/// Indices of the rectangles to divide in the next round.
fn potentially_optimal(rects: &[Rect], epsilon: Real) -> Vec<usize> {
    let mut order: Vec<usize> = (0..rects.len()).collect();
    order.sort_by(|&a, &b| {
        rects[a]
            .size
            .total_cmp(&rects[b].size)
            .then(rects[a].value.total_cmp(&rects[b].value))
    });

    // Lowest value per distinct size, sizes increasing
    let mut groups: Vec<usize> = Vec::new();
    for idx in order {
        match groups.last() {
            Some(&last) if rects[last].size == rects[idx].size => {}
            _ => groups.push(idx),
        }
    }

    let f_min = groups
        .iter()
        .map(|&g| rects[g].value)
        .fold(Real::INFINITY, Real::min);
    let start = groups
        .iter()
        .rposition(|&g| rects[g].value == f_min)
        .unwrap_or(0);

    // Lower-right convex hull from the best rectangle towards the largest
    let mut hull = vec![groups[start]];
    let mut current = start;
    while current + 1 < groups.len() {
        let (c_size, c_value) = (rects[groups[current]].size, rects[groups[current]].value);
        let mut next = current + 1;
        let mut best_slope = Real::INFINITY;
        for (j, &g) in groups.iter().enumerate().skip(current + 1) {
            let slope = (rects[g].value - c_value) / (rects[g].size - c_size);
            if slope <= best_slope {
                best_slope = slope;
                next = j;
            }
        }
        hull.push(groups[next]);
        current = next;
    }

    let threshold = f_min - epsilon * f_min.abs();
    let mut selected = Vec::with_capacity(hull.len());
    for (h, &idx) in hull.iter().enumerate() {
        match hull.get(h + 1) {
            None => selected.push(idx),
            Some(&right) => {
                let k = (rects[right].value - rects[idx].value) / (rects[right].size - rects[idx].size);
                if rects[idx].value - k * rects[idx].size <= threshold {
                    selected.push(idx);
                }
            }
        }
    }
    selected
}
