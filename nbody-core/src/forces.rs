//! Pairwise gravitational force accumulation.
//!
//! Kernels add into the force columns; they never clear them. Clearing is done
//! once per kick by the integrator.

use crate::store::{ParticleStore, LANE_WIDTH};

/// Width of the fixed-size chunks processed by [`LaneKernel`]
pub const LANES: usize = LANE_WIDTH;

/// Force exerted on particle `i` by particle `j`, given `d = pos_i - pos_j`.
///
/// Points from `i` toward `j` with magnitude `m_i * m_j / |d|^2`. Particle `j`
/// receives the exact negation. Coincident particles yield non-finite values.
#[inline(always)]
pub fn pair_force(dx: f32, dy: f32, mi: f32, mj: f32) -> (f32, f32) {
    let dist2 = dx * dx + dy * dy;
    let dist = dist2.sqrt();
    let magnitude = mi * mj / dist2;
    (-magnitude * (dx / dist), -magnitude * (dy / dist))
}

/// Strategy for summing pairwise forces over the real particle range.
///
/// All slices have the store's padded length; `n` is the number of real
/// particles. Implementations must leave padding forces untouched by the real
/// particles' physics and must agree with [`ScalarKernel`] within rounding.
pub trait ForceKernel {
    fn accumulate(
        &self,
        fx: &mut [f32],
        fy: &mut [f32],
        x: &[f32],
        y: &[f32],
        mass: &[f32],
        n: usize,
    );
}

/// Reference O(n^2) loop over every unordered pair
#[derive(Debug, Clone, Copy, Default)]
pub struct ScalarKernel;

impl ForceKernel for ScalarKernel {
    fn accumulate(
        &self,
        fx: &mut [f32],
        fy: &mut [f32],
        x: &[f32],
        y: &[f32],
        mass: &[f32],
        n: usize,
    ) {
        for i in 0..n {
            for j in i + 1..n {
                let (px, py) = pair_force(x[i] - x[j], y[i] - y[j], mass[i], mass[j]);
                fx[i] += px;
                fy[i] += py;
                fx[j] -= px;
                fy[j] -= py;
            }
        }
    }
}

/// Lane-parallel kernel.
///
/// For each `i`, partners up to the next multiple of [`LANES`] are handled one
/// at a time, the rest in `[f32; LANES]` chunks that the compiler can map onto
/// vector registers. Lanes past the last real particle are masked to zero.
#[derive(Debug, Clone, Copy, Default)]
pub struct LaneKernel;

impl ForceKernel for LaneKernel {
    fn accumulate(
        &self,
        fx: &mut [f32],
        fy: &mut [f32],
        x: &[f32],
        y: &[f32],
        mass: &[f32],
        n: usize,
    ) {
        let padded = x.len();
        if padded % LANES != 0 {
            log::trace!(
                "padded length {} not a multiple of {}, using scalar kernel",
                padded,
                LANES
            );
            return ScalarKernel.accumulate(fx, fy, x, y, mass, n);
        }

        for i in 0..n {
            // i + 1 <= n <= padded, and padded is a multiple of LANES
            let j0 = (i + 1).next_multiple_of(LANES).min(n);
            let (xi, yi, mi) = (x[i], y[i], mass[i]);

            for j in i + 1..j0 {
                let (px, py) = pair_force(xi - x[j], yi - y[j], mi, mass[j]);
                fx[i] += px;
                fy[i] += py;
                fx[j] -= px;
                fy[j] -= py;
            }

            if j0 >= n {
                continue;
            }

            let chunks = (n - j0).div_ceil(LANES);
            let (fx_head, fx_tail) = fx.split_at_mut(j0);
            let (fy_head, fy_tail) = fy.split_at_mut(j0);
            let mut sum_x = 0.0f32;
            let mut sum_y = 0.0f32;

            let sources = x[j0..]
                .chunks_exact(LANES)
                .zip(y[j0..].chunks_exact(LANES))
                .zip(mass[j0..].chunks_exact(LANES));
            let targets = fx_tail
                .chunks_exact_mut(LANES)
                .zip(fy_tail.chunks_exact_mut(LANES));

            for (k, (((xj, yj), mj), (fxj, fyj))) in
                sources.zip(targets).take(chunks).enumerate()
            {
                let start = j0 + k * LANES;
                let mut cx = [0.0f32; LANES];
                let mut cy = [0.0f32; LANES];
                for l in 0..LANES {
                    let (px, py) = pair_force(xi - xj[l], yi - yj[l], mi, mj[l]);
                    let live = start + l < n;
                    cx[l] = if live { px } else { 0.0 };
                    cy[l] = if live { py } else { 0.0 };
                }
                for l in 0..LANES {
                    fxj[l] -= cx[l];
                    fyj[l] -= cy[l];
                }
                sum_x += cx.iter().sum::<f32>();
                sum_y += cy.iter().sum::<f32>();
            }

            fx_head[i] += sum_x;
            fy_head[i] += sum_y;
        }
    }
}

/// Runtime selection between the available kernels
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum KernelChoice {
    Scalar,
    #[default]
    Lanes,
}

impl ForceKernel for KernelChoice {
    fn accumulate(
        &self,
        fx: &mut [f32],
        fy: &mut [f32],
        x: &[f32],
        y: &[f32],
        mass: &[f32],
        n: usize,
    ) {
        match self {
            KernelChoice::Scalar => ScalarKernel.accumulate(fx, fy, x, y, mass, n),
            KernelChoice::Lanes => LaneKernel.accumulate(fx, fy, x, y, mass, n),
        }
    }
}

/// Add the pairwise forces of the store's real particles into its force columns
pub fn accumulate_forces<K: ForceKernel + ?Sized>(store: &mut ParticleStore, kernel: &K) {
    let n = store.size();
    let fields = store.fields_mut();
    kernel.accumulate(
        fields.force_x,
        fields.force_y,
        fields.x,
        fields.y,
        fields.mass,
        n,
    );
}
