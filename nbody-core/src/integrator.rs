use crate::forces::{accumulate_forces, ForceKernel};
use crate::store::ParticleStore;

/// `dst += dt * src` over the whole padded column
fn scaled_add(dst: &mut [f32], src: &[f32], dt: f32) {
    for (d, s) in dst.iter_mut().zip(src) {
        *d += dt * *s;
    }
}

/// Recompute forces from current positions, then update velocities.
///
/// Forces are applied directly as velocity increments (`v += dt * F`), i.e.
/// every particle is treated as having unit inertial mass. Padding velocities
/// change too, but padding forces are always zero.
pub fn kick<K: ForceKernel + ?Sized>(store: &mut ParticleStore, dt: f32, kernel: &K) {
    store.force_x_mut().fill(0.0);
    store.force_y_mut().fill(0.0);
    accumulate_forces(store, kernel);

    let fields = store.fields_mut();
    scaled_add(fields.velocity_x, fields.force_x, dt);
    scaled_add(fields.velocity_y, fields.force_y, dt);
}

/// Move every slot along its velocity: `x += dt * v`
pub fn drift(store: &mut ParticleStore, dt: f32) {
    let fields = store.fields_mut();
    scaled_add(fields.x, fields.velocity_x, dt);
    scaled_add(fields.y, fields.velocity_y, dt);
}

/// Step the simulation forward by dt: kick, then drift
pub fn step<K: ForceKernel + ?Sized>(store: &mut ParticleStore, dt: f32, kernel: &K) {
    kick(store, dt, kernel);
    drift(store, dt);
}
