//! Initial particle layouts

use crate::error::Result;
use crate::store::{ParticleInit, ParticleStore};
use glam::Vec2;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

pub const DEFAULT_DISK_RADIUS: f32 = 10.0;

#[derive(Debug, Clone, PartialEq)]
pub enum Scenario {
    /// Every particle zeroed at the origin, mass included
    Origin,
    /// Two unit masses at rest at (0, 0) and (1, 0)
    TwoBody,
    /// Particles at rest, uniformly spread over a disk, masses in [0.5, 1.5)
    Disk { radius: f32, seed: u64 },
}

impl Scenario {
    /// Disk layout with a seed drawn from the OS
    pub fn random_disk(radius: f32) -> Self {
        Scenario::Disk {
            radius,
            seed: StdRng::from_os_rng().random(),
        }
    }

    /// Allocate a store for `n` particles laid out by this scenario.
    ///
    /// `TwoBody` always holds exactly two particles and ignores `n`.
    pub fn build(&self, n: usize) -> Result<ParticleStore> {
        match self {
            Scenario::Origin => ParticleStore::new(n),
            Scenario::TwoBody => ParticleStore::from_fn(2, |i| {
                ParticleInit::at_rest(Vec2::new(i as f32, 0.0), 1.0)
            }),
            Scenario::Disk { radius, seed } => {
                let mut rng = StdRng::seed_from_u64(*seed);
                ParticleStore::from_fn(n, |_| {
                    let r = radius * rng.random::<f32>().sqrt();
                    let theta = rng.random::<f32>() * std::f32::consts::TAU;
                    let mass = rng.random_range(0.5..1.5);
                    ParticleInit::at_rest(Vec2::from_angle(theta) * r, mass)
                })
            }
        }
    }
}
