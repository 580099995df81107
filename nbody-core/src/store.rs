//! Column-oriented particle storage.
//!
//! Every attribute lives in its own contiguous column of `padded_size` floats,
//! where `padded_size` is the particle count rounded up to the lane width.
//! All seven columns share one allocation, laid out back to back.

use crate::error::{NBodyError, Result};
use glam::Vec2;

/// Default number of `f32` values processed together by the lane kernels
pub const LANE_WIDTH: usize = 8;

/// Number of per-particle attributes held by the store
pub const FIELD_COUNT: usize = 7;

/// Round `n` up to the next multiple of `lane_width`.
///
/// Returns `None` when `lane_width` is zero or the result does not fit in a
/// `usize`.
pub fn padded_len(n: usize, lane_width: usize) -> Option<usize> {
    n.checked_next_multiple_of(lane_width)
}

/// One column of the store
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Field {
    X,
    Y,
    VelocityX,
    VelocityY,
    Mass,
    ForceX,
    ForceY,
}

impl Field {
    pub const ALL: [Field; FIELD_COUNT] = [
        Field::X,
        Field::Y,
        Field::VelocityX,
        Field::VelocityY,
        Field::Mass,
        Field::ForceX,
        Field::ForceY,
    ];

    fn column(self) -> usize {
        self as usize
    }
}

/// Initial state of a single particle, handed out by an initializer
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct ParticleInit {
    pub pos: Vec2,
    pub vel: Vec2,
    pub mass: f32,
}

impl ParticleInit {
    pub fn at_rest(pos: Vec2, mass: f32) -> Self {
        Self {
            pos,
            vel: Vec2::ZERO,
            mass,
        }
    }
}

/// Mutable views of all seven columns at once
pub struct FieldsMut<'a> {
    pub x: &'a mut [f32],
    pub y: &'a mut [f32],
    pub velocity_x: &'a mut [f32],
    pub velocity_y: &'a mut [f32],
    pub mass: &'a mut [f32],
    pub force_x: &'a mut [f32],
    pub force_y: &'a mut [f32],
}

/// Padded structure-of-arrays particle buffer
#[derive(Debug, Clone)]
pub struct ParticleStore {
    buffer: Vec<f32>,
    size: usize,
    padded_size: usize,
    lane_width: usize,
}

macro_rules! column_accessors {
    ($($name:ident, $name_mut:ident => $field:expr;)*) => {
        $(
            pub fn $name(&self) -> &[f32] {
                self.field($field)
            }

            pub fn $name_mut(&mut self) -> &mut [f32] {
                self.field_mut($field)
            }
        )*
    };
}

impl ParticleStore {
    /// Allocate a zeroed store for `n` particles padded to [`LANE_WIDTH`]
    pub fn new(n: usize) -> Result<Self> {
        Self::with_lane_width(n, LANE_WIDTH)
    }

    /// Allocate a zeroed store for `n` particles padded to `lane_width`
    pub fn with_lane_width(n: usize, lane_width: usize) -> Result<Self> {
        if lane_width == 0 {
            return Err(NBodyError::InvalidLaneWidth(lane_width));
        }

        let overflow = NBodyError::Allocation {
            requested: usize::MAX,
        };
        let padded_size = padded_len(n, lane_width).ok_or(overflow.clone())?;
        let requested = padded_size.checked_mul(FIELD_COUNT).ok_or(overflow)?;

        let mut buffer = Vec::new();
        buffer
            .try_reserve_exact(requested)
            .map_err(|_| NBodyError::Allocation { requested })?;
        buffer.resize(requested, 0.0);

        log::debug!(
            "allocated particle store: {} particles, padded to {} (lane width {})",
            n,
            padded_size,
            lane_width
        );

        Ok(Self {
            buffer,
            size: n,
            padded_size,
            lane_width,
        })
    }

    /// Allocate a store and fill the real particles from `init`.
    ///
    /// `init` is called once per index in `0..n`, in order. Padding slots keep
    /// zero position, velocity and mass.
    pub fn from_fn<F>(n: usize, init: F) -> Result<Self>
    where
        F: FnMut(usize) -> ParticleInit,
    {
        Self::with_lane_width_from_fn(n, LANE_WIDTH, init)
    }

    pub fn with_lane_width_from_fn<F>(n: usize, lane_width: usize, mut init: F) -> Result<Self>
    where
        F: FnMut(usize) -> ParticleInit,
    {
        let mut store = Self::with_lane_width(n, lane_width)?;
        for i in 0..n {
            store.set_particle(i, init(i));
        }
        Ok(store)
    }

    /// Logical particle count
    pub fn size(&self) -> usize {
        self.size
    }

    /// Allocated length of every column
    pub fn padded_size(&self) -> usize {
        self.padded_size
    }

    pub fn lane_width(&self) -> usize {
        self.lane_width
    }

    pub fn is_empty(&self) -> bool {
        self.size == 0
    }

    pub fn field(&self, field: Field) -> &[f32] {
        let start = field.column() * self.padded_size;
        &self.buffer[start..start + self.padded_size]
    }

    pub fn field_mut(&mut self, field: Field) -> &mut [f32] {
        let start = field.column() * self.padded_size;
        &mut self.buffer[start..start + self.padded_size]
    }

    column_accessors! {
        x, x_mut => Field::X;
        y, y_mut => Field::Y;
        velocity_x, velocity_x_mut => Field::VelocityX;
        velocity_y, velocity_y_mut => Field::VelocityY;
        mass, mass_mut => Field::Mass;
        force_x, force_x_mut => Field::ForceX;
        force_y, force_y_mut => Field::ForceY;
    }

    /// Borrow every column mutably, for passes that read some and write others
    pub fn fields_mut(&mut self) -> FieldsMut<'_> {
        let n = self.padded_size;
        let (x, rest) = self.buffer.split_at_mut(n);
        let (y, rest) = rest.split_at_mut(n);
        let (velocity_x, rest) = rest.split_at_mut(n);
        let (velocity_y, rest) = rest.split_at_mut(n);
        let (mass, rest) = rest.split_at_mut(n);
        let (force_x, force_y) = rest.split_at_mut(n);

        FieldsMut {
            x,
            y,
            velocity_x,
            velocity_y,
            mass,
            force_x,
            force_y,
        }
    }

    /// Overwrite position, velocity and mass of particle `i`
    ///
    /// # Panics
    ///
    /// Panics if `i` is not a real particle index, i.e. `i >= self.size()`.
    pub fn set_particle(&mut self, i: usize, particle: ParticleInit) {
        assert!(i < self.size, "particle index {} out of range {}", i, self.size);
        let fields = self.fields_mut();
        fields.x[i] = particle.pos.x;
        fields.y[i] = particle.pos.y;
        fields.velocity_x[i] = particle.vel.x;
        fields.velocity_y[i] = particle.vel.y;
        fields.mass[i] = particle.mass;
    }

    pub fn position(&self, i: usize) -> Vec2 {
        Vec2::new(self.x()[i], self.y()[i])
    }

    pub fn velocity(&self, i: usize) -> Vec2 {
        Vec2::new(self.velocity_x()[i], self.velocity_y()[i])
    }

    pub fn force(&self, i: usize) -> Vec2 {
        Vec2::new(self.force_x()[i], self.force_y()[i])
    }

    /// True when every real particle has finite position and velocity
    pub fn is_finite(&self) -> bool {
        let n = self.size;
        [Field::X, Field::Y, Field::VelocityX, Field::VelocityY]
            .iter()
            .all(|&f| self.field(f)[..n].iter().all(|v| v.is_finite()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn columns_are_disjoint() {
        let mut store = ParticleStore::with_lane_width(3, 4).unwrap();
        for (k, field) in Field::ALL.iter().enumerate() {
            store.field_mut(*field).fill(k as f32);
        }
        for (k, field) in Field::ALL.iter().enumerate() {
            assert!(store.field(*field).iter().all(|&v| v == k as f32));
        }
    }

    #[test]
    fn fields_mut_matches_named_accessors() {
        let mut store = ParticleStore::with_lane_width(5, 4).unwrap();
        {
            let fields = store.fields_mut();
            fields.mass[2] = 7.0;
            fields.force_y[7] = -1.0;
            assert_eq!(fields.x.len(), 8);
            assert_eq!(fields.force_y.len(), 8);
        }
        assert_eq!(store.mass()[2], 7.0);
        assert_eq!(store.force_y()[7], -1.0);
    }

    #[test]
    fn empty_store_has_empty_columns() {
        let mut store = ParticleStore::new(0).unwrap();
        assert!(store.is_empty());
        assert_eq!(store.padded_size(), 0);
        assert!(store.x().is_empty());
        assert!(store.fields_mut().force_y.is_empty());
        assert!(store.is_finite());
    }
}
