//! Tests for the padded structure-of-arrays particle store

use glam::Vec2;
use nbody_core::store::{padded_len, Field, ParticleInit, ParticleStore, LANE_WIDTH};
use nbody_core::NBodyError;

#[test]
fn test_padded_len_is_smallest_multiple() {
    for w in 1..=16 {
        for n in 0..=100 {
            let p = padded_len(n, w).unwrap();
            assert_eq!(p % w, 0, "n = {}, w = {}", n, w);
            assert!(p >= n);
            assert!(p < n + w, "padded_len({}, {}) = {} is not the smallest", n, w, p);
        }
    }
}

#[test]
fn test_store_sizes() {
    for n in 0..=33 {
        let store = ParticleStore::new(n).unwrap();
        assert_eq!(store.size(), n);
        assert_eq!(Some(store.padded_size()), padded_len(n, LANE_WIDTH));
        assert_eq!(store.lane_width(), LANE_WIDTH);
        for field in Field::ALL {
            assert_eq!(store.field(field).len(), store.padded_size());
        }
    }
}

#[test]
fn test_custom_lane_width() {
    let store = ParticleStore::with_lane_width(5, 4).unwrap();
    assert_eq!(store.padded_size(), 8);

    let scalar = ParticleStore::with_lane_width(5, 1).unwrap();
    assert_eq!(scalar.padded_size(), 5);
}

#[test]
fn test_zero_lane_width_rejected() {
    let err = ParticleStore::with_lane_width(5, 0).unwrap_err();
    assert_eq!(err, NBodyError::InvalidLaneWidth(0));
}

#[test]
fn test_oversized_store_reports_allocation_failure() {
    let err = ParticleStore::new(usize::MAX / 8).unwrap_err();
    assert!(matches!(err, NBodyError::Allocation { .. }));
}

#[test]
fn test_padded_len_overflow_is_none() {
    assert_eq!(padded_len(usize::MAX, 8), None);
    assert_eq!(padded_len(usize::MAX - 3, 8), None);
    assert_eq!(padded_len(usize::MAX, 1), Some(usize::MAX));
    assert_eq!(padded_len(5, 0), None);
}

#[test]
fn test_unpaddable_count_reports_allocation_failure() {
    for n in [usize::MAX, usize::MAX - 1, usize::MAX - 6] {
        let err = ParticleStore::new(n).unwrap_err();
        assert!(matches!(err, NBodyError::Allocation { .. }), "n = {}", n);
    }
}

#[test]
fn test_initializer_called_once_per_real_particle() {
    let mut seen = Vec::new();
    let store = ParticleStore::from_fn(11, |i| {
        seen.push(i);
        ParticleInit {
            pos: Vec2::new(i as f32, -(i as f32)),
            vel: Vec2::new(0.5 * i as f32, 1.0),
            mass: 1.0 + i as f32,
        }
    })
    .unwrap();

    assert_eq!(seen, (0..11).collect::<Vec<_>>());
    for i in 0..11 {
        assert_eq!(store.position(i), Vec2::new(i as f32, -(i as f32)));
        assert_eq!(store.velocity(i), Vec2::new(0.5 * i as f32, 1.0));
        assert_eq!(store.mass()[i], 1.0 + i as f32);
        assert_eq!(store.force(i), Vec2::ZERO);
    }
}

#[test]
fn test_padding_is_massless() {
    let store = ParticleStore::from_fn(13, |_| ParticleInit::at_rest(Vec2::ONE, 3.0)).unwrap();
    assert_eq!(store.padded_size(), 16);
    for i in 13..16 {
        assert_eq!(store.mass()[i], 0.0);
        assert_eq!(store.x()[i], 0.0);
        assert_eq!(store.velocity_y()[i], 0.0);
    }
}

#[test]
fn test_named_accessors_address_their_column() {
    let mut store = ParticleStore::new(3).unwrap();
    store.x_mut()[0] = 1.0;
    store.y_mut()[0] = 2.0;
    store.velocity_x_mut()[0] = 3.0;
    store.velocity_y_mut()[0] = 4.0;
    store.mass_mut()[0] = 5.0;
    store.force_x_mut()[0] = 6.0;
    store.force_y_mut()[0] = 7.0;

    for (k, field) in Field::ALL.iter().enumerate() {
        assert_eq!(store.field(*field)[0], (k + 1) as f32);
    }
}

#[test]
#[should_panic]
fn test_set_particle_rejects_padding_index() {
    let mut store = ParticleStore::new(3).unwrap();
    store.set_particle(5, ParticleInit::at_rest(Vec2::ZERO, 1.0));
}
