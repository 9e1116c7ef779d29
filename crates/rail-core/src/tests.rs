//! Unit tests for rail-core primitives.

#[cfg(test)]
mod ids {
    use crate::{NodeId, PieceId, TrackTypeId};

    #[test]
    fn index_cast() {
        let id = NodeId(42);
        assert_eq!(id.index(), 42);
        assert_eq!(usize::from(PieceId(7)), 7);
    }

    #[test]
    fn ordering() {
        assert!(NodeId(0) < NodeId(1));
        assert!(PieceId(100) > PieceId(99));
    }

    #[test]
    fn invalid_sentinels_are_max() {
        assert_eq!(NodeId::INVALID.0, u32::MAX);
        assert_eq!(PieceId::INVALID.0, u32::MAX);
        assert_eq!(TrackTypeId::INVALID.0, u16::MAX);
        assert_eq!(NodeId::default(), NodeId::INVALID);
    }

    #[test]
    fn display() {
        assert_eq!(NodeId(7).to_string(), "NodeId(7)");
        assert_eq!(TrackTypeId(3).to_string(), "TrackTypeId(3)");
    }
}

#[cfg(test)]
mod vec2 {
    use crate::Vec2;

    #[test]
    fn arithmetic() {
        let a = Vec2::new(3.0, 4.0);
        let b = Vec2::new(-1.0, 2.0);
        assert_eq!(a + b, Vec2::new(2.0, 6.0));
        assert_eq!(a - b, Vec2::new(4.0, 2.0));
        assert_eq!(-a, Vec2::new(-3.0, -4.0));
        assert_eq!(a * 2.0, Vec2::new(6.0, 8.0));
    }

    #[test]
    fn lengths_and_distances() {
        let a = Vec2::new(3.0, 4.0);
        assert_eq!(a.length_sq(), 25.0);
        assert_eq!(a.length(), 5.0);
        assert_eq!(Vec2::ZERO.distance(a), 5.0);
        assert_eq!(Vec2::ZERO.distance_sq(a), 25.0);
    }

    #[test]
    fn left90_is_perpendicular() {
        let v = Vec2::new(0.6, -0.8);
        let n = v.left90();
        assert!(v.dot(n).abs() < 1e-15);
        // Two quarter turns reverse the vector.
        assert_eq!(n.left90(), -v);
    }

    #[test]
    fn display_precision() {
        assert_eq!(Vec2::new(1.0, -2.5).to_string(), "(1.000, -2.500)");
    }
}

#[cfg(test)]
mod direction {
    use std::f64::consts::{FRAC_PI_2, PI};

    use crate::{Direction, Vec2, wrap_angle};

    #[test]
    fn from_vec_normalizes() {
        let d = Direction::from_vec(Vec2::new(3.0, 4.0)).unwrap();
        assert!((d.as_vec().length() - 1.0).abs() < 1e-15);
        assert!((d.x() - 0.6).abs() < 1e-15);
        assert!((d.y() - 0.8).abs() < 1e-15);
    }

    #[test]
    fn from_vec_rejects_zero() {
        assert!(Direction::from_vec(Vec2::ZERO).is_none());
        assert!(Direction::from_vec(Vec2::new(1e-13, -1e-13)).is_none());
    }

    #[test]
    fn from_vec_rejects_non_finite() {
        assert!(Direction::from_vec(Vec2::new(f64::NAN, 0.0)).is_none());
        assert!(Direction::from_vec(Vec2::new(f64::INFINITY, 1.0)).is_none());
        // Finite components whose squared length overflows have no finite
        // normalization either.
        assert!(Direction::from_vec(Vec2::new(1e308, 1e308)).is_none());
    }

    #[test]
    fn try_from_normalizes_or_rejects() {
        let d = Direction::try_from(Vec2::new(3.0, 4.0)).unwrap();
        assert!((d.as_vec().length() - 1.0).abs() < 1e-15);
        assert!(Direction::try_from(Vec2::ZERO).is_err());
    }

    #[test]
    fn angle_roundtrip() {
        for &a in &[0.0, 0.7, -2.3, FRAC_PI_2, PI] {
            let d = Direction::from_angle(a);
            assert!(
                (d.angle() - wrap_angle(a)).abs() < 1e-12,
                "angle {a} came back as {}",
                d.angle()
            );
        }
    }

    #[test]
    fn west_formats_as_positive_pi() {
        // atan2 yields -π for (-0.0, -1.0); Display must fold it onto +π.
        assert_eq!(Direction::EAST.opposite().to_string(), "+3.1416 rad");
        assert_eq!(Direction::WEST.to_string(), "+3.1416 rad");
    }

    #[test]
    fn quarter_turns() {
        assert!(Direction::EAST.left90().approx_eq(Direction::NORTH, 1e-12));
        assert!(Direction::EAST.right90().approx_eq(Direction::SOUTH, 1e-12));
        assert!(Direction::NORTH.opposite().approx_eq(Direction::SOUTH, 1e-12));
    }

    #[test]
    fn angle_to_is_symmetric_and_bounded() {
        let a = Direction::from_angle(0.3);
        let b = Direction::from_angle(-2.9);
        assert!((a.angle_to(b) - b.angle_to(a)).abs() < 1e-15);
        assert!(a.angle_to(b) <= PI);
        assert!((a.angle_to(a.opposite()) - PI).abs() < 1e-12);
    }

    #[test]
    fn approx_eq_respects_epsilon() {
        let base = Direction::from_angle(1.0);
        assert!(base.approx_eq(Direction::from_angle(1.0 + 0.9e-3), 1e-3));
        assert!(!base.approx_eq(Direction::from_angle(1.0 + 1.1e-3), 1e-3));
    }

    #[test]
    fn wrap_angle_interval() {
        assert!((wrap_angle(3.0 * PI) - PI).abs() < 1e-12);
        assert!((wrap_angle(-PI) - PI).abs() < 1e-12);
        assert!((wrap_angle(PI) - PI).abs() < 1e-12);
        assert!((wrap_angle(-1.5 * PI) - 0.5 * PI).abs() < 1e-12);
        assert_eq!(wrap_angle(0.25), 0.25);
    }
}

#[cfg(all(test, feature = "serde"))]
mod serde_support {
    use crate::{Direction, Vec2};

    #[test]
    fn direction_round_trips_as_its_vector() {
        let east = serde_json::to_string(&Direction::EAST).unwrap();
        assert_eq!(east, r#"{"x":1.0,"y":0.0}"#);
        let back: Direction = serde_json::from_str(&east).unwrap();
        assert_eq!(back, Direction::EAST);
    }

    #[test]
    fn deserialized_direction_is_renormalized() {
        // A scaled heading on the wire must come back unit length.
        let d: Direction = serde_json::from_str(r#"{"x":3.0,"y":4.0}"#).unwrap();
        assert!((d.as_vec().length() - 1.0).abs() < 1e-15);
        assert!((d.x() - 0.6).abs() < 1e-15);
        assert!((d.y() - 0.8).abs() < 1e-15);
    }

    #[test]
    fn degenerate_direction_fails_to_deserialize() {
        assert!(serde_json::from_str::<Direction>(r#"{"x":0.0,"y":0.0}"#).is_err());
        assert!(serde_json::from_str::<Direction>(r#"{"x":1e308,"y":1e308}"#).is_err());
    }
}

#[cfg(test)]
mod config {
    use crate::GeometryConfig;

    #[test]
    fn defaults_are_metre_scaled() {
        let config = GeometryConfig::default();
        assert_eq!(config.angle_epsilon, 1e-3);
        assert_eq!(config.pos_epsilon, 1e-3);
        assert_eq!(config.merge_radius, 0.25);
        assert_eq!(config.lateral_epsilon, 1e-9);
        assert_eq!(config.max_radius, 10_000.0);
        // Snapping must be coarser than coincidence checking, or a snapped
        // endpoint could fail its own position validation.
        assert!(config.merge_radius > config.pos_epsilon);
    }

    #[test]
    fn overrides_via_struct_update() {
        let config = GeometryConfig { merge_radius: 1.5, ..GeometryConfig::default() };
        assert_eq!(config.merge_radius, 1.5);
        assert_eq!(config.angle_epsilon, 1e-3);
    }
}

#[cfg(test)]
mod catalog {
    use crate::{GeneratorKind, ShapeKind, TrackCatalog, TrackStyle, TrackTypeId};

    #[test]
    fn register_assigns_dense_ids() {
        let mut catalog = TrackCatalog::new();
        let a = catalog.register("narrow gauge", 40.0, 15.0, 25.0, TrackStyle::Ballast);
        let b = catalog.register("monorail", 60.0, 55.0, 33.3, TrackStyle::Elevated);
        assert_eq!(a, TrackTypeId(0));
        assert_eq!(b, TrackTypeId(1));
        assert_eq!(catalog.len(), 2);
        assert_eq!(catalog.get(a).map(|t| t.name.as_str()), Some("narrow gauge"));
        assert!(catalog.get(TrackTypeId(5)).is_none());
    }

    #[test]
    fn generator_dispatch() {
        let catalog = TrackCatalog::standard();
        let ballast = catalog.get(TrackTypeId(0)).unwrap();
        let elevated = catalog.get(TrackTypeId(2)).unwrap();
        assert_eq!(ballast.style, TrackStyle::Ballast);
        assert_eq!(elevated.style, TrackStyle::Elevated);

        assert_eq!(
            ballast.generators(ShapeKind::Straight),
            &[GeneratorKind::Straight]
        );
        assert_eq!(
            ballast.generators(ShapeKind::Circular),
            &[GeneratorKind::Circle]
        );
        assert_eq!(
            elevated.generators(ShapeKind::Straight),
            &[GeneratorKind::Straight, GeneratorKind::Support]
        );
        assert_eq!(
            elevated.generators(ShapeKind::Circular),
            &[GeneratorKind::Circle, GeneratorKind::Support]
        );
    }

    #[test]
    fn cost_scales_with_length() {
        let catalog = TrackCatalog::standard();
        let ty = catalog.get(TrackTypeId(0)).unwrap();
        assert!((ty.cost_of(100.0) - ty.cost_per_meter * 100.0).abs() < 1e-9);
        assert_eq!(ty.cost_of(0.0), 0.0);
    }

    #[test]
    fn labels() {
        assert_eq!(ShapeKind::Circular.to_string(), "circular");
        assert_eq!(GeneratorKind::Support.to_string(), "support");
    }
}
