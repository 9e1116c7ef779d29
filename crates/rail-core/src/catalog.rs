//! Track-type descriptors and mesh-generator dispatch.
//!
//! A [`TrackType`] carries the physical constants that the geometry solver
//! and downstream consumers (pathfinding, economy, rendering) read for one
//! class of track.  Pieces reference their type by [`TrackTypeId`]; the
//! application owns the [`TrackCatalog`] that resolves those ids.
//!
//! Mesh generation itself is the render layer's job.  This module only
//! answers *which* generators a piece needs, as a closed capability set
//! dispatched on explicit tags: adding a generator means adding a variant
//! here and handling it in every `match`, which the compiler enforces.

use std::fmt;

use crate::TrackTypeId;

/// Coarse classification of a solved shape, used for generator dispatch.
#[derive(Copy, Clone, PartialEq, Eq, Hash, Debug)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum ShapeKind {
    Straight,
    Circular,
}

impl ShapeKind {
    pub fn as_str(self) -> &'static str {
        match self {
            ShapeKind::Straight => "straight",
            ShapeKind::Circular => "circular",
        }
    }
}

impl fmt::Display for ShapeKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One mesh-generation capability the render layer can execute for a piece.
#[derive(Copy, Clone, PartialEq, Eq, Hash, Debug)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum GeneratorKind {
    /// Extrude the rail profile along a straight segment.
    Straight,
    /// Extrude the rail profile along a circular arc.
    Circle,
    /// Place support pylons under the deck at regular intervals.
    Support,
}

impl GeneratorKind {
    pub fn as_str(self) -> &'static str {
        match self {
            GeneratorKind::Straight => "straight",
            GeneratorKind::Circle   => "circle",
            GeneratorKind::Support  => "support",
        }
    }
}

impl fmt::Display for GeneratorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Physical construction style of a track class.
#[derive(Copy, Clone, PartialEq, Eq, Hash, Debug, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum TrackStyle {
    /// Conventional track on a ballast bed at grade.
    #[default]
    Ballast,
    /// Track on an elevated deck that needs support pylons.
    Elevated,
}

/// Physical constants for one class of track.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct TrackType {
    pub id: TrackTypeId,
    pub name: String,
    /// Minimum turn radius in metres; the arc solver rejects tighter fits.
    pub min_radius: f64,
    /// Construction cost per metre of track.
    pub cost_per_meter: f64,
    /// Speed limit in metres per second.
    pub max_speed: f64,
    pub style: TrackStyle,
}

impl TrackType {
    /// Cost of building `length` metres of this track class.
    #[inline]
    pub fn cost_of(&self, length: f64) -> f64 {
        self.cost_per_meter * length
    }

    /// Generators the render layer must run for a piece of this class with
    /// the given shape.  Elevated styles append pylon supports.
    pub fn generators(&self, shape: ShapeKind) -> &'static [GeneratorKind] {
        use GeneratorKind::{Circle, Straight, Support};
        match (self.style, shape) {
            (TrackStyle::Ballast, ShapeKind::Straight)  => &[Straight],
            (TrackStyle::Ballast, ShapeKind::Circular)  => &[Circle],
            (TrackStyle::Elevated, ShapeKind::Straight) => &[Straight, Support],
            (TrackStyle::Elevated, ShapeKind::Circular) => &[Circle, Support],
        }
    }
}

/// Registry of track classes, indexed by [`TrackTypeId`].
///
/// Ids are assigned densely in registration order and never reused, so the
/// catalog is append-only for the lifetime of a save.
#[derive(Clone, Debug, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct TrackCatalog {
    types: Vec<TrackType>,
}

impl TrackCatalog {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a track class and return its assigned id.
    pub fn register(
        &mut self,
        name: impl Into<String>,
        min_radius: f64,
        cost_per_meter: f64,
        max_speed: f64,
        style: TrackStyle,
    ) -> TrackTypeId {
        let id = TrackTypeId(self.types.len() as u16);
        self.types.push(TrackType {
            id,
            name: name.into(),
            min_radius,
            cost_per_meter,
            max_speed,
            style,
        });
        id
    }

    #[inline]
    pub fn get(&self, id: TrackTypeId) -> Option<&TrackType> {
        self.types.get(id.index())
    }

    pub fn len(&self) -> usize {
        self.types.len()
    }

    pub fn is_empty(&self) -> bool {
        self.types.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &TrackType> {
        self.types.iter()
    }

    /// Starter catalog with plausible constants for the three stock classes.
    /// Applications normally build their own from game data instead.
    pub fn standard() -> Self {
        let mut catalog = Self::new();
        catalog.register("standard", 75.0, 22.0, 44.4, TrackStyle::Ballast);
        catalog.register("high speed", 300.0, 45.0, 83.3, TrackStyle::Ballast);
        catalog.register("viaduct", 75.0, 90.0, 44.4, TrackStyle::Elevated);
        catalog
    }
}
