//! A toroidal polygon contact simulation.
//!
//! Polygons drift and spin inside a viewport that wraps at its edges. Each live polygon
//! carries eight translated clones so that shapes crossing a boundary can be tested and
//! drawn on both sides. When two polygons touch, every instance of either that is in view
//! is flagged as in contact.
//!
//! ```
//! use toroidal::{Cosmos, Motion, Vec2, broad::view::Viewport};
//!
//! let mut cosmos = Cosmos::new(Viewport::new(0.0, 0.0, 100.0, 100.0));
//! let motion = Motion::translating(Vec2::new(1.0, 0.0));
//! cosmos.spawn(vec![Vec2::new(10.0, 10.0), Vec2::new(10.0, 20.0), Vec2::new(20.0, 20.0)], Some(motion));
//! let frame = cosmos.tick();
//! assert_eq!(frame.polygons.len(), 1);
//! ```

pub mod broad;
pub mod config;
pub mod error;
pub mod narrow;
pub mod spawn;
pub mod vector;

#[cfg(not(feature = "f64"))]
pub type Fp = f32;
#[cfg(not(feature = "f64"))]
pub type Vec2 = glam::Vec2;

#[cfg(feature = "f64")]
pub type Fp = f64;
#[cfg(feature = "f64")]
pub type Vec2 = glam::DVec2;

#[cfg(not(feature = "f64"))]
pub use std::f32::consts::PI;
#[cfg(feature = "f64")]
pub use std::f64::consts::PI;

pub use broad::cosmos::{Command, Cosmos, Frame, InstanceFrame, Pen, PolygonFrame, PolygonId};
pub use config::{SimConfig, SpawnConfig};
pub use error::{SimError, SimResult};
pub use narrow::{poly::Polygon, Aabb, Segment};
pub use vector::{Motion, Pivot, VecExt};
