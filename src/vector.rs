//! In-place vector motion and the per-polygon motion settings.

use crate::{Fp, Vec2};

/// Chaining, in-place helpers over the crate vector type.
pub trait VecExt {
    fn translate(&mut self, offset: Vec2) -> &mut Self;
    fn rotate(&mut self, angle: Fp, pivot: Vec2) -> &mut Self;
    fn fold_min(&mut self, other: Vec2) -> &mut Self;
    fn fold_max(&mut self, other: Vec2) -> &mut Self;
    fn divide(&mut self, scalar: Fp) -> &mut Self;

    fn move_by(&mut self, velocity: Vec2, angle: Fp, pivot: Vec2) -> &mut Self {
        //! Translates by `velocity`, then rotates by `angle` radians about `pivot`.
        self.translate(velocity).rotate(angle, pivot)
    }
}

impl VecExt for Vec2 {
    #[inline]
    fn translate(&mut self, offset: Vec2) -> &mut Self {
        *self += offset;
        self
    }

    #[inline]
    fn rotate(&mut self, angle: Fp, pivot: Vec2) -> &mut Self {
        //! Rotates counterclockwise (y-up) about `pivot`. A zero angle leaves the bits untouched.
        if angle == 0.0 {
            return self;
        }

        let (sin, cos) = angle.sin_cos();
        let d = *self - pivot;
        *self = Vec2::new(pivot.x + d.x * cos - d.y * sin, pivot.y + d.x * sin + d.y * cos);
        self
    }

    #[inline]
    fn fold_min(&mut self, other: Vec2) -> &mut Self {
        *self = self.min(other);
        self
    }
    #[inline]
    fn fold_max(&mut self, other: Vec2) -> &mut Self {
        *self = self.max(other);
        self
    }

    #[inline]
    fn divide(&mut self, scalar: Fp) -> &mut Self {
        if scalar != 0.0 {
            *self /= scalar;
        }
        self
    }
}

/// The point a moving polygon spins around.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Pivot {
    /// The polygon's own centroid, tracked through motion.
    Centroid,
    /// A fixed point in world space.
    Point(Vec2),
}

impl Default for Pivot {
    fn default() -> Self {
        Pivot::Centroid
    }
}

/// Per-tick displacement and spin of a polygon.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Motion {
    pub velocity: Vec2,
    /// Radians per tick.
    pub angle: Fp,
    pub pivot: Pivot,
}

impl Motion {
    pub fn new(velocity: Vec2, angle: Fp, pivot: Pivot) -> Motion {
        Motion { velocity, angle, pivot }
    }
    pub fn translating(velocity: Vec2) -> Motion {
        Motion { velocity, angle: 0.0, pivot: Pivot::Centroid }
    }
    pub fn spinning(angle: Fp) -> Motion {
        Motion { velocity: Vec2::ZERO, angle, pivot: Pivot::Centroid }
    }

    pub fn resolve_pivot(&self, centroid: Vec2) -> Vec2 {
        match self.pivot {
            Pivot::Centroid => centroid,
            Pivot::Point(p) => p,
        }
    }

    /// Returns a copy whose fixed pivot, if any, is shifted by `offset`.
    pub fn translated(self, offset: Vec2) -> Motion {
        match self.pivot {
            Pivot::Centroid => self,
            Pivot::Point(p) => Motion { pivot: Pivot::Point(p + offset), ..self },
        }
    }
}
