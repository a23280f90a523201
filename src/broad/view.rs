use crate::{
    error::{SimError, SimResult},
    narrow::{poly::Polygon, Aabb},
    Fp, Vec2,
};
use rand::Rng;

/// The visible region, and the period of the toroidal wrap.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Viewport {
    pub bounds: Aabb,
}

impl Viewport {
    #[inline]
    pub fn new(minx: Fp, miny: Fp, maxx: Fp, maxy: Fp) -> Viewport {
        Viewport { bounds: Aabb::new(minx, miny, maxx, maxy) }
    }
    pub fn sized(width: Fp, height: Fp) -> Viewport {
        Viewport::new(0.0, 0.0, width, height)
    }
    pub fn try_new(bounds: Aabb) -> SimResult<Viewport> {
        let (width, height) = (bounds.width(), bounds.height());
        if width.is_finite() && height.is_finite() && width >= 0.0 && height >= 0.0 {
            Ok(Viewport { bounds })
        } else {
            Err(SimError::InvalidViewport { width, height })
        }
    }

    #[inline]
    pub fn width(&self) -> Fp {
        self.bounds.width()
    }
    #[inline]
    pub fn height(&self) -> Fp {
        self.bounds.height()
    }

    pub fn has_lost(&self, poly: &Polygon) -> bool {
        //! Whether the polygon's bounds lie wholly outside the viewport. Boxless polygons are lost.
        let Aabb { min, max } = match poly.bounds() {
            Some(aabb) => aabb,
            None => return true,
        };
        let Aabb { min: vmin, max: vmax } = self.bounds;
        max.x <= vmin.x || max.y <= vmin.y || min.x >= vmax.x || min.y >= vmax.y
    }

    pub fn contains(&self, poly: &Polygon) -> bool {
        //! Whether the polygon's bounds lie strictly inside the viewport.
        let Aabb { min, max } = match poly.bounds() {
            Some(aabb) => aabb,
            None => return false,
        };
        let Aabb { min: vmin, max: vmax } = self.bounds;
        min.x > vmin.x && min.y > vmin.y && max.x < vmax.x && max.y < vmax.y
    }

    #[inline]
    pub fn has_overlapping(&self, poly: &Polygon) -> bool {
        //! Whether the polygon straddles a viewport edge.
        !self.has_lost(poly) && !self.contains(poly)
    }

    pub fn random_location<R: Rng + ?Sized>(&self, rng: &mut R) -> Vec2 {
        let min = self.bounds.min;
        Vec2::new(min.x + rng.gen::<Fp>() * self.width(), min.y + rng.gen::<Fp>() * self.height())
    }

    pub fn clone_offsets(&self) -> [Vec2; 8] {
        //! The eight periodic offsets surrounding the viewport, `dx`-major from `(-1, -1)`.
        let (w, h) = (self.width(), self.height());
        let mut offsets = [Vec2::ZERO; 8];
        let mut i = 0;
        for dx in -1i8..=1 {
            for dy in -1i8..=1 {
                if dx == 0 && dy == 0 {
                    continue;
                }
                offsets[i] = Vec2::new(w * Fp::from(dx), h * Fp::from(dy));
                i += 1;
            }
        }
        offsets
    }
}
