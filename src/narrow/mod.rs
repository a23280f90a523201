//! Narrowphase data and logic module.

pub mod poly;

use crate::{vector::VecExt, Fp, Vec2};

// ---------- Point & Line ---------- //

#[inline]
pub fn seg_seg_test(a1: Vec2, a2: Vec2, b1: Vec2, b2: Vec2) -> bool {
    //! Returns whether a line segment-line segment intersection occurs. Touching endpoints count.
    let da = a2 - a1;
    let db = b2 - b1;

    let dot = da.x * db.y - db.x * da.y;
    if dot == 0.0 { return false; } // parallel or colinear, never reported

    let nd1 = a1 - b1;
    let t = da.perp_dot(nd1) / dot;
    if t < 0.0 || t > 1.0 { return false; }

    let u = db.perp_dot(nd1) / dot;
    u >= 0.0 && u <= 1.0
}

#[inline]
pub fn point_in_loop(point: Vec2, verts: &[Vec2]) -> bool {
    //! Even-odd ray cast toward +x. Edges are half-open in y, so a ray through a vertex counts once.
    let len = verts.len();
    if len < 3 { return false; }

    let mut inside = false;
    let mut j = len - 1;
    for i in 0..len {
        let (vi, vj) = (verts[i], verts[j]);
        if (vi.y > point.y) != (vj.y > point.y)
            && point.x < (vj.x - vi.x) * (point.y - vi.y) / (vj.y - vi.y) + vi.x
        {
            inside = !inside;
        }
        j = i;
    }
    inside
}

/// An edge of a polygon: indices of its two endpoints in the owner's vertex buffer.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Segment {
    pub a: usize,
    pub b: usize,
}
impl Segment {
    #[inline]
    pub fn new(a: usize, b: usize) -> Segment {
        Segment { a, b }
    }

    #[inline]
    pub fn points(self, verts: &[Vec2]) -> (Vec2, Vec2) {
        (verts[self.a], verts[self.b])
    }

    #[inline]
    pub fn move_first(self, verts: &mut [Vec2], velocity: Vec2, angle: Fp, pivot: Vec2) -> Vec2 {
        //! Moves only the first endpoint; the second moves when its own edge is visited.
        *verts[self.a].move_by(velocity, angle, pivot)
    }

    #[inline]
    pub fn intersects(self, verts: &[Vec2], other: Segment, other_verts: &[Vec2]) -> bool {
        let (a1, a2) = self.points(verts);
        let (b1, b2) = other.points(other_verts);
        seg_seg_test(a1, a2, b1, b2)
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Aabb {
    pub min: Vec2,
    pub max: Vec2,
}
impl Aabb {
    #[inline]
    pub fn new(minx: Fp, miny: Fp, maxx: Fp, maxy: Fp) -> Aabb {
        Aabb {
            min: Vec2::new(minx, miny),
            max: Vec2::new(maxx, maxy),
        }
    }
    #[inline]
    pub fn point(p: Vec2) -> Aabb {
        //! A zero-sized box at `p`, ready for folding.
        Aabb { min: p, max: p }
    }

    #[inline]
    pub fn fold(&mut self, p: Vec2) {
        self.min.fold_min(p);
        self.max.fold_max(p);
    }
    pub fn from_points(points: &[Vec2]) -> Option<Aabb> {
        let (first, rest) = points.split_first()?;
        let mut aabb = Aabb::point(*first);
        for p in rest {
            aabb.fold(*p);
        }
        Some(aabb)
    }

    #[inline]
    pub fn width(&self) -> Fp {
        self.max.x - self.min.x
    }
    #[inline]
    pub fn height(&self) -> Fp {
        self.max.y - self.min.y
    }

    #[inline]
    pub fn translate(self, offset: Vec2) -> Aabb {
        Aabb {
            min: self.min + offset,
            max: self.max + offset,
        }
    }

    #[inline]
    pub fn aabb_test(&self, other: &Aabb) -> bool {
        //! Closed-interval overlap; boxes sharing an edge overlap.
        self.min.x <= other.max.x
            && self.max.x >= other.min.x
            && self.min.y <= other.max.y
            && self.max.y >= other.min.y
    }
}
