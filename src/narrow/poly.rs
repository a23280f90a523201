use super::{point_in_loop, Aabb, Segment};
use crate::{
    vector::{Motion, VecExt},
    Vec2,
};

/// A 2D polygon, convex or not, with its toroidal clones.
///
/// Edges index into `verts`, so moving a vertex moves both edges that share it.
/// Fewer than three vertices produce an inert polygon: no edges, no bounds, never touching.
#[derive(Debug, Clone, PartialEq)]
pub struct Polygon {
    verts: Vec<Vec2>,
    /// Mean of the initial vertices, then carried along by motion.
    centroid: Vec2,
    aabb: Option<Aabb>,
    /// `edges[i]` joins `verts[i]` to `verts[(i + 1) % len]`.
    edges: Vec<Segment>,
    motion: Option<Motion>,
    clones: Vec<Polygon>,
    pub in_contact: bool,
}

impl Polygon {
    pub fn new(verts: Vec<Vec2>, motion: Option<Motion>) -> Polygon {
        let mut poly = Polygon {
            verts,
            centroid: Vec2::ZERO,
            aabb: None,
            edges: Vec::new(),
            motion,
            clones: Vec::new(),
            in_contact: false,
        };
        if poly.verts.len() > 2 {
            poly.init_components();
        }
        poly
    }

    fn init_components(&mut self) {
        let len = self.verts.len();
        self.edges.reserve_exact(len);
        for i in 0..len {
            let v = self.verts[i];

            self.centroid += v;
            if i == len - 1 {
                self.centroid.divide(len as _);
            }

            self.fold_bounds(v);
            self.edges.push(Segment::new(i, (i + 1) % len));
        }
    }

    #[inline]
    fn fold_bounds(&mut self, v: Vec2) {
        self.aabb = Some(match self.aabb {
            Some(mut aabb) => {
                aabb.fold(v);
                aabb
            }
            None => Aabb::point(v),
        });
    }

    #[inline]
    pub fn verts(&self) -> &[Vec2] {
        &self.verts
    }
    #[inline]
    pub fn edges(&self) -> &[Segment] {
        &self.edges
    }
    #[inline]
    pub fn centroid(&self) -> Vec2 {
        self.centroid
    }
    #[inline]
    pub fn bounds(&self) -> Option<Aabb> {
        self.aabb
    }
    #[inline]
    pub fn motion(&self) -> Option<Motion> {
        self.motion
    }
    #[inline]
    pub fn clones(&self) -> &[Polygon] {
        &self.clones
    }
    #[inline]
    pub fn is_degenerate(&self) -> bool {
        self.edges.is_empty()
    }

    /// Iterates the polygon itself followed by each of its clones.
    pub fn family(&self) -> impl Iterator<Item = &Polygon> {
        std::iter::once(self).chain(self.clones.iter())
    }

    // ---------- Motion ---------- //

    pub fn move_components(&mut self) {
        //! Applies one tick of motion to this polygon alone, refolding its bounds.
        let motion = match self.motion {
            Some(m) if !self.is_degenerate() => m,
            _ => return,
        };

        self.aabb = None;
        // a centroid pivot is taken after translation, so the centroid never orbits itself
        let pivot = motion.resolve_pivot(self.centroid + motion.velocity);
        self.centroid.move_by(motion.velocity, motion.angle, pivot);

        for i in 0..self.edges.len() {
            let moved = self.edges[i].move_first(&mut self.verts, motion.velocity, motion.angle, pivot);
            self.fold_bounds(moved);
        }
    }

    pub fn move_all(&mut self) {
        //! Moves the polygon and then each clone, independently.
        self.move_components();
        for clone in self.clones.iter_mut() {
            clone.move_components();
        }
    }

    // ---------- Clones ---------- //

    pub fn clone_translated(&self, offset: Vec2) -> Polygon {
        //! Builds a periodic image of this polygon. The image has no clones of its own.
        let verts = self.verts.iter().map(|v| *v + offset).collect();
        let mut clone = Polygon::new(verts, self.motion.map(|m| m.translated(offset)));
        clone.in_contact = self.in_contact;
        clone
    }

    pub fn push_clone(&mut self, offset: Vec2) -> &Polygon {
        let clone = self.clone_translated(offset);
        self.clones.push(clone);
        &self.clones[self.clones.len() - 1]
    }

    #[inline]
    pub fn clear_clones(&mut self) {
        self.clones.clear();
    }

    pub fn take_clone(&mut self, index: usize) -> Option<Polygon> {
        //! Removes the clone at `index`, discarding its siblings.
        if index < self.clones.len() {
            Some(std::mem::take(&mut self.clones).swap_remove(index))
        } else {
            None
        }
    }

    // ---------- Contact ---------- //

    pub fn intersects(&self, other: &Polygon) -> bool {
        //! Whether any edge of `self` crosses or touches any edge of `other`.
        self.edges.iter().any(|e| other.edges.iter().any(|o| e.intersects(&self.verts, *o, &other.verts)))
    }

    pub fn inside(&self, other: &Polygon) -> bool {
        //! Whether any vertex of `self` lies within `other`.
        self.verts.iter().any(|v| point_in_loop(*v, &other.verts))
    }

    #[inline]
    pub fn point_test(&self, point: Vec2) -> bool {
        !self.is_degenerate() && point_in_loop(point, &self.verts)
    }

    pub fn are_touching(a: &Polygon, b: &Polygon) -> bool {
        let (ab, bb) = match (a.aabb, b.aabb) {
            (Some(ab), Some(bb)) if !a.is_degenerate() && !b.is_degenerate() => (ab, bb),
            _ => return false,
        };
        if !ab.aabb_test(&bb) {
            return false;
        }
        a.intersects(b) || a.inside(b) || b.inside(a)
    }

    #[inline]
    pub fn flag(&mut self) {
        self.in_contact = true;
    }
    #[inline]
    pub fn unflag(&mut self) {
        self.in_contact = false;
    }

    pub fn flag_all<'a, I: IntoIterator<Item = &'a mut Polygon>>(polys: I) {
        for p in polys {
            p.flag();
        }
    }
    pub fn unflag_all<'a, I: IntoIterator<Item = &'a mut Polygon>>(polys: I) {
        for p in polys {
            p.unflag();
        }
    }

    pub fn flag_family(&mut self) {
        self.flag();
        Polygon::flag_all(self.clones.iter_mut());
    }
    pub fn unflag_family(&mut self) {
        self.unflag();
        Polygon::unflag_all(self.clones.iter_mut());
    }

    pub fn flag_family_where<F: FnMut(&Polygon) -> bool>(&mut self, mut pred: F) -> usize {
        //! Flags the polygon and each clone that satisfy `pred`. Returns how many were flagged.
        let mut count = 0;
        if pred(self) {
            self.flag();
            count += 1;
        }
        for clone in self.clones.iter_mut() {
            if pred(clone) {
                clone.flag();
                count += 1;
            }
        }
        count
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{vector::Pivot, Fp};
    use approx::assert_abs_diff_eq;

    fn square(x: Fp, y: Fp, size: Fp) -> Vec<Vec2> {
        vec![Vec2::new(x, y), Vec2::new(x, y + size), Vec2::new(x + size, y + size), Vec2::new(x + size, y)]
    }

    #[test]
    fn construction() {
        let p = Polygon::new(square(0.0, 0.0, 1.0), None);
        assert_eq!(p.edges().len(), p.verts().len());
        assert_eq!(p.edges()[3], Segment::new(3, 0));
        assert_eq!(p.centroid(), Vec2::new(0.5, 0.5));
        assert_eq!(p.bounds(), Some(Aabb::new(0.0, 0.0, 1.0, 1.0)));
        assert!(!p.in_contact);
    }

    #[test]
    fn degenerate_is_inert() {
        let mut p = Polygon::new(vec![Vec2::new(0.0, 0.0), Vec2::new(1.0, 1.0)], Some(Motion::translating(Vec2::new(1.0, 0.0))));
        assert!(p.is_degenerate());
        assert!(p.bounds().is_none());
        assert!(p.edges().is_empty());
        p.move_all();
        assert_eq!(p.verts()[0], Vec2::new(0.0, 0.0));

        let big = Polygon::new(square(-5.0, -5.0, 10.0), None);
        assert!(!Polygon::are_touching(&p, &big));
        assert!(!Polygon::are_touching(&big, &p));
    }

    #[test]
    fn clone_translates_every_vertex() {
        let mut p = Polygon::new(vec![Vec2::new(0.3, 0.1), Vec2::new(0.9, 0.7), Vec2::new(0.2, 0.8)], None);
        p.in_contact = true;
        let offset = Vec2::new(0.37, 0.91);
        let clone = p.push_clone(offset).clone();

        assert_eq!(p.clones().len(), 1);
        assert!(clone.in_contact);
        assert!(clone.clones().is_empty());
        for (c, v) in clone.verts().iter().zip(p.verts()) {
            assert_eq!(c.x, v.x + offset.x);
            assert_eq!(c.y, v.y + offset.y);
        }
    }

    #[test]
    fn touching() {
        let enclosing = Polygon::new(square(0.0, 0.0, 1.0), None);
        let excluding = Polygon::new(square(2.0, 2.0, 1.0), None);
        let intersecting = Polygon::new(square(0.5, 0.5, 1.0), None);
        let enclosed = Polygon::new(vec![Vec2::new(0.2, 0.2), Vec2::new(0.4, 0.7), Vec2::new(0.7, 0.3)], None);

        assert!(Polygon::are_touching(&enclosing, &intersecting));
        assert!(Polygon::are_touching(&enclosing, &enclosed));
        assert!(Polygon::are_touching(&enclosed, &enclosing));
        assert!(!Polygon::are_touching(&enclosing, &excluding));

        assert!(enclosing.intersects(&intersecting));
        assert!(!enclosing.intersects(&enclosed));
        assert!(enclosed.inside(&enclosing));
        assert!(!enclosing.inside(&enclosed));
    }

    #[test]
    fn shared_vertex_touches() {
        let a = Polygon::new(square(0.0, 0.0, 1.0), None);
        let b = Polygon::new(square(1.0, 1.0, 1.0), None);
        assert!(Polygon::are_touching(&a, &b));
    }

    #[test]
    fn flags() {
        let mut p = Polygon::new(square(0.0, 0.0, 1.0), None);
        p.unflag();
        assert!(!p.in_contact);
        p.flag();
        assert!(p.in_contact);

        let mut polys = vec![p.clone(), p.clone(), p];
        Polygon::unflag_all(polys.iter_mut());
        assert!(polys.iter().all(|p| !p.in_contact));
        Polygon::flag_all(polys.iter_mut());
        assert!(polys.iter().all(|p| p.in_contact));
    }

    #[test]
    fn translation_moves_centroid_exactly() {
        let velocity = Vec2::new(1.5, -0.25);
        let mut p = Polygon::new(square(0.0, 0.0, 2.0), Some(Motion::translating(velocity)));
        let before = p.verts().to_vec();
        let c = p.centroid();
        p.move_all();

        assert_eq!(p.centroid(), c + velocity);
        for (v, b) in p.verts().iter().zip(before.iter()) {
            assert_eq!(*v, *b + velocity);
        }
        assert_eq!(p.bounds(), Some(Aabb::new(1.5, -0.25, 3.5, 1.75)));
    }

    #[test]
    fn rotation_is_rigid() {
        let verts = vec![Vec2::new(0.0, 0.0), Vec2::new(1.0, 3.0), Vec2::new(4.0, 2.5), Vec2::new(3.0, -1.0), Vec2::new(1.5, 0.5)];
        let mut p = Polygon::new(verts, Some(Motion::new(Vec2::new(0.5, 0.5), 0.3, Pivot::Centroid)));
        let c0 = p.centroid();
        let dists: Vec<Fp> = p.verts().iter().map(|v| v.distance(c0)).collect();

        for _ in 0..10 {
            p.move_all();
        }

        let c = p.centroid();
        assert_abs_diff_eq!(c.x, c0.x + 5.0, epsilon = 1e-4);
        assert_abs_diff_eq!(c.y, c0.y + 5.0, epsilon = 1e-4);
        for (v, d) in p.verts().iter().zip(dists) {
            assert_abs_diff_eq!(v.distance(c), d, epsilon = 1e-3);
        }

        let b = p.bounds().unwrap();
        let expected = Aabb::from_points(p.verts()).unwrap();
        assert_eq!(b, expected);
    }

    #[test]
    fn fixed_pivot_orbits() {
        let mut p = Polygon::new(square(4.0, -1.0, 2.0), Some(Motion::new(Vec2::ZERO, crate::PI, Pivot::Point(Vec2::ZERO))));
        p.move_components();
        let c = p.centroid();
        assert_abs_diff_eq!(c.x, -5.0, epsilon = 1e-4);
        assert_abs_diff_eq!(c.y, 0.0, epsilon = 1e-4);
    }

    #[test]
    fn static_polygon_does_not_move() {
        let mut p = Polygon::new(square(0.0, 0.0, 1.0), None);
        let before = p.clone();
        p.move_all();
        assert_eq!(p, before);
    }

    #[test]
    fn clones_move_in_lockstep() {
        let velocity = Vec2::new(1.0, 2.0);
        let mut p = Polygon::new(square(0.0, 0.0, 1.0), Some(Motion::translating(velocity)));
        p.push_clone(Vec2::new(10.0, 0.0));
        p.push_clone(Vec2::new(0.0, -10.0));
        p.move_all();

        assert_eq!(p.clones()[0].verts()[0], Vec2::new(11.0, 2.0));
        assert_eq!(p.clones()[1].verts()[0], Vec2::new(1.0, -8.0));
    }

    #[test]
    fn take_clone_drops_siblings() {
        let mut p = Polygon::new(square(0.0, 0.0, 1.0), Some(Motion::translating(Vec2::ZERO)));
        p.push_clone(Vec2::new(10.0, 0.0));
        p.push_clone(Vec2::new(20.0, 0.0));
        let taken = p.take_clone(1).unwrap();
        assert_eq!(taken.verts()[0], Vec2::new(20.0, 0.0));
        assert!(p.clones().is_empty());
        assert!(p.take_clone(0).is_none());
    }
}
