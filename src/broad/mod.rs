//! Broadphase: toroidal replication, per-tick contact flagging and clone succession.
//!
//! Every polygon is tested against every other; collections are expected to stay small.

pub mod cosmos;
pub mod view;

use crate::narrow::poly::Polygon;
use tracing::trace;
use view::Viewport;

pub fn regenerate_clones(poly: &mut Polygon, view: &Viewport) {
    //! Discards the polygon's clones and rebuilds its eight periodic images.
    //! Static and degenerate polygons get none.
    poly.clear_clones();
    if poly.motion().is_none() || poly.is_degenerate() {
        return;
    }

    for offset in view.clone_offsets().iter() {
        poly.push_clone(*offset);
    }
}

pub fn instance_set<'a>(poly: &'a Polygon, view: &Viewport) -> Vec<&'a Polygon> {
    //! The polygon and its clones, minus those wholly outside the viewport.
    poly.family().filter(|p| !view.has_lost(p)).collect()
}

pub fn sets_touch(set: &[&Polygon], other: &[&Polygon]) -> bool {
    set.iter().any(|a| other.iter().any(|b| Polygon::are_touching(a, b)))
}

pub fn check_for_collisions<'a, I>(polys: I, view: &Viewport) -> usize
where
    I: IntoIterator<Item = &'a mut Polygon>,
{
    //! Clears every contact flag, then flags the instance set of each polygon touching another.
    //! Lost instances are never flagged. Returns the number of polygons in contact.
    let mut polys: Vec<&mut Polygon> = polys.into_iter().collect();
    for p in polys.iter_mut() {
        p.unflag_family();
    }

    let touched = {
        let sets: Vec<Vec<&Polygon>> = polys.iter().map(|p| instance_set(p, view)).collect();
        let mut touched = vec![false; sets.len()];
        for i in 0..sets.len() {
            for j in (i + 1)..sets.len() {
                if touched[i] && touched[j] {
                    continue;
                }
                if sets_touch(&sets[i], &sets[j]) {
                    touched[i] = true;
                    touched[j] = true;
                }
            }
        }
        touched
    };

    let mut count = 0;
    for (p, hit) in polys.iter_mut().zip(touched) {
        if hit {
            p.flag_family_where(|instance| !view.has_lost(instance));
            count += 1;
        }
    }
    trace!(polygons = polys.len(), in_contact = count, "collision pass");
    count
}

pub fn succeed(poly: &mut Polygon, view: &Viewport) -> bool {
    //! Promotes the first clone straddling the viewport edge to primary, with fresh clones.
    let index = match poly.clones().iter().position(|c| view.has_overlapping(c)) {
        Some(index) => index,
        None => return false,
    };

    if let Some(mut successor) = poly.take_clone(index) {
        regenerate_clones(&mut successor, view);
        *poly = successor;
        true
    } else {
        false
    }
}
