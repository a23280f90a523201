use super::{check_for_collisions, regenerate_clones, succeed, view::Viewport};
use crate::{
    config::SimConfig,
    error::{SimError, SimResult},
    narrow::{poly::Polygon, Aabb},
    spawn::Spawner,
    vector::Motion,
    Vec2,
};
use fnv::FnvBuildHasher;
use indexmap::IndexMap;
use rand::Rng;
use std::fmt;
use tracing::{debug, trace};

/// Stable handle to a live polygon. Survives succession; never reused.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct PolygonId(u64);

impl fmt::Display for PolygonId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// Receives every instance drawn during a tick, primary first, then its clones.
pub trait Pen {
    fn draw(&mut self, id: PolygonId, instance: &Polygon);
}

/// Read-only copy of one drawn instance.
#[derive(Debug, Clone, PartialEq)]
pub struct InstanceFrame {
    pub verts: Vec<Vec2>,
    pub bounds: Option<Aabb>,
    pub in_contact: bool,
}

impl From<&Polygon> for InstanceFrame {
    fn from(poly: &Polygon) -> Self {
        InstanceFrame {
            verts: poly.verts().to_vec(),
            bounds: poly.bounds(),
            in_contact: poly.in_contact,
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct PolygonFrame {
    pub id: PolygonId,
    /// `instances[0]` is the primary.
    pub instances: Vec<InstanceFrame>,
}

/// Everything drawn during one tick, in slot order.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Frame {
    pub polygons: Vec<PolygonFrame>,
}

impl Frame {
    pub fn get(&self, id: PolygonId) -> Option<&PolygonFrame> {
        self.polygons.iter().find(|p| p.id == id)
    }
}

impl Pen for Frame {
    fn draw(&mut self, id: PolygonId, instance: &Polygon) {
        match self.polygons.last_mut() {
            Some(last) if last.id == id => last.instances.push(instance.into()),
            _ => self.polygons.push(PolygonFrame { id, instances: vec![instance.into()] }),
        }
    }
}

/// Host requests, applied between ticks.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Command {
    AddElement,
    RemoveElement,
    Resize(Aabb),
}

/// The live polygon collection inside its wrapping viewport.
#[derive(Debug, Clone)]
pub struct Cosmos {
    view: Viewport,
    table: IndexMap<PolygonId, Polygon, FnvBuildHasher>,
    spawner: Spawner,
    initial_count: usize,
    next_id: u64,
}

impl Cosmos {
    pub fn new(view: Viewport) -> Cosmos {
        Cosmos {
            view,
            table: IndexMap::default(),
            spawner: Spawner::default(),
            initial_count: SimConfig::default().initial_count,
            next_id: 0,
        }
    }

    pub fn with_config(config: &SimConfig) -> SimResult<Cosmos> {
        let view = Viewport::try_new(Aabb::new(0.0, 0.0, config.width, config.height))?;
        Ok(Cosmos {
            spawner: Spawner::from_config(&config.spawn)?,
            initial_count: config.initial_count,
            ..Cosmos::new(view)
        })
    }

    #[inline]
    pub fn view(&self) -> &Viewport {
        &self.view
    }
    #[inline]
    pub fn len(&self) -> usize {
        self.table.len()
    }
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.table.is_empty()
    }
    pub fn get(&self, id: PolygonId) -> Option<&Polygon> {
        self.table.get(&id)
    }
    pub fn ids(&self) -> impl Iterator<Item = PolygonId> + '_ {
        self.table.keys().copied()
    }
    pub fn iter(&self) -> impl Iterator<Item = (PolygonId, &Polygon)> {
        self.table.iter().map(|(id, p)| (*id, p))
    }

    // ---------- Population ---------- //

    pub fn spawn(&mut self, verts: Vec<Vec2>, motion: Option<Motion>) -> PolygonId {
        //! Adds a polygon at the back of the collection, with clones if it moves.
        let mut poly = Polygon::new(verts, motion);
        regenerate_clones(&mut poly, &self.view);

        let id = PolygonId(self.next_id);
        self.next_id += 1;
        debug!(%id, verts = poly.verts().len(), clones = poly.clones().len(), "spawned polygon");
        self.table.insert(id, poly);
        id
    }

    pub fn spawn_random<R: Rng + ?Sized>(&mut self, rng: &mut R) -> PolygonId {
        let (verts, motion) = self.spawner.generate(rng, &self.view);
        self.spawn(verts, Some(motion))
    }

    pub fn populate<R: Rng + ?Sized>(&mut self, rng: &mut R) -> Vec<PolygonId> {
        //! Spawns the configured initial number of random polygons.
        let mut ids = Vec::with_capacity(self.initial_count);
        for _ in 0..self.initial_count {
            ids.push(self.spawn_random(rng));
        }
        ids
    }

    pub fn remove(&mut self, id: PolygonId) -> SimResult<Polygon> {
        let poly = self.table.shift_remove(&id).ok_or(SimError::NotFound(id))?;
        debug!(%id, "removed polygon");
        Ok(poly)
    }

    pub fn remove_oldest(&mut self) -> Option<PolygonId> {
        let id = *self.table.keys().next()?;
        self.table.shift_remove(&id);
        debug!(%id, "removed oldest polygon");
        Some(id)
    }

    pub fn resize_viewport(&mut self, bounds: Aabb) -> SimResult<()> {
        //! Moves the viewport and rebuilds every polygon's clones for the new period.
        self.view = Viewport::try_new(bounds)?;
        for poly in self.table.values_mut() {
            regenerate_clones(poly, &self.view);
        }
        debug!(width = self.view.width(), height = self.view.height(), "resized viewport");
        Ok(())
    }

    pub fn apply<R: Rng + ?Sized>(&mut self, command: Command, rng: &mut R) -> SimResult<()> {
        match command {
            Command::AddElement => {
                self.spawn_random(rng);
            }
            Command::RemoveElement => {
                self.remove_oldest();
            }
            Command::Resize(bounds) => self.resize_viewport(bounds)?,
        }
        Ok(())
    }

    // ---------- Stepping ---------- //

    pub fn tick_with<P: Pen + ?Sized>(&mut self, pen: &mut P) {
        //! Steps the simulation once: flag contacts, draw and move every instance, then hand each
        //! primary over to a clone if one now straddles the viewport edge.
        let view = self.view;
        check_for_collisions(self.table.values_mut(), &view);

        for (id, poly) in self.table.iter_mut() {
            for instance in poly.family() {
                pen.draw(*id, instance);
            }
            poly.move_all();
            if succeed(poly, &view) {
                trace!(%id, "clone succeeded primary");
            }
        }
    }

    pub fn tick(&mut self) -> Frame {
        let mut frame = Frame::default();
        self.tick_with(&mut frame);
        frame
    }

    pub fn snapshot(&self) -> Frame {
        //! The current state of every instance, without stepping.
        let mut frame = Frame::default();
        for (id, poly) in self.table.iter() {
            for instance in poly.family() {
                frame.draw(*id, instance);
            }
        }
        frame
    }
}
