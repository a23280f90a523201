//! Random polygon generation. Randomness is always supplied by the caller.

use crate::{
    broad::view::Viewport,
    config::SpawnConfig,
    vector::{Motion, Pivot},
    error::{SimError, SimResult},
    Fp, Vec2, PI,
};
use rand::Rng;

#[derive(Debug, Clone, PartialEq)]
pub struct Spawner {
    vertices: (usize, usize),
    radius: (Fp, Fp),
    max_speed: Fp,
    max_angle: Fp,
}

impl Default for Spawner {
    fn default() -> Self {
        Spawner::ordered(&SpawnConfig::default())
    }
}

impl Spawner {
    pub fn from_config(config: &SpawnConfig) -> SimResult<Spawner> {
        //! Rejects non-finite radii, speeds and angles. Reversed ranges are reordered rather than rejected.
        let fields = [
            ("min_radius", config.min_radius),
            ("max_radius", config.max_radius),
            ("max_speed", config.max_speed),
            ("max_angle", config.max_angle),
        ];
        if let Some(&(field, value)) = fields.iter().find(|(_, v)| !v.is_finite()) {
            return Err(SimError::InvalidSpawn { field, value });
        }
        Ok(Spawner::ordered(config))
    }

    fn ordered(config: &SpawnConfig) -> Spawner {
        let ordered_usize = |a: usize, b: usize| if a <= b { (a, b) } else { (b, a) };
        let ordered_fp = |a: Fp, b: Fp| if a <= b { (a, b) } else { (b, a) };
        Spawner {
            vertices: ordered_usize(config.min_vertices, config.max_vertices),
            radius: ordered_fp(config.min_radius, config.max_radius),
            max_speed: config.max_speed.abs(),
            max_angle: config.max_angle.abs(),
        }
    }

    pub fn vertices<R: Rng + ?Sized>(&self, rng: &mut R, center: Vec2) -> Vec<Vec2> {
        //! A star-shaped loop around `center`: evenly spaced angles, each radius jittered by up to 50%.
        let count = rng.gen_range(self.vertices.0..=self.vertices.1);
        // continuous draw, never rounded
        let radius = rng.gen_range(self.radius.0..=self.radius.1);
        let separation = 2.0 * PI / count as Fp;

        (0..count)
            .map(|i| {
                let angle = separation * (i + 1) as Fp;
                let variance = 1.5 - rng.gen::<Fp>();
                center + Vec2::new(angle.cos(), angle.sin()) * (variance * radius)
            })
            .collect()
    }

    pub fn motion<R: Rng + ?Sized>(&self, rng: &mut R) -> Motion {
        let mut signed = |scale: Fp| {
            let sign = if rng.gen::<bool>() { 1.0 } else { -1.0 };
            sign * rng.gen::<Fp>() * scale
        };
        let velocity = Vec2::new(signed(self.max_speed), signed(self.max_speed));
        let angle = signed(self.max_angle);
        Motion::new(velocity, angle, Pivot::Centroid)
    }

    pub fn generate<R: Rng + ?Sized>(&self, rng: &mut R, view: &Viewport) -> (Vec<Vec2>, Motion) {
        let center = view.random_location(rng);
        let verts = self.vertices(rng, center);
        (verts, self.motion(rng))
    }
}
