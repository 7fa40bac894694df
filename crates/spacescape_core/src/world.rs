//! Scene composition
//!
//! The [`World`] exclusively owns every entity: the torus knot, the sun, the
//! starfield, the orbital bodies, the butterfly swarm and the deferred
//! astronaut. It advances them all in [`World::tick`] and exposes the union
//! of their renderable state. It never talks to the renderer itself.

use spacescape_math::{mat4, Mat4, Vec3};

use crate::astronaut::Astronaut;
use crate::butterfly::{Swarm, WingSide};
use crate::deferred::Deferred;
use crate::geometry::Geometry;
use crate::material::MaterialDesc;
use crate::orbit::OrbitalSystem;
use crate::primary::PrimaryMesh;
use crate::rng::{RngExt, SceneRng};
use crate::scene::{SceneError, SceneLayout};
use crate::starfield::StarField;
use crate::tunables::MotionTunables;

/// Scale of a planet's glow shell relative to the planet
const GLOW_SCALE: f32 = 1.1;

/// Identifies one drawable part of the scene
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum RenderSlot {
    Knot,
    Sun,
    Stars,
    Planet(usize),
    PlanetGlow(usize),
    Wing { butterfly: usize, side: WingSide },
    Astronaut,
}

/// A mesh the renderer has to create at setup
#[derive(Clone, Debug, PartialEq)]
pub struct MeshRequest {
    pub slot: RenderSlot,
    pub geometry: Geometry,
    pub material: MaterialDesc,
}

/// Current model matrix of one slot
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Renderable {
    pub slot: RenderSlot,
    pub model: Mat4,
}

/// Container for every entity in the vignette
pub struct World {
    layout: SceneLayout,
    tunables: MotionTunables,
    rng: SceneRng,
    knot: PrimaryMesh,
    stars: StarField,
    planets: OrbitalSystem,
    planet_hues: Vec<f32>,
    swarm: Swarm,
    astronaut: Deferred<Astronaut>,
    elapsed: f32,
    ticks: u64,
}

impl World {
    /// Build the world described by `layout`
    ///
    /// Rejects malformed layouts with [`SceneError::Invalid`]. All random
    /// draws come from `rng`, in a fixed order: stars, planet tints, swarm.
    pub fn from_layout(
        layout: SceneLayout,
        tunables: MotionTunables,
        mut rng: SceneRng,
    ) -> Result<Self, SceneError> {
        layout.validate()?;

        let stars = StarField::generate(
            layout.stars.count,
            layout.stars.extent,
            &layout.stars.colors,
            &mut rng,
        );
        let planets = OrbitalSystem::from_specs(&layout.planets);
        let planet_hues = (0..planets.len())
            .map(|_| rng.random_f32(0.05, 0.15))
            .collect();
        let swarm = Swarm::spawn(layout.butterflies.count, &layout.butterflies.spawn, &mut rng);

        log::info!(
            "Built scene '{}': {} planets, {} stars, {} butterflies (seed {})",
            layout.name,
            planets.len(),
            stars.len(),
            swarm.len(),
            rng.seed()
        );

        let mut world = Self {
            layout,
            tunables,
            rng,
            knot: PrimaryMesh::new(),
            stars,
            planets,
            planet_hues,
            swarm,
            astronaut: Deferred::Unloaded,
            elapsed: 0.0,
            ticks: 0,
        };
        world.planets.update(0.0, world.tunables.orbit_rate, 0.0);
        Ok(world)
    }

    /// Advance every entity by one tick
    ///
    /// Orbital positions depend only on `elapsed` (seconds). Per-tick
    /// increments (spins, wing phase, flight) ignore `_dt`. Never fails; an
    /// unloaded astronaut is skipped.
    pub fn tick(&mut self, elapsed: f32, _dt: f32) {
        let t = &self.tunables;
        self.elapsed = elapsed;
        self.ticks += 1;

        self.planets.update(elapsed, t.orbit_rate, t.planet_spin_step);
        self.swarm.update(t, &mut self.rng);
        self.knot.spin(t.knot_spin_step);

        match &mut self.astronaut {
            Deferred::Loaded(astronaut) => astronaut.update(elapsed),
            Deferred::Unloaded => {}
        }
    }

    /// Install the loaded astronaut, placed for the current time
    pub fn install_astronaut(&mut self) {
        let mut astronaut = Astronaut::new(
            self.layout.astronaut.scale,
            self.tunables.astronaut_orbit_radius,
            self.tunables.astronaut_orbit_rate,
        );
        astronaut.update(self.elapsed);
        if self.astronaut.install(astronaut).is_some() {
            log::warn!("Astronaut installed twice; replaced the previous one");
        }
    }

    /// Remove the astronaut, if present
    pub fn remove_astronaut(&mut self) -> Option<Astronaut> {
        self.astronaut.take()
    }

    /// Every mesh the renderer must create, in a stable order
    ///
    /// The stars are a point cloud and are created from [`World::stars`].
    /// The astronaut mesh arrives later from its model loader.
    pub fn mesh_requests(&self) -> Vec<MeshRequest> {
        let knot = &self.layout.knot;
        let mut requests = vec![
            MeshRequest {
                slot: RenderSlot::Knot,
                geometry: Geometry::TorusKnot {
                    radius: knot.radius,
                    tube: knot.tube,
                    tubular_segments: knot.tubular_segments,
                    radial_segments: knot.radial_segments,
                    p: knot.p,
                    q: knot.q,
                },
                material: MaterialDesc::knot(),
            },
            MeshRequest {
                slot: RenderSlot::Sun,
                geometry: Geometry::sphere(self.layout.sun.radius),
                material: MaterialDesc::sun(),
            },
        ];

        for (i, body) in self.planets.bodies().iter().enumerate() {
            requests.push(MeshRequest {
                slot: RenderSlot::Planet(i),
                geometry: Geometry::sphere(body.visual_radius),
                material: MaterialDesc::planet(self.planet_hues[i]),
            });
            requests.push(MeshRequest {
                slot: RenderSlot::PlanetGlow(i),
                geometry: Geometry::sphere(body.visual_radius * GLOW_SCALE),
                material: MaterialDesc::planet_glow(),
            });
        }

        for (i, butterfly) in self.swarm.butterflies().iter().enumerate() {
            for side in [WingSide::Left, WingSide::Right] {
                requests.push(MeshRequest {
                    slot: RenderSlot::Wing { butterfly: i, side },
                    geometry: Geometry::Wing(side),
                    material: MaterialDesc::wing(butterfly.hue),
                });
            }
        }

        requests
    }

    /// Current model matrix of every present entity
    ///
    /// The astronaut appears only once loaded.
    pub fn renderables(&self) -> Vec<Renderable> {
        let mut out = Vec::with_capacity(3 + self.planets.len() * 2 + self.swarm.len() * 2 + 1);

        out.push(Renderable { slot: RenderSlot::Stars, model: mat4::IDENTITY });
        out.push(Renderable { slot: RenderSlot::Knot, model: self.knot.matrix() });
        out.push(Renderable { slot: RenderSlot::Sun, model: mat4::IDENTITY });

        for (i, body) in self.planets.bodies().iter().enumerate() {
            let model = mat4::mul(mat4::translation(body.position), mat4::rotation_y(body.spin));
            out.push(Renderable { slot: RenderSlot::Planet(i), model });
            out.push(Renderable { slot: RenderSlot::PlanetGlow(i), model });
        }

        for (i, butterfly) in self.swarm.butterflies().iter().enumerate() {
            for side in [WingSide::Left, WingSide::Right] {
                out.push(Renderable {
                    slot: RenderSlot::Wing { butterfly: i, side },
                    model: butterfly.wing_matrix(side, &self.tunables),
                });
            }
        }

        if let Deferred::Loaded(astronaut) = &self.astronaut {
            out.push(Renderable { slot: RenderSlot::Astronaut, model: astronaut.matrix() });
        }

        out
    }

    /// The layout this world was built from
    pub fn layout(&self) -> &SceneLayout {
        &self.layout
    }

    /// Motion tunables in effect
    pub fn tunables(&self) -> &MotionTunables {
        &self.tunables
    }

    pub fn knot(&self) -> &PrimaryMesh {
        &self.knot
    }

    pub fn stars(&self) -> &StarField {
        &self.stars
    }

    pub fn planets(&self) -> &OrbitalSystem {
        &self.planets
    }

    pub fn swarm(&self) -> &Swarm {
        &self.swarm
    }

    /// The astronaut slot
    pub fn astronaut(&self) -> &Deferred<Astronaut> {
        &self.astronaut
    }

    /// Elapsed time passed to the last tick
    pub fn elapsed(&self) -> f32 {
        self.elapsed
    }

    /// Number of ticks so far
    pub fn tick_count(&self) -> u64 {
        self.ticks
    }

    /// World-space position of planet `index`
    pub fn planet_position(&self, index: usize) -> Option<Vec3> {
        self.planets.get(index).map(|body| body.position)
    }
}
