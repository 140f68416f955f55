//! Particle effects
//!
//! Cosmetic, time-limited visuals driven by the per-frame clock. Particles
//! never feed back into physics. The named presets are the vocabulary the
//! game loops use for event feedback; their envelopes are tunable but each
//! preset keeps its distinct character (explosions radiate in a full ring,
//! confetti launches upward against strong gravity, dust drifts).

use glam::Vec2;
use rand::{Rng, SeedableRng};
use rand_pcg::Pcg32;

use crate::render::Painter;

/// Bright default palette for particles spawned without a color
const PALETTE: [u32; 8] = [
    0xFF6B9D, 0x9B6BFF, 0x6BB5FF, 0x6BFFB8, 0xFFD66B, 0xFF9F6B, 0xFF6B6B, 0xFF6BFF,
];

const GOLD: u32 = 0xFFD700;
const STAR_YELLOW: u32 = 0xFFD66B;
const WATER_BLUE: u32 = 0x6BB5FF;
const DUST_TAN: u32 = 0xC9B38C;
const FIRE_COLORS: [u32; 3] = [0xFF6B6B, 0xFF9F6B, 0xFFD66B];
const SNOW_WHITE: u32 = 0xFFFFFF;

/// How a particle is rendered
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub enum ParticleShape {
    #[default]
    Circle,
    Square,
    Star,
    Heart,
    Triangle,
    /// A rendered text glyph (emoji bursts)
    Glyph(char),
}

/// A single live particle
#[derive(Debug, Clone)]
pub struct Particle {
    pub pos: Vec2,
    pub vel: Vec2,
    pub size: f32,
    pub color: u32,
    pub alpha: f32,
    pub rotation: f32,
    pub rotation_speed: f32,
    pub gravity: f32,
    pub friction: f32,
    /// Frames remaining; the particle dies at zero
    pub life: f32,
    pub max_life: f32,
    pub shape: ParticleShape,
}

/// Spawn envelope for [`ParticleSystem::emit`]
///
/// Unset fields are randomized per particle.
#[derive(Debug, Clone)]
pub struct ParticleOptions {
    pub vx: Option<f32>,
    pub vy: Option<f32>,
    /// Horizontal velocity envelope when `vx` is unset
    pub spread: f32,
    /// Upward velocity envelope when `vy` is unset
    pub speed: f32,
    pub size: Option<f32>,
    pub color: Option<u32>,
    pub rotation: Option<f32>,
    pub rotation_speed: Option<f32>,
    pub gravity: f32,
    pub friction: f32,
    pub life: Option<f32>,
    pub shape: ParticleShape,
}

impl Default for ParticleOptions {
    fn default() -> Self {
        Self {
            vx: None,
            vy: None,
            spread: 8.0,
            speed: 6.0,
            size: None,
            color: None,
            rotation: None,
            rotation_speed: None,
            gravity: 0.1,
            friction: 0.99,
            life: None,
            shape: ParticleShape::Circle,
        }
    }
}

/// Handle to a periodic particle source
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct EmitterId(u32);

/// A ticking particle source
#[derive(Debug, Clone)]
pub struct Emitter {
    id: EmitterId,
    pub pos: Vec2,
    /// Particles per second
    pub rate: f32,
    /// Particles spawn across `pos.x .. pos.x + area_width`
    pub area_width: f32,
    pub options: ParticleOptions,
    pub active: bool,
    timer: f32,
}

/// All live particles and emitters for one play session
pub struct ParticleSystem {
    particles: Vec<Particle>,
    emitters: Vec<Emitter>,
    rng: Pcg32,
    next_emitter_id: u32,
}

impl ParticleSystem {
    pub fn new(seed: u64) -> Self {
        Self {
            particles: Vec::new(),
            emitters: Vec::new(),
            rng: Pcg32::seed_from_u64(seed),
            next_emitter_id: 1,
        }
    }

    pub fn particles(&self) -> &[Particle] {
        &self.particles
    }

    /// Reset the RNG so a restarted session replays the same effects
    pub fn reseed(&mut self, seed: u64) {
        self.rng = Pcg32::seed_from_u64(seed);
    }

    fn make_particle(&mut self, x: f32, y: f32, options: &ParticleOptions) -> Particle {
        let rng = &mut self.rng;
        let life = options
            .life
            .unwrap_or_else(|| 60.0 + rng.random::<f32>() * 60.0);
        Particle {
            pos: Vec2::new(x, y),
            vel: Vec2::new(
                options
                    .vx
                    .unwrap_or_else(|| (rng.random::<f32>() - 0.5) * 4.0),
                options.vy.unwrap_or_else(|| -rng.random::<f32>() * 4.0),
            ),
            size: options
                .size
                .unwrap_or_else(|| 5.0 + rng.random::<f32>() * 5.0),
            color: options
                .color
                .unwrap_or_else(|| PALETTE[rng.random_range(0..PALETTE.len())]),
            alpha: 1.0,
            rotation: options
                .rotation
                .unwrap_or_else(|| rng.random::<f32>() * std::f32::consts::TAU),
            rotation_speed: options
                .rotation_speed
                .unwrap_or_else(|| (rng.random::<f32>() - 0.5) * 0.2),
            gravity: options.gravity,
            friction: options.friction,
            life,
            max_life: life,
            shape: options.shape,
        }
    }

    /// Spawn `count` particles with per-particle randomized velocity inside
    /// the options' spread/speed envelope
    pub fn emit(&mut self, x: f32, y: f32, count: usize, options: &ParticleOptions) {
        for _ in 0..count {
            let vx = options
                .vx
                .unwrap_or_else(|| (self.rng.random::<f32>() - 0.5) * options.spread);
            let vy = options
                .vy
                .unwrap_or_else(|| -self.rng.random::<f32>() * options.speed - 2.0);
            let particle = self.make_particle(
                x,
                y,
                &ParticleOptions {
                    vx: Some(vx),
                    vy: Some(vy),
                    ..options.clone()
                },
            );
            self.particles.push(particle);
        }
    }

    pub fn create_emitter(
        &mut self,
        x: f32,
        y: f32,
        rate: f32,
        options: ParticleOptions,
    ) -> EmitterId {
        let id = EmitterId(self.next_emitter_id);
        self.next_emitter_id += 1;
        self.emitters.push(Emitter {
            id,
            pos: Vec2::new(x, y),
            rate,
            area_width: 0.0,
            options,
            active: true,
            timer: 0.0,
        });
        id
    }

    pub fn remove_emitter(&mut self, id: EmitterId) {
        self.emitters.retain(|e| e.id != id);
    }

    /// Advance every emitter and particle by one frame
    pub fn update(&mut self) {
        // Emitters tick at `rate` particles per second of frames
        let mut spawns: Vec<(Vec2, f32, ParticleOptions)> = Vec::new();
        for emitter in &mut self.emitters {
            if !emitter.active || emitter.rate <= 0.0 {
                continue;
            }
            emitter.timer += 1.0;
            if emitter.timer >= 60.0 / emitter.rate {
                spawns.push((emitter.pos, emitter.area_width, emitter.options.clone()));
                emitter.timer = 0.0;
            }
        }
        for (pos, area_width, options) in spawns {
            let jitter = if area_width > 0.0 {
                self.rng.random::<f32>() * area_width
            } else {
                0.0
            };
            self.emit(pos.x + jitter, pos.y, 1, &options);
        }

        for p in &mut self.particles {
            p.vel.y += p.gravity;
            p.vel *= p.friction;
            p.pos += p.vel;
            p.rotation += p.rotation_speed;
            p.life -= 1.0;
            p.alpha = p.life / p.max_life;
        }
        self.particles.retain(|p| p.life > 0.0);
    }

    /// Render every live particle through the painter
    pub fn draw(&self, painter: &mut dyn Painter) {
        for p in &self.particles {
            match p.shape {
                ParticleShape::Circle => {
                    painter.fill_circle(p.pos, p.size / 2.0, p.color, p.alpha);
                }
                ParticleShape::Square => {
                    let h = p.size / 2.0;
                    let corners = [
                        Vec2::new(-h, -h),
                        Vec2::new(h, -h),
                        Vec2::new(h, h),
                        Vec2::new(-h, h),
                    ];
                    painter.fill_polygon(&rotate_around(&corners, p.pos, p.rotation), p.color, p.alpha);
                }
                ParticleShape::Triangle => {
                    let h = p.size / 2.0;
                    let points = [Vec2::new(0.0, -h), Vec2::new(h, h), Vec2::new(-h, h)];
                    painter.fill_polygon(&rotate_around(&points, p.pos, p.rotation), p.color, p.alpha);
                }
                ParticleShape::Star => {
                    let points = star_points(p.size / 2.0);
                    painter.fill_polygon(&rotate_around(&points, p.pos, p.rotation), p.color, p.alpha);
                }
                ParticleShape::Heart => {
                    let points = heart_points(p.size / 2.0);
                    painter.fill_polygon(&rotate_around(&points, p.pos, p.rotation), p.color, p.alpha);
                }
                ParticleShape::Glyph(ch) => {
                    let mut buf = [0u8; 4];
                    painter.text(
                        ch.encode_utf8(&mut buf),
                        p.pos,
                        p.size * 2.0,
                        p.rotation,
                        false,
                        p.alpha,
                    );
                }
            }
        }
    }

    /// Drop all particles and emitters
    pub fn clear(&mut self) {
        self.particles.clear();
        self.emitters.clear();
    }

    // ===========================================
    // Preset effects
    // ===========================================

    /// Mixed-shape burst with top-biased upward velocity and strong gravity
    pub fn confetti(&mut self, x: f32, y: f32, count: usize) {
        const SHAPES: [ParticleShape; 3] = [
            ParticleShape::Square,
            ParticleShape::Triangle,
            ParticleShape::Circle,
        ];
        for _ in 0..count {
            let shape = SHAPES[self.rng.random_range(0..SHAPES.len())];
            let options = ParticleOptions {
                vx: Some((self.rng.random::<f32>() - 0.5) * 15.0),
                vy: Some(-self.rng.random::<f32>() * 10.0 - 5.0),
                size: Some(6.0 + self.rng.random::<f32>() * 6.0),
                gravity: 0.15,
                life: Some(120.0 + self.rng.random::<f32>() * 60.0),
                shape,
                ..Default::default()
            };
            let particle = self.make_particle(x, y, &options);
            self.particles.push(particle);
        }
    }

    /// Small gold burst on coin pickup
    pub fn coin_collect(&mut self, x: f32, y: f32) {
        for _ in 0..8 {
            let options = ParticleOptions {
                vx: Some((self.rng.random::<f32>() - 0.5) * 6.0),
                vy: Some(-self.rng.random::<f32>() * 4.0 - 2.0),
                color: Some(GOLD),
                size: Some(4.0 + self.rng.random::<f32>() * 4.0),
                life: Some(30.0 + self.rng.random::<f32>() * 20.0),
                ..Default::default()
            };
            let particle = self.make_particle(x, y, &options);
            self.particles.push(particle);
        }
    }

    /// Weightless radial star burst on star pickup
    pub fn star_collect(&mut self, x: f32, y: f32) {
        for _ in 0..12 {
            let options = ParticleOptions {
                vx: Some((self.rng.random::<f32>() - 0.5) * 8.0),
                vy: Some((self.rng.random::<f32>() - 0.5) * 8.0),
                color: Some(STAR_YELLOW),
                size: Some(6.0 + self.rng.random::<f32>() * 6.0),
                shape: ParticleShape::Star,
                gravity: 0.0,
                life: Some(40.0 + self.rng.random::<f32>() * 20.0),
                ..Default::default()
            };
            let particle = self.make_particle(x, y, &options);
            self.particles.push(particle);
        }
    }

    /// Full ring at equal angular spacing
    pub fn explosion(&mut self, x: f32, y: f32, color: u32) {
        const COUNT: usize = 30;
        for i in 0..COUNT {
            let angle = std::f32::consts::TAU / COUNT as f32 * i as f32;
            let speed = 3.0 + self.rng.random::<f32>() * 5.0;
            let options = ParticleOptions {
                vx: Some(angle.cos() * speed),
                vy: Some(angle.sin() * speed),
                color: Some(color),
                size: Some(3.0 + self.rng.random::<f32>() * 5.0),
                gravity: 0.05,
                life: Some(40.0 + self.rng.random::<f32>() * 30.0),
                ..Default::default()
            };
            let particle = self.make_particle(x, y, &options);
            self.particles.push(particle);
        }
    }

    /// Slow buoyant puff (landings)
    pub fn dust_cloud(&mut self, x: f32, y: f32) {
        for _ in 0..10 {
            let options = ParticleOptions {
                vx: Some((self.rng.random::<f32>() - 0.5) * 4.0),
                vy: Some(-self.rng.random::<f32>() * 2.0 - 0.5),
                color: Some(DUST_TAN),
                size: Some(8.0 + self.rng.random::<f32>() * 8.0),
                gravity: -0.02,
                friction: 0.95,
                life: Some(30.0 + self.rng.random::<f32>() * 20.0),
                ..Default::default()
            };
            let particle = self.make_particle(x, y, &options);
            self.particles.push(particle);
        }
    }

    /// Upward cone of droplets
    pub fn water_splash(&mut self, x: f32, y: f32) {
        for _ in 0..15 {
            let angle = -std::f32::consts::FRAC_PI_2
                + (self.rng.random::<f32>() - 0.5) * std::f32::consts::PI * 0.8;
            let speed = 3.0 + self.rng.random::<f32>() * 5.0;
            let options = ParticleOptions {
                vx: Some(angle.cos() * speed),
                vy: Some(angle.sin() * speed),
                color: Some(WATER_BLUE),
                size: Some(3.0 + self.rng.random::<f32>() * 4.0),
                gravity: 0.2,
                life: Some(30.0 + self.rng.random::<f32>() * 20.0),
                ..Default::default()
            };
            let particle = self.make_particle(x, y, &options);
            self.particles.push(particle);
        }
    }

    /// One stationary short-lived sparkle, called per frame along a path
    pub fn sparkle_trail(&mut self, x: f32, y: f32) {
        let options = ParticleOptions {
            vx: Some(0.0),
            vy: Some(0.0),
            color: Some(STAR_YELLOW),
            size: Some(2.0 + self.rng.random::<f32>() * 4.0),
            shape: ParticleShape::Star,
            gravity: 0.0,
            life: Some(15.0 + self.rng.random::<f32>() * 10.0),
            ..Default::default()
        };
        let jx = x + (self.rng.random::<f32>() - 0.5) * 10.0;
        let jy = y + (self.rng.random::<f32>() - 0.5) * 10.0;
        let particle = self.make_particle(jx, jy, &options);
        self.particles.push(particle);
    }

    /// Upward burst of rendered glyphs
    pub fn emoji_burst(&mut self, x: f32, y: f32, glyph: char, count: usize) {
        for _ in 0..count {
            let options = ParticleOptions {
                vx: Some((self.rng.random::<f32>() - 0.5) * 10.0),
                vy: Some(-self.rng.random::<f32>() * 8.0 - 3.0),
                size: Some(10.0 + self.rng.random::<f32>() * 10.0),
                gravity: 0.15,
                life: Some(60.0 + self.rng.random::<f32>() * 40.0),
                shape: ParticleShape::Glyph(glyph),
                ..Default::default()
            };
            let particle = self.make_particle(x, y, &options);
            self.particles.push(particle);
        }
    }

    /// Buoyant embers, called per frame while burning
    pub fn fire(&mut self, x: f32, y: f32) {
        for _ in 0..3 {
            let color = FIRE_COLORS[self.rng.random_range(0..FIRE_COLORS.len())];
            let options = ParticleOptions {
                vx: Some((self.rng.random::<f32>() - 0.5) * 2.0),
                vy: Some(-self.rng.random::<f32>() * 3.0 - 1.0),
                color: Some(color),
                size: Some(5.0 + self.rng.random::<f32>() * 8.0),
                gravity: -0.1,
                life: Some(20.0 + self.rng.random::<f32>() * 20.0),
                ..Default::default()
            };
            let jx = x + (self.rng.random::<f32>() - 0.5) * 10.0;
            let particle = self.make_particle(jx, y, &options);
            self.particles.push(particle);
        }
    }

    /// Continuous drifting snowfall across the given width
    pub fn create_snow_emitter(&mut self, width: f32) -> EmitterId {
        let size = 3.0 + self.rng.random::<f32>() * 4.0;
        let id = self.create_emitter(
            0.0,
            -10.0,
            10.0,
            ParticleOptions {
                vy: Some(2.0),
                spread: 2.0,
                color: Some(SNOW_WHITE),
                size: Some(size),
                gravity: 0.0,
                life: Some(200.0),
                ..Default::default()
            },
        );
        if let Some(emitter) = self.emitters.last_mut() {
            emitter.area_width = width;
        }
        id
    }
}

fn rotate_around(points: &[Vec2], center: Vec2, angle: f32) -> Vec<Vec2> {
    let (sin, cos) = angle.sin_cos();
    points
        .iter()
        .map(|p| Vec2::new(p.x * cos - p.y * sin, p.x * sin + p.y * cos) + center)
        .collect()
}

/// Five-pointed star outline around the origin
fn star_points(size: f32) -> Vec<Vec2> {
    const SPIKES: usize = 5;
    let inner = size / 2.0;
    (0..SPIKES * 2)
        .map(|i| {
            let radius = if i % 2 == 0 { size } else { inner };
            let angle = std::f32::consts::PI / SPIKES as f32 * i as f32 - std::f32::consts::FRAC_PI_2;
            Vec2::new(angle.cos() * radius, angle.sin() * radius)
        })
        .collect()
}

/// Sampled heart curve around the origin
fn heart_points(size: f32) -> Vec<Vec2> {
    const SAMPLES: usize = 20;
    (0..SAMPLES)
        .map(|i| {
            let t = std::f32::consts::TAU / SAMPLES as f32 * i as f32;
            // Classic parametric heart, scaled to +/- size and flipped for
            // screen coordinates
            let x = 16.0 * t.sin().powi(3);
            let y = 13.0 * t.cos() - 5.0 * (2.0 * t).cos() - 2.0 * (3.0 * t).cos() - (4.0 * t).cos();
            Vec2::new(x / 16.0 * size, -y / 16.0 * size)
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn emit_spawns_the_requested_count() {
        let mut system = ParticleSystem::new(7);
        system.emit(10.0, 20.0, 12, &ParticleOptions::default());
        assert_eq!(system.particles().len(), 12);
        for p in system.particles() {
            assert_eq!(p.pos, Vec2::new(10.0, 20.0));
            // Envelope: upward launch between -2 and -(speed + 2)
            assert!(p.vel.y <= -2.0 && p.vel.y >= -8.0);
            assert_eq!(p.alpha, 1.0);
        }
    }

    #[test]
    fn particles_age_and_die() {
        let mut system = ParticleSystem::new(7);
        system.emit(
            0.0,
            0.0,
            5,
            &ParticleOptions {
                life: Some(3.0),
                ..Default::default()
            },
        );

        system.update();
        assert_eq!(system.particles().len(), 5);
        let p = &system.particles()[0];
        assert!((p.alpha - 2.0 / 3.0).abs() < 1e-5);

        system.update();
        system.update();
        assert!(system.particles().is_empty());
    }

    #[test]
    fn update_applies_gravity_and_friction() {
        let mut system = ParticleSystem::new(7);
        system.emit(
            0.0,
            0.0,
            1,
            &ParticleOptions {
                vx: Some(1.0),
                vy: Some(0.0),
                gravity: 0.5,
                friction: 0.9,
                life: Some(100.0),
                ..Default::default()
            },
        );
        system.update();

        let p = &system.particles()[0];
        assert!((p.vel.x - 0.9).abs() < 1e-5);
        assert!((p.vel.y - 0.45).abs() < 1e-5);
        assert_eq!(p.pos, Vec2::new(0.9, 0.45));
    }

    #[test]
    fn emitter_ticks_at_its_rate() {
        let mut system = ParticleSystem::new(7);
        system.create_emitter(
            0.0,
            0.0,
            5.0,
            ParticleOptions {
                life: Some(500.0),
                ..Default::default()
            },
        );

        // 5/sec at 60 fps spawns every 12 frames
        for _ in 0..24 {
            system.update();
        }
        assert_eq!(system.particles().len(), 2);
    }

    #[test]
    fn removed_emitter_stops_spawning() {
        let mut system = ParticleSystem::new(7);
        let id = system.create_emitter(0.0, 0.0, 60.0, ParticleOptions::default());
        system.remove_emitter(id);
        for _ in 0..10 {
            system.update();
        }
        assert!(system.particles().is_empty());
    }

    #[test]
    fn explosion_radiates_a_full_ring() {
        let mut system = ParticleSystem::new(7);
        system.explosion(0.0, 0.0, 0xFF6B6B);

        let particles = system.particles();
        assert_eq!(particles.len(), 30);
        for (i, p) in particles.iter().enumerate() {
            let expected = std::f32::consts::TAU / 30.0 * i as f32;
            let dir = p.vel.normalize();
            assert!((dir.x - expected.cos()).abs() < 1e-4);
            assert!((dir.y - expected.sin()).abs() < 1e-4);
        }
    }

    #[test]
    fn confetti_launches_upward() {
        let mut system = ParticleSystem::new(7);
        system.confetti(0.0, 0.0, 40);
        assert_eq!(system.particles().len(), 40);
        for p in system.particles() {
            assert!(p.vel.y < -5.0 + 1e-6);
            assert_eq!(p.gravity, 0.15);
        }
    }

    #[test]
    fn same_seed_replays_the_same_effect() {
        let spawn = |seed| {
            let mut system = ParticleSystem::new(seed);
            system.confetti(0.0, 0.0, 10);
            system
                .particles()
                .iter()
                .map(|p| (p.vel.x, p.vel.y, p.size))
                .collect::<Vec<_>>()
        };
        assert_eq!(spawn(42), spawn(42));
    }
}
