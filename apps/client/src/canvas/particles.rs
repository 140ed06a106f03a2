use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use super::{Effect, Point, Rgba, Surface, CORAL, SAGE};

pub const MAX_PARTICLES: usize = 100;
pub const AREA_PER_PARTICLE: f64 = 15_000.0;
pub const REPEL_RADIUS: f64 = 150.0;
pub const REPEL_STRENGTH: f64 = 0.02;
pub const LINK_DISTANCE: f64 = 120.0;
pub const LINK_OPACITY: f64 = 0.3;
const PARTICLE_ALPHA: f64 = 0.6;

#[derive(Debug, Clone, PartialEq)]
pub struct Particle {
    pub pos: Point,
    pub velocity: Point,
    pub size: f64,
    pub color: Rgba,
}

/// Drifting dots joined by faint lines when close, pushed away from the pointer.
pub struct ParticleField {
    rng: StdRng,
    width: f64,
    height: f64,
    particles: Vec<Particle>,
    pointer: Option<Point>,
}

impl Default for ParticleField {
    fn default() -> Self {
        Self::with_rng(StdRng::from_entropy())
    }
}

impl ParticleField {
    pub fn with_rng(rng: StdRng) -> Self {
        Self {
            rng,
            width: 0.0,
            height: 0.0,
            particles: Vec::new(),
            pointer: None,
        }
    }

    pub fn particles(&self) -> &[Particle] {
        &self.particles
    }

    pub fn count_for(width: f64, height: f64) -> usize {
        ((width * height / AREA_PER_PARTICLE).floor().max(0.0) as usize).min(MAX_PARTICLES)
    }

    fn spawn(&mut self) -> Particle {
        let rng = &mut self.rng;
        Particle {
            pos: Point::new(rng.gen::<f64>() * self.width, rng.gen::<f64>() * self.height),
            velocity: Point::new(rng.gen_range(-0.25..0.25), rng.gen_range(-0.25..0.25)),
            size: rng.gen_range(1.0..4.0),
            color: (if rng.gen_bool(0.5) { SAGE } else { CORAL }).with_alpha(PARTICLE_ALPHA),
        }
    }

    /// Every pair closer than `LINK_DISTANCE`, with the line opacity.
    pub fn links(&self) -> Vec<(usize, usize, f64)> {
        let mut links = Vec::new();
        for (i, a) in self.particles.iter().enumerate() {
            for (j, b) in self.particles.iter().enumerate().skip(i + 1) {
                let d = a.pos.distance(b.pos);
                if d < LINK_DISTANCE {
                    links.push((i, j, (1.0 - d / LINK_DISTANCE) * LINK_OPACITY));
                }
            }
        }
        links
    }

    fn advance(&self, p: &mut Particle) {
        p.pos.x += p.velocity.x;
        p.pos.y += p.velocity.y;

        if let Some(pointer) = self.pointer {
            let dx = pointer.x - p.pos.x;
            let dy = pointer.y - p.pos.y;
            let d = dx.hypot(dy);
            if d < REPEL_RADIUS {
                let force = (REPEL_RADIUS - d) / REPEL_RADIUS;
                p.pos.x -= dx * force * REPEL_STRENGTH;
                p.pos.y -= dy * force * REPEL_STRENGTH;
            }
        }

        if p.pos.x < 0.0 {
            p.pos.x = self.width;
        } else if p.pos.x > self.width {
            p.pos.x = 0.0;
        }
        if p.pos.y < 0.0 {
            p.pos.y = self.height;
        } else if p.pos.y > self.height {
            p.pos.y = 0.0;
        }
    }
}

impl Effect for ParticleField {
    fn name(&self) -> &'static str {
        "particles"
    }

    /// Resizing reseeds the whole field.
    fn resize(&mut self, width: f64, height: f64) {
        self.width = width;
        self.height = height;
        let count = Self::count_for(width, height);
        let particles: Vec<Particle> = (0..count).map(|_| self.spawn()).collect();
        self.particles = particles;
    }

    fn step(&mut self) {
        let mut particles = std::mem::take(&mut self.particles);
        for p in &mut particles {
            self.advance(p);
        }
        self.particles = particles;
    }

    fn draw(&self, surface: &mut dyn Surface) {
        surface.clear();
        for p in &self.particles {
            surface.fill_circle(p.pos, p.size, p.color);
        }
        for (i, j, opacity) in self.links() {
            surface.stroke_line(self.particles[i].pos, self.particles[j].pos, SAGE.with_alpha(opacity));
        }
    }

    fn set_pointer(&mut self, pointer: Option<Point>) {
        self.pointer = pointer;
    }
}
