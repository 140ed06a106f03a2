//! Floating orbs, rings and a point field projected through a pinhole camera.

use std::f64::consts::TAU;
use std::fmt;
use std::str::FromStr;

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use super::{Effect, Point, Rgba, Surface, COPPER, CORAL, SAGE, SAGE_DEEP, SAGE_LIGHT};

pub const CAMERA_Z: f64 = 10.0;
pub const FOV_DEGREES: f64 = 60.0;
const NEAR: f64 = 0.1;
const FRAME_SECONDS: f64 = 1.0 / 60.0;

const FIELD_EXTENT: f64 = 50.0;
const FIELD_POINT_SIZE: f64 = 0.05;
const FIELD_ALPHA: f64 = 0.6;
const RING_SEGMENTS: usize = 100;
const RING_ALPHA: f64 = 0.5;
const FLOAT_INTENSITY: f64 = 0.5;
const STAR_COUNT: usize = 5_000;
const STAR_RADIUS: f64 = 100.0;
const STAR_DEPTH: f64 = 50.0;

#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Vec3 {
    pub x: f64,
    pub y: f64,
    pub z: f64,
}

impl Vec3 {
    pub const fn new(x: f64, y: f64, z: f64) -> Self {
        Self { x, y, z }
    }

    pub fn length(self) -> f64 {
        (self.x * self.x + self.y * self.y + self.z * self.z).sqrt()
    }

    pub fn rotate_x(self, a: f64) -> Self {
        let (s, c) = a.sin_cos();
        Self::new(self.x, self.y * c - self.z * s, self.y * s + self.z * c)
    }

    pub fn rotate_y(self, a: f64) -> Self {
        let (s, c) = a.sin_cos();
        Self::new(self.x * c + self.z * s, self.y, -self.x * s + self.z * c)
    }

    pub fn rotate_z(self, a: f64) -> Self {
        let (s, c) = a.sin_cos();
        Self::new(self.x * c - self.y * s, self.x * s + self.y * c, self.z)
    }

    /// XYZ Euler order: z is applied first, then y, then x.
    pub fn rotate(self, x: f64, y: f64, z: f64) -> Self {
        self.rotate_z(z).rotate_y(y).rotate_x(x)
    }

    pub fn offset(self, by: Vec3) -> Self {
        Self::new(self.x + by.x, self.y + by.y, self.z + by.z)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum OrbVariant {
    #[default]
    Hero,
    Minimal,
    Stars,
}

impl OrbVariant {
    pub fn as_str(self) -> &'static str {
        match self {
            OrbVariant::Hero => "hero",
            OrbVariant::Minimal => "minimal",
            OrbVariant::Stars => "stars",
        }
    }
}

impl fmt::Display for OrbVariant {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for OrbVariant {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "hero" => Ok(OrbVariant::Hero),
            "minimal" => Ok(OrbVariant::Minimal),
            "stars" => Ok(OrbVariant::Stars),
            other => Err(format!("unknown scene variant '{other}': expected hero, minimal, or stars")),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Orb {
    pub position: Vec3,
    pub color: Rgba,
    pub size: f64,
    pub speed: f64,
}

impl Orb {
    const fn new(position: Vec3, color: Rgba, size: f64, speed: f64) -> Self {
        Self {
            position,
            color,
            size,
            speed,
        }
    }

    /// Spin of the sphere at `time` seconds as (x, y) angles.
    pub fn rotation(&self, time: f64) -> (f64, f64) {
        (
            (time * self.speed * 0.3).sin() * 0.2,
            time * self.speed * 0.2,
        )
    }

    /// Gentle vertical float around the resting position.
    pub fn center(&self, time: f64) -> Vec3 {
        let bob = (time / 4.0 * self.speed).sin() / 10.0 * FLOAT_INTENSITY;
        self.position.offset(Vec3::new(0.0, bob, 0.0))
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Ring {
    pub radius: f64,
    pub color: Rgba,
}

impl Ring {
    pub fn rotation(time: f64) -> (f64, f64) {
        ((time * 0.5).sin() * 0.3, time * 0.2)
    }
}

const HERO_ORBS: [Orb; 5] = [
    Orb::new(Vec3::new(-4.0, 2.0, 0.0), SAGE, 1.5, 0.8),
    Orb::new(Vec3::new(4.0, -1.0, -2.0), CORAL, 1.2, 1.2),
    Orb::new(Vec3::new(0.0, -3.0, 1.0), SAGE_DEEP, 0.8, 1.0),
    Orb::new(Vec3::new(-3.0, -2.0, -3.0), COPPER, 0.6, 0.9),
    Orb::new(Vec3::new(3.0, 3.0, -1.0), SAGE_LIGHT, 0.9, 1.1),
];

const MINIMAL_ORBS: [Orb; 2] = [
    Orb::new(Vec3::new(3.0, 1.0, -2.0), SAGE, 0.8, 0.5),
    Orb::new(Vec3::new(-2.0, -1.0, -1.0), CORAL, 0.5, 0.7),
];

const STARS_ORBS: [Orb; 1] = [Orb::new(Vec3::new(0.0, 0.0, 0.0), SAGE, 2.0, 0.3)];

pub struct OrbScene {
    variant: OrbVariant,
    width: f64,
    height: f64,
    time: f64,
    orbs: Vec<Orb>,
    rings: Vec<Ring>,
    /// Rotating cube of points (hero, minimal) or a fixed star shell (stars).
    points: Vec<Vec3>,
}

impl OrbScene {
    pub fn new(variant: OrbVariant) -> Self {
        Self::with_rng(variant, StdRng::from_entropy())
    }

    pub fn with_rng(variant: OrbVariant, mut rng: StdRng) -> Self {
        let (orbs, rings, points) = match variant {
            OrbVariant::Hero => (
                HERO_ORBS.to_vec(),
                vec![
                    Ring { radius: 5.0, color: SAGE },
                    Ring { radius: 4.0, color: CORAL },
                ],
                cube_field(&mut rng, 300),
            ),
            OrbVariant::Minimal => (MINIMAL_ORBS.to_vec(), Vec::new(), cube_field(&mut rng, 100)),
            OrbVariant::Stars => (STARS_ORBS.to_vec(), Vec::new(), star_shell(&mut rng, STAR_COUNT)),
        };
        Self {
            variant,
            width: 0.0,
            height: 0.0,
            time: 0.0,
            orbs,
            rings,
            points,
        }
    }

    pub fn variant(&self) -> OrbVariant {
        self.variant
    }

    pub fn orbs(&self) -> &[Orb] {
        &self.orbs
    }

    pub fn rings(&self) -> &[Ring] {
        &self.rings
    }

    pub fn points(&self) -> &[Vec3] {
        &self.points
    }

    pub fn time(&self) -> f64 {
        self.time
    }

    fn focal(&self) -> f64 {
        (self.height / 2.0) / (FOV_DEGREES.to_radians() / 2.0).tan()
    }

    /// Screen position and pixels-per-unit at that depth; `None` behind the camera.
    pub fn project(&self, p: Vec3) -> Option<(Point, f64)> {
        let depth = CAMERA_Z - p.z;
        if depth < NEAR {
            return None;
        }
        let scale = self.focal() / depth;
        Some((
            Point::new(self.width / 2.0 + p.x * scale, self.height / 2.0 - p.y * scale),
            scale,
        ))
    }

    fn field_angles(&self) -> (f64, f64) {
        match self.variant {
            OrbVariant::Stars => (0.0, 0.0),
            _ => (self.time * 0.02, self.time * 0.03),
        }
    }

    fn draw_points(&self, surface: &mut dyn Surface) {
        let (rx, ry) = self.field_angles();
        let color = SAGE.with_alpha(FIELD_ALPHA);
        for p in &self.points {
            if let Some((screen, scale)) = self.project(p.rotate(rx, ry, 0.0)) {
                surface.fill_circle(screen, (FIELD_POINT_SIZE * scale).max(0.5), color);
            }
        }
    }

    fn draw_rings(&self, surface: &mut dyn Surface) {
        let (rx, rz) = Ring::rotation(self.time);
        for ring in &self.rings {
            let outline: Vec<Option<Point>> = (0..=RING_SEGMENTS)
                .map(|i| {
                    let theta = TAU * i as f64 / RING_SEGMENTS as f64;
                    let local = Vec3::new(ring.radius * theta.cos(), ring.radius * theta.sin(), 0.0);
                    self.project(local.rotate(rx, 0.0, rz)).map(|(p, _)| p)
                })
                .collect();
            for pair in outline.windows(2) {
                if let [Some(a), Some(b)] = pair {
                    surface.stroke_line(*a, *b, ring.color.with_alpha(RING_ALPHA));
                }
            }
        }
    }

    fn draw_orbs(&self, surface: &mut dyn Surface) {
        // Far orbs first so nearer ones paint over them.
        let mut orbs: Vec<&Orb> = self.orbs.iter().collect();
        orbs.sort_by(|a, b| a.position.z.total_cmp(&b.position.z));
        for orb in orbs {
            let center = orb.center(self.time);
            let Some((screen, scale)) = self.project(center) else {
                continue;
            };
            let radius = orb.size * scale;
            surface.fill_radial(
                screen,
                radius,
                &[
                    (0.0, orb.color),
                    (0.7, orb.color.with_alpha(0.8)),
                    (1.0, orb.color.with_alpha(0.2)),
                ],
            );

            // A surface marker makes the spin visible.
            let (rx, ry) = orb.rotation(self.time);
            let marker = Vec3::new(0.0, 0.0, orb.size).rotate(rx, ry, 0.0).offset(center);
            if marker.z > center.z {
                if let Some((p, _)) = self.project(marker) {
                    surface.fill_circle(p, (radius * 0.15).max(0.5), Rgba::rgb(255, 255, 255).with_alpha(0.7));
                }
            }
        }
    }
}

fn cube_field(rng: &mut StdRng, count: usize) -> Vec<Vec3> {
    let half = FIELD_EXTENT / 2.0;
    (0..count)
        .map(|_| {
            Vec3::new(
                rng.gen_range(-half..half),
                rng.gen_range(-half..half),
                rng.gen_range(-half..half),
            )
        })
        .collect()
}

/// Uniform directions at a distance between the star radius and radius + depth.
fn star_shell(rng: &mut StdRng, count: usize) -> Vec<Vec3> {
    (0..count)
        .map(|_| {
            let z: f64 = rng.gen_range(-1.0..1.0);
            let theta = rng.gen_range(0.0..TAU);
            let r = (1.0 - z * z).sqrt();
            let distance = STAR_RADIUS + rng.gen_range(0.0..STAR_DEPTH);
            Vec3::new(r * theta.cos() * distance, r * theta.sin() * distance, z * distance)
        })
        .collect()
}

impl Effect for OrbScene {
    fn name(&self) -> &'static str {
        "orbs"
    }

    fn resize(&mut self, width: f64, height: f64) {
        self.width = width;
        self.height = height;
    }

    fn step(&mut self) {
        self.time += FRAME_SECONDS;
    }

    fn draw(&self, surface: &mut dyn Surface) {
        surface.clear();
        self.draw_points(surface);
        self.draw_rings(surface);
        self.draw_orbs(surface);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::canvas::{DrawList, DrawOp};

    fn scene(variant: OrbVariant) -> OrbScene {
        let mut scene = OrbScene::with_rng(variant, StdRng::seed_from_u64(3));
        scene.resize(800.0, 600.0);
        scene
    }

    #[test]
    fn test_variant_contents() {
        let hero = scene(OrbVariant::Hero);
        assert_eq!((hero.orbs().len(), hero.rings().len(), hero.points().len()), (5, 2, 300));
        assert_eq!(hero.rings()[0].radius, 5.0);

        let minimal = scene(OrbVariant::Minimal);
        assert_eq!((minimal.orbs().len(), minimal.rings().len(), minimal.points().len()), (2, 0, 100));

        let stars = scene(OrbVariant::Stars);
        assert_eq!(stars.orbs().len(), 1);
        assert_eq!(stars.orbs()[0].size, 2.0);
        assert!(stars
            .points()
            .iter()
            .all(|p| (STAR_RADIUS - 1e-9..=STAR_RADIUS + STAR_DEPTH + 1e-9).contains(&p.length())));
    }

    #[test]
    fn test_field_fills_cube() {
        let hero = scene(OrbVariant::Hero);
        assert!(hero
            .points()
            .iter()
            .all(|p| p.x.abs() <= 25.0 && p.y.abs() <= 25.0 && p.z.abs() <= 25.0));
    }

    #[test]
    fn test_projection() {
        let s = scene(OrbVariant::Hero);
        let (center, _) = s.project(Vec3::default()).unwrap();
        assert_eq!(center, Point::new(400.0, 300.0));

        // At depth 10 with a 60° fov, y = 10·tan(30°) reaches the top edge.
        let top = Vec3::new(0.0, 10.0 * (30f64).to_radians().tan(), 0.0);
        let (p, _) = s.project(top).unwrap();
        assert!(p.y.abs() < 1e-9);

        assert!(s.project(Vec3::new(0.0, 0.0, 10.0)).is_none());
    }

    #[test]
    fn test_rotation_preserves_length() {
        let v = Vec3::new(1.0, -2.0, 3.0);
        let r = v.rotate(0.3, 1.1, -0.7);
        assert!((v.length() - r.length()).abs() < 1e-12);
        let quarter = Vec3::new(1.0, 0.0, 0.0).rotate_z(TAU / 4.0);
        assert!((quarter.y - 1.0).abs() < 1e-12 && quarter.x.abs() < 1e-12);
    }

    #[test]
    fn test_motion_formulas() {
        let orb = HERO_ORBS[1];
        let (rx, ry) = orb.rotation(2.0);
        assert!((rx - (2.0 * 1.2 * 0.3f64).sin() * 0.2).abs() < 1e-12);
        assert!((ry - 2.0 * 1.2 * 0.2).abs() < 1e-12);

        let (rx, rz) = Ring::rotation(4.0);
        assert!((rx - 2.0f64.sin() * 0.3).abs() < 1e-12);
        assert!((rz - 0.8).abs() < 1e-12);
    }

    #[test]
    fn test_sixty_steps_is_one_second() {
        let mut s = scene(OrbVariant::Minimal);
        for _ in 0..60 {
            s.step();
        }
        assert!((s.time() - 1.0).abs() < 1e-9);
    }

    #[test]
    fn test_hero_draws_every_orb_and_ring() {
        let s = scene(OrbVariant::Hero);
        let mut list = DrawList::new(800.0, 600.0);
        s.draw(&mut list);
        let radials = list
            .ops()
            .iter()
            .filter(|op| matches!(op, DrawOp::Radial { .. }))
            .count();
        assert_eq!(radials, 5);
        assert_eq!(list.lines().count(), 2 * RING_SEGMENTS);
    }

    #[test]
    fn test_variant_parse() {
        assert_eq!("Stars".parse::<OrbVariant>().unwrap(), OrbVariant::Stars);
        assert!("galaxy".parse::<OrbVariant>().is_err());
    }
}
