use std::f64::consts::TAU;

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use super::{Effect, Point, Rgba, Surface, COPPER, CORAL, SAGE, SAGE_DEEP};

/// Anchor as a fraction of the viewport, radius, colour, speed.
const LAYOUT: [(f64, f64, f64, Rgba, f64); 5] = [
    (0.2, 0.3, 200.0, SAGE, 0.0008),
    (0.8, 0.2, 180.0, CORAL, 0.001),
    (0.5, 0.7, 220.0, SAGE_DEEP, 0.0006),
    (0.15, 0.8, 160.0, COPPER, 0.0012),
    (0.85, 0.6, 190.0, SAGE, 0.0009),
];

const DRIFT_X: f64 = 50.0;
const DRIFT_Y: f64 = 40.0;

#[derive(Debug, Clone, PartialEq)]
pub struct Blob {
    pub base: Point,
    pub radius: f64,
    pub color: Rgba,
    pub speed: f64,
    pub phase: f64,
}

impl Blob {
    pub fn position(&self, time: f64) -> Point {
        Point::new(
            self.base.x + (time * self.speed + self.phase).sin() * DRIFT_X,
            self.base.y + (time * self.speed * 0.8 + self.phase).cos() * DRIFT_Y,
        )
    }

    fn stops(&self) -> [(f64, Rgba); 3] {
        [
            (0.0, self.color.with_alpha(0.6)),
            (0.5, self.color.with_alpha(0.3)),
            (1.0, self.color.with_alpha(0.0)),
        ]
    }
}

/// Five soft colour fields drifting around fixed anchors.
pub struct GradientBlobs {
    rng: StdRng,
    blobs: Vec<Blob>,
    time: f64,
}

impl Default for GradientBlobs {
    fn default() -> Self {
        Self::with_rng(StdRng::from_entropy())
    }
}

impl GradientBlobs {
    pub fn with_rng(rng: StdRng) -> Self {
        Self {
            rng,
            blobs: Vec::new(),
            time: 0.0,
        }
    }

    pub fn blobs(&self) -> &[Blob] {
        &self.blobs
    }

    pub fn time(&self) -> f64 {
        self.time
    }
}

impl Effect for GradientBlobs {
    fn name(&self) -> &'static str {
        "blobs"
    }

    fn resize(&mut self, width: f64, height: f64) {
        let rng = &mut self.rng;
        self.blobs = LAYOUT
            .iter()
            .map(|&(fx, fy, radius, color, speed)| Blob {
                base: Point::new(width * fx, height * fy),
                radius,
                color,
                speed,
                phase: rng.gen_range(0.0..TAU),
            })
            .collect();
    }

    fn step(&mut self) {
        self.time += 1.0;
    }

    fn draw(&self, surface: &mut dyn Surface) {
        surface.clear();
        for blob in &self.blobs {
            surface.fill_radial(blob.position(self.time), blob.radius, &blob.stops());
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::canvas::{DrawList, DrawOp};

    fn blobs() -> GradientBlobs {
        let mut effect = GradientBlobs::with_rng(StdRng::seed_from_u64(11));
        effect.resize(1000.0, 500.0);
        effect
    }

    #[test]
    fn test_anchors_follow_viewport() {
        let effect = blobs();
        let bases: Vec<Point> = effect.blobs().iter().map(|b| b.base).collect();
        assert_eq!(bases[0], Point::new(200.0, 150.0));
        assert_eq!(bases[4], Point::new(850.0, 300.0));
        assert_eq!(effect.blobs()[2].radius, 220.0);
        assert!(effect.blobs().iter().all(|b| (0.0..TAU).contains(&b.phase)));
    }

    #[test]
    fn test_drift_stays_within_bounds() {
        let mut effect = blobs();
        for _ in 0..5_000 {
            effect.step();
            for blob in effect.blobs() {
                let p = blob.position(effect.time());
                assert!((p.x - blob.base.x).abs() <= DRIFT_X + 1e-9);
                assert!((p.y - blob.base.y).abs() <= DRIFT_Y + 1e-9);
            }
        }
        assert_eq!(effect.time(), 5_000.0);
    }

    #[test]
    fn test_draws_one_gradient_per_blob() {
        let effect = blobs();
        let mut list = DrawList::new(1000.0, 500.0);
        effect.draw(&mut list);
        let radials: Vec<_> = list
            .ops()
            .iter()
            .filter_map(|op| match op {
                DrawOp::Radial { stops, .. } => Some(stops.clone()),
                _ => None,
            })
            .collect();
        assert_eq!(radials.len(), 5);
        let alphas: Vec<f64> = radials[1].iter().map(|(_, c)| c.a).collect();
        assert_eq!(alphas, vec![0.6, 0.3, 0.0]);
        assert_eq!(radials[1][0].1.with_alpha(1.0), CORAL);
    }
}
