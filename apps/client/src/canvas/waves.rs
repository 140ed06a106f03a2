use super::{Effect, Point, Rgba, Surface, SAGE};

pub const SAMPLE_STEP: f64 = 5.0;
const TIME_STEP: f64 = 0.5;
const BASE_FRACTION: f64 = 0.6;

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct WaveLayer {
    /// Added to the shared baseline at 60% of the height.
    pub offset: f64,
    pub amplitude: f64,
    pub frequency: f64,
    pub speed: f64,
    pub alpha: f64,
}

pub const LAYERS: [WaveLayer; 3] = [
    WaveLayer {
        offset: 0.0,
        amplitude: 30.0,
        frequency: 0.01,
        speed: 0.02,
        alpha: 0.15,
    },
    WaveLayer {
        offset: 20.0,
        amplitude: 25.0,
        frequency: 0.015,
        speed: 0.025,
        alpha: 0.2,
    },
    WaveLayer {
        offset: 40.0,
        amplitude: 20.0,
        frequency: 0.02,
        speed: 0.03,
        alpha: 0.25,
    },
];

/// Three translucent sine bands filling the lower part of the view.
pub struct WaveLayers {
    width: f64,
    height: f64,
    time: f64,
    color: Rgba,
}

impl Default for WaveLayers {
    fn default() -> Self {
        Self::new(SAGE)
    }
}

impl WaveLayers {
    pub fn new(color: Rgba) -> Self {
        Self {
            width: 0.0,
            height: 0.0,
            time: 0.0,
            color,
        }
    }

    pub fn set_color(&mut self, color: Rgba) {
        self.color = color;
    }

    pub fn y_at(&self, layer: &WaveLayer, x: f64) -> f64 {
        let base = self.height * BASE_FRACTION + layer.offset;
        let t = self.time * layer.speed;
        base + (x * layer.frequency + t).sin() * layer.amplitude
            + (x * layer.frequency * 0.5 + t * 0.8).sin() * layer.amplitude * 0.5
    }

    /// Crest samples every `SAMPLE_STEP` px from 0 to the width inclusive.
    pub fn crest(&self, layer: &WaveLayer) -> Vec<Point> {
        let samples = (self.width / SAMPLE_STEP).floor() as usize;
        (0..=samples)
            .map(|i| {
                let x = i as f64 * SAMPLE_STEP;
                Point::new(x, self.y_at(layer, x))
            })
            .collect()
    }
}

impl Effect for WaveLayers {
    fn name(&self) -> &'static str {
        "waves"
    }

    fn resize(&mut self, width: f64, height: f64) {
        self.width = width;
        self.height = height;
    }

    fn step(&mut self) {
        self.time += TIME_STEP;
    }

    fn draw(&self, surface: &mut dyn Surface) {
        surface.clear();
        for layer in &LAYERS {
            let mut outline = vec![Point::new(0.0, self.height / 2.0)];
            outline.extend(self.crest(layer));
            outline.push(Point::new(self.width, self.height));
            outline.push(Point::new(0.0, self.height));
            surface.fill_polygon(&outline, self.color.with_alpha(layer.alpha), self.color.with_alpha(0.0));
        }
    }
}
