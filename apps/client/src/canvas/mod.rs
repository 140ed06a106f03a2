//! Decorative background effects.
//!
//! Each effect owns its state and draws onto a `Surface`. Two surfaces ship
//! here: `DrawList` records operations (used by tests and for inspection) and
//! `CharGrid` rasterises into an ASCII intensity grid for the terminal.

pub mod blobs;
pub mod orbs;
pub mod particles;
pub mod waves;

use std::fmt;

use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("'{0}' is not a #rrggbb colour")]
pub struct CanvasError(String);

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Rgba {
    pub r: u8,
    pub g: u8,
    pub b: u8,
    pub a: f64,
}

impl Rgba {
    pub const fn rgb(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b, a: 1.0 }
    }

    pub fn with_alpha(self, a: f64) -> Self {
        Self { a, ..self }
    }

    /// Parses `#rrggbb` (the leading `#` is optional).
    pub fn from_hex(hex: &str) -> Result<Self, CanvasError> {
        let digits = hex.trim().trim_start_matches('#');
        if digits.len() != 6 || !digits.is_ascii() {
            return Err(CanvasError(hex.to_string()));
        }
        let channel =
            |i: usize| u8::from_str_radix(&digits[i..i + 2], 16).map_err(|_| CanvasError(hex.to_string()));
        Ok(Self::rgb(channel(0)?, channel(2)?, channel(4)?))
    }

    /// Perceived brightness scaled by alpha, in `[0, 1]`.
    pub fn intensity(self) -> f64 {
        let luma = (0.299 * self.r as f64 + 0.587 * self.g as f64 + 0.114 * self.b as f64) / 255.0;
        (luma * self.a).clamp(0.0, 1.0)
    }
}

pub const SAGE: Rgba = Rgba::rgb(127, 154, 125);
pub const CORAL: Rgba = Rgba::rgb(217, 137, 108);
pub const SAGE_DEEP: Rgba = Rgba::rgb(78, 106, 83);
pub const COPPER: Rgba = Rgba::rgb(196, 106, 76);
pub const SAGE_LIGHT: Rgba = Rgba::rgb(159, 185, 159);

#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Point {
    pub x: f64,
    pub y: f64,
}

impl Point {
    pub const fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }

    pub fn distance(self, other: Point) -> f64 {
        (self.x - other.x).hypot(self.y - other.y)
    }
}

pub trait Surface {
    /// Drawable area in pixels.
    fn size(&self) -> (f64, f64);
    fn clear(&mut self);
    fn fill_circle(&mut self, center: Point, radius: f64, color: Rgba);
    fn stroke_line(&mut self, from: Point, to: Point, color: Rgba);
    /// `stops` are `(offset, colour)` pairs with offsets in `[0, 1]` from the centre out.
    fn fill_radial(&mut self, center: Point, radius: f64, stops: &[(f64, Rgba)]);
    /// Filled polygon shaded from `top` at y = 0 to `bottom` at the surface's height.
    fn fill_polygon(&mut self, points: &[Point], top: Rgba, bottom: Rgba);
}

pub trait Effect {
    fn name(&self) -> &'static str;
    fn resize(&mut self, width: f64, height: f64);
    /// Advances one animation frame.
    fn step(&mut self);
    fn draw(&self, surface: &mut dyn Surface);
    /// Only the particle field reacts to the pointer.
    fn set_pointer(&mut self, _pointer: Option<Point>) {}
}

// ──────────────────────────────────────────────
// Recording surface
// ──────────────────────────────────────────────

#[derive(Debug, Clone, PartialEq)]
pub enum DrawOp {
    Clear,
    Circle {
        center: Point,
        radius: f64,
        color: Rgba,
    },
    Line {
        from: Point,
        to: Point,
        color: Rgba,
    },
    Radial {
        center: Point,
        radius: f64,
        stops: Vec<(f64, Rgba)>,
    },
    Polygon {
        points: Vec<Point>,
        top: Rgba,
        bottom: Rgba,
    },
}

#[derive(Debug, Clone, Default)]
pub struct DrawList {
    width: f64,
    height: f64,
    ops: Vec<DrawOp>,
}

impl DrawList {
    pub fn new(width: f64, height: f64) -> Self {
        Self {
            width,
            height,
            ops: Vec::new(),
        }
    }

    pub fn ops(&self) -> &[DrawOp] {
        &self.ops
    }

    pub fn circles(&self) -> usize {
        self.ops.iter().filter(|op| matches!(op, DrawOp::Circle { .. })).count()
    }

    pub fn lines(&self) -> impl Iterator<Item = (Point, Point, Rgba)> + '_ {
        self.ops.iter().filter_map(|op| match op {
            DrawOp::Line { from, to, color } => Some((*from, *to, *color)),
            _ => None,
        })
    }
}

impl Surface for DrawList {
    fn size(&self) -> (f64, f64) {
        (self.width, self.height)
    }

    fn clear(&mut self) {
        self.ops.clear();
        self.ops.push(DrawOp::Clear);
    }

    fn fill_circle(&mut self, center: Point, radius: f64, color: Rgba) {
        self.ops.push(DrawOp::Circle { center, radius, color });
    }

    fn stroke_line(&mut self, from: Point, to: Point, color: Rgba) {
        self.ops.push(DrawOp::Line { from, to, color });
    }

    fn fill_radial(&mut self, center: Point, radius: f64, stops: &[(f64, Rgba)]) {
        self.ops.push(DrawOp::Radial {
            center,
            radius,
            stops: stops.to_vec(),
        });
    }

    fn fill_polygon(&mut self, points: &[Point], top: Rgba, bottom: Rgba) {
        self.ops.push(DrawOp::Polygon {
            points: points.to_vec(),
            top,
            bottom,
        });
    }
}

// ──────────────────────────────────────────────
// ASCII raster
// ──────────────────────────────────────────────

const RAMP: &[u8] = b" .:-=+*#%@";

/// Accumulates intensity per character cell; each cell covers a
/// `width / cols` by `height / rows` block of the effect's pixel space.
#[derive(Debug, Clone)]
pub struct CharGrid {
    cols: usize,
    rows: usize,
    width: f64,
    height: f64,
    cells: Vec<f64>,
}

impl CharGrid {
    pub fn new(cols: usize, rows: usize, width: f64, height: f64) -> Self {
        let cols = cols.max(1);
        let rows = rows.max(1);
        Self {
            cols,
            rows,
            width,
            height,
            cells: vec![0.0; cols * rows],
        }
    }

    pub fn intensity(&self, col: usize, row: usize) -> f64 {
        self.cells[row * self.cols + col]
    }

    fn cell_w(&self) -> f64 {
        self.width / self.cols as f64
    }

    fn cell_h(&self) -> f64 {
        self.height / self.rows as f64
    }

    fn cell_center(&self, col: usize, row: usize) -> Point {
        Point::new((col as f64 + 0.5) * self.cell_w(), (row as f64 + 0.5) * self.cell_h())
    }

    fn cell_at(&self, p: Point) -> Option<(usize, usize)> {
        if p.x < 0.0 || p.y < 0.0 || p.x >= self.width || p.y >= self.height {
            return None;
        }
        let col = ((p.x / self.cell_w()) as usize).min(self.cols - 1);
        let row = ((p.y / self.cell_h()) as usize).min(self.rows - 1);
        Some((col, row))
    }

    fn add(&mut self, col: usize, row: usize, amount: f64) {
        let cell = &mut self.cells[row * self.cols + col];
        *cell = (*cell + amount).min(1.0);
    }

    /// Adds `amount(centre)` to every cell it returns `Some` for.
    fn cover(&mut self, mut amount: impl FnMut(Point) -> Option<f64>) {
        for row in 0..self.rows {
            for col in 0..self.cols {
                if let Some(a) = amount(self.cell_center(col, row)) {
                    self.add(col, row, a);
                }
            }
        }
    }
}

fn interpolate_alpha(stops: &[(f64, Rgba)], t: f64) -> Option<Rgba> {
    let first = stops.first()?;
    if t <= first.0 {
        return Some(first.1);
    }
    for pair in stops.windows(2) {
        let (o0, c0) = pair[0];
        let (o1, c1) = pair[1];
        if t <= o1 {
            let f = if o1 > o0 { (t - o0) / (o1 - o0) } else { 1.0 };
            return Some(c0.with_alpha(c0.a + (c1.a - c0.a) * f));
        }
    }
    stops.last().map(|s| s.1)
}

/// Even-odd rule.
fn polygon_contains(points: &[Point], p: Point) -> bool {
    let mut inside = false;
    let mut j = points.len().wrapping_sub(1);
    for i in 0..points.len() {
        let (a, b) = (points[i], points[j]);
        if (a.y > p.y) != (b.y > p.y) && p.x < (b.x - a.x) * (p.y - a.y) / (b.y - a.y) + a.x {
            inside = !inside;
        }
        j = i;
    }
    inside
}

impl Surface for CharGrid {
    fn size(&self) -> (f64, f64) {
        (self.width, self.height)
    }

    fn clear(&mut self) {
        self.cells.iter_mut().for_each(|c| *c = 0.0);
    }

    fn fill_circle(&mut self, center: Point, radius: f64, color: Rgba) {
        let amount = color.intensity();
        let mut hit = false;
        self.cover(|p| {
            (p.distance(center) <= radius).then(|| {
                hit = true;
                amount
            })
        });
        // Circles smaller than a cell still mark the cell they sit in.
        if !hit {
            if let Some((col, row)) = self.cell_at(center) {
                self.add(col, row, amount);
            }
        }
    }

    fn stroke_line(&mut self, from: Point, to: Point, color: Rgba) {
        let amount = color.intensity();
        let step = self.cell_w().min(self.cell_h()).max(f64::EPSILON) / 2.0;
        let samples = (from.distance(to) / step).ceil().max(1.0) as usize;
        let mut last = None;
        for i in 0..=samples {
            let t = i as f64 / samples as f64;
            let p = Point::new(from.x + (to.x - from.x) * t, from.y + (to.y - from.y) * t);
            let cell = self.cell_at(p);
            if cell.is_some() && cell != last {
                if let Some((col, row)) = cell {
                    self.add(col, row, amount);
                }
                last = cell;
            }
        }
    }

    fn fill_radial(&mut self, center: Point, radius: f64, stops: &[(f64, Rgba)]) {
        if radius <= 0.0 {
            return;
        }
        self.cover(|p| {
            let t = p.distance(center) / radius;
            if t > 1.0 {
                return None;
            }
            interpolate_alpha(stops, t).map(Rgba::intensity)
        });
    }

    fn fill_polygon(&mut self, points: &[Point], top: Rgba, bottom: Rgba) {
        if points.len() < 3 {
            return;
        }
        let height = self.height.max(f64::EPSILON);
        self.cover(|p| {
            if !polygon_contains(points, p) {
                return None;
            }
            let t = (p.y / height).clamp(0.0, 1.0);
            interpolate_alpha(&[(0.0, top), (1.0, bottom)], t).map(Rgba::intensity)
        });
    }
}

impl fmt::Display for CharGrid {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let top = (RAMP.len() - 1) as f64;
        for row in 0..self.rows {
            let line: String = (0..self.cols)
                .map(|col| RAMP[(self.intensity(col, row) * top).round() as usize] as char)
                .collect();
            writeln!(f, "{}", line.trim_end())?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_hex() {
        assert_eq!(Rgba::from_hex("#7f9a7d").unwrap(), SAGE);
        assert_eq!(Rgba::from_hex("d9896c").unwrap(), CORAL);
        assert!(Rgba::from_hex("#7f9a7").is_err());
        assert!(Rgba::from_hex("#zz9a7d").is_err());
    }

    #[test]
    fn test_interpolate_alpha_between_stops() {
        let stops = [(0.0, SAGE.with_alpha(0.6)), (0.5, SAGE.with_alpha(0.3)), (1.0, SAGE.with_alpha(0.0))];
        assert!((interpolate_alpha(&stops, 0.25).unwrap().a - 0.45).abs() < 1e-9);
        assert!((interpolate_alpha(&stops, 1.0).unwrap().a).abs() < 1e-9);
    }

    #[test]
    fn test_grid_marks_small_circle_cell() {
        let mut grid = CharGrid::new(10, 5, 100.0, 50.0);
        grid.fill_circle(Point::new(55.0, 25.0), 1.0, Rgba::rgb(255, 255, 255));
        assert!(grid.intensity(5, 2) > 0.99);
        assert_eq!(grid.intensity(0, 0), 0.0);
    }

    #[test]
    fn test_grid_line_touches_both_ends() {
        let mut grid = CharGrid::new(10, 1, 100.0, 10.0);
        grid.stroke_line(Point::new(1.0, 5.0), Point::new(99.0, 5.0), Rgba::rgb(255, 255, 255).with_alpha(0.5));
        for col in 0..10 {
            assert!(grid.intensity(col, 0) > 0.0, "column {col} untouched");
        }
    }

    #[test]
    fn test_polygon_fill_respects_outline() {
        let mut grid = CharGrid::new(4, 4, 40.0, 40.0);
        let lower_half = [
            Point::new(0.0, 20.0),
            Point::new(40.0, 20.0),
            Point::new(40.0, 40.0),
            Point::new(0.0, 40.0),
        ];
        let white = Rgba::rgb(255, 255, 255);
        grid.fill_polygon(&lower_half, white, white);
        assert_eq!(grid.intensity(0, 0), 0.0);
        assert!(grid.intensity(0, 3) > 0.99);
    }

    #[test]
    fn test_display_has_one_line_per_row() {
        let grid = CharGrid::new(8, 3, 80.0, 30.0);
        assert_eq!(grid.to_string().lines().count(), 3);
    }
}
