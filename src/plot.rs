use image::{ImageResult, Rgb, RgbImage};
use std::path::Path;

use crate::draw::draw_thick_line_segment;
use crate::Style;

/// A raster canvas addressed in logical (real-valued) coordinates.
///
/// The canvas keeps a single units-per-pixel scale for both axes, so a
/// logical circle stays a circle on screen no matter how lopsided the
/// requested ranges are ("axis equal" semantics). Logical +y points up,
/// opposite to raster row order.
///
/// Strokes accumulate on the canvas until one of the `create`-family
/// methods wipes it back to the background.
#[derive(Debug, Clone)]
pub struct Plot {
    canvas: RgbImage,
    background: Rgb<u8>,
    margin: u32,
    cx: f64,
    cy: f64,
    upp: f64,
}

impl Plot {
    /// Creates a canvas of `rows` x `cols` pixels showing the logical
    /// ranges `[minx, maxx]` x `[miny, maxy]` inside a pixel margin.
    #[allow(clippy::too_many_arguments)]
    pub fn new(
        rows: u32,
        cols: u32,
        minx: f64,
        maxx: f64,
        miny: f64,
        maxy: f64,
        margin: u32,
    ) -> Self {
        let mut plot = Self {
            canvas: RgbImage::new(cols, rows),
            background: Rgb([255, 255, 255]),
            margin,
            cx: 0.0,
            cy: 0.0,
            upp: 1.0,
        };
        plot.set_axes(minx, maxx, miny, maxy, margin);
        plot.fill_background();
        plot
    }

    /// Discards the canvas contents and respecifies everything:
    /// dimensions, logical ranges, and margin.
    #[allow(clippy::too_many_arguments)]
    pub fn create(
        &mut self,
        rows: u32,
        cols: u32,
        minx: f64,
        maxx: f64,
        miny: f64,
        maxy: f64,
        margin: u32,
    ) {
        self.margin = margin;
        self.canvas = RgbImage::new(cols, rows);
        self.set_axes(minx, maxx, miny, maxy, margin);
        self.fill_background();
    }

    /// Like [`Plot::create`] but keeps the current margin.
    pub fn resize(&mut self, rows: u32, cols: u32, minx: f64, maxx: f64, miny: f64, maxy: f64) {
        self.canvas = RgbImage::new(cols, rows);
        self.set_axes(minx, maxx, miny, maxy, self.margin);
        self.fill_background();
    }

    /// Wipes the canvas and recomputes the axes over the current
    /// dimensions with a new margin.
    pub fn reset(&mut self, minx: f64, maxx: f64, miny: f64, maxy: f64, margin: u32) {
        self.margin = margin;
        self.set_axes(minx, maxx, miny, maxy, margin);
        self.fill_background();
    }

    /// Wipes the canvas and recomputes the axes, keeping dimensions and
    /// margin.
    pub fn rescale(&mut self, minx: f64, maxx: f64, miny: f64, maxy: f64) {
        self.set_axes(minx, maxx, miny, maxy, self.margin);
        self.fill_background();
    }

    fn fill_background(&mut self) {
        let background = self.background;
        for pixel in self.canvas.pixels_mut() {
            *pixel = background;
        }
    }

    fn set_axes(&mut self, minx: f64, maxx: f64, miny: f64, maxy: f64, margin: u32) {
        self.cx = (minx + maxx) / 2.0;
        self.cy = (miny + maxy) / 2.0;
        let upp_x = (maxx - minx) / (f64::from(self.canvas.width()) - 2.0 * f64::from(margin));
        let upp_y = (maxy - miny) / (f64::from(self.canvas.height()) - 2.0 * f64::from(margin));
        // axis equal
        self.upp = upp_x.max(upp_y);
    }

    fn to_px_x(&self, x: f64) -> i32 {
        ((x - self.cx) / self.upp).round() as i32 + self.canvas.width() as i32 / 2
    }

    fn to_px_y(&self, y: f64) -> i32 {
        self.canvas.height() as i32 / 2 - ((y - self.cy) / self.upp).round() as i32
    }

    /// Draws a line between two logical endpoints.
    pub fn line(&mut self, x1: f64, y1: f64, x2: f64, y2: f64, style: &Style) {
        let a = (self.to_px_x(x1) as f32, self.to_px_y(y1) as f32);
        let b = (self.to_px_x(x2) as f32, self.to_px_y(y2) as f32);
        draw_thick_line_segment(&mut self.canvas, a, b, style.color, style.thickness);
    }

    /// The rendered canvas.
    pub fn image(&self) -> &RgbImage {
        &self.canvas
    }

    /// The unified units-per-pixel scale shared by both axes.
    pub fn units_per_pixel(&self) -> f64 {
        self.upp
    }

    /// Writes the canvas to `path` (format derived from the extension).
    pub fn save<P: AsRef<Path>>(&self, path: P) -> ImageResult<()> {
        self.canvas.save(path)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const WHITE: Rgb<u8> = Rgb([255, 255, 255]);
    const RED: Rgb<u8> = Rgb([255, 0, 0]);

    #[test]
    fn axes_are_always_isotropic() {
        // Raw scales would be 2.0 in x and 1.0 in y; the larger wins.
        let plot = Plot::new(100, 100, 0.0, 160.0, 0.0, 80.0, 10);
        assert_eq!(plot.units_per_pixel(), 2.0);
    }

    #[test]
    fn canvas_starts_as_background() {
        let plot = Plot::new(50, 80, -1.0, 1.0, -1.0, 1.0, 5);
        assert_eq!(plot.image().dimensions(), (80, 50));
        assert!(plot.image().pixels().all(|p| *p == WHITE));
    }

    #[test]
    fn logical_lines_land_on_the_mapped_pixels() {
        let mut plot = Plot::new(100, 100, 0.0, 160.0, 0.0, 80.0, 10);
        // The logical center (80, 40) maps to pixel (50, 50); the x
        // range end maps 40 px further right at scale 2.
        plot.line(80.0, 40.0, 160.0, 40.0, &Style::new('r', 1));
        assert_eq!(*plot.image().get_pixel(50, 50), RED);
        assert_eq!(*plot.image().get_pixel(70, 50), RED);
        assert_eq!(*plot.image().get_pixel(90, 50), RED);
        assert_eq!(*plot.image().get_pixel(91, 50), WHITE);
    }

    #[test]
    fn logical_up_is_raster_up() {
        let mut plot = Plot::new(100, 100, 0.0, 160.0, 0.0, 80.0, 10);
        plot.line(80.0, 40.0, 80.0, 80.0, &Style::new('b', 1));
        // +y in logical coordinates decreases the row index.
        assert_eq!(*plot.image().get_pixel(50, 40), Rgb([0, 0, 255]));
        assert_eq!(*plot.image().get_pixel(50, 30), Rgb([0, 0, 255]));
        assert_eq!(*plot.image().get_pixel(50, 60), WHITE);
    }

    #[test]
    fn recreating_discards_previous_strokes() {
        let mut plot = Plot::new(100, 100, 0.0, 160.0, 0.0, 80.0, 10);
        plot.line(80.0, 40.0, 160.0, 40.0, &Style::new('r', 3));
        plot.rescale(0.0, 160.0, 0.0, 80.0);
        assert!(plot.image().pixels().all(|p| *p == WHITE));
    }

    #[test]
    fn resize_keeps_the_margin() {
        let mut plot = Plot::new(100, 100, 0.0, 160.0, 0.0, 80.0, 10);
        plot.resize(200, 200, 0.0, 160.0, 0.0, 80.0);
        assert_eq!(plot.image().dimensions(), (200, 200));
        // Inner extent is now 180 px, raw scales 160/180 and 80/180.
        assert!((plot.units_per_pixel() - 160.0 / 180.0).abs() < 1e-12);
    }

    #[test]
    fn reset_keeps_the_canvas_dimensions() {
        let mut plot = Plot::new(100, 100, 0.0, 160.0, 0.0, 80.0, 10);
        plot.reset(0.0, 80.0, 0.0, 80.0, 0);
        assert_eq!(plot.image().dimensions(), (100, 100));
        assert!((plot.units_per_pixel() - 0.8).abs() < 1e-12);
    }
}
