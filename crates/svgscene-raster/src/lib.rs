//! PNG raster target for `svgscene`.
//!
//! `PngCanvas` implements the three scene primitives on an `image::RgbImage`:
//! - filled ellipses: every pixel whose centre lies inside the ellipse
//! - lines: clipped to the canvas, then Bresenham with both endpoints included
//! - filled polygons: scanline at pixel centres, even-odd rule
//!
//! All writes are clipped to the image and overwrite what is there.

use std::path::{Path, PathBuf};

use image::{ImageFormat, Rgb, RgbImage};
use svgscene::{Canvas, Color, Point};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum RasterError {
    #[error("Unable to write {}", .path.display())]
    Encode {
        path: PathBuf,
        #[source]
        source: image::ImageError,
    },
}

pub type Result<T> = std::result::Result<T, RasterError>;

#[derive(Debug, Clone)]
pub struct PngCanvas {
    image: RgbImage,
}

impl PngCanvas {
    pub fn new(width: u32, height: u32, background: Color) -> Self {
        Self {
            image: RgbImage::from_pixel(width, height, to_rgb(background)),
        }
    }

    pub fn width(&self) -> u32 {
        self.image.width()
    }

    pub fn height(&self) -> u32 {
        self.image.height()
    }

    /// Colour at `(x, y)`, `None` outside the canvas
    pub fn pixel(&self, x: u32, y: u32) -> Option<Color> {
        self.image
            .get_pixel_checked(x, y)
            .map(|&Rgb([r, g, b])| Color::rgb(r, g, b))
    }

    pub fn into_image(self) -> RgbImage {
        self.image
    }

    /// Encode as PNG
    pub fn save(&self, path: impl AsRef<Path>) -> Result<()> {
        let path = path.as_ref();
        log::debug!(
            "Writing {}x{} PNG to {}",
            self.width(),
            self.height(),
            path.display()
        );
        self.image
            .save_with_format(path, ImageFormat::Png)
            .map_err(|source| RasterError::Encode {
                path: path.to_path_buf(),
                source,
            })
    }

    fn put(&mut self, x: i64, y: i64, color: Rgb<u8>) {
        if x < 0 || y < 0 || x >= i64::from(self.width()) || y >= i64::from(self.height()) {
            return;
        }
        self.image.put_pixel(x as u32, y as u32, color);
    }

    /// Fill `x0..=x1` on row `y`, clipped
    fn span(&mut self, y: i64, x0: i64, x1: i64, color: Rgb<u8>) {
        if y < 0 || y >= i64::from(self.height()) {
            return;
        }
        let x0 = x0.max(0);
        let x1 = x1.min(i64::from(self.width()) - 1);
        for x in x0..=x1 {
            self.image.put_pixel(x as u32, y as u32, color);
        }
    }

    /// Liang-Barsky clip of a segment to the pixel grid, `None` when it misses
    fn clip_segment(&self, from: Point, to: Point) -> Option<((i64, i64), (i64, i64))> {
        if self.width() == 0 || self.height() == 0 {
            return None;
        }
        let (x0, y0) = (f64::from(from.x), f64::from(from.y));
        let (dx, dy) = (f64::from(to.x) - x0, f64::from(to.y) - y0);
        let x_max = f64::from(self.width() - 1);
        let y_max = f64::from(self.height() - 1);

        let (mut t0, mut t1) = (0.0_f64, 1.0_f64);
        for (p, q) in [(-dx, x0), (dx, x_max - x0), (-dy, y0), (dy, y_max - y0)] {
            if p == 0.0 {
                if q < 0.0 {
                    return None;
                }
            } else if p < 0.0 {
                t0 = t0.max(q / p);
            } else {
                t1 = t1.min(q / p);
            }
        }
        if t0 > t1 {
            return None;
        }

        let at = |t: f64| ((x0 + t * dx).round() as i64, (y0 + t * dy).round() as i64);
        Some((at(t0), at(t1)))
    }

    /// Rows `y0..=y1` clipped to the canvas
    fn rows(&self, y0: i64, y1: i64) -> std::ops::RangeInclusive<i64> {
        y0.max(0)..=y1.min(i64::from(self.height()) - 1)
    }
}

impl Canvas for PngCanvas {
    fn draw_ellipse(&mut self, center: Point, radius: Point, fill: Color) {
        let color = to_rgb(fill);
        let (cx, cy) = (i64::from(center.x), i64::from(center.y));
        // Negative radii come from mirroring scales; draw the magnitude
        let rx = i64::from(radius.x).abs();
        let ry = i64::from(radius.y).abs();

        for y in self.rows(cy - ry, cy + ry) {
            let dy = (y - cy) as f64;
            let half = if ry == 0 {
                rx as f64
            } else {
                let t = dy / ry as f64;
                rx as f64 * (1.0 - t * t).max(0.0).sqrt()
            };
            let half = (half + 1e-9).floor() as i64;
            self.span(y, cx - half, cx + half, color);
        }
    }

    fn draw_line(&mut self, from: Point, to: Point, stroke: Color) {
        let color = to_rgb(stroke);
        let Some((from, to)) = self.clip_segment(from, to) else {
            return;
        };
        let (mut x, mut y) = from;
        let (x1, y1) = to;

        let dx = (x1 - x).abs();
        let dy = -(y1 - y).abs();
        let sx = if x < x1 { 1 } else { -1 };
        let sy = if y < y1 { 1 } else { -1 };
        let mut err = dx + dy;

        loop {
            self.put(x, y, color);
            if x == x1 && y == y1 {
                break;
            }
            let e2 = 2 * err;
            if e2 >= dy {
                err += dy;
                x += sx;
            }
            if e2 <= dx {
                err += dx;
                y += sy;
            }
        }
    }

    fn draw_polygon(&mut self, points: &[Point], fill: Color) {
        if points.len() < 3 {
            return;
        }
        let color = to_rgb(fill);

        let min_y = points.iter().map(|p| i64::from(p.y)).min().unwrap_or(0);
        let max_y = points.iter().map(|p| i64::from(p.y)).max().unwrap_or(0);

        let mut crossings = Vec::with_capacity(points.len());
        for y in self.rows(min_y, max_y) {
            let sample = y as f64 + 0.5;
            crossings.clear();

            for (i, a) in points.iter().enumerate() {
                let b = points[(i + 1) % points.len()];
                let (ay, by) = (f64::from(a.y), f64::from(b.y));
                if (ay <= sample) != (by <= sample) {
                    let t = (sample - ay) / (by - ay);
                    crossings.push(f64::from(a.x) + t * (f64::from(b.x) - f64::from(a.x)));
                }
            }

            crossings.sort_by(f64::total_cmp);
            for pair in crossings.chunks_exact(2) {
                // Pixels whose centre x + 0.5 falls in [left, right)
                let x0 = (pair[0] - 0.5).ceil() as i64;
                let x1 = (pair[1] - 0.5).ceil() as i64 - 1;
                if x0 <= x1 {
                    self.span(y, x0, x1, color);
                }
            }
        }
    }
}

fn to_rgb(color: Color) -> Rgb<u8> {
    Rgb([color.r, color.g, color.b])
}
