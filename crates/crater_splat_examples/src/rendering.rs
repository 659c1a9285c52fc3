use std::path::Path;

use crater_splat::craters::runner::ApplyReport;
use crater_splat::craters::CraterParams;
use crater_splat::sampling::{axis_bounds, CraterArea};
use glam::DVec2;
use image::{Rgb, RgbImage};
use tracing::info;
use tracing_subscriber::EnvFilter;

/// Install a formatting subscriber honoring `RUST_LOG`, defaulting to `info`.
pub fn init_tracing() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .try_init();
}

/// Colors used to shade the relief.
#[derive(Clone, Copy, Debug)]
pub struct CraterStyle {
    pub floor: [u8; 3],
    pub rim: [u8; 3],
    /// Draw a one-pixel outline at each crater radius.
    pub outline: Option<[u8; 3]>,
}

impl Default for CraterStyle {
    fn default() -> Self {
        Self {
            floor: [40, 44, 60],
            rim: [245, 240, 225],
            outline: None,
        }
    }
}

/// Top-down render settings. The image covers `[min, max]` on the x/z plane.
#[derive(Clone, Debug)]
pub struct RenderConfig {
    pub image_size: (u32, u32),
    pub min: DVec2,
    pub max: DVec2,
    pub background: [u8; 3],
    pub style: CraterStyle,
}

impl RenderConfig {
    pub fn new(image_size: (u32, u32), min: DVec2, max: DVec2) -> Self {
        Self {
            image_size,
            min,
            max,
            background: [128, 124, 118],
            style: CraterStyle::default(),
        }
    }

    /// Cover the sampling bounds of `area`, grown by `margin` world units on every side.
    pub fn for_area(image_size: (u32, u32), area: &CraterArea, margin: f64) -> Self {
        let (x0, x1) = axis_bounds(area.x);
        let (z0, z1) = axis_bounds(area.z);
        Self::new(
            image_size,
            DVec2::new(x0 - margin, z0 - margin),
            DVec2::new(x1 + margin, z1 + margin),
        )
    }

    pub fn with_background(mut self, rgb: [u8; 3]) -> Self {
        self.background = rgb;
        self
    }

    pub fn with_style(mut self, style: CraterStyle) -> Self {
        self.style = style;
        self
    }

    fn world_at(&self, px: u32, py: u32) -> DVec2 {
        let (w, h) = self.image_size;
        let u = (px as f64 + 0.5) / w.max(1) as f64;
        let v = (py as f64 + 0.5) / h.max(1) as f64;
        self.min + (self.max - self.min) * DVec2::new(u, v)
    }

    fn world_per_pixel(&self) -> f64 {
        let span = self.max - self.min;
        let per_x = span.x / self.image_size.0.max(1) as f64;
        let per_z = span.y / self.image_size.1.max(1) as f64;
        per_x.max(per_z)
    }
}

/// Approximate relief of one crater at `p`: a bowl inside the radius and a raised rim whose
/// falloff width is the rim skirt.
fn crater_height(c: &CraterParams, p: DVec2) -> f64 {
    let center = DVec2::new(c.position.x, c.position.z);
    let r = c.radius().max(f64::EPSILON);
    let d = p.distance(center);
    let skirt = c.rim_skirt.abs().max(r * 0.05);
    let rim = c.rim_height * (-((d - r) / skirt).powi(2) * 4.0).exp();
    if d < r {
        let t = d / r;
        // Softness flattens the floor.
        let exponent = 2.0 + 4.0 * c.softness.clamp(0.0, 1.0);
        rim - c.depth * (1.0 - t.powf(exponent))
    } else {
        rim
    }
}

fn mix(a: [u8; 3], b: [u8; 3], t: f64) -> Rgb<u8> {
    let t = t.clamp(0.0, 1.0);
    let ch = |i: usize| (a[i] as f64 + (b[i] as f64 - a[i] as f64) * t).round() as u8;
    Rgb([ch(0), ch(1), ch(2)])
}

/// Render the craters of `report` top-down and save to `path`.
pub fn render_report_to_png(
    report: &ApplyReport,
    config: &RenderConfig,
    path: impl AsRef<Path>,
) -> anyhow::Result<()> {
    let (w, h) = config.image_size;
    let mut heights = vec![0.0f64; (w as usize) * (h as usize)];
    let mut peak = f64::EPSILON;
    for py in 0..h {
        for px in 0..w {
            let p = config.world_at(px, py);
            let height: f64 = report.craters.iter().map(|c| crater_height(c, p)).sum();
            peak = peak.max(height.abs());
            heights[(py * w + px) as usize] = height;
        }
    }

    let style = config.style;
    let mut img = RgbImage::new(w, h);
    for (i, pixel) in img.pixels_mut().enumerate() {
        let t = heights[i] / peak;
        *pixel = if t < 0.0 {
            mix(config.background, style.floor, -t)
        } else {
            mix(config.background, style.rim, t)
        };
    }

    if let Some(color) = style.outline {
        let tolerance = config.world_per_pixel();
        for py in 0..h {
            for px in 0..w {
                let p = config.world_at(px, py);
                let on_rim = report.craters.iter().any(|c| {
                    let center = DVec2::new(c.position.x, c.position.z);
                    (p.distance(center) - c.radius()).abs() < tolerance
                });
                if on_rim {
                    img.put_pixel(px, py, Rgb(color));
                }
            }
        }
    }

    let path = path.as_ref();
    img.save(path)?;
    info!(
        "Rendered {} craters to {} ({}x{}).",
        report.craters.len(),
        path.display(),
        w,
        h
    );
    Ok(())
}
