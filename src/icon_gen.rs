use crate::manifest::{write_manifest, IconManifest};
use anyhow::{Context, Result};
use image::{
    codecs::png::{CompressionType, FilterType as PngFilterType, PngEncoder},
    ColorType, ImageEncoder, Rgba, RgbaImage,
};
use std::{
    fs::{create_dir_all, File},
    io::{BufWriter, Write},
    path::{Path, PathBuf},
};

/// Fill color of the whole canvas.
pub const BACKGROUND: Rgba<u8> = Rgba([70, 130, 200, 255]);

/// Fill color of the funnel and its spout.
pub const FOREGROUND: Rgba<u8> = Rgba([255, 255, 255, 255]);

/// Sizes written by a normal run, in pixels per side.
pub const DEFAULT_SIZES: [u32; 4] = [16, 32, 48, 64];

/// Options for a batch run: where to write, and whether to add `icons.json`
#[derive(Debug)]
pub struct Args {
    pub output: PathBuf,
    pub manifest: bool,
}

impl Default for Args {
    fn default() -> Self {
        Self {
            output: PathBuf::from("."),
            manifest: false,
        }
    }
}

/// Inclusive pixel bounds of the spout below the funnel neck
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Spout {
    pub left: i32,
    pub top: i32,
    pub right: i32,
    pub bottom: i32,
}

/// Funnel outline and spout for a given icon size
///
/// Every coordinate is an integer fraction of the size, so the shape scales
/// with the canvas. Below 8 pixels the offsets truncate to zero and the
/// shape degenerates, which is accepted.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FunnelGeometry {
    pub size: u32,
    pub padding: i32,
    pub neck_half_width: i32,
    /// Top left, top right, right middle, right bottom, left bottom, left middle
    pub funnel: [(i32, i32); 6],
    pub spout: Spout,
}

impl FunnelGeometry {
    pub fn for_size(size: u32) -> Self {
        let s = size as i32;
        let padding = s / 8;

        let top_y = padding;
        let mid_y = s / 2;
        let bottom_y = s - padding;
        let left_x = padding;
        let right_x = s - padding;
        let center_x = s / 2;

        let neck_half_width = s / 8;
        let neck_y = bottom_y - s / 4;

        let funnel = [
            (left_x, top_y),
            (right_x, top_y),
            (center_x + neck_half_width, mid_y),
            (center_x + neck_half_width, neck_y),
            (center_x - neck_half_width, neck_y),
            (center_x - neck_half_width, mid_y),
        ];

        // The spout runs from the neck down to the bottom padding line
        let spout_width = s / 4;
        let spout = Spout {
            left: center_x - spout_width / 2,
            top: neck_y,
            right: center_x + spout_width / 2,
            bottom: bottom_y,
        };

        Self {
            size,
            padding,
            neck_half_width,
            funnel,
            spout,
        }
    }
}

pub fn icon_filename(size: u32) -> String {
    format!("icon-{size}.png")
}

pub fn generate_icons(args: Args) -> Result<()> {
    // Ensure the output directory exists
    create_dir_all(&args.output).context("Can't create output directory")?;

    println!("Generating funnel icons...");
    for size in DEFAULT_SIZES {
        let filename = icon_filename(size);
        create_icon(size, &args.output.join(&filename))?;
        println!("  ✓ Created {filename}");
    }

    if args.manifest {
        write_manifest(&args.output, &IconManifest::from_sizes(&DEFAULT_SIZES))?;
    }

    println!("✓ All icons generated successfully!");
    Ok(())
}

/// Render the funnel icon for `size` and write it as a PNG, replacing any
/// existing file at `path`.
pub fn create_icon(size: u32, path: &Path) -> Result<()> {
    if size == 0 {
        anyhow::bail!("Icon size must be positive");
    }

    let icon = render_icon(size);

    let file = File::create(path)
        .with_context(|| format!("Failed to create {}", path.display()))?;
    let mut out_file = BufWriter::new(file);
    write_png(icon.as_raw(), &mut out_file, size)
        .with_context(|| format!("Failed to write PNG {}", path.display()))?;
    out_file
        .flush()
        .with_context(|| format!("Failed to write PNG {}", path.display()))?;

    Ok(())
}

/// Draw the icon into a fresh canvas without touching the filesystem
pub fn render_icon(size: u32) -> RgbaImage {
    let geometry = FunnelGeometry::for_size(size);
    let mut canvas = RgbaImage::from_pixel(size, size, BACKGROUND);

    fill_polygon(&mut canvas, &geometry.funnel, FOREGROUND);
    fill_rect(&mut canvas, geometry.spout, FOREGROUND);

    canvas
}

// Encode image data as PNG with compression
pub fn write_png<W: Write>(image_data: &[u8], w: W, size: u32) -> Result<()> {
    let encoder = PngEncoder::new_with_quality(w, CompressionType::Best, PngFilterType::Adaptive);
    encoder.write_image(image_data, size, size, ColorType::Rgba8)?;
    Ok(())
}

/// Check that an icon has the expected dimensions, a background corner and
/// a foreground center
pub fn check_icon(icon: &RgbaImage, size: u32) -> Result<()> {
    if icon.width() != size || icon.height() != size {
        anyhow::bail!(
            "Expected {size}x{size}, found {}x{}",
            icon.width(),
            icon.height()
        );
    }

    let corner = icon.get_pixel(0, 0);
    if *corner != BACKGROUND {
        anyhow::bail!("Corner pixel is {:?}, expected {:?}", corner.0, BACKGROUND.0);
    }

    let center = icon.get_pixel(size / 2, size / 2);
    if *center != FOREGROUND {
        anyhow::bail!("Center pixel is {:?}, expected {:?}", center.0, FOREGROUND.0);
    }

    Ok(())
}

/// Scanline polygon fill. Each row is filled between pairs of sorted edge
/// crossings, with the left crossing rounded by `ceil(x - 0.5)` and the right
/// by `floor(x + 0.5)`; horizontal edges are drawn as inclusive lines.
/// Pixels outside the canvas are skipped.
fn fill_polygon(canvas: &mut RgbaImage, points: &[(i32, i32)], color: Rgba<u8>) {
    let n = points.len();
    if n == 0 {
        return;
    }

    let mut edges = Vec::with_capacity(n);
    for i in 0..n {
        let (x0, y0) = points[i];
        let (x1, y1) = points[(i + 1) % n];
        if y0 == y1 {
            fill_hline(canvas, x0.min(x1), x0.max(x1), y0, color);
        } else {
            edges.push(Edge::new((x0, y0), (x1, y1)));
        }
    }

    let Some(ymin) = edges.iter().map(|e| e.ymin).min() else {
        return;
    };
    let ymax = edges.iter().map(|e| e.ymax).max().unwrap_or(ymin);

    let mut crossings = Vec::with_capacity(edges.len() * 2);
    for y in ymin.max(0)..=ymax.min(canvas.height() as i32 - 1) {
        crossings.clear();
        for edge in edges.iter().filter(|e| y >= e.ymin && y <= e.ymax) {
            let x = edge.x_at(y);
            crossings.push(x);
            // An edge ending on this row is counted twice so the row pairs up
            if y == edge.ymax && y < ymax {
                crossings.push(x);
            }
        }
        crossings.sort_by(f32::total_cmp);

        for pair in crossings.chunks_exact(2) {
            let x_start = (pair[0] - 0.5).ceil() as i32;
            let x_end = (pair[1] + 0.5).floor() as i32;
            if x_end >= x_start {
                fill_hline(canvas, x_start, x_end, y, color);
            }
        }
    }
}

/// Non-horizontal polygon edge
struct Edge {
    x0: i32,
    y0: i32,
    dx: f32,
    ymin: i32,
    ymax: i32,
}

impl Edge {
    fn new((x0, y0): (i32, i32), (x1, y1): (i32, i32)) -> Self {
        Self {
            x0,
            y0,
            dx: (x1 - x0) as f32 / (y1 - y0) as f32,
            ymin: y0.min(y1),
            ymax: y0.max(y1),
        }
    }

    fn x_at(&self, y: i32) -> f32 {
        (y - self.y0) as f32 * self.dx + self.x0 as f32
    }
}

/// Inclusive horizontal run, clipped to the canvas
fn fill_hline(canvas: &mut RgbaImage, x_start: i32, x_end: i32, y: i32, color: Rgba<u8>) {
    let (width, height) = (canvas.width() as i32, canvas.height() as i32);
    if y < 0 || y >= height {
        return;
    }

    for x in x_start.max(0)..=x_end.min(width - 1) {
        canvas.put_pixel(x as u32, y as u32, color);
    }
}

/// Fill inclusive rectangle bounds, clipped to the canvas
fn fill_rect(canvas: &mut RgbaImage, rect: Spout, color: Rgba<u8>) {
    for y in rect.top..=rect.bottom {
        fill_hline(canvas, rect.left, rect.right, y, color);
    }
}
