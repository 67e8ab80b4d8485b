//! Composite rendering: one output PNG per raster group.

use std::fs::File;
use std::io::BufWriter;
use std::path::{Path, PathBuf};

use ensemble_vote::{aggregate, blend, RenderPolicy, Rgba};

use crate::error::CompositeError;
use crate::group::load_group;

/// Render the composite for one leaf directory.
///
/// Loads and validates the group, aggregates per-pixel votes, blends every
/// pixel under `policy` and writes the result to [`composite_path`].
/// Returns the path of the written file.
pub fn render_group(
    leaf: &Path,
    policy: RenderPolicy,
    out_root: &Path,
) -> Result<PathBuf, CompositeError> {
    let group = load_group(leaf)?;
    let stats = aggregate(&group)?;

    let pixels: Vec<Rgba> = stats.stats().iter().map(|s| blend(s, policy)).collect();

    let out_path = composite_path(leaf, out_root);
    if let Some(parent) = out_path.parent() {
        std::fs::create_dir_all(parent)?;
    }
    write_png(&out_path, &pixels, stats.width(), stats.height())?;

    tracing::debug!(
        input = %leaf.display(),
        output = %out_path.display(),
        members = group.len(),
        policy = %policy,
        "rendered composite"
    );

    Ok(out_path)
}

/// Deterministic output location for a leaf directory.
///
/// A leaf at `<root>/<variable>/<forecast_month>` maps to
/// `<out_root>/<variable>/<forecast_month>.png`, so composites keep the
/// identifying path segments of the group they summarize.
pub fn composite_path(leaf: &Path, out_root: &Path) -> PathBuf {
    let mut path = out_root.to_path_buf();
    if let Some(variable) = leaf.parent().and_then(|p| p.file_name()) {
        path.push(variable);
    }
    match leaf.file_name() {
        Some(name) => path.push(name),
        None => path.push("composite"),
    }
    path.set_extension("png");
    path
}

/// Encode an RGBA pixel grid as an 8-bit PNG file.
fn write_png(
    path: &Path,
    pixels: &[Rgba],
    width: u32,
    height: u32,
) -> Result<(), CompositeError> {
    let file = File::create(path)?;
    let mut encoder = png::Encoder::new(BufWriter::new(file), width, height);
    encoder.set_color(png::ColorType::Rgba);
    encoder.set_depth(png::BitDepth::Eight);

    let mut writer = encoder
        .write_header()
        .map_err(|e| CompositeError::PngEncode(e.to_string()))?;

    let mut data = Vec::with_capacity(pixels.len() * 4);
    for pixel in pixels {
        data.extend_from_slice(&[pixel.r, pixel.g, pixel.b, pixel.a]);
    }
    writer
        .write_image_data(&data)
        .map_err(|e| CompositeError::PngEncode(e.to_string()))?;

    Ok(())
}
