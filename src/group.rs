//! Group loading and validation.
//!
//! A group is one leaf directory whose direct children are the PNG maps of
//! a single (variable, forecast month) pair, one file per ensemble member
//! or historical run. Every map must decode and share one set of pixel
//! dimensions; anything else fails the load.

use std::fs::File;
use std::io::BufReader;
use std::path::{Path, PathBuf};

use ensemble_vote::{Raster, Rgba};

use crate::error::CompositeError;

/// Load every PNG directly inside `dir` into a validated raster group.
///
/// Files are loaded in sorted name order so the group's composition is
/// reproducible. Subdirectories and non-PNG files are ignored. Returns
/// [`CompositeError::EmptyGroup`] when no PNG is present, and fails fast
/// on the first decode error or dimension mismatch.
pub fn load_group(dir: &Path) -> Result<Vec<Raster>, CompositeError> {
    let mut files: Vec<PathBuf> = std::fs::read_dir(dir)?
        .filter_map(|entry| entry.ok())
        .map(|entry| entry.path())
        .filter(|path| path.is_file() && has_png_extension(path))
        .collect();
    files.sort();

    if files.is_empty() {
        return Err(CompositeError::EmptyGroup(dir.to_path_buf()));
    }

    let mut rasters: Vec<Raster> = Vec::with_capacity(files.len());
    for path in &files {
        let raster = decode_png(path)?;
        if let Some(first) = rasters.first() {
            if raster.dimensions() != first.dimensions() {
                return Err(CompositeError::DimensionMismatch {
                    path: path.clone(),
                    base_width: first.width(),
                    base_height: first.height(),
                    found_width: raster.width(),
                    found_height: raster.height(),
                });
            }
        }
        rasters.push(raster);
    }

    tracing::debug!(
        dir = %dir.display(),
        images = rasters.len(),
        "loaded raster group"
    );

    Ok(rasters)
}

fn has_png_extension(path: &Path) -> bool {
    path.extension()
        .map(|ext| ext.eq_ignore_ascii_case("png"))
        .unwrap_or(false)
}

/// Decode one PNG into an 8-bit RGBA raster.
///
/// Indexed, grayscale and sub-byte inputs are normalized to 8-bit channels
/// by the decoder; images without an alpha channel come out fully opaque.
pub fn decode_png(path: &Path) -> Result<Raster, CompositeError> {
    let file = File::open(path)?;
    let mut decoder = png::Decoder::new(BufReader::new(file));
    decoder.set_transformations(png::Transformations::normalize_to_color8());

    let mut reader = decoder.read_info().map_err(|e| CompositeError::Decode {
        path: path.to_path_buf(),
        reason: e.to_string(),
    })?;
    let mut buf = vec![0u8; reader.output_buffer_size()];
    let info = reader
        .next_frame(&mut buf)
        .map_err(|e| CompositeError::Decode {
            path: path.to_path_buf(),
            reason: e.to_string(),
        })?;

    // normalize_to_color8 leaves only 8-bit depths behind
    if info.bit_depth != png::BitDepth::Eight {
        return Err(CompositeError::Decode {
            path: path.to_path_buf(),
            reason: format!("unsupported bit depth {:?}", info.bit_depth),
        });
    }
    let pixels = expand_to_rgba(&buf[..info.buffer_size()], info.color_type).ok_or_else(|| {
        CompositeError::Decode {
            path: path.to_path_buf(),
            reason: format!("unsupported color type {:?}", info.color_type),
        }
    })?;

    Ok(Raster::new(pixels, info.width, info.height))
}

/// Expand normalized 8-bit decoder output to one [`Rgba`] per pixel.
fn expand_to_rgba(bytes: &[u8], color_type: png::ColorType) -> Option<Vec<Rgba>> {
    let pixels = match color_type {
        png::ColorType::Grayscale => bytes
            .iter()
            .map(|&v| Rgba::opaque(v, v, v))
            .collect(),
        png::ColorType::GrayscaleAlpha => bytes
            .chunks_exact(2)
            .map(|p| Rgba::new(p[0], p[0], p[0], p[1]))
            .collect(),
        png::ColorType::Rgb => bytes
            .chunks_exact(3)
            .map(|p| Rgba::opaque(p[0], p[1], p[2]))
            .collect(),
        png::ColorType::Rgba => bytes
            .chunks_exact(4)
            .map(|p| Rgba::new(p[0], p[1], p[2], p[3]))
            .collect(),
        // Indexed is expanded by the decoder transformation
        png::ColorType::Indexed => return None,
    };
    Some(pixels)
}
