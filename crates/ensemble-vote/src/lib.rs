//! ensemble-vote: per-pixel color voting for ensemble raster sets
//!
//! Given a group of equally-sized RGBA rasters (one per ensemble member),
//! this library computes, at every pixel position, which color the members
//! agree on and how strongly, then blends that agreement into a single
//! output color under a selectable policy.
//!
//! # Quick Start
//!
//! ```
//! use ensemble_vote::{aggregate, blend, Raster, RenderPolicy, Rgba};
//!
//! let red = Raster::new(vec![Rgba::opaque(255, 0, 0)], 1, 1);
//! let green = Raster::new(vec![Rgba::opaque(0, 255, 0)], 1, 1);
//!
//! let stats = aggregate(&[red.clone(), red, green]).unwrap();
//! let out = blend(stats.get(0, 0), RenderPolicy::White);
//!
//! // Two of three members voted red: blended two thirds toward red.
//! assert_eq!(out, Rgba::opaque(255, 85, 85));
//! ```
//!
//! # Pipeline
//!
//! The two stages are independent and pure:
//!
//! 1. [`aggregate`] builds a per-pixel color frequency table across the
//!    group and extracts the most frequent and second most frequent
//!    distinct colors into a [`PixelStat`] grid.
//! 2. [`blend`] turns each [`PixelStat`] into one output color under a
//!    [`RenderPolicy`]. Low agreement fades toward white (or toward the
//!    runner-up color under [`RenderPolicy::Smooth`]).
//!
//! Aggregation has no data dependency between pixel positions, so callers
//! are free to split the grid into disjoint row ranges and run them in
//! parallel; the single-threaded result is the reference behavior.

pub mod aggregate;
pub mod blend;
pub mod color;
pub mod raster;

#[cfg(test)]
mod domain_tests;

pub use aggregate::{aggregate, AggregateError, PixelStat, StatGrid};
pub use blend::{blend, ParsePolicyError, RenderPolicy};
pub use color::Rgba;
pub use raster::Raster;
