//! Nimbus - composite renderer for NOAA CFSv2 ensemble forecast maps
//!
//! Downloads (or is pointed at) groups of monthly outlook maps, one PNG per
//! ensemble member, and renders one composite per group showing where the
//! ensemble agrees on color. The per-pixel voting and blending live in the
//! `ensemble-vote` crate; this library exposes the glue around it for
//! integration testing.

pub mod config;
pub mod error;
pub mod fetch;
pub mod group;
pub mod render;
pub mod walk;
