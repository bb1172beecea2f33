//! Detection heuristics over positioned rectangles.
//!
//! Both detectors are advisory: they degrade to `None`/defaults instead of
//! failing, and their tolerance constants are preserved exactly because
//! borderline inputs are sensitive to them.
//!
//! Submodules:
//! - spacing: infer the representative gap between elements
//! - alignment: infer orientation and cross-axis alignment

mod alignment;
mod spacing;

pub use alignment::{Detected, classify};
pub use spacing::detect_spacing;
