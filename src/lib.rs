//! A 3D bag showcase for the terminal.
//!
//! A software rasterizer draws a lit, shadowed bag model with half-block
//! characters. The bag turns by itself, follows mouse drags, and is rebuilt
//! in a new color whenever a color button is picked. Below it a slider pages
//! through a fixed product catalog.

pub mod app;
pub mod bag;
pub mod catalog;
pub mod color;
pub mod config;
pub mod error;
pub mod geometry;
pub mod graphics;
pub mod input;
pub mod math;
pub mod page;
pub mod scene;
pub mod slider;
pub mod snapshot;
pub mod state;
pub mod terminal;
pub mod timer;
pub mod vertex;
pub mod viewer;

pub use color::Color;
pub use error::{Error, Result};
