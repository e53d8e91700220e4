//! Platform-independent core of the nebula sketch: stroke capture, particle
//! generation, the motion field, volume smoothing and frame compositing.

pub mod audio;
pub mod capture;
pub mod config;
pub mod constants;
pub mod error;
pub mod generator;
pub mod geometry;
pub mod motion;
pub mod particle;
pub mod render;
pub mod sketch;

pub use audio::*;
pub use capture::*;
pub use config::*;
pub use constants::*;
pub use error::*;
pub use generator::*;
pub use geometry::*;
pub use motion::*;
pub use particle::*;
pub use render::*;
pub use sketch::*;
