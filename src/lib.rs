//! figure-globe
//!
//! A slowly spinning earth inside a starfield, with a procedurally built
//! low-poly figure standing beside it. The figure's pose is driven by a tween
//! timeline; rendering goes through a small backend trait so the whole scene
//! runs headless natively and exports flat buffers to the browser on wasm.
//!
//! High-level modules
//! - `camera`: perspective projection and camera uniforms
//! - `config`: RON stage configuration with stock defaults
//! - `data_structures`: geometry, materials, lights, instances and the scene graph
//! - `figure`: procedural figure construction and posing
//! - `flow`: the per-frame loop (tween, pose, spin, render) and logger setup
//! - `globe`: earth, clouds and stars
//! - `random`: injectable random sources
//! - `render`: render composition, frames and the renderer backend trait
//! - `scene`: the scene host owning roots, lights and camera
//! - `tween`: tween timeline animating figure parameters
//!

pub mod camera;
pub mod config;
pub mod data_structures;
pub mod figure;
pub mod flow;
pub mod globe;
pub mod random;
pub mod render;
pub mod scene;
pub mod tween;
#[cfg(target_arch = "wasm32")]
pub mod web;

// Re-exports commonly used types for convenience in downstream code.
pub use cgmath;
pub use figure::{Figure, FigureOverrides, FigureParams};
pub use flow::{Stage, init_logger};
pub use scene::{Scene, SceneHost};
