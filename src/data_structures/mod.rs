//! Scene data: geometry, materials, lights, instances and the node tree.
//!
//! - `geometry` holds the procedural cuboid and sphere meshes
//! - `instance` holds local transforms and their GPU-ready world form
//! - `light` holds light descriptions and their uniforms
//! - `material` holds colours and surface descriptions
//! - `scene_graph` enables hierarchical scene organization

pub mod geometry;
pub mod instance;
pub mod light;
pub mod material;
pub mod scene_graph;
