//! Procedural primitive geometry.
//!
//! Geometry is described by its parameters only; vertex and index data is
//! generated on demand by [`Geometry::build`] when a renderer backend uploads it.

use std::f32::consts::{PI, TAU};

/// Vertex layout handed to renderer backends.
#[repr(C)]
#[derive(Copy, Clone, Debug, PartialEq, bytemuck::Pod, bytemuck::Zeroable)]
pub struct ModelVertex {
    pub position: [f32; 3],
    pub normal: [f32; 3],
    pub tex_coords: [f32; 2],
}

#[derive(Clone, Debug, Default)]
pub struct MeshData {
    pub vertices: Vec<ModelVertex>,
    pub indices: Vec<u32>,
}

impl MeshData {
    pub fn vertex_bytes(&self) -> &[u8] {
        bytemuck::cast_slice(&self.vertices)
    }

    pub fn index_bytes(&self) -> &[u8] {
        bytemuck::cast_slice(&self.indices)
    }

    pub fn triangle_count(&self) -> usize {
        self.indices.len() / 3
    }
}

/// A box centred on the origin or a UV sphere.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum Geometry {
    Cuboid {
        width: f32,
        height: f32,
        depth: f32,
    },
    Sphere {
        radius: f32,
        width_segments: u32,
        height_segments: u32,
    },
}

impl Geometry {
    pub fn cuboid(width: f32, height: f32, depth: f32) -> Self {
        Geometry::Cuboid {
            width,
            height,
            depth,
        }
    }

    /// Segment counts below the minimum that still encloses a volume (3 around, 2 down) are raised.
    pub fn sphere(radius: f32, width_segments: u32, height_segments: u32) -> Self {
        Geometry::Sphere {
            radius,
            width_segments: width_segments.max(3),
            height_segments: height_segments.max(2),
        }
    }

    pub fn build(&self) -> MeshData {
        match *self {
            Geometry::Cuboid {
                width,
                height,
                depth,
            } => build_cuboid(width, height, depth),
            Geometry::Sphere {
                radius,
                width_segments,
                height_segments,
            } => build_sphere(radius, width_segments, height_segments),
        }
    }
}

fn build_cuboid(width: f32, height: f32, depth: f32) -> MeshData {
    let (hw, hh, hd) = (width * 0.5, height * 0.5, depth * 0.5);
    // (normal, u axis, v axis) per face, each axis scaled by the half extent along it
    let faces: [([f32; 3], [f32; 3], [f32; 3]); 6] = [
        ([1.0, 0.0, 0.0], [0.0, 0.0, -hd], [0.0, hh, 0.0]),
        ([-1.0, 0.0, 0.0], [0.0, 0.0, hd], [0.0, hh, 0.0]),
        ([0.0, 1.0, 0.0], [hw, 0.0, 0.0], [0.0, 0.0, -hd]),
        ([0.0, -1.0, 0.0], [hw, 0.0, 0.0], [0.0, 0.0, hd]),
        ([0.0, 0.0, 1.0], [hw, 0.0, 0.0], [0.0, hh, 0.0]),
        ([0.0, 0.0, -1.0], [-hw, 0.0, 0.0], [0.0, hh, 0.0]),
    ];
    let mut mesh = MeshData::default();
    for (normal, u, v) in faces {
        let centre = [normal[0] * hw, normal[1] * hh, normal[2] * hd];
        let base = mesh.vertices.len() as u32;
        for (su, sv) in [(-1.0, -1.0), (1.0, -1.0), (1.0, 1.0), (-1.0, 1.0)] {
            let position = [
                centre[0] + su * u[0] + sv * v[0],
                centre[1] + su * u[1] + sv * v[1],
                centre[2] + su * u[2] + sv * v[2],
            ];
            mesh.vertices.push(ModelVertex {
                position,
                normal,
                tex_coords: [(su + 1.0) * 0.5, 1.0 - (sv + 1.0) * 0.5],
            });
        }
        mesh.indices
            .extend_from_slice(&[base, base + 1, base + 2, base, base + 2, base + 3]);
    }
    mesh
}

fn build_sphere(radius: f32, width_segments: u32, height_segments: u32) -> MeshData {
    let mut mesh = MeshData::default();
    for iy in 0..=height_segments {
        let v = iy as f32 / height_segments as f32;
        let theta = v * PI;
        for ix in 0..=width_segments {
            let u = ix as f32 / width_segments as f32;
            let phi = u * TAU;
            let normal = [
                -phi.cos() * theta.sin(),
                theta.cos(),
                phi.sin() * theta.sin(),
            ];
            mesh.vertices.push(ModelVertex {
                position: [normal[0] * radius, normal[1] * radius, normal[2] * radius],
                normal,
                tex_coords: [u, 1.0 - v],
            });
        }
    }
    let stride = width_segments + 1;
    for iy in 0..height_segments {
        for ix in 0..width_segments {
            let a = iy * stride + ix + 1;
            let b = iy * stride + ix;
            let c = (iy + 1) * stride + ix;
            let d = (iy + 1) * stride + ix + 1;
            // the poles collapse to a point, so only one triangle per quad there
            if iy != 0 {
                mesh.indices.extend_from_slice(&[a, b, d]);
            }
            if iy != height_segments - 1 {
                mesh.indices.extend_from_slice(&[b, c, d]);
            }
        }
    }
    mesh
}
