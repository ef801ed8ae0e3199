//! CPU-side cylinder geometry for the disk.
//!
//! The cylinder axis is +Y. Vertices are interleaved as position (3),
//! normal (3), uv (2). Indices are grouped into three draw ranges so each
//! face can be drawn with its own texture.

use std::f32::consts::TAU;

pub const FLOATS_PER_VERTEX: usize = 8;

/// A contiguous index range drawn with one material.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Submesh {
    /// Offset into the index buffer, in indices.
    pub first: usize,
    pub count: usize,
}

#[derive(Debug, Clone)]
pub struct DiskMesh {
    pub vertices: Vec<f32>,
    pub indices: Vec<u16>,
    pub side: Submesh,
    pub top: Submesh,
    pub bottom: Submesh,
}

impl DiskMesh {
    pub fn vertex_count(&self) -> usize {
        self.vertices.len() / FLOATS_PER_VERTEX
    }
}

struct Builder {
    vertices: Vec<f32>,
    indices: Vec<u16>,
}

impl Builder {
    fn vertex(&mut self, position: [f32; 3], normal: [f32; 3], uv: [f32; 2]) -> u16 {
        let index = (self.vertices.len() / FLOATS_PER_VERTEX) as u16;
        self.vertices.extend_from_slice(&position);
        self.vertices.extend_from_slice(&normal);
        self.vertices.extend_from_slice(&uv);
        index
    }

    fn triangle(&mut self, a: u16, b: u16, c: u16) {
        self.indices.extend_from_slice(&[a, b, c]);
    }

    /// Fan-triangulated cap. `v_sign` mirrors the image vertically so the
    /// bottom face reads upright once the disk is flipped over.
    fn cap(&mut self, radius: f32, y: f32, segments: u32, v_sign: f32) -> Submesh {
        let first = self.indices.len();
        let normal = [0.0, y.signum(), 0.0];
        let centre = self.vertex([0.0, y, 0.0], normal, [0.5, 0.5]);
        let ring_start = centre + 1;
        for i in 0..=segments {
            let theta = i as f32 / segments as f32 * TAU;
            let (sin, cos) = theta.sin_cos();
            self.vertex(
                [radius * cos, y, radius * sin],
                normal,
                [0.5 + 0.5 * cos, 0.5 + 0.5 * sin * v_sign],
            );
        }
        for i in 0..segments as u16 {
            let (a, b) = (ring_start + i, ring_start + i + 1);
            // Counter-clockwise seen from outside along the cap normal.
            if y > 0.0 {
                self.triangle(centre, b, a);
            } else {
                self.triangle(centre, a, b);
            }
        }
        Submesh {
            first,
            count: self.indices.len() - first,
        }
    }

    fn side(&mut self, radius: f32, half_height: f32, segments: u32) -> Submesh {
        let first = self.indices.len();
        let ring_start = (self.vertices.len() / FLOATS_PER_VERTEX) as u16;
        for i in 0..=segments {
            let u = i as f32 / segments as f32;
            let (sin, cos) = (u * TAU).sin_cos();
            let normal = [cos, 0.0, sin];
            self.vertex([radius * cos, half_height, radius * sin], normal, [u, 0.0]);
            self.vertex([radius * cos, -half_height, radius * sin], normal, [u, 1.0]);
        }
        for i in 0..segments as u16 {
            let top = ring_start + 2 * i;
            let bottom = top + 1;
            let next_top = top + 2;
            let next_bottom = top + 3;
            self.triangle(top, next_top, bottom);
            self.triangle(bottom, next_top, next_bottom);
        }
        Submesh {
            first,
            count: self.indices.len() - first,
        }
    }
}

/// Builds a closed cylinder. `segments` is clamped to at least 3.
pub fn cylinder(radius: f32, height: f32, segments: u32) -> DiskMesh {
    let segments = segments.max(3);
    let half = height * 0.5;
    let mut b = Builder {
        vertices: Vec::with_capacity((4 * segments as usize + 6) * FLOATS_PER_VERTEX),
        indices: Vec::with_capacity(12 * segments as usize),
    };
    let side = b.side(radius, half, segments);
    let top = b.cap(radius, half, segments, 1.0);
    let bottom = b.cap(radius, -half, segments, -1.0);
    DiskMesh {
        vertices: b.vertices,
        indices: b.indices,
        side,
        top,
        bottom,
    }
}
