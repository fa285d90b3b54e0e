//! UV-sphere tessellation.
//!
//! The layout follows the classic GLU quadric sphere: the polar axis is +Z,
//! `s` runs around the axis and `t` runs from 0 at -Z to 1 at +Z. Textures
//! uploaded bottom-row-first therefore map the same way they did under the
//! fixed-function pipeline.

use bytemuck::{Pod, Zeroable};

/// Vertex layout: position (vec3), normal (vec3), uv (vec2).
#[repr(C)]
#[derive(Debug, Copy, Clone, PartialEq, Pod, Zeroable)]
pub struct SphereVertex {
    pub position: [f32; 3],
    pub normal: [f32; 3],
    pub uv: [f32; 2],
}

impl SphereVertex {
    const ATTRS: [wgpu::VertexAttribute; 3] = wgpu::vertex_attr_array![
        0 => Float32x3, // position
        1 => Float32x3, // normal
        2 => Float32x2  // uv
    ];

    pub fn layout() -> wgpu::VertexBufferLayout<'static> {
        wgpu::VertexBufferLayout {
            array_stride: std::mem::size_of::<SphereVertex>() as u64,
            step_mode: wgpu::VertexStepMode::Vertex,
            attributes: &Self::ATTRS,
        }
    }
}

/// CPU-side sphere geometry.
#[derive(Debug, Clone)]
pub struct SphereMesh {
    pub vertices: Vec<SphereVertex>,
    pub indices: Vec<u32>,
}

impl SphereMesh {
    /// Tessellates a sphere of `radius` into `slices` around the polar axis and
    /// `stacks` along it. Normals are smooth (per vertex).
    ///
    /// Counts below the minimum that still encloses a volume are raised
    /// (3 slices, 2 stacks).
    pub fn uv_sphere(radius: f32, slices: u32, stacks: u32) -> Self {
        let slices = slices.max(3);
        let stacks = stacks.max(2);

        let ring = slices + 1;
        let mut vertices = Vec::with_capacity((ring * (stacks + 1)) as usize);

        for i in 0..=stacks {
            let rho = std::f32::consts::PI * i as f32 / stacks as f32;
            let t = 1.0 - i as f32 / stacks as f32;
            let (sin_rho, cos_rho) = rho.sin_cos();

            for j in 0..=slices {
                // The seam column repeats theta = 0 with s = 1.
                let theta = if j == slices {
                    0.0
                } else {
                    std::f32::consts::TAU * j as f32 / slices as f32
                };
                let (sin_theta, cos_theta) = theta.sin_cos();
                let normal = [-sin_theta * sin_rho, cos_theta * sin_rho, cos_rho];

                vertices.push(SphereVertex {
                    position: normal.map(|c| c * radius),
                    normal,
                    uv: [j as f32 / slices as f32, t],
                });
            }
        }

        let mut indices = Vec::with_capacity((slices * stacks * 6) as usize);
        for i in 0..stacks {
            for j in 0..slices {
                let a = i * ring + j;
                let b = a + ring;
                indices.extend_from_slice(&[a, b, a + 1, a + 1, b, b + 1]);
            }
        }

        Self { vertices, indices }
    }

    pub fn index_count(&self) -> u32 {
        self.indices.len() as u32
    }
}
