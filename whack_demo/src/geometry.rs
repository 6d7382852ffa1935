//! Procedural demo meshes
//!
//! Non-indexed triangle lists, six floats per vertex (position, normal). A real host
//! would upload these under the mesh handle; the headless demo only needs the
//! bounds `Mesh::from_interleaved` derives from them.

use scene_engine::foundation::math::Vec3;
use scene_engine::render::Mesh;
use scene_engine::scene::{PresetMeshes, SceneError};

const STRIDE: usize = 6;

fn push_vertex(data: &mut Vec<f32>, position: Vec3, normal: Vec3) {
    data.extend_from_slice(&[position.x, position.y, position.z, normal.x, normal.y, normal.z]);
}

fn push_quad(data: &mut Vec<f32>, corners: [Vec3; 4], normal: Vec3) {
    for i in [0, 1, 2, 0, 2, 3] {
        push_vertex(data, corners[i], normal);
    }
}

fn push_cuboid(data: &mut Vec<f32>, center: Vec3, half: Vec3) {
    let c = |x: f32, y: f32, z: f32| center + Vec3::new(x * half.x, y * half.y, z * half.z);
    push_quad(data, [c(-1.0, -1.0, 1.0), c(1.0, -1.0, 1.0), c(1.0, 1.0, 1.0), c(-1.0, 1.0, 1.0)], Vec3::z());
    push_quad(data, [c(1.0, -1.0, -1.0), c(-1.0, -1.0, -1.0), c(-1.0, 1.0, -1.0), c(1.0, 1.0, -1.0)], -Vec3::z());
    push_quad(data, [c(1.0, -1.0, 1.0), c(1.0, -1.0, -1.0), c(1.0, 1.0, -1.0), c(1.0, 1.0, 1.0)], Vec3::x());
    push_quad(data, [c(-1.0, -1.0, -1.0), c(-1.0, -1.0, 1.0), c(-1.0, 1.0, 1.0), c(-1.0, 1.0, -1.0)], -Vec3::x());
    push_quad(data, [c(-1.0, 1.0, 1.0), c(1.0, 1.0, 1.0), c(1.0, 1.0, -1.0), c(-1.0, 1.0, -1.0)], Vec3::y());
    push_quad(data, [c(-1.0, -1.0, -1.0), c(1.0, -1.0, -1.0), c(1.0, -1.0, 1.0), c(-1.0, -1.0, 1.0)], -Vec3::y());
}

fn triangle() -> Vec<f32> {
    let mut data = Vec::with_capacity(3 * STRIDE);
    for position in [Vec3::new(-0.5, -0.5, 0.0), Vec3::new(0.5, -0.5, 0.0), Vec3::new(0.0, 0.5, 0.0)] {
        push_vertex(&mut data, position, Vec3::z());
    }
    data
}

fn ground_quad() -> Vec<f32> {
    let mut data = Vec::with_capacity(6 * STRIDE);
    push_quad(
        &mut data,
        [
            Vec3::new(-1.0, 0.0, 1.0),
            Vec3::new(1.0, 0.0, 1.0),
            Vec3::new(1.0, 0.0, -1.0),
            Vec3::new(-1.0, 0.0, -1.0),
        ],
        Vec3::y(),
    );
    data
}

fn uv_sphere(slices: usize, stacks: usize) -> Vec<f32> {
    let point = |slice: usize, stack: usize| {
        let theta = std::f32::consts::TAU * slice as f32 / slices as f32;
        let phi = std::f32::consts::PI * stack as f32 / stacks as f32;
        Vec3::new(phi.sin() * theta.cos(), phi.cos(), phi.sin() * theta.sin())
    };

    let mut data = Vec::with_capacity(slices * stacks * 6 * STRIDE);
    for stack in 0..stacks {
        for slice in 0..slices {
            let quad = [
                point(slice, stack),
                point(slice + 1, stack),
                point(slice + 1, stack + 1),
                point(slice, stack + 1),
            ];
            // Unit sphere: position doubles as normal
            for i in [0, 1, 2, 0, 2, 3] {
                push_vertex(&mut data, quad[i], quad[i]);
            }
        }
    }
    data
}

fn tree() -> Vec<f32> {
    let mut data = Vec::new();
    push_cuboid(&mut data, Vec3::new(0.0, 0.75, 0.0), Vec3::new(0.15, 0.75, 0.15));
    push_cuboid(&mut data, Vec3::new(0.0, 2.2, 0.0), Vec3::new(0.8, 0.9, 0.8));
    data
}

fn bush() -> Vec<f32> {
    let mut data = Vec::new();
    push_cuboid(&mut data, Vec3::new(0.0, 0.4, 0.0), Vec3::new(0.6, 0.4, 0.6));
    data
}

fn bench() -> Vec<f32> {
    let mut data = Vec::new();
    push_cuboid(&mut data, Vec3::new(0.0, 0.45, 0.0), Vec3::new(0.9, 0.05, 0.25));
    push_cuboid(&mut data, Vec3::new(0.0, 0.8, -0.22), Vec3::new(0.9, 0.3, 0.03));
    for x in [-0.8, 0.8] {
        push_cuboid(&mut data, Vec3::new(x, 0.2, 0.0), Vec3::new(0.05, 0.2, 0.2));
    }
    data
}

/// Describe every mesh the presets use
pub fn preset_meshes() -> Result<PresetMeshes, SceneError> {
    Ok(PresetMeshes {
        triangle: Mesh::from_interleaved(1, &triangle(), STRIDE)?,
        sphere: Mesh::from_interleaved(2, &uv_sphere(24, 16), STRIDE)?,
        plane: Mesh::from_interleaved(3, &ground_quad(), STRIDE)?,
        tree: Mesh::from_interleaved(4, &tree(), STRIDE)?,
        bush: Mesh::from_interleaved(5, &bush(), STRIDE)?,
        bench: Mesh::from_interleaved(6, &bench(), STRIDE)?,
    })
}
