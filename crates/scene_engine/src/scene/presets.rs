//! Built-in demo scenes
//!
//! | Index | Scene                                   |
//! |-------|-----------------------------------------|
//! | 0     | Single colored triangle                 |
//! | 1     | Four spheres around a light bulb        |
//! | 2     | Sun, earth and moon                     |
//! | 3     | Forest path with benches and fireflies  |
//! | 4     | Whack-a-mole                            |
//!
//! Meshes are supplied by the host, so presets only arrange objects, lights and the
//! camera.

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use thiserror::Error;

use crate::config::EngineConfig;
use crate::foundation::math::{utils, Vec3, Vec4};
use crate::game::{TargetAppearances, WhackGame};
use crate::render::{Camera, Material, Mesh, MeshError};

use super::animators::{OrbitParams, OrbitRig};
use super::scene_graph::{Scene, SOLAR_SYSTEM_SCENE_INDEX};

/// Number of built-in scenes
pub const PRESET_COUNT: usize = 5;

/// Index of the whack-a-mole scene
pub const WHACK_A_MOLE_SCENE_INDEX: usize = 4;

const FOREST_LAYOUT_SEED: u64 = 0x5EED_F0E5;
const FOREST_PLANTS_PER_SIDE: usize = 75;
const FOREST_BENCH_PAIRS: usize = 5;

/// Scene construction errors
#[derive(Error, Debug)]
pub enum SceneError {
    /// No built-in scene has this index
    #[error("Unknown scene preset {0} (expected 0..{PRESET_COUNT})")]
    UnknownPreset(usize),

    /// A mesh could not be built
    #[error("Mesh error: {0}")]
    Mesh(#[from] MeshError),
}

/// Geometry the presets draw with
#[derive(Debug, Clone, PartialEq)]
pub struct PresetMeshes {
    /// Single triangle
    pub triangle: Mesh,
    /// Unit sphere
    pub sphere: Mesh,
    /// Unit ground quad in the XZ plane
    pub plane: Mesh,
    /// Tree
    pub tree: Mesh,
    /// Bush
    pub bush: Mesh,
    /// Park bench
    pub bench: Mesh,
}

/// Human-readable preset name
pub fn name(index: usize) -> Option<&'static str> {
    match index {
        0 => Some("triangle"),
        1 => Some("spheres"),
        SOLAR_SYSTEM_SCENE_INDEX => Some("solar system"),
        3 => Some("forest"),
        WHACK_A_MOLE_SCENE_INDEX => Some("whack-a-mole"),
        _ => None,
    }
}

/// Build the scene for `index`
pub fn build(index: usize, meshes: &PresetMeshes, config: &EngineConfig) -> Result<Scene, SceneError> {
    let mut scene = Scene::with_config(config);
    match index {
        0 => triangle(&mut scene, meshes, config),
        1 => spheres(&mut scene, meshes, config),
        SOLAR_SYSTEM_SCENE_INDEX => solar_system(&mut scene, meshes, config),
        3 => forest(&mut scene, meshes, config),
        WHACK_A_MOLE_SCENE_INDEX => whack_a_mole(&mut scene, meshes, config),
        _ => return Err(SceneError::UnknownPreset(index)),
    }
    log::info!(
        "Built scene {} ({}): {} objects, {} lights",
        index,
        name(index).unwrap_or("?"),
        scene.object_count(),
        scene.lights().len()
    );
    Ok(scene)
}

fn camera_at(position: Vec3, pitch_degrees: f32, config: &EngineConfig) -> Camera {
    let mut camera = Camera::from_config(position, &config.camera);
    camera.set_pitch(utils::deg_to_rad(pitch_degrees));
    camera
}

fn triangle(scene: &mut Scene, meshes: &PresetMeshes, config: &EngineConfig) {
    scene.set_camera(camera_at(Vec3::new(0.0, 0.0, 3.0), 0.0, config));
    scene.add_unlit_object(meshes.triangle.clone(), Vec4::new(1.0, 0.5, 0.2, 1.0));
}

fn spheres(scene: &mut Scene, meshes: &PresetMeshes, config: &EngineConfig) {
    scene.set_camera(camera_at(Vec3::new(0.0, 1.0, 8.0), -5.0, config));

    let light_position = Vec3::new(0.0, 1.5, 1.0);
    scene.add_point_light(light_position, Vec3::repeat(1.0), 1.0, 0.09, 0.032);
    let bulb = scene.add_unlit_object(meshes.sphere.clone(), Vec4::repeat(1.0));
    if let Some(object) = scene.object_mut(bulb) {
        object
            .transformation_mut()
            .translate(light_position)
            .scale(Vec3::repeat(0.1));
    }

    let tints = [
        Vec3::new(0.9, 0.2, 0.2),
        Vec3::new(0.2, 0.9, 0.2),
        Vec3::new(0.2, 0.3, 0.9),
        Vec3::new(0.9, 0.8, 0.2),
    ];
    for (i, tint) in tints.iter().enumerate() {
        let shininess = 8.0 * 2f32.powi(i as i32);
        let material = scene.add_material(Material::diffuse(*tint).with_shininess(shininess));
        let key = scene.add_object(meshes.sphere.clone(), material, Vec4::repeat(1.0));
        let x = -3.0 + 2.0 * i as f32;
        if let Some(object) = scene.object_mut(key) {
            object
                .transformation_mut()
                .translate(Vec3::new(x, 0.0, 0.0))
                .scale(Vec3::repeat(0.8));
        }
    }
}

fn solar_system(scene: &mut Scene, meshes: &PresetMeshes, config: &EngineConfig) {
    scene.set_camera(camera_at(Vec3::new(0.0, 8.0, 20.0), -20.0, config));
    scene.set_ambient_light(Vec3::repeat(0.05));

    let sun = scene.add_unlit_object(meshes.sphere.clone(), Vec4::new(1.0, 0.85, 0.3, 1.0));
    if let Some(object) = scene.object_mut(sun) {
        object.transformation_mut().scale(Vec3::repeat(2.5));
    }
    scene.add_point_light(Vec3::zeros(), Vec3::repeat(10.0), 1.0, 0.09, 0.032);

    let earth_material = scene.add_material(Material::diffuse(Vec3::new(0.2, 0.4, 0.9)).with_shininess(16.0));
    // Dusty surface: almost no highlight
    let moon_material = Material::diffuse(Vec3::repeat(0.6))
        .with_specular(Vec3::repeat(0.1))
        .with_shininess(4.0);
    let moon_material = scene.add_material(moon_material);
    let earth = scene.add_object(meshes.sphere.clone(), earth_material, Vec4::repeat(1.0));
    let moon = scene.add_object(meshes.sphere.clone(), moon_material, Vec4::repeat(1.0));

    scene.set_orbit(OrbitRig::new(earth, moon, OrbitParams::default()));
    // Zero-length step places both bodies at angle zero
    scene.update(0.0, SOLAR_SYSTEM_SCENE_INDEX);
}

fn forest(scene: &mut Scene, meshes: &PresetMeshes, config: &EngineConfig) {
    scene.set_camera(camera_at(Vec3::new(0.0, 1.7, 8.0), -3.0, config));
    scene.set_ambient_light(Vec3::repeat(0.03));
    scene.add_dir_light(Vec3::new(-0.2, -1.0, -0.3), Vec3::new(0.1, 0.1, 0.2));

    let ground_material = scene.add_material(Material::diffuse(Vec3::new(0.15, 0.3, 0.1)).with_shininess(2.0));
    let ground = scene.add_object(meshes.plane.clone(), ground_material, Vec4::repeat(1.0));
    if let Some(object) = scene.object_mut(ground) {
        object.transformation_mut().scale(Vec3::new(40.0, 1.0, 40.0));
    }

    let foliage = scene.add_material(Material::diffuse(Vec3::new(0.1, 0.45, 0.15)).with_shininess(4.0));
    let wood = scene.add_material(Material::diffuse(Vec3::new(0.45, 0.3, 0.15)).with_shininess(8.0));

    let mut rng = StdRng::seed_from_u64(FOREST_LAYOUT_SEED);
    for side in [-1.0f32, 1.0] {
        for _ in 0..FOREST_PLANTS_PER_SIDE {
            let position = Vec3::new(side * rng.gen_range(3.0..18.0), 0.0, rng.gen_range(-35.0..6.0));
            let heading = rng.gen_range(0.0..std::f32::consts::TAU);
            let (mesh, scale) = if rng.gen_bool(0.6) {
                (&meshes.tree, rng.gen_range(0.8..1.6))
            } else {
                (&meshes.bush, rng.gen_range(0.4..0.9))
            };
            let key = scene.add_object(mesh.clone(), foliage, Vec4::repeat(1.0));
            if let Some(object) = scene.object_mut(key) {
                object
                    .transformation_mut()
                    .translate(position)
                    .rotate(heading, Vec3::y())
                    .scale(Vec3::repeat(scale));
            }
        }
    }

    // Benches face each other across the path
    for pair in 0..FOREST_BENCH_PAIRS {
        let z = -(pair as f32) * 6.0;
        for side in [-1.0f32, 1.0] {
            let key = scene.add_object(meshes.bench.clone(), wood, Vec4::repeat(1.0));
            if let Some(object) = scene.object_mut(key) {
                object
                    .transformation_mut()
                    .translate(Vec3::new(side * 2.0, 0.0, z))
                    .rotate(side * std::f32::consts::FRAC_PI_2, Vec3::y());
            }
        }
    }

    let firefly_color = Vec3::new(1.0, 0.9, 0.4);
    for i in 0..6 {
        let side = if i % 2 == 0 { -1.0 } else { 1.0 };
        let base = Vec3::new(side * 1.2, 1.0 + 0.2 * (i % 3) as f32, -(i as f32) * 4.5);
        scene.add_firefly(base, firefly_color, Some(meshes.sphere.clone()));
    }
}

fn whack_a_mole(scene: &mut Scene, meshes: &PresetMeshes, config: &EngineConfig) {
    scene.set_camera(camera_at(Vec3::new(0.0, 6.0, 8.0), -35.0, config));
    scene.add_dir_light(Vec3::new(-0.3, -1.0, -0.4), Vec3::repeat(0.8));

    let extent = config.game.field_half_extent.abs() + 1.0;
    let ground_material = scene.add_material(Material::diffuse(Vec3::new(0.35, 0.25, 0.15)).with_shininess(4.0));
    let ground = scene.add_object(meshes.plane.clone(), ground_material, Vec4::repeat(1.0));
    if let Some(object) = scene.object_mut(ground) {
        object.transformation_mut().scale(Vec3::new(extent, 1.0, extent));
    }

    let target_material = scene.add_material(Material::default().with_shininess(64.0));
    scene.start_game(WhackGame::new(
        config.game.clone(),
        TargetAppearances::tinted(meshes.sphere.clone(), target_material),
    ));
}
