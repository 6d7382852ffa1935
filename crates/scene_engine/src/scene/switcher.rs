//! Active-scene selection
//!
//! The switcher owns the active [`Scene`] and rebuilds it from a preset on request.
//! The shader binding and viewport aspect ratio carry over to the new scene.

use crate::config::EngineConfig;
use crate::render::{DrawTarget, RenderStatus};

use super::presets::{self, PresetMeshes, SceneError};
use super::scene_graph::Scene;

/// Holds the active scene and its preset index
pub struct SceneSwitcher {
    meshes: PresetMeshes,
    config: EngineConfig,
    scene: Scene,
    current: Option<usize>,
}

impl SceneSwitcher {
    /// Switcher with an empty scene and nothing loaded
    pub fn new(meshes: PresetMeshes, config: EngineConfig) -> Self {
        let scene = Scene::with_config(&config);
        Self {
            meshes,
            config,
            scene,
            current: None,
        }
    }

    /// Load preset `index`
    ///
    /// Returns `Ok(false)` without touching the scene when `index` is already active.
    /// On error the current scene stays.
    pub fn load(&mut self, index: usize) -> Result<bool, SceneError> {
        if self.current == Some(index) {
            log::debug!("Scene {} already active", index);
            return Ok(false);
        }

        let mut next = presets::build(index, &self.meshes, &self.config)?;

        let aspect = self.scene.camera().map(|camera| camera.aspect_ratio());
        if let (Some(aspect), Some(camera)) = (aspect, next.camera_mut()) {
            camera.set_aspect_ratio(aspect, 1.0);
        }
        if let Some(shader) = self.scene.detach_shader() {
            next.attach_shader(shader);
        }

        self.scene = next;
        self.current = Some(index);
        log::info!("Switched to scene {} ({})", index, presets::name(index).unwrap_or("?"));
        Ok(true)
    }

    /// Index of the active preset
    pub fn current(&self) -> Option<usize> {
        self.current
    }

    /// Active scene
    pub fn scene(&self) -> &Scene {
        &self.scene
    }

    /// Active scene, for mutation
    pub fn scene_mut(&mut self) -> &mut Scene {
        &mut self.scene
    }

    /// Configuration presets are built with
    pub fn config(&self) -> &EngineConfig {
        &self.config
    }

    /// One frame: update with the active index, then render
    pub fn frame(&mut self, delta_time: f32, target: &mut dyn DrawTarget) -> RenderStatus {
        // usize::MAX never matches an animated preset
        self.scene.update(delta_time, self.current.unwrap_or(usize::MAX));
        self.scene.render(target)
    }
}
