//! Scene - objects, lights, camera and the per-frame loop
//!
//! The scene owns everything one frame needs:
//! 1. An ordered object arena (draw order = insertion order)
//! 2. The light set, camera and shader binding
//! 3. Animators and the optional mini-game
//!
//! Camera and light uniforms are tracked with dirty flags and re-sent at most once
//! per frame, before the object loop. Per-object uniforms are sent for every draw.

use bitflags::bitflags;

use crate::config::EngineConfig;
use crate::foundation::collections::{LightKey, MaterialKey, ObjectKey};
use crate::foundation::math::{Vec3, Vec4};
use crate::game::{HitOutcome, ObjectArena, TargetKind, WhackGame};
use crate::input::{CameraController, CameraMovement, HeadlessTarget};
use crate::render::shader::{names, ShaderBinding};
use crate::render::{
    Camera, DrawTarget, FrameStats, Light, LightSet, Material, MaterialLibrary, Mesh,
    RenderStatus, SkipReason,
};

use super::animators::{Firefly, OrbitRig, FIREFLY_MARKER_SCALE};
use super::object::{DrawableObject, ObjectId};

/// Scene index whose update drives the sun/earth/moon orbit
pub const SOLAR_SYSTEM_SCENE_INDEX: usize = 2;

bitflags! {
    /// Uniform groups that must be re-sent on the next frame
    #[derive(Debug, Clone, Copy, PartialEq, Eq)]
    pub struct DirtyFlags: u8 {
        /// View and projection matrices, view position
        const CAMERA = 1 << 0;
        /// Ambient, light arrays, flashlight
        const LIGHTS = 1 << 1;
    }
}

/// Uniform traffic of one [`Scene::sync_uniforms`] call
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SyncReport {
    /// Whether view/projection were written
    pub camera_uploaded: bool,
    /// Lights written (flashlight excluded); 0 when light uniforms were current
    pub lights_submitted: usize,
}

/// A renderable scene
pub struct Scene {
    objects: ObjectArena,
    materials: MaterialLibrary,
    lights: LightSet,
    camera: Option<Camera>,
    controller: CameraController,
    shader: Option<Box<dyn ShaderBinding>>,
    dirty: DirtyFlags,
    fireflies: Vec<Firefly>,
    orbit: Option<OrbitRig>,
    game: Option<WhackGame>,
    elapsed: f32,
}

impl Default for Scene {
    fn default() -> Self {
        Self::new()
    }
}

impl Scene {
    /// Empty scene with default configuration
    pub fn new() -> Self {
        Self::with_config(&EngineConfig::default())
    }

    /// Empty scene using configured lighting and camera controls
    pub fn with_config(config: &EngineConfig) -> Self {
        Self {
            objects: ObjectArena::new(),
            materials: MaterialLibrary::new(),
            lights: LightSet::from_config(&config.lighting),
            camera: None,
            controller: CameraController::from_config(&config.camera),
            shader: None,
            dirty: DirtyFlags::all(),
            fireflies: Vec::new(),
            orbit: None,
            game: None,
            elapsed: 0.0,
        }
    }

    // ---------------------------------------------------------------------------------
    // Shader and camera
    // ---------------------------------------------------------------------------------

    /// Attach the shader binding; everything is re-sent on the next frame
    pub fn attach_shader(&mut self, shader: Box<dyn ShaderBinding>) {
        self.shader = Some(shader);
        self.dirty = DirtyFlags::all();
    }

    /// Take the shader binding back out of the scene
    pub fn detach_shader(&mut self) -> Option<Box<dyn ShaderBinding>> {
        self.shader.take()
    }

    /// Whether a shader binding is attached
    pub fn has_shader(&self) -> bool {
        self.shader.is_some()
    }

    /// Install the camera
    pub fn set_camera(&mut self, camera: Camera) {
        self.camera = Some(camera);
        self.dirty = DirtyFlags::all();
    }

    /// Current camera
    pub fn camera(&self) -> Option<&Camera> {
        self.camera.as_ref()
    }

    /// Camera for mutation; its uniforms are re-sent on the next frame
    pub fn camera_mut(&mut self) -> Option<&mut Camera> {
        self.dirty |= DirtyFlags::CAMERA;
        self.camera.as_mut()
    }

    /// Viewport resize
    pub fn set_aspect_ratio(&mut self, width: f32, height: f32) {
        if let Some(camera) = self.camera_mut() {
            camera.set_aspect_ratio(width, height);
        }
    }

    /// Apply held movement keys for one frame
    pub fn move_camera(&mut self, held: &[CameraMovement], delta_time: f32) {
        if held.is_empty() {
            return;
        }
        if let Some(camera) = self.camera.as_mut() {
            self.controller.process_polled_movement(camera, held, delta_time);
            self.dirty |= DirtyFlags::CAMERA;
        }
    }

    /// Mouse look
    pub fn look(&mut self, x_offset: f32, y_offset: f32) {
        if let Some(camera) = self.camera.as_mut() {
            self.controller.process_mouse(camera, x_offset, y_offset, true);
            self.dirty |= DirtyFlags::CAMERA;
        }
    }

    /// Scroll zoom
    pub fn zoom(&mut self, y_offset: f32) {
        if let Some(camera) = self.camera.as_mut() {
            self.controller.process_scroll(camera, y_offset);
            self.dirty |= DirtyFlags::CAMERA;
        }
    }

    /// Pending uniform groups
    pub fn dirty_flags(&self) -> DirtyFlags {
        self.dirty
    }

    // ---------------------------------------------------------------------------------
    // Materials and objects
    // ---------------------------------------------------------------------------------

    /// Register a shared material
    pub fn add_material(&mut self, material: Material) -> MaterialKey {
        self.materials.add(material)
    }

    /// Material library
    pub fn materials(&self) -> &MaterialLibrary {
        &self.materials
    }

    /// Material library for mutation
    pub fn materials_mut(&mut self) -> &mut MaterialLibrary {
        &mut self.materials
    }

    /// Add a lit object with a tint
    pub fn add_object(&mut self, mesh: Mesh, material: MaterialKey, color: Vec4) -> ObjectKey {
        self.insert_object(DrawableObject::new(mesh, material).with_color(color))
    }

    /// Add an object that ignores lighting
    pub fn add_unlit_object(&mut self, mesh: Mesh, color: Vec4) -> ObjectKey {
        let material = self.materials.default_key();
        self.insert_object(
            DrawableObject::new(mesh, material)
                .with_color(color)
                .with_unlit(true),
        )
    }

    /// Add a fully built object
    pub fn insert_object(&mut self, object: DrawableObject) -> ObjectKey {
        self.objects.insert(object)
    }

    /// Remove an object; keys held elsewhere stop resolving
    pub fn remove_object(&mut self, key: ObjectKey) -> Option<DrawableObject> {
        self.objects.remove(key)
    }

    /// Empty the scene: objects, lights, fireflies, orbit rig and game.
    /// Camera, shader and materials stay.
    pub fn clear_objects(&mut self) {
        self.objects.clear();
        self.lights.clear();
        self.fireflies.clear();
        self.orbit = None;
        self.game = None;
        self.dirty |= DirtyFlags::LIGHTS;
    }

    /// Number of objects
    pub fn object_count(&self) -> usize {
        self.objects.len()
    }

    /// Object at a position in draw order
    pub fn get_object(&self, index: usize) -> Option<&DrawableObject> {
        self.objects.key_at(index).and_then(|key| self.objects.get(key))
    }

    /// Object at a position in draw order, for mutation
    pub fn get_object_mut(&mut self, index: usize) -> Option<&mut DrawableObject> {
        let key = self.objects.key_at(index)?;
        self.objects.get_mut(key)
    }

    /// Object with a picking id (linear scan)
    pub fn get_object_by_id(&self, id: ObjectId) -> Option<&DrawableObject> {
        self.objects
            .iter()
            .find(|(_, object)| object.id() == id)
            .map(|(_, object)| object)
    }

    /// Arena key of the object with a picking id (linear scan)
    pub fn object_key_by_id(&self, id: ObjectId) -> Option<ObjectKey> {
        self.objects
            .iter()
            .find(|(_, object)| object.id() == id)
            .map(|(key, _)| key)
    }

    /// Object by key
    pub fn object(&self, key: ObjectKey) -> Option<&DrawableObject> {
        self.objects.get(key)
    }

    /// Object by key, for mutation
    pub fn object_mut(&mut self, key: ObjectKey) -> Option<&mut DrawableObject> {
        self.objects.get_mut(key)
    }

    /// Object under a window coordinate of the last frame drawn into `target`
    pub fn pick_at(&self, target: &HeadlessTarget, x: usize, y: usize) -> Option<ObjectId> {
        target
            .pick(x, y)
            .filter(|id| self.get_object_by_id(*id).is_some())
    }

    /// Objects in draw order
    pub fn objects(&self) -> impl Iterator<Item = (ObjectKey, &DrawableObject)> + '_ {
        self.objects.iter()
    }

    // ---------------------------------------------------------------------------------
    // Lights
    // ---------------------------------------------------------------------------------

    /// Set the global ambient color
    pub fn set_ambient_light(&mut self, color: Vec3) {
        self.lights.set_ambient_light(color);
        self.dirty |= DirtyFlags::LIGHTS;
    }

    /// Append a directional light
    pub fn add_dir_light(&mut self, direction: Vec3, color: Vec3) -> LightKey {
        self.dirty |= DirtyFlags::LIGHTS;
        self.lights.add_dir_light(direction, color)
    }

    /// Append a point light
    pub fn add_point_light(
        &mut self,
        position: Vec3,
        color: Vec3,
        constant: f32,
        linear: f32,
        quadratic: f32,
    ) -> LightKey {
        self.dirty |= DirtyFlags::LIGHTS;
        self.lights.add_point_light(position, color, constant, linear, quadratic)
    }

    /// Append a spot light
    pub fn add_spot_light(
        &mut self,
        position: Vec3,
        direction: Vec3,
        color: Vec3,
        constant: f32,
        linear: f32,
        quadratic: f32,
        inner_cutoff_cos: f32,
        outer_cutoff_cos: f32,
    ) -> LightKey {
        self.dirty |= DirtyFlags::LIGHTS;
        self.lights.add_spot_light(
            position,
            direction,
            color,
            constant,
            linear,
            quadratic,
            inner_cutoff_cos,
            outer_cutoff_cos,
        )
    }

    /// Light by key
    pub fn light(&self, key: LightKey) -> Option<&Light> {
        self.lights.light(key)
    }

    /// Light by key, for mutation; light uniforms are re-sent on the next frame
    pub fn light_mut(&mut self, key: LightKey) -> Option<&mut Light> {
        self.dirty |= DirtyFlags::LIGHTS;
        self.lights.light_mut(key)
    }

    /// Remove a light
    pub fn remove_light(&mut self, key: LightKey) -> Option<Light> {
        self.dirty |= DirtyFlags::LIGHTS;
        self.lights.remove_light(key)
    }

    /// The light set
    pub fn lights(&self) -> &LightSet {
        &self.lights
    }

    /// Flip the flashlight; returns the new state
    pub fn toggle_flashlight(&mut self) -> bool {
        self.dirty |= DirtyFlags::LIGHTS;
        self.lights.toggle_flashlight()
    }

    /// Switch the flashlight explicitly
    pub fn set_flashlight_enabled(&mut self, enabled: bool) {
        self.dirty |= DirtyFlags::LIGHTS;
        self.lights.set_flashlight_enabled(enabled);
    }

    /// Add a wandering point light, with a small unlit marker if a mesh is given
    pub fn add_firefly(&mut self, base: Vec3, color: Vec3, marker_mesh: Option<Mesh>) -> LightKey {
        let light = self.add_point_light(base, color, 1.0, 0.7, 1.8);
        let marker = marker_mesh.map(|mesh| {
            let key = self.add_unlit_object(mesh, color.push(1.0));
            if let Some(object) = self.objects.get_mut(key) {
                object
                    .transformation_mut()
                    .translate(base)
                    .scale(Vec3::repeat(FIREFLY_MARKER_SCALE));
            }
            key
        });
        let phase = self.fireflies.len() as f32 * 1.7;
        self.fireflies.push(Firefly::new(light, marker, base, phase));
        light
    }

    /// Fireflies in the scene
    pub fn fireflies(&self) -> &[Firefly] {
        &self.fireflies
    }

    // ---------------------------------------------------------------------------------
    // Animation and game
    // ---------------------------------------------------------------------------------

    /// Install the sun/earth/moon rig
    pub fn set_orbit(&mut self, orbit: OrbitRig) {
        self.orbit = Some(orbit);
    }

    /// Orbit rig, if any
    pub fn orbit(&self) -> Option<&OrbitRig> {
        self.orbit.as_ref()
    }

    /// Start the mini-game
    pub fn start_game(&mut self, game: WhackGame) {
        self.game = Some(game);
    }

    /// Mini-game, if running
    pub fn game(&self) -> Option<&WhackGame> {
        self.game.as_ref()
    }

    /// Spawn a target immediately, outside the game's timer
    ///
    /// Returns `None` when no game is running or the game is finished.
    pub fn spawn_target(&mut self, kind: TargetKind, ground: Vec3) -> Option<ObjectId> {
        let game = self.game.as_mut()?;
        game.spawn(kind, ground, &mut self.objects)
    }

    /// Register a hit on an object (usually resolved from a stencil read-back)
    ///
    /// Ids that no longer resolve to an object in this scene never score.
    pub fn hit_object(&mut self, id: ObjectId) -> HitOutcome {
        match self.game.as_mut() {
            Some(game) => game.hit_object(id, &self.objects),
            None => HitOutcome::NotATarget,
        }
    }

    /// Seconds of simulated time
    pub fn elapsed(&self) -> f32 {
        self.elapsed
    }

    /// Advance animation and game state by one frame
    pub fn update(&mut self, delta_time: f32, active_scene_index: usize) {
        self.elapsed += delta_time;

        if let Some(camera) = self.camera.as_ref() {
            if self.lights.sync_flashlight(camera) && self.lights.flashlight_enabled() {
                self.dirty |= DirtyFlags::LIGHTS;
            }
        }

        for firefly in &self.fireflies {
            if firefly.animate(self.elapsed, &mut self.lights, &mut self.objects) {
                self.dirty |= DirtyFlags::LIGHTS;
            }
        }

        if active_scene_index == SOLAR_SYSTEM_SCENE_INDEX {
            if let Some(orbit) = self.orbit.as_mut() {
                orbit.advance(delta_time, &mut self.objects);
            }
        }

        if let Some(game) = self.game.as_mut() {
            game.update(delta_time, &mut self.objects);
        }
    }

    // ---------------------------------------------------------------------------------
    // Rendering
    // ---------------------------------------------------------------------------------

    /// Send dirty camera and light uniforms to a shader the host manages itself
    ///
    /// [`Scene::render`] does the same for the attached shader. Returns `None` when no
    /// camera is set.
    pub fn sync_uniforms(&mut self, shader: &mut dyn ShaderBinding) -> Option<SyncReport> {
        let camera = self.camera.as_ref()?;
        Some(push_frame_uniforms(&mut self.dirty, camera, &self.lights, shader))
    }

    /// Draw one frame
    ///
    /// Without a camera or shader the frame is skipped. Otherwise camera and light
    /// uniforms are synced once, then every object is drawn in insertion order with
    /// its id as stencil reference.
    pub fn render(&mut self, target: &mut dyn DrawTarget) -> RenderStatus {
        let Some(camera) = self.camera.as_ref() else {
            log::debug!("Skipping frame: no camera");
            return RenderStatus::Skipped(SkipReason::NoCamera);
        };
        let Some(shader) = self.shader.as_deref_mut() else {
            log::debug!("Skipping frame: no shader");
            return RenderStatus::Skipped(SkipReason::NoShader);
        };

        shader.bind();
        let sync = push_frame_uniforms(&mut self.dirty, camera, &self.lights, shader);

        target.begin_frame(&camera.view_projection());
        let mut objects_drawn = 0;
        for (_, object) in self.objects.iter() {
            let material = self.materials.resolve(object.material());
            object.draw(material, shader, target);
            objects_drawn += 1;
        }
        target.end_frame();

        RenderStatus::Rendered(FrameStats {
            objects_drawn,
            camera_uploaded: sync.camera_uploaded,
            lights_submitted: sync.lights_submitted,
        })
    }
}

fn push_frame_uniforms(
    dirty: &mut DirtyFlags,
    camera: &Camera,
    lights: &LightSet,
    shader: &mut dyn ShaderBinding,
) -> SyncReport {
    let mut report = SyncReport::default();

    if dirty.contains(DirtyFlags::CAMERA) {
        shader.set_mat4(names::VIEW_MATRIX, camera.view_matrix());
        shader.set_mat4(names::PROJECTION_MATRIX, camera.projection_matrix());
        report.camera_uploaded = true;
    }

    // The view position lives in the light block, so camera moves re-send it too
    if dirty.intersects(DirtyFlags::CAMERA | DirtyFlags::LIGHTS) {
        let uniforms = lights.build_uniforms(camera.position());
        uniforms.upload(shader);
        report.lights_submitted = uniforms.submitted();
    }

    *dirty = DirtyFlags::empty();
    report
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::game::TargetAppearances;
    use crate::render::lighting::MAX_POINT_LIGHTS;
    use crate::render::{Aabb, CountingTarget, RecordingShader, UniformValue};
    use crate::scene::animators::OrbitParams;

    fn mesh() -> Mesh {
        Mesh::new(1, 6, 36, Aabb::unit())
    }

    fn ready_scene() -> (Scene, RecordingShader) {
        let recorder = RecordingShader::new();
        let mut scene = Scene::new();
        scene.attach_shader(Box::new(recorder.clone()));
        scene.set_camera(Camera::new(Vec3::new(0.0, 0.0, 5.0)));
        (scene, recorder)
    }

    #[test]
    fn test_render_skips_without_camera_or_shader() {
        let mut scene = Scene::new();
        scene.add_object(mesh(), scene.materials().default_key(), Vec4::repeat(1.0));
        let mut target = CountingTarget::default();

        assert_eq!(scene.render(&mut target), RenderStatus::Skipped(SkipReason::NoCamera));
        scene.set_camera(Camera::default());
        assert_eq!(scene.render(&mut target), RenderStatus::Skipped(SkipReason::NoShader));
        assert_eq!(target.draws, 0);

        scene.attach_shader(Box::new(RecordingShader::new()));
        assert!(scene.render(&mut target).is_rendered());
        assert_eq!(target.draws, 1);
    }

    #[test]
    fn test_light_uniforms_sent_once_per_frame_not_per_object() {
        let (mut scene, recorder) = ready_scene();
        let material = scene.materials().default_key();
        for _ in 0..25 {
            scene.add_object(mesh(), material, Vec4::repeat(1.0));
        }
        scene.add_point_light(Vec3::y(), Vec3::repeat(1.0), 1.0, 0.09, 0.032);

        let status = scene.render(&mut CountingTarget::default());
        assert!(matches!(status, RenderStatus::Rendered(FrameStats { objects_drawn: 25, .. })));
        assert_eq!(recorder.count(names::POINT_LIGHT_COUNT), 1);
        assert_eq!(recorder.count(names::VIEW_POSITION), 1);
        assert_eq!(recorder.count(names::VIEW_MATRIX), 1);
        assert_eq!(recorder.count(names::MODEL_MATRIX), 25);
    }

    #[test]
    fn test_clean_frame_sends_no_camera_or_light_uniforms() {
        let (mut scene, recorder) = ready_scene();
        scene.add_object(mesh(), scene.materials().default_key(), Vec4::repeat(1.0));
        scene.render(&mut CountingTarget::default());
        recorder.clear();

        let status = scene.render(&mut CountingTarget::default());
        assert_eq!(
            status,
            RenderStatus::Rendered(FrameStats { objects_drawn: 1, camera_uploaded: false, lights_submitted: 0 })
        );
        assert_eq!(recorder.count(names::VIEW_MATRIX), 0);
        assert_eq!(recorder.count(names::AMBIENT_COLOR), 0);
        assert_eq!(recorder.count(names::MODEL_MATRIX), 1);
    }

    #[test]
    fn test_camera_move_resends_camera_and_view_position() {
        let (mut scene, recorder) = ready_scene();
        scene.render(&mut CountingTarget::default());
        recorder.clear();

        scene.move_camera(&[CameraMovement::Forward], 0.1);
        scene.render(&mut CountingTarget::default());
        assert_eq!(recorder.count(names::VIEW_MATRIX), 1);
        assert_eq!(
            recorder.last(names::VIEW_POSITION),
            Some(UniformValue::Vec3(scene.camera().unwrap().position()))
        );
    }

    #[test]
    fn test_point_light_overflow_submits_capacity() {
        let (mut scene, recorder) = ready_scene();
        for i in 0..(MAX_POINT_LIGHTS + 5) {
            scene.add_point_light(Vec3::new(i as f32, 0.0, 0.0), Vec3::repeat(1.0), 1.0, 0.09, 0.032);
        }

        let status = scene.render(&mut CountingTarget::default());
        assert!(matches!(
            status,
            RenderStatus::Rendered(FrameStats { lights_submitted: MAX_POINT_LIGHTS, .. })
        ));
        assert_eq!(
            recorder.last(names::POINT_LIGHT_COUNT),
            Some(UniformValue::Int(MAX_POINT_LIGHTS as i32))
        );
        assert_eq!(recorder.count_prefix(&format!("u_PointLights[{MAX_POINT_LIGHTS}]")), 0);
        assert_eq!(scene.lights().len(), MAX_POINT_LIGHTS + 5);
    }

    #[test]
    fn test_flashlight_tracks_camera_and_toggle_marks_dirty() {
        let (mut scene, recorder) = ready_scene();
        scene.render(&mut CountingTarget::default());
        recorder.clear();

        assert!(scene.toggle_flashlight());
        scene.update(0.016, 0);
        scene.render(&mut CountingTarget::default());
        assert_eq!(recorder.last(names::FLASHLIGHT_ENABLED), Some(UniformValue::Int(1)));
        assert_eq!(
            recorder.last("u_Flashlight.position"),
            Some(UniformValue::Vec3(Vec3::new(0.0, 0.0, 5.0)))
        );
    }

    #[test]
    fn test_get_object_by_index_and_id() {
        let mut scene = Scene::new();
        let material = scene.materials().default_key();
        let a = scene.add_object(mesh(), material, Vec4::repeat(1.0));
        let b = scene.add_object(mesh(), material, Vec4::repeat(0.5));
        let id_b = scene.object(b).unwrap().id();

        assert_eq!(scene.get_object(1).map(DrawableObject::id), Some(id_b));
        assert!(scene.get_object(2).is_none());
        assert_eq!(scene.object_key_by_id(id_b), Some(b));

        scene.remove_object(a);
        assert_eq!(scene.get_object(0).map(DrawableObject::id), Some(id_b));
        assert!(scene.get_object_by_id(id_b).is_some());
    }

    #[test]
    fn test_picking_round_trip() {
        let (mut scene, _) = ready_scene();
        let key = scene.add_unlit_object(mesh(), Vec4::repeat(1.0));
        let id = scene.object(key).unwrap().id();

        let mut target = HeadlessTarget::new(80, 60);
        scene.render(&mut target);

        assert_eq!(target.read_stencil(40, 30), id.get());
        assert_eq!(target.read_stencil(0, 0), 0);
        assert_eq!(scene.pick_at(&target, 40, 30), Some(id));
        assert_eq!(scene.pick_at(&target, 0, 0), None);

        // Stale stencil contents never resolve to a removed object
        scene.remove_object(key);
        assert_eq!(scene.pick_at(&target, 40, 30), None);
    }

    #[test]
    fn test_orbit_only_runs_for_solar_system_index() {
        let mut scene = Scene::new();
        let material = scene.materials().default_key();
        let earth = scene.add_object(mesh(), material, Vec4::repeat(1.0));
        let moon = scene.add_object(mesh(), material, Vec4::repeat(1.0));
        scene.set_orbit(OrbitRig::new(earth, moon, OrbitParams::default()));

        scene.update(1.0, 0);
        assert!(scene.object(earth).unwrap().transformation().is_empty());

        scene.update(1.0, SOLAR_SYSTEM_SCENE_INDEX);
        assert!(!scene.object(earth).unwrap().transformation().is_empty());
    }

    #[test]
    fn test_firefly_marks_lights_dirty() {
        let (mut scene, recorder) = ready_scene();
        scene.add_firefly(Vec3::new(0.0, 1.0, 0.0), Vec3::new(1.0, 1.0, 0.3), Some(mesh()));
        scene.render(&mut CountingTarget::default());
        recorder.clear();

        scene.update(0.1, 3);
        assert!(scene.dirty_flags().contains(DirtyFlags::LIGHTS));
        scene.render(&mut CountingTarget::default());
        assert_eq!(recorder.count("u_PointLights[0].position"), 1);
        assert_eq!(scene.object_count(), 1);
    }

    #[test]
    fn test_hit_without_game_is_noop() {
        let mut scene = Scene::new();
        let key = scene.add_unlit_object(mesh(), Vec4::repeat(1.0));
        let id = scene.object(key).unwrap().id();
        assert_eq!(scene.hit_object(id), HitOutcome::NotATarget);
    }

    #[test]
    fn test_game_targets_live_in_scene_objects() {
        let mut scene = Scene::new();
        let material = scene.materials().default_key();
        let config = crate::config::GameConfig { seed: Some(5), ..Default::default() };
        scene.start_game(WhackGame::new(config, TargetAppearances::tinted(mesh(), material)));

        for _ in 0..15 {
            scene.update(0.1, 4);
        }
        assert_eq!(scene.object_count(), 1);
        let target_id = scene.game().unwrap().targets()[0].id();
        assert!(scene.get_object_by_id(target_id).is_some());

        let outcome = scene.hit_object(target_id);
        assert!(matches!(outcome, HitOutcome::Scored { .. }));
        let expected = match scene.game().unwrap().targets()[0].kind() {
            TargetKind::Good => 10,
            TargetKind::Bad => -50,
        };
        assert_eq!(scene.game().unwrap().score(), expected);

        scene.clear_objects();
        assert!(scene.game().is_none());
        assert_eq!(scene.object_count(), 0);
    }

    #[test]
    fn test_hit_on_removed_target_is_noop() {
        let mut scene = Scene::new();
        let material = scene.materials().default_key();
        let config = crate::config::GameConfig { seed: Some(5), spawn_interval: 1000.0, ..Default::default() };
        scene.start_game(WhackGame::new(config, TargetAppearances::tinted(mesh(), material)));

        let id = scene.spawn_target(TargetKind::Good, Vec3::zeros()).unwrap();
        let key = scene.object_key_by_id(id).unwrap();
        assert!(scene.remove_object(key).is_some());
        assert!(scene.get_object_by_id(id).is_none());

        assert_eq!(scene.hit_object(id), HitOutcome::NotATarget);
        assert_eq!(scene.game().unwrap().score(), 0);
    }

    #[test]
    fn test_spawn_target_after_win_is_refused() {
        let mut scene = Scene::new();
        let material = scene.materials().default_key();
        let config = crate::config::GameConfig {
            seed: Some(5),
            spawn_interval: 1000.0,
            win_score: 10,
            ..Default::default()
        };
        scene.start_game(WhackGame::new(config, TargetAppearances::tinted(mesh(), material)));

        let id = scene.spawn_target(TargetKind::Good, Vec3::zeros()).unwrap();
        assert_eq!(scene.hit_object(id), HitOutcome::Scored { points: 10, score: 10 });
        assert!(scene.game().unwrap().is_finished());

        assert!(scene.spawn_target(TargetKind::Good, Vec3::x()).is_none());
        assert_eq!(scene.game().unwrap().spawned_count(), 1);
        assert_eq!(scene.object_count(), 1);
    }

    #[test]
    fn test_clear_objects_drops_lights_and_animators() {
        let (mut scene, recorder) = ready_scene();
        scene.add_firefly(Vec3::y(), Vec3::repeat(1.0), Some(mesh()));
        scene.add_dir_light(-Vec3::y(), Vec3::repeat(0.5));
        scene.render(&mut CountingTarget::default());
        recorder.clear();

        scene.clear_objects();
        assert!(scene.fireflies().is_empty());
        assert!(scene.lights().is_empty());
        assert!(scene.camera().is_some());

        scene.render(&mut CountingTarget::default());
        assert_eq!(recorder.last(names::POINT_LIGHT_COUNT), Some(UniformValue::Int(0)));
        assert_eq!(recorder.last(names::DIR_LIGHT_COUNT), Some(UniformValue::Int(0)));
    }

    #[test]
    fn test_sync_uniforms_with_host_shader() {
        let mut scene = Scene::new();
        let mut host = RecordingShader::new();
        assert!(scene.sync_uniforms(&mut host).is_none());

        scene.set_camera(Camera::default());
        let report = scene.sync_uniforms(&mut host).unwrap();
        assert!(report.camera_uploaded);
        assert_eq!(host.count(names::VIEW_MATRIX), 1);

        let again = scene.sync_uniforms(&mut host).unwrap();
        assert_eq!(again, SyncReport::default());
        assert_eq!(host.count(names::VIEW_MATRIX), 1);
    }
}
