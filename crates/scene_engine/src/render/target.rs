//! Draw-call sink
//!
//! [`DrawTarget`] is where the scene sends geometry once uniforms are in place. A GPU
//! host issues the actual draw with the stencil reference set to the object's id;
//! [`crate::input::picking::HeadlessTarget`] rasterizes bounds into a software
//! stencil buffer instead.

use crate::foundation::math::Mat4;
use crate::render::Mesh;

/// One object's draw request
#[derive(Debug, Clone, Copy)]
pub struct DrawCall<'a> {
    /// Geometry to draw
    pub mesh: &'a Mesh,
    /// Model matrix already uploaded as `u_ModelMatrix`
    pub model: Mat4,
    /// Value written to the stencil buffer for covered pixels; 0 means "no object"
    pub stencil_id: u32,
}

/// Receives draw calls for one frame
pub trait DrawTarget {
    /// Start a frame; the stencil buffer is cleared to 0
    fn begin_frame(&mut self, view_projection: &Mat4);

    /// Draw one mesh
    fn draw(&mut self, call: &DrawCall<'_>);

    /// Finish the frame
    fn end_frame(&mut self) {}
}

/// Target that only counts what it is asked to draw
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CountingTarget {
    /// Frames started
    pub frames: usize,
    /// Draw calls received in total
    pub draws: usize,
    /// Stencil ids in the order they were drawn during the last frame
    pub last_frame_ids: Vec<u32>,
}

impl DrawTarget for CountingTarget {
    fn begin_frame(&mut self, _view_projection: &Mat4) {
        self.frames += 1;
        self.last_frame_ids.clear();
    }

    fn draw(&mut self, call: &DrawCall<'_>) {
        self.draws += 1;
        self.last_frame_ids.push(call.stencil_id);
    }
}
