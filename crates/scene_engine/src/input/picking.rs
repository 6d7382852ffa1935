//! Stencil-based object picking
//!
//! Every draw call writes its object's id into the stencil buffer for the pixels it
//! covers. Picking reads the stencil value under the cursor and resolves it through
//! the scene's id lookup; 0 means the background was clicked.
//!
//! [`HeadlessTarget`] is a software stand-in for the GPU path. Each pixel casts a ray
//! against the object's transformed bounding box and keeps the nearest hit, so every
//! mesh behaves like its bounds. Coarse, but enough to drive the game without a window.

use crate::foundation::math::{Mat4, Point3, Vec3, Vec4};
use crate::render::{Aabb, DrawCall, DrawTarget};
use crate::scene::ObjectId;

/// Per-pixel object ids, origin at the top-left corner
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StencilBuffer {
    width: usize,
    height: usize,
    data: Vec<u32>,
}

impl StencilBuffer {
    /// Buffer of the given size, cleared to 0
    pub fn new(width: usize, height: usize) -> Self {
        Self {
            width,
            height,
            data: vec![0; width * height],
        }
    }

    /// Reset every pixel to 0
    pub fn clear(&mut self) {
        self.data.fill(0);
    }

    /// Width in pixels
    pub fn width(&self) -> usize {
        self.width
    }

    /// Height in pixels
    pub fn height(&self) -> usize {
        self.height
    }

    fn index(&self, x: usize, y: usize) -> Option<usize> {
        (x < self.width && y < self.height).then(|| y * self.width + x)
    }

    /// Stencil value at a pixel; out-of-range reads return 0
    pub fn read(&self, x: usize, y: usize) -> u32 {
        self.index(x, y).map_or(0, |i| self.data[i])
    }

    /// Write a pixel; out-of-range writes are ignored
    pub fn write(&mut self, x: usize, y: usize, value: u32) {
        if let Some(i) = self.index(x, y) {
            self.data[i] = value;
        }
    }
}

/// Software draw target producing a stencil buffer for picking
#[derive(Debug, Clone)]
pub struct HeadlessTarget {
    stencil: StencilBuffer,
    depth: Vec<f32>,
    view_projection: Mat4,
    inverse_view_projection: Mat4,
    draws: usize,
}

impl HeadlessTarget {
    /// Target with a `width` x `height` viewport
    pub fn new(width: usize, height: usize) -> Self {
        Self {
            stencil: StencilBuffer::new(width, height),
            depth: vec![f32::INFINITY; width * height],
            view_projection: Mat4::identity(),
            inverse_view_projection: Mat4::identity(),
            draws: 0,
        }
    }

    /// The stencil buffer written by the last frame
    pub fn stencil(&self) -> &StencilBuffer {
        &self.stencil
    }

    /// Draw calls received during the last frame
    pub fn draw_count(&self) -> usize {
        self.draws
    }

    /// Read the stencil under a window coordinate
    pub fn read_stencil(&self, x: usize, y: usize) -> u32 {
        self.stencil.read(x, y)
    }

    /// Object under a window coordinate, or `None` for background
    pub fn pick(&self, x: usize, y: usize) -> Option<ObjectId> {
        ObjectId::from_stencil(self.read_stencil(x, y))
    }

    /// Window coordinate of a world-space point, if it is in front of the camera
    pub fn project(&self, world: &Vec4) -> Option<(f32, f32, f32)> {
        let clip = self.view_projection * world;
        if clip.w <= f32::EPSILON {
            return None;
        }
        let ndc = clip.xyz() / clip.w;
        let width = self.stencil.width() as f32;
        let height = self.stencil.height() as f32;
        let x = (ndc.x * 0.5 + 0.5) * width;
        let y = (0.5 - ndc.y * 0.5) * height;
        Some((x, y, ndc.z))
    }
}

impl HeadlessTarget {
    /// World-space ray through a pixel center, from the near plane (t = 0) to the far plane (t = 1)
    fn pixel_ray(&self, x: usize, y: usize) -> Option<(Vec3, Vec3)> {
        let width = self.stencil.width() as f32;
        let height = self.stencil.height() as f32;
        let ndc_x = (x as f32 + 0.5) / width * 2.0 - 1.0;
        let ndc_y = 1.0 - (y as f32 + 0.5) / height * 2.0;

        let unproject = |z: f32| {
            let p = self.inverse_view_projection * Vec4::new(ndc_x, ndc_y, z, 1.0);
            (p.w.abs() > f32::EPSILON).then(|| p.xyz() / p.w)
        };
        let near = unproject(-1.0)?;
        let far = unproject(1.0)?;
        Some((near, far - near))
    }

    /// Screen rectangle worth testing for a draw call: the projected bounds, or the
    /// whole viewport when part of the box is behind the camera
    fn candidate_rect(&self, corners: &[Point3; 8], model: &Mat4) -> (usize, usize, usize, usize) {
        let width = self.stencil.width();
        let height = self.stencil.height();
        let mut min = (f32::INFINITY, f32::INFINITY);
        let mut max = (f32::NEG_INFINITY, f32::NEG_INFINITY);

        for corner in corners {
            match self.project(&(model * corner.to_homogeneous())) {
                Some((x, y, _)) => {
                    min = (min.0.min(x), min.1.min(y));
                    max = (max.0.max(x), max.1.max(y));
                }
                None => return (0, width, 0, height),
            }
        }

        let clamp_x = |v: f32| v.clamp(0.0, width as f32) as usize;
        let clamp_y = |v: f32| v.clamp(0.0, height as f32) as usize;
        (
            clamp_x(min.0.floor()),
            clamp_x(max.0.ceil()),
            clamp_y(min.1.floor()),
            clamp_y(max.1.ceil()),
        )
    }
}

/// Ray parameter where `origin + t·direction` enters the box, if it does within `[0, 1]`
fn ray_box_entry(origin: &Vec3, direction: &Vec3, bounds: &Aabb) -> Option<f32> {
    let mut t_enter = 0.0f32;
    let mut t_exit = 1.0f32;

    for axis in 0..3 {
        let (o, d) = (origin[axis], direction[axis]);
        let (lo, hi) = (bounds.min[axis], bounds.max[axis]);
        if d.abs() <= f32::EPSILON {
            if o < lo || o > hi {
                return None;
            }
            continue;
        }
        let (t1, t2) = ((lo - o) / d, (hi - o) / d);
        t_enter = t_enter.max(t1.min(t2));
        t_exit = t_exit.min(t1.max(t2));
        if t_enter > t_exit {
            return None;
        }
    }
    Some(t_enter)
}

impl DrawTarget for HeadlessTarget {
    fn begin_frame(&mut self, view_projection: &Mat4) {
        self.view_projection = *view_projection;
        self.inverse_view_projection = view_projection.try_inverse().unwrap_or_else(Mat4::identity);
        self.stencil.clear();
        self.depth.fill(f32::INFINITY);
        self.draws = 0;
    }

    fn draw(&mut self, call: &DrawCall<'_>) {
        self.draws += 1;

        // Degenerate (zero-scale) objects cover nothing
        let Some(inverse_model) = call.model.try_inverse() else {
            return;
        };
        let bounds = call.mesh.bounds();
        let (x0, x1, y0, y1) = self.candidate_rect(&bounds.corners(), &call.model);

        for y in y0..y1 {
            for x in x0..x1 {
                let Some((origin, direction)) = self.pixel_ray(x, y) else {
                    continue;
                };
                // Affine transforms preserve the ray parameter, so depths compare across objects
                let local_origin = inverse_model.transform_point(&Point3::from(origin)).coords;
                let local_direction = inverse_model.transform_vector(&direction);
                let Some(t) = ray_box_entry(&local_origin, &local_direction, bounds) else {
                    continue;
                };

                let i = y * self.stencil.width() + x;
                if t < self.depth[i] {
                    self.depth[i] = t;
                    self.stencil.write(x, y, call.stencil_id);
                }
            }
        }
    }
}
