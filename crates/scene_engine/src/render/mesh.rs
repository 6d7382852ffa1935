//! Mesh handles
//!
//! A [`Mesh`] is the engine's view of geometry uploaded by the host: an opaque handle,
//! the interleaved vertex stride, the number of vertices to draw and a local-space
//! bounding box used by the software stencil target.

use crate::foundation::math::{Point3, Vec3};

/// Mesh construction errors
#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
pub enum MeshError {
    /// Stride of zero floats
    #[error("vertex stride must be non-zero")]
    ZeroStride,

    /// Stride too small to hold a position
    #[error("vertex stride {0} cannot hold a 3-component position")]
    StrideTooSmall(usize),

    /// No vertex data
    #[error("mesh has no vertices")]
    Empty,

    /// Data length is not a whole number of vertices
    #[error("{len} floats is not a multiple of stride {stride}")]
    Ragged {
        /// Number of floats supplied
        len: usize,
        /// Floats per vertex
        stride: usize,
    },
}

/// Axis-aligned bounding box
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Aabb {
    /// Minimum corner
    pub min: Vec3,
    /// Maximum corner
    pub max: Vec3,
}

impl Aabb {
    /// Create a box from two corners
    pub fn new(min: Vec3, max: Vec3) -> Self {
        Self { min, max }
    }

    /// Box spanning [-1, 1] on every axis
    pub fn unit() -> Self {
        Self::new(Vec3::repeat(-1.0), Vec3::repeat(1.0))
    }

    /// Smallest box containing all points, or `None` for an empty iterator
    pub fn from_points(points: impl IntoIterator<Item = Vec3>) -> Option<Self> {
        let mut points = points.into_iter();
        let first = points.next()?;
        Some(points.fold(Self::new(first, first), |acc, p| Self {
            min: acc.min.inf(&p),
            max: acc.max.sup(&p),
        }))
    }

    /// The eight corners
    pub fn corners(&self) -> [Point3; 8] {
        let (lo, hi) = (self.min, self.max);
        [
            Point3::new(lo.x, lo.y, lo.z),
            Point3::new(hi.x, lo.y, lo.z),
            Point3::new(lo.x, hi.y, lo.z),
            Point3::new(hi.x, hi.y, lo.z),
            Point3::new(lo.x, lo.y, hi.z),
            Point3::new(hi.x, lo.y, hi.z),
            Point3::new(lo.x, hi.y, hi.z),
            Point3::new(hi.x, hi.y, hi.z),
        ]
    }
}

/// Handle to geometry owned by the host
#[derive(Debug, Clone, PartialEq)]
pub struct Mesh {
    handle: u32,
    vertex_stride: usize,
    vertex_count: u32,
    bounds: Aabb,
}

impl Mesh {
    /// Wrap an existing GPU-side mesh
    pub fn new(handle: u32, vertex_stride: usize, vertex_count: u32, bounds: Aabb) -> Self {
        Self {
            handle,
            vertex_stride,
            vertex_count,
            bounds,
        }
    }

    /// Describe interleaved float data whose first three components are a position.
    ///
    /// The host is expected to upload `data` under `handle`; this only derives the
    /// vertex count and bounds.
    pub fn from_interleaved(handle: u32, data: &[f32], stride: usize) -> Result<Self, MeshError> {
        if stride == 0 {
            return Err(MeshError::ZeroStride);
        }
        if stride < 3 {
            return Err(MeshError::StrideTooSmall(stride));
        }
        if data.is_empty() {
            return Err(MeshError::Empty);
        }
        if data.len() % stride != 0 {
            return Err(MeshError::Ragged {
                len: data.len(),
                stride,
            });
        }

        let positions = data
            .chunks_exact(stride)
            .map(|vertex| Vec3::new(vertex[0], vertex[1], vertex[2]));
        let bounds = Aabb::from_points(positions).ok_or(MeshError::Empty)?;
        let vertex_count = u32::try_from(data.len() / stride).unwrap_or(u32::MAX);

        log::debug!(
            "Mesh {} described: {} vertices, stride {}",
            handle,
            vertex_count,
            stride
        );

        Ok(Self::new(handle, stride, vertex_count, bounds))
    }

    /// Opaque host handle
    pub fn handle(&self) -> u32 {
        self.handle
    }

    /// Floats per vertex
    pub fn vertex_stride(&self) -> usize {
        self.vertex_stride
    }

    /// Number of vertices drawn
    pub fn vertex_count(&self) -> u32 {
        self.vertex_count
    }

    /// Local-space bounds
    pub fn bounds(&self) -> &Aabb {
        &self.bounds
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_from_interleaved_counts_vertices_and_bounds() {
        #[rustfmt::skip]
        let data = [
            // position        normal
            -1.0, 0.0, 0.5,    0.0, 1.0, 0.0,
             2.0, 1.0, 0.0,    0.0, 1.0, 0.0,
             0.0, -3.0, 0.0,   0.0, 1.0, 0.0,
        ];
        let mesh = Mesh::from_interleaved(4, &data, 6).unwrap();
        assert_eq!(mesh.vertex_count(), 3);
        assert_eq!(mesh.vertex_stride(), 6);
        assert_relative_eq!(mesh.bounds().min, Vec3::new(-1.0, -3.0, 0.0));
        assert_relative_eq!(mesh.bounds().max, Vec3::new(2.0, 1.0, 0.5));
    }

    #[test]
    fn test_from_interleaved_rejects_bad_layouts() {
        assert_eq!(Mesh::from_interleaved(0, &[1.0; 6], 0), Err(MeshError::ZeroStride));
        assert_eq!(Mesh::from_interleaved(0, &[1.0; 6], 2), Err(MeshError::StrideTooSmall(2)));
        assert_eq!(Mesh::from_interleaved(0, &[], 3), Err(MeshError::Empty));
        assert_eq!(
            Mesh::from_interleaved(0, &[1.0; 7], 6),
            Err(MeshError::Ragged { len: 7, stride: 6 })
        );
    }
}
