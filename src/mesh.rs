//! Borrowed views over tetrahedral-mesh arrays.
//!
//! The octree never owns mesh data: a [`TetMesh`] is a pair of slices, one of
//! vertex coordinates and one of element connectivity (four vertex indices
//! per tetrahedron), borrowed from whichever component loaded the mesh. The
//! caller keeps both alive for the lifetime of any tree built over them.

use nalgebra::Point3;

use crate::{Aabb, ElementIndex, Float};

/// A non-owning view of a tetrahedral mesh.
///
/// `'m` is the lifetime of the underlying vertex and connectivity arrays;
/// the view itself is a plain pair of fat pointers and is freely copyable.
#[derive(Debug, Clone, Copy)]
pub struct TetMesh<'m, Real: Float> {
    vertices: &'m [Point3<Real>],
    elements: &'m [[u32; 4]],
}

impl<'m, Real: Float> TetMesh<'m, Real> {
    /// Construct a mesh view from a vertex-coordinate slice and an
    /// element-connectivity slice.
    #[inline]
    pub fn new(vertices: &'m [Point3<Real>], elements: &'m [[u32; 4]]) -> Self {
        Self { vertices, elements }
    }

    /// The vertex-coordinate array.
    #[inline]
    pub fn vertices(&self) -> &'m [Point3<Real>] {
        self.vertices
    }

    /// The element-connectivity array.
    #[inline]
    pub fn elements(&self) -> &'m [[u32; 4]] {
        self.elements
    }

    /// The number of vertices in the mesh.
    #[inline]
    pub fn n_vertices(&self) -> usize {
        self.vertices.len()
    }

    /// The number of elements (tetrahedra) in the mesh.
    #[inline]
    pub fn n_elements(&self) -> usize {
        self.elements.len()
    }

    /// The four corner positions of element `eid`.
    ///
    /// # Panics
    ///
    /// * `eid` ∉ `0..self.n_elements()`, or the element references a vertex
    ///   outside the vertex array.
    #[inline]
    pub fn corners(&self, eid: ElementIndex) -> [Point3<Real>; 4] {
        let [n0, n1, n2, n3] = self.elements[eid as usize];
        [
            self.vertices[n0 as usize],
            self.vertices[n1 as usize],
            self.vertices[n2 as usize],
            self.vertices[n3 as usize],
        ]
    }

    /// The centroid of element `eid`: the arithmetic mean of its four corners.
    pub fn centroid(&self, eid: ElementIndex) -> Point3<Real> {
        let [r0, r1, r2, r3] = self.corners(eid);
        Point3::from((r0.coords + r1.coords + r2.coords + r3.coords) / Real::FOUR)
    }

    /// The signed volume of element `eid`: one sixth of the determinant of
    /// the 4×4 homogeneous corner matrix, evaluated as a scalar triple
    /// product. Negative when the corners wind the other way.
    pub fn signed_volume(&self, eid: ElementIndex) -> Real {
        let [r0, r1, r2, r3] = self.corners(eid);
        let a = r1 - r0;
        let b = r2 - r0;
        let c = r3 - r0;
        a.cross(&b).dot(&c) / Real::SIX
    }

    /// The absolute volume of element `eid`.
    #[inline]
    pub fn volume(&self, eid: ElementIndex) -> Real {
        self.signed_volume(eid).abs()
    }

    /// The summed absolute volume of every element in the mesh.
    pub fn total_volume(&self) -> Real {
        (0..self.n_elements() as ElementIndex)
            .fold(Real::ZERO, |acc, eid| acc + self.volume(eid))
    }

    /// Componentwise bounds of every vertex in the mesh, in one linear pass.
    ///
    /// Returns `None` when the mesh has no vertices.
    pub fn bounds(&self) -> Option<Aabb<Real>> {
        let first = *self.vertices.first()?;
        let mut mins = first;
        let mut maxs = first;
        for r in self.vertices {
            mins.x = num_traits::Float::min(mins.x, r.x);
            mins.y = num_traits::Float::min(mins.y, r.y);
            mins.z = num_traits::Float::min(mins.z, r.z);
            maxs.x = num_traits::Float::max(maxs.x, r.x);
            maxs.y = num_traits::Float::max(maxs.y, r.y);
            maxs.z = num_traits::Float::max(maxs.z, r.z);
        }
        Some(Aabb::new(mins, maxs))
    }
}
