//! Adaptive octree partitioning of tetrahedral-mesh elements.
//!
//! An [`Octree`] distributes the elements of a borrowed [`TetMesh`] into a
//! hierarchy of axis-aligned boxes, keyed by element centroid. Nodes live in a
//! single growable arena and refer to each other by index, never by pointer:
//! node creation during the build reallocates the arena, so a stable
//! [`NodeIndex`] is the only handle that survives it.
//!
//! The tree is built once, synchronously, by [`Octree::new`] and is read-only
//! afterward. Queries answer "which leaf holds element `e`", and the whole
//! tree can be dumped as a Graphviz digraph for offline inspection.
#![cfg_attr(not(debug_assertions), warn(missing_docs))]

mod octant;
mod real;

pub mod mesh;
pub mod spatial;
pub mod tree;

pub use octant::{ChildOutOfRange, Octant};
pub use real::Float;

pub use mesh::TetMesh;
pub use spatial::Aabb;
pub use tree::{Error, Octree, OctreeNode};

/// Index type of nodes within an octree's arena.
pub type NodeIndex = u32;

/// Index type of elements (tetrahedra) within a mesh.
pub type ElementIndex = u32;
