//! Axis-aligned box geometry shared by the tree and its tests.

mod aabb;

pub use aabb::{Aabb, AabbError};
