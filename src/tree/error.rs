use crate::{spatial::AabbError, Float, NodeIndex};

/// Errors related to [Octrees](crate::Octree).
///
/// Every variant except [`PointOutOfBounds`](AabbError::PointOutOfBounds) on
/// a caller-supplied point signals a structural invariant violation: the
/// build propagates it immediately and no partially-built tree escapes. A
/// failed leaf lookup is not an error — it is an ordinary `None`.
#[derive(Debug, thiserror::Error)]
pub enum Error<Real: Float> {
    #[error(transparent)]
    OutOfBounds(#[from] AabbError<Real>),
    #[error("attempted to split node {0}, which already has children")]
    AlreadySplit(NodeIndex),
    #[error("attempted to access node at index {0}, which does not exist")]
    InvalidIndex(NodeIndex),
    #[error("cannot build an octree over a mesh with no vertices")]
    EmptyMesh,
}
