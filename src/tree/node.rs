use nalgebra::{Point3, Vector3};

use crate::{spatial::AabbError, Aabb, ElementIndex, Float, NodeIndex, Octant, TetMesh};

/// One box in the octree hierarchy.
///
/// A node is a *leaf* while it has no children; a [split](crate::Octree)
/// materializes all eight children at once, so `children` is either absent or
/// a full octant-ordered array — a partially-split node is unrepresentable.
///
/// `elements` holds every element index routed through this node during the
/// build: a leaf directly owns its list, while an internal node retains the
/// indices as a subtree-membership cache (the leaf finder prunes empty
/// subtrees by looking at it).
#[derive(Debug, Clone)]
pub struct OctreeNode<Real: Float> {
    index: NodeIndex,
    parent: Option<NodeIndex>,
    depth: u32,
    aabb: Aabb<Real>,
    elements: Vec<ElementIndex>,
    children: Option<[NodeIndex; 8]>,
    volume: Real,
}

impl<Real: Float> OctreeNode<Real> {
    /// Construct an empty leaf node covering `aabb`.
    pub fn new(index: NodeIndex, parent: Option<NodeIndex>, depth: u32, aabb: Aabb<Real>) -> Self {
        Self {
            index,
            parent,
            depth,
            aabb,
            elements: Vec::new(),
            children: None,
            volume: Real::ZERO,
        }
    }

    /// This node's position in the arena.
    #[inline]
    pub fn index(&self) -> NodeIndex {
        self.index
    }

    /// The arena index of this node's parent, or `None` for the root.
    #[inline]
    pub fn parent(&self) -> Option<NodeIndex> {
        self.parent
    }

    /// The depth of this node; the root is at depth 0.
    #[inline]
    pub fn depth(&self) -> u32 {
        self.depth
    }

    /// The axis-aligned extents of this node, fixed at creation.
    #[inline]
    pub fn aabb(&self) -> &Aabb<Real> {
        &self.aabb
    }

    /// The minimum corner of this node's box.
    #[inline]
    pub fn r_min(&self) -> &Point3<Real> {
        &self.aabb.mins
    }

    /// The maximum corner of this node's box.
    #[inline]
    pub fn r_max(&self) -> &Point3<Real> {
        &self.aabb.maxs
    }

    /// The per-axis extents of this node's box.
    #[inline]
    pub fn extents(&self) -> Vector3<Real> {
        self.aabb.extents()
    }

    /// The element indices associated with this node.
    #[inline]
    pub fn elements(&self) -> &[ElementIndex] {
        &self.elements
    }

    /// The number of element indices associated with this node.
    #[inline]
    pub fn n_elements(&self) -> usize {
        self.elements.len()
    }

    /// The octant-ordered child indices, or `None` while this node is a leaf.
    #[inline]
    pub fn children(&self) -> Option<&[NodeIndex; 8]> {
        self.children.as_ref()
    }

    /// The arena index of the child in octant `oct`, or `None` while this
    /// node is a leaf.
    #[inline]
    pub fn child(&self, oct: Octant) -> Option<NodeIndex> {
        self.children.map(|ch| ch[oct.index()])
    }

    /// Whether this node has no children.
    #[inline]
    pub fn is_leaf(&self) -> bool {
        self.children.is_none()
    }

    /// The cumulative element volume of this node's subtree.
    ///
    /// Valid only once the tree's bottom-up aggregation pass has run; a tree
    /// returned by [`Octree::new`](crate::Octree::new) has always run it.
    #[inline]
    pub fn volume(&self) -> Real {
        self.volume
    }

    /// Determine which child octant of this node the point `r` falls in.
    ///
    /// Each axis is classified half-open against the box midpoint (lower half
    /// `[min, mid)`, upper half `[mid, max]`), so every in-box point maps to
    /// exactly one octant.
    ///
    /// # Errors
    ///
    /// * [`PointOutOfBounds`](AabbError::PointOutOfBounds) if `r` lies
    ///   outside this node's box on any axis — callers must only classify
    ///   points already known to be inside the node.
    #[inline]
    pub fn which_child(&self, r: &Point3<Real>) -> Result<Octant, AabbError<Real>> {
        self.aabb.octant_of(r)
    }

    /// The corner pair of the child box in octant `oct`, derived purely from
    /// this node's box and its midpoint.
    #[inline]
    pub fn child_corners(&self, oct: Octant) -> Aabb<Real> {
        self.aabb.child(oct)
    }

    /// Sum the exact volume of every element directly listed on this node.
    ///
    /// For a leaf this is the subtree volume; for an internal node the listed
    /// elements duplicate its descendants' and the aggregation pass uses the
    /// child volumes instead.
    pub fn compute_volume(&self, mesh: &TetMesh<Real>) -> Real {
        self.elements
            .iter()
            .fold(Real::ZERO, |acc, &eid| acc + mesh.volume(eid))
    }

    pub(crate) fn push_element(&mut self, eid: ElementIndex) {
        self.elements.push(eid);
    }

    pub(crate) fn set_children(&mut self, children: [NodeIndex; 8]) {
        self.children = Some(children);
    }

    pub(crate) fn set_volume(&mut self, volume: Real) {
        self.volume = volume;
    }
}
