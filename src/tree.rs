//! The octree arena and its build, aggregation, and query operations.

mod dot;
mod error;
mod node;

pub use error::*;
pub use node::*;

use nalgebra::Point3;
use tracing::{debug, trace};

use crate::{ElementIndex, Float, NodeIndex, Octant, TetMesh};

/// Arena index of the root node.
pub const ROOT: NodeIndex = 0;

/// A spatial index over the elements of a borrowed [TetMesh].
///
/// All nodes live in one growable arena and refer to each other by
/// [NodeIndex]; the arena exclusively owns every node, and no reference into
/// it is ever held across a mutation. Construction distributes every element
/// into the tree by centroid, splitting any leaf that exceeds `max_per_node`
/// (while above `max_depth` remains), then aggregates exact element volumes
/// bottom-up. The finished tree is read-only.
#[derive(Debug, Clone)]
pub struct Octree<'m, Real: Float> {
    nodes: Vec<OctreeNode<Real>>,
    mesh: TetMesh<'m, Real>,
    max_per_node: usize,
    max_depth: u32,
}

impl<'m, Real: Float> Octree<'m, Real> {
    /// Build an octree over `mesh`.
    ///
    /// The root box is the componentwise bound of every vertex in the mesh,
    /// computed in a single pass. A leaf splits once it holds more than
    /// `max_per_node` elements, unless it already sits at `max_depth`.
    ///
    /// # Errors
    ///
    /// * [`Error::EmptyMesh`] if the mesh has no vertices.
    /// * [`Error::OutOfBounds`] if an element centroid escapes the node it
    ///   was routed to — impossible for a consistent mesh, fatal otherwise.
    pub fn new(mesh: TetMesh<'m, Real>, max_per_node: usize, max_depth: u32) -> Result<Self, Error<Real>> {
        let bounds = mesh.bounds().ok_or(Error::EmptyMesh)?;
        let mut tree = Self {
            nodes: vec![OctreeNode::new(ROOT, None, 0, bounds)],
            mesh,
            max_per_node,
            max_depth,
        };
        tree.populate()?;
        tree.finalize();
        Ok(tree)
    }

    /// The root node.
    #[inline]
    pub fn root(&self) -> &OctreeNode<Real> {
        &self.nodes[ROOT as usize]
    }

    /// The node at arena index `index`, if it exists.
    #[inline]
    pub fn node(&self, index: NodeIndex) -> Option<&OctreeNode<Real>> {
        self.nodes.get(index as usize)
    }

    /// All nodes in the arena, in creation order.
    #[inline]
    pub fn nodes(&self) -> &[OctreeNode<Real>] {
        &self.nodes
    }

    /// The number of nodes in the arena.
    #[inline]
    pub fn n_nodes(&self) -> usize {
        self.nodes.len()
    }

    /// The mesh this tree was built over.
    #[inline]
    pub fn mesh(&self) -> &TetMesh<'m, Real> {
        &self.mesh
    }

    /// The element-count threshold above which a leaf splits.
    #[inline]
    pub fn max_per_node(&self) -> usize {
        self.max_per_node
    }

    /// The depth past which no node splits, regardless of element count.
    #[inline]
    pub fn max_depth(&self) -> u32 {
        self.max_depth
    }

    /// The centroid of element `eid`.
    #[inline]
    pub fn centroid(&self, eid: ElementIndex) -> Point3<Real> {
        self.mesh.centroid(eid)
    }

    /// Determine which child octant of node `node` the centroid of element
    /// `eid` falls in.
    ///
    /// # Errors
    ///
    /// * [`Error::InvalidIndex`] if `node` is not an arena index.
    /// * [`Error::OutOfBounds`] if the centroid lies outside the node's box.
    pub fn which_child(&self, node: NodeIndex, eid: ElementIndex) -> Result<Octant, Error<Real>> {
        let node = self.nodes.get(node as usize).ok_or(Error::InvalidIndex(node))?;
        Ok(node.which_child(&self.mesh.centroid(eid))?)
    }

    /// Find the arena index of the leaf that directly owns element `eid`.
    ///
    /// Depth-first search from the root over an explicit stack, descending
    /// only into children whose element lists are non-empty (an internal
    /// node's list caches its subtree membership, so an empty list means the
    /// whole subtree is empty). A miss is an ordinary `None`, never an error.
    pub fn find_leaf_index_containing(&self, eid: ElementIndex) -> Option<NodeIndex> {
        let mut stack = vec![ROOT];

        while let Some(index) = stack.pop() {
            let node = &self.nodes[index as usize];
            match node.children() {
                None => {
                    if node.elements().contains(&eid) {
                        return Some(index);
                    }
                }
                Some(children) => {
                    for &child in children {
                        if !self.nodes[child as usize].elements().is_empty() {
                            stack.push(child);
                        }
                    }
                }
            }
        }
        None
    }

    /// Find the leaf node that directly owns element `eid`.
    #[inline]
    pub fn find_leaf_containing(&self, eid: ElementIndex) -> Option<&OctreeNode<Real>> {
        self.find_leaf_index_containing(eid)
            .map(|index| &self.nodes[index as usize])
    }

    /// Materialize the eight children of the leaf at `node_index`.
    ///
    /// Child boxes tile the parent box at its midpoint; the new arena indices
    /// are returned in octant order so the caller can redistribute elements
    /// without re-deriving them.
    ///
    /// # Errors
    ///
    /// * [`Error::AlreadySplit`] if the node already has children.
    fn split(&mut self, node_index: NodeIndex) -> Result<[NodeIndex; 8], Error<Real>> {
        let n = node_index as usize;
        if !self.nodes[n].is_leaf() {
            return Err(Error::AlreadySplit(node_index));
        }

        let aabb = *self.nodes[n].aabb();
        let depth = self.nodes[n].depth() + 1;

        let mut children = [ROOT; 8];
        for oct in Octant::all() {
            let child_index = self.nodes.len() as NodeIndex;
            self.nodes.push(OctreeNode::new(
                child_index,
                Some(node_index),
                depth,
                aabb.child(oct),
            ));
            children[oct.index()] = child_index;
        }
        self.nodes[n].set_children(children);

        trace!(node = node_index, depth, "split node into eight octants");
        Ok(children)
    }

    /// Distribute every mesh element into the tree.
    ///
    /// Runs over an explicit stack of `(element, node)` work items rather
    /// than native recursion: [`Self::split`] grows the arena mid-descent,
    /// so no reference into `nodes` may live across an iteration.
    fn populate(&mut self) -> Result<(), Error<Real>> {
        let mut stack: Vec<(ElementIndex, NodeIndex)> = Vec::new();

        for eid in 0..self.mesh.n_elements() as ElementIndex {
            stack.push((eid, ROOT));

            while let Some((eid, node_index)) = stack.pop() {
                let n = node_index as usize;
                match self.nodes[n].children().copied() {
                    None => {
                        self.nodes[n].push_element(eid);

                        if self.nodes[n].n_elements() > self.max_per_node
                            && self.nodes[n].depth() < self.max_depth
                        {
                            let children = self.split(node_index)?;

                            // Re-route everything the node holds, including
                            // the element appended above. The list stays on
                            // the node as its subtree-membership cache.
                            let owned = self.nodes[n].elements().to_vec();
                            for eid in owned {
                                let oct = self.which_child(node_index, eid)?;
                                stack.push((eid, children[oct.index()]));
                            }
                        }
                    }
                    Some(children) => {
                        self.nodes[n].push_element(eid);
                        let oct = self.which_child(node_index, eid)?;
                        stack.push((eid, children[oct.index()]));
                    }
                }
            }
        }

        debug!(
            elements = self.mesh.n_elements(),
            nodes = self.nodes.len(),
            "octree populated"
        );
        Ok(())
    }

    /// Compute the cumulative subtree volume of every node, bottom-up.
    ///
    /// Iterative post-order traversal with two-state `(node, visited)`
    /// frames: a node's first visit pushes its children, its second folds
    /// their volumes. Leaves sum their own elements directly; internal nodes
    /// take only the child sum, since their element lists duplicate the
    /// subtree contents. Each node is visited at most twice and the call
    /// stack stays flat no matter how deep the tree is.
    fn finalize(&mut self) {
        let mut stack = vec![(ROOT, false)];

        while let Some((node_index, visited)) = stack.pop() {
            let n = node_index as usize;
            match self.nodes[n].children().copied() {
                None => {
                    let volume = self.nodes[n].compute_volume(&self.mesh);
                    self.nodes[n].set_volume(volume);
                }
                Some(children) if visited => {
                    let volume = children
                        .iter()
                        .fold(Real::ZERO, |acc, &c| acc + self.nodes[c as usize].volume());
                    self.nodes[n].set_volume(volume);
                }
                Some(children) => {
                    stack.push((node_index, true));
                    for &child in &children {
                        stack.push((child, false));
                    }
                }
            }
        }

        debug!(volume = %self.nodes[ROOT as usize].volume(), "octree finalized");
    }
}
