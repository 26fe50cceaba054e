use nalgebra::{point, Point3, Vector3};

use crate::{Float, Octant};

#[derive(Debug, Clone, Copy, thiserror::Error)]
pub enum AabbError<Real: Float> {
    #[error("volume {0:?} does not contain point {1:?}")]
    PointOutOfBounds(Aabb<Real>, Point3<Real>),
}

/// Axis-Aligned Bounding Box.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Aabb<Real: Float> {
    pub mins: Point3<Real>,
    pub maxs: Point3<Real>,
}

impl<Real: Float> Aabb<Real> {
    #[inline]
    pub fn new(mins: Point3<Real>, maxs: Point3<Real>) -> Self {
        Self { mins, maxs }
    }

    #[inline]
    pub fn contains(&self, p: &Point3<Real>) -> bool {
        let Self { mins: i, maxs: a } = self;
        (p.x >= i.x && p.y >= i.y && p.z >= i.z) && (p.x <= a.x && p.y <= a.y && p.z <= a.z)
    }

    /// Determine the center of `self`.
    #[inline]
    pub fn center(&self) -> Point3<Real> {
        let Self { mins: i, maxs: a } = self;
        point![
            (i.x + a.x) / Real::TWO,
            (i.y + a.y) / Real::TWO,
            (i.z + a.z) / Real::TWO
        ]
    }

    /// The per-axis extents of `self`.
    #[inline]
    pub fn extents(&self) -> Vector3<Real> {
        self.maxs - self.mins
    }

    /// Construct an [Aabb] by taking an octant from `self`.
    ///
    /// This is total over all eight octant codes and derived purely from the
    /// box corners and their midpoint, so the eight children exactly tile
    /// `self` with no gap or overlap.
    pub fn child(&self, oct: Octant) -> Self {
        let Self { mins: i, maxs: a } = self;
        let c = self.center();
        Self {
            mins: point![
                if oct.is_right() { c.x } else { i.x },
                if oct.is_top() { c.y } else { i.y },
                if oct.is_front() { c.z } else { i.z }
            ],
            maxs: point![
                if oct.is_right() { a.x } else { c.x },
                if oct.is_top() { a.y } else { c.y },
                if oct.is_front() { a.z } else { c.z }
            ],
        }
    }

    /// Determine the [Octant] of a point `p` within `self`.
    ///
    /// Each axis is classified half-open against the midpoint: the lower half
    /// is `[min, mid)` and the upper half is `[mid, max]`, so a point exactly
    /// on the midpoint goes to the upper octant, and the outermost faces of
    /// the box are closed on both ends.
    ///
    /// # Errors
    ///
    /// * [`PointOutOfBounds`](AabbError::PointOutOfBounds) if `p` ∉ `self` on
    ///   any axis.
    pub fn octant_of(&self, p: &Point3<Real>) -> Result<Octant, AabbError<Real>> {
        let c = self.center();
        let out = AabbError::PointOutOfBounds(*self, *p);
        Ok(Octant::new(
            classify_axis(self.mins.x, c.x, self.maxs.x, p.x).ok_or(out)?,
            classify_axis(self.mins.y, c.y, self.maxs.y, p.y).ok_or(out)?,
            classify_axis(self.mins.z, c.z, self.maxs.z, p.z).ok_or(out)?,
        ))
    }
}

/// One axis of the half-open octant classification: `false` for `[min, mid)`,
/// `true` for `[mid, max]`, `None` outside the box.
#[inline]
fn classify_axis<Real: Float>(min: Real, mid: Real, max: Real, v: Real) -> Option<bool> {
    if min <= v && v < mid {
        Some(false)
    } else if mid <= v && v <= max {
        Some(true)
    } else {
        None
    }
}
