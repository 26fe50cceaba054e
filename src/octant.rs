use std::fmt;

/// A way to refer to octants of an axis-aligned box.
///
/// The code packs one bit per axis, relative to the box midpoint:
///
/// * bit 0 — left (`0`) / right (`1`), the x axis;
/// * bit 1 — bottom (`0`) / top (`2`), the y axis;
/// * bit 2 — back (`0`) / front (`4`), the z axis.
///
/// So `BBL = 0`, `BBR = 1`, …, `FTR = 7`, and the code of a point is the sum
/// of its three per-axis contributions.
#[repr(transparent)]
#[derive(Debug, Default, Copy, Clone, Eq, PartialEq, Hash, PartialOrd, Ord)]
pub struct Octant(u8);

/// Error produced when constructing an [Octant] from a raw code outside `0..8`.
#[derive(Debug, Clone, Copy, thiserror::Error)]
#[error("child index out of range: 0..8 ∌ {0}")]
pub struct ChildOutOfRange(pub u8);

impl Octant {
    /// Back, bottom, left.
    pub const BBL: Self = Self(0);
    /// Back, bottom, right.
    pub const BBR: Self = Self(1);
    /// Back, top, left.
    pub const BTL: Self = Self(2);
    /// Back, top, right.
    pub const BTR: Self = Self(3);
    /// Front, bottom, left.
    pub const FBL: Self = Self(4);
    /// Front, bottom, right.
    pub const FBR: Self = Self(5);
    /// Front, top, left.
    pub const FTL: Self = Self(6);
    /// Front, top, right.
    pub const FTR: Self = Self(7);

    /// Iterator through all eight octants, in code order.
    pub fn all() -> impl Iterator<Item = Self> {
        (0..8).map(Self)
    }

    /// Construct an Octant from per-axis halves.
    #[inline]
    pub fn new(right: bool, top: bool, front: bool) -> Self {
        Self((right as u8) | ((top as u8) << 1) | ((front as u8) << 2))
    }

    /// Construct an Octant from a raw code.
    ///
    /// # Errors
    ///
    /// * [ChildOutOfRange] if `code` ∉ `0..8`.
    pub fn from_code(code: u8) -> Result<Self, ChildOutOfRange> {
        if code < 8 {
            Ok(Self(code))
        } else {
            Err(ChildOutOfRange(code))
        }
    }

    /// The raw octant code, `0..8`.
    #[inline]
    pub fn code(self) -> u8 {
        self.0
    }

    /// The octant code as a child-array index.
    #[inline]
    pub fn index(self) -> usize {
        self.0 as usize
    }

    /// Whether this octant lies in the upper x half (right) of its box.
    #[inline]
    pub fn is_right(self) -> bool {
        self.0 & 0b001 != 0
    }

    /// Whether this octant lies in the upper y half (top) of its box.
    #[inline]
    pub fn is_top(self) -> bool {
        self.0 & 0b010 != 0
    }

    /// Whether this octant lies in the upper z half (front) of its box.
    #[inline]
    pub fn is_front(self) -> bool {
        self.0 & 0b100 != 0
    }
}

impl From<Octant> for u8 {
    fn from(oct: Octant) -> Self {
        oct.0
    }
}

impl From<Octant> for usize {
    fn from(oct: Octant) -> Self {
        oct.0 as usize
    }
}

impl fmt::Display for Octant {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}{}{}",
            if self.is_front() { 'F' } else { 'B' },
            if self.is_top() { 'T' } else { 'B' },
            if self.is_right() { 'R' } else { 'L' },
        )
    }
}
