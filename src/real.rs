use nalgebra::{ClosedAddAssign, ClosedDivAssign, ClosedMulAssign, ClosedSubAssign};

/// Trait for the floating-point types an octree can be built over, so that the
/// rest of the crate can be generic over {f32, f64} without weird macros at
/// every use site.
pub trait Float:
    num_traits::Float
    + nalgebra::Scalar
    + ClosedAddAssign
    + ClosedSubAssign
    + ClosedMulAssign
    + ClosedDivAssign
    + std::fmt::Display
    + Send
    + Sync
{
    const ZERO: Self;
    const TWO: Self;
    const FOUR: Self;
    const SIX: Self;
}

// this macro lets us impl Float for both f32 and f64 without having to copy/paste
macro_rules! impl_float {
    ($($real:ty),*) => {$(
        impl Float for $real {
            const ZERO: Self = 0.0;
            const TWO: Self = 2.0;
            const FOUR: Self = 4.0;
            const SIX: Self = 6.0;
        }
    )*};
}
impl_float!(f32, f64);
