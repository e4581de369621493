use crate::types::Scalar;
use std::fmt::Debug;
use std::ops::{Add, Div, Mul, Neg, Sub};

/// Value type the interpreter can evaluate trees in.
///
/// Implementors only provide arithmetic and the elementary functions; the
/// vectorized kernels in [`crate::functions::primitives`] are written once
/// against this trait and registered per type in the dispatch table.
pub trait Numeric:
    Copy
    + Debug
    + Default
    + Send
    + Sync
    + 'static
    + Add<Output = Self>
    + Sub<Output = Self>
    + Mul<Output = Self>
    + Div<Output = Self>
    + Neg<Output = Self>
{
    /// Rows processed per interpreter step.
    const BATCH_SIZE: usize;

    /// Type name used in diagnostics.
    const NAME: &'static str;

    fn from_scalar(value: Scalar) -> Self;

    fn exp(self) -> Self;
    fn ln(self) -> Self;
    fn sin(self) -> Self;
    fn cos(self) -> Self;
    fn tan(self) -> Self;
    fn sqrt(self) -> Self;
    fn cbrt(self) -> Self;

    fn square(self) -> Self {
        self * self
    }
}

macro_rules! impl_numeric_float {
    ($t:ty, $batch:expr) => {
        impl Numeric for $t {
            const BATCH_SIZE: usize = $batch;
            const NAME: &'static str = stringify!($t);

            #[inline]
            fn from_scalar(value: Scalar) -> Self {
                value as $t
            }

            #[inline]
            fn exp(self) -> Self {
                <$t>::exp(self)
            }

            #[inline]
            fn ln(self) -> Self {
                <$t>::ln(self)
            }

            #[inline]
            fn sin(self) -> Self {
                <$t>::sin(self)
            }

            #[inline]
            fn cos(self) -> Self {
                <$t>::cos(self)
            }

            #[inline]
            fn tan(self) -> Self {
                <$t>::tan(self)
            }

            #[inline]
            fn sqrt(self) -> Self {
                <$t>::sqrt(self)
            }

            #[inline]
            fn cbrt(self) -> Self {
                <$t>::cbrt(self)
            }
        }
    };
}

impl_numeric_float!(f32, 128);
impl_numeric_float!(f64, 64);
