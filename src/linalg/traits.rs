/* ************************************************************************ **
** This file is part of mvpusc, and is licensed under EITHER the MIT        **
** license or the Apache 2.0 license, at your option.                       **
**                                                                          **
**     http://www.apache.org/licenses/LICENSE-2.0                           **
**     http://opensource.org/licenses/MIT                                   **
** ************************************************************************ */

// Scalar traits exposed in public interfaces.
//
// The primitive numeric types get impls here.  The traits are left open so
// that a downstream arbitrary-precision type can opt in; such a type picks
// the generic regularization strategy (see `reg`).

use std::fmt;
use std::ops::{Add, Sub, Mul, Div, Neg};

use crate::reg::{self, RegEps};

/// Trait for scalars with addition and multiplication.
///
/// This is all that is needed for sums, products, dot products, and
/// matrix multiplication.
pub trait Semiring
    : Sized + Copy + PartialEq + fmt::Debug
    + Add<Output=Self>
    + Mul<Output=Self>
    + num_traits::Zero
    + num_traits::One
{ }

/// Trait for scalars with addition, multiplication, and subtraction.
///
/// It doesn't include unsigned integers because a ring must be
/// closed under negation.  Determinants, adjugates and cross products
/// only need a ring.
pub trait Ring
    : Semiring
    + Sub<Output=Self>
    + Neg<Output=Self>
{ }

/// Trait for scalars with addition, multiplication, subtraction, and division,
/// plus the handful of real functions that norms and angles need.
///
/// The primitive impls are `f32` and `f64`.
pub trait Field
    : Ring
    + Div<Output=Self>
    + PartialOrd
    + RegEps
{
    fn sqrt(self) -> Self;
    fn acos(self) -> Self;
}

gen_each!{
    @{semiring}
    for_each!({$T:ty}) => {
        impl Semiring for $T { }
    };
}

gen_each!{
    @{ring}
    for_each!({$T:ty}) => {
        impl Ring for $T { }
    };
}

gen_each!{
    @{field}
    for_each!({$T:ty}) => {
        impl Field for $T {
            #[inline(always)] fn sqrt(self) -> $T { <$T>::sqrt(self) }
            #[inline(always)] fn acos(self) -> $T { <$T>::acos(self) }
        }

        impl RegEps for $T {
            #[inline]
            fn reg_eps(order: u32) -> $T { reg::native_reg_eps(order) as $T }
        }
    };
}

/// Internal-use traits for things only the primitive floats can do.
pub(crate) mod internal {
    pub trait PrimitiveFloat: super::Field {
        fn uniform_with(rng: impl rand::Rng, _: (Self, Self)) -> Self;
    }

    gen_each!{
        @{field}
        for_each!({$T:ty}) => {
            impl PrimitiveFloat for $T {
                #[inline(always)]
                fn uniform_with(mut rng: impl rand::Rng, (lo, hi): (Self, Self)) -> Self {
                    let alpha: Self = rng.gen();
                    lo + (hi - lo) * alpha
                }
            }
        };
    }
}
