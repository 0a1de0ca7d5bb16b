/* ************************************************************************ **
** This file is part of mvpusc, and is licensed under EITHER the MIT        **
** license or the Apache 2.0 license, at your option.                       **
**                                                                          **
**     http://www.apache.org/licenses/LICENSE-2.0                           **
**     http://opensource.org/licenses/MIT                                   **
** ************************************************************************ */

//! Regularization constants for the `rnorm` family of functions.
//!
//! A regularized norm is `sqrt(|u|^2 + eps^2)` with `eps = 10^-REG`.  It is
//! strictly positive and smooth at `u = 0`, which is what downstream formulas
//! that divide by distances need.

use std::convert::TryFrom;
use std::marker::PhantomData;
use std::ops::{Add, Div, Mul};

/// The regularization order used when none is specified.
pub const DEFAULT_REG: u32 = 10;

/// The constant `10^-REG` for scalar type `X`.
///
/// This is a pure type-level lookup; it has no values.
pub struct RegularizationEps<X, const REG: u32>(PhantomData<X>);

impl<X: RegEps, const REG: u32> RegularizationEps<X, REG> {
    /// `10^-REG`.
    #[inline]
    pub fn value() -> X
    { X::reg_eps(REG) }

    /// `(10^-REG)^2`, the amount actually added under the square root.
    #[inline]
    pub fn squared() -> X
    where X: Mul<Output=X> + Copy,
    {
        let eps = Self::value();
        eps * eps
    }
}

/// Implementation detail of `RegularizationEps::value`.
///
/// Each scalar type chooses one of the two strategies below.
/// Primitive floats use `native_reg_eps`; a type with its own arithmetic
/// (e.g. arbitrary precision) should use `generic_reg_eps` so that the
/// constant is exact to the type's own precision.
pub trait RegEps: Sized {
    fn reg_eps(order: u32) -> Self;
}

/// `10^-order` computed with the native float power function.
///
/// Orders too large for `powi` give zero, which is where the float
/// result has long since underflowed to anyway.
#[inline]
pub fn native_reg_eps(order: u32) -> f64 {
    match i32::try_from(order) {
        Ok(order) => 10f64.powi(-order),
        Err(_) => 0.0,
    }
}

/// `1 / 10^order` computed entirely through `T`'s own arithmetic.
pub fn generic_reg_eps<T>(order: u32) -> T
where
    T: Copy + num_traits::Zero + num_traits::One,
    T: Add<Output=T> + Mul<Output=T> + Div<Output=T>,
{
    let ten = (0..10).fold(T::zero(), |acc, _| acc + T::one());
    let power = (0..order).fold(T::one(), |acc, _| acc * ten);
    T::one() / power
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::ops::{Add, Div, Mul};

    #[test]
    fn native_values() {
        assert_eq!(RegularizationEps::<f64, 0>::value(), 1.0);
        assert_close!(rel=1e-15, 1e-10, RegularizationEps::<f64, 10>::value());
        assert_close!(rel=1e-15, 1e-20, RegularizationEps::<f64, 10>::squared());
        assert_close!(rel=1e-6, 1e-3, RegularizationEps::<f32, 3>::value() as f64);
    }

    #[test]
    fn huge_orders_underflow() {
        assert_eq!(native_reg_eps(400), 0.0);
        assert_eq!(native_reg_eps(i32::MAX as u32), 0.0);
        assert_eq!(native_reg_eps(1 << 31), 0.0);
        assert_eq!(native_reg_eps(u32::MAX), 0.0);
        assert_eq!(RegularizationEps::<f64, { u32::MAX }>::value(), 0.0);
    }

    // A scalar that only knows its own arithmetic.
    #[derive(Debug, Copy, Clone, PartialEq)]
    struct Counted(f64);

    impl Add for Counted { type Output = Self; fn add(self, o: Self) -> Self { Counted(self.0 + o.0) } }
    impl Mul for Counted { type Output = Self; fn mul(self, o: Self) -> Self { Counted(self.0 * o.0) } }
    impl Div for Counted { type Output = Self; fn div(self, o: Self) -> Self { Counted(self.0 / o.0) } }
    impl num_traits::Zero for Counted {
        fn zero() -> Self { Counted(0.0) }
        fn is_zero(&self) -> bool { self.0 == 0.0 }
    }
    impl num_traits::One for Counted {
        fn one() -> Self { Counted(1.0) }
    }
    impl RegEps for Counted {
        fn reg_eps(order: u32) -> Self { generic_reg_eps(order) }
    }

    #[test]
    fn generic_values() {
        assert_eq!(RegularizationEps::<Counted, 0>::value(), Counted(1.0));
        assert_eq!(RegularizationEps::<Counted, 1>::value(), Counted(0.1));
        assert_eq!(RegularizationEps::<Counted, 2>::value(), Counted(1.0 / 100.0));
        assert_close!(rel=1e-14, 1e-10, RegularizationEps::<Counted, 10>::value().0);
    }

    #[test]
    fn strategies_agree() {
        for order in 0..=20 {
            assert_close!(rel=1e-14, native_reg_eps(order), generic_reg_eps::<f64>(order));
        }
    }
}
