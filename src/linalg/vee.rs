/* ************************************************************************ **
** This file is part of mvpusc, and is licensed under EITHER the MIT        **
** license or the Apache 2.0 license, at your option.                       **
**                                                                          **
**     http://www.apache.org/licenses/LICENSE-2.0                           **
**     http://opensource.org/licenses/MIT                                   **
** ************************************************************************ */

use crate::traits::{Semiring, Ring, Field};
use crate::traits::internal::PrimitiveFloat;
use crate::reg::RegularizationEps;
use crate::errors::ArityError;
use crate::mat::Det;

use super::types::*;

use std::convert::TryFrom;
use num_traits::Zero;

// ---------------------------------------------------------------------------
// ------------------------------ PUBLIC API ---------------------------------

gen_each!{
    @{Vn_n}
    for_each!(
        {$Vn:ident $n:tt}
    ) => {
        impl<X, const P: u32> $Vn<X, P> {
            /// Get a zero vector.
            ///
            /// This is also what `Default` produces.
            #[inline(always)]
            pub fn zero() -> Self
            where Self: Zero,
            { Zero::zero() }

            /// Construct a fixed-size vector from a function on indices.
            #[inline(always)]
            pub fn from_fn<F>(f: F) -> Self
            where F: FnMut(usize) -> X,
            { $Vn(std::array::from_fn(f)) }

            /// Construct a fixed-size vector from a fallible function on indices,
            /// with short-circuiting.
            #[inline(always)]
            pub fn try_from_fn<E, F>(f: F) -> Result<Self, E>
            where F: FnMut(usize) -> Result<X, E>,
            { TryFromFn::try_from_fn(f) }

            /// Construct a vector from a sequence whose length is only known at runtime.
            ///
            /// This is the one validated constructor; a length other than the
            /// dimension is an `ArityError`.
            pub fn try_from_slice(xs: &[X]) -> Result<Self, ArityError>
            where X: Copy,
            {
                if xs.len() != $n {
                    return Err(ArityError { expected: $n, actual: xs.len() });
                }
                Ok(Self::from_fn(|i| xs[i]))
            }

            /// Get the inner product of two vectors.
            ///
            /// It is recommended you write this as `V3::dot(a, b)`, rather than `a.dot(b)`.
            #[inline(always)]
            pub fn dot(&self, other: &Self) -> X
            where X: Semiring,
            { Dot::dot(self, other) }

            /// Get the vector's squared magnitude.
            #[inline(always)]
            pub fn sqnorm(&self) -> X
            where X: Semiring,
            { Dot::dot(self, self) }

            /// Get the vector's magnitude.
            #[inline(always)]
            pub fn norm(&self) -> X
            where X: Field,
            { self.sqnorm().sqrt() }

            /// Get the regularized magnitude `sqrt(|v|^2 + eps^2)`.
            ///
            /// This is strictly greater than `norm`, and smooth even at the origin.
            #[inline(always)]
            pub fn rnorm(&self) -> X
            where X: Field,
            { (self.sqnorm() + Self::eps_squared()).sqrt() }

            /// The regularization constant `10^-P` used by `rnorm`.
            #[inline(always)]
            pub fn eps() -> X
            where X: Field,
            { RegularizationEps::<X, P>::value() }

            /// The square of `eps`.
            #[inline(always)]
            pub fn eps_squared() -> X
            where X: Field,
            { RegularizationEps::<X, P>::squared() }

            /// Divide the vector by its norm.
            ///
            /// Division by zero for the zero vector is not guarded against.
            #[inline(always)]
            pub fn normalize(&self) -> Self
            where X: Field,
            { self / self.norm() }

            /// Divide the vector by its regularized norm.
            ///
            /// The result has a norm slightly less than 1, and is finite for every input.
            #[inline(always)]
            pub fn rnormalize(&self) -> Self
            where X: Field,
            { self / self.rnorm() }

            /// Get a basis vector.
            #[inline(always)]
            pub fn axis_unit(i: usize) -> Self
            where X: Semiring,
            {
                let mut v = Self::zero();
                *v.get_mut(i)
                    .unwrap_or_else(|| panic!("Invalid axis for {}d vector: {}", $n, i)) = X::one();
                v
            }

            /// Generate a randomly-oriented unit vector whose direction comes from a uniform
            /// distribution.
            #[inline(always)]
            pub fn random_unit() -> Self
            where Self: RandomUnit,
            { RandomUnit::random_unit() }

            /// Generate a randomly-oriented unit vector whose direction comes from a uniform
            /// distribution.
            #[inline(always)]
            pub fn random_unit_with(rng: impl rand::Rng) -> Self
            where Self: RandomUnit,
            { RandomUnit::random_unit_with(rng) }

            /// Get the shortest angle (as a value in `[0, pi]`) between this vector and another.
            #[inline]
            pub fn angle_to(&self, other: &Self) -> X
            where X: Field,
            {
                let one = X::one();
                let arg = dot(self, other) / (self.sqnorm() * other.sqnorm()).sqrt();
                // rounding can push the cosine just past 1
                let arg = match () {
                    _ if arg > one => one,
                    _ if arg < -one => -one,
                    _ => arg,
                };
                arg.acos()
            }

            /// Apply a function to each element.
            #[inline]
            pub fn map<B, F>(self, f: F) -> $Vn<B, P>
            where F: FnMut(X) -> B,
            { $Vn(self.0.map(f)) }

            /// Apply a fallible function to each element, with short-circuiting.
            #[inline(always)]
            pub fn try_map<E, B, F>(self, f: F) -> Result<$Vn<B, P>, E>
            where F: FnMut(X) -> Result<B, E>,
            { TryMap::try_map(self, f) }
        }

        impl<'a, X: Copy, const P: u32> TryFrom<&'a [X]> for $Vn<X, P> {
            type Error = ArityError;

            #[inline]
            fn try_from(xs: &'a [X]) -> Result<Self, ArityError>
            { Self::try_from_slice(xs) }
        }

        impl<X: Copy, const P: u32> TryFrom<Vec<X>> for $Vn<X, P> {
            type Error = ArityError;

            #[inline]
            fn try_from(xs: Vec<X>) -> Result<Self, ArityError>
            { Self::try_from_slice(&xs) }
        }
    }
}

impl<X: Ring, const P: u32> V2<X, P> {
    /// Generalized cross product of a single 2d vector.
    ///
    /// This is a counter-clockwise rotation by 90 degrees, `(-y, x)`.
    #[inline]
    pub fn cross(&self) -> Self
    { Cross::cross_of([self]) }
}

impl<X: Ring, const P: u32> V3<X, P> {
    /// The ordinary cross product.
    #[inline]
    pub fn cross(&self, other: &Self) -> Self
    { Cross::cross_of([self, other]) }
}

impl<X: Ring, const P: u32> V4<X, P> {
    /// Generalized cross product of three 4d vectors.
    ///
    /// The output is orthogonal to all three inputs.
    #[inline]
    pub fn cross(&self, b: &Self, c: &Self) -> Self
    { Cross::cross_of([self, b, c]) }
}

/// Inner product of vectors.
///
/// This is basically just `{V2,V3,V4}::dot` as a free function,
/// because everyone loves symmetry.
#[inline(always)]
pub fn dot<V>(a: &V, b: &V) -> ScalarT<V>
where V: Dot,
{ Dot::dot(a, b) }

/// Generalized cross product of `N - 1` vectors of dimension `N`.
///
/// `cross([&u])` for 2d, `cross([&u, &v])` for 3d, `cross([&u, &v, &w])` for 4d.
#[inline(always)]
pub fn cross<V, const K: usize>(operands: [&V; K]) -> V
where V: Cross<K>,
{ Cross::cross_of(operands) }

/// Euclidean norm.
#[inline(always)]
pub fn norm<V>(v: &V) -> ScalarT<V>
where V: Dot, ScalarT<V>: Field,
{ v.dot(v).sqrt() }

/// Regularized norm, `sqrt(|v|^2 + eps^2)`.
#[inline(always)]
pub fn rnorm<V>(v: &V) -> ScalarT<V>
where V: Regularized,
{ Regularized::rnorm(v) }

/// `v / norm(v)`.
#[inline(always)]
pub fn normalize<V>(v: &V) -> V
where V: Regularized,
{ Regularized::normalize(v) }

/// `v / rnorm(v)`.
#[inline(always)]
pub fn rnormalize<V>(v: &V) -> V
where V: Regularized,
{ Regularized::rnormalize(v) }

/// Element type of the vector.
pub type ScalarT<V> = <V as IsV>::Scalar;
/// Trait that provides associated types for `V2, V3, V4`.
pub trait IsV {
    type Scalar;
}

gen_each!{
    @{Vn}
    for_each!(
        {$Vn:ident}
    ) => {
        impl<X, const P: u32> IsV for $Vn<X, P>
        { type Scalar = X; }
    }
}

// -------------------------- END PUBLIC API ---------------------------------
// The rest is implementation and boilerplate
// ---------------------------------------------------------------------------

gen_each!{
    @{Vn_n}
    for_each!(
        {$Vn:ident $n:tt}
    ) => {
        impl<X: Semiring, const P: u32> Zero for $Vn<X, P> {
            #[inline]
            fn zero() -> Self
            { $Vn([X::zero(); $n]) }

            #[inline]
            fn is_zero(&self) -> bool
            { self.iter().all(Zero::is_zero) }
        }

        impl<X: Semiring, const P: u32> Default for $Vn<X, P> {
            #[inline]
            fn default() -> Self
            { Zero::zero() }
        }
    }
}

// ---------------------------------------------------------------------------

/// Implementation detail of `V3::try_from_fn`.
pub(crate) trait TryFromFn: Sized {
    type Elem;

    fn try_from_fn<E>(f: impl FnMut(usize) -> Result<Self::Elem, E>) -> Result<Self, E>;
}

impl<A, const P: u32> TryFromFn for V2<A, P> {
    type Elem = A;

    #[inline]
    fn try_from_fn<E>(mut f: impl FnMut(usize) -> Result<Self::Elem, E>) -> Result<Self, E> {
        Ok(V2([f(0)?, f(1)?]))
    }
}

impl<A, const P: u32> TryFromFn for V3<A, P> {
    type Elem = A;

    #[inline]
    fn try_from_fn<E>(mut f: impl FnMut(usize) -> Result<Self::Elem, E>) -> Result<Self, E> {
        Ok(V3([f(0)?, f(1)?, f(2)?]))
    }
}

impl<A, const P: u32> TryFromFn for V4<A, P> {
    type Elem = A;

    #[inline]
    fn try_from_fn<E>(mut f: impl FnMut(usize) -> Result<Self::Elem, E>) -> Result<Self, E> {
        Ok(V4([f(0)?, f(1)?, f(2)?, f(3)?]))
    }
}

// ---------------------------------------------------------------------------

/// Implementation detail of the inherent method `V3::try_map`.
pub(crate) trait TryMap<B>: Sized {
    type Elem;
    type Output;

    fn try_map<E>(self, f: impl FnMut(Self::Elem) -> Result<B, E>) -> Result<Self::Output, E>;
}

impl<A, B, const P: u32> TryMap<B> for V2<A, P> {
    type Elem = A;
    type Output = V2<B, P>;

    #[inline]
    fn try_map<E>(self, mut f: impl FnMut(Self::Elem) -> Result<B, E>) -> Result<Self::Output, E> {
        let V2([a, b]) = self;
        Ok(V2([f(a)?, f(b)?]))
    }
}

impl<A, B, const P: u32> TryMap<B> for V3<A, P> {
    type Elem = A;
    type Output = V3<B, P>;

    #[inline]
    fn try_map<E>(self, mut f: impl FnMut(Self::Elem) -> Result<B, E>) -> Result<Self::Output, E> {
        let V3([a, b, c]) = self;
        Ok(V3([f(a)?, f(b)?, f(c)?]))
    }
}

impl<A, B, const P: u32> TryMap<B> for V4<A, P> {
    type Elem = A;
    type Output = V4<B, P>;

    #[inline]
    fn try_map<E>(self, mut f: impl FnMut(Self::Elem) -> Result<B, E>) -> Result<Self::Output, E> {
        let V4([a, b, c, d]) = self;
        Ok(V4([f(a)?, f(b)?, f(c)?, f(d)?]))
    }
}

// ---------------------------------------------------------------------------

/// Implementation detail of the inherent method `{V2,V3,V4}::dot`.
///
/// > **_Fuggedaboudit._**
///
/// Without this, the free function `dot` could not be generic over different
/// sizes of V.
pub trait Dot: IsV {
    fn dot(&self, b: &Self) -> ScalarT<Self>;
}

gen_each!{
    @{Vn_n}
    for_each!( {$Vn:ident $n:tt} ) => {
        impl<X: Semiring, const P: u32> Dot for $Vn<X, P> {
            #[inline]
            fn dot(&self, other: &$Vn<X, P>) -> X
            { (1..$n).fold(self[0] * other[0], |s, i| s + self[i] * other[i]) }
        }
    }
}

/// Implementation detail of the free functions `rnorm`, `normalize` and `rnormalize`.
///
/// > **_Fuggedaboudit._**
pub trait Regularized: Dot + Sized {
    fn rnorm(&self) -> ScalarT<Self>;
    fn normalize(&self) -> Self;
    fn rnormalize(&self) -> Self;
}

gen_each!{
    @{Vn}
    for_each!( {$Vn:ident} ) => {
        impl<X: Field, const P: u32> Regularized for $Vn<X, P> {
            #[inline(always)]
            fn rnorm(&self) -> X { $Vn::rnorm(self) }
            #[inline(always)]
            fn normalize(&self) -> Self { $Vn::normalize(self) }
            #[inline(always)]
            fn rnormalize(&self) -> Self { $Vn::rnormalize(self) }
        }
    }
}

// ---------------------------------------------------------------------------

/// Implementation detail of the free function `cross`.
///
/// > **_Fuggedaboudit._**
///
/// `K` is always one less than the dimension.
pub trait Cross<const K: usize>: IsV + Sized {
    fn cross_of(operands: [&Self; K]) -> Self;
}

// Every dimension uses the same construction: component `i` is the
// determinant of the matrix whose leading rows are the operands and
// whose last row is the i-th basis vector.  The determinants are the
// closed-form ones from `mat`, so this unrolls completely.
gen_each!{
    @{Mnn_Mn_Vn_n}
    impl_cross!( {$Mnn:ident $Mn:ident $Vn:ident $n:tt} ) => {
        impl<X: Ring, const P: u32> Cross<{$n - 1}> for $Vn<X, P> {
            #[inline]
            fn cross_of(operands: [&Self; $n - 1]) -> Self {
                let mut rows: $Mnn<X> = Zero::zero();
                for (r, operand) in operands.iter().enumerate() {
                    rows.0[r] = $Vn(operand.0);
                }
                $Vn::from_fn(|i| {
                    let mut m = rows;
                    m.0[$n - 1] = <$Vn<X>>::axis_unit(i);
                    Det::det(&m)
                })
            }
        }
    }
}

// ---------------------------------------------------------------------------

/// Implementation detail of the inherent method `{V2,V3,V4}::random_unit`.
///
/// > **_Fuggedaboudit._**
pub trait RandomUnit: IsV + Sized {
    #[inline]
    fn random_unit() -> Self
    { RandomUnit::random_unit_with(rand::thread_rng()) }

    fn random_unit_with(rng: impl rand::Rng) -> Self;
}

// http://mathworld.wolfram.com/CirclePointPicking.html
impl<X: PrimitiveFloat, const P: u32> RandomUnit for V2<X, P> {
    #[inline]
    fn random_unit_with(mut rng: impl rand::Rng) -> Self
    {
        let two = X::one() + X::one();
        loop {
            let x1 = X::uniform_with(&mut rng, (-X::one(), X::one()));
            let x2 = X::uniform_with(&mut rng, (-X::one(), X::one()));
            let denom = x1*x1 + x2*x2;
            if denom >= X::one() || denom == X::zero() {
                continue;
            }
            let x = (x1*x1 - x2*x2) / denom;
            let y = two*x1*x2 / denom;
            return V2([x, y]);
        }
    }
}

// http://mathworld.wolfram.com/SpherePointPicking.html
impl<X: PrimitiveFloat, const P: u32> RandomUnit for V3<X, P> {
    #[inline]
    fn random_unit_with(mut rng: impl rand::Rng) -> Self
    {
        let two = X::one() + X::one();
        loop {
            let x1 = X::uniform_with(&mut rng, (-X::one(), X::one()));
            let x2 = X::uniform_with(&mut rng, (-X::one(), X::one()));
            let sqsum = x1*x1 + x2*x2;
            if sqsum >= X::one() {
                continue;
            }
            let root = (X::one() - sqsum).sqrt();
            let x = two * x1 * root;
            let y = two * x2 * root;
            let z = X::one() - two * sqsum;
            return V3([x, y, z]);
        }
    }
}

// http://mathworld.wolfram.com/HyperspherePointPicking.html (Marsaglia 1972)
impl<X: PrimitiveFloat, const P: u32> RandomUnit for V4<X, P> {
    #[inline]
    fn random_unit_with(mut rng: impl rand::Rng) -> Self
    {
        let mut disk = || loop {
            let a = X::uniform_with(&mut rng, (-X::one(), X::one()));
            let b = X::uniform_with(&mut rng, (-X::one(), X::one()));
            let sqsum = a*a + b*b;
            if sqsum < X::one() && sqsum > X::zero() {
                return (a, b, sqsum);
            }
        };
        let (x1, x2, s1) = disk();
        let (x3, x4, s2) = disk();
        let factor = ((X::one() - s1) / s2).sqrt();
        V4([x1, x2, x3 * factor, x4 * factor])
    }
}

// ---------------------------------------------------------------------------

// stdlib integration

gen_each!{
    @{Vn}
    for_each!( {$Vn:ident} ) => {
        impl<X: Semiring, const P: u32> std::iter::Sum for $Vn<X, P> {
            fn sum<I: Iterator<Item=$Vn<X, P>>>(iter: I) -> Self {
                iter.fold($Vn::zero(), |a, b| a + b)
            }
        }

        impl<'a, X: Semiring, const P: u32> std::iter::Sum<&'a $Vn<X, P>> for $Vn<X, P> {
            fn sum<I: Iterator<Item=&'a $Vn<X, P>>>(iter: I) -> Self {
                iter.fold($Vn::zero(), |a, b| a + b)
            }
        }
    }
}

// slice-of-array integration.
//
// because `x.nest::<[_; 3]>().envee()` (turbofish required) really sucks.
gen_each!{
    @{Vn_n}
    for_each!( {$Vn:ident $n:tt} ) => {
        // the types are `repr(transparent)` over `[X; n]`
        unsafe impl<X, const P: u32> slice_of_array::IsSliceomorphic for $Vn<X, P> {
            type Element = X;
            const LEN: usize = $n;
        }
    }
}

// ---------------------------------------------------------------------------
