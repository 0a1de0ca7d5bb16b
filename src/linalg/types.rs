/* ************************************************************************ **
** This file is part of mvpusc, and is licensed under EITHER the MIT        **
** license or the Apache 2.0 license, at your option.                       **
**                                                                          **
**     http://www.apache.org/licenses/LICENSE-2.0                           **
**     http://opensource.org/licenses/MIT                                   **
** ************************************************************************ */

use std::ops::{Deref, DerefMut};
use std::fmt;

#[cfg(feature = "serde")]
use serde::{Serialize, Deserialize};

// ---------------------------------------------------------------------------

// `P` is the regularization order used by `rnorm` and friends; see `reg`.

/// A 2-dimensional vector with operations for linear algebra.
#[derive(Copy, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[repr(transparent)]
pub struct V2<X=f64, const P: u32 = 10>(pub [X; 2]);

/// A 3-dimensional vector with operations for linear algebra.
#[derive(Copy, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[repr(transparent)]
pub struct V3<X=f64, const P: u32 = 10>(pub [X; 3]);

/// A 4-dimensional vector with operations for linear algebra.
#[derive(Copy, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[repr(transparent)]
pub struct V4<X=f64, const P: u32 = 10>(pub [X; 4]);

// ---------------------------------------------------------------------------

/// A linear algebra dense matrix with 2 rows and fixed width.
#[derive(Copy, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct M2<V>(pub [V; 2]);

/// A linear algebra dense matrix with 3 rows and fixed width.
#[derive(Copy, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct M3<V>(pub [V; 3]);

/// A linear algebra dense matrix with 4 rows and fixed width.
#[derive(Copy, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct M4<V>(pub [V; 4]);

/// A square dense 2x2 matrix.
pub type M22<X=f64> = M2<V2<X>>;
/// A square dense 3x3 matrix.
pub type M33<X=f64> = M3<V3<X>>;
/// A square dense 4x4 matrix.
pub type M44<X=f64> = M4<V4<X>>;

// ---------------------------------------------------------------------------
// All types behave generally like their backing array type.
//
// Indexing goes through the array, so an out-of-range index panics.
// Matrix elements are `m[r][c]`.

pub type Iter<'a, X> = std::slice::Iter<'a, X>;
pub type IterMut<'a, X> = std::slice::IterMut<'a, X>;

gen_each!{
    @{Vn_n}
    for_each!(
        {$Vn:ident $n:tt}
    ) => {
        impl<X, const P: u32> Deref for $Vn<X, P> {
            type Target = [X; $n];

            #[inline(always)]
            fn deref(&self) -> &Self::Target
            { &self.0 }
        }

        impl<X, const P: u32> DerefMut for $Vn<X, P> {
            #[inline(always)]
            fn deref_mut(&mut self) -> &mut Self::Target
            { &mut self.0 }
        }

        // Many methods take `I: IntoIterator`, which Deref doesn't help with.
        impl<'a, X, const P: u32> IntoIterator for &'a $Vn<X, P> {
            type Item = &'a X;
            type IntoIter = Iter<'a, X>;

            #[inline(always)]
            fn into_iter(self) -> Self::IntoIter
            { self.0.iter() }
        }

        impl<'a, X, const P: u32> IntoIterator for &'a mut $Vn<X, P> {
            type Item = &'a mut X;
            type IntoIter = IterMut<'a, X>;

            #[inline(always)]
            fn into_iter(self) -> Self::IntoIter
            { self.0.iter_mut() }
        }

        // forward the debug impl without a surrounding "V3(...)", so that the
        // output is valid JSON and Python for the common scalar types
        impl<X: fmt::Debug, const P: u32> fmt::Debug for $Vn<X, P> {
            #[inline]
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result
            { fmt::Debug::fmt(&self.0, f) }
        }
    }
}

gen_each!{
    @{Mn_n}
    for_each!(
        {$Mn:ident $n:tt}
    ) => {
        impl<V> Deref for $Mn<V> {
            type Target = [V; $n];

            #[inline(always)]
            fn deref(&self) -> &Self::Target
            { &self.0 }
        }

        impl<V> DerefMut for $Mn<V> {
            #[inline(always)]
            fn deref_mut(&mut self) -> &mut Self::Target
            { &mut self.0 }
        }

        impl<'a, V> IntoIterator for &'a $Mn<V> {
            type Item = &'a V;
            type IntoIter = Iter<'a, V>;

            #[inline(always)]
            fn into_iter(self) -> Self::IntoIter
            { self.0.iter() }
        }

        impl<'a, V> IntoIterator for &'a mut $Mn<V> {
            type Item = &'a mut V;
            type IntoIter = IterMut<'a, V>;

            #[inline(always)]
            fn into_iter(self) -> Self::IntoIter
            { self.0.iter_mut() }
        }

        impl<V: fmt::Debug> fmt::Debug for $Mn<V> {
            #[inline]
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result
            { fmt::Debug::fmt(&self.0, f) }
        }
    }
}
