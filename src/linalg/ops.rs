/* ************************************************************************ **
** This file is part of mvpusc, and is licensed under EITHER the MIT        **
** license or the Apache 2.0 license, at your option.                       **
**                                                                          **
**     http://www.apache.org/licenses/LICENSE-2.0                           **
**     http://opensource.org/licenses/MIT                                   **
** ************************************************************************ */

use std::ops::{Add, Sub, AddAssign, SubAssign, Neg};
use std::ops::{Mul, Div, MulAssign, DivAssign};
use std::fmt;
use crate::traits::{Semiring, Ring, Field};

use super::types::*;

// ---------------------------------------------------------------------------
// vector-vector ops

// NOTE: Operator impls are deliberately between same-typed vectors,
//       rather than e.g. V3<T> and V3<U> where T: Add<U>.
//       Vectors with different regularization orders don't mix either.
gen_each!{
    @{Vn}
    [ [(   ) (   )] [('a,) (&'a)] ]
    [ [(   ) (   )] [('b,) (&'b)] ]
    impl_v_add_sub!(
        {$Vn:ident}
        [ ($($lt_a:tt)*) ($($ref_a:tt)*) ]
        [ ($($lt_b:tt)*) ($($ref_b:tt)*) ]
    ) => {
        // vector + vector
        impl<$($lt_a)* $($lt_b)* X: Semiring, const P: u32> Add<$($ref_b)* $Vn<X, P>> for $($ref_a)* $Vn<X, P> {
            type Output = $Vn<X, P>;

            #[inline]
            fn add(self, other: $($ref_b)* $Vn<X, P>) -> Self::Output
            { $Vn::from_fn(|k| self[k] + other[k]) }
        }

        // vector - vector
        impl<$($lt_a)* $($lt_b)* X: Ring, const P: u32> Sub<$($ref_b)* $Vn<X, P>> for $($ref_a)* $Vn<X, P> {
            type Output = $Vn<X, P>;

            #[inline]
            fn sub(self, other: $($ref_b)* $Vn<X, P>) -> Self::Output
            { $Vn::from_fn(|k| self[k] - other[k]) }
        }
    }
}

// ---------------------------------------------------------------------------
// vector unary ops

gen_each!{
    @{Vn}
    [ [(   ) (   )] [('a,) (&'a)] ]
    impl_v_unops!(
        {$Vn:ident}
        [ ($($lt_a:tt)*) ($($ref_a:tt)*) ]
    ) => {
        // -vector
        impl<$($lt_a)* X: Ring, const P: u32> Neg for $($ref_a)* $Vn<X, P> {
            type Output = $Vn<X, P>;

            #[inline]
            fn neg(self) -> Self::Output
            { $Vn::from_fn(|k| -self.0[k]) }
        }
    }
}

// ---------------------------------------------------------------------------
// vector-scalar ops

// scalar `op` vector
gen_each!{
    @{Vn}
    // NOTE: the orphan rules prevent us from impl-ing these ops "for X" so
    //       we must generate a separate impl for each Semiring type rather than
    //       being generic over X: Semiring
    @{semiring}
    [ [(   ) (   )] [('a,) (&'a)] ]
    impl_v_scalar_ops!(
        {$Vn:ident}
        {$X:ty}
        [ ($($lt_a:tt)*) ($($ref_a:tt)*) ]
    ) => {
        // scalar * vector
        impl<$($lt_a)* const P: u32> Mul<$($ref_a)* $Vn<$X, P>> for $X {
            type Output = $Vn<$X, P>;

            #[inline(always)]
            fn mul(self, vector: $($ref_a)* $Vn<$X, P>) -> Self::Output
            { vector * self }
        }
    }
}

// vector `op` scalar
gen_each!{
    @{Vn}
    [ [(   ) (   )] [('a,) (&'a)] ]
    impl_v_scalar_ops!(
        {$Vn:ident}
        [ ($($lt_a:tt)*) ($($ref_a:tt)*) ]
    ) => {
        // vector * scalar
        impl<$($lt_a)* X: Semiring, const P: u32> Mul<X> for $($ref_a)* $Vn<X, P> {
            type Output = $Vn<X, P>;

            #[inline]
            fn mul(self, scalar: X) -> Self::Output
            { $Vn::from_fn(|k| self[k] * scalar) }
        }

        // vector / scalar
        impl<$($lt_a)* X: Field, const P: u32> Div<X> for $($ref_a)* $Vn<X, P> {
            type Output = $Vn<X, P>;

            #[inline]
            fn div(self, scalar: X) -> Self::Output
            { $Vn::from_fn(|k| self[k] / scalar) }
        }
    }
}

// ---------------------------------------------------------------------------
// matrix-matrix and matrix-scalar elementwise ops

gen_each!{
    @{Mn_n}
    @{Vn_n}
    [ [(   ) (   )] [('a,) (&'a)] ]
    [ [(   ) (   )] [('b,) (&'b)] ]
    impl_m_add_sub!(
        {$Mr:ident $r:tt}
        {$Vc:ident $c:tt}
        [ ($($lt_a:tt)*) ($($ref_a:tt)*) ]
        [ ($($lt_b:tt)*) ($($ref_b:tt)*) ]
    ) => {
        // matrix + matrix
        impl<$($lt_a)* $($lt_b)* X: Semiring> Add<$($ref_b)* $Mr<$Vc<X>>> for $($ref_a)* $Mr<$Vc<X>> {
            type Output = $Mr<$Vc<X>>;

            #[inline]
            fn add(self, other: $($ref_b)* $Mr<$Vc<X>>) -> Self::Output
            { $Mr(std::array::from_fn(|r| self[r] + other[r])) }
        }

        // matrix - matrix
        impl<$($lt_a)* $($lt_b)* X: Ring> Sub<$($ref_b)* $Mr<$Vc<X>>> for $($ref_a)* $Mr<$Vc<X>> {
            type Output = $Mr<$Vc<X>>;

            #[inline]
            fn sub(self, other: $($ref_b)* $Mr<$Vc<X>>) -> Self::Output
            { $Mr(std::array::from_fn(|r| self[r] - other[r])) }
        }
    }
}

gen_each!{
    @{Mn_n}
    @{Vn_n}
    [ [(   ) (   )] [('a,) (&'a)] ]
    impl_m_unops_and_scalar_ops!(
        {$Mr:ident $r:tt}
        {$Vc:ident $c:tt}
        [ ($($lt_a:tt)*) ($($ref_a:tt)*) ]
    ) => {
        // -matrix
        impl<$($lt_a)* X: Ring> Neg for $($ref_a)* $Mr<$Vc<X>> {
            type Output = $Mr<$Vc<X>>;

            #[inline]
            fn neg(self) -> Self::Output
            { $Mr(std::array::from_fn(|r| -self[r])) }
        }

        // matrix * scalar
        impl<$($lt_a)* X: Semiring> Mul<X> for $($ref_a)* $Mr<$Vc<X>> {
            type Output = $Mr<$Vc<X>>;

            #[inline]
            fn mul(self, scalar: X) -> Self::Output
            { $Mr(std::array::from_fn(|r| self[r] * scalar)) }
        }

        // matrix / scalar
        impl<$($lt_a)* X: Field> Div<X> for $($ref_a)* $Mr<$Vc<X>> {
            type Output = $Mr<$Vc<X>>;

            #[inline]
            fn div(self, scalar: X) -> Self::Output
            { $Mr(std::array::from_fn(|r| self[r] / scalar)) }
        }
    }
}

// scalar * matrix
gen_each!{
    @{Mn_n}
    @{Vn_n}
    @{semiring}
    [ [(   ) (   )] [('a,) (&'a)] ]
    impl_m_scalar_mul!(
        {$Mr:ident $r:tt}
        {$Vc:ident $c:tt}
        {$X:ty}
        [ ($($lt_a:tt)*) ($($ref_a:tt)*) ]
    ) => {
        impl<$($lt_a)*> Mul<$($ref_a)* $Mr<$Vc<$X>>> for $X {
            type Output = $Mr<$Vc<$X>>;

            #[inline(always)]
            fn mul(self, matrix: $($ref_a)* $Mr<$Vc<$X>>) -> Self::Output
            { matrix * self }
        }
    }
}

// ---------------------------------------------------------------------------
// assign ops (general)

gen_each!{
    @{Vn}
    impl_v_assign_ops!(
        {$Vn:ident}
    ) => {
        // vector += vector;
        impl<X, B, const P: u32> AddAssign<B> for $Vn<X, P> where for<'a> &'a Self: Add<B, Output=Self> {
            #[inline(always)]
            fn add_assign(&mut self, rhs: B)
            { *self = &*self + rhs; }
        }

        // vector -= vector;
        impl<X, B, const P: u32> SubAssign<B> for $Vn<X, P> where for<'a> &'a Self: Sub<B, Output=Self> {
            #[inline(always)]
            fn sub_assign(&mut self, rhs: B)
            { *self = &*self - rhs; }
        }

        // vector *= scalar;
        // vector *= matrix;   (how fortunate that we primarily use row vectors!)
        impl<X, B, const P: u32> MulAssign<B> for $Vn<X, P> where for<'a> &'a Self: Mul<B, Output=Self> {
            #[inline(always)]
            fn mul_assign(&mut self, rhs: B)
            { *self = &*self * rhs; }
        }

        // vector /= scalar;
        impl<X, B, const P: u32> DivAssign<B> for $Vn<X, P> where for<'a> &'a Self: Div<B, Output=Self> {
            #[inline(always)]
            fn div_assign(&mut self, rhs: B)
            { *self = &*self / rhs; }
        }
    }
}

gen_each!{
    @{Mn_n}
    impl_m_assign_ops!(
        {$Mn:ident $n:tt}
    ) => {
        // matrix += matrix;
        impl<V, B> AddAssign<B> for $Mn<V> where for<'a> &'a Self: Add<B, Output=Self> {
            #[inline(always)]
            fn add_assign(&mut self, rhs: B)
            { *self = &*self + rhs; }
        }

        // matrix -= matrix;
        impl<V, B> SubAssign<B> for $Mn<V> where for<'a> &'a Self: Sub<B, Output=Self> {
            #[inline(always)]
            fn sub_assign(&mut self, rhs: B)
            { *self = &*self - rhs; }
        }

        // matrix *= scalar;
        // matrix *= matrix;
        impl<V, B> MulAssign<B> for $Mn<V> where for<'a> &'a Self: Mul<B, Output=Self> {
            #[inline(always)]
            fn mul_assign(&mut self, rhs: B)
            { *self = &*self * rhs; }
        }

        // matrix /= scalar;
        impl<V, B> DivAssign<B> for $Mn<V> where for<'a> &'a Self: Div<B, Output=Self> {
            #[inline(always)]
            fn div_assign(&mut self, rhs: B)
            { *self = &*self / rhs; }
        }
    }
}

// ---------------------------------------------------------------------------

// vector * matrix
gen_each!{
    [ [(   ) (   )] [('v,) (&'v)] ]
    [{2} {3} {4}]
    [{2} {3} {4}]
    impl_mat_vec_mul!( [ ($($lt_v:tt)*) ($($ref_v:tt)*) ] {$r:tt} {$c:tt} ) => {
        // matrix * column vector
        impl<$($lt_v)* 'm, X: Semiring, const P: u32> Mul<$($ref_v)* V![$c, X, P]> for &'m M![$r, V![$c, X]] {
            type Output = V![$r, X, P];

            #[inline]
            fn mul(self, other: $($ref_v)* V![$c, X, P]) -> Self::Output {
                let matrix = self;
                let vector = other;
                <V![$r, X, P]>::from_fn(|r| {
                    (1..$c).fold(matrix[r][0] * vector[0], |s, i| s + matrix[r][i] * vector[i])
                })
            }
        }

        // row vector * matrix
        impl<$($lt_v)* 'm, X: Semiring, const P: u32> Mul<&'m M![$r, V![$c, X]]> for $($ref_v)* V![$r, X, P] {
            type Output = V![$c, X, P];

            #[inline]
            fn mul(self, other: &'m M![$r, V![$c, X]]) -> Self::Output {
                let vector = self;
                let matrix = other;
                <V![$c, X, P]>::from_fn(|c| {
                    (1..$r).fold(vector[0] * matrix[0][c], |s, i| s + vector[i] * matrix[i][c])
                })
            }
        }
    }
}

gen_each!{
    [{2} {3} {4}]
    [{2} {3} {4}]
    [{2} {3} {4}]
    [ [(   ) (   )] [('a,) (&'a)] ]
    [ [(   ) (   )] [('b,) (&'b)] ]
    impl_mat_mat_mul!(
        {$r:tt} {$k:tt} {$c:tt}
        [ ($($lt_a:tt)*) ($($ref_a:tt)*) ]
        [ ($($lt_b:tt)*) ($($ref_b:tt)*) ]
    ) => {
        // matrix * matrix
        impl<$($lt_a)* $($lt_b)* X: Semiring> Mul<$($ref_b)* M![$k, V![$c, X]]> for $($ref_a)* M![$r, V![$k, X]] {
            type Output = M![$r, V![$c, X]];

            #[inline]
            fn mul(self, other: $($ref_b)* M![$k, V![$c, X]]) -> Self::Output {
                <M![$r, V![$c, X]]>::from_fn(|r, c| {
                    (1..$k).fold(self[r][0] * other[0][c], |s, i| s + self[r][i] * other[i][c])
                })
            }
        }
    }
}

// ---------------------------------------------------------------------------

// fmt traits apply the format to each element for convenience.
gen_each!{
    @{Vn}
    [
        // Note: the inclusion of Display in this list is a necessary evil, because
        //       there's no other way to get output like `[1.0000, 0.3333]`,
        //       which is kind of, you know, THE motivating use-case.
        {LowerExp} {UpperExp} {Display}
    ]
    impl_v_fmt!(
        {$Vn:ident}
        {$Format:ident}
    ) => {
        impl<X: fmt::$Format, const P: u32> fmt::$Format for $Vn<X, P> {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result
            { fmt_list(&self.0, f, fmt::$Format::fmt) }
        }
    }
}

gen_each!{
    @{Mn_n}
    [{LowerExp} {UpperExp} {Display}]
    impl_m_fmt!(
        {$Mn:ident $n:tt}
        {$Format:ident}
    ) => {
        impl<V: fmt::$Format> fmt::$Format for $Mn<V> {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result
            { fmt_list(&self.0, f, fmt::$Format::fmt) }
        }
    }
}

fn fmt_list<T>(
    items: &[T],
    f: &mut fmt::Formatter<'_>,
    fmt_one: fn(&T, &mut fmt::Formatter<'_>) -> fmt::Result,
) -> fmt::Result {
    write!(f, "[")?;
    for (i, x) in items.iter().enumerate() {
        if i > 0 {
            write!(f, ", ")?;
        }
        fmt_one(x, f)?;
    }
    write!(f, "]")
}

// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;
    use crate::mat;

    #[test]
    fn mat_mat() {
        let eye2 = mat::from_array([[1, 0], [0, 1i32]]);
        let eye3 = mat::from_array([[1, 0, 0], [0, 1, 0], [0, 0, 1i32]]);

        let a = mat::from_array([
            [1, 2, 3],
            [4, 5, 6],
        ]);

        let b = mat::from_array([
            [1,  1],
            [1, -1],
            [0,  1],
        ]);

        let a_dot_b = mat::from_array([
            [3, 2],
            [9, 5],
        ]);

        assert_eq!(a, &eye2 * &a);
        assert_eq!(a, &a * &eye3);
        assert_eq!(a_dot_b, &a * &b);
        assert_eq!(a_dot_b, a * b);
    }

    #[test]
    fn mat_vec() {
        let m = mat::from_array([
            [1, 2, 3],
            [4, 5, 6],
        ]);
        assert_eq!(V2::<i32>([1, 7]), &m * V3([4, -3, 1]));
        assert_eq!(V3::<i32>([-8, -7, -6]), V2([4, -3]) * &m);

        // try with the other dimension longer so that we make sure the sums
        // are over the right indices
        let m = m.t();
        assert_eq!(V2::<i32>([1, 7]), V3([4, -3, 1]) * &m);
        assert_eq!(V3::<i32>([-8, -7, -6]), &m * V2([4, -3]));
    }

    #[test]
    fn mat_vec_keeps_regularization() {
        let m = M22::<f64>::eye() * 2.0;
        let v: V2<f64, 4> = V2([1.0, 0.0]);
        let w: V2<f64, 4> = &m * v;
        assert_eq!(w, V2([2.0, 0.0]));
        assert_close!(rel=1e-15, 1e-4, V2::<f64, 4>::eps());
    }

    #[test]
    fn mat_elementwise() {
        let a = mat::from_array([[1.0, 2.0], [3.0, 4.0]]);
        let b = mat::from_array([[0.5, 0.5], [-1.0, 2.0]]);

        assert_eq!(&a + &b, mat::from_array([[1.5, 2.5], [2.0, 6.0]]));
        assert_eq!(a - b, mat::from_array([[0.5, 1.5], [4.0, 2.0]]));
        assert_eq!(-a, mat::from_array([[-1.0, -2.0], [-3.0, -4.0]]));
        assert_eq!(2.0 * a, a * 2.0);
        assert_eq!(a / 2.0, mat::from_array([[0.5, 1.0], [1.5, 2.0]]));

        let mut c = a;
        c += b;
        c -= &b;
        assert_eq!(c, a);
        c *= 3.0;
        c /= 3.0;
        assert_eq!(c, a);
        c *= &M22::<f64>::eye();
        assert_eq!(c, a);
    }

    #[test]
    fn vec_times_square_assign() {
        let mut v: V3<i32> = V3([1, 2, 3]);
        v *= &mat::from_array([[0, 1, 0], [1, 0, 0], [0, 0, 1]]);
        assert_eq!(v, V3([2, 1, 3]));
    }

    #[test]
    fn formatting() {
        let v: V3 = V3([1.0, 1.0 / 3.0, -2.5]);
        assert_eq!(format!("{:.4}", v), "[1.0000, 0.3333, -2.5000]");
        assert_eq!(format!("{:e}", V2::<f64>([1500.0, 0.25])), "[1.5e3, 2.5e-1]");

        let m = mat::from_array([[1, 2], [3, 4]]);
        assert_eq!(format!("{}", m), "[[1, 2], [3, 4]]");
        assert_eq!(format!("{:?}", m), "[[1, 2], [3, 4]]");
    }
}
