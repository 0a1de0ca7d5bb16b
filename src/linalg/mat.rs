/* ************************************************************************ **
** This file is part of mvpusc, and is licensed under EITHER the MIT        **
** license or the Apache 2.0 license, at your option.                       **
**                                                                          **
**     http://www.apache.org/licenses/LICENSE-2.0                           **
**     http://opensource.org/licenses/MIT                                   **
** ************************************************************************ */

//! Small fixed-size matrix types, compatible with `V2`/`V3`/`V4`
//!
//! This library primarily uses a row-based formalism; matrices are conceptually
//! understood to be containers of row-vectors. This formalism is most useful when
//! most vectors used are row vectors (in which case most matrix-vector multiplication
//! has the matrix on the right)

use crate::traits::{Semiring, Ring, Field};
use crate::errors::SingularMatrixError;
use crate::types::*;
use num_traits::{Zero, One};

// ---------------------------------------------------------------------------
// ------------------------------ PUBLIC API ---------------------------------

/// Construct a matrix from a function on indices.
///
/// The shape of the matrix will be inferred solely from how it
/// is used.  There is also a static method form of this for
/// easily supplying a type hint. (e.g. `M33::from_fn`)
#[inline(always)]
pub fn from_fn<M: FromFn<F>, B, F>(f: F) -> M
where F: FnMut(usize, usize) -> B,
{ FromFn::from_fn(f) }

/// Construct a matrix from a 2D array (of rows).
///
/// This is intended to be used in places where an array of known
/// shape already exists, and needs to be wrapped into a matrix.
/// The signature is such that type inference will work in the
/// forward direction (deciding the output Matrix shape from
/// the input array).
#[inline(always)]
pub fn from_array<A: IntoMatrix>(arr: A) -> A::Matrix
{ arr.into_matrix() }

/// Construct an identity matrix (using type inference).
///
/// This is also available as a static method on the matrix types,
/// and as `Default::default()` for square matrices.
#[inline(always)]
pub fn eye<M: One + IsMatrix>() -> M
{ One::one() }

/// Construct a zero matrix (using type inference).
///
/// This is also available as a static method on the matrix types.
#[inline(always)]
pub fn zero<M: Zero + IsMatrix>() -> M
{ Zero::zero() }

/// Matrix determinant.
#[inline(always)]
pub fn det<M: Det>(m: &M) -> DetT<M>
{ Det::det(m) }

/// Adjugate matrix, the transpose of the cofactor matrix.
#[inline(always)]
pub fn adj<M: Adj>(m: &M) -> M
{ Adj::adj(m) }

/// The matrix with row `r` and column `c` deleted.
///
/// For a 2x2 matrix this is the single remaining element.
#[inline(always)]
pub fn minor<M: Minor>(m: &M, r: usize, c: usize) -> MinorT<M>
{ Minor::minor(m, r, c) }

/// Matrix inverse, `adj(m) / det(m)`.
///
/// A singular matrix is not detected; the result will contain
/// infinities or NaNs.  See `try_inv`.
#[inline(always)]
pub fn inv<M: Inv>(m: &M) -> M
{ Inv::inv(m) }

/// Matrix inverse that fails on a matrix whose determinant is exactly zero.
#[inline(always)]
pub fn try_inv<M: Inv>(m: &M) -> Result<M, SingularMatrixError>
{ Inv::try_inv(m) }

// Square matrices
gen_each!{
    @{Mnn_Mn_Vn_n}
    impl_square_inherent_wrappers!(
        {$Mnn:ident $Mn:ident $Vn:ident $n:tt}
    ) => {
        impl<X> $Mnn<X> {
            /// Construct the identity matrix.
            ///
            /// This is also available as the free function `mat::eye`;
            /// this static method just provides an easy way to supply a type hint.
            #[inline(always)]
            pub fn eye() -> Self
            where Self: One,
            { One::one() }

            /// Matrix inverse.
            ///
            /// This is also available as the free function `mat::inv`.
            #[inline(always)]
            pub fn inv(&self) -> Self
            where Self: Inv,
            { Inv::inv(self) }

            /// Matrix inverse, guarded against singular input.
            #[inline(always)]
            pub fn try_inv(&self) -> Result<Self, SingularMatrixError>
            where Self: Inv,
            { Inv::try_inv(self) }

            /// Matrix determinant.
            #[inline(always)]
            pub fn det(&self) -> DetT<Self>
            where Self: Det,
            { Det::det(self) }

            /// Adjugate matrix.
            #[inline(always)]
            pub fn adj(&self) -> Self
            where Self: Adj,
            { Adj::adj(self) }

            /// The matrix with row `r` and column `c` deleted.
            #[inline(always)]
            pub fn minor(&self, r: usize, c: usize) -> MinorT<Self>
            where Self: Minor,
            { Minor::minor(self, r, c) }

            /// Sum of the diagonal elements.
            #[inline]
            pub fn trace(&self) -> X
            where X: Semiring,
            { (1..$n).fold(self[0][0], |acc, k| acc + self[k][k]) }

            /// The diagonal elements, as a vector.
            #[inline]
            pub fn diag(&self) -> $Vn<X>
            where X: Copy,
            { $Vn::from_fn(|k| self[k][k]) }
        }
    }
}

// General rectangular, for things that must be generic over V.
// (due to e.g. an associated type)
gen_each!{
    @{Mn_n}
    impl_general_inherent_wrappers!(
        {$Mr:ident $r:tt}
    ) => {
        impl<V> $Mr<V> {
            /// Matrix transpose. (does not conjugate)
            #[inline(always)]
            pub fn t(&self) -> TransposeT<Self>
            where Self: Transpose,
            { Transpose::t(self) }

            /// Cast into a plain `[[T; m]; n]`.
            #[inline(always)]
            pub fn into_array(self) -> ArrayT<Self>
            where Self: IntoArray,
            { IntoArray::into_array(self) }
        }
    }
}

// General rectangular.
gen_each!{
    @{Mn_n}
    @{Vn_n}
    impl_general_inherent_wrappers_with_scalar!(
        {$Mr:ident $r:tt}
        {$Vc:ident $c:tt}
    ) => {
        impl<X> $Mr<$Vc<X>> {
            /// Construct the zero matrix.
            ///
            /// This is also available as the free function `mat::zero`;
            /// this static method just provides an easy way to supply a type hint.
            #[inline(always)]
            pub fn zero() -> Self
            where Self: Zero,
            { Zero::zero() }

            /// Construct a matrix from a function on indices.
            ///
            /// This is also available as the free function `mat::from_fn`;
            /// this static method just provides an easy way to supply a type hint.
            #[inline(always)]
            pub fn from_fn<B, F>(f: F) -> Self
            where Self: FromFn<F>, F: FnMut(usize, usize) -> B,
            { FromFn::from_fn(f) }

            /// Map each scalar element of a matrix.
            #[inline(always)]
            pub fn map<B, F>(self, mut f: F) -> $Mr<$Vc<B>>
            where F: FnMut(X) -> B,
            { $Mr(self.0.map(|row| row.map(&mut f))) }

            /// Stack vectors as the rows of a matrix.
            #[inline]
            pub fn from_rows<const P: u32>(rows: [V![$c, X, P]; $r]) -> Self
            { $Mr(rows.map(|row| $Vc(row.0))) }

            /// Place vectors side by side as the columns of a matrix.
            #[inline]
            pub fn from_cols<const P: u32>(cols: [V![$r, X, P]; $c]) -> Self
            where X: Copy,
            { from_fn(|r, c| cols[c][r]) }

            /// Frobenius inner product, the sum of elementwise products.
            #[inline]
            pub fn frobenius_dot(&self, other: &Self) -> X
            where X: Semiring,
            {
                self.0.iter().zip(&other.0)
                    .fold(X::zero(), |acc, (a, b)| acc + a.dot(b))
            }

            /// Frobenius norm, `sqrt(frobenius_dot(self, self))`.
            #[inline]
            pub fn frobenius_norm(&self) -> X
            where X: Field,
            { self.frobenius_dot(self).sqrt() }
        }
    }
}

// -------------------------- END PUBLIC API ---------------------------------
// The rest is implementation and boilerplate
// ---------------------------------------------------------------------------

/// Implementation detail of some free functions that defer to external traits.
///
/// > **_Fuggedaboudit._**
///
/// Its purpose is to prevent those functions from producing non-matrix types.
pub trait IsMatrix: Sized { }

gen_each!{
    @{Mn_n}
    @{Vn_n}
    impl_is_matrix!(
        {$Mr:ident $r:tt}
        {$Vc:ident $c:tt}
    ) => {
        impl<X> IsMatrix for $Mr<$Vc<X>> { }
    }
}

// ---------------------------------------------------------------------------

gen_each!{
    @{Mn_n}
    @{Vn_n}
    impl_num_zero!(
        {$Mr:ident $r:tt}
        {$Vc:ident $c:tt}
    ) => {
        impl<X: Semiring> Zero for $Mr<$Vc<X>> {
            #[inline]
            fn zero() -> Self
            { from_array([[X::zero(); $c]; $r]) }

            #[inline]
            fn is_zero(&self) -> bool
            { self.0.iter().all(|row| row.iter().all(|x| x.is_zero())) }
        }
    }
}

// ---------------------------------------------------------------------------

/// Implementation detail of the free function `mat::from_fn`.
///
/// > **_Fuggedaboudit._**
pub trait FromFn<F>: Sized {
    fn from_fn(f: F) -> Self;
}

gen_each!{
    @{Mn_n}
    @{Vn_n}
    impl_from_fn!(
        {$Mr:ident $r:tt}
        {$Vc:ident $c:tt}
    ) => {
        impl<X, F> FromFn<F> for $Mr<$Vc<X>>
          where F: FnMut(usize, usize) -> X,
        {
            #[inline]
            fn from_fn(mut f: F) -> Self {
                $Mr(std::array::from_fn(|r| {
                    <$Vc<_>>::from_fn(|c| f(r, c))
                }))
            }
        }
    }
}

// ---------------------------------------------------------------------------

/// Implementation detail of the free function `mat::from_array`.
///
/// > **_Fuggedaboudit._**
pub trait IntoMatrix: Sized {
    type Matrix;

    fn into_matrix(self) -> Self::Matrix;
}

pub type ArrayT<M> = <M as IntoArray>::Array;

/// Implementation detail of the inherent method `{M2,M3,M4}::into_array`.
///
/// > **_Fuggedaboudit._**
pub trait IntoArray: Sized {
    type Array;

    fn into_array(self) -> Self::Array;
}

gen_each!{
    @{Mn_n}
    @{Vn_n}
    impl_into_array!(
        {$Mr:ident $r:tt}
        {$Vc:ident $c:tt}
    ) => {
        impl<X> IntoMatrix for [[X; $c]; $r] {
            type Matrix = $Mr<$Vc<X>>;

            #[inline(always)]
            fn into_matrix(self) -> Self::Matrix
            { $Mr(self.map($Vc)) }
        }

        impl<X> IntoArray for $Mr<$Vc<X>> {
            type Array = [[X; $c]; $r];

            #[inline(always)]
            fn into_array(self) -> Self::Array
            { self.0.map(|row| row.0) }
        }
    }
}

// ---------------------------------------------------------------------------

gen_each!{
    @{Mnn_Mn_Vn_n}
    impl_one!(
        {$Mnn:ident $Mn:ident $Vn:ident $n:tt}
    ) => {
        impl<X: Semiring> One for $Mnn<X> {
            #[inline(always)]
            fn one() -> Self
            { from_fn(|r, c| if r == c { X::one() } else { X::zero() }) }

            #[inline]
            fn is_one(&self) -> bool {
                self.iter().enumerate().all(|(r, row)| {
                    row.iter().enumerate().all(|(c, x)| match r == c {
                        true => x.is_one(),
                        false => x.is_zero(),
                    })
                })
            }
        }

        // A default square matrix is the identity.
        impl<X: Semiring> Default for $Mnn<X> {
            #[inline(always)]
            fn default() -> Self
            { One::one() }
        }
    }
}

// ---------------------------------------------------------------------------

#[inline(always)]
fn check_minor_index(n: usize, r: usize, c: usize) {
    assert!(r < n && c < n, "minor ({}, {}) out of range for a {}x{} matrix", r, c, n, n);
}

/// Index into the original matrix for index `i` of a minor that deleted `deleted`.
#[inline(always)]
fn skip(i: usize, deleted: usize) -> usize
{ if i < deleted { i } else { i + 1 } }

/// Output of `minor`. A scalar for 2x2, otherwise a smaller matrix.
pub type MinorT<A> = <A as Minor>::Output;

/// Implementation detail of the inherent method `{M22,M33,M44}::minor`.
///
/// > **_Fuggedaboudit._**
pub trait Minor {
    type Output;

    fn minor(&self, r: usize, c: usize) -> Self::Output;
}

impl<X: Copy> Minor for M22<X> {
    type Output = X;

    #[inline]
    fn minor(&self, r: usize, c: usize) -> X {
        check_minor_index(2, r, c);
        self[1 - r][1 - c]
    }
}

impl<X: Copy> Minor for M33<X> {
    type Output = M22<X>;

    #[inline]
    fn minor(&self, r: usize, c: usize) -> M22<X> {
        check_minor_index(3, r, c);
        from_fn(|i, j| self[skip(i, r)][skip(j, c)])
    }
}

impl<X: Copy> Minor for M44<X> {
    type Output = M33<X>;

    #[inline]
    fn minor(&self, r: usize, c: usize) -> M33<X> {
        check_minor_index(4, r, c);
        from_fn(|i, j| self[skip(i, r)][skip(j, c)])
    }
}

// ---------------------------------------------------------------------------

/// Output of `det`. Probably a scalar type.
pub type DetT<A> = <A as Det>::Output;

/// Implementation detail of the inherent method `{M22,M33,M44}::det`.
///
/// > **_Fuggedaboudit._**
pub trait Det {
    type Output;

    fn det(&self) -> Self::Output;
}

impl<T: Ring> Det for M22<T> {
    type Output = T;

    fn det(&self) -> T {
        let [[a, b], [c, d]] = self.into_array();
        a * d - b * c
    }
}

impl<T: Ring> Det for M33<T> {
    type Output = T;

    fn det(&self) -> T {
        let [
            [a0, a1, a2],
            [b0, b1, b2],
            [c0, c1, c2],
        ] = self.into_array();

        T::zero()
        + a0 * b1 * c2
        + a1 * b2 * c0
        + a2 * b0 * c1
        - a0 * b2 * c1
        - a1 * b0 * c2
        - a2 * b1 * c0
     }
}

// Laplace expansion along the first row.
impl<T: Ring> Det for M44<T> {
    type Output = T;

    fn det(&self) -> T {
        (0..4).fold(T::zero(), |acc, c| {
            let term = self[0][c] * self.minor(0, c).det();
            match c % 2 {
                0 => acc + term,
                _ => acc - term,
            }
        })
    }
}

// ---------------------------------------------------------------------------

/// Implementation detail of the inherent method `{M22,M33,M44}::adj`.
///
/// > **_Fuggedaboudit._**
pub trait Adj {
    fn adj(&self) -> Self;
}

impl<T: Ring> Adj for M22<T> {
    fn adj(&self) -> Self {
        let [[a, b], [c, d]] = self.into_array();
        from_array([[d, -b], [-c, a]])
    }
}

impl<T: Ring> Adj for M33<T> {
    fn adj(&self) -> Self {
        // the cyclic index shifts take care of the cofactor signs
        let cofactors: M33<T> = from_fn(|r, c|
            T::zero()
            + self[(r+1) % 3][(c+1) % 3] * self[(r+2) % 3][(c+2) % 3]
            - self[(r+1) % 3][(c+2) % 3] * self[(r+2) % 3][(c+1) % 3]
        );
        cofactors.t()
    }
}

impl<T: Ring> Adj for M44<T> {
    fn adj(&self) -> Self {
        from_fn(|r, c| {
            let cofactor = self.minor(c, r).det();
            match (r + c) % 2 {
                0 => cofactor,
                _ => -cofactor,
            }
        })
    }
}

// ---------------------------------------------------------------------------

/// Implementation detail of the inherent method `{M22,M33,M44}::inv`.
///
/// > **_Fuggedaboudit._**
pub trait Inv: Sized {
    fn inv(&self) -> Self;

    fn try_inv(&self) -> Result<Self, SingularMatrixError>;
}

gen_each!{
    @{Mnn_Mn_Vn_n}
    impl_inv!(
        {$Mnn:ident $Mn:ident $Vn:ident $n:tt}
    ) => {
        impl<T: Field> Inv for $Mnn<T> {
            #[inline]
            fn inv(&self) -> Self
            { self.adj() / self.det() }

            fn try_inv(&self) -> Result<Self, SingularMatrixError> {
                let det = self.det();
                if det == T::zero() {
                    return Err(SingularMatrixError { dim: $n });
                }
                Ok(self.adj() / det)
            }
        }
    }
}

// ---------------------------------------------------------------------------

/// Output of `transpose`. Probably a matrix with the dimensions flipped.
pub type TransposeT<A> = <A as Transpose>::Output;

/// Implementation detail of the inherent method `{M2,M3,M4}::t`.
///
/// > **_Fuggedaboudit._**
pub trait Transpose {
    type Output;

    fn t(&self) -> Self::Output;
}

gen_each!{
    @{Mn_n}
    @{Vn_n}
    impl_transpose!(
        {$Mr:ident $r:tt}
        {$Vc:ident $c:tt}
    ) => {
        impl<X: Copy> Transpose for $Mr<$Vc<X>> {
            type Output = M![$c, V![$r, X]];

            #[inline]
            fn t(&self) -> Self::Output
            { from_fn(|r, c| self[c][r]) }
        }
    }
}

// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;

    fn random_m44() -> M44 {
        // diagonally dominant keeps the conditioning reasonable
        let m: M44 = M4(rand::random::<[[f64; 4]; 4]>().map(V4));
        m + M44::eye() * 4.0
    }

    #[test]
    fn test_zero_eye() {
        assert_eq!(from_array([[0, 0], [0, 0]]), M22::zero());
        assert_eq!(from_array([[1, 0], [0, 1]]), M22::eye());
        assert_eq!(from_array([[0, 0, 0], [0, 0, 0], [0, 0, 0]]), M33::zero());
        assert_eq!(from_array([[1, 0, 0], [0, 1, 0], [0, 0, 1]]), M33::eye());
        assert_eq!(from_array([[0, 0, 0, 0], [0, 0, 0, 0], [0, 0, 0, 0], [0, 0, 0, 0]]), M44::zero());
        assert_eq!(from_array([[1, 0, 0, 0], [0, 1, 0, 0], [0, 0, 1, 0], [0, 0, 0, 1]]), M44::eye());
        assert!(from_array([[0, 0], [0, 0]]).is_zero());
        assert!(!from_array([[0, 1], [0, 0]]).is_zero());
        assert!(from_array([[1, 0], [0, 1]]).is_one());
        assert!(!from_array([[2, 0], [0, 1]]).is_one());
        assert!(!from_array([[1, -1], [0, 1]]).is_one());
    }

    #[test]
    fn default_is_identity() {
        assert_eq!(M22::<f64>::default(), M22::eye());
        assert_eq!(M33::<i32>::default(), from_array([[1, 0, 0], [0, 1, 0], [0, 0, 1]]));
        assert!(M44::<f64>::default().is_one());
    }

    #[test]
    fn default_acts_as_identity() {
        let x2: V2 = V2([0.25, -3.0]);
        let x3: V3 = V3([1.5, -2.0, 7.0]);
        let x4: V4 = V4([-1.0, 0.5, 9.0, 1e-8]);
        assert_eq!(&M22::<f64>::default() * x2, x2);
        assert_eq!(&M33::<f64>::default() * x3, x3);
        assert_eq!(&M44::<f64>::default() * x4, x4);
        assert_eq!(x3 * &M33::<f64>::default(), x3);

        // regularization order is carried through
        let y: V3<f64, 4> = V3([1.0, 2.0, 3.0]);
        assert_eq!(&M33::<f64>::default() * y, y);

        assert_eq!(det(&M22::<f64>::default()), 1.0);
        assert_eq!(det(&M33::<f64>::default()), 1.0);
        assert_eq!(det(&M44::<f64>::default()), 1.0);
    }

    #[test]
    fn trace_and_diagonal() {
        let m = from_array([[1, 2, 3], [4, 5, 6], [7, 8, 10]]);
        assert_eq!(m.trace(), 16);
        assert_eq!(m.diag(), V3([1, 5, 10]));
        assert_eq!(M44::<f64>::eye().trace(), 4.0);
        assert_eq!(from_array([[3, 8], [4, 6]]).diag(), V2([3, 6]));
    }

    #[test]
    fn frobenius() {
        let a = from_array([[1.0, 2.0], [3.0, 4.0]]);
        let b = from_array([[0.5, 0.0], [-1.0, 2.0]]);
        assert_eq!(a.frobenius_dot(&b), 0.5 - 3.0 + 8.0);
        assert_eq!(a.frobenius_dot(&b), (&a.t() * &b).trace());
        assert_eq!(a.frobenius_norm(), 30f64.sqrt());
        assert_eq!(M33::<f64>::eye().frobenius_norm(), 3f64.sqrt());

        // rectangular too
        let r: M2<V3<i32>> = from_array([[1, 0, 2], [0, 3, 0]]);
        assert_eq!(r.frobenius_dot(&r), 14);
    }

    #[test]
    fn rows_and_columns() {
        let u: V3<f64, 4> = V3([1.0, 2.0, 3.0]);
        let v: V3<f64, 4> = V3([4.0, 5.0, 6.0]);
        let w: V3<f64, 4> = V3([7.0, 8.0, 10.0]);

        let rows = M33::from_rows([u, v, w]);
        let cols = M33::from_cols([u, v, w]);
        assert_eq!(rows, from_array([[1.0, 2.0, 3.0], [4.0, 5.0, 6.0], [7.0, 8.0, 10.0]]));
        assert_eq!(cols, rows.t());

        let (p, q): (V3<i32>, V3<i32>) = (V3([1, 2, 3]), V3([4, 5, 6]));
        let wide = <M2<V3<i32>>>::from_rows([p, q]);
        let tall = <M3<V2<i32>>>::from_cols([p, q]);
        assert_eq!(tall, wide.t());
    }

    #[test]
    fn test_inverse_2() {
        let actual = inv(&from_array([[7., 2.], [-11., 4.]]));
        let expected = from_array([
            [ 2./25., -1./25.],
            [11./50.,  7./50.],
        ]);

        assert_close!(abs=1e-12, expected, actual);
    }

    #[test]
    fn test_inverse_3() {
        let actual = inv(&from_array([
            [1., 2., 4.],
            [5., 2., 1.],
            [3., 6., 3.],
        ]));

        let expected = from_array([
            [ 0./1.,  1./4., -1./12.],
            [-1./6., -1./8., 19./72.],
            [ 1./3.,  0./1., -1./9. ],
        ]);

        assert_close!(abs=1e-12, expected, actual);
    }

    #[test]
    fn twice_identity() {
        let m = M33::<f64>::eye() * 2.0;
        assert_eq!(det(&m), 8.0);
        assert_eq!(inv(&m), M33::eye() * 0.5);
        assert_eq!(m.try_inv(), Ok(M33::eye() * 0.5));
    }

    #[test]
    fn determinants() {
        assert_eq!(from_array([[3, 8], [4, 6]]).det(), -14);
        assert_eq!(from_array([[1, 2, 3], [4, 5, 6], [7, 8, 10]]).det(), -3);

        let a = from_array([
            [1, 0, 2, -1],
            [3, 0, 0,  5],
            [2, 1, 4, -3],
            [1, 0, 5,  0],
        ]);
        assert_eq!(det(&a), 30);
        assert_eq!(det(&a.t()), 30);
    }

    #[test]
    fn adjugates() {
        let m = from_array([[1, 2, 3], [4, 5, 6], [7, 8, 10]]);
        assert_eq!(adj(&m), from_array([[2, 4, -3], [2, -11, 6], [-3, 6, -3]]));

        let b = from_array([
            [2, -1, 0,  3],
            [1,  4, 2,  0],
            [0,  1, 5, -2],
            [3,  0, 1,  1],
        ]);
        assert_eq!(b.det(), -118);
        assert_eq!(b.adj(), from_array([
            [ 26,   4,  10, -58],
            [  5, -31,  11,   7],
            [-23,   1, -27,  15],
            [-55, -13,  -3,  41],
        ]));
        assert_eq!(&b * &b.adj(), M44::eye() * -118);

        assert_eq!(from_array([[3, 8], [4, 6]]).adj(), from_array([[6, -8], [-4, 3]]));
    }

    #[test]
    fn minors() {
        let m2 = from_array([[1, 2], [3, 4]]);
        assert_eq!(m2.minor(0, 0), 4);
        assert_eq!(m2.minor(0, 1), 3);
        assert_eq!(minor(&m2, 1, 0), 2);

        let m3 = from_array([[1, 2, 3], [4, 5, 6], [7, 8, 10]]);
        assert_eq!(m3.minor(1, 1), from_array([[1, 3], [7, 10]]));
        assert_eq!(m3.minor(0, 2), from_array([[4, 5], [7, 8]]));

        let m4: M44<i32> = from_fn(|r, c| (4 * r + c) as i32);
        assert_eq!(m4.minor(3, 0), from_array([[1, 2, 3], [5, 6, 7], [9, 10, 11]]));

        // the original is untouched
        assert_eq!(m4[3][0], 12);
    }

    #[test]
    #[should_panic(expected = "out of range")]
    fn minor_out_of_range() {
        let _ = M33::<f64>::eye().minor(3, 0);
    }

    #[test]
    fn singular() {
        let m = from_array([[1.0f64, 2.0], [2.0, 4.0]]);
        assert_eq!(m.try_inv(), Err(SingularMatrixError { dim: 2 }));
        assert_eq!(try_inv(&M44::<f64>::zero()), Err(SingularMatrixError { dim: 4 }));

        // the unguarded inverse happily divides by zero
        assert!(inv(&m).iter().flat_map(|row| row.iter()).any(|x| !x.is_finite()));
    }

    #[test]
    fn prop_inverse_4() {
        for _ in 0..10 {
            let a = random_m44();
            assert_close!(abs=1e-10, M44::eye(), &a * &inv(&a));
            assert_close!(abs=1e-10, M44::eye(), &inv(&a) * &a);
            assert_close!(abs=1e-10, a, inv(&inv(&a)));
        }
    }

    #[test]
    fn prop_inverse_3() {
        for _ in 0..10 {
            let a: M33 = M3(rand::random::<[[f64; 3]; 3]>().map(V3)) + M33::eye() * 3.0;
            assert_close!(abs=1e-10, M33::eye(), &a * &inv(&a));
            assert_close!(abs=1e-10, a, inv(&inv(&a)));
        }
    }

    #[test]
    fn into_array_and_map() {
        let m = from_array([[1, 2, 3], [4, 5, 6]]);
        assert_eq!(m.into_array(), [[1, 2, 3], [4, 5, 6]]);
        assert_eq!(m.map(|x| x * 10).t().into_array(), [[10, 40], [20, 50], [30, 60]]);
    }
}
