//! `assert_close!`, for comparing floating point data in tests.
//!
//! ```text
//! assert_close!(a, b);                      // rel = DEFAULT_REL_TOL
//! assert_close!(abs=1e-12, a, b);           // passes if either tolerance is met
//! assert_close!(rel=1e-6, abs=0.0, a, b, "context {}", x);
//! ```
//!
//! Anything implementing `CheckClose` can be compared.  Floats, slices,
//! arrays and `Vec`s are covered here; the linalg crate adds its vectors
//! and matrices.  A failure reports the (nested) index of the first
//! element that differs.

#[macro_use]
extern crate failure;

use std::fmt;

/// The relative tolerance used when none is given.
pub const DEFAULT_REL_TOL: f64 = 1e-9;

#[macro_export]
macro_rules! assert_close {
    (abs=$abs:expr, rel=$rel:expr, $($rest:tt)+) => { $crate::__assert_close!([$abs, $rel] $($rest)+) };
    (rel=$rel:expr, abs=$abs:expr, $($rest:tt)+) => { $crate::__assert_close!([$abs, $rel] $($rest)+) };
    (abs=$abs:expr, $($rest:tt)+) => { $crate::__assert_close!([$abs, $crate::DEFAULT_REL_TOL] $($rest)+) };
    (rel=$rel:expr, $($rest:tt)+) => { $crate::__assert_close!([0.0, $rel] $($rest)+) };
    ($($rest:tt)+) => { $crate::__assert_close!([0.0, $crate::DEFAULT_REL_TOL] $($rest)+) };
}

#[doc(hidden)]
#[macro_export]
macro_rules! __assert_close {
    ([$abs:expr, $rel:expr] $a:expr, $b:expr $(,)?) => {
        $crate::__assert_close!([$abs, $rel] $a, $b, "values are not close")
    };
    ([$abs:expr, $rel:expr] $a:expr, $b:expr, $($fmt:tt)+) => {{
        let a = $a;
        let b = $b;
        let tol = $crate::Tolerances { abs: $abs, rel: $rel };
        if let Err(e) = $crate::CheckClose::check_close(&a, &b, tol) {
            panic!("{}\n left: {:?}\nright: {:?}\n{}", format_args!($($fmt)+), a, b, e);
        }
    }};
}

/// A comparison passes when either bound is met.
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct Tolerances {
    pub abs: f64,
    pub rel: f64,
}

impl Tolerances {
    /// Scalar test, symmetric in `a` and `b`.  Equal infinities are close;
    /// NaN is never close to anything.
    pub fn accepts(&self, a: f64, b: f64) -> bool {
        assert!(self.abs >= 0.0 && self.rel >= 0.0, "negative tolerance: {:?}", self);
        if a == b {
            return true;
        }
        if a.is_infinite() || b.is_infinite() {
            return false;
        }
        let scale = a.abs().max(b.abs());
        (a - b).abs() <= self.abs.max(self.rel * scale)
    }
}

/// The first pair of scalars that failed, and where it was found.
#[derive(Debug, Clone, PartialEq, Fail)]
pub struct CheckCloseError {
    pub left: f64,
    pub right: f64,
    pub tol: Tolerances,
    /// Outermost index first; empty for scalars.
    pub index: Vec<usize>,
}

impl CheckCloseError {
    fn at(mut self, i: usize) -> Self {
        self.index.insert(0, i);
        self
    }
}

impl fmt::Display for CheckCloseError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} vs {} (abs={}, rel={})", self.left, self.right, self.tol.abs, self.tol.rel)?;
        if !self.index.is_empty() {
            write!(f, " at index {:?}", self.index)?;
        }
        Ok(())
    }
}

pub trait CheckClose<Rhs: ?Sized = Self> {
    fn check_close(&self, other: &Rhs, tol: Tolerances) -> Result<(), CheckCloseError>;
}

macro_rules! impl_float {
    ($($T:ty)*) => {$(
        impl CheckClose for $T {
            #[inline]
            fn check_close(&self, other: &Self, tol: Tolerances) -> Result<(), CheckCloseError> {
                let (left, right) = (f64::from(*self), f64::from(*other));
                match tol.accepts(left, right) {
                    true => Ok(()),
                    false => Err(CheckCloseError { left, right, tol, index: vec![] }),
                }
            }
        }
    )*};
}

impl_float! { f32 f64 }

impl<'a, T: ?Sized + CheckClose> CheckClose for &'a T {
    #[inline]
    fn check_close(&self, other: &Self, tol: Tolerances) -> Result<(), CheckCloseError>
    { (**self).check_close(*other, tol) }
}

impl<T: CheckClose> CheckClose for [T] {
    fn check_close(&self, other: &Self, tol: Tolerances) -> Result<(), CheckCloseError> {
        assert_eq!(self.len(), other.len(), "length mismatch");
        for (i, (a, b)) in self.iter().zip(other).enumerate() {
            a.check_close(b, tol).map_err(|e| e.at(i))?;
        }
        Ok(())
    }
}

impl<T: CheckClose, const N: usize> CheckClose for [T; N] {
    #[inline]
    fn check_close(&self, other: &Self, tol: Tolerances) -> Result<(), CheckCloseError>
    { self[..].check_close(&other[..], tol) }
}

impl<T: CheckClose> CheckClose for Vec<T> {
    #[inline]
    fn check_close(&self, other: &Self, tol: Tolerances) -> Result<(), CheckCloseError>
    { self[..].check_close(&other[..], tol) }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn macro_forms() {
        assert_close!(1.0, 1.0);
        assert_close!(abs=1e-8, 1.0, 1.0 + 1e-9);
        assert_close!(rel=1e-8, abs=1e-8, 1.0, 1.0);
        assert_close!(abs=1e-8, rel=1e-8, 1.0, 1.0,);
        assert_close!(rel=1e-3, 1000.0, 1000.5, "with {}", "context");
    }

    #[test]
    fn method_chains_parse_as_one_operand() {
        #[derive(Debug)] struct S;
        impl S { fn x(self) -> S { self } }
        impl CheckClose for S {
            fn check_close(&self, _: &S, _: Tolerances) -> Result<(), CheckCloseError> { Ok(()) }
        }
        assert_close!(abs=1e-10, S.x().x(), S.x().x(), "{}", "hello",);
    }

    #[test]
    fn tolerance_edges() {
        let tol = Tolerances { abs: 0.0, rel: 1e-9 };
        assert!(tol.accepts(f64::INFINITY, f64::INFINITY));
        assert!(!tol.accepts(f64::INFINITY, f64::NEG_INFINITY));
        assert!(!tol.accepts(f64::NAN, f64::NAN));
        assert!(!tol.accepts(0.0, 1e-300));
        assert!(Tolerances { abs: 1e-300, rel: 0.0 }.accepts(0.0, 1e-300));
    }

    #[test]
    fn failure_names_the_index() {
        let tol = Tolerances { abs: 1e-6, rel: 0.0 };
        let err = [[1.0f32, 2.0], [3.0, 4.0]].check_close(&[[1.0, 2.0], [3.0, 4.5]], tol).unwrap_err();
        assert_eq!(err.index, vec![1, 1]);
        assert_eq!((err.left, err.right), (4.0, 4.5));
        assert!(err.to_string().ends_with("at index [1, 1]"), "{}", err);

        assert!(vec![100.0, 200.0].check_close(&vec![100.0, 200.0 + 1e-7], tol).is_ok());
    }

    #[test]
    #[should_panic(expected = "custom message 7")]
    fn custom_message() {
        assert_close!(abs=0.0, rel=0.0, [0.0, 1.0], [0.0, 2.0], "custom message {}", 7);
    }

    #[test]
    #[should_panic(expected = "values are not close")]
    fn default_message() {
        assert_close!(abs=0.0, rel=0.0, &[1.0][..], &[1.1][..]);
    }
}
