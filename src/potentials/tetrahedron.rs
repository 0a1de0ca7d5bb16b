/* ************************************************************************ **
** This file is part of mvpusc, and is licensed under EITHER the MIT        **
** license or the Apache 2.0 license, at your option.                       **
**                                                                          **
**     http://www.apache.org/licenses/LICENSE-2.0                           **
**     http://opensource.org/licenses/MIT                                   **
** ************************************************************************ */

use mvpusc_linalg::{V3, M33, Field, SingularMatrixError, dot, mat};

use crate::{Transcendental, Triangle};

#[cfg(feature = "serde")]
use serde::{Serialize, Deserialize};

/// A tetrahedron with corners `r1, r2, r3, r4`.
#[derive(Debug, Copy, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Tetrahedron<X = f64, const P: u32 = 10> {
    pub r1: V3<X, P>,
    pub r2: V3<X, P>,
    pub r3: V3<X, P>,
    pub r4: V3<X, P>,
}

impl<X: Field, const P: u32> Tetrahedron<X, P> {
    pub fn new(r1: V3<X, P>, r2: V3<X, P>, r3: V3<X, P>, r4: V3<X, P>) -> Self
    { Tetrahedron { r1, r2, r3, r4 } }

    /// Volume, positive when the face normals point outward.
    pub fn signed_volume(&self) -> X {
        let six = (0..6).fold(X::zero(), |acc, _| acc + X::one());
        let triple = dot(&(self.r2 - self.r1).cross(&(self.r3 - self.r1)), &(self.r4 - self.r1));
        -triple / six
    }

    /// The faces, wound `(1, 2, 3)`, `(1, 3, 4)`, `(1, 4, 2)`, `(2, 4, 3)`.
    pub fn faces(&self) -> [Triangle<X, P>; 4] {
        let Tetrahedron { r1, r2, r3, r4 } = *self;
        [
            Triangle::new(r1, r2, r3),
            Triangle::new(r1, r3, r4),
            Triangle::new(r1, r4, r2),
            Triangle::new(r2, r4, r3),
        ]
    }

    /// Jacobian of the linear interpolation of `values`, given at the
    /// corners in order.
    ///
    /// The result `J` satisfies `values[k] - values[0] == &J * (rk - r1)`.
    /// A flat tetrahedron has no such map.
    pub fn jacobian(&self, values: &[V3<X, P>; 4]) -> Result<M33<X>, SingularMatrixError> {
        let edges: M33<X> = mat::from_array([
            (self.r2 - self.r1).0,
            (self.r3 - self.r1).0,
            (self.r4 - self.r1).0,
        ]);
        let deltas: M33<X> = mat::from_array([
            (values[1] - values[0]).0,
            (values[2] - values[0]).0,
            (values[3] - values[0]).0,
        ]);
        Ok((&edges.try_inv()? * &deltas).t())
    }

    /// Magnetic scalar potential of the body uniformly magnetized along `m`,
    /// eq. (11) of Fabbri 2008.
    pub fn phi(&self, m: &V3<X, P>, r: &V3<X, P>) -> X
    where X: Transcendental,
    {
        self.faces().iter().fold(X::zero(), |acc, face| {
            acc + m.dot(&face.normal()) * face.wf(r)
        })
    }

    /// Vector potential of the body uniformly magnetized along `m`.
    pub fn vector_potential(&self, m: &V3<X, P>, r: &V3<X, P>) -> V3<X, P>
    where X: Transcendental,
    {
        self.faces().iter().fold(V3::zero(), |acc, face| {
            acc + m.cross(&face.normal()) * face.wf(r)
        })
    }

    /// Flux density of the body uniformly magnetized along `m`, eq. (12) of
    /// Fabbri 2008.
    pub fn b_field(&self, m: &V3<X, P>, r: &V3<X, P>) -> V3<X, P>
    where X: Transcendental,
    {
        self.faces().iter().fold(V3::zero(), |acc, face| {
            acc + m.cross(&face.normal()).cross(&face.dwf(r))
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn regular() -> Tetrahedron {
        let s = 1.0 / 2f64.sqrt();
        Tetrahedron::new(
            V3([1.0, 0.0, -s]),
            V3([-1.0, 0.0, -s]),
            V3([0.0, 1.0, s]),
            V3([0.0, -1.0, s]),
        )
    }

    #[test]
    fn faces_point_outward() {
        let t = regular();
        assert_close!(rel=1e-14, 4.0 * 2f64.sqrt() / 6.0, t.signed_volume());

        let center = (t.r1 + t.r2 + t.r3 + t.r4) / 4.0;
        for face in &t.faces() {
            assert!(face.normal().dot(&(face.centroid() - center)) > 0.0);
        }
    }

    #[test]
    fn uniform_magnetization_known_values() {
        let t = regular();
        let m = V3([1.0, 0.0, 0.0]);
        let r = V3([1.0, 1.0, 1.0]);

        assert_close!(abs=1e-13, 0.18833745441947548, t.phi(&m, &r));
        assert_close!(
            abs=1e-13,
            V3([0.0, -0.18026460898894244, 0.17450867997934749]),
            t.vector_potential(&m, &r),
        );
    }

    #[test]
    fn b_field_is_the_gradient_of_phi_outside() {
        let t = regular();
        let m = V3([0.2, -0.5, 1.0]);
        let h = 1e-5;
        for r in &[V3([1.0, 1.0, 1.0]), V3([-2.0, 0.5, 0.3])] {
            let numeric: V3 = V3::from_fn(|k| {
                let step: V3 = V3::axis_unit(k) * h;
                (t.phi(&m, &(r + step)) - t.phi(&m, &(r - step))) / (2.0 * h)
            });
            assert_close!(abs=1e-8, numeric, t.b_field(&m, r));
        }
    }

    #[test]
    fn jacobian_of_an_affine_field() {
        let t = regular();
        let a: M33 = mat::from_array([[1.0, 2.0, 0.0], [0.0, -1.0, 3.0], [2.0, 0.0, 1.0]]);
        let b = V3([0.5, -4.0, 2.0]);
        let values = [t.r1, t.r2, t.r3, t.r4].map(|r| &a * r + b);
        assert_close!(abs=1e-12, a, t.jacobian(&values).unwrap());

        let flat = Tetrahedron::new(t.r1, t.r2, t.r3, (t.r1 + t.r2) / 2.0);
        assert_eq!(flat.jacobian(&values), Err(SingularMatrixError { dim: 3 }));
    }
}
