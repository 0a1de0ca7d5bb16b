/* ************************************************************************ **
** This file is part of mvpusc, and is licensed under EITHER the MIT        **
** license or the Apache 2.0 license, at your option.                       **
**                                                                          **
**     http://www.apache.org/licenses/LICENSE-2.0                           **
**     http://opensource.org/licenses/MIT                                   **
** ************************************************************************ */

use mvpusc_linalg::{V3, Field, dot};

use crate::{Edge, Transcendental};

#[cfg(feature = "serde")]
use serde::{Serialize, Deserialize};

/// A triangle with vertices wound `r1 -> r2 -> r3`.
#[derive(Debug, Copy, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Triangle<X = f64, const P: u32 = 10> {
    pub r1: V3<X, P>,
    pub r2: V3<X, P>,
    pub r3: V3<X, P>,
}

impl<X: Field, const P: u32> Triangle<X, P> {
    pub fn new(r1: V3<X, P>, r2: V3<X, P>, r3: V3<X, P>) -> Self
    { Triangle { r1, r2, r3 } }

    /// Solid angle subtended by the triangle at `r`, eq. (21) of Fabbri 2008.
    ///
    /// Positive when `r` lies behind the face, on the side opposite `normal()`.
    pub fn solid_angle(&self, r: &V3<X, P>) -> X
    where X: Transcendental,
    {
        let v1 = self.r1 - r;
        let v2 = self.r2 - r;
        let v3 = self.r3 - r;

        let d1 = v1.norm();
        let d2 = v2.norm();
        let d3 = v3.norm();

        let two = X::one() + X::one();
        let numer = dot(&v1, &v2.cross(&v3));
        let denom = d1 * d2 * d3 + d3 * dot(&v1, &v2) + d2 * dot(&v1, &v3) + d1 * dot(&v2, &v3);
        two * numer.atan2(denom)
    }

    /// Face potential `W_f`, eq. (17) of Fabbri 2008.
    pub fn wf(&self, r: &V3<X, P>) -> X
    where X: Transcendental,
    {
        let nf = self.normal();
        let height = dot(&(self.centroid() - r), &nf);
        self.edges().iter().fold(-height * self.solid_angle(r), |acc, edge| {
            acc + lever(&nf, edge, r) * edge.we(r)
        })
    }

    /// Gradient of `wf`, eq. (25) of Fabbri 2008.
    pub fn dwf(&self, r: &V3<X, P>) -> V3<X, P>
    where X: Transcendental,
    {
        let nf = self.normal();
        self.edges().iter().fold(nf * self.solid_angle(r), |acc, edge| {
            acc + nf.cross(&edge.unit_direction()) * edge.we(r)
        })
    }

    /// `Lambda_f`, eq. (21) of Fabbri 2009, the face term of a linearly
    /// varying source.
    pub fn lambda_f(&self, r: &V3<X, P>) -> X
    where X: Transcendental,
    {
        let nf = self.normal();
        let height = dot(&(self.centroid() - r), &nf);
        let three = X::one() + X::one() + X::one();
        let sum = self.edges().iter().fold(height * height * self.wf(r), |acc, edge| {
            acc + lever(&nf, edge, r) * edge.lambda(r)
        });
        sum / three
    }

    /// The vector companion of `lambda_f`, eq. (25) of Fabbri 2009.
    pub fn d_lambda_f(&self, r: &V3<X, P>) -> V3<X, P>
    where X: Transcendental,
    {
        let nf = self.normal();
        let height = dot(&(self.centroid() - r), &nf);
        self.edges().iter().fold(nf * -(height * self.wf(r)), |acc, edge| {
            acc + nf.cross(&edge.unit_direction()) * edge.lambda(r)
        })
    }

    /// Unit normal, following the right-hand rule on the winding.
    pub fn normal(&self) -> V3<X, P>
    { (self.r2 - self.r1).cross(&(self.r3 - self.r1)).normalize() }

    pub fn centroid(&self) -> V3<X, P> {
        let three = X::one() + X::one() + X::one();
        (self.r1 + self.r2 + self.r3) / three
    }

    /// The three edges, in winding order.
    pub fn edges(&self) -> [Edge<X, P>; 3] {
        [
            Edge::new(self.r1, self.r2),
            Edge::new(self.r2, self.r3),
            Edge::new(self.r3, self.r1),
        ]
    }
}

// `(nf x (re - r)) . ue`, the weight of each edge term.
fn lever<X: Field, const P: u32>(nf: &V3<X, P>, edge: &Edge<X, P>, r: &V3<X, P>) -> X
{ nf.cross(&(edge.center() - r)).dot(&edge.unit_direction()) }

#[cfg(test)]
mod tests {
    use super::*;
    use std::f64::consts::PI;

    fn unit_triangle() -> Triangle {
        Triangle::new(V3([1.0, 0.0, 0.0]), V3([0.0, 1.0, 0.0]), V3([0.0, 0.0, 1.0]))
    }

    #[test]
    fn octant() {
        // one eighth of the sphere
        let origin = V3([0.0, 0.0, 0.0]);
        assert_close!(rel=1e-12, PI / 2.0, unit_triangle().solid_angle(&origin));

        let t = unit_triangle();
        let flipped = Triangle::new(t.r1, t.r3, t.r2);
        assert_close!(rel=1e-12, -PI / 2.0, flipped.solid_angle(&origin));
    }

    #[test]
    fn solid_angle_limits() {
        let big: Triangle = Triangle::new(
            V3([-1e4, -1e4, 0.0]),
            V3([1e4, -1e4, 0.0]),
            V3([0.0, 1e4, 0.0]),
        );
        // right next to a huge face, the face fills half of the sky
        assert_close!(rel=1e-3, -2.0 * PI, big.solid_angle(&V3([0.0, 0.0, 1.0])));
        assert_close!(rel=1e-3, 2.0 * PI, big.solid_angle(&V3([0.0, 0.0, -1.0])));

        // far away, it shrinks to nothing
        assert_close!(abs=1e-6, 0.0, unit_triangle().solid_angle(&V3([1e4, 1e4, 1e4])));

        // in the plane of the triangle, outside of it
        assert_close!(abs=1e-12, 0.0, unit_triangle().solid_angle(&V3([2.0, 2.0, -3.0])));
    }

    // Tetrahedral face with a point across from it; the closed forms have
    // `a = atan(sqrt(2) / 5)`.
    fn skew_case() -> (Triangle, V3) {
        let s = 1.0 / 2f64.sqrt();
        let t = Triangle::new(V3([1.0, 0.0, -s]), V3([-1.0, 0.0, -s]), V3([0.0, 1.0, s]));
        (t, V3([0.0, -1.0, s]))
    }

    #[test]
    fn face_potential_known_values() {
        let (t, r) = skew_case();
        let a = (2f64.sqrt() / 5.0).atan();
        let ln3 = 3f64.ln();
        let (sqrt3, sqrt6) = (3f64.sqrt(), 6f64.sqrt());

        assert_close!(abs=1e-13, 2.0 * PI - 6.0 * (2f64 / 3.0).sqrt().asin(), t.solid_angle(&r));
        assert_close!(abs=1e-13, -4.0 * (2f64 / 3.0).sqrt() * a + sqrt3 * ln3, t.wf(&r));
        assert_close!(
            abs=1e-13,
            V3([0.0, 2.0 * (2f64 / 3.0).sqrt() * a, -2.0 * a / sqrt3]),
            t.dwf(&r),
        );

        assert_close!(abs=1e-13, (-64.0 * sqrt6 * a + 75.0 * sqrt3 * ln3) / 54.0, t.lambda_f(&r));
        assert_close!(
            abs=1e-13,
            V3([
                0.0,
                4.0 / 9.0 * (4.0 * sqrt6 * a - 3.0 * sqrt3 * ln3),
                2.0 / 9.0 * (-8.0 * sqrt3 * a + sqrt6 * 27f64.ln()),
            ]),
            t.d_lambda_f(&r),
        );
    }

    #[test]
    fn dwf_is_the_gradient_of_wf() {
        let (t, _) = skew_case();
        let h = 1e-5;
        for r in &[V3([0.3, 0.2, 2.0]), V3([1.5, -0.7, -0.4]), V3([-2.0, 3.0, 1.0])] {
            let numeric: V3 = V3::from_fn(|k| {
                let step: V3 = V3::axis_unit(k) * h;
                (t.wf(&(r + step)) - t.wf(&(r - step))) / (2.0 * h)
            });
            assert_close!(abs=1e-8, numeric, t.dwf(r));
        }
    }

    #[test]
    fn geometry() {
        let t = unit_triangle();
        let third = 1.0 / 3.0;
        assert_close!(abs=1e-15, V3([third, third, third]), t.centroid());

        let k = 1.0 / 3f64.sqrt();
        assert_close!(abs=1e-15, V3([k, k, k]), t.normal());

        let edges = t.edges();
        assert_eq!(edges[0].r1, t.r1);
        assert_eq!(edges[2].r2, t.r1);
        for e in &edges {
            assert_close!(rel=1e-15, 2f64.sqrt(), e.length());
        }
    }
}
