/* ************************************************************************ **
** This file is part of mvpusc, and is licensed under EITHER the MIT        **
** license or the Apache 2.0 license, at your option.                       **
**                                                                          **
**     http://www.apache.org/licenses/LICENSE-2.0                           **
**     http://opensource.org/licenses/MIT                                   **
** ************************************************************************ */

use mvpusc_linalg::{V3, Field};

use crate::Transcendental;

#[cfg(feature = "serde")]
use serde::{Serialize, Deserialize};

/// A line segment from `r1` to `r2`.
#[derive(Debug, Copy, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Edge<X = f64, const P: u32 = 10> {
    pub r1: V3<X, P>,
    pub r2: V3<X, P>,
}

impl<X: Field, const P: u32> Edge<X, P> {
    pub fn new(r1: V3<X, P>, r2: V3<X, P>) -> Self
    { Edge { r1, r2 } }

    /// The edge potential `w_e`, eq. (18) of Fabbri 2008.
    ///
    /// `ln((d1 + d2 + L) / (d1 + d2 - L))`, where `d1`, `d2` are the distances
    /// from `r` to the endpoints and `L` is the length of the edge.  All three
    /// are regularized norms, so the value stays finite on the line through
    /// the edge.
    pub fn we(&self, r: &V3<X, P>) -> X
    where X: Transcendental,
    {
        let d1 = (self.r1 - r).rnorm();
        let d2 = (self.r2 - r).rnorm();
        let length = (self.r2 - self.r1).rnorm();
        ((d2 + d1 + length) / (d2 + d1 - length)).ln()
    }

    /// `lambda_e`, eq. (22) of Fabbri 2009, the edge term of a linearly
    /// varying source.
    pub fn lambda(&self, r: &V3<X, P>) -> X
    where X: Transcendental,
    {
        let ue = self.unit_direction();
        let v1 = self.r1 - r;
        let v2 = self.r2 - r;
        let offset = (r - self.center()).cross(&ue);
        let half = X::one() / (X::one() + X::one());
        half * (v2.rnorm() * v2.dot(&ue) + v1.rnorm() * v1.dot(&ue) + offset.sqnorm() * self.we(r))
    }

    /// The vector companion of `lambda`, eq. (29) of Fabbri 2009.
    ///
    /// `(d1 - d2) ue + ue x ((r - re) x ue) we(r)`.
    pub fn d_lambda(&self, r: &V3<X, P>) -> V3<X, P>
    where X: Transcendental,
    {
        let ue = self.unit_direction();
        let along = ue * ((self.r1 - r).rnorm() - (self.r2 - r).rnorm());
        let across = ue.cross(&(r - self.center()).cross(&ue)) * self.we(r);
        along + across
    }

    /// Midpoint of the edge.
    pub fn center(&self) -> V3<X, P> {
        let two = X::one() + X::one();
        (self.r1 + self.r2) / two
    }

    /// Unit vector from `r1` towards `r2`.
    pub fn unit_direction(&self) -> V3<X, P>
    { (self.r2 - self.r1).normalize() }

    /// Euclidean length, without regularization.
    pub fn length(&self) -> X
    { (self.r2 - self.r1).norm() }

    /// The same segment, traversed the other way.
    pub fn reversed(&self) -> Self
    { Edge { r1: self.r2, r2: self.r1 } }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn we_known_value() {
        let s = 1.0 / 2f64.sqrt();
        let edge: Edge = Edge::new(V3([1.0, 0.0, -s]), V3([-1.0, 0.0, -s]));

        // every distance involved is exactly 2
        assert_close!(rel=1e-12, 3f64.ln(), edge.we(&V3([0.0, 1.0, s])));
    }

    #[test]
    fn we_is_symmetric() {
        let edge: Edge = Edge::new(V3([0.3, -1.0, 2.0]), V3([1.0, 0.5, -0.5]));
        for r in &[V3([0.0, 0.0, 0.0]), V3([5.0, -2.0, 1.0]), V3([0.1, 0.2, 0.3])] {
            assert_close!(rel=1e-12, edge.we(r), edge.reversed().we(r));
            assert!(edge.we(r) > 0.0);
        }
    }

    #[test]
    fn we_on_the_edge_line() {
        // beyond an endpoint: (2 + 1 + 1) / (2 + 1 - 1)
        let edge: Edge = Edge::new(V3([0.0, 0.0, 0.0]), V3([1.0, 0.0, 0.0]));
        assert_close!(rel=1e-9, 2f64.ln(), edge.we(&V3([2.0, 0.0, 0.0])));

        // on the segment itself, only the regularization keeps it finite
        let coarse: Edge<f64, 2> = Edge::new(V3([0.0, 0.0, 0.0]), V3([1.0, 0.0, 0.0]));
        let w = coarse.we(&V3([0.5, 0.0, 0.0]));
        assert!(w.is_finite() && w > 0.0, "{}", w);
    }

    #[test]
    fn we_decays_far_away() {
        let edge: Edge = Edge::new(V3([-1.0, 0.0, 0.0]), V3([1.0, 0.0, 0.0]));
        let near = edge.we(&V3([0.0, 1.0, 0.0]));
        let far = edge.we(&V3([0.0, 100.0, 0.0]));
        assert!(near > far);
        // ln((d+d+L)/(d+d-L)) ~ L/d
        assert_close!(rel=1e-4, 2.0 / 100.0, far);
    }

    #[test]
    fn lambda_known_values() {
        let s = 1.0 / 2f64.sqrt();
        let edge: Edge = Edge::new(V3([1.0, 0.0, -s]), V3([-1.0, 0.0, -s]));
        let r = V3([0.0, -1.0, s]);
        let ln3 = 3f64.ln();

        assert_close!(abs=1e-13, 1.5 * ln3, edge.lambda(&r));
        assert_close!(abs=1e-13, V3([0.0, -ln3, 2f64.sqrt() * ln3]), edge.d_lambda(&r));
    }

    #[test]
    fn lambda_on_the_bisector() {
        // the endpoint terms cancel, leaving h^2 we / 2
        let edge: Edge = Edge::new(V3([-1.0, 0.0, 0.0]), V3([1.0, 0.0, 0.0]));
        let r = V3([0.0, 2.0, 0.0]);
        assert_close!(rel=1e-12, 2.0 * edge.we(&r), edge.lambda(&r));
        assert_close!(rel=1e-12, edge.lambda(&r), edge.reversed().lambda(&r));

        // and the companion vector points straight away from the edge
        assert_close!(abs=1e-14, V3([0.0, 2.0 * edge.we(&r), 0.0]), edge.d_lambda(&r));
    }

    #[test]
    fn d_lambda_ignores_direction() {
        let edge: Edge = Edge::new(V3([0.3, -1.0, 2.0]), V3([1.0, 0.5, -0.5]));
        let r = V3([2.0, 1.0, 0.0]);
        assert_close!(rel=1e-12, abs=1e-14, edge.d_lambda(&r), edge.reversed().d_lambda(&r));
    }

    #[test]
    fn geometry() {
        let edge: Edge = Edge::new(V3([1.0, 2.0, 3.0]), V3([4.0, 6.0, 3.0]));
        assert_eq!(edge.center(), V3([2.5, 4.0, 3.0]));
        assert_eq!(edge.length(), 5.0);
        assert_close!(abs=1e-15, edge.unit_direction(), V3([0.6, 0.8, 0.0]));
        assert_eq!(edge.reversed().reversed(), edge);
    }
}
