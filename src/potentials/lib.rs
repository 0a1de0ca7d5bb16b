/* ************************************************************************ **
** This file is part of mvpusc, and is licensed under EITHER the MIT        **
** license or the Apache 2.0 license, at your option.                       **
**                                                                          **
**     http://www.apache.org/licenses/LICENSE-2.0                           **
**     http://opensource.org/licenses/MIT                                   **
** ************************************************************************ */

//! Geometric potential functions for polyhedral sources (Fabbri 2008).
//!
//! Edges, triangles and tetrahedra are built from `V3` points; the
//! regularization order of the points carries over to every distance
//! computed here.

#[cfg_attr(test, macro_use)]
extern crate mvpusc_assert_close;

mod transcendental;
mod edge;
mod triangle;
mod tetrahedron;

pub use crate::transcendental::Transcendental;
pub use crate::edge::Edge;
pub use crate::triangle::Triangle;
pub use crate::tetrahedron::Tetrahedron;
