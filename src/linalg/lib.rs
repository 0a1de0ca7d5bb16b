/* ************************************************************************ **
** This file is part of mvpusc, and is licensed under EITHER the MIT        **
** license or the Apache 2.0 license, at your option.                       **
**                                                                          **
**     http://www.apache.org/licenses/LICENSE-2.0                           **
**     http://opensource.org/licenses/MIT                                   **
** ************************************************************************ */

//! Fixed-size vectors (`V2`, `V3`, `V4`) and square matrices (`M22`, `M33`, `M44`).
//!
//! Vectors carry a const parameter `P`, the regularization order of
//! `rnorm`/`rnormalize` (`eps = 10^-P`, default 10).
//!
//! Free functions live in the modules `vee` (vectors) and `mat` (matrices),
//! and the most common ones are re-exported at the root.

#[macro_use]
extern crate failure;
#[cfg_attr(test, macro_use)]
extern crate mvpusc_assert_close;

#[macro_use]
mod macros;

mod traits;
pub mod reg;
mod errors;
mod types;
mod ops;
mod close;

pub mod vee;
pub mod mat;

pub use crate::traits::{Semiring, Ring, Field};
pub use crate::reg::{RegularizationEps, RegEps, DEFAULT_REG};
pub use crate::errors::{ArityError, SingularMatrixError};
pub use crate::types::*;

pub use crate::vee::{dot, cross, norm, rnorm, normalize, rnormalize};
pub use crate::mat::{det, adj, inv, try_inv, minor};

#[cfg(all(test, feature = "serde"))]
mod serde_tests {
    use super::*;

    #[test]
    fn plain_array_representation() {
        let v: V3 = V3([1.0, 2.5, -3.0]);
        assert_eq!(serde_json::to_string(&v).unwrap(), "[1.0,2.5,-3.0]");

        let m: M22<i32> = serde_json::from_str("[[1, 2], [3, 4]]").unwrap();
        assert_eq!(m, mat::from_array([[1, 2], [3, 4]]));
    }
}
