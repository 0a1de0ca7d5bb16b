/* ************************************************************************ **
** This file is part of mvpusc, and is licensed under EITHER the MIT        **
** license or the Apache 2.0 license, at your option.                       **
**                                                                          **
**     http://www.apache.org/licenses/LICENSE-2.0                           **
**     http://opensource.org/licenses/MIT                                   **
** ************************************************************************ */

/// A fixed-size vector was built from a sequence of the wrong length.
#[derive(Debug, Fail, Clone, Copy, PartialEq, Eq)]
#[fail(display = "invalid argument: a {}-dimensional vector needs exactly {} elements, got {}", expected, expected, actual)]
pub struct ArityError {
    pub expected: usize,
    pub actual: usize,
}

/// `try_inv` was given a matrix whose determinant is exactly zero.
#[derive(Debug, Fail, Clone, Copy, PartialEq, Eq)]
#[fail(display = "cannot invert a singular {}x{} matrix", dim, dim)]
pub struct SingularMatrixError {
    pub dim: usize,
}
