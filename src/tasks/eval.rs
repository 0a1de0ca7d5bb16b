/* ************************************************************************ **
** This file is part of mvpusc, and is licensed under EITHER the MIT        **
** license or the Apache 2.0 license, at your option.                       **
**                                                                          **
**     http://www.apache.org/licenses/LICENSE-2.0                           **
**     http://opensource.org/licenses/MIT                                   **
** ************************************************************************ */

//! Evaluation of reference cases.
//!
//! Dimensions and the regularization order are only known at runtime,
//! while the library types fix both at compile time.  Each case is
//! dispatched to a monomorphized function for its dimension, and the whole
//! run is dispatched once on the regularization order.

use crate::FailResult;
use crate::config::{Case, Settings};

use mvpusc_linalg::{V2, V3, V4, M22, M33, M44, mat};
use mvpusc_linalg::{ArityError, SingularMatrixError};
use mvpusc_potentials::{Edge, Triangle};

use failure::ResultExt;

/// Regularization orders that `evaluate` has been compiled for.
pub const SUPPORTED_REGULARIZATIONS: &[u32] = &[6, 8, 10, 12, 16, 20];

#[derive(Debug, Fail)]
#[fail(display = "unsupported dimension {} (expected 2, 3 or 4)", _0)]
pub struct DimensionError(pub usize);

#[derive(Debug, Fail)]
#[fail(display = "regularization order {} is not one of {:?}", order, supported)]
pub struct UnsupportedRegularization {
    pub order: u32,
    pub supported: &'static [u32],
}

#[derive(Debug, Fail)]
#[fail(display = "a {}-dimensional cross product takes {} operands, got {}", dim, expected, actual)]
pub struct OperandCountError {
    pub dim: usize,
    pub expected: usize,
    pub actual: usize,
}

/// JSON has no encoding for NaN or infinity.
#[derive(Debug, Fail)]
#[fail(display = "non-finite result {:?}", _0)]
pub struct NonFiniteResult(pub Value);

/// The output document.
#[derive(Serialize)]
#[derive(Debug, Clone, PartialEq)]
#[serde(rename_all = "kebab-case")]
pub struct Report {
    pub regularization: u32,
    pub results: Vec<Outcome>,
}

#[derive(Serialize)]
#[derive(Debug, Clone, PartialEq)]
#[serde(rename_all = "kebab-case")]
pub struct Outcome {
    pub index: usize,
    pub kind: &'static str,
    pub value: Value,
}

#[derive(Serialize)]
#[derive(Debug, Clone, PartialEq)]
#[serde(untagged)]
pub enum Value {
    Scalar(f64),
    Vector(Vec<f64>),
    Matrix(Vec<Vec<f64>>),
}

impl Value {
    pub fn is_finite(&self) -> bool {
        match self {
            Value::Scalar(x) => x.is_finite(),
            Value::Vector(xs) => xs.iter().all(|x| x.is_finite()),
            Value::Matrix(rows) => rows.iter().flatten().all(|x| x.is_finite()),
        }
    }
}

/// Evaluate every case, stopping at the first failure.
pub fn evaluate(settings: &Settings) -> FailResult<Report> {
    debug!("Evaluating {} cases", settings.cases.len());
    match settings.regularization {
        6 => evaluate_with::<6>(settings),
        8 => evaluate_with::<8>(settings),
        10 => evaluate_with::<10>(settings),
        12 => evaluate_with::<12>(settings),
        16 => evaluate_with::<16>(settings),
        20 => evaluate_with::<20>(settings),
        order => Err(UnsupportedRegularization { order, supported: SUPPORTED_REGULARIZATIONS }.into()),
    }
}

fn evaluate_with<const P: u32>(settings: &Settings) -> FailResult<Report> {
    let results = settings.cases.iter().enumerate().map(|(index, case)| -> FailResult<_> {
        trace!("case {}: {:?}", index, case);
        let value = evaluate_case::<P>(case)
            .with_context(|e| format!("in case {} ({}): {}", index, case.kind(), e))?;
        Ok(Outcome { index, kind: case.kind(), value })
    }).collect::<FailResult<Vec<_>>>()?;

    Ok(Report { regularization: P, results })
}

// Call a function generic over the vector type for the dimension `$n`.
macro_rules! by_vector_dim {
    ($n:expr, $P:ident, $func:ident($($arg:expr),*)) => {
        match $n {
            2 => $func::<V2<f64, $P>>($($arg),*),
            3 => $func::<V3<f64, $P>>($($arg),*),
            4 => $func::<V4<f64, $P>>($($arg),*),
            n => Err(DimensionError(n).into()),
        }
    };
}

// Same, for square matrices.
macro_rules! by_matrix_dim {
    ($n:expr, $func:ident($($arg:expr),*)) => {
        match $n {
            2 => $func::<M22>($($arg),*),
            3 => $func::<M33>($($arg),*),
            4 => $func::<M44>($($arg),*),
            n => Err(DimensionError(n).into()),
        }
    };
}

fn evaluate_case<const P: u32>(case: &Case) -> FailResult<Value> {
    let value = evaluate_case_unchecked::<P>(case)?;
    if !value.is_finite() {
        return Err(NonFiniteResult(value).into());
    }
    Ok(value)
}

fn evaluate_case_unchecked<const P: u32>(case: &Case) -> FailResult<Value> {
    match case {
        Case::Norm { v } => by_vector_dim!(v.len(), P, vector_unary(v, VectorUnary::Norm)),
        Case::Rnorm { v } => by_vector_dim!(v.len(), P, vector_unary(v, VectorUnary::Rnorm)),
        Case::Normalize { v } => by_vector_dim!(v.len(), P, vector_unary(v, VectorUnary::Normalize)),
        Case::Rnormalize { v } => by_vector_dim!(v.len(), P, vector_unary(v, VectorUnary::Rnormalize)),
        Case::Dot { u, v } => by_vector_dim!(u.len(), P, vector_dot(u, v)),
        Case::Cross { operands } => {
            let dim = match operands.first() {
                Some(first) => first.len(),
                None => bail!("a cross product needs at least one operand"),
            };
            by_vector_dim!(dim, P, vector_cross(operands))
        },
        Case::Det { m } => by_matrix_dim!(m.len(), matrix_unary(m, MatrixUnary::Det)),
        Case::Adj { m } => by_matrix_dim!(m.len(), matrix_unary(m, MatrixUnary::Adj)),
        Case::Inv { m } => by_matrix_dim!(m.len(), matrix_unary(m, MatrixUnary::Inv)),
        Case::Minor { m, row, col } => by_matrix_dim!(m.len(), matrix_minor(m, *row, *col)),
        Case::We { r1, r2, r } => {
            let edge = Edge::<f64, P>::new(V3(*r1), V3(*r2));
            Ok(Value::Scalar(edge.we(&V3(*r))))
        },
        Case::SolidAngle { r1, r2, r3, r } => {
            let triangle = Triangle::<f64, P>::new(V3(*r1), V3(*r2), V3(*r3));
            Ok(Value::Scalar(triangle.solid_angle(&V3(*r))))
        },
        Case::Wf { r1, r2, r3, r } => {
            let triangle = Triangle::<f64, P>::new(V3(*r1), V3(*r2), V3(*r3));
            Ok(Value::Scalar(triangle.wf(&V3(*r))))
        },
        Case::Dwf { r1, r2, r3, r } => {
            let triangle = Triangle::<f64, P>::new(V3(*r1), V3(*r2), V3(*r3));
            Ok(Value::Vector(triangle.dwf(&V3(*r)).to_vec()))
        },
    }
}

// ---------------------------------------------------------------------------

#[derive(Debug, Copy, Clone)]
enum VectorUnary { Norm, Rnorm, Normalize, Rnormalize }

#[derive(Debug, Copy, Clone)]
enum MatrixUnary { Det, Adj, Inv }

fn vector_unary<V: EvalVector>(v: &[f64], op: VectorUnary) -> FailResult<Value> {
    let v = V::parse(v)?;
    Ok(match op {
        VectorUnary::Norm => Value::Scalar(v.norm()),
        VectorUnary::Rnorm => Value::Scalar(v.rnorm()),
        VectorUnary::Normalize => Value::Vector(v.normalize().to_vec()),
        VectorUnary::Rnormalize => Value::Vector(v.rnormalize().to_vec()),
    })
}

fn vector_dot<V: EvalVector>(u: &[f64], v: &[f64]) -> FailResult<Value>
{ Ok(Value::Scalar(V::parse(u)?.dot(&V::parse(v)?))) }

fn vector_cross<V: EvalVector>(operands: &[Vec<f64>]) -> FailResult<Value> {
    let operands = operands.iter().map(|v| V::parse(v)).collect::<Result<Vec<_>, _>>()?;
    Ok(Value::Vector(V::cross(&operands)?.to_vec()))
}

fn matrix_unary<M: EvalMatrix>(m: &[Vec<f64>], op: MatrixUnary) -> FailResult<Value> {
    let m = M::parse(m)?;
    Ok(match op {
        MatrixUnary::Det => Value::Scalar(m.det()),
        MatrixUnary::Adj => Value::Matrix(m.adj().to_rows()),
        MatrixUnary::Inv => Value::Matrix(m.try_inv()?.to_rows()),
    })
}

fn matrix_minor<M: EvalMatrix>(m: &[Vec<f64>], row: usize, col: usize) -> FailResult<Value> {
    let m = M::parse(m)?;
    let dim = m.to_rows().len();
    if row >= dim || col >= dim {
        bail!("minor ({}, {}) out of range for a {}x{} matrix", row, col, dim, dim);
    }
    Ok(m.minor(row, col))
}

// ---------------------------------------------------------------------------

/// What the evaluator needs from a vector type, uniformly across dimensions.
trait EvalVector: Sized {
    fn parse(xs: &[f64]) -> Result<Self, ArityError>;
    fn to_vec(&self) -> Vec<f64>;

    fn dot(&self, other: &Self) -> f64;
    fn norm(&self) -> f64;
    fn rnorm(&self) -> f64;
    fn normalize(&self) -> Self;
    fn rnormalize(&self) -> Self;

    /// Fails unless there are exactly `N - 1` operands.
    fn cross(operands: &[Self]) -> FailResult<Self>;
}

/// What the evaluator needs from a square matrix type.
trait EvalMatrix: Sized {
    fn parse(rows: &[Vec<f64>]) -> FailResult<Self>;
    fn to_rows(&self) -> Vec<Vec<f64>>;

    fn det(&self) -> f64;
    fn adj(&self) -> Self;
    fn try_inv(&self) -> Result<Self, SingularMatrixError>;
    fn minor(&self, row: usize, col: usize) -> Value;
}

macro_rules! impl_eval_vector {
    ($($Vn:ident $n:tt;)*) => {$(
        impl<const P: u32> EvalVector for $Vn<f64, P> {
            fn parse(xs: &[f64]) -> Result<Self, ArityError>
            { $Vn::try_from_slice(xs) }

            fn to_vec(&self) -> Vec<f64>
            { self.0.to_vec() }

            fn dot(&self, other: &Self) -> f64 { $Vn::dot(self, other) }
            fn norm(&self) -> f64 { $Vn::norm(self) }
            fn rnorm(&self) -> f64 { $Vn::rnorm(self) }
            fn normalize(&self) -> Self { $Vn::normalize(self) }
            fn rnormalize(&self) -> Self { $Vn::rnormalize(self) }

            fn cross(operands: &[Self]) -> FailResult<Self> {
                let expected = $n - 1;
                if operands.len() != expected {
                    let actual = operands.len();
                    return Err(OperandCountError { dim: $n, expected, actual }.into());
                }
                let mut refs = [&operands[0]; $n - 1];
                for (dest, src) in refs.iter_mut().zip(operands) {
                    *dest = src;
                }
                Ok(mvpusc_linalg::cross(refs))
            }
        }
    )*};
}

impl_eval_vector! {
    V2 2;
    V3 3;
    V4 4;
}

macro_rules! impl_eval_matrix {
    ($($Mnn:ident $Vn:ident;)*) => {$(
        impl EvalMatrix for $Mnn {
            fn parse(rows: &[Vec<f64>]) -> FailResult<Self> {
                let rows = rows.iter()
                    .map(|row| $Vn::try_from_slice(row))
                    .collect::<Result<Vec<_>, _>>()?;
                let rows: &[$Vn] = &rows;
                Ok(mat::from_fn(|r, c| rows[r][c]))
            }

            fn to_rows(&self) -> Vec<Vec<f64>>
            { self.into_array().iter().map(|row| row.to_vec()).collect() }

            fn det(&self) -> f64 { $Mnn::det(self) }
            fn adj(&self) -> Self { $Mnn::adj(self) }
            fn try_inv(&self) -> Result<Self, SingularMatrixError> { $Mnn::try_inv(self) }

            fn minor(&self, row: usize, col: usize) -> Value
            { $Mnn::minor(self, row, col).into_value() }
        }
    )*};
}

impl_eval_matrix! {
    M22 V2;
    M33 V3;
    M44 V4;
}

// `minor` has a different output type per dimension.
trait IntoValue {
    fn into_value(self) -> Value;
}

impl IntoValue for f64 {
    fn into_value(self) -> Value { Value::Scalar(self) }
}

impl<M: EvalMatrix> IntoValue for M {
    fn into_value(self) -> Value { Value::Matrix(self.to_rows()) }
}

// ---------------------------------------------------------------------------
