/* ************************************************************************ **
** This file is part of mvpusc, and is licensed under EITHER the MIT        **
** license or the Apache 2.0 license, at your option.                       **
**                                                                          **
**     http://www.apache.org/licenses/LICENSE-2.0                           **
**     http://opensource.org/licenses/MIT                                   **
** ************************************************************************ */

//! Input format of `mvpusc-linalg-ref`.
//!
//! ```yaml
//! regularization: 10      # optional; one of 6, 8, 10, 12, 16, 20
//! cases:
//!   - kind: norm
//!     v: [3, 4]
//!   - kind: cross
//!     operands: [[1, 0, 0], [0, 1, 0]]
//!   - kind: minor
//!     m: [[1, 2, 3], [4, 5, 6], [7, 8, 10]]
//!     row: 1
//!     col: 1
//! ```
//!
//! NOTE: Please make sure to use the YamlRead trait when deserializing these types!

/// A list of rows.
pub type Rows = Vec<Vec<f64>>;
pub type Point = [f64; 3];

#[derive(Serialize, Deserialize)]
#[derive(Debug, Clone, PartialEq)]
#[serde(rename_all = "kebab-case")]
pub struct Settings {
    /// Vectors use `eps = 10^-regularization` in `rnorm` and friends.
    #[serde(default = "self::defaults::settings::regularization")]
    pub regularization: u32,
    pub cases: Vec<Case>,
}
derive_yaml_read!{Settings}

#[derive(Serialize, Deserialize)]
#[derive(Debug, Clone, PartialEq)]
#[serde(tag = "kind")]
#[serde(rename_all = "kebab-case")]
pub enum Case {
    Norm { v: Vec<f64> },
    Rnorm { v: Vec<f64> },
    Normalize { v: Vec<f64> },
    Rnormalize { v: Vec<f64> },
    Dot { u: Vec<f64>, v: Vec<f64> },
    /// Generalized cross product of `N - 1` vectors of dimension `N`.
    Cross { operands: Rows },
    Det { m: Rows },
    Adj { m: Rows },
    /// Fails on a singular matrix.
    Inv { m: Rows },
    Minor { m: Rows, row: usize, col: usize },
    /// Edge potential of the segment `r1 -> r2` at `r`.
    We { r1: Point, r2: Point, r: Point },
    /// Solid angle of the triangle `r1 -> r2 -> r3` seen from `r`.
    SolidAngle { r1: Point, r2: Point, r3: Point, r: Point },
    /// Face potential of the triangle `r1 -> r2 -> r3` at `r`.
    Wf { r1: Point, r2: Point, r3: Point, r: Point },
    /// Gradient of the face potential.
    Dwf { r1: Point, r2: Point, r3: Point, r: Point },
}

impl Case {
    /// The `kind:` tag, for messages.
    pub fn kind(&self) -> &'static str {
        match self {
            Case::Norm { .. } => "norm",
            Case::Rnorm { .. } => "rnorm",
            Case::Normalize { .. } => "normalize",
            Case::Rnormalize { .. } => "rnormalize",
            Case::Dot { .. } => "dot",
            Case::Cross { .. } => "cross",
            Case::Det { .. } => "det",
            Case::Adj { .. } => "adj",
            Case::Inv { .. } => "inv",
            Case::Minor { .. } => "minor",
            Case::We { .. } => "we",
            Case::SolidAngle { .. } => "solid-angle",
            Case::Wf { .. } => "wf",
            Case::Dwf { .. } => "dwf",
        }
    }
}

mod defaults {
    pub(crate) mod settings {
        pub(crate) fn regularization() -> u32 { mvpusc_linalg::DEFAULT_REG }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use mvpusc_config_utils::YamlRead;

    #[test]
    fn parse() {
        let settings = Settings::from_yaml_str("
cases:
  - kind: norm
    v: [3, 4]
  - kind: solid-angle
    r1: [1, 0, 0]
    r2: [0, 1, 0]
    r3: [0, 0, 1]
    r: [0, 0, 0]
  - kind: minor
    m: [[1, 2], [3, 4]]
    row: 0
    col: 1
").unwrap();

        assert_eq!(settings.regularization, 10);
        assert_eq!(settings.cases.len(), 3);
        assert_eq!(settings.cases[0], Case::Norm { v: vec![3.0, 4.0] });
        assert_eq!(settings.cases[1].kind(), "solid-angle");
        assert_eq!(settings.cases[2], Case::Minor { m: vec![vec![1.0, 2.0], vec![3.0, 4.0]], row: 0, col: 1 });
    }

    #[test]
    fn unknown_kind() {
        assert!(Settings::from_yaml_str("cases: [{kind: curl, v: [1, 2, 3]}]").is_err());
    }
}
