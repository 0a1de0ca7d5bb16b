/* ************************************************************************ **
** This file is part of mvpusc, and is licensed under EITHER the MIT        **
** license or the Apache 2.0 license, at your option.                       **
**                                                                          **
**     http://www.apache.org/licenses/LICENSE-2.0                           **
**     http://opensource.org/licenses/MIT                                   **
** ************************************************************************ */

#![allow(non_snake_case)]

use failure::{Error, ResultExt};

use std::io::Read;
use std::path::Path;

/// Reads a YAML document, warning on unrecognized keys instead of failing.
///
/// When using this trait, all of the expensive codegen happens in the crate which
/// provides the impl (through `derive_yaml_read!`), so crates that merely read the
/// type don't pay for it.
pub trait YamlRead: for <'de> serde::Deserialize<'de> {
    fn from_reader(mut r: impl Read) -> Result<Self, Error>
    { YamlRead::from_dyn_reader(&mut r) }

    /// Read a file, naming it in any error.
    fn from_path(path: impl AsRef<Path>) -> Result<Self, Error> {
        let path = path.as_ref();
        let file = std::fs::File::open(path)
            .with_context(|e| format!("while opening {}: {}", path.display(), e))?;
        let out = YamlRead::from_reader(std::io::BufReader::new(file))
            .with_context(|e| format!("while reading {}: {}", path.display(), e))?;
        Ok(out)
    }

    fn from_dyn_reader(r: &mut dyn Read) -> Result<Self, Error> {
        let mut s = String::new();
        r.read_to_string(&mut s)?;
        Self::from_yaml_str(&s)
    }

    fn from_yaml_str(s: &str) -> Result<Self, Error> {
        // serde_ignored needs a Deserializer, and serde_yaml only offers one for Value.
        let value = value_from_str(s)?;

        match Self::__serde_ignored__from_value(value) {
            Ok(out) => Ok(out),
            Err(ignored_err) => {
                // Going through Value loses the line and column of the error;
                // parsing the text directly gets them back.
                match Self::__serde_yaml__from_str(s) {
                    Err(e) => Err(e),
                    Ok(_) => Err(ignored_err),
                }
            },
        }
    }

    // trait-provided function definitions seem to be lazily monomorphized, so we
    // must put the meat of what we need monomorphized directly into the impls
    #[doc(hidden)]
    fn __serde_ignored__from_value(value: serde_yaml::Value) -> Result<Self, Error>;
    #[doc(hidden)]
    fn __serde_yaml__from_str(s: &str) -> Result<Self, Error>;
}

/// Implement `YamlRead` for a type.
///
/// The calling crate needs `failure` and `log` among its dependencies.
#[macro_export]
macro_rules! derive_yaml_read {
    ($Type:ty) => {
        const _: () = {
            use std::result::Result;
            use std::convert::Into;
            use $crate::reexports::serde_yaml;
            use $crate::reexports::serde_ignored;
            use failure::Error;
            use log::warn;

            impl $crate::YamlRead for $Type {
                fn __serde_ignored__from_value(value: serde_yaml::Value) -> Result<$Type, Error> {
                    serde_ignored::deserialize(
                        value,
                        |path| warn!("Unused config item (possible typo?): {}", path),
                    ).map_err(Into::into)
                }

                fn __serde_yaml__from_str(s: &str) -> Result<$Type, Error> {
                    serde_yaml::from_str(s)
                        .map_err(Into::into)
                }
            }
        };
    };
}

derive_yaml_read!{serde_yaml::Value}

// (this also exists solely for codegen reasons)
fn value_from_str(r: &str) -> Result<serde_yaml::Value, Error>
{ serde_yaml::from_str(r).map_err(Into::into) }

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Debug, PartialEq, Deserialize)]
    #[serde(rename_all = "kebab-case")]
    struct Point {
        x: f64,
        #[serde(default)]
        y: f64,
        axis_name: Option<String>,
    }
    derive_yaml_read!{Point}

    #[test]
    fn unused_keys_are_not_fatal() {
        let p = Point::from_yaml_str("x: 1.5\nz: 3\naxis-name: east\n").unwrap();
        assert_eq!(p, Point { x: 1.5, y: 0.0, axis_name: Some("east".into()) });
    }

    #[test]
    fn type_errors_are_reported() {
        let err = Point::from_yaml_str("x: [1, 2]\n").unwrap_err();
        assert!(!err.to_string().is_empty());
        assert!(Point::from_reader("y: 2.0\n".as_bytes()).is_err());
    }

    #[test]
    fn missing_file_is_named() {
        let err = Point::from_path("definitely/not/here.yaml").unwrap_err();
        assert!(err.to_string().contains("definitely/not/here.yaml"), "{}", err);
    }
}
