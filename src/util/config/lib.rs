/* ************************************************************************ **
** This file is part of mvpusc, and is licensed under EITHER the MIT        **
** license or the Apache 2.0 license, at your option.                       **
**                                                                          **
**     http://www.apache.org/licenses/LICENSE-2.0                           **
**     http://opensource.org/licenses/MIT                                   **
** ************************************************************************ */

#[cfg(test)] #[macro_use] extern crate serde_derive;

pub use self::monomorphize::YamlRead;
#[macro_use]
mod monomorphize;

#[doc(hidden)] // used by macro
pub mod reexports {
    pub use serde_ignored;
    pub use serde_yaml;
}

pub type FailResult<T> = Result<T, failure::Error>;
