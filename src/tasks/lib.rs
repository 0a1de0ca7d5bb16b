/* ************************************************************************ **
** This file is part of mvpusc, and is licensed under EITHER the MIT        **
** license or the Apache 2.0 license, at your option.                       **
**                                                                          **
**     http://www.apache.org/licenses/LICENSE-2.0                           **
**     http://opensource.org/licenses/MIT                                   **
** ************************************************************************ */

#[macro_use] extern crate failure;
#[macro_use] extern crate log;
#[macro_use] extern crate serde_derive;
#[macro_use] extern crate mvpusc_config_utils;
#[cfg(test)] #[macro_use] extern crate mvpusc_assert_close;

pub type FailResult<T> = Result<T, failure::Error>;

pub mod config;
pub mod eval;
mod ui;

pub mod entry_points;
