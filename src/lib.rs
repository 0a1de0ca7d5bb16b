/* ************************************************************************ **
** This file is part of mvpusc, and is licensed under EITHER the MIT        **
** license or the Apache 2.0 license, at your option.                       **
**                                                                          **
**     http://www.apache.org/licenses/LICENSE-2.0                           **
**     http://opensource.org/licenses/MIT                                   **
** ************************************************************************ */

//! Umbrella crate re-exporting the workspace members.

pub use mvpusc_linalg as linalg;
pub use mvpusc_potentials as potentials;
pub use mvpusc_tasks as tasks;
