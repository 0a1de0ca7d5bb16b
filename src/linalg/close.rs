/* ************************************************************************ **
** This file is part of mvpusc, and is licensed under EITHER the MIT        **
** license or the Apache 2.0 license, at your option.                       **
**                                                                          **
**     http://www.apache.org/licenses/LICENSE-2.0                           **
**     http://opensource.org/licenses/MIT                                   **
** ************************************************************************ */

// `assert_close!` support, elementwise through the backing arrays.

use mvpusc_assert_close::{CheckClose, CheckCloseError, Tolerances};

use crate::types::*;

gen_each!{
    @{Vn}
    impl_check_close_v!( {$Vn:ident} ) => {
        impl<X: CheckClose, const P: u32> CheckClose for $Vn<X, P> {
            #[inline]
            fn check_close(&self, other: &Self, tol: Tolerances) -> Result<(), CheckCloseError>
            { self.0.check_close(&other.0, tol) }
        }
    }
}

gen_each!{
    @{Mn_n}
    impl_check_close_m!( {$Mn:ident $n:tt} ) => {
        impl<V: CheckClose> CheckClose for $Mn<V> {
            #[inline]
            fn check_close(&self, other: &Self, tol: Tolerances) -> Result<(), CheckCloseError>
            { self.0.check_close(&other.0, tol) }
        }
    }
}
