/* ************************************************************************ **
** This file is part of mvpusc, and is licensed under EITHER the MIT        **
** license or the Apache 2.0 license, at your option.                       **
**                                                                          **
**     http://www.apache.org/licenses/LICENSE-2.0                           **
**     http://opensource.org/licenses/MIT                                   **
** ************************************************************************ */

use mvpusc_linalg::Field;

/// The elementary functions the potentials need beyond `Field`.
pub trait Transcendental: Field {
    fn ln(self) -> Self;
    fn atan2(self, other: Self) -> Self;
}

macro_rules! impl_transcendental {
    ($($T:ident)*) => {$(
        impl Transcendental for $T {
            #[inline(always)] fn ln(self) -> $T { $T::ln(self) }
            #[inline(always)] fn atan2(self, other: $T) -> $T { $T::atan2(self, other) }
        }
    )*};
}

impl_transcendental!{ f32 f64 }
