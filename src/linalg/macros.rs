/* ************************************************************************ **
** This file is part of mvpusc, and is licensed under EITHER the MIT        **
** license or the Apache 2.0 license, at your option.                       **
**                                                                          **
**     http://www.apache.org/licenses/LICENSE-2.0                           **
**     http://opensource.org/licenses/MIT                                   **
** ************************************************************************ */

/// Higher-order macro that iterates over a cartesian product.
///
/// Every vector and matrix size gets its own copy of the arithmetic,
/// and this is how those copies are written down once.
///
/// It takes a number of groups of token trees and a suitable definition
/// for a callback macro, and it calls the macro with one token tree from
/// each group in order.
///
/// See the examples module at the bottom of this file.
macro_rules! cartesian {
    (
        $([$($groups:tt)*])*
        $mac:ident!($($mac_match:tt)*)
        => {$($mac_body:tt)*}$(;)*
    )
    => {
        macro_rules! $mac {
            ($($mac_match)*) => {$($mac_body)*};
        }
        cartesian__!{ @product::next($([$($groups)*])*) -> ($mac!()) }
    };
}

/// implementation detail, go away
macro_rules! cartesian__ {

    (@product::next([$($token:tt)+] $($rest:tt)*) -> $cb:tt)
    => { cartesian__!{ @product::unpack([$($token)+] $($rest)*) -> $cb } };
    // base case; direct product of no arguments
    (@product::next() -> ($mac:ident!($($args:tt)*)))
    => {$mac!{$($args)*}};

    // Smash everything we want to replicate into a single tt
    // so that it can be matched without repetitions.
    (@product::unpack([$($token:tt)*] $($rest:tt)*) -> $cb:tt)
    => {cartesian__!{ @product::unpack_2([$($token)*] [$($rest)*]) -> $cb }};

    // Replicate macro for each token.
    (@product::unpack_2([$($token:tt)*] $rest:tt) -> $cb:tt)
    => { $( cartesian__!{ @product::unpack_3($token $rest) -> $cb } )* };

    // Expand the unparsed arguments back to normal;
    // add the token into the macro call
    (@product::unpack_3($token:tt [$($rest:tt)*]) -> ($mac:ident!($($args:tt)*)))
    => {cartesian__!{ @product::next($($rest)*) -> ($mac!($($args)*$token)) }};
}

/// `cartesian!` with the groups that make up the library's public API.
macro_rules! gen_each {
    ($($arg:tt)*) => { gen_each__!{[$($arg)*] -> []} };
}

macro_rules! gen_each__ {
    // Groups using the standard syntax supported by cartesian
    ([[$($alternatives:tt)*] $($rest:tt)*] -> [$($done:tt)*])
    => { gen_each__!{[$($rest)*] -> [$($done)* [
        $($alternatives)*
    ]] }};

    // NOTE: These arms define the set of primitive members for each
    //       scalar trait.  Other scalar types may still implement the
    //       traits by hand.

    // Primitive types that implement Field
    ([@{field} $($rest:tt)*] -> [$($done:tt)*])
    => { gen_each__!{[$($rest)*] -> [$($done)* [
        {f32} {f64}
    ]] }};

    // Primitive types that implement Ring
    ([@{ring} $($rest:tt)*] -> [$($done:tt)*])
    => { gen_each__!{[$($rest)*] -> [$($done)* [
        {f32} {f64}
        {i8} {i16} {i32} {i64} {isize}
    ]] }};

    // Primitive types that implement Semiring
    ([@{semiring} $($rest:tt)*] -> [$($done:tt)*])
    => { gen_each__!{[$($rest)*] -> [$($done)* [
        {f32} {f64}
        {i8} {i16} {i32} {i64} {isize}
        {u8} {u16} {u32} {u64} {usize}
    ]] }};

    // Fixed sized vector types
    ([@{Vn} $($rest:tt)*] -> [$($done:tt)*])
    => { gen_each__!{[$($rest)*] -> [$($done)* [
        {V2} {V3} {V4}
    ]] }};

    // ...along with their size
    ([@{Vn_n} $($rest:tt)*] -> [$($done:tt)*])
    => { gen_each__!{[$($rest)*] -> [$($done)* [
        {V2 2} {V3 3} {V4 4}
    ]] }};

    // Matrices of generic width, and their number of rows
    ([@{Mn_n} $($rest:tt)*] -> [$($done:tt)*])
    => { gen_each__!{[$($rest)*] -> [$($done)* [
        {M2 2} {M3 3} {M4 4}
    ]] }};

    // Square matrices, their vector types, and size
    ([@{Mnn_Mn_Vn_n} $($rest:tt)*] -> [$($done:tt)*])
    => { gen_each__!{[$($rest)*] -> [$($done)* [
        {M22 M2 V2 2} {M33 M3 V3 3} {M44 M4 V4 4}
    ]] }};

    // Finally: Delegate to `cartesian`
    ([$mac:ident!$($defn_args:tt)*] -> [$($groups:tt)*])
    => {
        cartesian!{
            $($groups)*
            $mac!$($defn_args)*
        }
    };
}

/// Synthesize a `Vn` vector type from a `tt` of the size.
macro_rules! V {
    (2, $X:ty) => { V2<$X> };
    (3, $X:ty) => { V3<$X> };
    (4, $X:ty) => { V4<$X> };
    (2, $X:ty, $P:tt) => { V2<$X, $P> };
    (3, $X:ty, $P:tt) => { V3<$X, $P> };
    (4, $X:ty, $P:tt) => { V4<$X, $P> };
}

/// Synthesize an `Mn` matrix type from a `tt` of the size.
macro_rules! M {
    (2, $V:ty) => { M2<$V> };
    (3, $V:ty) => { M3<$V> };
    (4, $V:ty) => { M4<$V> };
}

#[cfg(test)]
mod examples {
    mod cartesian {
        trait Trait { }
        // NOTE: Braces around the alternatives are not strictly necessary
        //       (cartesian simply iterates over token trees), but they
        //       help group tokens and resolve would-be ambiguities in
        //       the callback's match pattern.
        cartesian!{
            [{i32} {u32}]
            [{0} {1} {2} {3}]
            unique_name!({$T:ty} {$n:expr})
            => {
                impl Trait for [$T; $n] { }
            }
        }

        #[test]
        fn example_works() {
            fn assert_trait<T: Trait>() {}
            assert_trait::<[u32; 0]>();
            assert_trait::<[i32; 2]>();
        }
    }

    mod gen_each {
        trait Trait { }
        gen_each!{
            @{field}      // equivalent to [{f32} {f64}]
            @{Vn_n}       // equivalent to [{V2 2} {V3 3} {V4 4}]
            unique_name!({$A:ty} {$Vn:ident $n:tt})
            => {
                impl Trait for ([$A; $n], $A) { }
            }
        }

        #[test]
        fn example_works() {
            fn assert_trait<T: Trait>() {}
            assert_trait::<([f64; 3], f64)>();
            assert_trait::<([f32; 4], f32)>();
        }
    }
}
