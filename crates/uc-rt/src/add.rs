//! uC `+`.
//!
//! Legal operand pairs, each its own impl:
//!
//! | lhs     | rhs     | result                  |
//! |---------|---------|-------------------------|
//! | numeric | numeric | `PROMOTION[lhs][rhs]`   |
//! | string  | string  | string, concatenated    |
//! | string  | numeric | string, rhs as text     |
//! | numeric | string  | string, lhs as text     |
//! | string  | boolean | string, `true`/`false`  |
//! | boolean | string  | string, `true`/`false`  |
//!
//! Same-kind numeric pairs are the diagonal of the table and are separate impls from
//! the widening ones, so they can never compete.

use crate::numeric::{promote, Numeric, WidenTo};
use crate::prim::{UcBoolean, UcFloat, UcInt, UcLong};
use crate::string::UcString;

pub trait UcAdd<Rhs> {
    type Output;

    fn uc_add(self, rhs: Rhs) -> Self::Output;
}

/// Entry point for `lhs + rhs` in generated code.
///
/// ```
/// use uc_rt::{uc_add, UcString};
///
/// assert_eq!(uc_add(2i32, 3i32), 5i32);
/// assert_eq!(uc_add(2i32, 3.5f64), 5.5);
/// assert_eq!(uc_add(UcString::from("x="), 5i32), "x=5");
/// assert_eq!(uc_add(false, UcString::from("!")), "false!");
/// ```
///
/// Pairs the uC type checker rejects do not build:
///
/// ```compile_fail,E0277
/// let _ = uc_rt::uc_add(true, false);
/// ```
///
/// ```compile_fail,E0277
/// let _ = uc_rt::uc_add(true, 1i32);
/// ```
///
/// ```compile_fail,E0277
/// let _ = uc_rt::uc_add(1.5f64, true);
/// ```
///
/// ```compile_fail,E0277
/// let _ = uc_rt::uc_add(uc_rt::UcArray::<i32>::new(), 1i32);
/// ```
///
/// ```compile_fail,E0277
/// let _ = uc_rt::uc_add(uc_rt::UcString::from("a"), uc_rt::UcArray::<i32>::new());
/// ```
///
/// ```compile_fail,E0277
/// uc_rt::uc_record! { struct Foo { x: i32 } }
/// let _ = uc_rt::uc_add(uc_rt::UcRef::new(Foo::default()), uc_rt::UcString::from("a"));
/// ```
#[inline]
pub fn uc_add<A, B>(lhs: A, rhs: B) -> A::Output
where
    A: UcAdd<B>,
{
    lhs.uc_add(rhs)
}

macro_rules! add_numeric {
    ($($lhs:ty, $rhs:ty => $out:ty;)*) => {$(
        const _: () = assert!(
            promote(<$lhs as Numeric>::KIND, <$rhs as Numeric>::KIND) as usize
                == <$out as Numeric>::KIND as usize
        );

        impl UcAdd<$rhs> for $lhs {
            type Output = $out;

            #[inline]
            fn uc_add(self, rhs: $rhs) -> $out {
                Numeric::add_same(WidenTo::<$out>::widen(self), WidenTo::<$out>::widen(rhs))
            }
        }
    )*};
}

add_numeric! {
    UcInt, UcInt => UcInt;
    UcInt, UcLong => UcLong;
    UcInt, UcFloat => UcFloat;
    UcLong, UcInt => UcLong;
    UcLong, UcLong => UcLong;
    UcLong, UcFloat => UcFloat;
    UcFloat, UcInt => UcFloat;
    UcFloat, UcLong => UcFloat;
    UcFloat, UcFloat => UcFloat;
}

impl UcAdd<UcString> for UcString {
    type Output = UcString;

    #[inline]
    fn uc_add(self, rhs: UcString) -> UcString {
        self.concat(&rhs)
    }
}

macro_rules! add_text {
    ($($ty:ty),*) => {$(
        impl UcAdd<$ty> for UcString {
            type Output = UcString;

            #[inline]
            fn uc_add(self, rhs: $ty) -> UcString {
                self.with_suffix_text(&rhs)
            }
        }

        impl UcAdd<UcString> for $ty {
            type Output = UcString;

            #[inline]
            fn uc_add(self, rhs: UcString) -> UcString {
                rhs.with_prefix_text(&self)
            }
        }
    )*};
}

add_text!(UcInt, UcLong, UcFloat, UcBoolean);
