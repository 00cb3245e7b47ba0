//! uC `.length`.
//!
//! Arrays report their element count. Records report the current value of their
//! designated length field ([`HasLengthField`]); a record type without one has no
//! `.length` and the call does not build.

use crate::array::UcArray;
use crate::prim::UcInt;
use crate::record::{HasLengthField, UcRef};

pub trait UcLength {
    type Length;

    fn uc_length(&self) -> Self::Length;
}

impl<E> UcLength for UcArray<E> {
    type Length = UcInt;

    #[inline]
    fn uc_length(&self) -> UcInt {
        self.len()
    }
}

impl<T: HasLengthField> UcLength for UcRef<T> {
    type Length = T::Length;

    #[inline]
    fn uc_length(&self) -> T::Length {
        self.borrow().length()
    }
}

/// Entry point for reading `x.length` in generated code.
///
/// ```
/// use uc_rt::{uc_length, UcArray};
///
/// assert_eq!(uc_length(&UcArray::from_vec(vec!["a", "b", "c"])), 3);
/// ```
///
/// Primitives and records without a length field have no `.length`:
///
/// ```compile_fail,E0277
/// let _ = uc_rt::uc_length(&5i32);
/// ```
///
/// ```compile_fail,E0277
/// uc_rt::uc_record! { struct Foo { x: i32 } }
/// let _ = uc_rt::uc_length(&uc_rt::UcRef::new(Foo::default()));
/// ```
#[inline]
pub fn uc_length<X>(x: &X) -> X::Length
where
    X: UcLength + ?Sized,
{
    x.uc_length()
}

/// Assignable view of a record's length field, for `r.length = v` and friends.
///
/// Reads and writes go to the record itself, so every alias of the reference
/// observes them.
pub struct LengthPlace<T: HasLengthField> {
    target: UcRef<T>,
}

impl<T: HasLengthField> LengthPlace<T> {
    pub fn get(&self) -> T::Length {
        self.target.borrow().length()
    }

    pub fn set(&self, value: T::Length) {
        *self.target.borrow_mut().length_mut() = value;
    }

    /// Replaces the field with `f(old)` and returns the new value.
    ///
    /// No borrow of the record is held while `f` runs, so `f` may read the record
    /// through any alias.
    pub fn update(&self, f: impl FnOnce(T::Length) -> T::Length) -> T::Length {
        let new = f(self.get());
        self.set(new);
        new
    }
}

/// Entry point for `.length` used as an l-value. Array length is not assignable:
///
/// ```compile_fail,E0308
/// let _ = uc_rt::uc_length_place(&uc_rt::UcArray::<i32>::new());
/// ```
pub fn uc_length_place<T: HasLengthField>(r: &UcRef<T>) -> LengthPlace<T> {
    LengthPlace { target: r.clone() }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::prim::{UcFloat, UcLong};
    use crate::UcString;

    crate::uc_record! {
        struct Buffer {
            name: UcString,
            #[length]
            length: UcInt,
        }
    }

    crate::uc_record! {
        struct Span {
            #[length]
            length: UcLong,
        }
    }

    #[test]
    fn array_length_is_element_count() {
        assert_eq!(uc_length(&UcArray::<UcInt>::new()), 0);
        assert_eq!(uc_length(&UcArray::from_vec(vec![1, 2, 3])), 3);
        assert_eq!(
            uc_length(&UcArray::from_vec(vec![UcString::from("a"); 3])),
            3
        );
        assert_eq!(uc_length(&UcArray::from_vec(vec![0.5 as UcFloat; 3])), 3);
    }

    #[test]
    fn array_length_tracks_growth() {
        let a = UcArray::from_vec(vec![1]);
        assert_eq!(uc_length(&a), 1);
        a.push(2);
        assert_eq!(uc_length(&a), 2);
    }

    #[test]
    fn record_length_reads_current_field() {
        let r = UcRef::new(Buffer::new(UcString::from("b"), 4));
        assert_eq!(uc_length(&r), 4);
        r.borrow_mut().length = 11;
        assert_eq!(uc_length(&r), 11);
        assert_eq!(r.borrow().name, "b");
    }

    #[test]
    fn record_length_keeps_field_type() {
        let r = UcRef::new(Span::new(1 << 40));
        let n: UcLong = uc_length(&r);
        assert_eq!(n, 1 << 40);
    }

    #[test]
    fn length_place_writes_are_visible_through_aliases() {
        let r = UcRef::new(Buffer::default());
        let alias = r.clone();
        let place = uc_length_place(&r);
        place.set(7);
        assert_eq!(uc_length(&alias), 7);
        assert_eq!(place.update(|n| n + 1), 8);
        assert_eq!(alias.borrow().length, 8);
        assert_eq!(place.get(), 8);
    }
}
