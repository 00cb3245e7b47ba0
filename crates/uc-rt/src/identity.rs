//! uC `#ref`: a numeric handle for a reference, derived from its storage address.
//!
//! Aliases of the same storage share an identity for as long as that storage lives.
//! Separately allocated values get distinct identities even when they compare equal.

use crate::array::UcArray;
use crate::prim::UcLong;
use crate::record::{Record, UcRef};

mod sealed {
    pub trait Sealed {}

    impl<T: crate::record::Record> Sealed for crate::record::UcRef<T> {}
    impl<E> Sealed for crate::array::UcArray<E> {}
}

/// Reference types. Sealed: primitives and strings have no identity.
pub trait HasIdentity: sealed::Sealed {
    fn identity_addr(&self) -> usize;
}

impl<T: Record> HasIdentity for UcRef<T> {
    #[inline]
    fn identity_addr(&self) -> usize {
        UcRef::storage_addr(self)
    }
}

impl<E> HasIdentity for UcArray<E> {
    #[inline]
    fn identity_addr(&self) -> usize {
        UcArray::storage_addr(self)
    }
}

/// Entry point for `#r` in generated code.
///
/// ```compile_fail,E0277
/// let _ = uc_rt::uc_id(&3i32);
/// ```
///
/// ```compile_fail,E0277
/// let _ = uc_rt::uc_id(&uc_rt::UcString::from("s"));
/// ```
#[inline]
pub fn uc_id<R>(r: &R) -> UcLong
where
    R: HasIdentity + ?Sized,
{
    r.identity_addr() as UcLong
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::prim::UcInt;

    crate::uc_record! {
        struct Point {
            x: UcInt,
            y: UcInt,
        }
    }

    #[test]
    fn aliases_share_identity() {
        let a = UcRef::new(Point::new(1, 2));
        let b = a.clone();
        assert_eq!(uc_id(&a), uc_id(&b));
    }

    #[test]
    fn equal_records_have_distinct_identities() {
        let a = UcRef::new(Point::new(1, 2));
        let b = UcRef::new(Point::new(1, 2));
        assert_eq!(a, b);
        assert_ne!(uc_id(&a), uc_id(&b));
    }

    #[test]
    fn identity_survives_mutation() {
        let a = UcRef::new(Point::default());
        let before = uc_id(&a);
        a.borrow_mut().x = 5;
        assert_eq!(uc_id(&a), before);
        assert_eq!(uc_id(&a), uc_id(&a));
    }

    #[test]
    fn arrays_have_identity_too() {
        let a = UcArray::from_vec(vec![1, 2]);
        let b = a.clone();
        let c = UcArray::from_vec(vec![1, 2]);
        assert_eq!(uc_id(&a), uc_id(&b));
        assert_ne!(uc_id(&a), uc_id(&c));
        a.push(3);
        assert_eq!(uc_id(&a), uc_id(&b));
    }
}
