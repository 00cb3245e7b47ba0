use std::cell::{Ref, RefCell, RefMut};
use std::fmt;
use std::rc::Rc;

/// Marker for compiler-generated record types.
pub trait Record: 'static {}

/// A record type whose `length` field backs the `.length` accessor.
pub trait HasLengthField: Record {
    type Length: Copy;

    fn length(&self) -> Self::Length;

    fn length_mut(&mut self) -> &mut Self::Length;
}

/// Shared, never-null reference to a heap-resident record.
///
/// Equality is structural and delegates to the record's own `PartialEq`; use
/// [`crate::uc_id`] to tell aliases apart from equal copies.
pub struct UcRef<T: Record>(Rc<RefCell<T>>);

impl<T: Record> UcRef<T> {
    pub fn new(record: T) -> Self {
        UcRef(Rc::new(RefCell::new(record)))
    }

    pub fn borrow(&self) -> Ref<'_, T> {
        self.0.borrow()
    }

    pub fn borrow_mut(&self) -> RefMut<'_, T> {
        self.0.borrow_mut()
    }

    pub fn with<R>(&self, f: impl FnOnce(&T) -> R) -> R {
        f(&self.0.borrow())
    }

    pub fn with_mut<R>(&self, f: impl FnOnce(&mut T) -> R) -> R {
        f(&mut self.0.borrow_mut())
    }

    pub fn ptr_eq(a: &Self, b: &Self) -> bool {
        Rc::ptr_eq(&a.0, &b.0)
    }

    pub(crate) fn storage_addr(&self) -> usize {
        Rc::as_ptr(&self.0) as *const () as usize
    }
}

impl<T: Record + Default> Default for UcRef<T> {
    fn default() -> Self {
        UcRef::new(T::default())
    }
}

impl<T: Record> Clone for UcRef<T> {
    fn clone(&self) -> Self {
        UcRef(Rc::clone(&self.0))
    }
}

impl<T: Record + PartialEq> PartialEq for UcRef<T> {
    fn eq(&self, other: &Self) -> bool {
        UcRef::ptr_eq(self, other) || *self.0.borrow() == *other.0.borrow()
    }
}

impl<T: Record + Eq> Eq for UcRef<T> {}

impl<T: Record + fmt::Debug> fmt::Debug for UcRef<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Debug::fmt(&*self.0.borrow(), f)
    }
}

/// Declares a uC record type the way the backend emits one.
///
/// The generated struct has public fields, a defaulting constructor (`Default`), a
/// full-field constructor `new`, and structural `==`. Marking a field `#[length]`
/// makes it the record's length field.
///
/// ```
/// use uc_rt::{uc_record, uc_length, UcInt, UcRef};
///
/// uc_record! {
///     pub struct Particle {
///         mass: f64,
///         #[length]
///         length: UcInt,
///     }
/// }
///
/// let p = UcRef::new(Particle::new(1.5, 3));
/// assert_eq!(uc_length(&p), 3);
/// ```
#[macro_export]
macro_rules! uc_record {
    (@marker length, $name:ident, $field:ident, $fty:ty) => {
        impl $crate::HasLengthField for $name {
            type Length = $fty;

            #[inline]
            fn length(&self) -> $fty {
                self.$field
            }

            #[inline]
            fn length_mut(&mut self) -> &mut $fty {
                &mut self.$field
            }
        }
    };

    (
        $(#[$meta:meta])*
        $vis:vis struct $name:ident {
            $(
                $(#[$marker:ident])?
                $field:ident : $fty:ty
            ),* $(,)?
        }
    ) => {
        $(#[$meta])*
        #[derive(Debug, Clone, Default, PartialEq)]
        $vis struct $name {
            $(pub $field: $fty,)*
        }

        impl $name {
            #[allow(clippy::too_many_arguments)]
            pub fn new($($field: $fty),*) -> Self {
                Self { $($field),* }
            }
        }

        impl $crate::Record for $name {}

        $($(
            $crate::uc_record!(@marker $marker, $name, $field, $fty);
        )?)*
    };
}
