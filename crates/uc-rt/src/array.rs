use std::cell::RefCell;
use std::fmt;
use std::rc::Rc;

use crate::prim::UcInt;

/// Shared handle to a uC array. uC arrays have reference semantics: clones alias the
/// same element storage.
pub struct UcArray<E>(Rc<RefCell<Vec<E>>>);

impl<E> UcArray<E> {
    pub fn new() -> Self {
        Self::from_vec(Vec::new())
    }

    pub fn from_vec(elems: Vec<E>) -> Self {
        UcArray(Rc::new(RefCell::new(elems)))
    }

    /// Element count. Saturates at `UcInt::MAX`.
    pub fn len(&self) -> UcInt {
        UcInt::try_from(self.0.borrow().len()).unwrap_or(UcInt::MAX)
    }

    pub fn is_empty(&self) -> bool {
        self.0.borrow().is_empty()
    }

    pub fn push(&self, elem: E) {
        self.0.borrow_mut().push(elem);
    }

    pub fn get(&self, index: UcInt) -> Option<E>
    where
        E: Clone,
    {
        let index = usize::try_from(index).ok()?;
        self.0.borrow().get(index).cloned()
    }

    /// Stores `elem` at `index`, returning the previous element, or `None` when out of
    /// bounds.
    pub fn set(&self, index: UcInt, elem: E) -> Option<E> {
        let index = usize::try_from(index).ok()?;
        let mut elems = self.0.borrow_mut();
        let slot = elems.get_mut(index)?;
        Some(std::mem::replace(slot, elem))
    }

    pub fn to_vec(&self) -> Vec<E>
    where
        E: Clone,
    {
        self.0.borrow().clone()
    }

    pub(crate) fn storage_addr(&self) -> usize {
        Rc::as_ptr(&self.0) as *const () as usize
    }
}

impl<E> Clone for UcArray<E> {
    fn clone(&self) -> Self {
        UcArray(Rc::clone(&self.0))
    }
}

impl<E> Default for UcArray<E> {
    fn default() -> Self {
        Self::new()
    }
}

impl<E> From<Vec<E>> for UcArray<E> {
    fn from(elems: Vec<E>) -> Self {
        Self::from_vec(elems)
    }
}

/// Arrays compare by reference: two handles are equal when they alias.
impl<E> PartialEq for UcArray<E> {
    fn eq(&self, other: &Self) -> bool {
        Rc::ptr_eq(&self.0, &other.0)
    }
}

impl<E> Eq for UcArray<E> {}

impl<E: fmt::Debug> fmt::Debug for UcArray<E> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_list().entries(self.0.borrow().iter()).finish()
    }
}
