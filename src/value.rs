//! Opaque value references compared by identity.

use core::ptr::NonNull;
use std::rc::Rc;
use std::sync::Arc;

/// A caller-owned value reference stored in an [`Entry`](crate::Entry).
///
/// Two references are the same value iff they point at the same object.
/// Content equality is never consulted: two equal strings in distinct
/// allocations are distinct values.
pub trait ValueRef {
    fn same(&self, other: &Self) -> bool;
}

impl<T: ?Sized> ValueRef for &T {
    #[inline]
    fn same(&self, other: &Self) -> bool {
        core::ptr::eq(*self, *other)
    }
}

impl<T: ?Sized> ValueRef for Rc<T> {
    #[inline]
    fn same(&self, other: &Self) -> bool {
        Rc::ptr_eq(self, other)
    }
}

impl<T: ?Sized> ValueRef for Arc<T> {
    #[inline]
    fn same(&self, other: &Self) -> bool {
        Arc::ptr_eq(self, other)
    }
}

impl<T: ?Sized> ValueRef for NonNull<T> {
    #[inline]
    fn same(&self, other: &Self) -> bool {
        core::ptr::eq(self.as_ptr(), other.as_ptr())
    }
}
