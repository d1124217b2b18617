//! Shared, immutable heap payloads for `Value`.
//!
//! `Heap<T>` wraps `Arc<T>` and is the only way a `Value` holds heap data.
//! The constructor is `pub(super)`, so values are built through the factory
//! methods on `Value` (`Value::string`, `Value::list`, `Value::entity`, ...).
//! Cloning a value therefore never copies its payload, and nothing can
//! mutate a payload once it is shared.

use std::fmt;
use std::ops::Deref;
use std::sync::Arc;

/// A shared heap-allocated payload.
///
/// `#[repr(transparent)]` keeps the layout identical to `Arc<T>`.
#[repr(transparent)]
pub struct Heap<T: ?Sized>(Arc<T>);

impl<T> Heap<T> {
    /// Allocate a new payload.
    ///
    /// Only visible within the value module; external code goes through
    /// `Value`'s factory methods.
    #[inline]
    pub(super) fn new(value: T) -> Self {
        Heap(Arc::new(value))
    }
}

impl<T: ?Sized> Heap<T> {
    /// Wrap an existing `Arc`, used for unsized payloads such as trait objects.
    #[inline]
    pub(super) fn from_arc(inner: Arc<T>) -> Self {
        Heap(inner)
    }

    /// Whether two handles share the same allocation.
    #[inline]
    pub fn ptr_eq(this: &Self, other: &Self) -> bool {
        Arc::ptr_eq(&this.0, &other.0)
    }
}

impl<T: ?Sized> Deref for Heap<T> {
    type Target = T;

    #[inline]
    fn deref(&self) -> &T {
        &self.0
    }
}

impl<T: ?Sized> Clone for Heap<T> {
    #[inline]
    fn clone(&self) -> Self {
        Heap(Arc::clone(&self.0))
    }
}

impl<T: ?Sized + PartialEq> PartialEq for Heap<T> {
    #[inline]
    fn eq(&self, other: &Self) -> bool {
        *self.0 == *other.0
    }
}

impl<T: ?Sized + fmt::Debug> fmt::Debug for Heap<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}

impl<T: ?Sized> AsRef<T> for Heap<T> {
    #[inline]
    fn as_ref(&self) -> &T {
        &self.0
    }
}
