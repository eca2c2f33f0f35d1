use std::alloc::{self, Layout, alloc, dealloc};
use std::fmt::Debug;
use std::iter::FusedIterator;
use std::marker::PhantomData;
use std::mem;
use std::ops::{Index, IndexMut};
use std::ptr::NonNull;
use std::slice;

use crate::growth::grown_capacity;

/// A contiguous growable array with a size-class-tiered growth policy.
///
/// Unlike `Vec`, which always doubles, the reallocation factor depends on
/// `size_of::<T>()`: 10x for elements up to 8 bytes, 5x up to 32, 2x up to
/// 128, and 1.5x beyond that. The buffer is allocated lazily on the first
/// push and never shrinks; popping retains capacity.
///
/// Any reallocation moves every element to a fresh buffer, so borrows taken
/// before a push cannot be held across it (the borrow checker enforces what
/// would otherwise be iterator invalidation).
pub struct TierVec<T> {
    ptr: NonNull<T>,
    cap: usize,
    len: usize,
    marker: PhantomData<T>,
}

#[macro_export]
macro_rules! tiervec {
    ( $( $x:expr ),* $(,)? ) => {
        {
            let mut temp_vec = $crate::TierVec::new();
            $(
                temp_vec.push($x);
            )*
            temp_vec
        }
    };
}

impl<T> TierVec<T> {
    /// Constructs a new, empty `TierVec<T>`.
    ///
    /// No allocation happens until the first push.
    pub fn new() -> Self {
        assert!(
            mem::size_of::<T>() != 0,
            "This data structure does not support ZST's"
        );
        Self {
            ptr: NonNull::dangling(),
            cap: 0,
            len: 0,
            marker: PhantomData,
        }
    }

    /// Returns the number of live elements.
    #[inline]
    pub fn len(&self) -> usize {
        self.len
    }

    /// Returns true if the tiervec holds no elements.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// Returns the number of elements the current buffer can hold without
    /// reallocating.
    #[inline]
    pub fn capacity(&self) -> usize {
        self.cap
    }

    /// Reallocates to the capacity chosen by the growth table and migrates
    /// every live element. The old buffer is released only after all
    /// elements have been moved into the new one.
    #[cold]
    fn grow(&mut self) {
        let new_cap = grown_capacity(self.len, mem::size_of::<T>());
        let new_layout = Layout::array::<T>(new_cap).expect("Allocation too large");
        let handle = unsafe { alloc(new_layout) };
        let new_ptr = NonNull::new(handle as *mut T)
            .unwrap_or_else(|| alloc::handle_alloc_error(new_layout));
        if self.cap != 0 {
            unsafe {
                if mem::needs_drop::<T>() {
                    for i in 0..self.len {
                        new_ptr.add(i).write(self.ptr.add(i).read());
                    }
                } else {
                    self.ptr.copy_to_nonoverlapping(new_ptr, self.len);
                }
                // moved-from slots are raw bytes now, only the buffer is freed
                dealloc(
                    self.ptr.as_ptr() as *mut u8,
                    Layout::array::<T>(self.cap).unwrap(),
                );
            }
        }
        self.ptr = new_ptr;
        self.cap = new_cap;
    }

    /// Appends `val` to the end of the tiervec, increasing its length by 1.
    ///
    /// Aborts on allocation failure.
    #[inline]
    pub fn push(&mut self, val: T) {
        if self.len == self.cap {
            self.grow();
        }
        unsafe { self.ptr.add(self.len).write(val) };
        self.len += 1;
    }

    /// Removes the last element and returns it, or `None` if the tiervec is
    /// empty. Capacity is never shrunk by this operation.
    #[inline]
    pub fn pop(&mut self) -> Option<T> {
        if self.len == 0 {
            None
        } else {
            self.len -= 1;
            Some(unsafe { self.ptr.add(self.len).read() })
        }
    }

    /// Returns a reference to the last element, if any.
    #[inline]
    pub fn last(&self) -> Option<&T> {
        if self.len == 0 {
            None
        } else {
            Some(unsafe { self.ptr.add(self.len - 1).as_ref() })
        }
    }

    /// Returns a mutable reference to the last element, if any.
    #[inline]
    pub fn last_mut(&mut self) -> Option<&mut T> {
        if self.len == 0 {
            None
        } else {
            Some(unsafe { self.ptr.add(self.len - 1).as_mut() })
        }
    }

    /// Returns a reference to the element at `ix` without bounds checking.
    ///
    /// # Safety
    /// `ix` must be less than `self.len()`.
    #[inline]
    pub unsafe fn get_unchecked(&self, ix: usize) -> &T {
        unsafe { self.ptr.add(ix).as_ref() }
    }

    /// Returns a mutable reference to the element at `ix` without bounds
    /// checking.
    ///
    /// # Safety
    /// `ix` must be less than `self.len()`.
    #[inline]
    pub unsafe fn get_unchecked_mut(&mut self, ix: usize) -> &mut T {
        unsafe { self.ptr.add(ix).as_mut() }
    }

    /// Views the live elements as a slice.
    #[inline]
    pub fn as_slice(&self) -> &[T] {
        unsafe { slice::from_raw_parts(self.ptr.as_ptr(), self.len) }
    }

    /// Views the live elements as a mutable slice.
    #[inline]
    pub fn as_mut_slice(&mut self) -> &mut [T] {
        unsafe { slice::from_raw_parts_mut(self.ptr.as_ptr(), self.len) }
    }

    /// Drops every live element, keeping the allocated buffer for reuse.
    pub fn clear(&mut self) {
        if mem::needs_drop::<T>() {
            for i in 0..self.len {
                unsafe { self.ptr.add(i).drop_in_place() };
            }
        }
        self.len = 0;
    }

    /// Appends clones of every element in `other`.
    pub fn extend_from_slice(&mut self, other: &[T])
    where
        T: Clone,
    {
        for val in other {
            self.push(val.clone());
        }
    }

    pub fn iter(&self) -> Iter<'_, T> {
        unsafe { Iter::new(self.ptr, self.ptr.add(self.len)) }
    }

    pub fn iter_mut(&mut self) -> IterMut<'_, T> {
        unsafe { IterMut::new(self.ptr, self.ptr.add(self.len)) }
    }
}

impl<T> Drop for TierVec<T> {
    fn drop(&mut self) {
        if self.cap == 0 {
            return;
        }
        if mem::needs_drop::<T>() {
            for i in 0..self.len {
                unsafe { self.ptr.add(i).drop_in_place() };
            }
        }
        unsafe {
            dealloc(
                self.ptr.as_ptr() as *mut u8,
                Layout::array::<T>(self.cap).unwrap(),
            )
        };
    }
}

impl<T: Clone> Clone for TierVec<T> {
    /// Builds an independent copy through the normal push growth path, so
    /// the clone may end up with more slack than a right-sized allocation.
    fn clone(&self) -> Self {
        let mut out = Self::new();
        for val in self.iter() {
            out.push(val.clone());
        }
        out
    }
}

impl<T> Default for TierVec<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T> Index<usize> for TierVec<T> {
    type Output = T;

    #[inline]
    fn index(&self, ix: usize) -> &Self::Output {
        assert!(ix < self.len, "Index out of bounds.");
        unsafe { self.ptr.add(ix).as_ref() }
    }
}

impl<T> IndexMut<usize> for TierVec<T> {
    #[inline]
    fn index_mut(&mut self, ix: usize) -> &mut Self::Output {
        assert!(ix < self.len, "Index out of bounds.");
        unsafe { self.ptr.add(ix).as_mut() }
    }
}

impl<T> Extend<T> for TierVec<T> {
    fn extend<I: IntoIterator<Item = T>>(&mut self, iter: I) {
        for val in iter {
            self.push(val);
        }
    }
}

impl<T: Debug> Debug for TierVec<T> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_list().entries(self.iter()).finish()
    }
}

unsafe impl<T: Send> Send for TierVec<T> {}
unsafe impl<T: Sync> Sync for TierVec<T> {}

impl<T: PartialEq> PartialEq for TierVec<T> {
    fn eq(&self, other: &Self) -> bool {
        if self.len() != other.len() {
            return false;
        }
        self.iter().eq(other.iter())
    }
}

impl<T: PartialEq> PartialEq<Vec<T>> for TierVec<T> {
    fn eq(&self, other: &Vec<T>) -> bool {
        if self.len() != other.len() {
            return false;
        }
        self.iter().eq(other.iter())
    }
}

impl<T: PartialEq> PartialEq<TierVec<T>> for Vec<T> {
    fn eq(&self, other: &TierVec<T>) -> bool {
        other == self
    }
}

impl<'a, T> IntoIterator for &'a TierVec<T> {
    type Item = &'a T;
    type IntoIter = Iter<'a, T>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

impl<'a, T> IntoIterator for &'a mut TierVec<T> {
    type Item = &'a mut T;
    type IntoIter = IterMut<'a, T>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter_mut()
    }
}

/// Shared cursor over a `TierVec`'s buffer. `ptr` walks forward toward
/// `end`, which is one past the last element and never dereferenced.
pub struct Iter<'a, T> {
    ptr: NonNull<T>,
    end: NonNull<T>,
    marker: PhantomData<&'a T>,
}

impl<'a, T> Iter<'a, T> {
    #[inline]
    unsafe fn new(ptr: NonNull<T>, end: NonNull<T>) -> Self {
        Self {
            ptr,
            end,
            marker: PhantomData,
        }
    }

    /// Views the remaining elements as a slice, giving offset access ahead
    /// of the cursor without moving it.
    #[inline]
    pub fn as_slice(&self) -> &'a [T] {
        unsafe { slice::from_raw_parts(self.ptr.as_ptr(), self.len()) }
    }
}

impl<'a, T> Iterator for Iter<'a, T> {
    type Item = &'a T;

    #[inline]
    fn next(&mut self) -> Option<Self::Item> {
        if self.ptr == self.end {
            None
        } else {
            let item = unsafe { self.ptr.as_ref() };
            self.ptr = unsafe { self.ptr.add(1) };
            Some(item)
        }
    }

    #[inline]
    fn size_hint(&self) -> (usize, Option<usize>) {
        let n = unsafe { self.end.offset_from(self.ptr) } as usize;
        (n, Some(n))
    }
}

impl<'a, T> DoubleEndedIterator for Iter<'a, T> {
    #[inline]
    fn next_back(&mut self) -> Option<Self::Item> {
        if self.ptr == self.end {
            None
        } else {
            self.end = unsafe { self.end.sub(1) };
            Some(unsafe { self.end.as_ref() })
        }
    }
}

impl<'a, T> ExactSizeIterator for Iter<'a, T> {}
impl<'a, T> FusedIterator for Iter<'a, T> {}

/// Mutable counterpart of [`Iter`].
pub struct IterMut<'a, T> {
    ptr: NonNull<T>,
    end: NonNull<T>,
    marker: PhantomData<&'a mut T>,
}

impl<'a, T> IterMut<'a, T> {
    #[inline]
    unsafe fn new(ptr: NonNull<T>, end: NonNull<T>) -> Self {
        Self {
            ptr,
            end,
            marker: PhantomData,
        }
    }

    /// Views the remaining elements as a mutable slice without moving the
    /// cursor.
    #[inline]
    pub fn into_slice(self) -> &'a mut [T] {
        unsafe { slice::from_raw_parts_mut(self.ptr.as_ptr(), self.len()) }
    }
}

impl<'a, T> Iterator for IterMut<'a, T> {
    type Item = &'a mut T;

    #[inline]
    fn next(&mut self) -> Option<Self::Item> {
        if self.ptr == self.end {
            None
        } else {
            let item = unsafe { self.ptr.as_mut() };
            self.ptr = unsafe { self.ptr.add(1) };
            Some(item)
        }
    }

    #[inline]
    fn size_hint(&self) -> (usize, Option<usize>) {
        let n = unsafe { self.end.offset_from(self.ptr) } as usize;
        (n, Some(n))
    }
}

impl<'a, T> DoubleEndedIterator for IterMut<'a, T> {
    #[inline]
    fn next_back(&mut self) -> Option<Self::Item> {
        if self.ptr == self.end {
            None
        } else {
            self.end = unsafe { self.end.sub(1) };
            Some(unsafe { self.end.as_mut() })
        }
    }
}

impl<'a, T> ExactSizeIterator for IterMut<'a, T> {}
impl<'a, T> FusedIterator for IterMut<'a, T> {}
