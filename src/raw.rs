use core::{
	alloc::Layout,
	marker::PhantomData,
	mem,
	ptr::NonNull
};
use std::alloc::{
	self,
	handle_alloc_error
};

/// Error returned by the fallible reservation methods.
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
pub enum ReserveError {
	/// The requested capacity exceeds what a single allocation can address.
	#[error("capacity overflow")]
	CapacityOverflow,

	/// The global allocator could not satisfy the request.
	#[error("memory allocation failed for {layout:?}")]
	AllocError {
		/// Layout of the failed request.
		layout: Layout
	}
}

/// A block of uninitialized memory holding exactly `capacity` slots of `T`.
///
/// This type does not in anyway inspect the memory that it manages. When dropped it *will*
/// free its memory, but it *won't* try to drop its contents. It is up to the user of `RawStorage`
/// to handle the actual things *stored* inside of a `RawStorage`.
///
/// A `RawStorage` has exactly one owner: it cannot be cloned, and ownership is handed
/// over by moving it or by [`swap`](RawStorage::swap)ping two blocks.
pub struct RawStorage<T> {
	/// First slot of the block, `None` if and only if the capacity is 0.
	buffer: Option<NonNull<T>>,

	/// Number of slots reserved.
	capacity: usize,

	/// The block logically owns values of `T` (for the drop checker).
	marker: PhantomData<T>
}

impl<T> Drop for RawStorage<T> {
	fn drop(&mut self) {
		unsafe {
			Self::release(self.buffer, self.capacity)
		}
	}
}

impl<T> Default for RawStorage<T> {
	#[inline]
	fn default() -> Self {
		Self::new()
	}
}

unsafe impl<T: Send> Send for RawStorage<T> {}
unsafe impl<T: Sync> Sync for RawStorage<T> {}

impl<T> RawStorage<T> {
	/// Creates an empty block.
	///
	/// No memory is allocated.
	#[inline]
	pub const fn new() -> Self {
		RawStorage {
			buffer: None,
			capacity: 0,
			marker: PhantomData
		}
	}

	/// Creates a block of exactly `capacity` uninitialized slots.
	///
	/// # Panics
	///
	/// Panics if the required size in bytes overflows `isize::MAX`.
	/// Aborts through [`handle_alloc_error`] if the allocator fails.
	///
	/// ```
	/// # use advanced_vec::RawStorage;
	/// let storage: RawStorage<u32> = RawStorage::with_capacity(8);
	/// assert_eq!(storage.capacity(), 8);
	/// assert!(storage.is_allocated());
	/// ```
	#[inline]
	pub fn with_capacity(capacity: usize) -> Self {
		handle_reserve(Self::try_with_capacity(capacity))
	}

	/// The same as `with_capacity`, but returns on errors instead of panicking or aborting.
	///
	/// On error nothing is allocated.
	pub fn try_with_capacity(capacity: usize) -> Result<Self, ReserveError> {
		let buffer = Self::allocate(capacity)?;
		Ok(RawStorage {
			buffer,
			capacity,
			marker: PhantomData
		})
	}

	/// Reserves raw memory for `n` slots.
	///
	/// Returns `None` when `n` is 0: zero-byte allocations are never requested.
	/// Zero-sized types get a dangling pointer instead of an allocation.
	fn allocate(n: usize) -> Result<Option<NonNull<T>>, ReserveError> {
		if n == 0 {
			return Ok(None)
		}

		let layout = Layout::array::<T>(n).map_err(|_| ReserveError::CapacityOverflow)?;
		alloc_guard(layout.size())?;

		if layout.size() == 0 {
			return Ok(Some(NonNull::dangling()))
		}

		// SAFETY: the layout has a non-zero size.
		let ptr = unsafe { alloc::alloc(layout) };
		match NonNull::new(ptr) {
			Some(ptr) => Ok(Some(ptr.cast())),
			None => Err(ReserveError::AllocError { layout })
		}
	}

	/// Frees a block previously returned by `allocate(capacity)`.
	///
	/// `None` is a no-op. Element lifetimes are never touched.
	///
	/// ## Safety
	///
	/// `buffer` must come from `allocate(capacity)` and must not be used afterwards.
	unsafe fn release(buffer: Option<NonNull<T>>, capacity: usize) {
		if let Some(ptr) = buffer {
			let size = mem::size_of::<T>() * capacity;
			if size != 0 {
				// We have an allocated chunk of memory, so we can bypass runtime
				// checks to get our current layout.
				let layout = Layout::from_size_align_unchecked(size, mem::align_of::<T>());
				alloc::dealloc(ptr.as_ptr().cast(), layout)
			}
		}
	}

	/// Number of slots in the block.
	#[inline]
	pub fn capacity(&self) -> usize {
		self.capacity
	}

	/// Returns `true` if the block has at least one slot.
	#[inline]
	pub fn is_allocated(&self) -> bool {
		self.buffer.is_some()
	}

	/// Returns a raw pointer to the first slot.
	///
	/// The pointer is dangling (but well aligned) if the capacity is 0.
	#[inline]
	pub fn as_ptr(&self) -> *const T {
		self.as_mut_ptr()
	}

	/// Returns a raw mutable pointer to the first slot.
	///
	/// The pointer is dangling (but well aligned) if the capacity is 0.
	#[inline]
	pub fn as_mut_ptr(&self) -> *mut T {
		match self.buffer {
			Some(ptr) => ptr.as_ptr(),
			None => NonNull::dangling().as_ptr()
		}
	}

	/// Returns a pointer to the slot at `offset`.
	///
	/// The address one past the last slot may be computed, but not dereferenced.
	/// The bound is only checked by a debug assertion.
	#[inline]
	pub fn slot(&self, offset: usize) -> *mut T {
		debug_assert!(offset <= self.capacity);
		self.as_mut_ptr().wrapping_add(offset)
	}

	/// Returns a reference to the value in slot `index`.
	///
	/// ## Safety
	///
	/// `index` must be smaller than the capacity and the slot must hold an initialized value.
	#[inline]
	pub unsafe fn get(&self, index: usize) -> &T {
		debug_assert!(index < self.capacity);
		&*self.as_ptr().add(index)
	}

	/// Returns a mutable reference to the value in slot `index`.
	///
	/// ## Safety
	///
	/// `index` must be smaller than the capacity and the slot must hold an initialized value.
	#[inline]
	pub unsafe fn get_mut(&mut self, index: usize) -> &mut T {
		debug_assert!(index < self.capacity);
		&mut *self.as_mut_ptr().add(index)
	}

	/// Exchanges the blocks owned by `self` and `other`.
	#[inline]
	pub fn swap(&mut self, other: &mut Self) {
		mem::swap(&mut self.buffer, &mut other.buffer);
		mem::swap(&mut self.capacity, &mut other.capacity);
	}
}

// Central function for reserve error handling.
#[inline]
pub(crate) fn handle_reserve<T>(result: Result<T, ReserveError>) -> T {
	match result {
		Err(ReserveError::CapacityOverflow) => capacity_overflow(),
		Err(ReserveError::AllocError { layout }) => handle_alloc_error(layout),
		Ok(t) => t
	}
}

// We need to guarantee the following:
// * We don't ever allocate `> isize::MAX` byte-size objects.
// * We don't overflow `usize::MAX` and actually allocate too little.
//
// `Layout::array` already rejects sizes above `isize::MAX`; this guard is kept for
// platforms where user-space can use the whole address space, e.g., PAE or x32.
#[inline]
fn alloc_guard(alloc_size: usize) -> Result<(), ReserveError> {
	if usize::BITS < 64 && alloc_size > isize::MAX as usize {
		Err(ReserveError::CapacityOverflow)
	} else {
		Ok(())
	}
}

// One central function responsible for reporting capacity overflows. This'll
// ensure that the code generation related to these panics is minimal as there's
// only one location which panics rather than a bunch throughout the module.
pub(crate) fn capacity_overflow() -> ! {
	panic!("capacity overflow");
}
