use core::{
	cmp,
	fmt,
	iter::FusedIterator,
	mem::{
		self,
		ManuallyDrop
	},
	ops::{
		Deref,
		DerefMut
	},
	ptr,
	slice
};
use crate::raw::{
	self,
	RawStorage,
	ReserveError
};

/// Contiguous growable array type built on top of a [`RawStorage`] block.
///
/// The first `len` slots of the block hold live values, the remaining
/// `capacity - len` slots are uninitialized.
/// The array is the only code constructing or dropping values inside its block.
///
/// When an insertion finds no spare slot, the capacity is doubled (starting at 1).
/// Explicit calls to [`reserve`](DynamicArray::reserve) allocate exactly the requested
/// capacity.
///
/// Positions are element indices: `0` is the first element and `len()` is the
/// one-past-the-end position.
///
/// # Examples
///
/// ```
/// # use advanced_vec::DynamicArray;
/// let mut array = DynamicArray::new();
/// array.push_back(1);
/// array.push_back(2);
/// array.push_back(3);
/// assert_eq!(array.capacity(), 4);
///
/// array.insert(1, 99);
/// assert_eq!(array, [1, 99, 2, 3]);
///
/// array.erase(0);
/// array.pop_back();
/// assert_eq!(array, [99, 2]);
/// ```
pub struct DynamicArray<T> {
	/// Raw block holding the elements.
	storage: RawStorage<T>,

	/// Number of live elements at the front of `storage`.
	len: usize
}

impl<T> Drop for DynamicArray<T> {
	fn drop(&mut self) {
		unsafe {
			// drop every element, `storage` frees the memory afterwards.
			ptr::drop_in_place(ptr::slice_from_raw_parts_mut(self.storage.as_mut_ptr(), self.len))
		}
	}
}

/// Moves `count` live values from `src` into the uninitialized slots at `dst`.
///
/// A move is a bitwise copy that runs no user code and cannot fail, so values are
/// always moved between blocks, never cloned. The source slots are left logically
/// uninitialized.
///
/// ## Safety
///
/// `src` must point to `count` initialized values, `dst` to `count` uninitialized
/// slots, and both ranges must not overlap.
#[inline]
unsafe fn transfer<T>(src: *const T, dst: *mut T, count: usize) {
	ptr::copy_nonoverlapping(src, dst, count)
}

impl<T> DynamicArray<T> {
	/// Creates a new empty `DynamicArray`.
	///
	/// The array will not allocate until elements are pushed onto it.
	#[inline]
	pub const fn new() -> Self {
		DynamicArray {
			storage: RawStorage::new(),
			len: 0
		}
	}

	/// Creates a new empty `DynamicArray` with exactly `capacity` slots.
	#[inline]
	pub fn with_capacity(capacity: usize) -> Self {
		DynamicArray {
			storage: RawStorage::with_capacity(capacity),
			len: 0
		}
	}

	/// Creates an array of `len` default values.
	///
	/// The capacity is exactly `len`.
	///
	/// ```
	/// # use advanced_vec::DynamicArray;
	/// let array: DynamicArray<String> = DynamicArray::with_len(3);
	/// assert_eq!(array, ["", "", ""]);
	/// assert_eq!(array.capacity(), 3);
	/// ```
	pub fn with_len(len: usize) -> Self where T: Default {
		let mut array = Self::with_capacity(len);
		array.extend_with(len, ExtendDefault);
		array
	}

	/// Creates an array of `n` clones of `elem`.
	pub fn from_elem(elem: T, n: usize) -> Self where T: Clone {
		let mut array = Self::with_capacity(n);
		array.extend_with(n, ExtendElement(elem));
		array
	}

	/// Returns the number of elements in the array.
	#[inline]
	pub fn len(&self) -> usize {
		self.len
	}

	/// Returns `true` if the array contains no elements.
	#[inline]
	pub fn is_empty(&self) -> bool {
		self.len == 0
	}

	/// Returns the number of slots of the underlying storage.
	#[inline]
	pub fn capacity(&self) -> usize {
		self.storage.capacity()
	}

	/// Returns a raw pointer to the array's buffer.
	///
	/// The caller must ensure that the array outlives the pointer this
	/// function returns, or else it will end up pointing to garbage.
	/// Modifying the array may cause its buffer to be reallocated,
	/// which would also make any pointers to it invalid.
	#[inline]
	pub fn as_ptr(&self) -> *const T {
		self.storage.as_ptr()
	}

	/// Returns an unsafe mutable pointer to the array's buffer.
	#[inline]
	pub fn as_mut_ptr(&mut self) -> *mut T {
		self.storage.as_mut_ptr()
	}

	/// Extracts a slice containing the entire array.
	#[inline]
	pub fn as_slice(&self) -> &[T] {
		unsafe {
			slice::from_raw_parts(self.as_ptr(), self.len)
		}
	}

	/// Extracts a mutable slice of the entire array.
	#[inline]
	pub fn as_mut_slice(&mut self) -> &mut [T] {
		unsafe {
			slice::from_raw_parts_mut(self.as_mut_ptr(), self.len)
		}
	}

	/// Returns a reference to the element at `index`, without bounds checking.
	///
	/// ## Safety
	///
	/// `index` must be smaller than `len()`. This is only checked by a debug assertion.
	#[inline]
	pub unsafe fn get_unchecked(&self, index: usize) -> &T {
		debug_assert!(index < self.len);
		self.storage.get(index)
	}

	/// Returns a mutable reference to the element at `index`, without bounds checking.
	///
	/// ## Safety
	///
	/// `index` must be smaller than `len()`. This is only checked by a debug assertion.
	#[inline]
	pub unsafe fn get_unchecked_mut(&mut self, index: usize) -> &mut T {
		debug_assert!(index < self.len);
		self.storage.get_mut(index)
	}

	/// The same as `reserve`, but returns on errors instead of panicking or aborting.
	///
	/// On error the array is left untouched.
	pub fn try_reserve(&mut self, capacity: usize) -> Result<(), ReserveError> {
		if capacity <= self.capacity() {
			return Ok(())
		}

		trace_growth!(len = self.len, old_capacity = self.capacity(), new_capacity = capacity, "reserving storage");
		let fresh = RawStorage::try_with_capacity(capacity)?;
		unsafe {
			self.adopt(fresh);
		}

		Ok(())
	}

	/// Makes the capacity at least `capacity`.
	///
	/// Does nothing if the capacity is already sufficient.
	/// Otherwise exactly `capacity` slots are allocated (no doubling), and the elements are
	/// moved into the new block.
	///
	/// # Panics
	///
	/// Panics if the new capacity exceeds `isize::MAX` bytes.
	///
	/// ```
	/// # use advanced_vec::DynamicArray;
	/// let mut array = DynamicArray::from([1, 2]);
	/// array.reserve(10);
	/// assert_eq!(array.capacity(), 10);
	/// array.reserve(3);
	/// assert_eq!(array.capacity(), 10);
	/// ```
	pub fn reserve(&mut self, capacity: usize) {
		raw::handle_reserve(self.try_reserve(capacity))
	}

	/// Moves every live element into `fresh` and adopts it.
	///
	/// The old block is released when `fresh` goes out of scope.
	///
	/// ## Safety
	///
	/// `fresh` must hold at least `len` slots.
	unsafe fn adopt(&mut self, mut fresh: RawStorage<T>) {
		debug_assert!(fresh.capacity() >= self.len);
		transfer(self.storage.as_ptr(), fresh.as_mut_ptr(), self.len);
		self.storage.swap(&mut fresh);
	}

	/// Capacity used when an insertion finds the storage full.
	#[inline]
	fn grown_capacity(&self) -> usize {
		match self.capacity() {
			0 => 1,
			capacity => match capacity.checked_mul(2) {
				Some(capacity) => capacity,
				None => raw::capacity_overflow()
			}
		}
	}

	/// Shortens the array, keeping the first `len` elements and dropping
	/// the rest.
	///
	/// If `len` is greater than the array's current length, this has no
	/// effect. The capacity is left unchanged.
	#[inline]
	pub fn truncate(&mut self, len: usize) {
		if len >= self.len {
			return
		}

		unsafe {
			let remaining_len = self.len - len;
			let s = ptr::slice_from_raw_parts_mut(self.storage.slot(len), remaining_len);
			self.len = len;
			ptr::drop_in_place(s);
		}
	}

	/// Drops every element, keeping the capacity.
	#[inline]
	pub fn clear(&mut self) {
		self.truncate(0)
	}

	/// Resizes the array to `new_len` elements.
	///
	/// Shrinking drops the trailing elements.
	/// Growing first reserves exactly `new_len` slots, then appends default values.
	///
	/// ```
	/// # use advanced_vec::dynarray;
	/// let mut array = dynarray![99, 2];
	/// array.resize(5);
	/// assert_eq!(array, [99, 2, 0, 0, 0]);
	/// array.resize(1);
	/// assert_eq!(array, [99]);
	/// ```
	pub fn resize(&mut self, new_len: usize) where T: Default {
		self.resize_using(new_len, ExtendDefault)
	}

	/// Resizes the array to `new_len` elements, calling `f` to produce each new one.
	pub fn resize_with<F: FnMut() -> T>(&mut self, new_len: usize, f: F) {
		self.resize_using(new_len, ExtendFunc(f))
	}

	/// Resizes the array to `new_len` elements, filling new slots with clones of `value`.
	pub fn resize_value(&mut self, new_len: usize, value: T) where T: Clone {
		self.resize_using(new_len, ExtendElement(value))
	}

	fn resize_using<E: ExtendWith<T>>(&mut self, new_len: usize, value: E) {
		if new_len <= self.len {
			self.truncate(new_len)
		} else {
			self.reserve(new_len);
			self.extend_with(new_len - self.len, value)
		}
	}

	/// Appends `n` values produced by `value`.
	///
	/// The capacity must already be sufficient.
	/// If producing a value panics, the values appended so far are kept.
	fn extend_with<E: ExtendWith<T>>(&mut self, n: usize, mut value: E) {
		debug_assert!(self.capacity() - self.len >= n);

		unsafe {
			let mut ptr = self.storage.slot(self.len);
			// Use SetLenOnDrop to work around bug where compiler
			// may not realize the store through `ptr` through self.len
			// don't alias.
			let mut local_len = SetLenOnDrop::new(&mut self.len);

			// Write all elements except the last one
			for _ in 1..n {
				ptr::write(ptr, value.next());
				ptr = ptr.add(1);
				// Increment the length in every step in case next() panics
				local_len.increment_len(1);
			}

			if n > 0 {
				// We can write the last element directly without cloning needlessly
				ptr::write(ptr, value.last());
				local_len.increment_len(1);
			}

			// len set by scope guard
		}
	}

	/// Appends `value` to the back of the array.
	///
	/// Returns a reference to the new element.
	#[inline]
	pub fn push_back(&mut self, value: T) -> &mut T {
		self.emplace_back(move || value)
	}

	/// Constructs a new element at the back of the array with `f`.
	///
	/// If `f` panics, the array is left unchanged.
	#[inline]
	pub fn emplace_back<F: FnOnce() -> T>(&mut self, f: F) -> &mut T {
		let len = self.len;
		self.emplace(len, f)
	}

	/// Inserts `value` at position `index`, shifting all elements after it to the right.
	///
	/// Returns a reference to the new element.
	///
	/// # Panics
	///
	/// Panics if `index > len`.
	#[inline]
	pub fn insert(&mut self, index: usize, value: T) -> &mut T {
		self.emplace(index, move || value)
	}

	/// Constructs a new element with `f` at position `index`,
	/// shifting all elements after it to the right.
	///
	/// `f` is always called before any element is moved, so if it panics the array is
	/// left exactly as it was (length, capacity and elements).
	/// If there is no spare slot, a new block of twice the capacity (or 1 slot) is allocated,
	/// the new element is constructed at its final place in that block,
	/// and only then are the other elements moved around it.
	///
	/// # Panics
	///
	/// Panics if `index > len`.
	///
	/// ```
	/// # use advanced_vec::dynarray;
	/// let mut array = dynarray!["a".to_string(), "c".to_string()];
	/// array.emplace(1, || "b".to_string());
	/// assert_eq!(array, ["a", "b", "c"]);
	/// ```
	pub fn emplace<F: FnOnce() -> T>(&mut self, index: usize, f: F) -> &mut T {
		let len = self.len;
		if index > len {
			insert_failed(index, len)
		}

		if len < self.capacity() {
			// Built before anything is touched.
			let value = f();
			unsafe {
				let p = self.storage.slot(index);
				if index < len {
					// Shift `[index, len)` one slot right, into the free slot at `len`.
					ptr::copy(p, p.add(1), len - index);
				}
				ptr::write(p, value);
			}
		} else {
			let new_capacity = self.grown_capacity();
			trace_growth!(len, old_capacity = self.capacity(), new_capacity, "growing storage");

			let mut fresh = RawStorage::with_capacity(new_capacity);
			unsafe {
				// If `f` panics here, `fresh` holds no value and is simply released.
				ptr::write(fresh.slot(index), f());

				let src = self.storage.as_ptr();
				transfer(src, fresh.as_mut_ptr(), index);
				transfer(src.add(index), fresh.slot(index + 1), len - index);
				self.storage.swap(&mut fresh);
			}
		}

		self.len = len + 1;
		unsafe {
			self.storage.get_mut(index)
		}
	}

	/// Drops the last element.
	///
	/// # Panics
	///
	/// Panics if the array is empty.
	#[inline]
	pub fn pop_back(&mut self) {
		if self.len == 0 {
			panic!("pop_back on an empty array")
		}

		unsafe {
			self.len -= 1;
			ptr::drop_in_place(self.storage.slot(self.len))
		}
	}

	/// Removes the last element and returns it, or `None` if the array is empty.
	#[inline]
	pub fn pop(&mut self) -> Option<T> {
		if self.len == 0 {
			None
		} else {
			unsafe {
				self.len -= 1;
				Some(ptr::read(self.storage.slot(self.len)))
			}
		}
	}

	/// Removes and returns the element at position `index`,
	/// shifting all elements after it to the left.
	///
	/// # Panics
	///
	/// Panics if `index >= len`.
	pub fn remove(&mut self, index: usize) -> T {
		let len = self.len;
		if index >= len {
			remove_failed(index, len)
		}

		unsafe {
			let p = self.storage.slot(index);
			let value = ptr::read(p);
			ptr::copy(p.add(1), p, len - index - 1);
			self.len = len - 1;
			value
		}
	}

	/// Drops the element at position `index`, shifting all elements after it to the left.
	///
	/// Returns `index`, which now holds the element that followed the erased one
	/// (or is the end position).
	/// The erased element is dropped once the array is consistent again, so a panicking
	/// destructor does not corrupt the array.
	///
	/// # Panics
	///
	/// Panics if `index >= len`.
	///
	/// ```
	/// # use advanced_vec::dynarray;
	/// let mut array = dynarray![1, 2, 3];
	/// let next = array.erase(1);
	/// assert_eq!(array[next], 3);
	/// assert_eq!(array, [1, 3]);
	/// ```
	pub fn erase(&mut self, index: usize) -> usize {
		drop(self.remove(index));
		index
	}

	/// Exchanges the storage and length of `self` and `other`.
	///
	/// No element is moved.
	#[inline]
	pub fn swap_with(&mut self, other: &mut Self) {
		self.storage.swap(&mut other.storage);
		mem::swap(&mut self.len, &mut other.len);
	}
}

#[cold]
#[inline(never)]
fn insert_failed(index: usize, len: usize) -> ! {
	panic!("insertion index (is {}) should be <= len (is {})", index, len)
}

#[cold]
#[inline(never)]
fn remove_failed(index: usize, len: usize) -> ! {
	panic!("removal index (is {}) should be < len (is {})", index, len)
}

// Set the length of the array when the `SetLenOnDrop` value goes out of scope.
//
// The idea is: The length field in SetLenOnDrop is a local variable
// that the optimizer will see does not alias with any stores through the array's data
// pointer. This is a workaround for alias analysis issue #32155
struct SetLenOnDrop<'a> {
	len: &'a mut usize,
	local_len: usize
}

impl<'a> SetLenOnDrop<'a> {
	#[inline]
	fn new(len: &'a mut usize) -> Self {
		SetLenOnDrop { local_len: *len, len }
	}

	#[inline]
	fn increment_len(&mut self, increment: usize) {
		self.local_len += increment;
	}
}

impl Drop for SetLenOnDrop<'_> {
	#[inline]
	fn drop(&mut self) {
		*self.len = self.local_len;
	}
}

// This code generalizes `extend_with_{element,default}`.
trait ExtendWith<T> {
	fn next(&mut self) -> T;
	fn last(self) -> T;
}

struct ExtendElement<T>(T);
impl<T: Clone> ExtendWith<T> for ExtendElement<T> {
	fn next(&mut self) -> T {
		self.0.clone()
	}
	fn last(self) -> T {
		self.0
	}
}

struct ExtendDefault;
impl<T: Default> ExtendWith<T> for ExtendDefault {
	fn next(&mut self) -> T {
		Default::default()
	}
	fn last(self) -> T {
		Default::default()
	}
}

struct ExtendFunc<F>(F);
impl<T, F: FnMut() -> T> ExtendWith<T> for ExtendFunc<F> {
	fn next(&mut self) -> T {
		(self.0)()
	}
	fn last(mut self) -> T {
		(self.0)()
	}
}

// Clones into exactly `len` slots, one element at a time.
struct CloneElements<'s, T>(slice::Iter<'s, T>);
impl<'s, T: Clone> ExtendWith<T> for CloneElements<'s, T> {
	fn next(&mut self) -> T {
		match self.0.next() {
			Some(value) => value.clone(),
			None => unreachable!()
		}
	}
	fn last(mut self) -> T {
		self.next()
	}
}

impl<T> Default for DynamicArray<T> {
	#[inline]
	fn default() -> Self {
		Self::new()
	}
}

impl<T: Clone> Clone for DynamicArray<T> {
	/// Deep copy into a block sized exactly to `self.len()`.
	fn clone(&self) -> Self {
		let mut array = Self::with_capacity(self.len);
		array.extend_with(self.len, CloneElements(self.iter()));
		array
	}

	/// Copy assignment.
	///
	/// If `source` does not fit in the current capacity, a full copy is built first
	/// and then swapped in, so a panicking `clone` leaves `self` unchanged.
	/// Otherwise the common prefix is assigned element by element, then the extra tail is
	/// either dropped or cloned in place.
	fn clone_from(&mut self, source: &Self) {
		if source.len > self.capacity() {
			let mut copy = source.clone();
			self.swap_with(&mut copy);
		} else {
			let common = cmp::min(self.len, source.len);
			self.as_mut_slice()[..common].clone_from_slice(&source[..common]);

			if source.len < self.len {
				self.truncate(source.len)
			} else {
				let tail = &source[self.len..];
				self.extend_with(tail.len(), CloneElements(tail.iter()))
			}
		}
	}
}

impl<T> Deref for DynamicArray<T> {
	type Target = [T];

	#[inline]
	fn deref(&self) -> &[T] {
		self.as_slice()
	}
}

impl<T> DerefMut for DynamicArray<T> {
	#[inline]
	fn deref_mut(&mut self) -> &mut [T] {
		self.as_mut_slice()
	}
}

impl<'v, T> IntoIterator for &'v DynamicArray<T> {
	type Item = &'v T;
	type IntoIter = slice::Iter<'v, T>;

	fn into_iter(self) -> Self::IntoIter {
		self.as_slice().iter()
	}
}

impl<'v, T> IntoIterator for &'v mut DynamicArray<T> {
	type Item = &'v mut T;
	type IntoIter = slice::IterMut<'v, T>;

	fn into_iter(self) -> Self::IntoIter {
		self.as_mut_slice().iter_mut()
	}
}

/// An iterator that moves out of a [`DynamicArray`].
///
/// Elements not yet yielded are dropped together with the iterator.
pub struct IntoIter<T> {
	storage: RawStorage<T>,
	start: usize,
	end: usize
}

impl<T> IntoIter<T> {
	/// Returns the remaining items of this iterator as a slice.
	#[inline]
	pub fn as_slice(&self) -> &[T] {
		unsafe {
			slice::from_raw_parts(self.storage.slot(self.start), self.end - self.start)
		}
	}
}

impl<T> Iterator for IntoIter<T> {
	type Item = T;

	#[inline]
	fn next(&mut self) -> Option<T> {
		if self.start < self.end {
			let i = self.start;
			self.start += 1;
			Some(unsafe { ptr::read(self.storage.slot(i)) })
		} else {
			None
		}
	}

	#[inline]
	fn size_hint(&self) -> (usize, Option<usize>) {
		let len = self.end - self.start;
		(len, Some(len))
	}
}

impl<T> DoubleEndedIterator for IntoIter<T> {
	#[inline]
	fn next_back(&mut self) -> Option<T> {
		if self.start < self.end {
			self.end -= 1;
			Some(unsafe { ptr::read(self.storage.slot(self.end)) })
		} else {
			None
		}
	}
}

impl<T> ExactSizeIterator for IntoIter<T> {}
impl<T> FusedIterator for IntoIter<T> {}

impl<T: fmt::Debug> fmt::Debug for IntoIter<T> {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		f.debug_tuple("IntoIter").field(&self.as_slice()).finish()
	}
}

impl<T> Drop for IntoIter<T> {
	fn drop(&mut self) {
		unsafe {
			// only drop remaining elements.
			ptr::drop_in_place(ptr::slice_from_raw_parts_mut(self.storage.slot(self.start), self.end - self.start))
		}
	}
}

impl<T> IntoIterator for DynamicArray<T> {
	type Item = T;
	type IntoIter = IntoIter<T>;

	fn into_iter(self) -> Self::IntoIter {
		let mut array = ManuallyDrop::new(self);
		let storage = mem::take(&mut array.storage);
		IntoIter {
			storage,
			start: 0,
			end: array.len
		}
	}
}

impl<T> Extend<T> for DynamicArray<T> {
	#[inline]
	fn extend<I: IntoIterator<Item = T>>(&mut self, iterator: I) {
		let iterator = iterator.into_iter();
		let (lower, _) = iterator.size_hint();
		if lower > self.capacity() - self.len {
			self.reserve(self.len.saturating_add(lower));
		}

		for element in iterator {
			self.push_back(element);
		}
	}
}

impl<'a, T: Copy + 'a> Extend<&'a T> for DynamicArray<T> {
	#[inline]
	fn extend<I: IntoIterator<Item = &'a T>>(&mut self, iterator: I) {
		self.extend(iterator.into_iter().copied())
	}
}

impl<T> core::iter::FromIterator<T> for DynamicArray<T> {
	#[inline]
	fn from_iter<I: IntoIterator<Item = T>>(iterator: I) -> Self {
		let mut array = DynamicArray::new();
		array.extend(iterator);
		array
	}
}

impl<T: fmt::Debug> fmt::Debug for DynamicArray<T> {
	#[inline]
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		fmt::Debug::fmt(&**self, f)
	}
}

impl<T> AsRef<[T]> for DynamicArray<T> {
	#[inline]
	fn as_ref(&self) -> &[T] {
		self
	}
}

impl<T> AsMut<[T]> for DynamicArray<T> {
	#[inline]
	fn as_mut(&mut self) -> &mut [T] {
		self
	}
}

impl<T: Clone> From<&[T]> for DynamicArray<T> {
	#[inline]
	fn from(s: &[T]) -> DynamicArray<T> {
		let mut array = DynamicArray::with_capacity(s.len());
		array.extend_with(s.len(), CloneElements(s.iter()));
		array
	}
}

impl<T, const N: usize> From<[T; N]> for DynamicArray<T> {
	#[inline]
	fn from(a: [T; N]) -> DynamicArray<T> {
		let mut array = DynamicArray::with_capacity(N);
		array.extend(IntoIterator::into_iter(a));
		array
	}
}

impl<T> From<Vec<T>> for DynamicArray<T> {
	#[inline]
	fn from(v: Vec<T>) -> DynamicArray<T> {
		let mut array = DynamicArray::with_capacity(v.len());
		array.extend(v);
		array
	}
}

impl<T> From<DynamicArray<T>> for Vec<T> {
	#[inline]
	fn from(array: DynamicArray<T>) -> Vec<T> {
		array.into_iter().collect()
	}
}

macro_rules! impl_slice_eq1 {
	([$($vars:tt)*] $lhs:ty, $rhs:ty) => {
		impl<$($vars)*> PartialEq<$rhs> for $lhs where T: PartialEq<U> {
			#[inline]
			fn eq(&self, other: &$rhs) -> bool { self[..] == other[..] }
			#[inline]
			fn ne(&self, other: &$rhs) -> bool { self[..] != other[..] }
		}
	}
}

impl_slice_eq1! { [T, U] DynamicArray<T>, DynamicArray<U> }
impl_slice_eq1! { [T, U] DynamicArray<T>, Vec<U> }
impl_slice_eq1! { [T, U] Vec<T>, DynamicArray<U> }
impl_slice_eq1! { [T, U] DynamicArray<T>, [U] }
impl_slice_eq1! { [T, U] DynamicArray<T>, &[U] }
impl_slice_eq1! { [T, U] DynamicArray<T>, &mut [U] }
impl_slice_eq1! { [T, U] &[T], DynamicArray<U> }
impl_slice_eq1! { [T, U] &mut [T], DynamicArray<U> }
impl_slice_eq1! { [T, U, const N: usize] DynamicArray<T>, [U; N] }
impl_slice_eq1! { [T, U, const N: usize] DynamicArray<T>, &[U; N] }
impl_slice_eq1! { [T, U, const N: usize] [T; N], DynamicArray<U> }
impl_slice_eq1! { [T, U, const N: usize] &[T; N], DynamicArray<U> }

impl<T: Eq> Eq for DynamicArray<T> {}

#[cfg(test)]
mod tests {
	use super::*;
	use std::{
		cell::Cell,
		rc::Rc
	};

	/// Counts how many times values were dropped.
	#[derive(Clone)]
	struct Droppy(Rc<Cell<usize>>);

	impl Drop for Droppy {
		fn drop(&mut self) {
			self.0.set(self.0.get() + 1)
		}
	}

	#[test]
	fn capacity_doubles_from_one() {
		let mut array = DynamicArray::new();
		let mut capacities = vec![array.capacity()];
		for i in 0..9 {
			array.push_back(i);
			if *capacities.last().unwrap() != array.capacity() {
				capacities.push(array.capacity())
			}
		}

		assert_eq!(capacities, [0, 1, 2, 4, 8, 16]);
	}

	#[test]
	fn emplace_in_spare_capacity_shifts_right() {
		let mut array: DynamicArray<i32> = DynamicArray::with_capacity(8);
		array.extend([1, 2, 3, 4].iter());
		let ptr = array.as_ptr();

		*array.emplace(2, || 10) += 1;
		assert_eq!(array, [1, 2, 11, 3, 4]);
		assert_eq!(array.as_ptr(), ptr);
		assert_eq!(array.capacity(), 8);
	}

	#[test]
	fn emplace_when_full_places_value_in_new_block() {
		let mut array = DynamicArray::from([1, 2, 3, 4]);
		assert_eq!(array.capacity(), 4);

		array.emplace(1, || 7);
		assert_eq!(array, [1, 7, 2, 3, 4]);
		assert_eq!(array.capacity(), 8);

		array.emplace(0, || 0);
		array.emplace(6, || 9);
		assert_eq!(array, [0, 1, 7, 2, 3, 4, 9]);
	}

	#[test]
	#[should_panic(expected = "insertion index (is 3) should be <= len (is 2)")]
	fn insert_past_the_end_panics() {
		let mut array = DynamicArray::from([1, 2]);
		array.insert(3, 0);
	}

	#[test]
	#[should_panic(expected = "removal index (is 2) should be < len (is 2)")]
	fn erase_at_end_panics() {
		let mut array = DynamicArray::from([1, 2]);
		array.erase(2);
	}

	#[test]
	#[should_panic(expected = "pop_back on an empty array")]
	fn pop_back_on_empty_panics() {
		let mut array: DynamicArray<u8> = DynamicArray::new();
		array.pop_back();
	}

	#[test]
	fn erase_drops_exactly_the_erased_element() {
		let drops = Rc::new(Cell::new(0));
		let mut array = DynamicArray::from_elem(Droppy(drops.clone()), 4);
		assert_eq!(drops.get(), 0);

		assert_eq!(array.erase(1), 1);
		assert_eq!(drops.get(), 1);
		assert_eq!(array.len(), 3);
		assert_eq!(array.capacity(), 4);

		drop(array);
		assert_eq!(drops.get(), 4);
	}

	#[test]
	fn remove_returns_the_element() {
		let mut array: DynamicArray<String> = ["a", "b", "c"].iter().map(|s| s.to_string()).collect();
		assert_eq!(array.remove(0), "a");
		assert_eq!(array, ["b", "c"]);
		assert_eq!(array.pop(), Some("c".to_string()));
		assert_eq!(array.pop(), Some("b".to_string()));
		assert_eq!(array.pop(), None);
	}

	#[test]
	fn truncate_keeps_capacity() {
		let drops = Rc::new(Cell::new(0));
		let mut array = DynamicArray::from_elem(Droppy(drops.clone()), 5);
		array.truncate(7);
		assert_eq!(drops.get(), 0);

		array.truncate(2);
		assert_eq!(drops.get(), 3);
		assert_eq!(array.len(), 2);
		assert_eq!(array.capacity(), 5);

		array.clear();
		assert_eq!(drops.get(), 5);
		assert!(array.is_empty());
	}

	#[test]
	fn reserve_is_exact_and_never_shrinks() {
		let mut array = DynamicArray::from([1, 2, 3]);
		array.reserve(2);
		assert_eq!(array.capacity(), 3);
		array.reserve(11);
		assert_eq!(array.capacity(), 11);
		assert_eq!(array, [1, 2, 3]);
	}

	#[test]
	fn try_reserve_reports_overflow_and_keeps_contents() {
		let mut array = DynamicArray::from([1u64, 2, 3]);
		assert_eq!(array.try_reserve(usize::MAX), Err(ReserveError::CapacityOverflow));
		assert_eq!(array, [1, 2, 3]);
		assert_eq!(array.capacity(), 3);
	}

	#[test]
	fn resize_grows_to_exact_capacity() {
		let mut array = DynamicArray::from([99, 2]);
		array.resize(5);
		assert_eq!(array, [99, 2, 0, 0, 0]);
		assert_eq!(array.capacity(), 5);

		let mut next = 0;
		array.resize_with(7, || { next += 1; next });
		assert_eq!(array, [99, 2, 0, 0, 0, 1, 2]);

		array.resize_value(8, 5);
		assert_eq!(array, [99, 2, 0, 0, 0, 1, 2, 5]);

		array.resize(1);
		assert_eq!(array, [99]);
		assert_eq!(array.capacity(), 8);
	}

	#[test]
	fn clone_is_sized_to_len() {
		let mut array: DynamicArray<i32> = DynamicArray::with_capacity(10);
		array.extend(vec![1, 2, 3]);
		let copy = array.clone();
		assert_eq!(copy, array);
		assert_eq!(copy.capacity(), 3);
	}

	#[test]
	fn clone_from_reuses_storage_when_it_fits() {
		let mut target: DynamicArray<i32> = DynamicArray::with_capacity(6);
		target.extend(vec![9, 9, 9, 9]);
		let ptr = target.as_ptr();

		target.clone_from(&DynamicArray::from([1, 2]));
		assert_eq!(target, [1, 2]);
		assert_eq!(target.as_ptr(), ptr);

		target.clone_from(&DynamicArray::from([3, 4, 5, 6, 7]));
		assert_eq!(target, [3, 4, 5, 6, 7]);
		assert_eq!(target.as_ptr(), ptr);
		assert_eq!(target.capacity(), 6);
	}

	#[test]
	fn clone_from_reallocates_when_larger() {
		let mut target = DynamicArray::from([1]);
		let source = DynamicArray::from([1, 2, 3]);
		target.clone_from(&source);
		assert_eq!(target, source);
		assert_eq!(target.capacity(), 3);
	}

	#[test]
	fn swap_with_exchanges_everything() {
		let mut a = DynamicArray::from([1, 2, 3]);
		let mut b = DynamicArray::with_capacity(10);
		b.push_back(4);

		a.swap_with(&mut b);
		assert_eq!(a, [4]);
		assert_eq!(a.capacity(), 10);
		assert_eq!(b, [1, 2, 3]);
		assert_eq!(b.capacity(), 3);
	}

	#[test]
	fn into_iter_drops_remaining_elements() {
		let drops = Rc::new(Cell::new(0));
		let array = DynamicArray::from_elem(Droppy(drops.clone()), 4);

		let mut iter = array.into_iter();
		assert_eq!(iter.len(), 4);
		drop(iter.next());
		drop(iter.next_back());
		assert_eq!(drops.get(), 2);
		assert_eq!(iter.len(), 2);

		drop(iter);
		assert_eq!(drops.get(), 4);
	}

	#[test]
	fn into_iter_yields_in_order() {
		let array = DynamicArray::from(vec!["x", "y", "z"]);
		let collected: Vec<_> = array.into_iter().collect();
		assert_eq!(collected, ["x", "y", "z"]);
	}

	#[test]
	fn zero_sized_elements() {
		let mut array = DynamicArray::new();
		for _ in 0..100 {
			array.push_back(());
		}
		array.insert(50, ());
		array.erase(0);
		assert_eq!(array.len(), 100);
		assert_eq!(array.capacity(), 128);
	}

	#[test]
	fn unchecked_access() {
		let mut array = DynamicArray::from([1, 2, 3]);
		unsafe {
			*array.get_unchecked_mut(1) = 20;
			assert_eq!(*array.get_unchecked(1), 20);
		}
	}
}
