//! This crate provides the [`DynamicArray`] data structure: a contiguous growable
//! array, built in two layers.
//!
//! - [`RawStorage`] owns a block of uninitialized memory for a fixed number of slots.
//!   It allocates and frees memory, and never constructs nor drops a value.
//! - [`DynamicArray`] owns a `RawStorage` plus a length. It is the only code constructing,
//!   moving and dropping values inside the block.
//!
//! ## Basic usage
//!
//! ```rust
//! use advanced_vec::DynamicArray;
//!
//! let mut array = DynamicArray::new();
//! array.push_back(1);
//! array.push_back(2);
//! array.push_back(3);
//! assert_eq!(array, [1, 2, 3]);
//! assert_eq!(array.capacity(), 4); // 0 -> 1 -> 2 -> 4
//! ```
//!
//! ## Panic safety
//!
//! Values are built before the array is modified. If the constructor passed to
//! [`emplace`](DynamicArray::emplace) panics, the array is left exactly as it was:
//! ```rust
//! # use advanced_vec::dynarray;
//! # use std::panic::{catch_unwind, AssertUnwindSafe};
//! let mut array = dynarray![1, 2, 3, 4];
//! let result = catch_unwind(AssertUnwindSafe(|| {
//! 	array.emplace(1, || panic!("no value today"));
//! }));
//! assert!(result.is_err());
//! assert_eq!(array, [1, 2, 3, 4]);
//! assert_eq!(array.capacity(), 4);
//! ```
//!
//! ## Logging
//!
//! With the default `tracing` feature, every reallocation emits a `TRACE`
//! event on the `advanced_vec::array` target.

#[cfg(feature = "tracing")]
macro_rules! trace_growth {
	($($arg:tt)*) => {
		tracing::trace!($($arg)*)
	};
}

#[cfg(not(feature = "tracing"))]
macro_rules! trace_growth {
	($($arg:tt)*) => {
		()
	};
}

pub mod raw;
pub mod array;

pub use raw::{
	RawStorage,
	ReserveError
};
pub use array::{
	DynamicArray,
	IntoIter
};

/// Creates a [`DynamicArray`] containing the arguments.
///
/// ```
/// # use advanced_vec::dynarray;
/// let empty: advanced_vec::DynamicArray<u8> = dynarray![];
/// assert!(empty.is_empty());
///
/// let zeros = dynarray![0; 3];
/// assert_eq!(zeros, [0, 0, 0]);
///
/// let array = dynarray![1, 2, 3];
/// assert_eq!(array, [1, 2, 3]);
/// ```
#[macro_export]
macro_rules! dynarray {
	() => (
		$crate::DynamicArray::new()
	);
	($elem:expr; $n:expr) => (
		$crate::DynamicArray::from_elem($elem, $n)
	);
	($($x:expr),+ $(,)?) => (
		$crate::DynamicArray::from([$($x),+])
	);
}
