use advanced_vec::DynamicArray;
use proptest::prelude::*;

#[derive(Debug, Clone)]
enum Op {
	PushBack(i32),
	Insert(usize, i32),
	Erase(usize),
	PopBack,
	Resize(usize),
	Reserve(usize),
	CloneFrom(Vec<i32>),
	Take
}

fn op() -> impl Strategy<Value = Op> {
	prop_oneof![
		any::<i32>().prop_map(Op::PushBack),
		(any::<usize>(), any::<i32>()).prop_map(|(i, v)| Op::Insert(i, v)),
		any::<usize>().prop_map(Op::Erase),
		Just(Op::PopBack),
		(0usize..40).prop_map(Op::Resize),
		(0usize..80).prop_map(Op::Reserve),
		proptest::collection::vec(any::<i32>(), 0..24).prop_map(Op::CloneFrom),
		Just(Op::Take),
	]
}

proptest! {
	#[test]
	fn behaves_like_vec(ops in proptest::collection::vec(op(), 1..64)) {
		let mut array = DynamicArray::new();
		let mut model: Vec<i32> = Vec::new();

		for op in ops {
			let capacity = array.capacity();
			let mut may_shrink = false;

			match op {
				Op::PushBack(v) => {
					array.push_back(v);
					model.push(v);
				}
				Op::Insert(i, v) => {
					let i = i % (model.len() + 1);
					array.insert(i, v);
					model.insert(i, v);
				}
				Op::Erase(i) => {
					if !model.is_empty() {
						let i = i % model.len();
						prop_assert_eq!(array.erase(i), i);
						model.remove(i);
					}
				}
				Op::PopBack => {
					if !model.is_empty() {
						array.pop_back();
						model.pop();
					}
				}
				Op::Resize(n) => {
					array.resize(n);
					model.resize(n, 0);
				}
				Op::Reserve(n) => {
					array.reserve(n);
					prop_assert_eq!(array.capacity(), capacity.max(n));
				}
				Op::CloneFrom(source) => {
					let source = DynamicArray::from(source);
					array.clone_from(&source);
					model = source.to_vec();
				}
				Op::Take => {
					let taken = std::mem::take(&mut array);
					prop_assert_eq!(&taken, &model);
					model.clear();
					may_shrink = true;
				}
			}

			prop_assert!(array.len() <= array.capacity());
			if !may_shrink {
				prop_assert!(array.capacity() >= capacity);
			}
			prop_assert_eq!(&array, &model);
		}
	}

	#[test]
	fn appends_follow_doubling(n in 0usize..300) {
		let mut array = DynamicArray::new();
		for i in 0..n {
			let before = array.capacity();
			array.push_back(i);
			if before == i {
				prop_assert_eq!(array.capacity(), std::cmp::max(1, 2 * before));
			} else {
				prop_assert_eq!(array.capacity(), before);
			}
		}
		prop_assert_eq!(array.capacity(), if n == 0 { 0 } else { n.next_power_of_two() });
	}
}
