//! Flattening of mixed member arguments.

use tally_registry::{Matches, Member};

use crate::EnumSet;

/// Anything that yields members for [`EnumSet::add`], [`EnumSet::remove`] and
/// [`EnumSet::contains`].
///
/// Implemented for single members, sets, lookup results, and arbitrarily
/// nested arrays, slices, vectors, options and tuples of those, which are
/// flattened in order.
pub trait EnumItems {
	/// Calls `f` with every member, in order.
	fn for_each_member(&self, f: &mut dyn FnMut(Member));
}

impl EnumItems for Member {
	fn for_each_member(&self, f: &mut dyn FnMut(Member)) {
		f(*self);
	}
}

impl EnumItems for EnumSet {
	fn for_each_member(&self, f: &mut dyn FnMut(Member)) {
		self.iter().for_each(f);
	}
}

impl EnumItems for Matches {
	fn for_each_member(&self, f: &mut dyn FnMut(Member)) {
		match self {
			Matches::Empty => {}
			Matches::Single(m) => f(*m),
			Matches::Multiple(members) => members.for_each_member(f),
		}
	}
}

impl<T: EnumItems + ?Sized> EnumItems for &T {
	fn for_each_member(&self, f: &mut dyn FnMut(Member)) {
		(**self).for_each_member(f);
	}
}

impl<T: EnumItems> EnumItems for [T] {
	fn for_each_member(&self, f: &mut dyn FnMut(Member)) {
		for item in self {
			item.for_each_member(f);
		}
	}
}

impl<T: EnumItems, const N: usize> EnumItems for [T; N] {
	fn for_each_member(&self, f: &mut dyn FnMut(Member)) {
		self.as_slice().for_each_member(f);
	}
}

impl<T: EnumItems> EnumItems for Vec<T> {
	fn for_each_member(&self, f: &mut dyn FnMut(Member)) {
		self.as_slice().for_each_member(f);
	}
}

impl<T: EnumItems> EnumItems for Option<T> {
	fn for_each_member(&self, f: &mut dyn FnMut(Member)) {
		if let Some(item) = self {
			item.for_each_member(f);
		}
	}
}

macro_rules! impl_tuple_items {
	($($name:ident)*) => {
		impl<$($name: EnumItems),*> EnumItems for ($($name,)*) {
			#[allow(non_snake_case, unused_variables)]
			fn for_each_member(&self, f: &mut dyn FnMut(Member)) {
				let ($($name,)*) = self;
				$($name.for_each_member(f);)*
			}
		}
	};
}

impl_tuple_items!();
impl_tuple_items!(A);
impl_tuple_items!(A B);
impl_tuple_items!(A B C);
impl_tuple_items!(A B C D);
impl_tuple_items!(A B C D E);
impl_tuple_items!(A B C D E F);
