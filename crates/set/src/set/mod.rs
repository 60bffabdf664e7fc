//! Type-bound member collections.

use core::cell::Cell;
use core::fmt;

use tally_registry::{EnumError, EnumKind, EnumRegistry, Enumeration, Member, catalog};
use tracing::debug;

use crate::{Cursor, EnumItems, SetError};

/// Ordered collection of members of one enum type.
///
/// Insertion order is kept and duplicates are not removed: adding a member
/// twice stores it twice. Check [`contains`](Self::contains) first where set
/// semantics matter.
///
/// The combined flag mask is cached until the next mutation. The cache makes
/// the type `Send` but not `Sync`; clone a set to share a snapshot.
#[derive(Clone)]
pub struct EnumSet {
	registry: &'static EnumRegistry,
	elements: Vec<Member>,
	binary: Cell<Option<u64>>,
}

impl EnumSet {
	/// Creates an empty set bound to `registry`'s type.
	pub fn new(registry: &'static EnumRegistry) -> Self {
		Self {
			registry,
			elements: Vec::new(),
			binary: Cell::new(None),
		}
	}

	/// Creates an empty set of `E`, building the type if needed.
	pub fn create<E: Enumeration>() -> Result<Self, SetError> {
		Ok(Self::new(E::registry()?))
	}

	/// Creates an empty set for the type declared under `name`.
	pub fn for_type(name: &str) -> Result<Self, SetError> {
		let decl = catalog::find(name).ok_or_else(|| SetError::InvalidType {
			name: name.to_owned(),
		})?;
		Ok(Self::new(decl.registry()?))
	}

	/// Creates a set of `first`'s type holding `first` followed by `rest`.
	pub fn of(first: Member, rest: impl EnumItems) -> Result<Self, SetError> {
		let mut set = Self::new(registry_of(first)?);
		set.add((first, rest));
		Ok(set)
	}

	/// Creates a set holding every member of `E`.
	pub fn all<E: Enumeration>() -> Result<Self, SetError> {
		Ok(Self::all_of(E::registry()?))
	}

	/// Creates a set holding every member of `registry`.
	pub fn all_of(registry: &'static EnumRegistry) -> Self {
		let mut set = Self::new(registry);
		set.elements.extend(registry.members());
		set
	}

	/// Creates a set of the members of `set`'s type that `set` lacks, in
	/// ordinal order.
	pub fn complement(set: &EnumSet) -> Self {
		let mut comp = Self::new(set.registry);
		comp.elements
			.extend(set.registry.members().filter(|m| !set.elements.contains(m)));
		comp
	}

	/// Creates a set of the contiguous ordinal span between `from` and `to`.
	///
	/// The span is collected in ordinal order whichever endpoint comes first,
	/// so `range(a, b)` and `range(b, a)` are equal.
	pub fn range(from: Member, to: Member) -> Result<Self, SetError> {
		if from.kind() != to.kind() {
			return Err(SetError::TypeMismatch {
				expected: from.kind().name(),
				found: to.kind().name(),
			});
		}
		let registry = registry_of(from)?;
		let mut set = Self::new(registry);
		let mut seek = None;
		for member in registry.members() {
			if seek.is_none() && (member == from || member == to) {
				seek = Some(if member == from { to } else { from });
			}
			if let Some(end) = seek {
				set.elements.push(member);
				if member == end {
					break;
				}
			}
		}
		Ok(set)
	}

	/// Creates a set of `E`'s members whose flags are set in `mask`.
	pub fn by_binary<E: Enumeration>(mask: u64) -> Result<Self, SetError> {
		Ok(Self::by_binary_in(E::registry()?, mask))
	}

	/// Creates a set of `registry`'s members whose flags are set in `mask`.
	pub fn by_binary_in(registry: &'static EnumRegistry, mask: u64) -> Self {
		let mut set = Self::new(registry);
		set.elements = registry.by_binary_all(mask);
		set
	}

	/// Returns the bound type.
	pub fn kind(&self) -> EnumKind {
		self.registry.kind()
	}

	/// Returns the registry of the bound type.
	pub fn registry(&self) -> &'static EnumRegistry {
		self.registry
	}

	/// Returns the number of elements, duplicates included.
	pub fn len(&self) -> usize {
		self.elements.len()
	}

	/// Returns true if the set has no elements.
	pub fn is_empty(&self) -> bool {
		self.elements.is_empty()
	}

	/// Returns the element at `offset`, if any.
	pub fn get(&self, offset: usize) -> Option<Member> {
		self.elements.get(offset).copied()
	}

	/// Returns the elements in insertion order.
	pub fn members(&self) -> &[Member] {
		&self.elements
	}

	/// Iterates over the elements in insertion order.
	pub fn iter(&self) -> core::iter::Copied<core::slice::Iter<'_, Member>> {
		self.elements.iter().copied()
	}

	/// Returns a positional cursor at the first element.
	pub fn cursor(&self) -> Cursor<'_> {
		Cursor::new(self)
	}

	/// Returns the OR of all element flags.
	pub fn binary(&self) -> u64 {
		if let Some(binary) = self.binary.get() {
			return binary;
		}
		let binary = self.elements.iter().fold(0, |acc, m| acc | m.binary());
		self.binary.set(Some(binary));
		binary
	}

	/// Appends every member in `items` that belongs to the bound type.
	///
	/// Members of other types are skipped.
	pub fn add(&mut self, items: impl EnumItems) -> &mut Self {
		let kind = self.kind();
		let elements = &mut self.elements;
		items.for_each_member(&mut |member| {
			if member.kind() == kind {
				elements.push(member);
			} else {
				debug!(set = kind.name(), member = ?member, "skipping member of another type");
			}
		});
		self.binary.set(None);
		self
	}

	/// Removes the first occurrence of every member in `items`.
	///
	/// Members that are not present are ignored.
	pub fn remove(&mut self, items: impl EnumItems) -> &mut Self {
		let elements = &mut self.elements;
		items.for_each_member(&mut |member| {
			if let Some(pos) = elements.iter().position(|m| *m == member) {
				elements.remove(pos);
			}
		});
		self.binary.set(None);
		self
	}

	/// Removes every element not present in `other`.
	pub fn retain(&mut self, other: &EnumSet) -> Result<&mut Self, SetError> {
		if other.kind() != self.kind() {
			return Err(SetError::TypeMismatch {
				expected: self.kind().name(),
				found: other.kind().name(),
			});
		}
		self.elements.retain(|m| other.elements.contains(m));
		self.binary.set(None);
		Ok(self)
	}

	/// Returns true iff `items` is non-empty and every member in it is present.
	pub fn contains(&self, items: impl EnumItems) -> bool {
		let mut any = false;
		let mut all = true;
		items.for_each_member(&mut |member| {
			any = true;
			all &= self.contains_member(member);
		});
		any && all
	}

	/// Returns true if `member` is present.
	pub fn contains_member(&self, member: Member) -> bool {
		member.kind() == self.kind() && self.elements.contains(&member)
	}

	/// Removes all elements.
	pub fn clear(&mut self) -> &mut Self {
		self.elements.clear();
		self.binary.set(None);
		self
	}

	/// Returns true if both sets bind the same type and hold the same members,
	/// ignoring order and multiplicity.
	pub fn same_members(&self, other: &EnumSet) -> bool {
		self.kind() == other.kind()
			&& self.elements.iter().all(|m| other.elements.contains(m))
			&& other.elements.iter().all(|m| self.elements.contains(m))
	}
}

/// Returns the published registry of `member`'s type.
///
/// Members are only created by the final step of a build, which publishes the
/// registry before handing them out, so the lookup never misses. A miss could
/// only mean that type's build is still on the stack, which is what
/// `RecursiveBuild` reports.
fn registry_of(member: Member) -> Result<&'static EnumRegistry, SetError> {
	let kind = member.kind();
	catalog::registry_of(kind).ok_or(SetError::Registry(EnumError::RecursiveBuild { ty: kind.name() }))
}

impl<'a> IntoIterator for &'a EnumSet {
	type Item = Member;
	type IntoIter = core::iter::Copied<core::slice::Iter<'a, Member>>;

	fn into_iter(self) -> Self::IntoIter {
		self.iter()
	}
}

impl fmt::Debug for EnumSet {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		f.debug_struct("EnumSet")
			.field("kind", &self.kind().name())
			.field("elements", &self.elements)
			.finish()
	}
}

impl fmt::Display for EnumSet {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		write!(f, "[EnumSet Size: {}; Binary: 0x{:016X}; Set: ", self.len(), self.binary())?;
		for (i, member) in self.iter().enumerate() {
			if i > 0 {
				f.write_str(", ")?;
			}
			write!(f, "{member}")?;
		}
		f.write_str("]")
	}
}
