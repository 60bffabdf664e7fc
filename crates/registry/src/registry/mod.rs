//! Per-type member pool and lookups.

use core::fmt;

use indexmap::IndexMap;
use rustc_hash::FxBuildHasher;

use crate::{EnumError, EnumKind, Member, Value};

/// Sealed pool of one enum type's members.
///
/// Ordinals are exactly `0..len()` in declaration order. A registry is
/// immutable once built and lives for the rest of the process.
pub struct EnumRegistry {
	kind: EnumKind,
	pool: IndexMap<&'static str, Member, FxBuildHasher>,
}

/// Result of [`EnumRegistry::by_binary`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Matches {
	/// No member matched the mask.
	Empty,
	/// Exactly one member matched.
	Single(Member),
	/// Two or more members matched, in ordinal order.
	Multiple(Vec<Member>),
}

impl Matches {
	/// Returns the member if exactly one matched.
	pub fn single(&self) -> Option<Member> {
		match self {
			Matches::Single(m) => Some(*m),
			_ => None,
		}
	}

	/// Returns true if nothing matched.
	pub fn is_empty(&self) -> bool {
		matches!(self, Matches::Empty)
	}

	/// Flattens into a list in ordinal order.
	pub fn into_vec(self) -> Vec<Member> {
		match self {
			Matches::Empty => Vec::new(),
			Matches::Single(m) => vec![m],
			Matches::Multiple(members) => members,
		}
	}
}

impl EnumRegistry {
	pub(crate) fn new(kind: EnumKind, members: impl IntoIterator<Item = Member>) -> Self {
		let pool = members.into_iter().map(|m| (m.name(), m)).collect();
		Self { kind, pool }
	}

	/// Returns the type this registry belongs to.
	pub fn kind(&self) -> EnumKind {
		self.kind
	}

	/// Returns the number of pooled members.
	pub fn len(&self) -> usize {
		self.pool.len()
	}

	/// Returns true if the type has no members.
	pub fn is_empty(&self) -> bool {
		self.pool.is_empty()
	}

	/// Returns whether `member` is pooled here.
	pub fn contains(&self, member: Member) -> bool {
		member.kind() == self.kind && self.pool.get(member.name()) == Some(&member)
	}

	/// Returns all members in ordinal order.
	pub fn members(&self) -> impl DoubleEndedIterator<Item = Member> + ExactSizeIterator + '_ {
		self.pool.values().copied()
	}

	/// Returns all member names in ordinal order.
	pub fn names(&self) -> impl DoubleEndedIterator<Item = &'static str> + ExactSizeIterator + '_ {
		self.pool.keys().copied()
	}

	/// Returns the member called `name`, if any.
	pub fn get(&self, name: &str) -> Option<Member> {
		self.pool.get(name).copied()
	}

	/// Returns the member called `name`.
	///
	/// Unlike [`get`](Self::get), a missing name is an error.
	pub fn resolve(&self, name: &str) -> Result<Member, EnumError> {
		self.get(name).ok_or_else(|| EnumError::UndeclaredMember {
			ty: self.kind.name(),
			name: name.to_owned(),
		})
	}

	/// Returns the lowest-ordinal member whose value equals `value`.
	pub fn by_value(&self, value: impl Into<Value>) -> Option<Member> {
		let value = value.into();
		self.members().find(|m| m.value() == Some(&value))
	}

	/// Returns the member at `ordinal`, if any.
	pub fn by_ordinal(&self, ordinal: usize) -> Option<Member> {
		self.pool.get_index(ordinal).map(|(_, m)| *m)
	}

	/// Returns the members whose flag bits are set in `mask`.
	///
	/// The result shape follows the number of matches; use
	/// [`by_binary_all`](Self::by_binary_all) for a plain list.
	pub fn by_binary(&self, mask: u64) -> Matches {
		let mut members = self.by_binary_all(mask);
		match members.len() {
			0 => Matches::Empty,
			1 => Matches::Single(members.remove(0)),
			_ => Matches::Multiple(members),
		}
	}

	/// Returns the members whose flag bits are set in `mask`, in ordinal order.
	pub fn by_binary_all(&self, mask: u64) -> Vec<Member> {
		self.members().filter(|m| mask & m.binary() != 0).collect()
	}
}

impl fmt::Debug for EnumRegistry {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		f.debug_struct("EnumRegistry")
			.field("kind", &self.kind.name())
			.field("members", &self.pool.keys().collect::<Vec<_>>())
			.finish()
	}
}
