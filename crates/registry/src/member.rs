//! Pooled enum members and their identity handles.
//!
//! A member is allocated once, when its type is built, and lives for the rest
//! of the process. The pooled data is private to this crate and does not
//! implement `Clone`; code only ever holds a [`Member`], which is a shared
//! reference to the pooled data. Copying a `Member` copies the reference, so
//! two handles to the same name always compare identical.

use core::any::Any;
use core::fmt;
use core::hash::{Hash, Hasher};

use crate::{EnumKind, Enumeration, Value};

/// Storage for one pooled member.
pub(crate) struct MemberData {
	pub(crate) kind: EnumKind,
	pub(crate) name: Box<str>,
	pub(crate) ordinal: u32,
	pub(crate) value: Option<Value>,
	pub(crate) data: Option<Box<dyn Any + Send + Sync>>,
}

/// Identity handle to a pooled member.
///
/// Equality and hashing are by identity.
#[derive(Clone, Copy)]
pub struct Member(&'static MemberData);

/// Operand for [`Member::equals`].
#[derive(Debug, Clone, Copy)]
pub enum Candidate<'a> {
	/// Matches only the very same member.
	Identity(Member),
	/// Matches the member whose name equals the string.
	Name(&'a str),
	/// Matches a member whose value is present and equal to the operand.
	Value(&'a Value),
}

impl Member {
	/// Moves member data into the process-lifetime pool.
	pub(crate) fn pool(data: MemberData) -> Self {
		Self(Box::leak(Box::new(data)))
	}

	/// Returns the type this member belongs to.
	pub fn kind(self) -> EnumKind {
		self.0.kind
	}

	/// Returns whether this member belongs to `E`.
	pub fn is<E: Enumeration>(self) -> bool {
		self.0.kind == EnumKind::of::<E>()
	}

	/// Returns the declared name.
	pub fn name(self) -> &'static str {
		&self.0.name
	}

	/// Returns the 0-based declaration position within the type.
	pub fn ordinal(self) -> u32 {
		self.0.ordinal
	}

	/// Returns the binary flag, `1 << ordinal`.
	///
	/// The shift is taken modulo 64, so members past ordinal 63 share flags
	/// with earlier ones.
	pub fn binary(self) -> u64 {
		1u64.wrapping_shl(self.0.ordinal)
	}

	/// Returns the value, if one was declared or assigned during the build.
	pub fn value(self) -> Option<&'static Value> {
		self.0.value.as_ref()
	}

	/// Returns data attached by the type's constructor, if it has type `D`.
	pub fn data<D: Any>(self) -> Option<&'static D> {
		self.0.data.as_deref()?.downcast_ref::<D>()
	}

	/// Compares against an identity, a name, or a value.
	pub fn equals(self, candidate: Candidate<'_>) -> bool {
		match candidate {
			Candidate::Identity(other) => self == other,
			Candidate::Name(name) => self.name() == name,
			Candidate::Value(value) => self.value() == Some(value),
		}
	}
}

impl PartialEq for Member {
	fn eq(&self, other: &Self) -> bool {
		core::ptr::eq(self.0, other.0)
	}
}

impl Eq for Member {}

impl Hash for Member {
	fn hash<H: Hasher>(&self, state: &mut H) {
		core::ptr::hash(self.0, state);
	}
}

impl fmt::Debug for Member {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		write!(f, "{}::{}", self.kind(), self.name())
	}
}

impl fmt::Display for Member {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		write!(f, "[{}::{}; Value: ", self.kind(), self.name())?;
		match self.value() {
			Some(value) => write!(f, "{value}")?,
			None => f.write_str("null")?,
		}
		write!(f, "; Ordinal: {}; Binary: 0x{:x}]", self.ordinal(), self.binary())
	}
}
