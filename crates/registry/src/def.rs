//! Enum type declarations.
//!
//! A type is declared by implementing [`Enumeration`] on a marker type. The
//! build hands [`Enumeration::define`] an empty [`EnumDef`] which the type
//! fills with its constants, in declaration order, and optionally with a
//! one-time initializer and a per-member constructor.

use core::any::TypeId;
use core::fmt;
use core::hash::{Hash, Hasher};

use crate::build::{Args, Initializer, MemberInit};
use crate::{EnumError, EnumRegistry, Member, Value, catalog};

/// Identity of an enum type.
///
/// Two kinds are equal iff they were taken from the same marker type; the
/// name is carried for messages only.
#[derive(Debug, Clone, Copy)]
pub struct EnumKind {
	id: TypeId,
	name: &'static str,
}

impl EnumKind {
	/// Returns the kind of the marker type `E`.
	pub fn of<E: Enumeration>() -> Self {
		Self {
			id: TypeId::of::<E>(),
			name: E::NAME,
		}
	}

	/// Returns the declared type name.
	pub fn name(self) -> &'static str {
		self.name
	}

	/// Returns the marker type's [`TypeId`].
	pub fn type_id(self) -> TypeId {
		self.id
	}
}

impl PartialEq for EnumKind {
	fn eq(&self, other: &Self) -> bool {
		self.id == other.id
	}
}

impl Eq for EnumKind {}

impl Hash for EnumKind {
	fn hash<H: Hasher>(&self, state: &mut H) {
		self.id.hash(state);
	}
}

impl fmt::Display for EnumKind {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		f.write_str(self.name)
	}
}

/// An enum type.
///
/// The registry for a type is built the first time any of these methods (or
/// [`catalog::registry`]) is called for it, and reused afterwards.
pub trait Enumeration: Sized + 'static {
	/// Type name used in messages and for lookup by name.
	const NAME: &'static str;

	/// Fills in the type's declaration.
	fn define(def: EnumDef) -> EnumDef;

	/// Returns the type's registry, building it on first use.
	fn registry() -> Result<&'static EnumRegistry, EnumError> {
		catalog::registry::<Self>()
	}

	/// Returns the member called `name`, or [`EnumError::UndeclaredMember`].
	fn resolve(name: &str) -> Result<Member, EnumError> {
		Self::registry()?.resolve(name)
	}

	/// Returns the member called `name`, if any.
	fn get(name: &str) -> Result<Option<Member>, EnumError> {
		Ok(Self::registry()?.get(name))
	}
}

/// What to do when a constant name is declared twice.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum DuplicatePolicy {
	/// Keep the pooled member and its first value.
	#[default]
	Reuse,
	/// Fail the build with [`EnumError::DuplicateConstant`].
	Reject,
}

pub(crate) type InitializerFn = Box<dyn FnOnce(&mut Initializer<'_>) -> Result<(), EnumError>>;
pub(crate) type ConstructorFn = Box<dyn FnMut(&mut MemberInit<'_>, &Args)>;

pub(crate) struct Constructor {
	pub(crate) required: usize,
	pub(crate) run: ConstructorFn,
}

/// Declaration of one enum type, consumed by its build.
pub struct EnumDef {
	pub(crate) kind: EnumKind,
	pub(crate) constants: Vec<(Box<str>, Option<Value>)>,
	pub(crate) initializer: Option<InitializerFn>,
	pub(crate) constructor: Option<Constructor>,
	pub(crate) policy: DuplicatePolicy,
}

impl EnumDef {
	/// Creates an empty declaration for `kind`.
	pub fn new(kind: EnumKind) -> Self {
		Self {
			kind,
			constants: Vec::new(),
			initializer: None,
			constructor: None,
			policy: DuplicatePolicy::default(),
		}
	}

	/// Returns the type being declared.
	pub fn kind(&self) -> EnumKind {
		self.kind
	}

	/// Declares a constant with a value.
	pub fn constant(mut self, name: impl Into<Box<str>>, value: impl Into<Value>) -> Self {
		self.constants.push((name.into(), Some(value.into())));
		self
	}

	/// Declares a constant without a value.
	pub fn member(mut self, name: impl Into<Box<str>>) -> Self {
		self.constants.push((name.into(), None));
		self
	}

	/// Sets the one-time initializer, run after all constants are pooled.
	pub fn initializer<F>(mut self, f: F) -> Self
	where
		F: FnOnce(&mut Initializer<'_>) -> Result<(), EnumError> + 'static,
	{
		self.initializer = Some(Box::new(f));
		self
	}

	/// Sets the per-member constructor and its number of required arguments.
	///
	/// The constructor runs once per member, in ordinal order, after the
	/// initializer has finished.
	pub fn constructor<F>(mut self, required: usize, f: F) -> Self
	where
		F: FnMut(&mut MemberInit<'_>, &Args) + 'static,
	{
		self.constructor = Some(Constructor {
			required,
			run: Box::new(f),
		});
		self
	}

	/// Sets the policy for constant names declared twice.
	pub fn duplicate_policy(mut self, policy: DuplicatePolicy) -> Self {
		self.policy = policy;
		self
	}
}

impl fmt::Debug for EnumDef {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		f.debug_struct("EnumDef")
			.field("kind", &self.kind)
			.field("constants", &self.constants)
			.field("initializer", &self.initializer.is_some())
			.field("constructor", &self.constructor.as_ref().map(|c| c.required))
			.field("policy", &self.policy)
			.finish()
	}
}
