//! One-time construction of an enum type.
//!
//! # Phases
//!
//! 1. **Constants:** every declared constant is pooled in declaration order,
//!    taking the next ordinal.
//! 2. **Initializing:** the type's initializer runs against an [`Initializer`].
//!    Naming an unpooled member there pools it; supplying arguments records
//!    them for the constructor. A member accepts arguments only once.
//! 3. **Constructing:** the constructor runs once per member in ordinal order
//!    with the recorded arguments, padded with absent values up to the
//!    required count. The argument buffers are dropped afterwards.
//! 4. **Sealed:** drafts are moved into the process-lifetime pool and the
//!    registry is returned for publication.

use core::any::Any;
use core::mem;

use indexmap::IndexMap;
use rustc_hash::FxBuildHasher;
use tracing::{debug, trace, warn};

use crate::def::{Constructor, EnumDef};
use crate::member::MemberData;
use crate::{DuplicatePolicy, EnumError, EnumKind, EnumRegistry, Member, Value};

/// A member under construction.
struct Draft {
	value: Option<Value>,
	args: Vec<Value>,
	data: Option<Box<dyn Any + Send + Sync>>,
}

impl Draft {
	fn new(value: Option<Value>) -> Self {
		Self {
			value,
			args: Vec::new(),
			data: None,
		}
	}
}

type Pool = IndexMap<Box<str>, Draft, FxBuildHasher>;

/// Handle given to a type's initializer.
pub struct Initializer<'a> {
	kind: EnumKind,
	pool: &'a mut Pool,
}

impl Initializer<'_> {
	/// Returns the type being built.
	pub fn kind(&self) -> EnumKind {
		self.kind
	}

	/// Returns the number of members pooled so far.
	pub fn len(&self) -> usize {
		self.pool.len()
	}

	/// Returns true if nothing has been pooled yet.
	pub fn is_empty(&self) -> bool {
		self.pool.is_empty()
	}

	/// Returns whether `name` is already pooled.
	pub fn is_declared(&self, name: &str) -> bool {
		self.pool.contains_key(name)
	}

	/// Pools `name` without arguments. Pooled names are left untouched.
	pub fn declare(&mut self, name: &str) {
		draft_mut(self.pool, self.kind, name);
	}

	/// Pools `name` if needed and records its constructor arguments.
	///
	/// Fails with [`EnumError::DuplicateArguments`] if the member already has
	/// arguments. An empty argument list never conflicts.
	pub fn construct<I>(&mut self, name: &str, args: I) -> Result<(), EnumError>
	where
		I: IntoIterator,
		I::Item: Into<Value>,
	{
		let args: Vec<Value> = args.into_iter().map(Into::into).collect();
		let draft = draft_mut(self.pool, self.kind, name);
		if args.is_empty() {
			return Ok(());
		}
		if !draft.args.is_empty() {
			return Err(EnumError::DuplicateArguments {
				ty: self.kind.name(),
				name: name.to_owned(),
			});
		}
		draft.args = args;
		Ok(())
	}

	/// Sets the value of a pooled member.
	pub fn assign(&mut self, name: &str, value: impl Into<Value>) -> Result<(), EnumError> {
		let Some(draft) = self.pool.get_mut(name) else {
			return Err(EnumError::UndeclaredMember {
				ty: self.kind.name(),
				name: name.to_owned(),
			});
		};
		draft.value = Some(value.into());
		Ok(())
	}
}

fn draft_mut<'p>(pool: &'p mut Pool, kind: EnumKind, name: &str) -> &'p mut Draft {
	let len = pool.len();
	pool.entry(Box::from(name)).or_insert_with(|| {
		trace!(ty = kind.name(), member = name, ordinal = len, "pooled");
		Draft::new(None)
	})
}

/// Arguments recorded for one member, padded to the constructor's arity.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Args {
	values: Vec<Option<Value>>,
}

impl Args {
	/// Returns the number of arguments, including padding.
	pub fn len(&self) -> usize {
		self.values.len()
	}

	/// Returns true if there are no arguments.
	pub fn is_empty(&self) -> bool {
		self.values.is_empty()
	}

	/// Returns the argument at `index`; `None` if absent or out of range.
	pub fn get(&self, index: usize) -> Option<&Value> {
		self.values.get(index)?.as_ref()
	}

	/// Returns the argument at `index` if it is a string.
	pub fn str(&self, index: usize) -> Option<&str> {
		self.get(index)?.as_str()
	}

	/// Returns the argument at `index` if it is a member.
	pub fn member(&self, index: usize) -> Option<Member> {
		self.get(index)?.as_member()
	}

	/// Iterates over all arguments, padding included.
	pub fn iter(&self) -> impl Iterator<Item = Option<&Value>> {
		self.values.iter().map(Option::as_ref)
	}
}

/// Handle given to a type's constructor for one member.
pub struct MemberInit<'a> {
	kind: EnumKind,
	name: &'a str,
	ordinal: u32,
	draft: &'a mut Draft,
}

impl MemberInit<'_> {
	/// Returns the type being built.
	pub fn kind(&self) -> EnumKind {
		self.kind
	}

	/// Returns the member's name.
	pub fn name(&self) -> &str {
		self.name
	}

	/// Returns the member's ordinal.
	pub fn ordinal(&self) -> u32 {
		self.ordinal
	}

	/// Returns the member's current value.
	pub fn value(&self) -> Option<&Value> {
		self.draft.value.as_ref()
	}

	/// Replaces the member's value.
	pub fn set_value(&mut self, value: impl Into<Value>) {
		self.draft.value = Some(value.into());
	}

	/// Attaches extra data, readable later through [`Member::data`].
	pub fn attach<D: Any + Send + Sync>(&mut self, data: D) {
		self.draft.data = Some(Box::new(data));
	}
}

/// Runs all build phases for one declaration.
pub(crate) fn build(def: EnumDef) -> Result<EnumRegistry, EnumError> {
	let EnumDef {
		kind,
		constants,
		initializer,
		constructor,
		policy,
	} = def;
	debug!(ty = kind.name(), constants = constants.len(), "building enum type");

	let mut pool = Pool::with_capacity_and_hasher(constants.len(), FxBuildHasher);
	for (name, value) in constants {
		if pool.contains_key(&name) {
			match policy {
				DuplicatePolicy::Reuse => {
					trace!(ty = kind.name(), member = &*name, "constant re-declared, reusing member");
					continue;
				}
				DuplicatePolicy::Reject => {
					return Err(EnumError::DuplicateConstant {
						ty: kind.name(),
						name: name.into_string(),
					});
				}
			}
		}
		trace!(ty = kind.name(), member = &*name, ordinal = pool.len(), "pooled");
		pool.insert(name, Draft::new(value));
	}

	if let Some(initializer) = initializer {
		initializer(&mut Initializer {
			kind,
			pool: &mut pool,
		})?;
	}

	if let Some(constructor) = constructor {
		construct(kind, &mut pool, constructor);
	}

	if pool.len() > u64::BITS as usize {
		warn!(
			ty = kind.name(),
			members = pool.len(),
			"more members than flag bits, binary flags past ordinal 63 overlap"
		);
	}

	let members = pool.into_iter().enumerate().map(|(ordinal, (name, draft))| {
		Member::pool(MemberData {
			kind,
			name,
			ordinal: ordinal as u32,
			value: draft.value,
			data: draft.data,
		})
	});
	let registry = EnumRegistry::new(kind, members);
	debug!(ty = kind.name(), members = registry.len(), "built enum type");
	Ok(registry)
}

fn construct(kind: EnumKind, pool: &mut Pool, constructor: Constructor) {
	let Constructor { required, mut run } = constructor;
	for (ordinal, (name, draft)) in pool.iter_mut().enumerate() {
		let supplied = draft.args.len();
		let mut values: Vec<Option<Value>> = mem::take(&mut draft.args).into_iter().map(Some).collect();
		if supplied < required {
			warn!(
				ty = kind.name(),
				member = &**name,
				missing = supplied + 1,
				required,
				supplied,
				"missing constructor argument while initializing enum member"
			);
			values.resize(required, None);
		}
		run(
			&mut MemberInit {
				kind,
				name,
				ordinal: ordinal as u32,
				draft,
			},
			&Args { values },
		);
	}
}

#[cfg(test)]
mod tests;
