//! Process-wide index of enum types.
//!
//! # Mental Model
//!
//! Every marker type owns one slot, keyed by [`TypeId`]. The first access to a
//! type builds its registry inside the slot and publishes it; later accesses
//! return the published registry.
//!
//! # Concurrency
//!
//! - Each slot is a reentrant lock around its build state, so a type is built
//!   exactly once even when first touched from several threads at once.
//! - A thread that re-enters a slot whose build it is still running gets
//!   [`EnumError::RecursiveBuild`] rather than a deadlock.
//! - Types whose initializers touch each other from different threads at the
//!   same time can still deadlock; initializers should only reach types that
//!   do not reach back.
//!
//! # Declarations
//!
//! Types submitted with [`crate::register_enumeration!`] (or declared with
//! [`crate::enumeration!`]) are also discoverable by name through [`find`],
//! before they have been built.

use core::any::TypeId;
use core::cell::RefCell;
use std::sync::LazyLock;

use indexmap::IndexMap;
use parking_lot::{Mutex, ReentrantMutex};
use rustc_hash::{FxBuildHasher, FxHashMap};

use crate::def::EnumDef;
use crate::{EnumError, EnumKind, EnumRegistry, Enumeration, Member, build};

enum BuildState {
	Vacant,
	Building,
	Ready(&'static EnumRegistry),
}

struct Slot {
	state: ReentrantMutex<RefCell<BuildState>>,
}

#[derive(Default)]
struct Catalog {
	slots: Mutex<FxHashMap<TypeId, &'static Slot>>,
	built: Mutex<IndexMap<EnumKind, &'static EnumRegistry, FxBuildHasher>>,
}

impl Catalog {
	fn slot(&self, id: TypeId) -> &'static Slot {
		*self.slots.lock().entry(id).or_insert_with(|| {
			Box::leak(Box::new(Slot {
				state: ReentrantMutex::new(RefCell::new(BuildState::Vacant)),
			}))
		})
	}
}

static CATALOG: LazyLock<Catalog> = LazyLock::new(Catalog::default);

/// Returns the registry of `E`, building it on first use.
///
/// A failed build is not cached: the next call runs the declaration again.
pub fn registry<E: Enumeration>() -> Result<&'static EnumRegistry, EnumError> {
	let kind = EnumKind::of::<E>();
	let slot = CATALOG.slot(kind.type_id());
	let state = slot.state.lock();

	match *state.borrow() {
		BuildState::Ready(registry) => return Ok(registry),
		BuildState::Building => return Err(EnumError::RecursiveBuild { ty: kind.name() }),
		BuildState::Vacant => {}
	}

	state.replace(BuildState::Building);
	let mut rollback = Rollback(Some(&*state));
	let registry = build::build(E::define(EnumDef::new(kind)))?;
	let registry: &'static EnumRegistry = Box::leak(Box::new(registry));
	CATALOG.built.lock().insert(kind, registry);
	state.replace(BuildState::Ready(registry));
	rollback.0 = None;
	Ok(registry)
}

/// Returns a slot to `Vacant` when its build ends early, by error or by
/// unwinding out of a declaration hook.
struct Rollback<'a>(Option<&'a RefCell<BuildState>>);

impl Drop for Rollback<'_> {
	fn drop(&mut self) {
		if let Some(state) = self.0 {
			state.replace(BuildState::Vacant);
		}
	}
}

/// Returns the registry of `kind` if it has been built.
pub fn registry_of(kind: EnumKind) -> Option<&'static EnumRegistry> {
	CATALOG.built.lock().get(&kind).copied()
}

/// Returns every registry built so far, in build-completion order.
pub fn registries() -> Vec<&'static EnumRegistry> {
	CATALOG.built.lock().values().copied().collect()
}

/// Returns the pool of every type built so far.
pub fn all_members() -> IndexMap<EnumKind, Vec<Member>, FxBuildHasher> {
	CATALOG
		.built
		.lock()
		.iter()
		.map(|(kind, registry)| (*kind, registry.members().collect()))
		.collect()
}

/// Name-addressable declaration of an enum type.
pub struct Declaration {
	name: &'static str,
	registry: fn() -> Result<&'static EnumRegistry, EnumError>,
}

impl Declaration {
	/// Creates the declaration of `E`.
	pub const fn of<E: Enumeration>() -> Self {
		Self {
			name: E::NAME,
			registry: registry::<E>,
		}
	}

	/// Returns the declared type name.
	pub fn name(&self) -> &'static str {
		self.name
	}

	/// Returns the type's registry, building it on first use.
	pub fn registry(&self) -> Result<&'static EnumRegistry, EnumError> {
		(self.registry)()
	}
}

inventory::collect!(Declaration);

static DECLARATIONS: LazyLock<FxHashMap<&'static str, &'static Declaration>> = LazyLock::new(|| {
	let mut map = FxHashMap::default();
	for decl in inventory::iter::<Declaration> {
		map.entry(decl.name).or_insert(decl);
	}
	map
});

/// Finds a declared type by name.
pub fn find(name: &str) -> Option<&'static Declaration> {
	DECLARATIONS.get(name).copied()
}

/// Returns every declared type, sorted by name.
pub fn declared() -> Vec<&'static Declaration> {
	let mut decls: Vec<_> = DECLARATIONS.values().copied().collect();
	decls.sort_by_key(|d| d.name);
	decls
}
