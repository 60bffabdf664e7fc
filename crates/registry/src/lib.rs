//! Runtime enum types.
//!
//! An enum type is a marker type implementing [`Enumeration`]. Its members are
//! singletons: each declared name is pooled once, gets the next ordinal in
//! declaration order and the binary flag `1 << ordinal`, and may carry a
//! [`Value`] plus constructor-attached data.
//!
//! # Lifecycle
//!
//! Nothing is built up front. The first access to a type (through
//! [`Enumeration::registry`], [`Enumeration::resolve`], [`Enumeration::get`] or
//! [`catalog::registry`]) runs its declaration once:
//!
//! 1. declared constants are pooled in order,
//! 2. the initializer (if any) may pool further members and record
//!    constructor arguments,
//! 3. the constructor (if any) runs once per member,
//!
//! after which the [`EnumRegistry`] is sealed and published in the
//! [`catalog`] for the rest of the process.
//!
//! # Lookups
//!
//! [`EnumRegistry::get`], [`EnumRegistry::by_value`],
//! [`EnumRegistry::by_ordinal`] and [`EnumRegistry::by_binary`] report misses
//! as `None`/[`Matches::Empty`]. [`EnumRegistry::resolve`] treats a missing
//! name as [`EnumError::UndeclaredMember`].
//!
//! # Limitations
//!
//! Flags are `u64`. Members past ordinal 63 get overlapping flags; the build
//! logs a warning for such types but does not reject them.

mod build;
pub mod catalog;
mod def;
mod error;
mod macros;
mod member;
mod registry;
mod value;

#[doc(hidden)]
pub use inventory;

pub use build::{Args, Initializer, MemberInit};
pub use def::{DuplicatePolicy, EnumDef, EnumKind, Enumeration};
pub use error::EnumError;
pub use member::{Candidate, Member};
pub use registry::{EnumRegistry, Matches};
pub use value::Value;
