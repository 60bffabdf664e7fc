/// Errors raised while building or strictly resolving enum types.
///
/// Lookup misses are not errors: [`crate::EnumRegistry::get`] and the `by_*`
/// lookups return `None` instead.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum EnumError {
	/// A member name was resolved that its type never declared.
	#[error("enum {ty}::{name} could not be found")]
	UndeclaredMember { ty: &'static str, name: String },

	/// Constructor arguments were supplied twice to the same member.
	#[error("cannot re-construct {ty}::{name}, arguments were already provided by the initializer")]
	DuplicateArguments { ty: &'static str, name: String },

	/// A constant name was declared twice under [`crate::DuplicatePolicy::Reject`].
	#[error("constant {ty}::{name} is declared more than once")]
	DuplicateConstant { ty: &'static str, name: String },

	/// A type was accessed from its own build, directly or through another type.
	#[error("enum type {ty} was accessed while it is still being built")]
	RecursiveBuild { ty: &'static str },
}
