use tally_registry::EnumError;

/// Errors raised by [`crate::EnumSet`] factories and operations.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum SetError {
	/// No enum type was declared under the given name.
	#[error("provided type \"{name}\" is not a valid enum type")]
	InvalidType { name: String },

	/// An operand belongs to a different enum type than the set.
	#[error("expected members of {expected}, found {found}")]
	TypeMismatch {
		expected: &'static str,
		found: &'static str,
	},

	/// Building the bound type failed.
	#[error(transparent)]
	Registry(#[from] EnumError),
}
