use core::fmt;

use crate::Member;

/// Application-defined value carried by a member or passed to its constructor.
///
/// Comparison is strict: values of different variants are never equal, so
/// `Int(1)` does not match `Str("1")`.
#[derive(Debug, Clone, PartialEq)]
pub enum Value {
	/// Boolean value.
	Bool(bool),
	/// Integer value.
	Int(i64),
	/// Floating point value.
	Float(f64),
	/// String value.
	Str(Box<str>),
	/// Member of some (possibly other) enum type.
	Member(Member),
}

impl Value {
	/// Returns the boolean value if this is a `Bool` variant.
	pub fn as_bool(&self) -> Option<bool> {
		match self {
			Value::Bool(v) => Some(*v),
			_ => None,
		}
	}

	/// Returns the integer value if this is an `Int` variant.
	pub fn as_int(&self) -> Option<i64> {
		match self {
			Value::Int(v) => Some(*v),
			_ => None,
		}
	}

	/// Returns the float value if this is a `Float` variant.
	pub fn as_float(&self) -> Option<f64> {
		match self {
			Value::Float(v) => Some(*v),
			_ => None,
		}
	}

	/// Returns the string value if this is a `Str` variant.
	pub fn as_str(&self) -> Option<&str> {
		match self {
			Value::Str(v) => Some(v),
			_ => None,
		}
	}

	/// Returns the member if this is a `Member` variant.
	pub fn as_member(&self) -> Option<Member> {
		match self {
			Value::Member(m) => Some(*m),
			_ => None,
		}
	}

	/// Returns the type name of this value.
	pub fn type_name(&self) -> &'static str {
		match self {
			Value::Bool(_) => "bool",
			Value::Int(_) => "int",
			Value::Float(_) => "float",
			Value::Str(_) => "string",
			Value::Member(_) => "member",
		}
	}
}

impl fmt::Display for Value {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		match self {
			Value::Bool(v) => write!(f, "{v}"),
			Value::Int(v) => write!(f, "{v}"),
			Value::Float(v) => write!(f, "{v}"),
			Value::Str(v) => f.write_str(v),
			Value::Member(m) => write!(f, "{}::{}", m.kind(), m.name()),
		}
	}
}

impl From<bool> for Value {
	fn from(v: bool) -> Self {
		Value::Bool(v)
	}
}

impl From<i32> for Value {
	fn from(v: i32) -> Self {
		Value::Int(v.into())
	}
}

impl From<u32> for Value {
	fn from(v: u32) -> Self {
		Value::Int(v.into())
	}
}

impl From<i64> for Value {
	fn from(v: i64) -> Self {
		Value::Int(v)
	}
}

impl From<f64> for Value {
	fn from(v: f64) -> Self {
		Value::Float(v)
	}
}

impl From<&str> for Value {
	fn from(v: &str) -> Self {
		Value::Str(v.into())
	}
}

impl From<String> for Value {
	fn from(v: String) -> Self {
		Value::Str(v.into_boxed_str())
	}
}

impl From<Member> for Value {
	fn from(v: Member) -> Self {
		Value::Member(v)
	}
}
