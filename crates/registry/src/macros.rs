//! Declaration macros.

/// Declares a constant-only enum type.
///
/// Expands to a unit marker struct, its [`Enumeration`](crate::Enumeration)
/// impl with the constants in the order written, and a name registration
/// (see [`register_enumeration!`](crate::register_enumeration)).
///
/// ```ignore
/// tally_registry::enumeration! {
/// 	pub Topping {
/// 		CHOCOLATE = "chocolate",
/// 		STRAWBERRY = "strawberry",
/// 		BLACKBERRY = "blackberry",
/// 	}
/// }
/// ```
///
/// A constant written without `= value` is declared without a value.
#[macro_export]
macro_rules! enumeration {
	(
		$(#[$attr:meta])*
		$vis:vis $name:ident {
			$($member:ident $(= $value:expr)?),* $(,)?
		}
	) => {
		$(#[$attr])*
		#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
		$vis struct $name;

		impl $crate::Enumeration for $name {
			const NAME: &'static str = stringify!($name);

			fn define(def: $crate::EnumDef) -> $crate::EnumDef {
				$(let def = $crate::__enum_constant!(def, $member $(, $value)?);)*
				def
			}
		}

		$crate::register_enumeration!($name);
	};
}

/// Makes an [`Enumeration`](crate::Enumeration) discoverable by name through
/// [`catalog::find`](crate::catalog::find).
#[macro_export]
macro_rules! register_enumeration {
	($ty:ty) => {
		$crate::inventory::submit! { $crate::catalog::Declaration::of::<$ty>() }
	};
}

#[macro_export]
#[doc(hidden)]
macro_rules! __enum_constant {
	($def:ident, $member:ident, $value:expr) => {
		$def.constant(stringify!($member), $value)
	};
	($def:ident, $member:ident) => {
		$def.member(stringify!($member))
	};
}
