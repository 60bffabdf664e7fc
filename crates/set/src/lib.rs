//! Ordered collections of enum members.
//!
//! An [`EnumSet`] is bound to one enum type and holds members of that type in
//! insertion order. It offers union through [`EnumSet::add`], difference
//! through [`EnumSet::remove`], intersection through [`EnumSet::retain`], and
//! factories for complements, ordinal ranges and flag masks.
//!
//! Despite the name, a set is an ordered bag: `add` does not deduplicate.

mod cursor;
mod error;
mod items;
mod set;

pub use cursor::Cursor;
pub use error::SetError;
pub use items::EnumItems;
pub use set::EnumSet;
