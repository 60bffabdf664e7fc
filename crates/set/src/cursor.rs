use tally_registry::Member;

use crate::EnumSet;

/// Positional cursor over an [`EnumSet`].
///
/// The position may move outside the set in either direction; it is then
/// invalid until moved back with [`rewind`](Self::rewind),
/// [`seek`](Self::seek) or [`end`](Self::end). As an [`Iterator`] the cursor
/// yields the current element and advances.
#[derive(Debug, Clone)]
pub struct Cursor<'a> {
	set: &'a EnumSet,
	pos: isize,
}

impl<'a> Cursor<'a> {
	/// Creates a cursor at the first element of `set`.
	pub fn new(set: &'a EnumSet) -> Self {
		Self { set, pos: 0 }
	}

	/// Moves to the first element.
	pub fn rewind(&mut self) {
		self.pos = 0;
	}

	/// Moves to the last element.
	pub fn end(&mut self) {
		self.pos = self.set.len() as isize - 1;
	}

	/// Moves one element forward.
	pub fn advance(&mut self) {
		self.pos += 1;
	}

	/// Moves one element back.
	pub fn retreat(&mut self) {
		self.pos -= 1;
	}

	/// Moves to `pos`.
	pub fn seek(&mut self, pos: usize) {
		self.pos = pos as isize;
	}

	/// Returns true if the cursor is on an element.
	pub fn valid(&self) -> bool {
		self.key().is_some()
	}

	/// Returns the position, if the cursor is on an element.
	pub fn key(&self) -> Option<usize> {
		usize::try_from(self.pos).ok().filter(|&pos| pos < self.set.len())
	}

	/// Returns the element under the cursor.
	pub fn current(&self) -> Option<Member> {
		self.set.get(self.key()?)
	}
}

impl Iterator for Cursor<'_> {
	type Item = Member;

	fn next(&mut self) -> Option<Member> {
		let member = self.current()?;
		self.advance();
		Some(member)
	}
}
