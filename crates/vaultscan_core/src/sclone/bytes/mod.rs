use crate::sclone::{CloneError, Result};

/// Width of one stream record in bytes.
pub const WORD: usize = 8;

/// Forward-only cursor over an immutable byte slice, reading 8-byte little-endian records.
pub struct Cursor<'a> {
	bytes: &'a [u8],
	pos: usize,
}

impl<'a> Cursor<'a> {
	/// Create a cursor at position 0.
	pub fn new(bytes: &'a [u8]) -> Self {
		Self { bytes, pos: 0 }
	}

	/// Return current byte offset.
	pub fn pos(&self) -> usize {
		self.pos
	}

	/// Return remaining unread bytes.
	pub fn remaining(&self) -> usize {
		self.bytes.len().saturating_sub(self.pos)
	}

	fn eof(&self, need: usize) -> CloneError {
		CloneError::UnexpectedEof {
			at: self.pos,
			need,
			rem: self.remaining(),
		}
	}

	/// Read exactly `n` bytes and advance cursor.
	pub fn read_exact(&mut self, n: usize) -> Result<&'a [u8]> {
		if n > self.remaining() {
			return Err(self.eof(n));
		}

		let start = self.pos;
		self.pos += n;
		Ok(&self.bytes[start..self.pos])
	}

	/// Return the next 64-bit word without advancing.
	pub fn peek_word(&self) -> Result<u64> {
		let raw = self.bytes.get(self.pos..self.pos + WORD).ok_or_else(|| self.eof(WORD))?;
		let mut buf = [0_u8; WORD];
		buf.copy_from_slice(raw);
		Ok(u64::from_le_bytes(buf))
	}

	/// Read the next 64-bit word.
	pub fn read_word(&mut self) -> Result<u64> {
		let word = self.peek_word()?;
		self.pos += WORD;
		Ok(word)
	}

	/// Read a little-endian IEEE-754 double occupying one word.
	pub fn read_double(&mut self) -> Result<f64> {
		Ok(f64::from_bits(self.read_word()?))
	}

	/// Read exactly `n` payload bytes, then drop the padding up to the next word boundary.
	pub fn read_padded(&mut self, n: usize) -> Result<&'a [u8]> {
		let payload = self.read_exact(n)?;
		let _ = self.read_exact(padding_for(n))?;
		Ok(payload)
	}
}

/// Number of padding bytes following an `n`-byte payload.
pub fn padding_for(n: usize) -> usize {
	(WORD - n % WORD) % WORD
}

#[cfg(test)]
mod tests;
