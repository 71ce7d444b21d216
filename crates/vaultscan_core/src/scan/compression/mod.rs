use std::io::Read;

use crate::scan::{Result, ScanError};

/// Stream identifier chunk opening a framed Snappy stream.
pub const SNAPPY_FRAME_MAGIC: [u8; 10] = [0xFF, 0x06, 0x00, 0x00, b's', b'N', b'a', b'P', b'p', b'Y'];

/// Snappy container detected for a payload.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Compression {
	/// Raw block format, as IndexedDB stores rows.
	Raw,
	/// Framed stream format.
	Framed,
}

impl Compression {
	/// Detect the container from the leading bytes.
	pub fn detect(raw: &[u8]) -> Self {
		if raw.starts_with(&SNAPPY_FRAME_MAGIC) { Self::Framed } else { Self::Raw }
	}

	/// Render compression mode as a stable lowercase label.
	pub fn as_str(self) -> &'static str {
		match self {
			Self::Raw => "raw",
			Self::Framed => "framed",
		}
	}
}

/// Decompress a Snappy payload, refusing output larger than `limit` bytes.
pub fn decompress(raw: &[u8], limit: usize) -> Result<Vec<u8>> {
	match Compression::detect(raw) {
		Compression::Raw => decompress_raw(raw, limit),
		Compression::Framed => decompress_framed(raw, limit),
	}
}

fn decompress_raw(raw: &[u8], limit: usize) -> Result<Vec<u8>> {
	let claimed = snap::raw::decompress_len(raw)?;
	if claimed > limit {
		return Err(ScanError::DecompressedTooLarge { limit, claimed });
	}
	Ok(snap::raw::Decoder::new().decompress_vec(raw)?)
}

fn decompress_framed(raw: &[u8], limit: usize) -> Result<Vec<u8>> {
	let mut decoder = snap::read::FrameDecoder::new(raw);
	let mut out = Vec::new();
	let mut buf = [0_u8; 8192];

	loop {
		let read = decoder.read(&mut buf)?;
		if read == 0 {
			break;
		}

		if out.len() + read > limit {
			return Err(ScanError::DecompressedTooLarge {
				limit,
				claimed: out.len() + read,
			});
		}

		out.extend_from_slice(&buf[..read]);
	}

	Ok(out)
}
