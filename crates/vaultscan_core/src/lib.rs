//! Public library API for decoding persisted structured-clone streams and scanning
//! browser object stores for wallet vaults.

/// Structured-clone stream decoding: cursor, tags, value graph, and decoder.
pub mod sclone;
/// Object-store scanning: discovery, row extraction, decompression, and vault inspection.
pub mod scan;
