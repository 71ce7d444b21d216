/// Upper bound (exclusive) of tag values that are really the high half of a double.
pub const FLOAT_MAX: u32 = 0xFFF0_0000;
/// First tag of the legacy typed-array kind range.
pub const TYPED_ARRAY_V1_MIN: u32 = 0xFFFF_0100;
/// Last tag of the legacy typed-array kind range.
pub const TYPED_ARRAY_V1_MAX: u32 = TYPED_ARRAY_V1_MIN + 8;

/// Reserved record tags of the structured-clone format.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[repr(u32)]
pub enum Tag {
	/// Stream header carrying the scope.
	Header = 0xFFF1_0000,
	/// `null`.
	Null = 0xFFFF_0000,
	/// `undefined`.
	Undefined = 0xFFFF_0001,
	/// Primitive boolean.
	Boolean = 0xFFFF_0002,
	/// Signed 32-bit integer.
	Int32 = 0xFFFF_0003,
	/// Primitive string.
	String = 0xFFFF_0004,
	/// `Date` object followed by its time value.
	DateObject = 0xFFFF_0005,
	/// `RegExp` object followed by its source string.
	RegExpObject = 0xFFFF_0006,
	/// Array container.
	ArrayObject = 0xFFFF_0007,
	/// Plain object container.
	ObjectObject = 0xFFFF_0008,
	/// `ArrayBuffer`.
	ArrayBufferObject = 0xFFFF_0009,
	/// Boxed boolean.
	BooleanObject = 0xFFFF_000A,
	/// Boxed string.
	StringObject = 0xFFFF_000B,
	/// Boxed number followed by its double.
	NumberObject = 0xFFFF_000C,
	/// Reference to an earlier object by table index.
	BackReferenceObject = 0xFFFF_000D,
	/// Typed array view.
	TypedArrayObject = 0xFFFF_0010,
	/// `Map` container.
	MapObject = 0xFFFF_0011,
	/// `Set` container.
	SetObject = 0xFFFF_0012,
	/// Closes the innermost open container.
	EndOfKeys = 0xFFFF_0013,
	/// `DataView`.
	DataViewObject = 0xFFFF_0015,
	/// Saved stack frame.
	SavedFrameObject = 0xFFFF_0016,
	/// Principals attached to a saved frame.
	JsPrincipals = 0xFFFF_0017,
	/// Null principals.
	NullJsPrincipals = 0xFFFF_0018,
	/// Reconstructed saved frame, system principals.
	ReconstructedSavedFramePrincipalsIsSystem = 0xFFFF_0019,
	/// Reconstructed saved frame, non-system principals.
	ReconstructedSavedFramePrincipalsIsNotSystem = 0xFFFF_001A,
	/// `SharedArrayBuffer`.
	SharedArrayBufferObject = 0xFFFF_001B,
	/// Shared WebAssembly memory.
	SharedWasmMemoryObject = 0xFFFF_001C,
	/// Primitive BigInt.
	BigInt = 0xFFFF_001D,
	/// Boxed BigInt.
	BigIntObject = 0xFFFF_001E,
	/// Transfer map header, only valid for live data.
	TransferMapHeader = 0xFFFF_0200,
	/// Pending transfer map entry.
	TransferMapPendingEntry = 0xFFFF_0201,
	/// Transferred array buffer.
	TransferMapArrayBuffer = 0xFFFF_0202,
	/// Transferred stored array buffer.
	TransferMapStoredArrayBuffer = 0xFFFF_0203,
}

impl Tag {
	const ALL: [Tag; 33] = [
		Tag::Header,
		Tag::Null,
		Tag::Undefined,
		Tag::Boolean,
		Tag::Int32,
		Tag::String,
		Tag::DateObject,
		Tag::RegExpObject,
		Tag::ArrayObject,
		Tag::ObjectObject,
		Tag::ArrayBufferObject,
		Tag::BooleanObject,
		Tag::StringObject,
		Tag::NumberObject,
		Tag::BackReferenceObject,
		Tag::TypedArrayObject,
		Tag::MapObject,
		Tag::SetObject,
		Tag::EndOfKeys,
		Tag::DataViewObject,
		Tag::SavedFrameObject,
		Tag::JsPrincipals,
		Tag::NullJsPrincipals,
		Tag::ReconstructedSavedFramePrincipalsIsSystem,
		Tag::ReconstructedSavedFramePrincipalsIsNotSystem,
		Tag::SharedArrayBufferObject,
		Tag::SharedWasmMemoryObject,
		Tag::BigInt,
		Tag::BigIntObject,
		Tag::TransferMapHeader,
		Tag::TransferMapPendingEntry,
		Tag::TransferMapArrayBuffer,
		Tag::TransferMapStoredArrayBuffer,
	];

	/// Look up a reserved tag by raw value.
	pub fn from_raw(raw: u32) -> Option<Self> {
		Self::ALL.into_iter().find(|tag| *tag as u32 == raw)
	}

	/// Raw 32-bit tag value.
	pub fn raw(self) -> u32 {
		self as u32
	}
}

/// One 8-byte stream record split into its tag and data halves.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Record {
	/// High 32 bits: a tag, or the top half of a double.
	pub tag: u32,
	/// Low 32 bits: tag payload.
	pub data: u32,
}

impl Record {
	/// Split a little-endian word into `(tag, data)`.
	pub fn from_word(word: u64) -> Self {
		Self {
			tag: (word >> 32) as u32,
			data: word as u32,
		}
	}

	/// Reassemble the original word.
	pub fn word(self) -> u64 {
		(u64::from(self.tag) << 32) | u64::from(self.data)
	}

	/// Reserved tag carried by this record, if any.
	pub fn known_tag(self) -> Option<Tag> {
		Tag::from_raw(self.tag)
	}

	/// `true` when the tag half is below [`FLOAT_MAX`], making the whole word a double.
	pub fn is_double(self) -> bool {
		self.tag < FLOAT_MAX
	}

	/// Reinterpret the record as a double.
	pub fn as_double(self) -> f64 {
		f64::from_bits(self.word())
	}

	/// `true` when the tag falls in the legacy typed-array kind range.
	pub fn is_legacy_typed_array(self) -> bool {
		(TYPED_ARRAY_V1_MIN..=TYPED_ARRAY_V1_MAX).contains(&self.tag)
	}
}
