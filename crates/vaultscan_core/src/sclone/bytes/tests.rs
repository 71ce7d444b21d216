use crate::sclone::bytes::{Cursor, padding_for};
use crate::sclone::{CloneError, ErrorKind};

#[test]
fn peek_is_idempotent_and_does_not_advance() {
	let bytes = 0x1122_3344_5566_7788_u64.to_le_bytes();
	let cursor = Cursor::new(&bytes);
	assert_eq!(cursor.peek_word().expect("peek"), 0x1122_3344_5566_7788);
	assert_eq!(cursor.peek_word().expect("peek again"), 0x1122_3344_5566_7788);
	assert_eq!(cursor.pos(), 0);
}

#[test]
fn read_word_advances_by_eight() {
	let mut bytes = Vec::new();
	bytes.extend_from_slice(&1_u64.to_le_bytes());
	bytes.extend_from_slice(&2_u64.to_le_bytes());

	let mut cursor = Cursor::new(&bytes);
	assert_eq!(cursor.read_word().expect("first"), 1);
	assert_eq!(cursor.pos(), 8);
	assert_eq!(cursor.read_word().expect("second"), 2);
	assert_eq!(cursor.remaining(), 0);
}

#[test]
fn short_word_is_eof() {
	let bytes = [0_u8; 5];
	let mut cursor = Cursor::new(&bytes);
	let err = cursor.read_word().expect_err("five bytes are not a word");
	assert!(matches!(err, CloneError::UnexpectedEof { at: 0, need: 8, rem: 5 }));
	assert_eq!(err.kind(), ErrorKind::UnexpectedEof);
}

#[test]
fn read_double_uses_word_bits() {
	let bytes = 1.5_f64.to_le_bytes();
	let mut cursor = Cursor::new(&bytes);
	assert_eq!(cursor.read_double().expect("double"), 1.5);
}

#[test]
fn padded_read_consumes_alignment() {
	let mut bytes = b"hello".to_vec();
	bytes.extend_from_slice(&[0, 0, 0]);
	bytes.extend_from_slice(&7_u64.to_le_bytes());

	let mut cursor = Cursor::new(&bytes);
	assert_eq!(cursor.read_padded(5).expect("padded"), b"hello");
	assert_eq!(cursor.pos(), 8);
	assert_eq!(cursor.read_word().expect("aligned word"), 7);
}

#[test]
fn padded_read_fails_on_missing_padding() {
	let bytes = b"hello\0".to_vec();
	let mut cursor = Cursor::new(&bytes);
	let err = cursor.read_padded(5).expect_err("padding is truncated");
	assert!(matches!(err, CloneError::UnexpectedEof { need: 3, rem: 1, .. }));
}

#[test]
fn padding_keeps_word_alignment() {
	assert_eq!(padding_for(0), 0);
	assert_eq!(padding_for(1), 7);
	assert_eq!(padding_for(8), 0);
	assert_eq!(padding_for(9), 7);
	assert_eq!(padding_for(14), 2);
}
