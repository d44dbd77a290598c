use foundry_rlp::{encode_to_reader, encode_to_vec, encode_to_writer, EncodeError, Item};
use hex_literal::hex;
use std::io::{self, Read, Write};

#[test]
fn writer_receives_full_encoding() {
    let value = Item::Array(vec![Item::Data(b"cat".to_vec()), Item::Data(b"dog".to_vec())]);
    let mut out = Vec::new();
    encode_to_writer(&value, &mut out).unwrap();
    assert_eq!(out, hex!("c88363617483646f67"));
    assert_eq!(out, encode_to_vec(&value).unwrap());
}

/// Sink that accepts a fixed number of bytes and then fails.
struct FailAfter {
    remaining: usize,
}

impl Write for FailAfter {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        if self.remaining == 0 {
            return Err(io::Error::new(io::ErrorKind::BrokenPipe, "sink closed"));
        }
        let n = buf.len().min(self.remaining);
        self.remaining -= n;
        Ok(n)
    }

    fn flush(&mut self) -> io::Result<()> {
        Ok(())
    }
}

#[test]
fn sink_errors_propagate() {
    let value = Item::Data(vec![0x61; 100]);
    let err = encode_to_writer(&value, &mut FailAfter { remaining: 10 }).unwrap_err();
    assert!(matches!(err, EncodeError::Io(_)));
}

#[test]
fn encode_errors_beat_sink_writes() {
    // A value that fails to encode produces no sink traffic at all.
    let negative = num_bigint::BigInt::from(-5);
    let mut out = Vec::new();
    let err = encode_to_writer(&negative, &mut out).unwrap_err();
    assert!(matches!(err, EncodeError::NegativeBigInt));
    assert!(out.is_empty());
}

#[test]
fn reader_reports_logical_size() {
    let value = Item::Array(vec![
        Item::Data(vec![0x61; 60]),
        Item::Array(vec![Item::Data(vec![])]),
    ]);
    let expected = encode_to_vec(&value).unwrap();
    let (size, mut reader) = encode_to_reader(&value).unwrap();
    assert_eq!(size, expected.len());
    let mut out = Vec::new();
    reader.read_to_end(&mut out).unwrap();
    assert_eq!(out, expected);
}
