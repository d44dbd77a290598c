use foundry_rlp::{encode_to_reader, encode_to_vec, Item};
use proptest::prelude::*;
use std::io::Read;

fn item_strategy() -> impl Strategy<Value = Item> {
    let leaf = proptest::collection::vec(any::<u8>(), 0..70).prop_map(Item::Data);
    leaf.prop_recursive(3, 48, 6, |inner| {
        proptest::collection::vec(inner, 0..6).prop_map(Item::Array)
    })
}

fn be_to_usize(bytes: &[u8]) -> usize {
    bytes.iter().fold(0usize, |acc, b| acc << 8 | *b as usize)
}

fn list_header(payload_len: usize) -> Vec<u8> {
    if payload_len < 56 {
        vec![0xC0 + payload_len as u8]
    } else {
        let be = &payload_len.to_be_bytes()[payload_len.leading_zeros() as usize / 8..];
        let mut out = vec![0xF7 + be.len() as u8];
        out.extend_from_slice(be);
        out
    }
}

/// Minimal structural decoder, enough to check the encoder round-trips.
fn decode_item(buf: &mut &[u8]) -> Item {
    let first = buf[0];
    *buf = &buf[1..];
    match first {
        0x00..=0x7F => Item::Data(vec![first]),
        0x80..=0xB7 => {
            let (data, rest) = buf.split_at((first - 0x80) as usize);
            *buf = rest;
            Item::Data(data.to_vec())
        }
        0xB8..=0xBF => {
            let (len_bytes, rest) = buf.split_at((first - 0xB7) as usize);
            let (data, rest) = rest.split_at(be_to_usize(len_bytes));
            *buf = rest;
            Item::Data(data.to_vec())
        }
        0xC0..=0xF7 => {
            let (mut payload, rest) = buf.split_at((first - 0xC0) as usize);
            *buf = rest;
            let mut items = Vec::new();
            while !payload.is_empty() {
                items.push(decode_item(&mut payload));
            }
            Item::Array(items)
        }
        _ => {
            let (len_bytes, rest) = buf.split_at((first - 0xF7) as usize);
            let (mut payload, rest) = rest.split_at(be_to_usize(len_bytes));
            *buf = rest;
            let mut items = Vec::new();
            while !payload.is_empty() {
                items.push(decode_item(&mut payload));
            }
            Item::Array(items)
        }
    }
}

proptest! {
    #[test]
    fn encoding_is_deterministic(item in item_strategy()) {
        prop_assert_eq!(encode_to_vec(&item).unwrap(), encode_to_vec(&item).unwrap());
    }

    #[test]
    fn reader_agrees_with_vec(item in item_strategy()) {
        let bytes = encode_to_vec(&item).unwrap();
        let (size, mut reader) = encode_to_reader(&item).unwrap();
        prop_assert_eq!(size, bytes.len());
        let mut streamed = Vec::new();
        reader.read_to_end(&mut streamed).unwrap();
        prop_assert_eq!(streamed, bytes);
    }

    #[test]
    fn uint_payload_has_no_leading_zero(i in 128u64..) {
        let out = encode_to_vec(&i).unwrap();
        prop_assert!(out.len() >= 2);
        prop_assert_ne!(out[1], 0);
        prop_assert_eq!(be_to_usize(&out[1..]) as u64, i);
    }

    #[test]
    fn list_encoding_splices_child_encodings(
        children in proptest::collection::vec(item_strategy(), 0..5),
    ) {
        let mut payload = Vec::new();
        for child in &children {
            payload.extend(encode_to_vec(child).unwrap());
        }
        let mut expected = list_header(payload.len());
        expected.extend_from_slice(&payload);
        prop_assert_eq!(encode_to_vec(&Item::Array(children)).unwrap(), expected);
    }

    #[test]
    fn round_trips_through_decoder(item in item_strategy()) {
        let bytes = encode_to_vec(&item).unwrap();
        let mut view = &bytes[..];
        let decoded = decode_item(&mut view);
        prop_assert!(view.is_empty());
        prop_assert_eq!(decoded, item);
    }
}
