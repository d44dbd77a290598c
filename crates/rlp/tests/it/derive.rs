use foundry_rlp::{encode_to_vec, RlpEncodable};
use hex_literal::hex;

#[derive(RlpEncodable)]
struct Pair {
    number: u64,
    payload: Vec<u8>,
}

#[test]
fn struct_fields_in_declaration_order() {
    let pair = Pair { number: 1024, payload: vec![0xBE, 0xEF] };
    assert_eq!(encode_to_vec(&pair).unwrap(), hex!("c682040082beef"));
}

#[derive(RlpEncodable)]
struct Outer {
    inner: Pair,
    tag: u64,
}

#[test]
fn nested_structs() {
    let outer = Outer { inner: Pair { number: 1024, payload: vec![0xBE, 0xEF] }, tag: 1 };
    assert_eq!(encode_to_vec(&outer).unwrap(), hex!("c8c682040082beef01"));
}

#[test]
fn absent_struct_is_empty_list() {
    assert_eq!(encode_to_vec(&Option::<Pair>::None).unwrap(), hex!("c0"));
}

#[derive(RlpEncodable)]
struct Frame {
    kind: u64,
    #[rlp(tail)]
    rest: Vec<String>,
}

#[test]
fn tail_splices_into_enclosing_list() {
    let frame = Frame { kind: 1, rest: vec!["cat".into(), "dog".into()] };
    // One level of framing: the tail elements sit directly in the struct's
    // list, exactly as if they were declared as individual fields.
    assert_eq!(encode_to_vec(&frame).unwrap(), hex!("c9018363617483646f67"));

    let empty = Frame { kind: 1, rest: vec![] };
    assert_eq!(encode_to_vec(&empty).unwrap(), hex!("c101"));
}

#[derive(RlpEncodable)]
struct WithSkip {
    kept: u64,
    #[rlp(skip)]
    #[allow(dead_code)]
    ignored: u64,
}

#[test]
fn skipped_fields_are_omitted() {
    let value = WithSkip { kept: 1, ignored: 2 };
    assert_eq!(encode_to_vec(&value).unwrap(), hex!("c101"));
}

#[derive(RlpEncodable)]
struct Wrapper<T> {
    inner: T,
}

#[test]
fn generic_structs() {
    assert_eq!(encode_to_vec(&Wrapper { inner: 1024u64 }).unwrap(), hex!("c3820400"));
    assert_eq!(encode_to_vec(&Wrapper { inner: "dog" }).unwrap(), hex!("c483646f67"));
}

#[derive(RlpEncodable)]
struct Node {
    value: u64,
    next: Option<Box<Node>>,
}

#[test]
fn recursive_structs() {
    let chain = Node { value: 2, next: Some(Box::new(Node { value: 1, next: None })) };
    assert_eq!(encode_to_vec(&chain).unwrap(), hex!("c402c201c0"));
}

#[derive(RlpEncodable)]
struct Point(u64, u64);

#[test]
fn tuple_structs() {
    assert_eq!(encode_to_vec(&Point(1, 2)).unwrap(), hex!("c20102"));
}

#[derive(RlpEncodable)]
struct OptionalFields {
    id: u64,
    name: Option<String>,
    data: Option<Vec<u64>>,
}

#[test]
fn optional_fields_use_shape_defaults() {
    let value = OptionalFields { id: 1, name: None, data: None };
    // Absent string collapses to the empty string, absent sequence to the
    // empty list.
    assert_eq!(encode_to_vec(&value).unwrap(), hex!("c30180c0"));
}
