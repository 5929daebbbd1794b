use palisade::http::buffer::{INITIAL_CAPACITY, RecvBuffer};

#[test]
fn append_accumulates_in_arrival_order() {
    let mut buf = RecvBuffer::new();
    buf.append(b"GET /").unwrap();
    buf.append(b" HTTP/1.1").unwrap();

    assert_eq!(buf.as_slice(), b"GET / HTTP/1.1");
    assert_eq!(buf.len(), 14);
}

#[test]
fn starts_empty_at_initial_capacity() {
    let buf = RecvBuffer::new();

    assert!(buf.is_empty());
    assert!(buf.capacity() >= INITIAL_CAPACITY);
}

#[test]
fn growth_at_least_doubles_capacity() {
    let mut buf = RecvBuffer::new();
    buf.append(&vec![0u8; INITIAL_CAPACITY]).unwrap();
    let before = buf.capacity();

    buf.append(b"x").unwrap();

    assert!(buf.capacity() >= before * 2);
}

#[test]
fn growth_preserves_previous_bytes() {
    let mut buf = RecvBuffer::new();
    let first: Vec<u8> = (0..INITIAL_CAPACITY).map(|i| (i % 251) as u8).collect();
    buf.append(&first).unwrap();

    buf.append(b"tail").unwrap();

    assert_eq!(&buf.as_slice()[..INITIAL_CAPACITY], &first[..]);
    assert_eq!(&buf.as_slice()[INITIAL_CAPACITY..], b"tail");
}

#[test]
fn oversized_append_grows_to_fit() {
    let mut buf = RecvBuffer::new();

    buf.append(&vec![7u8; INITIAL_CAPACITY * 3]).unwrap();

    assert_eq!(buf.len(), INITIAL_CAPACITY * 3);
    assert!(buf.capacity() >= INITIAL_CAPACITY * 3);
}
