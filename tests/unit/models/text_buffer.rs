use super::*;

fn buffer(text: &str) -> TextBuffer {
    let mut buffer = TextBuffer::new();
    buffer.rope_mut().insert(0, text);
    buffer
}

#[test]
fn test_empty() {
    let buffer = TextBuffer::new();
    assert!(buffer.is_empty());
    assert_eq!(buffer.text(), "");
    assert_eq!(buffer.len_chars(), 0);
}

#[test]
fn test_len_counts_chars() {
    let buffer = buffer("a中文\r\n");
    assert!(!buffer.is_empty());
    assert_eq!(buffer.len_chars(), 5);
    assert_eq!(buffer.text(), "a中文\r\n");
}

#[test]
fn test_slice_clamps_range() {
    let buffer = buffer("abcdef");
    assert_eq!(buffer.slice(2..4), "cd");
    assert_eq!(buffer.slice(4..100), "ef");
    assert_eq!(buffer.slice(10..12), "");
    assert_eq!(buffer.clamp(5..2), 2..2);
}

#[test]
fn test_slice_to_cow_borrows_single_chunk() {
    let rope = Rope::from_str("hello");
    assert!(matches!(slice_to_cow(rope.slice(1..4)), Cow::Borrowed("ell")));
}
