#![no_main]

use libfuzzer_sys::fuzz_target;
use fieldselect::dsl::{TokenKind, Tokenizer};

fuzz_target!(|data: &str| {
    let mut tokenizer = Tokenizer::new(data);
    while !tokenizer.next_token().is(TokenKind::Eof) {}

    let (node, errors) = fieldselect::parse_partial(data);
    if errors.is_empty() {
        assert_eq!(fieldselect::parse(&node.to_string()).ok(), Some(node));
    }
});
