use super::*;
use crate::node::{Identifier, Node};

struct ParseTestCase<'a> {
    expr: &'a str,
    expected: Node,
    errors: Vec<SyntaxErrorCause>,
}

impl<'a> ParseTestCase<'a> {
    pub fn run(&self) {
        let (output, errors) = Parser::new(self.expr).parse();
        let causes: Vec<SyntaxErrorCause> = errors.iter().map(SyntaxError::cause).collect();

        if causes != self.errors {
            panic!(
                "when parsing {:?}.\nexpected errors={:#?}\ngot={:#?}",
                self.expr, self.errors, causes
            );
        }

        if output != self.expected {
            panic!(
                "when parsing {:?}.\nexpected={:#?}\ngot={:#?}",
                self.expr, self.expected, output
            );
        }
    }
}

fn list(entries: Vec<Identifier>) -> Node {
    Node::Identifiers(entries)
}

fn ident(value: &str) -> Identifier {
    Identifier::new(value)
}

fn group(value: &str, entries: Vec<Identifier>) -> Identifier {
    Identifier::with_child(value, list(entries))
}

#[test]
fn test_parse_empty() {
    ParseTestCase {
        expr: "",
        expected: list(vec![]),
        errors: vec![],
    }
    .run();
}

#[test]
fn test_parse_only_spaces() {
    ParseTestCase {
        expr: "    ",
        expected: list(vec![]),
        errors: vec![],
    }
    .run();
}

#[test]
fn test_parse_flat() {
    ParseTestCase {
        expr: "a,b,c",
        expected: list(vec![ident("a"), ident("b"), ident("c")]),
        errors: vec![],
    }
    .run();
}

#[test]
fn test_parse_group() {
    ParseTestCase {
        expr: "a(b,c)",
        expected: list(vec![group("a", vec![ident("b"), ident("c")])]),
        errors: vec![],
    }
    .run();
}

#[test]
fn test_parse_nested() {
    ParseTestCase {
        expr: "id,name,address(street,number),age",
        expected: list(vec![
            ident("id"),
            ident("name"),
            group("address", vec![ident("street"), ident("number")]),
            ident("age"),
        ]),
        errors: vec![],
    }
    .run();
}

#[test]
fn test_parse_deeply_nested() {
    ParseTestCase {
        expr: "a(b(c(d)),e)",
        expected: list(vec![group(
            "a",
            vec![group("b", vec![group("c", vec![ident("d")])]), ident("e")],
        )]),
        errors: vec![],
    }
    .run();
}

#[test]
fn test_parse_whitespace() {
    ParseTestCase {
        expr: "  id ,  name , address ( street , number ) , age  ",
        expected: list(vec![
            ident("id"),
            ident("name"),
            group("address", vec![ident("street"), ident("number")]),
            ident("age"),
        ]),
        errors: vec![],
    }
    .run();
}

#[test]
fn test_parse_json_key_chars() {
    ParseTestCase {
        expr: "my-name,1,#",
        expected: list(vec![ident("my-name"), ident("1"), ident("#")]),
        errors: vec![],
    }
    .run();
}

#[test]
fn test_parse_empty_group() {
    ParseTestCase {
        expr: "a()",
        expected: list(vec![group("a", vec![])]),
        errors: vec![],
    }
    .run();
}

#[test]
fn test_parse_trailing_separator() {
    ParseTestCase {
        expr: "a,b,",
        expected: list(vec![ident("a"), ident("b")]),
        errors: vec![],
    }
    .run();
}

#[test]
fn test_parse_duplicates_kept() {
    ParseTestCase {
        expr: "a,a(b)",
        expected: list(vec![ident("a"), group("a", vec![ident("b")])]),
        errors: vec![],
    }
    .run();
}

#[test]
fn test_parse_stray_closing_parenthesis_ends_input() {
    ParseTestCase {
        expr: "a),b",
        expected: list(vec![ident("a")]),
        errors: vec![],
    }
    .run();
}

#[test]
fn test_parse_unclosed_group() {
    ParseTestCase {
        expr: "a(b",
        expected: list(vec![group("a", vec![ident("b")])]),
        errors: vec![SyntaxErrorCause::ExpectedClosingParenthesis],
    }
    .run();
}

#[test]
fn test_parse_leading_separator() {
    ParseTestCase {
        expr: ",a",
        expected: list(vec![ident("a")]),
        errors: vec![SyntaxErrorCause::ExpectedIdentifier],
    }
    .run();
}

#[test]
fn test_parse_double_separator() {
    ParseTestCase {
        expr: "a,,b",
        expected: list(vec![ident("a"), ident("b")]),
        errors: vec![SyntaxErrorCause::ExpectedIdentifier],
    }
    .run();
}

#[test]
fn test_parse_missing_separator() {
    ParseTestCase {
        expr: "a  b",
        expected: list(vec![ident("a"), ident("b")]),
        errors: vec![SyntaxErrorCause::MissingSeparatorBetweenIdentifiers],
    }
    .run();
}

#[test]
fn test_parse_missing_separators_in_group() {
    ParseTestCase {
        expr: "x(a b c),y",
        expected: list(vec![group("x", vec![ident("a"), ident("b"), ident("c")]), ident("y")]),
        errors: vec![
            SyntaxErrorCause::MissingSeparatorBetweenIdentifiers,
            SyntaxErrorCause::MissingSeparatorBetweenIdentifiers,
        ],
    }
    .run();
}

#[test]
fn test_parse_group_without_name() {
    // recovery stops at the `)`, which then closes the top-level list
    ParseTestCase {
        expr: "(a),b",
        expected: list(vec![]),
        errors: vec![SyntaxErrorCause::ExpectedIdentifier],
    }
    .run();
}

#[test]
fn test_parse_group_after_group() {
    ParseTestCase {
        expr: "a(b)(c),d",
        expected: list(vec![group("a", vec![ident("b")])]),
        errors: vec![
            SyntaxErrorCause::MissingSeparatorBetweenIdentifiers,
            SyntaxErrorCause::ExpectedIdentifier,
        ],
    }
    .run();
}

#[test]
fn test_parse_tab_is_illegal() {
    ParseTestCase {
        expr: "a\tb,c",
        expected: list(vec![ident("a"), ident("c")]),
        errors: vec![
            SyntaxErrorCause::MissingSeparatorBetweenIdentifiers,
            SyntaxErrorCause::ExpectedIdentifier,
        ],
    }
    .run();
}

#[test]
fn test_parse_newline_only() {
    ParseTestCase {
        expr: "\n",
        expected: list(vec![]),
        errors: vec![SyntaxErrorCause::ExpectedIdentifier],
    }
    .run();
}

#[test]
fn test_error_positions() {
    //when
    let (_, errors) = Parser::new("a b,(c").parse();

    //then
    let positions: Vec<(usize, SyntaxErrorCause)> =
        errors.iter().map(|e| (e.pos(), e.cause())).collect();
    assert_eq!(
        positions,
        vec![
            (2, SyntaxErrorCause::MissingSeparatorBetweenIdentifiers),
            (4, SyntaxErrorCause::ExpectedIdentifier),
        ]
    );
}

#[test]
fn test_long_run_without_separators_terminates() {
    //given
    let count = 5_000;
    let expr = vec!["f"; count].join(" ");

    //when
    let (output, errors) = Parser::new(&expr).parse();

    //then
    assert_eq!(output.identifiers().len(), count);
    assert_eq!(errors.len(), count - 1);
    assert!(errors
        .iter()
        .all(|e| e.cause() == SyntaxErrorCause::MissingSeparatorBetweenIdentifiers));
}

#[test]
fn test_long_run_of_illegal_tokens_terminates() {
    //given
    let expr = "a\t\r\n".repeat(2_000);

    //when
    let (output, errors) = Parser::new(&expr).parse();

    //then
    assert_eq!(output.identifiers().len(), 1);
    assert_eq!(
        errors.iter().map(SyntaxError::cause).collect::<Vec<_>>(),
        vec![
            SyntaxErrorCause::MissingSeparatorBetweenIdentifiers,
            SyntaxErrorCause::ExpectedIdentifier,
        ]
    );
}

#[test]
fn test_deeply_nested_unterminated_groups_terminate() {
    //given
    let depth = 500;
    let expr = "a(".repeat(depth);

    //when
    let (output, errors) = Parser::new(&expr).parse();

    //then
    assert_eq!(errors.len(), depth);
    assert!(errors
        .iter()
        .all(|e| e.cause() == SyntaxErrorCause::ExpectedClosingParenthesis));

    let mut node = &output;
    for _ in 0..depth {
        let selected = node.select_field("a").expect("nested identifier");
        node = selected.child;
    }
    assert_eq!(node, &list(vec![]));
}

#[test]
fn test_very_deep_nesting() {
    //given
    let depth = 200_000;
    let closed = format!("{}b{}", "a(".repeat(depth), ")".repeat(depth));
    let unclosed = "a(".repeat(depth);

    //when
    let (closed_output, closed_errors) = Parser::new(&closed).parse();
    let (unclosed_output, unclosed_errors) = Parser::new(&unclosed).parse();

    //then
    assert!(closed_errors.is_empty());
    assert_eq!(unclosed_errors.len(), depth);

    let mut node = &closed_output;
    for _ in 0..depth {
        node = node.select_field("a").expect("nested identifier").child;
    }
    assert!(node.is_selected("b"));
    assert_eq!(node.identifiers().len(), 1);

    let mut node = &unclosed_output;
    for _ in 0..depth {
        node = node.select_field("a").expect("nested identifier").child;
    }
    assert!(node.identifiers().is_empty());
}

#[test]
fn test_rendering_round_trips() {
    for expr in ["a,b(c,d(e)),f", "x()", "my-name,1,#(q)"] {
        let (output, errors) = Parser::new(expr).parse();
        assert!(errors.is_empty());
        assert_eq!(output.to_string(), expr);
    }
}
