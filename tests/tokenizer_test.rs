//! Tests for the expression tokenizer

use rstest::rstest;

use exprtree::domain::{is_numeric, parse, tokenize, DomainError, TokenKind};
use exprtree::util::testing;

#[ctor::ctor]
fn init() {
    testing::init_test_setup();
}

#[rstest]
#[case("a + b * c - d")]
#[case("(a + b * c - d)")]
#[case("a + (b * c - d)")]
#[case("a + ((b * c) - d)")]
#[case("(a + ((b * c) - d))")]
#[case("(a + b) * (c - d)")]
#[case("((a + b) * (c - d))")]
#[case("(10 + 200) * (3 - 45)")]
#[case("1 2 + 3 *")]
fn given_documented_expressions_when_parsing_then_tokens_concatenate_to_input(
    #[case] expression: &str,
) {
    let tokens = parse(expression).unwrap();
    assert!(tokens.iter().all(|t| !t.is_empty()));
    assert_eq!(tokens.concat(), expression.replace(' ', ""));
}

#[test]
fn given_reference_expression_when_parsing_then_matches_expected_tokens() {
    assert_eq!(
        parse("(1 + 2) * (a - 12)").unwrap(),
        vec!["(", "1", "+", "2", ")", "*", "(", "a", "-", "12", ")"]
    );
}

#[test]
fn given_many_tokens_when_parsing_then_no_capacity_limit() {
    let expression = vec!["1"; 500].join(" + ");
    let tokens = parse(&expression).unwrap();
    assert_eq!(tokens.len(), 999);
}

#[test]
fn given_tokens_when_checking_numeric_then_only_digit_runs_match() {
    let tokens = tokenize("(7 * x) / 42").unwrap();
    for token in &tokens {
        assert_eq!(
            is_numeric(token.as_str()),
            token.kind() == TokenKind::Number,
            "{token}"
        );
    }
}

#[test]
fn given_unknown_character_when_parsing_then_error_names_character_and_position() {
    let err = parse("a % b").unwrap_err();
    assert_eq!(
        err,
        DomainError::UnrecognizedCharacter {
            character: '%',
            position: 2
        }
    );
    assert_eq!(err.to_string(), "unknown character '%' at position 2");
}

#[test]
fn given_error_after_valid_prefix_when_parsing_then_whole_call_fails() {
    assert!(parse("1 + 2 = 3").is_err());
}

#[test]
fn given_arabic_indic_digits_when_tokenizing_then_single_number_token() {
    let tokens = tokenize("٣٤ + 1").unwrap();
    assert_eq!(tokens.len(), 3);
    assert_eq!(tokens[0].kind(), TokenKind::Number);
    assert_eq!(tokens[0].as_str(), "٣٤");
    assert!(is_numeric(tokens[0].as_str()));
}
