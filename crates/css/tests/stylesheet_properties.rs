use css::{PropertyContext, Virtualization, lex_css, sanitize_css_property, sanitize_stylesheet};
use proptest::prelude::*;
use std::time::{Duration, Instant};

fn css_soup() -> impl Strategy<Value = String> {
    let piece = prop_oneof![
        Just("p".to_string()),
        Just("a.x".to_string()),
        Just("#id".to_string()),
        Just(",".to_string()),
        Just(">".to_string()),
        Just("{".to_string()),
        Just("}".to_string()),
        Just("[".to_string()),
        Just("]".to_string()),
        Just("(".to_string()),
        Just(")".to_string()),
        Just(":".to_string()),
        Just(";".to_string()),
        Just("color".to_string()),
        Just("red".to_string()),
        Just("1px".to_string()),
        Just("url(x".to_string()),
        Just("@media".to_string()),
        Just("@import".to_string()),
        Just("@keyframes".to_string()),
        Just("</style>".to_string()),
        Just("<!--".to_string()),
        Just("/*".to_string()),
        Just("\"".to_string()),
        Just("\\".to_string()),
        "[a-z0-9 '\"\\\\<>]{0,6}",
    ];
    proptest::collection::vec(piece, 0..32).prop_map(|pieces| pieces.join(" "))
}

proptest! {
    #[test]
    fn output_never_contains_markup(input in css_soup()) {
        let out = sanitize_stylesheet(None, &input, &Virtualization::default(), None);
        prop_assert!(!out.contains('<'), "{input:?} -> {out:?}");
    }

    #[test]
    fn lexer_tokens_cover_the_input(input in css_soup()) {
        let tokens = lex_css(&input);
        prop_assert!(tokens.iter().all(|t| !t.is_empty()));
        prop_assert!(tokens.windows(2).all(|w| !(w[0] == " " && w[1] == " ")));
    }

    #[test]
    fn property_values_are_whitelisted(input in css_soup()) {
        let tokens: Vec<String> = lex_css(&input).into_iter().filter(|t| t != " ").collect();
        let out = sanitize_css_property("color", &tokens, &PropertyContext::default());
        prop_assert!(out.iter().all(|t| !t.contains(['<', '>', '{', '}', ';'])), "{out:?}");
    }
}

fn assert_fast(input: &str) {
    let started = Instant::now();
    let _ = sanitize_stylesheet(None, input, &Virtualization::default(), None);
    assert!(
        started.elapsed() < Duration::from_secs(5),
        "sanitizing {} bytes took {:?}",
        input.len(),
        started.elapsed()
    );
}

#[test]
fn unclosed_constructs_stay_linear() {
    assert_fast(&"[".repeat(50_000));
    assert_fast(&"(".repeat(50_000));
    assert_fast(&"url(".repeat(20_000));
    assert_fast(&"/*".repeat(50_000));
    assert_fast(&"'".repeat(50_000));
    assert_fast(&"@media{".repeat(20_000));
    assert_fast(&"p{color:rgb(".repeat(20_000));
}
