use html::{Attributes, ElementFlags, SaxHandler, SaxParser, TagDecision, element_flags, sanitize_with_policy};
use proptest::prelude::*;
use std::time::{Duration, Instant};

fn keep_all(_: &str, attribs: Attributes) -> TagDecision {
    TagDecision::keep(attribs)
}

/// Tracks start/end tags of non-void elements in sanitized output.
#[derive(Default)]
struct Balance {
    open: Vec<String>,
    mismatched: Vec<String>,
}

impl SaxHandler for Balance {
    fn start_tag(&mut self, name: &str, _: Attributes) -> html::Flow {
        if !element_flags(name).is_some_and(|f| f.contains(ElementFlags::EMPTY)) {
            self.open.push(name.to_string());
        }
        html::Flow::Continue
    }

    fn end_tag(&mut self, name: &str) -> html::Flow {
        if self.open.pop().as_deref() != Some(name) {
            self.mismatched.push(name.to_string());
        }
        html::Flow::Continue
    }
}

fn markup_soup() -> impl Strategy<Value = String> {
    let piece = prop_oneof![
        Just("<div>".to_string()),
        Just("</div>".to_string()),
        Just("<li>".to_string()),
        Just("</li>".to_string()),
        Just("<p class=x>".to_string()),
        Just("</p>".to_string()),
        Just("<b title=\"a>b\">".to_string()),
        Just("</b>".to_string()),
        Just("<br>".to_string()),
        Just("<textarea>".to_string()),
        Just("</textarea>".to_string()),
        Just("<!--".to_string()),
        Just("-->".to_string()),
        Just("&amp;".to_string()),
        Just("&".to_string()),
        Just("<".to_string()),
        Just(">".to_string()),
        "[a-z '\"=]{0,6}",
    ];
    proptest::collection::vec(piece, 0..24).prop_map(|pieces| pieces.concat())
}

proptest! {
    #[test]
    fn output_is_balanced(input in markup_soup()) {
        let out = sanitize_with_policy(&input, &keep_all);
        let mut balance = Balance::default();
        SaxParser::new(&out).run(&mut balance);
        prop_assert!(balance.mismatched.is_empty(), "mismatched {:?} in {:?}", balance.mismatched, out);
        prop_assert!(balance.open.is_empty(), "unclosed {:?} in {:?}", balance.open, out);
    }

    #[test]
    fn sanitizing_is_idempotent(input in markup_soup()) {
        let once = sanitize_with_policy(&input, &keep_all);
        let twice = sanitize_with_policy(&once, &keep_all);
        prop_assert_eq!(twice, once);
    }

    #[test]
    fn arbitrary_text_never_panics(input in "\\PC{0,80}") {
        let _ = sanitize_with_policy(&input, &keep_all);
    }
}

fn assert_fast(label: &str, input: &str) {
    let started = Instant::now();
    let _ = sanitize_with_policy(input, &keep_all);
    let elapsed = started.elapsed();
    assert!(
        elapsed < Duration::from_secs(5),
        "{label}: {} bytes took {elapsed:?}",
        input.len()
    );
}

#[test]
fn pathological_inputs_stay_linear() {
    assert_fast("open comments", &"<!--".repeat(50_000));
    assert_fast("open declarations", &"<!a".repeat(50_000));
    assert_fast("open processing instructions", &"<?".repeat(50_000));
    assert_fast("unclosed raw text", &format!("<textarea>{}", "</tex".repeat(20_000)));
    assert_fast("deep nesting", &"<div>".repeat(50_000));
}
