use html::{Attributes, ElementFlags, TagDecision, element_flags, sanitize_with_policy};
use sanitizer_test_support::assert_output_eq;
use sanitizer_test_support::cases::{HtmlCase, filter_from_env, fixtures_dir, load_html_cases};

fn keep_all(_: &str, attribs: Attributes) -> TagDecision {
    TagDecision::keep(attribs)
}

fn no_attribs(_: &str, _: Attributes) -> TagDecision {
    TagDecision::keep(Vec::new())
}

fn drop_unsafe(tag: &str, attribs: Attributes) -> TagDecision {
    let unsafe_element = element_flags(tag).is_none_or(|flags| flags.contains(ElementFlags::UNSAFE));
    if unsafe_element {
        TagDecision::Reject
    } else {
        TagDecision::keep(attribs)
    }
}

fn run_case(case: &HtmlCase) -> String {
    match case.policy.as_deref() {
        None | Some("keep-all") => sanitize_with_policy(&case.input, &keep_all),
        Some("no-attribs") => sanitize_with_policy(&case.input, &no_attribs),
        Some("drop-unsafe") => sanitize_with_policy(&case.input, &drop_unsafe),
        Some(other) => panic!("case {} names unknown policy {other:?}", case.id),
    }
}

#[test]
fn tag_policy_fixture_cases() {
    let path = fixtures_dir(env!("CARGO_MANIFEST_DIR")).join("tag_policy_cases.toml");
    let cases = filter_from_env(&load_html_cases(&path), |case| case.id.as_str());
    for case in &cases {
        let actual = run_case(case);
        assert_output_eq(&case.id, &case.input, &case.expected, &actual);
    }
}

#[test]
fn fixture_outputs_are_fixed_points() {
    let path = fixtures_dir(env!("CARGO_MANIFEST_DIR")).join("tag_policy_cases.toml");
    for case in load_html_cases(&path) {
        let again = HtmlCase {
            input: case.expected.clone(),
            ..case.clone()
        };
        let actual = run_case(&again);
        assert_output_eq(&case.id, &again.input, &case.expected, &actual);
    }
}
