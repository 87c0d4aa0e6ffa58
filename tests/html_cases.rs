use sanitizer::{PassThroughUris, ScopedNames, sanitize_html};
use sanitizer_test_support::assert_output_eq;
use sanitizer_test_support::cases::{HtmlCase, filter_from_env, fixtures_dir, load_html_cases};

fn run_case(case: &HtmlCase, input: &str) -> String {
    let names = ScopedNames::new("-v1");
    match case.policy.as_deref() {
        None | Some("default") => sanitize_html(input, Some(&PassThroughUris), None),
        Some("scoped") => sanitize_html(input, Some(&PassThroughUris), Some(&names)),
        Some("no-uris") => sanitize_html(input, None, None),
        Some(other) => panic!("case {} names unknown policy {other:?}", case.id),
    }
}

fn cases() -> Vec<HtmlCase> {
    let path = fixtures_dir(env!("CARGO_MANIFEST_DIR")).join("html_cases.toml");
    load_html_cases(&path)
}

#[test]
fn html_fixture_cases() {
    let cases = cases();
    for case in filter_from_env(&cases, |case| case.id.as_str()) {
        let actual = run_case(&case, &case.input);
        assert_output_eq(&case.id, &case.input, &case.expected, &actual);
    }
}

#[test]
fn unscoped_outputs_are_fixed_points() {
    for case in cases().into_iter().filter(|case| case.policy.as_deref() != Some("scoped")) {
        let actual = run_case(&case, &case.expected);
        assert_output_eq(&case.id, &case.expected, &case.expected, &actual);
    }
}
