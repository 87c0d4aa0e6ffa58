use css::{Virtualization, sanitize_stylesheet};
use sanitizer_test_support::assert_output_eq;
use sanitizer_test_support::cases::{
    StylesheetCase, filter_from_env, fixtures_dir, load_stylesheet_cases,
};

fn keep_url(url: &str, _property: &str) -> Option<String> {
    Some(url.to_string())
}

fn run_case(case: &StylesheetCase, input: &str) -> String {
    let virtualization = Virtualization {
        container_class: case.container_class.clone(),
        id_suffix: case.id_suffix.clone().unwrap_or_default(),
        ..Virtualization::default()
    };
    sanitize_stylesheet(case.base_uri.as_deref(), input, &virtualization, Some(&keep_url))
}

fn cases() -> Vec<StylesheetCase> {
    let path = fixtures_dir(env!("CARGO_MANIFEST_DIR")).join("stylesheet_cases.json");
    load_stylesheet_cases(&path)
}

#[test]
fn stylesheet_fixture_cases() {
    let cases = cases();
    for case in filter_from_env(&cases, |case| case.id.as_str()) {
        let actual = run_case(&case, &case.input);
        assert_output_eq(&case.id, &case.input, &case.expected, &actual);
    }
}

#[test]
fn unscoped_outputs_are_fixed_points() {
    let unscoped = cases().into_iter().filter(|case| {
        case.container_class.is_none() && case.id_suffix.is_none() && case.base_uri.is_none()
    });
    for case in unscoped {
        let actual = run_case(&case, &case.expected);
        assert_output_eq(&case.id, &case.expected, &case.expected, &actual);
    }
}
