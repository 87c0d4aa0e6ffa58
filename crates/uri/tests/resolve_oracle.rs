use proptest::prelude::*;
use uri::{Uri, collapse_dots, resolve};

const BASES: &[&str] = &[
    "http://example.com/a/b/c.css",
    "https://cdn.example.org/themes/dark/",
    "http://h:8080/x?q=1#frag",
];

const REFERENCES: &[&str] = &[
    "g",
    "./g",
    "g/",
    "/g",
    "../g",
    "../../g",
    "../../../../g",
    "g?y=1",
    "g#s",
    "a/./b/../c",
    "/a/b/../../c",
    "https://other.example/z",
    "..a/g",
];

#[test]
fn agrees_with_url_crate_on_absolute_bases() {
    for base in BASES {
        let oracle_base = url::Url::parse(base)
            .unwrap_or_else(|err| panic!("oracle rejected base {base:?}: {err}"));
        for reference in REFERENCES {
            let expected = oracle_base
                .join(reference)
                .unwrap_or_else(|err| panic!("oracle rejected {reference:?}: {err}"))
                .to_string();
            let actual = resolve(base, reference)
                .unwrap_or_else(|| panic!("failed to resolve {reference:?} against {base:?}"));
            assert_eq!(
                actual, expected,
                "resolving {reference:?} against {base:?}"
            );
        }
    }
}

fn path_segment() -> impl Strategy<Value = String> {
    prop_oneof![
        Just(".".to_string()),
        Just("..".to_string()),
        Just(String::new()),
        "[a-z.]{1,4}",
    ]
}

proptest! {
    #[test]
    fn collapse_dots_is_idempotent(segments in proptest::collection::vec(path_segment(), 0..12)) {
        let path = segments.join("/");
        let once = collapse_dots(&path);
        prop_assert_eq!(collapse_dots(&once), once.clone());
        prop_assert!(!once.contains("//"), "double slash in {:?}", once);
    }

    #[test]
    fn resolved_paths_never_escape_the_root(segments in proptest::collection::vec(path_segment(), 0..12)) {
        let reference = segments.join("/");
        let base = Uri::parse("http://h/a/b/").expect("static base parses");
        if let Some(relative) = Uri::parse(&reference) {
            let resolved = base.resolve(&relative);
            let path = resolved.raw_path().unwrap_or("");
            prop_assert!(path != "/.." && !path.starts_with("/../"), "escaped root: {:?}", path);
        }
    }

    #[test]
    fn parse_never_panics(input in ".{0,64}") {
        if let Some(uri) = Uri::parse(&input) {
            let _ = uri.to_string();
        }
    }
}
