#![no_main]

use libfuzzer_sys::fuzz_target;
use sanitizer::{Virtualization, sanitize_stylesheet_with_loader};

fuzz_target!(|data: &[u8]| {
    let Ok(input) = std::str::from_utf8(data) else {
        return;
    };
    let virtualization = Virtualization {
        container_class: Some("fz".to_string()),
        id_suffix: "-f".to_string(),
        ..Virtualization::default()
    };
    // Every import loads the fuzz input again, so nesting runs to the depth
    // limit.
    let out = sanitize_stylesheet_with_loader(
        Some("https://example.com/a.css"),
        input,
        &virtualization,
        None,
        |_: &str| Some(input.to_string()),
    );
    assert!(!out.contains('<'), "{out:?}");
});
