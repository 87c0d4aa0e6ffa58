#![no_main]

use css::lex_css;
use libfuzzer_sys::fuzz_target;

fuzz_target!(|data: &[u8]| {
    let Ok(input) = std::str::from_utf8(data) else {
        return;
    };
    let tokens = lex_css(input);
    assert!(tokens.iter().all(|token| !token.is_empty()));
    assert!(tokens.first().is_none_or(|token| token != " "));
});
