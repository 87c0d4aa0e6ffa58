use html::{Attributes, ElementFlags, SaxHandler, SaxParser, element_flags};
use proptest::prelude::*;
use sanitizer::{PassThroughUris, sanitize_html};
use std::time::{Duration, Instant};
use uri::Uri;

fn sanitize(input: &str) -> String {
    sanitize_html(input, Some(&PassThroughUris), None)
}

/// Collects what a browser would act on in sanitized output.
#[derive(Default)]
struct Survey {
    open: Vec<String>,
    mismatched: Vec<String>,
    dangerous: Vec<String>,
}

impl SaxHandler for Survey {
    fn start_tag(&mut self, name: &str, attribs: Attributes) -> html::Flow {
        if matches!(name, "script" | "style" | "object" | "embed") {
            self.dangerous.push(format!("<{name}>"));
        }
        for (attr, value) in &attribs {
            let value = value.as_deref().unwrap_or("");
            let scheme = matches!(attr.as_str(), "href" | "src" | "action" | "cite")
                .then(|| Uri::parse(value).and_then(|uri| uri.scheme()))
                .flatten();
            let scripted = attr.starts_with("on")
                || scheme.is_some_and(|scheme| scheme.contains("script"))
                || (attr == "style" && value.to_ascii_lowercase().contains("script"));
            if scripted {
                self.dangerous.push(format!("{name}.{attr}={value}"));
            }
        }
        if !element_flags(name).is_some_and(|f| f.contains(ElementFlags::EMPTY)) {
            self.open.push(name.to_string());
        }
        html::Flow::Continue
    }

    fn cdata(&mut self, text: &str) -> html::Flow {
        if text.contains('<') {
            let parent = self.open.last().map_or("", String::as_str);
            self.dangerous.push(format!("markup inside <{parent}>: {text}"));
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

fn hostile_soup() -> impl Strategy<Value = String> {
    let piece = prop_oneof![
        Just("<script>alert(1)</script>".to_string()),
        Just("<SCRIPT src=x.js>".to_string()),
        Just("<a href=\"javascript:alert(1)\">".to_string()),
        Just("<a href=\" JaVaScRiPt:x\">".to_string()),
        Just("<a href=\"javascript&#58;x\">".to_string()),
        Just("<a href=\"/ok\">".to_string()),
        Just("</a>".to_string()),
        Just("<b onclick=\"evil()\">".to_string()),
        Just("</b>".to_string()),
        Just("<img src=x onerror=alert(1)>".to_string()),
        Just("<p style=\"color:red;background:url(javascript:evil)\">".to_string()),
        Just("</p>".to_string()),
        Just("<div>".to_string()),
        Just("</div>".to_string()),
        Just("<li>".to_string()),
        Just("<style>p{}</style>".to_string()),
        Just("<iframe>".to_string()),
        Just("</iframe>".to_string()),
        Just("<iframe><script>alert(1)</script></iframe>".to_string()),
        Just("<template><img src=x onerror=alert(1)></template>".to_string()),
        Just("<!--".to_string()),
        Just("-->".to_string()),
        Just("&amp;".to_string()),
        Just("<".to_string()),
        Just(">".to_string()),
        Just("\"".to_string()),
        "[a-z '=]{0,6}",
    ];
    proptest::collection::vec(piece, 0..24).prop_map(|pieces| pieces.concat())
}

proptest! {
    #[test]
    fn no_script_survives(input in hostile_soup()) {
        let out = sanitize(&input);
        let mut survey = Survey::default();
        SaxParser::new(&out).run(&mut survey);
        prop_assert!(survey.dangerous.is_empty(), "{:?} in {:?}", survey.dangerous, out);
    }

    #[test]
    fn output_is_balanced(input in hostile_soup()) {
        let out = sanitize(&input);
        let mut survey = Survey::default();
        SaxParser::new(&out).run(&mut survey);
        prop_assert!(survey.mismatched.is_empty(), "mismatched {:?} in {:?}", survey.mismatched, out);
        prop_assert!(survey.open.is_empty(), "unclosed {:?} in {:?}", survey.open, out);
    }

    #[test]
    fn sanitizing_is_idempotent(input in hostile_soup()) {
        let once = sanitize(&input);
        let twice = sanitize(&once);
        prop_assert_eq!(twice, once);
    }
}

#[test]
fn hostile_inputs_stay_linear() {
    for (label, input) in [
        ("open tags", "<".repeat(200_000)),
        ("open comments", "<!--".repeat(50_000)),
        ("open style values", format!("<p style=\"{}\">", "a:b(".repeat(20_000))),
        ("unterminated quotes", format!("<p title=\"{}", "x".repeat(200_000))),
    ] {
        let started = Instant::now();
        let _ = sanitize(&input);
        let elapsed = started.elapsed();
        assert!(elapsed < Duration::from_secs(5), "{label}: took {elapsed:?}");
    }
}
