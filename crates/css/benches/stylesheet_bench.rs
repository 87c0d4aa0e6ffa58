use criterion::{Criterion, black_box, criterion_group, criterion_main};
use css::{Virtualization, lex_css, sanitize_stylesheet};

const RULES: usize = 2_000;

fn make_sheet(count: usize) -> String {
    "@media screen and (min-width: 100px) { p.note > a:hover, #main li { color: #fff; \
     margin: 0 auto -1px; font-family: \"Open Sans\", serif; background: url(img/x.png) } }\n"
        .repeat(count)
}

fn keep_url(url: &str, _: &str) -> Option<String> {
    Some(url.to_string())
}

fn bench_lex(c: &mut Criterion) {
    let input = make_sheet(RULES);
    c.bench_function("lex_media_rules", |b| {
        b.iter(|| black_box(lex_css(black_box(&input)).len()));
    });
}

fn bench_sanitize(c: &mut Criterion) {
    let input = make_sheet(RULES);
    let virtualization = Virtualization {
        container_class: Some("sandbox".to_string()),
        id_suffix: "-x".to_string(),
        ..Virtualization::default()
    };
    c.bench_function("sanitize_scoped_sheet", |b| {
        b.iter(|| {
            black_box(sanitize_stylesheet(
                Some("https://example.com/site.css"),
                black_box(&input),
                &virtualization,
                Some(&keep_url),
            ))
        });
    });
}

fn bench_adversarial_calls(c: &mut Criterion) {
    let input = format!("p {{ color: {} }}", "rgb(".repeat(20_000));
    c.bench_function("sanitize_unclosed_calls", |b| {
        b.iter(|| black_box(sanitize_stylesheet(None, black_box(&input), &Virtualization::default(), None)));
    });
}

criterion_group!(benches, bench_lex, bench_sanitize, bench_adversarial_calls);
criterion_main!(benches);
