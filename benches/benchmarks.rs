//! Benchmarks for commit-toolkit.

#![allow(missing_docs)]
#![allow(let_underscore_drop)]

use commit_toolkit::message::sanitize;
use criterion::{black_box, criterion_group, criterion_main, Criterion};

fn benchmark_sanitize(c: &mut Criterion) {
    let raw = "Here is the commit message: Fix bug in parser\n\n\
               Handle empty input gracefully\nAdd regression test\nExtra trailing line";

    c.bench_function("sanitize_clean", |b| {
        b.iter(|| sanitize::clean(black_box(raw)));
    });
}

fn benchmark_config_parsing(c: &mut Criterion) {
    let toml_content = r#"
[message]
max_tokens = 150
temperature = 0.2
timeout = "30s"

[lint]
path = "src"

[notify]
command = "zenity"
timeout = "30s"
"#;

    c.bench_function("config_parsing", |b| {
        b.iter(|| {
            let config: commit_toolkit::Config =
                toml::from_str(black_box(toml_content)).expect("parse config");
            black_box(config)
        });
    });
}

criterion_group!(benches, benchmark_sanitize, benchmark_config_parsing);
criterion_main!(benches);
