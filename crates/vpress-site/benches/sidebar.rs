//! Benchmarks for sidebar generation.

use std::fs;
use std::path::Path;

use criterion::{BenchmarkId, Criterion, criterion_group, criterion_main};
use vpress_site::build_sidebar;

/// Fill a notes directory with files across every category.
fn create_notes(dir: &Path, count: usize) {
    const SUFFIXES: &[&str] = &[
        "-overview",
        "-model-report",
        "-earning-ideas",
        "-analysis",
        "-playbook",
        "",
    ];

    fs::create_dir_all(dir).unwrap();
    for i in 0..count {
        let suffix = SUFFIXES[i % SUFFIXES.len()];
        fs::write(
            dir.join(format!("topic-{i:04}{suffix}.md")),
            format!("# Topic {i}\n"),
        )
        .unwrap();
    }
}

fn bench_build_sidebar(c: &mut Criterion) {
    let temp_dir = tempfile::tempdir().unwrap();

    let mut group = c.benchmark_group("sidebar");

    for count in [10, 100, 1000] {
        let notes_dir = temp_dir.path().join(format!("notes_{count}"));
        create_notes(&notes_dir, count);

        group.bench_with_input(
            BenchmarkId::new("build", count),
            &notes_dir,
            |b, dir| b.iter(|| build_sidebar(dir, "researching").unwrap()),
        );
    }

    group.finish();
}

criterion_group!(benches, bench_build_sidebar);
criterion_main!(benches);
