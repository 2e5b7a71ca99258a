use criterion::{Criterion, criterion_group, criterion_main};
use numbak::generation::{backup_path, count_backups};
use std::fs::File;
use std::hint::black_box;
use tempfile::TempDir;

fn bench_count_backups(c: &mut Criterion) {
    let temp_dir = TempDir::new().unwrap();
    let file = temp_dir.path().join("file");
    File::create(&file).unwrap();
    for n in 1..=100 {
        File::create(backup_path(&file, n)).unwrap();
    }
    // unrelated entries sharing the directory
    for n in 0..1000 {
        File::create(temp_dir.path().join(format!("other-{n}"))).unwrap();
    }

    c.bench_function("count_backups 100 generations", |b| {
        b.iter(|| count_backups(black_box(&file)).unwrap())
    });
}

criterion_group!(benches, bench_count_backups);
criterion_main!(benches);
