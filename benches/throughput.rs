use criterion::{BenchmarkId, Criterion, criterion_group, criterion_main};

use photogrid::{
    core::grid::GridController,
    layout::GridConfig,
    photo::{ImageHandle, PhotoDraft},
    types::GridCoord,
};

fn drafts(term: &str, n: usize) -> Vec<PhotoDraft> {
    (0..n)
        .map(|i| PhotoDraft {
            id: format!("{term}-{i}"),
            title: format!("{term} photo {i}"),
            width: 600,
            height: 400,
            thumbnail: Some(ImageHandle { bytes: vec![0; 16] }),
        })
        .collect()
}

fn bench_prepends(c: &mut Criterion) {
    c.bench_function("insert_200_searches_of_50", |b| {
        b.iter(|| {
            let mut grid = GridController::new(GridConfig::default());
            for s in 0..200usize {
                grid.insert_search(format!("t{s}"), drafts(&format!("t{s}"), 50));
            }
        });
    });
}

fn bench_size_sweep(c: &mut Criterion) {
    let mut group = c.benchmark_group("size_for_full_grid");
    for sections in [10usize, 50usize, 200usize] {
        let mut grid = GridController::new(GridConfig::default());
        for s in 0..sections {
            grid.insert_search(format!("t{s}"), drafts(&format!("t{s}"), 30));
        }
        grid.select_cell(GridCoord::new(0, 0)).expect("enlarge");

        group.bench_with_input(BenchmarkId::from_parameter(sections), &sections, |b, &sections| {
            b.iter(|| {
                for section in 0..sections {
                    for row in 0..30usize {
                        let _ = grid
                            .size_for(GridCoord::new(section, row), 375.0, 812.0)
                            .expect("in bounds");
                    }
                }
            });
        });
    }
    group.finish();
}

fn bench_enlarge_toggle(c: &mut Criterion) {
    c.bench_function("enlarge_toggle_10k", |b| {
        let mut grid = GridController::new(GridConfig::default());
        for s in 0..20usize {
            grid.insert_search(format!("t{s}"), drafts(&format!("t{s}"), 50));
        }
        b.iter(|| {
            for i in 0..10_000usize {
                let coord = GridCoord::new(i % 20, i % 50);
                let _ = grid.select_cell(coord).expect("in bounds");
            }
        });
    });
}

criterion_group!(benches, bench_prepends, bench_size_sweep, bench_enlarge_toggle);
criterion_main!(benches);
