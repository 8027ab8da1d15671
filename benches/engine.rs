use criterion::{BatchSize, BenchmarkId, Criterion, criterion_group, criterion_main};
use lifelike::{CellState, Discard, Grid, RuleSet, RuleSpec, Simulation};

fn make_grid(rows: usize, cols: usize) -> Grid {
    let mut grid = Grid::new(rows, cols).unwrap();
    for r in 0..rows {
        for c in 0..cols {
            if (r + c) % 3 == 0 {
                grid.set(r as isize, c as isize, CellState::Alive);
            }
        }
    }
    grid
}

fn started(grid: &Grid, rules: &RuleSet) -> Simulation {
    let mut game = Simulation::seeded(grid.clone(), rules.clone(), 0);
    game.start(&mut Discard).unwrap();
    game
}

fn bench_next_generation(c: &mut Criterion) {
    let rule_sets = [
        ("standard", RuleSet::standard(RuleSpec::conway())),
        ("cancer", RuleSet::cancer(RuleSpec::conway(), 0.01, 3).unwrap()),
    ];

    let mut group = c.benchmark_group("next_generation");
    for (name, rules) in &rule_sets {
        for size in [64, 128, 256] {
            let grid = make_grid(size, size);

            group.bench_with_input(
                BenchmarkId::new(format!("{name}/serial"), size),
                &grid,
                |b, grid| {
                    b.iter_batched(
                        || started(grid, rules),
                        |mut game| game.step(&mut Discard).unwrap(),
                        BatchSize::LargeInput,
                    );
                },
            );

            group.bench_with_input(
                BenchmarkId::new(format!("{name}/parallel"), size),
                &grid,
                |b, grid| {
                    b.iter_batched(
                        || started(grid, rules),
                        |mut game| game.step_parallel(&mut Discard).unwrap(),
                        BatchSize::LargeInput,
                    );
                },
            );
        }
    }
    group.finish();
}

criterion_group!(benches, bench_next_generation);
criterion_main!(benches);
