use criterion::{black_box, criterion_group, criterion_main, Criterion};
use tabula::solver::{engine::SolverEngine, puzzle::Puzzle, rule::ClueDefinition};

// Puzzle definition copied from demos/zebra.rs.

fn zebra_puzzle() -> Puzzle {
    Puzzle::builder()
        .category("Color", ["Red", "Green", "Blue"])
        .category("Pet", ["Dog", "Cat", "Bird"])
        .category("Drink", ["Tea", "Coffee", "Milk"])
        .ordinal_category("Position", [1, 2, 3])
        .build()
        .unwrap()
}

fn zebra_clues() -> Vec<ClueDefinition> {
    vec![
        ClueDefinition::NeitherNor {
            subject: "Green".to_string(),
            excluded: ("Dog".to_string(), "Cat".to_string()),
        },
        ClueDefinition::NeitherNor {
            subject: "Red".to_string(),
            excluded: ("Cat".to_string(), "Bird".to_string()),
        },
        ClueDefinition::DeltaComparison {
            lesser: "Red".to_string(),
            greater: "Blue".to_string(),
            delta: 2,
            category: "Position".to_string(),
        },
        ClueDefinition::EitherOr {
            subject: "Tea".to_string(),
            options: ("Dog".to_string(), "3".to_string()),
        },
        ClueDefinition::Pairs {
            left: ("Milk".to_string(), "Coffee".to_string()),
            right: ("2".to_string(), "3".to_string()),
        },
        ClueDefinition::NeitherNor {
            subject: "Coffee".to_string(),
            excluded: ("Bird".to_string(), "1".to_string()),
        },
    ]
}

fn bench_zebra_solve(c: &mut Criterion) {
    c.bench_function("solve_zebra_3x4", |b| {
        b.iter(|| {
            let mut puzzle = zebra_puzzle();
            let rules = puzzle.build_rules(&zebra_clues()).unwrap();
            let engine = SolverEngine::new();
            black_box(engine.solve(&rules, &mut puzzle).unwrap())
        })
    });
}

fn bench_propagation_fixed_point(c: &mut Criterion) {
    // A larger, deliberately underconstrained grid: measures the cost of
    // running rounds to the fixed point rather than of solving.
    c.bench_function("propagate_5x4_fixed_point", |b| {
        b.iter(|| {
            let mut puzzle = Puzzle::builder()
                .category("Name", ["A", "B", "C", "D", "E"])
                .category("Job", ["F", "G", "H", "I", "J"])
                .category("Town", ["K", "L", "M", "N", "O"])
                .ordinal_category("Age", [30, 35, 40, 45, 50])
                .build()
                .unwrap();
            let clues = vec![
                ClueDefinition::DeltaComparison {
                    lesser: "A".to_string(),
                    greater: "F".to_string(),
                    delta: 10,
                    category: "Age".to_string(),
                },
                ClueDefinition::NeitherNor {
                    subject: "B".to_string(),
                    excluded: ("G".to_string(), "K".to_string()),
                },
                ClueDefinition::EitherOr {
                    subject: "C".to_string(),
                    options: ("H".to_string(), "L".to_string()),
                },
            ];
            let rules = puzzle.build_rules(&clues).unwrap();
            let engine = SolverEngine::new();
            black_box(engine.solve(&rules, &mut puzzle).unwrap())
        })
    });
}

criterion_group!(benches, bench_zebra_solve, bench_propagation_fixed_point);
criterion_main!(benches);
