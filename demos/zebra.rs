use tabula::solver::{
    engine::SolverEngine,
    outcome::Outcome,
    puzzle::Puzzle,
    rule::ClueDefinition,
    stats::{render_grid_table, render_stats_table},
};

// A small zebra puzzle: three houses in a row, each with a color, a pet and
// a drink.
//
//   1. The green house's owner keeps neither the dog nor the cat.
//   2. The red house's owner keeps neither the cat nor the bird.
//   3. The blue house sits exactly two places after the red one.
//   4. Tea is drunk where the dog lives, or in house 3.
//   5. Milk and coffee are drunk in houses 2 and 3, in some order.
//   6. Coffee is drunk neither where the bird lives nor in house 1.

fn puzzle() -> Puzzle {
    Puzzle::builder()
        .category("Color", ["Red", "Green", "Blue"])
        .category("Pet", ["Dog", "Cat", "Bird"])
        .category("Drink", ["Tea", "Coffee", "Milk"])
        .ordinal_category("Position", [1, 2, 3])
        .build()
        .expect("categories are well-formed")
}

fn clues() -> Vec<ClueDefinition> {
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

pub fn main() {
    let _ = tracing_subscriber::fmt::try_init();

    let mut puzzle = puzzle();
    let rules = puzzle.build_rules(&clues()).expect("clues resolve");

    let engine = SolverEngine::new();
    let (outcome, stats) = engine.solve(&rules, &mut puzzle).expect("puzzle is consistent");

    match outcome {
        Outcome::Solved(grid) => {
            println!("Solved in {} rounds!\n", stats.rounds);
            println!("{}", render_grid_table(&grid, "Position"));
        }
        Outcome::Underconstrained(candidates) => {
            println!("The clues don't pin everything down; unresolved items:");
            for item in candidates.unresolved_items() {
                println!("  {item}");
            }
        }
    }

    println!("{}", render_stats_table(&stats, &rules));
}
