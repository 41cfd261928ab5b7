use draw_odds::core::format_probability;
use draw_odds::registry::{listener::TracingListener, GroupRegistry};

fn main() {
    tracing_subscriber::fmt::init();

    println!("=== Opening Hand Odds ===\n");

    // Example 1: One combo piece in a 40 card deck
    println!("Example 1: At least one of three copies");
    println!("Deck: 40 cards, Hand: 5 cards");
    let mut registry = GroupRegistry::new().with_listener(TracingListener);
    registry.set_deck_size(40).unwrap();
    registry.set_sample_size(5).unwrap();
    let combo = registry.add_named_group("Combo piece", 3, 1, 3).unwrap();

    let p = registry.calculate().unwrap();
    println!("  P(>= 1 combo piece): {}%\n", format_probability(p, 3, 100));

    // Example 2: Add a second requirement
    println!("Example 2: ...and one or two of twelve starters");
    let starters = registry.add_named_group("Starter", 12, 1, 2).unwrap();
    let detailed = registry.calculate_detailed().unwrap();
    println!(
        "  P(both): {}% over {} combinations",
        format_probability(detailed.probability(), 3, 100),
        detailed.combinations.len()
    );
    for outcome in &detailed.combinations {
        println!(
            "    {:?} + {} other: {}%",
            outcome.counts,
            outcome.unassigned,
            format_probability(outcome.probability, 4, 100)
        );
    }
    println!("  Exact: {}\n", detailed.exact());

    // Example 3: Rejected edits leave the registry alone
    println!("Example 3: Refused edits");
    if let Err(err) = registry.set_group_max(combo, 4) {
        println!("  set_group_max(combo, 4): {err}");
    }
    if let Err(err) = registry.set_sample_size(100) {
        println!("  set_sample_size(100): {err}");
    }
    println!(
        "  Sample size is still {}, starters still max {}",
        registry.sample_size(),
        registry.group(starters).map_or(0, |g| g.max_in_sample())
    );

    // Example 4: Tiny odds switch to scientific notation
    println!("\n=== Example 4: All three copies in the opening hand ===");
    registry.remove_group(starters);
    registry.set_group_min(combo, 3).unwrap();
    let p = registry.calculate().unwrap();
    println!("  P(all 3): {}%", format_probability(p, 3, 100));
}
