//! End-to-end checks through the plugin registry

use aoc_solver::{SolveError, SolverError, SolverRegistry, SolverRegistryBuilder};
use aoc2021 as _;

const SOLVED_DAYS: [u8; 23] = [
    1, 2, 3, 4, 5, 6, 7, 8, 9, 10, 11, 12, 13, 14, 15, 16, 17, 18, 20, 21, 22, 23, 25,
];

fn registry_2021() -> SolverRegistry {
    SolverRegistryBuilder::new()
        .register_solver_plugins(|plugin| plugin.year == 2021)
        .expect("no duplicate 2021 plugins")
        .build()
}

fn run(registry: &SolverRegistry, day: u8, input: &str) -> Vec<String> {
    let mut solver = registry.create_solver(2021, day, input).unwrap();
    (1..=solver.parts())
        .map(|part| solver.solve(part).unwrap().answer)
        .collect()
}

#[test]
fn test_every_day_is_registered_with_a_title() {
    let registry = registry_2021();
    let storage = registry.storage();

    let days: Vec<u8> = storage.iter_info().map(|info| info.day).collect();
    assert_eq!(days, SOLVED_DAYS);

    for info in storage.iter_info() {
        assert!(!info.title.is_empty(), "day {} has no title", info.day);
        let expected_parts = if info.day == 25 { 1 } else { 2 };
        assert_eq!(info.parts, expected_parts, "day {}", info.day);
    }
    assert_eq!(storage.get_info(2021, 15).unwrap().title, "Chiton");
    assert!(!storage.contains(2021, 19));
    assert!(!storage.contains(2021, 24));
}

#[test]
fn test_tag_filter_narrows_registration() {
    let registry = SolverRegistryBuilder::new()
        .register_solver_plugins(|plugin| plugin.tags.contains(&"dp"))
        .unwrap()
        .build();
    let days: Vec<u8> = registry.storage().iter_info().map(|i| i.day).collect();
    assert_eq!(days, vec![6, 21]);
}

#[test]
fn test_examples_through_registry() {
    let registry = registry_2021();

    assert_eq!(
        run(&registry, 1, "199\n200\n208\n210\n200\n207\n240\n269\n260\n263\n"),
        ["7", "5"]
    );
    assert_eq!(run(&registry, 6, "3,4,3,1,2\n"), ["5934", "26984457539"]);
    assert_eq!(run(&registry, 7, "16,1,2,0,4,2,7,1,2,14"), ["37", "168"]);
    assert_eq!(
        run(&registry, 17, "target area: x=20..30, y=-10..-5"),
        ["45", "112"]
    );
    assert_eq!(
        run(
            &registry,
            21,
            "Player 1 starting position: 4\nPlayer 2 starting position: 8\n"
        ),
        ["739785", "444356092776315"]
    );
}

#[test]
fn test_errors_surface_through_registry() {
    let registry = registry_2021();

    assert!(matches!(
        registry.create_solver(2021, 19, "anything"),
        Err(SolverError::NotFound(2021, 19))
    ));
    assert!(matches!(
        registry.create_solver(2021, 2, "backwards 4"),
        Err(SolverError::ParseError(_))
    ));

    let mut day25 = registry.create_solver(2021, 25, ">.\n..\n").unwrap();
    assert!(matches!(day25.solve(2), Err(SolveError::PartOutOfRange(2))));

    let mut day10 = registry.create_solver(2021, 10, "()\n").unwrap();
    assert_eq!(day10.solve(1).unwrap().answer, "0");
    assert!(matches!(day10.solve(2), Err(SolveError::SolveFailed(_))));
}
