//! Game of Life integration tests

use torus_automata::codec::glyphs;
use torus_automata::simulation::runner::{self, EndReason};
use torus_automata::{Automaton, AutomatonConfig, FieldKind, Mode};

fn life(width: i32, height: i32) -> Automaton {
    Automaton::new(
        AutomatonConfig::new()
            .with_mode(Mode::Life)
            .with_size(width, height)
            .with_seed(1),
    )
    .unwrap()
}

fn board(a: &Automaton) -> String {
    glyphs::encode_values(a.grid(), a.mode()).unwrap()
}

#[test]
fn test_block_is_still_life() {
    let mut a = life(6, 6);
    a.load_glyphs(
        "oooooo\n\
         oooooo\n\
         oo**oo\n\
         oo**oo\n\
         oooooo\n\
         oooooo\n",
        None,
    )
    .unwrap();
    let start = board(&a);

    a.advance_generation();
    assert!(a.is_stalled());
    assert_eq!(board(&a), start);

    for _ in 0..10 {
        a.advance_generation();
    }
    assert_eq!(board(&a), start);
}

#[test]
fn test_blinker_has_period_two() {
    let mut a = life(5, 5);
    for x in 2..=4 {
        a.set_field(FieldKind::Value, x, 3, 1).unwrap();
    }
    let horizontal = board(&a);

    a.advance_generation();
    assert!(!a.is_stalled());
    assert_eq!(board(&a), "ooooo\noo*oo\noo*oo\noo*oo\nooooo\n");

    a.advance_generation();
    assert_eq!(board(&a), horizontal);
}

#[test]
fn test_glider_circles_the_torus() {
    let mut a = life(8, 8);
    for (x, y) in [(2, 1), (3, 2), (1, 3), (2, 3), (3, 3)] {
        a.set_field(FieldKind::Value, x, y, 1).unwrap();
    }
    let start = board(&a);

    // One cell diagonally every four generations, eight cells per lap
    for _ in 0..32 {
        a.advance_generation();
        assert_eq!(a.population(), 5);
    }
    assert_eq!(board(&a), start);
}

#[test]
fn test_dying_board_ends_the_run() {
    let mut a = life(7, 7);
    a.set_field(FieldKind::Value, 4, 4, 1).unwrap();

    let summary = runner::run(&mut a, Some(50));
    assert_eq!(summary.end_reason, EndReason::Stalled);
    // The lone cell dies in the first generation, the second changes nothing
    assert_eq!(summary.generations, 2);
    assert_eq!(summary.population, 0);
}
