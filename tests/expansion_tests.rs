//! Expansion tests - milestones, grid growth, and the first wall

use grid2048::{Cell, Direction, GameState, TileKind};

fn cleared(rows: usize, cols: usize, seed: u32) -> GameState {
    let mut state = GameState::new(rows, cols, seed);
    clear_board(&mut state);
    state
}

fn clear_board(state: &mut GameState) {
    for row in 0..state.rows() {
        for col in 0..state.cols() {
            state.set_tile(row, col, Cell::EMPTY);
        }
    }
}

fn trigger_milestone(state: &mut GameState, half: u32) {
    clear_board(state);
    state.set_tile(0, 0, Cell::number(half));
    state.set_tile(0, 1, Cell::number(half));
    let result = state.resolve_turn(Direction::Left);
    assert!(result.board_changed);
}

#[test]
fn test_milestone_flags_pending_and_doubles_target() {
    let mut state = cleared(4, 4, 1);
    assert_eq!(state.expansion_target(), 2048);
    trigger_milestone(&mut state, 1024);
    assert!(state.expansion_pending());
    assert_eq!(state.expansion_target(), 4096);
}

#[test]
fn test_sub_target_merge_does_not_flag() {
    let mut state = cleared(4, 4, 1);
    trigger_milestone_value(&mut state, 512);
    assert!(!state.expansion_pending());
    assert_eq!(state.expansion_target(), 2048);
}

fn trigger_milestone_value(state: &mut GameState, half: u32) {
    clear_board(state);
    state.set_tile(0, 0, Cell::number(half));
    state.set_tile(0, 1, Cell::number(half));
    state.resolve_turn(Direction::Left);
}

#[test]
fn test_apply_expansion_adds_one_line() {
    let mut state = cleared(4, 4, 5);
    trigger_milestone(&mut state, 1024);
    let expansion = state.apply_expansion().unwrap();
    assert_eq!(expansion.new_rows * expansion.new_cols, 20);
    assert_eq!(state.rows(), expansion.new_rows);
    assert_eq!(state.cols(), expansion.new_cols);
    assert!(!state.expansion_pending());
}

#[test]
fn test_apply_without_pending_is_noop() {
    let mut state = cleared(4, 4, 5);
    assert!(state.apply_expansion().is_none());
    assert_eq!(state.rows(), 4);
    assert_eq!(state.cols(), 4);
}

#[test]
fn test_expansion_preserves_content() {
    let mut state = cleared(4, 4, 8);
    trigger_milestone(&mut state, 1024);
    let tiles_before: usize = count_numbers(&state);
    state.apply_expansion();
    assert_eq!(count_numbers(&state), tiles_before);
    let big = state
        .board()
        .cells()
        .iter()
        .filter(|c| c.kind == TileKind::Number(2048))
        .count();
    assert_eq!(big, 1);
}

fn count_numbers(state: &GameState) -> usize {
    state
        .board()
        .cells()
        .iter()
        .filter(|c| c.kind.is_number())
        .count()
}

#[test]
fn test_first_expansion_places_single_wall() {
    let mut state = cleared(4, 4, 21);
    trigger_milestone(&mut state, 1024);
    state.apply_expansion();
    let walls = count_walls(&state);
    assert_eq!(walls, 1);

    // Second expansion adds no further wall. Clear everything but the
    // wall and trigger the next milestone.
    for row in 0..state.rows() {
        for col in 0..state.cols() {
            if !state.board().get(row, col).unwrap().kind.is_wall() {
                state.set_tile(row, col, Cell::EMPTY);
            }
        }
    }
    state.set_tile(0, 0, Cell::number(2048));
    state.set_tile(0, 1, Cell::number(2048));
    let result = state.resolve_turn(Direction::Left);
    assert!(result.board_changed);
    state.apply_expansion();
    assert_eq!(count_walls(&state), 1);
}

fn count_walls(state: &GameState) -> usize {
    state
        .board()
        .cells()
        .iter()
        .filter(|c| c.kind.is_wall())
        .count()
}

#[test]
fn test_each_milestone_doubles_target() {
    let mut state = cleared(4, 4, 2);
    trigger_milestone(&mut state, 1024);
    assert_eq!(state.expansion_target(), 4096);
    state.apply_expansion();
    trigger_milestone(&mut state, 2048);
    assert_eq!(state.expansion_target(), 8192);
}
