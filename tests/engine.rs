use liquid_sort::{
    Board, Difficulty, EngineError, GameEngine, GameState, Selection, generate,
};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

fn seeded(seed: u64) -> GameEngine<StdRng> {
    GameEngine::with_rng(StdRng::seed_from_u64(seed))
}

fn assert_consistent(state: &GameState, color_counts: [usize; 8]) {
    let board = state.get_board();
    assert_eq!(board.get_color_counts(), color_counts);
    assert!(board.get_containers().iter().all(|c| c.len() <= 4));
    if let Selection::Container(index) = state.get_selection() {
        assert!(!board.get(index).unwrap().is_empty());
    }
}

#[test]
fn random_clicks_preserve_invariants() {
    let mut rng = StdRng::seed_from_u64(2024);
    for tier in Difficulty::ALL {
        let mut engine = seeded(tier as u64);
        engine.set_difficulty(tier).unwrap();
        let counts = engine.board().get_color_counts();
        let len = engine.board().len();

        let mut moves = engine.moves();
        for _ in 0..2000 {
            let level = engine.level();
            let was_won = engine.is_won();
            engine.select(rng.random_range(0..len)).unwrap();
            assert_consistent(engine.state(), counts);
            assert!(engine.moves() >= moves);
            assert!(engine.moves() <= moves + 1);
            moves = engine.moves();
            if engine.is_won() && !was_won {
                assert_eq!(engine.level(), level + 1);
            } else {
                assert_eq!(engine.level(), level);
            }
        }
    }
}

#[test]
fn full_session_through_a_win() {
    let mut engine = seeded(1);
    engine.set_difficulty(Difficulty::Easy).unwrap();
    assert_eq!(engine.level(), 1);

    let board: Board = "AAAB|BBBA|.".parse().unwrap();
    engine.load_state(GameState::reset(board, engine.level()));

    // A top onto the empty container, then consolidate.
    engine.select(1).unwrap();
    engine.select(2).unwrap();
    assert_eq!(engine.board().to_string(), "AAAB|BBB|A");
    engine.select(0).unwrap();
    engine.select(1).unwrap();
    assert_eq!(engine.board().to_string(), "AAA|BBBB|A");
    assert!(!engine.is_won());
    engine.select(2).unwrap();
    engine.select(0).unwrap();

    assert_eq!(engine.board().to_string(), "AAAA|BBBB|.");
    assert!(engine.is_won());
    assert_eq!(engine.level(), 2);
    assert_eq!(engine.moves(), 3);

    // Input is ignored until the next level starts.
    let won = engine.state().clone();
    engine.select(0).unwrap();
    assert_eq!(engine.state(), &won);

    engine.start_next_level().unwrap();
    assert!(!engine.is_won());
    assert_eq!(engine.level(), 2);
    assert_eq!(engine.moves(), 0);
    assert_eq!(engine.board().len(), 6);
    assert_eq!(engine.difficulty(), Difficulty::Easy);
}

#[test]
fn restart_deals_a_fresh_board_and_keeps_level() {
    let mut engine = seeded(77);
    engine.select(0).unwrap();
    engine.reset_game().unwrap();
    assert_eq!(engine.selection(), Selection::None);
    assert_eq!(engine.moves(), 0);
    assert_eq!(engine.level(), 1);
    assert_eq!(engine.board().len(), 8);
}

#[test]
fn engine_deals_match_direct_generation() {
    let mut engine = seeded(99);
    engine.set_difficulty(Difficulty::Hard).unwrap();
    let expected = generate(&Difficulty::Hard.get_config(), &mut StdRng::seed_from_u64(99)).unwrap();
    assert_eq!(engine.board(), &expected);
}

#[test]
fn bad_index_leaves_state_alone() {
    let mut engine = seeded(3);
    let before = engine.state().clone();
    assert_eq!(
        engine.select(10).unwrap_err(),
        EngineError::InvalidIndex { index: 10, len: 10 }
    );
    assert_eq!(engine.state(), &before);
}

#[test]
fn unknown_tier_name_plays_normal() {
    let mut engine = seeded(4);
    engine.set_difficulty(Difficulty::from_name("nightmare")).unwrap();
    assert_eq!(engine.difficulty(), Difficulty::Normal);
    assert_eq!(engine.board().len(), 8);
}
