use checkers::board::Board;
use checkers::config::GameConfig;
use checkers::engine::{Engine, EngineState, Interaction};
use checkers::error::Rejection;
use checkers::moves::parse_turn;
use checkers::piece::Color;

fn engine_with(pieces: &[(Color, usize, usize)]) -> Engine {
    let mut board = Board::empty();
    for &(color, row, col) in pieces {
        board.place(color, row, col).expect("test position uses dark squares");
    }
    Engine::from_position(board, GameConfig::headless())
}

fn play(engine: &mut Engine, turn: &str) {
    for (from, to) in parse_turn(turn).expect("valid notation") {
        engine
            .attempt_interaction(Interaction::Piece { row: from.0 as i32, col: from.1 as i32 })
            .unwrap_or_else(|e| panic!("{turn}: selecting {from:?} failed: {e}"));
        engine
            .attempt_interaction(Interaction::Cell { row: to.0 as i32, col: to.1 as i32 })
            .unwrap_or_else(|e| panic!("{turn}: moving to {to:?} failed: {e}"));
    }
}

#[test]
fn capture_from_five_two_over_four_three() {
    let mut engine = engine_with(&[(Color::White, 5, 2), (Color::Black, 4, 3), (Color::Black, 0, 1)]);
    engine.click(5, 2).expect("select");
    let result = engine.click(3, 4).expect("capture is legal");
    let captured = result.captured.expect("a piece was removed");
    assert_eq!((captured.row, captured.col, captured.color), (4, 3, Color::Black));
    assert!(engine.board().is_empty(4, 3));
}

#[test]
fn blocked_move_leaves_state_alone() {
    let mut engine = engine_with(&[(Color::White, 5, 2), (Color::Black, 4, 1), (Color::Black, 0, 1)]);
    engine.click(5, 2).expect("select");
    let before = engine.game_state().clone();
    let board_before = engine.board().to_string();
    // (4,1) holds a piece, so the engine treats the click as a piece click.
    assert_eq!(engine.click(4, 1), Err(Rejection::NotYourTurn { current: Color::White }));
    assert_eq!(
        engine.attempt_interaction(Interaction::Cell { row: 4, col: 1 }),
        Err(Rejection::IllegalDestination { row: 4, col: 1 })
    );
    assert_eq!(engine.game_state(), &before);
    assert_eq!(engine.board().to_string(), board_before);
}

#[test]
fn pending_chain_rejects_other_pieces_until_resolved() {
    let mut engine = engine_with(&[
        (Color::White, 5, 2),
        (Color::White, 6, 7),
        (Color::Black, 4, 3),
        (Color::Black, 2, 3),
        (Color::Black, 0, 7),
    ]);
    engine.click(5, 2).expect("select");
    let result = engine.click(3, 4).expect("first jump");
    let hero = engine.board().piece_at(3, 4).expect("capturing piece").id;
    assert_eq!(result.state, EngineState::ChainCapture { piece: hero });

    assert_eq!(engine.click(6, 7), Err(Rejection::ChainLocked));
    assert_eq!(engine.game_state().pending_capture, Some(hero));
    assert_eq!(engine.game_state().current_player, Color::White);

    engine.click(1, 2).expect("second jump");
    assert_eq!(engine.state(), EngineState::Idle);
    assert_eq!(engine.game_state().current_player, Color::Black);
}

#[test]
fn wiping_out_black_ends_the_game() {
    let mut engine = engine_with(&[(Color::White, 5, 2), (Color::White, 7, 0), (Color::Black, 4, 3)]);
    engine.click(5, 2).expect("select");
    engine.click(3, 4).expect("capture");
    assert!(engine.game_state().game_over);
    assert_eq!(engine.game_state().winner, Some(Color::White));
    for (row, col) in [(7, 0), (6, 1), (3, 4), (2, 5)] {
        assert_eq!(engine.click(row, col), Err(Rejection::GameOver));
    }
    engine.complete_transition();
    assert_eq!(engine.click(7, 0), Err(Rejection::GameOver));
    assert_eq!(engine.board().count(Color::White), 2);
}

#[test]
fn short_opening_with_exchange() {
    let mut engine = Engine::new(GameConfig::headless()).expect("valid config");
    // White 22-18, black 11-15, white 18x11, black 8x15 recaptures.
    for turn in ["22-18", "11-15", "18x11", "8x15"] {
        play(&mut engine, turn);
    }
    assert_eq!(engine.board().count(Color::White), 11);
    assert_eq!(engine.board().count(Color::Black), 11);
    assert_eq!(engine.captured_count(Color::White), 1);
    assert_eq!(engine.captured_count(Color::Black), 1);
    assert_eq!(engine.game_state().current_player, Color::White);
    let notation: Vec<String> = engine.history().iter().map(|m| m.to_notation()).collect();
    assert_eq!(notation, vec!["22-18", "11-15", "18x11", "8x15"]);
}

#[test]
fn saved_position_loads_into_the_engine() {
    let mut board = Board::empty();
    board.place(Color::White, 5, 2).expect("dark square");
    board.place(Color::Black, 4, 3).expect("dark square");
    let json = serde_json::to_string(&board).expect("board serializes");

    let loaded: Board = serde_json::from_str(&json).expect("untouched board loads");
    let mut engine = Engine::from_position(loaded, GameConfig::headless());
    engine.click(5, 2).expect("select");
    engine.click(3, 4).expect("capture");
    assert_eq!(engine.game_state().winner, Some(Color::White));

    // A record claiming to stand off the board never reaches the engine.
    let mut tampered: serde_json::Value = serde_json::from_str(&json).expect("valid json");
    tampered["squares"][5][2]["row"] = 8.into();
    tampered["squares"][5][2]["col"] = 1.into();
    assert!(serde_json::from_value::<Board>(tampered).is_err());
}
