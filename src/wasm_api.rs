use crate::board::Board;
use crate::config::GameConfig;
use crate::engine::{Engine, EngineState, Interaction, TransitionResult};
use crate::error::Rejection;
use crate::moves::Move;
use crate::piece::Color;
use serde::Serialize;
use wasm_bindgen::prelude::*;

#[wasm_bindgen(start)]
pub fn init_panic_hook() {
    #[cfg(feature = "console_error_panic_hook")]
    console_error_panic_hook::set_once();
}

#[derive(Serialize)]
struct SquarePiece {
    id: u16,
    color: String,
}

#[derive(Serialize)]
struct MoveJson {
    from: [usize; 2],
    to: [usize; 2],
    captured: Option<[usize; 2]>,
    notation: String,
}

#[derive(Serialize)]
struct BoardState {
    squares: Vec<Vec<Option<SquarePiece>>>,
    current_turn: String,
    state: EngineState,
    selected: Option<[usize; 2]>,
    game_over: bool,
    winner: Option<String>,
    is_moving: bool,
    has_legal_move: bool,
    legal_destinations: Vec<MoveJson>,
    captured_white: usize,
    captured_black: usize,
    last_move: Option<MoveJson>,
}

#[derive(Serialize)]
struct InteractionResult {
    #[serde(flatten)]
    transition: Option<TransitionResult>,
    error: Option<String>,
    board_state: BoardState,
}

fn color_to_string(c: Color) -> String {
    match c {
        Color::White => "White".to_string(),
        Color::Black => "Black".to_string(),
    }
}

fn move_to_json(m: &Move) -> MoveJson {
    MoveJson {
        from: [m.from.0, m.from.1],
        to: [m.to.0, m.to.1],
        captured: m.captured.map(|(r, c)| [r, c]),
        notation: m.to_notation(),
    }
}

fn build_board_state(engine: &Engine) -> BoardState {
    let board: &Board = engine.board();
    let squares: Vec<Vec<Option<SquarePiece>>> = (0..8)
        .map(|r| {
            (0..8)
                .map(|c| {
                    board.piece_at(r, c).map(|p| SquarePiece {
                        id: p.id.0,
                        color: color_to_string(p.color),
                    })
                })
                .collect()
        })
        .collect();

    let gs = engine.game_state();
    let selected = gs.selected_piece.and_then(|id| board.find(id));
    let legal_destinations: Vec<MoveJson> = selected
        .map(|p| engine.legal_destinations(p.id).iter().map(move_to_json).collect())
        .unwrap_or_default();

    BoardState {
        squares,
        current_turn: color_to_string(gs.current_player),
        state: engine.state(),
        selected: selected.map(|p| [p.row, p.col]),
        game_over: gs.game_over,
        winner: gs.winner.map(color_to_string),
        is_moving: gs.is_moving,
        has_legal_move: engine.has_legal_move(),
        legal_destinations,
        captured_white: engine.captured_count(Color::White),
        captured_black: engine.captured_count(Color::Black),
        last_move: engine.last_move().map(move_to_json),
    }
}

#[wasm_bindgen]
pub struct Game {
    engine: Engine,
}

impl Default for Game {
    fn default() -> Self {
        Self::new()
    }
}

#[wasm_bindgen]
impl Game {
    #[wasm_bindgen(constructor)]
    pub fn new() -> Game {
        Game { engine: Engine::default() }
    }

    /// Build a game from a JSON config such as `{"first_player": "Black"}`.
    pub fn with_config(json: &str) -> Result<Game, JsValue> {
        let config = GameConfig::from_json(json).map_err(|e| JsValue::from_str(&e.to_string()))?;
        let engine = Engine::new(config).map_err(|e| JsValue::from_str(&e.to_string()))?;
        Ok(Game { engine })
    }

    pub fn get_board_state(&self) -> JsValue {
        let state = build_board_state(&self.engine);
        serde_wasm_bindgen::to_value(&state).unwrap_or(JsValue::NULL)
    }

    /// Click on a cell, letting the engine decide whether a piece was hit.
    pub fn click(&mut self, row: i32, col: i32) -> JsValue {
        let outcome = self.engine.click(row, col);
        self.respond(outcome)
    }

    pub fn select(&mut self, row: i32, col: i32) -> JsValue {
        let outcome = self.engine.attempt_interaction(Interaction::Piece { row, col });
        self.respond(outcome)
    }

    pub fn move_to(&mut self, row: i32, col: i32) -> JsValue {
        let outcome = self.engine.attempt_interaction(Interaction::Cell { row, col });
        self.respond(outcome)
    }

    pub fn legal_destinations(&self, row: i32, col: i32) -> JsValue {
        let moves: Vec<MoveJson> = self
            .engine
            .board()
            .piece_at(row, col)
            .map(|p| self.engine.legal_destinations(p.id).iter().map(move_to_json).collect())
            .unwrap_or_default();
        serde_wasm_bindgen::to_value(&moves).unwrap_or(JsValue::NULL)
    }

    /// Called once the move animation has finished.
    pub fn transition_complete(&mut self) -> JsValue {
        self.engine.complete_transition();
        self.get_board_state()
    }

    pub fn new_game(&mut self) -> JsValue {
        self.engine.new_game();
        self.get_board_state()
    }

    pub fn build_info() -> String {
        format!("{} {}", env!("CARGO_PKG_VERSION"), env!("BUILD_TIMESTAMP"))
    }
}

impl Game {
    fn respond(&self, outcome: Result<TransitionResult, Rejection>) -> JsValue {
        let (transition, error) = match outcome {
            Ok(t) => (Some(t), None),
            Err(reason) => (None, Some(reason.to_string())),
        };
        let result = InteractionResult {
            transition,
            error,
            board_state: build_board_state(&self.engine),
        };
        serde_wasm_bindgen::to_value(&result).unwrap_or(JsValue::NULL)
    }
}
