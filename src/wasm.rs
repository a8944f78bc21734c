//! JavaScript surface over [`Session`].

use wasm_bindgen::prelude::*;

use crate::ai::{Agent, HeuristicAgent};
use crate::record::GameRecord;
use crate::session::Session;
use crate::types::{Action, Position};

#[wasm_bindgen]
pub fn wasm_ready() -> bool {
    true
}

#[wasm_bindgen]
pub struct WasmSession {
    session: Session,
}

#[wasm_bindgen]
impl WasmSession {
    #[wasm_bindgen(constructor)]
    pub fn new(dim: usize) -> Result<WasmSession, JsError> {
        Ok(Self {
            session: Session::new(dim)?,
        })
    }

    /// Restores a session from a JSON action log after verifying it.
    #[wasm_bindgen(js_name = fromRecord)]
    pub fn from_record(json: &str) -> Result<WasmSession, JsError> {
        let record = GameRecord::from_json(json)?;
        Ok(Self {
            session: Session::from_record(&record)?,
        })
    }

    /// Current `BoardSnapshot`.
    pub fn snapshot(&self) -> Result<JsValue, JsError> {
        Ok(serde_wasm_bindgen::to_value(&self.session.snapshot())?)
    }

    pub fn place(&mut self, row: usize, col: usize) -> Result<JsValue, JsError> {
        self.session.apply(Action::Place(Position::new(row, col)))?;
        self.snapshot()
    }

    pub fn pass(&mut self) -> Result<JsValue, JsError> {
        self.session.apply(Action::Pass)?;
        self.snapshot()
    }

    /// Lets the built-in minimax agent play the side to move.
    #[wasm_bindgen(js_name = engineMove)]
    pub fn engine_move(&mut self, depth: u32, seed: u64) -> Result<JsValue, JsError> {
        let mut agent = HeuristicAgent::score_minimax(depth.max(1), seed);
        let action = agent.choose_action(self.session.state(), self.session.previous())?;
        self.session.apply(action)?;
        self.snapshot()
    }

    /// Terminal reward, or `undefined` while the game runs.
    pub fn outcome(&self) -> Option<i8> {
        self.session.outcome()
    }

    #[wasm_bindgen(js_name = recordJson)]
    pub fn record_json(&self) -> Result<String, JsError> {
        Ok(self.session.record().to_json()?)
    }
}
