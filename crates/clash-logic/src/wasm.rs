//! WASM bindings for the browser front end

#![cfg(feature = "wasm")]

use wasm_bindgen::prelude::*;
use crate::{Choice, Difficulty, Event, MatchConfig, MatchState, PowerUpKind, SeededRng};
use crate::game::PowerUpView;
use crate::power_up::initial_power_ups;

/// Route `log` output to the browser console
#[wasm_bindgen(start)]
pub fn start() {
    // a second module instance may already have installed a logger
    let _ = console_log::init_with_level(log::Level::Info);
}

/// One player's match, owned by the page
///
/// Every event method returns `true` if the event was accepted and
/// `false` if it was ignored in the current phase. Unknown names throw.
#[wasm_bindgen]
pub struct ClashSession {
    state: MatchState,
    rng: SeededRng,
}

#[wasm_bindgen]
impl ClashSession {
    /// New session seeded from `Math.random`
    #[wasm_bindgen(constructor)]
    pub fn new() -> ClashSession {
        let seed = (js_sys::Math::random() * u64::MAX as f64) as u64;
        Self::with_seed(seed)
    }

    /// New session with a fixed seed, for replays
    #[wasm_bindgen(js_name = withSeed)]
    pub fn with_seed(seed: u64) -> ClashSession {
        ClashSession {
            state: MatchState::new(MatchConfig::standard()),
            rng: SeededRng::new(seed),
        }
    }

    #[wasm_bindgen(js_name = selectDifficulty)]
    pub fn select_difficulty(&mut self, difficulty: &str) -> Result<bool, JsError> {
        let difficulty: Difficulty = difficulty.parse()?;
        Ok(self.send(Event::SelectDifficulty(difficulty)))
    }

    #[wasm_bindgen(js_name = selectChoice)]
    pub fn select_choice(&mut self, choice: &str) -> Result<bool, JsError> {
        let choice: Choice = choice.parse()?;
        Ok(self.send(Event::SelectChoice(choice)))
    }

    #[wasm_bindgen(js_name = activatePowerUp)]
    pub fn activate_power_up(&mut self, kind: &str) -> Result<bool, JsError> {
        let kind: PowerUpKind = kind.parse()?;
        Ok(self.send(Event::ActivatePowerUp(kind)))
    }

    #[wasm_bindgen(js_name = rerollChoice)]
    pub fn reroll_choice(&mut self, choice: &str) -> Result<bool, JsError> {
        let choice: Choice = choice.parse()?;
        Ok(self.send(Event::Reroll(choice)))
    }

    /// Call once `settleDelayMs` has passed after a resolved round, with the
    /// ticket read from `pendingSettle()` when the timer was scheduled
    pub fn settle(&mut self, ticket: u64) -> bool {
        self.send(Event::Settle { ticket })
    }

    /// Ticket of the round currently resolving, if any
    #[wasm_bindgen(js_name = pendingSettle)]
    pub fn pending_settle(&self) -> Option<u64> {
        self.state.pending_settle()
    }

    #[wasm_bindgen(js_name = restartMatch)]
    pub fn restart_match(&mut self) -> bool {
        self.send(Event::Restart)
    }

    #[wasm_bindgen(js_name = settleDelayMs)]
    pub fn settle_delay_ms(&self) -> u32 {
        self.state.config().settle_delay_ms
    }

    /// Current state as a plain JS object
    pub fn snapshot(&self) -> Result<JsValue, JsError> {
        serde_wasm_bindgen::to_value(&self.state.snapshot())
            .map_err(|e| JsError::new(&format!("Serialization error: {}", e)))
    }

    /// Current state as JSON text
    #[wasm_bindgen(js_name = snapshotJson)]
    pub fn snapshot_json(&self) -> Result<String, JsError> {
        serde_json::to_string(&self.state.snapshot())
            .map_err(|e| JsError::new(&format!("Serialization error: {}", e)))
    }

    fn send(&mut self, event: Event) -> bool {
        self.state.apply(event, &mut self.rng).is_ok()
    }
}

impl Default for ClashSession {
    fn default() -> Self {
        Self::new()
    }
}

/// All power-ups with their display text, fresh and ready to use
#[wasm_bindgen(js_name = getPowerUpCatalogue)]
pub fn get_power_up_catalogue() -> Result<JsValue, JsError> {
    let views: Vec<PowerUpView> = initial_power_ups().iter().map(PowerUpView::from).collect();

    serde_wasm_bindgen::to_value(&views)
        .map_err(|e| JsError::new(&format!("Serialization error: {}", e)))
}
