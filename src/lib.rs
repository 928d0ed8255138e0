// Copyright 2026 Hypermesh Foundation. All rights reserved.
// Cluster Slot Engine ("Sugar Rush")

pub mod cascade;
pub mod cluster;
pub mod grid;
pub mod paytable;
pub mod pool;
pub mod session;
pub mod types;

pub use session::{SlotSession, SpinError};
pub use types::*;

use wasm_bindgen::prelude::*;

#[wasm_bindgen]
extern "C" {
    #[wasm_bindgen(js_namespace = console)]
    fn log(s: &str);
}

// ─── WASM Interface ──────────────────────────────────────────────────────────
//
// The rendering layer consumes serialized outcome records; it never drives
// game-state mutation itself. Errors surface as thrown JS strings.

#[wasm_bindgen]
impl SlotSession {
    #[wasm_bindgen(constructor)]
    pub fn new(seed: u64) -> Self {
        #[cfg(target_arch = "wasm32")]
        std::panic::set_hook(Box::new(console_error_panic_hook::hook));

        SlotSession::with_seed(seed)
    }

    /// Run one paid spin (and its free-spin chain). Returns the full
    /// `SpinOutcome` record, including per-cascade detonation lists for
    /// animation playback.
    pub fn spin(&mut self, bet: f64) -> Result<JsValue, JsValue> {
        match self.spin_core(bet) {
            Ok(outcome) => {
                Ok(serde_wasm_bindgen::to_value(&outcome).unwrap_or(JsValue::NULL))
            }
            Err(e) => Err(JsValue::from_str(&e.to_string())),
        }
    }

    pub fn get_grid(&self) -> JsValue {
        serde_wasm_bindgen::to_value(self.grid()).unwrap_or(JsValue::NULL)
    }

    pub fn get_multipliers(&self) -> JsValue {
        serde_wasm_bindgen::to_value(&self.multipliers()).unwrap_or(JsValue::NULL)
    }

    pub fn get_stats(&self) -> JsValue {
        serde_wasm_bindgen::to_value(&self.stats()).unwrap_or(JsValue::NULL)
    }

    pub fn get_balance(&self) -> f64 {
        self.balance()
    }

    pub fn get_free_spins(&self) -> u32 {
        self.free_spins_remaining()
    }

    pub fn add_funds(&mut self, amount: f64) {
        self.deposit(amount);
    }

    /// Reset the session to its initial state with a new seed.
    pub fn reset(&mut self, seed: u64) {
        *self = SlotSession::with_seed(seed);
    }
}
