//! WASM entry points for the web worker.
//!
//! Only compiled for the `wasm32` target. JavaScript calls `init` once and
//! then feeds every UI event through `process_message`.

use std::cell::RefCell;

use wasm_bindgen::prelude::*;

use crate::dispatch;
use crate::messages::{QuoteToUi, UiToQuote};
use crate::session::QuoteSession;
use price_estimator::PricingConfig;

// Single-threaded in the web worker.
thread_local! {
    static SESSION: RefCell<Option<QuoteSession>> = const { RefCell::new(None) };
}

/// Initialize the worker with the default storefront pricing.
#[wasm_bindgen]
pub fn init() {
    console_error_panic_hook::set_once();
    SESSION.with(|cell| {
        *cell.borrow_mut() = Some(QuoteSession::new());
    });
}

/// Initialize the worker with a pricing override in JSON.
///
/// Returns an empty string on success, otherwise the error message.
#[wasm_bindgen]
pub fn init_with_pricing(pricing_json: &str) -> String {
    console_error_panic_hook::set_once();
    let session = PricingConfig::from_json(pricing_json)
        .map_err(crate::session::BridgeError::from)
        .and_then(QuoteSession::with_pricing);
    match session {
        Ok(session) => {
            SESSION.with(|cell| *cell.borrow_mut() = Some(session));
            String::new()
        }
        Err(e) => e.to_string(),
    }
}

/// Process a JSON `UiToQuote` message and return a JSON `QuoteToUi` response.
#[wasm_bindgen]
pub fn process_message(json_input: &str) -> String {
    let response = SESSION.with(|cell| {
        let mut slot = cell.borrow_mut();
        let Some(session) = slot.as_mut() else {
            return QuoteToUi::Error {
                message: "quote worker not initialized; call init() first".to_string(),
            };
        };

        match serde_json::from_str::<UiToQuote>(json_input) {
            Ok(msg) => dispatch::dispatch(session, msg),
            Err(e) => QuoteToUi::Error {
                message: format!("Failed to parse message: {e}"),
            },
        }
    });

    serde_json::to_string(&response).unwrap_or_else(|e| {
        format!(r#"{{"type":"Error","message":"Serialization failed: {e}"}}"#)
    })
}
