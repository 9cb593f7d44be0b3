//! Message-driven quoting session for the storefront's UI worker.
//!
//! The UI posts [`UiToQuote`] messages; [`dispatch`] applies them to a
//! [`QuoteSession`] and answers with a [`QuoteToUi`]. Pricing can also be
//! offloaded through [`QuoteSession::submit`] and [`QuoteSession::accept`],
//! which only ever installs the result for the latest state.

pub mod dispatch;
pub mod messages;
pub mod order;
pub mod session;

#[cfg(target_arch = "wasm32")]
pub mod wasm_api;

pub use dispatch::dispatch;
pub use messages::{QuoteToUi, UiToQuote};
pub use order::{order_request, order_summary, order_url, OrderRequest, OrderSettings};
pub use session::{
    Acceptance, BridgeError, CurrentQuote, JobResult, LoadedModel, ModelSource, QuoteJob,
    QuoteSession,
};
