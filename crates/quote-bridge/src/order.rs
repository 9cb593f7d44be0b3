//! Order requests built from the quote on display.

use serde::{Deserialize, Serialize};
use tracing::info;
use uuid::Uuid;

use print_types::PrintConfig;

use crate::session::{BridgeError, QuoteSession};

/// Shop branding and the chat number orders are sent to.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct OrderSettings {
    pub shop_name: String,
    pub currency_symbol: String,
    /// International number without `+` or spaces, as `wa.me` expects.
    pub order_phone: String,
}

impl Default for OrderSettings {
    fn default() -> Self {
        Self {
            shop_name: "MagniPrints".to_string(),
            currency_symbol: "₹".to_string(),
            order_phone: "918800000000".to_string(),
        }
    }
}

/// A print order ready to hand to the shop's messaging channel.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OrderRequest {
    pub id: Uuid,
    pub model_name: String,
    pub config: PrintConfig,
    pub total_cost: u64,
    pub summary: String,
    /// Chat link with the summary prefilled.
    pub order_url: String,
}

/// Build an order for the current model and quote.
pub fn order_request(
    session: &QuoteSession,
    settings: &OrderSettings,
) -> Result<OrderRequest, BridgeError> {
    let model = session.model().ok_or(BridgeError::NoModel)?;
    let current = session.current_quote().ok_or(BridgeError::NoQuote)?;

    let model_name = model.source.display_name();
    let config = current.config;
    let total_cost = current.quote.estimate.total_cost;
    let summary = order_summary(&model_name, &config, total_cost, settings);
    let order_url = order_url(&settings.order_phone, &summary);

    let id = Uuid::new_v4();
    info!(%id, model = %model_name, total_cost, "order request built");

    Ok(OrderRequest {
        id,
        model_name,
        config,
        total_cost,
        summary,
        order_url,
    })
}

/// `wa.me` link that opens a chat with `text` prefilled.
pub fn order_url(phone: &str, text: &str) -> String {
    format!("https://wa.me/{phone}?text={}", urlencoding::encode(text))
}

/// Plain-text order message.
pub fn order_summary(
    model_name: &str,
    config: &PrintConfig,
    total_cost: u64,
    settings: &OrderSettings,
) -> String {
    format!(
        "Hi {shop}! I'd like to order a custom print:\n\n\
         Model: {model_name}\n\
         Material: {material}\n\
         Layer Height: {layer}mm\n\
         Infill: {infill}%\n\
         Supports: {supports}\n\
         Estimated Price: {currency}{total_cost}\n\n\
         Please confirm availability.",
        shop = settings.shop_name,
        material = config.material.label(),
        layer = config.layer_height_mm,
        infill = config.infill_percent,
        supports = config.supports,
        currency = settings.currency_symbol,
    )
}
