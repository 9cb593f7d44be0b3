use base64::engine::general_purpose::STANDARD;
use base64::Engine as _;

use mesh_analysis::DEFAULT_VIEWPORT_SIZE;
use price_estimator::Quote;

use crate::messages::{QuoteToUi, UiToQuote};
use crate::session::{BridgeError, ModelSource, QuoteSession};

/// Dispatch a UI message to the session and return a response.
///
/// Every failure is reported as [`QuoteToUi::Error`]; nothing here panics.
pub fn dispatch(session: &mut QuoteSession, msg: UiToQuote) -> QuoteToUi {
    match handle_message(session, msg) {
        Ok(response) => response,
        Err(e) => QuoteToUi::Error {
            message: e.to_string(),
        },
    }
}

fn handle_message(session: &mut QuoteSession, msg: UiToQuote) -> Result<QuoteToUi, BridgeError> {
    match msg {
        UiToQuote::LoadStl {
            file_name,
            data_base64,
        } => {
            let bytes = STANDARD
                .decode(data_base64.trim())
                .map_err(|e| BridgeError::Decode {
                    reason: e.to_string(),
                })?;
            let mesh = stl_import::parse_stl(&bytes)?;
            let quote = session.load_mesh(ModelSource::Upload { file_name }, mesh)?;
            Ok(quote_response(session, quote))
        }

        UiToQuote::LoadMesh { name, mesh } => {
            let quote = session.load_mesh(ModelSource::Sample { name }, mesh)?;
            Ok(quote_response(session, quote))
        }

        UiToQuote::ClearModel => {
            session.clear_model();
            Ok(QuoteToUi::ModelCleared)
        }

        UiToQuote::SetMaterial { material } => {
            let quote = session.set_material_name(&material)?;
            Ok(quote_response(session, quote))
        }

        UiToQuote::SetInfill { percent } => {
            let quote = session.set_infill(percent)?;
            Ok(quote_response(session, quote))
        }

        UiToQuote::SetLayerHeight { mm } => {
            let quote = session.set_layer_height(mm)?;
            Ok(quote_response(session, quote))
        }

        UiToQuote::SetSupports { supports } => {
            let quote = session.set_supports(supports)?;
            Ok(quote_response(session, quote))
        }

        UiToQuote::FitViewport { target_size } => {
            let fit = session.fit_viewport(target_size.unwrap_or(DEFAULT_VIEWPORT_SIZE))?;
            Ok(QuoteToUi::ViewportFitted { fit })
        }

        UiToQuote::RequestOrder => {
            let order = session.order_request()?;
            Ok(QuoteToUi::OrderReady { order })
        }
    }
}

fn quote_response(session: &QuoteSession, quote: Option<Quote>) -> QuoteToUi {
    let config = *session.config();
    match (quote, session.model()) {
        (Some(quote), Some(model)) => QuoteToUi::QuoteUpdated {
            generation: session.generation(),
            config,
            statistics: quote.statistics,
            estimate: quote.estimate,
            watertight: model.watertight,
        },
        _ => QuoteToUi::ConfigUpdated { config },
    }
}
