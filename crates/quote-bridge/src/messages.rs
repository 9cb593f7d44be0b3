use serde::{Deserialize, Serialize};

use mesh_analysis::TriangleMesh;
use print_types::{ModelStatistics, PriceEstimate, PrintConfig, SupportMode, ViewportFit};

use crate::order::OrderRequest;

/// Messages from the storefront UI to the quoting worker.
/// Serialized as JSON for postMessage transfer.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum UiToQuote {
    // -- Model --
    /// A customer upload, base64-encoded STL bytes.
    LoadStl { file_name: String, data_base64: String },
    /// One of the shop's sample models, already triangulated.
    LoadMesh { name: String, mesh: TriangleMesh },
    ClearModel,

    // -- Print settings --
    SetMaterial { material: String },
    /// Raw slider value; clamped to 0..=100.
    SetInfill { percent: i64 },
    SetLayerHeight { mm: f64 },
    SetSupports { supports: SupportMode },

    // -- Preview --
    /// Fit the model into a cube of the given edge length, or the default.
    FitViewport {
        #[serde(default)]
        target_size: Option<f64>,
    },

    // -- Ordering --
    RequestOrder,
}

/// Messages from the quoting worker back to the UI.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum QuoteToUi {
    /// A fresh quote for the latest model and settings.
    QuoteUpdated {
        generation: u64,
        config: PrintConfig,
        statistics: ModelStatistics,
        estimate: PriceEstimate,
        watertight: bool,
    },

    /// Settings changed but there is no model to price yet.
    ConfigUpdated { config: PrintConfig },

    ModelCleared,

    ViewportFitted { fit: ViewportFit },

    /// Order text is ready to be handed to the shop.
    OrderReady { order: OrderRequest },

    Error { message: String },
}
