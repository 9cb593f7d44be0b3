use std::sync::Arc;

use serde::{Deserialize, Serialize};
use tracing::{debug, info, instrument, warn};

use mesh_analysis::{compute_bounds, is_watertight, normalize_to_viewport, BoundingBox, TriangleMesh};
use price_estimator::{EstimateError, PriceEstimator, PricingConfig, Quote};
use print_types::{MaterialKind, PrintConfig, SupportMode, ViewportFit};

use crate::order::{order_request, OrderRequest, OrderSettings};

/// Where the loaded model came from.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum ModelSource {
    /// A file uploaded by the customer.
    Upload { file_name: String },
    /// One of the shop's sample models.
    Sample { name: String },
}

impl ModelSource {
    /// Name shown to the customer and quoted in order requests.
    pub fn display_name(&self) -> String {
        match self {
            ModelSource::Upload { file_name } => file_name.clone(),
            ModelSource::Sample { name } => format!("{name} (sample)"),
        }
    }
}

/// The model currently loaded into a session.
#[derive(Debug, Clone)]
pub struct LoadedModel {
    pub source: ModelSource,
    pub mesh: Arc<TriangleMesh>,
    pub bounds: BoundingBox,
    /// Whether every edge is shared by exactly two triangles.
    pub watertight: bool,
}

/// The quote on display together with the state it was computed for.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CurrentQuote {
    pub generation: u64,
    pub config: PrintConfig,
    pub quote: Quote,
}

/// A snapshot of everything needed to price the model once.
///
/// Jobs own their inputs, so they can run on another thread while the
/// session keeps accepting edits.
#[derive(Debug, Clone)]
pub struct QuoteJob {
    pub generation: u64,
    mesh: Arc<TriangleMesh>,
    config: PrintConfig,
    estimator: PriceEstimator,
}

impl QuoteJob {
    pub fn config(&self) -> &PrintConfig {
        &self.config
    }

    /// Run the full pipeline for this snapshot.
    pub fn run(self) -> JobResult {
        let result = self.estimator.quote(&self.mesh, &self.config);
        JobResult {
            generation: self.generation,
            config: self.config,
            result,
        }
    }
}

/// Output of a [`QuoteJob`], tagged with the generation it was started for.
#[derive(Debug, Clone, PartialEq)]
pub struct JobResult {
    pub generation: u64,
    pub config: PrintConfig,
    pub result: Result<Quote, EstimateError>,
}

/// What [`QuoteSession::accept`] did with a finished job.
#[derive(Debug, Clone, PartialEq)]
pub enum Acceptance {
    /// The result belonged to the latest state and is now on display.
    Installed(Quote),
    /// A newer request was issued after this job started; the result was dropped.
    Stale { generation: u64, current: u64 },
}

/// One customer's quoting session.
///
/// Every change to the model or the print settings bumps a generation
/// counter. Results are only installed when their generation still matches,
/// so a slow computation for an old state can never overwrite a newer quote.
#[derive(Debug, Clone)]
pub struct QuoteSession {
    model: Option<LoadedModel>,
    config: PrintConfig,
    estimator: PriceEstimator,
    generation: u64,
    current: Option<CurrentQuote>,
    order_settings: OrderSettings,
}

impl QuoteSession {
    /// Create a session with the default storefront pricing.
    pub fn new() -> Self {
        Self::with_estimator(PriceEstimator::default())
    }

    pub fn with_pricing(pricing: PricingConfig) -> Result<Self, BridgeError> {
        Ok(Self::with_estimator(PriceEstimator::new(pricing)?))
    }

    fn with_estimator(estimator: PriceEstimator) -> Self {
        Self {
            model: None,
            config: PrintConfig::default(),
            estimator,
            generation: 0,
            current: None,
            order_settings: OrderSettings::default(),
        }
    }

    pub fn with_order_settings(mut self, settings: OrderSettings) -> Self {
        self.order_settings = settings;
        self
    }

    pub fn config(&self) -> &PrintConfig {
        &self.config
    }

    pub fn model(&self) -> Option<&LoadedModel> {
        self.model.as_ref()
    }

    pub fn pricing(&self) -> &PricingConfig {
        self.estimator.pricing()
    }

    pub fn generation(&self) -> u64 {
        self.generation
    }

    /// The quote matching the latest state, if one has been installed.
    pub fn current_quote(&self) -> Option<&CurrentQuote> {
        self.current.as_ref()
    }

    /// Replace the model and reprice it.
    #[instrument(skip(self, mesh), fields(model = %source.display_name()))]
    pub fn load_mesh(
        &mut self,
        source: ModelSource,
        mesh: TriangleMesh,
    ) -> Result<Option<Quote>, BridgeError> {
        let bounds = compute_bounds(&mesh)?;
        let watertight = is_watertight(&mesh);
        info!(watertight, vertices = mesh.vertex_count(), "model loaded");

        self.model = Some(LoadedModel {
            source,
            mesh: Arc::new(mesh),
            bounds,
            watertight,
        });
        self.recompute()
    }

    /// Drop the model. Any quote on display goes with it.
    pub fn clear_model(&mut self) {
        self.model = None;
        self.current = None;
        self.generation += 1;
    }

    pub fn set_material(&mut self, material: MaterialKind) -> Result<Option<Quote>, BridgeError> {
        self.pricing().material(material)?;
        self.config = self.config.with_material(material);
        self.recompute()
    }

    /// Select a material by its display or wire name.
    pub fn set_material_name(&mut self, name: &str) -> Result<Option<Quote>, BridgeError> {
        let material: MaterialKind = name.parse().map_err(EstimateError::from)?;
        self.set_material(material)
    }

    /// Set infill from a raw slider value; out-of-range values are clamped.
    pub fn set_infill(&mut self, percent: i64) -> Result<Option<Quote>, BridgeError> {
        self.config = self.config.with_infill_clamped(percent);
        self.recompute()
    }

    /// Set the layer height. Invalid heights are rejected and leave the
    /// current settings untouched.
    pub fn set_layer_height(&mut self, layer_height_mm: f64) -> Result<Option<Quote>, BridgeError> {
        let candidate = self.config.with_layer_height(layer_height_mm);
        price_estimator::validate_print_config(&candidate)?;
        self.config = candidate;
        self.recompute()
    }

    /// Supports are recorded for the order but do not change the price.
    pub fn set_supports(&mut self, supports: SupportMode) -> Result<Option<Quote>, BridgeError> {
        self.config = self.config.with_supports(supports);
        self.recompute()
    }

    /// Snapshot the current state for pricing, superseding any job in flight.
    pub fn submit(&mut self) -> Result<QuoteJob, BridgeError> {
        let model = self.model.as_ref().ok_or(BridgeError::NoModel)?;
        self.generation += 1;
        debug!(generation = self.generation, "quote job submitted");
        Ok(QuoteJob {
            generation: self.generation,
            mesh: Arc::clone(&model.mesh),
            config: self.config,
            estimator: self.estimator.clone(),
        })
    }

    /// Install a finished job if it is still the latest one.
    ///
    /// A failed job that is current clears the displayed quote and returns
    /// its error.
    pub fn accept(&mut self, job: JobResult) -> Result<Acceptance, BridgeError> {
        if job.generation != self.generation {
            warn!(
                generation = job.generation,
                current = self.generation,
                "discarding stale quote"
            );
            return Ok(Acceptance::Stale {
                generation: job.generation,
                current: self.generation,
            });
        }

        match job.result {
            Ok(quote) => {
                self.current = Some(CurrentQuote {
                    generation: job.generation,
                    config: job.config,
                    quote,
                });
                Ok(Acceptance::Installed(quote))
            }
            Err(err) => {
                self.current = None;
                Err(err.into())
            }
        }
    }

    /// Scale and offset that fit the loaded model into the preview viewport.
    pub fn fit_viewport(&self, target_size: f64) -> Result<ViewportFit, BridgeError> {
        let model = self.model.as_ref().ok_or(BridgeError::NoModel)?;
        if !(target_size > 0.0 && target_size.is_finite()) {
            return Err(BridgeError::InvalidViewport { target_size });
        }
        Ok(normalize_to_viewport(&model.bounds, target_size))
    }

    /// Order text for the model and quote on display.
    pub fn order_request(&self) -> Result<OrderRequest, BridgeError> {
        order_request(self, &self.order_settings)
    }

    /// Reprice synchronously. Without a model there is nothing to price, but
    /// the generation still moves so older jobs cannot land.
    fn recompute(&mut self) -> Result<Option<Quote>, BridgeError> {
        if self.model.is_none() {
            self.generation += 1;
            self.current = None;
            return Ok(None);
        }
        let job = self.submit()?;
        match self.accept(job.run())? {
            Acceptance::Installed(quote) => Ok(Some(quote)),
            Acceptance::Stale { .. } => Ok(None),
        }
    }
}

impl Default for QuoteSession {
    fn default() -> Self {
        Self::new()
    }
}

/// Errors from the quote bridge layer.
#[derive(Debug, thiserror::Error)]
pub enum BridgeError {
    #[error("no model loaded")]
    NoModel,

    #[error("no quote available for the current settings")]
    NoQuote,

    #[error("viewport size must be positive, got {target_size}")]
    InvalidViewport { target_size: f64 },

    #[error(transparent)]
    Estimate(#[from] EstimateError),

    #[error(transparent)]
    Analysis(#[from] mesh_analysis::AnalysisError),

    #[error("STL import failed: {0}")]
    Stl(#[from] stl_import::StlError),

    #[error("could not decode upload: {reason}")]
    Decode { reason: String },
}

#[cfg(test)]
mod tests {
    use super::*;
    use mesh_analysis::Point3d;

    fn unit_tetra() -> TriangleMesh {
        TriangleMesh::indexed(
            vec![
                Point3d::new(0.0, 0.0, 0.0),
                Point3d::new(10.0, 0.0, 0.0),
                Point3d::new(0.0, 10.0, 0.0),
                Point3d::new(0.0, 0.0, 10.0),
            ],
            vec![0, 2, 1, 0, 1, 3, 0, 3, 2, 1, 2, 3],
        )
    }

    fn sample() -> ModelSource {
        ModelSource::Sample {
            name: "tetra".into(),
        }
    }

    #[test]
    fn edits_without_model_only_update_config() {
        let mut session = QuoteSession::new();
        assert_eq!(session.set_infill(250).unwrap(), None);
        assert_eq!(session.config().infill_percent, 100);
        assert!(session.current_quote().is_none());
        assert!(matches!(session.submit(), Err(BridgeError::NoModel)));
    }

    #[test]
    fn load_prices_immediately() {
        let mut session = QuoteSession::new();
        let quote = session.load_mesh(sample(), unit_tetra()).unwrap().unwrap();
        assert_eq!(quote.statistics.triangle_count, 4);
        let current = session.current_quote().unwrap();
        assert_eq!(current.generation, session.generation());
        assert!(session.model().unwrap().watertight);
    }

    #[test]
    fn stale_job_is_discarded() {
        let mut session = QuoteSession::new();
        session.load_mesh(sample(), unit_tetra()).unwrap();

        let slow = session.submit().unwrap();
        session.set_material(MaterialKind::Tpu).unwrap();
        let installed = session.current_quote().unwrap().clone();

        let outcome = session.accept(slow.run()).unwrap();
        assert!(matches!(outcome, Acceptance::Stale { .. }));
        assert_eq!(session.current_quote(), Some(&installed));
        assert_eq!(installed.config.material, MaterialKind::Tpu);
    }

    #[test]
    fn invalid_layer_height_keeps_previous_settings() {
        let mut session = QuoteSession::new();
        session.load_mesh(sample(), unit_tetra()).unwrap();
        let before = *session.config();
        assert!(session.set_layer_height(0.0).is_err());
        assert_eq!(*session.config(), before);
        assert!(session.current_quote().is_some());
    }

    #[test]
    fn unknown_material_name_is_rejected() {
        let mut session = QuoteSession::new();
        let err = session.set_material_name("nylon").unwrap_err();
        assert!(matches!(
            err,
            BridgeError::Estimate(EstimateError::UnknownMaterial { .. })
        ));
    }

    #[test]
    fn clearing_model_drops_quote() {
        let mut session = QuoteSession::new();
        session.load_mesh(sample(), unit_tetra()).unwrap();
        session.clear_model();
        assert!(session.current_quote().is_none());
        assert!(matches!(session.fit_viewport(8.0), Err(BridgeError::NoModel)));
    }

    #[test]
    fn sample_display_name_is_marked() {
        assert_eq!(sample().display_name(), "tetra (sample)");
        let upload = ModelSource::Upload {
            file_name: "bracket.stl".into(),
        };
        assert_eq!(upload.display_name(), "bracket.stl");
    }
}
