use print_types::ViewportFit;

use crate::bounds::BoundingBox;

/// Largest model extent in the preview, in scene units.
pub const DEFAULT_VIEWPORT_SIZE: f64 = 8.0;

/// Height the fitted model is lifted by so it rests above the grid plane.
pub const VIEWPORT_LIFT: f64 = 1.0;

/// Scale and translation that center a model and fit its largest side to `target_size`.
///
/// Pure: the caller applies the transform to whatever it renders. A box with
/// zero extent on every axis keeps scale 1.
pub fn normalize_to_viewport(bounds: &BoundingBox, target_size: f64) -> ViewportFit {
    let size = bounds.size();
    let max_dim = size.max_component();
    let scale = if max_dim > 0.0 && max_dim.is_finite() {
        target_size / max_dim
    } else {
        1.0
    };

    let center = bounds.center().scaled(scale);
    ViewportFit {
        scale,
        translation: [-center.x, -center.y + VIEWPORT_LIFT, -center.z],
        fitted_size: size.scaled(scale).to_array(),
    }
}
