/*!
 * Caption timing.
 *
 * - `estimator`: reading-speed based start/end times for text chunks
 * - `scaler`: proportional remapping of a timeline onto a measured duration
 */

pub mod estimator;
pub mod scaler;

pub use estimator::{TimingConfig, TimingEstimator};
pub use scaler::TimelineScaler;

/// Round seconds to two decimal places
pub(crate) fn round_centis(seconds: f64) -> f64 {
    (seconds * 100.0).round() / 100.0
}
