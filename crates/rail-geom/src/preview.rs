//! Speculative batch fitting for placement previews.
//!
//! While the player drags a track endpoint, the UI asks for one fit per
//! candidate target every frame.  Solving is pure, so a preview can run on
//! any thread against a read-only view of the endpoint constraints without
//! touching the network store.

use rail_core::{GeometryConfig, TrackType};

use crate::{Endpoint, GeomResult, TrackShape, plan_shape};

/// Solve every `(start, end)` candidate pair against one track class.
///
/// Results line up with the input order, one per candidate; failed fits stay
/// in place as errors so the UI can grey out exactly the candidates that
/// were rejected.  With the `parallel` feature the batch fans out over
/// Rayon's pool; candidates are independent, so the output is identical
/// either way.
pub fn plan_shapes(
    candidates: &[(Endpoint, Endpoint)],
    track_type: &TrackType,
    config: &GeometryConfig,
) -> Vec<GeomResult<TrackShape>> {
    #[cfg(feature = "parallel")]
    {
        use rayon::prelude::*;
        candidates
            .par_iter()
            .map(|&(start, end)| plan_shape(start, end, track_type, config))
            .collect()
    }

    #[cfg(not(feature = "parallel"))]
    {
        candidates
            .iter()
            .map(|&(start, end)| plan_shape(start, end, track_type, config))
            .collect()
    }
}
