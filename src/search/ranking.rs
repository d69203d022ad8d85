//! Proximity ordering of matched documents.

use crate::models::document::{Document, GeoPoint};

/// Mean Earth radius used by the haversine formula.
pub const EARTH_RADIUS_KM: f64 = 6371.0;

/// Great-circle distance between two points, in kilometers.
pub fn haversine_km(a: GeoPoint, b: GeoPoint) -> f64 {
    let phi1 = a.latitude.to_radians();
    let phi2 = b.latitude.to_radians();
    let d_phi = (b.latitude - a.latitude).to_radians();
    let d_lambda = (b.longitude - a.longitude).to_radians();

    let h = (d_phi / 2.0).sin().powi(2)
        + phi1.cos() * phi2.cos() * (d_lambda / 2.0).sin().powi(2);
    let c = 2.0 * h.sqrt().atan2((1.0 - h).sqrt());

    EARTH_RADIUS_KM * c
}

/// Order documents nearest-first relative to `origin`.
///
/// Without an origin the input order is returned as is. Documents without
/// coordinates sort after all located ones. The sort is stable, so equal
/// distances (and all unlocated documents) keep their input order.
pub fn rank_by_distance(documents: Vec<Document>, origin: Option<GeoPoint>) -> Vec<Document> {
    let Some(origin) = origin else {
        return documents;
    };

    let mut keyed: Vec<(f64, Document)> = documents
        .into_iter()
        .map(|doc| {
            let distance = doc
                .coordinates()
                .map_or(f64::INFINITY, |point| haversine_km(origin, point));
            (distance, doc)
        })
        .collect();

    keyed.sort_by(|a, b| a.0.total_cmp(&b.0));
    keyed.into_iter().map(|(_, doc)| doc).collect()
}
