use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::error::AppError;

const DATE_FORMAT: &str = "%Y-%m-%d";

/// A validated latitude/longitude pair in decimal degrees.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GeoPoint {
    pub latitude: f64,
    pub longitude: f64,
}

impl GeoPoint {
    /// Build a point, rejecting non-finite or out-of-range coordinates.
    ///
    /// The error message names the offending coordinate; callers wrap it in
    /// the error variant that fits their boundary.
    pub fn new(latitude: f64, longitude: f64) -> Result<Self, String> {
        if !latitude.is_finite() || !(-90.0..=90.0).contains(&latitude) {
            return Err(format!(
                "latitude must be between -90 and 90, got {latitude}"
            ));
        }
        if !longitude.is_finite() || !(-180.0..=180.0).contains(&longitude) {
            return Err(format!(
                "longitude must be between -180 and 180, got {longitude}"
            ));
        }
        Ok(Self {
            latitude,
            longitude,
        })
    }
}

/// A stored document, as returned to clients.
///
/// Field names on the wire follow the public API (`titulo`, `autor`, ...).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Document {
    /// Opaque identifier assigned by the store on insert.
    #[serde(rename = "_id", default, skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    #[serde(rename = "titulo")]
    pub title: String,
    #[serde(rename = "autor")]
    pub author: String,
    #[serde(rename = "conteudo")]
    pub content: String,
    /// Serialized as `YYYY-MM-DD`.
    #[serde(rename = "data")]
    pub date: NaiveDate,
    #[serde(default)]
    pub latitude: Option<f64>,
    #[serde(default)]
    pub longitude: Option<f64>,
}

impl Document {
    /// The document's location, if it carries one.
    pub fn coordinates(&self) -> Option<GeoPoint> {
        match (self.latitude, self.longitude) {
            (Some(latitude), Some(longitude)) => Some(GeoPoint {
                latitude,
                longitude,
            }),
            _ => None,
        }
    }

    /// Check the invariants every stored document must satisfy.
    pub fn validate(&self) -> Result<(), AppError> {
        if self.title.trim().is_empty() {
            return Err(AppError::ValidationFailed("titulo cannot be empty".into()));
        }
        if self.author.trim().is_empty() {
            return Err(AppError::ValidationFailed("autor cannot be empty".into()));
        }
        match (self.latitude, self.longitude) {
            (None, None) => Ok(()),
            (Some(latitude), Some(longitude)) => GeoPoint::new(latitude, longitude)
                .map(|_| ())
                .map_err(AppError::ValidationFailed),
            _ => Err(AppError::ValidationFailed(
                "latitude and longitude must be provided together".into(),
            )),
        }
    }
}

/// The request payload for creating a document.
///
/// Every field is optional here so that a missing field is reported by
/// [`NewDocument::into_document`] with a message naming it.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct NewDocument {
    #[serde(rename = "titulo", alias = "title", default)]
    pub title: Option<String>,
    #[serde(rename = "autor", alias = "author", default)]
    pub author: Option<String>,
    #[serde(rename = "conteudo", alias = "content", default)]
    pub content: Option<String>,
    #[serde(rename = "data", alias = "date", default)]
    pub date: Option<String>,
    #[serde(default)]
    pub latitude: Option<f64>,
    #[serde(default)]
    pub longitude: Option<f64>,
}

impl NewDocument {
    /// Validate the request and turn it into a document without an id.
    pub fn into_document(self) -> Result<Document, AppError> {
        let title = required(self.title, "titulo")?;
        let author = required(self.author, "autor")?;
        let content = self
            .content
            .ok_or_else(|| AppError::ValidationFailed("conteudo is required".into()))?;
        let raw_date = required(self.date, "data")?;
        let date = parse_date(&raw_date)?;

        let document = Document {
            id: None,
            title,
            author,
            content,
            date,
            latitude: self.latitude,
            longitude: self.longitude,
        };
        document.validate()?;
        Ok(document)
    }
}

fn required(value: Option<String>, field: &str) -> Result<String, AppError> {
    match value {
        Some(v) if !v.trim().is_empty() => Ok(v),
        Some(_) => Err(AppError::ValidationFailed(format!("{field} cannot be empty"))),
        None => Err(AppError::ValidationFailed(format!("{field} is required"))),
    }
}

/// Parse a strict `YYYY-MM-DD` date.
fn parse_date(raw: &str) -> Result<NaiveDate, AppError> {
    let raw = raw.trim();
    // chrono accepts unpadded months and days; the API does not.
    if raw.len() != 10 {
        return Err(AppError::ValidationFailed(format!(
            "data must use the YYYY-MM-DD format, got '{raw}'"
        )));
    }
    NaiveDate::parse_from_str(raw, DATE_FORMAT).map_err(|_| {
        AppError::ValidationFailed(format!(
            "data must use the YYYY-MM-DD format, got '{raw}'"
        ))
    })
}
