use serde::{Deserialize, Serialize};

/// A real-world reference campaign from the static catalog.
///
/// Immutable once loaded; the loader fills in `id` and `year` when the dataset omits them.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CatalogEntry {
    pub id: String,
    pub name: String,
    pub brand: String,
    pub year: i32,
    pub industry: String,
    pub target_audience: Vec<String>,
    pub objectives: Vec<String>,
    pub key_message: String,
    pub strategy: String,
    pub features: Vec<String>,
    pub emotional_appeal: Vec<String>,
    pub outcomes: Vec<String>,
}
