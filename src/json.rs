use serde::{Deserialize, Serialize};

/// Status returned by the media host for a single-shot upload or a data part
#[derive(Serialize, Deserialize, Debug, Default)]
pub struct PartStatus {
    /// missing means failure
    #[serde(default)]
    pub success: bool,

    #[serde(default)]
    pub message: Option<String>,
}
