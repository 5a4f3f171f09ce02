use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CacheTier {
    /// Short-lived tier served on hits.
    Fresh,
    /// Long-lived tier read only when a live fetch fails.
    Fallback,
}
