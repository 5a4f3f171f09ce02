use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PieSlice {
    pub name: String,
    pub symbol: String,
    pub value: f64,
    pub price: f64,
    pub change: f64,
    pub percentage: f64,
    pub color: String,
    pub is_others: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub coins_included: Option<String>,
}
