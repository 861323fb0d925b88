use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

/// Product class and location mentioned in a document.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
pub struct SummaryDetails {
    /// A class or category of product type mentioned in the document.
    pub product_class: String,
    /// A city name mentioned in the document.
    pub city: String,
}

impl SummaryDetails {
    pub const REQUIRED_FIELDS: [&'static str; 2] = ["product_class", "city"];
}
