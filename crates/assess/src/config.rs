use extract::ChatConfig;
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AssessmentConfig {
    pub emails_path: PathBuf,
    pub marker_path: PathBuf,
    pub expected_product_class: String,
    pub expected_city: String,
    pub chat: ChatConfig,
}

impl Default for AssessmentConfig {
    fn default() -> Self {
        Self {
            emails_path: PathBuf::from("/workspace/dli/6-Assessment/data/emails.json"),
            marker_path: PathBuf::from("/workspace/assessment_results/PASSED"),
            expected_product_class: "furniture".to_string(),
            expected_city: "new york".to_string(),
            chat: ChatConfig::default(),
        }
    }
}
