use extract::SummaryDetails;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct AssessmentOutcome {
    pub correct_product_class: bool,
    pub correct_city: bool,
}

impl AssessmentOutcome {
    /// Case-insensitive exact comparison of both fields against the expected
    /// literals. Whitespace and plurals are not forgiven.
    pub fn grade(details: &SummaryDetails, expected_product_class: &str, expected_city: &str) -> Self {
        Self {
            correct_product_class: matches_expected(&details.product_class, expected_product_class),
            correct_city: matches_expected(&details.city, expected_city),
        }
    }

    pub fn passed(&self) -> bool {
        self.correct_product_class && self.correct_city
    }
}

fn matches_expected(actual: &str, expected: &str) -> bool {
    actual.to_lowercase() == expected.to_lowercase()
}
