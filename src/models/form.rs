use chrono::Datelike;
use serde::{Deserialize, Serialize};

/// Filters posted to `/recommend/by_form_v2`
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct FormFilters {
    #[serde(default)]
    pub min_rating: f64,
    #[serde(default = "default_genre")]
    pub genre: String,
    #[serde(default = "default_year_from")]
    pub year_from: i32,
    #[serde(default = "current_year")]
    pub year_to: i32,
    #[serde(default)]
    pub budget_min: f64,
    #[serde(default = "default_budget_max")]
    pub budget_max: f64,
}

fn default_genre() -> String {
    "Action".to_string()
}

fn default_year_from() -> i32 {
    1900
}

fn current_year() -> i32 {
    chrono::Utc::now().year()
}

fn default_budget_max() -> f64 {
    1e12
}

impl Default for FormFilters {
    fn default() -> Self {
        Self {
            min_rating: 0.0,
            genre: default_genre(),
            year_from: default_year_from(),
            year_to: current_year(),
            budget_min: 0.0,
            budget_max: default_budget_max(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let filters = FormFilters::default();
        assert_eq!(filters.genre, "Action");
        assert_eq!(filters.year_from, 1900);
        assert_eq!(filters.year_to, chrono::Utc::now().year());
        assert_eq!(filters.budget_max, 1e12);
    }

    #[test]
    fn test_partial_body_fills_defaults() {
        let filters: FormFilters =
            serde_json::from_str(r#"{"min_rating": 7.5, "genre": ""}"#).unwrap();
        assert_eq!(filters.min_rating, 7.5);
        assert_eq!(filters.genre, "");
        assert_eq!(filters.year_from, 1900);
    }
}
