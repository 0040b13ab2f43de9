//! Request DTOs for the reporting API endpoints.

use serde::Deserialize;

/// Reporting window tag accepted by every reporting endpoint.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Period {
    Week,
    Month,
    Year,
    #[default]
    All,
}

/// Query parameters shared by the reporting endpoints.
#[derive(Debug, Deserialize)]
pub struct ReportQuery {
    #[serde(default)]
    pub period: Period,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_period_deserializes_lowercase() {
        let q: ReportQuery = serde_json::from_str(r#"{"period":"week"}"#).unwrap();
        assert_eq!(q.period, Period::Week);
    }

    #[test]
    fn test_period_defaults_to_all() {
        let q: ReportQuery = serde_json::from_str("{}").unwrap();
        assert_eq!(q.period, Period::All);
    }
}
