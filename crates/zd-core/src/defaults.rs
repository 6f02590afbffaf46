//! Built-in application defaults
//!
//! Category lists and sample template variables the CRM front end reads
//! at startup. Built once, shared read-only; nothing mutates the value
//! after construction.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

/// Immutable defaults served at `/api/defaults`
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AppDefaults {
    /// Categories selectable on contact forms
    pub contact_categories: Vec<String>,

    /// WhatsApp template review categories
    pub template_categories: Vec<String>,

    /// Sample values substituted into `{{placeholders}}` for previews
    pub sample_variables: BTreeMap<String, String>,
}

impl AppDefaults {
    /// The built-in value
    pub fn builtin() -> Self {
        let mut sample_variables = BTreeMap::new();
        sample_variables.insert("name".to_string(), "Maria Souza".to_string());
        sample_variables.insert("agent".to_string(), "Alex".to_string());
        sample_variables.insert("company".to_string(), "Zapdesk".to_string());
        sample_variables.insert("order_id".to_string(), "A-1042".to_string());

        Self {
            contact_categories: ["lead", "customer", "supplier", "partner", "vip"]
                .into_iter()
                .map(String::from)
                .collect(),
            template_categories: ["marketing", "utility", "authentication"]
                .into_iter()
                .map(String::from)
                .collect(),
            sample_variables,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_builtin_is_populated() {
        let defaults = AppDefaults::builtin();
        assert!(!defaults.contact_categories.is_empty());
        assert!(!defaults.template_categories.is_empty());
        assert!(defaults.sample_variables.contains_key("name"));
    }

    #[test]
    fn test_builtin_serializes_with_expected_keys() {
        let value = serde_json::to_value(AppDefaults::builtin()).unwrap();
        assert!(value["contact_categories"].is_array());
        assert!(value["template_categories"].is_array());
        assert_eq!(value["sample_variables"]["company"], "Zapdesk");
    }
}
