//! Connections: directed, labelled links between two buildings.
//!
//! Endpoints are building ids and are never validated against the world;
//! consumers skip links whose endpoints no longer exist.

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Connection {
    pub id: String,
    pub from_id: String,
    pub to_id: String,
    pub color: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub company_name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub transfer_rate: Option<f64>,
    /// Percentage.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub efficiency: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub total_volume: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub custom_text: Option<String>,
    /// Deal value or other free-form figure.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub custom_number: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
}

impl Connection {
    /// A bare link with only the required fields set.
    pub fn new(id: String, from_id: String, to_id: String, color: String) -> Self {
        Self {
            id,
            from_id,
            to_id,
            color,
            company_name: None,
            transfer_rate: None,
            efficiency: None,
            total_volume: None,
            custom_text: None,
            custom_number: None,
            description: None,
        }
    }

    pub fn touches(&self, building_id: &str) -> bool {
        self.from_id == building_id || self.to_id == building_id
    }

    pub fn apply(&mut self, patch: ConnectionPatch) {
        if let Some(color) = patch.color {
            self.color = color;
        }
        if let Some(company_name) = patch.company_name {
            self.company_name = Some(company_name);
        }
        if let Some(efficiency) = patch.efficiency {
            self.efficiency = Some(efficiency);
        }
        if let Some(custom_text) = patch.custom_text {
            self.custom_text = Some(custom_text);
        }
        if let Some(custom_number) = patch.custom_number {
            self.custom_number = Some(custom_number);
        }
        if let Some(description) = patch.description {
            self.description = Some(description);
        }
    }
}

/// Partial-field update for a [`Connection`].
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ConnectionPatch {
    pub color: Option<String>,
    pub company_name: Option<String>,
    pub efficiency: Option<f64>,
    pub custom_text: Option<String>,
    pub custom_number: Option<f64>,
    pub description: Option<String>,
}
