//! Shared application state slices.
//!
//! Each slice is a backend-owned JSON document. The host UI renders them;
//! this layer only ever replaces a slice wholesale when a response carries
//! a fresh copy. A slice absent from a response means "unchanged, don't
//! touch". There is no deep merging anywhere.

use serde::{Deserialize, Serialize};
use serde_json::Value;

/// One sheet's data: headers, column metadata, and the visible rows.
///
/// The full schema is owned by the backend and consumed by the grid
/// renderer; this layer treats it as an opaque document.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct SheetData(Value);

impl SheetData {
    /// Wrap a raw sheet document.
    pub fn new(value: Value) -> Self {
        Self(value)
    }

    /// The underlying JSON document.
    pub fn as_value(&self) -> &Value {
        &self.0
    }

    /// The dataframe name, when the document carries one.
    pub fn df_name(&self) -> Option<&str> {
        self.0.get("dfName").and_then(Value::as_str)
    }
}

/// Analysis-wide data: the step list, analysis name, generated code.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct AnalysisData(Value);

impl AnalysisData {
    /// Wrap a raw analysis document.
    pub fn new(value: Value) -> Self {
        Self(value)
    }

    /// The underlying JSON document.
    pub fn as_value(&self) -> &Value {
        &self.0
    }

    /// The analysis name, when the document carries one.
    pub fn analysis_name(&self) -> Option<&str> {
        self.0.get("analysisName").and_then(Value::as_str)
    }
}

/// The user's profile: identity, tier, feature flags, usage history.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct UserProfile(Value);

impl UserProfile {
    /// Wrap a raw profile document.
    pub fn new(value: Value) -> Self {
        Self(value)
    }

    /// The underlying JSON document.
    pub fn as_value(&self) -> &Value {
        &self.0
    }

    /// The user's email, when the document carries one.
    pub fn user_email(&self) -> Option<&str> {
        self.0.get("userEmail").and_then(Value::as_str)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn slices_round_trip_transparently() {
        let sheet = SheetData::new(json!({"dfName": "df1", "numRows": 3}));
        let encoded = serde_json::to_value(&sheet).unwrap();
        assert_eq!(encoded, json!({"dfName": "df1", "numRows": 3}));
        let decoded: SheetData = serde_json::from_value(encoded).unwrap();
        assert_eq!(decoded, sheet);
    }

    #[test]
    fn accessors_read_known_fields() {
        let sheet = SheetData::new(json!({"dfName": "sales"}));
        assert_eq!(sheet.df_name(), Some("sales"));
        assert_eq!(SheetData::default().df_name(), None);

        let profile = UserProfile::new(json!({"userEmail": "ada@example.com"}));
        assert_eq!(profile.user_email(), Some("ada@example.com"));
    }
}
