use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Item as returned by the catalog API
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Item {
    pub id: String,
    pub name: String,
    pub is_active: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Query string for listing items
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ListParams {
    pub skip: u64,
    pub take: u64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub search: Option<String>,
    pub include_inactive: bool,
}

#[derive(Debug, Serialize)]
pub(crate) struct NameBody<'a> {
    pub name: &'a str,
}

#[derive(Debug, Serialize)]
pub(crate) struct IdsBody<'a> {
    pub ids: &'a [String],
}

#[derive(Debug, Deserialize)]
pub(crate) struct CountBody {
    pub count: u64,
}

/// Error body produced by the server for 4xx/5xx responses
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub(crate) struct ErrorBody {
    pub message: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_item_deserializes_from_api_json() {
        let json = r#"{
            "id": "0192f0c1-0000-7000-8000-000000000001",
            "name": "Widget A",
            "isActive": false,
            "createdAt": "2023-11-14T22:13:20.000Z",
            "updatedAt": "2023-11-14T22:13:21.500Z"
        }"#;

        let item: Item = serde_json::from_str(json).unwrap();

        assert_eq!(item.name, "Widget A");
        assert!(!item.is_active);
        assert_eq!(item.created_at.timestamp_millis(), 1_700_000_000_000);
        assert_eq!(item.updated_at.timestamp_millis(), 1_700_000_001_500);
    }

    #[test]
    fn test_list_params_omit_missing_search() {
        let params = ListParams {
            skip: 20,
            take: 20,
            search: None,
            include_inactive: true,
        };

        let value = serde_json::to_value(&params).unwrap();

        assert_eq!(
            value,
            serde_json::json!({ "skip": 20, "take": 20, "includeInactive": true })
        );
    }
}
