use serde::{Deserialize, Serialize};
use std::fmt;

/// Addresses one sheet (tab) of a Sheety project.
///
/// Sheety lists rows under the sheet's plural name and expects single-row
/// bodies wrapped under its singular form.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SheetRef {
    pub name: String,
    pub record_key: String,
}

impl SheetRef {
    pub fn new(name: impl Into<String>, record_key: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            record_key: record_key.into(),
        }
    }
}

/// A cell value. Sheety returns numeric cells as JSON numbers.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Cell {
    Number(f64),
    Text(String),
}

impl fmt::Display for Cell {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Cell::Number(n) => write!(f, "{}", n),
            Cell::Text(s) => f.write_str(s),
        }
    }
}

impl From<&str> for Cell {
    fn from(value: &str) -> Self {
        Cell::Text(value.to_string())
    }
}

impl From<String> for Cell {
    fn from(value: String) -> Self {
        Cell::Text(value)
    }
}

impl From<f64> for Cell {
    fn from(value: f64) -> Self {
        Cell::Number(value)
    }
}

/// Columns of a post statistics sheet. Unset fields are left out of the
/// request body, so a partial value works as a PUT patch.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RowFields {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub post_preview: Option<Cell>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub post_url: Option<Cell>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub post_date: Option<Cell>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub shares_per_view: Option<Cell>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub reactions_per_view: Option<Cell>,
}

/// A stored row. `id` is the sheet row number (the header is row 1).
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct Row {
    pub id: u64,
    #[serde(flatten)]
    pub fields: RowFields,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn row_parses_mixed_cells() {
        let body = r#"{
            "postPreview": "Новый выпуск...",
            "postUrl": "t.me/kleymedia/120",
            "postDate": "15.10.24",
            "sharesPerView": 1.25,
            "reactionsPerView": "3,5",
            "id": 4
        }"#;
        let row: Row = serde_json::from_str(body).unwrap();

        assert_eq!(row.id, 4);
        assert_eq!(row.fields.post_url, Some(Cell::from("t.me/kleymedia/120")));
        assert_eq!(row.fields.shares_per_view, Some(Cell::Number(1.25)));
        assert_eq!(row.fields.reactions_per_view, Some(Cell::from("3,5")));
    }

    #[test]
    fn blank_cells_are_absent() {
        let row: Row = serde_json::from_str(r#"{"id": 2}"#).unwrap();
        assert_eq!(row.fields, RowFields::default());
    }

    #[test]
    fn patch_omits_unset_fields() {
        let patch = RowFields {
            shares_per_view: Some(Cell::from(0.5)),
            reactions_per_view: Some(Cell::from(2.0)),
            ..Default::default()
        };
        let value = serde_json::to_value(&patch).unwrap();
        let object = value.as_object().unwrap();

        assert_eq!(object.len(), 2);
        assert_eq!(object["sharesPerView"], 0.5);
        assert!(!object.contains_key("postUrl"));
    }
}
