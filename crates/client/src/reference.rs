//! Dropdown options for foreign-key fields.
//!
//! A dialog needs every one of its reference lists before it can render its
//! fields; they are fetched together and either all arrive or the dialog
//! shows an error.

use contracts::domain::common::{ForeignKey, RecordId};
use contracts::shared::list::normalize_list;
use futures::future::try_join_all;
use serde_json::Value;

use crate::api::ApiClient;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RefOption {
    pub id: RecordId,
    pub label: String,
}

impl RefOption {
    /// Option from a list row; rows without a usable id are skipped.
    pub fn from_row(row: Value) -> Option<Self> {
        let key: ForeignKey = serde_json::from_value(row).ok()?;
        let id = key.id()?;
        Some(Self {
            id,
            label: key.display(),
        })
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ReferenceData {
    lists: Vec<(&'static str, Vec<RefOption>)>,
}

impl ReferenceData {
    pub fn empty() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, endpoint: &'static str, rows: Vec<Value>) {
        let options = rows.into_iter().filter_map(RefOption::from_row).collect();
        self.lists.retain(|(e, _)| *e != endpoint);
        self.lists.push((endpoint, options));
    }

    pub fn options(&self, endpoint: &str) -> &[RefOption] {
        self.lists
            .iter()
            .find(|(e, _)| *e == endpoint)
            .map(|(_, options)| options.as_slice())
            .unwrap_or(&[])
    }

    pub fn label(&self, endpoint: &str, id: RecordId) -> Option<&str> {
        self.options(endpoint)
            .iter()
            .find(|o| o.id == id)
            .map(|o| o.label.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ReferenceState {
    Loading,
    Ready(ReferenceData),
    Failed(String),
}

impl ReferenceState {
    pub fn is_ready(&self) -> bool {
        matches!(self, ReferenceState::Ready(_))
    }

    pub fn data(&self) -> Option<&ReferenceData> {
        match self {
            ReferenceState::Ready(data) => Some(data),
            _ => None,
        }
    }
}

/// Fetch all lists in parallel; the first failure fails the whole set.
pub async fn load_references(client: &ApiClient, endpoints: &[&'static str]) -> ReferenceState {
    if endpoints.is_empty() {
        return ReferenceState::Ready(ReferenceData::empty());
    }
    match try_join_all(endpoints.iter().map(|e| client.list(*e))).await {
        Ok(bodies) => {
            let mut data = ReferenceData::empty();
            for (endpoint, body) in endpoints.iter().zip(bodies) {
                data.insert(*endpoint, normalize_list(body));
            }
            ReferenceState::Ready(data)
        }
        Err(e) => {
            log::error!("Failed to load reference data: {}", e);
            ReferenceState::Failed(e.user_message())
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_options_from_rows() {
        let mut data = ReferenceData::empty();
        data.insert(
            "/suppliers/",
            vec![
                json!({"id": 5, "name": "Acme"}),
                json!({"id": 6}),
                json!({"name": "sin id"}),
            ],
        );
        assert_eq!(
            data.options("/suppliers/"),
            &[
                RefOption { id: RecordId(5), label: "Acme".into() },
                RefOption { id: RecordId(6), label: "#6".into() },
            ]
        );
        assert_eq!(data.label("/suppliers/", RecordId(5)), Some("Acme"));
        assert!(data.options("/banks/").is_empty());
    }
}
