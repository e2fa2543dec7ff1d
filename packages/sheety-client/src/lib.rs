//! Pure Sheety REST API client.
//!
//! Sheety exposes each tab of a Google Sheet as a REST resource under
//! `{base}/{username}/{project}/{sheet}`.
//!
//! # Example
//!
//! ```rust,ignore
//! use sheety_client::{RowFields, SheetRef, SheetyClient};
//!
//! let client = SheetyClient::new("username", "project", "token");
//! let daily = SheetRef::new("daily", "daily");
//!
//! for row in client.list_rows(&daily).await? {
//!     println!("{} -> {:?}", row.id, row.fields.post_url);
//! }
//! ```

pub mod error;
pub mod types;

pub use error::{Result, SheetyError};
pub use types::{Cell, Row, RowFields, SheetRef};

use reqwest::RequestBuilder;
use serde::de::DeserializeOwned;
use std::collections::HashMap;

const BASE_URL: &str = "https://api.sheety.co";

#[derive(Clone)]
pub struct SheetyClient {
    client: reqwest::Client,
    token: String,
    base_url: String,
    username: String,
    project: String,
}

impl SheetyClient {
    pub fn new(
        username: impl Into<String>,
        project: impl Into<String>,
        token: impl Into<String>,
    ) -> Self {
        Self {
            client: reqwest::Client::new(),
            token: token.into(),
            base_url: BASE_URL.to_string(),
            username: username.into(),
            project: project.into(),
        }
    }

    /// Point the client at another host while keeping the `/{username}/{project}` layout.
    pub fn with_base_url(mut self, url: impl Into<String>) -> Self {
        self.base_url = url.into().trim_end_matches('/').to_string();
        self
    }

    fn sheet_url(&self, sheet: &SheetRef) -> String {
        format!(
            "{}/{}/{}/{}",
            self.base_url, self.username, self.project, sheet.name
        )
    }

    fn row_url(&self, sheet: &SheetRef, id: u64) -> String {
        format!("{}/{}", self.sheet_url(sheet), id)
    }

    /// List every row of a sheet, in sheet order.
    pub async fn list_rows(&self, sheet: &SheetRef) -> Result<Vec<Row>> {
        let mut body: HashMap<String, Vec<Row>> =
            self.send(self.client.get(self.sheet_url(sheet))).await?;
        tracing::debug!(sheet = %sheet.name, "Listed sheet rows");

        body.remove(&sheet.name)
            .ok_or_else(|| SheetyError::MissingKey(sheet.name.clone()))
    }

    /// Append a row. Returns the stored row with its assigned id.
    pub async fn add_row(&self, sheet: &SheetRef, fields: &RowFields) -> Result<Row> {
        let payload = Self::wrap(sheet, fields)?;
        let mut body: HashMap<String, Row> = self
            .send(self.client.post(self.sheet_url(sheet)).json(&payload))
            .await?;

        body.remove(&sheet.record_key)
            .ok_or_else(|| SheetyError::MissingKey(sheet.record_key.clone()))
    }

    /// Overwrite the given fields of a row.
    pub async fn edit_row(&self, sheet: &SheetRef, id: u64, fields: &RowFields) -> Result<()> {
        let payload = Self::wrap(sheet, fields)?;
        let resp = self
            .client
            .put(self.row_url(sheet, id))
            .bearer_auth(&self.token)
            .json(&payload)
            .send()
            .await?;
        Self::check(resp).await.map(|_| ())
    }

    /// Delete a row. Rows below it move up by one, so their ids change.
    pub async fn delete_row(&self, sheet: &SheetRef, id: u64) -> Result<()> {
        let resp = self
            .client
            .delete(self.row_url(sheet, id))
            .bearer_auth(&self.token)
            .send()
            .await?;
        Self::check(resp).await.map(|_| ())
    }

    fn wrap(sheet: &SheetRef, fields: &RowFields) -> Result<serde_json::Value> {
        let mut body = serde_json::Map::new();
        body.insert(sheet.record_key.clone(), serde_json::to_value(fields)?);
        Ok(serde_json::Value::Object(body))
    }

    async fn send<T: DeserializeOwned>(&self, request: RequestBuilder) -> Result<T> {
        let resp = request.bearer_auth(&self.token).send().await?;
        let resp = Self::check(resp).await?;
        Ok(resp.json().await?)
    }

    async fn check(resp: reqwest::Response) -> Result<reqwest::Response> {
        let status = resp.status();
        if !status.is_success() {
            let body = resp.text().await.unwrap_or_default();
            return Err(SheetyError::Api {
                status: status.as_u16(),
                message: body,
            });
        }
        Ok(resp)
    }
}
