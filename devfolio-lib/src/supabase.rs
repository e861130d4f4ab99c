use crate::config::{SupabaseConfig, ASSET_BUCKET, SINGLETON_ID, SUPABASE_TABLE};
use crate::error::{ServiceError, ServiceResult};
use crate::model::PortfolioData;
use crate::service::PortfolioService;
use crate::utils::percent_encode;
use async_trait::async_trait;
use serde_json::{json, Value};

/// Hosted backend B: a Supabase project, using PostgREST for the singleton
/// row and Supabase Storage for uploads. The aggregate is the jsonb `data`
/// column of the `profiles` row with id `main`.
pub struct SupabasePortfolioService {
    client: reqwest::Client,
    config: SupabaseConfig,
}

impl SupabasePortfolioService {
    pub fn new(config: SupabaseConfig) -> Self {
        Self {
            client: reqwest::Client::new(),
            config,
        }
    }

    /// Validated on first use per the selection contract
    fn connection(&self) -> ServiceResult<(&str, &str)> {
        match (&self.config.url, &self.config.anon_key) {
            (Some(url), Some(key)) => Ok((url.trim_end_matches('/'), key.as_str())),
            _ => Err(ServiceError::Configuration(
                "supabase backend requires SUPABASE_URL and SUPABASE_ANON_KEY".to_string(),
            )),
        }
    }

    fn authed(&self, builder: reqwest::RequestBuilder, key: &str) -> reqwest::RequestBuilder {
        builder
            .header("apikey", key)
            .header("Authorization", format!("Bearer {key}"))
    }

    /// Upsert on the singleton primary key. Every write goes through this so
    /// save and reset behave identically whether or not the row exists yet,
    /// matching the other backends on virgin storage.
    fn upsert_request(&self, data: &PortfolioData) -> ServiceResult<reqwest::RequestBuilder> {
        let (base, key) = self.connection()?;
        let url = format!("{base}/rest/v1/{SUPABASE_TABLE}");
        let body = json!([{ "id": SINGLETON_ID, "data": data }]);
        Ok(self
            .authed(self.client.post(&url), key)
            .header("Prefer", "resolution=merge-duplicates,return=minimal")
            .json(&body))
    }

    async fn upsert_row(&self, data: &PortfolioData) -> ServiceResult<()> {
        let response = self.upsert_request(data)?.send().await?;
        if !response.status().is_success() {
            return Err(status_error("supabase upsert", response).await);
        }
        Ok(())
    }
}

#[async_trait]
impl PortfolioService for SupabasePortfolioService {
    async fn get_profile(&self) -> ServiceResult<PortfolioData> {
        let (base, key) = self.connection()?;
        let url =
            format!("{base}/rest/v1/{SUPABASE_TABLE}?id=eq.{SINGLETON_ID}&select=data");
        let response = self.authed(self.client.get(&url), key).send().await?;
        if !response.status().is_success() {
            return Err(status_error("supabase read", response).await);
        }

        let rows: Value = response.json().await?;
        match rows.as_array().and_then(|r| r.first()) {
            Some(row) => Ok(serde_json::from_value(row["data"].clone())?),
            None => {
                tracing::debug!("supabase row missing, inserting default");
                let initial = PortfolioData::initial();
                self.upsert_row(&initial).await?;
                Ok(initial)
            }
        }
    }

    async fn update_profile(&self, data: &PortfolioData) -> ServiceResult<()> {
        self.upsert_row(data).await
    }

    async fn upload_image(&self, file_name: &str, bytes: &[u8]) -> ServiceResult<String> {
        let (base, key) = self.connection()?;
        let object = format!(
            "{}_{}",
            chrono::Utc::now().timestamp_millis(),
            file_name
        );
        let url = object_url(base, &object);
        let response = self
            .authed(self.client.post(&url), key)
            .header("Content-Type", "application/octet-stream")
            .body(bytes.to_vec())
            .send()
            .await?;
        if !response.status().is_success() {
            return Err(status_error("supabase upload", response).await);
        }
        Ok(public_object_url(base, &object))
    }

    async fn reset_data(&self) -> ServiceResult<()> {
        self.upsert_row(&PortfolioData::initial()).await
    }
}

fn object_url(base: &str, object: &str) -> String {
    format!(
        "{base}/storage/v1/object/{ASSET_BUCKET}/{}",
        percent_encode(object)
    )
}

fn public_object_url(base: &str, object: &str) -> String {
    format!(
        "{base}/storage/v1/object/public/{ASSET_BUCKET}/{}",
        percent_encode(object)
    )
}

async fn status_error(operation: &str, response: reqwest::Response) -> ServiceError {
    let status = response.status();
    let detail = response.text().await.unwrap_or_default();
    ServiceError::Persistence(format!("{operation} failed with {status}: {detail}"))
}
