use crate::config::{FirebaseConfig, FIRESTORE_COLLECTION, SINGLETON_ID};
use crate::error::{ServiceError, ServiceResult};
use crate::model::PortfolioData;
use crate::service::PortfolioService;
use crate::utils::percent_encode;
use async_trait::async_trait;
use reqwest::StatusCode;
use serde_json::{json, Value};

const FIRESTORE_HOST: &str = "https://firestore.googleapis.com/v1";
const STORAGE_HOST: &str = "https://firebasestorage.googleapis.com/v0";

/// Hosted backend A: Firestore document store plus Firebase Storage, both
/// driven over their public REST endpoints.
///
/// The aggregate rides in a single `data` string field of the singleton
/// document, so every save stays one atomic document replace and the JSON
/// codec is serde on both sides.
pub struct FirebasePortfolioService {
    client: reqwest::Client,
    config: FirebaseConfig,
}

impl FirebasePortfolioService {
    pub fn new(config: FirebaseConfig) -> Self {
        Self {
            client: reqwest::Client::new(),
            config,
        }
    }

    /// Connection parameters are validated here, on first use, so a
    /// misconfigured backend fails loudly instead of masquerading as a
    /// working store.
    fn credentials(&self) -> ServiceResult<(&str, &str)> {
        match (&self.config.api_key, &self.config.project_id) {
            (Some(key), Some(project)) => Ok((key.as_str(), project.as_str())),
            _ => Err(ServiceError::Configuration(
                "firebase backend requires FIREBASE_API_KEY and FIREBASE_PROJECT_ID".to_string(),
            )),
        }
    }

    fn bucket(&self) -> ServiceResult<&str> {
        self.config.storage_bucket.as_deref().ok_or_else(|| {
            ServiceError::Configuration(
                "firebase uploads require FIREBASE_STORAGE_BUCKET".to_string(),
            )
        })
    }

    fn document_url(&self) -> ServiceResult<String> {
        let (key, project) = self.credentials()?;
        Ok(format!(
            "{FIRESTORE_HOST}/projects/{project}/databases/(default)/documents/\
             {FIRESTORE_COLLECTION}/{SINGLETON_ID}?key={key}"
        ))
    }

    async fn write_document(&self, data: &PortfolioData) -> ServiceResult<()> {
        let url = self.document_url()?;
        let body = json!({
            "fields": {
                "data": { "stringValue": serde_json::to_string(data)? }
            }
        });
        let response = self.client.patch(&url).json(&body).send().await?;
        if !response.status().is_success() {
            return Err(status_error("firestore write", response).await);
        }
        Ok(())
    }
}

#[async_trait]
impl PortfolioService for FirebasePortfolioService {
    async fn get_profile(&self) -> ServiceResult<PortfolioData> {
        let url = self.document_url()?;
        let response = self.client.get(&url).send().await?;

        if response.status() == StatusCode::NOT_FOUND {
            tracing::debug!("firestore document missing, writing default");
            let initial = PortfolioData::initial();
            self.write_document(&initial).await?;
            return Ok(initial);
        }
        if !response.status().is_success() {
            return Err(status_error("firestore read", response).await);
        }

        let document: Value = response.json().await?;
        let raw = document["fields"]["data"]["stringValue"]
            .as_str()
            .ok_or_else(|| {
                ServiceError::Persistence("firestore document is missing the data field".to_string())
            })?;
        Ok(serde_json::from_str(raw)?)
    }

    async fn update_profile(&self, data: &PortfolioData) -> ServiceResult<()> {
        self.write_document(data).await
    }

    async fn upload_image(&self, file_name: &str, bytes: &[u8]) -> ServiceResult<String> {
        let (key, _) = self.credentials()?;
        let bucket = self.bucket()?;
        let object = format!(
            "images/{}_{}",
            chrono::Utc::now().timestamp_millis(),
            file_name
        );

        let url = format!(
            "{STORAGE_HOST}/b/{bucket}/o?uploadType=media&name={}&key={key}",
            percent_encode(&object)
        );
        let response = self
            .client
            .post(&url)
            .header("Content-Type", "application/octet-stream")
            .body(bytes.to_vec())
            .send()
            .await?;
        if !response.status().is_success() {
            return Err(status_error("storage upload", response).await);
        }

        let metadata: Value = response.json().await?;
        let token = metadata["downloadTokens"]
            .as_str()
            .and_then(|t| t.split(',').next())
            .ok_or_else(|| {
                ServiceError::Persistence("upload response carried no download token".to_string())
            })?;
        Ok(format!(
            "{STORAGE_HOST}/b/{bucket}/o/{}?alt=media&token={token}",
            percent_encode(&object)
        ))
    }

    async fn reset_data(&self) -> ServiceResult<()> {
        self.write_document(&PortfolioData::initial()).await
    }
}

async fn status_error(operation: &str, response: reqwest::Response) -> ServiceError {
    let status = response.status();
    let detail = response.text().await.unwrap_or_default();
    ServiceError::Persistence(format!("{operation} failed with {status}: {detail}"))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn missing_parameters_fail_on_first_use() {
        let service = FirebasePortfolioService::new(FirebaseConfig::default());
        let err = service.get_profile().await.unwrap_err();
        assert!(matches!(err, ServiceError::Configuration(_)));

        let err = service.upload_image("a.png", &[0]).await.unwrap_err();
        assert!(matches!(err, ServiceError::Configuration(_)));
    }
}
