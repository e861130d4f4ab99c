use crate::config::LOCAL_STORAGE_KEY;
use crate::error::{ServiceError, ServiceResult};
use crate::model::PortfolioData;
use crate::service::PortfolioService;
use async_trait::async_trait;
use base64::engine::general_purpose::STANDARD as B64;
use base64::Engine;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};
use tokio::fs;

/// Local-device backend: the whole aggregate lives in one JSON file under the
/// configured data directory. Uploads are embedded as data URIs so nothing
/// needs external reachability.
pub struct LocalPortfolioService {
    path: PathBuf,
}

impl LocalPortfolioService {
    pub fn new(data_dir: &Path) -> Self {
        Self {
            path: data_dir.join(format!("{LOCAL_STORAGE_KEY}.json")),
        }
    }

    /// Path of the backing document file
    pub fn document_path(&self) -> &Path {
        &self.path
    }

    async fn write_document(&self, data: &PortfolioData) -> ServiceResult<()> {
        if let Some(parent) = self.path.parent() {
            fs::create_dir_all(parent).await?;
        }
        let bytes = serde_json::to_vec(data)?;
        fs::write(&self.path, bytes).await?;
        Ok(())
    }
}

#[async_trait]
impl PortfolioService for LocalPortfolioService {
    async fn get_profile(&self) -> ServiceResult<PortfolioData> {
        match fs::read(&self.path).await {
            Ok(bytes) => Ok(serde_json::from_slice(&bytes)?),
            Err(err) if err.kind() == ErrorKind::NotFound => {
                tracing::debug!(path = %self.path.display(), "no document found, writing default");
                let initial = PortfolioData::initial();
                self.write_document(&initial).await?;
                Ok(initial)
            }
            Err(err) => Err(err.into()),
        }
    }

    async fn update_profile(&self, data: &PortfolioData) -> ServiceResult<()> {
        self.write_document(data).await
    }

    async fn upload_image(&self, file_name: &str, bytes: &[u8]) -> ServiceResult<String> {
        if bytes.is_empty() {
            return Err(ServiceError::Persistence(
                "cannot encode an empty image".to_string(),
            ));
        }
        let mime = mime_for(file_name);
        Ok(format!("data:{mime};base64,{}", B64.encode(bytes)))
    }

    async fn reset_data(&self) -> ServiceResult<()> {
        self.write_document(&PortfolioData::initial()).await
    }
}

fn mime_for(file_name: &str) -> &'static str {
    let ext = file_name
        .rsplit('.')
        .next()
        .map(|e| e.to_ascii_lowercase())
        .unwrap_or_default();
    match ext.as_str() {
        "png" => "image/png",
        "jpg" | "jpeg" => "image/jpeg",
        "gif" => "image/gif",
        "webp" => "image/webp",
        "svg" => "image/svg+xml",
        _ => "application/octet-stream",
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn mime_inferred_from_extension() {
        assert_eq!(mime_for("avatar.PNG"), "image/png");
        assert_eq!(mime_for("photo.jpeg"), "image/jpeg");
        assert_eq!(mime_for("noext"), "application/octet-stream");
    }

    #[tokio::test]
    async fn upload_produces_self_contained_data_uri() {
        let service = LocalPortfolioService::new(Path::new("."));
        let uri = service.upload_image("pixel.png", &[1, 2, 3]).await.unwrap();
        assert!(uri.starts_with("data:image/png;base64,"));
        let payload = uri.split(',').nth(1).unwrap();
        assert_eq!(B64.decode(payload).unwrap(), vec![1, 2, 3]);
    }

    #[tokio::test]
    async fn upload_rejects_empty_payload() {
        let service = LocalPortfolioService::new(Path::new("."));
        let err = service.upload_image("pixel.png", &[]).await.unwrap_err();
        assert!(matches!(err, ServiceError::Persistence(_)));
    }
}
