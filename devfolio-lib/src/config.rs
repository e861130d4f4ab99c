use crate::error::{ServiceError, ServiceResult};
use crate::firebase::FirebasePortfolioService;
use crate::local::LocalPortfolioService;
use crate::service::PortfolioService;
use crate::supabase::SupabasePortfolioService;
use std::env;
use std::path::PathBuf;
use std::str::FromStr;

/// Single-user mode: every backend persists exactly one aggregate under this
/// fixed identifier. A future multi-tenant extension changes it here only.
pub const SINGLETON_ID: &str = "main";

/// Firestore collection holding the singleton document
pub const FIRESTORE_COLLECTION: &str = "portfolios";

/// Supabase table holding the singleton row
pub const SUPABASE_TABLE: &str = "profiles";

/// Object storage bucket for uploaded assets (hosted backends)
pub const ASSET_BUCKET: &str = "portfolio-assets";

/// Document key for the local backend, kept from the original deployment so
/// existing data files keep loading
pub const LOCAL_STORAGE_KEY: &str = "dev_portfolio_v1_data";

/// Closed enumeration of storage backends
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BackendType {
    Local,
    Firebase,
    Supabase,
}

impl BackendType {
    pub fn as_str(&self) -> &'static str {
        match self {
            BackendType::Local => "local",
            BackendType::Firebase => "firebase",
            BackendType::Supabase => "supabase",
        }
    }
}

impl FromStr for BackendType {
    type Err = ServiceError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "local" => Ok(BackendType::Local),
            "firebase" => Ok(BackendType::Firebase),
            "supabase" => Ok(BackendType::Supabase),
            other => Err(ServiceError::Configuration(format!(
                "unknown backend type '{other}' (expected local, firebase or supabase)"
            ))),
        }
    }
}

/// Firestore/Firebase Storage connection parameters. All optional here;
/// missing values surface as `Configuration` errors on first provider use.
#[derive(Debug, Clone, Default)]
pub struct FirebaseConfig {
    pub api_key: Option<String>,
    pub project_id: Option<String>,
    pub storage_bucket: Option<String>,
}

/// Supabase connection parameters, same first-use failure policy.
#[derive(Debug, Clone, Default)]
pub struct SupabaseConfig {
    pub url: Option<String>,
    pub anon_key: Option<String>,
}

/// Backend selection plus connection parameters, supplied via the process
/// environment at boot.
#[derive(Debug, Clone)]
pub struct BackendConfig {
    /// None means "unconfigured": the caller must present a setup flow
    /// instead of attempting any data operation.
    pub backend: Option<BackendType>,
    /// Directory holding the local backend's document file
    pub data_dir: PathBuf,
    pub firebase: FirebaseConfig,
    pub supabase: SupabaseConfig,
}

impl BackendConfig {
    /// Read configuration from the process environment.
    ///
    /// `BACKEND_TYPE` selects the backend (absent or empty means
    /// unconfigured); an unrecognized value is an error rather than a silent
    /// fallback. Connection parameters are picked up as-is and validated
    /// lazily by the providers.
    pub fn from_env() -> ServiceResult<Self> {
        let backend = match env::var("BACKEND_TYPE") {
            Ok(value) if value.trim().is_empty() => None,
            Ok(value) => Some(value.trim().parse()?),
            Err(_) => None,
        };

        Ok(Self {
            backend,
            data_dir: env::var("PORTFOLIO_DATA_DIR")
                .map(PathBuf::from)
                .unwrap_or_else(|_| PathBuf::from(".")),
            firebase: FirebaseConfig {
                api_key: env::var("FIREBASE_API_KEY").ok(),
                project_id: env::var("FIREBASE_PROJECT_ID").ok(),
                storage_bucket: env::var("FIREBASE_STORAGE_BUCKET").ok(),
            },
            supabase: SupabaseConfig {
                url: env::var("SUPABASE_URL").ok(),
                anon_key: env::var("SUPABASE_ANON_KEY").ok(),
            },
        })
    }
}

/// Bind the configured backend to a provider instance.
///
/// Returns None when no backend is selected so the caller can route to a
/// setup flow. Hosted providers are constructed with whatever parameters are
/// present and fail loudly on first use if anything required is missing.
pub fn create_service(config: &BackendConfig) -> Option<Box<dyn PortfolioService>> {
    match config.backend? {
        BackendType::Local => Some(Box::new(LocalPortfolioService::new(&config.data_dir))),
        BackendType::Firebase => Some(Box::new(FirebasePortfolioService::new(
            config.firebase.clone(),
        ))),
        BackendType::Supabase => Some(Box::new(SupabasePortfolioService::new(
            config.supabase.clone(),
        ))),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn backend_type_parses_known_identifiers() {
        assert_eq!("local".parse::<BackendType>().unwrap(), BackendType::Local);
        assert_eq!(
            "firebase".parse::<BackendType>().unwrap(),
            BackendType::Firebase
        );
        assert_eq!(
            "supabase".parse::<BackendType>().unwrap(),
            BackendType::Supabase
        );
    }

    #[test]
    fn backend_type_rejects_unknown_identifier() {
        let err = "localstorage".parse::<BackendType>().unwrap_err();
        assert!(matches!(err, ServiceError::Configuration(_)));
    }

    #[test]
    fn unconfigured_backend_yields_no_service() {
        let config = BackendConfig {
            backend: None,
            data_dir: PathBuf::from("."),
            firebase: FirebaseConfig::default(),
            supabase: SupabaseConfig::default(),
        };
        assert!(create_service(&config).is_none());
    }

    #[test]
    fn configured_backend_yields_service() {
        let config = BackendConfig {
            backend: Some(BackendType::Local),
            data_dir: PathBuf::from("."),
            firebase: FirebaseConfig::default(),
            supabase: SupabaseConfig::default(),
        };
        assert!(create_service(&config).is_some());
    }
}
