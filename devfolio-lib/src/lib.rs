//! Core for a single-owner portfolio site: the content/settings data model,
//! a storage capability implemented by three interchangeable backends (local
//! file, Firebase, Supabase), a once-per-day visit counter, first-run admin
//! auth, and the theme/customization resolver.
//!
//! The aggregate is a single document per deployment: read in full at boot,
//! replaced wholesale on save. Provider selection happens once at startup via
//! [`create_service`]; an unconfigured deployment gets `None` and should
//! present a setup flow instead of touching data.

mod auth;
mod config;
mod error;
mod firebase;
mod local;
mod model;
mod service;
mod supabase;
mod theme;
mod utils;
mod visits;

pub use auth::{is_first_run, login, register, MIN_PASSWORD_LEN};
pub use config::{
    create_service, BackendConfig, BackendType, FirebaseConfig, SupabaseConfig, ASSET_BUCKET,
    FIRESTORE_COLLECTION, LOCAL_STORAGE_KEY, SINGLETON_ID, SUPABASE_TABLE,
};
pub use error::{ServiceError, ServiceResult};
pub use firebase::FirebasePortfolioService;
pub use local::LocalPortfolioService;
pub use model::{
    AppSettings, Bio, Certification, ColorOverrides, ContactInfo, CustomColors, Education,
    PortfolioData, ProgrammingSkills, Project, SectionConfig, SectionTitles, Skill, ThemeType,
    WorkExperience, YearMark,
};
pub use service::PortfolioService;
pub use supabase::SupabasePortfolioService;
pub use theme::{EffectiveColors, Palette, StyleContext, StyleScope, COLOR_VARIABLES};
pub use visits::{boot, date_key, record_visit, SessionMarkers};
