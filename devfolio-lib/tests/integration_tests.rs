use devfolio::*;
use tempfile::TempDir;

fn local_service() -> (TempDir, LocalPortfolioService) {
    let dir = TempDir::new().unwrap();
    let service = LocalPortfolioService::new(dir.path());
    (dir, service)
}

#[tokio::test]
async fn test_get_creates_default_once() {
    let (dir, service) = local_service();

    let first = service.get_profile().await.unwrap();
    let raw_after_first = std::fs::read(service.document_path()).unwrap();

    let second = service.get_profile().await.unwrap();
    let raw_after_second = std::fs::read(service.document_path()).unwrap();

    // Idempotent defaulting: identical aggregates and no duplicate write
    assert_eq!(first, second);
    assert_eq!(first, PortfolioData::initial());
    assert_eq!(raw_after_first, raw_after_second);

    // The written document is the fully materialized default
    let on_disk: PortfolioData = serde_json::from_slice(&raw_after_first).unwrap();
    assert_eq!(on_disk, PortfolioData::initial());

    drop(dir);
}

#[tokio::test]
async fn test_save_then_get_round_trips() {
    let (_dir, service) = local_service();

    let mut data = service.get_profile().await.unwrap();
    data.bio.name = "Jane Roe".to_string();
    data.settings.dark_mode = false;
    data.settings.theme = ThemeType::Elegant;
    data.settings.admin_password = Some("secret1".to_string());
    data.settings.visit_count.insert("2024-05-01".to_string(), 7);
    data.projects[0].end_date = Some("Mar 2024".to_string());
    data.work_experiences[0].end_year = YearMark::Year(2024);

    service.update_profile(&data).await.unwrap();
    let loaded = service.get_profile().await.unwrap();
    assert_eq!(loaded, data);
}

#[tokio::test]
async fn test_reset_restores_builtin_default() {
    let (_dir, service) = local_service();

    let mut data = service.get_profile().await.unwrap();
    data.bio.name = "Jane Roe".to_string();
    data.settings.admin_password = Some("secret1".to_string());
    service.update_profile(&data).await.unwrap();

    service.reset_data().await.unwrap();
    let loaded = service.get_profile().await.unwrap();
    assert_eq!(loaded, PortfolioData::initial());
    assert!(is_first_run(&loaded.settings));
}

#[tokio::test]
async fn test_boot_records_one_visit_per_session() {
    let (_dir, service) = local_service();
    let mut markers = SessionMarkers::new();

    let first_boot = boot(&service, &mut markers).await.unwrap();
    assert_eq!(first_boot.settings.total_visits(), 1);

    // Same session: the marker suppresses a second increment
    let second_boot = boot(&service, &mut markers).await.unwrap();
    assert_eq!(second_boot.settings.total_visits(), 1);

    // New session (fresh markers): one more increment on the same day
    let mut fresh = SessionMarkers::new();
    let third_boot = boot(&service, &mut fresh).await.unwrap();
    assert_eq!(third_boot.settings.total_visits(), 2);

    let persisted = service.get_profile().await.unwrap();
    assert_eq!(persisted.settings.total_visits(), 2);
}

#[tokio::test]
async fn test_first_run_registration_persists_password() {
    let (_dir, service) = local_service();

    let mut draft = service.get_profile().await.unwrap();
    assert!(is_first_run(&draft.settings));

    register(&mut draft, "secret1", "secret1").unwrap();
    service.update_profile(&draft).await.unwrap();

    let loaded = service.get_profile().await.unwrap();
    assert_eq!(loaded.settings.admin_password.as_deref(), Some("secret1"));
    assert!(login(&loaded.settings, "secret1").is_ok());
    assert!(login(&loaded.settings, "nope").is_err());
}

#[tokio::test]
async fn test_clear_data_requires_explicit_save() {
    let (_dir, service) = local_service();

    let saved = service.get_profile().await.unwrap();
    let mut draft = saved.clone();
    draft.clear_content();

    // Clearing the draft does not touch storage
    assert_eq!(service.get_profile().await.unwrap(), saved);

    service.update_profile(&draft).await.unwrap();
    let loaded = service.get_profile().await.unwrap();
    assert!(loaded.bio.name.is_empty());
    assert_eq!(loaded.bio.avatar_url, saved.bio.avatar_url);
    assert_eq!(loaded.settings, saved.settings);
}

#[tokio::test]
async fn test_factory_binds_local_backend() {
    let dir = TempDir::new().unwrap();
    let config = BackendConfig {
        backend: Some(BackendType::Local),
        data_dir: dir.path().to_path_buf(),
        firebase: FirebaseConfig::default(),
        supabase: SupabaseConfig::default(),
    };

    let service = create_service(&config).unwrap();
    let profile = service.get_profile().await.unwrap();
    assert_eq!(profile, PortfolioData::initial());

    let uri = service.upload_image("avatar.png", &[9, 9, 9]).await.unwrap();
    assert!(uri.starts_with("data:image/png;base64,"));
}

#[tokio::test]
async fn test_hosted_backends_fail_loudly_without_parameters() {
    let config = BackendConfig {
        backend: Some(BackendType::Firebase),
        data_dir: std::path::PathBuf::from("."),
        firebase: FirebaseConfig::default(),
        supabase: SupabaseConfig::default(),
    };
    let service = create_service(&config).unwrap();
    assert!(matches!(
        service.get_profile().await.unwrap_err(),
        ServiceError::Configuration(_)
    ));

    let config = BackendConfig {
        backend: Some(BackendType::Supabase),
        ..config
    };
    let service = create_service(&config).unwrap();
    assert!(matches!(
        service.reset_data().await.unwrap_err(),
        ServiceError::Configuration(_)
    ));
}
