use crate::error::{ServiceError, ServiceResult};
use crate::model::{AppSettings, PortfolioData};

/// Minimum admin password length enforced at registration
pub const MIN_PASSWORD_LEN: usize = 6;

/// True until the first successful registration sets the admin password.
/// Callers route to the registration form in this state, the login form
/// otherwise.
pub fn is_first_run(settings: &AppSettings) -> bool {
    settings.admin_password.is_none()
}

/// One-time password setup. Valid only in the first-run state; once set there
/// is no rotation or reset flow. Mutates the draft only - persisting the new
/// password still requires an explicit save.
pub fn register(data: &mut PortfolioData, password: &str, confirm: &str) -> ServiceResult<()> {
    if !is_first_run(&data.settings) {
        return Err(ServiceError::Validation(
            "password already configured, use login".to_string(),
        ));
    }
    if password.len() < MIN_PASSWORD_LEN {
        return Err(ServiceError::Validation(format!(
            "password must be at least {MIN_PASSWORD_LEN} characters"
        )));
    }
    if password != confirm {
        return Err(ServiceError::Validation("passwords do not match".to_string()));
    }
    data.settings.admin_password = Some(password.to_string());
    Ok(())
}

/// Plaintext comparison against the stored admin password. The trust model is
/// a single owner on a single deployment; the password is deliberately not
/// hashed to stay compatible with documents written by the original app.
pub fn login(settings: &AppSettings, password: &str) -> ServiceResult<()> {
    match settings.admin_password.as_deref() {
        None => Err(ServiceError::Validation(
            "no password configured yet, register first".to_string(),
        )),
        Some(stored) if stored == password => Ok(()),
        Some(_) => Err(ServiceError::Validation("incorrect password".to_string())),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn register_sets_password_once() {
        let mut data = PortfolioData::initial();
        assert!(is_first_run(&data.settings));

        register(&mut data, "secret1", "secret1").unwrap();
        assert_eq!(data.settings.admin_password.as_deref(), Some("secret1"));
        assert!(!is_first_run(&data.settings));

        // Re-registration is not an entry path once a password exists
        let err = register(&mut data, "other123", "other123").unwrap_err();
        assert!(matches!(err, ServiceError::Validation(_)));
        assert_eq!(data.settings.admin_password.as_deref(), Some("secret1"));
    }

    #[test]
    fn register_enforces_length_and_confirmation() {
        let mut data = PortfolioData::initial();
        assert!(register(&mut data, "short", "short").is_err());
        assert!(register(&mut data, "secret1", "secret2").is_err());
        assert!(is_first_run(&data.settings));
    }

    #[test]
    fn login_compares_plaintext() {
        let mut data = PortfolioData::initial();
        assert!(login(&data.settings, "anything").is_err());

        register(&mut data, "secret1", "secret1").unwrap();
        assert!(login(&data.settings, "secret1").is_ok());
        assert!(login(&data.settings, "wrong").is_err());
    }
}
