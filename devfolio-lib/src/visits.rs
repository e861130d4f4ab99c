use crate::error::ServiceResult;
use crate::model::PortfolioData;
use crate::service::PortfolioService;
use chrono::NaiveDate;
use std::collections::HashSet;

/// Ephemeral per-session markers preventing duplicate same-day increments.
///
/// One instance lives for the lifetime of a session (the analog of the
/// browser's sessionStorage). There is no cross-process coordination: two
/// sessions booted before either marks today may each increment once, which
/// is acceptable in the single-owner model.
#[derive(Debug, Default)]
pub struct SessionMarkers {
    visited: HashSet<String>,
}

impl SessionMarkers {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_marked(&self, date_key: &str) -> bool {
        self.visited.contains(date_key)
    }

    pub fn mark(&mut self, date_key: String) {
        self.visited.insert(date_key);
    }
}

/// Calendar date key in YYYY-MM-DD form
pub fn date_key(date: NaiveDate) -> String {
    date.format("%Y-%m-%d").to_string()
}

/// Record one visit for `today`, at most once per session per day.
///
/// Increments the in-memory tally, persists the whole aggregate, then sets
/// the session marker. If the save fails the increment is rolled back so the
/// caller still holds the aggregate as fetched, and the error propagates.
/// Returns whether an increment was persisted.
pub async fn record_visit(
    service: &dyn PortfolioService,
    markers: &mut SessionMarkers,
    profile: &mut PortfolioData,
    today: NaiveDate,
) -> ServiceResult<bool> {
    let key = date_key(today);
    if markers.is_marked(&key) {
        return Ok(false);
    }

    let previous = profile.settings.visit_count.get(&key).copied();
    profile
        .settings
        .visit_count
        .insert(key.clone(), previous.unwrap_or(0) + 1);

    match service.update_profile(profile).await {
        Ok(()) => {
            markers.mark(key);
            Ok(true)
        }
        Err(err) => {
            match previous {
                Some(count) => profile.settings.visit_count.insert(key, count),
                None => profile.settings.visit_count.remove(&key),
            };
            Err(err)
        }
    }
}

/// Application boot path: fetch the aggregate, then apply the visit increment
/// best-effort. A failed counter save never blocks rendering; the
/// pre-increment aggregate is returned and the failure logged.
pub async fn boot(
    service: &dyn PortfolioService,
    markers: &mut SessionMarkers,
) -> ServiceResult<PortfolioData> {
    let mut profile = service.get_profile().await?;
    let today = chrono::Local::now().date_naive();
    if let Err(err) = record_visit(service, markers, &mut profile, today).await {
        tracing::warn!(error = %err, "visit counter save failed, serving pre-increment data");
    }
    Ok(profile)
}
