//! Scheduling use case.
//!
//! Sits between the scheduling form and [`SessionStore`]: the store accepts any
//! well-typed input, so everything the form requires is checked here.

use super::store::SessionStore;
use crate::partner_directory::PartnerDirectory;
use chrono::{DateTime, Local, TimeZone, Utc};
use std::time::Duration;
use tandem_core::config::SchedulingConfig;
use tandem_core::error::{Result, TandemError};
use tandem_core::session::{NewSession, Session};

/// Raw values submitted by the scheduling form.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ScheduleRequest {
    pub partner_id: String,
    pub scheduled_at: Option<DateTime<Utc>>,
    /// Falls back to the configured default duration when absent.
    pub duration_minutes: Option<u32>,
    pub topic: Option<String>,
    pub notes: Option<String>,
}

/// Result of a successful submission, carrying the confirmation text shown
/// to the user.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ScheduleOutcome {
    pub session: Session,
    pub title: String,
    pub description: String,
}

pub struct SessionScheduler {
    config: SchedulingConfig,
}

impl SessionScheduler {
    pub fn new(config: SchedulingConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &SchedulingConfig {
        &self.config
    }

    /// Validates a request and fills in defaults, relative to `now`.
    ///
    /// Checks, in order: date-time present, date not before today, duration
    /// allowed, partner known. "Today" is the calendar day of `now` in its own
    /// time zone, so the caller decides whose midnight counts.
    ///
    /// # Errors
    ///
    /// - `InvalidInput` for a missing/past date or a disallowed duration
    /// - `NotFound` for an unknown partner
    pub fn prepare<Tz: TimeZone>(
        &self,
        partners: &PartnerDirectory,
        request: ScheduleRequest,
        now: DateTime<Tz>,
    ) -> Result<NewSession> {
        let scheduled_at = request
            .scheduled_at
            .ok_or_else(|| TandemError::invalid_input("Date and time are required"))?;

        if scheduled_at.with_timezone(&now.timezone()).date_naive() < now.date_naive() {
            return Err(TandemError::invalid_input(
                "Date must be today or in the future",
            ));
        }

        let duration_minutes = request
            .duration_minutes
            .unwrap_or(self.config.default_duration_minutes);
        if !self.config.allowed_durations.contains(&duration_minutes) {
            return Err(TandemError::invalid_input(format!(
                "Duration must be one of {:?} minutes",
                self.config.allowed_durations
            )));
        }

        let partner = partners.find(&request.partner_id)?;
        let language = partner.native_language.clone();

        let topic = non_blank(request.topic)
            .unwrap_or_else(|| format!("{} practice session", language));

        Ok(NewSession {
            partner_name: partner.name.clone(),
            scheduled_at,
            duration_minutes,
            language,
            topic,
            notes: non_blank(request.notes),
        })
    }

    /// Validates the request against the local calendar day and stores the
    /// session.
    ///
    /// The store is updated before this returns; call [`Self::settle`] to wait
    /// out the configured submission delay before moving on.
    pub fn schedule(
        &self,
        store: &mut SessionStore,
        partners: &PartnerDirectory,
        request: ScheduleRequest,
    ) -> Result<ScheduleOutcome> {
        let input = match self.prepare(partners, request, Local::now()) {
            Ok(input) => input,
            Err(e) => {
                tracing::warn!("[SessionScheduler] Rejected schedule request: {}", e);
                return Err(e);
            }
        };

        let session = store.add_session(input);
        tracing::info!(
            "[SessionScheduler] Scheduled {} session with {} ({})",
            session.language,
            session.partner_name,
            session.id
        );

        Ok(ScheduleOutcome {
            title: "Session scheduled successfully".to_string(),
            description: format!(
                "Your {} session with {} has been scheduled.",
                session.language, session.partner_name
            ),
            session,
        })
    }

    /// Waits for the configured submission delay.
    pub async fn settle(&self) {
        let delay = Duration::from_millis(self.config.submission_delay_ms);
        if !delay.is_zero() {
            tokio::time::sleep(delay).await;
        }
    }
}

fn non_blank(value: Option<String>) -> Option<String> {
    value.filter(|v| !v.trim().is_empty())
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{Duration as ChronoDuration, FixedOffset};
    use tandem_core::seed::SeedData;

    struct Fixture {
        store: SessionStore,
        partners: PartnerDirectory,
        scheduler: SessionScheduler,
    }

    fn fixture() -> Fixture {
        let seed = SeedData::demo().unwrap();
        Fixture {
            store: SessionStore::from_snapshot(seed.session_snapshot()).unwrap(),
            partners: PartnerDirectory::new(seed.partners),
            scheduler: SessionScheduler::new(SchedulingConfig::default()),
        }
    }

    fn request_at(at: DateTime<Utc>) -> ScheduleRequest {
        ScheduleRequest {
            partner_id: "2".to_string(),
            scheduled_at: Some(at),
            ..Default::default()
        }
    }

    #[test]
    fn test_prepare_fills_defaults_from_partner() {
        let f = fixture();
        let now = Utc.with_ymd_and_hms(2025, 3, 20, 12, 0, 0).unwrap();
        let at = Utc.with_ymd_and_hms(2025, 3, 21, 9, 0, 0).unwrap();

        let input = f.scheduler.prepare(&f.partners, request_at(at), now).unwrap();

        assert_eq!(input.partner_name, "Hiroshi Tanaka");
        assert_eq!(input.language, "Japanese");
        assert_eq!(input.topic, "Japanese practice session");
        assert_eq!(input.duration_minutes, 30);
        assert_eq!(input.notes, None);
    }

    #[test]
    fn test_prepare_accepts_later_today() {
        let f = fixture();
        let now = Utc.with_ymd_and_hms(2025, 3, 20, 12, 0, 0).unwrap();
        let earlier_today = Utc.with_ymd_and_hms(2025, 3, 20, 8, 0, 0).unwrap();

        assert!(f.scheduler.prepare(&f.partners, request_at(earlier_today), now).is_ok());
    }

    #[test]
    fn test_today_follows_caller_time_zone() {
        let f = fixture();
        // 20:00 on March 20th, five hours west of UTC (already the 21st in UTC).
        let new_york = FixedOffset::west_opt(5 * 3600).unwrap();
        let now = new_york.with_ymd_and_hms(2025, 3, 20, 20, 0, 0).unwrap();
        let same_local_day = Utc.with_ymd_and_hms(2025, 3, 20, 23, 30, 0).unwrap();
        let previous_local_day = Utc.with_ymd_and_hms(2025, 3, 20, 4, 0, 0).unwrap();

        assert!(f
            .scheduler
            .prepare(&f.partners, request_at(same_local_day), now)
            .is_ok());
        assert!(f
            .scheduler
            .prepare(&f.partners, request_at(previous_local_day), now)
            .unwrap_err()
            .is_invalid_input());
    }

    #[test]
    fn test_prepare_rejects_past_date() {
        let f = fixture();
        let now = Utc.with_ymd_and_hms(2025, 3, 20, 12, 0, 0).unwrap();
        let yesterday = now - ChronoDuration::days(1);

        let err = f
            .scheduler
            .prepare(&f.partners, request_at(yesterday), now)
            .unwrap_err();

        assert_eq!(
            err,
            TandemError::invalid_input("Date must be today or in the future")
        );
    }

    #[test]
    fn test_prepare_rejects_missing_date() {
        let f = fixture();
        let request = ScheduleRequest {
            partner_id: "1".to_string(),
            ..Default::default()
        };

        let err = f.scheduler.prepare(&f.partners, request, Utc::now()).unwrap_err();

        assert_eq!(err, TandemError::invalid_input("Date and time are required"));
    }

    #[test]
    fn test_prepare_rejects_disallowed_duration() {
        let f = fixture();
        let now = Utc::now();
        let mut request = request_at(now + ChronoDuration::days(2));
        request.duration_minutes = Some(20);

        assert!(f.scheduler.prepare(&f.partners, request, now).unwrap_err().is_invalid_input());
    }

    #[test]
    fn test_prepare_rejects_unknown_partner() {
        let f = fixture();
        let now = Utc::now();
        let mut request = request_at(now + ChronoDuration::days(2));
        request.partner_id = "42".to_string();

        assert!(f.scheduler.prepare(&f.partners, request, now).unwrap_err().is_not_found());
    }

    #[test]
    fn test_blank_topic_and_notes_are_treated_as_absent() {
        let f = fixture();
        let now = Utc::now();
        let mut request = request_at(now + ChronoDuration::days(1));
        request.topic = Some("   ".to_string());
        request.notes = Some(String::new());

        let input = f.scheduler.prepare(&f.partners, request, now).unwrap();

        assert_eq!(input.topic, "Japanese practice session");
        assert!(input.notes.is_none());
    }

    #[test]
    fn test_schedule_prepends_and_describes() {
        let mut f = fixture();
        let mut request = request_at(Utc::now() + ChronoDuration::days(3));
        request.topic = Some("Keigo".to_string());
        request.duration_minutes = Some(45);

        let outcome = f.scheduler.schedule(&mut f.store, &f.partners, request).unwrap();

        assert_eq!(f.store.upcoming()[0], outcome.session);
        assert_eq!(outcome.session.topic, "Keigo");
        assert_eq!(outcome.title, "Session scheduled successfully");
        assert_eq!(
            outcome.description,
            "Your Japanese session with Hiroshi Tanaka has been scheduled."
        );
    }

    #[test]
    fn test_schedule_failure_leaves_store_unchanged() {
        let mut f = fixture();
        let before = f.store.snapshot();

        let result = f.scheduler.schedule(
            &mut f.store,
            &f.partners,
            request_at(Utc::now() - ChronoDuration::days(7)),
        );

        assert!(result.is_err());
        assert_eq!(f.store.snapshot(), before);
    }

    #[tokio::test(start_paused = true)]
    async fn test_settle_waits_for_configured_delay() {
        let scheduler = SessionScheduler::new(SchedulingConfig {
            submission_delay_ms: 1000,
            ..Default::default()
        });
        let start = tokio::time::Instant::now();

        scheduler.settle().await;

        assert!(start.elapsed() >= Duration::from_millis(1000));
    }
}
