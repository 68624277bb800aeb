use chrono::{DateTime, Datelike, NaiveDate, Utc};
use std::sync::Arc;

use crate::errors::{AppError, Result};
use crate::models::plan;
use crate::models::{PlanState, QuotaState, UserAccount};
use crate::store::{AccountStore, Versioned};

/// The entitlement ledger: each user's plan and remaining image quota,
/// mutated only through the operations below. Every mutation is a
/// read-version / compute / conditional-write cycle against a single account
/// record, retried on conflict, so concurrent admin calls on one account
/// serialize without lost updates. No cross-account atomicity is offered.
#[derive(Clone)]
pub struct EntitlementLedger {
    accounts: Arc<dyn AccountStore>,
}

impl EntitlementLedger {
    pub fn new(accounts: Arc<dyn AccountStore>) -> Self {
        Self { accounts }
    }

    /// Applies `delta` to the account's remaining image quota, clamped at
    /// zero. Fails with NotFound when the account does not exist.
    pub async fn adjust_credits(&self, uid: &str, delta: i64) -> Result<UserAccount> {
        loop {
            let Versioned { mut record, version } =
                self.accounts.get(uid).await?.ok_or(AppError::NotFound)?;

            record.quota.images_remaining = (record.quota.images_remaining + delta).max(0);
            record.updated_at = Utc::now();

            if self.accounts.update(&record, version).await? {
                return Ok(record);
            }
        }
    }

    /// Assigns a plan from the static catalog and resets the quota to the
    /// plan's monthly allotment, with `resets_at` at the first instant of the
    /// next calendar month (UTC). Upserts with merge semantics: unrelated
    /// fields of an existing account are preserved. Unknown plan ids are
    /// rejected before any write.
    pub async fn set_plan(&self, uid: &str, plan_id: &str) -> Result<UserAccount> {
        let plan = plan::find(plan_id)
            .ok_or_else(|| AppError::Validation(format!("Unknown plan id: {}", plan_id)))?;

        loop {
            match self.accounts.get(uid).await? {
                Some(Versioned { mut record, version }) => {
                    record.plan = PlanState {
                        id: plan.id.to_string(),
                        activated: true,
                        requested_id: None,
                        requested_at: None,
                    };
                    record.quota = QuotaState {
                        images_remaining: plan.monthly_images,
                        resets_at: Some(next_month_start(Utc::now())),
                    };
                    record.updated_at = Utc::now();

                    if self.accounts.update(&record, version).await? {
                        return Ok(record);
                    }
                }
                None => {
                    let record =
                        UserAccount::new(uid, None, None, plan, next_month_start(Utc::now()));
                    if self.accounts.insert(&record).await? {
                        return Ok(record);
                    }
                }
            }
        }
    }

    /// Creates a minimal account on first authenticated contact: guest plan,
    /// guest allotment. A second call is a no-op.
    pub async fn ensure_account(
        &self,
        uid: &str,
        email: Option<String>,
        display_name: Option<String>,
    ) -> Result<UserAccount> {
        if let Some(existing) = self.accounts.get(uid).await? {
            return Ok(existing.record);
        }

        let record = UserAccount::new(
            uid,
            email,
            display_name,
            plan::guest(),
            next_month_start(Utc::now()),
        );
        if self.accounts.insert(&record).await? {
            return Ok(record);
        }

        // Lost the creation race; the record written first wins.
        Ok(self
            .accounts
            .get(uid)
            .await?
            .ok_or(AppError::NotFound)?
            .record)
    }

    pub async fn lookup(&self, uid: &str) -> Result<UserAccount> {
        Ok(self
            .accounts
            .get(uid)
            .await?
            .ok_or(AppError::NotFound)?
            .record)
    }
}

/// First instant of the calendar month after `now`, UTC.
pub fn next_month_start(now: DateTime<Utc>) -> DateTime<Utc> {
    let (year, month) = if now.month() == 12 {
        (now.year() + 1, 1)
    } else {
        (now.year(), now.month() + 1)
    };

    NaiveDate::from_ymd_opt(year, month, 1)
        .expect("first day of a month is a valid date")
        .and_hms_opt(0, 0, 0)
        .expect("midnight is a valid time")
        .and_utc()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::store::memory::MemoryAccountStore;
    use chrono::{TimeZone, Timelike};
    use futures::future::join_all;

    fn ledger() -> EntitlementLedger {
        EntitlementLedger::new(Arc::new(MemoryAccountStore::new()))
    }

    #[tokio::test]
    async fn adjust_clamps_at_zero() {
        let ledger = ledger();
        ledger.ensure_account("u1", None, None).await.unwrap();

        // Guest allotment is 10; bring the balance to 50 first.
        let account = ledger.adjust_credits("u1", 40).await.unwrap();
        assert_eq!(account.quota.images_remaining, 50);

        let account = ledger.adjust_credits("u1", -1000).await.unwrap();
        assert_eq!(account.quota.images_remaining, 0);

        // The clamp is not a floor for later additions.
        let account = ledger.adjust_credits("u1", 7).await.unwrap();
        assert_eq!(account.quota.images_remaining, 7);
    }

    #[tokio::test]
    async fn adjust_fails_for_missing_account() {
        let err = ledger().adjust_credits("ghost", 5).await.unwrap_err();
        assert!(matches!(err, AppError::NotFound));
    }

    #[tokio::test]
    async fn set_plan_rejects_unknown_id_before_any_write() {
        let ledger = ledger();
        let err = ledger.set_plan("u1", "mega").await.unwrap_err();
        assert!(matches!(err, AppError::Validation(_)));

        // Nothing was created for the target.
        let err = ledger.lookup("u1").await.unwrap_err();
        assert!(matches!(err, AppError::NotFound));
    }

    #[tokio::test]
    async fn set_plan_assigns_deluxe_allotment() {
        let ledger = ledger();
        let account = ledger.set_plan("u1", "deluxe").await.unwrap();

        assert_eq!(account.plan.id, "deluxe");
        assert!(account.plan.activated);
        assert_eq!(account.quota.images_remaining, 3_300);

        let resets_at = account.quota.resets_at.unwrap();
        assert_eq!(resets_at.day(), 1);
        assert_eq!(
            (resets_at.hour(), resets_at.minute(), resets_at.second()),
            (0, 0, 0)
        );
        assert!(resets_at > Utc::now());
    }

    #[tokio::test]
    async fn set_plan_preserves_unrelated_fields() {
        let ledger = ledger();
        let created = ledger
            .ensure_account(
                "u1",
                Some("artist@example.com".to_string()),
                Some("Artist".to_string()),
            )
            .await
            .unwrap();

        let updated = ledger.set_plan("u1", "premium").await.unwrap();
        assert_eq!(updated.email.as_deref(), Some("artist@example.com"));
        assert_eq!(updated.display_name.as_deref(), Some("Artist"));
        assert_eq!(updated.created_at, created.created_at);
        assert_eq!(updated.quota.images_remaining, 7_000);
    }

    #[tokio::test]
    async fn ensure_account_is_idempotent() {
        let ledger = ledger();
        let first = ledger
            .ensure_account("u1", Some("a@example.com".to_string()), None)
            .await
            .unwrap();
        assert_eq!(first.plan.id, "guest");
        assert_eq!(first.quota.images_remaining, 10);

        // Second call must not touch the record, not even with new fields.
        let second = ledger
            .ensure_account("u1", Some("b@example.com".to_string()), None)
            .await
            .unwrap();
        assert_eq!(second, first);
    }

    #[tokio::test]
    async fn concurrent_adjustments_serialize() {
        let ledger = Arc::new(ledger());
        ledger.ensure_account("u1", None, None).await.unwrap();

        let tasks: Vec<_> = (0..40)
            .map(|_| {
                let ledger = ledger.clone();
                tokio::spawn(async move { ledger.adjust_credits("u1", 5).await })
            })
            .collect();
        for result in join_all(tasks).await {
            result.unwrap().unwrap();
        }

        let account = ledger.lookup("u1").await.unwrap();
        assert_eq!(account.quota.images_remaining, 10 + 40 * 5);
    }

    #[test]
    fn month_rollover_mid_year() {
        let now = Utc.with_ymd_and_hms(2026, 8, 8, 13, 45, 12).unwrap();
        let next = next_month_start(now);
        assert_eq!(next, Utc.with_ymd_and_hms(2026, 9, 1, 0, 0, 0).unwrap());
    }

    #[test]
    fn month_rollover_december_to_january() {
        let now = Utc.with_ymd_and_hms(2025, 12, 31, 23, 59, 59).unwrap();
        let next = next_month_start(now);
        assert_eq!(next, Utc.with_ymd_and_hms(2026, 1, 1, 0, 0, 0).unwrap());
    }
}
