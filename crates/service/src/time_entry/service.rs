use std::sync::Arc;
use tracing::{info, instrument, warn};

use models::time_entry::{Model, TimeEntryInput};
use crate::errors::ServiceError;
use crate::time_entry::repository::TimeEntryRepository;
use crate::Lookup;

/// Application service over a time entry repository.
/// Numeric fields are stored as given; negative quantities are accepted.
#[derive(Clone)]
pub struct TimeEntryService {
    repo: Arc<dyn TimeEntryRepository>,
}

impl TimeEntryService {
    pub fn new(repo: Arc<dyn TimeEntryRepository>) -> Self { Self { repo } }

    #[instrument(skip(self))]
    pub async fn list(&self) -> Result<Vec<Model>, ServiceError> {
        let rows = self.repo.list().await?;
        info!(count = rows.len(), "list time entries");
        Ok(rows)
    }

    #[instrument(skip(self))]
    pub async fn get(&self, id: i32) -> Result<Lookup<Model>, ServiceError> {
        self.repo.get(id).await
    }

    #[instrument(skip(self, input), fields(date = %input.date))]
    pub async fn create(&self, input: TimeEntryInput) -> Result<Model, ServiceError> {
        let created = self.repo.create(input).await?;
        info!(id = created.id, "created time entry");
        Ok(created)
    }

    #[instrument(skip(self, input), fields(date = %input.date))]
    pub async fn update(&self, id: i32, input: TimeEntryInput) -> Result<Lookup<Model>, ServiceError> {
        let res = self.repo.update(id, input).await?;
        match &res {
            Lookup::Found(m) => info!(id = m.id, "updated time entry"),
            Lookup::NotFound => warn!(id, "update of unknown time entry"),
        }
        Ok(res)
    }

    #[instrument(skip(self))]
    pub async fn delete(&self, id: i32) -> Result<Lookup<Model>, ServiceError> {
        let res = self.repo.delete(id).await?;
        match &res {
            Lookup::Found(_) => info!(id, "deleted time entry"),
            Lookup::NotFound => warn!(id, "delete of unknown time entry"),
        }
        Ok(res)
    }

    pub async fn ping(&self) -> Result<(), ServiceError> {
        self.repo.ping().await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::get_db;
    use crate::time_entry::SeaOrmTimeEntryRepository;
    use chrono::NaiveDate;
    use rust_decimal::Decimal;

    async fn service() -> Result<TimeEntryService, anyhow::Error> {
        let db = get_db().await?;
        Ok(TimeEntryService::new(Arc::new(SeaOrmTimeEntryRepository { db })))
    }

    fn payload(quantity: Decimal, notes: Option<&str>) -> TimeEntryInput {
        TimeEntryInput {
            date: NaiveDate::from_ymd_opt(2026, 2, 1).unwrap(),
            quantity,
            multiplier: Decimal::ONE,
            notes: notes.map(str::to_string),
        }
    }

    #[tokio::test]
    async fn round_trip_through_service() -> Result<(), anyhow::Error> {
        let svc = service().await?;
        let created = svc.create(payload(Decimal::new(8, 0), Some("Normal day"))).await?;
        assert_eq!(svc.get(created.id).await?, Lookup::Found(created.clone()));
        assert_eq!(svc.list().await?, vec![created]);
        svc.ping().await?;
        Ok(())
    }

    #[tokio::test]
    async fn update_leaves_other_entries_alone() -> Result<(), anyhow::Error> {
        let svc = service().await?;
        let a = svc.create(payload(Decimal::new(8, 0), Some("a"))).await?;
        let b = svc.create(payload(Decimal::new(6, 0), Some("b"))).await?;

        let updated = svc.update(a.id, payload(Decimal::new(-2, 0), Some("a2"))).await?;
        let Lookup::Found(updated) = updated else { panic!("entry {} should exist", a.id) };
        assert_eq!(updated.quantity, Decimal::new(-2, 0));
        assert_eq!(svc.get(b.id).await?, Lookup::Found(b));
        Ok(())
    }

    #[tokio::test]
    async fn unknown_ids_are_not_errors() -> Result<(), anyhow::Error> {
        let svc = service().await?;
        assert_eq!(svc.update(7, payload(Decimal::ONE, None)).await?, Lookup::NotFound);
        assert_eq!(svc.delete(7).await?, Lookup::NotFound);
        Ok(())
    }
}
