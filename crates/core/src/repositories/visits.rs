//! Visit-level counts and the birth-date projection for the age histogram.
//!
//! Aggregating visits by a person-level dimension goes through an explicit
//! join on `person_id`; the join is spelled out in the SQL rather than
//! hidden behind a relationship abstraction.

use chrono::{NaiveDate, NaiveDateTime};
use sqlx::PgPool;

use super::people::PersonDimension;
use crate::CdmResult;

#[derive(Clone)]
pub struct VisitRepository {
    pool: PgPool,
}

impl VisitRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Visits of one visit type (9201/9202/9203).
    pub async fn count_by_visit_type(&self, visit_concept_id: i32) -> CdmResult<i64> {
        let count = sqlx::query_scalar::<_, i64>(
            "SELECT COUNT(*) FROM de.visit_occurrence WHERE visit_concept_id = $1",
        )
        .bind(visit_concept_id)
        .fetch_one(&self.pool)
        .await?;
        Ok(count)
    }

    /// Visits whose patient's `dimension` column holds exactly `concept_id`.
    pub async fn count_by_person_dimension(
        &self,
        dimension: PersonDimension,
        concept_id: i32,
    ) -> CdmResult<i64> {
        let sql = format!(
            "SELECT COUNT(*) \
             FROM de.visit_occurrence v \
             JOIN de.person p ON p.person_id = v.person_id \
             WHERE p.{} = $1",
            dimension.column()
        );
        let count = sqlx::query_scalar::<_, i64>(&sql)
            .bind(concept_id)
            .fetch_one(&self.pool)
            .await?;
        Ok(count)
    }

    /// The birth date of every visit's patient, one entry per visit.
    /// Visits whose patient has no recorded birth date are skipped.
    pub async fn visit_birth_dates(&self) -> CdmResult<Vec<NaiveDate>> {
        let births = sqlx::query_scalar::<_, NaiveDateTime>(
            "SELECT p.birth_datetime \
             FROM de.visit_occurrence v \
             JOIN de.person p ON p.person_id = v.person_id \
             WHERE p.birth_datetime IS NOT NULL",
        )
        .fetch_all(&self.pool)
        .await?;

        Ok(births.into_iter().map(|b| b.date()).collect())
    }
}
