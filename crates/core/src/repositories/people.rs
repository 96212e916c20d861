//! Person listing and person-level counts.

use sqlx::PgPool;

use crate::entities::Person;
use crate::CdmResult;

/// The three person-level categorical dimensions. Selecting the column
/// through this enum keeps user input out of the SQL text.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum PersonDimension {
    Gender,
    Race,
    Ethnicity,
}

impl PersonDimension {
    pub(crate) fn column(self) -> &'static str {
        match self {
            PersonDimension::Gender => "gender_concept_id",
            PersonDimension::Race => "race_concept_id",
            PersonDimension::Ethnicity => "ethnicity_concept_id",
        }
    }
}

#[derive(Clone)]
pub struct PersonRepository {
    pool: PgPool,
}

impl PersonRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Unfiltered offset-paginated page of persons.
    pub async fn search(&self, skip: i64, limit: i64) -> CdmResult<Vec<Person>> {
        let people = sqlx::query_as::<_, Person>(
            "SELECT person_id AS id, gender_concept_id, birth_datetime, \
                    race_concept_id, ethnicity_concept_id \
             FROM de.person \
             ORDER BY person_id \
             OFFSET $1 LIMIT $2",
        )
        .bind(skip)
        .bind(limit)
        .fetch_all(&self.pool)
        .await?;

        Ok(people)
    }

    /// Total patient count.
    pub async fn count(&self) -> CdmResult<i64> {
        let count = sqlx::query_scalar::<_, i64>("SELECT COUNT(*) FROM de.person")
            .fetch_one(&self.pool)
            .await?;
        Ok(count)
    }

    /// Patients whose `dimension` column holds exactly `concept_id`. Rows
    /// with a null or unlisted code match no category and are never counted.
    pub async fn count_by(&self, dimension: PersonDimension, concept_id: i32) -> CdmResult<i64> {
        let sql = format!(
            "SELECT COUNT(*) FROM de.person WHERE {} = $1",
            dimension.column()
        );
        let count = sqlx::query_scalar::<_, i64>(&sql)
            .bind(concept_id)
            .fetch_one(&self.pool)
            .await?;
        Ok(count)
    }

    /// Total death count (one row per deceased patient).
    pub async fn count_deaths(&self) -> CdmResult<i64> {
        let count = sqlx::query_scalar::<_, i64>("SELECT COUNT(*) FROM de.death")
            .fetch_one(&self.pool)
            .await?;
        Ok(count)
    }
}
