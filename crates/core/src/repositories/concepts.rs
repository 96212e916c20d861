//! Concept search, lookup, and the dynamic ethnicity category list.

use sqlx::PgPool;

use crate::categories::Category;
use crate::domain::DomainId;
use crate::entities::Concept;
use crate::CdmResult;

#[derive(Clone)]
pub struct ConceptRepository {
    pool: PgPool,
}

impl ConceptRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Offset-paginated concept search with an optional exact domain filter
    /// and an optional case-sensitive substring filter on the name.
    pub async fn search(
        &self,
        skip: i64,
        limit: i64,
        domain_id: Option<DomainId>,
        concept_name: Option<&str>,
    ) -> CdmResult<Vec<Concept>> {
        let concepts = sqlx::query_as::<_, Concept>(
            "SELECT concept_id AS id, concept_name, domain_id \
             FROM de.concept \
             WHERE ($1::text IS NULL OR domain_id = $1) \
               AND ($2::text IS NULL OR concept_name LIKE '%' || $2 || '%') \
             ORDER BY concept_id \
             OFFSET $3 LIMIT $4",
        )
        .bind(domain_id.map(|d| d.as_str()))
        .bind(concept_name)
        .bind(skip)
        .bind(limit)
        .fetch_all(&self.pool)
        .await?;

        Ok(concepts)
    }

    /// Point lookup by concept id.
    pub async fn get(&self, concept_id: i32) -> CdmResult<Option<Concept>> {
        let concept = sqlx::query_as::<_, Concept>(
            "SELECT concept_id AS id, concept_name, domain_id \
             FROM de.concept \
             WHERE concept_id = $1",
        )
        .bind(concept_id)
        .fetch_optional(&self.pool)
        .await?;

        Ok(concept)
    }

    /// The ethnicity dimension, resolved from the vocabulary at query time.
    ///
    /// Unlike gender and race this is not a frozen table; every concept
    /// tagged `Ethnicity` becomes a reporting category, in database return
    /// order.
    pub async fn ethnicity_categories(&self) -> CdmResult<Vec<Category>> {
        let rows = sqlx::query_as::<_, (i32, String)>(
            "SELECT concept_id, concept_name FROM de.concept WHERE domain_id = $1",
        )
        .bind(DomainId::Ethnicity.as_str())
        .fetch_all(&self.pool)
        .await?;

        Ok(rows
            .into_iter()
            .map(|(concept_id, label)| Category { concept_id, label })
            .collect())
    }
}
