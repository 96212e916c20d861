//! Per-category count aggregation and statistics assembly.
//!
//! Every categorical breakdown follows the same pattern: resolve the
//! category list for the dimension, issue one exact-match count query per
//! category, and map each label to its count. The result always carries one
//! entry per resolved category, zero counts included; rows whose code
//! matches no listed category are excluded, never bucketed as "other".
//!
//! The sub-queries of one statistics call run sequentially on the same pool
//! without a shared snapshot, so counts assembled here may reflect a moving
//! target under concurrent loads. Acceptable for a read-only reporting
//! surface.

use std::collections::BTreeMap;

use chrono::Local;
use serde::Serialize;
use sqlx::PgPool;
use utoipa::ToSchema;

use crate::age;
use crate::categories::{self, Category};
use crate::repositories::{ConceptRepository, PersonDimension, PersonRepository, VisitRepository};
use crate::CdmResult;

/// The `/static/person` response. Field names keep the exact (historically
/// inconsistent) JSON keys consumers already depend on.
#[derive(Debug, Serialize, ToSchema)]
pub struct PersonStats {
    #[serde(rename = "Total Patient")]
    pub total_patients: i64,
    #[serde(rename = "Patient by Gender")]
    pub by_gender: BTreeMap<String, i64>,
    #[serde(rename = "Patient by Race")]
    pub by_race: BTreeMap<String, i64>,
    #[serde(rename = "Patient by Ethnicity")]
    pub by_ethnicity: BTreeMap<String, i64>,
    #[serde(rename = "Total Death")]
    pub total_deaths: i64,
}

/// The `/static/visit` response.
#[derive(Debug, Serialize, ToSchema)]
pub struct VisitStats {
    #[serde(rename = "Visit by concept")]
    pub by_visit_type: BTreeMap<String, i64>,
    #[serde(rename = "visit_by_gender")]
    pub by_gender: BTreeMap<String, i64>,
    #[serde(rename = "visit_by_race")]
    pub by_race: BTreeMap<String, i64>,
    #[serde(rename = "visit_by_ethnicity")]
    pub by_ethnicity: BTreeMap<String, i64>,
    /// Decade bucket -> visit count; JSON object keys are the buckets as
    /// strings, ascending.
    #[serde(rename = "visit_by_age_range")]
    pub by_age_range: BTreeMap<i32, i64>,
}

/// Assembles the aggregate statistics endpoints from the repositories.
#[derive(Clone)]
pub struct StatsService {
    concepts: ConceptRepository,
    people: PersonRepository,
    visits: VisitRepository,
}

impl StatsService {
    pub fn new(pool: PgPool) -> Self {
        Self {
            concepts: ConceptRepository::new(pool.clone()),
            people: PersonRepository::new(pool.clone()),
            visits: VisitRepository::new(pool),
        }
    }

    /// Patient totals and the three person-level breakdowns.
    pub async fn person_statistics(&self) -> CdmResult<PersonStats> {
        let total_patients = self.people.count().await?;
        let by_gender = self
            .people_by(PersonDimension::Gender, categories::gender_categories())
            .await?;
        let by_race = self
            .people_by(PersonDimension::Race, categories::race_categories())
            .await?;
        let ethnicities = self.concepts.ethnicity_categories().await?;
        let by_ethnicity = self.people_by(PersonDimension::Ethnicity, ethnicities).await?;
        let total_deaths = self.people.count_deaths().await?;

        Ok(PersonStats {
            total_patients,
            by_gender,
            by_race,
            by_ethnicity,
            total_deaths,
        })
    }

    /// Visit breakdowns by type, by the person-level dimensions, and the
    /// age-decade histogram.
    pub async fn visit_statistics(&self) -> CdmResult<VisitStats> {
        let visit_types = categories::visit_type_categories();
        let mut type_counts = Vec::with_capacity(visit_types.len());
        for category in &visit_types {
            type_counts.push(self.visits.count_by_visit_type(category.concept_id).await?);
        }
        let by_visit_type = zip_category_counts(visit_types, type_counts);

        let by_gender = self
            .visits_by(PersonDimension::Gender, categories::gender_categories())
            .await?;
        let by_race = self
            .visits_by(PersonDimension::Race, categories::race_categories())
            .await?;
        let ethnicities = self.concepts.ethnicity_categories().await?;
        let by_ethnicity = self.visits_by(PersonDimension::Ethnicity, ethnicities).await?;

        let births = self.visits.visit_birth_dates().await?;
        tracing::debug!("bucketing ages for {} visits", births.len());
        let by_age_range = age::bucket_birth_dates(births, Local::now().date_naive());

        Ok(VisitStats {
            by_visit_type,
            by_gender,
            by_race,
            by_ethnicity,
            by_age_range,
        })
    }

    async fn people_by(
        &self,
        dimension: PersonDimension,
        categories: Vec<Category>,
    ) -> CdmResult<BTreeMap<String, i64>> {
        let mut counts = Vec::with_capacity(categories.len());
        for category in &categories {
            counts.push(self.people.count_by(dimension, category.concept_id).await?);
        }
        Ok(zip_category_counts(categories, counts))
    }

    async fn visits_by(
        &self,
        dimension: PersonDimension,
        categories: Vec<Category>,
    ) -> CdmResult<BTreeMap<String, i64>> {
        let mut counts = Vec::with_capacity(categories.len());
        for category in &categories {
            counts.push(
                self.visits
                    .count_by_person_dimension(dimension, category.concept_id)
                    .await?,
            );
        }
        Ok(zip_category_counts(categories, counts))
    }
}

/// Pair each category label with its count. Guarantees one entry per
/// distinct label, zero counts included.
fn zip_category_counts(categories: Vec<Category>, counts: Vec<i64>) -> BTreeMap<String, i64> {
    debug_assert_eq!(categories.len(), counts.len());
    categories
        .into_iter()
        .map(|c| c.label)
        .zip(counts)
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn every_category_appears_even_with_zero_counts() {
        let map = zip_category_counts(categories::race_categories(), vec![0, 0, 0]);
        assert_eq!(map.len(), 3);
        assert_eq!(map["Asian"], 0);
        assert_eq!(map["Black or African American"], 0);
        assert_eq!(map["White"], 0);
    }

    #[test]
    fn key_set_equals_resolved_label_set() {
        let labels: Vec<_> = categories::gender_categories()
            .into_iter()
            .map(|c| c.label)
            .collect();
        let map = zip_category_counts(categories::gender_categories(), vec![1, 1]);
        let mut keys: Vec<_> = map.into_keys().collect();
        keys.sort();
        let mut expected = labels;
        expected.sort();
        assert_eq!(keys, expected);
    }

    #[test]
    fn person_stats_serializes_the_legacy_keys() {
        let stats = PersonStats {
            total_patients: 2,
            by_gender: BTreeMap::from([("MALE".into(), 1), ("FEMALE".into(), 1)]),
            by_race: BTreeMap::new(),
            by_ethnicity: BTreeMap::new(),
            total_deaths: 0,
        };
        let json = serde_json::to_value(&stats).unwrap();
        assert_eq!(json["Total Patient"], 2);
        assert_eq!(json["Patient by Gender"]["MALE"], 1);
        assert_eq!(json["Patient by Gender"]["FEMALE"], 1);
        assert_eq!(json["Total Death"], 0);
        assert!(json.get("Patient by Race").is_some());
        assert!(json.get("Patient by Ethnicity").is_some());
    }

    #[test]
    fn visit_stats_serializes_mixed_key_styles_and_string_buckets() {
        let stats = VisitStats {
            by_visit_type: BTreeMap::from([("Inpatient Visit".into(), 4)]),
            by_gender: BTreeMap::new(),
            by_race: BTreeMap::new(),
            by_ethnicity: BTreeMap::new(),
            by_age_range: BTreeMap::from([(0, 2), (30, 1)]),
        };
        let json = serde_json::to_value(&stats).unwrap();
        assert_eq!(json["Visit by concept"]["Inpatient Visit"], 4);
        assert_eq!(json["visit_by_age_range"]["0"], 2);
        assert_eq!(json["visit_by_age_range"]["30"], 1);
        assert!(json.get("visit_by_gender").is_some());
    }
}
