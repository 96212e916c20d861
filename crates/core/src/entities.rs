//! Row types for the observational-data schema.
//!
//! All six tables live in the `de` schema and are written exclusively by an
//! external loading process; this crate only reads them. Coded fields are
//! foreign keys into `concept`, the shared dimension table.

use chrono::NaiveDateTime;
use serde::Serialize;
use sqlx::FromRow;
use utoipa::ToSchema;

/// A coded, named value from the shared clinical vocabulary.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, FromRow, ToSchema)]
pub struct Concept {
    pub id: i32,
    pub concept_name: String,
    pub domain_id: String,
}

/// A patient. Gender, race and ethnicity are three distinct foreign keys
/// into `concept`.
#[derive(Debug, Clone, Serialize, FromRow, ToSchema)]
pub struct Person {
    pub id: i32,
    pub gender_concept_id: Option<i32>,
    pub birth_datetime: Option<NaiveDateTime>,
    pub race_concept_id: Option<i32>,
    pub ethnicity_concept_id: Option<i32>,
}

/// One recorded clinical encounter. `visit_concept_id` is in practice one of
/// 9201 (inpatient), 9202 (outpatient) or 9203 (emergency room).
#[derive(Debug, Clone, Serialize, FromRow, ToSchema)]
pub struct VisitOccurrence {
    pub id: i32,
    pub person_id: Option<i32>,
    pub visit_concept_id: Option<i32>,
    pub visit_start_datetime: Option<NaiveDateTime>,
    pub visit_end_datetime: Option<NaiveDateTime>,
}

/// A recorded diagnosis, tied to the visit it was made in. Read capability
/// only; no current aggregation uses it.
#[derive(Debug, Clone, Serialize, FromRow, ToSchema)]
pub struct ConditionOccurrence {
    pub id: i32,
    pub person_id: Option<i32>,
    pub condition_concept_id: Option<i32>,
    pub condition_start_datetime: Option<NaiveDateTime>,
    pub condition_end_datetime: Option<NaiveDateTime>,
    pub visit_occurrence_id: Option<i32>,
}

/// A recorded drug prescription, tied to the visit it was made in. Read
/// capability only; no current aggregation uses it.
#[derive(Debug, Clone, Serialize, FromRow, ToSchema)]
pub struct DrugExposure {
    pub id: i32,
    pub person_id: Option<i32>,
    pub drug_concept_id: Option<i32>,
    pub drug_exposure_start_datetime: Option<NaiveDateTime>,
    pub drug_exposure_end_datetime: Option<NaiveDateTime>,
    pub visit_occurrence_id: Option<i32>,
}

/// One row per deceased patient.
#[derive(Debug, Clone, Serialize, FromRow, ToSchema)]
pub struct Death {
    pub person_id: i32,
    pub death_date: Option<NaiveDateTime>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn concept_serializes_stored_fields() {
        let concept = Concept {
            id: 8507,
            concept_name: "MALE".into(),
            domain_id: "Gender".into(),
        };
        let json = serde_json::to_value(&concept).unwrap();
        assert_eq!(
            json,
            serde_json::json!({"id": 8507, "concept_name": "MALE", "domain_id": "Gender"})
        );
    }

    #[test]
    fn fact_rows_serialize_their_visit_linkage() {
        let condition = ConditionOccurrence {
            id: 10,
            person_id: Some(1),
            condition_concept_id: Some(201_826),
            condition_start_datetime: None,
            condition_end_datetime: None,
            visit_occurrence_id: Some(77),
        };
        let drug = DrugExposure {
            id: 11,
            person_id: Some(1),
            drug_concept_id: Some(1_125_315),
            drug_exposure_start_datetime: None,
            drug_exposure_end_datetime: None,
            visit_occurrence_id: Some(77),
        };
        let visit = VisitOccurrence {
            id: 77,
            person_id: Some(1),
            visit_concept_id: Some(9201),
            visit_start_datetime: None,
            visit_end_datetime: None,
        };
        let death = Death {
            person_id: 1,
            death_date: None,
        };

        assert_eq!(serde_json::to_value(&condition).unwrap()["visit_occurrence_id"], 77);
        assert_eq!(serde_json::to_value(&drug).unwrap()["visit_occurrence_id"], 77);
        assert_eq!(serde_json::to_value(&visit).unwrap()["visit_concept_id"], 9201);
        assert_eq!(serde_json::to_value(&death).unwrap()["person_id"], 1);
    }

    #[test]
    fn person_serializes_nullable_codes_as_null() {
        let person = Person {
            id: 1,
            gender_concept_id: Some(8532),
            birth_datetime: None,
            race_concept_id: None,
            ethnicity_concept_id: None,
        };
        let json = serde_json::to_value(&person).unwrap();
        assert_eq!(json["gender_concept_id"], 8532);
        assert!(json["race_concept_id"].is_null());
    }
}
