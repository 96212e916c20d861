//! Static reference tables for the categorical dimensions.
//!
//! Gender, race and visit type are fixed, hand-curated lists. Ethnicity is
//! the one dimension resolved dynamically from the `concept` table (see
//! [`crate::repositories::concepts::ConceptRepository::ethnicity_categories`]).

/// One candidate value of a categorical dimension: a concept code and the
/// label it is reported under.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Category {
    pub concept_id: i32,
    pub label: String,
}

impl Category {
    pub fn new(concept_id: i32, label: impl Into<String>) -> Self {
        Self {
            concept_id,
            label: label.into(),
        }
    }
}

/// The two gender concepts used for reporting.
pub fn gender_categories() -> Vec<Category> {
    vec![Category::new(8507, "MALE"), Category::new(8532, "FEMALE")]
}

/// The race concepts used for reporting.
///
/// This is a frozen subset of the full race vocabulary, pre-filtered to the
/// codes actually observed in the dataset. Race codes that appear in new
/// data but are not listed here are silently excluded from the aggregates;
/// revisit this table when the dataset changes.
pub fn race_categories() -> Vec<Category> {
    vec![
        Category::new(8515, "Asian"),
        Category::new(8516, "Black or African American"),
        Category::new(8527, "White"),
    ]
}

/// The three visit-type concepts:
/// 9201 inpatient, 9202 outpatient, 9203 emergency room.
pub fn visit_type_categories() -> Vec<Category> {
    vec![
        Category::new(9201, "Inpatient Visit"),
        Category::new(9202, "Outpatient Visit"),
        Category::new(9203, "Emergency Room Visit"),
    ]
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn gender_table_is_fixed_and_ordered() {
        let genders = gender_categories();
        assert_eq!(
            genders,
            vec![Category::new(8507, "MALE"), Category::new(8532, "FEMALE")]
        );
    }

    #[test]
    fn race_table_is_the_frozen_subset() {
        let races = race_categories();
        assert_eq!(
            races.iter().map(|c| c.concept_id).collect::<Vec<_>>(),
            vec![8515, 8516, 8527]
        );
        assert_eq!(races[1].label, "Black or African American");
    }

    #[test]
    fn visit_type_table_covers_the_three_known_codes() {
        let visit_types = visit_type_categories();
        assert_eq!(
            visit_types,
            vec![
                Category::new(9201, "Inpatient Visit"),
                Category::new(9202, "Outpatient Visit"),
                Category::new(9203, "Emergency Room Visit"),
            ]
        );
    }

    #[test]
    fn labels_are_unique_within_each_table() {
        for table in [gender_categories(), race_categories(), visit_type_categories()] {
            let mut labels: Vec<_> = table.iter().map(|c| c.label.as_str()).collect();
            labels.sort_unstable();
            labels.dedup();
            assert_eq!(labels.len(), table.len());
        }
    }
}
