//! The closed set of vocabulary domain tags.
//!
//! `Concept.domain_id` groups concepts into categories such as "Gender" or
//! "Race". The set of tags in the vocabulary is fixed, so the search boundary
//! parses the `domain_id` filter into this enumeration instead of passing
//! free text through to SQL.

use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

/// A vocabulary domain tag, e.g. `Gender`, `Race`, `Visit`.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub enum DomainId {
    #[serde(rename = "Obs/Procedure")]
    ObsOrProcedure,
    Metadata,
    Sponsor,
    #[serde(rename = "Plan Stop Reason")]
    PlanStopReason,
    Plan,
    Ethnicity,
    #[serde(rename = "Spec Anatomic Site")]
    SpecAnatomicSite,
    Geography,
    Race,
    Episode,
    Route,
    Unit,
    Procedure,
    Device,
    #[serde(rename = "Condition/Meas")]
    ConditionOrMeas,
    #[serde(rename = "Spec Disease Status")]
    SpecDiseaseStatus,
    #[serde(rename = "Condition/Procedure")]
    ConditionOrProcedure,
    Provider,
    Drug,
    #[serde(rename = "Type Concept")]
    TypeConcept,
    Relationship,
    Observation,
    Gender,
    #[serde(rename = "Place of Service")]
    PlaceOfService,
    Measurement,
    #[serde(rename = "Condition/Device")]
    ConditionOrDevice,
    Currency,
    #[serde(rename = "Device/Procedure")]
    DeviceOrProcedure,
    Payer,
    #[serde(rename = "Meas Value")]
    MeasValue,
    #[serde(rename = "Revenue Code")]
    RevenueCode,
    #[serde(rename = "Drug/Procedure")]
    DrugOrProcedure,
    #[serde(rename = "Meas Value Operator")]
    MeasValueOperator,
    Regimen,
    Cost,
    #[serde(rename = "Condition/Obs")]
    ConditionOrObs,
    Visit,
    Specimen,
    Condition,
}

impl DomainId {
    /// The tag as stored in `concept.domain_id`.
    pub fn as_str(&self) -> &'static str {
        match self {
            DomainId::ObsOrProcedure => "Obs/Procedure",
            DomainId::Metadata => "Metadata",
            DomainId::Sponsor => "Sponsor",
            DomainId::PlanStopReason => "Plan Stop Reason",
            DomainId::Plan => "Plan",
            DomainId::Ethnicity => "Ethnicity",
            DomainId::SpecAnatomicSite => "Spec Anatomic Site",
            DomainId::Geography => "Geography",
            DomainId::Race => "Race",
            DomainId::Episode => "Episode",
            DomainId::Route => "Route",
            DomainId::Unit => "Unit",
            DomainId::Procedure => "Procedure",
            DomainId::Device => "Device",
            DomainId::ConditionOrMeas => "Condition/Meas",
            DomainId::SpecDiseaseStatus => "Spec Disease Status",
            DomainId::ConditionOrProcedure => "Condition/Procedure",
            DomainId::Provider => "Provider",
            DomainId::Drug => "Drug",
            DomainId::TypeConcept => "Type Concept",
            DomainId::Relationship => "Relationship",
            DomainId::Observation => "Observation",
            DomainId::Gender => "Gender",
            DomainId::PlaceOfService => "Place of Service",
            DomainId::Measurement => "Measurement",
            DomainId::ConditionOrDevice => "Condition/Device",
            DomainId::Currency => "Currency",
            DomainId::DeviceOrProcedure => "Device/Procedure",
            DomainId::Payer => "Payer",
            DomainId::MeasValue => "Meas Value",
            DomainId::RevenueCode => "Revenue Code",
            DomainId::DrugOrProcedure => "Drug/Procedure",
            DomainId::MeasValueOperator => "Meas Value Operator",
            DomainId::Regimen => "Regimen",
            DomainId::Cost => "Cost",
            DomainId::ConditionOrObs => "Condition/Obs",
            DomainId::Visit => "Visit",
            DomainId::Specimen => "Specimen",
            DomainId::Condition => "Condition",
        }
    }
}

impl std::fmt::Display for DomainId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn serde_uses_stored_tag_spelling() {
        let json = serde_json::to_string(&DomainId::PlaceOfService).unwrap();
        assert_eq!(json, "\"Place of Service\"");

        let parsed: DomainId = serde_json::from_str("\"Obs/Procedure\"").unwrap();
        assert_eq!(parsed, DomainId::ObsOrProcedure);
    }

    #[test]
    fn display_matches_serde_rename() {
        for domain in [DomainId::Gender, DomainId::Race, DomainId::Ethnicity] {
            let json = serde_json::to_value(domain).unwrap();
            assert_eq!(json, serde_json::Value::String(domain.to_string()));
        }
    }

    #[test]
    fn unknown_tag_is_rejected() {
        assert!(serde_json::from_str::<DomainId>("\"Galaxy\"").is_err());
    }
}
