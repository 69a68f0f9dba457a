//! Active patient census
//!
//! Static snapshot of patients currently under care. The dataset is
//! immutable for the process lifetime and safe for unrestricted concurrent
//! reads; queries filter by risk level or hospitalization flag while
//! preserving declaration order.

use serde::Serialize;

use crate::error::OutreachError;

/// Patient risk stratification
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum RiskLevel {
    Low,
    Medium,
    High,
}

/// Street address of a census patient
#[derive(Debug, Clone, Copy, Serialize)]
pub struct Address {
    pub street: &'static str,
    pub city: &'static str,
    pub state: &'static str,
    pub zip: &'static str,
    pub neighborhood: &'static str,
}

/// One row of the active census
#[derive(Debug, Clone, Copy, Serialize)]
pub struct CensusRecord {
    pub patient_id: &'static str,
    pub name: &'static str,
    pub dob: &'static str,
    pub age: u32,
    pub address: Address,
    pub diagnoses: &'static [&'static str],
    pub caregiver_name: &'static str,
    pub visit_frequency: &'static str,
    pub last_ed_visit: Option<&'static str>,
    pub hospitalization_flag: bool,
    pub hospitalization_reason: Option<&'static str>,
    pub open_care_plan_gaps: &'static [&'static str],
    pub current_medications: &'static [&'static str],
    pub next_scheduled_visit: &'static str,
    pub risk_level: RiskLevel,
    pub risk_factors: &'static [&'static str],
}

/// Census query filter
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum CensusFilter {
    #[default]
    All,
    HighRisk,
    HospitalizationFlag,
}

impl CensusFilter {
    /// Parse a filter value; `None` means `all`. Matching is
    /// case-insensitive.
    pub fn parse(value: Option<&str>) -> Result<Self, OutreachError> {
        let normalized = value.unwrap_or("all").to_ascii_lowercase();
        match normalized.as_str() {
            "all" => Ok(CensusFilter::All),
            "high_risk" => Ok(CensusFilter::HighRisk),
            "hospitalization_flag" => Ok(CensusFilter::HospitalizationFlag),
            _ => Err(OutreachError::InvalidFilter { value: normalized }),
        }
    }
}

/// Query the census. Records come back in declaration order.
pub fn query(filter: CensusFilter) -> Vec<&'static CensusRecord> {
    PATIENT_CENSUS
        .iter()
        .filter(|record| match filter {
            CensusFilter::All => true,
            CensusFilter::HighRisk => record.risk_level == RiskLevel::High,
            CensusFilter::HospitalizationFlag => record.hospitalization_flag,
        })
        .collect()
}

/// The active home care census
pub const PATIENT_CENSUS: &[CensusRecord] = &[
    CensusRecord {
        patient_id: "WS-001",
        name: "Margaret Chen",
        dob: "1953-04-12",
        age: 72,
        address: Address {
            street: "2847 N Clark St",
            city: "Chicago",
            state: "IL",
            zip: "60657",
            neighborhood: "Lincoln Park",
        },
        diagnoses: &["Heart Failure (HFrEF)", "Chronic Kidney Disease Stage 3"],
        caregiver_name: "Rosa Martinez",
        visit_frequency: "3x/week",
        last_ed_visit: Some("2025-02-03"),
        hospitalization_flag: true,
        hospitalization_reason: Some("Acute decompensated heart failure"),
        open_care_plan_gaps: &[
            "Medication reconciliation overdue (14 days)",
            "Daily weight monitoring not documented last 5 days",
            "Fluid restriction education not completed",
        ],
        current_medications: &[
            "Furosemide 40mg PO daily",
            "Carvedilol 6.25mg PO BID",
            "Lisinopril 10mg PO daily",
            "Spironolactone 25mg PO daily",
        ],
        next_scheduled_visit: "2026-02-28",
        risk_level: RiskLevel::High,
        risk_factors: &[
            "Recent hospitalization",
            "HbA1c not tested in 6 months",
            "Diuretic compliance concern",
        ],
    },
    CensusRecord {
        patient_id: "WS-002",
        name: "Robert Hayes",
        dob: "1957-09-28",
        age: 68,
        address: Address {
            street: "1420 S Michigan Ave",
            city: "Chicago",
            state: "IL",
            zip: "60605",
            neighborhood: "South Loop",
        },
        diagnoses: &["Type 2 Diabetes Mellitus", "Essential Hypertension"],
        caregiver_name: "James Okafor",
        visit_frequency: "2x/week",
        last_ed_visit: Some("2025-01-19"),
        hospitalization_flag: true,
        hospitalization_reason: Some("Hypertensive urgency with blood glucose 480 mg/dL"),
        open_care_plan_gaps: &[
            "HbA1c recheck not scheduled",
            "Diabetic foot exam overdue (90 days)",
            "Home glucose log not reviewed in 3 weeks",
        ],
        current_medications: &[
            "Metformin 1000mg PO BID",
            "Insulin Glargine 30 units SC nightly",
            "Amlodipine 10mg PO daily",
            "Metoprolol 50mg PO BID",
        ],
        next_scheduled_visit: "2026-03-01",
        risk_level: RiskLevel::High,
        risk_factors: &[
            "Uncontrolled diabetes",
            "Recent ED visit for hyperglycemia",
            "Hypertension not at goal",
        ],
    },
    CensusRecord {
        patient_id: "WS-003",
        name: "Dorothy Williams",
        dob: "1946-11-05",
        age: 79,
        address: Address {
            street: "5312 N Sheridan Rd",
            city: "Chicago",
            state: "IL",
            zip: "60640",
            neighborhood: "Edgewater",
        },
        diagnoses: &[
            "Heart Failure (HFpEF)",
            "Chronic Obstructive Pulmonary Disease",
        ],
        caregiver_name: "Linda Kowalczyk",
        visit_frequency: "3x/week",
        last_ed_visit: Some("2025-02-10"),
        hospitalization_flag: true,
        hospitalization_reason: Some("COPD exacerbation with fluid overload"),
        open_care_plan_gaps: &[
            "Inhaler technique reassessment due",
            "Oxygen therapy compliance not documented",
            "Advance directive review pending",
        ],
        current_medications: &[
            "Tiotropium inhaler daily",
            "Albuterol PRN",
            "Budesonide/Formoterol inhaler BID",
            "Torsemide 20mg PO daily",
        ],
        next_scheduled_visit: "2026-02-28",
        risk_level: RiskLevel::High,
        risk_factors: &[
            "Dual cardiopulmonary diagnosis",
            "Frequent ED utilization",
            "Advanced age with functional decline",
        ],
    },
    CensusRecord {
        patient_id: "WS-004",
        name: "James Kowalski",
        dob: "1960-03-17",
        age: 65,
        address: Address {
            street: "3201 W Fullerton Ave",
            city: "Chicago",
            state: "IL",
            zip: "60647",
            neighborhood: "Logan Square",
        },
        diagnoses: &["Type 2 Diabetes Mellitus"],
        caregiver_name: "Angela Reyes",
        visit_frequency: "1x/week",
        last_ed_visit: None,
        hospitalization_flag: false,
        hospitalization_reason: None,
        open_care_plan_gaps: &[
            "Annual eye exam not scheduled",
            "Nephropathy screening (urine microalbumin) overdue",
        ],
        current_medications: &["Metformin 500mg PO BID", "Sitagliptin 100mg PO daily"],
        next_scheduled_visit: "2026-03-04",
        risk_level: RiskLevel::Medium,
        risk_factors: &["HbA1c trending up (7.8 → 8.4)", "HEDIS screening gaps"],
    },
    CensusRecord {
        patient_id: "WS-005",
        name: "Patricia Santos",
        dob: "1951-07-22",
        age: 74,
        address: Address {
            street: "4450 N Broadway",
            city: "Chicago",
            state: "IL",
            zip: "60640",
            neighborhood: "Uptown",
        },
        diagnoses: &["Essential Hypertension", "Chronic Kidney Disease Stage 2"],
        caregiver_name: "Maria Delgado",
        visit_frequency: "1x/week",
        last_ed_visit: None,
        hospitalization_flag: false,
        hospitalization_reason: None,
        open_care_plan_gaps: &[
            "CKD dietary counseling not completed",
            "Blood pressure trending above goal last 3 visits",
        ],
        current_medications: &[
            "Losartan 100mg PO daily",
            "Hydrochlorothiazide 25mg PO daily",
            "Atorvastatin 40mg PO nightly",
        ],
        next_scheduled_visit: "2026-03-05",
        risk_level: RiskLevel::Medium,
        risk_factors: &[
            "BP not at goal",
            "CKD progression risk",
            "Medication adherence concern",
        ],
    },
    CensusRecord {
        patient_id: "WS-006",
        name: "Harold Nguyen",
        dob: "1944-08-30",
        age: 81,
        address: Address {
            street: "6710 N Sheridan Rd",
            city: "Chicago",
            state: "IL",
            zip: "60626",
            neighborhood: "Rogers Park",
        },
        diagnoses: &["Heart Failure (HFpEF)"],
        caregiver_name: "Thomas Chen",
        visit_frequency: "2x/week",
        last_ed_visit: Some("2025-10-15"),
        hospitalization_flag: false,
        hospitalization_reason: None,
        open_care_plan_gaps: &["Fall risk reassessment due"],
        current_medications: &["Furosemide 20mg PO daily", "Ramipril 5mg PO daily"],
        next_scheduled_visit: "2026-03-02",
        risk_level: RiskLevel::Low,
        risk_factors: &["Advanced age", "Fall risk"],
    },
];

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_all_returns_every_record_in_order() {
        let records = query(CensusFilter::All);
        assert_eq!(records.len(), 6);
        let ids: Vec<&str> = records.iter().map(|r| r.patient_id).collect();
        assert_eq!(
            ids,
            vec!["WS-001", "WS-002", "WS-003", "WS-004", "WS-005", "WS-006"]
        );
    }

    #[test]
    fn test_high_risk_subset() {
        let records = query(CensusFilter::HighRisk);
        let ids: Vec<&str> = records.iter().map(|r| r.patient_id).collect();
        assert_eq!(ids, vec!["WS-001", "WS-002", "WS-003"]);
        assert!(records.iter().all(|r| r.risk_level == RiskLevel::High));
    }

    #[test]
    fn test_hospitalization_flag_subset() {
        let records = query(CensusFilter::HospitalizationFlag);
        assert_eq!(records.len(), 3);
        assert!(records.iter().all(|r| r.hospitalization_flag));
    }

    #[test]
    fn test_filter_parse_defaults_to_all() {
        assert_eq!(CensusFilter::parse(None).unwrap(), CensusFilter::All);
        assert_eq!(CensusFilter::parse(Some("ALL")).unwrap(), CensusFilter::All);
        assert_eq!(
            CensusFilter::parse(Some("High_Risk")).unwrap(),
            CensusFilter::HighRisk
        );
    }

    #[test]
    fn test_invalid_filter_names_accepted_values() {
        let err = CensusFilter::parse(Some("bogus")).unwrap_err();
        let message = err.to_string();
        assert!(message.contains("all"));
        assert!(message.contains("high_risk"));
        assert!(message.contains("hospitalization_flag"));
    }

    #[test]
    fn test_record_serializes_with_snake_case_keys() {
        let value = serde_json::to_value(PATIENT_CENSUS[0]).unwrap();
        assert_eq!(value["patient_id"], "WS-001");
        assert_eq!(value["risk_level"], "HIGH");
        assert_eq!(value["address"]["neighborhood"], "Lincoln Park");
        assert_eq!(value["last_ed_visit"], "2025-02-03");
        assert!(value["hospitalization_flag"].as_bool().unwrap());
    }

    #[test]
    fn test_nullable_fields_serialize_as_null() {
        let value = serde_json::to_value(PATIENT_CENSUS[3]).unwrap();
        assert!(value["last_ed_visit"].is_null());
        assert!(value["hospitalization_reason"].is_null());
    }
}
