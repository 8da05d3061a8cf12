//! # Entity Validator
//!
//! Pure predicates over decoded payloads. Nothing here touches a store or
//! performs I/O; structural decode failures are reported by the caller
//! before these functions run.

use crate::company::{CompanyChanges, CompanyDraft, CompanyPatch, CompanyType, NewCompany};
use crate::error::ValidationError;

/// Map a raw `Type` value onto the closed enumeration.
///
/// Matching is exact and case-sensitive. Empty and unknown values are both
/// rejected.
pub fn parse_company_type(raw: &str) -> Result<CompanyType, ValidationError> {
    match raw {
        "Corporations" => Ok(CompanyType::Corporations),
        "NonProfit" => Ok(CompanyType::NonProfit),
        "Cooperative" => Ok(CompanyType::Cooperative),
        "SoleProprietorship" => Ok(CompanyType::SoleProprietorship),
        other => Err(ValidationError::InvalidCompanyType {
            value: other.to_string(),
        }),
    }
}

/// Validate a create payload.
pub fn validate_draft(draft: CompanyDraft) -> Result<NewCompany, ValidationError> {
    let company_type = parse_company_type(&draft.company_type)?;
    Ok(NewCompany {
        name: draft.name,
        description: draft.description,
        employee_count: draft.employee_count,
        registered: draft.registered,
        company_type,
    })
}

/// Validate an update payload.
///
/// Only the incoming `Type` is checked, not the merged result; the merged
/// record is checked by the store when it is written.
pub fn validate_changes(changes: CompanyChanges) -> Result<CompanyPatch, ValidationError> {
    let company_type = parse_company_type(&changes.company_type)?;
    Ok(CompanyPatch {
        name: changes.name,
        description: changes.description,
        employee_count: changes.employee_count,
        registered: changes.registered,
        company_type: Some(company_type),
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn draft(company_type: &str) -> CompanyDraft {
        CompanyDraft {
            name: "ABC-1".to_string(),
            description: "d".to_string(),
            employee_count: 150,
            registered: true,
            company_type: company_type.to_string(),
        }
    }

    #[test]
    fn accepts_every_member_of_the_enumeration() {
        for t in CompanyType::ALL {
            let new = validate_draft(draft(t.as_str())).unwrap();
            assert_eq!(new.company_type, t);
        }
    }

    #[test]
    fn rejects_unknown_type() {
        let err = validate_draft(draft("Invalid Type")).unwrap_err();
        assert_eq!(err.to_string(), "invalid company type");
    }

    #[test]
    fn rejects_empty_type() {
        let err = validate_draft(draft("")).unwrap_err();
        assert_eq!(
            err,
            ValidationError::InvalidCompanyType {
                value: String::new()
            }
        );
    }

    #[test]
    fn type_match_is_case_sensitive() {
        assert!(parse_company_type("corporations").is_err());
        assert!(parse_company_type("Sole Proprietorship").is_err());
    }

    #[test]
    fn changes_require_a_valid_type() {
        let changes = CompanyChanges {
            name: Some("ABC-2".to_string()),
            ..Default::default()
        };
        assert!(validate_changes(changes).is_err());
    }

    #[test]
    fn changes_keep_absent_fields_absent() {
        let patch = validate_changes(CompanyChanges {
            name: Some("ABC-2".to_string()),
            company_type: "SoleProprietorship".to_string(),
            ..Default::default()
        })
        .unwrap();
        assert_eq!(patch.name.as_deref(), Some("ABC-2"));
        assert_eq!(patch.company_type, Some(CompanyType::SoleProprietorship));
        assert!(patch.description.is_none());
        assert!(patch.employee_count.is_none());
        assert!(patch.registered.is_none());
    }
}

#[cfg(test)]
mod proptests {
    use super::*;
    use proptest::prelude::*;

    proptest! {
        /// Anything outside the four names is rejected.
        #[test]
        fn arbitrary_strings_outside_the_set_are_rejected(raw in "\\PC{0,24}") {
            let known = CompanyType::ALL.iter().any(|t| t.as_str() == raw);
            prop_assert_eq!(parse_company_type(&raw).is_ok(), known);
        }

        /// Validation never alters the non-type fields.
        #[test]
        fn draft_fields_pass_through(name in "[A-Za-z0-9-]{0,20}", count in any::<i32>(), registered in any::<bool>()) {
            let new = validate_draft(CompanyDraft {
                name: name.clone(),
                description: String::new(),
                employee_count: count,
                registered,
                company_type: "Cooperative".to_string(),
            }).unwrap();
            prop_assert_eq!(new.name, name);
            prop_assert_eq!(new.employee_count, count);
            prop_assert_eq!(new.registered, registered);
        }
    }
}
