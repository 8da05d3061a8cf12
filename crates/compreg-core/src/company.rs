//! # Company Record
//!
//! The persisted [`Company`] entity plus the payload types that flow into
//! it. Wire names are PascalCase (`Name`, `EmployeeCount`, `Type`, `ID`);
//! camelCase and snake_case aliases are accepted on input.
//!
//! ## Lifecycle
//!
//! ```text
//! CompanyDraft ──validate_draft──▶ NewCompany ──store.insert──▶ Company
//! CompanyChanges ─validate_changes─▶ CompanyPatch ──Company::apply──▶ Company
//! ```

use serde::{Deserialize, Deserializer, Serialize};
use utoipa::ToSchema;
use uuid::Uuid;

use crate::error::ValidationError;

// ---------------------------------------------------------------------------
// Identifier
// ---------------------------------------------------------------------------

/// Store-assigned identifier of a persisted company. Immutable once issued.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct CompanyId(Uuid);

impl CompanyId {
    /// Create a new random identifier. Only stores call this.
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }

    /// Wrap an existing UUID.
    pub fn from_uuid(id: Uuid) -> Self {
        Self(id)
    }

    /// Parse a path segment. The parser's own message is kept in the error.
    pub fn parse(raw: &str) -> Result<Self, ValidationError> {
        Uuid::parse_str(raw)
            .map(Self)
            .map_err(|e| ValidationError::MalformedId(e.to_string()))
    }

    /// Access the underlying UUID.
    pub fn as_uuid(&self) -> &Uuid {
        &self.0
    }
}

impl Default for CompanyId {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Display for CompanyId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

// ---------------------------------------------------------------------------
// Company type
// ---------------------------------------------------------------------------

/// The closed set of company types.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, ToSchema)]
pub enum CompanyType {
    /// A for-profit corporation.
    Corporations,
    /// A non-profit organization.
    NonProfit,
    /// A member-owned cooperative.
    Cooperative,
    /// A business owned by a single person.
    SoleProprietorship,
}

impl CompanyType {
    /// Every variant, in declaration order.
    pub const ALL: [CompanyType; 4] = [
        Self::Corporations,
        Self::NonProfit,
        Self::Cooperative,
        Self::SoleProprietorship,
    ];

    /// Wire and column representation.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Corporations => "Corporations",
            Self::NonProfit => "NonProfit",
            Self::Cooperative => "Cooperative",
            Self::SoleProprietorship => "SoleProprietorship",
        }
    }
}

impl std::fmt::Display for CompanyType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl std::str::FromStr for CompanyType {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        crate::validate::parse_company_type(s)
    }
}

// ---------------------------------------------------------------------------
// Persisted record
// ---------------------------------------------------------------------------

/// A persisted company. Every field was validated at the last successful write.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "PascalCase")]
pub struct Company {
    /// Store-assigned identifier.
    #[serde(rename = "ID", alias = "id")]
    #[schema(value_type = String)]
    pub id: CompanyId,
    /// Unique, non-empty, at most 15 characters.
    #[serde(alias = "name")]
    pub name: String,
    /// Free text, at most 3000 characters.
    #[serde(alias = "description")]
    pub description: String,
    /// Non-negative head count.
    #[serde(alias = "employeeCount", alias = "employee_count")]
    pub employee_count: i32,
    /// Whether the company is registered.
    #[serde(alias = "registered")]
    pub registered: bool,
    /// Member of the closed [`CompanyType`] set.
    #[serde(rename = "Type", alias = "type")]
    pub company_type: CompanyType,
}

impl Company {
    /// Attach a store-assigned id to a validated payload.
    pub fn from_new(id: CompanyId, new: NewCompany) -> Self {
        Self {
            id,
            name: new.name,
            description: new.description,
            employee_count: new.employee_count,
            registered: new.registered,
            company_type: new.company_type,
        }
    }

    /// Merge a patch into this record. Present fields overwrite, absent
    /// fields keep their stored value. The id never changes.
    pub fn apply(&mut self, patch: &CompanyPatch) {
        if let Some(name) = &patch.name {
            self.name = name.clone();
        }
        if let Some(description) = &patch.description {
            self.description = description.clone();
        }
        if let Some(count) = patch.employee_count {
            self.employee_count = count;
        }
        if let Some(registered) = patch.registered {
            self.registered = registered;
        }
        if let Some(company_type) = patch.company_type {
            self.company_type = company_type;
        }
    }
}

// ---------------------------------------------------------------------------
// Inbound payloads (decoded, not yet validated)
// ---------------------------------------------------------------------------

/// Create payload as decoded from the request body.
///
/// `Type` stays a raw string here so that an unknown value is reported as
/// an invalid company type rather than as a decode failure. Any `ID` sent
/// by the client is ignored.
#[derive(Debug, Clone, Deserialize, ToSchema)]
#[serde(rename_all = "PascalCase")]
pub struct CompanyDraft {
    /// Company name.
    #[serde(alias = "name")]
    pub name: String,
    /// Optional description, empty when absent or `null`.
    #[serde(default, alias = "description", deserialize_with = "null_as_empty")]
    pub description: String,
    /// Head count.
    #[serde(alias = "employeeCount", alias = "employee_count")]
    pub employee_count: i32,
    /// Registration flag.
    #[serde(alias = "registered")]
    pub registered: bool,
    /// Raw company type. `null` decodes as empty and fails validation.
    #[serde(rename = "Type", alias = "type", default, deserialize_with = "null_as_empty")]
    pub company_type: String,
}

/// Decode a string field, treating JSON `null` like an absent key.
fn null_as_empty<'de, D: Deserializer<'de>>(deserializer: D) -> Result<String, D::Error> {
    Ok(Option::<String>::deserialize(deserializer)?.unwrap_or_default())
}

/// Update payload as decoded from the request body. Absent fields are `None`.
#[derive(Debug, Clone, Default, Deserialize, ToSchema)]
#[serde(rename_all = "PascalCase")]
pub struct CompanyChanges {
    /// Replacement name.
    #[serde(default, alias = "name")]
    pub name: Option<String>,
    /// Replacement description.
    #[serde(default, alias = "description")]
    pub description: Option<String>,
    /// Replacement head count.
    #[serde(default, alias = "employeeCount", alias = "employee_count")]
    pub employee_count: Option<i32>,
    /// Replacement registration flag.
    #[serde(default, alias = "registered")]
    pub registered: Option<bool>,
    /// Raw company type. Required: an absent or `null` value is rejected like an empty one.
    #[serde(rename = "Type", alias = "type", default, deserialize_with = "null_as_empty")]
    pub company_type: String,
}

// ---------------------------------------------------------------------------
// Validated payloads
// ---------------------------------------------------------------------------

/// A validated create payload, ready for the store to assign an id.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewCompany {
    /// Company name.
    pub name: String,
    /// Description.
    pub description: String,
    /// Head count.
    pub employee_count: i32,
    /// Registration flag.
    pub registered: bool,
    /// Validated type.
    pub company_type: CompanyType,
}

/// A validated partial update.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CompanyPatch {
    /// Replacement name.
    pub name: Option<String>,
    /// Replacement description.
    pub description: Option<String>,
    /// Replacement head count.
    pub employee_count: Option<i32>,
    /// Replacement registration flag.
    pub registered: Option<bool>,
    /// Replacement type.
    pub company_type: Option<CompanyType>,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> Company {
        Company {
            id: CompanyId::new(),
            name: "ABC-1".to_string(),
            description: "d".to_string(),
            employee_count: 150,
            registered: true,
            company_type: CompanyType::Corporations,
        }
    }

    #[test]
    fn company_serializes_with_pascal_case_names() {
        let company = sample();
        let json = serde_json::to_value(&company).unwrap();
        assert_eq!(json["ID"], company.id.to_string());
        assert_eq!(json["Name"], "ABC-1");
        assert_eq!(json["EmployeeCount"], 150);
        assert_eq!(json["Registered"], true);
        assert_eq!(json["Type"], "Corporations");
    }

    #[test]
    fn company_accepts_camel_case_aliases() {
        let id = CompanyId::new();
        let json = serde_json::json!({
            "id": id.to_string(),
            "name": "n",
            "description": "",
            "employeeCount": 3,
            "registered": false,
            "type": "NonProfit"
        });
        let company: Company = serde_json::from_value(json).unwrap();
        assert_eq!(company.id, id);
        assert_eq!(company.company_type, CompanyType::NonProfit);
    }

    #[test]
    fn draft_ignores_client_supplied_id() {
        let draft: CompanyDraft = serde_json::from_str(
            r#"{"ID":"fe105b10-2139-46f5-a08b-a0b69594a595","Name":"x","EmployeeCount":1,"Registered":true,"Type":"Cooperative"}"#,
        )
        .unwrap();
        assert_eq!(draft.name, "x");
        assert_eq!(draft.description, "");
    }

    #[test]
    fn draft_null_description_and_type_decode_as_empty() {
        let draft: CompanyDraft = serde_json::from_str(
            r#"{"Name":"x","Description":null,"EmployeeCount":1,"Registered":true,"Type":null}"#,
        )
        .unwrap();
        assert_eq!(draft.description, "");
        assert_eq!(draft.company_type, "");
    }

    #[test]
    fn changes_null_type_decodes_as_empty() {
        let changes: CompanyChanges =
            serde_json::from_str(r#"{"Name":"x","Type":null}"#).unwrap();
        assert_eq!(changes.company_type, "");
    }

    #[test]
    fn draft_missing_required_field_fails_to_decode() {
        let result: Result<CompanyDraft, _> =
            serde_json::from_str(r#"{"Name":"x","Registered":true,"Type":"Cooperative"}"#);
        let err = result.unwrap_err().to_string();
        assert!(err.contains("EmployeeCount"), "got: {err}");
    }

    #[test]
    fn draft_wrong_field_type_fails_to_decode() {
        let result: Result<CompanyDraft, _> = serde_json::from_str(
            r#"{"Name":"x","EmployeeCount":"many","Registered":true,"Type":"Cooperative"}"#,
        );
        assert!(result.is_err());
    }

    #[test]
    fn changes_default_to_absent() {
        let changes: CompanyChanges = serde_json::from_str(r#"{"Type":"NonProfit"}"#).unwrap();
        assert!(changes.name.is_none());
        assert!(changes.employee_count.is_none());
        assert!(changes.registered.is_none());
        assert_eq!(changes.company_type, "NonProfit");
    }

    #[test]
    fn apply_overwrites_only_present_fields() {
        let mut company = sample();
        let before = company.clone();
        company.apply(&CompanyPatch {
            name: Some("ABC-2".to_string()),
            company_type: Some(CompanyType::SoleProprietorship),
            ..Default::default()
        });
        assert_eq!(company.id, before.id);
        assert_eq!(company.name, "ABC-2");
        assert_eq!(company.company_type, CompanyType::SoleProprietorship);
        assert_eq!(company.description, before.description);
        assert_eq!(company.employee_count, before.employee_count);
        assert_eq!(company.registered, before.registered);
    }

    #[test]
    fn apply_writes_false_and_zero() {
        let mut company = sample();
        company.apply(&CompanyPatch {
            employee_count: Some(0),
            registered: Some(false),
            ..Default::default()
        });
        assert_eq!(company.employee_count, 0);
        assert!(!company.registered);
    }

    #[test]
    fn company_id_parse_rejects_truncated_uuid() {
        let err = CompanyId::parse("fe105b10-2139-46f5-a08b").unwrap_err();
        assert!(matches!(err, ValidationError::MalformedId(_)));
        assert!(err.to_string().starts_with("malformed id"));
    }

    #[test]
    fn company_id_parse_accepts_uuid() {
        let id = CompanyId::parse("fe105b10-2139-46f5-a08b-a0b69594a595").unwrap();
        assert_eq!(id.to_string(), "fe105b10-2139-46f5-a08b-a0b69594a595");
    }

    #[test]
    fn company_type_as_str_round_trips_through_from_str() {
        for t in CompanyType::ALL {
            assert_eq!(t.as_str().parse::<CompanyType>().unwrap(), t);
        }
    }
}
