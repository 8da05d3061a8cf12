//! # Store Constraints
//!
//! Column-level rules a store enforces at write time. Postgres enforces
//! them through the schema; [`check`] applies the same rules for stores
//! without one. Uniqueness of `name` needs the full record set and is left
//! to the store.

use thiserror::Error;

use crate::company::Company;

/// Maximum length of `name`, in characters.
pub const NAME_MAX_LEN: usize = 15;

/// Maximum length of `description`, in characters.
pub const DESCRIPTION_MAX_LEN: usize = 3000;

/// A record that would violate a column constraint.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ConstraintViolation {
    /// `name` is empty.
    #[error("name must not be empty")]
    EmptyName,

    /// `name` exceeds [`NAME_MAX_LEN`].
    #[error("name is {len} characters, maximum is {NAME_MAX_LEN}")]
    NameTooLong {
        /// Actual length in characters.
        len: usize,
    },

    /// `description` exceeds [`DESCRIPTION_MAX_LEN`].
    #[error("description is {len} characters, maximum is {DESCRIPTION_MAX_LEN}")]
    DescriptionTooLong {
        /// Actual length in characters.
        len: usize,
    },

    /// `employee_count` is negative.
    #[error("employee count {0} is negative")]
    NegativeEmployeeCount(i32),

    /// Another record already uses this name.
    #[error("name {0:?} is already taken")]
    DuplicateName(String),
}

/// Check the column rules of a record about to be written.
pub fn check(company: &Company) -> Result<(), ConstraintViolation> {
    if company.name.is_empty() {
        return Err(ConstraintViolation::EmptyName);
    }
    let name_len = company.name.chars().count();
    if name_len > NAME_MAX_LEN {
        return Err(ConstraintViolation::NameTooLong { len: name_len });
    }
    let description_len = company.description.chars().count();
    if description_len > DESCRIPTION_MAX_LEN {
        return Err(ConstraintViolation::DescriptionTooLong {
            len: description_len,
        });
    }
    if company.employee_count < 0 {
        return Err(ConstraintViolation::NegativeEmployeeCount(
            company.employee_count,
        ));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::company::{CompanyId, CompanyType};

    fn with_name(name: &str) -> Company {
        Company {
            id: CompanyId::new(),
            name: name.to_string(),
            description: String::new(),
            employee_count: 1,
            registered: false,
            company_type: CompanyType::NonProfit,
        }
    }

    #[test]
    fn accepts_name_at_limit() {
        assert!(check(&with_name("ABCDEFGHIJKLMNO")).is_ok());
    }

    #[test]
    fn rejects_name_over_limit() {
        assert_eq!(
            check(&with_name("ABCDEFGHIJKLMNOP")),
            Err(ConstraintViolation::NameTooLong { len: 16 })
        );
    }

    #[test]
    fn length_counts_characters_not_bytes() {
        assert!(check(&with_name("ÄÖÜÄÖÜÄÖÜÄÖÜÄÖÜ")).is_ok());
    }

    #[test]
    fn rejects_empty_name() {
        assert_eq!(check(&with_name("")), Err(ConstraintViolation::EmptyName));
    }

    #[test]
    fn rejects_negative_employee_count() {
        let mut company = with_name("x");
        company.employee_count = -1;
        assert_eq!(
            check(&company),
            Err(ConstraintViolation::NegativeEmployeeCount(-1))
        );
    }

    #[test]
    fn rejects_long_description() {
        let mut company = with_name("x");
        company.description = "a".repeat(DESCRIPTION_MAX_LEN + 1);
        assert!(matches!(
            check(&company),
            Err(ConstraintViolation::DescriptionTooLong { .. })
        ));
    }
}
