// File: src/customer.rs
// Purpose: Customer registration submission and its server-side re-validation
//
// Coarser than the browser rules and independent of them.

use garde::Validate;
use serde::Deserialize;

use crate::error::ServerValidationError;

/// Department names, index 0 = department 1
pub const DEPARTMENTS: [&str; 22] = [
    "Guatemala",
    "El Progreso",
    "Sacatepéquez",
    "Chimaltenango",
    "Escuintla",
    "Santa Rosa",
    "Sololá",
    "Totonicapán",
    "Quetzaltenango",
    "Suchitepéquez",
    "Retalhuleu",
    "San Marcos",
    "Huehuetenango",
    "Quiché",
    "Baja Verapaz",
    "Alta Verapaz",
    "Petén",
    "Izabal",
    "Zacapa",
    "Chiquimula",
    "Jalapa",
    "Jutiapa",
];

/// Display name for a department select value ("1".."22")
pub fn department_name(value: &str) -> Option<&'static str> {
    value
        .parse::<usize>()
        .ok()?
        .checked_sub(1)
        .and_then(|index| DEPARTMENTS.get(index))
        .copied()
}

/// Values posted by the customer registration form
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize, Validate)]
#[serde(default)]
pub struct CustomerSubmission {
    #[garde(length(min = 1))]
    pub first_name: String,

    #[garde(length(min = 1))]
    pub last_name: String,

    #[garde(length(chars, equal = 13))]
    pub national_id: String,

    #[garde(length(min = 1), contains("@"))]
    pub email: String,

    #[garde(length(chars, equal = 8))]
    pub phone: String,

    #[garde(length(min = 1))]
    pub department: String,

    #[garde(length(min = 1))]
    pub address: String,
}

impl CustomerSubmission {
    /// Copy with values trimmed
    ///
    /// The DPI is kept as typed so its fixed length is checked on the raw value.
    pub fn trimmed(&self) -> Self {
        Self {
            first_name: self.first_name.trim().to_string(),
            last_name: self.last_name.trim().to_string(),
            national_id: self.national_id.clone(),
            email: self.email.trim().to_string(),
            phone: self.phone.trim().to_string(),
            department: self.department.trim().to_string(),
            address: self.address.trim().to_string(),
        }
    }

    /// Current value of a form field by its `name`
    pub fn value(&self, name: &str) -> &str {
        match name {
            "first_name" => &self.first_name,
            "last_name" => &self.last_name,
            "national_id" => &self.national_id,
            "email" => &self.email,
            "phone" => &self.phone,
            "department" => &self.department,
            "address" => &self.address,
            _ => "",
        }
    }

    /// Re-validate the submission
    pub fn verify(&self) -> Result<AcceptedCustomer, ServerValidationError> {
        let submission = self.trimmed();
        submission.validate()?;

        let department = department_name(&submission.department)
            .ok_or_else(|| ServerValidationError::UnknownDepartment(submission.department.clone()))?;

        Ok(AcceptedCustomer {
            submission,
            department,
        })
    }
}

/// A submission that passed the server-side check
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AcceptedCustomer {
    pub submission: CustomerSubmission,
    pub department: &'static str,
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use rstest::rstest;

    fn valid() -> CustomerSubmission {
        CustomerSubmission {
            first_name: "Ana".to_string(),
            last_name: "Pérez".to_string(),
            national_id: "1234567890101".to_string(),
            email: "ana@example.com".to_string(),
            phone: "55512345".to_string(),
            department: "9".to_string(),
            address: "4a calle 5-10, zona 3".to_string(),
        }
    }

    #[test]
    fn test_valid_submission_is_accepted() {
        let accepted = valid().verify().unwrap();
        assert_eq!(accepted.department, "Quetzaltenango");
        assert_eq!(accepted.submission, valid());
    }

    #[test]
    fn test_values_are_trimmed() {
        let mut submission = valid();
        submission.first_name = "  Ana ".to_string();
        submission.phone = " 55512345 ".to_string();
        let accepted = submission.verify().unwrap();
        assert_eq!(accepted.submission.first_name, "Ana");
        assert_eq!(accepted.submission.phone, "55512345");
    }

    #[rstest]
    #[case::blank_name(|s: &mut CustomerSubmission| s.first_name = "   ".to_string(), "first_name")]
    #[case::no_surname(|s: &mut CustomerSubmission| s.last_name.clear(), "last_name")]
    #[case::short_id(|s: &mut CustomerSubmission| s.national_id = "123456789010".to_string(), "national_id")]
    #[case::padded_id(|s: &mut CustomerSubmission| s.national_id = " 1234567890101".to_string(), "national_id")]
    #[case::email_without_at(|s: &mut CustomerSubmission| s.email = "ana.example.com".to_string(), "email")]
    #[case::long_phone(|s: &mut CustomerSubmission| s.phone = "555123456".to_string(), "phone")]
    #[case::no_department(|s: &mut CustomerSubmission| s.department.clear(), "department")]
    #[case::unknown_department(|s: &mut CustomerSubmission| s.department = "23".to_string(), "department")]
    #[case::placeholder_department(|s: &mut CustomerSubmission| s.department = "0".to_string(), "department")]
    #[case::no_address(|s: &mut CustomerSubmission| s.address = "\t".to_string(), "address")]
    fn test_rejections(#[case] spoil: fn(&mut CustomerSubmission), #[case] field: &str) {
        let mut submission = valid();
        spoil(&mut submission);
        let err = submission.verify().unwrap_err();
        assert!(
            err.fields().iter().any(|f| f == field),
            "expected {} in {:?}",
            field,
            err.fields()
        );
    }

    #[test]
    fn test_department_names() {
        assert_eq!(department_name("1"), Some("Guatemala"));
        assert_eq!(department_name("22"), Some("Jutiapa"));
        assert_eq!(department_name("0"), None);
        assert_eq!(department_name("x"), None);
    }
}
