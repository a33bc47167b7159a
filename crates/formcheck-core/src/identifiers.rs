//! National identifier checksum validators
//!
//! Two Guatemalan identifier formats:
//! - the 13-digit personal ID (DPI/CUI): 8 serial digits, a modulo-11 check
//!   digit, then a two-digit department and two-digit municipality code
//! - the tax ID (NIT): a digit body followed by a modulo-11 check character,
//!   `K` standing for 10

use crate::error::IdentifierError;

/// Number of municipalities in each department, index 0 = department 1
pub const MUNICIPALITIES_PER_DEPARTMENT: [u8; 22] = [
    17, 8, 16, 16, 13, 14, 19, 8, 24, 21, 9, 30, 32, 21, 8, 17, 14, 5, 11, 11, 7, 17,
];

const NATIONAL_ID_LEN: usize = 13;
const SERIAL_LEN: usize = 8;

/// A parsed, checksum-verified national ID
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct NationalId {
    serial: [u8; SERIAL_LEN],
    check_digit: u8,
    department: u8,
    municipality: u8,
}

impl NationalId {
    /// Parse and verify a national ID
    ///
    /// Whitespace anywhere in the input is ignored.
    ///
    /// # Examples
    /// ```
    /// use formcheck_core::{IdentifierError, NationalId};
    ///
    /// let id = NationalId::parse("1234 56789 0101").unwrap();
    /// assert_eq!(id.department(), 1);
    /// assert_eq!(NationalId::parse("12345"), Err(IdentifierError::Format));
    /// ```
    pub fn parse(input: &str) -> Result<Self, IdentifierError> {
        let compact: String = input.chars().filter(|c| !c.is_whitespace()).collect();
        if compact.len() != NATIONAL_ID_LEN || !compact.bytes().all(|b| b.is_ascii_digit()) {
            return Err(IdentifierError::Format);
        }

        let digits: Vec<u8> = compact.bytes().map(|b| b - b'0').collect();
        let mut serial = [0u8; SERIAL_LEN];
        serial.copy_from_slice(&digits[..SERIAL_LEN]);
        let check_digit = digits[8];
        let department = digits[9] * 10 + digits[10];
        let municipality = digits[11] * 10 + digits[12];

        let max_municipality = usize::from(department)
            .checked_sub(1)
            .and_then(|index| MUNICIPALITIES_PER_DEPARTMENT.get(index));
        match max_municipality {
            Some(&max) if (1..=max).contains(&municipality) => {}
            _ => {
                return Err(IdentifierError::Range {
                    department,
                    municipality,
                })
            }
        }

        let sum: u32 = serial
            .iter()
            .enumerate()
            .map(|(i, &digit)| u32::from(digit) * (i as u32 + 2))
            .sum();
        if sum % 11 != u32::from(check_digit) {
            return Err(IdentifierError::Checksum);
        }

        Ok(Self {
            serial,
            check_digit,
            department,
            municipality,
        })
    }

    /// The eight serial digits
    pub fn serial(&self) -> String {
        self.serial.iter().map(|d| char::from(b'0' + d)).collect()
    }

    pub fn check_digit(&self) -> u8 {
        self.check_digit
    }

    pub fn department(&self) -> u8 {
        self.department
    }

    pub fn municipality(&self) -> u8 {
        self.municipality
    }
}

/// Validate a national ID without keeping the parsed parts
pub fn validate_national_id(input: &str) -> Result<(), IdentifierError> {
    NationalId::parse(input).map(|_| ())
}

/// Expected check character for a tax ID digit body
///
/// Returns `None` when `body` is empty or contains anything but ASCII digits.
///
/// # Examples
/// ```
/// use formcheck_core::tax_id_check_character;
///
/// assert_eq!(tax_id_check_character("12345"), Some('5'));
/// assert_eq!(tax_id_check_character("6"), Some('K'));
/// assert_eq!(tax_id_check_character("12a"), None);
/// ```
pub fn tax_id_check_character(body: &str) -> Option<char> {
    if body.is_empty() || !body.bytes().all(|b| b.is_ascii_digit()) {
        return None;
    }

    // sum kept mod 11, body length is unbounded
    let len = body.len();
    let sum = body.bytes().enumerate().fold(0usize, |acc, (i, b)| {
        let weight = (len + 1 - i) % 11;
        (acc + usize::from(b - b'0') * weight) % 11
    });

    match (11 - sum) % 11 {
        10 => Some('K'),
        digit => char::from_digit(digit as u32, 10),
    }
}

/// Validate a tax ID
///
/// Whitespace and hyphens are ignored and the check character is
/// case-insensitive. An empty value is accepted: whether the field is
/// mandatory is decided by a separate rule.
pub fn validate_tax_id(input: &str) -> Result<(), IdentifierError> {
    let compact = input
        .chars()
        .filter(|c| !c.is_whitespace() && *c != '-')
        .collect::<String>()
        .to_uppercase();
    if compact.is_empty() {
        return Ok(());
    }

    let mut chars = compact.chars();
    let check = chars.next_back().ok_or(IdentifierError::Format)?;
    let body = chars.as_str();
    if !(check.is_ascii_digit() || check == 'K') {
        return Err(IdentifierError::Format);
    }

    let expected = tax_id_check_character(body).ok_or(IdentifierError::Format)?;
    if check == expected {
        Ok(())
    } else {
        Err(IdentifierError::Checksum)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[test]
    fn test_parse_exposes_parts() {
        let id = NationalId::parse("1234567890101").unwrap();
        assert_eq!(id.serial(), "12345678");
        assert_eq!(id.check_digit(), 9);
        assert_eq!(id.department(), 1);
        assert_eq!(id.municipality(), 1);
    }

    #[test]
    fn test_worked_example_fails_checksum() {
        // 2*2 + 5*3 + 3*4 + 9*5 + 7*6 + 5*7 + 1*8 + 3*9 = 188, 188 % 11 = 1
        assert_eq!(
            validate_national_id("2539751300101"),
            Err(IdentifierError::Checksum)
        );
    }

    #[rstest]
    #[case("1234567890101")]
    #[case("0000000190101")]
    #[case(" 1234 5678 9 01 01 ")]
    // department 22 has 17 municipalities
    #[case("1234567892217")]
    fn test_valid_national_ids(#[case] input: &str) {
        assert_eq!(validate_national_id(input), Ok(()));
    }

    #[rstest]
    #[case("", IdentifierError::Format)]
    #[case("123456789010", IdentifierError::Format)]
    #[case("12345678901011", IdentifierError::Format)]
    #[case("12345678901O1", IdentifierError::Format)]
    #[case("1234567890001", IdentifierError::Range { department: 0, municipality: 1 })]
    #[case("1234567892301", IdentifierError::Range { department: 23, municipality: 1 })]
    #[case("1234567890100", IdentifierError::Range { department: 1, municipality: 0 })]
    #[case("1234567890118", IdentifierError::Range { department: 1, municipality: 18 })]
    #[case("1234567880101", IdentifierError::Checksum)]
    fn test_invalid_national_ids(#[case] input: &str, #[case] expected: IdentifierError) {
        assert_eq!(validate_national_id(input), Err(expected));
    }

    #[test]
    fn test_range_is_checked_before_checksum() {
        // bad checksum and bad department: the range error wins
        assert!(matches!(
            validate_national_id("1234567882501"),
            Err(IdentifierError::Range { .. })
        ));
    }

    #[rstest]
    #[case("123455")]
    #[case("12345-5")]
    #[case(" 1234 5-5 ")]
    #[case("6K")]
    #[case("6k")]
    #[case("6-k")]
    #[case("000")]
    #[case("")]
    #[case(" - ")]
    fn test_valid_tax_ids(#[case] input: &str) {
        assert_eq!(validate_tax_id(input), Ok(()));
    }

    #[rstest]
    #[case("12345K", IdentifierError::Checksum)]
    #[case("123456", IdentifierError::Checksum)]
    #[case("5", IdentifierError::Format)]
    #[case("K", IdentifierError::Format)]
    #[case("12K5", IdentifierError::Format)]
    #[case("1234X", IdentifierError::Format)]
    #[case("ab12", IdentifierError::Format)]
    fn test_invalid_tax_ids(#[case] input: &str, #[case] expected: IdentifierError) {
        assert_eq!(validate_tax_id(input), Err(expected));
    }

    #[test]
    fn test_tax_id_check_character_worked_example() {
        // weights 6,5,4,3,2: 6 + 10 + 12 + 12 + 10 = 50, (11 - 50 % 11) % 11 = 5
        assert_eq!(tax_id_check_character("12345"), Some('5'));
        assert_eq!(tax_id_check_character(""), None);
    }

    #[test]
    fn test_long_tax_id_body_is_exact() {
        let body = "9".repeat(40_000);
        let len = body.len() as u64;
        // weights run from len + 1 down to 2
        let sum: u64 = (2..=len + 1).map(|w| 9 * w).sum();
        let expected = match (11 - sum % 11) % 11 {
            10 => 'K',
            d => char::from_digit(d as u32, 10).unwrap(),
        };

        assert_eq!(tax_id_check_character(&body), Some(expected));
        assert_eq!(validate_tax_id(&format!("{}{}", body, expected)), Ok(()));

        let wrong = if expected == '0' { '1' } else { '0' };
        assert_eq!(
            validate_tax_id(&format!("{}{}", body, wrong)),
            Err(IdentifierError::Checksum)
        );
    }
}
