// File: src/rules.rs
// Purpose: Field rule library (validate-and-normalize predicates)

use chrono::{DateTime, Local, NaiveDate, NaiveDateTime};
use once_cell::sync::Lazy;
use regex::Regex;
use serde::{Deserialize, Serialize};

use crate::error::IdentifierError;
use crate::identifiers::{validate_national_id, validate_tax_id};
use crate::verdict::Verdict;

static DIGITS_REGEX: Lazy<Regex> = Lazy::new(|| Regex::new(r"^[0-9]*$").unwrap());
static NON_DIGIT_REGEX: Lazy<Regex> = Lazy::new(|| Regex::new(r"[^0-9]").unwrap());

static LETTERS_REGEX: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^[a-zA-ZáéíóúÁÉÍÓÚñÑ\s]*$").unwrap());
static NON_LETTER_REGEX: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"[^a-zA-ZáéíóúÁÉÍÓÚñÑ\s]").unwrap());

static ALPHANUMERIC_REGEX: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^[a-zA-Z0-9áéíóúÁÉÍÓÚñÑ\s]*$").unwrap());
static NON_ALPHANUMERIC_REGEX: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"[^a-zA-Z0-9áéíóúÁÉÍÓÚñÑ\s]").unwrap());

static EMAIL_REGEX: Lazy<Regex> = Lazy::new(|| Regex::new(r"^[^\s@]+@[^\s@]+\.[^\s@]+$").unwrap());

static GROUPED_DECIMAL_REGEX: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^[0-9]{1,3}(,[0-9]{3})*(\.[0-9]{1,2})?$").unwrap());
static PLAIN_DECIMAL_REGEX: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^[0-9]+(\.[0-9]{1,2})?$").unwrap());

/// Selection value meaning "nothing chosen yet"
const UNSELECTED: &str = "0";

/// Inputs to rule evaluation that don't come from the field itself
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RuleContext {
    today: NaiveDate,
}

impl RuleContext {
    /// Context pinned to a given day
    pub fn new(today: NaiveDate) -> Self {
        Self { today }
    }

    /// Context for the current local day
    pub fn today_local() -> Self {
        Self::new(Local::now().date_naive())
    }

    pub fn today(&self) -> NaiveDate {
        self.today
    }
}

impl Default for RuleContext {
    fn default() -> Self {
        Self::today_local()
    }
}

/// What a rule decided, plus the value it wants written back to the field
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RuleOutcome {
    pub verdict: Verdict,
    pub normalized: Option<String>,
}

impl RuleOutcome {
    fn of(verdict: Verdict) -> Self {
        Self {
            verdict,
            normalized: None,
        }
    }

    fn normalized(verdict: Verdict, value: String) -> Self {
        Self {
            verdict,
            normalized: Some(value),
        }
    }
}

impl From<Verdict> for RuleOutcome {
    fn from(verdict: Verdict) -> Self {
        Self::of(verdict)
    }
}

/// A single validation rule
///
/// Serialized as an internally tagged object, e.g.
/// `{ "rule": "max_length", "max": 50 }`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "rule", rename_all = "snake_case")]
pub enum FieldRule {
    /// Trimmed value must not be empty
    Required,
    /// At most `max` characters; longer values are truncated
    MaxLength { max: usize },
    /// At least `min` characters when a value is present
    MinLength { min: usize },
    /// ASCII digits only; other characters are stripped
    DigitsOnly,
    /// Letters (accented vowels and ñ included) and whitespace; others stripped
    LettersOnly,
    /// Like `LettersOnly` plus ASCII digits
    Alphanumeric,
    /// Optional `local@domain.tld`
    Email,
    /// Optional plain or thousands-grouped number, up to 2 decimals
    DecimalNumber,
    /// A choice other than the empty/"0" placeholder
    SelectionRequired,
    /// A date strictly after today
    FutureDate,
    /// A date strictly before today
    PastDate,
    /// 13-digit national ID with department/municipality and check digit
    NationalId,
    /// Optional tax ID with modulo-11 check character
    TaxId,
}

impl FieldRule {
    /// Evaluate the rule against a field's current value
    ///
    /// `field_name` is the human-readable name used in messages.
    pub fn evaluate(&self, value: &str, field_name: &str, ctx: &RuleContext) -> RuleOutcome {
        match self {
            FieldRule::Required => Verdict::check(!value.trim().is_empty(), || {
                format!("The field {} is required", field_name)
            })
            .into(),
            FieldRule::MaxLength { max } => max_length(value, *max),
            FieldRule::MinLength { min } => {
                let len = value.chars().count();
                Verdict::check(len == 0 || len >= *min, || {
                    format!("The field {} requires at least {} characters", field_name, min)
                })
                .into()
            }
            FieldRule::DigitsOnly => sanitize(value, &DIGITS_REGEX, &NON_DIGIT_REGEX, || {
                format!("The field {} only accepts numbers", field_name)
            }),
            FieldRule::LettersOnly => sanitize(value, &LETTERS_REGEX, &NON_LETTER_REGEX, || {
                format!("The field {} only accepts letters and spaces", field_name)
            }),
            FieldRule::Alphanumeric => {
                sanitize(value, &ALPHANUMERIC_REGEX, &NON_ALPHANUMERIC_REGEX, || {
                    format!(
                        "The field {} only accepts letters, numbers and spaces",
                        field_name
                    )
                })
            }
            FieldRule::Email => {
                let value = value.trim();
                Verdict::check(value.is_empty() || EMAIL_REGEX.is_match(value), || {
                    format!("The field {} must be a valid email", field_name)
                })
                .into()
            }
            FieldRule::DecimalNumber => {
                let value = value.trim();
                let valid = value.is_empty()
                    || GROUPED_DECIMAL_REGEX.is_match(value)
                    || PLAIN_DECIMAL_REGEX.is_match(value);
                Verdict::check(valid, || {
                    format!("The field {} must be a valid decimal number", field_name)
                })
                .into()
            }
            FieldRule::SelectionRequired => {
                Verdict::check(!value.is_empty() && value != UNSELECTED, || {
                    format!("You must select an option in {}", field_name)
                })
                .into()
            }
            FieldRule::FutureDate => match parse_date(value) {
                Some(date) => Verdict::check(date > ctx.today(), || {
                    format!("{} must be a future date", field_name)
                }),
                None => Verdict::fail(format!("{} has an invalid format", field_name)),
            }
            .into(),
            FieldRule::PastDate => match parse_date(value) {
                Some(date) => Verdict::check(date < ctx.today(), || {
                    format!("{} must be a past date", field_name)
                }),
                None => Verdict::fail(format!("{} has an invalid format", field_name)),
            }
            .into(),
            FieldRule::NationalId => match validate_national_id(value) {
                Ok(()) => Verdict::pass(),
                Err(IdentifierError::Format) => {
                    Verdict::fail(format!("{} must have 13 digits", field_name))
                }
                Err(IdentifierError::Range { .. }) => Verdict::fail(format!(
                    "{} has an invalid department/municipality code",
                    field_name
                )),
                Err(IdentifierError::Checksum) => Verdict::fail(format!("{} is invalid", field_name)),
            }
            .into(),
            FieldRule::TaxId => match validate_tax_id(value) {
                Ok(()) => Verdict::pass(),
                Err(IdentifierError::Checksum) => Verdict::fail(format!("{} is invalid", field_name)),
                Err(_) => Verdict::fail(format!("{} has an invalid format", field_name)),
            }
            .into(),
        }
    }
}

fn max_length(value: &str, max: usize) -> RuleOutcome {
    if value.chars().count() > max {
        // truncation always lands within the limit
        RuleOutcome::normalized(Verdict::pass(), value.chars().take(max).collect())
    } else {
        RuleOutcome::of(Verdict::pass())
    }
}

/// Check `value` against `allowed`; on failure strip everything `disallowed` matches
fn sanitize(
    value: &str,
    allowed: &Regex,
    disallowed: &Regex,
    message: impl FnOnce() -> String,
) -> RuleOutcome {
    if allowed.is_match(value) {
        RuleOutcome::of(Verdict::pass())
    } else {
        let cleaned = disallowed.replace_all(value, "").into_owned();
        RuleOutcome::normalized(Verdict::fail(message()), cleaned)
    }
}

/// Parse the date part of a date or date-time input value
fn parse_date(value: &str) -> Option<NaiveDate> {
    let value = value.trim();
    if let Ok(date) = NaiveDate::parse_from_str(value, "%Y-%m-%d") {
        return Some(date);
    }
    for format in ["%Y-%m-%dT%H:%M:%S", "%Y-%m-%dT%H:%M", "%Y-%m-%d %H:%M:%S"] {
        if let Ok(datetime) = NaiveDateTime::parse_from_str(value, format) {
            return Some(datetime.date());
        }
    }
    DateTime::parse_from_rfc3339(value)
        .ok()
        .map(|datetime| datetime.date_naive())
}
