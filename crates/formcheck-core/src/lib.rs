//! formcheck core
//!
//! Field rules, identifier checksum validators and form orchestration shared by
//! the browser bindings and the reference server. Nothing in here touches the
//! DOM: fields are reached through the [`FieldControl`] and [`FormDocument`]
//! capabilities.

pub mod engine;
pub mod error;
pub mod identifiers;
pub mod orchestrator;
pub mod registry;
pub mod rules;
pub mod verdict;

pub use engine::{run_rules, EngineOutcome};
pub use error::{ConfigurationError, IdentifierError};
pub use identifiers::{
    tax_id_check_character, validate_national_id, validate_tax_id, NationalId,
    MUNICIPALITIES_PER_DEPARTMENT,
};
pub use orchestrator::{display_name, FieldControl, FieldFailure, FormDocument, FormReport, FormValidator};
pub use registry::{PageRegistry, PageRules, RuleSet, CUSTOMER_PAGE, PRODUCT_PAGE, SUPPLIER_PAGE};
pub use rules::{FieldRule, RuleContext, RuleOutcome};
pub use verdict::Verdict;
