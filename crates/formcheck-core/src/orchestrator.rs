// File: src/orchestrator.rs
// Purpose: Form-level validation over injected field capabilities

use serde::{Deserialize, Serialize};
use tracing::{debug, error};

use crate::engine::run_rules;
use crate::error::ConfigurationError;
use crate::registry::PageRegistry;
use crate::rules::RuleContext;

/// A live form control
///
/// Handles are cheap to clone and refer to the same underlying control, so
/// mutating methods take `&self`.
pub trait FieldControl {
    fn id(&self) -> String;

    fn value(&self) -> String;

    fn set_value(&self, value: &str);

    fn is_disabled(&self) -> bool;

    /// Whether the control currently takes part in layout
    fn is_visible(&self) -> bool;

    /// Visible label text, if the control has one
    fn label(&self) -> Option<String>;

    fn show_error(&self, message: &str);

    fn clear_error(&self);

    /// Bring the control into view and focus it
    fn reveal(&self);
}

/// The document holding the forms
pub trait FormDocument {
    type Control: FieldControl;

    /// Value of the page-identifying marker
    fn page_id(&self) -> Option<String>;

    /// Controls opted into validation inside a form, in enumeration order
    ///
    /// `None` when the form doesn't exist.
    fn form_fields(&self, form_id: &str) -> Option<Vec<Self::Control>>;

    fn field(&self, field_id: &str) -> Option<Self::Control>;
}

/// Name used for a control in messages: its label, else its id
pub fn display_name<C: FieldControl + ?Sized>(control: &C) -> String {
    control
        .label()
        .map(|label| label.trim().to_string())
        .filter(|label| !label.is_empty())
        .unwrap_or_else(|| control.id())
}

/// One field that failed validation
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FieldFailure {
    pub field_id: String,
    pub message: String,
}

/// Outcome of a whole-form pass
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct FormReport {
    /// Failures in enumeration order
    pub failures: Vec<FieldFailure>,
}

impl FormReport {
    pub fn is_valid(&self) -> bool {
        self.failures.is_empty()
    }

    pub fn first_invalid(&self) -> Option<&str> {
        self.failures.first().map(|f| f.field_id.as_str())
    }

    pub fn failure(&self, field_id: &str) -> Option<&FieldFailure> {
        self.failures.iter().find(|f| f.field_id == field_id)
    }
}

/// Runs registered rules over the fields of a document
#[derive(Debug, Clone, Copy)]
pub struct FormValidator<'r> {
    registry: &'r PageRegistry,
    ctx: RuleContext,
}

impl<'r> FormValidator<'r> {
    /// Validator for the current local day
    pub fn new(registry: &'r PageRegistry) -> Self {
        Self::with_context(registry, RuleContext::today_local())
    }

    pub fn with_context(registry: &'r PageRegistry, ctx: RuleContext) -> Self {
        Self { registry, ctx }
    }

    pub fn registry(&self) -> &'r PageRegistry {
        self.registry
    }

    fn resolve_page<D: FormDocument>(&self, doc: &D) -> Result<String, ConfigurationError> {
        let page = doc.page_id().ok_or(ConfigurationError::MissingPageContext)?;
        if !self.registry.contains_page(&page) {
            return Err(ConfigurationError::UnknownPage(page));
        }
        Ok(page)
    }

    /// Run the rules of one control, write back normalized input and toggle its error
    ///
    /// Returns `None` when the control has no rules.
    fn check_control<C: FieldControl>(&self, page: &str, control: &C) -> Option<Result<(), String>> {
        let id = control.id();
        let rules = self.registry.rules_for(page, &id);
        if rules.is_empty() {
            return None;
        }

        let value = control.value();
        let outcome = run_rules(&value, rules, &display_name(control), &self.ctx);
        if outcome.changed {
            control.set_value(&outcome.value);
        }

        debug!(field = %id, valid = outcome.verdict.is_valid(), "field checked");
        if outcome.verdict.is_valid() {
            control.clear_error();
            Some(Ok(()))
        } else {
            control.show_error(outcome.verdict.message());
            Some(Err(outcome.verdict.message().to_string()))
        }
    }

    /// Validate every opted-in, enabled and visible field of a form
    ///
    /// After a failing pass the first failing field is revealed.
    pub fn validate_form<D: FormDocument>(
        &self,
        doc: &D,
        form_id: &str,
    ) -> Result<FormReport, ConfigurationError> {
        let page = self.resolve_page(doc)?;
        let controls = doc
            .form_fields(form_id)
            .ok_or_else(|| ConfigurationError::FormNotFound(form_id.to_string()))?;

        let mut report = FormReport::default();
        let mut first_invalid: Option<&D::Control> = None;

        for control in &controls {
            if control.is_disabled() || !control.is_visible() {
                continue;
            }
            if let Some(Err(message)) = self.check_control(&page, control) {
                report.failures.push(FieldFailure {
                    field_id: control.id(),
                    message,
                });
                first_invalid.get_or_insert(control);
            }
        }

        if let Some(control) = first_invalid {
            control.reveal();
        }

        Ok(report)
    }

    /// Submit-facing form check: configuration problems are logged and block submission
    pub fn is_form_valid<D: FormDocument>(&self, doc: &D, form_id: &str) -> bool {
        match self.validate_form(doc, form_id) {
            Ok(report) => report.is_valid(),
            Err(err) => {
                error!(form = form_id, "form validation aborted: {}", err);
                false
            }
        }
    }

    /// Validate a single field
    ///
    /// A missing field or one without rules counts as valid.
    pub fn validate_field<D: FormDocument>(
        &self,
        doc: &D,
        field_id: &str,
    ) -> Result<bool, ConfigurationError> {
        let page = self.resolve_page(doc)?;
        let Some(control) = doc.field(field_id) else {
            return Ok(true);
        };
        Ok(!matches!(self.check_control(&page, &control), Some(Err(_))))
    }

    /// Live-validation field check: configuration problems are logged and never block
    pub fn is_field_valid<D: FormDocument>(&self, doc: &D, field_id: &str) -> bool {
        self.validate_field(doc, field_id).unwrap_or_else(|err| {
            error!(field = field_id, "field validation skipped: {}", err);
            true
        })
    }
}
