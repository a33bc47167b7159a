//! formcheck WASM
//!
//! WebAssembly bindings for the formcheck validator.
//! Runs the same rules as `formcheck-core` against the live DOM: submit
//! integration, single-field checks and live (input/blur/change) validation.
//!
//! ```html
//! <script type="module">
//!   import init, * as formcheck from "/pkg/formcheck_wasm.js";
//!   await init();
//!   window.triggerButtonClick = formcheck.triggerButtonClick;
//! </script>
//! <button onclick="return triggerButtonClick('formRegistroCliente');">Save</button>
//! ```

mod dom;
mod live;

use formcheck_core::{validate_national_id, validate_tax_id, FormValidator, PageRegistry};
use std::rc::Rc;
use wasm_bindgen::prelude::*;
use web_sys::console;

pub use dom::{DomControl, DomDocument, PAGE_ATTRIBUTE, VALIDATABLE_SELECTOR};

thread_local! {
    static BUILTIN_REGISTRY: Rc<PageRegistry> = Rc::new(PageRegistry::builtin());
}

fn builtin_registry() -> Rc<PageRegistry> {
    BUILTIN_REGISTRY.with(Rc::clone)
}

/// Set the panic hook and start live validation for the built-in pages
#[wasm_bindgen(start)]
pub fn init() {
    #[cfg(feature = "console_error_panic_hook")]
    console_error_panic_hook::set_once();

    live::attach_when_ready(builtin_registry());
}

/// Whole-form pass; configuration problems are reported to the console and block submission
fn check_form(registry: &PageRegistry, form_id: &str) -> bool {
    let Some(doc) = DomDocument::current() else {
        console::error_1(&"formcheck: no document available".into());
        return false;
    };

    match FormValidator::new(registry).validate_form(&doc, form_id) {
        Ok(report) => report.is_valid(),
        Err(err) => {
            console::error_1(&format!("formcheck: {}", err).into());
            false
        }
    }
}

/// Single-field pass; configuration problems never block the user
pub(crate) fn check_field(registry: &PageRegistry, field_id: &str) -> bool {
    let Some(doc) = DomDocument::current() else {
        return true;
    };

    FormValidator::new(registry)
        .validate_field(&doc, field_id)
        .unwrap_or_else(|err| {
            console::warn_1(&format!("formcheck: {}", err).into());
            true
        })
}

fn submit(registry: &PageRegistry, form_id: &str) -> bool {
    let valid = check_form(registry, form_id);
    if valid {
        console::log_1(&"formcheck: validation passed, continuing to server".into());
    } else {
        console::log_1(&"formcheck: validation failed, postback stopped".into());
    }
    valid
}

/// Validator bound to a rule registry
///
/// # Example (JavaScript)
/// ```javascript
/// const validator = FormValidator.withRules({
///     altaEmpleado: {
///         txtCodigo: [{ rule: "required" }, { rule: "max_length", max: 6 }],
///     },
/// });
/// validator.attachLiveValidation();
/// button.onclick = () => validator.triggerButtonClick("formEmpleado");
/// ```
#[wasm_bindgen(js_name = FormValidator)]
pub struct JsFormValidator {
    registry: Rc<PageRegistry>,
}

#[wasm_bindgen(js_class = FormValidator)]
impl JsFormValidator {
    /// Validator for the built-in customer, product and supplier pages
    #[wasm_bindgen(constructor)]
    pub fn new() -> JsFormValidator {
        Self {
            registry: builtin_registry(),
        }
    }

    /// Validator for a custom `{ page: { field: [rule, ...] } }` registry
    #[wasm_bindgen(js_name = withRules)]
    pub fn with_rules(rules: JsValue) -> Result<JsFormValidator, JsValue> {
        let registry: PageRegistry = serde_wasm_bindgen::from_value(rules)
            .map_err(|e| JsValue::from_str(&format!("Failed to parse rules: {}", e)))?;
        Ok(Self {
            registry: Rc::new(registry),
        })
    }

    /// Page ids this validator has rules for
    #[wasm_bindgen(js_name = pageIds)]
    pub fn page_ids(&self) -> Vec<String> {
        let mut ids: Vec<String> = self.registry.page_ids().map(str::to_string).collect();
        ids.sort_unstable();
        ids
    }

    #[wasm_bindgen(js_name = validateForm)]
    pub fn validate_form(&self, form_id: &str) -> bool {
        check_form(&self.registry, form_id)
    }

    /// Full report (`{ failures: [{ field_id, message }] }`) for a form
    #[wasm_bindgen(js_name = formReport)]
    pub fn form_report(&self, form_id: &str) -> Result<JsValue, JsValue> {
        let doc = DomDocument::current().ok_or_else(|| JsValue::from_str("no document available"))?;
        let report = FormValidator::new(&self.registry)
            .validate_form(&doc, form_id)
            .map_err(|e| JsValue::from_str(&e.to_string()))?;
        Ok(serde_wasm_bindgen::to_value(&report)?)
    }

    #[wasm_bindgen(js_name = validateField)]
    pub fn validate_field(&self, field_id: &str) -> bool {
        check_field(&self.registry, field_id)
    }

    /// Submit hook: `false` stops the postback
    #[wasm_bindgen(js_name = triggerButtonClick)]
    pub fn trigger_button_click(&self, form_id: &str) -> bool {
        submit(&self.registry, form_id)
    }

    /// Bind live validation listeners; returns the number of fields bound
    #[wasm_bindgen(js_name = attachLiveValidation)]
    pub fn attach_live_validation(&self) -> u32 {
        live::attach(&self.registry)
    }
}

impl Default for JsFormValidator {
    fn default() -> Self {
        Self::new()
    }
}

/// Validate a whole form against the built-in rules
#[wasm_bindgen(js_name = validateForm)]
pub fn validate_form(form_id: &str) -> bool {
    check_form(&builtin_registry(), form_id)
}

/// Validate one field against the built-in rules
#[wasm_bindgen(js_name = validateField)]
pub fn validate_field(field_id: &str) -> bool {
    check_field(&builtin_registry(), field_id)
}

/// Submit hook for `onclick="return triggerButtonClick('formId');"`
#[wasm_bindgen(js_name = triggerButtonClick)]
pub fn trigger_button_click(form_id: &str) -> bool {
    submit(&builtin_registry(), form_id)
}

/// Bind live validation for the built-in rules
#[wasm_bindgen(js_name = attachLiveValidation)]
pub fn attach_live_validation() -> u32 {
    live::attach(&builtin_registry())
}

/// Quick national ID check
#[wasm_bindgen(js_name = isValidNationalId)]
pub fn is_valid_national_id(value: &str) -> bool {
    validate_national_id(value).is_ok()
}

/// Quick tax ID check (empty counts as valid)
#[wasm_bindgen(js_name = isValidTaxId)]
pub fn is_valid_tax_id(value: &str) -> bool {
    validate_tax_id(value).is_ok()
}

#[cfg(test)]
mod tests {
    use super::*;
    use formcheck_core::{FieldRule, PageRules};
    use wasm_bindgen_test::*;

    #[wasm_bindgen_test]
    fn test_national_id() {
        assert!(is_valid_national_id("1234567890101"));
        assert!(!is_valid_national_id("2539751300101"));
        assert!(!is_valid_national_id("123"));
    }

    #[wasm_bindgen_test]
    fn test_tax_id() {
        assert!(is_valid_tax_id("12345-5"));
        assert!(is_valid_tax_id("6k"));
        assert!(!is_valid_tax_id("12345K"));
    }

    #[wasm_bindgen_test]
    fn test_with_rules_round_trip() {
        let registry = PageRegistry::new().with_page(
            "altaEmpleado",
            PageRules::new().field("txtCodigo", vec![FieldRule::Required]),
        );
        let rules = serde_wasm_bindgen::to_value(&registry).unwrap();
        let validator = JsFormValidator::with_rules(rules).unwrap();
        assert_eq!(validator.page_ids(), vec!["altaEmpleado".to_string()]);
    }

    #[wasm_bindgen_test]
    fn test_builtin_page_ids() {
        assert_eq!(
            JsFormValidator::new().page_ids(),
            vec!["registroCliente", "registroProducto", "registroProveedor"]
        );
    }
}
