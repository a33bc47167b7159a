// File: src/pages.rs
// Purpose: Customer registration page markup

use maud::{html, Markup, PreEscaped, DOCTYPE};

use crate::customer::{CustomerSubmission, DEPARTMENTS};
use formcheck_core::CUSTOMER_PAGE;

/// DOM id of the form container passed to `triggerButtonClick`
pub const CUSTOMER_FORM_ID: &str = "formRegistroCliente";

const BOOTSTRAP: &str = r#"
import init, * as formcheck from "/pkg/formcheck_wasm.js";
await init();
window.triggerButtonClick = formcheck.triggerButtonClick;
window.validateField = formcheck.validateField;
for (const button of document.querySelectorAll("button[data-needs-validator]")) {
    button.disabled = false;
}
"#;

/// Control kind, decides which element is rendered
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FieldKind {
    Text,
    Email,
    Tel,
    Select,
    TextArea,
}

/// One control of the registration form
#[derive(Debug, Clone, Copy)]
pub struct FormField {
    /// DOM id, key into the page rules
    pub id: &'static str,
    /// Form field name posted to the server
    pub name: &'static str,
    pub label: &'static str,
    pub kind: FieldKind,
}

pub const CUSTOMER_FIELDS: [FormField; 7] = [
    FormField { id: "cphBody_txtNombre", name: "first_name", label: "First name", kind: FieldKind::Text },
    FormField { id: "cphBody_txtApellido", name: "last_name", label: "Last name", kind: FieldKind::Text },
    FormField { id: "cphBody_txtDPI", name: "national_id", label: "DPI", kind: FieldKind::Text },
    FormField { id: "cphBody_txtEmail", name: "email", label: "Email", kind: FieldKind::Email },
    FormField { id: "cphBody_txtTelefono", name: "phone", label: "Phone", kind: FieldKind::Tel },
    FormField { id: "cphBody_ddlDepartamento", name: "department", label: "Department", kind: FieldKind::Select },
    FormField { id: "cphBody_txtDireccion", name: "address", label: "Address", kind: FieldKind::TextArea },
];

/// What happened to the last postback
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum Outcome {
    #[default]
    Empty,
    Saved {
        submission: CustomerSubmission,
        department: &'static str,
    },
    Rejected,
}

/// Full registration page; `values` pre-fills the controls
pub fn customer_page(values: &CustomerSubmission, outcome: &Outcome) -> Markup {
    html! {
        (DOCTYPE)
        html lang="en" {
            head {
                meta charset="utf-8";
                meta name="viewport" content="width=device-width, initial-scale=1";
                title { "Customer registration" }
            }
            body {
                main data-page=(CUSTOMER_PAGE) {
                    h1 { "Customer registration" }
                    (outcome_block(outcome))
                    form method="post" action="/registro-cliente" {
                        div.form id=(CUSTOMER_FORM_ID) {
                            @for field in &CUSTOMER_FIELDS {
                                (field_row(field, values.value(field.name)))
                            }
                            div.actions {
                                // enabled by the bootstrap script once the validator is loaded
                                button type="submit" name="action" value="save" disabled data-needs-validator
                                    onclick={ "return triggerButtonClick('" (CUSTOMER_FORM_ID) "');" } {
                                    "Save"
                                }
                                button type="submit" name="action" value="clear" { "Clear" }
                            }
                        }
                    }
                }
                script type="module" { (PreEscaped(BOOTSTRAP)) }
            }
        }
    }
}

fn field_row(field: &FormField, value: &str) -> Markup {
    html! {
        div.field {
            label for=(field.id) { (field.label) }
            (control(field, value))
            span.error id={ (field.id) "ErrorLabel" } style="display: none" {}
        }
    }
}

fn control(field: &FormField, value: &str) -> Markup {
    match field.kind {
        FieldKind::Select => html! {
            select id=(field.id) name=(field.name) data-validacion="true" {
                option value="0" selected[value.is_empty() || value == "0"] { "-- Select --" }
                @for (index, department) in DEPARTMENTS.iter().enumerate() {
                    @let option_value = (index + 1).to_string();
                    option value=(option_value) selected[value == option_value] { (department) }
                }
            }
        },
        FieldKind::TextArea => html! {
            textarea id=(field.id) name=(field.name) rows="3" data-validacion="true" { (value) }
        },
        FieldKind::Text | FieldKind::Email | FieldKind::Tel => {
            let input_type = match field.kind {
                FieldKind::Email => "email",
                FieldKind::Tel => "tel",
                _ => "text",
            };
            html! {
                input type=(input_type) id=(field.id) name=(field.name) value=(value) data-validacion="true";
            }
        }
    }
}

fn outcome_block(outcome: &Outcome) -> Markup {
    match outcome {
        Outcome::Empty => html! {},
        Outcome::Rejected => html! {
            div.alert.alert-danger role="alert" {
                "Server validation error"
            }
        },
        Outcome::Saved {
            submission,
            department,
        } => html! {
            div.alert.alert-success role="status" {
                h2 { "Customer registered" }
                dl {
                    @for field in &CUSTOMER_FIELDS {
                        dt { (field.label) }
                        @if field.kind == FieldKind::Select {
                            dd { (department) }
                        } @else {
                            dd { (submission.value(field.name)) }
                        }
                    }
                }
            }
        },
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use formcheck_core::PageRegistry;

    #[test]
    fn test_every_field_has_builtin_rules() {
        let registry = PageRegistry::builtin();
        for field in &CUSTOMER_FIELDS {
            assert!(
                !registry.rules_for(CUSTOMER_PAGE, field.id).is_empty(),
                "no rules for {}",
                field.id
            );
        }
    }

    #[test]
    fn test_empty_page_markers() {
        let html = customer_page(&CustomerSubmission::default(), &Outcome::Empty).into_string();
        assert!(html.contains(r#"data-page="registroCliente""#));
        assert!(html.contains(r#"id="formRegistroCliente""#));
        assert!(html.contains(r#"id="cphBody_txtDPIErrorLabel""#));
        assert_eq!(html.matches(r#"data-validacion="true""#).count(), CUSTOMER_FIELDS.len());
        assert!(!html.contains("alert"));
    }

    #[test]
    fn test_save_waits_for_validator() {
        let html = customer_page(&CustomerSubmission::default(), &Outcome::Empty).into_string();
        assert!(html.contains(r#"value="save" disabled data-needs-validator"#));
        assert!(html.contains("button.disabled = false"));
        let bootstrap = html.find("await init()").unwrap();
        let enable = html.find("button.disabled = false").unwrap();
        assert!(bootstrap < enable);
        // clear never depends on the validator
        assert!(html.contains(r#"<button type="submit" name="action" value="clear">"#));
    }

    #[test]
    fn test_selected_department_is_kept() {
        let values = CustomerSubmission {
            department: "17".to_string(),
            ..CustomerSubmission::default()
        };
        let html = customer_page(&values, &Outcome::Rejected).into_string();
        assert!(html.contains(r#"<option value="17" selected>Petén</option>"#));
        assert!(html.contains("Server validation error"));
    }

    #[test]
    fn test_saved_values_are_escaped() {
        let submission = CustomerSubmission {
            first_name: "<b>Ana</b>".to_string(),
            ..CustomerSubmission::default()
        };
        let outcome = Outcome::Saved {
            submission,
            department: "Jalapa",
        };
        let html = customer_page(&CustomerSubmission::default(), &outcome).into_string();
        assert!(html.contains("&lt;b&gt;Ana&lt;/b&gt;"));
        assert!(!html.contains("<b>Ana</b>"));
        assert!(html.contains("<dd>Jalapa</dd>"));
    }
}
