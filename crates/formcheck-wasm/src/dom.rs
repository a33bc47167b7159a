// File: src/dom.rs
// Purpose: DOM-backed field controls and document for the form validator

use formcheck_core::{FieldControl, FormDocument};
use wasm_bindgen::JsCast;
use web_sys::{
    Document, Element, HtmlElement, HtmlInputElement, HtmlSelectElement, HtmlTextAreaElement,
    Node, ScrollBehavior, ScrollIntoViewOptions, ScrollLogicalPosition,
};

/// Attribute carrying the page id the rules are registered under
pub const PAGE_ATTRIBUTE: &str = "data-page";

/// Controls that opted into validation
pub const VALIDATABLE_SELECTOR: &str = r#"input[data-validacion="true"], textarea[data-validacion="true"], select[data-validacion="true"]"#;

/// Containers whose controls get live validation
pub const LIVE_FORM_SELECTOR: &str = "div.form";

const ERROR_LABEL_SUFFIX: &str = "ErrorLabel";
const INVALID_CLASS: &str = "is-invalid";
const VALID_CLASS: &str = "is-valid";

#[derive(Clone)]
enum ControlKind {
    Input(HtmlInputElement),
    TextArea(HtmlTextAreaElement),
    Select(HtmlSelectElement),
}

/// An `input`, `textarea` or `select` element
#[derive(Clone)]
pub struct DomControl {
    element: HtmlElement,
    kind: ControlKind,
    document: Document,
}

impl DomControl {
    /// Wrap a form control; `None` for any other kind of element
    pub fn from_element(element: Element, document: &Document) -> Option<Self> {
        let kind = if let Some(input) = element.dyn_ref::<HtmlInputElement>() {
            ControlKind::Input(input.clone())
        } else if let Some(textarea) = element.dyn_ref::<HtmlTextAreaElement>() {
            ControlKind::TextArea(textarea.clone())
        } else if let Some(select) = element.dyn_ref::<HtmlSelectElement>() {
            ControlKind::Select(select.clone())
        } else {
            return None;
        };

        Some(Self {
            element: element.dyn_into::<HtmlElement>().ok()?,
            kind,
            document: document.clone(),
        })
    }

    pub fn element(&self) -> &HtmlElement {
        &self.element
    }

    pub fn is_select(&self) -> bool {
        matches!(self.kind, ControlKind::Select(_))
    }

    /// The `{id}ErrorLabel` element next to the control
    fn error_label(&self) -> Option<HtmlElement> {
        self.document
            .get_element_by_id(&format!("{}{}", self.element.id(), ERROR_LABEL_SUFFIX))
            .and_then(|label| label.dyn_into::<HtmlElement>().ok())
    }
}

impl FieldControl for DomControl {
    fn id(&self) -> String {
        self.element.id()
    }

    fn value(&self) -> String {
        match &self.kind {
            ControlKind::Input(input) => input.value(),
            ControlKind::TextArea(textarea) => textarea.value(),
            ControlKind::Select(select) => select.value(),
        }
    }

    fn set_value(&self, value: &str) {
        match &self.kind {
            ControlKind::Input(input) => input.set_value(value),
            ControlKind::TextArea(textarea) => textarea.set_value(value),
            ControlKind::Select(select) => select.set_value(value),
        }
    }

    fn is_disabled(&self) -> bool {
        match &self.kind {
            ControlKind::Input(input) => input.disabled(),
            ControlKind::TextArea(textarea) => textarea.disabled(),
            ControlKind::Select(select) => select.disabled(),
        }
    }

    fn is_visible(&self) -> bool {
        // no offset parent: the element or an ancestor is display:none
        if self.element.offset_parent().is_none() {
            return false;
        }

        let display = self
            .document
            .default_view()
            .and_then(|window| window.get_computed_style(&self.element).ok().flatten())
            .and_then(|style| style.get_property_value("display").ok());
        display.as_deref() != Some("none")
    }

    fn label(&self) -> Option<String> {
        let selector = format!(r#"label[for="{}"]"#, self.element.id());
        let label = self.document.query_selector(&selector).ok().flatten()?;

        // only the label's own text, not nested markup such as required markers
        let nodes = label.child_nodes();
        let text = (0..nodes.length())
            .filter_map(|i| nodes.item(i))
            .filter(|node| node.node_type() == Node::TEXT_NODE)
            .filter_map(|node| node.text_content())
            .map(|text| text.trim().to_string())
            .filter(|text| !text.is_empty())
            .collect::<Vec<_>>()
            .join(" ");
        Some(text)
    }

    fn show_error(&self, message: &str) {
        if let Some(label) = self.error_label() {
            label.set_text_content(Some(message));
            let _ = label.style().set_property("display", "block");
        }
        let classes = self.element.class_list();
        let _ = classes.add_1(INVALID_CLASS);
        let _ = classes.remove_1(VALID_CLASS);
    }

    fn clear_error(&self) {
        if let Some(label) = self.error_label() {
            let _ = label.style().set_property("display", "none");
            label.set_text_content(Some(""));
        }
        let classes = self.element.class_list();
        let _ = classes.remove_1(INVALID_CLASS);
        let _ = classes.add_1(VALID_CLASS);
    }

    fn reveal(&self) {
        let options = ScrollIntoViewOptions::new();
        options.set_behavior(ScrollBehavior::Smooth);
        options.set_block(ScrollLogicalPosition::Center);
        self.element
            .scroll_into_view_with_scroll_into_view_options(&options);
        let _ = self.element.focus();
    }
}

/// The browser document
pub struct DomDocument {
    document: Document,
}

impl DomDocument {
    /// The current window's document, if running in a browser
    pub fn current() -> Option<Self> {
        let document = web_sys::window()?.document()?;
        Some(Self { document })
    }

    fn controls_in(&self, container: &Element) -> Vec<DomControl> {
        let Ok(nodes) = container.query_selector_all(VALIDATABLE_SELECTOR) else {
            return Vec::new();
        };
        (0..nodes.length())
            .filter_map(|i| nodes.item(i))
            .filter_map(|node| node.dyn_into::<Element>().ok())
            .filter_map(|element| DomControl::from_element(element, &self.document))
            .collect()
    }

    /// Validatable controls of every live-validation container
    pub fn live_controls(&self) -> Vec<DomControl> {
        let Ok(forms) = self.document.query_selector_all(LIVE_FORM_SELECTOR) else {
            return Vec::new();
        };
        (0..forms.length())
            .filter_map(|i| forms.item(i))
            .filter_map(|node| node.dyn_into::<Element>().ok())
            .flat_map(|form| self.controls_in(&form))
            .collect()
    }
}

impl FormDocument for DomDocument {
    type Control = DomControl;

    fn page_id(&self) -> Option<String> {
        let selector = format!("[{}]", PAGE_ATTRIBUTE);
        self.document
            .query_selector(&selector)
            .ok()
            .flatten()
            .and_then(|element| element.get_attribute(PAGE_ATTRIBUTE))
    }

    fn form_fields(&self, form_id: &str) -> Option<Vec<DomControl>> {
        let form = self.document.get_element_by_id(form_id)?;
        Some(self.controls_in(&form))
    }

    fn field(&self, field_id: &str) -> Option<DomControl> {
        let element = self.document.get_element_by_id(field_id)?;
        DomControl::from_element(element, &self.document)
    }
}
