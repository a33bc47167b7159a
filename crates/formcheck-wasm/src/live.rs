// File: src/live.rs
// Purpose: Re-validate fields as the user types, leaves a field or changes a selection

use formcheck_core::{FieldControl, FormDocument, PageRegistry};
use std::rc::Rc;
use wasm_bindgen::prelude::*;
use wasm_bindgen::JsCast;
use web_sys::console;

use crate::dom::{DomControl, DomDocument};

/// Attach live validation now, or once the DOM has loaded
pub fn attach_when_ready(registry: Rc<PageRegistry>) {
    let Some(document) = web_sys::window().and_then(|window| window.document()) else {
        return;
    };

    if document.ready_state() == "loading" {
        let on_ready = Closure::<dyn FnMut()>::new(move || {
            attach(&registry);
        });
        let _ = document
            .add_event_listener_with_callback("DOMContentLoaded", on_ready.as_ref().unchecked_ref());
        on_ready.forget();
    } else {
        attach(&registry);
    }
}

/// Bind listeners to every validatable control that has rules
///
/// Returns the number of controls bound.
pub fn attach(registry: &Rc<PageRegistry>) -> u32 {
    let Some(doc) = DomDocument::current() else {
        return 0;
    };
    let Some(page) = doc.page_id() else {
        console::warn_1(&"formcheck: page context marker (data-page) not found".into());
        return 0;
    };
    let Some(rules) = registry.page(&page) else {
        console::warn_1(&format!("formcheck: no rules registered for page: {}", page).into());
        return 0;
    };

    let mut bound = 0;
    for control in doc.live_controls() {
        if rules.rules_for(&control.id()).is_empty() {
            continue;
        }
        let events: &[&str] = if control.is_select() {
            &["change"]
        } else {
            &["input", "blur"]
        };
        for event in events {
            bind(registry, &control, event);
        }
        bound += 1;
    }

    console::log_1(&format!("formcheck: live validation ready ({} fields)", bound).into());
    bound
}

fn bind(registry: &Rc<PageRegistry>, control: &DomControl, event: &str) {
    let registry = Rc::clone(registry);
    let field_id = control.id();
    let handler = Closure::<dyn FnMut()>::new(move || {
        crate::check_field(&registry, &field_id);
    });
    let _ = control
        .element()
        .add_event_listener_with_callback(event, handler.as_ref().unchecked_ref());
    // listeners live as long as the page
    handler.forget();
}
