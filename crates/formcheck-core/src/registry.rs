// File: src/registry.rs
// Purpose: Page -> field -> rule set lookup

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::fs;
use std::path::Path;

use crate::rules::FieldRule;

/// Ordered rules for one field
pub type RuleSet = Vec<FieldRule>;

/// Rule sets for every validated field of one page
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct PageRules {
    fields: HashMap<String, RuleSet>,
}

impl PageRules {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register the rule set for a field (builder style)
    pub fn field(mut self, field_id: impl Into<String>, rules: RuleSet) -> Self {
        self.fields.insert(field_id.into(), rules);
        self
    }

    /// Rules for a field; empty when the field isn't registered
    pub fn rules_for(&self, field_id: &str) -> &[FieldRule] {
        self.fields.get(field_id).map(Vec::as_slice).unwrap_or(&[])
    }

    pub fn field_ids(&self) -> impl Iterator<Item = &str> {
        self.fields.keys().map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.fields.len()
    }

    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }
}

/// Immutable lookup built once at startup and shared by reference
///
/// # TOML format
///
/// ```toml
/// [registroCliente]
/// cphBody_txtNombre = [{ rule = "required" }, { rule = "max_length", max = 50 }]
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct PageRegistry {
    pages: HashMap<String, PageRules>,
}

impl PageRegistry {
    /// Create an empty registry
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a page (builder style)
    pub fn with_page(mut self, page_id: impl Into<String>, rules: PageRules) -> Self {
        self.pages.insert(page_id.into(), rules);
        self
    }

    pub fn page(&self, page_id: &str) -> Option<&PageRules> {
        self.pages.get(page_id)
    }

    pub fn contains_page(&self, page_id: &str) -> bool {
        self.pages.contains_key(page_id)
    }

    /// Rules for a field of a page; empty for anything unregistered
    pub fn rules_for(&self, page_id: &str, field_id: &str) -> &[FieldRule] {
        self.page(page_id)
            .map(|page| page.rules_for(field_id))
            .unwrap_or(&[])
    }

    pub fn page_ids(&self) -> impl Iterator<Item = &str> {
        self.pages.keys().map(String::as_str)
    }

    /// Parse a registry from TOML text
    pub fn from_toml_str(content: &str) -> Result<Self> {
        toml::from_str(content).context("Failed to parse rule registry")
    }

    /// Load a registry from a TOML file
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let content = fs::read_to_string(path)
            .with_context(|| format!("Failed to read rule registry: {:?}", path))?;
        Self::from_toml_str(&content)
            .with_context(|| format!("Invalid rule registry: {:?}", path))
    }

    /// The registry for the shipped customer, product and supplier pages
    pub fn builtin() -> Self {
        use FieldRule::*;

        let customer = PageRules::new()
            .field("cphBody_txtNombre", vec![Required, LettersOnly, MaxLength { max: 50 }])
            .field("cphBody_txtApellido", vec![Required, LettersOnly, MaxLength { max: 50 }])
            .field("cphBody_txtDPI", vec![Required, NationalId])
            .field("cphBody_txtEmail", vec![Required, Email])
            .field("cphBody_txtTelefono", vec![Required, DigitsOnly, MaxLength { max: 8 }])
            .field("cphBody_ddlDepartamento", vec![SelectionRequired])
            .field("cphBody_txtDireccion", vec![Required, MaxLength { max: 200 }]);

        let product = PageRules::new()
            .field("cphBody_txtCodigoProducto", vec![Required, Alphanumeric, MaxLength { max: 20 }])
            .field("cphBody_txtNombreProducto", vec![Required, MaxLength { max: 100 }])
            .field("cphBody_ddlCategoria", vec![SelectionRequired])
            .field("cphBody_txtPrecio", vec![Required, DecimalNumber])
            .field("cphBody_txtDescripcion", vec![MaxLength { max: 500 }]);

        let supplier = PageRules::new()
            .field("cphBody_txtNombreEmpresa", vec![Required, MaxLength { max: 100 }])
            .field("cphBody_txtNIT", vec![Required, TaxId])
            .field("cphBody_txtContacto", vec![Required, LettersOnly, MaxLength { max: 100 }])
            .field("cphBody_txtTelefono", vec![Required, DigitsOnly, MaxLength { max: 8 }])
            .field("cphBody_txtEmail", vec![Email])
            .field("cphBody_ddlTipoProveedor", vec![SelectionRequired]);

        Self::new()
            .with_page(CUSTOMER_PAGE, customer)
            .with_page(PRODUCT_PAGE, product)
            .with_page(SUPPLIER_PAGE, supplier)
    }
}

/// Page ids of the built-in registry, as carried by the page marker
pub const CUSTOMER_PAGE: &str = "registroCliente";
pub const PRODUCT_PAGE: &str = "registroProducto";
pub const SUPPLIER_PAGE: &str = "registroProveedor";
