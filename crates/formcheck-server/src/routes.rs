// File: src/routes.rs
// Purpose: HTTP routes for the registration page and the compiled wasm package

use axum::{
    response::{Html, Redirect},
    routing::get,
    Form, Router,
};
use serde::Deserialize;
use tower_http::{services::ServeDir, trace::TraceLayer};
use tracing::{info, warn};

use crate::config::Config;
use crate::customer::CustomerSubmission;
use crate::pages::{customer_page, Outcome};

pub const CUSTOMER_PATH: &str = "/registro-cliente";

/// Posted form: the customer values plus which button was pressed
#[derive(Debug, Deserialize)]
pub struct RegistrationForm {
    #[serde(flatten)]
    pub customer: CustomerSubmission,
    #[serde(default)]
    pub action: Option<String>,
}

/// Build the application router
pub fn router(config: &Config) -> Router {
    Router::new()
        .route("/", get(|| async { Redirect::to(CUSTOMER_PATH) }))
        .route(CUSTOMER_PATH, get(show_customer_form).post(submit_customer_form))
        .nest_service("/pkg", ServeDir::new(&config.assets.static_dir))
        .layer(TraceLayer::new_for_http())
}

async fn show_customer_form() -> Html<String> {
    Html(customer_page(&CustomerSubmission::default(), &Outcome::Empty).into_string())
}

async fn submit_customer_form(Form(form): Form<RegistrationForm>) -> Html<String> {
    if form.action.as_deref() == Some("clear") {
        return show_customer_form().await;
    }

    let markup = match form.customer.verify() {
        Ok(accepted) => {
            info!(
                department = accepted.department,
                "Customer registration accepted"
            );
            let outcome = Outcome::Saved {
                submission: accepted.submission,
                department: accepted.department,
            };
            customer_page(&CustomerSubmission::default(), &outcome)
        }
        Err(err) => {
            warn!(fields = ?err.fields(), "Server validation error: {}", err);
            customer_page(&form.customer, &Outcome::Rejected)
        }
    };

    Html(markup.into_string())
}
