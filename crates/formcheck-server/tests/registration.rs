use axum::{
    body::{to_bytes, Body},
    http::{header, Request, StatusCode},
    Router,
};
use formcheck_server::{router, Config};
use pretty_assertions::assert_eq;
use tower::ServiceExt;

fn test_app() -> Router {
    router(&Config::default())
}

const VALID_FORM: &str = "first_name=Ana&last_name=P%C3%A9rez&national_id=1234567890101\
&email=ana%40example.com&phone=55512345&department=9&address=Zona+3&action=save";

async fn body_text(response: axum::response::Response) -> String {
    let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
    String::from_utf8(bytes.to_vec()).unwrap()
}

async fn post_form(body: &str) -> (StatusCode, String) {
    let response = test_app()
        .oneshot(
            Request::builder()
                .method("POST")
                .uri("/registro-cliente")
                .header(header::CONTENT_TYPE, "application/x-www-form-urlencoded")
                .body(Body::from(body.to_string()))
                .unwrap(),
        )
        .await
        .unwrap();
    let status = response.status();
    (status, body_text(response).await)
}

#[tokio::test]
async fn test_root_redirects_to_registration() {
    let response = test_app()
        .oneshot(Request::builder().uri("/").body(Body::empty()).unwrap())
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::SEE_OTHER);
    assert_eq!(
        response.headers().get(header::LOCATION).unwrap(),
        "/registro-cliente"
    );
}

#[tokio::test]
async fn test_get_renders_page_markers() {
    let response = test_app()
        .oneshot(
            Request::builder()
                .uri("/registro-cliente")
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    let html = body_text(response).await;
    assert!(html.contains(r#"data-page="registroCliente""#));
    assert!(html.contains("return triggerButtonClick('formRegistroCliente');"));
    assert!(html.contains("/pkg/formcheck_wasm.js"));
}

#[tokio::test]
async fn test_valid_submission_is_echoed() {
    let (status, html) = post_form(VALID_FORM).await;

    assert_eq!(status, StatusCode::OK);
    assert!(html.contains("Customer registered"));
    assert!(html.contains("<dd>Pérez</dd>"));
    assert!(html.contains("<dd>Quetzaltenango</dd>"));
    assert!(!html.contains("Server validation error"));
    // form is cleared after saving
    assert!(html.contains(r#"id="cphBody_txtNombre" name="first_name" value="""#));
}

#[tokio::test]
async fn test_submitted_markup_is_escaped() {
    let body = VALID_FORM.replace("first_name=Ana", "first_name=%3Cscript%3Ex%3C%2Fscript%3E");
    let (_, html) = post_form(&body).await;

    assert!(html.contains("&lt;script&gt;x&lt;/script&gt;"));
    assert!(!html.contains("<script>x</script>"));
}

#[tokio::test]
async fn test_invalid_submission_shows_banner() {
    let body = VALID_FORM.replace("phone=55512345", "phone=555");
    let (status, html) = post_form(&body).await;

    assert_eq!(status, StatusCode::OK);
    assert!(html.contains("Server validation error"));
    assert!(!html.contains("Customer registered"));
    // values are kept for correction
    assert!(html.contains(r#"value="555""#));
}

#[tokio::test]
async fn test_missing_fields_are_rejected() {
    let (_, html) = post_form("first_name=Ana&action=save").await;
    assert!(html.contains("Server validation error"));
}

#[tokio::test]
async fn test_clear_action_resets_form() {
    let body = VALID_FORM.replace("action=save", "action=clear");
    let (status, html) = post_form(&body).await;

    assert_eq!(status, StatusCode::OK);
    assert!(!html.contains("alert"));
    assert!(!html.contains("Pérez"));
}
