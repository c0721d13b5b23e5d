use lead_capture::client::ContactForm;
use lead_capture::client::Notification;
use lead_capture::client::SubmissionClient;
use serde_json::json;
use wiremock::matchers::any;
use wiremock::matchers::body_partial_json;
use wiremock::matchers::method;
use wiremock::matchers::path;
use wiremock::Mock;
use wiremock::ResponseTemplate;

use crate::helpers::spawn_app;
use crate::helpers::spawn_app_with;

fn filled_form() -> ContactForm {
    ContactForm {
        name: "John Doe".into(),
        email: "john@example.com".into(),
        phone: "+14155552671".into(),
        message: "Need a site".into(),
        website: "".into(),
    }
}

#[tokio::test]
async fn lead_is_created() {
    let app = spawn_app().await;
    Mock::given(path("/contacts"))
        .and(method("POST"))
        .and(body_partial_json(json!({
            "email": "john@example.com",
            "attributes": {"SMS": "+14155552671"},
        })))
        .respond_with(ResponseTemplate::new(201).set_body_json(json!({"id": 7})))
        .expect(1)
        .mount(&app.provider_server)
        .await;

    let client = SubmissionClient::new(&app.addr);
    let mut form = filled_form();
    let n = client.submit(&mut form).await;

    assert_eq!(n, Notification::Sent);
    assert_eq!(form, ContactForm::default());
}

#[tokio::test]
async fn provider_message_reaches_user() {
    let app = spawn_app().await;
    Mock::given(any())
        .respond_with(
            ResponseTemplate::new(400).set_body_json(json!({"message": "Invalid list id"})),
        )
        .expect(1)
        .mount(&app.provider_server)
        .await;

    let client = SubmissionClient::new(&app.addr);
    let mut form = filled_form();
    let n = client.submit(&mut form).await;

    assert_eq!(n.to_string(), "Invalid list id");
    assert!(!n.is_success());
    // nothing is cleared on failure
    assert_eq!(form, filled_form());
}

#[tokio::test]
async fn honeypot_never_reaches_handler() {
    let app = spawn_app().await;
    Mock::given(any())
        .respond_with(ResponseTemplate::new(201))
        .expect(0)
        .mount(&app.provider_server)
        .await;

    let client = SubmissionClient::new(&app.addr);
    let mut form = ContactForm {
        website: "https://cheap-pills.example".into(),
        ..filled_form()
    };
    assert_eq!(client.submit(&mut form).await, Notification::SpamDetected);
}

#[tokio::test]
async fn misconfigured_server() {
    let app = spawn_app_with(|cfg| cfg.provider.api_key = None).await;
    Mock::given(any())
        .respond_with(ResponseTemplate::new(201))
        .expect(0)
        .mount(&app.provider_server)
        .await;

    let client = SubmissionClient::new(&app.addr);
    let n = client.submit(&mut filled_form()).await;
    assert_eq!(
        n,
        Notification::Rejected("Server configuration error (missing API key)".into())
    );
}

#[tokio::test]
async fn provider_down() {
    let dead = {
        let listener = std::net::TcpListener::bind("127.0.0.1:0").unwrap();
        format!("http://{}", listener.local_addr().unwrap())
    };
    let app = spawn_app_with(|cfg| cfg.provider.base_url = dead).await;

    // the handler answered (502), so this is a rejection, not a server error
    let client = SubmissionClient::new(&app.addr);
    let n = client.submit(&mut filled_form()).await;
    assert_eq!(n, Notification::Rejected("Failed to reach contact provider".into()));
}
