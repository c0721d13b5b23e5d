use crate::helpers::spawn_app;

#[tokio::test]
async fn health_check() {
    let app = spawn_app().await;

    let resp = reqwest::Client::new()
        .get(format!("{}/health_check", app.addr))
        .send()
        .await
        .expect("execute request");
    assert!(resp.status().is_success());
    assert_eq!(resp.content_length().unwrap(), 0); // empty body
}

#[tokio::test]
async fn health_check_without_api_key() {
    // liveness does not depend on the provider being usable
    let app = crate::helpers::spawn_app_with(|cfg| cfg.provider.api_key = None).await;

    let resp = reqwest::get(format!("http://127.0.0.1:{}/health_check", app.port))
        .await
        .expect("execute request");
    assert_eq!(resp.status().as_u16(), 200);
}
