//! HTTP transport: axum on an ephemeral port, exercised with reqwest.

use std::sync::Arc;

use bookshelf::microsvc::{self, Service};
use bookshelf::{handlers, App};
use serde_json::{json, Value};

async fn start_server<S: Send + Sync + 'static>(service: Arc<Service<S>>) -> String {
    let app = microsvc::router(service);
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        axum::serve(listener, app).await.unwrap();
    });
    format!("http://{addr}")
}

#[tokio::test]
async fn health_lists_commands() {
    let base = start_server(Arc::new(handlers::service(App::in_memory()))).await;
    let body: Value = reqwest::get(format!("{base}/health"))
        .await
        .unwrap()
        .json()
        .await
        .unwrap();

    assert_eq!(body["ok"], true);
    let commands = body["commands"].as_array().unwrap();
    assert!(commands.iter().any(|c| c == "review.create"));
}

#[tokio::test]
async fn vote_over_http() {
    let base = start_server(Arc::new(handlers::service(App::in_memory()))).await;
    let client = reqwest::Client::new();

    let resp = client
        .post(format!("{base}/review.create"))
        .header("x-user-id", "12")
        .json(&json!({ "bookId": 3, "rating": 5, "comment": "Couldn't put it down" }))
        .send()
        .await
        .unwrap();
    assert_eq!(resp.status(), 200);
    let body: Value = resp.json().await.unwrap();
    assert_eq!(body["totalVotes"], 1);
    assert_eq!(body["meanRating"], 5.0);

    let resp = client
        .post(format!("{base}/review.remove"))
        .header("x-user-id", "99")
        .json(&json!({ "reviewId": body["reviewId"] }))
        .send()
        .await
        .unwrap();
    assert_eq!(resp.status(), 403);
}

#[tokio::test]
async fn missing_identity_is_401() {
    let base = start_server(Arc::new(handlers::service(App::in_memory()))).await;
    let resp = reqwest::Client::new()
        .post(format!("{base}/review.create"))
        .json(&json!({ "bookId": 3, "rating": 5, "comment": "Couldn't put it down" }))
        .send()
        .await
        .unwrap();
    assert_eq!(resp.status(), 401);
    let body: Value = resp.json().await.unwrap();
    assert!(body["error"].as_str().unwrap().starts_with("unauthorized"));
}

#[tokio::test]
async fn blocked_command_does_not_stall_other_requests() {
    use std::sync::mpsc;
    use std::sync::Mutex;
    use std::time::Duration;

    use bookshelf::microsvc::Context;

    let (entered_tx, entered_rx) = tokio::sync::oneshot::channel::<()>();
    let (release_tx, release_rx) = mpsc::channel::<()>();
    let entered = Mutex::new(Some(entered_tx));
    let release = Mutex::new(release_rx);

    let service = Service::new(()).command_guarded(
        "slow.wait",
        |_ctx: &Context<()>| true,
        move |_ctx: &Context<()>| {
            if let Some(tx) = entered.lock().unwrap().take() {
                let _ = tx.send(());
            }
            let outcome = match release.lock().unwrap().recv_timeout(Duration::from_secs(5)) {
                Ok(()) => "released",
                Err(_) => "timed out",
            };
            Ok(json!({ "outcome": outcome }))
        },
    );
    let base = start_server(Arc::new(service)).await;

    let slow = tokio::spawn({
        let base = base.clone();
        async move {
            reqwest::Client::new()
                .post(format!("{base}/slow.wait"))
                .json(&json!({}))
                .send()
                .await
                .unwrap()
                .json::<Value>()
                .await
                .unwrap()
        }
    });
    entered_rx.await.unwrap();

    let health = reqwest::get(format!("{base}/health")).await.unwrap();
    assert_eq!(health.status(), 200);
    release_tx.send(()).unwrap();

    let body = slow.await.unwrap();
    assert_eq!(body["outcome"], "released");
}
