#![allow(dead_code)]

use std::{
    sync::{Arc, Mutex},
    time::Duration,
};

use async_trait::async_trait;
use axum::{
    Router,
    body::Body,
    http::{Request, Response},
};
use gurudev::{
    AppState,
    config::{Config, DatabaseConfig, EmailConfig, EnquiryConfig, LoggingConfig, ServerConfig},
};
use gurudev_enquiry::{ContactFormValues, EnquiryInput, InFlight, SubmitEnquiry};
use http_body_util::BodyExt;
use sqlx::SqlitePool;
use tokio::sync::Notify;
use tower::ServiceExt;

#[derive(Clone, Copy)]
pub enum Reply {
    Accept,
    Reject,
    /// Waits for [`Recorder::release`] before accepting.
    Hold,
}

/// Submission collaborator that records every call.
pub struct Recorder {
    reply: Reply,
    calls: Mutex<Vec<EnquiryInput>>,
    gate: Notify,
}

impl Recorder {
    pub fn new(reply: Reply) -> Arc<Self> {
        Arc::new(Self {
            reply,
            calls: Mutex::new(Vec::new()),
            gate: Notify::new(),
        })
    }

    pub fn calls(&self) -> Vec<EnquiryInput> {
        self.calls.lock().unwrap().clone()
    }

    pub fn release(&self) {
        self.gate.notify_one();
    }
}

#[async_trait]
impl SubmitEnquiry for Recorder {
    async fn submit(&self, input: &EnquiryInput) -> gurudev_shared::Result<String> {
        let call = {
            let mut calls = self.calls.lock().unwrap();
            calls.push(input.clone());
            calls.len()
        };

        match self.reply {
            Reply::Accept => Ok(format!("enquiry-{call}")),
            Reply::Reject => gurudev_shared::bail!("collaborator rejected enquiry"),
            Reply::Hold => {
                self.gate.notified().await;
                Ok(format!("enquiry-{call}"))
            }
        }
    }
}

pub struct TestApp {
    pub router: Router,
    pub in_flight: InFlight,
    pub pool: SqlitePool,
}

pub fn test_config() -> Config {
    Config {
        server: ServerConfig {
            host: "127.0.0.1".to_owned(),
            port: 3000,
        },
        database: DatabaseConfig {
            url: "sqlite::memory:".to_owned(),
            max_connections: 1,
        },
        email: EmailConfig {
            enabled: false,
            ..Default::default()
        },
        enquiry: EnquiryConfig {
            submit_timeout_secs: 5,
            toast_duration_ms: 2500,
        },
        logging: LoggingConfig::default(),
    }
}

pub async fn setup_test_app(submitter: Arc<dyn SubmitEnquiry>) -> anyhow::Result<TestApp> {
    let pool = SqlitePool::connect("sqlite::memory:").await?;
    let in_flight = InFlight::default();

    let router = gurudev::routes::router(AppState {
        config: test_config(),
        submitter,
        in_flight: in_flight.clone(),
        pool: pool.clone(),
    });

    Ok(TestApp {
        router,
        in_flight,
        pool,
    })
}

pub fn scenario_a() -> ContactFormValues {
    ContactFormValues {
        name: "Asha Rao".to_owned(),
        email: "asha.rao@gmail.com".to_owned(),
        phone: "9876543210".to_owned(),
        state: "Karnataka".to_owned(),
        pincode: "560001".to_owned(),
        message: String::new(),
    }
}

pub fn post_contact(values: &ContactFormValues, partial: bool) -> Request<Body> {
    let mut builder = Request::builder()
        .method("POST")
        .uri("/contact")
        .header("content-type", "application/x-www-form-urlencoded");

    if partial {
        builder = builder.header("ts-request", "true");
    }

    builder
        .body(Body::from(serde_urlencoded::to_string(values).unwrap()))
        .unwrap()
}

pub fn get(uri: &str) -> Request<Body> {
    Request::builder().uri(uri).body(Body::empty()).unwrap()
}

pub async fn send(app: &TestApp, request: Request<Body>) -> Response<Body> {
    app.router.clone().oneshot(request).await.unwrap()
}

pub async fn body_string(response: Response<Body>) -> String {
    let body = response.into_body().collect().await.unwrap().to_bytes();
    String::from_utf8(body.to_vec()).unwrap()
}

/// Polls until the in-flight registry holds `count` claims.
pub async fn wait_for_in_flight(in_flight: &InFlight, count: usize) {
    tokio::time::timeout(Duration::from_secs(5), async {
        while in_flight.len() != count {
            tokio::time::sleep(Duration::from_millis(5)).await;
        }
    })
    .await
    .expect("submission never reached the collaborator");
}
