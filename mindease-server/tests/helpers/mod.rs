//! Shared test helpers: in-process fake providers and request utilities

#![allow(dead_code)]

use async_trait::async_trait;
use axum::body::Body;
use axum::http::{Request, Response};
use http_body_util::BodyExt;
use mindease_common::ChatMessage;
use mindease_server::providers::{
    ImageDescriber, ImageDescription, ProviderError, Providers, SentimentAnalyzer,
    SpeechRecognizer, TextGenerator,
};
use mindease_server::{build_router, AppState};
use serde_json::Value;
use std::sync::{Arc, Mutex};
use std::time::Duration;
use tower::ServiceExt;

/// Canned outcome for a fake provider call
#[derive(Debug, Clone)]
pub enum Reply {
    Ok(String),
    Unavailable,
    NoMatch,
}

impl Reply {
    fn to_result(&self) -> Result<String, ProviderError> {
        match self {
            Reply::Ok(value) => Ok(value.clone()),
            Reply::Unavailable => Err(ProviderError::ApiError(503, "fake outage".to_string())),
            Reply::NoMatch => Err(ProviderError::NoMatch("fake silence".to_string())),
        }
    }
}

pub struct FakeSentiment {
    pub reply: Mutex<Reply>,
    pub calls: Mutex<Vec<String>>,
}

#[async_trait]
impl SentimentAnalyzer for FakeSentiment {
    async fn analyze_sentiment(&self, text: &str) -> Result<String, ProviderError> {
        self.calls.lock().unwrap().push(text.to_string());
        self.reply.lock().unwrap().to_result()
    }
}

pub struct FakeSpeech {
    pub reply: Mutex<Reply>,
    /// (audio length, language) per call
    pub calls: Mutex<Vec<(usize, String)>>,
}

#[async_trait]
impl SpeechRecognizer for FakeSpeech {
    async fn recognize(&self, audio: &[u8], language: &str) -> Result<String, ProviderError> {
        self.calls
            .lock()
            .unwrap()
            .push((audio.len(), language.to_string()));
        self.reply.lock().unwrap().to_result()
    }
}

pub struct FakeVision {
    pub reply: Mutex<Reply>,
    pub face_count: usize,
    pub calls: Mutex<usize>,
}

#[async_trait]
impl ImageDescriber for FakeVision {
    async fn describe(&self, _image: &[u8]) -> Result<ImageDescription, ProviderError> {
        *self.calls.lock().unwrap() += 1;
        let caption = self.reply.lock().unwrap().to_result()?;
        Ok(ImageDescription {
            caption,
            face_count: self.face_count,
        })
    }
}

pub struct FakeText {
    pub reply: Mutex<Reply>,
    /// Full message list sent on each call
    pub calls: Mutex<Vec<Vec<ChatMessage>>>,
}

#[async_trait]
impl TextGenerator for FakeText {
    async fn generate(&self, messages: &[ChatMessage]) -> Result<String, ProviderError> {
        self.calls.lock().unwrap().push(messages.to_vec());
        self.reply.lock().unwrap().to_result()
    }
}

impl FakeText {
    pub fn last_call(&self) -> Vec<ChatMessage> {
        self.calls
            .lock()
            .unwrap()
            .last()
            .cloned()
            .expect("text generator was not called")
    }

    pub fn call_count(&self) -> usize {
        self.calls.lock().unwrap().len()
    }
}

/// Handles to every fake, for setting replies and inspecting calls
#[derive(Clone)]
pub struct Fakes {
    pub sentiment: Arc<FakeSentiment>,
    pub speech: Arc<FakeSpeech>,
    pub vision: Arc<FakeVision>,
    pub text: Arc<FakeText>,
}

impl Fakes {
    /// All providers succeed with plausible answers
    pub fn new() -> Self {
        Self {
            sentiment: Arc::new(FakeSentiment {
                reply: Mutex::new(Reply::Ok("positive".to_string())),
                calls: Mutex::new(Vec::new()),
            }),
            speech: Arc::new(FakeSpeech {
                reply: Mutex::new(Reply::Ok("I feel great today.".to_string())),
                calls: Mutex::new(Vec::new()),
            }),
            vision: Arc::new(FakeVision {
                reply: Mutex::new(Reply::Ok("a child laughing in a park".to_string())),
                face_count: 1,
                calls: Mutex::new(0),
            }),
            text: Arc::new(FakeText {
                reply: Mutex::new(Reply::Ok("Joy".to_string())),
                calls: Mutex::new(Vec::new()),
            }),
        }
    }

    pub fn set_sentiment(&self, reply: Reply) {
        *self.sentiment.reply.lock().unwrap() = reply;
    }

    pub fn set_speech(&self, reply: Reply) {
        *self.speech.reply.lock().unwrap() = reply;
    }

    pub fn set_vision(&self, reply: Reply) {
        *self.vision.reply.lock().unwrap() = reply;
    }

    pub fn set_text(&self, reply: Reply) {
        *self.text.reply.lock().unwrap() = reply;
    }

    pub fn providers(&self) -> Providers {
        Providers {
            sentiment: self.sentiment.clone(),
            speech: self.speech.clone(),
            vision: self.vision.clone(),
            text: self.text.clone(),
        }
    }

    pub fn app(&self) -> axum::Router {
        build_router(AppState::new(self.providers(), Duration::from_secs(600)))
    }
}

/// Minimal PNG signature followed by padding
pub fn png_bytes() -> Vec<u8> {
    let mut bytes = vec![0x89, b'P', b'N', b'G', 0x0D, 0x0A, 0x1A, 0x0A];
    bytes.extend_from_slice(&[0u8; 32]);
    bytes
}

/// Minimal JPEG/JFIF header followed by padding
pub fn jpeg_bytes() -> Vec<u8> {
    let mut bytes = vec![0xFF, 0xD8, 0xFF, 0xE0, 0x00, 0x10, b'J', b'F', b'I', b'F', 0x00];
    bytes.extend_from_slice(&[0u8; 32]);
    bytes
}

pub fn empty_request(method: &str, uri: &str) -> Request<Body> {
    Request::builder()
        .method(method)
        .uri(uri)
        .body(Body::empty())
        .unwrap()
}

pub fn json_request(method: &str, uri: &str, body: Value) -> Request<Body> {
    Request::builder()
        .method(method)
        .uri(uri)
        .header("content-type", "application/json")
        .body(Body::from(body.to_string()))
        .unwrap()
}

pub fn bytes_request(uri: &str, content_type: &str, body: Vec<u8>) -> Request<Body> {
    Request::builder()
        .method("POST")
        .uri(uri)
        .header("content-type", content_type)
        .body(Body::from(body))
        .unwrap()
}

/// Send one request through a clone of the router
pub async fn send(app: &axum::Router, request: Request<Body>) -> Response<Body> {
    app.clone().oneshot(request).await.unwrap()
}

pub async fn body_json(response: Response<Body>) -> Value {
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    serde_json::from_slice(&bytes).expect("response body should be JSON")
}

pub async fn body_text(response: Response<Body>) -> String {
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    String::from_utf8(bytes.to_vec()).expect("response body should be UTF-8")
}

/// Open a session and return its id
pub async fn open_session(app: &axum::Router) -> String {
    let response = send(app, empty_request("POST", "/api/sessions")).await;
    assert_eq!(response.status(), axum::http::StatusCode::CREATED);
    body_json(response).await["session_id"]
        .as_str()
        .expect("session_id should be a string")
        .to_string()
}
