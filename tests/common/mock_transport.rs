use async_trait::async_trait;
use snake_client::network::{
    EndpointConfig, HttpRequest, HttpResponse, HttpTransport, TransportError,
};
use snake_client::GameClient;
use std::collections::VecDeque;
use std::sync::{Arc, Mutex};
use std::time::Duration;
use tokio::time::Instant;

pub const TEST_BASE_URL: &str = "http://game.test/api";

/// What the scripted transport does for one attempt
#[derive(Debug, Clone)]
pub enum Step {
    Respond(u16, Vec<u8>),
    Fail(TransportError),
    /// Never completes; only the caller's deadline ends it
    Hang,
}

impl Step {
    pub fn json(status: u16, body: serde_json::Value) -> Self {
        Step::Respond(status, body.to_string().into_bytes())
    }

    pub fn unreachable() -> Self {
        Step::Fail(TransportError::Unreachable("connection refused".into()))
    }
}

/// Transport that plays back a fixed script and records every attempt.
///
/// Once the script runs out, `fallback` is used for every further attempt.
pub struct ScriptedTransport {
    steps: Mutex<VecDeque<Step>>,
    fallback: Step,
    calls: Mutex<Vec<(Instant, HttpRequest)>>,
}

impl ScriptedTransport {
    pub fn new(steps: Vec<Step>, fallback: Step) -> Arc<Self> {
        Arc::new(Self {
            steps: Mutex::new(steps.into()),
            fallback,
            calls: Mutex::new(Vec::new()),
        })
    }

    pub fn always(step: Step) -> Arc<Self> {
        Self::new(Vec::new(), step)
    }

    pub fn call_count(&self) -> usize {
        self.calls.lock().unwrap().len()
    }

    pub fn requests(&self) -> Vec<HttpRequest> {
        self.calls
            .lock()
            .unwrap()
            .iter()
            .map(|(_, request)| request.clone())
            .collect()
    }

    /// Time between consecutive attempts
    pub fn gaps(&self) -> Vec<Duration> {
        let calls = self.calls.lock().unwrap();
        calls
            .windows(2)
            .map(|pair| pair[1].0.duration_since(pair[0].0))
            .collect()
    }
}

#[async_trait]
impl HttpTransport for ScriptedTransport {
    async fn send(&self, request: HttpRequest) -> Result<HttpResponse, TransportError> {
        self.calls.lock().unwrap().push((Instant::now(), request));
        let step = self
            .steps
            .lock()
            .unwrap()
            .pop_front()
            .unwrap_or_else(|| self.fallback.clone());

        match step {
            Step::Respond(status, body) => Ok(HttpResponse::new(status, body)),
            Step::Fail(err) => Err(err),
            Step::Hang => std::future::pending().await,
        }
    }
}

/// Client over a scripted transport
pub fn scripted_client(
    transport: &Arc<ScriptedTransport>,
    timeout: Duration,
    max_retries: u32,
) -> GameClient {
    let config = EndpointConfig::new(TEST_BASE_URL, timeout, max_retries);
    GameClient::with_transport(config, transport.clone())
}

/// Decode a recorded request body as JSON
pub fn body_json(request: &HttpRequest) -> serde_json::Value {
    let body = request.body.as_deref().expect("request has no body");
    serde_json::from_slice(body).expect("request body is not JSON")
}
