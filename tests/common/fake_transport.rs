//! Scripted transport: replays queued responses and records every request.

use backoffice_core::api::{ApiRequest, ApiResponse, Transport};
use backoffice_core::ApiError;
use std::collections::VecDeque;
use std::sync::{Arc, Mutex};

type SendHook = Arc<dyn Fn(&ApiRequest) + Send + Sync>;

#[derive(Clone, Default)]
pub struct FakeTransport {
    responses: Arc<Mutex<VecDeque<Result<ApiResponse, String>>>>,
    requests: Arc<Mutex<Vec<ApiRequest>>>,
    on_send: Arc<Mutex<Option<SendHook>>>,
}

impl FakeTransport {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn respond(&self, status: u16, body: &str) -> &Self {
        self.responses.lock().unwrap().push_back(Ok(ApiResponse {
            status,
            body: body.to_string(),
        }));
        self
    }

    pub fn fail_network(&self, message: &str) -> &Self {
        self.responses
            .lock()
            .unwrap()
            .push_back(Err(message.to_string()));
        self
    }

    /// Run `hook` while each request is "in flight", before its response is returned.
    pub fn on_send(&self, hook: impl Fn(&ApiRequest) + Send + Sync + 'static) {
        *self.on_send.lock().unwrap() = Some(Arc::new(hook));
    }

    pub fn requests(&self) -> Vec<ApiRequest> {
        self.requests.lock().unwrap().clone()
    }

    pub fn request_count(&self) -> usize {
        self.requests.lock().unwrap().len()
    }
}

impl Transport for FakeTransport {
    fn send(&self, request: ApiRequest) -> Result<ApiResponse, ApiError> {
        let hook = self.on_send.lock().unwrap().clone();
        if let Some(hook) = hook {
            hook(&request);
        }
        self.requests.lock().unwrap().push(request);
        match self.responses.lock().unwrap().pop_front() {
            Some(Ok(resp)) => Ok(resp),
            Some(Err(msg)) => Err(ApiError::Network(msg)),
            None => Err(ApiError::Network("no scripted response".to_string())),
        }
    }
}
