use async_trait::async_trait;
use serde_json::Value;
use std::sync::{Arc, Mutex};
use vision_proxy::{
    Error, Result,
    gemini::{GenerateContentRequest, UpstreamReply, VisionClient},
};

/// Mock upstream client for testing
#[derive(Debug)]
pub struct MockVisionClient {
    pub replies: Arc<Mutex<Vec<UpstreamReply>>>,
    pub requests: Arc<Mutex<Vec<GenerateContentRequest>>>,
    pub error: Option<(Option<u16>, String)>,
    pub panic_on_call: bool,
}

impl MockVisionClient {
    pub fn new() -> Self {
        Self {
            replies: Arc::new(Mutex::new(Vec::new())),
            requests: Arc::new(Mutex::new(Vec::new())),
            error: None,
            panic_on_call: false,
        }
    }

    pub fn with_body(self, body: Value) -> Self {
        self.replies
            .lock()
            .unwrap()
            .push(UpstreamReply { status: 200, body });
        self
    }

    pub fn with_error(mut self, status: Option<u16>, message: &str) -> Self {
        self.error = Some((status, message.to_string()));
        self
    }

    pub fn panicking(mut self) -> Self {
        self.panic_on_call = true;
        self
    }

    pub fn get_requests(&self) -> Vec<GenerateContentRequest> {
        self.requests.lock().unwrap().clone()
    }

    pub fn call_count(&self) -> usize {
        self.requests.lock().unwrap().len()
    }
}

#[async_trait]
impl VisionClient for MockVisionClient {
    async fn generate_content(&self, request: &GenerateContentRequest) -> Result<UpstreamReply> {
        self.requests.lock().unwrap().push(request.clone());

        if self.panic_on_call {
            panic!("mock upstream exploded");
        }

        if let Some((status, ref message)) = self.error {
            return Err(Error::upstream(status, message.clone(), None));
        }

        let mut replies = self.replies.lock().unwrap();
        if replies.is_empty() {
            return Err(Error::internal("No more mock replies available"));
        }

        Ok(replies.remove(0))
    }
}

impl Default for MockVisionClient {
    fn default() -> Self {
        Self::new()
    }
}
