//! In-memory `JsonSource` for tests.

use std::collections::HashMap;
use std::sync::Mutex;

use async_trait::async_trait;
use serde_json::Value;

use crate::error::{AppError, Result};
use crate::utils::http::{JsonSource, Query};

enum Reply {
    Json(Value),
    Status(u16),
    Garbled,
}

/// Routes are keyed by URL, or by URL and `page` for paginated endpoints.
/// Unrouted requests answer 404.
#[derive(Default)]
pub struct StubSource {
    routes: HashMap<String, Reply>,
    calls: Mutex<Vec<(String, Query)>>,
}

impl StubSource {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn json(mut self, url: &str, body: Value) -> Self {
        self.routes.insert(url.to_string(), Reply::Json(body));
        self
    }

    pub fn page(mut self, url: &str, page: u32, body: Value) -> Self {
        self.routes.insert(page_key(url, page), Reply::Json(body));
        self
    }

    pub fn page_status(mut self, url: &str, page: u32, status: u16) -> Self {
        self.routes.insert(page_key(url, page), Reply::Status(status));
        self
    }

    pub fn status(mut self, url: &str, status: u16) -> Self {
        self.routes.insert(url.to_string(), Reply::Status(status));
        self
    }

    /// Answer with a body that is not JSON.
    pub fn garbled(mut self, url: &str) -> Self {
        self.routes.insert(url.to_string(), Reply::Garbled);
        self
    }

    pub fn calls(&self) -> Vec<(String, Query)> {
        self.calls.lock().unwrap().clone()
    }

    pub fn call_count(&self) -> usize {
        self.calls.lock().unwrap().len()
    }
}

fn page_key(url: &str, page: u32) -> String {
    format!("{url}#page={page}")
}

#[async_trait]
impl JsonSource for StubSource {
    async fn get_json(&self, url: &str, query: &Query) -> Result<Value> {
        self.calls
            .lock()
            .unwrap()
            .push((url.to_string(), query.clone()));

        let reply = query
            .get("page")
            .and_then(|page| self.routes.get(&format!("{url}#page={page}")))
            .or_else(|| self.routes.get(url));

        match reply {
            Some(Reply::Json(body)) => Ok(body.clone()),
            Some(Reply::Status(status)) => Err(AppError::status(url, *status)),
            Some(Reply::Garbled) => Ok(serde_json::from_str("<html>oops</html>")?),
            None => Err(AppError::status(url, 404)),
        }
    }
}
