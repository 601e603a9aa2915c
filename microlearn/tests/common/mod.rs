#![allow(dead_code)]

use std::collections::HashMap;
use std::net::SocketAddr;
use std::sync::Arc;

use async_trait::async_trait;
use axum::Router;
use tokio::net::TcpListener;

use microlearn::error::{ProviderError, SearchError};
use microlearn::llm::{CompletionRequest, TextGenerator};
use microlearn::youtube::{SearchQuery, VideoSearch};

/// Serve `router` on an ephemeral local port for the rest of the test.
pub async fn spawn_server(router: Router) -> SocketAddr {
    let listener = TcpListener::bind("127.0.0.1:0")
        .await
        .expect("Failed to bind test server");
    let addr = listener.local_addr().expect("Failed to get server address");
    tokio::spawn(async move {
        axum::serve(listener, router).await.expect("Test server failed");
    });
    addr
}

pub enum GeneratorBehavior {
    Reply(String),
    Fail,
    Panic,
}

pub struct StubGenerator(pub GeneratorBehavior);

impl StubGenerator {
    pub fn replying(content: &str) -> Arc<Self> {
        Arc::new(Self(GeneratorBehavior::Reply(content.to_string())))
    }
}

#[async_trait]
impl TextGenerator for StubGenerator {
    async fn complete(&self, _request: &CompletionRequest) -> Result<String, ProviderError> {
        match &self.0 {
            GeneratorBehavior::Reply(content) => Ok(content.clone()),
            GeneratorBehavior::Fail => Err(ProviderError::Api {
                status_code: 401,
                message: "Incorrect API key provided: sk-secret".to_string(),
            }),
            GeneratorBehavior::Panic => panic!("Unexpected error"),
        }
    }

    fn model(&self) -> &str {
        "stub"
    }
}

/// Returns canned identifiers per full search query (term plus qualifier).
#[derive(Default)]
pub struct StubSearch {
    pub by_query: HashMap<String, Vec<String>>,
}

impl StubSearch {
    pub fn with(mut self, query: &str, ids: &[&str]) -> Self {
        self.by_query
            .insert(query.to_string(), ids.iter().map(|s| s.to_string()).collect());
        self
    }
}

#[async_trait]
impl VideoSearch for StubSearch {
    async fn search_short_videos(&self, query: &SearchQuery) -> Result<Vec<String>, SearchError> {
        Ok(self.by_query.get(&query.q).cloned().unwrap_or_default())
    }
}
