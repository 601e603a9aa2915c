//! Syllabus generation
//!
//! One prompt, one provider call, no retry. Every failure is reported as a
//! `GenerationFailure` so the orchestrator can collapse it into a single
//! user-facing error while the reason is still logged here.

use std::sync::Arc;
use std::time::Duration;

use tracing::{error, info, warn};

use crate::error::GenerationFailure;
use crate::llm::{CompletionRequest, TextGenerator};
use crate::syllabus::{Syllabus, MAX_MODULES, MIN_MODULES};
use crate::topic::Topic;

pub const GENERATION_TEMPERATURE: f64 = 0.7;
pub const DEFAULT_GENERATION_TIMEOUT: Duration = Duration::from_secs(30);

pub struct SyllabusGenerator {
    provider: Arc<dyn TextGenerator>,
    timeout: Duration,
}

impl SyllabusGenerator {
    pub fn new(provider: Arc<dyn TextGenerator>) -> Self {
        Self {
            provider,
            timeout: DEFAULT_GENERATION_TIMEOUT,
        }
    }

    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    pub async fn generate(&self, topic: &Topic) -> Result<Syllabus, GenerationFailure> {
        info!(
            "Generating syllabus for '{}' with model {}",
            topic,
            self.provider.model()
        );

        let request = CompletionRequest {
            prompt: build_prompt(topic),
            temperature: GENERATION_TEMPERATURE,
        };

        let content = match tokio::time::timeout(self.timeout, self.provider.complete(&request)).await {
            Ok(Ok(content)) => content,
            Ok(Err(e)) => {
                error!("Text generation provider error: {}", e);
                return Err(GenerationFailure::Provider(e));
            }
            Err(_) => {
                error!("Text generation timed out after {:?}", self.timeout);
                return Err(GenerationFailure::Timeout(self.timeout.as_secs()));
            }
        };

        let syllabus = parse_syllabus(&content).map_err(|e| {
            error!("Failed to parse generated syllabus: {}", e);
            e
        })?;

        if !syllabus.has_expected_module_count() {
            warn!(
                "Generated syllabus has {} modules, expected {}-{}",
                syllabus.modules.len(),
                MIN_MODULES,
                MAX_MODULES
            );
        }
        info!("Generated syllabus with {} modules", syllabus.modules.len());
        Ok(syllabus)
    }
}

/// Build the generation instruction. The topic is embedded as a JSON string
/// literal so quotes in it cannot break the example structure.
pub fn build_prompt(topic: &Topic) -> String {
    let topic_json = serde_json::Value::String(topic.as_str().to_string()).to_string();
    format!(
        r#"Create a micro-learning curriculum for: {topic}.
Return ONLY valid JSON. No markdown. No intro text.
Structure:
{{
    "topic": {topic},
    "modules": [
        {{ "id": 1, "title": "Short Title", "description": "One sentence summary", "search_term": "Optimized YouTube Shorts query" }}
    ]
}}
Limit to {min}-{max} modules. Make it beginner friendly."#,
        topic = topic_json,
        min = MIN_MODULES,
        max = MAX_MODULES,
    )
}

/// Remove code-fence markers by literal substring replacement, then trim.
pub fn strip_code_fence(content: &str) -> String {
    let stripped = if content.contains("```") {
        content.replace("```json", "").replace("```", "")
    } else {
        content.to_string()
    };
    stripped.trim().to_string()
}

pub fn parse_syllabus(content: &str) -> Result<Syllabus, GenerationFailure> {
    let cleaned = strip_code_fence(content);
    if cleaned.is_empty() {
        return Err(GenerationFailure::EmptyContent);
    }
    serde_json::from_str(&cleaned).map_err(GenerationFailure::MalformedContent)
}
