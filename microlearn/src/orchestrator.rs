//! Request orchestration: validate, generate, curate.

use std::sync::Arc;

use futures::future::join_all;
use tracing::{error, info};

use crate::curator::{CurationOutcome, VideoCurator};
use crate::error::CourseError;
use crate::generator::SyllabusGenerator;
use crate::syllabus::Syllabus;
use crate::topic::validate_topic;

pub struct CourseOrchestrator {
    generator: SyllabusGenerator,
    curator: VideoCurator,
}

impl CourseOrchestrator {
    pub fn new(generator: SyllabusGenerator, curator: VideoCurator) -> Self {
        Self { generator, curator }
    }

    /// Build a course for `raw_topic`.
    ///
    /// Curation runs concurrently across modules; the returned modules keep
    /// the order the generator produced.
    pub async fn handle(&self, raw_topic: Option<&str>) -> Result<Syllabus, CourseError> {
        let topic = validate_topic(raw_topic)?;
        let mut syllabus = self.generator.generate(&topic).await?;

        let curations = join_all(
            syllabus
                .modules
                .iter()
                .map(|module| self.curator.curate(&module.search_term)),
        )
        .await;

        let mut fallbacks = 0usize;
        for (module, curation) in syllabus.modules.iter_mut().zip(curations) {
            if let CurationOutcome::Fallback(reason) = &curation.outcome {
                fallbacks += 1;
                info!("Module {} '{}' uses fallback videos: {:?}", module.id, module.title, reason);
            }
            module.videos = curation.videos;
        }

        info!(
            "Course for '{}' ready: {} modules, {} with fallback videos",
            topic,
            syllabus.modules.len(),
            fallbacks
        );
        Ok(syllabus)
    }

    /// Like [`handle`](Self::handle), but runs on its own task so a panic in a
    /// provider or in curation becomes `CourseError::Unexpected` instead of
    /// tearing down the connection.
    pub async fn handle_guarded(self: &Arc<Self>, raw_topic: Option<String>) -> Result<Syllabus, CourseError> {
        let orchestrator = Arc::clone(self);
        let task = tokio::spawn(async move { orchestrator.handle(raw_topic.as_deref()).await });

        match task.await {
            Ok(result) => result,
            Err(join_error) => {
                error!("Course generation task failed: {}", join_error);
                Err(CourseError::Unexpected(join_error.to_string()))
            }
        }
    }
}
