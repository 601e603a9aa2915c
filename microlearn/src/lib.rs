//! MicroLearn
//!
//! Turns a topic into a short curriculum: a text-generation provider drafts
//! 3-5 modules, then a video-search provider attaches short clips to each.
//! Provider clients sit behind the `TextGenerator` and `VideoSearch` traits
//! and are injected into the generator and curator.

pub mod config;
pub mod curator;
pub mod error;
pub mod generator;
pub mod llm;
pub mod orchestrator;
pub mod server;
pub mod syllabus;
pub mod topic;
pub mod video;
pub mod youtube;

pub use config::{ConfigError, ServiceConfig};
pub use curator::{Curation, CurationOutcome, FallbackReason, VideoCurator};
pub use error::{CourseError, FailureKind, GenerationFailure, ValidationError};
pub use generator::SyllabusGenerator;
pub use llm::{OpenAiConfig, OpenAiTextGenerator, TextGenerator};
pub use orchestrator::CourseOrchestrator;
pub use server::{router, serve, AppState};
pub use syllabus::{Module, Syllabus};
pub use topic::{validate_topic, Topic};
pub use video::VideoId;
pub use youtube::{VideoSearch, YouTubeSearchClient};
