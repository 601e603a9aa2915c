use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::video::VideoId;

/// Number of modules requested from the generator. Not enforced on responses.
pub const MIN_MODULES: usize = 3;
pub const MAX_MODULES: usize = 5;

/// A generated curriculum: the topic plus its ordered modules.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Syllabus {
    pub topic: String,
    pub modules: Vec<Module>,
}

/// One curriculum unit. `videos` is empty until curation attaches them.
///
/// `id` is passed through as the generator wrote it (integer, float or string).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Module {
    #[serde(default)]
    pub id: Value,
    pub title: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub search_term: String,
    #[serde(default, skip_deserializing)]
    pub videos: Vec<VideoId>,
}

impl Syllabus {
    pub fn has_expected_module_count(&self) -> bool {
        (MIN_MODULES..=MAX_MODULES).contains(&self.modules.len())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_syllabus_deserialization_defaults() {
        let json_str = r#"{
            "topic": "Rust",
            "modules": [
                {"id": 1, "title": "M1", "search_term": "s1"},
                {"id": 2, "title": "M2", "videos": ["not-an-id"]}
            ]
        }"#;

        let syllabus: Syllabus = serde_json::from_str(json_str).unwrap();
        assert_eq!(syllabus.modules.len(), 2);
        assert_eq!(syllabus.modules[0].description, "");
        assert_eq!(syllabus.modules[0].search_term, "s1");
        assert_eq!(syllabus.modules[1].search_term, "");
        assert!(syllabus.modules[1].videos.is_empty());
        assert!(!syllabus.has_expected_module_count());
    }

    #[test]
    fn test_module_serialization_shape() {
        let module = Module {
            id: Value::from(1),
            title: "Basics".to_string(),
            description: "Intro".to_string(),
            search_term: "rust basics".to_string(),
            videos: vec![VideoId::primary_fallback()],
        };

        assert_eq!(
            serde_json::to_value(&module).unwrap(),
            serde_json::json!({
                "id": 1,
                "title": "Basics",
                "description": "Intro",
                "search_term": "rust basics",
                "videos": ["N20k-rV-iXQ"]
            })
        );
    }

    #[test]
    fn test_module_id_is_passed_through_verbatim() {
        let json_str = r#"{"topic": "T", "modules": [
            {"id": 1.0, "title": "Float"},
            {"id": "2", "title": "String"},
            {"title": "Missing"}
        ]}"#;

        let syllabus: Syllabus = serde_json::from_str(json_str).unwrap();
        assert_eq!(syllabus.modules[0].id, serde_json::json!(1.0));
        assert_eq!(syllabus.modules[1].id, "2");
        assert_eq!(syllabus.modules[2].id, Value::Null);

        let round: serde_json::Value = serde_json::to_value(&syllabus).unwrap();
        assert_eq!(round["modules"][0]["id"], serde_json::json!(1.0));
        assert_eq!(round["modules"][1]["id"], "2");
    }
}
