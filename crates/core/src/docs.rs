//! Models for the pre-built documentation index of Fantom's standard pods.
//!
//! The index is produced by an external build step and consumed read-only:
//! one flat pod index used for hover and completion lookup. The build step
//! also emits a nav-tree file next to it, but that one is rendered by the
//! editor client and never read here. Name matching is case-insensitive
//! throughout.

use crate::error::Result;
use serde::{Deserialize, Serialize};
use std::path::Path;

pub const DOCS_FILE: &str = "fantom-docs.json";

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PodDoc {
    pub name: String,
    #[serde(rename = "type")]
    pub kind: String,
    #[serde(default)]
    pub classes: Vec<ClassDoc>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ClassDoc {
    pub name: String,
    #[serde(rename = "type")]
    pub kind: String,
    #[serde(default)]
    pub facets: Vec<String>,
    #[serde(default)]
    pub methods: Vec<MethodDoc>,
    #[serde(default)]
    pub fields: Vec<FieldDoc>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MethodDoc {
    pub name: String,
    #[serde(rename = "type")]
    pub returns: String,
    #[serde(default)]
    pub params: Vec<ParamDoc>,
}

impl MethodDoc {
    pub fn signature(&self, owner: &str) -> String {
        let params = self
            .params
            .iter()
            .map(|p| format!("{} {}", p.kind, p.name))
            .collect::<Vec<_>>()
            .join(", ");
        format!("{} {}.{}({})", self.returns, owner, self.name, params)
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ParamDoc {
    pub name: String,
    #[serde(rename = "type")]
    pub kind: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FieldDoc {
    pub name: String,
    #[serde(rename = "type")]
    pub kind: String,
}

#[derive(Debug, Clone, Copy)]
pub enum SlotDoc<'a> {
    Method(&'a MethodDoc),
    Field(&'a FieldDoc),
}

pub struct SlotMatch<'a> {
    pub pod: &'a PodDoc,
    pub class: &'a ClassDoc,
    pub slot: SlotDoc<'a>,
}

/// Loaded flat documentation index.
#[derive(Debug, Clone, Default)]
pub struct DocIndex {
    pods: Vec<PodDoc>,
}

impl DocIndex {
    /// Read the flat index from `<dir>/fantom-docs.json`. Missing or
    /// malformed files surface as errors for the caller to log and degrade
    /// on; this never panics.
    pub fn load(dir: &Path) -> Result<Self> {
        let raw = std::fs::read_to_string(dir.join(DOCS_FILE))?;
        let pods: Vec<PodDoc> = serde_json::from_str(&raw)?;
        Ok(Self { pods })
    }

    pub fn from_pods(pods: Vec<PodDoc>) -> Self {
        Self { pods }
    }

    pub fn pods(&self) -> &[PodDoc] {
        &self.pods
    }

    pub fn is_empty(&self) -> bool {
        self.pods.is_empty()
    }

    pub fn find_class(&self, name: &str) -> Option<(&PodDoc, &ClassDoc)> {
        self.pods.iter().find_map(|pod| {
            pod.classes
                .iter()
                .find(|class| class.name.eq_ignore_ascii_case(name))
                .map(|class| (pod, class))
        })
    }

    /// First method or field anywhere in the index whose name matches.
    pub fn find_slot(&self, name: &str) -> Option<SlotMatch<'_>> {
        for pod in &self.pods {
            for class in &pod.classes {
                if let Some(method) = class
                    .methods
                    .iter()
                    .find(|m| m.name.eq_ignore_ascii_case(name))
                {
                    return Some(SlotMatch {
                        pod,
                        class,
                        slot: SlotDoc::Method(method),
                    });
                }
                if let Some(field) = class
                    .fields
                    .iter()
                    .find(|f| f.name.eq_ignore_ascii_case(name))
                {
                    return Some(SlotMatch {
                        pod,
                        class,
                        slot: SlotDoc::Field(field),
                    });
                }
            }
        }
        None
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::tempdir;

    const SAMPLE: &str = r#"[
        {
            "name": "sys",
            "type": "pod",
            "classes": [
                {
                    "name": "Str",
                    "type": "class",
                    "facets": ["@Serializable"],
                    "methods": [
                        {
                            "name": "upper",
                            "type": "Str",
                            "params": []
                        },
                        {
                            "name": "padl",
                            "type": "Str",
                            "params": [
                                { "name": "width", "type": "Int" },
                                { "name": "ch", "type": "Int" }
                            ]
                        }
                    ],
                    "fields": [
                        { "name": "defVal", "type": "Str" }
                    ]
                }
            ]
        }
    ]"#;

    fn sample_index() -> DocIndex {
        let pods: Vec<PodDoc> = serde_json::from_str(SAMPLE).expect("sample parses");
        DocIndex::from_pods(pods)
    }

    #[test]
    fn loads_from_directory() {
        let dir = tempdir().expect("tempdir");
        fs::write(dir.path().join(DOCS_FILE), SAMPLE).expect("write fixture");
        let index = DocIndex::load(dir.path()).expect("load index");
        assert_eq!(index.pods().len(), 1);
        assert_eq!(index.pods()[0].classes[0].facets, vec!["@Serializable"]);
    }

    #[test]
    fn missing_file_is_an_error_not_a_panic() {
        let dir = tempdir().expect("tempdir");
        assert!(DocIndex::load(dir.path()).is_err());
    }

    #[test]
    fn class_lookup_is_case_insensitive() {
        let index = sample_index();
        let (pod, class) = index.find_class("str").expect("found");
        assert_eq!(pod.name, "sys");
        assert_eq!(class.name, "Str");
        assert!(index.find_class("Missing").is_none());
    }

    #[test]
    fn slot_lookup_finds_methods_and_fields() {
        let index = sample_index();
        match index.find_slot("PADL").map(|m| m.slot) {
            Some(SlotDoc::Method(method)) => {
                assert_eq!(method.signature("Str"), "Str Str.padl(Int width, Int ch)");
            }
            _ => panic!("expected method match"),
        }
        assert!(matches!(
            index.find_slot("defval").map(|m| m.slot),
            Some(SlotDoc::Field(_))
        ));
    }
}
