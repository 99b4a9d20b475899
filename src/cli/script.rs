//! YAML scripts of registry operations
//!
//! Queues are referred to by alias; `create` binds an alias to a fresh handle.

use crate::queue::Operation;
use anyhow::{Context, Result};
use serde::Deserialize;
use std::path::Path;
use tokio::fs;
use tracing::{debug, info};

#[derive(Debug, Deserialize, Clone, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum Step {
    Create(String),
    Destroy(String),
    Size(String),
    InsertAt {
        queue: String,
        position: usize,
        /// Missing value exercises the null-argument path
        #[serde(default)]
        value: Option<String>,
    },
    RemoveAt {
        queue: String,
        position: usize,
    },
    GetAt {
        queue: String,
        position: usize,
    },
    Clear(String),
    Compare(String, String),
}

impl Step {
    pub fn operation(&self) -> Operation {
        match self {
            Step::Create(_) => Operation::Create,
            Step::Destroy(_) => Operation::Destroy,
            Step::Size(_) => Operation::Size,
            Step::InsertAt { .. } => Operation::InsertAt,
            Step::RemoveAt { .. } => Operation::RemoveAt,
            Step::GetAt { .. } => Operation::GetAt,
            Step::Clear(_) => Operation::Clear,
            Step::Compare(..) => Operation::Compare,
        }
    }

    /// Call-style label used in text output, e.g. `get_at(a, 0)`
    pub fn label(&self) -> String {
        let args = match self {
            Step::Create(queue) | Step::Destroy(queue) | Step::Size(queue) | Step::Clear(queue) => {
                queue.clone()
            }
            Step::InsertAt {
                queue,
                position,
                value,
            } => match value {
                Some(value) => format!("{}, {}, {:?}", queue, position, value),
                None => format!("{}, {}, NULL", queue, position),
            },
            Step::RemoveAt { queue, position } | Step::GetAt { queue, position } => {
                format!("{}, {}", queue, position)
            }
            Step::Compare(first, second) => format!("{}, {}", first, second),
        };
        format!("{}({})", self.operation(), args)
    }
}

/// Parse a script from YAML text
///
/// Steps are single-key maps (`- create: a`) rather than YAML tags.
pub fn parse_script(content: &str) -> Result<Vec<Step>> {
    let deserializer = serde_yaml::Deserializer::from_str(content);
    serde_yaml::with::singleton_map_recursive::deserialize(deserializer)
        .with_context(|| "Failed to parse YAML script")
}

/// Load a script file
pub async fn load_script(path: &Path) -> Result<Vec<Step>> {
    debug!("Loading script from: {}", path.display());

    let content = fs::read_to_string(path)
        .await
        .with_context(|| format!("Failed to read script file: {}", path.display()))?;
    let steps = parse_script(&content)?;

    info!("Loaded {} steps from: {}", steps.len(), path.display());
    Ok(steps)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::NamedTempFile;

    #[test]
    fn test_parse_all_steps() {
        let yaml = r#"
- create: a
- insert_at: { queue: a, position: 0, value: "x" }
- insert_at: { queue: a, position: 9 }
- remove_at: { queue: a, position: 0 }
- get_at: { queue: a, position: 0 }
- size: a
- clear: a
- compare: [a, b]
- destroy: a
"#;
        let steps = parse_script(yaml).unwrap();
        assert_eq!(steps.len(), 9);
        assert_eq!(steps[0], Step::Create("a".to_string()));
        assert_eq!(
            steps[1],
            Step::InsertAt {
                queue: "a".to_string(),
                position: 0,
                value: Some("x".to_string()),
            }
        );
        assert_eq!(
            steps[2],
            Step::InsertAt {
                queue: "a".to_string(),
                position: 9,
                value: None,
            }
        );
        assert_eq!(steps[7], Step::Compare("a".to_string(), "b".to_string()));
        assert_eq!(steps[8].operation(), Operation::Destroy);
    }

    #[test]
    fn test_labels() {
        let insert = Step::InsertAt {
            queue: "a".to_string(),
            position: 2,
            value: None,
        };
        assert_eq!(insert.label(), "insert_at(a, 2, NULL)");
        assert_eq!(
            Step::Compare("a".to_string(), "b".to_string()).label(),
            "compare(a, b)"
        );
        assert_eq!(Step::Size("q".to_string()).label(), "size(q)");
    }

    #[test]
    fn test_each_step_form_parses_alone() {
        let cases = [
            ("- create: a", Step::Create("a".into())),
            ("- destroy: a", Step::Destroy("a".into())),
            ("- size: a", Step::Size("a".into())),
            ("- clear: a", Step::Clear("a".into())),
            ("- compare: [a, b]", Step::Compare("a".into(), "b".into())),
            (
                "- insert_at: { queue: a, position: 0, value: x }",
                Step::InsertAt {
                    queue: "a".into(),
                    position: 0,
                    value: Some("x".into()),
                },
            ),
            (
                "- remove_at: { queue: a, position: 3 }",
                Step::RemoveAt {
                    queue: "a".into(),
                    position: 3,
                },
            ),
            (
                "- get_at:\n    queue: a\n    position: 1\n",
                Step::GetAt {
                    queue: "a".into(),
                    position: 1,
                },
            ),
        ];

        for (yaml, expected) in cases {
            let steps = parse_script(yaml).unwrap_or_else(|e| panic!("{}: {:#}", yaml, e));
            assert_eq!(steps, vec![expected]);
        }
    }

    #[test]
    fn test_label_escapes_value() {
        let insert = Step::InsertAt {
            queue: "a".to_string(),
            position: 0,
            value: Some("say \"hi\"\nbye".to_string()),
        };
        assert_eq!(insert.label(), r#"insert_at(a, 0, "say \"hi\"\nbye")"#);
    }

    #[test]
    fn test_unknown_step() {
        let result = parse_script("- push: a");
        assert!(result.is_err());
        assert!(result.unwrap_err().to_string().contains("parse"));
    }

    #[tokio::test]
    async fn test_load_script_file() {
        let mut file = NamedTempFile::new().unwrap();
        write!(file, "- create: q\n- size: q\n").unwrap();

        let steps = load_script(file.path()).await.unwrap();
        assert_eq!(steps, vec![Step::Create("q".into()), Step::Size("q".into())]);
    }

    #[tokio::test]
    async fn test_load_missing_script() {
        let result = load_script(Path::new("nonexistent-script.yaml")).await;
        assert!(result
            .unwrap_err()
            .to_string()
            .contains("Failed to read script file"));
    }
}
