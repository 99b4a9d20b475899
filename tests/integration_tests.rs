use anyhow::Result;
use std::io::Write;
use strqueue::cli::{load_script, ScriptRunner, StepOutput};
use strqueue::config::{Config, OutputFormat};
use strqueue::{QueueId, QueueRegistry};
use tempfile::NamedTempFile;

#[test]
fn test_registry_lifecycle() {
    let mut registry = QueueRegistry::new();
    let first = registry.create();
    let second = registry.create();

    registry.insert_at(first, 0, Some("b"));
    registry.insert_at(first, 0, Some("a"));
    registry.insert_at(second, 0, Some("a"));

    assert_eq!(registry.size(first), 2);
    assert_eq!(registry.get_at(first, 1), Some("b"));
    assert_eq!(registry.compare(second, first), -1);

    // the borrowed view must be copied before the next mutation
    let kept = registry.get_at(first, 0).map(str::to_owned);
    registry.clear(first);
    assert_eq!(kept.as_deref(), Some("a"));
    assert_eq!(registry.get_at(first, 0), None);
    assert_eq!(registry.compare(first, second), -1);

    registry.destroy(second);
    assert_eq!(registry.compare(first, second), 1);
    assert_eq!(registry.compare(second, QueueId(99)), 0);
    assert_eq!(registry.teardown(), 1);
}

#[test]
fn test_independent_registries() {
    let mut left = QueueRegistry::new();
    let mut right = QueueRegistry::new();

    let a = left.create();
    let b = right.create();
    assert_eq!(a, b);

    left.insert_at(a, 0, Some("only-left"));
    assert_eq!(left.size(a), 1);
    assert_eq!(right.size(b), 0);
}

#[tokio::test]
async fn test_run_script_file() -> Result<()> {
    let mut script = NamedTempFile::new()?;
    write!(
        script,
        r#"
- create: a
- create: b
- insert_at: {{ queue: a, position: 0, value: "a" }}
- insert_at: {{ queue: b, position: 0, value: "a" }}
- insert_at: {{ queue: b, position: 7, value: "b" }}
- compare: [a, b]
- remove_at: {{ queue: b, position: 1 }}
- compare: [a, b]
- destroy: a
- compare: [a, b]
"#
    )?;

    let steps = load_script(script.path()).await?;
    let mut runner = ScriptRunner::new(None);
    let results = runner.run(&steps);

    assert_eq!(results[5].result, StepOutput::Ordering(-1));
    assert_eq!(results[7].result, StepOutput::Ordering(0));
    assert_eq!(results[9].result, StepOutput::Ordering(-1));
    assert_eq!(runner.finish(), 1);
    Ok(())
}

#[tokio::test]
async fn test_traced_runner_matches_untraced() -> Result<()> {
    let mut config_file = NamedTempFile::new()?;
    write!(config_file, "trace:\n  enabled: true\n  level: trace\noutput:\n  format: json\n")?;
    let config = Config::from_file(config_file.path())?;
    assert_eq!(config.output.format, OutputFormat::Json);

    let mut script = NamedTempFile::new()?;
    write!(
        script,
        "- create: q\n- insert_at: {{ queue: q, position: 3 }}\n- insert_at: {{ queue: q, position: 3, value: z }}\n- get_at: {{ queue: q, position: 0 }}\n"
    )?;
    let steps = load_script(script.path()).await?;

    let traced = ScriptRunner::new(config.trace.observer()?).run(&steps);
    let plain = ScriptRunner::new(None).run(&steps);
    assert_eq!(traced, plain);
    assert_eq!(
        traced[3].render(config.output.format)?,
        r#"{"step":3,"op":"get_at","result":"z"}"#
    );
    Ok(())
}

#[test]
fn test_invalid_script_yaml() {
    let result = strqueue::cli::parse_script("invalid yaml content [");
    assert!(result.is_err());
    assert!(result.unwrap_err().to_string().contains("parse"));
}
