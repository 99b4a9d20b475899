use super::script::Step;
use crate::config::OutputFormat;
use crate::queue::{create_registry, QueueId, TracedRegistry, TracingObserver};
use anyhow::Result;
use serde::Serialize;
use std::collections::HashMap;
use std::fmt;
use tracing::{debug, warn};

/// Handle used for aliases that were never created; the registry never issues it
pub const UNBOUND_HANDLE: QueueId = QueueId(u64::MAX);

/// Value produced by a single step
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(untagged)]
pub enum StepOutput {
    Handle(QueueId),
    Size(usize),
    Value(Option<String>),
    Ordering(i32),
    Done,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct StepResult {
    pub step: usize,
    pub op: &'static str,
    #[serde(skip)]
    pub label: String,
    pub result: StepOutput,
}

impl fmt::Display for StepResult {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.result {
            StepOutput::Handle(id) => write!(f, "{} = {}", self.label, id),
            StepOutput::Size(size) => write!(f, "{} = {}", self.label, size),
            StepOutput::Value(Some(value)) => write!(f, "{} = {:?}", self.label, value),
            StepOutput::Value(None) => write!(f, "{} = NULL", self.label),
            StepOutput::Ordering(ordering) => write!(f, "{} = {}", self.label, ordering),
            StepOutput::Done => write!(f, "{} done", self.label),
        }
    }
}

impl StepResult {
    /// Render one output line in the requested format
    pub fn render(&self, format: OutputFormat) -> Result<String> {
        match format {
            OutputFormat::Text => Ok(self.to_string()),
            OutputFormat::Json => Ok(serde_json::to_string(self)?),
        }
    }
}

/// Executes script steps against a private registry
pub struct ScriptRunner {
    registry: TracedRegistry,
    aliases: HashMap<String, QueueId>,
}

impl ScriptRunner {
    pub fn new(observer: Option<TracingObserver>) -> Self {
        Self {
            registry: create_registry(observer),
            aliases: HashMap::new(),
        }
    }

    pub fn registry(&self) -> &TracedRegistry {
        &self.registry
    }

    /// Run every step in order
    pub fn run(&mut self, steps: &[Step]) -> Vec<StepResult> {
        steps
            .iter()
            .enumerate()
            .map(|(index, step)| self.execute(index, step))
            .collect()
    }

    /// Run a single step; `index` is only used for reporting
    pub fn execute(&mut self, index: usize, step: &Step) -> StepResult {
        debug!("Executing step {}: {:?}", index, step);

        let result = match step {
            Step::Create(alias) => {
                let id = self.registry.create();
                if let Some(previous) = self.aliases.insert(alias.clone(), id) {
                    debug!("Alias {} rebound from queue {} to {}", alias, previous, id);
                }
                StepOutput::Handle(id)
            }
            Step::Destroy(alias) => {
                let id = self.resolve(alias);
                self.registry.destroy(id);
                StepOutput::Done
            }
            Step::Size(alias) => StepOutput::Size(self.registry.size(self.resolve(alias))),
            Step::InsertAt {
                queue,
                position,
                value,
            } => {
                let id = self.resolve(queue);
                self.registry.insert_at(id, *position, value.as_deref());
                StepOutput::Done
            }
            Step::RemoveAt { queue, position } => {
                let id = self.resolve(queue);
                self.registry.remove_at(id, *position);
                StepOutput::Done
            }
            Step::GetAt { queue, position } => {
                let id = self.resolve(queue);
                StepOutput::Value(self.registry.get_at(id, *position).map(str::to_string))
            }
            Step::Clear(alias) => {
                let id = self.resolve(alias);
                self.registry.clear(id);
                StepOutput::Done
            }
            Step::Compare(first, second) => {
                let (first, second) = (self.resolve(first), self.resolve(second));
                StepOutput::Ordering(self.registry.compare(first, second))
            }
        };

        StepResult {
            step: index,
            op: step.operation().as_str(),
            label: step.label(),
            result,
        }
    }

    /// Tear the registry down, returning how many queues were still live
    pub fn finish(self) -> usize {
        self.registry.teardown()
    }

    fn resolve(&self, alias: &str) -> QueueId {
        match self.aliases.get(alias) {
            Some(id) => *id,
            None => {
                warn!("Queue alias '{}' was never created", alias);
                UNBOUND_HANDLE
            }
        }
    }
}
