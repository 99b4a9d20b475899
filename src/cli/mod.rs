pub mod args;
pub mod runner;
pub mod script;

pub use args::{Cli, Commands, RunArgs};
pub use runner::{ScriptRunner, StepOutput, StepResult};
pub use script::{load_script, parse_script, Step};
