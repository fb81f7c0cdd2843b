//! Run controller tying the workspace, the code preview and the console together.

use serde::{Deserialize, Serialize};

use crate::codegen;
use crate::simulator::{ECHO_PREFIX, ERROR_PREFIX, Simulator, SimulatorConfig};
use crate::workspace::Workspace;

/// Console message shown when there is nothing to run.
pub const NO_CODE_MESSAGE: &str = "❌ No code to run! Add some blocks to the workspace first.";
/// Console header of a run that completed without a fault.
pub const SUCCESS_MESSAGE: &str = "🎉 Code executed successfully!";

/// How the console styles a line.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ConsoleLineKind {
    Error,
    Echo,
    Output,
}

impl ConsoleLineKind {
    pub fn classify(line: &str) -> Self {
        if line.starts_with(ERROR_PREFIX.trim_end()) {
            ConsoleLineKind::Error
        } else if line.starts_with(ECHO_PREFIX) {
            ConsoleLineKind::Echo
        } else {
            ConsoleLineKind::Output
        }
    }
}

/// Why [`Studio::run_code`] did not start a run.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RunRejected {
    /// A run is already in flight.
    Busy,
}

#[derive(Debug, Clone, Default)]
pub struct Studio {
    pub workspace: Workspace,
    simulator: Simulator,
    console: Vec<String>,
    is_running: bool,
}

impl Studio {
    pub fn new(config: SimulatorConfig) -> Self {
        Self {
            simulator: Simulator::with_config(config),
            ..Default::default()
        }
    }

    pub fn with_workspace(workspace: Workspace, config: SimulatorConfig) -> Self {
        Self {
            workspace,
            ..Self::new(config)
        }
    }

    /// The program text as the preview pane shows it.
    pub fn code_preview(&self) -> String {
        codegen::synthesize(&self.workspace.blocks)
    }

    pub fn console(&self) -> &[String] {
        &self.console
    }

    pub fn is_running(&self) -> bool {
        self.is_running
    }

    pub fn clear_console(&mut self) {
        self.console.clear();
    }

    /// Synthesize and simulate the workspace, replacing the console contents.
    ///
    /// A faulted run shows the error line first, then whatever output was
    /// produced before the fault.
    pub fn run_code(&mut self) -> Result<&[String], RunRejected> {
        if self.is_running {
            return Err(RunRejected::Busy);
        }
        self.is_running = true;

        self.console = if self.workspace.is_empty() {
            vec![NO_CODE_MESSAGE.to_string()]
        } else {
            let source = codegen::synthesize(&self.workspace.blocks);
            let result = self.simulator.execute(&source);
            let header = result.error.unwrap_or_else(|| SUCCESS_MESSAGE.to_string());
            std::iter::once(header).chain(result.output).collect()
        };

        self.is_running = false;
        Ok(&self.console)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_classify() {
        assert_eq!(ConsoleLineKind::classify("ERROR: boom"), ConsoleLineKind::Error);
        assert_eq!(ConsoleLineKind::classify(">>> x"), ConsoleLineKind::Echo);
        assert_eq!(ConsoleLineKind::classify("5"), ConsoleLineKind::Output);
        assert_eq!(ConsoleLineKind::classify(">>>x"), ConsoleLineKind::Output);
    }

    #[test]
    fn test_busy_run_is_rejected() {
        let mut studio = Studio::default();
        studio.is_running = true;
        assert_eq!(studio.run_code(), Err(RunRejected::Busy));
        assert!(studio.console().is_empty());
    }

    #[test]
    fn test_empty_workspace_gives_advisory() {
        let mut studio = Studio::default();
        let console = studio.run_code().unwrap().to_vec();
        assert_eq!(console, vec![NO_CODE_MESSAGE.to_string()]);
        assert!(!studio.is_running());
    }
}
