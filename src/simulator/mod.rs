//! Line simulator: "runs" synthesized source by recognizing statement shapes.
//!
//! This is not an interpreter. Every non-empty, non-comment line is matched
//! on its own against an ordered table of [`LineRule`]s; the first rule that
//! accepts the line produces its trace output. Loop and `if` bodies are never
//! executed as bodies. They are simply the following lines, each handled once
//! like any other line.
//!
//! A runtime fault stops the run. The output gathered so far is kept and the
//! fault becomes [`ExecutionResult::error`].

pub mod eval;
pub mod patterns;
pub mod value;

use anyhow::{Result, bail};
use serde::{Deserialize, Serialize};

pub use eval::{MAX_EXPRESSION_DEPTH, evaluate, evaluate_condition};
pub use value::{Value, Variables};

/// Prefix for echoed lines and simulated prompts.
pub const ECHO_PREFIX: &str = ">>> ";
/// Prefix of the error line reported for a faulted run.
pub const ERROR_PREFIX: &str = "ERROR: ";
/// Deepest list nesting `.append(...)` may build.
pub const MAX_LIST_DEPTH: usize = 64;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SimulatorConfig {
    /// Upper bound on the iterations a single `range(...)` header may produce.
    pub max_loop_iterations: u64,
    /// Upper bound on the values a single list may hold, nested ones included.
    pub max_list_items: usize,
    /// Answer printed after every simulated `input(...)` prompt.
    pub simulated_input: String,
}

impl Default for SimulatorConfig {
    fn default() -> Self {
        Self {
            max_loop_iterations: 10_000,
            max_list_items: 100_000,
            simulated_input: "Hello from the simulator!".to_string(),
        }
    }
}

/// Trace lines of one run, plus the error line if the run faulted.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ExecutionResult {
    pub output: Vec<String>,
    pub error: Option<String>,
}

impl ExecutionResult {
    pub fn is_ok(&self) -> bool {
        self.error.is_none()
    }
}

/// Outcome of a rule handler.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Step {
    Done,
    /// The line only looked like this statement; try the next rule.
    FallThrough,
}

type Handler = fn(&mut Simulator, &str, &mut Vec<String>) -> Result<Step>;

/// One entry of the dispatch table.
struct LineRule {
    name: &'static str,
    matches: fn(&str) -> bool,
    apply: Handler,
}

/// Dispatch table, highest precedence first. Shapes overlap (an assignment
/// may also contain `input(` or `.append(`), so the order matters.
const LINE_RULES: &[LineRule] = &[
    LineRule {
        name: "assignment",
        matches: |l| l.contains(" = ") && !l.contains("=="),
        apply: Simulator::assign,
    },
    LineRule {
        name: "print",
        matches: |l| l.starts_with("print(") && l.ends_with(')'),
        apply: Simulator::print,
    },
    LineRule {
        name: "input",
        matches: |l| l.contains("input("),
        apply: Simulator::input,
    },
    LineRule {
        name: "for-range",
        matches: |l| l.starts_with("for ") && l.contains(" in range("),
        apply: Simulator::for_range,
    },
    LineRule {
        name: "if",
        matches: |l| l.starts_with("if ") && l.ends_with(':'),
        apply: Simulator::if_header,
    },
    LineRule {
        name: "def",
        matches: |l| l.starts_with("def ") && l.ends_with(':'),
        apply: Simulator::def_header,
    },
    LineRule {
        name: "append",
        matches: |l| l.contains(".append("),
        apply: Simulator::append,
    },
    LineRule {
        name: "list-literal",
        matches: |l| l.starts_with('[') && l.ends_with(']'),
        apply: Simulator::list_literal,
    },
    LineRule {
        name: "echo",
        matches: |_| true,
        apply: Simulator::echo,
    },
];

/// The lines a run will look at: trimmed, without blanks or `#` comments.
pub fn program_lines(source: &str) -> impl Iterator<Item = &str> {
    source
        .lines()
        .map(str::trim)
        .filter(|l| !l.is_empty() && !l.starts_with('#'))
}

/// Reusable simulator. Each [`execute`](Simulator::execute) starts from an
/// empty variable table.
#[derive(Debug, Clone, Default)]
pub struct Simulator {
    config: SimulatorConfig,
    variables: Variables,
}

impl Simulator {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_config(config: SimulatorConfig) -> Self {
        Self {
            config,
            variables: Variables::new(),
        }
    }

    pub fn config(&self) -> &SimulatorConfig {
        &self.config
    }

    /// Forget every binding from the previous run.
    pub fn reset(&mut self) {
        self.variables.clear();
    }

    /// Simulate `source`, line by line.
    pub fn execute(&mut self, source: &str) -> ExecutionResult {
        self.reset();
        let mut output = Vec::new();
        for line in program_lines(source) {
            if let Err(err) = self.execute_line(line, &mut output) {
                return ExecutionResult {
                    output,
                    error: Some(format!("{}{:#}", ERROR_PREFIX, err)),
                };
            }
        }
        ExecutionResult {
            output,
            error: None,
        }
    }

    fn execute_line(&mut self, line: &str, out: &mut Vec<String>) -> Result<()> {
        for rule in LINE_RULES {
            if !(rule.matches)(line) {
                continue;
            }
            match (rule.apply)(self, line, out) {
                Ok(Step::Done) => return Ok(()),
                Ok(Step::FallThrough) => continue,
                Err(err) => return Err(err.context(format!("{} `{}`", rule.name, line))),
            }
        }
        // the echo rule accepts everything
        unreachable!("no rule accepted line `{}`", line)
    }

    fn eval(&self, expr: &str) -> Result<Value> {
        evaluate(expr, &self.variables)
    }

    // ── rule handlers ───────────────────────────────────────────────────

    fn assign(&mut self, line: &str, _out: &mut Vec<String>) -> Result<Step> {
        let Some((name, expr)) = line.split_once(" = ") else {
            return Ok(Step::FallThrough);
        };
        let value = self.eval(expr.trim())?;
        self.variables.insert(name.trim().to_string(), value);
        Ok(Step::Done)
    }

    fn print(&mut self, line: &str, out: &mut Vec<String>) -> Result<Step> {
        let inner = &line["print(".len()..line.len() - 1];
        out.push(self.eval(inner)?.to_string());
        Ok(Step::Done)
    }

    fn input(&mut self, line: &str, out: &mut Vec<String>) -> Result<Step> {
        let Some(prompt) = patterns::input_prompt(line) else {
            return Ok(Step::FallThrough);
        };
        out.push(format!("{}{}", ECHO_PREFIX, prompt));
        out.push(self.config.simulated_input.clone());
        Ok(Step::Done)
    }

    fn for_range(&mut self, line: &str, out: &mut Vec<String>) -> Result<Step> {
        let Some(header) = patterns::range_header(line) else {
            return Ok(Step::FallThrough);
        };
        let count = header.end.saturating_sub(header.start).max(0) as u64;
        if count > self.config.max_loop_iterations {
            bail!(
                "range({}, {}) would run {} times, more than the limit of {}",
                header.start,
                header.end,
                count,
                self.config.max_loop_iterations
            );
        }
        for i in header.start..header.end {
            self.variables
                .insert(header.var.to_string(), Value::Num(i as f64));
            out.push(format!("{} = {}", header.var, i));
        }
        Ok(Step::Done)
    }

    fn if_header(&mut self, line: &str, out: &mut Vec<String>) -> Result<Step> {
        let condition = &line["if ".len()..line.len() - 1];
        if evaluate_condition(condition, &self.variables)? {
            out.push(format!("Condition \"{}\" is true", condition));
        }
        Ok(Step::Done)
    }

    fn def_header(&mut self, line: &str, out: &mut Vec<String>) -> Result<Step> {
        let Some((name, params)) = patterns::def_header(line) else {
            return Ok(Step::FallThrough);
        };
        let params = if params.is_empty() { "none" } else { params };
        out.push(format!(
            "Function \"{}\" defined with parameters: {}",
            name, params
        ));
        Ok(Step::Done)
    }

    fn append(&mut self, line: &str, out: &mut Vec<String>) -> Result<Step> {
        let Some((name, item)) = patterns::append_call(line) else {
            return Ok(Step::FallThrough);
        };
        let needs_new_list = self.variables.get(name).is_none_or(|v| !v.is_truthy());
        if needs_new_list {
            self.variables.insert(name.to_string(), Value::List(Vec::new()));
        }
        let value = self.eval(item)?;
        let (item_count, item_depth) = value.measure();
        let message = format!("Added {} to {}", value, name);
        match self.variables.get_mut(name) {
            Some(Value::List(items)) => {
                let count: usize = 1 + items.iter().map(|v| v.measure().0).sum::<usize>();
                if count + item_count > self.config.max_list_items {
                    bail!(
                        "'{}' would hold more than {} values",
                        name,
                        self.config.max_list_items
                    );
                }
                if item_depth + 1 > MAX_LIST_DEPTH {
                    bail!("'{}' would nest lists more than {} deep", name, MAX_LIST_DEPTH);
                }
                items.push(value);
            }
            Some(other) => bail!("'{}' is a {}, not a list", name, other.type_name()),
            None => unreachable!("list was bound above"),
        }
        out.push(message);
        Ok(Step::Done)
    }

    fn list_literal(&mut self, line: &str, out: &mut Vec<String>) -> Result<Step> {
        let inner = &line[1..line.len() - 1];
        let items = inner
            .split(',')
            .map(|item| self.eval(item.trim()).map(|v| v.to_string()))
            .collect::<Result<Vec<_>>>()?;
        out.push(format!("List created: [{}]", items.join(", ")));
        Ok(Step::Done)
    }

    fn echo(&mut self, line: &str, out: &mut Vec<String>) -> Result<Step> {
        out.push(format!("{}{}", ECHO_PREFIX, line));
        Ok(Step::Done)
    }
}
