use anyhow::{Context, Result};
use blockstudio::catalog::block_catalog_by_category;
use blockstudio::codegen;
use blockstudio::model::WorkspaceDoc;
use blockstudio::simulator::{ExecutionResult, Simulator, SimulatorConfig};
use blockstudio::studio::Studio;
use camino::{Utf8Path, Utf8PathBuf};
use clap::{Args, Parser, Subcommand};

#[derive(Parser, Debug)]
#[command(author, version, about = "Generate and simulate programs built from code blocks", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// List the block templates grouped by category
    Catalog,
    /// Print the program text synthesized from a workspace file
    Generate {
        /// Workspace file (`.bsw` binary, anything else JSON)
        #[arg(value_name = "WORKSPACE")]
        workspace: Utf8PathBuf,
    },
    /// Synthesize a workspace and simulate it
    Run {
        #[arg(value_name = "WORKSPACE")]
        workspace: Utf8PathBuf,
        #[command(flatten)]
        sim: SimArgs,
    },
    /// Simulate a source file directly
    Exec {
        #[arg(value_name = "SOURCE")]
        source: Utf8PathBuf,
        #[command(flatten)]
        sim: SimArgs,
    },
    /// Convert a workspace file between JSON and binary
    Convert {
        #[arg(value_name = "INPUT")]
        input: Utf8PathBuf,
        #[arg(value_name = "OUTPUT")]
        output: Utf8PathBuf,
    },
}

#[derive(Args, Debug)]
struct SimArgs {
    /// Print the raw execution result as JSON
    #[arg(long)]
    json: bool,
    /// Maximum iterations a single range() header may produce
    #[arg(long = "max-iterations")]
    max_iterations: Option<u64>,
    /// Answer printed after every simulated input() prompt
    #[arg(long = "input-answer")]
    input_answer: Option<String>,
}

impl SimArgs {
    fn config(&self) -> SimulatorConfig {
        let mut config = SimulatorConfig::default();
        if let Some(n) = self.max_iterations {
            config.max_loop_iterations = n;
        }
        if let Some(answer) = &self.input_answer {
            config.simulated_input = answer.clone();
        }
        config
    }
}

fn is_binary(path: &Utf8Path) -> bool {
    path.extension() == Some("bsw")
}

fn load_workspace(path: &Utf8Path) -> Result<WorkspaceDoc> {
    let doc = if is_binary(path) {
        WorkspaceDoc::load_from_binary(path)
    } else {
        WorkspaceDoc::load_from_json(path)
    }
    .with_context(|| format!("Failed to load workspace {}", path))?;

    for block in &doc.workspace.blocks {
        let unmatched = block.unmatched_placeholders();
        if !unmatched.is_empty() {
            eprintln!(
                "[blockstudio] Warning: block '{}' ({}) has placeholders with no input: {}",
                block.label,
                block.id,
                unmatched.join(", ")
            );
        }
    }
    Ok(doc)
}

fn print_result(result: &ExecutionResult) -> Result<()> {
    println!("{}", serde_json::to_string_pretty(result)?);
    Ok(())
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    match cli.command {
        Command::Catalog => {
            for group in block_catalog_by_category() {
                println!("{} [{}]", group.category.display_name(), group.category.color());
                for t in &group.templates {
                    let template = t.template.as_deref().unwrap_or("").replace('\n', "\\n");
                    println!("  {:<16} {:<16} {}", t.block_type, t.label, template);
                }
            }
        }
        Command::Generate { workspace } => {
            let doc = load_workspace(&workspace)?;
            println!("{}", codegen::synthesize(&doc.workspace.blocks));
        }
        Command::Run { workspace, sim } => {
            let doc = load_workspace(&workspace)?;
            if sim.json {
                let source = codegen::synthesize(&doc.workspace.blocks);
                let result = Simulator::with_config(sim.config()).execute(&source);
                print_result(&result)?;
            } else {
                let mut studio = Studio::with_workspace(doc.workspace, sim.config());
                let console = studio
                    .run_code()
                    .map_err(|e| anyhow::anyhow!("run rejected: {:?}", e))?;
                for line in console {
                    println!("{}", line);
                }
            }
        }
        Command::Exec { source, sim } => {
            let text = std::fs::read_to_string(&source)
                .with_context(|| format!("Open {}", source))?;
            let result = Simulator::with_config(sim.config()).execute(&text);
            if sim.json {
                print_result(&result)?;
            } else {
                for line in result.error.iter().chain(&result.output) {
                    println!("{}", line);
                }
            }
        }
        Command::Convert { input, output } => {
            let doc = load_workspace(&input)?;
            if is_binary(&output) {
                doc.save_to_binary(&output)
            } else {
                doc.save_to_json(&output)
            }
            .with_context(|| format!("Failed to write {}", output))?;
            eprintln!(
                "[blockstudio] Wrote {} block(s) to {}",
                doc.workspace.blocks.len(),
                output
            );
        }
    }
    Ok(())
}
