//! evalbatch CLI: run an evaluation task over every input in a YAML list.
//!
//! Configuration comes from the environment (see `evalbatch::config`):
//! `INPUT_PATH` is required, `OUTPUT_PATH`, `CONCURRENCY` and
//! `RUNNER_CONFIG` are optional.

use anyhow::Context;
use clap::{Parser, Subcommand};
use evalbatch::config::Config;
use evalbatch::engine::BatchExecutor;
use evalbatch::event::ProgressEvent;
use evalbatch::input::load_inputs;
use evalbatch::model::{BatchRequest, TaskSpec};
use evalbatch::output::write_jsonl;
use evalbatch::plan::Plan;
use evalbatch::runner::{CommandRunner, RunnerConfig};
use evalbatch::telemetry::{TelemetryConfig, init_telemetry};

#[derive(Parser)]
#[command(name = "evalbatch", about = "Run an evaluation task over a batch of inputs")]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Run the task once per input and write the results as JSONL
    Run {
        /// Task to run, with or without the configured prefix
        task_name: String,
        /// Positional arguments passed to every invocation
        task_args: Vec<String>,
    },
    /// Show what `run` would invoke without running anything
    Plan {
        /// Task to run, with or without the configured prefix
        task_name: String,
        /// Positional arguments passed to every invocation
        task_args: Vec<String>,
    },
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();
    let cli = Cli::parse();
    let config = Config::from_env()?;

    match cli.command {
        Command::Run {
            task_name,
            task_args,
        } => cmd_run(&config, TaskSpec::new(task_name).args(task_args)).await,
        Command::Plan {
            task_name,
            task_args,
        } => cmd_plan(&config, TaskSpec::new(task_name).args(task_args)),
    }
}

async fn cmd_run(config: &Config, task: TaskSpec) -> anyhow::Result<()> {
    let _guard = init_telemetry(TelemetryConfig {
        endpoint: config.otel_endpoint.clone(),
        service_name: "evalbatch".to_string(),
        log_level: config.log_level.clone(),
    })?;

    let runner_config = RunnerConfig::load_or_default(config.runner_config.as_deref())?;
    let noise = runner_config.noise_filter()?;

    eprintln!("Running with a concurrency of {}", config.concurrency);

    let inputs = load_inputs(&config.input_path)?;
    let request = BatchRequest::new(inputs, task, config.concurrency)?;
    let executor = BatchExecutor::new(CommandRunner::new(runner_config), noise);

    let results = executor
        .run(request, Some(Box::new(report_progress)))
        .await?;

    write_jsonl(&results, config.output_path.as_deref())
        .context("failed to write batch results")?;
    if let Some(ref path) = config.output_path {
        eprintln!("Written to {}", path.display());
    }

    Ok(())
}

fn report_progress(event: ProgressEvent) {
    for warning in &event.new_warnings {
        eprintln!("{warning}");
    }
    eprintln!("{event}");
}

fn cmd_plan(config: &Config, task: TaskSpec) -> anyhow::Result<()> {
    let runner_config = RunnerConfig::load_or_default(config.runner_config.as_deref())?;
    let runner = CommandRunner::new(runner_config);
    let inputs = load_inputs(&config.input_path)?;

    println!("{}", Plan::new(&runner, &task, inputs.len(), config.concurrency));
    Ok(())
}
