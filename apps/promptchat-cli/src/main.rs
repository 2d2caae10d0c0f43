//! promptchat CLI
//!
//! Formats the built-in car article prompt and sends it to a chat completion
//! endpoint, printing the reply.

use anyhow::{Context, Result};
use clap::{Args, Parser, Subcommand};
use promptchat_core::{ChatConfig, ChatRuntime, Completion};
use promptchat_pm::{ChatPrompt, PromptEngine, PromptValues, builtin};
use std::path::{Path, PathBuf};
use tracing::{error, info};

/// promptchat - prompt templates to chat completion
///
/// Fills the system and user templates with placeholder values and asks the
/// model for an article.
#[derive(Parser)]
#[command(name = "promptchat", version, about, long_about = None)]
#[command(propagate_version = true)]
struct Cli {
    /// Subcommand to execute (defaults to `run`)
    #[command(subcommand)]
    command: Option<Commands>,

    /// Enable verbose logging
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Path to the TOML configuration file
    #[arg(short, long, global = true, default_value = ChatConfig::DEFAULT_FILE)]
    config: PathBuf,
}

/// Available promptchat commands
#[derive(Subcommand)]
enum Commands {
    /// Compose the prompt and request a completion
    Run(RunArgs),

    /// Print the placeholder names each template requires
    Vars,

    /// Print the composed conversation without contacting the provider
    Preview(ValueArgs),
}

/// Placeholder overrides
#[derive(Args, Default)]
struct ValueArgs {
    /// Placeholder value as NAME=VALUE (repeatable)
    #[arg(short, long = "set", value_name = "NAME=VALUE")]
    set: Vec<String>,
}

/// Options for the run command
#[derive(Args, Default)]
struct RunArgs {
    #[command(flatten)]
    values: ValueArgs,

    /// Model to request instead of the configured one
    #[arg(long)]
    model: Option<String>,

    /// Credential file to read instead of the configured one
    #[arg(long)]
    credential: Option<PathBuf>,
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    init_tracing(cli.verbose);

    if let Err(e) = run_command(cli.command, &cli.config) {
        error!("Command failed: {:#}", e);
        eprintln!("Error: {:#}", e);
        std::process::exit(1);
    }

    Ok(())
}

/// Initialize tracing subscriber for structured logging
fn init_tracing(verbose: bool) {
    use tracing_subscriber::{EnvFilter, fmt};

    let filter = if verbose {
        EnvFilter::new("promptchat_cli=debug,promptchat_core=debug,promptchat_pm=debug")
    } else {
        EnvFilter::new("promptchat_cli=info,promptchat_core=info,promptchat_pm=info")
    };

    fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .with_level(true)
        .init();
}

fn run_command(command: Option<Commands>, config_path: &Path) -> Result<()> {
    match command.unwrap_or_else(|| Commands::Run(RunArgs::default())) {
        Commands::Run(args) => run_chat(config_path, args),
        Commands::Vars => run_vars(),
        Commands::Preview(values) => run_preview(&values),
    }
}

/// Run the run command
fn run_chat(config_path: &Path, args: RunArgs) -> Result<()> {
    let mut config = ChatConfig::load(config_path).context("Failed to load configuration")?;
    if let Some(model) = args.model {
        config.model = model;
    }
    if let Some(credential) = args.credential {
        config.credential_path = credential;
    }
    config.validate().context("Invalid command line options")?;

    let prompt = load_prompt()?;
    print_input_variables(&prompt);

    let values = resolve_values(&args.values)?;
    let runtime = ChatRuntime::new(config, prompt);

    info!("Requesting completion from {}", runtime.config.model);
    let completion = runtime.run(&values).context("Chat completion failed")?;
    log_metadata(&completion);

    println!();
    println!("{completion}");

    Ok(())
}

/// Run the vars command
fn run_vars() -> Result<()> {
    let prompt = load_prompt()?;
    print_input_variables(&prompt);
    Ok(())
}

/// Run the preview command
fn run_preview(values: &ValueArgs) -> Result<()> {
    let prompt = load_prompt()?;
    let values = resolve_values(values)?;
    let conversation = prompt
        .format_messages(&values)
        .context("Failed to format prompt")?;

    println!("{conversation}");
    Ok(())
}

fn load_prompt() -> Result<ChatPrompt> {
    builtin::car_article_prompt().context("Failed to declare built-in templates")
}

/// Built-in defaults with `--set` overrides applied on top
fn resolve_values(args: &ValueArgs) -> Result<PromptValues> {
    let overrides =
        PromptValues::from_pairs(&args.set).context("Failed to parse --set values")?;
    let mut values = builtin::default_values();
    values.merge(overrides);
    Ok(values)
}

fn print_input_variables(prompt: &ChatPrompt) {
    for template in prompt.templates() {
        println!(
            "{}: [{}]",
            template.role(),
            template.input_variables().join(", ")
        );
    }
    println!("chat: [{}]", prompt.input_variables().join(", "));
}

fn log_metadata(completion: &Completion) {
    if let Some(model) = &completion.model {
        info!("Model: {}", model);
    }
    if let Some(reason) = &completion.finish_reason {
        info!("Finish reason: {}", reason);
    }
    if let Some(usage) = completion.usage {
        info!(
            "Tokens: {} prompt + {} completion = {}",
            usage.prompt_tokens, usage.completion_tokens, usage.total_tokens
        );
    }
}
