use std::path::{Path, PathBuf};

use anyhow::Result;
use clap::{Parser, Subcommand, ValueEnum};

use git_autover::analyzer::Classifier;
use git_autover::config;
use git_autover::engine;
use git_autover::git::{Git2Repository, Repository};
use git_autover::render;
use git_autover::templates;
use git_autover::ui;

const CONFIG_FILE_NAME: &str = "gitautover.toml";

#[derive(Parser)]
#[command(
    name = "git-autover",
    about = "Calculate the next semantic version from git history"
)]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Calculates the next version from the git repository
    Calculate {
        #[arg(long, default_value = ".", help = "Path to the git repository")]
        path: String,

        #[arg(long, value_enum, default_value_t = OutputFormat::Default)]
        output: OutputFormat,

        #[arg(short, long, help = "Branch to version instead of HEAD's branch")]
        branch: Option<String>,

        #[arg(short, long, help = "Custom configuration file path")]
        config: Option<String>,
    },
    /// Writes a starter configuration file for a workflow
    Init {
        #[arg(default_value = "GitFlow", help = "Workflow: GitFlow or GitHubFlow")]
        workflow: String,
    },
}

#[derive(ValueEnum, Clone, Copy, PartialEq, Eq)]
enum OutputFormat {
    Default,
    Json,
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    let result = match cli.command {
        Command::Calculate {
            path,
            output,
            branch,
            config,
        } => run_calculate(&path, output, branch.as_deref(), config.as_deref()),
        Command::Init { workflow } => run_init(&workflow),
    };

    if let Err(e) = result {
        ui::display_error(&e.to_string());
        std::process::exit(1);
    }

    Ok(())
}

fn run_calculate(
    path: &str,
    output: OutputFormat,
    branch: Option<&str>,
    config_path: Option<&str>,
) -> Result<()> {
    // Explicit --config wins; otherwise look next to the repository.
    let config_file: Option<PathBuf> = match config_path {
        Some(p) => Some(PathBuf::from(p)),
        None => {
            let candidate = Path::new(path).join(CONFIG_FILE_NAME);
            candidate.exists().then_some(candidate)
        }
    };
    let config = config::load_config(config_file.as_deref())?;

    let repo = Git2Repository::open(path)?;
    let branch_name = match branch {
        Some(b) => b.to_string(),
        None => repo.head_branch()?,
    };

    let (classifier, warnings) = Classifier::from_config(&config);
    for warning in &warnings {
        ui::display_warning(warning);
    }

    let calculation = engine::calculate_next_version(&repo, &config, &classifier, &branch_name)?;
    let variables = render::build_version_variables(&calculation, &branch_name, &config)?;

    match output {
        OutputFormat::Json => println!("{}", serde_json::to_string(&variables)?),
        OutputFormat::Default => {
            println!("Calculated next version: {}", variables.full_sem_ver)
        }
    }

    Ok(())
}

fn run_init(workflow: &str) -> Result<()> {
    if Path::new(CONFIG_FILE_NAME).exists() {
        ui::display_status(&format!("A '{}' file already exists.", CONFIG_FILE_NAME));
        return Ok(());
    }

    let template = templates::workflow_template(workflow).ok_or_else(|| {
        anyhow::anyhow!(
            "unknown workflow '{}' (expected one of: {})",
            workflow,
            templates::known_workflows().join(", ")
        )
    })?;

    std::fs::write(CONFIG_FILE_NAME, template)?;
    ui::display_success(&format!(
        "Created '{}' for workflow '{}'.",
        CONFIG_FILE_NAME, workflow
    ));

    Ok(())
}
