use std::path::{Path, PathBuf};

use achievement_reports::assessment::Assessment;
use achievement_reports::config::ReportConfig;
use achievement_reports::normalize::build_students;
use achievement_reports::sheets::{self, OutputFormat};
use achievement_reports::summary::build_breakdown;
use achievement_reports::{generate_reports, telemetry, UnhandledPolicy};
use anyhow::Context;
use clap::{Parser, Subcommand};
use tracing::info;

#[derive(Parser)]
#[command(name = "achievement-reports")]
#[command(about = "Generate written achievement reports from assessment scores", long_about = None)]
struct Cli {
    /// Override the configured log level or filter
    #[arg(long, global = true)]
    log_level: Option<String>,
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Write one report per student
    Generate {
        #[arg(long)]
        setup: PathBuf,
        #[arg(long)]
        students: PathBuf,
        /// Directory for the output file; defaults to the students file's directory
        #[arg(long, short = 'd')]
        dir: Option<PathBuf>,
        #[arg(long, value_enum, default_value_t = OutputFormat::Csv)]
        format: OutputFormat,
        /// Leave out the type commentary instead of failing when no narrative fits
        #[arg(long)]
        omit_unhandled: bool,
    },
    /// Write a markdown breakdown of topic and type totals
    Breakdown {
        #[arg(long)]
        setup: PathBuf,
        #[arg(long)]
        students: PathBuf,
        #[arg(long, default_value = "breakdown.md")]
        out: PathBuf,
    },
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    let mut config = ReportConfig::load().context("failed to load configuration")?;

    if let Some(level) = cli.log_level {
        config.log_level = level;
    }
    telemetry::init(&config.log_level)?;

    match cli.command {
        Commands::Generate {
            setup,
            students,
            dir,
            format,
            omit_unhandled,
        } => {
            if omit_unhandled {
                config.unhandled_policy = UnhandledPolicy::Omit;
            }

            let setup_rows = sheets::read_setup(&setup)
                .with_context(|| format!("failed to read setup sheet {}", setup.display()))?;
            let student_rows = sheets::read_students(&students)
                .with_context(|| format!("failed to read students sheet {}", students.display()))?;

            let reports = generate_reports(&setup_rows, &student_rows, config.unhandled_policy)
                .context("failed to generate reports")?;

            let out_dir = dir
                .or(config.output_dir)
                .unwrap_or_else(|| parent_dir(&students));
            let out = out_dir.join(format.file_name());
            sheets::write_reports(&out, &reports, format)
                .with_context(|| format!("failed to write {}", out.display()))?;

            info!(reports = reports.len(), path = %out.display(), "reports written");
            println!("Wrote {} reports to {}.", reports.len(), out.display());
        }
        Commands::Breakdown {
            setup,
            students,
            out,
        } => {
            let setup_rows = sheets::read_setup(&setup)
                .with_context(|| format!("failed to read setup sheet {}", setup.display()))?;
            let student_rows = sheets::read_students(&students)
                .with_context(|| format!("failed to read students sheet {}", students.display()))?;

            let assessment = Assessment::from_setup(&setup_rows)?;
            let students = build_students(assessment.questions(), &student_rows)?;
            let breakdown = build_breakdown(&assessment, &students);

            std::fs::write(&out, breakdown)
                .with_context(|| format!("failed to write {}", out.display()))?;
            println!("Breakdown written to {}.", out.display());
        }
    }

    Ok(())
}

fn parent_dir(path: &Path) -> PathBuf {
    match path.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => parent.to_path_buf(),
        _ => PathBuf::from("."),
    }
}
