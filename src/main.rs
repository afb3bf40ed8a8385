use clap::Parser;
use std::path::PathBuf;
use std::time::Instant;
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

use arch_wiki_lint::output::{self, JsonReport};
use arch_wiki_lint::pages::{self, Target};
use arch_wiki_lint::scoring::{self, ImportanceTier, ProfileTable, ValidationResult};
use arch_wiki_lint::structure::{self, ScaleTier, StructureReport};

const EXIT_SUCCESS: i32 = 0;
const EXIT_QUALITY: i32 = 1;
const EXIT_TARGET: i32 = 2;
const EXIT_REPORT: i32 = 3;
const EXIT_CONFIG: i32 = 4;

#[derive(Parser, Debug)]
#[command(name = "arch-wiki-lint")]
#[command(about = "Grade architecture wiki pages against quality rubrics", long_about = None)]
#[command(version)]
struct Cli {
    /// Markdown page, or a wiki directory of *.md pages
    target: PathBuf,

    /// Importance tier of a single page (inferred from the file name if omitted)
    #[arg(long, value_enum)]
    importance: Option<ImportanceTier>,

    /// Wiki scale for directory validation (inferred from the page count if omitted)
    #[arg(long, value_enum)]
    scale: Option<ScaleTier>,

    /// Path to config file (defaults to ~/.config/arch-wiki-lint/config.yaml)
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Print a JSON report instead of text
    #[arg(long)]
    json: bool,

    /// Also write the JSON report to this file
    #[arg(long)]
    report: Option<PathBuf>,

    /// Enable verbose logging and per-criterion breakdowns
    #[arg(short, long)]
    verbose: bool,
}

fn init_logging(verbose: bool) {
    let default_level = if verbose { "debug" } else { "warn" };
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));
    tracing_subscriber::registry()
        .with(fmt::layer().with_writer(std::io::stderr))
        .with(filter)
        .init();
}

fn main() {
    let cli = Cli::parse();
    init_logging(cli.verbose);
    let start_time = Instant::now();

    let config = match arch_wiki_lint::config::load_config(cli.config.clone()) {
        Ok(c) => c,
        Err(e) => {
            eprintln!("Config error: {:#}", e);
            std::process::exit(EXIT_CONFIG);
        }
    };

    if let Err(errors) = scoring::validate_profiles(&config.profiles) {
        eprintln!("Profile config errors:");
        for error in errors {
            eprintln!("  - {}", error);
        }
        std::process::exit(EXIT_CONFIG);
    }
    let profiles = ProfileTable::with_overrides(&config.profiles);

    let target = match pages::resolve_target(&cli.target) {
        Ok(t) => t,
        Err(e) => {
            eprintln!("Error: {:#}", e);
            std::process::exit(EXIT_TARGET);
        }
    };

    let (results, structure) = match target {
        Target::Page(path) => match pages::score_page(&path, cli.importance, &profiles) {
            Ok(result) => (vec![result], None),
            Err(e) => {
                eprintln!("Error: {:#}", e);
                std::process::exit(EXIT_TARGET);
            }
        },
        Target::Wiki { dir, pages: paths } => {
            if cli.importance.is_some() {
                tracing::warn!("--importance applies to single pages only; inferring per page");
            }
            tracing::debug!(dir = %dir.display(), pages = paths.len(), "scoring wiki");
            let results = match pages::score_pages(&paths, &profiles) {
                Ok(r) => r,
                Err(e) => {
                    eprintln!("Error: {:#}", e);
                    std::process::exit(EXIT_TARGET);
                }
            };
            let structure = structure::validate_structure(&results, cli.scale.or(config.scale));
            (results, Some(structure))
        }
    };

    render(&cli, &results, structure.as_ref());

    if let Some(ref path) = cli.report {
        let report = JsonReport::new(&results, structure.as_ref());
        if let Err(e) = output::write_report(path, &report) {
            eprintln!("Error: {:#}", e);
            std::process::exit(EXIT_REPORT);
        }
    }

    if cli.verbose {
        eprintln!(
            "Checked {} pages in {}",
            results.len(),
            humantime::format_duration(start_time.elapsed())
        );
    }

    let failing_page = results.iter().any(|r| r.grade().is_failing());
    let structural_gap = structure.as_ref().is_some_and(|s| s.has_blocking_gaps());
    if failing_page || structural_gap {
        std::process::exit(EXIT_QUALITY);
    }
    std::process::exit(EXIT_SUCCESS);
}

fn render(cli: &Cli, results: &[ValidationResult], structure: Option<&StructureReport>) {
    if cli.json {
        match JsonReport::new(results, structure).to_string_pretty() {
            Ok(json) => println!("{}", json),
            Err(e) => eprintln!("Error: {:#}", e),
        }
        return;
    }

    let use_colors = output::should_use_colors();
    for result in results {
        println!("{}", output::format_result(result, use_colors));
        if cli.verbose {
            println!("  Breakdown:");
            println!("{}", output::format_breakdown(result));
            println!();
        }
    }
    if let Some(structure) = structure {
        println!("{}", output::format_summary(results, use_colors));
        println!("{}", output::format_structure(structure, use_colors));
    }
}
