use bpdoc::{
    regenerate_markdown, write_index, DumpDirectory, ExportConfig, Exporter, RenderOptions,
};
use clap::{Parser, Subcommand};
use std::path::PathBuf;
use std::process::ExitCode;

#[derive(Parser)]
#[command(name = "bpdoc")]
#[command(version, about = "Export Blueprint metadata to JSON and Markdown documentation")]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// TOML configuration file
    #[arg(long, short, global = true, env = "BPDOC_CONFIG")]
    config: Option<PathBuf>,

    /// Output directory (overrides the configuration)
    #[arg(long, short, global = true)]
    output: Option<PathBuf>,

    #[arg(long, global = true)]
    verbose: bool,
}

#[derive(Subcommand)]
enum Commands {
    /// Export Blueprint dumps written by the editor plugin
    Export {
        /// Directory containing the plugin's per-Blueprint JSON dumps
        dumps: PathBuf,
        #[arg(long, help = "Write JSON only")]
        no_markdown: bool,
        #[arg(long, help = "Ignore graph data and export reflected metadata only")]
        metadata_only: bool,
    },

    /// Re-render Markdown for existing JSON exports and rebuild the index
    Regen,

    /// Rebuild index.md from the Markdown files in the output directory
    Index,
}

fn main() -> ExitCode {
    let cli = Cli::parse();

    if let Err(e) = bpdoc::logging::init(cli.verbose) {
        eprintln!("Failed to initialize logging: {}", e);
    }

    let mut config = match ExportConfig::load(cli.config.as_deref()) {
        Ok(config) => config,
        Err(e) => {
            tracing::error!("[BPDOC] {}", e);
            return ExitCode::FAILURE;
        }
    };
    if let Some(output) = cli.output {
        config.output_dir = output;
    }

    match cli.command {
        Commands::Export {
            dumps,
            no_markdown,
            metadata_only,
        } => {
            if no_markdown {
                config.generate_markdown = false;
            }
            if metadata_only {
                config.include_graph_nodes = false;
            }
            run_export(&config, dumps)
        }
        Commands::Regen => run_regen(&config),
        Commands::Index => match write_index(&config.output_dir) {
            Ok(summary) => {
                tracing::info!("[BPDOC] Indexed {} blueprints", summary.entries);
                ExitCode::SUCCESS
            }
            Err(e) => {
                tracing::error!("[BPDOC] Failed to build index: {}", e);
                ExitCode::FAILURE
            }
        },
    }
}

fn run_export(config: &ExportConfig, dumps: PathBuf) -> ExitCode {
    let directory = match DumpDirectory::open(&dumps) {
        Ok(directory) => directory,
        Err(e) => {
            tracing::error!("[BPDOC] Cannot read dumps: {}", e);
            DumpDirectory::default()
        }
    };
    let extractor = directory.extractor();

    let report = Exporter::new(config, Some(&extractor)).export_all(&directory);

    let location = std::env::current_dir()
        .map(|cwd| cwd.join(&config.output_dir))
        .unwrap_or_else(|_| config.output_dir.clone());
    tracing::info!("[BPDOC] Exported {} blueprints", report.exported);
    if !report.failed.is_empty() {
        tracing::warn!("[BPDOC] {} blueprints failed to export", report.failed.len());
    }
    tracing::info!("[BPDOC] Documentation is located at: {}", location.display());

    ExitCode::SUCCESS
}

fn run_regen(config: &ExportConfig) -> ExitCode {
    let options = RenderOptions::from(config);
    let report = match regenerate_markdown(&config.output_dir, &options) {
        Ok(report) => report,
        Err(e) => {
            tracing::error!("[BPDOC] Failed to scan {}: {}", config.output_dir.display(), e);
            return ExitCode::FAILURE;
        }
    };

    if let Err(e) = write_index(&config.output_dir) {
        tracing::error!("[BPDOC] Failed to build index: {}", e);
        return ExitCode::FAILURE;
    }

    tracing::info!(
        "[BPDOC] Successfully created {} markdown files",
        report.rendered.len()
    );
    ExitCode::SUCCESS
}
