// Thu Aug 20 2026 - Alex

use clap::Parser;
use colored::Colorize;
use handle_leak_tracer::{
    config::ScanConfig,
    heap::{HeapInspectionProvider, LiveCapture, SnapshotProvider},
    scanner::{HeapScanner, ScanSummary},
    ui::banner::Banner,
    utils::{logging, time},
};
use std::path::PathBuf;
use std::sync::Arc;

#[derive(Parser, Debug)]
#[command(author = "Alex")]
#[command(version = "1.0.0")]
#[command(about = "Root path analysis for leaked OS handle wrappers", long_about = None)]
struct Args {
    /// Live process to capture a heap snapshot from
    #[arg(short, long)]
    pid: Option<i32>,

    /// Pre-captured heap snapshot file
    #[arg(short, long)]
    dump: Option<PathBuf>,

    /// Directory for the per-object text reports
    #[arg(short, long, default_value = "reports")]
    output_dir: PathBuf,

    /// Analysis cache file
    #[arg(long, default_value = "analysis-cache.json")]
    cache_file: PathBuf,

    /// Type-name suffix filter; repeatable, replaces the built-in table
    #[arg(long = "type-suffix")]
    type_suffix: Vec<String>,

    /// Emit the merged overlay graph as SVG
    #[arg(short, long)]
    graph: bool,

    /// Re-analyze cached addresses and regenerate their reports
    #[arg(long)]
    refresh_exports: bool,

    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,

    /// Write log lines to a file instead of stderr
    #[arg(long)]
    log_file: Option<PathBuf>,

    #[arg(long)]
    no_progress: bool,

    #[arg(long)]
    no_banner: bool,
}

fn main() {
    let args = Args::parse();

    if let Err(e) = logging::setup(args.verbose, args.log_file.as_deref()) {
        eprintln!("{} Failed to set up logging: {}", "[!]".red(), e);
        std::process::exit(1);
    }

    if !args.no_banner {
        Banner::print_default();
    }

    println!("{}", "Handle Leak Tracer".cyan().bold());
    println!("{}", "=".repeat(50).cyan());
    println!();

    let config = ScanConfig {
        pid: args.pid,
        dump: args.dump.clone(),
        output_dir: args.output_dir.clone(),
        cache_file: args.cache_file.clone(),
        type_suffixes: args.type_suffix.clone(),
        export_graph: args.graph,
        refresh_exports: args.refresh_exports,
        show_progress: !args.no_progress,
        verbose: args.verbose,
    };

    if let Err(e) = config.validate() {
        eprintln!("{} {}", "[!]".red(), e);
        std::process::exit(1);
    }

    let provider = load_provider(&config);

    println!(
        "{} Snapshot holds {} objects{}",
        "[+]".green(),
        provider.object_count(),
        provider
            .process_name()
            .map(|name| format!(" from {}", name))
            .unwrap_or_default()
    );
    println!(
        "{} Captured at {}",
        "[*]".blue(),
        time::format_timestamp(provider.captured_at())
    );
    println!();

    println!("{} Starting handle scan...", "[*]".blue());
    println!();

    let scanner = HeapScanner::new(provider as Arc<dyn HeapInspectionProvider>, config);
    let summary = match scanner.run() {
        Ok(summary) => summary,
        Err(e) => {
            eprintln!("{} Scan failed: {:#}", "[!]".red(), e);
            std::process::exit(1);
        }
    };

    print_summary(&summary);
}

fn load_provider(config: &ScanConfig) -> Arc<SnapshotProvider> {
    match (config.pid, &config.dump) {
        (Some(pid), _) => {
            println!("{} Requesting snapshot from pid {}", "[*]".blue(), pid);
            match LiveCapture::new(pid).capture() {
                Ok(provider) => Arc::new(provider),
                Err(e) => {
                    eprintln!("{} Failed to capture snapshot: {}", "[!]".red(), e);
                    std::process::exit(1);
                }
            }
        }
        (None, Some(path)) => {
            println!("{} Loading snapshot: {}", "[*]".blue(), path.display());
            match SnapshotProvider::load(path) {
                Ok(provider) => Arc::new(provider),
                Err(e) => {
                    eprintln!("{} Failed to load snapshot: {}", "[!]".red(), e);
                    std::process::exit(1);
                }
            }
        }
        (None, None) => {
            // validate() rejects this before we get here.
            eprintln!("{} No snapshot source configured", "[!]".red());
            std::process::exit(1);
        }
    }
}

fn print_summary(summary: &ScanSummary) {
    println!();
    println!("{}", "=".repeat(50).cyan());
    println!(
        "{} Scan complete in {}",
        "[+]".green(),
        time::format_duration(summary.elapsed)
    );
    println!(
        "{} Finalizable candidates: {} ({} matched the handle filter)",
        "[+]".green(),
        summary.candidates,
        summary.matched
    );
    println!("{} Analyzed: {}", "[+]".green(), summary.analyzed);
    println!(
        "{} Skipped (cached): {}",
        "[+]".green(),
        summary.skipped_cached
    );
    if summary.failures > 0 {
        println!("{} Failures: {}", "[!]".yellow(), summary.failures);
    }
    println!(
        "{} Reports written: {}",
        "[+]".green(),
        summary.reports_written
    );
    if let Some(graph_file) = &summary.graph_file {
        println!(
            "{} Overlay graph saved to: {}",
            "[+]".green(),
            graph_file.display()
        );
    }
}
