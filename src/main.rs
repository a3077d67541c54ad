// main.rs - CLI entry point

use coevol::cli::Config;
use coevol::output::TextMatrixWriter;
use coevol::pipeline::{FigureBackend, OutputConfig, RunReport, Task};
use coevol::prelude::*;
use std::time::Instant;
use tracing_subscriber::EnvFilter;

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| "info".into()))
        .with_target(false)
        .init();

    let args: Args = argh::from_env();
    let result = run_main(args);
    if let Err(e) = &result {
        eprintln!("❌ ERROR: {}", e);
    }
    std::process::exit(exit_code(&result));
}

/// Figure problems never fail a run; everything else that reaches here does
fn exit_code(result: &Result<()>) -> i32 {
    match result {
        Ok(()) => 0,
        Err(e) if e.is_fatal() => 1,
        Err(_) => 0,
    }
}

fn run_main(mut args: Args) -> Result<()> {

    // Handle generate config first
    if args.generate_config {
        let sample_config = Config::generate_sample();
        println!("{}", sample_config);
        println!("\n💡 Save this content to a .toml file and use --config /path/to/config.toml");
        return Ok(());
    }

    // Load configuration file if specified
    if let Some(config_path) = args.config.clone() {
        args = args.with_config_file(&config_path)?;
    }

    let validation = validate_args(&args)?;

    println!("🚀 coevol v{}", env!("CARGO_PKG_VERSION"));
    println!("🧵 Threads: {} (auto-detected)", rayon::current_num_threads());
    println!("🧪 Settings: {}", validation.calc.description());

    let total_start = Instant::now();

    // Load alignment
    let load_start = Instant::now();
    let msa = Alignment::from_file(&validation.msa_path)?;
    println!(
        "📊 Alignment: {} sequences × {} columns ({:.2?})",
        msa.num_sequences(),
        msa.num_columns(),
        load_start.elapsed()
    );

    let tasks = plan_tasks(
        validation.normalization.as_deref(),
        validation.correction.as_deref(),
    )?;

    if args.dry_run {
        print_plan(&tasks, &validation.output);
        println!("✅ Dry run completed successfully");
        return Ok(());
    }

    // Base mutual information
    let mi_start = Instant::now();
    println!("🔍 Calculating mutual information...");
    let mutinfo = build_mutinfo_matrix(&msa, &validation.calc, false)?;
    println!("✅ Mutual information matrix computed in {:.2?}", mi_start.elapsed());

    let writer = TextMatrixWriter;
    let plotter = PlottersBackend;
    if let Some(figure) = &validation.output.figure {
        println!(
            "🖼️  Figures: {} ({} × {} in, {} dpi) via {}",
            figure.format,
            figure.width,
            figure.height,
            figure.dpi,
            plotter.name()
        );
    }

    let report = OutputDriver::new(&DefaultKernels, &writer, &plotter, &validation.output)
        .run(&tasks, &msa, &validation.calc, &mutinfo)?;

    print_summary(&report);
    println!("⏱️  Total time: {:.2?}", total_start.elapsed());
    Ok(())
}

fn print_plan(tasks: &[Task], output: &OutputConfig) {
    println!("📋 Planned artifacts ({} matrices):", tasks.len());
    for task in tasks {
        println!("   - {}: {}", task, output.text_path(task).display());
        if let Some(path) = output.figure_path(task) {
            println!("     figure: {}", path.display());
        }
    }
}

fn print_summary(report: &RunReport) {
    println!("💾 Text matrices written: {}", report.text_artifacts.len());
    for path in &report.text_artifacts {
        println!("   - {}", path.display());
    }
    if !report.figures.is_empty() {
        println!("🖼️  Figures saved: {}", report.figures.len());
    }
    for warning in &report.warnings {
        println!("⚠️  Warning: {}", warning);
    }
    println!("✅ Analysis completed successfully");
}
