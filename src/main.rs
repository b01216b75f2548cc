use anyhow::{Context, Result};
use meanstretch::pipeline::{ContrastPipeline, DEFAULT_GAIN, StretchConfig};
use std::env;
use std::path::Path;

fn main() -> Result<()> {
    // --- 1. Logging Initialization ---
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .init();

    // --- 2. Argument Parsing ---
    let args: Vec<String> = env::args().collect();
    if args.len() < 3 {
        println!("Usage: meanstretch <input_image_path> <output_image_path> [gain]");
        return Ok(());
    }
    let input_path = Path::new(&args[1]);
    let output_path = Path::new(&args[2]);
    let gain = match args.get(3) {
        Some(raw) => raw
            .parse::<i32>()
            .with_context(|| format!("gain must be an integer, got '{}'", raw))?,
        None => DEFAULT_GAIN,
    };

    // --- 3. Pipeline Initialization ---
    let config = StretchConfig {
        gain,
        ..StretchConfig::default()
    };
    let pipeline = ContrastPipeline::new(config);

    // --- 4. Enhancement Pass ---
    pipeline
        .enhance_file(input_path, output_path)
        .with_context(|| format!("failed to enhance '{}'", input_path.display()))?;

    println!(
        "Enhancement complete. Output saved to {}",
        output_path.display()
    );
    Ok(())
}
