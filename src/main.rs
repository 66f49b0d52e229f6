use clap::Parser;
use std::path::PathBuf;

use dualscan::{MobilenetVariant, ProviderConfig, Session, format, ingest, provider};

#[derive(Parser)]
#[command(name = "dualscan")]
#[command(about = "Label an image with a whole-image classifier and an object detector")]
struct Cli {
    /// Scan this image and print the results instead of opening the GUI
    #[arg(value_name = "IMAGE")]
    image_path: Option<PathBuf>,

    /// Directory containing the .rten model files (default: ~/.cache/dualscan)
    #[arg(long, value_name = "DIR")]
    model_dir: Option<PathBuf>,

    /// Classifier variant to load
    #[arg(long, value_enum, default_value_t = MobilenetVariant::V1)]
    variant: MobilenetVariant,

    /// Enable verbose output
    #[arg(short, long)]
    verbose: bool,
}

fn main() -> anyhow::Result<()> {
    let args = Cli::parse();

    let model_dir = match &args.model_dir {
        Some(dir) => dir.clone(),
        None => ProviderConfig::default_model_dir()?,
    };
    let config = ProviderConfig::new(model_dir)
        .with_variant(args.variant)
        .with_verbose(args.verbose);

    match args.image_path {
        Some(path) => {
            let runtime = tokio::runtime::Runtime::new()?;
            runtime.block_on(scan_once(config, &path, args.verbose))
        }
        None => run_gui(config),
    }
}

/// Headless mode: drive one image through the full session pipeline and
/// print the display rows.
async fn scan_once(config: ProviderConfig, path: &PathBuf, verbose: bool) -> anyhow::Result<()> {
    let mut session = Session::new();

    if verbose {
        println!("Loading models from {:?}...", config.model_dir);
    }
    let models = provider::load(&config).await?;
    session.models_loaded(models)?;

    if verbose {
        println!("Loading image: {path:?}");
    }
    let handle = ingest::ingest(path)?;
    if verbose {
        println!("Image loaded: {}x{}\n", handle.width(), handle.height());
    }
    session.select_image(handle)?;

    let job = session.begin_scan()?;
    match dualscan::inference::scan(job).await {
        Ok(outcome) => session.complete_scan(outcome)?,
        Err(e) => {
            session.fail_scan(e.clone())?;
            return Err(e.into());
        }
    }

    println!("MobileNet");
    for row in format::label_rows(session.label_predictions()) {
        println!("  {row}");
    }
    println!("COCO-SSD");
    for row in format::detection_rows(session.detection_predictions()) {
        println!("  {row}");
    }

    Ok(())
}

#[cfg(feature = "gui")]
fn run_gui(config: ProviderConfig) -> anyhow::Result<()> {
    dualscan::gui::run(config)?;
    Ok(())
}

#[cfg(not(feature = "gui"))]
fn run_gui(_config: ProviderConfig) -> anyhow::Result<()> {
    anyhow::bail!("built without the gui feature; pass an image path to scan headless")
}
