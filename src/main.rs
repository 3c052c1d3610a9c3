use std::path::{Path, PathBuf};
use std::process::ExitCode;
use std::time::Duration;

use anyhow::{Context, Result};
use clap::Parser;
use diy_assistant::config::{ApiKey, AssistantConfig, ImageSettings, ProjectType};
use diy_assistant::processing::{ImagePreprocessor, PreparedImage, load_image, save_processed};
use diy_assistant::report::{API_KEY_INSTRUCTIONS, INSTRUCTIONS_FILE_NAME, TIPS};
use diy_assistant::session::AssistantSession;
use diy_assistant::vision::GroqClient;
use diy_assistant::{HasRecoverySuggestion, Retryable};

/// Photo in, building instructions out:
/// - resizes and recompresses the photo to keep the upload small
/// - asks a hosted vision model for step-by-step instructions
/// - prints them and saves a plain-text copy
#[derive(Parser, Debug)]
#[command(name = "diy")]
#[command(about = "🛠️ Get building instructions for any furniture, craft, or DIY project photo")]
#[command(long_about = "Upload a photo of any furniture, craft, or DIY project to get detailed building instructions.
The photo is resized and recompressed before it is sent; the answer is printed and saved as plain text.")]
struct Args {
    /// Photo of the project (JPEG or PNG)
    #[arg(required_unless_present = "tips", help = "Project photo (JPEG or PNG)")]
    image: Option<PathBuf>,

    /// Groq API key
    #[arg(long, env = "GROQ_API_KEY", hide_env_values = true,
          help = "Groq API key (or set GROQ_API_KEY)")]
    api_key: Option<String>,

    /// Longest image side in pixels
    #[arg(short = 's', long, default_value_t = ImageSettings::DEFAULT_EDGE,
          value_parser = clap::value_parser!(u32).range(ImageSettings::MIN_EDGE as i64..=ImageSettings::MAX_EDGE as i64),
          help = "Max image size in pixels, 400-1200 (smaller = faster upload)")]
    max_size: u32,

    /// JPEG quality
    #[arg(short, long, default_value_t = ImageSettings::DEFAULT_QUALITY,
          value_parser = clap::value_parser!(u8).range(ImageSettings::MIN_QUALITY as i64..=ImageSettings::MAX_QUALITY as i64),
          help = "Image quality, 50-100 (higher = more detail, larger upload)")]
    quality: u8,

    /// Project category (display only)
    #[arg(short, long, value_enum, default_value_t = ProjectType::Furniture,
          help = "Type of project you're interested in")]
    project_type: ProjectType,

    /// Where to save the instructions
    #[arg(short, long, default_value = INSTRUCTIONS_FILE_NAME,
          help = "File the instructions are saved to")]
    output: PathBuf,

    /// Also write the processed image
    #[arg(long, help = "Save the resized image that gets uploaded (format from extension)")]
    save_processed: Option<PathBuf>,

    #[arg(long, help = "Vision model identifier")]
    model: Option<String>,

    #[arg(long, help = "Chat-completions endpoint URL")]
    endpoint: Option<String>,

    #[arg(long, help = "Request timeout in seconds (default: HTTP client default)")]
    timeout: Option<u64>,

    /// Preprocess only
    #[arg(long, help = "Resize and compress the photo, report sizes, but do not call the API")]
    dry_run: bool,

    #[arg(long, help = "Show tips for best results and exit")]
    tips: bool,
}

fn main() -> Result<ExitCode> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("warn")).init();
    let args = Args::parse();

    if args.tips {
        println!("{}", TIPS);
        return Ok(ExitCode::SUCCESS);
    }

    let config = build_config(&args);
    config.validate()?;

    if !args.dry_run && config.require_api_key().is_err() {
        println!("👆 Please enter your Groq API key to get started.\n");
        println!("{}", API_KEY_INSTRUCTIONS);
        return Ok(ExitCode::FAILURE);
    }

    let image_path = args
        .image
        .as_ref()
        .context("an image path is required")?;

    if args.dry_run {
        return dry_run(&config, image_path);
    }

    let client = GroqClient::from_config(&config)?;
    let mut session = AssistantSession::builder()
        .client(client)
        .image_settings(config.image)
        .request_settings(config.to_request_settings())
        .project_type(config.project_type)
        .build()?;

    println!("🔨 Analyzing your project...");
    let result = session
        .analyze_file(image_path)
        .with_context(|| format!("failed to process {}", image_path.display()))?;
    print_sizes(&result.prepared);

    if let Some(path) = &config.save_processed {
        save_processed(&result.prepared.processed.image, path)?;
        println!("Processed image saved to {}", path.display());
    }

    match result.report() {
        Some(report) => {
            println!("\n{}\n", report.render());
            let written = report.write_to(&config.output)?;
            println!("📥 Instructions saved to {}", written.display());
            Ok(ExitCode::SUCCESS)
        }
        None => {
            let failure = result.outcome.failure().cloned();
            eprintln!("{}", result.outcome.into_text());
            if let Some(failure) = failure {
                if let Some(hint) = failure.recovery_suggestion() {
                    eprintln!("Hint: {}", hint);
                }
                if failure.is_retryable() {
                    eprintln!("This looks temporary; running the same command again may work.");
                }
            }
            Ok(ExitCode::FAILURE)
        }
    }
}

fn build_config(args: &Args) -> AssistantConfig {
    let mut config = AssistantConfig::new(
        args.api_key.as_deref().map(ApiKey::new),
        ImageSettings::new(args.max_size, args.quality),
        args.project_type,
    );
    if let Some(model) = &args.model {
        config.model = model.clone();
    }
    if let Some(endpoint) = &args.endpoint {
        config.endpoint = endpoint.clone();
    }
    config.timeout = args.timeout.map(Duration::from_secs);
    config.output = args.output.clone();
    config.save_processed = args.save_processed.clone();
    config
}

fn dry_run(config: &AssistantConfig, image_path: &Path) -> Result<ExitCode> {
    let mut preprocessor = ImagePreprocessor::new(config.image);
    let image = load_image(image_path)?;
    let prepared = preprocessor.prepare(image)?;
    print_sizes(&prepared);
    if let Some(path) = &config.save_processed {
        save_processed(&prepared.processed.image, path)?;
        println!("Processed image saved to {}", path.display());
    }
    Ok(ExitCode::SUCCESS)
}

fn print_sizes(prepared: &PreparedImage) {
    let processed = &prepared.processed;
    println!("Original Size:  {}x{}", processed.original.w, processed.original.h);
    println!("Processed Size: {}x{}", processed.processed.w, processed.processed.h);
    println!(
        "Upload Size:    {} KB JPEG ({} KB base64)",
        prepared.payload.byte_len().div_ceil(1024),
        prepared.payload.encoded_len().div_ceil(1024)
    );
}
