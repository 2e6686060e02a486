use anyhow::{Context, Result};
use clap::{Args, Parser, Subcommand};
use docsum::pipeline::summarize_trace;
use docsum::{
    HttpGenerator, ModelInfo, Settings, Strategy, SummaryReport, load_document,
    preprocess_and_chunk,
};
use std::path::{Path, PathBuf};
use std::time::{Duration, Instant};
use tracing::info;

/// Split documents into chunks, summarize them and extract keywords with a local LLM.
#[derive(Parser, Debug)]
#[command(name = "docsum", version, about)]
struct Cli {
    /// Path to a docsum.toml settings file
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    #[command(flatten)]
    chunking: ChunkingArgs,

    #[command(subcommand)]
    command: Command,
}

#[derive(Args, Debug)]
struct ChunkingArgs {
    /// Maximum characters per chunk
    #[arg(long, global = true)]
    max_length: Option<usize>,

    /// Delete runs of this many line breaks (0 keeps them)
    #[arg(long, global = true)]
    strip_lines: Option<usize>,

    /// Characters of neighbouring context attached to each chunk
    #[arg(long, global = true)]
    coincide: Option<usize>,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Print the chunks of a document
    Split {
        file: PathBuf,
    },
    /// Summarize a document chunk by chunk
    Summarize {
        file: PathBuf,

        /// subsection or recursive
        #[arg(long, default_value = "recursive")]
        mode: Strategy,

        /// Prompt applied to every chunk
        #[arg(long)]
        prompt: Option<String>,

        /// FILE already holds joined chunk text
        #[arg(long)]
        chunked: bool,

        /// Write a JSON report of the run
        #[arg(long)]
        report: Option<PathBuf>,
    },
    /// Extract keywords and compose a keyword-guided summary prompt
    Keywords {
        file: PathBuf,

        #[arg(long)]
        keyword_prompt: Option<String>,

        #[arg(long)]
        summary_prompt: Option<String>,

        /// FILE already holds joined chunk text
        #[arg(long)]
        chunked: bool,
    },
    /// Check the generation server
    Health,
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    let mut settings = Settings::load(cli.config.as_deref())?;
    apply_overrides(&mut settings, &cli.chunking);
    settings.validate()?;

    let start_time = Instant::now();
    match cli.command {
        Command::Split { file } => {
            let (_, joined) = read_chunks(&file, &settings, false)?;
            println!("{joined}");
        }
        Command::Summarize {
            file,
            mode,
            prompt,
            chunked,
            report,
        } => {
            let generator = build_generator(&settings)?;
            let prompt = prompt.unwrap_or_else(|| settings.prompts.summary.clone());
            let (bytes, joined) = read_chunks(&file, &settings, chunked)?;

            let trace = summarize_trace(
                &generator,
                &joined,
                mode,
                &prompt,
                settings.chunking.max_length,
            )?;
            println!("{}", trace.joined());

            if let Some(path) = report {
                let source = file.to_string_lossy();
                SummaryReport::new(Some(&*source), &bytes, mode, trace).write(&path)?;
                info!(path = %path.display(), "report written");
            }
        }
        Command::Keywords {
            file,
            keyword_prompt,
            summary_prompt,
            chunked,
        } => {
            let generator = build_generator(&settings)?;
            let (_, joined) = read_chunks(&file, &settings, chunked)?;

            let composed = docsum::extract_keywords(
                &generator,
                &joined,
                keyword_prompt.as_deref().unwrap_or(&settings.prompts.keyword),
                summary_prompt.as_deref().unwrap_or(&settings.prompts.summary),
                settings.chunking.max_length,
            )?;
            println!("{composed}");
        }
        Command::Health => {
            let health = build_generator(&settings)?.health_check()?;
            println!("Status: {}", health.status);
            println!("Loaded model: {}", health.model);
            println!("Available models: {:?}", health.available_models);
        }
    }

    info!("done in {:.2}s", start_time.elapsed().as_secs_f64());
    Ok(())
}

fn apply_overrides(settings: &mut Settings, args: &ChunkingArgs) {
    if let Some(max_length) = args.max_length {
        settings.chunking.max_length = max_length;
    }
    if let Some(strip_lines) = args.strip_lines {
        settings.chunking.strip_threshold = strip_lines;
    }
    if let Some(coincide) = args.coincide {
        settings.chunking.coincide_length = coincide;
    }
}

fn build_generator(settings: &Settings) -> Result<HttpGenerator> {
    let model = ModelInfo::from_tag(&settings.model.name)?.with_lora(settings.model.lora.as_deref());
    info!(model = %model.tag, kind = %model.kind, path = %model.path, "using model");

    Ok(HttpGenerator::with_timeout(
        settings.model.endpoint.as_str(),
        model,
        Duration::from_secs(settings.model.timeout_secs),
    )?)
}

/// Source bytes and joined chunk text for FILE
fn read_chunks(file: &Path, settings: &Settings, chunked: bool) -> Result<(Vec<u8>, String)> {
    if chunked {
        let joined = std::fs::read_to_string(file)
            .with_context(|| format!("Failed to read {}", file.display()))?;
        return Ok((joined.as_bytes().to_vec(), joined));
    }

    let document = load_document(file)
        .with_context(|| format!("Failed to load {}", file.display()))?;
    let chunking = &settings.chunking;
    let joined = preprocess_and_chunk(
        &document.raw_text,
        chunking.strip_threshold,
        chunking.max_length,
        chunking.coincide_length,
    );
    Ok((document.bytes, joined))
}
