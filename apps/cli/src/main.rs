use std::{
    path::{Path, PathBuf},
    time::{Duration, Instant},
};

use anyhow::{Context, Result, bail};
use clap::{Parser, Subcommand, ValueEnum};
use console::style;
use indicatif::{ProgressBar, ProgressStyle};
use recap_core::{
    BackendClient, RawSegment, SummaryBackend, SummaryType, TranscriptData, bucket_width,
    config::DEFAULT_BACKEND_URL, extract_video_id, format_duration as format_video_length,
    grouping::effective_duration, group_segments,
};
use tokio::fs;
use tracing_subscriber::EnvFilter;

use crate::cache::{cache_key, get_cache_dir, get_root_cache_dir, load_summary, save_summary};

mod cache;

fn format_duration(d: Duration) -> String {
    let secs = d.as_secs_f64();
    if secs < 60.0 {
        format!("{:.1}s", secs)
    } else {
        format!("{:.0}m {:.0}s", secs / 60.0, secs % 60.0)
    }
}

/// CLI wrapper for SummaryType (needed for clap ValueEnum)
#[derive(Clone, Copy, Default, ValueEnum)]
enum CliSummaryType {
    Insights,
    #[default]
    Concise,
    Detailed,
}

impl From<CliSummaryType> for SummaryType {
    fn from(cli: CliSummaryType) -> Self {
        match cli {
            CliSummaryType::Insights => SummaryType::Insights,
            CliSummaryType::Concise => SummaryType::Concise,
            CliSummaryType::Detailed => SummaryType::Detailed,
        }
    }
}

#[derive(Parser)]
#[command(name = "recap")]
#[command(about = "Summarize YouTube transcripts through a recap server")]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Summarize a transcript file of `[m:ss] text` lines
    Summarize {
        /// Transcript file
        file: PathBuf,

        /// Summary preset
        #[arg(short = 't', long = "type", default_value = "concise")]
        summary_type: CliSummaryType,

        /// Base URL of the recap server
        #[arg(short, long, env = "RECAP_BACKEND_URL", default_value = DEFAULT_BACKEND_URL)]
        backend: String,

        /// Video id used as the cache key
        #[arg(long)]
        video_id: Option<String>,

        /// Ignore a cached summary
        #[arg(short, long)]
        force: bool,
    },

    /// Merge raw caption lines (`m:ss text`) into fixed time buckets
    Group {
        /// Caption file
        file: PathBuf,

        /// Video length in seconds; picks the bucket width
        #[arg(short, long)]
        duration: Option<f64>,
    },

    /// Print the video id of a watch URL
    VideoId { url: String },
}

fn create_spinner(msg: &str) -> ProgressBar {
    let pb = ProgressBar::new_spinner();
    pb.set_style(
        ProgressStyle::default_spinner()
            .tick_chars("⠁⠂⠄⡀⢀⠠⠐⠈ ")
            .template("{spinner:.cyan} {msg}")
            .unwrap_or_else(|_| ProgressStyle::default_spinner()),
    );
    pb.set_message(msg.to_string());
    pb.enable_steady_tick(Duration::from_millis(80));
    pb
}

async fn read_transcript(path: &Path) -> Result<TranscriptData> {
    let raw = fs::read_to_string(path)
        .await
        .with_context(|| format!("failed to read {}", path.display()))?;
    let transcript = TranscriptData::parse_text(&raw);
    if transcript.is_empty() {
        bail!("no timestamped lines found in {}", path.display());
    }
    Ok(transcript)
}

async fn summarize(
    file: &Path,
    summary_type: SummaryType,
    backend: &str,
    video_id: Option<&str>,
    force: bool,
) -> Result<()> {
    let transcript = read_transcript(file).await?;
    let cache_dir = get_cache_dir(&get_root_cache_dir(), &cache_key(video_id, transcript.text()));

    println!(
        "\n{}  {}\n",
        style("recap").cyan().bold(),
        style("Transcript Summarizer").dim()
    );
    println!(
        "{} Loaded {} transcript lines",
        style("✓").green().bold(),
        transcript.entries().len()
    );

    if !force {
        if let Some(cached) = load_summary(&cache_dir, summary_type).await {
            println!(
                "{} {} summary {}",
                style("✓").green().bold(),
                summary_type,
                style("(cached)").dim()
            );
            println!("{}", style("─".repeat(60)).dim());
            println!("{cached}");
            return Ok(());
        }
    }

    let client = BackendClient::new(backend).context("invalid backend URL")?;
    let step_start = Instant::now();
    let spinner = create_spinner(&format!("Generating {summary_type} summary..."));
    let summary = match client.summarize(transcript.text(), summary_type).await {
        Ok(summary) => summary,
        Err(e) => {
            spinner.finish_and_clear();
            return Err(e).context("summary request failed");
        }
    };
    spinner.finish_with_message(format!(
        "{} {} summary {}",
        style("✓").green().bold(),
        summary_type,
        style(format!("[{}]", format_duration(step_start.elapsed()))).dim()
    ));

    if let Err(e) = save_summary(&cache_dir, summary_type, &summary).await {
        tracing::warn!(error = %e, "could not cache summary");
    }

    println!("{}", style("─".repeat(60)).dim());
    println!("{summary}");
    Ok(())
}

async fn group(file: &Path, duration: Option<f64>) -> Result<()> {
    let raw = TranscriptData::parse_text(
        &fs::read_to_string(file)
            .await
            .with_context(|| format!("failed to read {}", file.display()))?,
    );
    let segments: Vec<RawSegment> = raw
        .entries()
        .iter()
        .map(|e| RawSegment::new(e.timestamp.clone(), e.text.clone()))
        .collect();

    let length = effective_duration(duration);
    let bucket = bucket_width(length);
    let grouped = group_segments(&segments, bucket)?;

    eprintln!(
        "{} {} segments → {} lines {}",
        style("✓").green().bold(),
        segments.len(),
        grouped.entries().len(),
        style(format!("[{}s buckets, {} video]", bucket, format_video_length(length))).dim()
    );
    println!("{}", grouped.text());
    Ok(())
}

#[tokio::main]
async fn main() -> Result<()> {
    dotenvy::dotenv().ok();
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();

    let result = match cli.command {
        Command::Summarize {
            file,
            summary_type,
            backend,
            video_id,
            force,
        } => summarize(&file, summary_type.into(), &backend, video_id.as_deref(), force).await,
        Command::Group { file, duration } => group(&file, duration).await,
        Command::VideoId { url } => match extract_video_id(&url) {
            Some(id) => {
                println!("{id}");
                Ok(())
            }
            None => Err(anyhow::anyhow!("no video id in {url}")),
        },
    };

    if let Err(e) = result {
        eprintln!("{} {:#}", style("Error:").red().bold(), e);
        std::process::exit(1);
    }
    Ok(())
}
