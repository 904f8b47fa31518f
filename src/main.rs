use clap::Parser;
use std::path::{Path, PathBuf};
use tracing::{error, info};
use tracing_subscriber::{fmt::format::FmtSpan, EnvFilter};

use tagbind::{
    error::Result,
    uploads::{deserializer, UploadPlan},
    Document,
};

#[derive(Parser)]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Upload configuration file
    #[arg(short, long)]
    file: PathBuf,

    /// Log the tag tree
    #[arg(short, long)]
    tree: bool,

    /// Run the pre-flight checks and fail when any problem is found
    #[arg(short, long)]
    check: bool,
}

fn main() {
    // Initialize the default subscriber for logging
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_span_events(FmtSpan::CLOSE)
        .with_target(false) // Don't show target
        .without_time() // Don't show timestamps
        .init(); // Initialize the subscriber

    match run() {
        Ok(true) => {}
        Ok(false) => std::process::exit(2),
        Err(e) => {
            error!("{}", e);
            std::process::exit(1);
        }
    }
}

/// Returns false when the checks found problems
fn run() -> Result<bool> {
    let args = Args::parse();

    info!("Reading file: {}", args.file.display());
    let doc = Document::load_file(&args.file)?;
    if args.tree {
        doc.log_tree();
    }

    let Some(plan) = deserializer()
        .deserialize_document(&doc)
        .as_ref()
        .and_then(UploadPlan::from_tree)
    else {
        error!(
            "Root tag '{}' is not an upload configuration",
            doc.root().name()
        );
        return Ok(false);
    };

    println!(
        "{} ({} videos)",
        plan.settings.application,
        plan.videos.len()
    );
    for video in &plan.videos {
        println!(
            "{}\t{}\t{:?}\t{:?}\t{}",
            video.file,
            video.title,
            video.category,
            video.privacy,
            video.channel()
        );
    }

    if !args.check {
        return Ok(true);
    }

    let base = args.file.parent().unwrap_or_else(|| Path::new("."));
    let issues = plan.validate(base);
    for issue in &issues {
        println!("{}{}", if issue.is_fatal() { "error: " } else { "warning: " }, issue);
    }
    println!("{} of {} videos ready", plan.uploadable(base).count(), plan.videos.len());
    Ok(issues.is_empty())
}
