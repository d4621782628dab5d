use anyhow::{bail, Context, Result};
use clap::{Parser, Subcommand};
use lineup_core::{FaceAnalyzer, FaceMatcher};
use lineup_engine::{build_gallery, spawn_session, BuildReport, Config, GalleryManifest, QueryOutcome};
use lineup_infer::RemoteAnalyzer;
use lineup_media::{FsHttpImageSource, ImageSource, Pixels, SampleLocator};
use std::path::PathBuf;
use std::sync::Arc;

mod render;

#[derive(Parser)]
#[command(name = "lineup", about = "Gallery-based face recognition demo")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Build the gallery from the manifest and print enrollment stats
    Gallery,
    /// Match faces in a query image against the gallery
    Match {
        /// Query image, local path or URL
        image: String,
        /// Write an annotated copy of the query image here
        #[arg(short, long)]
        out: Option<PathBuf>,
    },
    /// Probe the inference service
    Status,
}

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .init();

    let cli = Cli::parse();
    let config = Config::from_env();

    match cli.command {
        Commands::Gallery => {
            let (analyzer, source) = connect(&config).await?;
            let (gallery, report) = enroll(&config, analyzer, source).await?;
            for set in gallery.sets() {
                println!("  {:<24} {} descriptor(s)", set.label(), set.descriptors().len());
            }
            print_report(&report);
        }
        Commands::Match { image, out } => {
            let (analyzer, source) = connect(&config).await?;
            let (gallery, report) = enroll(&config, analyzer.clone(), source.clone()).await?;
            print_report(&report);

            let matcher = FaceMatcher::with_threshold(gallery, config.match_threshold);
            let session = spawn_session(analyzer, matcher);

            let locator = SampleLocator::parse(&image);
            let pixels = {
                let source = source.clone();
                tokio::task::spawn_blocking(move || source.fetch(&locator))
                    .await?
                    .with_context(|| format!("failed to load query image {image}"))?
            };

            let outcome = tokio::time::timeout(config.query_timeout(), session.query(pixels.clone()))
                .await
                .context("query timed out")??;

            match outcome {
                QueryOutcome::Completed { faces, commands } => {
                    if faces.is_empty() {
                        println!("No faces recognized.");
                    } else {
                        let names: Vec<String> =
                            faces.iter().map(|f| f.result.to_string()).collect();
                        println!("Recognized faces: {}", names.join(", "));
                    }
                    if let Some(out) = out {
                        write_annotated(&pixels, &commands, &out)?;
                        println!("Annotated image written to {}", out.display());
                    }
                }
                // A one-shot CLI query has nothing racing it
                QueryOutcome::Superseded => bail!("query was superseded"),
            }
        }
        Commands::Status => {
            let url = config.infer_url.clone();
            let timeout = config.http_timeout();
            let status = tokio::task::spawn_blocking(move || {
                RemoteAnalyzer::connect(&url, timeout)?.status()
            })
            .await??;
            println!(
                "inference service ready: model={} descriptor_dim={}",
                status.model, status.descriptor_dim
            );
        }
    }

    Ok(())
}

/// Connect the inference client and the image source, off the async
/// runtime (both use blocking HTTP clients).
async fn connect(
    config: &Config,
) -> Result<(Arc<dyn FaceAnalyzer + Send + Sync>, Arc<dyn ImageSource + Send + Sync>)> {
    let url = config.infer_url.clone();
    let timeout = config.http_timeout();
    let (analyzer, source) = tokio::task::spawn_blocking(move || {
        let analyzer = RemoteAnalyzer::connect(&url, timeout)?;
        let source = FsHttpImageSource::new(timeout)?;
        anyhow::Ok((analyzer, source))
    })
    .await??;
    Ok((Arc::new(analyzer), Arc::new(source)))
}

async fn enroll(
    config: &Config,
    analyzer: Arc<dyn FaceAnalyzer + Send + Sync>,
    source: Arc<dyn ImageSource + Send + Sync>,
) -> Result<(lineup_core::Gallery, BuildReport)> {
    let manifest = GalleryManifest::load(&config.manifest_path).with_context(|| {
        format!(
            "failed to load gallery manifest {}",
            config.manifest_path.display()
        )
    })?;
    let built = build_gallery(analyzer, source, &manifest)
        .await
        .context("gallery build failed")?;
    Ok(built)
}

fn print_report(report: &BuildReport) {
    println!(
        "Gallery: {} identit{} enrolled ({} skipped), {} sample(s) loaded, {} failed",
        report.identities_loaded,
        if report.identities_loaded == 1 { "y" } else { "ies" },
        report.identities_skipped,
        report.samples_loaded,
        report.samples_failed,
    );
}

fn write_annotated(
    pixels: &Pixels,
    commands: &[lineup_core::DrawCommand],
    out: &std::path::Path,
) -> Result<()> {
    let mut surface = render::PngSurface::new(pixels)?;
    lineup_core::overlay::render(commands, &mut surface);
    surface.save(out)
}
