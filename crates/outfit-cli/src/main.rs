mod display;
mod suggest;

use std::io::{self, Write};
use std::path::{Path, PathBuf};
use std::sync::Arc;

use anyhow::Context;
use clap::{Args, Parser, Subcommand};
use outfit_ai::{Classifier, LabelSet, OnnxModel, ScoreModel, SharedClassifier};
use outfit_core::{AppConfig, GalleryBuildConfig, Session};
use outfit_gallery::GallerySampler;
use tracing_subscriber::EnvFilter;

/// Classify a shirt photo and suggest bottoms to wear with it.
#[derive(Parser)]
#[command(name = "outfit", version, about)]
struct Cli {
    /// JSON config file (defaults are used when omitted).
    #[arg(long, env = "OUTFIT_CONFIG", global = true)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Predict the shirt category of an image.
    Classify {
        image: PathBuf,
        #[command(flatten)]
        artifacts: ArtifactArgs,
    },
    /// Classify each image and show recommended bottoms with examples.
    Suggest {
        #[arg(required = true)]
        images: Vec<PathBuf>,
        #[command(flatten)]
        artifacts: ArtifactArgs,
        /// Gallery root directory.
        #[arg(long, env = "OUTFIT_GALLERY")]
        gallery: Option<PathBuf>,
    },
    /// Populate the example gallery from a labelled CSV manifest.
    BuildGallery {
        /// Builder JSON config file.
        #[arg(long)]
        build_config: Option<PathBuf>,
        #[arg(long)]
        manifest: Option<PathBuf>,
        #[arg(long)]
        image_root: Option<PathBuf>,
        #[arg(long, env = "OUTFIT_GALLERY")]
        gallery: Option<PathBuf>,
        #[arg(long)]
        max_per_category: Option<usize>,
        #[arg(long)]
        seed: Option<u64>,
    },
}

#[derive(Args)]
struct ArtifactArgs {
    /// ONNX model file.
    #[arg(long, env = "OUTFIT_MODEL")]
    model: Option<PathBuf>,
    /// Class-names file (JSON array or one label per line).
    #[arg(long, env = "OUTFIT_LABELS")]
    labels: Option<PathBuf>,
}

impl ArtifactArgs {
    fn apply(self, config: &mut AppConfig) {
        if let Some(model) = self.model {
            config.model_path = model;
        }
        if let Some(labels) = self.labels {
            config.labels_path = labels;
        }
    }
}

fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_writer(io::stderr)
        .init();
    tracing::info!("outfit v{}", env!("CARGO_PKG_VERSION"));

    let cli = Cli::parse();

    match cli.command {
        Command::Classify { image, artifacts } => {
            let mut config = AppConfig::load_or_default(cli.config.as_deref())?;
            artifacts.apply(&mut config);
            let classifier = load_classifier(&config)?;

            let bytes = std::fs::read(&image)
                .with_context(|| format!("reading {}", image.display()))?;
            let prediction = classifier
                .classify_bytes(&bytes)
                .with_context(|| format!("classifying {}", image.display()))?;
            display::write_prediction(&mut io::stdout().lock(), &prediction)?;
        }
        Command::Suggest {
            images,
            artifacts,
            gallery,
        } => {
            let mut config = AppConfig::load_or_default(cli.config.as_deref())?;
            artifacts.apply(&mut config);
            if let Some(gallery) = gallery {
                config.gallery_root = gallery;
            }
            let classifier = load_classifier(&config)?;
            run_suggest(&mut io::stdout().lock(), &classifier, &config, &images)?;
        }
        Command::BuildGallery {
            build_config,
            manifest,
            image_root,
            gallery,
            max_per_category,
            seed,
        } => {
            let mut config = GalleryBuildConfig::load_or_default(build_config.as_deref())?;
            if let Some(v) = manifest {
                config.manifest_path = v;
            }
            if let Some(v) = image_root {
                config.image_root = v;
            }
            if let Some(v) = gallery {
                config.gallery_root = v;
            }
            if let Some(v) = max_per_category {
                config.max_per_category = v;
            }
            if let Some(v) = seed {
                config.seed = v;
            }

            let report = outfit_gallery::build_gallery(&config).context("building gallery")?;
            let mut out = io::stdout().lock();
            display::write_build_report(&mut out, &report)?;
            writeln!(out, "Done. Check the '{}' folder.", config.gallery_root.display())?;
        }
    }

    Ok(())
}

/// Load the model and label artifacts once. Failure here is fatal.
fn load_classifier(config: &AppConfig) -> anyhow::Result<SharedClassifier<OnnxModel>> {
    let labels = LabelSet::load(&config.labels_path).context("loading class labels")?;
    let model =
        OnnxModel::load(&config.model_path, config.image_size).context("loading classifier model")?;
    let classifier = Classifier::new(model, labels).context("pairing model with labels")?;
    Ok(Arc::new(classifier))
}

/// Run the suggestion pipeline for each image within one session.
///
/// Unreadable uploads are reported and skipped; internal classifier errors abort.
fn run_suggest<M: ScoreModel, W: Write>(
    out: &mut W,
    classifier: &Classifier<M>,
    config: &AppConfig,
    images: &[PathBuf],
) -> anyhow::Result<()> {
    let sampler = GallerySampler::new(&config.gallery_root);
    let mut session = Session::new("cli");

    for (i, path) in images.iter().enumerate() {
        if i > 0 {
            writeln!(out)?;
        }
        writeln!(out, "== {} ==", path.display())?;

        let bytes = match std::fs::read(path) {
            Ok(bytes) => bytes,
            Err(e) => {
                report_unreadable(out, path, &e)?;
                continue;
            }
        };

        match suggest::suggest(&mut session, classifier, config, &sampler, &bytes) {
            Ok(suggestion) => display::write_suggestion(out, &suggestion)?,
            Err(e) if !e.is_internal() && !e.is_fatal() => report_unreadable(out, path, &e)?,
            Err(e) => {
                return Err(e).with_context(|| format!("classifying {}", path.display()));
            }
        }
    }
    Ok(())
}

fn report_unreadable(
    out: &mut impl Write,
    path: &Path,
    error: &dyn std::error::Error,
) -> io::Result<()> {
    tracing::warn!(path = %path.display(), error = %error, "could not read uploaded image");
    writeln!(out, "Could not read image: {error}")
}
