use std::io::Write;
use std::path::PathBuf;
use std::process::ExitCode;

use clap::{Parser, ValueEnum};
use rdfa_quads::{Profile, RdfaParser};
use tracing::{error, info, warn};
use tracing_subscriber::EnvFilter;

#[derive(Clone, Copy, ValueEnum)]
enum ProfileArg {
    Html,
    Core,
}

impl From<ProfileArg> for Profile {
    fn from(value: ProfileArg) -> Self {
        match value {
            ProfileArg::Html => Profile::Html,
            ProfileArg::Core => Profile::Core,
        }
    }
}

/// Extracts RDFa from an HTML document and prints it as N-Quads.
#[derive(Parser)]
#[command(version, about)]
struct Args {
    /// A file path, or an http(s) URL to fetch.
    #[arg(value_name = "SOURCE")]
    source: String,

    /// Base IRI of the document. Defaults to the source location.
    #[arg(long)]
    base: Option<url::Url>,

    /// Language of literals when the document does not set one.
    #[arg(long)]
    lang: Option<String>,

    /// Initial vocabulary for bare terms.
    #[arg(long)]
    vocab: Option<String>,

    #[arg(long, value_enum, default_value = "html")]
    profile: ProfileArg,
}

enum Source {
    Remote(url::Url),
    Local(PathBuf),
}

impl Source {
    fn new(source: &str) -> Self {
        match url::Url::parse(source) {
            Ok(url) if matches!(url.scheme(), "http" | "https") => Source::Remote(url),
            _ => Source::Local(PathBuf::from(source)),
        }
    }

    /// The location as an IRI, used as the base when none is given.
    fn location(&self) -> Result<oxiri::Iri<String>, Box<dyn std::error::Error>> {
        let url = match self {
            Source::Remote(url) => url.clone(),
            Source::Local(path) => {
                let path = std::path::absolute(path)?;
                url::Url::from_file_path(&path)
                    .map_err(|()| format!("cannot make a file URL from {}", path.display()))?
            }
        };
        Ok(oxiri::Iri::parse(url.to_string())?)
    }

    fn read(&self) -> Result<String, Box<dyn std::error::Error>> {
        match self {
            Source::Remote(url) => {
                let response = reqwest::blocking::Client::new()
                    .get(url.clone())
                    .send()?
                    .error_for_status()?;

                let content_type = response
                    .headers()
                    .get(reqwest::header::CONTENT_TYPE)
                    .and_then(|v| v.to_str().ok());
                if content_type.is_some_and(|ct| !ct.starts_with("text/html")) {
                    warn!(content_type, "Content type is not text/html, processing anyway");
                }

                Ok(response.text()?)
            }
            Source::Local(path) => Ok(std::fs::read_to_string(path)?),
        }
    }
}

fn main() -> Result<ExitCode, Box<dyn std::error::Error>> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .init();

    let args = Args::parse();
    let source = Source::new(&args.source);

    let content = match source.read() {
        Ok(content) => content,
        Err(e) => {
            error!(source = %args.source, error = %e, "Unable to read input");
            return Ok(ExitCode::FAILURE);
        }
    };

    let base = match args.base {
        Some(base) => oxiri::Iri::parse(base.to_string())?,
        None => source.location()?,
    };
    info!(%base, "Processing document");

    let mut parser = RdfaParser::new(base).with_profile(args.profile.into());
    if let Some(lang) = &args.lang {
        parser = parser.with_language(lang)?;
    }
    if let Some(vocab) = &args.vocab {
        parser = parser.with_vocab(vocab)?;
    }

    let mut evaluator = parser.build();
    evaluator.on_error(|e| {
        warn!(error = %e, "Processing error");
        Ok(())
    });
    evaluator.feed(&content);
    evaluator.finish();

    let mut out = std::io::stdout().lock();
    for quad in evaluator.quads() {
        writeln!(out, "{quad} .")?;
    }

    Ok(ExitCode::SUCCESS)
}
