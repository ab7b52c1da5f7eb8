//! docmeta CLI - document text extraction and metadata reports

use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;

use clap::{Args, Parser, Subcommand};
use colored::Colorize;
use indicatif::{ProgressBar, ProgressStyle};

use docmeta::ocr::{GoogleVisionOcr, PdfiumRenderer, VisionConfig, VisionCredentials};
use docmeta::{
    load_document, render, Analysis, DocMeta, Document, JsonFormat, MediaType, PageSelection,
};

#[derive(Parser)]
#[command(name = "docmeta")]
#[command(author = "iyulab")]
#[command(version)]
#[command(about = "Extract document text and generate metadata reports", long_about = None)]
struct Cli {
    /// Input document (PDF, DOCX or TXT)
    #[arg(value_name = "FILE")]
    input: Option<PathBuf>,

    #[command(flatten)]
    report: ReportArgs,

    #[command(flatten)]
    providers: ProviderArgs,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Extract text and print a metadata report
    Analyze {
        /// Input document (PDF, DOCX or TXT)
        #[arg(value_name = "FILE")]
        input: PathBuf,

        #[command(flatten)]
        report: ReportArgs,

        #[command(flatten)]
        providers: ProviderArgs,
    },

    /// Print extracted text only
    Text {
        /// Input document (PDF, DOCX or TXT)
        #[arg(value_name = "FILE")]
        input: PathBuf,

        /// Output file (stdout if not specified)
        #[arg(short, long, value_name = "FILE")]
        output: Option<PathBuf>,

        /// Print the page log to stderr
        #[arg(long)]
        log: bool,

        /// Print the extraction outcome (text, pages, log) as JSON
        #[arg(long)]
        json: bool,

        #[command(flatten)]
        providers: ProviderArgs,
    },

    /// Show version information
    Version,
}

#[derive(Args, Clone, Default)]
struct ReportArgs {
    /// Print the report as JSON
    #[arg(long)]
    json: bool,

    /// Write the JSON report to a file
    #[arg(short, long, value_name = "FILE")]
    output: Option<PathBuf>,

    /// Output compact JSON
    #[arg(long)]
    compact: bool,

    /// Number of key sentences
    #[arg(long, value_name = "N")]
    sentences: Option<usize>,
}

#[derive(Args, Clone, Default)]
struct ProviderArgs {
    /// Media type, overriding detection (e.g., "application/pdf")
    #[arg(long, value_name = "TYPE")]
    mime: Option<String>,

    /// Page range (e.g., "1-10", "1,3,5")
    #[arg(long)]
    pages: Option<String>,

    /// Never send pages to OCR
    #[arg(long)]
    no_ocr: bool,

    /// OCR language hint (repeatable)
    #[arg(long = "lang-hint", value_name = "CODE")]
    lang_hints: Vec<String>,

    /// Google Cloud Vision API key
    #[arg(long, env = "GOOGLE_VISION_API_KEY", hide_env_values = true)]
    vision_api_key: Option<String>,

    /// Google Cloud Vision OAuth access token
    #[arg(long, env = "GOOGLE_VISION_ACCESS_TOKEN", hide_env_values = true)]
    vision_token: Option<String>,

    /// Directory containing the pdfium library
    #[arg(long, env = "PDFIUM_LIB_DIR", value_name = "DIR")]
    pdfium_lib: Option<PathBuf>,
}

fn main() {
    env_logger::init();

    let cli = Cli::parse();

    let result = match cli.command {
        Some(Commands::Analyze {
            input,
            report,
            providers,
        }) => cmd_analyze(&input, &report, &providers),
        Some(Commands::Text {
            input,
            output,
            log,
            json,
            providers,
        }) => cmd_text(&input, output.as_deref(), log, json, &providers),
        Some(Commands::Version) => {
            cmd_version();
            Ok(())
        }
        None => {
            // Default behavior: analyze if input is provided
            if let Some(input) = cli.input {
                cmd_analyze(&input, &cli.report, &cli.providers)
            } else {
                println!("{}", "Usage: docmeta <FILE>".yellow());
                println!("       docmeta --help for more information");
                Ok(())
            }
        }
    };

    if let Err(e) = result {
        eprintln!("{}: {}", "Error".red().bold(), e);
        std::process::exit(1);
    }
}

/// OCR collaborators built once from the command line.
struct Providers {
    ocr: Option<GoogleVisionOcr>,
    renderer: Option<PdfiumRenderer>,
}

impl Providers {
    fn from_args(args: &ProviderArgs) -> Result<Self, Box<dyn std::error::Error>> {
        if args.no_ocr {
            return Ok(Self {
                ocr: None,
                renderer: None,
            });
        }

        let credentials = match (&args.vision_api_key, &args.vision_token) {
            (Some(key), _) => Some(VisionCredentials::ApiKey(key.clone())),
            (None, Some(token)) => Some(VisionCredentials::AccessToken(token.clone())),
            (None, None) => None,
        };

        let ocr = match credentials {
            Some(credentials) => {
                let mut config = VisionConfig::new(credentials);
                if !args.lang_hints.is_empty() {
                    config = config.with_language_hints(args.lang_hints.iter());
                }
                Some(GoogleVisionOcr::new(config)?)
            }
            None => {
                log::info!("No Vision credentials given; OCR is not configured");
                None
            }
        };

        // Without an OCR engine there is nothing to rasterize for.
        let renderer = match ocr {
            Some(_) => match PdfiumRenderer::bind(args.pdfium_lib.as_deref()) {
                Ok(renderer) => Some(renderer),
                Err(e) => {
                    log::warn!("{}", e);
                    None
                }
            },
            None => None,
        };

        Ok(Self { ocr, renderer })
    }

    fn pipeline(&self, args: &ProviderArgs) -> Result<DocMeta<'_>, Box<dyn std::error::Error>> {
        let mut pipeline = DocMeta::new();
        if let Some(ref ocr) = self.ocr {
            pipeline = pipeline.with_ocr(ocr);
        }
        if let Some(ref renderer) = self.renderer {
            pipeline = pipeline.with_renderer(renderer);
        }
        if args.no_ocr {
            pipeline = pipeline.native_only();
        }
        if let Some(ref pages) = args.pages {
            let selection =
                PageSelection::parse(pages).map_err(|e| format!("Invalid page range: {}", e))?;
            pipeline = pipeline.with_pages(selection);
        }
        Ok(pipeline)
    }
}

fn read_document(input: &Path, mime: Option<&str>) -> Result<Document, Box<dyn std::error::Error>> {
    let document = match mime {
        Some(mime) => Document::new(fs::read(input)?, MediaType::from_mime(mime)),
        None => load_document(input)?,
    };
    log::debug!(
        "Read {} ({} bytes, {})",
        input.display(),
        document.len(),
        document.media_type()
    );
    Ok(document)
}

fn spinner(message: &'static str) -> ProgressBar {
    let pb = ProgressBar::new_spinner();
    pb.set_style(
        ProgressStyle::default_spinner()
            .template("{spinner:.green} {msg}")
            .unwrap_or_else(|_| ProgressStyle::default_spinner()),
    );
    pb.enable_steady_tick(Duration::from_millis(100));
    pb.set_message(message);
    pb
}

fn print_empty_warning(log: &[String]) {
    println!(
        "{}",
        "No text could be extracted from the document.".yellow().bold()
    );
    if !log.is_empty() {
        println!("{}", "Debug log:".yellow());
        for line in log {
            println!("  {}", line);
        }
    }
}

fn write_output(path: &Path, content: &str) -> std::io::Result<()> {
    if let Some(parent) = path.parent() {
        if !parent.as_os_str().is_empty() {
            fs::create_dir_all(parent)?;
        }
    }
    fs::write(path, content)
}

fn cmd_analyze(
    input: &Path,
    report_args: &ReportArgs,
    provider_args: &ProviderArgs,
) -> Result<(), Box<dyn std::error::Error>> {
    let document = read_document(input, provider_args.mime.as_deref())?;
    let providers = Providers::from_args(provider_args)?;
    let mut pipeline = providers.pipeline(provider_args)?;
    if let Some(count) = report_args.sentences {
        pipeline = pipeline.with_sentence_count(count);
    }

    let pb = spinner("Extracting text...");
    let analysis = pipeline.analyze(&document);
    pb.finish_and_clear();

    let report = match analysis? {
        Analysis::Complete(report) => report,
        Analysis::Empty(outcome) => {
            print_empty_warning(&outcome.log);
            return Ok(());
        }
    };

    let format = if report_args.compact {
        JsonFormat::Compact
    } else {
        JsonFormat::Pretty
    };

    if let Some(ref path) = report_args.output {
        let json = render::to_json(&report, format)?;
        write_output(path, &json)?;
        println!("{} {}", "Saved to".green(), path.display());
    } else if report_args.json {
        println!("{}", render::to_json(&report, format)?);
    } else {
        println!("{}", "Document Report".cyan().bold());
        println!("{}", "─".repeat(40).dimmed());
        println!("{}", render::to_text(&report));
    }

    Ok(())
}

fn cmd_text(
    input: &Path,
    output: Option<&Path>,
    show_log: bool,
    json: bool,
    provider_args: &ProviderArgs,
) -> Result<(), Box<dyn std::error::Error>> {
    let document = read_document(input, provider_args.mime.as_deref())?;
    let providers = Providers::from_args(provider_args)?;
    let pipeline = providers.pipeline(provider_args)?;

    let pb = spinner("Extracting text...");
    let outcome = pipeline.extract(&document);
    pb.finish_and_clear();
    let outcome = outcome?;

    if show_log {
        for line in &outcome.log {
            eprintln!("{}", line.dimmed());
        }
    }

    let content = if json {
        serde_json::to_string_pretty(&outcome)?
    } else {
        if outcome.is_empty() {
            eprintln!(
                "{}",
                "No text could be extracted from the document.".yellow().bold()
            );
        }
        outcome.text
    };

    if let Some(path) = output {
        write_output(path, &content)?;
        println!("{} {}", "Saved to".green(), path.display());
    } else {
        println!("{}", content);
    }

    Ok(())
}

fn cmd_version() {
    println!("{} {}", "docmeta".cyan().bold(), env!("CARGO_PKG_VERSION"));
    println!("Document text extraction and metadata tool");
    println!();
    println!("Repository: {}", "https://github.com/iyulab/docmeta".dimmed());
    println!("License: MIT");
}
