use std::path::PathBuf;
use std::process::ExitCode;

use clap::Parser;

use unitdeck::{FooterInfo, ReportConfig, ReportStyle};

/// Turn a real-estate unit listing into a one-page investment comparison PDF.
#[derive(Parser)]
#[command(name = "unitdeck", version, about)]
struct Args {
    /// Input file: a units CSV or a brochure-extraction JSON payload
    input: PathBuf,

    /// Output PDF path
    #[arg(short, long, default_value = "report.pdf")]
    output: PathBuf,

    /// Report title
    #[arg(short, long, default_value = "Investment Opportunity")]
    title: String,

    /// Header banner image (PNG or JPEG)
    #[arg(long)]
    header_image: Option<PathBuf>,

    /// Treat the input as extraction JSON even without a .json extension
    #[arg(long)]
    extraction: bool,
}

fn main() -> ExitCode {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let args = Args::parse();

    let config = ReportConfig {
        title: args.title,
        header_image: args.header_image,
        footer: FooterInfo::default(),
        style: ReportStyle::default(),
    };

    let is_extraction = args.extraction
        || args
            .input
            .extension()
            .is_some_and(|ext| ext.eq_ignore_ascii_case("json"));

    let result = if is_extraction {
        unitdeck::generate_from_extraction(&args.input, &args.output, &config)
    } else {
        unitdeck::generate_from_csv(&args.input, &args.output, &config)
    };

    match result {
        Ok(()) => {
            log::info!("Wrote {}", args.output.display());
            ExitCode::SUCCESS
        }
        Err(e) => {
            log::error!("{e}");
            ExitCode::FAILURE
        }
    }
}
