use anyhow::{Context, Result};
use clap::{CommandFactory, Parser};
use std::path::PathBuf;
use web_icon_gen::{icon_gen, IconError, DEFAULT_OUTPUT_DIR};

#[derive(Debug, Parser)]
#[clap(
    name = "web-icon-gen",
    about = "Generate the favicon and app icons of the web app from one source image"
)]
struct Args {
    /// Path to the source image (any common raster format).
    #[clap(value_name = "INPUT")]
    input: Option<PathBuf>,

    /// Output directory.
    #[clap(short, long, value_name = "DIR", default_value = DEFAULT_OUTPUT_DIR)]
    output: PathBuf,

    /// Print the summary of written files as JSON
    #[clap(long)]
    json: bool,
}

fn main() -> Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("warn")).init();

    let args = Args::parse();

    let Some(input) = args.input else {
        println!("{}", Args::command().render_usage());
        return Err(IconError::Usage.into());
    };

    let report = icon_gen::generate_icons(&input, &args.output, !args.json)?;

    if args.json {
        let json = report.to_json().context("Failed to serialize report")?;
        println!("{json}");
    } else {
        report.print_summary();
    }

    Ok(())
}
