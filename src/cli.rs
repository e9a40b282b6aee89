use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};

#[derive(Parser, Debug)]
#[command(
    name = "citecheck",
    version,
    about = "Footnote citation classification and source tracking for law journal drafts"
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    Classify(ClassifyArgs),
    Citations(CitationsArgs),
    Inspect(InspectArgs),
}

#[derive(Args, Debug, Clone)]
pub struct ClassifyArgs {
    #[arg(required = true)]
    pub texts: Vec<String>,

    #[arg(long, default_value_t = false)]
    pub json: bool,
}

#[derive(Args, Debug, Clone)]
pub struct CitationsArgs {
    pub input_file: PathBuf,

    #[arg(long, default_value = "splitter.json")]
    pub splitter_config: PathBuf,

    #[arg(long, default_value_t = 1)]
    pub num_acknowledgment_footnotes: i64,

    #[arg(long, default_value = "output")]
    pub output_folder: PathBuf,

    #[arg(long)]
    pub manifest_path: Option<PathBuf>,
}

#[derive(Args, Debug, Clone)]
pub struct InspectArgs {
    pub sheet_path: PathBuf,
}
