use clap::Parser;
use std::path::PathBuf;

#[derive(Clone, Debug, Default, Parser)]
/// Shape first-order terms interactively by rewrite rules
pub struct Opt {
    /// Show terms in LaTeX from the start
    ///
    /// The notation can be switched at any time with the `latex` command.
    #[arg(long)]
    pub latex: bool,

    /// Print neither prompts nor the list of known rules
    #[arg(long)]
    pub quiet: bool,

    /// Print every line before executing it
    #[arg(long)]
    pub echo: bool,

    /// Exit after running the given scripts
    #[arg(long)]
    pub batch: bool,

    /// Scripts to run before reading from standard input
    ///
    /// Every script is run as if it was loaded with the `load` command.
    /// Script files must have the extension `.shp`.
    #[arg(value_name = "FILE")]
    pub files: Vec<PathBuf>,
}
