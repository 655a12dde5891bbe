use clap::{Parser, Subcommand};
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "memex")]
#[command(author, version)]
#[command(about = "Convert memex markdown notes to HTML")]
#[command(
    long_about = "Memex converts a small markdown dialect (headings, emphasis, escapes, links, \
    citations, figures, quotes and code) into HTML. Every construct that opens must be closed: \
    a document with an unclosed construct is reported and no output is written."
)]
#[command(after_help = "\
EXAMPLES:

    # Convert a file to note.html next to it
    memex convert note.md

    # Convert from stdin to stdout
    echo '# Heading' | memex convert

    # Convert a whole directory
    memex batch notes/ site/

    # Inspect the token sequence
    memex tokens note.md

CONFIGURATION:

Memex looks for configuration files in this order:
  1. Explicit --config path
  2. memex.toml or .memex.toml in current/parent directories
  3. ~/.config/memex/config.toml (XDG)
  4. Built-in defaults

Example .memex.toml:

    paragraphs = true
    escape_html = false
    extensions = [\"md\", \"markdown\"]

    [[symbols]]
    name = \"mark\"
    spelling = \"==\"
    opening_tag = \"<mark>\"
    closing_tag = \"</mark>\"
    closes_with = \"mark\"")]
#[command(arg_required_else_help = true)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Path to config file
    #[arg(long, global = true)]
    #[arg(help = "Path to configuration file")]
    #[arg(
        long_help = "Path to a custom configuration file. If not specified, memex will \
        search for .memex.toml or memex.toml in the current directory and its parents, \
        then fall back to ~/.config/memex/config.toml."
    )]
    pub config: Option<PathBuf>,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Convert a markdown document to HTML
    #[command(
        long_about = "Convert a markdown document to HTML. Without a file, reads stdin and \
        writes the HTML to stdout. With a file, writes the HTML next to it (same name, .html \
        extension) or to --output. Existing files are never replaced unless --force is given \
        or the configuration sets overwrite = true."
    )]
    #[command(after_help = "\
EXAMPLES:

    # Convert to note.html
    memex convert note.md

    # Choose the destination
    memex convert note.md -o public/index.html

    # Replace an existing destination
    memex convert --force note.md")]
    Convert {
        /// Input file (stdin if not provided)
        #[arg(help = "Input file path")]
        file: Option<PathBuf>,

        /// Output file
        #[arg(short, long)]
        #[arg(help = "Output file path (defaults to the input path with .html)")]
        output: Option<PathBuf>,

        /// Replace an existing output file
        #[arg(long)]
        #[arg(help = "Overwrite the output file if it exists")]
        force: bool,
    },
    /// Convert every markdown file in a directory
    #[command(
        long_about = "Convert every file in INPUT_DIR whose extension is listed in the \
        configuration (md by default) and write <name>.html files into OUTPUT_DIR. \
        Subdirectories are not descended into; hidden and gitignored files are included. \
        Files are converted in parallel; a failure in one file does not stop the others, \
        but the exit code is 1 if any file failed."
    )]
    Batch {
        /// Directory containing markdown files
        input_dir: PathBuf,

        /// Directory receiving the HTML files
        output_dir: PathBuf,

        /// Replace existing output files
        #[arg(long)]
        force: bool,
    },
    /// Print the token sequence of a document for debugging
    #[command(
        long_about = "Tokenize a document and print the resulting tokens, one per line. \
        Symbols are shown by name, text runs as quoted strings. Use --json for \
        machine-readable output."
    )]
    Tokens {
        /// Input file (stdin if not provided)
        #[arg(help = "Input file path")]
        file: Option<PathBuf>,

        /// Print tokens as JSON
        #[arg(long)]
        json: bool,
    },
}
