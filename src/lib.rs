pub mod config;
pub mod convert;
pub mod dialect;
pub mod error;
pub mod renderer;
pub mod symbols;
pub mod tokenizer;

pub use config::Config;
pub use config::ConfigBuilder;
pub use convert::{BatchOutcome, Converter};
pub use error::Error;
pub use renderer::{RenderError, RenderOptions, Renderer};
pub use symbols::{Role, Symbol, SymbolDef, SymbolTable, SymbolTableError, TrieProbe};
pub use tokenizer::{Token, Tokenizer};

#[cfg(debug_assertions)]
fn init_logger() {
    let _ = env_logger::builder().is_test(true).try_init();
}

/// Converts a memex markdown document to HTML.
///
/// Builds the symbol table for `config` (the built-in dialect by default),
/// tokenizes the input and renders the tokens. Malformed nesting yields
/// [`Error::Render`] and no output.
///
/// # Examples
///
/// ```rust
/// let html = memex::convert("this is *bold* text", None).unwrap();
/// assert_eq!(html, "<p>this is <b>bold</b> text</p>");
/// ```
///
/// # Arguments
///
/// * `input` - The markdown document
/// * `config` - Optional configuration (defaults to default config)
pub fn convert(input: &str, config: Option<Config>) -> Result<String, Error> {
    #[cfg(debug_assertions)]
    {
        init_logger();
    }

    let converter = Converter::new(config.unwrap_or_default())?;
    converter.convert(input)
}
