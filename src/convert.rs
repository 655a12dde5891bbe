//! Document conversion: table construction, file I/O and batch processing.

use std::fs::{self, File, OpenOptions};
use std::io::{self, BufReader, Read, Write};
use std::path::{Path, PathBuf};

use ignore::WalkBuilder;
#[cfg(not(target_arch = "wasm32"))]
use rayon::prelude::*;

use crate::config::Config;
use crate::dialect;
use crate::error::Error;
use crate::renderer::{RenderError, Renderer};
use crate::symbols::{SymbolDef, SymbolTable};
use crate::tokenizer::{Token, Tokenizer};

/// Converts documents with one symbol table built at construction time.
///
/// The table is immutable, so a `Converter` can be shared across threads;
/// each conversion uses its own tokenizer and renderer state.
#[derive(Debug)]
pub struct Converter {
    table: SymbolTable,
    config: Config,
}

/// Result of converting one file during a batch run.
#[derive(Debug)]
pub struct BatchOutcome {
    pub input: PathBuf,
    pub output: PathBuf,
    pub result: Result<(), Error>,
}

impl Converter {
    pub fn new(config: Config) -> Result<Self, Error> {
        let mut defs: Vec<SymbolDef> = Vec::new();
        if config.builtin_symbols {
            defs.extend(dialect::symbols());
        }
        defs.extend(config.symbols.iter().cloned());

        let table = SymbolTable::new(defs)?;
        Ok(Self { table, config })
    }

    pub fn table(&self) -> &SymbolTable {
        &self.table
    }

    pub fn config(&self) -> &Config {
        &self.config
    }

    pub fn tokenize(&self, input: &str) -> Vec<Token<'_>> {
        let normalized = input.replace("\r\n", "\n");
        Tokenizer::new(&self.table).tokenize(normalized.chars())
    }

    pub fn render(&self, tokens: &[Token<'_>]) -> Result<String, RenderError> {
        Renderer::new(&self.table, self.config.render_options()).render(tokens)
    }

    pub fn convert(&self, input: &str) -> Result<String, Error> {
        let tokens = self.tokenize(input);
        Ok(self.render(&tokens)?)
    }

    pub fn convert_reader<R: Read>(&self, mut reader: R) -> Result<String, Error> {
        let mut input = String::new();
        reader.read_to_string(&mut input)?;
        self.convert(&input)
    }

    /// Convert `input` and write the HTML to `output`.
    ///
    /// An existing `output` is an error unless the config allows overwriting.
    /// Nothing is written when the document is malformed.
    pub fn convert_file(&self, input: &Path, output: &Path) -> Result<(), Error> {
        log::info!(
            "Converting input file {} to HTML at {}",
            input.display(),
            output.display()
        );
        let html = self.convert_reader(BufReader::new(File::open(input)?))?;
        self.write_output(output, &html)?;
        Ok(())
    }

    /// Write rendered HTML to `output`.
    ///
    /// Fails with `AlreadyExists` if `output` exists and the config does not
    /// allow overwriting.
    pub fn write_output(&self, output: &Path, html: &str) -> io::Result<()> {
        let mut options = OpenOptions::new();
        options.write(true);
        if self.config.overwrite {
            options.create(true).truncate(true);
        } else {
            options.create_new(true);
        }
        let mut file = options.open(output)?;
        file.write_all(html.as_bytes())
    }

    /// Files in `input_dir` (not descending) whose extension is configured for conversion.
    pub fn files_to_convert(&self, input_dir: &Path) -> io::Result<Vec<PathBuf>> {
        if !input_dir.is_dir() {
            return Err(io::Error::new(
                io::ErrorKind::NotFound,
                format!("{} is not a directory", input_dir.display()),
            ));
        }

        // Hidden and gitignored notes are converted too.
        let mut files: Vec<PathBuf> = WalkBuilder::new(input_dir)
            .standard_filters(false)
            .max_depth(Some(1))
            .build()
            .filter_map(|entry| match entry {
                Ok(entry) => Some(entry),
                Err(e) => {
                    log::warn!("Skipping unreadable entry: {e}");
                    None
                }
            })
            .filter(|entry| entry.file_type().is_some_and(|t| t.is_file()))
            .map(|entry| entry.into_path())
            .filter(|path| self.has_convertible_extension(path))
            .collect();
        files.sort();
        Ok(files)
    }

    fn has_convertible_extension(&self, path: &Path) -> bool {
        path.extension()
            .and_then(|ext| ext.to_str())
            .is_some_and(|ext| self.config.extensions.iter().any(|e| e == ext))
    }

    /// Convert every matching file of `input_dir` into `output_dir`.
    pub fn convert_dir(
        &self,
        input_dir: &Path,
        output_dir: &Path,
    ) -> io::Result<Vec<BatchOutcome>> {
        let files = self.files_to_convert(input_dir)?;
        fs::create_dir_all(output_dir)?;
        log::debug!(
            "Converting {} file(s) from {} into {}",
            files.len(),
            input_dir.display(),
            output_dir.display()
        );

        let convert_one = |input: &PathBuf| {
            let output = output_path_for(input, output_dir);
            let result = self.convert_file(input, &output);
            if let Err(e) = &result {
                log::debug!("Failed to convert {}: {e}", input.display());
            }
            BatchOutcome {
                input: input.clone(),
                output,
                result,
            }
        };

        #[cfg(not(target_arch = "wasm32"))]
        let outcomes: Vec<BatchOutcome> = files.par_iter().map(convert_one).collect();
        #[cfg(target_arch = "wasm32")]
        let outcomes: Vec<BatchOutcome> = files.iter().map(convert_one).collect();

        Ok(outcomes)
    }
}

/// `<output_dir>/<input stem>.html`
pub fn output_path_for(input: &Path, output_dir: &Path) -> PathBuf {
    let mut name = input.file_stem().unwrap_or(input.as_os_str()).to_os_string();
    name.push(".html");
    output_dir.join(name)
}
