use std::env;
use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use serde::Deserialize;

use crate::renderer::RenderOptions;
use crate::symbols::SymbolDef;

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Wrap inline content in `<p>` elements
    pub paragraphs: bool,
    /// Escape HTML special characters in text content
    pub escape_html: bool,
    /// Start from the built-in dialect table
    pub builtin_symbols: bool,
    /// Extra symbol definitions, appended to the table in order
    pub symbols: Vec<SymbolDef>,
    /// File extensions picked up by batch conversion
    pub extensions: Vec<String>,
    /// Replace existing output files
    pub overwrite: bool,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            paragraphs: true,
            escape_html: false,
            builtin_symbols: true,
            symbols: Vec::new(),
            extensions: vec!["md".to_string()],
            overwrite: false,
        }
    }
}

impl Config {
    pub fn render_options(&self) -> RenderOptions {
        RenderOptions {
            paragraphs: self.paragraphs,
            escape_html: self.escape_html,
        }
    }
}

#[derive(Default, Clone)]
pub struct ConfigBuilder {
    config: Config,
}

impl ConfigBuilder {
    pub fn paragraphs(mut self, enabled: bool) -> Self {
        self.config.paragraphs = enabled;
        self
    }

    pub fn escape_html(mut self, enabled: bool) -> Self {
        self.config.escape_html = enabled;
        self
    }

    pub fn builtin_symbols(mut self, enabled: bool) -> Self {
        self.config.builtin_symbols = enabled;
        self
    }

    pub fn symbol(mut self, def: SymbolDef) -> Self {
        self.config.symbols.push(def);
        self
    }

    pub fn extensions<I, S>(mut self, extensions: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.config.extensions = extensions.into_iter().map(Into::into).collect();
        self
    }

    pub fn overwrite(mut self, enabled: bool) -> Self {
        self.config.overwrite = enabled;
        self
    }

    pub fn build(self) -> Config {
        self.config
    }
}

const CANDIDATE_NAMES: &[&str] = &[".memex.toml", "memex.toml"];

fn parse_config_str(s: &str, path: &Path) -> io::Result<Config> {
    toml::from_str::<Config>(s).map_err(|e| {
        io::Error::new(
            io::ErrorKind::InvalidData,
            format!("invalid config {}: {e}", path.display()),
        )
    })
}

fn read_config(path: &Path) -> io::Result<Config> {
    log::debug!("Reading config from: {}", path.display());
    let s = fs::read_to_string(path)?;
    let config = parse_config_str(&s, path)?;
    log::info!("Loaded config from: {}", path.display());
    Ok(config)
}

fn find_in_tree(start_dir: &Path) -> Option<PathBuf> {
    for dir in start_dir.ancestors() {
        for name in CANDIDATE_NAMES {
            let p = dir.join(name);
            if p.is_file() {
                return Some(p);
            }
        }
    }
    None
}

fn xdg_config_path() -> Option<PathBuf> {
    if let Ok(xdg) = env::var("XDG_CONFIG_HOME") {
        let p = Path::new(&xdg).join("memex").join("config.toml");
        if p.is_file() {
            return Some(p);
        }
    }
    if let Ok(home) = env::var("HOME") {
        let p = Path::new(&home)
            .join(".config")
            .join("memex")
            .join("config.toml");
        if p.is_file() {
            return Some(p);
        }
    }
    None
}

/// Load configuration with precedence:
/// 1) explicit path (error if unreadable/invalid)
/// 2) walk up from start_dir: .memex.toml, memex.toml
/// 3) XDG: $XDG_CONFIG_HOME/memex/config.toml or ~/.config/memex/config.toml
/// 4) default config
pub fn load(explicit: Option<&Path>, start_dir: &Path) -> io::Result<(Config, Option<PathBuf>)> {
    if let Some(path) = explicit {
        let cfg = read_config(path)?;
        return Ok((cfg, Some(path.to_path_buf())));
    }

    if let Some(p) = find_in_tree(start_dir) {
        match read_config(&p) {
            Ok(cfg) => return Ok((cfg, Some(p))),
            Err(e) => log::warn!("Ignoring {}: {e}", p.display()),
        }
    }

    if let Some(p) = xdg_config_path()
        && let Ok(cfg) = read_config(&p)
    {
        return Ok((cfg, Some(p)));
    }

    log::debug!("No config file found, using defaults");
    Ok((Config::default(), None))
}
