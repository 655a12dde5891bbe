use std::fs;
use std::io::{self, Read};
use std::path::{Path, PathBuf};

use clap::Parser;

use memex::{Config, Converter, Error, Token};

mod cli;
use cli::{Cli, Commands};

fn read_all(path: Option<&PathBuf>) -> io::Result<String> {
    match path {
        Some(p) => fs::read_to_string(p),
        None => {
            let mut buf = String::new();
            io::stdin().read_to_string(&mut buf)?;
            Ok(buf)
        }
    }
}

fn start_dir_for(input_path: Option<&Path>) -> io::Result<PathBuf> {
    if let Some(p) = input_path {
        Ok(p.parent().unwrap_or(Path::new(".")).to_path_buf())
    } else {
        std::env::current_dir()
    }
}

fn load_config(explicit: Option<&Path>, start_dir: &Path) -> io::Result<Config> {
    let (cfg, cfg_path) = memex::config::load(explicit, start_dir)?;

    if let Some(path) = &cfg_path {
        log::debug!("Using config from: {}", path.display());
    } else {
        log::debug!("Using default config");
    }

    Ok(cfg)
}

/// Report a conversion error and exit. I/O errors are returned to the caller instead.
fn exit_on_error<T>(result: Result<T, Error>) -> io::Result<T> {
    match result {
        Ok(value) => Ok(value),
        Err(Error::Io(e)) => Err(e),
        Err(e) => {
            eprintln!("Error: {e}");
            std::process::exit(1);
        }
    }
}

fn print_tokens(tokens: &[Token<'_>]) {
    for token in tokens {
        match token {
            Token::Symbol(symbol) => println!("SYMBOL {} {:?}", symbol.name, symbol.spelling),
            Token::Text(text) => println!("TEXT {text:?}"),
        }
    }
}

fn main() -> io::Result<()> {
    env_logger::init();

    let cli = Cli::parse();

    match cli.command {
        Commands::Convert {
            file,
            output,
            force,
        } => {
            let start_dir = start_dir_for(file.as_deref())?;
            let mut cfg = load_config(cli.config.as_deref(), &start_dir)?;
            cfg.overwrite |= force;
            let converter = exit_on_error(Converter::new(cfg))?;

            match &file {
                Some(input_path) => {
                    let output_path = output.unwrap_or_else(|| input_path.with_extension("html"));
                    exit_on_error(converter.convert_file(input_path, &output_path))?;
                    println!(
                        "Converted {} -> {}",
                        input_path.display(),
                        output_path.display()
                    );
                }
                None => {
                    let input = read_all(None)?;
                    let html = exit_on_error(converter.convert(&input))?;
                    match output {
                        Some(output_path) => converter.write_output(&output_path, &html)?,
                        None => print!("{html}"),
                    }
                }
            }

            Ok(())
        }
        Commands::Batch {
            input_dir,
            output_dir,
            force,
        } => {
            let mut cfg = load_config(cli.config.as_deref(), &input_dir)?;
            cfg.overwrite |= force;
            let converter = exit_on_error(Converter::new(cfg))?;

            let outcomes = converter.convert_dir(&input_dir, &output_dir)?;
            let mut failed = 0;
            for outcome in &outcomes {
                match &outcome.result {
                    Ok(()) => println!(
                        "Converted {} -> {}",
                        outcome.input.display(),
                        outcome.output.display()
                    ),
                    Err(e) => {
                        failed += 1;
                        eprintln!("Failed {}: {e}", outcome.input.display());
                    }
                }
            }

            println!(
                "\n{} converted, {} failed",
                outcomes.len() - failed,
                failed
            );
            if failed > 0 {
                std::process::exit(1);
            }
            Ok(())
        }
        Commands::Tokens { file, json } => {
            let start_dir = start_dir_for(file.as_deref())?;
            let cfg = load_config(cli.config.as_deref(), &start_dir)?;
            let converter = exit_on_error(Converter::new(cfg))?;

            let input = read_all(file.as_ref())?;
            let tokens = converter.tokenize(&input);
            if json {
                let out = serde_json::to_string_pretty(&tokens).map_err(io::Error::other)?;
                println!("{out}");
            } else {
                print_tokens(&tokens);
            }
            Ok(())
        }
    }
}
