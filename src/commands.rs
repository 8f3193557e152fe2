//! Command handlers behind the `mailevent` binary.

use crate::cli::{Cli, Commands, ConfigActions};
use crate::clock::{Clock, FixedClock, SystemClock};
use crate::config::{get_config_path, Config};
use crate::extractor::{EventExtractor, ExtractError, ExtractedEvent};
use crate::notice::Notice;
use anyhow::{Context, Result};
use chrono::NaiveDateTime;
use log::{debug, error, info};
use rustyline::error::ReadlineError;
use rustyline::DefaultEditor;
use serde::Serialize;
use std::fs;
use std::io::{self, Read};
use std::path::Path;

pub fn run(cli: Cli, config: Config) -> Result<()> {
    match cli.command {
        Commands::Extract {
            file,
            compact,
            trace,
            now,
        } => {
            let pretty = config.output.pretty && !compact;
            extract_command(file.as_deref(), pretty, trace, now, &config)
        }
        Commands::Interactive => interactive(&config),
        Commands::Config { action } => config_command(action, &config),
    }
}

fn clock_for(now: Option<NaiveDateTime>) -> Box<dyn Clock> {
    match now {
        Some(instant) => Box::new(FixedClock(instant)),
        None => Box::new(SystemClock),
    }
}

fn read_input(file: Option<&Path>) -> Result<String> {
    match file {
        Some(path) => fs::read_to_string(path)
            .with_context(|| format!("Failed to read {}", path.display())),
        None => {
            let mut buffer = String::new();
            io::stdin()
                .read_to_string(&mut buffer)
                .context("Failed to read standard input")?;
            Ok(buffer)
        }
    }
}

pub fn to_json<T: Serialize>(value: &T, pretty: bool) -> Result<String> {
    let json = if pretty {
        serde_json::to_string_pretty(value)?
    } else {
        serde_json::to_string(value)?
    };
    Ok(json)
}

fn extract_command(
    file: Option<&Path>,
    pretty: bool,
    trace: bool,
    now: Option<NaiveDateTime>,
    config: &Config,
) -> Result<()> {
    let text = read_input(file)?;
    let extractor = EventExtractor::with_clock(clock_for(now));

    let (event, output) = match render_extraction(&extractor, &text, pretty, trace) {
        Ok(rendered) => rendered,
        Err(e) => {
            if let Some(extract_err) = e.downcast_ref::<ExtractError>() {
                eprintln!("{}", Notice::failure(extract_err));
            }
            return Err(e);
        }
    };

    println!("{}", output);
    report(&event, config);
    Ok(())
}

/// Extract once and render either the event or its trace as JSON
fn render_extraction<C: Clock>(
    extractor: &EventExtractor<C>,
    text: &str,
    pretty: bool,
    trace: bool,
) -> Result<(ExtractedEvent, String)> {
    let (event, extraction_trace) = extractor.try_extract_traced(text)?;
    let output = if trace {
        to_json(&extraction_trace, pretty)?
    } else {
        to_json(&event, pretty)?
    };
    Ok((event, output))
}

fn report(event: &ExtractedEvent, config: &Config) {
    let notice = Notice::for_event(event, config.notify.low_confidence_threshold);
    eprintln!("{}", notice);
}

fn interactive(config: &Config) -> Result<()> {
    let extractor = EventExtractor::new();
    let mut rl = DefaultEditor::new()?;
    let mut buffer = String::new();

    println!("Paste an email, then press Enter on an empty line. Ctrl-D exits.");

    loop {
        let prompt = if buffer.is_empty() { ">> " } else { ".. " };
        match rl.readline(prompt) {
            Ok(line) if line.trim().is_empty() => {
                if buffer.is_empty() {
                    continue;
                }
                let _ = rl.add_history_entry(buffer.trim_end());
                match extractor.try_extract(&buffer) {
                    Ok(event) => {
                        println!("{}", to_json(&event, config.output.pretty)?);
                        report(&event, config);
                    }
                    Err(e) => {
                        error!("Failed to extract event: {}", e);
                        eprintln!("{}", Notice::failure(&e));
                    }
                }
                buffer.clear();
            }
            Ok(line) => {
                buffer.push_str(&line);
                buffer.push('\n');
            }
            Err(ReadlineError::Interrupted) => {
                println!("CTRL-C");
                break;
            }
            Err(ReadlineError::Eof) => {
                println!("CTRL-D");
                break;
            }
            Err(err) => {
                error!("Readline error: {:?}", err);
                break;
            }
        }
    }

    info!("Leaving interactive mode");
    Ok(())
}

fn config_command(action: ConfigActions, config: &Config) -> Result<()> {
    match action {
        ConfigActions::Show => {
            print!("{}", toml::to_string_pretty(config)?);
        }
        ConfigActions::Path => {
            println!("{}", get_config_path()?.display());
        }
        ConfigActions::Init => {
            let path = get_config_path()?;
            if path.exists() {
                println!("Config already exists at {}", path.display());
            } else {
                let written = Config::default().save()?;
                debug!("Wrote default config");
                println!("Wrote default config to {}", written.display());
            }
        }
    }
    Ok(())
}
