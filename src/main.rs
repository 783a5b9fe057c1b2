//! Input Mask CLI Application.
//!
//! This binary exposes the masking engine on the command line: format a
//! value (or a file of values, one per line), parse a formatted value back
//! to raw data, validate raw data, or list the registered masks.

use anyhow::{Context, Result};
use clap::{Args, Parser, Subcommand};
use log::debug;
use std::path::{Path, PathBuf};

use inputmask::{MaskOptions, MaskRegistry, MaskResult};

/// Input Mask Tool
///
/// Format, parse and validate values with phone, currency, card and
/// custom pattern masks.
#[derive(Parser)]
#[command(name = "inputmask")]
#[command(version, about, long_about = None)]
struct Cli {
    /// Enable verbose output
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

/// Mask selection shared by every subcommand.
#[derive(Args, Debug, Default)]
struct MaskArgs {
    /// Mask id (phone, currency, credit-card, serial, pattern, date, ...)
    #[arg(short, long, value_name = "ID")]
    mask: Option<String>,

    /// Placeholder pattern, e.g. "##-##-##" (implies --mask pattern)
    #[arg(short, long, value_name = "PATTERN")]
    pattern: Option<String>,

    /// Expected number of data characters in the pattern
    #[arg(long, value_name = "N")]
    max_length: Option<usize>,

    /// Mask options as JSON, e.g. '{"transform":"uppercase"}'
    #[arg(long, value_name = "JSON")]
    options: Option<String>,
}

#[derive(Subcommand)]
enum Commands {
    /// Format a value, or every line of a file
    Apply {
        #[command(flatten)]
        mask: MaskArgs,

        /// Value to format
        #[arg(required_unless_present = "file")]
        input: Option<String>,

        /// Caret position (in characters) within the input
        #[arg(short, long)]
        caret: Option<usize>,

        /// Format each line of this file instead
        #[arg(short, long, value_name = "FILE", conflicts_with = "input")]
        file: Option<PathBuf>,

        /// Print the full result as JSON
        #[arg(long)]
        json: bool,
    },

    /// Recover the raw value from a formatted one
    Parse {
        #[command(flatten)]
        mask: MaskArgs,

        /// Formatted value
        formatted: String,
    },

    /// Check whether a raw value is complete (exit code 1 if not)
    Validate {
        #[command(flatten)]
        mask: MaskArgs,

        /// Raw value
        raw: String,
    },

    /// List registered masks
    List,
}

impl MaskArgs {
    /// Resolves the mask id and options these arguments describe.
    fn resolve(&self) -> Result<(String, Option<MaskOptions>)> {
        let mut options = match &self.options {
            Some(json) => Some(MaskOptions::from_json(json).context("Failed to parse --options")?),
            None => None,
        };

        if self.pattern.is_some() || self.max_length.is_some() {
            let options = options.get_or_insert_with(MaskOptions::default);
            if let Some(pattern) = &self.pattern {
                options.pattern = Some(pattern.clone());
            }
            if let Some(max_length) = self.max_length {
                options.max_length = Some(max_length);
            }
        }

        let id = match (&self.mask, &self.pattern) {
            (Some(id), _) => id.clone(),
            (None, Some(_)) => inputmask::CustomPatternMask::ID.to_string(),
            (None, None) => anyhow::bail!("No mask specified. Use --mask or --pattern."),
        };

        Ok((id, options))
    }
}

/// Command handler over a mask registry.
struct MaskCommandHandler<'r> {
    registry: &'r MaskRegistry,
    verbose: bool,
}

impl<'r> MaskCommandHandler<'r> {
    fn new(registry: &'r MaskRegistry, verbose: bool) -> Self {
        Self { registry, verbose }
    }

    /// Warns on stderr when the id is unknown; the engine still passes through.
    fn check_known(&self, id: &str) {
        if !self.registry.contains(id) {
            eprintln!("⚠ No mask registered as '{}', values pass through unchanged", id);
        }
    }

    fn print_result(&self, result: &MaskResult, json: bool) -> Result<()> {
        if json {
            println!("{}", serde_json::to_string(result)?);
        } else {
            println!("{}", result.formatted);
            if self.verbose {
                println!("  raw:   {}", result.raw);
                if let Some(caret) = result.caret {
                    println!("  caret: {}", caret);
                }
            }
        }
        Ok(())
    }

    fn apply(
        &self,
        mask: &MaskArgs,
        input: Option<&str>,
        caret: Option<usize>,
        file: Option<&Path>,
        json: bool,
    ) -> Result<()> {
        let (id, options) = mask.resolve()?;
        self.check_known(&id);
        debug!("applying mask '{}' with {:?}", id, options);

        if let Some(path) = file {
            let text = std::fs::read_to_string(path)
                .with_context(|| format!("Failed to read {}", path.display()))?;
            for line in text.lines() {
                let result = self.registry.apply(&id, line, None, options.as_ref());
                self.print_result(&result, json)?;
            }
            return Ok(());
        }

        let input = input.ok_or_else(|| anyhow::anyhow!("An input value or --file is required"))?;
        let result = self.registry.apply(&id, input, caret, options.as_ref());
        self.print_result(&result, json)
    }

    fn parse(&self, mask: &MaskArgs, formatted: &str) -> Result<()> {
        let (id, options) = mask.resolve()?;
        self.check_known(&id);
        println!("{}", self.registry.parse(&id, formatted, options.as_ref()));
        Ok(())
    }

    fn validate(&self, mask: &MaskArgs, raw: &str) -> Result<bool> {
        let (id, options) = mask.resolve()?;
        self.check_known(&id);
        let valid = self.registry.validate(&id, raw, options.as_ref());
        println!("{}", if valid { "✓ valid" } else { "✗ invalid" });
        Ok(valid)
    }

    fn list(&self) {
        for id in self.registry.list() {
            println!("{}", id);
        }
    }
}

fn init_logging(verbose: bool) {
    let default_filter = if verbose { "debug" } else { "warn" };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(default_filter))
        .init();
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    let handler = MaskCommandHandler::new(MaskRegistry::global(), cli.verbose);

    match &cli.command {
        Commands::Apply {
            mask,
            input,
            caret,
            file,
            json,
        } => handler.apply(mask, input.as_deref(), *caret, file.as_deref(), *json)?,
        Commands::Parse { mask, formatted } => handler.parse(mask, formatted)?,
        Commands::Validate { mask, raw } => {
            if !handler.validate(mask, raw)? {
                std::process::exit(1);
            }
        }
        Commands::List => handler.list(),
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_pattern_implies_custom_mask() {
        let args = MaskArgs {
            pattern: Some("##-##".to_string()),
            ..MaskArgs::default()
        };
        let (id, options) = args.resolve().unwrap();
        assert_eq!(id, "pattern");
        assert_eq!(options.unwrap().pattern.as_deref(), Some("##-##"));
    }

    #[test]
    fn test_flags_override_json_options() {
        let args = MaskArgs {
            mask: Some("serial".to_string()),
            pattern: Some("XX-XX".to_string()),
            options: Some(r###"{"pattern":"##","transform":"lowercase"}"###.to_string()),
            ..MaskArgs::default()
        };
        let (id, options) = args.resolve().unwrap();
        let options = options.unwrap();
        assert_eq!(id, "serial");
        assert_eq!(options.pattern.as_deref(), Some("XX-XX"));
        assert_eq!(options.transform, Some(inputmask::Transform::Lowercase));
    }

    #[test]
    fn test_missing_mask_rejected() {
        assert!(MaskArgs::default().resolve().is_err());
    }

    #[test]
    fn test_bad_options_json_rejected() {
        let args = MaskArgs {
            mask: Some("phone".to_string()),
            options: Some("{".to_string()),
            ..MaskArgs::default()
        };
        assert!(args.resolve().is_err());
    }
}
