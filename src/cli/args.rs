//! Command-line interface definitions.

use clap::{ColorChoice, Parser, Subcommand};
use std::path::PathBuf;

use crate::shaper::ShaperToken;

/// Move cut settings between Affinity Designer layer names and Shaper Origin
/// SVG attributes
#[derive(Parser, Debug, Clone)]
#[command(version, about, long_about = None, arg_required_else_help = true)]
pub struct Cli {
    /// Control colored output (auto, always, never)
    #[arg(long, global = true, default_value = "auto")]
    pub color: ColorChoice,

    /// Enable verbose output for debugging
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Config file path (default: shaper.toml, searched upward)
    #[arg(short = 'C', long, global = true, value_hint = clap::ValueHint::FilePath)]
    pub config: Option<PathBuf>,

    /// subcommands
    #[command(subcommand)]
    pub command: Commands,
}

/// Available subcommands
#[derive(Subcommand, Debug, Clone)]
pub enum Commands {
    /// Turn layer-name tokens into shaper: attributes
    #[command(visible_alias = "c")]
    Convert {
        #[command(flatten)]
        args: ConvertArgs,
    },

    /// Fold shaper: attributes back into layer names
    #[command(visible_alias = "r")]
    Revert {
        #[command(flatten)]
        args: RevertArgs,
    },
}

/// Convert command arguments.
#[derive(clap::Args, Debug, Clone)]
pub struct ConvertArgs {
    /// Input SVG file or glob pattern (quote it: "drawings/*.svg")
    #[arg(value_name = "INPUT", value_hint = clap::ValueHint::AnyPath)]
    pub input: String,

    /// Output file, or existing directory for glob input.
    /// Default: `<name>-converted.svg` next to each input
    #[arg(short, long, value_hint = clap::ValueHint::AnyPath)]
    pub output: Option<PathBuf>,

    /// Global shaper attributes, e.g. `-g shaper:cutDepth=3mm shaper:toolDia=6mm`.
    /// Applied where neither the element nor its group sets the name
    #[arg(short = 'g', long = "attr", value_name = "TOKEN", num_args = 1..)]
    pub attrs: Vec<ShaperToken>,
}

/// Revert command arguments.
#[derive(clap::Args, Debug, Clone)]
pub struct RevertArgs {
    /// Input SVG files exported by Shaper Studio
    #[arg(value_name = "INPUT", required = true, value_hint = clap::ValueHint::FilePath)]
    pub inputs: Vec<PathBuf>,

    /// Output file, or existing directory for several inputs.
    /// Default: `<name>-converted.svg` next to each input
    #[arg(short, long, value_hint = clap::ValueHint::AnyPath)]
    pub output: Option<PathBuf>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_convert() {
        let cli = Cli::try_parse_from([
            "shaper-svg",
            "-v",
            "c",
            "in.svg",
            "-o",
            "out.svg",
            "-g",
            "shaper:cutDepth=3mm",
            "shaper:toolDia=6mm",
        ])
        .unwrap();
        assert!(cli.verbose);
        let Commands::Convert { args } = cli.command else {
            panic!("expected convert");
        };
        assert_eq!(args.input, "in.svg");
        assert_eq!(args.output, Some(PathBuf::from("out.svg")));
        assert_eq!(
            args.attrs,
            vec![
                ShaperToken::new("cutDepth", "3mm"),
                ShaperToken::new("toolDia", "6mm"),
            ]
        );
    }

    #[test]
    fn test_parse_rejects_malformed_token() {
        let result = Cli::try_parse_from(["shaper-svg", "convert", "in.svg", "-g", "cutDepth=3mm"]);
        assert!(result.is_err());
    }

    #[test]
    fn test_parse_revert() {
        let cli =
            Cli::try_parse_from(["shaper-svg", "revert", "a.svg", "b.svg", "-C", "x.toml"]).unwrap();
        assert_eq!(cli.config, Some(PathBuf::from("x.toml")));
        let Commands::Revert { args } = cli.command else {
            panic!("expected revert");
        };
        assert_eq!(args.inputs.len(), 2);
        assert!(args.output.is_none());

        assert!(Cli::try_parse_from(["shaper-svg", "revert"]).is_err());
    }
}
