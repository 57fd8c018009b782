use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Parser;
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

use rm2pdf::config::{default_template_dir, RenderConfig};

/// Convert reMarkable notebooks to PDF
#[derive(Parser, Debug)]
#[command(name = "rm2pdf", version, about)]
struct Cli {
    /// Where to put the output
    #[arg(long, default_value = "output.pdf")]
    output: PathBuf,

    /// Where your reMarkable templates are stored
    #[arg(long, env = "RM2PDF_TEMPLATE_PATH", default_value_os_t = default_template_dir())]
    template_path: PathBuf,

    /// Fail on strokes drawn with an unknown tool or color instead of skipping them
    #[arg(long)]
    strict: bool,

    /// Enable debug output
    #[arg(short, long, conflicts_with = "quiet")]
    verbose: bool,

    /// Disable all log output
    #[arg(short, long)]
    quiet: bool,

    /// The .content file of the reMarkable document
    content: PathBuf,
}

fn log_level(cli: &Cli) -> &'static str {
    if cli.verbose {
        "debug"
    } else if cli.quiet {
        "off"
    } else {
        "warn"
    }
}

fn init_logging(cli: &Cli) {
    let level = log_level(cli);
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level));

    tracing_subscriber::registry()
        .with(fmt::layer().with_writer(std::io::stderr))
        .with(filter)
        .init();
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    init_logging(&cli);

    let config = RenderConfig::new(&cli.template_path).with_strict(cli.strict);
    rm2pdf::convert(&cli.content, &cli.output, config).with_context(|| {
        format!(
            "failed to convert {} to {}",
            cli.content.display(),
            cli.output.display()
        )
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn test_cli_definition() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_defaults() {
        let cli = Cli::try_parse_from(["rm2pdf", "--template-path", "/t", "note.content"]).unwrap();
        assert_eq!(cli.output, PathBuf::from("output.pdf"));
        assert_eq!(cli.template_path, PathBuf::from("/t"));
        assert!(!cli.strict && !cli.verbose && !cli.quiet);
    }

    #[test]
    fn test_verbosity_flags_pick_log_level() {
        let parse = |args: &[&str]| Cli::try_parse_from(args).unwrap();
        assert_eq!(log_level(&parse(&["rm2pdf", "note.content"])), "warn");
        assert_eq!(log_level(&parse(&["rm2pdf", "-v", "note.content"])), "debug");
        assert_eq!(log_level(&parse(&["rm2pdf", "--quiet", "note.content"])), "off");
    }

    #[test]
    fn test_verbose_and_quiet_conflict() {
        assert!(Cli::try_parse_from(["rm2pdf", "-v", "-q", "note.content"]).is_err());
    }
}
