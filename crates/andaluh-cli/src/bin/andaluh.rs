use std::path::{Path, PathBuf};

use clap::{Args, Parser, Subcommand};

use andaluh_cli::commands::epa_ops::{self, OptionOverrides};
use andaluh_cli::commands::config_ops;

#[derive(Parser)]
#[command(name = "andaluh", about = "Castilian Spanish to Andalusian EPA transliteration")]
struct Cli {
    /// Write trace events as JSON lines into this directory
    #[arg(long, global = true)]
    trace_dir: Option<PathBuf>,
    #[command(subcommand)]
    command: Command,
}

#[derive(Args)]
struct EpaArgs {
    /// Vowel-affecting fricative marker (default ç)
    #[arg(long)]
    vaf: Option<char>,
    /// Velar voiceless fricative marker (default h)
    #[arg(long)]
    vvf: Option<char>,
    /// Leave URLs, mentions, hashtags and Roman numerals untouched
    #[arg(short, long)]
    escape_links: bool,
    /// Emit the text after every rule as debug events on stderr
    #[arg(long)]
    debug: bool,
    /// Settings file with an [epa] table
    #[arg(long)]
    config: Option<PathBuf>,
}

impl EpaArgs {
    fn overrides(&self) -> OptionOverrides {
        OptionOverrides {
            vaf: self.vaf,
            vvf: self.vvf,
            escape_links: self.escape_links,
            debug: self.debug,
        }
    }
}

#[derive(Subcommand)]
enum Command {
    /// Transliterate TEXT, a file, or stdin line by line
    Epa {
        /// Text to transliterate
        text: Option<String>,
        /// Read the input from this file
        #[arg(short, long, conflicts_with = "text")]
        file: Option<String>,
        #[command(flatten)]
        options: EpaArgs,
    },
    /// Show the text after every rule
    Explain {
        /// Text to explain
        text: String,
        /// Output as JSON instead of text
        #[arg(long)]
        json: bool,
        #[command(flatten)]
        options: EpaArgs,
    },
    /// Print the default settings TOML
    SettingsExport,
    /// Check a settings TOML file
    SettingsValidate {
        /// Path to the settings file
        file: String,
    },
}

fn init_tracing(trace_dir: Option<&Path>, args: &EpaArgs) {
    if trace_dir.is_some() || args.debug {
        andaluh::trace_init::init_tracing(trace_dir);
    }
}

fn main() {
    let cli = Cli::parse();
    let trace_dir = cli.trace_dir.as_deref();

    match cli.command {
        Command::Epa {
            text,
            file,
            options,
        } => {
            init_tracing(trace_dir, &options);
            let resolved = epa_ops::resolve_options(options.config.as_deref(), &options.overrides());
            epa_ops::epa_cmd(text.as_deref(), file.as_deref(), &resolved);
        }
        Command::Explain {
            text,
            json,
            options,
        } => {
            init_tracing(trace_dir, &options);
            let resolved = epa_ops::resolve_options(options.config.as_deref(), &options.overrides());
            epa_ops::explain_cmd(&text, &resolved, json);
        }
        Command::SettingsExport => config_ops::settings_export(),
        Command::SettingsValidate { file } => config_ops::settings_validate(&file),
    }
}
