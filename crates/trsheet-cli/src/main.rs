mod commands;
mod output;

use clap::{Parser, Subcommand};
use std::path::PathBuf;

#[derive(Parser)]
#[command(
    name = "trsheet",
    version,
    about = "Turn CivilPro test request PDFs into a spreadsheet of tests"
)]
struct Cli {
    /// Log pipeline decisions (same as RUST_LOG=debug)
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Extract test requests from a CivilPro "Test Requests (pdf)" export
    Process {
        /// Path to the PDF export
        input_file: PathBuf,

        /// Preview format: table (default) or json
        #[arg(short, long, default_value = "table")]
        output: String,

        /// Where to write the spreadsheet
        #[arg(
            short = 'O',
            long = "out",
            value_name = "FILE",
            default_value = trsheet_core::export::EXPORT_FILE_NAME
        )]
        out: PathBuf,

        /// Custom JSON rule file (default: built-in CivilPro rules)
        #[arg(short, long = "rules", value_name = "FILE")]
        rules: Option<PathBuf>,

        /// Only print the preview, do not write the spreadsheet
        #[arg(long)]
        no_export: bool,

        /// Use pdftotext reading order instead of -layout
        #[arg(long)]
        no_layout: bool,
    },
    /// Inspect and validate rule files
    Rules {
        #[command(subcommand)]
        action: RulesAction,
    },
}

#[derive(Subcommand)]
enum RulesAction {
    /// Print the method name expansions and field density packages
    Show {
        /// Custom JSON rule file (default: built-in CivilPro rules)
        #[arg(short, long = "rules", value_name = "FILE")]
        rules: Option<PathBuf>,
    },
    /// Print the rule file JSON format with an example
    Schema,
    /// Validate a custom rule file
    Validate {
        /// Path to JSON rule file
        file: PathBuf,
    },
}

fn main() {
    let cli = Cli::parse();

    let default_filter = if cli.verbose { "debug" } else { "warn" };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(default_filter))
        .init();

    let result = match cli.command {
        Commands::Process {
            input_file,
            output,
            out,
            rules,
            no_export,
            no_layout,
        } => commands::process::run(commands::process::ProcessArgs {
            input_file,
            output_format: output,
            out: (!no_export).then_some(out),
            rules,
            layout: !no_layout,
        }),
        Commands::Rules { action } => match action {
            RulesAction::Show { rules } => commands::rules::show(rules.as_deref()),
            RulesAction::Schema => commands::rules::schema(),
            RulesAction::Validate { file } => commands::rules::validate(&file),
        },
    };

    if let Err(e) = result {
        eprintln!("Error: {e}");
        std::process::exit(1);
    }
}
