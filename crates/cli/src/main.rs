mod runner;
mod tap;

use std::path::{Path, PathBuf};
use std::process;

use clap::{Parser, Subcommand, ValueEnum};

/// Output format for CLI responses.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub(crate) enum OutputFormat {
    Text,
    Json,
}

/// Stepform questionnaire document toolchain.
#[derive(Parser)]
#[command(
    name = "stepform",
    version,
    about = "Stepform questionnaire document toolchain"
)]
struct Cli {
    /// Output format (text or json)
    #[arg(long, global = true, default_value = "text", value_enum)]
    output: OutputFormat,

    /// Suppress non-essential output
    #[arg(long, global = true)]
    quiet: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Parse a questionnaire markdown file to interchange JSON
    Parse {
        /// Path to the questionnaire markdown file
        file: PathBuf,
    },

    /// Parse a questionnaire file and report integrity findings
    Check {
        /// Path to the questionnaire markdown file
        file: PathBuf,
    },

    /// Validate interchange JSON against the formal JSON Schema
    Validate {
        /// Path to the interchange JSON document file
        document: PathBuf,
    },

    /// Run the conformance test suite
    Test {
        /// Path to the conformance suite directory
        #[arg(default_value = "conformance")]
        suite_dir: PathBuf,
    },
}

fn main() {
    let cli = Cli::parse();

    match cli.command {
        Commands::Parse { file } => cmd_parse(&file, cli.output, cli.quiet),
        Commands::Check { file } => cmd_check(&file, cli.output, cli.quiet),
        Commands::Validate { document } => cmd_validate(&document, cli.output, cli.quiet),
        Commands::Test { suite_dir } => cmd_test(&suite_dir, cli.quiet),
    }
}

/// Read a source file and derive the provenance filename (base name only,
/// so error output does not depend on how the path was spelled).
fn read_source(file: &Path, output: OutputFormat, quiet: bool) -> (String, String) {
    let src = match std::fs::read_to_string(file) {
        Ok(s) => s,
        Err(e) => {
            let msg = format!("error reading file '{}': {}", file.display(), e);
            report_error(&msg, output, quiet);
            process::exit(1);
        }
    };
    let filename = file
        .file_name()
        .unwrap_or_default()
        .to_string_lossy()
        .to_string();
    (src, filename)
}

fn cmd_parse(file: &Path, output: OutputFormat, quiet: bool) {
    let (src, filename) = read_source(file, output, quiet);

    match stepform_core::parse(&src, &filename) {
        Ok(doc) => {
            let value = stepform_core::serialize(&doc);
            let pretty = serde_json::to_string_pretty(&value)
                .unwrap_or_else(|e| format!("serialization error: {}", e));
            println!("{}", pretty);
        }
        Err(e) => {
            report_parse_error(&e, output, quiet);
            process::exit(1);
        }
    }
}

fn cmd_check(file: &Path, output: OutputFormat, quiet: bool) {
    let (src, filename) = read_source(file, output, quiet);

    let doc = match stepform_core::parse(&src, &filename) {
        Ok(doc) => doc,
        Err(e) => {
            report_parse_error(&e, output, quiet);
            process::exit(1);
        }
    };

    let findings = stepform_core::validate(&doc);
    match output {
        OutputFormat::Json => {
            let items: Vec<serde_json::Value> =
                findings.iter().map(|f| f.to_json_value()).collect();
            let value = serde_json::json!({ "findings": items });
            let pretty = serde_json::to_string_pretty(&value)
                .unwrap_or_else(|e| format!("serialization error: {}", e));
            println!("{}", pretty);
        }
        OutputFormat::Text => {
            if findings.is_empty() {
                if !quiet {
                    println!(
                        "ok: {} question(s), no integrity findings",
                        doc.questions.len()
                    );
                }
            } else {
                for f in &findings {
                    eprintln!("{}:{}: {}", filename, f.line, f.message);
                }
                if !quiet {
                    eprintln!("{} integrity finding(s)", findings.len());
                }
            }
        }
    }

    if !findings.is_empty() {
        process::exit(1);
    }
}

static DOCUMENT_SCHEMA_STR: &str = include_str!("../../../schema/document-schema.json");

fn cmd_validate(document_path: &Path, output: OutputFormat, quiet: bool) {
    // Parse the embedded document schema
    let schema: serde_json::Value = match serde_json::from_str(DOCUMENT_SCHEMA_STR) {
        Ok(s) => s,
        Err(e) => {
            let msg = format!(
                "internal error: failed to parse embedded document schema: {}",
                e
            );
            report_error(&msg, output, quiet);
            process::exit(1);
        }
    };

    // Read and parse the document file
    let doc_str = match std::fs::read_to_string(document_path) {
        Ok(s) => s,
        Err(e) => {
            let msg = format!("error reading file '{}': {}", document_path.display(), e);
            report_error(&msg, output, quiet);
            process::exit(1);
        }
    };

    let doc: serde_json::Value = match serde_json::from_str(&doc_str) {
        Ok(v) => v,
        Err(e) => {
            let msg = format!("invalid JSON in '{}': {}", document_path.display(), e);
            report_error(&msg, output, quiet);
            process::exit(1);
        }
    };

    let validator = match jsonschema::validator_for(&schema) {
        Ok(v) => v,
        Err(e) => {
            let msg = format!("internal error: failed to compile schema: {}", e);
            report_error(&msg, output, quiet);
            process::exit(1);
        }
    };

    let errors: Vec<String> = validator
        .iter_errors(&doc)
        .map(|e| format!("{}", e))
        .collect();

    if errors.is_empty() {
        if !quiet {
            match output {
                OutputFormat::Text => println!("valid"),
                OutputFormat::Json => println!("{{\"valid\": true}}"),
            }
        }
    } else {
        match output {
            OutputFormat::Text => {
                if !quiet {
                    eprintln!("invalid document: {} schema violation(s)", errors.len());
                    for err in &errors {
                        eprintln!("  {}", err);
                    }
                }
            }
            OutputFormat::Json => {
                let value = serde_json::json!({ "valid": false, "errors": errors });
                let pretty = serde_json::to_string_pretty(&value)
                    .unwrap_or_else(|e| format!("serialization error: {}", e));
                eprintln!("{}", pretty);
            }
        }
        process::exit(1);
    }
}

fn cmd_test(suite_dir: &Path, quiet: bool) {
    if !suite_dir.exists() {
        eprintln!(
            "error: conformance suite directory not found: {}",
            suite_dir.display()
        );
        process::exit(1);
    }

    let _ = quiet; // TAP output is the primary output; quiet has no effect on the runner
    let result = runner::run_suite(suite_dir);
    if result.failed > 0 {
        process::exit(1);
    }
}

fn report_parse_error(e: &stepform_core::ParseError, output: OutputFormat, quiet: bool) {
    match output {
        OutputFormat::Json => {
            let err_json = serde_json::to_string_pretty(&e.to_json_value())
                .unwrap_or_else(|_| format!("{{\"error\": \"{:?}\"}}", e));
            eprintln!("{}", err_json);
        }
        OutputFormat::Text => {
            if !quiet {
                let err_json = serde_json::to_string_pretty(&e.to_json_value())
                    .unwrap_or_else(|_| format!("{:?}", e));
                eprintln!("{}", err_json);
            }
        }
    }
}

pub(crate) fn report_error(msg: &str, output: OutputFormat, quiet: bool) {
    if quiet {
        return;
    }
    match output {
        OutputFormat::Text => eprintln!("{}", msg),
        OutputFormat::Json => {
            eprintln!("{{\"error\": \"{}\"}}", msg.replace('"', "\\\""));
        }
    }
}
