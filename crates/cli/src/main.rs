mod render;

use std::fs;
use std::io;
use std::process;

use anyhow::{Context, Result, bail};
use clap::{ArgAction, Args, Parser, Subcommand};
use dot_htmllabel_core::grammar::{dump::to_pretty_json, parser::parse_str};
use dot_htmllabel_core::validate::lint_with_table;
use dot_htmllabel_diagnostics::{self as diag, Diagnostic};
use dot_htmllabel_tag_tables::{Enclosing, TagRule, TagTable};
use tracing::{Level, debug};
use tracing_subscriber::EnvFilter;

use crate::render::{Format, print_summary, render_diagnostics};

// ── CLI definition ──────────────────────────────────────────────────────

#[derive(Parser, Debug)]
#[command(
    name = "dot-htmllabel",
    version,
    about = "Parse and lint Graphviz DOT HTML-like labels"
)]
struct Cli {
    /// Output mode: "pretty" for coloured terminal output, "json" for
    /// machine-readable JSON. Defaults to "pretty" when stdout is a TTY,
    /// "json" otherwise.
    #[arg(long, global = true, value_parser = ["pretty", "json"])]
    output: Option<String>,

    /// Log parser and validator activity to stderr (`-vv` for token-level
    /// tracing). `RUST_LOG` is honoured as well.
    #[arg(long, short, global = true, action = ArgAction::Count)]
    verbose: u8,

    #[command(subcommand)]
    cmd: Cmd,
}

/// Where to read a label from.
#[derive(Args, Debug)]
struct InputArgs {
    /// Label file, or `-` to read from stdin.
    file: String,
    /// Remove one outer `<` ... `>` pair, as written after `label=` in DOT.
    #[arg(long)]
    strip_delimiters: bool,
}

#[derive(Subcommand, Debug)]
enum Cmd {
    // ── Label analysis commands (progressive: parse → check → lint) ──
    /// Parse a label and print its tree as JSON.
    Parse {
        #[command(flatten)]
        input: InputArgs,
    },

    /// Syntax-check a label (tag matching only).
    #[command(alias = "syntax-check")]
    Check {
        #[command(flatten)]
        input: InputArgs,
    },

    /// Lint: parse a label and validate it against the tag table.
    #[command(alias = "validate")]
    Lint {
        #[command(flatten)]
        input: InputArgs,
        /// Path to a tag table JSON file. Defaults to the built-in Graphviz
        /// vocabulary.
        #[arg(long)]
        tables: Option<String>,
    },

    // ── Reference / informational ───────────────────────────────────
    /// List the tag table, or show the rule for one tag.
    Tags {
        /// Tag name (case-insensitive).
        name: Option<String>,
        /// Path to a tag table JSON file (see `lint --help`).
        #[arg(long)]
        tables: Option<String>,
    },

    /// Explain a diagnostic ID (e.g. HTML2002).
    Explain { id: String },
}

// ── Main ────────────────────────────────────────────────────────────────

fn main() {
    let cli = Cli::parse();
    init_tracing(cli.verbose);
    let format = Format::resolve_or_detect(cli.output.as_deref());
    debug!(?format, "starting");

    if let Err(err) = run(cli.cmd, format) {
        report_failure(&err, format);
        process::exit(1);
    }
}

/// Install the stderr subscriber. `RUST_LOG` decides the filter unless
/// `-v`/`-vv` raise the level explicitly.
fn init_tracing(verbose: u8) {
    let filter = match verbose {
        0 => EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        1 => EnvFilter::from_default_env().add_directive(Level::DEBUG.into()),
        _ => EnvFilter::from_default_env().add_directive(Level::TRACE.into()),
    };
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .init();
}

fn run(cmd: Cmd, format: Format) -> Result<()> {
    match cmd {
        Cmd::Parse { input } => cmd_parse(&input, format),
        Cmd::Check { input } => cmd_check(&input, format),
        Cmd::Lint { input, tables } => cmd_lint(&input, tables.as_deref(), format),
        Cmd::Tags { name, tables } => cmd_tags(name.as_deref(), tables.as_deref(), format),
        Cmd::Explain { id } => cmd_explain(&id, format),
    }
}

/// Report a command failure (I/O, bad arguments, bad table) in the selected
/// output format.
fn report_failure(err: &anyhow::Error, format: Format) {
    match format {
        Format::Json => {
            let out = serde_json::json!({
                "success": false,
                "error": "command_failed",
                "message": format!("{err:#}"),
            });
            println!(
                "{}",
                serde_json::to_string_pretty(&out).expect("error JSON serialization cannot fail")
            );
        }
        Format::Pretty => eprintln!("error: {err:#}"),
    }
}

// ── Commands ────────────────────────────────────────────────────────────

fn cmd_parse(args: &InputArgs, format: Format) -> Result<()> {
    let (name, input) = read_input(args)?;
    let (label, diagnostics) = match parse_str(&input) {
        Ok(label) => (Some(label), Vec::new()),
        Err(err) => (None, vec![err.to_diagnostic()]),
    };

    match format {
        Format::Json => {
            // Single valid JSON object to stdout.
            let out = serde_json::json!({
                "ok": label.is_some(),
                "label": label,
                "diagnostics": diagnostics,
            });
            println!("{}", serde_json::to_string_pretty(&out)?);
        }
        Format::Pretty => {
            // Tree to stdout, diagnostics to stderr.
            if let Some(label) = &label {
                println!("{}", to_pretty_json(label));
            }
            render_diagnostics(&input, &name, &diagnostics);
            print_summary(&diagnostics);
        }
    }

    exit_on_errors(&diagnostics);
    Ok(())
}

fn cmd_check(args: &InputArgs, format: Format) -> Result<()> {
    let (name, input) = read_input(args)?;
    let diagnostics = match parse_str(&input) {
        Ok(_) => Vec::new(),
        Err(err) => vec![err.to_diagnostic()],
    };
    let ok = diagnostics.is_empty();

    match format {
        Format::Json => {
            let out = serde_json::json!({
                "ok": ok,
                "diagnostics": diagnostics,
            });
            println!("{}", serde_json::to_string_pretty(&out)?);
        }
        Format::Pretty => {
            render_diagnostics(&input, &name, &diagnostics);
            print_summary(&diagnostics);
            if ok {
                eprintln!("syntax ok");
            }
        }
    }

    exit_on_errors(&diagnostics);
    Ok(())
}

fn cmd_lint(args: &InputArgs, tables_path: Option<&str>, format: Format) -> Result<()> {
    let (name, input) = read_input(args)?;
    let loaded;
    let table = match tables_path {
        Some(path) => {
            loaded = load_table(path)?;
            &loaded
        }
        None => TagTable::builtin(),
    };
    let res = lint_with_table(&input, table);

    match format {
        Format::Json => {
            let out = serde_json::json!({
                "ok": res.ok,
                "diagnostics": res.issues,
            });
            println!("{}", serde_json::to_string_pretty(&out)?);
        }
        Format::Pretty => {
            render_diagnostics(&input, &name, &res.issues);
            print_summary(&res.issues);
            if res.ok {
                eprintln!("lint ok");
            }
        }
    }

    exit_on_errors(&res.issues);
    Ok(())
}

fn cmd_tags(name: Option<&str>, tables_path: Option<&str>, format: Format) -> Result<()> {
    let loaded;
    let table = match tables_path {
        Some(path) => {
            loaded = load_table(path)?;
            &loaded
        }
        None => TagTable::builtin(),
    };

    let rules: Vec<&TagRule> = match name {
        Some(name) => match table.rule(name) {
            Some(rule) => vec![rule],
            None => bail!("tag '<{name}>' is not in the tag table"),
        },
        None => table.tags.iter().collect(),
    };

    match format {
        Format::Json => {
            let out = match rules.as_slice() {
                [rule] if name.is_some() => serde_json::to_value(rule)?,
                _ => serde_json::json!({ "tags": rules }),
            };
            println!("{}", serde_json::to_string_pretty(&out)?);
        }
        Format::Pretty => {
            for rule in rules {
                println!("{}", rule.name);
                println!("  parents:    {}", rule.parents.join(", "));
                let attributes = if rule.attributes.is_empty() {
                    "(none)".to_string()
                } else {
                    rule.attributes.join(", ")
                };
                println!("  attributes: {attributes}");
                let children = table.children_of(Enclosing::Tag(&rule.name));
                if !children.is_empty() {
                    println!("  children:   {}", children.join(", "));
                }
            }
        }
    }
    Ok(())
}

fn cmd_explain(id: &str, format: Format) -> Result<()> {
    match format {
        Format::Json => {
            let text = diag::explain(id);
            let out = serde_json::json!({
                "id": id,
                "explanation": text,
            });
            println!("{}", serde_json::to_string_pretty(&out)?);
        }
        Format::Pretty => {
            // Explanation is the expected output, so it goes to stdout.
            if let Some(text) = diag::explain(id) {
                use ariadne::Fmt;
                println!("{}: {}", id.fg(ariadne::Color::Cyan), text);
            } else {
                println!("{}: (no explanation available)", id);
            }
        }
    }
    Ok(())
}

// ── Helpers ─────────────────────────────────────────────────────────────

/// Exit with code 1 if any diagnostic is an error.
fn exit_on_errors(diagnostics: &[Diagnostic]) {
    if diagnostics.iter().any(Diagnostic::is_error) {
        process::exit(1);
    }
}

/// Read the label named by `args`, returning a display name and the text.
fn read_input(args: &InputArgs) -> Result<(String, String)> {
    let (name, text) = if args.file == "-" {
        let text = io::read_to_string(io::stdin()).context("failed to read label from stdin")?;
        ("<stdin>".to_string(), text)
    } else {
        let text = fs::read_to_string(&args.file)
            .with_context(|| format!("failed to read label file '{}'", args.file))?;
        (args.file.clone(), text)
    };
    debug!(input = %name, bytes = text.len(), "read label");

    if !args.strip_delimiters {
        return Ok((name, text));
    }
    match strip_delimiters(&text) {
        Some(inner) => Ok((name, inner.to_string())),
        None => bail!("'{name}' is not wrapped in '<' ... '>'"),
    }
}

/// The text between one outer `<` ... `>` pair, ignoring surrounding whitespace.
fn strip_delimiters(text: &str) -> Option<&str> {
    text.trim().strip_prefix('<')?.strip_suffix('>')
}

/// Load a tag table from a JSON file.
fn load_table(path: &str) -> Result<TagTable> {
    let json =
        fs::read_to_string(path).with_context(|| format!("failed to read tag table '{path}'"))?;
    let table =
        TagTable::from_json(&json).with_context(|| format!("invalid tag table '{path}'"))?;
    debug!(path, tags = table.len(), "loaded tag table");
    Ok(table)
}
