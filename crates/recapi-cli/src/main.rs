use anyhow::{bail, Context, Result};
use clap::{Parser, Subcommand};
use colored::*;
use recapi_links_core::{LinkStore, LinksConfig, MissingKeyPolicy, VariableSet};
use recapi_pid_core::{AdmissibilityPolicy, IdentifierRecord, IdentifierSchema};
use serde_json::json;
use std::fs;

#[derive(Parser)]
#[command(name = "recapi")]
#[command(about = "Identifier validation and link rendering for record APIs", long_about = None)]
struct Args {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Validate and normalize identifier records from a JSON/YAML file
    Validate {
        /// Path to a file holding an array of {identifier, scheme} records
        file: String,

        /// Comma-separated allow-list of schemes
        #[arg(long)]
        allow: Option<String>,

        /// Comma-separated forbid-list of schemes
        #[arg(long)]
        forbid: Option<String>,

        /// Accept schemes no registered handler recognizes
        #[arg(long)]
        accept_unknown: bool,

        /// Treat the identifier value as optional
        #[arg(long)]
        optional: bool,

        /// Output format
        #[arg(long, default_value = "human")]
        format: String,
    },

    /// List all registered identifier schemes
    Schemes {
        /// Output format
        #[arg(long, default_value = "human")]
        format: String,
    },

    /// Resolve a link-parameter bundle against a links configuration
    Render {
        /// Path to a JSON/YAML file holding {link-key: {variables}}
        file: String,

        /// Path to the links configuration (TOML or JSON)
        #[arg(long)]
        config: String,

        /// Namespace the bundle belongs to
        #[arg(long)]
        namespace: String,

        /// Hostname for absolute URLs; omit for relative links
        #[arg(long)]
        host: Option<String>,

        /// Fail on link keys missing from the configuration
        #[arg(long)]
        strict: bool,

        /// Output format
        #[arg(long, default_value = "human")]
        format: String,
    },
}

fn main() -> Result<()> {
    let args = Args::parse();

    match args.command {
        Commands::Validate {
            file,
            allow,
            forbid,
            accept_unknown,
            optional,
            format,
        } => validate_command(file, allow, forbid, accept_unknown, optional, format),
        Commands::Schemes { format } => schemes_command(format),
        Commands::Render {
            file,
            config,
            namespace,
            host,
            strict,
            format,
        } => render_command(file, config, namespace, host, strict, format),
    }
}

fn split_schemes(list: Option<String>) -> Option<Vec<String>> {
    list.map(|value| {
        value
            .split(',')
            .map(|scheme| scheme.trim().to_string())
            .filter(|scheme| !scheme.is_empty())
            .collect()
    })
}

fn validate_command(
    file: String,
    allow: Option<String>,
    forbid: Option<String>,
    accept_unknown: bool,
    optional: bool,
    format: String,
) -> Result<()> {
    let records: Vec<IdentifierRecord> = load_structured(&file)?;

    let policy =
        AdmissibilityPolicy::from_options(split_schemes(allow), split_schemes(forbid), accept_unknown)?;
    let mut schema = IdentifierSchema::with_policy(policy);
    if optional {
        schema = schema.optional();
    }

    let mut failures = 0usize;
    let mut report = Vec::new();
    for record in records {
        let input = record.clone();
        match schema.load(record) {
            Ok(loaded) => {
                if format == "human" {
                    println!(
                        "{} {} ({})",
                        "ok".green().bold(),
                        loaded.identifier.as_deref().unwrap_or("-"),
                        loaded.scheme.as_deref().unwrap_or("-"),
                    );
                }
                report.push(json!({"input": input, "ok": true, "record": loaded}));
            }
            Err(errors) => {
                failures += 1;
                if format == "human" {
                    println!(
                        "{} {}: {}",
                        "fail".red().bold(),
                        input.identifier.as_deref().unwrap_or("-"),
                        errors,
                    );
                }
                report.push(json!({"input": input, "ok": false, "errors": errors}));
            }
        }
    }

    if format == "json" {
        println!("{}", serde_json::to_string_pretty(&report)?);
    } else {
        let summary = format!("{} record(s), {} failure(s)", report.len(), failures);
        if failures == 0 {
            println!("{}", summary.green());
        } else {
            println!("{}", summary.red());
        }
    }

    if failures > 0 {
        std::process::exit(1);
    }
    Ok(())
}

fn schemes_command(format: String) -> Result<()> {
    use tabled::{Table, Tabled};

    #[derive(Tabled)]
    struct SchemeRow {
        #[tabled(rename = "Scheme")]
        scheme: &'static str,
        #[tabled(rename = "Label")]
        label: &'static str,
    }

    let schema = IdentifierSchema::with_policy(AdmissibilityPolicy::AcceptKnown);
    let rows: Vec<SchemeRow> = schema
        .registry()
        .handlers()
        .map(|handler| SchemeRow {
            scheme: handler.scheme_id(),
            label: handler.label(),
        })
        .collect();

    if format == "json" {
        let list: Vec<_> = rows
            .iter()
            .map(|row| json!({"scheme": row.scheme, "label": row.label}))
            .collect();
        println!("{}", serde_json::to_string_pretty(&list)?);
    } else {
        println!("{}", Table::new(rows));
    }
    Ok(())
}

fn render_command(
    file: String,
    config: String,
    namespace: String,
    host: Option<String>,
    strict: bool,
    format: String,
) -> Result<()> {
    let bundle: VariableSet = load_structured(&file)?;
    let config = LinksConfig::load(&config)?;

    let mut store = LinkStore::new().with_policy(if strict {
        MissingKeyPolicy::Strict
    } else {
        MissingKeyPolicy::Ignore
    });
    if let Some(host) = host {
        store = store.with_host(host);
    }

    let handle = store.register(&namespace, bundle)?;
    store.resolve_with(Some(&config), None)?;
    let resolved = store.get(handle).context("registered bundle disappeared")?;

    if format == "json" {
        println!("{}", serde_json::to_string_pretty(resolved)?);
    } else {
        for (key, url) in resolved {
            let url = url.as_str().unwrap_or_default();
            println!("{} {}", key.cyan().bold(), url);
        }
    }
    Ok(())
}

/// Loads a JSON or YAML file, picked by extension.
fn load_structured<T: serde::de::DeserializeOwned>(path: &str) -> Result<T> {
    let content =
        fs::read_to_string(path).context(format!("Failed to read input file: {path}"))?;
    if path.ends_with(".yaml") || path.ends_with(".yml") {
        serde_yaml::from_str(&content).context("Failed to parse input file as YAML")
    } else if path.ends_with(".json") {
        serde_json::from_str(&content).context("Failed to parse input file as JSON")
    } else {
        bail!("Unsupported input format: {path} (expected .json, .yaml or .yml)");
    }
}
