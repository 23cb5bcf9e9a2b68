use clap::{Parser, ValueEnum};
use serde::Serialize;
use tracing::info;

use atom_namer::mirror::{self, MirrorUri};
use atom_namer::namer::types::Substitution;
use atom_namer::{Enamer, Namer, PackageVariables, ResolveRequest, config, license, log};

#[derive(Debug, Clone, Copy, ValueEnum)]
enum Format {
    Shell,
    Json,
}

/// Derive canonical package variables from an upstream release
#[derive(Debug, Parser)]
#[command(name = "atom-namer", version, about)]
struct Cli {
    /// Download URI of the release archive
    uri: String,

    /// Upstream project name
    #[arg(value_name = "NAME")]
    upstream_name: String,

    /// Upstream version
    #[arg(value_name = "VERSION")]
    upstream_version: String,

    /// Use this canonical package name instead of deriving one
    #[arg(long)]
    pn: Option<String>,

    /// Use this canonical package version instead of deriving one
    #[arg(long)]
    pv: Option<String>,

    /// Namespace (category) to validate atoms under
    #[arg(long, default_value_t = config::namespace())]
    namespace: String,

    /// Rewrite the URI to a mirror:// scheme when the host is known
    #[arg(long)]
    mirror: bool,

    /// Trove license classifier to map
    #[arg(long)]
    license: Option<String>,

    #[arg(long, value_enum, default_value_t = Format::Shell)]
    format: Format,

    /// Log at DEBUG level unless RUST_LOG says otherwise
    #[arg(short, long)]
    verbose: bool,
}

#[derive(Serialize)]
struct Output<'a> {
    #[serde(flatten)]
    variables: &'a PackageVariables,
    homepage: Option<&'a str>,
    license: Option<&'a str>,
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    log::init(cli.verbose)?;

    let mirrored: Option<MirrorUri> = if cli.mirror {
        mirror::rewrite(&cli.uri)
    } else {
        None
    };
    let uri = mirrored.as_ref().map_or(cli.uri.as_str(), |m| m.uri.as_str());
    info!(
        "Resolving {} {} from {}",
        cli.upstream_name, cli.upstream_version, uri
    );

    let mut request = ResolveRequest::new(uri, &cli.upstream_name, &cli.upstream_version);
    if let Some(pn) = &cli.pn {
        request = request.with_name(pn);
    }
    if let Some(pv) = &cli.pv {
        request = request.with_version(pv);
    }

    let namer = Enamer::new(&cli.namespace);
    let variables = namer.resolve(&request)?;

    let homepage = mirrored.as_ref().map(|m| m.homepage.as_str());
    let license = cli
        .license
        .as_deref()
        .map(license::convert)
        .filter(|l| !l.is_empty());

    match cli.format {
        Format::Json => {
            let output = Output {
                variables: &variables,
                homepage,
                license,
            };
            println!("{}", serde_json::to_string_pretty(&output)?);
        }
        Format::Shell => {
            for line in shell_lines(&variables, homepage, license) {
                println!("{line}");
            }
        }
    }

    Ok(())
}

fn shell_lines(
    variables: &PackageVariables,
    homepage: Option<&str>,
    license: Option<&str>,
) -> Vec<String> {
    let mut lines = vec![
        format!("PN=\"{}\"", variables.name),
        format!("PV=\"{}\"", variables.version),
        format!("P=\"{}\"", variables.combined),
    ];
    lines.extend(chain("MY_PN", "PN", &variables.original_name_rules));
    lines.extend(chain("MY_PV", "PV", &variables.original_version_rules));
    if !variables.original_combined.is_empty() {
        lines.push(format!("MY_P=\"{}\"", variables.original_combined));
    }
    lines.push(format!("SRC_URI=\"{}\"", variables.rewritten_uri));
    if let Some(homepage) = homepage {
        lines.push(format!("HOMEPAGE=\"{homepage}\""));
    }
    if let Some(license) = license {
        lines.push(format!("LICENSE=\"{license}\""));
    }
    lines
}

/// One assignment per rule: the first reads `source`, the rest refine `target`
fn chain(target: &str, source: &str, rules: &[Substitution]) -> Vec<String> {
    let mut lines = Vec::new();
    for (i, rule) in rules.iter().enumerate() {
        let var = if i == 0 { source } else { target };
        lines.push(format!("{target}=\"{}\"", rule.expression(var)));
        if rule.is_restore() {
            break;
        }
    }
    lines
}
