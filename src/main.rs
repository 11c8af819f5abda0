//! structdoc: print the documentation tree of Go struct types.
//!
//! Types are described by JSON manifests; documentation comes from `go doc`
//! or from a directory of captured `go doc` output:
//!
//! - `structdoc -m shop.json example.com/shop.User`
//! - `structdoc -m 'manifests/*.json' --docs captured/ -f markdown -o docs/ example.com/shop.User`

mod render;
mod toc;

use anyhow::{bail, Context, Result};
use clap::Parser;
use std::collections::HashMap;
use std::fs;
use std::path::{Path, PathBuf};
use structdoc::{DirSource, DocSource, GoDoc, Manifest, Resolver, SourceError, TypeGraph};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

#[derive(Parser)]
#[command(
    name = "structdoc",
    about = "Resolve the documentation of Go struct types into a tree"
)]
struct Cli {
    /// Qualified type names, e.g. example.com/shop.User
    #[arg(value_name = "TYPE", required = true)]
    names: Vec<String>,

    /// Type manifest files or directories (glob patterns supported)
    #[arg(short = 'm', long = "manifest", required = true)]
    manifests: Vec<String>,

    /// Output format: json (default), markdown, text
    #[arg(short = 'f', long, default_value = "json")]
    format: String,

    /// Output directory, one file per type. Prints to stdout if omitted.
    #[arg(short = 'o', long)]
    output: Option<PathBuf>,

    /// Go binary used to run `go doc`
    #[arg(long, env = "STRUCTDOC_GO", default_value = "go")]
    go: PathBuf,

    /// Directory to run `go doc` in (the module containing the types)
    #[arg(short = 'C', long, env = "STRUCTDOC_DIR")]
    dir: Option<PathBuf>,

    /// Include unexported fields (`go doc -u`)
    #[arg(short = 'u', long)]
    unexported: bool,

    /// Read captured `go doc` output from DIR/<type>.txt instead of running go
    #[arg(long, value_name = "DIR")]
    docs: Option<PathBuf>,

    /// More logging on stderr (-v debug, -vv trace). RUST_LOG overrides.
    #[arg(short = 'v', long, action = clap::ArgAction::Count)]
    verbose: u8,
}

/// Documentation source selected on the command line.
enum Source {
    Go(GoDoc),
    Dir(DirSource),
}

impl DocSource for Source {
    fn fetch(&self, qualified_name: &str) -> Result<Vec<u8>, SourceError> {
        match self {
            Source::Go(go) => go.fetch(qualified_name),
            Source::Dir(dir) => dir.fetch(qualified_name),
        }
    }
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    let manifests = load_manifests(&cli.manifests)?;
    let graph = TypeGraph::from_manifests(&manifests).context("invalid type manifests")?;
    tracing::debug!(types = graph.len(), "loaded type graph");

    let renderer = render::create_renderer(&cli.format)?;
    let resolver = Resolver::new(&graph, build_source(&cli));

    if let Some(dir) = &cli.output {
        check_file_names(&cli.names)?;
        fs::create_dir_all(dir)
            .with_context(|| format!("failed to create output directory: {}", dir.display()))?;
    }

    for name in &cli.names {
        let tree = resolver
            .resolve_name(name)
            .with_context(|| format!("failed to resolve {}", name))?;
        let rendered = renderer.render(&tree)?;

        match &cli.output {
            Some(dir) => {
                let path = dir.join(format!("{}.{}", tree.short_name(), renderer.file_extension()));
                fs::write(&path, &rendered)
                    .with_context(|| format!("failed to write {}", path.display()))?;
                tracing::info!(path = %path.display(), "wrote {}", name);
            }
            None => print!("{}", rendered),
        }
    }

    Ok(())
}

fn init_tracing(verbose: u8) {
    let default = match verbose {
        0 => "structdoc=warn",
        1 => "structdoc=debug",
        _ => "structdoc=trace",
    };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default));

    tracing_subscriber::registry()
        .with(filter)
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();
}

fn build_source(cli: &Cli) -> Source {
    if let Some(dir) = &cli.docs {
        return Source::Dir(DirSource::new(dir));
    }
    let mut go = GoDoc::new().program(&cli.go).unexported(cli.unexported);
    if let Some(dir) = &cli.dir {
        go = go.dir(dir);
    }
    Source::Go(go)
}

/// With `-o`, each type is written to `<local name>.<ext>`; two packages
/// exporting the same local name would overwrite each other.
fn check_file_names(names: &[String]) -> Result<()> {
    let mut seen: HashMap<&str, &str> = HashMap::new();
    for name in names {
        let local = name.rsplit('.').next().unwrap_or(name);
        match seen.get(local) {
            Some(other) if *other != name.as_str() => {
                bail!("{} and {} would both be written to {}.*", other, name, local)
            }
            Some(_) => {}
            None => {
                seen.insert(local, name);
            }
        }
    }
    Ok(())
}

fn load_manifests(patterns: &[String]) -> Result<Vec<Manifest>> {
    let paths = expand_globs(patterns)?;
    if paths.is_empty() {
        bail!("no type manifests found");
    }

    let mut manifests = Vec::with_capacity(paths.len());
    for path in &paths {
        let text = fs::read_to_string(path)
            .with_context(|| format!("failed to read {}", path.display()))?;
        let manifest = Manifest::from_json(&text)
            .with_context(|| format!("invalid manifest {}", path.display()))?;
        tracing::debug!(path = %path.display(), package = %manifest.package, "loaded manifest");
        manifests.push(manifest);
    }
    Ok(manifests)
}

/// Manifest file extension looked for in directories.
const MANIFEST_EXTENSION: &str = "json";

/// Expand glob patterns into a list of real file paths.
/// Also handles bare directory paths by scanning for manifest files.
fn expand_globs(patterns: &[String]) -> Result<Vec<PathBuf>> {
    let mut files = Vec::new();
    for pattern in patterns {
        let path = Path::new(pattern);
        if path.is_file() {
            files.push(path.to_path_buf());
            continue;
        }
        // If it's a directory, scan for manifests (non-recursive)
        if path.is_dir() {
            let entries = fs::read_dir(path)
                .with_context(|| format!("failed to read directory: {}", path.display()))?;
            for entry in entries.flatten() {
                let p = entry.path();
                if p.is_file() && p.extension().and_then(|e| e.to_str()) == Some(MANIFEST_EXTENSION) {
                    files.push(p);
                }
            }
            continue;
        }
        // Try as glob
        let matches: Vec<_> = glob::glob(pattern)
            .with_context(|| format!("invalid glob pattern: {}", pattern))?
            .filter_map(|r| r.ok())
            .filter(|p| p.is_file())
            .collect();
        if matches.is_empty() {
            tracing::warn!("no files matched: {}", pattern);
        }
        files.extend(matches);
    }
    // Sort for deterministic output
    files.sort();
    files.dedup();
    Ok(files)
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn directory_scan_keeps_json_only() {
        let dir = TempDir::new().unwrap();
        fs::write(dir.path().join("shop.json"), "{}").unwrap();
        fs::write(dir.path().join("geo.json"), "{}").unwrap();
        fs::write(dir.path().join("notes.txt"), "").unwrap();

        let files = expand_globs(&[dir.path().to_string_lossy().to_string()]).unwrap();
        let names: Vec<_> = files
            .iter()
            .filter_map(|p| p.file_name().and_then(|n| n.to_str()))
            .collect();
        assert_eq!(names, ["geo.json", "shop.json"]);
    }

    #[test]
    fn glob_and_file_are_deduplicated() {
        let dir = TempDir::new().unwrap();
        let shop = dir.path().join("shop.json");
        fs::write(&shop, "{}").unwrap();

        let pattern = format!("{}/*.json", dir.path().display());
        let files = expand_globs(&[pattern, shop.to_string_lossy().to_string()]).unwrap();
        assert_eq!(files, [shop]);
    }

    #[test]
    fn same_local_name_in_two_packages_is_rejected() {
        let names = ["example.com/shop.Point".to_string(), "example.com/geo.Point".to_string()];
        let err = check_file_names(&names).unwrap_err();
        assert_eq!(
            err.to_string(),
            "example.com/shop.Point and example.com/geo.Point would both be written to Point.*"
        );

        let repeated = ["example.com/geo.Point".to_string(), "example.com/geo.Point".to_string()];
        assert!(check_file_names(&repeated).is_ok());
    }

    #[test]
    fn docs_dir_wins_over_go() {
        let cli = Cli::parse_from(["structdoc", "-m", "x.json", "--docs", "captured", "p.A"]);
        assert!(matches!(build_source(&cli), Source::Dir(d) if d.root() == Path::new("captured")));
    }

    #[test]
    fn cli_definition_is_valid() {
        use clap::CommandFactory;
        Cli::command().debug_assert();
    }
}
