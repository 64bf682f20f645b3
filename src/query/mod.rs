//! Implementation of the `query` subcommand.

pub mod interpreter;
pub mod schema;

use std::time::Instant;

use clap::Parser;
use thousands::Separable;

use crate::app::{local::LocalData, App};
use crate::common;
use crate::filters::{passes_contains, passes_range};

use self::schema::{FilterConfig, Variant};

/// Command line arguments for the `query` subcommand.
#[derive(Parser, Debug)]
#[command(author, version, about = "Run a variant search", long_about = None)]
pub struct Args {
    /// Path to the data directory with settings.json, variants.json, and
    /// deletions.json.
    #[arg(long, required = true)]
    pub path_data: String,
    /// Name of the saved search of the active sample to apply.
    #[arg(long, default_value = "None")]
    pub search: String,
    /// Filter configuration as JSON or @ with path to a JSON file; takes
    /// precedence over --search.
    #[arg(long, conflicts_with = "search")]
    pub filter_config: Option<String>,
    /// Path to the output JSON file; stdout if absent.
    #[arg(long)]
    pub path_output: Option<String>,

    /// Ad-hoc position filter, e.g. "3000-3500" or "3243".
    #[arg(long)]
    pub pos: Option<String>,
    /// Ad-hoc VAF filter, e.g. "0.01-0.1" or "0.05-".
    #[arg(long)]
    pub vaf: Option<String>,
    /// Ad-hoc read depth filter, e.g. "500-".
    #[arg(long)]
    pub depth: Option<String>,
    /// Ad-hoc substring filter on the ref/alt display string.
    #[arg(long)]
    pub allele: Option<String>,
    /// Ad-hoc substring filter on the gene symbol.
    #[arg(long)]
    pub gene: Option<String>,
    /// Ad-hoc substring filter on the disease annotation.
    #[arg(long)]
    pub disease: Option<String>,
}

/// Load a filter configuration from a JSON string or a `@`-prefixed path.
pub fn load_filter_config(param: &str) -> Result<FilterConfig, anyhow::Error> {
    if let Some(path) = param.strip_prefix('@') {
        let json = std::fs::read_to_string(path)
            .map_err(|e| anyhow::anyhow!("failed to open filter config file: {}", e))?;
        serde_json::from_str(&json)
            .map_err(|e| anyhow::anyhow!("failed to parse filter config from {}: {}", path, e))
    } else {
        serde_json::from_str(param)
            .map_err(|e| anyhow::anyhow!("failed to parse filter config: {}", e))
    }
}

/// Apply the ad-hoc command line filters on top of the filter configuration.
fn passes_adhoc(args: &Args, variant: &Variant) -> bool {
    passes_range(args.pos.as_deref(), Some(variant.pos as f64))
        && passes_range(args.vaf.as_deref(), variant.vaf)
        && passes_range(args.depth.as_deref(), variant.dp.map(|dp| dp as f64))
        && passes_contains(args.allele.as_deref(), Some(&variant.ref_alt))
        && passes_contains(args.gene.as_deref(), variant.gene.as_deref())
        && passes_contains(args.disease.as_deref(), variant.disease.as_deref())
}

/// Resolve the filter configuration to apply from the arguments.
fn resolve_filter_config<B>(args: &Args, app: &App<B>) -> Result<FilterConfig, anyhow::Error>
where
    B: crate::app::Backend,
{
    if let Some(param) = &args.filter_config {
        return load_filter_config(param);
    }

    let sample_settings = app.state.sample_settings().ok_or_else(|| {
        anyhow::anyhow!(
            "no settings record for active sample {:?}",
            app.state.sample()
        )
    })?;
    let search = sample_settings.search_by_name(&args.search).ok_or_else(|| {
        anyhow::anyhow!(
            "no saved search {:?} for sample {:?}",
            args.search,
            app.state.sample()
        )
    })?;
    search
        .filter_config
        .clone()
        .ok_or_else(|| anyhow::anyhow!("saved search {:?} has no filter configuration", args.search))
}

/// Main entry point for the `query` subcommand.
pub fn run(args_common: &crate::common::Args, args: &Args) -> Result<(), anyhow::Error> {
    let before_anything = Instant::now();
    tracing::info!("args_common = {:#?}", &args_common);
    tracing::info!("args = {:#?}", &args);

    tracing::info!("loading data directory...");
    let runtime = common::runtime()?;
    let mut app = App::new(LocalData::new(&args.path_data));
    runtime.block_on(app.fetch_data());
    if app.state.snackbar.active {
        anyhow::bail!(
            "{}",
            app.state
                .snackbar
                .message
                .as_deref()
                .unwrap_or("initial load failed")
        );
    }
    tracing::info!(
        "... done loading, {} variants for sample {:?}",
        app.state.variants().len().separate_with_commas(),
        app.state.sample()
    );

    let filter_config = resolve_filter_config(args, &app)?;

    tracing::info!("running filtration...");
    let passing = app
        .state
        .variants()
        .iter()
        .filter(|variant| interpreter::passes(&filter_config, variant))
        .filter(|variant| passes_adhoc(args, variant))
        .cloned()
        .collect::<Vec<_>>();
    tracing::info!(
        "... done, {} of {} records passed",
        passing.len().separate_with_commas(),
        app.state.variants().len().separate_with_commas()
    );

    let json = serde_json::to_string_pretty(&passing)
        .map_err(|e| anyhow::anyhow!("could not serialize records: {}", e))?;
    match &args.path_output {
        Some(path_output) => std::fs::write(path_output, json)
            .map_err(|e| anyhow::anyhow!("could not write {}: {}", path_output, e))?,
        None => println!("{}", json),
    }

    tracing::info!(
        "All of `query` completed in {:?}",
        before_anything.elapsed()
    );
    Ok(())
}

#[cfg(test)]
mod test {
    use pretty_assertions::assert_eq;

    use crate::query::schema::Variant;

    fn write_data_dir(tmpdir: &std::path::Path) -> Result<(), anyhow::Error> {
        std::fs::write(
            tmpdir.join("settings.json"),
            serde_json::to_string_pretty(&serde_json::json!({
                "samples": [{
                    "id": "sample-1",
                    "variantSearches": [
                        {
                            "name": "None",
                            "description": "No filters applied",
                            "custom": false,
                            "filterConfig": {}
                        },
                        {
                            "name": "deep snps",
                            "description": "SNPs with depth >= 500",
                            "custom": true,
                            "filterConfig": {
                                "selectedTypes": ["SNP"],
                                "depthRange": [500.0, 10000.0]
                            }
                        }
                    ]
                }]
            }))?,
        )?;
        std::fs::write(
            tmpdir.join("variants.json"),
            serde_json::to_string_pretty(&serde_json::json!([
                {
                    "pos": 3243,
                    "ref": "A",
                    "alt": "G",
                    "type": "SNP",
                    "gene": "MT-TL1",
                    "consequence": {"id": "missense_variant"},
                    "vaf": 0.12,
                    "DP": 1523
                },
                {
                    "pos": 8993,
                    "ref": "T",
                    "alt": "G",
                    "type": "SNP",
                    "gene": "MT-ATP6",
                    "consequence": {"id": "missense_variant"},
                    "vaf": 0.9,
                    "DP": 120
                },
                {
                    "pos": 961,
                    "ref": "TACC",
                    "alt": "T",
                    "type": "DEL",
                    "gene": "MT-RNR1",
                    "consequence": {"id": "unknown_x"},
                    "vaf": 0.44,
                    "DP": 800
                }
            ]))?,
        )?;
        std::fs::write(
            tmpdir.join("deletions.json"),
            serde_json::to_string_pretty(&serde_json::json!({"sample-1": []}))?,
        )?;
        Ok(())
    }

    #[test]
    fn query_with_builtin_search() -> Result<(), anyhow::Error> {
        let tmpdir = temp_testdir::TempDir::default();
        write_data_dir(&tmpdir.to_path_buf())?;
        let path_output = tmpdir.to_path_buf().join("out.json");

        let args = super::Args {
            path_data: tmpdir.to_path_buf().to_str().unwrap().into(),
            search: "None".into(),
            filter_config: None,
            path_output: Some(path_output.to_str().unwrap().into()),
            pos: None,
            vaf: None,
            depth: None,
            allele: None,
            gene: None,
            disease: None,
        };
        super::run(&crate::common::Args::default(), &args)?;

        let passing: Vec<Variant> =
            serde_json::from_str(&std::fs::read_to_string(&path_output)?)?;
        assert_eq!(passing.len(), 3);
        assert_eq!(passing[0].ref_alt, "A/G");

        Ok(())
    }

    #[test]
    fn query_with_saved_search_and_adhoc_filters() -> Result<(), anyhow::Error> {
        let tmpdir = temp_testdir::TempDir::default();
        write_data_dir(&tmpdir.to_path_buf())?;
        let path_output = tmpdir.to_path_buf().join("out.json");

        let args = super::Args {
            path_data: tmpdir.to_path_buf().to_str().unwrap().into(),
            search: "deep snps".into(),
            filter_config: None,
            path_output: Some(path_output.to_str().unwrap().into()),
            pos: None,
            vaf: Some("0.1-0.5".into()),
            depth: None,
            allele: None,
            gene: None,
            disease: None,
        };
        super::run(&crate::common::Args::default(), &args)?;

        // "deep snps" keeps the two SNPs with depth >= 500; the ad-hoc VAF
        // expression then drops the homoplasmic one
        let passing: Vec<Variant> =
            serde_json::from_str(&std::fs::read_to_string(&path_output)?)?;
        assert_eq!(passing.len(), 1);
        assert_eq!(passing[0].pos, 3243);

        Ok(())
    }

    #[test]
    fn query_with_filter_config_file() -> Result<(), anyhow::Error> {
        let tmpdir = temp_testdir::TempDir::default();
        write_data_dir(&tmpdir.to_path_buf())?;
        let path_output = tmpdir.to_path_buf().join("out.json");

        let config_file = tmpdir.to_path_buf().join("config.json");
        std::fs::write(&config_file, r#"{"selectedTypes": ["DEL"]}"#)?;

        let args = super::Args {
            path_data: tmpdir.to_path_buf().to_str().unwrap().into(),
            search: "None".into(),
            filter_config: Some(format!("@{}", config_file.to_str().unwrap())),
            path_output: Some(path_output.to_str().unwrap().into()),
            pos: None,
            vaf: None,
            depth: None,
            allele: None,
            gene: None,
            disease: None,
        };
        super::run(&crate::common::Args::default(), &args)?;

        let passing: Vec<Variant> =
            serde_json::from_str(&std::fs::read_to_string(&path_output)?)?;
        assert_eq!(passing.len(), 1);
        assert_eq!(passing[0].ref_alt, "TACC/T");

        Ok(())
    }
}
