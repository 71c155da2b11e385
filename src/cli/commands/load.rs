//! Load command - load one dictionary or every configured one

use crate::cli::args::{LoadArgs, OutputFormat};
use crate::config::{Config, DictionaryConfig};
use crate::error::{DictError, DictResult};
use crate::registry::{DictionaryRegistry, LoadedDictionary};
use crate::sandbox::Sandbox;
use crate::ui::{self, UiContext};
use std::sync::Arc;
use tracing::debug;

/// Execute the load command
pub async fn execute(args: LoadArgs, config: &Config, sandbox: Sandbox) -> DictResult<()> {
    let registry = Arc::new(DictionaryRegistry::new(sandbox));

    match requested(&args) {
        Some(dictionary) => {
            let name = dictionary.name.clone();
            let dict = load_blocking(registry, dictionary).await?;
            print_one(&name, &dict, &args.format)
        }
        None => load_configured(registry, &config.dictionaries, &args.format).await,
    }
}

/// The dictionary named on the command line, if any
///
/// Without `--name` the dictionary is named after its source.
fn requested(args: &LoadArgs) -> Option<DictionaryConfig> {
    let (source_name, resource, file) = match (&args.resource, &args.file) {
        (Some(resource), _) => (resource.clone(), Some(resource.clone()), None),
        (None, Some(file)) => (file.display().to_string(), None, Some(file.clone())),
        (None, None) => return None,
    };

    Some(DictionaryConfig {
        name: args.name.clone().unwrap_or(source_name),
        kind: args.kind,
        resource,
        file,
    })
}

/// Load every configured dictionary in parallel
async fn load_configured(
    registry: Arc<DictionaryRegistry>,
    dictionaries: &[DictionaryConfig],
    format: &OutputFormat,
) -> DictResult<()> {
    let ctx = UiContext::detect();

    if dictionaries.is_empty() {
        ui::step_warn_hint(
            &ctx,
            "No dictionaries configured",
            "Add [[dictionaries]] to the config file, or pass --resource or --file",
        );
        return Ok(());
    }

    let handles: Vec<_> = dictionaries
        .iter()
        .cloned()
        .map(|dictionary| tokio::spawn(load_blocking(Arc::clone(&registry), dictionary)))
        .collect();

    let mut results = Vec::with_capacity(handles.len());
    for (dictionary, handle) in dictionaries.iter().zip(handles) {
        let result = handle
            .await
            .map_err(|e| DictError::Internal(format!("load task failed: {}", e)))?;
        results.push((dictionary.name.as_str(), result));
    }

    let failed = results.iter().filter(|(_, r)| r.is_err()).count();

    match format {
        OutputFormat::Summary => {
            ui::section(&ctx, "Dictionaries");
            for (name, result) in &results {
                match result {
                    Ok(dict) => ui::step_ok_detail(
                        &ctx,
                        name,
                        &format!("{}, {} entries", dict.kind(), dict.len()),
                    ),
                    Err(e) => ui::step_error_detail(&ctx, name, &e.to_string()),
                }
            }
        }
        OutputFormat::Json => {
            let mut map = serde_json::Map::new();
            for (name, result) in &results {
                if let Ok(dict) = result {
                    map.insert(name.to_string(), serde_json::to_value(dict)?);
                }
            }
            println!("{}", serde_json::to_string_pretty(&map)?);
        }
        OutputFormat::Plain => {
            for (_, result) in &results {
                if let Ok(dict) = result {
                    for entry in dict.entries() {
                        println!("{}", entry);
                    }
                }
            }
        }
    }

    if failed > 0 {
        return Err(DictError::User(format!(
            "{} of {} dictionaries failed to load",
            failed,
            results.len()
        )));
    }
    Ok(())
}

/// Run a dictionary load on the blocking pool
///
/// Resource and file loads both read and decode synchronously, so neither
/// runs on a runtime worker.
async fn load_blocking(
    registry: Arc<DictionaryRegistry>,
    dictionary: DictionaryConfig,
) -> DictResult<LoadedDictionary> {
    debug!("Loading {} ({})", dictionary.name, dictionary.kind);
    tokio::task::spawn_blocking(move || registry.load(&dictionary))
        .await
        .map_err(|e| DictError::Internal(format!("load task failed: {}", e)))?
}

fn print_one(name: &str, dict: &LoadedDictionary, format: &OutputFormat) -> DictResult<()> {
    match format {
        OutputFormat::Summary => {
            let ctx = UiContext::detect();
            ui::step_ok_detail(
                &ctx,
                name,
                &format!("{}, {} entries", dict.kind(), dict.len()),
            );
        }
        OutputFormat::Json => println!("{}", serde_json::to_string_pretty(dict)?),
        OutputFormat::Plain => {
            for entry in dict.entries() {
                println!("{}", entry);
            }
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cli::args::Cli;
    use crate::cli::Commands;
    use crate::config::{DictionaryKind, DictionarySource};
    use clap::Parser;
    use std::path::Path;

    fn load_args(argv: &[&str]) -> LoadArgs {
        let cli = Cli::parse_from(argv);
        match cli.command {
            Commands::Load(args) => args,
            other => panic!("unexpected command {other:?}"),
        }
    }

    #[test]
    fn resource_request_goes_through_config() {
        let args = load_args(&[
            "dictcache",
            "load",
            "--resource",
            "symbols/en.tsv",
            "-k",
            "key-value",
        ]);
        let dictionary = requested(&args).unwrap();

        assert_eq!(dictionary.name, "symbols/en.tsv");
        assert_eq!(dictionary.kind, DictionaryKind::KeyValue);
        assert_eq!(
            dictionary.source().unwrap(),
            DictionarySource::Resource("symbols/en.tsv")
        );
    }

    #[test]
    fn file_request_uses_given_name() {
        let args = load_args(&[
            "dictcache",
            "load",
            "--file",
            "dicts/j.txt",
            "--name",
            "jargon",
        ]);
        let dictionary = requested(&args).unwrap();

        assert_eq!(dictionary.name, "jargon");
        assert_eq!(
            dictionary.source().unwrap(),
            DictionarySource::File(Path::new("dicts/j.txt"))
        );
    }

    #[test]
    fn no_source_means_configured() {
        let args = load_args(&["dictcache", "load"]);
        assert!(requested(&args).is_none());
    }

    #[tokio::test]
    async fn resource_load_runs_on_blocking_pool() {
        let temp = tempfile::TempDir::new().unwrap();
        let registry = Arc::new(DictionaryRegistry::new(
            Sandbox::new(temp.path(), None).unwrap(),
        ));
        let args = load_args(&["dictcache", "load", "--resource", "stop-words/en.txt"]);

        let dict = load_blocking(registry, requested(&args).unwrap())
            .await
            .unwrap();
        assert_eq!(dict.kind(), DictionaryKind::WordSet);
        assert!(!dict.is_empty());
    }
}
