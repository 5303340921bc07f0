use clap::Parser;
use serde_json::Value;

use facet_query::{FilterConfig, FilterOption, FilterSpec, FilterState, FilterStateStore};

/// Simple runner: filter a JSON array of records from the shell.
#[derive(Parser, Debug)]
#[command(author, version, about)]
struct Args {
    /// JSON array of records, or @path to read it from a file.
    dataset: String,
    /// Dot-path searched by free text (repeatable).
    #[arg(long = "field")]
    fields: Vec<String>,
    /// Free-text query.
    #[arg(long)]
    search: Option<String>,
    /// Facet selection as key=value, e.g. --filter status=approved (repeatable).
    #[arg(long = "filter")]
    filters: Vec<String>,
    /// Print stats to stderr.
    #[arg(long)]
    stats: bool,
}

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .init();

    let args = Args::parse();

    let raw = match args.dataset.strip_prefix('@') {
        Some(path) => match std::fs::read_to_string(path) {
            Ok(s) => s,
            Err(e) => {
                eprintln!("Cannot read {path}: {e}");
                std::process::exit(1);
            }
        },
        None => args.dataset.clone(),
    };
    let dataset: Vec<Value> = match serde_json::from_str(&raw) {
        Ok(Value::Array(records)) => records,
        Ok(_) => {
            eprintln!("Dataset must be a JSON array of records");
            std::process::exit(1);
        }
        Err(e) => {
            eprintln!("Invalid JSON: {e}");
            std::process::exit(1);
        }
    };

    let selections = match parse_selections(&args.filters) {
        Ok(selections) => selections,
        Err(msg) => {
            eprintln!("{msg}");
            std::process::exit(1);
        }
    };

    // Each --filter key=value becomes a single-option spec with that value
    // selected.
    let mut specs = Vec::new();
    let mut state = FilterState::new();
    if let Some(q) = &args.search {
        state = state.with_query(q);
    }
    for (key, value) in &selections {
        let spec = match FilterSpec::new(key, key, vec![FilterOption::new(value, value)]) {
            Ok(spec) => spec,
            Err(e) => {
                eprintln!("Invalid filter key: {e}");
                std::process::exit(1);
            }
        };
        specs.push(spec);
        state = state.with_selection(key, value);
    }

    let field_refs: Vec<&str> = args.fields.iter().map(String::as_str).collect();
    let config = match FilterConfig::new(&field_refs, specs, "") {
        Ok(config) => config,
        Err(e) => {
            eprintln!("Invalid configuration: {e}");
            std::process::exit(1);
        }
    };

    let mut store = FilterStateStore::new(dataset, config);
    store.handle_filters_change(state);

    if args.stats {
        let stats = store.stats();
        eprintln!(
            "total={} filtered={} has_filters={}",
            stats.total, stats.filtered, stats.has_filters
        );
    }
    match serde_json::to_string_pretty(&store.filtered_data()) {
        Ok(out) => println!("{out}"),
        Err(e) => {
            eprintln!("Cannot serialize result: {e}");
            std::process::exit(1);
        }
    }
}

/// Split each `--filter` argument into a key/value pair. A repeated key is
/// rejected: selections last-win in the state, so a second pair for the same
/// key would leave a spec that nothing can ever satisfy.
fn parse_selections(pairs: &[String]) -> Result<Vec<(String, String)>, String> {
    let mut selections: Vec<(String, String)> = Vec::new();
    for pair in pairs {
        let Some((key, value)) = pair.split_once('=') else {
            return Err(format!("Invalid --filter `{pair}`: expected key=value"));
        };
        if selections.iter().any(|(seen, _)| seen == key) {
            return Err(format!("Duplicate --filter key `{key}`"));
        }
        selections.push((key.to_owned(), value.to_owned()));
    }
    Ok(selections)
}
