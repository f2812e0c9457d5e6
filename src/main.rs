use clap::Parser;
use dotquery::{Query, to_json, to_json_pretty};
use std::io::{self, Read};

#[derive(Parser)]
#[command(name = "dotq")]
#[command(about = "dotq - query JSON documents with dot paths, filters and aggregates")]
#[command(version)]
struct Cli {
    /// Dot path to scope into, e.g. "vendor.items" or "users.[0].name"
    path: Option<String>,

    /// JSON input file (reads from stdin if not provided)
    #[arg(short, long)]
    input: Option<String>,

    /// Filter condition KEY:OP:VALUE, repeatable; conditions AND together.
    /// VALUE is parsed as a JSON literal, falling back to a bare string
    #[arg(short = 'w', long = "where", value_name = "KEY:OP:VALUE")]
    filters: Vec<String>,

    /// Extra OR-group condition KEY:OP:VALUE, repeatable
    #[arg(long = "or-where", value_name = "KEY:OP:VALUE")]
    or_filters: Vec<String>,

    /// Sort records by a property, PROP or PROP:desc
    #[arg(long, value_name = "PROP[:desc]")]
    sort_by: Option<String>,

    /// Collect a single property from every record
    #[arg(long, value_name = "PROP")]
    pluck: Option<String>,

    /// Print the element count instead of the result
    #[arg(long)]
    count: bool,

    /// Pretty-print the output
    #[arg(short, long)]
    pretty: bool,
}

fn main() {
    let cli = Cli::parse();

    let mut query = Query::new();
    match &cli.input {
        Some(file) => {
            query.file(file);
        }
        None if !atty::is(atty::Stream::Stdin) => {
            let mut buffer = String::new();
            if let Err(e) = io::stdin().read_to_string(&mut buffer) {
                eprintln!("failed to read stdin: {e}");
                std::process::exit(1);
            }
            query.json(&buffer);
        }
        None => {
            eprintln!("no input provided; use --input or pipe JSON to stdin");
            std::process::exit(1);
        }
    }

    if let Some(path) = &cli.path {
        query.from(path);
    }

    for filter in &cli.filters {
        match parse_filter(filter) {
            Some((key, op, value)) => {
                query.where_(key, op, value);
            }
            None => {
                eprintln!("malformed --where condition: {filter} (expected KEY:OP:VALUE)");
                std::process::exit(1);
            }
        }
    }
    for filter in &cli.or_filters {
        match parse_filter(filter) {
            Some((key, op, value)) => {
                query.or_where(key, op, value);
            }
            None => {
                eprintln!("malformed --or-where condition: {filter} (expected KEY:OP:VALUE)");
                std::process::exit(1);
            }
        }
    }

    if let Some(spec) = &cli.sort_by {
        match spec.split_once(':') {
            Some((prop, order)) => {
                query.sort_by(&[prop, order]);
            }
            None => {
                query.sort_by(&[spec]);
            }
        }
    }

    let result = match &cli.pluck {
        Some(prop) => query.pluck(prop),
        None => query.get(),
    };

    if !query.errors().is_empty() {
        for e in query.errors() {
            eprintln!("{e}");
        }
        std::process::exit(1);
    }

    if cli.count {
        println!("{}", query.count());
    } else if cli.pretty {
        println!("{}", to_json_pretty(&result));
    } else {
        println!("{}", to_json(&result));
    }
}

/// Split "key:op:value" and decode the value part as a JSON literal,
/// falling back to a bare string so `name:=:tom` works unquoted.
fn parse_filter(spec: &str) -> Option<(&str, &str, dotquery::Value)> {
    let (key, rest) = spec.split_once(':')?;
    let (op, raw) = rest.split_once(':')?;
    if key.is_empty() || op.is_empty() {
        return None;
    }
    let value = match serde_json::from_str::<serde_json::Value>(raw) {
        Ok(v) => dotquery::decoder::json_to_tree(v),
        Err(_) => dotquery::Value::String(raw.to_string()),
    };
    Some((key, op, value))
}
