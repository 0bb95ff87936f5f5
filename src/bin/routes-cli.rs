use std::path::PathBuf;

use clap::{Parser, Subcommand};

use nested_resources::config::{build_table, load_config};
use nested_resources::routing::{PathParams, RouteTable, RouteTarget};
use nested_resources::store::{register_resources, MemoryStore};

#[derive(Parser)]
#[command(name = "routes-cli")]
#[command(about = "Inspect the route table a config file compiles to", long_about = None)]
struct Cli {
    #[arg(short, long, default_value = "nested-resources.toml")]
    config: PathBuf,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// List every route in table order
    ShowUrls,
    /// Render the path of a named route
    Reverse {
        name: String,
        /// Capture values as `capture=value`
        #[arg(value_parser = parse_param)]
        params: Vec<(String, String)>,
    },
    /// Find the route a path dispatches to
    Resolve { path: String },
}

fn parse_param(raw: &str) -> Result<(String, String), String> {
    raw.split_once('=')
        .map(|(key, value)| (key.to_owned(), value.to_owned()))
        .ok_or_else(|| format!("expected capture=value, got `{raw}`"))
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();
    let config = load_config(&cli.config)?;
    let store = std::sync::Arc::new(MemoryStore::new());
    let registry = register_resources(&store, &config.resources);
    let table = build_table(&config, &registry)?;

    match cli.command {
        Commands::ShowUrls => show_urls(&table),
        Commands::Reverse { name, params } => {
            let params: PathParams = params.into_iter().collect();
            println!("{}", table.reverse(&name, &params)?);
        }
        Commands::Resolve { path } => match table.resolve(&path) {
            Some(matched) => {
                println!("route:  {}", matched.entry.route_name());
                for (capture, value) in matched.params.iter() {
                    println!("  {capture} = {value}");
                }
                match matched.entry.filter_for(&matched.params) {
                    Ok(filter) => println!("filter: {filter}"),
                    Err(error) => println!("filter: <{error}>"),
                }
            }
            None => {
                eprintln!("Error: no route matches {path}");
                std::process::exit(1);
            }
        },
    }

    Ok(())
}

fn show_urls(table: &RouteTable) {
    let width = table
        .iter()
        .map(|entry| entry.path_template().to_string().len())
        .max()
        .unwrap_or(0);

    for entry in table {
        let target = match entry.target() {
            RouteTarget::ApiRoot(_) => "api-root".to_owned(),
            RouteTarget::Resource { kind, .. } => format!("{kind:?}").to_lowercase(),
        };
        println!(
            "{:<width$}  {:<28}  {:<8}  {}",
            entry.path_template().to_string(),
            entry.route_name(),
            target,
            entry.lookup_chain(),
        );
    }
}
