//! CLI subcommands: serve, parse, validate, summary, init.

use crate::core::{normalize, parser, resolver, types};
use crate::server::{self, ServerConfig};
use clap::Subcommand;
use std::net::SocketAddr;
use std::path::{Path, PathBuf};

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Start the HTTP server
    Serve {
        /// Address to listen on
        #[arg(short, long, default_value = "127.0.0.1:8080")]
        bind: SocketAddr,

        /// Cookbook file to load at startup
        #[arg(long)]
        seed: Option<PathBuf>,
    },

    /// Normalize a handwritten recipe name
    Parse {
        /// Raw name text
        input: String,
    },

    /// Validate a cookbook file
    Validate {
        /// Path to cookbook.yaml
        #[arg(short, long, default_value = "cookbook.yaml")]
        file: PathBuf,
    },

    /// Resolve a recipe's total cook time and ingredients
    Summary {
        /// Recipe name
        name: String,

        /// Path to cookbook.yaml
        #[arg(short, long, default_value = "cookbook.yaml")]
        file: PathBuf,

        /// Print JSON instead of a table
        #[arg(long)]
        json: bool,
    },

    /// Write a starter cookbook.yaml
    Init {
        /// Directory to initialize (default: current)
        #[arg(default_value = ".")]
        path: PathBuf,
    },
}

/// Dispatch a CLI command.
pub fn dispatch(cmd: Commands) -> Result<(), String> {
    match cmd {
        Commands::Serve { bind, seed } => cmd_serve(ServerConfig {
            bind_addr: bind,
            seed,
        }),
        Commands::Parse { input } => cmd_parse(&input),
        Commands::Validate { file } => cmd_validate(&file),
        Commands::Summary { name, file, json } => cmd_summary(&file, &name, json),
        Commands::Init { path } => cmd_init(&path),
    }
}

fn cmd_serve(config: ServerConfig) -> Result<(), String> {
    let runtime = tokio::runtime::Builder::new_multi_thread()
        .enable_all()
        .build()
        .map_err(|e| format!("cannot start runtime: {}", e))?;
    runtime.block_on(server::run_server(config))
}

fn cmd_parse(input: &str) -> Result<(), String> {
    match normalize::normalize(input) {
        Some(name) => {
            println!("{}", name);
            Ok(())
        }
        None => Err("this string is cooked".to_string()),
    }
}

fn cmd_validate(file: &Path) -> Result<(), String> {
    let cookbook = parser::parse_cookbook_file(file)?;
    let errors = parser::validate_cookbook(&cookbook);

    if errors.is_empty() {
        let recipes = cookbook
            .entries
            .iter()
            .filter(|e| e.kind() == types::EntityKind::Recipe)
            .count();
        println!(
            "OK: {} ({} ingredients, {} recipes)",
            file.display(),
            cookbook.entries.len() - recipes,
            recipes
        );
        Ok(())
    } else {
        for e in &errors {
            eprintln!("  ERROR: {}", e);
        }
        Err(format!("{} validation error(s)", errors.len()))
    }
}

fn cmd_summary(file: &Path, name: &str, json: bool) -> Result<(), String> {
    let cookbook = parser::parse_cookbook_file(file)?;
    let (registry, errors) = parser::load_registry(&cookbook);
    for e in &errors {
        eprintln!("  WARN: {}", e);
    }

    let summary = resolver::resolve(&registry, name).map_err(|e| e.to_string())?;

    if json {
        let out = serde_json::to_string_pretty(&summary)
            .map_err(|e| format!("JSON serialize error: {}", e))?;
        println!("{}", out);
    } else {
        print_summary(&summary);
    }
    Ok(())
}

fn print_summary(summary: &types::Summary) {
    println!("{} (cook time: {})", summary.name, summary.cook_time);
    let width = summary
        .ingredients
        .iter()
        .map(|i| i.name.len())
        .max()
        .unwrap_or(0);
    for ingredient in &summary.ingredients {
        println!(
            "  {:<width$}  x{}",
            ingredient.name,
            ingredient.quantity,
            width = width
        );
    }
}

fn cmd_init(path: &Path) -> Result<(), String> {
    let cookbook_path = path.join("cookbook.yaml");
    if cookbook_path.exists() {
        return Err(format!("{} already exists", cookbook_path.display()));
    }

    let template = r#"description: "My cookbook"

entries:
  - type: ingredient
    name: Egg
    cookTime: 5

  - type: recipe
    name: Omelette
    requiredItems:
      - name: Egg
        quantity: 2
"#;
    std::fs::write(&cookbook_path, template)
        .map_err(|e| format!("cannot write {}: {}", cookbook_path.display(), e))?;

    println!("Initialized cookbook at {}", path.display());
    println!("  Created: {}", cookbook_path.display());
    Ok(())
}
