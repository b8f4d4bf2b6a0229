mod state;

use std::path::{Path, PathBuf};

use clap::{Parser, Subcommand};
use colored::Colorize;
use secrecy::SecretString;
use tracing::debug;
use tracing_subscriber::EnvFilter;

use ftd_core::provider::Provider;
use ftd_core::resource::{Resource, ResourceId, State, attributes_from_json};
use ftd_core::schema::ResourceSchema;
use ftd_provider::registry;
use ftd_provider::{FtdProvider, ProviderConfig};

use crate::state::StateFile;

#[derive(Parser)]
#[command(name = "ftd")]
#[command(about = "Manage Cisco Firepower Threat Defense objects", long_about = None)]
struct Cli {
    /// Base URL of the device
    #[arg(long, global = true, env = "FTD_URL", hide_env_values = true)]
    url: Option<String>,

    #[arg(long, global = true, env = "FTD_USERNAME")]
    username: Option<String>,

    #[arg(long, global = true, env = "FTD_PASSWORD", hide_env_values = true)]
    password: Option<String>,

    /// Skip TLS certificate verification
    #[arg(long, global = true)]
    insecure: bool,

    /// Path to the state file
    #[arg(long, global = true, default_value = StateFile::DEFAULT_PATH)]
    state: PathBuf,

    /// Log at debug level
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// List resource types, or describe the attributes of one
    Schema { resource_type: Option<String> },
    /// Check a configuration file against the schema of its type
    Validate {
        resource_type: String,
        #[arg(long)]
        config: PathBuf,
    },
    /// Create a resource and record it in the state file
    Create {
        resource_type: String,
        name: String,
        #[arg(long)]
        config: PathBuf,
    },
    /// Refresh a recorded resource from the device
    Read { resource_type: String, name: String },
    /// Apply a configuration file to a recorded resource
    Update {
        resource_type: String,
        name: String,
        #[arg(long)]
        config: PathBuf,
    },
    /// Delete a recorded resource from the device
    Delete { resource_type: String, name: String },
    /// Adopt an existing object into the state file
    Import {
        resource_type: String,
        name: String,
        /// Object id on the device (see the resource type for its format)
        id: String,
    },
    /// Query a data source
    Lookup {
        resource_type: String,
        #[arg(long)]
        config: PathBuf,
    },
}

#[tokio::main]
async fn main() {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    let result = match &cli.command {
        Commands::Schema { resource_type } => run_schema(resource_type.as_deref()),
        Commands::Validate {
            resource_type,
            config,
        } => run_validate(resource_type, config),
        Commands::Create {
            resource_type,
            name,
            config,
        } => run_create(&cli, resource_type, name, config).await,
        Commands::Read {
            resource_type,
            name,
        } => run_read(&cli, &ResourceId::new(resource_type, name)).await,
        Commands::Update {
            resource_type,
            name,
            config,
        } => run_update(&cli, resource_type, name, config).await,
        Commands::Delete {
            resource_type,
            name,
        } => run_delete(&cli, &ResourceId::new(resource_type, name)).await,
        Commands::Import {
            resource_type,
            name,
            id,
        } => run_import(&cli, &ResourceId::new(resource_type, name), id).await,
        Commands::Lookup {
            resource_type,
            config,
        } => run_lookup(&cli, resource_type, config).await,
    };

    if let Err(e) = result {
        eprintln!("{} {}", "Error:".red().bold(), e);
        std::process::exit(1);
    }
}

fn init_tracing(verbose: bool) {
    let filter = if verbose {
        EnvFilter::new("debug")
    } else {
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"))
    };
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();
}

fn provider_config(cli: &Cli) -> ProviderConfig {
    ProviderConfig {
        username: cli.username.clone(),
        password: cli.password.clone().map(SecretString::from),
        url: cli.url.clone().map(SecretString::from),
        insecure: cli.insecure,
    }
    .with_env_defaults()
}

async fn connect(cli: &Cli) -> Result<FtdProvider, String> {
    FtdProvider::configure(provider_config(cli))
        .await
        .map_err(|e| e.to_string())
}

fn find_schema(resource_type: &str) -> Result<(ResourceSchema, bool), String> {
    if let Some(definition) = registry::find_resource(resource_type) {
        Ok(((definition.schema)(), false))
    } else if let Some(definition) = registry::find_data_source(resource_type) {
        Ok(((definition.schema)(), true))
    } else {
        Err(format!("Unknown resource type: {}", resource_type))
    }
}

/// Read a JSON object of attributes as the configuration of `id`
fn load_config(path: &Path, id: ResourceId, read_only: bool) -> Result<Resource, String> {
    let content = std::fs::read_to_string(path)
        .map_err(|e| format!("Failed to read {}: {}", path.display(), e))?;
    let json: serde_json::Value = serde_json::from_str(&content)
        .map_err(|e| format!("Failed to parse {}: {}", path.display(), e))?;
    let object = json
        .as_object()
        .ok_or_else(|| format!("{}: expected a JSON object", path.display()))?;

    let attributes = attributes_from_json(object)
        .map_err(|e| format!("Invalid configuration {}: {}", path.display(), e))?;

    Ok(Resource {
        id,
        attributes,
        read_only,
    })
}

fn load_state(cli: &Cli) -> Result<StateFile, String> {
    debug!(path = %cli.state.display(), "loading state");
    StateFile::load(&cli.state).map_err(|e| e.to_string())
}

fn save_state(cli: &Cli, state_file: &mut StateFile) -> Result<(), String> {
    state_file.save(&cli.state).map_err(|e| e.to_string())
}

fn recorded(state_file: &StateFile, id: &ResourceId) -> Result<(String, State), String> {
    let entry = state_file
        .find(id)
        .ok_or_else(|| format!("{}.{} is not in the state file", id.resource_type, id.name))?;
    let identifier = entry
        .identifier
        .clone()
        .ok_or_else(|| format!("{}.{} has no identifier", id.resource_type, id.name))?;
    let prior = entry.to_state().map_err(|e| e.to_string())?;
    Ok((identifier, prior))
}

fn print_state(state: &State) {
    let mut keys: Vec<_> = state.attributes.keys().collect();
    keys.sort();
    for key in keys {
        println!("    {}: {}", key, state.attributes[key].to_json());
    }
}

fn print_done(action: &str, state: &State) {
    println!(
        "  {} {} {}.{} ({})",
        "✓".green(),
        action,
        state.id.resource_type,
        state.id.name,
        state.identifier.as_deref().unwrap_or("-")
    );
}

// =============================================================================
// Commands
// =============================================================================

fn run_schema(resource_type: Option<&str>) -> Result<(), String> {
    let Some(resource_type) = resource_type else {
        println!("{}", "Resources:".cyan().bold());
        for definition in registry::RESOURCES {
            println!("  • {}", definition.type_name);
        }
        println!("{}", "Data sources:".cyan().bold());
        for definition in registry::DATA_SOURCES {
            println!("  • {}", definition.type_name);
        }
        return Ok(());
    };

    let (schema, _) = find_schema(resource_type)?;
    println!("{}", schema.resource_type.cyan().bold());
    if let Some(description) = &schema.description {
        println!("  {}", description);
    }
    println!();
    for attr in schema.sorted_attributes() {
        let mut flags = Vec::new();
        if attr.required {
            flags.push("required");
        }
        if attr.computed {
            flags.push("computed");
        }
        if attr.sensitive {
            flags.push("sensitive");
        }
        println!(
            "  {} {} {}",
            attr.name.bold(),
            attr.attr_type,
            flags.join(", ").dimmed()
        );
        if let Some(description) = &attr.description {
            println!("      {}", description);
        }
    }
    Ok(())
}

fn run_validate(resource_type: &str, config: &Path) -> Result<(), String> {
    let (schema, read_only) = find_schema(resource_type)?;
    let resource = load_config(config, ResourceId::new(resource_type, "config"), read_only)?;

    let mut attributes = resource.attributes;
    schema.apply_defaults(&mut attributes);
    if let Err(errors) = schema.validate(&attributes) {
        for error in &errors {
            println!("  {} {}", "✗".red(), error);
        }
        return Err(format!("{} validation error(s)", errors.len()));
    }

    println!("{}", "Configuration is valid.".green().bold());
    Ok(())
}

async fn run_create(
    cli: &Cli,
    resource_type: &str,
    name: &str,
    config: &Path,
) -> Result<(), String> {
    let mut state_file = load_state(cli)?;
    let resource = load_config(config, ResourceId::new(resource_type, name), false)?;
    let provider = connect(cli).await?;

    let state = provider
        .create(&resource)
        .await
        .map_err(|e| e.to_string())?;
    print_done("Created", &state);

    state_file.upsert(&state);
    save_state(cli, &mut state_file)
}

async fn run_read(cli: &Cli, id: &ResourceId) -> Result<(), String> {
    let mut state_file = load_state(cli)?;
    let (identifier, prior) = recorded(&state_file, id)?;
    let provider = connect(cli).await?;

    let state = provider
        .read(id, &identifier, &prior)
        .await
        .map_err(|e| e.to_string())?;
    print_done("Read", &state);
    print_state(&state);

    state_file.upsert(&state);
    save_state(cli, &mut state_file)
}

async fn run_update(
    cli: &Cli,
    resource_type: &str,
    name: &str,
    config: &Path,
) -> Result<(), String> {
    let id = ResourceId::new(resource_type, name);
    let mut state_file = load_state(cli)?;
    let (identifier, prior) = recorded(&state_file, &id)?;
    let resource = load_config(config, id.clone(), false)?;
    let provider = connect(cli).await?;

    let state = provider
        .update(&id, &identifier, &prior, &resource)
        .await
        .map_err(|e| e.to_string())?;
    print_done("Updated", &state);

    state_file.upsert(&state);
    save_state(cli, &mut state_file)
}

async fn run_delete(cli: &Cli, id: &ResourceId) -> Result<(), String> {
    let mut state_file = load_state(cli)?;
    let (identifier, prior) = recorded(&state_file, id)?;
    let provider = connect(cli).await?;

    provider
        .delete(id, &identifier, &prior)
        .await
        .map_err(|e| e.to_string())?;
    println!(
        "  {} Deleted {}.{} ({})",
        "✓".green(),
        id.resource_type,
        id.name,
        identifier
    );

    state_file.remove(id);
    save_state(cli, &mut state_file)
}

async fn run_import(cli: &Cli, id: &ResourceId, import_id: &str) -> Result<(), String> {
    let mut state_file = load_state(cli)?;
    if state_file.find(id).is_some() {
        return Err(format!(
            "{}.{} is already in the state file",
            id.resource_type, id.name
        ));
    }
    let provider = connect(cli).await?;

    let state = provider
        .import(id, import_id)
        .await
        .map_err(|e| e.to_string())?;
    print_done("Imported", &state);
    print_state(&state);

    state_file.upsert(&state);
    save_state(cli, &mut state_file)
}

async fn run_lookup(cli: &Cli, resource_type: &str, config: &Path) -> Result<(), String> {
    let query = load_config(config, ResourceId::new(resource_type, "lookup"), true)?;
    let provider = connect(cli).await?;

    let state = provider
        .read_data_source(&query)
        .await
        .map_err(|e| e.to_string())?;
    print_done("Found", &state);
    print_state(&state);
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn connection_secrets_are_hidden_from_help() {
        let command = Cli::command();
        for name in ["url", "password"] {
            let arg = command
                .get_arguments()
                .find(|a| a.get_id() == name)
                .unwrap();
            assert!(arg.is_hide_env_values_set(), "{name}");
        }
    }

    #[test]
    fn fractional_number_in_config_is_rejected() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("inside.json");
        std::fs::write(&path, r#"{"name": "inside", "monitorinterface": true, "mtu": 1500.9}"#)
            .unwrap();

        let err = load_config(&path, ResourceId::new("ftd_interface", "inside"), false)
            .unwrap_err();
        assert!(err.contains("mtu"), "{err}");
        assert!(err.contains("1500.9"), "{err}");
    }
}
