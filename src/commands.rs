//! Subcommands of the `synapse` binary. Each one maps onto a single client
//! operation and prints the result as pretty JSON.

mod check;

pub use check::run_check;

use crate::api::ConsoleClient;
use crate::config::Config;
use crate::error::{ConsoleError, Result};
use crate::navigation::{Navigator, RouteTable};
use crate::types::{
    ActivationStatus, CombinationCreate, CombinationUpdate, EndpointRef, McpServerCreate,
    McpServerUpdate, Role, ServiceCreate, ServiceUpdate, UserCreate, UserUpdate,
};
use clap::Subcommand;
use serde::Serialize;
use serde_json::json;
use std::io::BufRead;
use std::path::{Path, PathBuf};
use tracing::info;

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Sign in and store the session
    Login {
        #[arg(short, long)]
        username: String,
        /// Read from stdin when omitted
        #[arg(short, long)]
        password: Option<String>,
    },
    /// Sign out and clear the local session
    Logout,
    /// Show the signed-in user
    Whoami,
    /// Validate configuration and check the backend is reachable
    Check,
    /// Dashboard statistics
    Dashboard,
    /// Registered OpenAPI services
    #[command(subcommand)]
    Services(ServicesCommand),
    /// Endpoint combinations
    #[command(subcommand)]
    Combinations(CombinationsCommand),
    /// MCP servers
    #[command(subcommand)]
    Servers(ServersCommand),
    /// User accounts (admin only)
    #[command(subcommand)]
    Users(UsersCommand),
    /// List the operations of an OpenAPI document
    Endpoints { url: String },
    /// MCP tool definitions derived from an OpenAPI document
    Tools {
        #[arg(long)]
        openapi_url: Option<String>,
    },
    /// Resolve a console route through the navigation guard
    Open { path: String },
}

#[derive(Debug, Subcommand)]
pub enum ServicesCommand {
    List,
    Get { id: i64 },
    Create {
        #[arg(long)]
        name: String,
        #[arg(long)]
        url: String,
        #[arg(long = "type", default_value = "openapi")]
        kind: String,
    },
    Update {
        id: i64,
        #[arg(long)]
        name: Option<String>,
        #[arg(long)]
        url: Option<String>,
        #[arg(long = "type")]
        kind: Option<String>,
    },
    Delete { id: i64 },
}

#[derive(Debug, Subcommand)]
pub enum CombinationsCommand {
    List,
    Get { id: i64 },
    Create {
        #[arg(long)]
        name: String,
        #[arg(long, default_value = "")]
        description: String,
        /// JSON file holding an array of endpoint references
        #[arg(long, value_name = "FILE")]
        endpoints: Option<PathBuf>,
    },
    Update {
        id: i64,
        #[arg(long)]
        name: Option<String>,
        #[arg(long)]
        description: Option<String>,
        #[arg(long, value_name = "FILE")]
        endpoints: Option<PathBuf>,
    },
    Activate { id: i64 },
    Deactivate { id: i64 },
    Delete { id: i64 },
}

#[derive(Debug, Subcommand)]
pub enum ServersCommand {
    List,
    Get { id: i64 },
    Create {
        #[arg(long)]
        name: String,
        #[arg(long)]
        prefix: String,
        #[arg(long, default_value = "")]
        description: String,
        #[arg(long = "combination", value_name = "ID")]
        combination_ids: Vec<i64>,
    },
    Update {
        id: i64,
        #[arg(long)]
        name: Option<String>,
        #[arg(long)]
        description: Option<String>,
        #[arg(long = "combination", value_name = "ID")]
        combination_ids: Option<Vec<i64>>,
    },
    Activate { id: i64 },
    Deactivate { id: i64 },
    Delete { id: i64 },
    /// Client configuration snippet for a server prefix
    Config { prefix: String },
}

#[derive(Debug, Subcommand)]
pub enum UsersCommand {
    List {
        #[arg(long)]
        skip: Option<u32>,
        #[arg(long)]
        limit: Option<u32>,
    },
    Get { id: i64 },
    Create {
        #[arg(long)]
        username: String,
        #[arg(long)]
        password: String,
        #[arg(long)]
        admin: bool,
    },
    Update {
        id: i64,
        #[arg(long)]
        password: Option<String>,
        #[arg(long)]
        role: Option<Role>,
        #[arg(long)]
        active: Option<bool>,
    },
    Delete { id: i64 },
}

pub async fn run(command: Command, config: &Config, client: &ConsoleClient) -> Result<()> {
    match command {
        Command::Login { username, password } => {
            let password = match password {
                Some(password) => password,
                None => read_password()?,
            };
            let response = client.auth().login(&username, &password).await?;
            print_json(&response.user)
        }
        Command::Logout => {
            // the local session goes even when the server call fails
            let response = client.auth().logout().await;
            client.session().clear()?;
            info!("Local session cleared");
            print_json(&response?)
        }
        Command::Whoami => print_json(&client.auth().current_user().await?),
        Command::Check => run_check(config, client).await,
        Command::Dashboard => print_json(&client.dashboard().stats().await?),
        Command::Services(command) => run_services(command, client).await,
        Command::Combinations(command) => run_combinations(command, client).await,
        Command::Servers(command) => run_servers(command, client).await,
        Command::Users(command) => run_users(command, client).await,
        Command::Endpoints { url } => print_json(&client.tools().list_endpoints(&url).await?),
        Command::Tools { openapi_url } => {
            print_json(&client.tools().mcp_tools(openapi_url.as_deref()).await?)
        }
        Command::Open { path } => {
            let navigator = Navigator::new(RouteTable::console(), client.session().clone());
            let location = navigator.navigate(&path)?;
            let route = navigator.routes().resolve(&location.path);
            print_json(&json!({
                "requested": path,
                "location": location.full_path(),
                "route": route.map(|route| route.name.as_str()),
            }))
        }
    }
}

async fn run_services(command: ServicesCommand, client: &ConsoleClient) -> Result<()> {
    let services = client.services();
    match command {
        ServicesCommand::List => print_json(&services.list().await?),
        ServicesCommand::Get { id } => print_json(&services.get(id).await?),
        ServicesCommand::Create { name, url, kind } => {
            print_json(&services.create(&ServiceCreate { name, url, kind }).await?)
        }
        ServicesCommand::Update { id, name, url, kind } => {
            print_json(&services.update(id, &ServiceUpdate { name, url, kind }).await?)
        }
        ServicesCommand::Delete { id } => {
            services.delete(id).await?;
            info!("Deleted service {}", id);
            Ok(())
        }
    }
}

async fn run_combinations(command: CombinationsCommand, client: &ConsoleClient) -> Result<()> {
    let combinations = client.combinations();
    match command {
        CombinationsCommand::List => print_json(&combinations.list().await?),
        CombinationsCommand::Get { id } => print_json(&combinations.get(id).await?),
        CombinationsCommand::Create {
            name,
            description,
            endpoints,
        } => {
            let endpoints = match endpoints {
                Some(path) => read_endpoints(&path)?,
                None => Vec::new(),
            };
            let created = combinations
                .create(&CombinationCreate {
                    name,
                    description,
                    endpoints,
                })
                .await?;
            print_json(&created)
        }
        CombinationsCommand::Update {
            id,
            name,
            description,
            endpoints,
        } => {
            let endpoints = endpoints.as_deref().map(read_endpoints).transpose()?;
            let updated = combinations
                .update(
                    id,
                    &CombinationUpdate {
                        name,
                        description,
                        endpoints,
                    },
                )
                .await?;
            print_json(&updated)
        }
        CombinationsCommand::Activate { id } => {
            print_json(&combinations.set_status(id, ActivationStatus::Active).await?)
        }
        CombinationsCommand::Deactivate { id } => {
            print_json(&combinations.set_status(id, ActivationStatus::Inactive).await?)
        }
        CombinationsCommand::Delete { id } => {
            combinations.delete(id).await?;
            info!("Deleted combination {}", id);
            Ok(())
        }
    }
}

async fn run_servers(command: ServersCommand, client: &ConsoleClient) -> Result<()> {
    let servers = client.mcp_servers();
    match command {
        ServersCommand::List => print_json(&servers.list().await?),
        ServersCommand::Get { id } => print_json(&servers.get(id).await?),
        ServersCommand::Create {
            name,
            prefix,
            description,
            combination_ids,
        } => {
            let created = servers
                .create(&McpServerCreate {
                    name,
                    prefix,
                    description,
                    combination_ids,
                })
                .await?;
            print_json(&created)
        }
        ServersCommand::Update {
            id,
            name,
            description,
            combination_ids,
        } => {
            let updated = servers
                .update(
                    id,
                    &McpServerUpdate {
                        name,
                        description,
                        combination_ids,
                    },
                )
                .await?;
            print_json(&updated)
        }
        ServersCommand::Activate { id } => {
            print_json(&servers.set_status(id, ActivationStatus::Active).await?)
        }
        ServersCommand::Deactivate { id } => {
            print_json(&servers.set_status(id, ActivationStatus::Inactive).await?)
        }
        ServersCommand::Delete { id } => {
            servers.delete(id).await?;
            info!("Deleted MCP server {}", id);
            Ok(())
        }
        ServersCommand::Config { prefix } => print_json(&servers.config(&prefix).await?),
    }
}

async fn run_users(command: UsersCommand, client: &ConsoleClient) -> Result<()> {
    let users = client.users();
    match command {
        UsersCommand::List { skip, limit } => print_json(&users.list(skip, limit).await?),
        UsersCommand::Get { id } => print_json(&users.get(id).await?),
        UsersCommand::Create {
            username,
            password,
            admin,
        } => {
            let role = if admin { Role::Admin } else { Role::User };
            let created = users
                .create(&UserCreate {
                    username,
                    password,
                    role,
                })
                .await?;
            print_json(&created)
        }
        UsersCommand::Update {
            id,
            password,
            role,
            active,
        } => {
            let updated = users
                .update(
                    id,
                    &UserUpdate {
                        password,
                        role,
                        is_active: active,
                    },
                )
                .await?;
            print_json(&updated)
        }
        UsersCommand::Delete { id } => {
            users.delete(id).await?;
            info!("Deleted user {}", id);
            Ok(())
        }
    }
}

fn print_json<T: Serialize + ?Sized>(value: &T) -> Result<()> {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}

fn read_password() -> Result<String> {
    let mut line = String::new();
    std::io::stdin()
        .lock()
        .read_line(&mut line)
        .map_err(|e| ConsoleError::InvalidRequest(format!("Failed to read password: {e}")))?;
    Ok(line.trim_end_matches(['\r', '\n']).to_string())
}

fn read_endpoints(path: &Path) -> Result<Vec<EndpointRef>> {
    let raw = std::fs::read_to_string(path).map_err(|e| {
        ConsoleError::InvalidRequest(format!("Failed to read {}: {e}", path.display()))
    })?;
    Ok(serde_json::from_str(&raw)?)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn test_read_endpoints_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(
            file,
            r#"[{{"serviceName":"petstore","serviceUrl":"http://pets/openapi.json","path":"/pets","method":"GET"}}]"#
        )
        .unwrap();

        let endpoints = read_endpoints(file.path()).unwrap();
        assert_eq!(endpoints.len(), 1);
        assert_eq!(endpoints[0].service_name, "petstore");
        assert_eq!(endpoints[0].summary, "");
    }

    #[test]
    fn test_read_endpoints_missing_file() {
        let err = read_endpoints(Path::new("/nonexistent/endpoints.json")).unwrap_err();
        assert!(matches!(err, ConsoleError::InvalidRequest(_)));
    }
}
