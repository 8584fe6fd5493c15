use anyhow::Context;
use clap::{Parser, Subcommand};
use galleria::{
    client::{AuthSession, FileCredentialStore, LogNavigator},
    config::AppConfig,
    db,
    repositories::MongoUserRepository,
    services::{CreateUserRequest, PasswordHasher, UserService},
};
use std::{path::PathBuf, sync::Arc};
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "galleria-cli")]
#[command(about = "CLI tool for managing galleria users and sessions", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// User management commands (talks to MongoDB directly)
    User {
        #[command(subcommand)]
        command: UserCommands,
    },

    /// Register an account on a running server
    Register {
        #[command(flatten)]
        client: ClientArgs,

        /// Email address
        #[arg(short, long)]
        email: String,

        /// Password (will prompt if not provided)
        #[arg(short, long)]
        password: Option<String>,
    },

    /// Log in and store the issued token
    Login {
        #[command(flatten)]
        client: ClientArgs,

        /// Email address
        #[arg(short, long)]
        email: String,

        /// Password (will prompt if not provided)
        #[arg(short, long)]
        password: Option<String>,
    },

    /// Notify the server and forget the stored token
    Logout {
        #[command(flatten)]
        client: ClientArgs,
    },

    /// Show the stored session
    Whoami {
        #[command(flatten)]
        client: ClientArgs,
    },

    /// List gallery images
    Images {
        #[command(flatten)]
        client: ClientArgs,
    },
}

#[derive(Subcommand)]
enum UserCommands {
    /// Create a new user
    Create {
        /// Email address
        #[arg(short, long)]
        email: String,

        /// Password (will prompt if not provided)
        #[arg(short, long)]
        password: Option<String>,
    },

    /// Show a single user
    Show {
        /// Email address
        #[arg(short, long)]
        email: String,
    },

    /// List users, oldest first
    List {
        /// Maximum number of users to display
        #[arg(short, long, default_value_t = 100, value_parser = clap::value_parser!(i64).range(1..))]
        limit: i64,
    },
}

#[derive(clap::Args)]
struct ClientArgs {
    /// Server base URL
    #[arg(long, default_value = "http://localhost:3000")]
    server: String,

    /// Credentials file (defaults to the user config directory)
    #[arg(long)]
    credentials: Option<PathBuf>,
}

impl ClientArgs {
    fn session(&self) -> anyhow::Result<AuthSession> {
        let store = match &self.credentials {
            Some(path) => FileCredentialStore::new(path),
            None => FileCredentialStore::default_location(),
        };
        AuthSession::load(&self.server, Arc::new(store), Arc::new(LogNavigator))
            .context("Failed to load client session")
    }
}

fn get_password(prompt: &str) -> anyhow::Result<String> {
    use std::io::{self, Write};
    print!("{}: ", prompt);
    io::stdout().flush()?;

    Ok(rpassword::read_password()?)
}

fn password_or_prompt(password: Option<String>) -> anyhow::Result<String> {
    match password {
        Some(pw) => Ok(pw),
        None => get_password("Password"),
    }
}

async fn user_service() -> anyhow::Result<UserService> {
    let config = AppConfig::from_env()?;
    let database = db::connect(&config)
        .await
        .context("MongoDB connection failed")?;

    let user_repository = Arc::new(MongoUserRepository::new(&database));
    user_repository.ensure_indexes().await?;

    Ok(UserService::new(user_repository, PasswordHasher::new()))
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Load environment variables
    dotenvy::dotenv().ok();

    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| "galleria=info".into()),
        )
        .with_writer(std::io::stderr)
        .init();

    // Parse CLI arguments
    let cli = Cli::parse();

    match cli.command {
        Commands::User { command } => {
            let user_service = user_service().await?;

            match command {
                UserCommands::Create { email, password } => {
                    let request = CreateUserRequest {
                        email,
                        password: password_or_prompt(password)?,
                    };

                    let user = user_service
                        .create_user(request)
                        .await
                        .context("Failed to create user")?;
                    println!("✅ User created successfully!");
                    println!("  ID: {}", user.id.to_hex());
                    println!("  Email: {}", user.email);
                }

                UserCommands::Show { email } => {
                    let user = user_service
                        .find_user_by_email(&email)
                        .await
                        .context("Failed to look up user")?;

                    match user {
                        Some(user) => {
                            let created = user
                                .created_at
                                .try_to_rfc3339_string()
                                .unwrap_or_else(|_| "N/A".to_string());
                            println!("  ID: {}", user.id.to_hex());
                            println!("  Email: {}", user.email);
                            println!("  Created: {}", created);
                        }
                        None => anyhow::bail!("No user registered as {}", email.trim()),
                    }
                }

                UserCommands::List { limit } => {
                    let users = user_service
                        .list_users(Some(limit))
                        .await
                        .context("Failed to list users")?;

                    if users.is_empty() {
                        println!("No users found.");
                    } else {
                        println!("{:<26} {:<40} {:<25}", "ID", "Email", "Created");
                        println!("{}", "-".repeat(91));
                        for user in users {
                            let created = user
                                .created_at
                                .try_to_rfc3339_string()
                                .unwrap_or_else(|_| "N/A".to_string());
                            println!("{:<26} {:<40} {:<25}", user.id.to_hex(), user.email, created);
                        }
                    }
                }
            }
        }

        Commands::Register {
            client,
            email,
            password,
        } => {
            let session = client.session()?;
            let password = password_or_prompt(password)?;
            session
                .register(&email, &password)
                .await
                .context("Registration failed")?;
            println!("✅ Registered {}", email.trim().to_lowercase());
        }

        Commands::Login {
            client,
            email,
            password,
        } => {
            let mut session = client.session()?;
            let password = password_or_prompt(password)?;
            session
                .login(&email, &password)
                .await
                .context("Login failed")?;
            println!("✅ Logged in as {}", email.trim().to_lowercase());
        }

        Commands::Logout { client } => {
            client.session()?.logout().await?;
            println!("Logged out.");
        }

        Commands::Whoami { client } => {
            let session = client.session()?;
            if !session.require_auth() {
                println!("Not logged in.");
            } else {
                let email = session.user().map(|u| u.email.as_str()).unwrap_or("unknown");
                println!("Logged in to {} as {}", session.base_url(), email);
            }
        }

        Commands::Images { client } => {
            let mut session = client.session()?;
            let images = session.images().await.context("Failed to list images")?;
            if images.is_empty() {
                println!("No images found.");
            }
            for image in images {
                println!("{}", image);
            }
        }
    }

    Ok(())
}
