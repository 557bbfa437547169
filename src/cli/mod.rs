// CLI module for administrative operations requiring server access

pub mod migrate;
pub mod user;

use clap::{Parser, Subcommand};

use crate::app_data::AppData;

/// No-due clearance backend
#[derive(Parser, Debug)]
#[command(name = "nodue-backend")]
#[command(about = "No-due clearance backend server and admin CLI", long_about = None)]
pub struct Cli {
    /// Runs the HTTP server when omitted
    #[command(subcommand)]
    pub command: Option<Commands>,
}

#[derive(Subcommand, Debug, PartialEq)]
pub enum Commands {
    /// Run the HTTP server (default)
    Serve,

    /// Apply pending database migrations and exit
    Migrate,

    /// Create a user account
    AddUser {
        /// Unique login name
        #[arg(long)]
        username: String,

        /// Password; a random one is generated and printed when omitted
        #[arg(long)]
        password: Option<String>,

        /// One of Admin, Student, HOD, Library, Staff
        #[arg(long)]
        role: String,

        /// College name scoping the account
        #[arg(long)]
        college: Option<String>,

        /// Branch name scoping the account
        #[arg(long)]
        branch: Option<String>,
    },
}

/// Execute a CLI command that needs the full application data
///
/// `Serve` and `Migrate` are handled by main before AppData is built.
///
/// # Arguments
/// * `command` - Parsed subcommand
/// * `app_data` - Application data containing all stores and providers
///
/// # Returns
/// * `Ok(())` - Command executed successfully
/// * `Err(...)` - Command execution failed
pub async fn execute_command(
    command: Commands,
    app_data: &AppData,
) -> Result<(), Box<dyn std::error::Error>> {
    match command {
        Commands::AddUser {
            username,
            password,
            role,
            college,
            branch,
        } => {
            user::add_user(
                app_data,
                user::AddUserArgs {
                    username,
                    password,
                    role,
                    college,
                    branch,
                },
            )
            .await?;
        }
        Commands::Serve | Commands::Migrate => {
            tracing::warn!("{:?} is not an administrative command", command);
        }
    }

    Ok(())
}
