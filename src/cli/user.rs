// add-user command implementation
// Seeds accounts; there is no self-registration

use crate::app_data::AppData;
use crate::providers::CreateUserRequest;
use crate::types::db::user;
use crate::types::internal::{RequestContext, Role};

/// Arguments of the `add-user` command
#[derive(Debug, Clone)]
pub struct AddUserArgs {
    pub username: String,
    pub password: Option<String>,
    pub role: String,
    pub college: Option<String>,
    pub branch: Option<String>,
}

/// Create a user account from the command line
///
/// Prints the credentials once; a generated password is not stored anywhere else.
///
/// # Arguments
/// * `app_data` - Application data with the user provider
/// * `args` - Parsed command arguments
///
/// # Returns
/// * `Ok(user::Model)` - The created account
/// * `Err(...)` - Unknown role, invalid input or duplicate username
pub async fn add_user(
    app_data: &AppData,
    args: AddUserArgs,
) -> Result<user::Model, Box<dyn std::error::Error>> {
    let ctx = RequestContext::for_cli("add-user");

    // Step 1: Parse the role
    let role: Role = args.role.parse()?;

    // Step 2: Use the given password or generate one
    let generated = args.password.is_none();
    let password = match args.password {
        Some(password) => password,
        None => app_data.providers.crypto_provider.generate_secure_password(),
    };

    // Step 3: Create the account
    let created = app_data
        .providers
        .user_provider
        .create_user(CreateUserRequest {
            username: args.username,
            password: password.clone(),
            role,
            college_name: args.college,
            branch_name: args.branch,
        })
        .await?;

    tracing::info!(
        request_id = %ctx.request_id,
        actor = %ctx.actor_id,
        user_id = %created.id,
        role = %role,
        "User created from CLI"
    );

    println!("\n✓ User account created");
    println!("  Username: {}", created.username);
    println!("  Role:     {}", created.role);
    if let (Some(college), Some(branch)) = (&created.college_name, &created.branch_name) {
        println!("  Scope:    {} / {}", college, branch);
    } else {
        println!("  ⚠️  No college/branch set: this account cannot submit, approve or manage the directory");
    }
    if generated {
        println!("  Password: {}", password);
        println!("  ⚠️  Store this password now, it is not shown again\n");
    }

    Ok(created)
}
