//! User management commands.

use serde_json::json;

use crate::backend::{backend_label, create_backend};
use crate::cli::UserListArgs;
use crate::output::{OutputFormat, print_table};

/// Run the `user list` command
pub async fn list(args: &UserListArgs) -> Result<(), Box<dyn std::error::Error>> {
    let store = create_backend(&args.backend_config).await?;
    let users = store.find_all().await?;

    match OutputFormat::from_json_flag(args.json) {
        OutputFormat::Human => {
            if users.is_empty() {
                println!(
                    "No users found in {} store.",
                    backend_label(&args.backend_config)
                );
                return Ok(());
            }

            let rows: Vec<Vec<String>> = users
                .iter()
                .map(|u| {
                    vec![
                        u.id.map(|id| id.to_string()).unwrap_or_default(),
                        u.user_id.clone(),
                        u.name.clone(),
                        u.email.clone(),
                    ]
                })
                .collect();
            print_table(&["ID", "USER ID", "NAME", "EMAIL"], &rows);
        }
        OutputFormat::Json => {
            // Passwords stay out of the listing
            let entries: Vec<_> = users
                .iter()
                .map(|u| {
                    json!({
                        "id": u.id,
                        "userId": u.user_id,
                        "name": u.name,
                        "email": u.email,
                    })
                })
                .collect();
            println!("{}", serde_json::to_string(&entries)?);
        }
    }

    Ok(())
}
