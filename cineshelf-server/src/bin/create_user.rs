//! Operator tool for provisioning Cineshelf accounts.
//!
//! The server exposes no registration route; accounts (including the first
//! admin) are created from the shell:
//!
//! ```sh
//! create-user admin@example.com "Site Admin" s3cret --admin
//! ```

use anyhow::Context;
use clap::Parser;
use cineshelf_core::{UserRepository, auth::password};

#[derive(Debug, Parser)]
#[command(name = "create-user", about = "Provision a Cineshelf account")]
struct Args {
    /// Email address used to log in.
    email: String,
    /// Name shown on the home page.
    display_name: String,
    /// Password, hashed with argon2id before storage.
    password: String,
    /// Grant access to the admin panel.
    #[arg(long)]
    admin: bool,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let args = Args::parse();
    dotenvy::dotenv().ok();

    let database_url =
        std::env::var("DATABASE_URL").context("DATABASE_URL must be set")?;
    let pool = cineshelf_core::connect(&database_url)
        .await
        .context("failed to connect to database")?;
    cineshelf_core::MIGRATOR
        .run(&pool)
        .await
        .context("failed to run migrations")?;

    let hash = password::hash_password(&args.password)?;
    let user = UserRepository::new(pool)
        .create(&args.email, &args.display_name, &hash, args.admin)
        .await?;

    println!(
        "created {} ({}){}",
        user.email,
        user.id,
        if user.is_admin { " [admin]" } else { "" }
    );
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn admin_flag_is_opt_in() {
        let args = Args::parse_from(["create-user", "a@b.example", "Ada", "pw"]);
        assert!(!args.admin);

        let args =
            Args::parse_from(["create-user", "a@b.example", "Ada", "pw", "--admin"]);
        assert!(args.admin);
        assert_eq!(args.email, "a@b.example");
    }
}
