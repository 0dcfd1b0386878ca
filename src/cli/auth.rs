//! Auth command - test and explain authentication

use crate::cli::style::{Stylize, check};
use anstream::println;
use bulk_indexer::auth::{
    AuthSource, CREDENTIALS_ENV_VAR, DEFAULT_KEY_FILE, TOKEN_ENV_VAR, TOKENINFO_URL,
    get_google_auth, test_google_auth,
};
use bulk_indexer::error::Result;
use std::path::Path;

/// Run the auth test command
pub async fn run_auth_test(credentials: Option<&Path>) -> Result<()> {
    println!("Testing Google authentication...");
    let config = get_google_auth(credentials).await?;
    let info = test_google_auth(&config, TOKENINFO_URL).await?;

    let identity = config
        .identity
        .as_deref()
        .or(info.email.as_deref())
        .unwrap_or("unknown account");
    println!("{} Authenticated as: {}", check(), identity.accent());

    match &config.source {
        AuthSource::ServiceAccount(path) => {
            println!("Token source: service account ({})", path.display());
        }
        AuthSource::EnvVar => println!("Token source: {TOKEN_ENV_VAR}"),
        AuthSource::Cli => println!("Token source: gcloud CLI"),
    }

    if let Some(expires) = config.expires_at {
        println!("{}", format!("Expires: {}", expires.to_rfc3339()).muted());
    } else if let Some(secs) = &info.expires_in {
        println!("{}", format!("Expires in: {secs}s").muted());
    }

    Ok(())
}

/// Run the auth setup command (show instructions)
pub fn run_auth_setup() {
    println!("{}", "Google Indexing API Authentication Setup".emphasis());
    println!("========================================");
    println!();
    println!("Option 1: Service account (recommended)");
    println!("  1. Enable the Indexing API in a Google Cloud project");
    println!("  2. Create a service account and download a JSON key");
    println!("  3. Add the service account email as an Owner in Search Console");
    println!(
        "  4. Pass --credentials <FILE>, set {CREDENTIALS_ENV_VAR}, or save it as {DEFAULT_KEY_FILE}"
    );
    println!();
    println!("Option 2: Environment variable");
    println!("  Set {TOKEN_ENV_VAR} to an access token with the indexing scope");
    println!();
    println!("Option 3: gcloud CLI");
    println!("  Run: gcloud auth login");
    println!(
        "  {}",
        "The token must carry https://www.googleapis.com/auth/indexing".muted()
    );
}
