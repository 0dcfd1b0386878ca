//! gcloud CLI token lookup

use tokio::process::Command;

/// Get an access token from the gcloud CLI
///
/// Returns `None` when gcloud is missing, unauthenticated, or prints nothing.
pub async fn get_gcloud_token() -> Option<String> {
    // Check gcloud is available
    Command::new("gcloud")
        .arg("--version")
        .output()
        .await
        .ok()?;

    let output = Command::new("gcloud")
        .args(["auth", "print-access-token", "--quiet"])
        .output()
        .await
        .ok()?;

    if !output.status.success() {
        return None;
    }

    let token = String::from_utf8_lossy(&output.stdout).trim().to_string();
    if token.is_empty() { None } else { Some(token) }
}
