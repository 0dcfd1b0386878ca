//! Status command - show Google's latest notifications for a URL

use crate::cli::ConnectionArgs;
use crate::cli::style::{Stylize, link};
use anstream::println;
use bulk_indexer::auth::get_google_auth;
use bulk_indexer::error::Result;
use bulk_indexer::indexing::create_indexing_service;
use bulk_indexer::types::NotificationRecord;
use std::time::Duration;

/// Run the status command
pub async fn run_status(url: &str, connection: &ConnectionArgs) -> Result<()> {
    let auth = get_google_auth(connection.credentials.as_deref()).await?;
    let service = create_indexing_service(
        auth,
        &connection.endpoint,
        Duration::from_secs(connection.timeout_secs),
    )?;

    let meta = service.metadata(url).await?;

    println!("{}", link(&meta.url).emphasis());
    print_record("Last update", meta.latest_update.as_ref());
    print_record("Last removal", meta.latest_remove.as_ref());

    Ok(())
}

fn print_record(label: &str, record: Option<&NotificationRecord>) {
    match record {
        Some(r) => println!(
            "  {label}: {} {}",
            r.notify_time.to_rfc3339().accent(),
            r.kind.muted()
        ),
        None => println!("  {label}: {}", "never".muted()),
    }
}
