//! List a user's public gists, and the files in each.

use eyre::Report;
use gists::{GistClient, ListGists};

#[tokio::main]
async fn main() -> eyre::Result<()> {
    tracing_subscriber::fmt::init();

    let username = std::env::args()
        .nth(1)
        .ok_or_else(|| Report::msg("usage: list-gists <username>"))?;

    let client = GistClient::from_env()?;
    let gists = client
        .list_for_user(&username, &ListGists::new().per_page(10))
        .await?;

    for gist in gists {
        println!(
            "{} {} ({})",
            gist.id,
            gist.description.as_deref().unwrap_or("<no description>"),
            gist.owner.display_name()
        );
        for file in &gist.files {
            println!(
                "    {} {}",
                file.filename,
                file.language.as_deref().unwrap_or("-")
            );
        }
    }

    if client.has_token() {
        let starred = client.list_starred(&ListGists::new()).await?;
        println!("{} starred gists", starred.len());
    }

    Ok(())
}
