//! Async links demo using a scoped session.
//!
//! ```bash
//! cargo run --example async_links --features async
//! ```
//!
//! Env vars:
//! - `GUMROAD_EMAIL`, `GUMROAD_PASSWORD` (required)
//! - `GUMROAD_URL` (optional, default: the public API)

use gumroad_sdk::{Client, Validation};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let (Some(email), Some(password)) = (env_opt("GUMROAD_EMAIL"), env_opt("GUMROAD_PASSWORD"))
    else {
        eprintln!("missing GUMROAD_EMAIL / GUMROAD_PASSWORD");
        return Ok(());
    };

    let mut builder = Client::builder().validation(Validation::Permissive);
    if let Some(url) = env_opt("GUMROAD_URL") {
        builder = builder.base_url(url);
    }
    let client = builder.build()?;

    let count = client
        .with_session(email, password, |client| async move {
            let resp = client.links().list().await?;
            println!("HTTP {}", resp.status());
            Ok::<_, anyhow::Error>(resp.links()?.len())
        })
        .await?;

    println!("{count} links");
    Ok(())
}

fn env_opt(key: &str) -> Option<String> {
    std::env::var(key).ok().filter(|v| !v.trim().is_empty())
}
