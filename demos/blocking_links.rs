//! Blocking session + links demo.
//!
//! ```bash
//! cargo run --example blocking_links
//! ```
//!
//! Env vars:
//! - `GUMROAD_EMAIL`, `GUMROAD_PASSWORD` (required)
//! - `GUMROAD_URL` (optional, default: the public API)
//! - `GUMROAD_LINK_NAME` (default: `Widget`)
//! - `GUMROAD_LINK_PRICE` (default: `500`, in cents)

use gumroad_sdk::{BlockingClient, LinkParams};
use std::time::Duration;

fn main() -> anyhow::Result<()> {
    let (Some(email), Some(password)) = (env_opt("GUMROAD_EMAIL"), env_opt("GUMROAD_PASSWORD"))
    else {
        eprintln!("missing GUMROAD_EMAIL / GUMROAD_PASSWORD");
        return Ok(());
    };

    let mut builder = BlockingClient::builder().timeout(Duration::from_secs(10));
    if let Some(url) = env_opt("GUMROAD_URL") {
        builder = builder.base_url(url);
    }
    let client = builder.build()?;

    let name = env_or("GUMROAD_LINK_NAME", "Widget");
    let price: u64 = env_or("GUMROAD_LINK_PRICE", "500").parse()?;

    // Logs out when `session` goes out of scope.
    let session = client.session(email, password)?;

    let links = session.links();
    for link in links.list()?.links()? {
        println!(
            "{} {}",
            link.id.as_ref().map_or("-", |id| id.as_str()),
            link.name.as_deref().unwrap_or("<unnamed>")
        );
    }

    let created = links.create(LinkParams::new().name(name).price(price))?;
    let Some(id) = created.link()?.and_then(|link| link.id) else {
        eprintln!("create returned no link id");
        return Ok(());
    };
    println!("created {id}");

    links.disable(&id)?;
    links.enable(&id)?;
    links.delete(&id)?;
    println!("deleted {id}");

    session.end()?;
    Ok(())
}

fn env_opt(key: &str) -> Option<String> {
    std::env::var(key).ok().filter(|v| !v.trim().is_empty())
}

fn env_or(key: &str, default: &str) -> String {
    env_opt(key).unwrap_or_else(|| default.to_owned())
}
