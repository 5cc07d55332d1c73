//! Example: Authorizing against Infusionsoft and calling the API
//!
//! # Setup
//!
//! 1. Set up environment variables (or write `infusionsoft.toml`):
//!    `INFUSIONSOFT_CLIENT_ID`, `INFUSIONSOFT_CLIENT_SECRET`,
//!    `INFUSIONSOFT_REDIRECT_URI`
//!
//! 2. Run without arguments to print the authorization URL:
//!    `cargo run -p infusionsoft --example authorize`
//!
//! 3. Visit the URL, then pass the `code` from the redirect:
//!    `cargo run -p infusionsoft --example authorize -- <code>`

use infusionsoft::{config, Infusionsoft, Value};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt::init();

    let mut client = Infusionsoft::new(config::load()?);

    let Some(code) = std::env::args().nth(1) else {
        println!("Authorize this client at:\n  {}", client.authorization_url()?);
        return Ok(());
    };

    let token = client.request_access_token(&code).await?;
    println!("✓ Access token acquired, expires at {}", token.expires_at());

    let echo = client
        .data()
        .skip_legacy_key()
        .call("echo", vec![Value::from("hello")])
        .await?;
    println!("✓ DataService.echo returned {echo:?}");

    Ok(())
}
