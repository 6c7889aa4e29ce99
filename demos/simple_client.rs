//! Simple IRC bot example
//!
//! Connects using a TOML config (or the built-in defaults), joins the
//! configured channels, answers `!users` with the channel's member count,
//! and quits on `!quit`.
//!
//! Run with: `cargo run --example simple_client -- anolis.toml`
//! Set `RUST_LOG=anolis=debug` to see every line sent and received.

use anolis::{Client, Config, Context, Message};
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    let config = match std::env::args().nth(1) {
        Some(path) => Config::load(path)?,
        None => Config {
            channels: vec!["#anolis".to_string()],
            ..Config::default()
        },
    };

    let client = Client::connect(config).await?;

    client
        .events()
        .register("PRIVMSG", |msg: &mut Message, ctx: &dyn Context| {
            let Some(target) = msg.arg(0) else {
                return;
            };
            match msg.payload() {
                "!users" => {
                    if let Some(channel) = ctx.channels().get(target) {
                        let count = channel.users().len();
                        ctx.commands()
                            .privmsg(target, &format!("{} users in {}", count, target));
                    }
                }
                "!topic" => {
                    if let Some(channel) = ctx.channels().get(target) {
                        ctx.commands().notice(target, &channel.topic());
                    }
                }
                "!quit" => ctx.commands().quit("Goodbye!"),
                _ => {}
            }
        });

    // Log every membership change after the built-in handlers have run
    for command in ["JOIN", "PART", "KICK", "QUIT", "NICK"] {
        client
            .events()
            .register(command, |msg: &mut Message, _: &dyn Context| {
                println!("← {}", msg);
            });
    }

    let reason = client.run().await?;
    println!("session ended: {}", reason);
    Ok(())
}
