//! Drives a [`Session`] over a [`Transport`].
//!
//! ```no_run
//! use anolis::{Client, Config};
//!
//! # async fn run() -> anyhow::Result<()> {
//! let config = Config::load("anolis.toml")?;
//! let client = Client::connect(config).await?;
//! client.events().register("PRIVMSG", |msg: &mut anolis::Message, _ctx: &dyn anolis::Context| {
//!     println!("{}", msg);
//! });
//! let reason = client.run().await?;
//! println!("session ended: {}", reason);
//! # Ok(())
//! # }
//! ```

use std::sync::Arc;

use anyhow::Result;
use tracing::{debug, info, warn};

use crate::config::{Config, DispatchMode};
use crate::context::{Commands, Context};
use crate::event::Events;
use crate::message::Message;
use crate::session::{CloseReason, Outbox, Session};
use crate::transport::Transport;

/// A registered connection to one server.
pub struct Client {
    config: Config,
    session: Arc<Session>,
    outbox: Outbox,
    transport: Transport,
}

impl Client {
    /// Connect to the configured server.
    pub async fn connect(config: Config) -> Result<Self> {
        let transport = Transport::connect(config.address()).await?;
        info!(address = %config.address(), nickname = %config.nickname, "connected");
        Ok(Self::new(config, transport))
    }

    /// Wrap an already connected transport.
    pub fn new(config: Config, transport: Transport) -> Self {
        let (session, outbox) = Session::new(config.nickname.clone());

        // ERR_NICKNAMEINUSE: retry once with the alternative
        let alternative = config.alternative();
        session
            .events()
            .register("433", move |_: &mut Message, ctx: &dyn Context| {
                if ctx.current_nickname() == alternative {
                    warn!(nickname = %alternative, "alternative nickname is taken too");
                    return;
                }
                ctx.commands().nick(&alternative);
                ctx.update_local_nickname(&alternative);
            });

        if !config.channels.is_empty() {
            let channels = config.channels.clone();
            session
                .events()
                .register("001", move |_: &mut Message, ctx: &dyn Context| {
                    for channel in &channels {
                        ctx.commands().join(channel);
                    }
                });
        }

        Self {
            config,
            session,
            outbox,
            transport,
        }
    }

    /// The session this client feeds.
    pub fn session(&self) -> &Arc<Session> {
        &self.session
    }

    /// Shorthand for the session's event registry.
    pub fn events(&self) -> &Events {
        self.session.events()
    }

    /// Register, then pump lines until the session closes.
    ///
    /// Returns why the session ended. Transport failures close the session
    /// rather than surfacing as errors.
    pub async fn run(mut self) -> Result<CloseReason> {
        self.register();

        let reason = loop {
            tokio::select! {
                biased;
                reason = self.session.closed() => break reason,
                Some(line) = self.outbox.recv() => {
                    debug!(line = %line, "send");
                    if let Err(e) = self.transport.write_line(&line).await {
                        self.session.close(CloseReason::Transport(e.to_string()));
                    }
                }
                read = self.transport.read_line() => match read {
                    Ok(Some(line)) => self.receive(line),
                    Ok(None) => {
                        self.session.close(CloseReason::ConnectionClosed);
                    }
                    Err(e) => {
                        self.session.close(CloseReason::Transport(e.to_string()));
                    }
                },
            }
        };

        self.flush().await;
        if let Err(e) = self.transport.close().await {
            debug!(error = %e, "transport close failed");
        }
        self.session.channels().clear();
        info!(%reason, "client stopped");
        Ok(reason)
    }

    fn register(&self) {
        let commands = self.session.commands();
        if let Some(password) = &self.config.password {
            commands.raw(format!("PASS {}", password));
        }
        commands.nick(&self.config.nickname);
        commands.raw(format!(
            "USER {} 0 * :{}",
            self.config.username(),
            self.config.realname()
        ));
    }

    fn receive(&self, line: String) {
        debug!(line = %line, "recv");
        let message = match Message::parse(&line) {
            Ok(message) => message,
            Err(e) => {
                warn!(error = %e, line = %line, "skipping malformed line");
                return;
            }
        };

        match self.config.dispatch {
            DispatchMode::Serial => {
                self.session.dispatch(message);
            }
            DispatchMode::Concurrent => {
                let session = Arc::clone(&self.session);
                tokio::spawn(async move {
                    session.dispatch(message);
                });
            }
        }
    }

    async fn flush(&mut self) {
        while let Ok(line) = self.outbox.try_recv() {
            debug!(line = %line, "send");
            if let Err(e) = self.transport.write_line(&line).await {
                debug!(error = %e, "dropping unsent lines");
                break;
            }
        }
    }
}
