//! Discord bot client setup and lifecycle management.

use super::{DiscordError, DiscordErrorKind, HypePulseHandler};
use serenity::Client;
use tracing::{info, instrument};

/// Discord bot client for HypePulse.
///
/// # Example
/// ```rust,ignore
/// use hypepulse_social::{HypePulseBot, HypePulseHandler};
///
/// let handler = HypePulseHandler::new(router, icon_url);
/// let mut bot = HypePulseBot::new(std::env::var("DISCORD_TOKEN")?, handler).await?;
/// bot.start().await?;
/// ```
pub struct HypePulseBot {
    client: Client,
}

impl HypePulseBot {
    /// Build the Serenity client around a handler.
    ///
    /// # Errors
    /// Returns an error if the token is rejected or the client fails to
    /// initialize.
    #[instrument(skip(token, handler), fields(token_len = token.len()))]
    pub async fn new(token: String, handler: HypePulseHandler) -> Result<Self, DiscordError> {
        info!("Initializing HypePulse Discord bot");

        let intents = HypePulseHandler::intents();
        info!("Building Serenity client with intents: {:?}", intents);

        let client = Client::builder(&token, intents)
            .event_handler(handler)
            .await
            .map_err(|e| {
                DiscordError::new(DiscordErrorKind::ConnectionFailed(format!(
                    "Failed to build client: {}",
                    e
                )))
            })?;

        info!("Serenity client built successfully");
        Ok(Self { client })
    }

    /// Connect and serve events until shutdown.
    ///
    /// # Errors
    /// Returns an error if the client fails to start or hits a fatal error.
    #[instrument(skip(self))]
    pub async fn start(&mut self) -> Result<(), DiscordError> {
        info!("Starting Discord bot");

        self.client.start().await.map_err(|e| {
            DiscordError::new(DiscordErrorKind::ConnectionFailed(format!(
                "Client error: {}",
                e
            )))
        })?;

        Ok(())
    }
}
