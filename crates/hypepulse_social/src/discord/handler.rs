//! Serenity event handler for the slash commands.

use super::commands::{slash_commands, USERNAME_OPTION};
use super::render::{navigation_row, page_embed, parse_control_id, text_response};
use super::{DiscordError, DiscordErrorKind, DiscordResult};
use crate::{CommandRouter, Reply};
use hypepulse_format::Paginator;
use serenity::all::{
    Command as ApplicationCommand, CommandInteraction, CreateInteractionResponse,
    CreateInteractionResponseMessage, EditInteractionResponse, Interaction, Message, Ready,
};
use serenity::async_trait;
use serenity::client::{Context, EventHandler};
use serenity::model::gateway::GatewayIntents;
use std::sync::Arc;
use tracing::{debug, error, info, instrument, warn};

/// Event handler for the HypePulse Discord bot.
///
/// Registers the slash commands once connected, then answers each command
/// interaction through the [`CommandRouter`].
pub struct HypePulseHandler {
    router: Arc<CommandRouter>,
    icon_url: String,
}

impl HypePulseHandler {
    /// Create a handler around a router.
    pub fn new(router: Arc<CommandRouter>, icon_url: impl Into<String>) -> Self {
        Self {
            router,
            icon_url: icon_url.into(),
        }
    }

    /// Required gateway intents for the bot.
    ///
    /// Slash commands and button presses arrive as interactions, which need
    /// no privileged intents.
    pub fn intents() -> GatewayIntents {
        GatewayIntents::GUILDS
    }

    #[instrument(skip_all, fields(command = %command.data.name))]
    async fn handle_command(&self, ctx: &Context, command: &CommandInteraction) -> DiscordResult<()> {
        command.defer(&ctx.http).await.map_err(|e| {
            DiscordError::new(DiscordErrorKind::InteractionFailed(format!(
                "Failed to defer reply: {}",
                e
            )))
        })?;

        let username = command
            .data
            .options
            .iter()
            .find(|option| option.name == USERNAME_OPTION)
            .and_then(|option| option.value.as_str())
            .unwrap_or_default();

        match self.router.handle(&command.data.name, username).await {
            Reply::Text(text) => {
                self.edit(ctx, command, text_response(&text, &self.icon_url))
                    .await?;
            }
            Reply::Page(page) => {
                let embed = page_embed(&page, &self.icon_url);
                self.edit(ctx, command, EditInteractionResponse::new().embed(embed))
                    .await?;
            }
            Reply::Paginated(paginator) => self.paginate(ctx, command, paginator).await?,
        }
        Ok(())
    }

    /// Show the first page with navigation buttons and follow presses until
    /// the paginator times out, then drop the buttons.
    async fn paginate(
        &self,
        ctx: &Context,
        command: &CommandInteraction,
        mut paginator: Paginator,
    ) -> DiscordResult<()> {
        let nonce = command.id.get();
        let first = EditInteractionResponse::new()
            .embed(page_embed(&paginator.render(), &self.icon_url))
            .components(vec![navigation_row(nonce)]);
        let message = self.edit(ctx, command, first).await?;

        debug!(pages = paginator.len(), "Collecting page controls");
        loop {
            let remaining = paginator.remaining();
            if remaining.is_zero() {
                break;
            }

            let Some(press) = message
                .await_component_interaction(&ctx.shard)
                .author_id(command.user.id)
                .timeout(remaining)
                .await
            else {
                break;
            };

            let Some(control) = parse_control_id(&press.data.custom_id, nonce) else {
                if let Err(e) = press
                    .create_response(&ctx.http, CreateInteractionResponse::Acknowledge)
                    .await
                {
                    warn!(error = %e, "Failed to acknowledge unknown control");
                }
                continue;
            };
            if !paginator.apply(control) {
                break;
            }

            let update = CreateInteractionResponseMessage::new()
                .embed(page_embed(&paginator.render(), &self.icon_url))
                .components(vec![navigation_row(nonce)]);
            if let Err(e) = press
                .create_response(&ctx.http, CreateInteractionResponse::UpdateMessage(update))
                .await
            {
                warn!(error = %e, "Failed to update paginated message");
            }
        }

        paginator.expire();
        debug!(page = paginator.index() + 1, "Pagination expired");
        let last = EditInteractionResponse::new()
            .embed(page_embed(&paginator.render(), &self.icon_url))
            .components(Vec::new());
        self.edit(ctx, command, last).await?;
        Ok(())
    }

    async fn edit(
        &self,
        ctx: &Context,
        command: &CommandInteraction,
        response: EditInteractionResponse,
    ) -> DiscordResult<Message> {
        command
            .edit_response(&ctx.http, response)
            .await
            .map_err(|e| DiscordError::new(DiscordErrorKind::MessageSendFailed(e.to_string())))
    }
}

#[async_trait]
impl EventHandler for HypePulseHandler {
    /// Called when the bot successfully connects to Discord.
    async fn ready(&self, ctx: Context, ready: Ready) {
        info!(
            bot_user = %ready.user.name,
            bot_id = %ready.user.id,
            guilds = ready.guilds.len(),
            "HypePulse is online"
        );

        match ApplicationCommand::set_global_commands(&ctx.http, slash_commands()).await {
            Ok(registered) => info!(count = registered.len(), "Registered slash commands"),
            Err(e) => {
                let err = DiscordError::new(DiscordErrorKind::RegistrationFailed(e.to_string()));
                error!(error = %err, "Error reloading commands");
            }
        }
    }

    /// Called for every interaction; only slash commands are handled here.
    async fn interaction_create(&self, ctx: Context, interaction: Interaction) {
        let Interaction::Command(command) = interaction else {
            return;
        };

        if let Err(e) = self.handle_command(&ctx, &command).await {
            error!(
                command = %command.data.name,
                user_id = %command.user.id,
                error = %e,
                "Failed to answer command"
            );
        }
    }
}
