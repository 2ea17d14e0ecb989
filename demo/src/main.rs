mod config;
mod context;
mod modules;

use std::sync::Arc;

use twilight_gateway::{Event, EventTypeFlags, Intents, Shard, ShardId, StreamExt as _};
use twilight_model::application::interaction::InteractionData;

use ui_store::{ComponentInteraction, EventWaiter};

use config::Config;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    // load .env into environment vars, ignore if not found
    match dotenvy::dotenv().map(|_| ()) {
        Err(err) if err.not_found() => {
            tracing::warn!("no .env file found");
        }
        result => result?,
    };

    // create config from environment vars
    let config = Config::from_env()?;

    // set-up logging
    tracing_subscriber::fmt::init();

    let client = twilight_http::Client::new(config.discord_token.clone());
    let app = client.current_user_application().await?.model().await?;
    let context = Arc::new(context::Context {
        application_id: app.id,
        client,
        store_config: config.store_config(),
    });

    // register commands
    tracing::info!("registering commands");
    context
        .interaction()
        .set_global_commands(&modules::commands())
        .await?;

    // every store listens on this, the main loop feeds it component interactions
    let waiter = EventWaiter::<ComponentInteraction>::new();

    let mut shard = Shard::new(ShardId::ONE, config.discord_token, Intents::empty());

    tracing::info!("starting main loop...");
    while let Some(item) = shard.next_event(EventTypeFlags::INTERACTION_CREATE).await {
        let event = match item {
            Ok(event) => event,
            Err(err) => {
                tracing::error!(?err, "error receiving discord event");
                continue;
            }
        };

        let event = match event {
            Event::InteractionCreate(event) => event,
            event => {
                tracing::warn!(event = ?event.kind(), "unhandled event");
                continue;
            }
        };

        match &event.data {
            Some(InteractionData::ApplicationCommand(command)) => {
                tracing::info!("processing command /{}", command.name);

                let command_context = context::CommandContext {
                    context: Arc::clone(&context),
                    waiter: waiter.clone(),
                    command: *command.clone(),
                    event: *event.clone(),
                };

                // commands listen on their stores, don't block the main loop on them
                tokio::spawn(async move {
                    let name = command_context.command.name.clone();
                    if let Err(err) = modules::handle_command(command_context).await {
                        tracing::warn!("error processing command /{}: {}", name, err);
                    }
                });
            }
            Some(InteractionData::MessageComponent(_)) => {
                let Some(interaction) = ComponentInteraction::parse(&event) else {
                    continue;
                };
                let custom_id = interaction.data.custom_id.clone();

                if waiter.dispatch(interaction) == 0 {
                    tracing::debug!(%custom_id, "no store listening for component interaction");
                }
            }
            _ => tracing::debug!(kind = ?event.kind, "ignoring interaction"),
        }
    }

    waiter.close();

    Ok(())
}
