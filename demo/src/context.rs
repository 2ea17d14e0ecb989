use std::sync::Arc;

use twilight_http::{client::InteractionClient, response::marker::EmptyBody, Client};
use twilight_model::{
    application::interaction::application_command::CommandData,
    channel::message::MessageFlags,
    gateway::payload::incoming::InteractionCreate,
    http::interaction::{InteractionResponse, InteractionResponseData, InteractionResponseType},
    id::{marker::ApplicationMarker, Id},
};
use twilight_util::builder::InteractionResponseDataBuilder;
use ui_store::{CallbackStore, ComponentInteraction, Error, EventWaiter, StoreConfig};

pub type Store = CallbackStore<ComponentInteraction>;

#[derive(Debug)]
pub struct Context {
    pub application_id: Id<ApplicationMarker>,
    pub client: Client,
    pub store_config: StoreConfig,
}

impl Context {
    pub fn interaction(&self) -> InteractionClient<'_> {
        self.client.interaction(self.application_id)
    }

    pub async fn response(
        &self,
        event: &InteractionCreate,
        response: InteractionResponse,
    ) -> Result<twilight_http::Response<EmptyBody>, twilight_http::Error> {
        self.interaction()
            .create_response(event.id, &event.token, &response)
            .await
    }

    /// Edits the message the component is attached to.
    pub async fn update_message(
        &self,
        inter: &ComponentInteraction,
        data: InteractionResponseData,
    ) -> Result<twilight_http::Response<EmptyBody>, twilight_http::Error> {
        self.response(
            &inter.event,
            InteractionResponse {
                kind: InteractionResponseType::UpdateMessage,
                data: Some(data),
            },
        )
        .await
    }

    pub async fn defer_update(
        &self,
        inter: &ComponentInteraction,
    ) -> Result<twilight_http::Response<EmptyBody>, twilight_http::Error> {
        self.response(
            &inter.event,
            InteractionResponse {
                kind: InteractionResponseType::DeferredUpdateMessage,
                data: None,
            },
        )
        .await
    }

    pub async fn reply_ephemeral(
        &self,
        event: &InteractionCreate,
        message: impl Into<String>,
    ) -> Result<twilight_http::Response<EmptyBody>, twilight_http::Error> {
        let response = InteractionResponseDataBuilder::new()
            .content(message)
            .flags(MessageFlags::EPHEMERAL)
            .build();

        self.response(
            event,
            InteractionResponse {
                kind: InteractionResponseType::ChannelMessageWithSource,
                data: Some(response),
            },
        )
        .await
    }
}

#[derive(Clone, Debug)]
pub struct CommandContext {
    pub context: Arc<Context>,
    pub waiter: EventWaiter<ComponentInteraction>,
    pub command: CommandData,
    pub event: InteractionCreate,
}

impl CommandContext {
    pub fn interaction(&self) -> InteractionClient<'_> {
        self.context.interaction()
    }

    pub async fn response(
        &self,
        response: InteractionResponse,
    ) -> Result<twilight_http::Response<EmptyBody>, twilight_http::Error> {
        self.context.response(&self.event, response).await
    }

    pub async fn reply(
        &self,
        data: InteractionResponseData,
    ) -> Result<twilight_http::Response<EmptyBody>, twilight_http::Error> {
        self.response(InteractionResponse {
            kind: InteractionResponseType::ChannelMessageWithSource,
            data: Some(data),
        })
        .await
    }

    /// Removes all components from the command's response.
    pub async fn clear_components(&self) -> Result<(), Error> {
        self.interaction()
            .update_response(&self.event.token)
            .components(Some(&[]))
            .await?;

        Ok(())
    }

    /// A store for components of this command's response, anyone can use them.
    pub fn store(&self) -> Store {
        CallbackStore::builder(self.waiter.clone())
            .config(self.context.store_config.clone())
            .build()
    }

    /// A store that rejects interactions from users other than the command
    /// invoker, and tells them so.
    pub fn invoker_store(&self) -> Store {
        let context = Arc::clone(&self.context);
        let invoker = self.event.author_id();

        CallbackStore::builder(self.waiter.clone())
            .config(self.context.store_config.clone())
            .check(move |inter: ComponentInteraction| {
                let context = Arc::clone(&context);
                async move {
                    if inter.author_id() == invoker {
                        return Ok::<bool, Error>(true);
                    }

                    context
                        .reply_ephemeral(&inter.event, "You cannot interact with that!")
                        .await?;
                    Ok(false)
                }
            })
            .build()
    }
}
