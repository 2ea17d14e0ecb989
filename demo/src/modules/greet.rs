use std::sync::Arc;

use twilight_model::{
    application::command::{Command, CommandType},
    channel::message::component::{SelectMenu, SelectMenuOption, SelectMenuType},
};
use twilight_util::builder::{command::CommandBuilder, InteractionResponseDataBuilder};

use ui_store::{ComponentInteraction, Error};

use super::row;
use crate::context::CommandContext;

const GREETINGS: [&str; 2] = ["Hi", "World"];

pub fn command() -> Command {
    CommandBuilder::new("greet", "Pick a greeting", CommandType::ChatInput).build()
}

fn create_greeting_menu(custom_id: String, disabled: bool) -> SelectMenu {
    SelectMenu {
        custom_id,
        kind: SelectMenuType::Text,
        options: Some(
            GREETINGS
                .into_iter()
                .map(|greeting| SelectMenuOption {
                    default: false,
                    description: None,
                    emoji: None,
                    label: greeting.into(),
                    value: greeting.into(),
                })
                .collect(),
        ),
        placeholder: Some("Greeting".into()),
        disabled,

        // defaults
        max_values: None,
        min_values: None,
        default_values: None,
        channel_types: None,
    }
}

pub async fn run(ctx: CommandContext) -> Result<(), Error> {
    let mut store = ctx.store();
    let stop = store.stop_handle();
    let context = Arc::clone(&ctx.context);

    let menu = store.bind(
        create_greeting_menu(store.make_id(), false),
        move |inter: ComponentInteraction| {
            let stop = stop.clone();
            let context = Arc::clone(&context);
            async move {
                stop.stop();
                let Some(greeting) = inter.data.values.first() else {
                    return Err::<(), Error>("couldn't get selected value".into());
                };
                tracing::trace!(?greeting);

                let menu = create_greeting_menu(inter.data.custom_id.clone(), true);
                context
                    .update_message(
                        &inter,
                        InteractionResponseDataBuilder::new()
                            .content(greeting.clone())
                            .components([row([menu.into()])])
                            .build(),
                    )
                    .await?;

                Ok(())
            }
        },
    )?;

    ctx.reply(
        InteractionResponseDataBuilder::new()
            .content("Hello")
            .components([row([menu.into()])])
            .build(),
    )
    .await?;

    if store.listen().await?.is_timeout() {
        ctx.clear_components().await?;
    }

    Ok(())
}
