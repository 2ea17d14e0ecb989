use std::sync::Arc;

use parking_lot::Mutex;
use twilight_model::{
    application::command::{Command, CommandType},
    channel::message::{
        component::{ButtonStyle, Component},
        Embed,
    },
};
use twilight_util::builder::{
    command::CommandBuilder, embed::EmbedBuilder, InteractionResponseDataBuilder,
};

use ui_store::{ComponentInteraction, Error};

use super::{button, row};
use crate::context::{CommandContext, Store};

pub fn command() -> Command {
    CommandBuilder::new("pages", "Flip through some pages", CommandType::ChatInput).build()
}

fn create_embeds() -> Vec<Embed> {
    [
        ("Hello", "World"),
        ("Callbacks", "Each button is bound to its own callback"),
        ("Goodbye", "The buttons go away once nobody uses them"),
    ]
    .into_iter()
    .map(|(title, description)| EmbedBuilder::new().title(title).description(description).build())
    .collect()
}

#[derive(Debug)]
struct Pages {
    page: usize,
    embeds: Vec<Embed>,
    prev: String,
    next: String,
}

impl Pages {
    fn new(store: &Store, embeds: Vec<Embed>) -> Self {
        Self {
            page: 0,
            embeds,
            prev: store.make_id_from(["prev"]),
            next: store.make_id_from(["next"]),
        }
    }

    fn current_embed(&self) -> Option<Embed> {
        self.embeds.get(self.page).cloned()
    }

    fn turn(&mut self, forward: bool) {
        self.page = if forward {
            (self.page + 1).min(self.embeds.len().saturating_sub(1))
        } else {
            self.page.saturating_sub(1)
        };
    }

    fn components(&self) -> Vec<Component> {
        vec![row([
            button(&self.prev, "🡸", ButtonStyle::Secondary, self.page == 0).into(),
            button(
                &self.next,
                "🡺",
                ButtonStyle::Secondary,
                self.page + 1 >= self.embeds.len(),
            )
            .into(),
        ])]
    }
}

fn bind_turn(
    store: &mut Store,
    pages: &Arc<Mutex<Pages>>,
    ctx: &CommandContext,
    forward: bool,
) -> Result<(), Error> {
    let custom_id = {
        let pages = pages.lock();
        if forward {
            pages.next.clone()
        } else {
            pages.prev.clone()
        }
    };

    let context = Arc::clone(&ctx.context);
    let pages = Arc::clone(pages);
    store.bind(custom_id, move |inter: ComponentInteraction| {
        let context = Arc::clone(&context);
        let (embeds, components) = {
            let mut pages = pages.lock();
            pages.turn(forward);
            (pages.current_embed(), pages.components())
        };

        async move {
            context
                .update_message(
                    &inter,
                    InteractionResponseDataBuilder::new()
                        .embeds(embeds)
                        .components(components)
                        .build(),
                )
                .await?;
            Ok::<(), Error>(())
        }
    })?;

    Ok(())
}

pub async fn run(ctx: CommandContext) -> Result<(), Error> {
    let mut store = ctx.invoker_store();
    let pages = Arc::new(Mutex::new(Pages::new(&store, create_embeds())));
    bind_turn(&mut store, &pages, &ctx, false)?;
    bind_turn(&mut store, &pages, &ctx, true)?;

    let (embed, components) = {
        let pages = pages.lock();
        (pages.current_embed(), pages.components())
    };
    ctx.reply(
        InteractionResponseDataBuilder::new()
            .embeds(embed)
            .components(components)
            .build(),
    )
    .await?;

    store.listen().await?;
    ctx.clear_components().await?;

    Ok(())
}
