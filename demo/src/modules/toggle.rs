use std::sync::Arc;

use parking_lot::Mutex;
use twilight_model::{
    application::command::{Command, CommandType},
    channel::message::component::{ButtonStyle, Component},
};
use twilight_util::builder::{command::CommandBuilder, InteractionResponseDataBuilder};

use ui_store::{ComponentInteraction, Error};

use super::{button, link_button, row};
use crate::context::CommandContext;

const LINK: &str = "https://www.youtube.com/watch?v=dQw4w9WgXcQ";

pub fn command() -> Command {
    CommandBuilder::new("toggle", "Buttons that toggle each other", CommandType::ChatInput).build()
}

#[derive(Debug, Clone)]
struct Layout {
    toggles: [String; 2],
    quit: String,
    /// index of the currently disabled toggle
    disabled: Option<usize>,
}

impl Layout {
    fn components(&self) -> Vec<Component> {
        let toggles = self.toggles.iter().enumerate().map(|(index, custom_id)| -> Component {
            button(
                custom_id,
                &format!("Button {}", index + 1),
                ButtonStyle::Primary,
                self.disabled == Some(index),
            )
            .into()
        });

        vec![
            row(toggles.chain([button(&self.quit, "Quit", ButtonStyle::Danger, false).into()])),
            row([link_button("Hi Rick", LINK).into()]),
        ]
    }
}

pub async fn run(ctx: CommandContext) -> Result<(), Error> {
    let mut store = ctx.invoker_store();
    let layout = Arc::new(Mutex::new(Layout {
        toggles: [store.make_id(), store.make_id()],
        quit: store.make_id(),
        disabled: None,
    }));

    let toggles = layout.lock().toggles.clone();
    store.bind_many(toggles, {
        let context = Arc::clone(&ctx.context);
        let layout = Arc::clone(&layout);
        move |index, inter: ComponentInteraction| {
            let context = Arc::clone(&context);
            let components = {
                let mut layout = layout.lock();
                layout.disabled = Some(index);
                layout.components()
            };

            async move {
                context
                    .update_message(
                        &inter,
                        InteractionResponseDataBuilder::new()
                            .components(components)
                            .build(),
                    )
                    .await?;
                Ok::<(), Error>(())
            }
        }
    })?;

    let quit = layout.lock().quit.clone();
    store.bind(quit, {
        let context = Arc::clone(&ctx.context);
        let stop = store.stop_handle();
        move |inter: ComponentInteraction| {
            let context = Arc::clone(&context);
            stop.stop();
            async move {
                context.defer_update(&inter).await?;
                Ok::<(), Error>(())
            }
        }
    })?;

    let components = layout.lock().components();
    ctx.reply(
        InteractionResponseDataBuilder::new()
            .content("Take turns")
            .components(components)
            .build(),
    )
    .await?;

    let outcome = store.listen().await?;
    tracing::debug!(?outcome, "toggle finished");
    ctx.clear_components().await?;

    Ok(())
}

#[cfg(test)]
mod tests {
    use ui_store::HasCustomId;

    use super::*;

    fn layout(disabled: Option<usize>) -> Layout {
        Layout {
            toggles: ["s:0".into(), "s:1".into()],
            quit: "s:2".into(),
            disabled,
        }
    }

    fn disabled_flags(components: &[Component]) -> Vec<bool> {
        let Some(Component::ActionRow(row)) = components.first() else {
            return Vec::new();
        };

        row.components
            .iter()
            .filter_map(|component| match component {
                Component::Button(button) => Some(button.disabled),
                _ => None,
            })
            .collect()
    }

    #[test]
    fn layout_test() {
        let components = layout(None).components();
        assert_eq!(components.len(), 2);
        assert_eq!(disabled_flags(&components), [false, false, false]);

        let Some(Component::ActionRow(links)) = components.get(1) else {
            panic!("expected link row");
        };
        assert_eq!(links.components[0].custom_id(), None);
    }

    #[test]
    fn toggle_disables_clicked_button_test() {
        assert_eq!(
            disabled_flags(&layout(Some(0)).components()),
            [true, false, false]
        );
        assert_eq!(
            disabled_flags(&layout(Some(1)).components()),
            [false, true, false]
        );
    }
}
