pub mod greet;
pub mod pages;
pub mod toggle;

use twilight_model::{
    application::command::Command,
    channel::message::component::{ActionRow, Button, ButtonStyle, Component},
};

use ui_store::Error;

use crate::context::CommandContext;

pub fn commands() -> Vec<Command> {
    vec![greet::command(), toggle::command(), pages::command()]
}

pub async fn handle_command(ctx: CommandContext) -> Result<(), Error> {
    let name = ctx.command.name.clone();
    match name.as_str() {
        "greet" => greet::run(ctx).await,
        "toggle" => toggle::run(ctx).await,
        "pages" => pages::run(ctx).await,
        _ => Err(format!("unknown command /{}", name).into()),
    }
}

pub(crate) fn row(components: impl IntoIterator<Item = Component>) -> Component {
    ActionRow {
        components: components.into_iter().collect(),
    }
    .into()
}

pub(crate) fn button(custom_id: &str, label: &str, style: ButtonStyle, disabled: bool) -> Button {
    Button {
        custom_id: Some(custom_id.into()),
        disabled,
        label: Some(label.into()),
        style,

        // defaults
        emoji: None,
        url: None,
        sku_id: None,
    }
}

pub(crate) fn link_button(label: &str, url: &str) -> Button {
    Button {
        custom_id: None,
        disabled: false,
        label: Some(label.into()),
        style: ButtonStyle::Link,
        url: Some(url.into()),

        // defaults
        emoji: None,
        sku_id: None,
    }
}

#[cfg(test)]
mod tests {
    use ui_store::HasCustomId;

    use super::*;

    #[test]
    fn row_test() {
        let Component::ActionRow(row) = row([button("a:0", "A", ButtonStyle::Primary, false).into()])
        else {
            panic!("expected an action row");
        };
        assert_eq!(row.components.len(), 1);
        assert_eq!(row.components[0].custom_id(), Some("a:0"));
    }

    #[test]
    fn link_button_test() {
        let link = link_button("Docs", "https://example.com");
        assert_eq!(link.custom_id(), None);
        assert_eq!(link.style, ButtonStyle::Link);
    }
}
