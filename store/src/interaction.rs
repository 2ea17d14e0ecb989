#[cfg(feature = "twilight")]
pub use self::twilight::ComponentInteraction;

/// Anything carrying a component custom ID, either a component that callbacks
/// get bound to or an interaction that gets dispatched to them.
pub trait HasCustomId {
    fn custom_id(&self) -> Option<&str>;
}

impl<T: HasCustomId + ?Sized> HasCustomId for &T {
    fn custom_id(&self) -> Option<&str> {
        (**self).custom_id()
    }
}

impl HasCustomId for str {
    fn custom_id(&self) -> Option<&str> {
        Some(self)
    }
}

impl HasCustomId for String {
    fn custom_id(&self) -> Option<&str> {
        Some(self)
    }
}

#[cfg(feature = "twilight")]
mod twilight {
    use twilight_model::{
        application::interaction::{
            message_component::MessageComponentInteractionData, InteractionData,
        },
        channel::message::component::{Button, Component, SelectMenu, TextInput},
        gateway::payload::incoming::InteractionCreate,
        id::{marker::UserMarker, Id},
    };

    use super::HasCustomId;

    /// A message component interaction along with the event it arrived in.
    #[derive(Clone, Debug)]
    pub struct ComponentInteraction {
        pub event: InteractionCreate,
        pub data: MessageComponentInteractionData,
    }

    impl ComponentInteraction {
        /// Returns `None` for anything but message component interactions.
        pub fn parse(event: &InteractionCreate) -> Option<Self> {
            match &event.data {
                Some(InteractionData::MessageComponent(data)) => Some(Self {
                    event: event.clone(),
                    data: *data.clone(),
                }),
                _ => None,
            }
        }

        pub fn author_id(&self) -> Option<Id<UserMarker>> {
            self.event.author_id()
        }
    }

    impl HasCustomId for ComponentInteraction {
        fn custom_id(&self) -> Option<&str> {
            Some(&self.data.custom_id)
        }
    }

    impl HasCustomId for MessageComponentInteractionData {
        fn custom_id(&self) -> Option<&str> {
            Some(&self.custom_id)
        }
    }

    // link buttons carry a url instead of a custom_id
    impl HasCustomId for Button {
        fn custom_id(&self) -> Option<&str> {
            self.custom_id.as_deref()
        }
    }

    impl HasCustomId for SelectMenu {
        fn custom_id(&self) -> Option<&str> {
            Some(&self.custom_id)
        }
    }

    impl HasCustomId for TextInput {
        fn custom_id(&self) -> Option<&str> {
            Some(&self.custom_id)
        }
    }

    impl HasCustomId for Component {
        fn custom_id(&self) -> Option<&str> {
            match self {
                Component::Button(button) => button.custom_id(),
                Component::SelectMenu(menu) => menu.custom_id(),
                Component::TextInput(input) => input.custom_id(),
                _ => None,
            }
        }
    }

}
