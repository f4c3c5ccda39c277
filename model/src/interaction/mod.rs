mod application_command;
pub use application_command::ApplicationCommand;

mod application_command_type;
pub use application_command_type::ApplicationCommandType;

mod application_command_option;
pub use application_command_option::{ApplicationCommandOption, ApplicationCommandOptionType};

mod application_command_option_choice;
pub use application_command_option_choice::ApplicationCommandOptionChoice;

mod option_value;
pub use option_value::OptionValue;

mod interaction;
pub use interaction::{
    ApplicationCommandAutoCompleteInteraction, ApplicationCommandAutoCompleteInteractionData,
    ApplicationCommandInteraction, Interaction, InteractionType, Invoker,
    MessageComponentInteraction, MessageComponentInteractionData, ModalInteractionActionRowData,
    ModalInteractionComponentData, ModalInteractionData, ModalSubmitInteraction, PingInteraction,
};

mod application_command_interaction_data;
pub use application_command_interaction_data::ApplicationCommandInteractionData;

mod application_command_interaction_data_resolved;
pub use application_command_interaction_data_resolved::ApplicationCommandInteractionDataResolved;

mod application_command_interaction_data_option;
pub use application_command_interaction_data_option::ApplicationCommandInteractionDataOption;

mod interaction_response;
pub use interaction_response::{
    AutoCompleteResultResponse, AutoCompleteResultResponseData, CallbackResponse, DeferredResponse,
    InteractionResponse, InteractionResponseType, ModalResponse, ModalResponseData,
    SimpleInteractionResponse,
};

mod interaction_application_command_callback_data;
pub use interaction_application_command_callback_data::{
    InteractionApplicationCommandCallbackData, EPHEMERAL,
};

mod followup_message;
pub use followup_message::FollowupMessage;

mod component;
pub use component::{Component, ComponentType};

mod action_row;
pub use action_row::ActionRow;

mod button;
pub use button::{Button, ButtonStyle};

mod select_menu;
pub use select_menu::{SelectMenu, SelectOption};

mod input_text;
pub use input_text::{InputText, TextStyleType};
