use teloxide::{dispatching::UpdateHandler, prelude::*, utils::command::BotCommands};

use crate::{
    commands::{help, start},
    errors::BotError,
    handlers::{format_received, link_received},
};

#[derive(BotCommands, Clone)]
#[command(rename_rule = "lowercase")]
enum Command {
    /// Show the start message
    Start,
    /// Show usage help
    Help,
}

pub fn schema() -> UpdateHandler<BotError> {
    use dptree::case;

    dptree::entry()
        .branch(
            // Filter for messages
            Update::filter_message()
                .branch(
                    // Filter for commands
                    teloxide::filter_command::<Command, _>()
                        .branch(case![Command::Start].endpoint(start))
                        .branch(case![Command::Help].endpoint(help)),
                )
                // Any other text is treated as a candidate link
                .branch(Message::filter_text().endpoint(link_received)),
        )
        .branch(Update::filter_callback_query().endpoint(format_received))
}
