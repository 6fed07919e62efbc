use std::str::FromStr;
use std::sync::Arc;

use teloxide::{prelude::*, types::MaybeInaccessibleMessage};

use crate::{
    errors::{BotError, HandlerResult},
    pending::PendingStore,
    relay::Orchestrator,
    utils::{FORMAT_CALLBACK_PREFIX, MediaFormat},
};

/// Handle a format-choice button press and run the job.
pub async fn format_received(
    bot: Bot,
    query: CallbackQuery,
    store: Arc<PendingStore>,
    orchestrator: Arc<Orchestrator>,
) -> HandlerResult {
    let data = query
        .data
        .as_ref()
        .ok_or_else(|| BotError::general("No callback data"))?;

    let message = query
        .message
        .as_ref()
        .ok_or_else(|| BotError::general("Couldn't find message"))?;

    let (chat_id, message_id) = match message {
        MaybeInaccessibleMessage::Inaccessible(m) => (m.chat.id, m.message_id),
        MaybeInaccessibleMessage::Regular(m) => (m.chat.id, m.id),
    };

    bot.answer_callback_query(&query.id).await?;

    let wire = data
        .strip_prefix(FORMAT_CALLBACK_PREFIX)
        .ok_or_else(|| BotError::parse(format!("unexpected callback data: {}", data)))?;
    let format = MediaFormat::from_str(wire)?;

    orchestrator
        .handle_format_choice(&store, chat_id, message_id, format)
        .await
}
