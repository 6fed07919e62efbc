use std::sync::Arc;

use strum::IntoEnumIterator;
use teloxide::{
    prelude::*,
    types::{InlineKeyboardButton, InlineKeyboardMarkup},
};

use crate::{
    errors::HandlerResult,
    pending::PendingStore,
    utils::{MediaFormat, is_supported_link},
};

/// Handle an incoming text message as a candidate link.
pub async fn link_received(
    bot: Bot,
    msg: Message,
    text: String,
    store: Arc<PendingStore>,
) -> HandlerResult {
    let text = text.trim();

    if !is_supported_link(text) {
        bot.send_message(
            msg.chat.id,
            "🤔 That doesn't look like a link. Send me one starting with http:// or https://.",
        )
        .await?;
        return Ok(());
    }

    // A second link from the same chat simply replaces the first.
    store.set(msg.chat.id, text.to_string()).await;
    log::info!("Stored pending link for chat {}", msg.chat.id);

    let buttons: Vec<InlineKeyboardButton> = MediaFormat::iter()
        .map(|f| InlineKeyboardButton::callback(f.label(), f.callback_data()))
        .collect();
    let keyboard = InlineKeyboardMarkup::default().append_row(buttons);

    // This message doubles as the job's editable status message.
    bot.send_message(msg.chat.id, "What should I fetch?")
        .reply_markup(keyboard)
        .await?;

    Ok(())
}
