use teloxide::prelude::*;

use crate::errors::HandlerResult;

pub async fn start(bot: Bot, msg: Message) -> HandlerResult {
    bot.send_message(
        msg.chat.id,
        "👋 Send me a link and I'll fetch it as video or audio for you.",
    )
    .await?;
    Ok(())
}
