use teloxide::prelude::*;

use crate::errors::HandlerResult;

pub async fn help(bot: Bot, msg: Message) -> HandlerResult {
    bot.send_message(
        msg.chat.id,
        "Send a http(s) link, then pick 🎬 Video or 🎵 Audio.\n\
         Playlists work too: each item is sent as its own file.\n\
         Files over ~1.9 GB can't go through Telegram and are skipped.",
    )
    .await?;
    Ok(())
}
