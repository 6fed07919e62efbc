use async_trait::async_trait;
use teloxide::prelude::*;
use teloxide::types::{InputFile, MessageId};

use crate::errors::HandlerResult;
use crate::files::OutputFile;
use crate::utils::MediaFormat;

/// The slice of the chat surface the orchestrator needs: an editable status
/// message, plain replies, and media attachments. Production wraps the bot;
/// tests substitute a recording fake.
#[async_trait]
pub trait ChatTransport: Send + Sync {
    async fn edit_status(&self, chat_id: ChatId, message_id: MessageId, text: &str)
        -> HandlerResult;

    async fn reply(&self, chat_id: ChatId, text: &str) -> HandlerResult;

    /// Send one produced file as a video or audio attachment, with the
    /// filename as the caption.
    async fn send_media(
        &self,
        chat_id: ChatId,
        file: &OutputFile,
        format: MediaFormat,
    ) -> HandlerResult;
}

pub struct TelegramTransport {
    bot: Bot,
}

impl TelegramTransport {
    pub fn new(bot: Bot) -> Self {
        Self { bot }
    }
}

#[async_trait]
impl ChatTransport for TelegramTransport {
    async fn edit_status(
        &self,
        chat_id: ChatId,
        message_id: MessageId,
        text: &str,
    ) -> HandlerResult {
        self.bot.edit_message_text(chat_id, message_id, text).await?;
        Ok(())
    }

    async fn reply(&self, chat_id: ChatId, text: &str) -> HandlerResult {
        self.bot.send_message(chat_id, text).await?;
        Ok(())
    }

    async fn send_media(
        &self,
        chat_id: ChatId,
        file: &OutputFile,
        format: MediaFormat,
    ) -> HandlerResult {
        match format {
            MediaFormat::Video => {
                self.bot
                    .send_video(chat_id, InputFile::file(&file.path))
                    .caption(file.name.clone())
                    .await?;
            }
            MediaFormat::Audio => {
                self.bot
                    .send_audio(chat_id, InputFile::file(&file.path))
                    .caption(file.name.clone())
                    .await?;
            }
        }
        Ok(())
    }
}
