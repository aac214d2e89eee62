//! The handful of Telegram calls the router needs, behind a trait so the
//! routing logic can run against a recording fake in tests.

use async_trait::async_trait;
use teloxide::prelude::*;
use teloxide::types::{InlineKeyboardMarkup, InputFile, MessageId, ParseMode, ReplyMarkup};

#[async_trait]
pub trait ChatTransport: Send + Sync {
    async fn send_text(
        &self,
        chat_id: ChatId,
        text: &str,
        markup: Option<ReplyMarkup>,
    ) -> anyhow::Result<MessageId>;

    /// `caption` is HTML.
    async fn send_photo(
        &self,
        chat_id: ChatId,
        photo_url: &str,
        caption: &str,
        markup: InlineKeyboardMarkup,
    ) -> anyhow::Result<MessageId>;

    /// Sends HTML text with an inline keyboard.
    async fn send_html(
        &self,
        chat_id: ChatId,
        text: &str,
        markup: InlineKeyboardMarkup,
    ) -> anyhow::Result<MessageId>;

    async fn edit_text(
        &self,
        chat_id: ChatId,
        message_id: MessageId,
        text: &str,
        markup: Option<InlineKeyboardMarkup>,
    ) -> anyhow::Result<()>;

    async fn delete_message(&self, chat_id: ChatId, message_id: MessageId) -> anyhow::Result<()>;

    async fn answer_callback(&self, callback_id: &str, text: &str) -> anyhow::Result<()>;
}

#[async_trait]
impl ChatTransport for Bot {
    async fn send_text(
        &self,
        chat_id: ChatId,
        text: &str,
        markup: Option<ReplyMarkup>,
    ) -> anyhow::Result<MessageId> {
        let mut request = self.send_message(chat_id, text);
        if let Some(markup) = markup {
            request = request.reply_markup(markup);
        }
        Ok(request.await?.id)
    }

    async fn send_photo(
        &self,
        chat_id: ChatId,
        photo_url: &str,
        caption: &str,
        markup: InlineKeyboardMarkup,
    ) -> anyhow::Result<MessageId> {
        let url = reqwest::Url::parse(photo_url)?;
        let sent = Requester::send_photo(self, chat_id, InputFile::url(url))
            .caption(caption)
            .parse_mode(ParseMode::Html)
            .reply_markup(markup)
            .await?;
        Ok(sent.id)
    }

    async fn send_html(
        &self,
        chat_id: ChatId,
        text: &str,
        markup: InlineKeyboardMarkup,
    ) -> anyhow::Result<MessageId> {
        let sent = self
            .send_message(chat_id, text)
            .parse_mode(ParseMode::Html)
            .reply_markup(markup)
            .await?;
        Ok(sent.id)
    }

    async fn edit_text(
        &self,
        chat_id: ChatId,
        message_id: MessageId,
        text: &str,
        markup: Option<InlineKeyboardMarkup>,
    ) -> anyhow::Result<()> {
        let mut request = self.edit_message_text(chat_id, message_id, text);
        if let Some(markup) = markup {
            request = request.reply_markup(markup);
        }
        request.await?;
        Ok(())
    }

    async fn delete_message(&self, chat_id: ChatId, message_id: MessageId) -> anyhow::Result<()> {
        Requester::delete_message(self, chat_id, message_id).await?;
        Ok(())
    }

    async fn answer_callback(&self, callback_id: &str, text: &str) -> anyhow::Result<()> {
        self.answer_callback_query(callback_id).text(text).await?;
        Ok(())
    }
}
