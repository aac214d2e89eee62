use std::sync::Arc;
use teloxide::macros::BotCommands;
use teloxide::prelude::*;
use teloxide::utils::command::BotCommands as _;

use crate::bot::handlers::{send_random_favorite, send_random_meal};
use crate::bot::transport::ChatTransport;
use crate::bot::ui;
use crate::bot::{AppState, HandlerResult};

#[derive(BotCommands, Clone, Debug, PartialEq, Eq)]
#[command(rename_rule = "lowercase", description = "Available commands:")]
pub enum BotCommand {
    #[command(description = "Start / restart the bot")]
    Start,
    #[command(description = "Get a random meal")]
    Random,
    #[command(description = "Get a random meal from your favorites")]
    Favorite,
    #[command(description = "Show help")]
    Help,
}

pub async fn handle_command(
    bot: Bot,
    msg: Message,
    cmd: BotCommand,
    state: Arc<AppState>,
) -> HandlerResult {
    run_command(&bot, &state, msg.chat.id, cmd).await?;
    Ok(())
}

pub async fn run_command(
    chat: &dyn ChatTransport,
    state: &AppState,
    chat_id: ChatId,
    cmd: BotCommand,
) -> anyhow::Result<()> {
    match cmd {
        BotCommand::Start => {
            chat.send_text(chat_id, ui::GREETING, Some(ui::main_menu().into()))
                .await?;
        }
        BotCommand::Random => send_random_meal(chat, state, chat_id).await?,
        BotCommand::Favorite => send_random_favorite(chat, state, chat_id).await?,
        BotCommand::Help => {
            chat.send_text(chat_id, &BotCommand::descriptions().to_string(), None)
                .await?;
        }
    }

    Ok(())
}
