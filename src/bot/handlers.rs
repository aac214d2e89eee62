use std::sync::Arc;
use teloxide::prelude::*;

use crate::bot::payload::{inline_payload, FavoritePayload};
use crate::bot::transport::ChatTransport;
use crate::bot::ui::{self, MenuChoice};
use crate::bot::{AppState, HandlerResult};
use crate::db::Database;
use crate::meals::Meal;

/// Text messages: the two reply-keyboard buttons. Anything else is ignored.
pub async fn handle_message(bot: Bot, msg: Message, state: Arc<AppState>) -> HandlerResult {
    let Some(text) = msg.text() else {
        return Ok(());
    };
    route_text(&bot, &state, msg.chat.id, text).await?;
    Ok(())
}

pub async fn route_text(
    chat: &dyn ChatTransport,
    state: &AppState,
    chat_id: ChatId,
    text: &str,
) -> anyhow::Result<()> {
    match MenuChoice::parse(text) {
        Some(MenuChoice::RandomMeal) => send_random_meal(chat, state, chat_id).await,
        Some(MenuChoice::RandomFavorite) => send_random_favorite(chat, state, chat_id).await,
        None => {
            tracing::debug!("Ignoring unrecognized text from chat {}", chat_id);
            Ok(())
        }
    }
}

pub async fn send_random_meal(
    chat: &dyn ChatTransport,
    state: &AppState,
    chat_id: ChatId,
) -> anyhow::Result<()> {
    let loading = chat.send_text(chat_id, ui::LOADING, None).await?;

    let Some(meal) = state.recipes.fetch_random_meal().await else {
        chat.edit_text(chat_id, loading, ui::FETCH_FAILED, None).await?;
        return Ok(());
    };
    tracing::info!("Serving meal {:?} to chat {}", meal.name, chat_id);

    let keyboard = ui::add_favorite_keyboard(favorite_callback_data(&state.db, &meal).await?);

    if !state.config.rich_replies {
        let text = ui::meal_text(&meal.name, &meal.youtube);
        chat.edit_text(chat_id, loading, &text, Some(keyboard)).await?;
        return Ok(());
    }

    if let Err(e) = chat.delete_message(chat_id, loading).await {
        tracing::warn!("Could not delete loading notice in chat {}: {}", chat_id, e);
    }
    let caption = ui::meal_html(&meal);
    match meal.thumbnail.as_deref() {
        Some(thumb) if caption.chars().count() <= ui::MAX_CAPTION_CHARS => {
            if let Err(e) = chat.send_photo(chat_id, thumb, &caption, keyboard.clone()).await {
                tracing::warn!("Photo for {:?} failed, sending text instead: {}", meal.name, e);
                chat.send_html(chat_id, &caption, keyboard).await?;
            }
        }
        _ => {
            chat.send_html(chat_id, &caption, keyboard).await?;
        }
    }
    Ok(())
}

pub async fn send_random_favorite(
    chat: &dyn ChatTransport,
    state: &AppState,
    chat_id: ChatId,
) -> anyhow::Result<()> {
    let text = match state.db.get_random_favorite(chat_id.0).await? {
        Some(favorite) => ui::favorite_text(&favorite),
        None => ui::NO_FAVORITES.to_string(),
    };
    chat.send_text(chat_id, &text, None).await?;
    Ok(())
}

/// Inline payload when it fits in a button, otherwise a parked token.
async fn favorite_callback_data(db: &Database, meal: &Meal) -> anyhow::Result<String> {
    if let Some(data) = inline_payload(&meal.name, &meal.youtube) {
        return Ok(data);
    }
    let token = db.park_meal(&meal.name, &meal.youtube).await?;
    Ok(FavoritePayload::Parked(token).encode())
}
