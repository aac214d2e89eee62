use std::sync::Arc;
use teloxide::prelude::*;

use crate::bot::payload::FavoritePayload;
use crate::bot::transport::ChatTransport;
use crate::bot::ui;
use crate::bot::{AppState, HandlerResult};

pub async fn handle_callback(bot: Bot, q: CallbackQuery, state: Arc<AppState>) -> HandlerResult {
    let data = match q.data.as_deref() {
        Some(d) => d,
        None => return Ok(()),
    };

    // Favorites are keyed by chat, same as the "random favorite" lookup.
    let chat_id = q
        .message
        .as_ref()
        .map(|m| m.chat().id)
        .unwrap_or(ChatId(q.from.id.0 as i64));

    route_callback(&bot, &state, &q.id, chat_id, data).await?;
    Ok(())
}

pub async fn route_callback(
    chat: &dyn ChatTransport,
    state: &AppState,
    callback_id: &str,
    chat_id: ChatId,
    data: &str,
) -> anyhow::Result<()> {
    // ── Add To Favorites ───────────────────────────────────────────
    let meal = match FavoritePayload::decode(data) {
        Some(FavoritePayload::Inline {
            meal_name,
            youtube_link,
        }) => Some((meal_name, youtube_link)),
        Some(FavoritePayload::Parked(token)) => state
            .db
            .get_parked_meal(token)
            .await?
            .map(|parked| (parked.meal_name, parked.youtube_link)),
        None => None,
    };

    let Some((meal_name, youtube_link)) = meal else {
        tracing::warn!("Unusable callback data from chat {}: {:?}", chat_id, data);
        chat.answer_callback(callback_id, ui::FAVORITE_UNAVAILABLE).await?;
        return Ok(());
    };

    state
        .db
        .add_favorite(chat_id.0, &meal_name, &youtube_link)
        .await?;
    tracing::info!("Chat {} saved {:?} to favorites", chat_id, meal_name);

    chat.answer_callback(callback_id, ui::FAVORITE_ADDED).await?;
    Ok(())
}
