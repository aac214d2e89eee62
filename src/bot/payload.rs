//! Callback payloads for the "Add to favorites" button.
//!
//! Short meals travel inline as `add_<name>_<link>`, with `\` and `_`
//! escaped inside the name so the first bare `_` after the prefix always
//! separates the two fields. Anything longer than Telegram's
//! `callback_data` limit is parked in the database and referenced as
//! `fav_<token>`.

use uuid::Uuid;

pub const ADD_PREFIX: &str = "add_";
pub const TOKEN_PREFIX: &str = "fav_";

/// Telegram rejects callback data longer than this many bytes.
pub const MAX_CALLBACK_DATA: usize = 64;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FavoritePayload {
    Inline {
        meal_name: String,
        youtube_link: String,
    },
    Parked(Uuid),
}

impl FavoritePayload {
    pub fn encode(&self) -> String {
        match self {
            Self::Inline {
                meal_name,
                youtube_link,
            } => {
                let mut out = String::from(ADD_PREFIX);
                for c in meal_name.chars() {
                    if c == '\\' || c == '_' {
                        out.push('\\');
                    }
                    out.push(c);
                }
                out.push('_');
                out.push_str(youtube_link);
                out
            }
            Self::Parked(token) => format!("{TOKEN_PREFIX}{}", token.simple()),
        }
    }

    /// `None` for anything that is not one of our payloads.
    pub fn decode(data: &str) -> Option<Self> {
        if let Some(token) = data.strip_prefix(TOKEN_PREFIX) {
            return Uuid::parse_str(token).ok().map(Self::Parked);
        }

        let rest = data.strip_prefix(ADD_PREFIX)?;
        let mut meal_name = String::new();
        let mut chars = rest.char_indices();
        while let Some((i, c)) = chars.next() {
            match c {
                '\\' => meal_name.push(chars.next()?.1),
                '_' => {
                    return Some(Self::Inline {
                        meal_name,
                        youtube_link: rest[i + 1..].to_string(),
                    })
                }
                _ => meal_name.push(c),
            }
        }
        None
    }
}

/// Inline encoding when it fits, `None` when the meal has to be parked.
pub fn inline_payload(meal_name: &str, youtube_link: &str) -> Option<String> {
    let encoded = FavoritePayload::Inline {
        meal_name: meal_name.to_string(),
        youtube_link: youtube_link.to_string(),
    }
    .encode();
    (encoded.len() <= MAX_CALLBACK_DATA).then_some(encoded)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn inline(name: &str, link: &str) -> FavoritePayload {
        FavoritePayload::Inline {
            meal_name: name.to_string(),
            youtube_link: link.to_string(),
        }
    }

    #[test]
    fn plain_names_keep_the_classic_format() {
        assert_eq!(inline("Pasta", "http://v").encode(), "add_Pasta_http://v");
        assert_eq!(
            FavoritePayload::decode("add_Pasta_http://v"),
            Some(inline("Pasta", "http://v"))
        );
    }

    #[test]
    fn underscores_in_names_survive() {
        let payload = inline("Beef_Wellington", "https://youtu.be/a_b");
        let encoded = payload.encode();
        assert_eq!(encoded, r"add_Beef\_Wellington_https://youtu.be/a_b");
        assert_eq!(FavoritePayload::decode(&encoded), Some(payload));
    }

    #[test]
    fn backslashes_in_names_survive() {
        let payload = inline(r"Odd\Name_", "l");
        assert_eq!(FavoritePayload::decode(&payload.encode()), Some(payload));
    }

    #[test]
    fn links_keep_their_underscores() {
        assert_eq!(
            FavoritePayload::decode("add_Soup_http://x/a_b_c"),
            Some(inline("Soup", "http://x/a_b_c"))
        );
    }

    #[test]
    fn parked_tokens_decode() {
        let token = Uuid::new_v4();
        let encoded = FavoritePayload::Parked(token).encode();
        assert!(encoded.len() <= MAX_CALLBACK_DATA);
        assert_eq!(FavoritePayload::decode(&encoded), Some(FavoritePayload::Parked(token)));
    }

    #[test]
    fn foreign_data_is_rejected() {
        assert_eq!(FavoritePayload::decode("set_tts:piper"), None);
        assert_eq!(FavoritePayload::decode("add_NoSeparator"), None);
        assert_eq!(FavoritePayload::decode(r"add_Dangling\"), None);
        assert_eq!(FavoritePayload::decode("fav_not-a-uuid"), None);
    }

    #[test]
    fn long_meals_do_not_fit_inline() {
        assert!(inline_payload("Pasta", "http://v").is_some());
        assert!(inline_payload(
            "Chicken Marengo with extra garlic",
            "https://www.youtube.com/watch?v=U33HYUr-0Fw"
        )
        .is_none());
    }
}
