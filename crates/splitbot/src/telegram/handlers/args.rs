//! Argument parsing for admin commands and their usage hints

use splitcore::registry::{parse_count, parse_user_id};
use splitcore::{AppError, AppResult};

pub(super) const ADD_SUB_USAGE: &str = "Используй формат: /add_sub <id> <имя> <кол-во подписок>";
pub(super) const DEL_SUB_USAGE: &str = "Используй формат: /del_sub <id>";
pub(super) const SET_PRICE_USAGE: &str = "Используй формат: /set_price <цена>";
pub(super) const SET_LINK_USAGE: &str = "Используй формат: /set_link <ссылка>";

/// Arguments of `/add_sub`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(super) struct AddSubArgs {
    pub user_id: i64,
    pub name: String,
    pub subs: u32,
}

/// `<id> <name...> <subs>`: the first token is the id, the last the count,
/// everything in between is the display name.
pub(super) fn parse_add_sub(args: &str) -> AppResult<AddSubArgs> {
    let tokens: Vec<&str> = args.split_whitespace().collect();
    let (first, rest) = tokens
        .split_first()
        .ok_or_else(|| AppError::Validation("нет аргументов".to_string()))?;
    let (last, middle) = rest
        .split_last()
        .ok_or_else(|| AppError::Validation("не хватает аргументов".to_string()))?;
    if middle.is_empty() {
        return Err(AppError::Validation("не указано имя".to_string()));
    }

    Ok(AddSubArgs {
        user_id: parse_user_id(first)?,
        name: middle.join(" "),
        subs: parse_count(last)?,
    })
}

/// `<id>`
pub(super) fn parse_del_sub(args: &str) -> AppResult<i64> {
    parse_user_id(args)
}
