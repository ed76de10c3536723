//! User-facing message texts
//!
//! Existing users know these strings, so they are kept exactly as the bot
//! has always sent them.

pub const ACCESS_DENIED: &str = "⛔️ У вас нет доступа к боту.";
pub const ACCESS_DENIED_CALLBACK: &str = "⛔️ Доступ запрещён.";

pub const PROMPT_FRIDGE_ADD: &str = "🍎 Введи продукты через запятую:";
pub const PROMPT_SHOPPING_ADD: &str = "🛍 Введи, что купить (через запятую):";
pub const PROMPT_BOUGHT_NAME: &str = "✅ Напиши, что куплено:";

pub const FRIDGE_EMPTY: &str = "🫙 Холодильник пуст.";
pub const FRIDGE_EMPTY_NOTHING_TO_DELETE: &str = "🫙 Холодильник пуст, нечего удалять.";
pub const SHOPPING_EMPTY: &str = "🧺 Список покупок пуст.";
pub const DELETE_PICKER_PROMPT: &str = "Выбери продукт для удаления из холодильника:";

pub const CHOOSE_FROM_MENU: &str = "❓ Пожалуйста, выбери действие из меню.";
pub const NOTHING_TO_ADD: &str = "🤷 Не нашёл ни одного продукта.";
pub const STORAGE_FAILURE: &str = "⚠️ Не удалось выполнить действие, попробуй ещё раз.";

pub const BUY_BUTTON: &str = "✅ Куплено";
pub const DELETE_BUTTON: &str = "🗑 Удалить";

pub fn welcome(display_name: Option<&str>) -> String {
    match display_name {
        Some(name) => format!("👋 Привет, {name}! Это семейный холодильник 🧊\nВыбери действие:"),
        None => "👋 Привет! Это семейный холодильник 🧊\nВыбери действие:".to_string(),
    }
}

pub fn my_id(chat_id: i64) -> String {
    format!("Ваш chat_id: {chat_id}")
}

pub fn fridge_contents(items: &[String]) -> String {
    let bullets: Vec<String> = items.iter().map(|item| format!("• {item}")).collect();
    format!("🧊 В холодильнике:\n{}", bullets.join("\n"))
}

pub fn shopping_card(item: &str) -> String {
    format!("🛒 {item}")
}

pub fn delete_picker_button(item: &str) -> String {
    format!("🗑 Удалить {item}")
}

/// Summary of a bulk add; `None` when nothing was attempted
pub fn add_summary(added: &[String], existed: &[String]) -> Option<String> {
    let mut lines = Vec::new();
    if !added.is_empty() {
        lines.push(format!("✅ Добавлено: {}", added.join(", ")));
    }
    if !existed.is_empty() {
        lines.push(format!("⚠️ Уже есть: {}", existed.join(", ")));
    }
    (!lines.is_empty()).then(|| lines.join("\n"))
}

pub fn bought_by_text(name: &str, success: bool) -> String {
    if success {
        format!("✅ {name} куплен и добавлен в холодильник.")
    } else {
        format!("❌ {name} не найден в покупках.")
    }
}

pub fn removed_by_text(name: &str, success: bool) -> String {
    if success {
        format!("🗑 {name} удалён.")
    } else {
        format!("❌ {name} не найден.")
    }
}

pub fn bought_toast(name: &str) -> String {
    format!("{name} добавлен в холодильник.")
}

pub fn bought_card(name: &str) -> String {
    format!("✅ {name} куплен и в холодильнике.")
}

pub fn removed_toast(name: &str) -> String {
    format!("{name} удалён.")
}

pub fn removed_card(name: &str) -> String {
    format!("🗑 {name} удалён из списка.")
}

pub fn not_found_toast(name: &str) -> String {
    format!("{name} не найден.")
}

pub fn removed_from_fridge_toast(name: &str) -> String {
    format!("🗑 {name} удалён из холодильника.")
}

pub fn not_in_fridge_toast(name: &str) -> String {
    format!("❌ {name} не найден в холодильнике.")
}
