use console::Style;
use once_cell::sync::Lazy;

pub static PROMPT: Lazy<Style> = Lazy::new(|| Style::new().cyan().bold());
pub static DIVIDER: Lazy<Style> = Lazy::new(|| Style::new().color256(245));
