use std::collections::HashMap;

use mcq_revision::scoring::ChoiceStatus;
use mcq_revision::{ModuleDifficulty, QuestionDifficulty};
use once_cell::sync::Lazy;

pub const BOLD: &str = "\x1b[1m";
pub const DIM: &str = "\x1b[2m";
pub const RESET: &str = "\x1b[0m";

pub const RED: &str = "\x1b[31m";
pub const GREEN: &str = "\x1b[32m";
pub const YELLOW: &str = "\x1b[33m";
pub const BLUE: &str = "\x1b[34m";
pub const MAGENTA: &str = "\x1b[35m";
pub const BRIGHT_MAGENTA: &str = "\x1b[95m";

static ICON_GLYPHS: Lazy<HashMap<&'static str, &'static str>> = Lazy::new(|| {
    HashMap::from([
        ("Database", "🗄"),
        ("Binary", "⚙"),
        ("Network", "🌐"),
    ])
});

const FALLBACK_GLYPH: &str = "📖";

pub fn icon_glyph(tag: &str) -> &'static str {
    ICON_GLYPHS.get(tag).copied().unwrap_or(FALLBACK_GLYPH)
}

/// Accent color for a module's authored color tag; unknown tags fall back to
/// blue.
pub fn accent(tag: &str) -> &'static str {
    match tag {
        "blue" => BLUE,
        "purple" => MAGENTA,
        "green" => GREEN,
        "orange" => YELLOW,
        "pink" => BRIGHT_MAGENTA,
        _ => BLUE,
    }
}

pub fn module_difficulty_color(difficulty: ModuleDifficulty) -> &'static str {
    match difficulty {
        ModuleDifficulty::Beginner => GREEN,
        ModuleDifficulty::Intermediate => YELLOW,
        ModuleDifficulty::Advanced => RED,
    }
}

pub fn question_difficulty_color(difficulty: QuestionDifficulty) -> &'static str {
    match difficulty {
        QuestionDifficulty::Easy => GREEN,
        QuestionDifficulty::Medium => YELLOW,
        QuestionDifficulty::Hard => RED,
    }
}

/// Marker and color for one choice's post-submission feedback line.
pub fn status_marker(status: ChoiceStatus) -> (&'static str, &'static str) {
    match status {
        ChoiceStatus::Correct => ("✓", GREEN),
        ChoiceStatus::Missed => ("!", YELLOW),
        ChoiceStatus::Incorrect => ("✗", RED),
        ChoiceStatus::Unselected => (" ", DIM),
    }
}
