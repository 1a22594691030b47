use mcq_revision::ModuleCatalog;

use crate::display::{accent, icon_glyph, module_difficulty_color, BOLD, DIM, RESET};

/// Renders the module catalog: one block per module plus a totals footer.
pub fn list(catalog: &ModuleCatalog) {
    for module in catalog.modules() {
        let color = accent(&module.color);
        let badge_color = module_difficulty_color(module.difficulty);
        let badge = module.difficulty.label().to_uppercase();

        println!(
            "{color}{}{RESET} {BOLD}{}{RESET} {badge_color}[{badge}]{RESET}",
            icon_glyph(&module.icon),
            module.name,
        );
        println!("   {}", module.description);
        println!(
            "   {DIM}id: {} · {} questions{RESET}",
            module.id, module.questions_count,
        );
        println!();
    }

    println!(
        "{BOLD}{}{RESET} modules · {BOLD}{}{RESET} questions",
        catalog.modules().len(),
        catalog.total_questions(),
    );
}
