//! `sparkle curriculum` — Print every tier's lesson table.

use sparkle_core::tier::Tier;
use sparkle_curriculum::CurriculumStore;

pub async fn run() -> Result<(), Box<dyn std::error::Error>> {
    let store = CurriculumStore::builtin();

    for tier in Tier::all() {
        let info = store.tier_info(tier);
        println!();
        println!("  {} (ages {})", info.label, info.age_range);
        println!("  {}", info.focus);
        println!("  {}", "─".repeat(60));

        for lesson in store.lessons_for(tier) {
            println!("  {:<8} {}", lesson.id, lesson.title);
            println!("           concepts: {}", lesson.concepts.join(", "));
        }
    }
    println!();

    Ok(())
}
