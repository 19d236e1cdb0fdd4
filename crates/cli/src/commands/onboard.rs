//! `sparkle onboard` — First-time setup.

use sparkle_config::AppConfig;

pub async fn run() -> Result<(), Box<dyn std::error::Error>> {
    let config_dir = AppConfig::config_dir();
    let config_path = config_dir.join("config.toml");

    println!("✨ Professor Sparkle — First-Time Setup");
    println!("=======================================\n");

    if config_path.exists() {
        println!("⚠️  Config already exists at: {}", config_path.display());
        println!("   Edit it manually or delete and re-run onboard.\n");
    } else {
        let path = AppConfig::write_default()?;
        println!("✅ Created config.toml at: {}", path.display());
        println!("\n📝 Next steps:");
        println!("   1. Add a Gemini API key (or set GEMINI_API_KEY)");
        println!("   2. Run: sparkle chat --name Emma --age 6");
        println!("   3. Start learning!\n");
        println!("   Without an API key, Professor Sparkle still works —");
        println!("   replies come from the built-in templated responder.\n");
    }

    println!("🎉 Setup complete!\n");

    Ok(())
}
