//! `sparkle chat` — Interactive tutoring session.

use std::sync::Arc;
use std::time::Duration;

use sparkle_config::AppConfig;
use sparkle_core::lesson::LessonId;
use sparkle_core::session::SessionStore;
use sparkle_curriculum::CurriculumStore;
use sparkle_generator::{GeminiBackend, ResponseGenerator};
use sparkle_session::{spawn_sweeper, InMemorySessionStore, SessionManager};
use tokio::io::{AsyncBufReadExt, BufReader};

pub async fn run(
    name: String,
    age: i32,
    lesson: Option<String>,
) -> Result<(), Box<dyn std::error::Error>> {
    let config = AppConfig::load().map_err(|e| format!("Failed to load config: {e}"))?;

    let generator = match &config.api_key {
        Some(key) => ResponseGenerator::new(
            Arc::new(GeminiBackend::new(&config.backend.api_url, key)),
            &config.backend.model,
            config.backend.temperature,
            Some(config.backend.max_tokens),
            Duration::from_secs(config.backend.timeout_secs),
        ),
        None => {
            eprintln!("  (no API key configured — using templated replies)");
            ResponseGenerator::offline()
        }
    };

    let store: Arc<dyn SessionStore> = Arc::new(InMemorySessionStore::new());
    let manager = SessionManager::new(
        store.clone(),
        Arc::new(CurriculumStore::builtin()),
        Arc::new(generator),
        config.session.progress_per_turn,
    );

    let sweeper = spawn_sweeper(
        store,
        Duration::from_secs(config.session.idle_timeout_secs),
        Duration::from_secs(config.session.sweep_interval_secs),
    );

    let start = manager
        .create_session("cli_learner", &name, age, lesson.map(LessonId::new))
        .await?;

    println!();
    println!("  ╔══════════════════════════════════════════════╗");
    println!("  ║     Professor Sparkle — Tutoring Session     ║");
    println!("  ╚══════════════════════════════════════════════╝");
    println!();
    println!("  Tier:    {} (ages {})", start.tier.label(), start.tier.age_range());
    println!("  Lesson:  {} — {}", start.lesson_id, start.lesson_title);
    println!();
    println!("  Type your message and press Enter.");
    println!("  Commands: 'next' for the next lesson, 'status', 'exit'.");
    println!();
    println!("  Sparkle > {}", start.welcome);
    println!();

    let mut lines = BufReader::new(tokio::io::stdin()).lines();
    print_prompt(&name);

    while let Some(line) = lines.next_line().await? {
        let input = line.trim();
        match input {
            "" => {}
            "exit" | "quit" => break,
            "next" => match manager.advance_lesson(&start.session_id).await {
                Ok(next) => {
                    println!();
                    println!("  📘 Next lesson: {} — {}", next.id, next.title);
                    println!("     {}", next.story);
                    println!();
                }
                Err(e) => {
                    println!();
                    println!("  🏆 {e}");
                    println!();
                }
            },
            "status" => {
                let summary = manager.summary(&start.session_id).await?;
                println!();
                println!("  Lesson:    {} — {}", summary.lesson_id, summary.lesson_title);
                println!("  Progress:  {}", summary.progress);
                println!("  Turns:     {}", summary.turn_count);
                println!();
            }
            _ => match manager.submit_utterance(&start.session_id, input).await {
                Ok(reply) => {
                    println!();
                    for line in reply.text.lines() {
                        println!("  Sparkle > {line}");
                    }
                    println!();
                }
                Err(e) => {
                    eprintln!("  [Error] {e}");
                    println!();
                }
            },
        }
        print_prompt(&name);
    }

    sweeper.abort();
    let summary = manager.close_session(&start.session_id).await?;
    println!();
    println!("  Great work today, {name}! Final progress: {}. 👋", summary.progress);
    println!();

    Ok(())
}

fn print_prompt(name: &str) {
    use std::io::Write;
    print!("  {name} > ");
    let _ = std::io::stdout().flush();
}
