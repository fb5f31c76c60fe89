use banking_assistant::{
    models::{Credential, Mode, EMERGENCY_LINE, SAMPLE_QUESTIONS},
    session::{ChatRole, ChatTranscript},
    AssistantConfig, LocalResponder, OpenAiResponder, ResponseRouter,
};
use std::sync::Arc;
use tokio::io::{AsyncBufReadExt, BufReader};
use tracing::info;
use tracing_subscriber::EnvFilter;

const HELP: &str = "Commands: /samples, /ask N, /test, /clear, /history, /quit";

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Initialize tracing
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .with_writer(std::io::stderr)
        .init();

    // Load environment variables
    dotenv::dotenv().ok();

    let config = AssistantConfig::from_env()?;
    let credential: Option<Credential> = config.credential.clone();
    let mut mode = config.mode();

    let router = ResponseRouter::new(
        LocalResponder::default(),
        Arc::new(OpenAiResponder::new(&config.remote)?),
    );

    info!("Banking chat starting (mode: {})", mode);

    println!("🏦 Banking Assistant");
    match mode {
        Mode::AiEnabled => println!("✅ AI Mode Activated!"),
        Mode::AiDisabled => println!("ℹ️ Using Fallback Mode (no API key)"),
    }
    println!("📞 Emergency: {}", EMERGENCY_LINE);
    println!("{}\n", HELP);

    let mut transcript = ChatTranscript::new();
    let mut lines = BufReader::new(tokio::io::stdin()).lines();

    while let Some(line) = lines.next_line().await? {
        let input = line.trim();
        if input.is_empty() {
            continue;
        }

        let prompt = match input {
            "/quit" | "/exit" => break,
            "/samples" => {
                for (i, q) in SAMPLE_QUESTIONS.iter().enumerate() {
                    println!("  {}. {}", i + 1, q);
                }
                continue;
            }
            "/clear" => {
                transcript.clear();
                println!("🗑️ Chat cleared");
                continue;
            }
            "/history" => {
                for entry in transcript.entries() {
                    let who = match entry.role {
                        ChatRole::User => "you",
                        ChatRole::Assistant => "assistant",
                    };
                    match entry.mode {
                        Some(label) => println!("[{}] {} {}", who, label.indicator(), entry.content),
                        None => println!("[{}] {}", who, entry.content),
                    }
                }
                continue;
            }
            "/test" => {
                let outcome = router.test_connection(credential.as_ref()).await;
                match &outcome {
                    Ok(reply) => println!("✅ AI Connected! Response: {}", reply),
                    Err(e) => println!("❌ Connection Failed: {}", e),
                }
                mode = Mode::after_connection_test(outcome.is_ok(), credential.as_ref());
                println!("Current Mode: {}", mode);
                continue;
            }
            cmd if cmd.starts_with("/ask") => {
                let picked = cmd["/ask".len()..]
                    .trim()
                    .parse::<usize>()
                    .ok()
                    .and_then(|n| n.checked_sub(1))
                    .and_then(|i| SAMPLE_QUESTIONS.get(i));
                match picked {
                    Some(q) => {
                        println!("> {}", q);
                        q.to_string()
                    }
                    None => {
                        println!("Pick a sample between 1 and {}", SAMPLE_QUESTIONS.len());
                        continue;
                    }
                }
            }
            cmd if cmd.starts_with('/') => {
                println!("{}", HELP);
                continue;
            }
            text => text.to_string(),
        };

        transcript.push_user(prompt.clone());

        let result = router.route(&prompt, mode, credential.as_ref()).await;

        println!("{}", result.mode.indicator());
        println!("{}\n", result.answer);

        transcript.push_assistant(result);
    }

    info!("Banking chat finished ({} messages)", transcript.len());

    Ok(())
}
