// ============================================================================
// Chat Example
// ============================================================================
//
// Sends a short transcript and prints every returned choice.
// Reads OPENAI_API_KEY (and optionally OPENAI_ORGANIZATION) from the
// environment or a .env file.
//
// ============================================================================

use tracing_subscriber::EnvFilter;
use uopenai::{Client, ClientConfig, CompletionOptions, Message};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {

    dotenvy::dotenv().ok();

    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .init();

    let api_key = std::env::var("OPENAI_API_KEY")?;

    let mut config = ClientConfig::default().with_request_log("./requests.log");
    if let Ok(organization) = std::env::var("OPENAI_ORGANIZATION") {
        config = config.with_organization(organization);
    }

    let client = Client::with_config(&api_key, config)?;

    let messages = vec![
        Message::system("You are a chatbot."),
        Message::user("Hello!"),
        Message::user("Can you tell me a joke?")
    ];

    let options = CompletionOptions::new()
        .with_temperature(0.7)
        .with_max_tokens(200);

    let answer = client.complete(&messages, &options).await?;

    println!("{} ({} tokens)", answer.model, answer.usage.total_tokens);
    for choice in &answer.choices {
        println!("[{}] {}", choice.index, choice.message.content);
    }

    Ok(())

}
