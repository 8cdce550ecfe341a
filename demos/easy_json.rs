// ============================================================================
// Structured Output Example
// ============================================================================
//
// Asks a single question with JSON output requested and prints the field.
//
// ============================================================================

use uopenai::{Client, EasyAnswer, EasyOptions};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {

    dotenvy::dotenv().ok();
    tracing_subscriber::fmt::init();

    let api_key = std::env::var("OPENAI_API_KEY")?;
    let client = Client::new(&api_key, None)?;

    let options = EasyOptions::new()
        .with_system_prompt("You answer in JSON.")
        .with_json(true);

    let answer = client
        .easy_complete("What is the capital of France? Put the name in `capital`.", &options)
        .await?;

    match answer {
        EasyAnswer::Structured(value) => println!("capital: {}", value["capital"]),
        EasyAnswer::Text(text) => println!("unexpected text answer: {}", text)
    }

    Ok(())

}
