// Tests against the real API. Run with `OPENAI_API_KEY=... cargo test -- --ignored`.

use uopenai::{Client, CompletionOptions, EasyOptions, Error, Message};

fn get_key() -> String {
    dotenvy::dotenv().ok();
    std::env::var("OPENAI_API_KEY").expect("OPENAI_API_KEY not set")
}

#[tokio::test]
#[ignore]
async fn test_complete() {

    let client = Client::new(&get_key(), None).unwrap();
    let messages = vec![
        Message::system("You are a chatbot."),
        Message::user("What is your name?")
    ];

    let answer = client
        .complete(&messages, &CompletionOptions::new().with_model("gpt-4-turbo-preview"))
        .await
        .unwrap();

    assert!(!answer.choices.is_empty());
    assert!(!answer.choices[0].message.content.is_empty());

    let err = client
        .complete(&messages, &CompletionOptions::new().with_model("gpt-nonexistent-model"))
        .await
        .unwrap_err();
    assert!(err.is_api());

}

#[tokio::test]
#[ignore]
async fn test_complete_with_invalid_api_key() {

    let client = Client::new("invalidkey", None).unwrap();

    let err = client
        .complete(&[Message::user("Hello, who are you?")], &CompletionOptions::new())
        .await
        .unwrap_err();

    assert!(err.is_api());
    assert_eq!(err.status().map(|s| s.as_u16()), Some(401));

}

#[tokio::test]
#[ignore]
async fn test_easy_complete_with_json() {

    let client = Client::new(&get_key(), None).unwrap();
    let options = EasyOptions::new()
        .with_completion(CompletionOptions::new().with_model("gpt-4-turbo-preview"))
        .with_json(true);

    let result = client
        .easy_complete("what is the capital of France? answer in JSON, put the name in `capital`", &options)
        .await;

    match result {
        Ok(answer) => {
            let value = answer.into_structured().expect("JSON was requested");
            assert_eq!(value["capital"], "Paris");
        }
        Err(err) => assert!(matches!(err, Error::Api(_)), "got {:?}", err)
    }

}
