//! Multi-turn chat: the session resends the whole history with every message.

use gemini::v1beta::{Content, Part, model::GenerativeModel, request::GenerationConfig};

#[path = "common/utils.rs"]
mod utils;

#[tokio::main(flavor = "current_thread")]
async fn main() -> Result<(), utils::BoxError> {
    let config = utils::setup()?;

    let model = GenerativeModel::new(config.client())
        .with_generation_config(GenerationConfig::new().with_max_output_tokens(200u32));
    let mut chat = model.start_chat().with_history(vec![
        Content::user(vec![Part::text("Hello, I have 2 dogs in my house.")]),
        Content::model(vec![Part::text(
            "Great to meet you. What would you like to know?",
        )]),
    ]);

    for message in [
        "How many paws are in my house?",
        "And if I adopt one more dog?",
    ] {
        println!(">> {message}");
        let response = chat
            .send_message(vec![Part::text(message)])
            .await
            .map_err(utils::fatal("sending message"))?;
        utils::print_response(&response);
    }

    println!("\n--- history ---");
    for turn in chat.history() {
        let role = turn.role.map(|r| format!("{r:?}")).unwrap_or_default();
        println!("{role}: {}", turn.text());
    }
    Ok(())
}
