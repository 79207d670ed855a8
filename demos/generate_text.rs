//! Single-turn text generation.

use gemini::v1beta::{Content, Part, request::Request};

#[path = "common/utils.rs"]
mod utils;

#[tokio::main(flavor = "current_thread")]
async fn main() -> Result<(), utils::BoxError> {
    let config = utils::setup()?;
    let client = config.client();

    let request = Request::new(vec![Content::user(vec![Part::text(
        "Write a story about a magic backpack.",
    )])]);

    let response = client
        .generate_content(request)
        .await
        .map_err(utils::fatal("generating content"))?;
    utils::print_response(&response);
    Ok(())
}
