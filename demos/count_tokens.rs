//! Counts prompt tokens, then compares with the usage reported for a generation.

use gemini::media;
use gemini::v1beta::{Part, model::GenerativeModel};

#[path = "common/utils.rs"]
mod utils;

#[tokio::main(flavor = "current_thread")]
async fn main() -> Result<(), utils::BoxError> {
    let config = utils::setup()?;
    let model = GenerativeModel::new(config.client());

    let prompt = "The quick brown fox jumps over the lazy dog.";
    let count = model
        .count_tokens(vec![Part::text(prompt)])
        .await
        .map_err(utils::fatal("counting tokens"))?;
    println!("text prompt: {} tokens", count.total_tokens);

    let image = media::fetch_image(&reqwest::Client::new(), utils::SAMPLE_IMAGE_URL)
        .await
        .map_err(utils::fatal("fetching image"))?;
    let count = model
        .count_tokens(vec![image, Part::text("Describe this image.")])
        .await
        .map_err(utils::fatal("counting tokens"))?;
    println!("image + text prompt: {} tokens", count.total_tokens);

    let response = model
        .generate_content(vec![Part::text(prompt)])
        .await
        .map_err(utils::fatal("generating content"))?;
    if let Some(usage) = response.usage_metadata {
        println!(
            "generation usage: prompt={:?} candidates={:?} total={:?}",
            usage.prompt_token_count, usage.candidates_token_count, usage.total_token_count
        );
    }
    Ok(())
}
