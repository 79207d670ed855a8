//! Image and text prompt; the images are downloaded over HTTPS first.
//!
//! Pass image URLs as arguments, otherwise a sample image is used.

use gemini::media;
use gemini::v1beta::{Part, model::GenerativeModel};

#[path = "common/utils.rs"]
mod utils;

#[tokio::main(flavor = "current_thread")]
async fn main() -> Result<(), utils::BoxError> {
    let config = utils::setup()?;
    let http = reqwest::Client::new();

    let mut urls: Vec<String> = std::env::args().skip(1).collect();
    if urls.is_empty() {
        urls.push(utils::SAMPLE_IMAGE_URL.to_string());
    }

    let mut parts = Vec::with_capacity(urls.len() + 1);
    for url in &urls {
        parts.push(
            media::fetch_image(&http, url)
                .await
                .map_err(utils::fatal("fetching image"))?,
        );
    }
    parts.push(Part::text(if urls.len() > 1 {
        "What is different between these pictures?"
    } else {
        "What is in this picture?"
    }));

    let model = GenerativeModel::new(config.client());
    let response = model
        .generate_content(parts)
        .await
        .map_err(utils::fatal("generating content"))?;
    utils::print_response(&response);
    Ok(())
}
