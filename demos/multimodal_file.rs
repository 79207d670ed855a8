//! Image and text prompt with the image read from disk.

use gemini::media;
use gemini::v1beta::{Part, model::GenerativeModel};

#[path = "common/utils.rs"]
mod utils;

#[tokio::main(flavor = "current_thread")]
async fn main() -> Result<(), utils::BoxError> {
    let config = utils::setup()?;

    let Some(path) = std::env::args().nth(1) else {
        return Err(utils::fatal("usage")("multimodal_file <IMAGE_PATH> [PROMPT]"));
    };
    let prompt = std::env::args()
        .nth(2)
        .unwrap_or_else(|| "Describe this image.".to_string());

    let image = media::load_image(&path)
        .await
        .map_err(utils::fatal("reading image"))?;

    let model = GenerativeModel::new(config.client());
    let response = model
        .generate_content(vec![image, Part::text(prompt)])
        .await
        .map_err(utils::fatal("generating content"))?;
    utils::print_response(&response);
    Ok(())
}
