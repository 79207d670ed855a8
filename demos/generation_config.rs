//! Text generation with sampling parameters, stop sequences and safety thresholds.

use gemini::v1beta::{
    Part,
    model::GenerativeModel,
    request::GenerationConfig,
    safety::{HarmBlockThreshold, HarmCategory},
};

#[path = "common/utils.rs"]
mod utils;

#[tokio::main(flavor = "current_thread")]
async fn main() -> Result<(), utils::BoxError> {
    let config = utils::setup()?;

    let model = GenerativeModel::new(config.client())
        .with_generation_config(
            GenerationConfig::new()
                .with_temperature(0.9f32)
                .with_top_p(0.5f32)
                .with_top_k(20u32)
                .with_candidate_count(1u32)
                .with_max_output_tokens(200u32)
                .with_stop_sequences(vec!["red".to_string(), "\n\n\n".to_string()]),
        )
        .with_safety_setting(
            HarmCategory::HarmCategoryHarassment,
            HarmBlockThreshold::BlockOnlyHigh,
        )
        .with_safety_setting(
            HarmCategory::HarmCategoryDangerousContent,
            HarmBlockThreshold::BlockLowAndAbove,
        );

    let response = model
        .generate_content(vec![Part::text(
            "Write a short poem about the colors of a sunset.",
        )])
        .await
        .map_err(utils::fatal("generating content"))?;
    utils::print_response(&response);
    Ok(())
}
