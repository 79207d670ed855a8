//! Asks for `application/json` output and pretty-prints the parsed result.

use gemini::v1beta::{Part, model::GenerativeModel, request::GenerationConfig};

#[path = "common/utils.rs"]
mod utils;

#[tokio::main(flavor = "current_thread")]
async fn main() -> Result<(), utils::BoxError> {
    let config = utils::setup()?;

    let model = GenerativeModel::new(config.client()).with_generation_config(
        GenerationConfig::new()
            .with_response_mime_type("application/json")
            .with_response_schema(serde_json::json!({
                "type": "ARRAY",
                "items": {
                    "type": "OBJECT",
                    "properties": {
                        "recipe_name": {"type": "STRING"},
                        "ingredients": {"type": "ARRAY", "items": {"type": "STRING"}}
                    }
                }
            })),
    );

    let response = model
        .generate_content(vec![Part::text("List three popular cookie recipes.")])
        .await
        .map_err(utils::fatal("generating content"))?;

    let text = response.text().unwrap_or_default();
    let value: serde_json::Value =
        serde_json::from_str(&text).map_err(utils::fatal("parsing model output"))?;
    println!("{}", serde_json::to_string_pretty(&value)?);
    Ok(())
}
