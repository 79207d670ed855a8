//! Lists every model available to the key, then looks up the configured one.

#[path = "common/utils.rs"]
mod utils;

#[tokio::main(flavor = "current_thread")]
async fn main() -> Result<(), utils::BoxError> {
    let config = utils::setup()?;
    let client = config.client();

    let models = client
        .list_all_models()
        .await
        .map_err(utils::fatal("listing models"))?;
    for model in &models {
        println!(
            "{} ({}): {}",
            model.name,
            model.display_name.as_deref().unwrap_or("-"),
            model.supported_generation_methods.join(", ")
        );
    }

    let model = client
        .get_model(config.model())
        .await
        .map_err(utils::fatal("getting model"))?;
    println!(
        "\n{}: input limit {:?}, output limit {:?}",
        model.name, model.input_token_limit, model.output_token_limit
    );
    Ok(())
}
