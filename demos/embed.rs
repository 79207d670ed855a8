//! Single and batched embeddings.

use gemini::v1beta::embedding::{EmbedContentRequest, TaskType};

#[path = "common/utils.rs"]
mod utils;

#[tokio::main(flavor = "current_thread")]
async fn main() -> Result<(), utils::BoxError> {
    let config = utils::setup()?;
    let client = config.embedding_client();

    let single = client
        .embed_content(
            EmbedContentRequest::text("The quick brown fox jumps over the lazy dog.")
                .with_task_type(TaskType::RetrievalDocument)
                .with_title("Pangram"),
        )
        .await
        .map_err(utils::fatal("embedding content"))?;
    let values = &single.embedding.values;
    println!(
        "single: {} dimensions, first values {:?}",
        values.len(),
        &values[..values.len().min(5)]
    );

    let texts = [
        "What is the meaning of life?",
        "How much wood would a woodchuck chuck?",
        "How does the brain work?",
    ];
    let batch = client
        .batch_embed_contents(
            texts
                .iter()
                .map(|text| {
                    EmbedContentRequest::text(*text).with_task_type(TaskType::SemanticSimilarity)
                })
                .collect(),
        )
        .await
        .map_err(utils::fatal("embedding batch"))?;
    for (text, embedding) in texts.iter().zip(&batch.embeddings) {
        println!("{text}: {} dimensions", embedding.values.len());
    }
    Ok(())
}
