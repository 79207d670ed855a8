//! Streams the reply and prints it as it arrives.

use gemini::v1beta::{Part, model::GenerativeModel};
use std::io::Write;
use tokio_stream::StreamExt;

#[path = "common/utils.rs"]
mod utils;

#[tokio::main(flavor = "current_thread")]
async fn main() -> Result<(), utils::BoxError> {
    let config = utils::setup()?;
    let model = GenerativeModel::new(config.client());

    let mut stream = model
        .stream_generate_content(vec![Part::text(
            "Write a long story about a magic backpack.",
        )])
        .await
        .map_err(utils::fatal("starting stream"))?;

    let mut stdout = std::io::stdout();
    let mut chunks = 0usize;
    while let Some(chunk) = stream.next().await {
        let chunk = chunk.map_err(utils::fatal("reading stream"))?;
        if let Some(text) = chunk.text() {
            print!("{text}");
            stdout.flush()?;
        }
        chunks += 1;
    }
    println!();
    tracing::info!(chunks, "stream complete");
    Ok(())
}
