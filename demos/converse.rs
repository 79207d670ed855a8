//! Interactive prompt loop: every line read from stdin is sent as a fresh prompt.
//!
//! Each prompt is independent; use the `chat` demo for a conversation with memory.

use gemini::v1beta::{Part, model::GenerativeModel};
use std::io::Write;
use tokio::io::{AsyncBufReadExt, BufReader};

#[path = "common/utils.rs"]
mod utils;

#[tokio::main(flavor = "current_thread")]
async fn main() -> Result<(), utils::BoxError> {
    let config = utils::setup()?;
    let model = GenerativeModel::new(config.client());

    let mut lines = BufReader::new(tokio::io::stdin()).lines();
    loop {
        print!("\n>> ");
        std::io::stdout().flush()?;

        let Some(prompt) = lines
            .next_line()
            .await
            .map_err(utils::fatal("reading input"))?
        else {
            // EOF
            return Ok(());
        };
        if prompt.trim().is_empty() {
            continue;
        }

        let response = model
            .generate_content(vec![Part::text(prompt)])
            .await
            .map_err(utils::fatal("generating content"))?;
        utils::print_response(&response);
    }
}
