use crate::core::Pipeline;
use crate::utils::error::Result;

/// Drives the three pipeline stages for one generation request.
pub struct BingoEngine<P: Pipeline> {
    pipeline: P,
}

impl<P: Pipeline> BingoEngine<P> {
    pub fn new(pipeline: P) -> Self {
        Self { pipeline }
    }

    pub async fn run(&self) -> Result<String> {
        tracing::info!("Fetching species pool...");
        let pool = self.pipeline.extract().await?;

        tracing::info!("Generating cards...");
        let cards = self.pipeline.transform(pool).await?;
        tracing::info!("Generated {} cards", cards.len());

        tracing::info!("Rendering document...");
        let output_path = self.pipeline.load(cards).await?;
        tracing::info!("Output saved to: {}", output_path);

        Ok(output_path)
    }
}
