use crate::config::policy;
use crate::core::generator::CardGenerator;
use crate::core::renderer::{PdfRenderer, RenderOptions};
use crate::core::{Card, ConfigProvider, PhotoFetcher, Species, SpeciesSource, Storage};
use crate::utils::error::{BingoError, Result};

/// The one-request pipeline: fetch a species pool, arrange it into cards,
/// render the cards to a PDF and deliver the file.
pub struct BingoPipeline<Src, F, St, C>
where
    Src: SpeciesSource,
    F: PhotoFetcher,
    St: Storage,
    C: ConfigProvider,
{
    source: Src,
    renderer: PdfRenderer<F>,
    storage: St,
    config: C,
}

impl<Src, F, St, C> BingoPipeline<Src, F, St, C>
where
    Src: SpeciesSource,
    F: PhotoFetcher,
    St: Storage,
    C: ConfigProvider,
{
    pub fn new(source: Src, fetcher: F, storage: St, config: C) -> Self {
        Self {
            source,
            renderer: PdfRenderer::new(fetcher),
            storage,
            config,
        }
    }

    /// An all-digit query is already a place ID; anything else goes through
    /// the autocomplete lookup.
    async fn resolve_place(&self) -> Result<u64> {
        let query = self.config.place_query();
        if !query.is_empty() && query.chars().all(|c| c.is_ascii_digit()) {
            if let Ok(id) = query.parse::<u64>() {
                return Ok(id);
            }
        }

        self.source
            .lookup_place(query)
            .await?
            .ok_or_else(|| BingoError::PlaceNotFound {
                query: query.to_string(),
            })
    }
}

#[async_trait::async_trait]
impl<Src, F, St, C> crate::core::Pipeline for BingoPipeline<Src, F, St, C>
where
    Src: SpeciesSource,
    F: PhotoFetcher,
    St: Storage,
    C: ConfigProvider,
{
    async fn extract(&self) -> Result<Vec<Species>> {
        let place_id = self.resolve_place().await?;
        tracing::info!("Using place {}", place_id);

        let pool = self
            .source
            .top_species(place_id, self.config.pool_size(), self.config.months())
            .await?;

        // The source reports a whole-query failure as an empty pool.
        if pool.is_empty() {
            return Err(BingoError::UpstreamError {
                message: format!("no species observations returned for place {}", place_id),
            });
        }

        tracing::info!("Fetched {} qualifying species", pool.len());
        Ok(pool)
    }

    async fn transform(&self, pool: Vec<Species>) -> Result<Vec<Card>> {
        let generator = CardGenerator::new(pool);
        generator.generate_cards(
            self.config.num_cards(),
            self.config.grid_size(),
            self.config.free_cell(),
            self.config.seed(),
        )
    }

    async fn load(&self, cards: Vec<Card>) -> Result<String> {
        let options = RenderOptions {
            show_photos: self.config.show_photos(),
            show_common_names: self.config.show_common_names(),
            show_scientific_names: self.config.show_scientific_names(),
            title: self.config.title().to_string(),
        };

        let pdf_bytes = self.renderer.render_cards(&cards, &options).await?;
        tracing::debug!(
            "Rendered {} bytes of {}",
            pdf_bytes.len(),
            policy::OUTPUT_MIME_TYPE
        );

        self.storage
            .write_file(policy::OUTPUT_FILENAME, &pdf_bytes)
            .await?;

        Ok(format!(
            "{}/{}",
            self.config.output_path(),
            policy::OUTPUT_FILENAME
        ))
    }
}
