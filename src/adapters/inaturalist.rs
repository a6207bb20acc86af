use crate::config::policy;
use crate::domain::model::Species;
use crate::domain::ports::SpeciesSource;
use crate::utils::error::Result;
use async_trait::async_trait;
use reqwest::Client;
use serde::Deserialize;

/// Client for the iNaturalist v1 API.
#[derive(Debug, Clone)]
pub struct INaturalistClient {
    base_url: String,
    client: Client,
}

#[derive(Debug, Deserialize)]
struct PlacesResponse {
    #[serde(default)]
    results: Vec<PlaceRecord>,
}

#[derive(Debug, Deserialize)]
struct PlaceRecord {
    id: u64,
}

#[derive(Debug, Deserialize)]
struct SpeciesCountsResponse {
    #[serde(default)]
    results: Vec<SpeciesCount>,
}

#[derive(Debug, Deserialize)]
struct SpeciesCount {
    taxon: Option<Taxon>,
}

#[derive(Debug, Deserialize)]
struct Taxon {
    id: Option<u64>,
    rank_level: Option<f64>,
    name: Option<String>,
    preferred_common_name: Option<String>,
    default_photo: Option<DefaultPhoto>,
}

#[derive(Debug, Deserialize)]
struct DefaultPhoto {
    license_code: Option<String>,
    square_url: Option<String>,
    medium_url: Option<String>,
}

impl INaturalistClient {
    pub fn new(base_url: &str) -> Result<Self> {
        let client = Client::builder().timeout(policy::API_TIMEOUT).build()?;
        Ok(Self {
            base_url: base_url.trim_end_matches('/').to_string(),
            client,
        })
    }

    /// Maps one upstream record to a Species, or `None` when the record is
    /// malformed, outside the qualifying rank band, or carries a photo
    /// license outside the allow-list. A missing license is acceptable.
    fn qualify(record: SpeciesCount) -> Option<Species> {
        let taxon = record.taxon?;
        let taxon_id = taxon.id?;

        let rank_level = taxon.rank_level?;
        if !(policy::MIN_RANK_LEVEL..=policy::MAX_RANK_LEVEL).contains(&rank_level) {
            return None;
        }

        let photo = taxon.default_photo;
        if let Some(license) = photo.as_ref().and_then(|p| p.license_code.as_deref()) {
            if !policy::ALLOWED_LICENSES.contains(&license.to_lowercase().as_str()) {
                return None;
            }
        }

        let image_url = photo
            .and_then(|p| p.square_url.or(p.medium_url))
            .unwrap_or_default();

        Some(Species {
            taxon_id,
            common_name: taxon.preferred_common_name.unwrap_or_default(),
            scientific_name: taxon.name.unwrap_or_default(),
            image_url,
        })
    }
}

#[async_trait]
impl SpeciesSource for INaturalistClient {
    async fn lookup_place(&self, query: &str) -> Result<Option<u64>> {
        let url = format!("{}/places/autocomplete", self.base_url);
        let request = self
            .client
            .get(&url)
            .query(&[("q", query), ("per_page", "1")]);

        let response = match request.send().await.and_then(|r| r.error_for_status()) {
            Ok(response) => response,
            Err(e) => {
                tracing::warn!("Place lookup failed: {}", e);
                return Ok(None);
            }
        };

        let body: PlacesResponse = match response.json().await {
            Ok(body) => body,
            Err(e) => {
                tracing::warn!("Place lookup returned an unreadable response: {}", e);
                return Ok(None);
            }
        };

        Ok(body.results.first().map(|place| place.id))
    }

    async fn top_species(
        &self,
        place_id: u64,
        top_n: usize,
        months: &[u32],
    ) -> Result<Vec<Species>> {
        let url = format!("{}/observations/species_counts", self.base_url);

        // Over-fetch to leave room for records the filters drop.
        let per_page = (top_n * 3).min(policy::MAX_PER_PAGE);

        let mut params = vec![
            ("place_id", place_id.to_string()),
            ("verifiable", "true".to_string()),
            ("quality_grade", "research".to_string()),
            ("geo", "true".to_string()),
            ("per_page", per_page.to_string()),
        ];
        if !months.is_empty() {
            let joined = months
                .iter()
                .map(|m| m.to_string())
                .collect::<Vec<_>>()
                .join(",");
            params.push(("month", joined));
        }

        tracing::debug!("Fetching top {} species for place {}", top_n, place_id);
        let request = self.client.get(&url).query(&params);

        let response = match request.send().await.and_then(|r| r.error_for_status()) {
            Ok(response) => response,
            Err(e) => {
                tracing::warn!("Species query failed: {}", e);
                return Ok(Vec::new());
            }
        };

        let body: SpeciesCountsResponse = match response.json().await {
            Ok(body) => body,
            Err(e) => {
                tracing::warn!("Species query returned an unreadable response: {}", e);
                return Ok(Vec::new());
            }
        };

        let species: Vec<Species> = body
            .results
            .into_iter()
            .filter_map(Self::qualify)
            .take(top_n)
            .collect();

        tracing::debug!("{} species qualified", species.len());
        Ok(species)
    }
}
