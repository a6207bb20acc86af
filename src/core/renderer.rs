use crate::adapters::image::{center_crop_to_square, SquarePhoto};
use crate::config::policy::{self, CellLayout};
use crate::core::layout::{self, FontFace, PageMetrics, LEADING, PHOTO_TEXT_GAP};
use crate::domain::model::{Card, Cell, Species};
use crate::domain::ports::PhotoFetcher;
use crate::utils::error::{BingoError, Result};
use lopdf::content::{Content, Operation};
use lopdf::{dictionary, Dictionary, Document, Object, ObjectId, Stream};

#[derive(Debug, Clone)]
pub struct RenderOptions {
    pub show_photos: bool,
    pub show_common_names: bool,
    pub show_scientific_names: bool,
    pub title: String,
}

struct FontIds {
    regular: ObjectId,
    bold: ObjectId,
    oblique: ObjectId,
}

struct StyledLine {
    text: String,
    face: FontFace,
    size: f64,
}

/// One cell with its photo acquired and its text wrapped and measured.
struct MeasuredCell {
    photo: Option<SquarePhoto>,
    lines: Vec<StyledLine>,
    text_height: f64,
}

fn real(value: f64) -> Object {
    Object::Real(value as f32)
}

/// Renders cards into a single paginated PDF, one page per card.
pub struct PdfRenderer<F: PhotoFetcher> {
    fetcher: F,
}

impl<F: PhotoFetcher> PdfRenderer<F> {
    pub fn new(fetcher: F) -> Self {
        Self { fetcher }
    }

    pub async fn render_cards(&self, cards: &[Card], options: &RenderOptions) -> Result<Vec<u8>> {
        let mut doc = Document::with_version("1.5");
        let pages_id = doc.new_object_id();

        let fonts = FontIds {
            regular: add_font(&mut doc, FontFace::Regular),
            bold: add_font(&mut doc, FontFace::Bold),
            oblique: add_font(&mut doc, FontFace::Oblique),
        };

        let mut kids: Vec<Object> = Vec::new();
        for card in cards {
            let page_id = self
                .render_page(&mut doc, pages_id, &fonts, card, options)
                .await?;
            kids.push(page_id.into());
        }

        let page_count = kids.len() as i64;
        doc.objects.insert(
            pages_id,
            Object::Dictionary(dictionary! {
                "Type" => "Pages",
                "Kids" => kids,
                "Count" => page_count,
            }),
        );

        let catalog_id = doc.add_object(dictionary! {
            "Type" => "Catalog",
            "Pages" => pages_id,
        });
        doc.trailer.set("Root", catalog_id);

        let mut buffer = Vec::new();
        doc.save_to(&mut buffer)?;
        Ok(buffer)
    }

    async fn render_page(
        &self,
        doc: &mut Document,
        pages_id: ObjectId,
        fonts: &FontIds,
        card: &Card,
        options: &RenderOptions,
    ) -> Result<ObjectId> {
        let layout = policy::cell_layout(card.size).ok_or_else(|| BingoError::ConfigError {
            message: format!("No layout defined for {}x{} grids", card.size, card.size),
        })?;
        let metrics = layout::page_metrics(card.size, options.show_photos);

        let cells = self.measure_cells(card, &layout, &metrics, options).await;

        let mut row_heights: Vec<f64> = cells
            .iter()
            .map(|row| {
                let text_heights: Vec<f64> = row.iter().map(|c| c.text_height).collect();
                layout::row_height(&layout, &text_heights, options.show_photos)
            })
            .collect();
        layout::scale_rows_to_fit(&mut row_heights, metrics.usable_height);

        let mut ops: Vec<Operation> = Vec::new();
        let mut xobjects = Dictionary::new();

        draw_title(&mut ops, &options.title, &metrics);
        self.draw_grid(
            doc,
            &mut ops,
            &mut xobjects,
            &cells,
            &row_heights,
            &layout,
            &metrics,
        );

        let content = Content { operations: ops };
        let content_id = doc.add_object(Stream::new(dictionary! {}, content.encode()?));

        let resources = dictionary! {
            "Font" => dictionary! {
                FontFace::Regular.resource_name() => Object::Reference(fonts.regular),
                FontFace::Bold.resource_name() => Object::Reference(fonts.bold),
                FontFace::Oblique.resource_name() => Object::Reference(fonts.oblique),
            },
            "XObject" => xobjects,
        };

        let page_id = doc.add_object(dictionary! {
            "Type" => "Page",
            "Parent" => pages_id,
            "Contents" => content_id,
            "Resources" => resources,
            "MediaBox" => vec![
                real(0.0),
                real(0.0),
                real(metrics.page_width),
                real(metrics.page_height),
            ],
        });
        Ok(page_id)
    }

    /// Fetches and crops photos (one at a time) and wraps each cell's text.
    async fn measure_cells(
        &self,
        card: &Card,
        layout: &CellLayout,
        metrics: &PageMetrics,
        options: &RenderOptions,
    ) -> Vec<Vec<MeasuredCell>> {
        let text_width_budget = metrics.col_width - 2.0 * layout.padding;

        let mut rows = Vec::with_capacity(card.size);
        for row in &card.grid {
            let mut measured = Vec::with_capacity(card.size);
            for cell in row {
                measured.push(match cell {
                    Cell::Free => free_cell(),
                    Cell::Species(species) => {
                        let photo = if options.show_photos && !species.image_url.is_empty() {
                            self.acquire_photo(&species.image_url).await
                        } else {
                            None
                        };
                        species_cell(species, photo, layout, text_width_budget, options)
                    }
                });
            }
            rows.push(measured);
        }
        rows
    }

    /// Photo failures degrade to a text-only cell; they never fail the card.
    async fn acquire_photo(&self, url: &str) -> Option<SquarePhoto> {
        let bytes = match self.fetcher.fetch(url).await {
            Ok(bytes) => bytes,
            Err(e) => {
                tracing::debug!("Photo download failed ({}): {}", url, e);
                return None;
            }
        };
        match center_crop_to_square(&bytes) {
            Ok(photo) => Some(photo),
            Err(e) => {
                tracing::debug!("Photo decode failed ({}): {}", url, e);
                None
            }
        }
    }

    #[allow(clippy::too_many_arguments)]
    fn draw_grid(
        &self,
        doc: &mut Document,
        ops: &mut Vec<Operation>,
        xobjects: &mut Dictionary,
        cells: &[Vec<MeasuredCell>],
        row_heights: &[f64],
        layout: &CellLayout,
        metrics: &PageMetrics,
    ) {
        let grid_top = metrics.page_height
            - policy::PAGE_MARGIN
            - (policy::TITLE_FONT_SIZE * LEADING + policy::TITLE_SPACER);

        // Cell borders first, one stroked rectangle per cell.
        ops.push(Operation::new("w", vec![real(policy::GRID_LINE_WIDTH)]));
        ops.push(Operation::new("G", vec![real(policy::GRID_LINE_GRAY)]));
        let mut y_top = grid_top;
        for (row, &row_height) in cells.iter().zip(row_heights) {
            for col in 0..row.len() {
                let x = policy::PAGE_MARGIN + col as f64 * metrics.col_width;
                ops.push(Operation::new(
                    "re",
                    vec![
                        real(x),
                        real(y_top - row_height),
                        real(metrics.col_width),
                        real(row_height),
                    ],
                ));
            }
            ops.push(Operation::new("S", vec![]));
            y_top -= row_height;
        }

        // Then the cell contents.
        ops.push(Operation::new("g", vec![real(0.0)]));
        let mut y_top = grid_top;
        for (row, &row_height) in cells.iter().zip(row_heights) {
            for (col, cell) in row.iter().enumerate() {
                let x = policy::PAGE_MARGIN + col as f64 * metrics.col_width;
                self.draw_cell(doc, ops, xobjects, cell, x, y_top, row_height, layout, metrics);
            }
            y_top -= row_height;
        }
    }

    #[allow(clippy::too_many_arguments)]
    fn draw_cell(
        &self,
        doc: &mut Document,
        ops: &mut Vec<Operation>,
        xobjects: &mut Dictionary,
        cell: &MeasuredCell,
        x: f64,
        y_top: f64,
        row_height: f64,
        layout: &CellLayout,
        metrics: &PageMetrics,
    ) {
        // Photo side: the allotment, shrunk to whatever actually fits the
        // cell once padding, text and the scaled row height are accounted for.
        let photo_side = cell.photo.as_ref().map(|_| {
            layout
                .photo_size
                .min(metrics.col_width - 2.0 * layout.padding)
                .min(row_height - cell.text_height - 2.0 * layout.padding - PHOTO_TEXT_GAP)
        });

        let photo_block = match photo_side {
            Some(side) if side > 1.0 => side + PHOTO_TEXT_GAP,
            _ => 0.0,
        };
        let block_height = photo_block + cell.text_height;
        let content_top = y_top - ((row_height - block_height).max(0.0)) / 2.0;

        if photo_block > 0.0 {
            let side = photo_block - PHOTO_TEXT_GAP;
            if let Some(photo) = &cell.photo {
                let name = format!("Im{}", xobjects.len());
                let image_id = add_photo_xobject(doc, photo);
                xobjects.set(name.as_bytes().to_vec(), Object::Reference(image_id));

                let img_x = x + (metrics.col_width - side) / 2.0;
                let img_y = content_top - side;
                ops.push(Operation::new("q", vec![]));
                ops.push(Operation::new(
                    "cm",
                    vec![
                        real(side),
                        real(0.0),
                        real(0.0),
                        real(side),
                        real(img_x),
                        real(img_y),
                    ],
                ));
                ops.push(Operation::new("Do", vec![name.as_str().into()]));
                ops.push(Operation::new("Q", vec![]));
            }
        }

        let mut baseline = content_top - photo_block;
        for line in &cell.lines {
            baseline -= line.size;
            let line_width = layout::text_width(&line.text, line.size);
            let text_x = x + (metrics.col_width - line_width) / 2.0;
            draw_text_line(ops, line, text_x, baseline);
            baseline -= line.size * (LEADING - 1.0);
        }
    }
}

fn add_font(doc: &mut Document, face: FontFace) -> ObjectId {
    doc.add_object(dictionary! {
        "Type" => "Font",
        "Subtype" => "Type1",
        "BaseFont" => face.base_font(),
    })
}

fn add_photo_xobject(doc: &mut Document, photo: &SquarePhoto) -> ObjectId {
    let dict = dictionary! {
        "Type" => "XObject",
        "Subtype" => "Image",
        "Width" => photo.side as i64,
        "Height" => photo.side as i64,
        "ColorSpace" => "DeviceRGB",
        "BitsPerComponent" => 8i64,
        "Filter" => "DCTDecode",
    };
    doc.add_object(Stream::new(dict, photo.data.clone()))
}

fn draw_title(ops: &mut Vec<Operation>, title: &str, metrics: &PageMetrics) {
    let width = layout::text_width(title, policy::TITLE_FONT_SIZE);
    let x = (metrics.page_width - width) / 2.0;
    let y = metrics.page_height - policy::PAGE_MARGIN - policy::TITLE_FONT_SIZE;

    ops.push(Operation::new("g", vec![real(0.0)]));
    ops.push(Operation::new("BT", vec![]));
    ops.push(Operation::new(
        "Tf",
        vec![
            FontFace::Bold.resource_name().into(),
            real(policy::TITLE_FONT_SIZE),
        ],
    ));
    ops.push(Operation::new("Td", vec![real(x), real(y)]));
    ops.push(Operation::new("Tj", vec![Object::string_literal(title)]));
    ops.push(Operation::new("ET", vec![]));
}

fn draw_text_line(ops: &mut Vec<Operation>, line: &StyledLine, x: f64, baseline: f64) {
    ops.push(Operation::new("BT", vec![]));
    ops.push(Operation::new(
        "Tf",
        vec![line.face.resource_name().into(), real(line.size)],
    ));
    ops.push(Operation::new("Td", vec![real(x), real(baseline)]));
    ops.push(Operation::new(
        "Tj",
        vec![Object::string_literal(line.text.as_str())],
    ));
    ops.push(Operation::new("ET", vec![]));
}

fn free_cell() -> MeasuredCell {
    MeasuredCell {
        photo: None,
        lines: vec![StyledLine {
            text: policy::FREE_LABEL.to_string(),
            face: FontFace::Bold,
            size: policy::FREE_LABEL_FONT_SIZE,
        }],
        text_height: layout::text_block_height(1, policy::FREE_LABEL_FONT_SIZE),
    }
}

fn species_cell(
    species: &Species,
    photo: Option<SquarePhoto>,
    layout_spec: &CellLayout,
    text_width_budget: f64,
    options: &RenderOptions,
) -> MeasuredCell {
    let mut lines = Vec::new();

    if options.show_common_names && !species.common_name.is_empty() {
        for text in
            layout::wrap_text(&species.common_name, layout_spec.text_size, text_width_budget)
        {
            lines.push(StyledLine {
                text,
                face: FontFace::Regular,
                size: layout_spec.text_size,
            });
        }
    }

    if options.show_scientific_names && !species.scientific_name.is_empty() {
        // Oblique sets the scientific name apart when both names show.
        let face = if options.show_common_names {
            FontFace::Oblique
        } else {
            FontFace::Regular
        };
        for text in layout::wrap_text(
            &species.scientific_name,
            layout_spec.text_size,
            text_width_budget,
        ) {
            lines.push(StyledLine {
                text,
                face,
                size: layout_spec.text_size,
            });
        }
    }

    let text_height = lines
        .iter()
        .map(|line| line.size * LEADING)
        .sum::<f64>();

    MeasuredCell {
        photo,
        lines,
        text_height,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::generator::CardGenerator;
    use async_trait::async_trait;

    struct NoPhotos;

    #[async_trait]
    impl PhotoFetcher for NoPhotos {
        async fn fetch(&self, _url: &str) -> Result<Vec<u8>> {
            Err(BingoError::UpstreamError {
                message: "offline".to_string(),
            })
        }
    }

    fn pool(n: usize) -> Vec<Species> {
        (0..n as u64)
            .map(|id| Species {
                taxon_id: id,
                common_name: format!("Common Name {}", id),
                scientific_name: format!("Binomial species{}", id),
                image_url: format!("https://static.example/{}/square.jpg", id),
            })
            .collect()
    }

    fn options() -> RenderOptions {
        RenderOptions {
            show_photos: true,
            show_common_names: true,
            show_scientific_names: true,
            title: "Bingo: Field Trip Edition".to_string(),
        }
    }

    #[tokio::test]
    async fn test_one_page_per_card() {
        let generator = CardGenerator::new(pool(25));
        let cards = generator.generate_cards(3, 5, true, Some(9)).unwrap();

        let renderer = PdfRenderer::new(NoPhotos);
        let bytes = renderer.render_cards(&cards, &options()).await.unwrap();

        assert!(bytes.starts_with(b"%PDF"));
        let doc = Document::load_mem(&bytes).unwrap();
        assert_eq!(doc.get_pages().len(), 3);
    }

    #[tokio::test]
    async fn test_photo_failure_degrades_to_text() {
        // Every photo fetch fails; the render must still succeed.
        let generator = CardGenerator::new(pool(9));
        let cards = generator.generate_cards(1, 3, false, Some(1)).unwrap();

        let renderer = PdfRenderer::new(NoPhotos);
        let bytes = renderer.render_cards(&cards, &options()).await.unwrap();
        assert!(Document::load_mem(&bytes).is_ok());
    }

    #[tokio::test]
    async fn test_text_only_render() {
        let generator = CardGenerator::new(pool(16));
        let cards = generator.generate_cards(2, 4, false, Some(3)).unwrap();

        let renderer = PdfRenderer::new(NoPhotos);
        let opts = RenderOptions {
            show_photos: false,
            show_common_names: true,
            show_scientific_names: false,
            title: "Names Only".to_string(),
        };
        let bytes = renderer.render_cards(&cards, &opts).await.unwrap();
        let doc = Document::load_mem(&bytes).unwrap();
        assert_eq!(doc.get_pages().len(), 2);
    }
}
