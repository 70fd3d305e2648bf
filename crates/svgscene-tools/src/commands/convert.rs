use std::path::Path;

use anyhow::{Context, Result};
use svgscene::{Color, Document};
use svgscene_raster::PngCanvas;

/// Rasterize the SVG at `input` into a PNG at `output`
pub fn execute(input: &Path, output: &Path, background: Color) -> Result<()> {
    let doc = Document::parse_file(input)?;
    log::info!(
        "Loaded {} ({}x{}, {} top-level shapes)",
        input.display(),
        doc.width,
        doc.height,
        doc.shapes.len()
    );

    let mut canvas = PngCanvas::new(doc.width, doc.height, background);
    doc.render(&mut canvas);

    canvas
        .save(output)
        .with_context(|| format!("Failed to render {}", input.display()))?;
    log::info!("Wrote {}", output.display());

    Ok(())
}
