use std::sync::Arc;

use anyhow::{bail, Context, Result};
use quill_shape::{itemize_scripts, HbLibrary, ShapeOptions, Shaper};

fn main() -> Result<()> {
    env_logger::init();

    let mut font_path = None;
    let mut text = None;
    let mut options = ShapeOptions::default();

    for arg in std::env::args().skip(1) {
        if let Some(value) = arg.strip_prefix("--font=") {
            font_path = Some(value.to_string());
        } else if let Some(value) = arg.strip_prefix("--features=") {
            options.features = Some(value.to_string());
        } else if let Some(value) = arg.strip_prefix("--variations=") {
            options.variations = Some(value.to_string());
        } else if let Some(value) = arg.strip_prefix("--language=") {
            options.language = Some(value.to_string());
        } else if let Some(value) = arg.strip_prefix("--ppem=") {
            options.ppem = value.parse().context("invalid --ppem")?;
        } else {
            text = Some(arg);
        }
    }

    let (Some(font_path), Some(text)) = (font_path, text) else {
        bail!(
            "usage: shape-demo --font=FONT.ttf [--ppem=N] [--features=kern,liga] \
             [--variations=wght=700] [--language=en] TEXT"
        );
    };

    let lib = Arc::new(HbLibrary::load_default()?);
    let mut shaper = Shaper::from_path(Arc::clone(&lib), &font_path, 0)
        .with_context(|| format!("loading {}", font_path))?;

    for run in itemize_scripts(&lib, &text) {
        let chunk = &text[run.range.clone()];
        log::debug!("shaping run {:?} at {:?}", run.script, run.range);
        let glyphs = shaper.shape(chunk, &options)?;

        println!("{:?} {:?}", run.script, chunk);
        println!(
            "{:>6} {:>8} {:>8} {:>8} {:>8} {:>8}  text",
            "id", "cluster", "x_adv", "y_adv", "x_off", "y_off"
        );
        let mut advance: i64 = 0;
        for glyph in &glyphs {
            println!(
                "{:>6} {:>8} {:>8} {:>8} {:>8} {:>8}  {:?}",
                glyph.id,
                glyph.cluster,
                glyph.x_advance,
                glyph.y_advance,
                glyph.x_offset,
                glyph.y_offset,
                &chunk[glyph.text.clone()],
            );
            advance += glyph.x_advance as i64;
        }
        println!("total x advance: {}", advance);
    }

    Ok(())
}
