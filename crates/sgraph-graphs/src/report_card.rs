//! PNG report card with a colour-coded target achievement bar.

use crate::aggregator::PerformanceSummary;
use crate::traits::GraphRenderer;
use crate::utils::{GraphUtils, RenderStyle};
use async_trait::async_trait;
use image::codecs::png::PngEncoder;
use image::{ColorType, ImageEncoder};
use plotters::coord::Shift;
use plotters::prelude::*;
use sgraph_common::{format_money, format_percent, AchievementThresholds, Result, SGraphError};
use tracing::debug;

const WIDTH: u32 = 800;
const HEIGHT: u32 = 420;
const BAR_LEFT: i32 = 40;
const BAR_RIGHT: i32 = 760;
const BAR_TOP: i32 = 330;
const BAR_BOTTOM: i32 = 370;

/// Configuration of the report card.
#[derive(Debug, Clone, Default)]
pub struct ReportCardConfig {
    /// Shared presentation settings.
    pub style: RenderStyle,
    /// Thresholds drawn as markers on the achievement bar.
    pub thresholds: AchievementThresholds,
}

/// Renders a [`PerformanceSummary`] as a PNG card.
pub struct ReportCardRenderer;

fn draw_error(e: impl std::fmt::Display) -> SGraphError {
    SGraphError::render(format!("drawing report card failed: {e}"))
}

fn bar_x(pct: f64) -> i32 {
    let span = f64::from(BAR_RIGHT - BAR_LEFT);
    BAR_LEFT + (GraphUtils::bar_fraction(pct) * span).round() as i32
}

fn card_lines(summary: &PerformanceSummary, symbol: &str) -> Vec<String> {
    vec![
        format!("Records: {}", summary.record_count),
        format!("Total sales: {}", format_money(summary.total_sales, symbol)),
        format!(
            "Total expenses: {}",
            format_money(summary.total_expenses, symbol)
        ),
        format!(
            "{}: {}",
            summary.profit_status,
            format_money(summary.profit, symbol)
        ),
        format!("Target: {}", format_money(summary.target, symbol)),
        format!(
            "Target achievement: {} ({})",
            format_percent(summary.target_achievement_pct),
            summary.band
        ),
    ]
}

type Card<'a> = DrawingArea<BitMapBackend<'a>, Shift>;

fn draw_text(root: &Card<'_>, summary: &PerformanceSummary, symbol: &str) -> Result<()> {
    root.draw(&Text::new(
        format!("Performance: {}", summary.scope),
        (BAR_LEFT, 20),
        ("sans-serif", 26).into_font().color(&BLACK),
    ))
    .map_err(draw_error)?;

    for (i, line) in card_lines(summary, symbol).into_iter().enumerate() {
        let y = 70 + 36 * i as i32;
        root.draw(&Text::new(
            line,
            (BAR_LEFT, y),
            ("sans-serif", 20).into_font().color(&BLACK),
        ))
        .map_err(draw_error)?;
    }
    Ok(())
}

/// Grey track, band-coloured fill up to the achievement and threshold markers.
fn draw_bar(
    root: &Card<'_>,
    summary: &PerformanceSummary,
    thresholds: AchievementThresholds,
) -> Result<()> {
    root.draw(&Rectangle::new(
        [(BAR_LEFT, BAR_TOP), (BAR_RIGHT, BAR_BOTTOM)],
        RGBColor(230, 230, 230).filled(),
    ))
    .map_err(draw_error)?;

    let fill_right = bar_x(summary.target_achievement_pct);
    if fill_right > BAR_LEFT {
        root.draw(&Rectangle::new(
            [(BAR_LEFT, BAR_TOP), (fill_right, BAR_BOTTOM)],
            GraphUtils::band_rgb(summary.band).filled(),
        ))
        .map_err(draw_error)?;
    }

    for marker in [thresholds.low, thresholds.medium, thresholds.high] {
        let x = bar_x(marker);
        root.draw(&PathElement::new(
            vec![(x, BAR_TOP - 6), (x, BAR_BOTTOM + 6)],
            BLACK.stroke_width(2),
        ))
        .map_err(draw_error)?;
    }
    Ok(())
}

fn encode_png(buffer: &[u8]) -> Result<Vec<u8>> {
    let mut png = Vec::new();
    PngEncoder::new(&mut png)
        .write_image(buffer, WIDTH, HEIGHT, ColorType::Rgb8)
        .map_err(|e| SGraphError::render_with_source("encoding report card failed", e))?;
    debug!(bytes = png.len(), "report card encoded");
    Ok(png)
}

fn draw_card(summary: &PerformanceSummary, config: &ReportCardConfig) -> Result<Vec<u8>> {
    let mut buffer = vec![0u8; (WIDTH * HEIGHT * 3) as usize];
    {
        let root = BitMapBackend::with_buffer(&mut buffer, (WIDTH, HEIGHT)).into_drawing_area();
        root.fill(&WHITE).map_err(draw_error)?;
        draw_text(&root, summary, &config.style.currency_symbol)?;
        draw_bar(&root, summary, config.thresholds)?;
        root.present().map_err(draw_error)?;
    }
    encode_png(&buffer)
}

#[async_trait]
impl GraphRenderer for ReportCardRenderer {
    type Data = PerformanceSummary;
    type Config = ReportCardConfig;

    async fn render(&self, data: Self::Data, config: Self::Config) -> Result<Vec<u8>> {
        tokio::task::spawn_blocking(move || draw_card(&data, &config))
            .await
            .map_err(|e| SGraphError::render_with_source("report card task failed", e))?
    }

    fn name(&self) -> &'static str {
        "png"
    }

    fn description(&self) -> &'static str {
        "PNG report card with a colour-coded target achievement bar"
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::aggregator::summarize;
    use sgraph_common::test_utils::record_fixtures::single_record;
    use sgraph_common::{AchievementBand, Scope};

    #[test]
    fn test_bar_positions() {
        assert_eq!(bar_x(0.0), BAR_LEFT);
        assert_eq!(bar_x(150.0), BAR_RIGHT);
        assert_eq!(bar_x(1000.0), BAR_RIGHT);
        assert_eq!(bar_x(75.0), (BAR_LEFT + BAR_RIGHT) / 2);
    }

    #[test]
    fn test_card_lines() {
        let summary = summarize(&[single_record()], &Scope::employee("A"));
        let lines = card_lines(&summary, "₹");
        assert_eq!(lines[3], "Profit: ₹750.00");
        assert_eq!(lines[5], "Target achievement: 125.00% (High)");
    }

    #[test]
    fn test_bar_is_filled_in_band_colour() {
        let summary = summarize(&[single_record()], &Scope::employee("A"));
        let thresholds = AchievementThresholds::default();

        let mut buffer = vec![0u8; (WIDTH * HEIGHT * 3) as usize];
        {
            let root =
                BitMapBackend::with_buffer(&mut buffer, (WIDTH, HEIGHT)).into_drawing_area();
            root.fill(&WHITE).unwrap();
            draw_bar(&root, &summary, thresholds).unwrap();
            root.present().unwrap();
        }
        let png = encode_png(&buffer).unwrap();
        let card = image::load_from_memory(&png).unwrap().to_rgb8();
        assert_eq!(card.dimensions(), (WIDTH, HEIGHT));

        let mid_bar = (BAR_TOP + BAR_BOTTOM) as u32 / 2;
        let RGBColor(r, g, b) = GraphUtils::band_rgb(AchievementBand::High);
        // 125% fills up to bar_x(125); 110% sits between the high marker and the fill end
        let filled = bar_x(110.0) as u32;
        assert_eq!(card.get_pixel(filled, mid_bar).0, [r, g, b]);
        let track = (bar_x(125.0) + BAR_RIGHT) as u32 / 2;
        assert_eq!(card.get_pixel(track, mid_bar).0, [230, 230, 230]);

        let marker = bar_x(thresholds.high) as u32;
        let above = (BAR_TOP - 3) as u32;
        assert!((marker - 1..=marker + 1).any(|x| card.get_pixel(x, above).0 == [0, 0, 0]));
        assert_eq!(card.get_pixel(marker + 20, above).0, [255, 255, 255]);
    }

    #[tokio::test]
    async fn test_render_produces_png_or_font_error() {
        let summary = summarize(&[single_record()], &Scope::employee("A"));
        match ReportCardRenderer
            .render(summary, ReportCardConfig::default())
            .await
        {
            Ok(bytes) => {
                assert_eq!(&bytes[..8], b"\x89PNG\r\n\x1a\n");
                let decoded = image::load_from_memory(&bytes).unwrap().to_rgb8();
                assert_eq!(decoded.dimensions(), (WIDTH, HEIGHT));
            }
            // Hosts without a system sans-serif font cannot lay out text.
            Err(SGraphError::Render { .. }) => {}
            Err(other) => panic!("unexpected error: {other}"),
        }
    }
}
