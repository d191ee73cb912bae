//! Chart rendering
//!
//! Draws a [`ChartModel`] with plotters. The output path's extension picks the
//! backend: `.svg` writes an SVG document, anything else a bitmap image.
//! Sizes are given in typographic points and scaled by the output DPI.

use crate::chart::{ChartModel, SeriesColor, REFERENCE_LABEL};
use crate::config::{ChartStyle, LegendPosition, OutputConfig};
use crate::types::{format_value, ReportError, Result};
use plotters::coord::ranged1d::Ranged;
use plotters::coord::Shift;
use plotters::drawing::DrawingAreaErrorKind;
use plotters::prelude::*;
use plotters::series::DashedLineSeries;
use plotters::style::text_anchor::{HPos, Pos, VPos};
use plotters::style::{FontDesc, FontFamily, FontStyle};

const TITLE_PT: f64 = 12.0;
const AXIS_DESC_PT: f64 = 10.0;
const TICK_LABEL_PT: f64 = 10.0;
const LEGEND_PT: f64 = 10.0;
const ANNOTATION_PT: f64 = 9.0;
const REFERENCE_TEXT_PT: f64 = 8.0;

const LINE_WIDTH_PT: f64 = 2.0;
const REFERENCE_WIDTH_PT: f64 = 1.5;
const MARKER_RADIUS_PT: f64 = 3.0;
const ANNOTATION_OFFSET_PT: f64 = 5.0;
const LEGEND_SAMPLE_PT: f64 = 20.0;

const MARGIN_PT: f64 = 10.0;
const X_LABEL_AREA_PT: f64 = 32.0;
const Y_LABEL_AREA_PT: f64 = 48.0;

const DASH_PT: f64 = 4.0;
const DASH_GAP_PT: f64 = 2.0;

/// Approximate number of ticks (and grid lines) per axis
const TICKS_PER_AXIS: usize = 10;

const REFERENCE_ALPHA: f64 = 0.5;
const GRID_ALPHA: f64 = 0.2;

/// Render the chart to `output.path`
pub fn render_chart(model: &ChartModel, style: &ChartStyle, output: &OutputConfig) -> Result<()> {
    let size = output.pixel_size();
    log::debug!(
        "Rendering {} series to {:?} ({}x{} px)",
        model.series().len(),
        output.path,
        size.0,
        size.1
    );

    if output.is_svg() {
        let root = SVGBackend::new(&output.path, size).into_drawing_area();
        draw_chart(root, model, style, output).map_err(|e| ReportError::Render(e.to_string()))
    } else {
        let root = BitMapBackend::new(&output.path, size).into_drawing_area();
        draw_chart(root, model, style, output).map_err(|e| ReportError::Render(e.to_string()))
    }
}

fn draw_chart<DB>(
    root: DrawingArea<DB, Shift>,
    model: &ChartModel,
    style: &ChartStyle,
    output: &OutputConfig,
) -> std::result::Result<(), DrawingAreaErrorKind<DB::ErrorType>>
where
    DB: DrawingBackend,
{
    let px = |pt: f64| output.pt_to_px(pt);
    let px_u32 = |pt: f64| px(pt).round().max(1.0) as u32;
    let font = |pt: f64, weight: FontStyle| FontDesc::new(FontFamily::SansSerif, px(pt), weight);

    root.fill(&WHITE)?;

    let x_range = model.x_range();
    let y_range = model.y_range();

    let mut chart = ChartBuilder::on(&root)
        .caption(&style.title, font(TITLE_PT, FontStyle::Normal))
        .margin(px_u32(MARGIN_PT))
        .x_label_area_size(px_u32(X_LABEL_AREA_PT))
        .y_label_area_size(px_u32(Y_LABEL_AREA_PT))
        .build_cartesian_2d(x_range.clone(), y_range.clone())?;

    chart
        .configure_mesh()
        .disable_mesh()
        .x_labels(TICKS_PER_AXIS)
        .y_labels(TICKS_PER_AXIS)
        .x_label_formatter(&|v| format_tick(*v))
        .y_label_formatter(&|v| format_tick(*v))
        .x_desc(style.x_label.as_str())
        .y_desc(style.y_label.as_str())
        .label_style(font(TICK_LABEL_PT, FontStyle::Normal))
        .axis_desc_style(font(AXIS_DESC_PT, FontStyle::Normal))
        .draw()?;

    let dash = px_u32(DASH_PT) as i32;
    let gap = px_u32(DASH_GAP_PT) as i32;

    // Dashed grid at the same key points the mesh labels use
    let (x_ticks, y_ticks) = {
        let coord = chart.as_coord_spec();
        (
            coord.x_spec().key_points(TICKS_PER_AXIS),
            coord.y_spec().key_points(TICKS_PER_AXIS),
        )
    };
    let grid_style = BLACK.mix(GRID_ALPHA).stroke_width(1);
    for x in x_ticks {
        chart.draw_series(DashedLineSeries::new(
            vec![(x, y_range.start), (x, y_range.end)],
            dash,
            gap,
            grid_style,
        ))?;
    }
    for y in y_ticks {
        chart.draw_series(DashedLineSeries::new(
            vec![(x_range.start, y), (x_range.end, y)],
            dash,
            gap,
            grid_style,
        ))?;
    }

    let legend_len = px_u32(LEGEND_SAMPLE_PT) as i32;
    let line_width = px_u32(LINE_WIDTH_PT);
    let marker_radius = px_u32(MARKER_RADIUS_PT);
    let offset = px(ANNOTATION_OFFSET_PT).round() as i32;

    for series in model.series() {
        let color = rgb(series.color);
        let line_style = color.stroke_width(line_width);

        chart
            .draw_series(LineSeries::new(
                series.points.iter().map(|p| p.as_xy()),
                line_style,
            ))?
            .label(series.label.as_str())
            .legend(move |(x, y)| PathElement::new(vec![(x, y), (x + legend_len, y)], line_style));

        let end = series.endpoint.as_xy();
        let text_style = font(ANNOTATION_PT, FontStyle::Bold)
            .color(&color)
            .pos(Pos::new(HPos::Left, VPos::Center));
        chart.draw_series(std::iter::once(
            EmptyElement::at(end) + Text::new(series.annotation(), (offset, 0), text_style),
        ))?;
        chart.draw_series(std::iter::once(Circle::new(end, marker_radius, color.filled())))?;
    }

    if let (Some(height), Some(text)) = (model.reference_line(), model.reference_text()) {
        let ref_style = RED.mix(REFERENCE_ALPHA).stroke_width(px_u32(REFERENCE_WIDTH_PT));
        chart
            .draw_series(DashedLineSeries::new(
                vec![(x_range.start, height), (x_range.end, height)],
                dash * 2,
                gap * 2,
                ref_style,
            ))?
            .label(REFERENCE_LABEL)
            .legend(move |(x, y)| PathElement::new(vec![(x, y), (x + legend_len, y)], ref_style));

        let text_style = font(REFERENCE_TEXT_PT, FontStyle::Normal)
            .color(&RED)
            .pos(Pos::new(HPos::Left, VPos::Bottom));
        chart.draw_series(std::iter::once(Text::new(
            text,
            (x_range.start, height * 1.01),
            text_style,
        )))?;
    }

    if !model.is_empty() || model.reference_line().is_some() {
        chart
            .configure_series_labels()
            .position(legend_position(style.legend))
            .background_style(&WHITE.mix(0.8))
            .border_style(&BLACK.mix(0.3))
            .label_font(font(LEGEND_PT, FontStyle::Normal))
            .draw()?;
    }

    root.present()?;
    Ok(())
}

fn rgb(color: SeriesColor) -> RGBColor {
    RGBColor(color.0, color.1, color.2)
}

fn legend_position(position: LegendPosition) -> SeriesLabelPosition {
    match position {
        LegendPosition::UpperLeft => SeriesLabelPosition::UpperLeft,
        LegendPosition::UpperRight => SeriesLabelPosition::UpperRight,
        LegendPosition::LowerLeft => SeriesLabelPosition::LowerLeft,
        LegendPosition::LowerRight => SeriesLabelPosition::LowerRight,
    }
}

/// Tick label text: integers without decimals, others with up to two
fn format_tick(value: f64) -> String {
    if value.fract() == 0.0 {
        return format_value(value);
    }
    let text = format!("{:.2}", value);
    text.trim_end_matches('0').trim_end_matches('.').to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_format_tick() {
        assert_eq!(format_tick(100.0), "100");
        assert_eq!(format_tick(-0.0), "0");
        assert_eq!(format_tick(0.5), "0.5");
        assert_eq!(format_tick(0.126), "0.13");
        assert_eq!(format_tick(2.999), "3");
    }

    #[test]
    fn test_legend_position_mapping() {
        assert!(matches!(
            legend_position(LegendPosition::LowerRight),
            SeriesLabelPosition::LowerRight
        ));
        assert!(matches!(
            legend_position(LegendPosition::UpperLeft),
            SeriesLabelPosition::UpperLeft
        ));
    }

    #[test]
    fn test_rgb_conversion() {
        let color = rgb(SeriesColor(1, 2, 3));
        assert_eq!((color.0, color.1, color.2), (1, 2, 3));
    }
}
