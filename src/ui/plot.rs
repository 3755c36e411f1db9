use eframe::egui::{Align2, RichText, Stroke, Ui};
use egui_plot::{
    Bar, BarChart, Corner, Legend, LineStyle, MarkerShape, Plot, PlotPoint, PlotPoints, Points,
    Text, VLine,
};

use crate::chart::{HistogramChart, ScatterChart};
use crate::color::overlay_fill;

/// Alpha of the overlaid histogram bars.
const BAR_ALPHA: u8 = 110;

// ---------------------------------------------------------------------------
// Captions
// ---------------------------------------------------------------------------

/// Caption above a chart.
fn caption(ui: &mut Ui, text: &str) {
    ui.label(RichText::new(text).strong());
}

// ---------------------------------------------------------------------------
// Scatter
// ---------------------------------------------------------------------------

/// Draw a scatter chart. Points of one series share a legend entry; series
/// with per-point sizes are drawn one marker per item under the same name.
pub fn scatter(ui: &mut Ui, chart: &ScatterChart, height: f32) {
    caption(ui, chart.caption);
    Plot::new(chart.id)
        .legend(Legend::default().position(Corner::LeftTop))
        .height(height)
        .allow_boxed_zoom(true)
        .allow_drag(true)
        .allow_scroll(false)
        .allow_zoom(true)
        .x_axis_label(chart.x_label)
        .y_axis_label(chart.y_label)
        .show(ui, |plot_ui| {
            for series in &chart.series {
                let uniform = series
                    .points
                    .windows(2)
                    .all(|w| w[0].radius == w[1].radius);

                if uniform {
                    let radius = series.points.first().map_or(3.0, |p| p.radius);
                    let pts: PlotPoints = series.points.iter().map(|p| [p.x, p.y]).collect();
                    plot_ui.points(
                        Points::new(pts)
                            .name(series.name)
                            .color(series.color)
                            .shape(MarkerShape::Circle)
                            .filled(true)
                            .radius(radius),
                    );
                } else {
                    for p in &series.points {
                        plot_ui.points(
                            Points::new(PlotPoints::new(vec![[p.x, p.y]]))
                                .name(series.name)
                                .color(series.color)
                                .shape(MarkerShape::Circle)
                                .filled(true)
                                .radius(p.radius),
                        );
                    }
                }
            }
        });
}

// ---------------------------------------------------------------------------
// Histogram
// ---------------------------------------------------------------------------

/// Draw the overlaid histogram with its reference line.
pub fn histogram(ui: &mut Ui, chart: &HistogramChart, height: f32) {
    caption(ui, chart.caption);
    let peak = chart
        .series
        .iter()
        .flat_map(|s| s.counts.iter().copied())
        .max()
        .unwrap_or(0);

    Plot::new(chart.id)
        .legend(Legend::default().position(Corner::LeftTop))
        .height(height)
        .allow_boxed_zoom(true)
        .allow_drag(true)
        .allow_scroll(false)
        .allow_zoom(true)
        .x_axis_label(chart.x_label)
        .y_axis_label("Count")
        .show(ui, |plot_ui| {
            let bins = chart.bin_count();
            for series in &chart.series {
                let bars: Vec<Bar> = series
                    .counts
                    .iter()
                    .take(bins)
                    .enumerate()
                    .filter(|(_, n)| **n > 0)
                    .map(|(i, n)| {
                        Bar::new(chart.bin_center(i), *n as f64)
                            .width(chart.bin_width)
                            .fill(overlay_fill(series.color, BAR_ALPHA))
                            .stroke(Stroke::new(1.0, series.color))
                    })
                    .collect();
                plot_ui.bar_chart(BarChart::new(bars).name(series.name).color(series.color));
            }

            let reference = &chart.reference;
            plot_ui.vline(
                VLine::new(reference.x)
                    .name(reference.label)
                    .style(LineStyle::dotted_dense()),
            );
            plot_ui.text(
                Text::new(
                    PlotPoint::new(reference.x, peak.max(1) as f64),
                    RichText::new(reference.label).italics(),
                )
                .anchor(Align2::LEFT_TOP),
            );
        });
}
