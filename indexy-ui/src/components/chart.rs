//! Indexing Chart
//!
//! Draws the indexed / not-indexed doughnut on the page's `#indexingChart`
//! canvas, reading the counts from its data attributes.

use indexy::chart::{
    DoughnutSegment, IndexingSummary, CHART_ELEMENT_ID, CUTOUT_RATIO, DATA_INDEXED,
    DATA_NOT_INDEXED,
};
use leptos::document;
use wasm_bindgen::JsCast;
use web_sys::{CanvasRenderingContext2d, HtmlCanvasElement};

/// Draw the chart if the page has one
pub fn render_indexing_chart() {
    let Some(element) = document().get_element_by_id(CHART_ELEMENT_ID) else {
        return;
    };

    let summary = match IndexingSummary::from_attributes(
        element.get_attribute(DATA_INDEXED).as_deref(),
        element.get_attribute(DATA_NOT_INDEXED).as_deref(),
    ) {
        Ok(summary) => summary,
        Err(e) => {
            tracing::warn!("Skipping indexing chart: {}", e);
            return;
        }
    };

    let Ok(canvas) = element.dyn_into::<HtmlCanvasElement>() else {
        tracing::warn!("#{} is not a canvas", CHART_ELEMENT_ID);
        return;
    };

    draw_doughnut(&canvas, &summary);
}

/// Centre and outer radius for a canvas, leaving room for the legend
fn layout(width: f64, height: f64) -> (f64, f64, f64) {
    let legend_height = 40.0;
    let chart_height = (height - legend_height).max(0.0);
    let radius = (width.min(chart_height) / 2.0 - 10.0).max(0.0);
    (width / 2.0, chart_height / 2.0, radius)
}

fn draw_doughnut(canvas: &HtmlCanvasElement, summary: &IndexingSummary) {
    let ctx = match canvas.get_context("2d") {
        Ok(Some(ctx)) => match ctx.dyn_into::<CanvasRenderingContext2d>() {
            Ok(ctx) => ctx,
            Err(_) => return,
        },
        _ => return,
    };

    let width = canvas.width() as f64;
    let height = canvas.height() as f64;
    ctx.clear_rect(0.0, 0.0, width, height);

    let segments = summary.segments();
    if segments.is_empty() {
        ctx.set_fill_style(&"#6c757d".into());
        ctx.set_font("16px sans-serif");
        ctx.set_text_align("center");
        let _ = ctx.fill_text("No URLs checked yet", width / 2.0, height / 2.0);
        return;
    }

    let (cx, cy, radius) = layout(width, height);
    for segment in &segments {
        draw_segment(&ctx, segment, cx, cy, radius);
    }

    // Index rate in the hole
    ctx.set_fill_style(&"#212529".into());
    ctx.set_font("bold 20px sans-serif");
    ctx.set_text_align("center");
    let _ = ctx.fill_text(&format!("{:.1}%", summary.index_rate()), cx, cy + 7.0);

    draw_legend(&ctx, &segments, width, height);
}

fn draw_segment(ctx: &CanvasRenderingContext2d, segment: &DoughnutSegment, cx: f64, cy: f64, radius: f64) {
    if segment.value == 0 {
        return;
    }

    ctx.begin_path();
    let _ = ctx.arc(cx, cy, radius, segment.start_angle, segment.end_angle);
    let _ = ctx.arc_with_anticlockwise(
        cx,
        cy,
        radius * CUTOUT_RATIO,
        segment.end_angle,
        segment.start_angle,
        true,
    );
    ctx.close_path();
    ctx.set_fill_style(&segment.color.into());
    ctx.fill();
}

fn draw_legend(ctx: &CanvasRenderingContext2d, segments: &[DoughnutSegment], width: f64, height: f64) {
    ctx.set_font("12px sans-serif");
    ctx.set_text_align("left");

    let slot = width / segments.len() as f64;
    let y = height - 15.0;
    for (idx, segment) in segments.iter().enumerate() {
        let x = idx as f64 * slot + 10.0;
        ctx.set_fill_style(&segment.color.into());
        ctx.fill_rect(x, y - 9.0, 10.0, 10.0);
        ctx.set_fill_style(&"#212529".into());
        let _ = ctx.fill_text(&segment.legend(), x + 14.0, y);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_layout_fits_canvas() {
        let (cx, cy, radius) = layout(400.0, 340.0);
        assert_eq!(cx, 200.0);
        assert_eq!(cy, 150.0);
        assert_eq!(radius, 140.0);

        assert_eq!(layout(10.0, 10.0).2, 0.0);
    }
}
