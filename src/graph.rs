use plotters::coord::Shift;
use plotters::prelude::*;
use std::ops::Range;

use crate::chart::{
    CategoryCount, ChartDescriptor, PriceGroup, QuantitySlice, ScatterPoint, Series,
};
use crate::error::{DashboardError, Result};

type DrawResult = std::result::Result<(), Box<dyn std::error::Error>>;

/// Output size of a rendered chart
#[derive(Clone, Debug)]
pub struct ChartOptions {
    /// Width of the image in pixels
    pub width: u32,

    /// Height of the image in pixels
    pub height: u32,
}

impl Default for ChartOptions {
    fn default() -> Self {
        Self {
            width: 800,
            height: 500,
        }
    }
}

/// Draws a chart descriptor as an SVG document
///
/// # Arguments
/// * `chart` - Descriptor produced by the pipeline
/// * `options` - Image dimensions
///
/// # Returns
/// * A Result containing the SVG markup or `DashboardError::Render`
///
/// # Examples
/// ```
/// use medicine_dashboard::{Dataset, FilterCriteria, MedicineRecord, render};
/// use medicine_dashboard::chart::ChartKind;
/// use medicine_dashboard::graph::{ChartOptions, render_svg};
///
/// let data = Dataset::from_records(vec![MedicineRecord::new("A", 10.0, 5.0, 2, "Pain")]);
/// let result = render(&data, &FilterCriteria::new("category_dist", "All", 0.0, 100.0));
/// let chart = result.visible_chart(ChartKind::CategoryDist).unwrap();
/// let svg = render_svg(chart, &ChartOptions::default()).unwrap();
/// assert!(svg.contains("<svg"));
/// ```
pub fn render_svg(chart: &ChartDescriptor, options: &ChartOptions) -> Result<String> {
    let mut svg = String::new();
    {
        let root =
            SVGBackend::with_string(&mut svg, (options.width, options.height)).into_drawing_area();
        draw_chart(&root, chart).map_err(|e| DashboardError::Render(e.to_string()))?;
    }
    Ok(svg)
}

fn draw_chart(root: &DrawingArea<SVGBackend<'_>, Shift>, chart: &ChartDescriptor) -> DrawResult {
    root.fill(&WHITE)?;

    match &chart.series {
        Series::Bar { bars } => draw_bars(root, chart, bars)?,
        Series::Box { groups } => draw_boxes(root, chart, groups)?,
        Series::Scatter { points } => draw_scatter(root, chart, points)?,
        Series::Pie { slices } => draw_pie(root, chart, slices)?,
    }

    root.present()?;
    Ok(())
}

/// Colour assigned to the n-th category
fn category_color(index: usize) -> RGBAColor {
    Palette99::pick(index).to_rgba()
}

/// Axis range around [min, max] with 5% headroom on both sides
fn padded(min: f64, max: f64) -> Range<f64> {
    let span = max - min;
    if span.abs() < f64::EPSILON {
        return (min - 1.0)..(max + 1.0);
    }
    (min - span * 0.05)..(max + span * 0.05)
}

/// Label for an integer slot position on a category axis
fn slot_label(names: &[String], x: f64) -> String {
    let slot = x.round();
    if (x - slot).abs() > 1e-6 || slot < 0.0 {
        return String::new();
    }
    names.get(slot as usize).cloned().unwrap_or_default()
}

fn draw_bars(
    root: &DrawingArea<SVGBackend<'_>, Shift>,
    chart: &ChartDescriptor,
    bars: &[CategoryCount],
) -> DrawResult {
    let names: Vec<String> = bars.iter().map(|b| b.category.clone()).collect();
    let max_count = bars.iter().map(|b| b.count).max().unwrap_or(1) as f64;
    let slots = bars.len() as f64;

    let mut plot = ChartBuilder::on(root)
        .caption(&chart.title, ("sans-serif", 24).into_font())
        .margin(10)
        .x_label_area_size(40)
        .y_label_area_size(50)
        .build_cartesian_2d(-0.5..slots - 0.5, 0.0..max_count * 1.1)?;

    plot.configure_mesh()
        .disable_x_mesh()
        .x_labels(bars.len())
        .x_label_formatter(&|x| slot_label(&names, *x))
        .x_desc(&chart.x_label)
        .y_desc(&chart.y_label)
        .draw()?;

    for (i, bar) in bars.iter().enumerate() {
        let x = i as f64;
        let corners = [(x - 0.4, 0.0), (x + 0.4, bar.count as f64)];
        plot.draw_series(std::iter::once(Rectangle::new(
            corners,
            category_color(i).filled(),
        )))?
        .label(bar.category.as_str())
        .legend(move |(lx, ly)| {
            Rectangle::new([(lx, ly - 5), (lx + 10, ly + 5)], category_color(i).filled())
        });
        plot.draw_series(std::iter::once(Rectangle::new(
            corners,
            BLACK.stroke_width(1),
        )))?;
    }

    plot.configure_series_labels()
        .border_style(&BLACK)
        .background_style(&WHITE.mix(0.8))
        .draw()?;

    Ok(())
}

fn draw_boxes(
    root: &DrawingArea<SVGBackend<'_>, Shift>,
    chart: &ChartDescriptor,
    groups: &[PriceGroup],
) -> DrawResult {
    let names: Vec<String> = groups.iter().map(|g| g.category.clone()).collect();
    let low = groups
        .iter()
        .map(|g| g.summary.min)
        .fold(f64::INFINITY, f64::min);
    let high = groups
        .iter()
        .map(|g| g.summary.max)
        .fold(f64::NEG_INFINITY, f64::max);
    let slots = groups.len() as f64;

    let mut plot = ChartBuilder::on(root)
        .caption(&chart.title, ("sans-serif", 24).into_font())
        .margin(10)
        .x_label_area_size(40)
        .y_label_area_size(50)
        .build_cartesian_2d(-0.5..slots - 0.5, padded(low, high))?;

    plot.configure_mesh()
        .disable_x_mesh()
        .x_labels(groups.len())
        .x_label_formatter(&|x| slot_label(&names, *x))
        .x_desc(&chart.x_label)
        .y_desc(&chart.y_label)
        .draw()?;

    for (i, group) in groups.iter().enumerate() {
        let x = i as f64;
        let s = group.summary;
        let color = category_color(i);

        plot.draw_series(std::iter::once(Rectangle::new(
            [(x - 0.3, s.q1), (x + 0.3, s.q3)],
            color.mix(0.5).filled(),
        )))?;
        plot.draw_series(std::iter::once(Rectangle::new(
            [(x - 0.3, s.q1), (x + 0.3, s.q3)],
            BLACK.stroke_width(1),
        )))?;

        // median, whiskers and caps
        let lines = vec![
            vec![(x - 0.3, s.median), (x + 0.3, s.median)],
            vec![(x, s.min), (x, s.q1)],
            vec![(x, s.q3), (x, s.max)],
            vec![(x - 0.15, s.min), (x + 0.15, s.min)],
            vec![(x - 0.15, s.max), (x + 0.15, s.max)],
        ];
        plot.draw_series(
            lines
                .into_iter()
                .map(|points| PathElement::new(points, BLACK.stroke_width(2))),
        )?;
    }

    Ok(())
}

fn draw_scatter(
    root: &DrawingArea<SVGBackend<'_>, Shift>,
    chart: &ChartDescriptor,
    points: &[ScatterPoint],
) -> DrawResult {
    let dosage_min = points.iter().map(|p| p.dosage).fold(f64::INFINITY, f64::min);
    let dosage_max = points.iter().map(|p| p.dosage).fold(f64::NEG_INFINITY, f64::max);
    let price_min = points.iter().map(|p| p.price).fold(f64::INFINITY, f64::min);
    let price_max = points.iter().map(|p| p.price).fold(f64::NEG_INFINITY, f64::max);

    let mut plot = ChartBuilder::on(root)
        .caption(&chart.title, ("sans-serif", 24).into_font())
        .margin(10)
        .x_label_area_size(40)
        .y_label_area_size(50)
        .build_cartesian_2d(padded(dosage_min, dosage_max), padded(price_min, price_max))?;

    plot.configure_mesh()
        .x_desc(&chart.x_label)
        .y_desc(&chart.y_label)
        .draw()?;

    let mut categories: Vec<&str> = Vec::new();
    for point in points {
        if !categories.contains(&point.category.as_str()) {
            categories.push(point.category.as_str());
        }
    }

    for (i, category) in categories.iter().enumerate() {
        let color = category_color(i);
        plot.draw_series(
            points
                .iter()
                .filter(|p| p.category == *category)
                .map(|p| Circle::new((p.dosage, p.price), 5, color.mix(0.7).filled())),
        )?
        .label(*category)
        .legend(move |(lx, ly)| Circle::new((lx + 5, ly), 5, color.filled()));
    }

    plot.configure_series_labels()
        .border_style(&BLACK)
        .background_style(&WHITE.mix(0.8))
        .draw()?;

    Ok(())
}

fn draw_pie(
    root: &DrawingArea<SVGBackend<'_>, Shift>,
    chart: &ChartDescriptor,
    slices: &[QuantitySlice],
) -> DrawResult {
    let area = root.titled(&chart.title, ("sans-serif", 24).into_font())?;
    let (width, height) = area.dim_in_pixel();
    let center = (width as f64 / 2.0, height as f64 / 2.0);
    let radius = width.min(height) as f64 * 0.35;

    let mut start = -90.0_f64;
    for (i, slice) in slices.iter().enumerate() {
        let sweep = slice.share * 360.0;
        if sweep <= 0.0 {
            continue;
        }
        let mid = (start + sweep / 2.0).to_radians();

        // the two leading wedges are pulled out by a tenth of the radius
        let pull = if i < 2 && slices.len() > 1 { radius * 0.1 } else { 0.0 };
        let cx = center.0 + pull * mid.cos();
        let cy = center.1 + pull * mid.sin();

        let steps = sweep.ceil().max(1.0) as usize;
        let mut outline = vec![(cx as i32, cy as i32)];
        for step in 0..=steps {
            let angle = (start + sweep * step as f64 / steps as f64).to_radians();
            outline.push((
                (cx + radius * angle.cos()) as i32,
                (cy + radius * angle.sin()) as i32,
            ));
        }

        area.draw(&Polygon::new(outline.clone(), category_color(i).filled()))?;
        outline.push((cx as i32, cy as i32));
        area.draw(&PathElement::new(outline, BLACK.stroke_width(1)))?;

        let label_at = (
            (cx + radius * 1.15 * mid.cos()) as i32,
            (cy + radius * 1.15 * mid.sin()) as i32,
        );
        area.draw(&Text::new(
            format!("{} {:.1}%", slice.category, slice.share * 100.0),
            label_at,
            ("sans-serif", 14).into_font(),
        ))?;

        start += sweep;
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::chart::ChartKind;
    use crate::criteria::FilterCriteria;
    use crate::dataset::Dataset;
    use crate::medicine::MedicineRecord;
    use crate::pipeline::render;

    fn sample() -> Dataset {
        Dataset::from_records(vec![
            MedicineRecord::new("A", 10.0, 5.0, 2, "Pain"),
            MedicineRecord::new("B", 50.0, 10.0, 1, "Fever"),
            MedicineRecord::new("C", 30.0, 7.5, 6, "Pain"),
        ])
    }

    #[test]
    fn every_kind_renders_to_svg() {
        let result = render(&sample(), &FilterCriteria::new("all", "All", 0.0, 100.0));
        for kind in ChartKind::ALL {
            let chart = result.visible_chart(kind).unwrap();
            let svg = render_svg(chart, &ChartOptions::default()).unwrap();
            assert!(svg.contains("<svg"), "{kind:?} did not produce svg");
        }
    }

    #[test]
    fn single_row_charts_render() {
        let result = render(&sample(), &FilterCriteria::new("all", "Fever", 0.0, 100.0));
        for kind in ChartKind::ALL {
            let chart = result.visible_chart(kind).unwrap();
            assert!(render_svg(chart, &ChartOptions::default()).is_ok());
        }
    }

    #[test]
    fn slot_labels_only_on_integers() {
        let names = vec!["Pain".to_string(), "Fever".to_string()];
        assert_eq!(slot_label(&names, 1.0), "Fever");
        assert_eq!(slot_label(&names, 0.5), "");
        assert_eq!(slot_label(&names, 5.0), "");
    }
}
