use std::fs;
use std::io::Cursor;
use std::path::Path;
use image::{DynamicImage, ImageBuffer, ImageFormat, Rgb};
use plotters::prelude::LineSeries;
use plotters::prelude::*;
use crate::drivers::analysis::Analysis;
use crate::drivers::error::ProbeError;
#[derive(Clone, Debug)]
pub struct PlotStyle {
    pub width: u32,
    pub height: u32,
    pub background: RGBColor,
    pub raw_color: RGBColor,
    pub fit_color: RGBColor,
}
impl Default for PlotStyle {
    fn default() -> Self {
        Self {
            width: 900,
            height: 500,
            background: WHITE,
            raw_color: BLUE,
            fit_color: RED,
        }
    }
}
/// Axis ranges covering both series, padded so flat data still gets a visible band.
pub fn plot_bounds(analysis: &Analysis) -> ((f64, f64), (f64, f64)) {
    let x_max = analysis.data.duration_seconds();
    let x_bounds = if x_max > 0.0 { (0.0, x_max) } else { (-0.5, 0.5) };
    let (y_min, y_max) = analysis
        .data
        .temperatures_k
        .iter()
        .chain(analysis.fitted_k.iter())
        .fold((f64::INFINITY, f64::NEG_INFINITY), |(lo, hi), &v| {
            (lo.min(v), hi.max(v))
        });
    let y_bounds = if !y_min.is_finite() || !y_max.is_finite() {
        (0.0, 1.0)
    } else if (y_max - y_min).abs() < 1e-9 {
        (y_min - 0.5, y_max + 0.5)
    } else {
        let pad = (y_max - y_min) * 0.05;
        (y_min - pad, y_max + pad)
    };
    (x_bounds, y_bounds)
}
pub fn render_fit_png(
    analysis: &Analysis,
    title: &str,
    style: &PlotStyle,
) -> Result<Vec<u8>, ProbeError> {
    if analysis.data.is_empty() {
        return Err(ProbeError::Plot("analysis has no samples".into()));
    }
    let (x_bounds, y_bounds) = plot_bounds(analysis);
    let mut buffer = vec![0u8; (style.width * style.height * 3) as usize];
    {
        let root = BitMapBackend::with_buffer(&mut buffer, (style.width, style.height))
            .into_drawing_area();
        root.fill(&style.background)?;
        let mut chart = ChartBuilder::on(&root)
            .margin(10)
            .caption(title, ("sans-serif", 20).into_font())
            .set_label_area_size(LabelAreaPosition::Left, 60)
            .set_label_area_size(LabelAreaPosition::Bottom, 40)
            .build_cartesian_2d(x_bounds.0..x_bounds.1, y_bounds.0..y_bounds.1)?;
        chart
            .configure_mesh()
            .x_desc("t [s]")
            .y_desc("T [K]")
            .light_line_style(&BLACK.mix(0.1))
            .draw()?;
        let raw_color = style.raw_color;
        let raw = analysis.raw_points();
        chart
            .draw_series(LineSeries::new(raw.iter().map(|p| (p[0], p[1])), &raw_color))?
            .label("rawdata")
            .legend(move |(x, y)| PathElement::new(vec![(x, y), (x + 20, y)], &raw_color));
        chart.draw_series(
            raw.iter()
                .map(|p| Circle::new((p[0], p[1]), 2, raw_color.filled())),
        )?;
        let fit_color = style.fit_color;
        chart
            .draw_series(LineSeries::new(
                analysis.fit_points().into_iter().map(|p| (p[0], p[1])),
                &fit_color,
            ))?
            .label(analysis.fit.label())
            .legend(move |(x, y)| PathElement::new(vec![(x, y), (x + 20, y)], &fit_color));
        chart
            .configure_series_labels()
            .position(SeriesLabelPosition::UpperRight)
            .border_style(&BLACK.mix(0.4))
            .background_style(&WHITE.mix(0.9))
            .draw()?;
        root.present()?;
    }
    encode_png(&buffer, style.width, style.height)
}
pub fn write_fit_png(
    analysis: &Analysis,
    title: &str,
    style: &PlotStyle,
    path: &Path,
) -> Result<(), ProbeError> {
    let png = render_fit_png(analysis, title, style)?;
    fs::write(path, png).map_err(|source| ProbeError::Output {
        path: path.to_path_buf(),
        source,
    })?;
    log::info!("wrote chart to {}", path.display());
    Ok(())
}
fn encode_png(buffer: &[u8], width: u32, height: u32) -> Result<Vec<u8>, ProbeError> {
    let image = ImageBuffer::<Rgb<u8>, _>::from_raw(width, height, buffer.to_vec())
        .ok_or_else(|| ProbeError::Plot("failed to allocate image buffer".into()))?;
    let mut output = Vec::new();
    let dynamic = DynamicImage::ImageRgb8(image);
    dynamic.write_to(&mut Cursor::new(&mut output), ImageFormat::Png)?;
    Ok(output)
}
#[cfg(test)]
mod tests {
    use super::*;
    use crate::drivers::buffer::SampleSeries;
    use crate::types::Sample;
    fn analysis_of(temps: &[f64]) -> Analysis {
        let series: SampleSeries = temps
            .iter()
            .enumerate()
            .map(|(i, &temperature_k)| Sample {
                elapsed_s: i as f64,
                temperature_k,
            })
            .collect();
        Analysis::run(series, 1).unwrap()
    }
    #[test]
    fn bounds_cover_data_with_padding() {
        let analysis = analysis_of(&[0.0, 300.0, 302.0, 304.0]);
        let ((x0, x1), (y0, y1)) = plot_bounds(&analysis);
        assert_eq!((x0, x1), (0.0, 2.0));
        assert!(y0 < 300.0 && y1 > 304.0);
    }
    #[test]
    fn flat_series_still_gets_a_band() {
        let analysis = analysis_of(&[0.0, 295.0, 295.0, 295.0]);
        let (_, (y0, y1)) = plot_bounds(&analysis);
        assert!(y1 - y0 >= 1.0 - 1e-9);
    }
    #[test]
    fn encoder_rejects_mismatched_buffer() {
        assert!(matches!(
            encode_png(&[0u8; 10], 4, 4),
            Err(ProbeError::Plot(_))
        ));
    }
}
