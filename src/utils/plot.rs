use plotters::coord::Shift;
use plotters::prelude::*;
use plotters::series::DashedLineSeries;
use std::fs::OpenOptions;
use std::path::{Path, PathBuf};
use tracing::{info, warn};

use crate::config::PlotConfig;
use crate::error::{PlotError, Result};
use crate::training::history::{Histories, LineKind};
use crate::utils::display;
use crate::utils::figure::{MetricsFigure, Panel};

pub const OUTPUT_FILE_NAME: &str = "models_accuracy_loss_plot.png";

/// What a call to [`plot_all_metrics`] produced.
#[derive(Debug, Clone)]
pub struct PlotOutput {
    pub path: PathBuf,
    pub figure: MetricsFigure,
    pub displayed: bool,
}

/// Render accuracy and loss curves of every model side by side, save them as
/// `models_accuracy_loss_plot.png` in `save_dir` and show the image.
///
/// `save_dir` must already exist. An existing image is overwritten.
pub fn plot_all_metrics<P: AsRef<Path>>(
    save_dir: P,
    histories: &Histories,
    config: &PlotConfig,
) -> Result<PlotOutput> {
    let figure = MetricsFigure::from_histories(histories)?;

    let save_dir = save_dir.as_ref();
    if !save_dir.is_dir() {
        return Err(PlotError::DirectoryNotFound(save_dir.to_path_buf()));
    }
    let path = save_dir.join(OUTPUT_FILE_NAME);

    // Surface an unwritable target as a filesystem error before drawing.
    let existed = path.exists();
    OpenOptions::new().write(true).create(true).open(&path)?;
    if let Err(err) = render_figure(&figure, &path, config) {
        if !existed {
            let _ = std::fs::remove_file(&path);
        }
        return Err(err);
    }
    info!(path = %path.display(), models = histories.len(), "Saved metrics figure");

    let displayed = display::show(&path, config.display, config.viewer.as_deref())?;

    Ok(PlotOutput {
        path,
        figure,
        displayed,
    })
}

/// Draw `figure` into a PNG at `path`.
pub fn render_figure(figure: &MetricsFigure, path: &Path, config: &PlotConfig) -> Result<()> {
    let root = BitMapBackend::new(path, (config.width, config.height)).into_drawing_area();
    root.fill(&WHITE)?;

    let areas = root.split_evenly((1, 2));
    for (area, panel) in areas.iter().zip(figure.panels()) {
        draw_panel(area, panel, config.line_width)?;
    }

    root.present()?;
    Ok(())
}

fn draw_panel(
    area: &DrawingArea<BitMapBackend<'_>, Shift>,
    panel: &Panel,
    line_width: u32,
) -> Result<()> {
    let mut chart = ChartBuilder::on(area)
        .caption(panel.title, ("sans-serif", 24))
        .margin(10)
        .x_label_area_size(40)
        .y_label_area_size(50)
        .build_cartesian_2d(panel.x_range(), panel.y_range())?;

    chart
        .configure_mesh()
        .x_desc(panel.x_label)
        .y_desc(panel.y_label)
        .draw()?;

    if panel.curves.is_empty() {
        warn!(panel = panel.title, "No curves to draw");
        return Ok(());
    }

    for curve in &panel.curves {
        let style = Palette99::pick(curve.color_index).stroke_width(line_width);
        match curve.line_kind() {
            LineKind::Solid => {
                chart
                    .draw_series(LineSeries::new(curve.points(), style))?
                    .label(curve.label())
                    .legend(move |(x, y)| PathElement::new(vec![(x, y), (x + 20, y)], style));
            }
            LineKind::Dashed => {
                chart
                    .draw_series(DashedLineSeries::new(curve.points(), 6, 4, style))?
                    .label(curve.label())
                    .legend(move |(x, y)| {
                        EmptyElement::at((x, y))
                            + PathElement::new(vec![(0, 0), (8, 0)], style)
                            + PathElement::new(vec![(12, 0), (20, 0)], style)
                    });
            }
        }
    }

    chart
        .configure_series_labels()
        .background_style(WHITE.mix(0.8))
        .border_style(BLACK)
        .draw()?;

    Ok(())
}
