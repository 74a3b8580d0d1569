// src/visualizer.rs
use eframe::egui;
use egui::Color32;
use egui_plot::{Corner, Legend, Line, Plot, PlotPoints, Points};
use crate::drivers::{Analysis, ProbeError};

/// Interactive chart of the raw series and its fit.
pub struct FitViewerApp {
    title: String,
    raw: Vec<[f64; 2]>,
    fit: Vec<[f64; 2]>,
    fit_label: String,
}

impl FitViewerApp {
    pub fn new(analysis: &Analysis, title: &str) -> Self {
        Self {
            title: title.to_owned(),
            raw: analysis.raw_points(),
            fit: analysis.fit_points(),
            fit_label: analysis.fit.label(),
        }
    }
}

impl eframe::App for FitViewerApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        egui::CentralPanel::default().show(ctx, |ui| {
            ui.vertical_centered(|ui| ui.heading(&self.title));
            Plot::new("fit_plot")
                .legend(Legend::default().position(Corner::RightTop))
                .show_grid(true)
                .x_axis_label("t [s]")
                .y_axis_label("T [K]")
                .show(ui, |plot_ui| {
                    let raw_color = Color32::from_rgb(0, 114, 189);
                    plot_ui.line(
                        Line::new(PlotPoints::new(self.raw.clone()))
                            .name("rawdata")
                            .color(raw_color),
                    );
                    // same name so the markers share the legend entry
                    plot_ui.points(
                        Points::new(PlotPoints::new(self.raw.clone()))
                            .name("rawdata")
                            .radius(2.5)
                            .color(raw_color),
                    );
                    plot_ui.line(
                        Line::new(PlotPoints::new(self.fit.clone()))
                            .name(&self.fit_label)
                            .color(Color32::from_rgb(217, 83, 25))
                            .width(2.0),
                    );
                });
        });
    }
}

/// Opens the chart window; returns once the user closes it.
pub fn show_fit_window(analysis: &Analysis, title: &str) -> Result<(), ProbeError> {
    let app = FitViewerApp::new(analysis, title);
    let viewport = egui::ViewportBuilder::default()
        .with_inner_size([900.0, 600.0])
        .with_title(title);
    let options = eframe::NativeOptions {
        viewport,
        ..Default::default()
    };
    eframe::run_native(title, options, Box::new(move |_cc| Box::new(app)))
        .map_err(|e| ProbeError::Plot(e.to_string()))
}
