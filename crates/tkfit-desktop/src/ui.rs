//! UI components and state management

use chrono::NaiveDateTime;
use egui::Color32;
use egui_plot::{
    Bar, BarChart, Corner, Legend, Line, LineStyle, MarkerShape, Plot, PlotPoint, PlotPoints,
    Points, Polygon, Text,
};
use tkfit_analysis::{
    court_markings, performance_differences, role_zone, AdviceBlock, PlayerComparison,
    Recommendation, RestPeriod, COURT_LENGTH_FT, COURT_WIDTH_FT,
};
use tkfit_core::{Metric, PlayerRole};
use tkfit_simulation::{MovementPhase, CYCLE_SECONDS};

use crate::app::{DashboardApp, ExportStatus, PlayerView};

const HEART_RATE_COLOR: Color32 = Color32::from_rgb(178, 34, 34);
const SPEED_COLOR: Color32 = Color32::from_rgb(65, 105, 225);
const ACCELERATION_COLOR: Color32 = Color32::from_rgb(255, 140, 0);
const MUSCLE_COLOR: Color32 = Color32::from_rgb(34, 139, 34);
const REST_FILL: Color32 = Color32::from_rgba_premultiplied(72, 119, 72, 90);

/// Comparison bar colors, cycled per player
const PLAYER_COLORS: [Color32; 4] = [
    Color32::from_rgb(255, 140, 0),
    Color32::from_rgb(65, 105, 225),
    Color32::from_rgb(46, 139, 87),
    Color32::from_rgb(186, 85, 211),
];

/// Viridis stops used to color court positions by muscle intensity
const VIRIDIS: [(u8, u8, u8); 5] = [
    (68, 1, 84),
    (59, 82, 139),
    (33, 145, 140),
    (94, 201, 98),
    (253, 231, 37),
];

/// Number of color bins for the court scatter
const INTENSITY_BINS: usize = 8;

/// Chart tabs of the timeline section
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ChartTab {
    Physiology,
    Movement,
    Muscle,
}

/// UI state management
#[derive(Debug)]
pub struct UIState {
    pub selected_player: usize,
    pub chart_tab: ChartTab,

    // Panel visibility
    pub show_controls: bool,
    pub show_court: bool,
    pub show_comparison: bool,
    pub show_recommendations: bool,
}

impl UIState {
    pub fn new() -> Self {
        Self {
            selected_player: 0,
            chart_tab: ChartTab::Physiology,
            show_controls: true,
            show_court: true,
            show_comparison: true,
            show_recommendations: true,
        }
    }
}

/// Sidebar: player selection and export
pub struct ControlPanel;

impl ControlPanel {
    pub fn show(ui: &mut egui::Ui, app: &mut DashboardApp) {
        ui.heading("Analysis settings");
        ui.separator();

        ui.group(|ui| {
            ui.label("Player");

            let mut selected = app.ui_state.selected_player;
            let choices: Vec<String> = app
                .players()
                .iter()
                .map(|p| format!("{} ({})", p.config.label, p.series.role()))
                .collect();
            for (index, choice) in choices.into_iter().enumerate() {
                ui.radio_value(&mut selected, index, choice);
            }
            if selected != app.ui_state.selected_player {
                app.select_player(selected);
            }
        });

        ui.separator();

        ui.group(|ui| {
            ui.label("Data export");
            ui.label(format!("File: {}", app.selected().export_filename()));

            if ui.button("Download CSV").clicked() {
                app.export_with_dialog();
            }

            match &app.last_export {
                Some(ExportStatus::Saved(path)) => {
                    ui.colored_label(Color32::GREEN, format!("Saved {}", path.display()));
                }
                Some(ExportStatus::Failed(reason)) => {
                    ui.colored_label(Color32::RED, format!("Export failed: {}", reason));
                }
                None => {}
            }
        });

        ui.separator();
        ui.collapsing("Session", |ui| {
            let session = app.session();
            ui.label(format!("Name: {}", session.name));
            ui.label(format!("Duration: {} min", session.match_minutes));
            ui.label(format!("Seed: {}", session.seed));
        });
    }
}

/// Headline metric cards
pub struct MetricsPanel;

impl MetricsPanel {
    pub fn show(ui: &mut egui::Ui, player: &PlayerView) {
        let metrics = &player.metrics;

        ui.heading("Performance metrics");
        ui.columns(4, |columns| {
            metric_card(
                &mut columns[0],
                "Average speed",
                format!("{:.1} km/h", metrics.speed.mean),
                Some(format!("{:.1} km/h max", metrics.speed.max)),
            );
            metric_card(
                &mut columns[1],
                "Heart rate",
                format!("{:.0} bpm", metrics.heart_rate.mean),
                Some(format!("{:.0} bpm max", metrics.heart_rate.max)),
            );
            metric_card(
                &mut columns[2],
                "Muscle activity",
                format!("{:.1}%", metrics.muscle_activity.mean),
                Some(format!("{:.1}% max", metrics.muscle_activity.max)),
            );
            metric_card(
                &mut columns[3],
                "Distance covered",
                format!("{:.0} m", metrics.distance_m),
                None,
            );
        });
    }
}

fn metric_card(ui: &mut egui::Ui, title: &str, value: String, detail: Option<String>) {
    ui.group(|ui| {
        ui.label(title);
        ui.label(egui::RichText::new(value).size(22.0).strong());
        if let Some(detail) = detail {
            ui.weak(detail);
        }
    });
}

/// Time series charts of the selected player
pub struct TimelineCharts;

impl TimelineCharts {
    pub fn show(ui: &mut egui::Ui, player: &PlayerView, tab: ChartTab) {
        match tab {
            ChartTab::Physiology => Self::physiology(ui, player),
            ChartTab::Movement => Self::movement(ui, player),
            ChartTab::Muscle => Self::muscle(ui, player),
        }
    }

    fn physiology(ui: &mut egui::Ui, player: &PlayerView) {
        ui.label("Heart rate and rest periods");

        let minutes = player.series.elapsed_minutes();
        let heart_rate = player.series.channel(Metric::HeartRate);
        let low = player.metrics.heart_rate.min - 5.0;
        let high = player.metrics.heart_rate.max + 5.0;

        Plot::new("heart_rate_plot")
            .legend(Legend::default().position(Corner::LeftTop))
            .height(320.0)
            .x_axis_label("Time (min)")
            .y_axis_label("HR (bpm)")
            .show(ui, |plot_ui| {
                for period in &player.rest_periods {
                    let start = f64::from(period.window.start) / 60.0;
                    let end = f64::from(period.window.end) / 60.0;
                    plot_ui.polygon(
                        Polygon::new(PlotPoints::new(vec![
                            [start, low],
                            [end, low],
                            [end, high],
                            [start, high],
                        ]))
                        .fill_color(REST_FILL)
                        .name("Rest"),
                    );
                    plot_ui.text(Text::new(PlotPoint::new(start, high), rest_label(period)));
                }

                plot_ui.line(
                    Line::new(zip_points(&minutes, &heart_rate))
                        .color(HEART_RATE_COLOR)
                        .width(2.0)
                        .name("Heart rate"),
                );
            });
    }

    fn movement(ui: &mut egui::Ui, player: &PlayerView) {
        ui.label(format!(
            "Speed ({}) and acceleration ({})",
            Metric::Speed.unit(),
            Metric::Acceleration.unit()
        ));

        let minutes = player.series.elapsed_minutes();
        let speed = player.series.channel(Metric::Speed);
        let acceleration = player.series.channel(Metric::Acceleration);

        Plot::new("movement_plot")
            .legend(Legend::default().position(Corner::LeftTop))
            .height(320.0)
            .x_axis_label("Time (min)")
            .show(ui, |plot_ui| {
                plot_ui.line(
                    Line::new(zip_points(&minutes, &speed))
                        .color(SPEED_COLOR)
                        .width(2.0)
                        .name("Speed"),
                );
                plot_ui.line(
                    Line::new(zip_points(&minutes, &acceleration))
                        .color(ACCELERATION_COLOR)
                        .style(LineStyle::dotted_dense())
                        .width(2.0)
                        .name("Acceleration"),
                );
            });

        ui.weak(cycle_legend());
    }

    fn muscle(ui: &mut egui::Ui, player: &PlayerView) {
        ui.label("Quadriceps muscle activity");

        let minutes = player.series.elapsed_minutes();
        let activity = player.series.channel(Metric::MuscleActivity);
        let peaks: Vec<[f64; 2]> = player
            .peaks
            .iter()
            .map(|p| [p.second as f64 / 60.0, p.value])
            .collect();

        Plot::new("muscle_plot")
            .legend(Legend::default().position(Corner::LeftTop))
            .height(320.0)
            .x_axis_label("Time (min)")
            .y_axis_label("Intensity (%)")
            .show(ui, |plot_ui| {
                plot_ui.line(
                    Line::new(zip_points(&minutes, &activity))
                        .color(MUSCLE_COLOR)
                        .fill(0.0)
                        .width(2.0)
                        .name("Muscle activity"),
                );
                plot_ui.points(
                    Points::new(peaks)
                        .shape(MarkerShape::Circle)
                        .radius(3.0)
                        .color(Color32::RED)
                        .name("Activity peaks"),
                );
            });
    }
}

/// Chart annotation for a rest period, e.g. "Rest 19:20-19:23"
fn rest_label(period: &RestPeriod) -> String {
    format!(
        "Rest {}-{}",
        clock_time(period.starts_at),
        clock_time(period.ends_at)
    )
}

fn clock_time(timestamp: NaiveDateTime) -> String {
    timestamp.format("%H:%M").to_string()
}

/// One-line description of the repeating movement cycle
fn cycle_legend() -> String {
    let phases: Vec<String> = MovementPhase::ALL
        .iter()
        .map(|phase| {
            let span = phase.cycle_span();
            format!("{}-{} s {}", span.start, span.end, phase.description())
        })
        .collect();
    format!("{} s cycle: {}", CYCLE_SECONDS, phases.join(" | "))
}

fn zip_points(xs: &[f64], ys: &[f64]) -> PlotPoints {
    xs.iter().zip(ys).map(|(&x, &y)| [x, y]).collect()
}

/// Court diagram with the player's sampled positions
pub struct CourtView;

impl CourtView {
    pub fn show(ui: &mut egui::Ui, player: &PlayerView) {
        let role = player.series.role();
        ui.heading(format!("Court positioning: {} (muscle intensity)", player.config.label));

        let zone = role_zone(role);
        let (low, high) = intensity_bounds(player);

        let mut bins: Vec<Vec<[f64; 2]>> = vec![Vec::new(); INTENSITY_BINS];
        for point in &player.court_points {
            let bin = intensity_bin(point.muscle_activity, low, high);
            bins[bin].push([point.x_ft, point.y_ft]);
        }

        Plot::new("court_plot")
            .height(420.0)
            .data_aspect(1.0)
            .include_x(0.0)
            .include_x(COURT_LENGTH_FT)
            .include_y(0.0)
            .include_y(COURT_WIDTH_FT)
            .show_axes(false)
            .show_grid(false)
            .allow_drag(false)
            .allow_zoom(false)
            .show(ui, |plot_ui| {
                plot_ui.polygon(
                    Polygon::new(PlotPoints::new(vec![
                        [0.0, 0.0],
                        [COURT_LENGTH_FT, 0.0],
                        [COURT_LENGTH_FT, COURT_WIDTH_FT],
                        [0.0, COURT_WIDTH_FT],
                    ]))
                    .fill_color(Color32::from_rgb(255, 165, 0)),
                );

                for marking in court_markings() {
                    plot_ui.line(
                        Line::new(PlotPoints::new(marking.points()))
                            .color(Color32::WHITE)
                            .width(2.0),
                    );
                }

                let mut outline = zone.area.outline();
                outline.pop();
                plot_ui.polygon(
                    Polygon::new(PlotPoints::new(outline))
                        .fill_color(zone_fill(role))
                        .name(zone.label.clone()),
                );
                plot_ui.text(
                    Text::new(
                        PlotPoint::new(
                            zone.area.x + zone.area.width / 2.0,
                            zone.area.y + zone.area.height / 2.0,
                        ),
                        egui::RichText::new(zone.label.clone()).strong(),
                    )
                    .color(Color32::BLACK),
                );

                for (bin, positions) in bins.into_iter().enumerate() {
                    if positions.is_empty() {
                        continue;
                    }
                    plot_ui.points(
                        Points::new(positions)
                            .shape(MarkerShape::Circle)
                            .radius(5.0)
                            .filled(true)
                            .color(viridis(bin as f64 / (INTENSITY_BINS - 1) as f64)),
                    );
                }
            });

        ui.horizontal(|ui| {
            ui.label(format!("Muscle intensity {:.0}%", low));
            for bin in 0..INTENSITY_BINS {
                let t = bin as f64 / (INTENSITY_BINS - 1) as f64;
                ui.colored_label(viridis(t), "■");
            }
            ui.label(format!("{:.0}%", high));
        });
    }
}

fn intensity_bounds(player: &PlayerView) -> (f64, f64) {
    player
        .court_points
        .iter()
        .fold((f64::INFINITY, f64::NEG_INFINITY), |(lo, hi), p| {
            (lo.min(p.muscle_activity), hi.max(p.muscle_activity))
        })
}

fn intensity_bin(value: f64, low: f64, high: f64) -> usize {
    if high <= low {
        return 0;
    }
    let t = ((value - low) / (high - low)).clamp(0.0, 1.0);
    ((t * (INTENSITY_BINS - 1) as f64).round() as usize).min(INTENSITY_BINS - 1)
}

fn zone_fill(role: tkfit_core::PlayerRole) -> Color32 {
    match role {
        tkfit_core::PlayerRole::Post => Color32::from_rgba_unmultiplied(255, 0, 0, 76),
        tkfit_core::PlayerRole::Guard => Color32::from_rgba_unmultiplied(0, 0, 255, 51),
    }
}

/// Interpolate the viridis colormap at `t` in [0, 1]
fn viridis(t: f64) -> Color32 {
    let t = t.clamp(0.0, 1.0) * (VIRIDIS.len() - 1) as f64;
    let idx = (t.floor() as usize).min(VIRIDIS.len() - 2);
    let frac = t - idx as f64;
    let (r0, g0, b0) = VIRIDIS[idx];
    let (r1, g1, b1) = VIRIDIS[idx + 1];
    let mix = |a: u8, b: u8| (f64::from(a) + (f64::from(b) - f64::from(a)) * frac).round() as u8;
    Color32::from_rgb(mix(r0, r1), mix(g0, g1), mix(b0, b1))
}

/// Grouped bar chart comparing every player
pub struct ComparisonChart;

impl ComparisonChart {
    pub fn show(ui: &mut egui::Ui, comparison: &PlayerComparison) {
        ui.heading("Player comparison");

        let rows = comparison.rows();
        let player_count = comparison.players.len().max(1);
        let bar_width = 0.8 / player_count as f64;

        let charts: Vec<BarChart> = comparison
            .players
            .iter()
            .enumerate()
            .map(|(p, player)| {
                let bars = rows
                    .iter()
                    .enumerate()
                    .map(|(m, row)| {
                        let offset = (p as f64 - (player_count as f64 - 1.0) / 2.0) * bar_width;
                        Bar::new(m as f64 + offset, row.values[p])
                            .width(bar_width)
                            .name(row.metric.label())
                    })
                    .collect();
                BarChart::new(bars)
                    .color(PLAYER_COLORS[p % PLAYER_COLORS.len()])
                    .name(player.label.clone())
            })
            .collect();

        Plot::new("comparison_plot")
            .legend(Legend::default().position(Corner::RightTop))
            .height(320.0)
            .allow_drag(false)
            .show(ui, |plot_ui| {
                for chart in charts {
                    plot_ui.bar_chart(chart);
                }
            });

        egui::Grid::new("comparison_table").striped(true).show(ui, |ui| {
            ui.label("");
            for player in &comparison.players {
                ui.strong(&player.label);
            }
            ui.end_row();

            for row in &rows {
                ui.label(row.metric.label());
                for value in &row.values {
                    ui.label(format!("{:.1}", value));
                }
                ui.end_row();
            }
        });

        let roles = compared_roles(comparison);
        if !roles.is_empty() {
            ui.add_space(8.0);
            ui.strong("Performance differences");
            ui.columns(roles.len(), |columns| {
                for (column, role) in columns.iter_mut().zip(&roles) {
                    advice_block(column, &performance_differences(*role));
                }
            });
        }
    }
}

/// Roles present in the comparison, in display order
fn compared_roles(comparison: &PlayerComparison) -> Vec<PlayerRole> {
    PlayerRole::ALL
        .into_iter()
        .filter(|role| comparison.players.iter().any(|p| p.role == *role))
        .collect()
}

/// Training advice for the selected role
pub struct RecommendationPanel;

impl RecommendationPanel {
    pub fn show(ui: &mut egui::Ui, recommendation: &Recommendation) {
        ui.heading("Training recommendations");

        ui.columns(2, |columns| {
            advice_block(&mut columns[0], &recommendation.physical);
            advice_block(&mut columns[1], &recommendation.secondary);
        });

        ui.add(
            egui::ProgressBar::new(recommendation.training_intensity)
                .text(recommendation.intensity_label()),
        );
    }
}

fn advice_block(ui: &mut egui::Ui, block: &AdviceBlock) {
    ui.group(|ui| {
        ui.strong(block.title);
        for item in block.items {
            ui.label(format!("• {}", item));
        }
    });
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_intensity_bins() {
        assert_eq!(intensity_bin(40.0, 40.0, 60.0), 0);
        assert_eq!(intensity_bin(60.0, 40.0, 60.0), INTENSITY_BINS - 1);
        assert_eq!(intensity_bin(75.0, 40.0, 60.0), INTENSITY_BINS - 1);
        assert_eq!(intensity_bin(50.0, 50.0, 50.0), 0);
    }

    #[test]
    fn test_rest_labels_use_wall_clock() {
        let series = tkfit_simulation::generate_series(PlayerRole::Post, true, 42);
        let labels: Vec<String> = tkfit_analysis::rest_periods(&series)
            .iter()
            .map(rest_label)
            .collect();

        assert_eq!(labels, ["Rest 19:20-19:23", "Rest 19:35-19:38"]);
    }

    #[test]
    fn test_cycle_legend_lists_phases() {
        assert_eq!(
            cycle_legend(),
            concat!(
                "120 s cycle: 0-30 s Sprint | 30-60 s Fast move | ",
                "60-90 s Walk | 90-120 s Defensive stance"
            )
        );
    }

    #[test]
    fn test_compared_roles() {
        let post = tkfit_simulation::generate_series(PlayerRole::Post, true, 42);
        let guard = tkfit_simulation::generate_series(PlayerRole::Guard, false, 42);

        let both = PlayerComparison::new([("Guard", &guard), ("Post", &post)]);
        assert_eq!(compared_roles(&both), [PlayerRole::Post, PlayerRole::Guard]);

        let guards_only = PlayerComparison::new([("G1", &guard), ("G2", &guard)]);
        assert_eq!(compared_roles(&guards_only), [PlayerRole::Guard]);
    }

    #[test]
    fn test_viridis_endpoints() {
        assert_eq!(viridis(0.0), Color32::from_rgb(68, 1, 84));
        assert_eq!(viridis(1.0), Color32::from_rgb(253, 231, 37));
        assert_eq!(viridis(0.5), Color32::from_rgb(33, 145, 140));
    }
}
