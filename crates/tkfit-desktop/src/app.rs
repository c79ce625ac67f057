//! Main application state: generated series and everything derived from them

use std::path::{Path, PathBuf};

use anyhow::Context;
use tkfit_analysis::{
    muscle_peaks, project_positions, rest_periods, CourtPoint, Peak, PlayerComparison,
    Recommendation, RestPeriod, SessionMetrics, PEAK_QUANTILE, POSITION_STRIDE,
};
use tkfit_core::{export, Series, TkfitResult};
use tkfit_simulation::{PlayerConfig, SessionConfig};
use tracing::{error, info};

use crate::ui::{
    ChartTab, ComparisonChart, ControlPanel, CourtView, MetricsPanel, RecommendationPanel,
    TimelineCharts, UIState,
};

/// One player's series with its precomputed dashboard views
pub struct PlayerView {
    pub config: PlayerConfig,
    pub series: Series,
    pub metrics: SessionMetrics,
    pub rest_periods: Vec<RestPeriod>,
    pub peaks: Vec<Peak>,
    pub court_points: Vec<CourtPoint>,
    pub recommendation: Recommendation,
}

impl PlayerView {
    fn new(config: PlayerConfig, series: Series) -> Self {
        PlayerView {
            metrics: SessionMetrics::from_series(&series),
            rest_periods: rest_periods(&series),
            peaks: muscle_peaks(&series, PEAK_QUANTILE),
            court_points: project_positions(&series, POSITION_STRIDE),
            recommendation: Recommendation::for_role(series.role()),
            config,
            series,
        }
    }

    /// Download filename for this player's CSV
    pub fn export_filename(&self) -> String {
        export::export_filename(self.series.role())
    }
}

/// Outcome of the last export request
#[derive(Debug, Clone, PartialEq)]
pub enum ExportStatus {
    Saved(PathBuf),
    Failed(String),
}

/// Main application state
pub struct DashboardApp {
    session: SessionConfig,
    players: Vec<PlayerView>,
    pub comparison: PlayerComparison,

    // UI state - public for access from the UI module
    pub ui_state: UIState,
    pub last_export: Option<ExportStatus>,
}

impl DashboardApp {
    /// Generate every configured player's series once, up front
    pub fn new(session: SessionConfig) -> anyhow::Result<Self> {
        let generated = session
            .generate_all()
            .with_context(|| format!("Failed to generate session '{}'", session.name))?;

        let players: Vec<PlayerView> = generated
            .into_iter()
            .map(|(config, series)| PlayerView::new(config, series))
            .collect();

        let comparison =
            PlayerComparison::new(players.iter().map(|p| (p.config.label.as_str(), &p.series)));

        info!(
            session = %session.name,
            players = players.len(),
            "dashboard data ready"
        );

        Ok(DashboardApp {
            session,
            players,
            comparison,
            ui_state: UIState::new(),
            last_export: None,
        })
    }

    pub fn session(&self) -> &SessionConfig {
        &self.session
    }

    pub fn players(&self) -> &[PlayerView] {
        &self.players
    }

    /// Player currently shown in the dashboard
    pub fn selected(&self) -> &PlayerView {
        // `new` guarantees at least one player and `select_player` keeps the index in range
        &self.players[self.ui_state.selected_player]
    }

    pub fn select_player(&mut self, index: usize) {
        if index < self.players.len() {
            self.ui_state.selected_player = index;
        }
    }

    /// CSV bytes and filename for the selected player
    pub fn export_selected(&self) -> TkfitResult<(String, Vec<u8>)> {
        let player = self.selected();
        let bytes = export::to_csv_bytes(&player.series)?;
        Ok((player.export_filename(), bytes))
    }

    /// Write the selected player's CSV to `path`, recording the outcome
    pub fn export_selected_to(&mut self, path: &Path) {
        let result = self
            .export_selected()
            .and_then(|(_, bytes)| std::fs::write(path, bytes).map_err(Into::into));

        self.last_export = Some(match result {
            Ok(()) => {
                info!(path = %path.display(), "exported selected player");
                ExportStatus::Saved(path.to_path_buf())
            }
            Err(e) => {
                error!("Failed to export CSV: {}", e);
                ExportStatus::Failed(e.to_string())
            }
        });
    }

    /// Ask for a destination and export the selected player
    pub fn export_with_dialog(&mut self) {
        let filename = self.selected().export_filename();
        if let Some(path) = rfd::FileDialog::new()
            .set_file_name(filename)
            .add_filter("CSV", &["csv"])
            .save_file()
        {
            self.export_selected_to(&path);
        }
    }

    /// Headless export of every player into `dir`
    pub fn export_all(&self, dir: &Path) -> anyhow::Result<Vec<PathBuf>> {
        std::fs::create_dir_all(dir)
            .with_context(|| format!("Failed to create export directory {}", dir.display()))?;

        let mut written = Vec::with_capacity(self.players.len());
        for player in &self.players {
            let path = dir.join(format!(
                "tekfit_{}_data.csv",
                file_stem(&player.config.label)
            ));
            export::write_to_path(&player.series, &path)
                .with_context(|| format!("Failed to export {}", player.config.label))?;
            written.push(path);
        }
        Ok(written)
    }
}

/// Lowercase, filesystem-safe form of a player label
fn file_stem(label: &str) -> String {
    label
        .trim()
        .chars()
        .map(|c| if c.is_ascii_alphanumeric() { c.to_ascii_lowercase() } else { '_' })
        .collect()
}

impl eframe::App for DashboardApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        // Main UI layout
        egui::TopBottomPanel::top("top_panel").show(ctx, |ui| {
            egui::menu::bar(ui, |ui| {
                ui.menu_button("File", |ui| {
                    if ui.button("Export CSV...").clicked() {
                        self.export_with_dialog();
                        ui.close_menu();
                    }
                });

                ui.menu_button("View", |ui| {
                    ui.checkbox(&mut self.ui_state.show_controls, "Show Controls");
                    ui.checkbox(&mut self.ui_state.show_court, "Show Court");
                    ui.checkbox(&mut self.ui_state.show_comparison, "Show Comparison");
                    ui.checkbox(&mut self.ui_state.show_recommendations, "Show Recommendations");
                });

                ui.separator();
                ui.label(format!(
                    "Match start: {}",
                    self.session.match_start.format("%Y-%m-%d %H:%M")
                ));
                ui.separator();
                ui.label(format!("Seed: {}", self.session.seed));
            });
        });

        // Control panel
        if self.ui_state.show_controls {
            egui::SidePanel::left("control_panel")
                .resizable(true)
                .default_width(260.0)
                .show(ctx, |ui| {
                    ControlPanel::show(ui, self);
                });
        }

        egui::CentralPanel::default().show(ctx, |ui| {
            egui::ScrollArea::vertical().show(ui, |ui| {
                ui.heading("TKFIT Performance Dashboard");
                ui.label("Biomechanical and physiological match telemetry");
                ui.separator();

                let player = self.selected();
                MetricsPanel::show(ui, player);
                ui.separator();

                let mut tab = self.ui_state.chart_tab;
                ui.horizontal(|ui| {
                    ui.selectable_value(&mut tab, ChartTab::Physiology, "Physiology");
                    ui.selectable_value(&mut tab, ChartTab::Movement, "Movement");
                    ui.selectable_value(&mut tab, ChartTab::Muscle, "Muscle");
                });
                TimelineCharts::show(ui, player, tab);

                if self.ui_state.show_court {
                    ui.separator();
                    CourtView::show(ui, player);
                }

                if self.ui_state.show_comparison {
                    ui.separator();
                    ComparisonChart::show(ui, &self.comparison);
                }

                if self.ui_state.show_recommendations {
                    ui.separator();
                    RecommendationPanel::show(ui, &player.recommendation);
                }

                self.ui_state.chart_tab = tab;
            });
        });
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tkfit_core::PlayerRole;

    #[test]
    fn test_app_generates_all_players() {
        let app = DashboardApp::new(SessionConfig::default()).unwrap();

        assert_eq!(app.players().len(), 2);
        assert_eq!(app.selected().series.role(), PlayerRole::Post);
        assert_eq!(app.selected().rest_periods.len(), 2);
        assert_eq!(app.comparison.players.len(), 2);
    }

    #[test]
    fn test_player_selection() {
        let mut app = DashboardApp::new(SessionConfig::default()).unwrap();

        app.select_player(1);
        assert_eq!(app.selected().series.role(), PlayerRole::Guard);
        assert!(app.selected().rest_periods.is_empty());

        app.select_player(9);
        assert_eq!(app.ui_state.selected_player, 1);
    }

    #[test]
    fn test_export_selected() {
        let mut app = DashboardApp::new(SessionConfig::default()).unwrap();
        app.select_player(1);

        let (filename, bytes) = app.export_selected().unwrap();
        assert_eq!(filename, "tekfit_guard_data.csv");

        let samples = export::read_samples(&bytes).unwrap();
        assert_eq!(samples.len(), 2880);
        assert_eq!(samples.as_slice(), app.selected().series.samples());
    }

    #[test]
    fn test_export_to_path_records_status() {
        let dir = tempfile::tempdir().unwrap();
        let mut app = DashboardApp::new(SessionConfig::default()).unwrap();

        let path = dir.path().join("out.csv");
        app.export_selected_to(&path);
        assert_eq!(app.last_export, Some(ExportStatus::Saved(path.clone())));
        assert!(path.exists());

        app.export_selected_to(&dir.path().join("missing").join("out.csv"));
        assert!(matches!(app.last_export, Some(ExportStatus::Failed(_))));
    }

    #[test]
    fn test_export_all() {
        let dir = tempfile::tempdir().unwrap();
        let app = DashboardApp::new(SessionConfig::default()).unwrap();

        let written = app.export_all(&dir.path().join("csv")).unwrap();
        assert_eq!(written.len(), 2);
        assert!(written[0].ends_with("tekfit_post_data.csv"));
        assert!(written[1].ends_with("tekfit_guard_data.csv"));
    }

    #[test]
    fn test_file_stem() {
        assert_eq!(file_stem("Guard"), "guard");
        assert_eq!(file_stem(" Point Guard #1 "), "point_guard__1");
    }

    #[test]
    fn test_rejects_invalid_session() {
        let mut session = SessionConfig::default();
        session.players.clear();
        assert!(DashboardApp::new(session).is_err());
    }
}
