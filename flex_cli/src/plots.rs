//! Interactive terminal plots of the beam profile.
//!
//! One tab per quantity (moment, curvature, slope, deflection). The moment
//! diagram is drawn with sagging moment downward, as engineers usually
//! draw it.

use std::io;

use crossterm::event::{self, Event, KeyCode, KeyEventKind};
use ratatui::layout::{Constraint, Layout};
use ratatui::style::{Color, Modifier, Style};
use ratatui::symbols;
use ratatui::text::{Line, Span};
use ratatui::widgets::{Axis, Block, Chart, Dataset, GraphType, Paragraph, Tabs};
use ratatui::{DefaultTerminal, Frame};

use flex_core::calculations::{DeflectionResult, ProfileQuantity};
use flex_core::units::{KilonewtonMeters, Meters, Millimeters, NewtonMeters};

/// One plotted quantity, already converted to display units
#[derive(Debug, Clone)]
struct PlotSeries {
    title: &'static str,
    unit: &'static str,
    /// Points as drawn (y negated when `inverted`)
    points: Vec<(f64, f64)>,
    /// y-axis drawn downward-positive
    inverted: bool,
    x_max: f64,
    y_bounds: [f64; 2],
}

impl PlotSeries {
    fn new(result: &DeflectionResult, quantity: ProfileQuantity) -> Self {
        let unit = display_unit(quantity);
        let inverted = quantity == ProfileQuantity::BendingMoment;
        let sign = if inverted { -1.0 } else { 1.0 };

        let points: Vec<(f64, f64)> = result
            .profile
            .diagram(quantity)
            .into_iter()
            .map(|(x, v)| (x, sign * display_value(quantity, v)))
            .collect();

        let x_max = points.last().map(|p| p.0).unwrap_or(1.0);
        let y_bounds = padded_bounds(points.iter().map(|p| p.1));

        PlotSeries {
            title: quantity.title(),
            unit,
            points,
            inverted,
            x_max,
            y_bounds,
        }
    }

    /// Axis value shown at drawn coordinate `y`
    fn label_value(&self, y: f64) -> f64 {
        if self.inverted {
            -y
        } else {
            y
        }
    }
}

fn display_unit(quantity: ProfileQuantity) -> &'static str {
    match quantity {
        ProfileQuantity::BendingMoment => "kN·m",
        ProfileQuantity::Curvature => "1/m",
        ProfileQuantity::Slope => "rad",
        ProfileQuantity::Deflection => "mm",
    }
}

/// Convert a stored SI value to its display unit
fn display_value(quantity: ProfileQuantity, v: f64) -> f64 {
    match quantity {
        ProfileQuantity::BendingMoment => KilonewtonMeters::from(NewtonMeters(v)).0,
        ProfileQuantity::Curvature | ProfileQuantity::Slope => v,
        ProfileQuantity::Deflection => Millimeters::from(Meters(v)).0,
    }
}

/// Min/max of `values` padded by 5% of the range (or ±1 for a flat line)
fn padded_bounds(values: impl Iterator<Item = f64>) -> [f64; 2] {
    let (min, max) = values.fold((f64::INFINITY, f64::NEG_INFINITY), |(lo, hi), v| {
        (lo.min(v), hi.max(v))
    });
    if !min.is_finite() || !max.is_finite() {
        return [-1.0, 1.0];
    }
    let range = max - min;
    if range == 0.0 {
        let pad = if min == 0.0 { 1.0 } else { min.abs() * 0.1 };
        return [min - pad, max + pad];
    }
    let pad = range * 0.05;
    [min - pad, max + pad]
}

fn format_value(v: f64) -> String {
    let a = v.abs();
    if a == 0.0 || (1e-2..1e4).contains(&a) {
        format!("{:.3}", v)
    } else {
        format!("{:.2e}", v)
    }
}

/// Tabbed chart viewer over one calculation result
pub struct PlotViewer<'a> {
    label: &'a str,
    result: &'a DeflectionResult,
    series: Vec<PlotSeries>,
    selected: usize,
}

impl<'a> PlotViewer<'a> {
    pub fn new(label: &'a str, result: &'a DeflectionResult) -> Self {
        let series = ProfileQuantity::ALL
            .iter()
            .map(|&q| PlotSeries::new(result, q))
            .collect();
        PlotViewer {
            label,
            result,
            series,
            selected: 0,
        }
    }

    fn next(&mut self) {
        self.selected = (self.selected + 1) % self.series.len();
    }

    fn previous(&mut self) {
        self.selected = (self.selected + self.series.len() - 1) % self.series.len();
    }

    /// Handle one key; returns false when the viewer should close
    fn handle_key(&mut self, code: KeyCode) -> bool {
        match code {
            KeyCode::Char('q') | KeyCode::Esc => return false,
            KeyCode::Right | KeyCode::Tab | KeyCode::Char('l') => self.next(),
            KeyCode::Left | KeyCode::BackTab | KeyCode::Char('h') => self.previous(),
            KeyCode::Char(c @ '1'..='4') => {
                self.selected = (c as u8 - b'1') as usize;
            }
            _ => {}
        }
        true
    }

    fn run(mut self, terminal: &mut DefaultTerminal) -> io::Result<()> {
        loop {
            terminal.draw(|frame| self.draw(frame))?;
            if let Event::Key(key) = event::read()? {
                if key.kind == KeyEventKind::Press && !self.handle_key(key.code) {
                    return Ok(());
                }
            }
        }
    }

    fn draw(&self, frame: &mut Frame) {
        let [tabs_area, chart_area, footer_area] = Layout::vertical([
            Constraint::Length(3),
            Constraint::Min(8),
            Constraint::Length(2),
        ])
        .areas(frame.area());

        let tabs = Tabs::new(self.series.iter().map(|s| s.title))
            .block(Block::bordered().title(format!(" Flexura - {} ", self.label)))
            .select(self.selected)
            .highlight_style(Style::default().fg(Color::Yellow).add_modifier(Modifier::BOLD));
        frame.render_widget(tabs, tabs_area);

        let series = &self.series[self.selected];
        let zero_line = [(0.0, 0.0), (series.x_max, 0.0)];
        let datasets = vec![
            Dataset::default()
                .marker(symbols::Marker::Braille)
                .graph_type(GraphType::Line)
                .style(Style::default().fg(Color::DarkGray))
                .data(&zero_line),
            Dataset::default()
                .name(format!("{} [{}]", series.title, series.unit))
                .marker(symbols::Marker::Braille)
                .graph_type(GraphType::Line)
                .style(Style::default().fg(Color::Cyan))
                .data(&series.points),
        ];

        let x_labels: Vec<Span> = [0.0, series.x_max / 2.0, series.x_max]
            .iter()
            .map(|&x| Span::raw(format!("{:.2}", x)))
            .collect();
        let [y_lo, y_hi] = series.y_bounds;
        let y_labels: Vec<Span> = [y_lo, (y_lo + y_hi) / 2.0, y_hi]
            .iter()
            .map(|&y| Span::raw(format_value(series.label_value(y))))
            .collect();

        let title = if series.inverted {
            format!(" {} [{}] (sagging plotted downward) ", series.title, series.unit)
        } else {
            format!(" {} [{}] ", series.title, series.unit)
        };

        let chart = Chart::new(datasets)
            .block(Block::bordered().title(title))
            .x_axis(
                Axis::default()
                    .title("x [m]")
                    .style(Style::default().fg(Color::Gray))
                    .bounds([0.0, series.x_max])
                    .labels(x_labels),
            )
            .y_axis(
                Axis::default()
                    .title(series.unit)
                    .style(Style::default().fg(Color::Gray))
                    .bounds(series.y_bounds)
                    .labels(y_labels),
            );
        frame.render_widget(chart, chart_area);

        let midspan = Millimeters::from(Meters(self.result.midspan_deflection_m)).0;
        let theory = Millimeters::from(Meters(self.result.theoretical_midspan_deflection_m)).0;
        let error = self
            .result
            .relative_error_percent()
            .map(|e| format!("{:.4} %", e))
            .unwrap_or_else(|| "n/a".to_string());
        let footer = Paragraph::new(vec![
            Line::from(format!(
                "mid-span δ = {:.4} mm   closed-form {:.4} mm   error {}",
                midspan, theory, error
            )),
            Line::from(Span::styled(
                "←/→ switch plot   1-4 jump   q quit",
                Style::default().fg(Color::DarkGray),
            )),
        ]);
        frame.render_widget(footer, footer_area);
    }
}

/// Show the plot viewer until the user quits.
///
/// Takes over the terminal (alternate screen, raw mode) and restores it on
/// exit, including when drawing fails.
pub fn show(label: &str, result: &DeflectionResult) -> io::Result<()> {
    let mut terminal = ratatui::init();
    let outcome = PlotViewer::new(label, result).run(&mut terminal);
    ratatui::restore();
    outcome
}
