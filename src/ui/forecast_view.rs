//! Current conditions and 12-period forecast panels

use ratatui::{
    layout::{Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph},
    Frame,
};

use crate::data::{ForecastPeriod, WeatherResult};

/// Periods shown in the forecast grid after the current one
pub const FORECAST_CELLS: usize = 12;

const CURRENT_HEIGHT: u16 = 5;
const CELL_HEIGHT: u16 = 6;
const COLUMNS: usize = 3;

/// Total rows needed to render `result`
pub fn height(result: &WeatherResult) -> u16 {
    let cells = result.upcoming().len().min(FORECAST_CELLS);
    let rows = cells.div_ceil(COLUMNS) as u16;
    CURRENT_HEIGHT + rows * CELL_HEIGHT + 2
}

/// Renders the current period and the upcoming forecast grid
pub fn render(frame: &mut Frame, result: &WeatherResult) {
    let area = frame.area();
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Length(CURRENT_HEIGHT), Constraint::Min(0)])
        .split(area);

    render_current(frame, chunks[0], result);
    let upcoming = result.upcoming();
    render_forecast(frame, chunks[1], &upcoming[..upcoming.len().min(FORECAST_CELLS)]);
}

fn render_current(frame: &mut Frame, area: Rect, result: &WeatherResult) {
    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(Style::default().fg(Color::Cyan));

    let Some(current) = result.current() else {
        let lines = vec![
            location_line(&result.location_name, None),
            Line::from(Span::styled(
                "No forecast periods available",
                Style::default().fg(Color::DarkGray),
            )),
        ];
        frame.render_widget(Paragraph::new(lines).block(block), area);
        return;
    };

    let unit = current.temperature_unit.as_deref().unwrap_or("F");
    let lines = vec![
        location_line(&result.location_name, current.short_forecast.as_deref()),
        Line::from(vec![
            Span::raw("Temperature: "),
            Span::styled(
                format!("{}°{}", or_na(current.temperature_text().as_deref()), unit),
                Style::default().add_modifier(Modifier::BOLD),
            ),
        ]),
        Line::from(format!(
            "Wind: {} {}",
            or_na(current.wind_direction.as_deref()),
            or_na(current.wind_speed.as_deref())
        )),
    ];

    frame.render_widget(Paragraph::new(lines).block(block), area);
}

fn location_line(location: &str, conditions: Option<&str>) -> Line<'static> {
    let mut spans = vec![Span::styled(
        location.to_string(),
        Style::default().fg(Color::Cyan).add_modifier(Modifier::BOLD),
    )];
    if let Some(conditions) = conditions {
        spans.push(Span::raw("  "));
        spans.push(Span::styled(conditions.to_string(), Style::default().fg(Color::Yellow)));
    }
    Line::from(spans)
}

fn render_forecast(frame: &mut Frame, area: Rect, periods: &[ForecastPeriod]) {
    let block = Block::default()
        .title(Span::styled(
            " 12-Hour Forecast ",
            Style::default().add_modifier(Modifier::BOLD),
        ))
        .borders(Borders::ALL)
        .border_style(Style::default().fg(Color::Green));
    let inner = block.inner(area);
    frame.render_widget(block, area);

    if periods.is_empty() {
        return;
    }

    let row_count = periods.len().div_ceil(COLUMNS);
    let rows = Layout::default()
        .direction(Direction::Vertical)
        .constraints(vec![Constraint::Length(CELL_HEIGHT); row_count])
        .split(inner);

    for (row_area, row_periods) in rows.iter().zip(periods.chunks(COLUMNS)) {
        let columns = Layout::default()
            .direction(Direction::Horizontal)
            .constraints([Constraint::Ratio(1, 3); COLUMNS])
            .split(*row_area);

        for (cell_area, period) in columns.iter().zip(row_periods) {
            render_cell(frame, *cell_area, period);
        }
    }
}

fn render_cell(frame: &mut Frame, area: Rect, period: &ForecastPeriod) {
    let lines = vec![
        Line::from(Span::styled(
            or_na(period.name.as_deref()).to_string(),
            Style::default().add_modifier(Modifier::BOLD),
        )),
        Line::from(format!("{}°", or_na(period.temperature_text().as_deref()))),
        Line::from(or_na(period.short_forecast.as_deref()).to_string()),
        Line::from(format!("Wind: {}", or_na(period.wind_speed.as_deref()))),
    ];

    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(Style::default().fg(Color::Green));

    frame.render_widget(Paragraph::new(lines).block(block), area);
}

fn or_na(value: Option<&str>) -> &str {
    value.unwrap_or("N/A")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::{Coordinates, GridPoint};
    use ratatui::{backend::TestBackend, Terminal};
    use serde_json::json;

    fn create_test_result(period_count: usize) -> WeatherResult {
        let periods = (0..period_count)
            .map(|i| ForecastPeriod {
                name: Some(format!("Day{}", i)),
                temperature: Some(json!(60 + i)),
                temperature_unit: Some("F".to_string()),
                short_forecast: Some("Sunny".to_string()),
                wind_speed: Some("10 mph".to_string()),
                wind_direction: Some("NW".to_string()),
                ..Default::default()
            })
            .collect();

        WeatherResult::assemble(
            Coordinates::new(39.78, -89.65),
            GridPoint {
                grid_id: "LOT".to_string(),
                grid_x: 10,
                grid_y: 20,
                forecast_url: "https://x/forecast".to_string(),
                location_name: "Springfield".to_string(),
            },
            periods,
        )
    }

    fn render_to_string(result: &WeatherResult) -> String {
        let backend = TestBackend::new(90, height(result));
        let mut terminal = Terminal::new(backend).unwrap();
        terminal.draw(|frame| render(frame, result)).unwrap();

        let buffer = terminal.backend().buffer();
        buffer.content().iter().map(|cell| cell.symbol()).collect()
    }

    #[test]
    fn test_height_grows_with_rows() {
        assert_eq!(height(&create_test_result(1)), CURRENT_HEIGHT + 2);
        assert_eq!(height(&create_test_result(4)), CURRENT_HEIGHT + CELL_HEIGHT + 2);
        assert_eq!(height(&create_test_result(13)), CURRENT_HEIGHT + 4 * CELL_HEIGHT + 2);
    }

    #[test]
    fn test_renders_current_conditions() {
        let content = render_to_string(&create_test_result(13));

        assert!(content.contains("Springfield"), "Should render location");
        assert!(content.contains("Temperature: 60°F"), "Should render current temperature");
        assert!(content.contains("Wind: NW 10 mph"), "Should render current wind");
    }

    #[test]
    fn test_renders_forecast_grid() {
        let content = render_to_string(&create_test_result(13));

        assert!(content.contains("12-Hour Forecast"), "Should render forecast title");
        assert!(content.contains("Day1"), "Should render first upcoming period");
        assert!(content.contains("Day12"), "Should render twelfth upcoming period");
        assert!(content.contains("72°"), "Should render period temperature");
    }

    #[test]
    fn test_missing_fields_render_as_na() {
        let mut result = create_test_result(2);
        result.periods[0] = ForecastPeriod::default();

        let content = render_to_string(&result);

        assert!(content.contains("Temperature: N/A°F"));
        assert!(content.contains("Wind: N/A N/A"));
    }

    #[test]
    fn test_handles_empty_periods_gracefully() {
        let content = render_to_string(&create_test_result(0));

        assert!(content.contains("Springfield"));
        assert!(content.contains("No forecast periods available"));
    }
}
