use chrono::{DateTime, Local};
use ratatui::Frame;
use ratatui::layout::{Alignment, Constraint, Layout, Rect};
use ratatui::style::{Color, Modifier, Style};
use ratatui::symbols::Marker;
use ratatui::text::{Line, Span};
use ratatui::widgets::{Axis, Block, Chart, Dataset, GraphType, Paragraph, Wrap};

use crate::format::{format_money, format_percent, format_price};
use crate::model::{AssetQuote, Currency, PricePoint};
use crate::state::{Dashboard, ViewState};

const MIN_CARD_WIDTH: u16 = 32;
const SPARK_LEVELS: [char; 8] = ['▁', '▂', '▃', '▄', '▅', '▆', '▇', '█'];

pub fn render(frame: &mut Frame, dashboard: &Dashboard) {
    let [header, body, footer] = Layout::vertical([
        Constraint::Length(3),
        Constraint::Min(6),
        Constraint::Length(3),
    ])
    .areas(frame.area());

    render_header(frame, header, dashboard);
    match dashboard.view() {
        ViewState::Loading => {
            let msg = Paragraph::new("Loading prices…")
                .alignment(Alignment::Center)
                .block(Block::bordered());
            frame.render_widget(msg, body);
        }
        ViewState::Error(err) => {
            let msg = Paragraph::new(vec![
                Line::from(Span::styled(
                    "Failed to load prices",
                    Style::new().fg(Color::Red).add_modifier(Modifier::BOLD),
                )),
                Line::from(err.as_str()),
                Line::from(Span::styled(
                    "Retrying on the next poll.",
                    Style::new().fg(Color::DarkGray),
                )),
            ])
            .alignment(Alignment::Center)
            .wrap(Wrap { trim: true })
            .block(Block::bordered().border_style(Style::new().fg(Color::Red)));
            frame.render_widget(msg, body);
        }
        ViewState::Ready(assets) => render_cards(frame, body, assets, dashboard.currency()),
    }
    render_footer(frame, footer);
}

fn render_header(frame: &mut Frame, area: Rect, dashboard: &Dashboard) {
    let currency = dashboard.currency();
    let status = match (dashboard.view(), dashboard.last_update_ms()) {
        (ViewState::Loading, _) => Span::styled("connecting", Style::new().fg(Color::Yellow)),
        (ViewState::Error(_), _) => Span::styled("error", Style::new().fg(Color::Red)),
        (ViewState::Ready(_), Some(ms)) => Span::styled(
            format!("live · updated {}", clock(ms)),
            Style::new().fg(Color::Green),
        ),
        (ViewState::Ready(_), None) => Span::styled("live", Style::new().fg(Color::Green)),
    };
    let line = Line::from(vec![
        Span::styled(
            "Real-time Crypto Prices",
            Style::new().add_modifier(Modifier::BOLD),
        ),
        Span::raw("   "),
        Span::styled(
            format!("{} ({})", currency.code(), currency.symbol()),
            Style::new().fg(Color::Cyan),
        ),
        Span::raw("   "),
        status,
    ]);
    frame.render_widget(Paragraph::new(line).block(Block::bordered()), area);
}

fn render_footer(frame: &mut Frame, area: Rect) {
    let help = Line::from(vec![
        Span::styled("c", Style::new().fg(Color::Cyan)),
        Span::raw(" toggle USD/INR   "),
        Span::styled("q", Style::new().fg(Color::Cyan)),
        Span::raw(" quit"),
    ]);
    frame.render_widget(Paragraph::new(help).block(Block::bordered()), area);
}

fn render_cards(frame: &mut Frame, area: Rect, assets: &[AssetQuote], currency: Currency) {
    if assets.is_empty() {
        let msg = Paragraph::new("No assets reported")
            .alignment(Alignment::Center)
            .block(Block::bordered());
        frame.render_widget(msg, area);
        return;
    }

    let n = assets.len() as u32;
    let constraints = vec![Constraint::Ratio(1, n); assets.len()];
    let side_by_side = u32::from(area.width) >= u32::from(MIN_CARD_WIDTH) * n;
    let areas = if side_by_side {
        Layout::horizontal(constraints).split(area)
    } else {
        Layout::vertical(constraints).split(area)
    };
    for (asset, card) in assets.iter().zip(areas.iter()) {
        render_card(frame, *card, asset, currency);
    }
}

fn render_card(frame: &mut Frame, area: Rect, asset: &AssetQuote, currency: Currency) {
    let accent = asset
        .color
        .as_deref()
        .and_then(parse_hex_color)
        .unwrap_or(Color::Cyan);
    let block = Block::bordered()
        .border_style(Style::new().fg(accent))
        .title(Line::from(vec![
            Span::styled(
                format!(" {} ", asset.name),
                Style::new().fg(accent).add_modifier(Modifier::BOLD),
            ),
            Span::raw(format!("{} ", asset.symbol)),
        ]));
    let inner = block.inner(area);
    frame.render_widget(block, area);

    let [summary, chart] =
        Layout::vertical([Constraint::Length(2), Constraint::Min(1)]).areas(inner);

    let change = asset.change(currency);
    let change_color = if change >= 0.0 { Color::Green } else { Color::Red };
    let lines = vec![
        Line::from(Span::styled(
            format_money(currency, asset.price(currency)),
            Style::new().add_modifier(Modifier::BOLD),
        )),
        Line::from(Span::styled(
            format!("{} (24h)", format_percent(change)),
            Style::new().fg(change_color),
        )),
    ];
    frame.render_widget(Paragraph::new(lines), summary);
    render_chart(frame, chart, &asset.price_history, currency, accent);
}

fn render_chart(
    frame: &mut Frame,
    area: Rect,
    history: &[PricePoint],
    currency: Currency,
    accent: Color,
) {
    let points = chart_points(history, currency);
    if points.len() < 2 || area.height < 2 {
        frame.render_widget(
            Paragraph::new("Waiting for history…").style(Style::new().fg(Color::DarkGray)),
            area,
        );
        return;
    }

    let x_max = points.last().map_or(1.0, |p| p.0).max(1.0);
    let [lo, hi] = y_bounds(&points);
    let dataset = Dataset::default()
        .marker(Marker::Braille)
        .graph_type(GraphType::Line)
        .style(Style::new().fg(accent))
        .data(&points);
    let chart = Chart::new(vec![dataset])
        .x_axis(Axis::default().bounds([0.0, x_max]))
        .y_axis(
            Axis::default()
                .bounds([lo, hi])
                .style(Style::new().fg(Color::DarkGray))
                .labels([format_price(lo), format_price(hi)]),
        );
    frame.render_widget(chart, area);
}

/// `(seconds since first sample, price)` pairs for the chart.
pub fn chart_points(history: &[PricePoint], currency: Currency) -> Vec<(f64, f64)> {
    let Some(first) = history.first() else {
        return Vec::new();
    };
    history
        .iter()
        .map(|p| ((p.time - first.time) as f64 / 1_000.0, p.value(currency)))
        .collect()
}

/// Y-axis range with a little headroom. A flat series gets a small band
/// around its value so the line sits mid-chart.
pub fn y_bounds(points: &[(f64, f64)]) -> [f64; 2] {
    let (lo, hi) = points
        .iter()
        .fold((f64::INFINITY, f64::NEG_INFINITY), |(lo, hi), &(_, y)| {
            (lo.min(y), hi.max(y))
        });
    if !lo.is_finite() || !hi.is_finite() {
        return [0.0, 1.0];
    }
    let range = hi - lo;
    let pad = if range > 0.0 {
        range * 0.05
    } else {
        (hi.abs() * 0.001).max(f64::EPSILON)
    };
    [lo - pad, hi + pad]
}

pub fn parse_hex_color(hex: &str) -> Option<Color> {
    let digits = hex.strip_prefix('#')?;
    if digits.len() != 6 || !digits.is_ascii() {
        return None;
    }
    let channel = |i: usize| u8::from_str_radix(&digits[i..i + 2], 16).ok();
    Some(Color::Rgb(channel(0)?, channel(2)?, channel(4)?))
}

/// Text sparkline of at most `width` characters, newest sample last.
pub fn text_sparkline(values: &[f64], width: usize) -> String {
    if values.is_empty() || width == 0 {
        return String::new();
    }
    let step = values.len().div_ceil(width);
    let sampled: Vec<f64> = values.iter().copied().step_by(step).collect();
    let lo = sampled.iter().copied().fold(f64::INFINITY, f64::min);
    let hi = sampled.iter().copied().fold(f64::NEG_INFINITY, f64::max);
    let range = hi - lo;
    sampled
        .iter()
        .map(|&v| {
            if range <= 0.0 {
                SPARK_LEVELS[SPARK_LEVELS.len() / 2]
            } else {
                let idx = ((v - lo) / range * (SPARK_LEVELS.len() - 1) as f64).round() as usize;
                SPARK_LEVELS[idx.min(SPARK_LEVELS.len() - 1)]
            }
        })
        .collect()
}

/// Plain-text cards, one line per asset, for non-interactive output.
pub fn plain_cards(assets: &[AssetQuote], currency: Currency) -> String {
    let mut out = String::new();
    for asset in assets {
        let values: Vec<f64> = asset.price_history.iter().map(|p| p.value(currency)).collect();
        out.push_str(&format!(
            "{:<12} {:<5} {:>18} {:>8}  {}\n",
            asset.name,
            asset.symbol,
            format_money(currency, asset.price(currency)),
            format_percent(asset.change(currency)),
            text_sparkline(&values, 40),
        ));
    }
    out
}

fn clock(ms: i64) -> String {
    DateTime::from_timestamp_millis(ms)
        .map(|dt| dt.with_timezone(&Local).format("%H:%M:%S").to_string())
        .unwrap_or_else(|| "--:--:--".to_string())
}
