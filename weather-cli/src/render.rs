//! Text rendering of the dashboard widgets.

use chrono::NaiveDate;
use crossterm::style::Stylize;
use std::fmt::Write;

use weather_core::{
    PlaceCandidate, Theme, Units, ViewSnapshot, WeatherData,
    model::{CurrentConditions, DailyForecast, HourlyForecast},
};

use crate::{chart, palette::Palette, radar};

const CHART_COLS: usize = 48;
const CHART_ROWS: usize = 7;
const RADAR_RADIUS: usize = 5;
const NOT_AVAILABLE: &str = "N/A";

/// Everything a render needs besides the data itself.
pub struct View {
    pub theme: Theme,
    pub units: Units,
    pub radar: Vec<radar::Blip>,
}

/// Full dashboard for a snapshot with weather data.
pub fn dashboard(data: &WeatherData, view: &View) -> String {
    let palette = Palette::for_condition(data.current.condition, view.theme);
    let mut out = String::new();

    current_card(&mut out, data, view, &palette);
    hourly_list(&mut out, &data.forecast.hourly, view, &palette);
    trend_chart(&mut out, &data.forecast.hourly, view, &palette);
    daily_list(&mut out, &data.forecast.daily, view, &palette);
    radar_panel(&mut out, view, &palette);

    out
}

/// Full-screen failure state shown when no data could be loaded.
pub fn failure(snapshot: &ViewSnapshot, theme: Theme) -> String {
    let palette = Palette::neutral(theme);
    let message = snapshot.error.as_deref().unwrap_or("Failed to load weather data");

    format!(
        "\n  {}\n\n  {}\n",
        message.with(palette.error).bold(),
        "Try again with `weather now`, or pick a place with `weather search <city> --pick`."
            .with(palette.muted),
    )
}

pub fn search_results(places: &[PlaceCandidate], theme: Theme) -> String {
    let palette = Palette::neutral(theme);
    let mut out = String::new();
    for (i, place) in places.iter().enumerate() {
        let _ = writeln!(
            out,
            "{} {}  {}",
            format!("{:>2}.", i + 1).with(palette.muted),
            place.name,
            format!("({:.4}, {:.4})", place.lat, place.lon).with(palette.muted),
        );
    }
    out
}

fn heading(out: &mut String, title: &str, palette: &Palette) {
    let _ = writeln!(out, "\n{}", title.with(palette.accent).bold());
}

fn current_card(out: &mut String, data: &WeatherData, view: &View, palette: &Palette) {
    let loc = &data.location;
    let place = [loc.name.as_str(), loc.region.as_str(), loc.country.as_str()]
        .into_iter()
        .filter(|s| !s.is_empty())
        .collect::<Vec<_>>()
        .join(", ");
    heading(out, &place, palette);

    let c: &CurrentConditions = &data.current;
    let _ = writeln!(
        out,
        "  {}  {}  (feels like {})",
        temp(c.temp, view.units).bold(),
        c.condition,
        temp(c.feels_like, view.units),
    );

    let rows = [
        ("Humidity", format!("{:.0}%", c.humidity)),
        (
            "Wind",
            format!(
                "{} {}",
                wind(c.wind_speed, view.units),
                c.wind_direction.as_deref().unwrap_or(NOT_AVAILABLE)
            ),
        ),
        ("Pressure", optional(c.pressure, |p| pressure(p, view.units))),
        ("UV index", optional(c.uv_index, |uv| format!("{uv:.0} ({})", uv_level(uv)))),
        ("Visibility", optional(c.visibility, |v| format!("{v:.0} km"))),
        ("Cloud cover", optional(c.cloud_cover, |cc| format!("{cc:.0}%"))),
    ];
    for (label, value) in rows {
        let _ = writeln!(out, "  {:<12} {}", label.with(palette.muted), value);
    }

    if !data.alerts.is_empty() {
        for alert in &data.alerts {
            let _ = writeln!(out, "  {} {}", "!".with(palette.error).bold(), alert.title);
        }
    }
}

fn hourly_list(out: &mut String, hours: &[HourlyForecast], view: &View, palette: &Palette) {
    heading(out, "Hourly", palette);
    for h in hours {
        let _ = writeln!(
            out,
            "  {:>5}  {:>6}  {:<13}  {}",
            hour_label(&h.time),
            temp(h.temp, view.units),
            h.condition.to_string(),
            wind(h.wind_speed, view.units).with(palette.muted),
        );
    }
}

fn trend_chart(out: &mut String, hours: &[HourlyForecast], view: &View, palette: &Palette) {
    if hours.is_empty() {
        return;
    }
    heading(out, "Temperature Trend", palette);

    let unit = view.units.temperature;
    let temps: Vec<f64> = hours.iter().map(|h| unit.convert(h.temp)).collect();
    for row in chart::plot(&temps, CHART_COLS, CHART_ROWS) {
        let _ = writeln!(out, "  {}", row.with(palette.accent));
    }

    let first = hours.first().map(|h| hour_label(&h.time)).unwrap_or_default();
    let last = hours.last().map(|h| hour_label(&h.time)).unwrap_or_default();
    let gap = CHART_COLS.saturating_sub(first.len() + last.len());
    let _ = writeln!(
        out,
        "  {}{}{}",
        first.with(palette.muted),
        " ".repeat(gap),
        last.with(palette.muted)
    );
}

fn daily_list(out: &mut String, days: &[DailyForecast], view: &View, palette: &Palette) {
    heading(out, "7-Day Forecast", palette);
    for d in days {
        let _ = writeln!(
            out,
            "  {:<20}  {:>6} / {:<6}  {:<13}  {}  {}",
            date_label(&d.date),
            temp(d.temp_high, view.units),
            temp(d.temp_low, view.units),
            d.condition.to_string(),
            wind(d.wind_speed, view.units).with(palette.muted),
            optional(d.humidity, |h| format!("{h:.0}% rh")).with(palette.muted),
        );
    }
}

fn radar_panel(out: &mut String, view: &View, palette: &Palette) {
    heading(out, "Weather Radar", palette);
    for row in radar::draw(&view.radar, RADAR_RADIUS) {
        let _ = writeln!(out, "  {row}");
    }
    let _ = writeln!(out, "  {}", radar::LAYERS.join(" · ").with(palette.muted));
}

fn temp(celsius: f64, units: Units) -> String {
    format!("{:.0}{}", units.temperature.convert(celsius), units.temperature.symbol())
}

fn pressure(hpa: f64, units: Units) -> String {
    format!("{:.1} {}", units.pressure.convert(hpa), units.pressure.symbol())
}

fn wind(kmh: f64, units: Units) -> String {
    format!("{:.0} {}", units.wind_speed.convert(kmh), units.wind_speed.symbol())
}

fn optional(value: Option<f64>, f: impl FnOnce(f64) -> String) -> String {
    value.map(f).unwrap_or_else(|| NOT_AVAILABLE.to_string())
}

/// "01 PM" → "1 PM".
fn hour_label(time: &str) -> String {
    time.strip_prefix('0').unwrap_or(time).to_string()
}

/// "2025-06-02" → "Monday, Jun 2". Unparseable dates are shown as-is.
fn date_label(date: &str) -> String {
    NaiveDate::parse_from_str(date, "%Y-%m-%d")
        .map(|d| d.format("%A, %b %-d").to_string())
        .unwrap_or_else(|_| date.to_string())
}

fn uv_level(uv: f64) -> &'static str {
    match uv {
        u if u <= 2.0 => "Low",
        u if u <= 5.0 => "Moderate",
        u if u <= 7.0 => "High",
        u if u <= 10.0 => "Very High",
        _ => "Extreme",
    }
}
