//! Terminal rendering of the view models.

use console::{style, Term};
use hazardmap_map::{LayerShape, MapLayer, MapState};
use hazardmap_ui::{
    BannerTone, ControlsView, CountsView, EventCardView, StatusBanner, Surface,
};
use tabled::{settings::Style, Table, Tabled};

const BAR_WIDTH: u32 = 20;

#[derive(Tabled)]
struct LayerRow {
    #[tabled(rename = "Event")]
    event_id: String,
    #[tabled(rename = "Shape")]
    shape: String,
    #[tabled(rename = "Location")]
    location: String,
    #[tabled(rename = "Title")]
    title: String,
    #[tabled(rename = "Category")]
    category: String,
    #[tabled(rename = "Date")]
    date: String,
    #[tabled(rename = "")]
    state: String,
}

#[derive(Tabled)]
struct CountRowDisplay {
    #[tabled(rename = "Category")]
    title: String,
    #[tabled(rename = "Events")]
    count: usize,
    #[tabled(rename = "")]
    bar: String,
}

/// Surface that prints every update to stdout
pub struct TerminalSurface {
    term: Term,
    // Layer ids of the last full map print
    shown_layers: Vec<String>,
}

impl TerminalSurface {
    pub fn stdout() -> Self {
        Self { term: Term::stdout(), shown_layers: Vec::new() }
    }

    fn write(&self, text: &str) {
        if let Err(e) = self.term.write_line(text) {
            tracing::warn!(error = %e, "Failed to write to terminal");
        }
    }
}

impl Surface for TerminalSurface {
    fn set_banner(&mut self, banner: &StatusBanner) {
        if let Some(text) = format_banner(banner) {
            self.write(&text);
        }
    }

    fn show_controls(&mut self, controls: &ControlsView) {
        self.write(&format_controls(controls));
    }

    fn show_map(&mut self, map: &MapState) {
        let ids: Vec<String> = map.layers().iter().map(|l| l.event_id.clone()).collect();
        if ids != self.shown_layers {
            self.write(&format_layers(map));
            self.shown_layers = ids;
        }
        self.write(&format_view(map));
    }

    fn show_counts(&mut self, counts: &CountsView) {
        self.write(&format_counts(counts));
    }

    fn show_event_card(&mut self, card: &EventCardView) {
        self.write(&format_card(card));
    }
}

pub fn format_banner(banner: &StatusBanner) -> Option<String> {
    if !banner.visible {
        return None;
    }
    Some(match banner.tone {
        BannerTone::Info => format!("{} {}", style("…").cyan(), style(&banner.text).dim()),
        BannerTone::Error => format!("{} {}", style("✗").red().bold(), style(&banner.text).red()),
    })
}

pub fn format_controls(controls: &ControlsView) -> String {
    let statuses: Vec<String> = controls
        .status_options
        .iter()
        .map(|o| if o.selected { format!("[{}]", o.label) } else { o.label.to_lowercase() })
        .collect();
    let limits: Vec<String> = controls
        .limit_options
        .iter()
        .map(|o| if o.selected { format!("[{}]", o.label) } else { o.label.clone() })
        .collect();

    let mut out = format!(
        "{} {}   {} {}",
        style("Status:").bold(),
        statuses.join(" "),
        style("Limit:").bold(),
        limits.join(" ")
    );
    out.push('\n');
    out.push_str(&style("Categories:").bold().to_string());
    for pill in &controls.pills {
        let marker = if pill.is_on { style("●").green() } else { style("○").dim() };
        out.push_str(&format!("\n  {} {} ({})", marker, pill.title, pill.id));
    }
    out
}

pub fn format_layers(map: &MapState) -> String {
    if map.layers().is_empty() {
        return style("(no events on the map)").dim().to_string();
    }
    let rows: Vec<LayerRow> = map.layers().iter().map(layer_row).collect();
    let mut table = Table::new(rows);
    table.with(Style::rounded());
    table.to_string()
}

fn layer_row(layer: &MapLayer) -> LayerRow {
    let (shape, location) = match &layer.shape {
        LayerShape::Marker { center } => {
            ("marker".to_string(), format!("{:.3}, {:.3}", center.lat, center.lng))
        }
        LayerShape::Polygon { rings, bounds } => (
            format!("polygon ({} ring{})", rings.len(), if rings.len() == 1 { "" } else { "s" }),
            format!(
                "{:.2}, {:.2} .. {:.2}, {:.2}",
                bounds.south_west.lat, bounds.south_west.lng, bounds.north_east.lat, bounds.north_east.lng
            ),
        ),
    };

    let state = if layer.flashing {
        "flash"
    } else if layer.hovered {
        "hover"
    } else {
        ""
    };

    LayerRow {
        event_id: layer.event_id.clone(),
        shape,
        location,
        title: layer.tooltip.title.clone(),
        category: layer.tooltip.category.clone(),
        date: layer.tooltip.date_label.clone(),
        state: state.to_string(),
    }
}

pub fn format_view(map: &MapState) -> String {
    let viewport = &map.viewport;
    let mut out = format!(
        "{} center {:.3}, {:.3} zoom {:.0}",
        style("View:").bold(),
        viewport.center.lat,
        viewport.center.lng,
        viewport.zoom
    );
    let highlighted: Vec<String> = map.layers().iter().filter_map(highlight).collect();
    if !highlighted.is_empty() {
        out.push_str(&format!("   {}", highlighted.join(", ")));
    }
    out
}

fn highlight(layer: &MapLayer) -> Option<String> {
    if layer.flashing {
        Some(format!("{} {}", style("✦").white().bold(), layer.event_id))
    } else if layer.hovered {
        Some(format!("{} {}", style("▸").yellow(), layer.tooltip.text().replace('\n', " | ")))
    } else {
        None
    }
}

pub fn format_counts(counts: &CountsView) -> String {
    match counts {
        CountsView::Placeholder { message } => style(message).dim().to_string(),
        CountsView::Rows { rows } => {
            let rows: Vec<CountRowDisplay> = rows
                .iter()
                .map(|row| CountRowDisplay {
                    title: row.title.clone(),
                    count: row.count,
                    bar: "█".repeat((row.width_percent * BAR_WIDTH / 100) as usize),
                })
                .collect();
            let mut table = Table::new(rows);
            table.with(Style::rounded());
            table.to_string()
        }
    }
}

pub fn format_card(card: &EventCardView) -> String {
    let card = match card {
        EventCardView::Placeholder { message } => return style(message).dim().italic().to_string(),
        EventCardView::Card(card) => card,
    };

    let mut out = style(&card.title).bold().to_string();
    out.push_str(&format!("\n  Categories: {}", card.tags.join(", ")));
    out.push_str(&format!("\n  Status: {}", card.status));
    out.push_str(&format!("\n  Latest geometry: {}", card.latest_geometry));
    out.push_str(&format!("\n  Geometry samples: {}", card.geometry_count));
    if let Some(id) = &card.zoom_target {
        out.push_str(&format!("\n  {}", style(format!("zoom {}", id)).cyan()));
    }
    out.push_str("\n  Sources:");
    match card.sources_placeholder() {
        Some(placeholder) => out.push_str(&format!(" {}", style(placeholder).dim())),
        None => {
            for source in &card.sources {
                match &source.url {
                    Some(url) => out.push_str(&format!("\n    {} <{}>", source.label, url)),
                    None => out.push_str(&format!("\n    {}", source.label)),
                }
            }
        }
    }
    out
}
