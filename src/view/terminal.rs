//! Vista de terminal
//!
//! Pinta la tabla, el formulario y las notificaciones como texto. Los
//! colores se aplican solo si están activados, así la salida sin color se
//! puede comparar en los tests.

use std::io::Write;

use colored::{ColoredString, Colorize};

use crate::dto::vehicle_dto::{FormField, FormState};
use crate::models::vehicle::{badge_class, Vehicle, VehicleStatistics};
use crate::view::{DeletePrompt, Notification, NotificationKind, VehicleView};

const HEADERS: [&str; 8] = [
    "Marca", "Modelo", "Matrícula", "Año", "Color", "Precio", "Tipo", "Id",
];

pub struct TerminalView<W: Write + Send> {
    out: W,
    color: bool,
}

impl<W: Write + Send> TerminalView<W> {
    pub fn new(out: W, color: bool) -> Self {
        Self { out, color }
    }

    pub fn into_inner(self) -> W {
        self.out
    }

    fn paint(&self, text: &str, style: impl Fn(&str) -> ColoredString) -> String {
        if self.color {
            style(text).to_string()
        } else {
            text.to_string()
        }
    }

    fn badge(&self, category: &str, width: usize) -> String {
        let padded = pad(category, width);
        let class = badge_class(category);
        let style = |t: &str| match class.as_str() {
            "badge-coche" => t.blue(),
            "badge-moto" => t.magenta(),
            "badge-camion" => t.yellow(),
            "badge-furgoneta" => t.cyan(),
            "badge-suv" => t.green(),
            _ => t.white(),
        };
        self.paint(&padded, style)
    }

    // Los errores de escritura en la terminal no se pueden notificar a
    // ninguna parte; se registran y se siguen ignorando.
    fn emit(&mut self, text: &str) {
        if let Err(e) = writeln!(self.out, "{}", text).and_then(|_| self.out.flush()) {
            tracing::debug!("No se pudo escribir en la terminal: {}", e);
        }
    }
}

impl<W: Write + Send> VehicleView for TerminalView<W> {
    fn render(&mut self, vehicles: &[Vehicle]) {
        if vehicles.is_empty() {
            let line = self.paint("(sin vehículos)", |t| t.dimmed());
            self.emit(&line);
            return;
        }

        let rows: Vec<[String; 8]> = vehicles
            .iter()
            .map(|v| {
                [
                    v.brand.clone(),
                    v.model.clone(),
                    v.plate.clone(),
                    v.year.to_string(),
                    v.color.clone(),
                    format_price(v.price),
                    v.category.clone(),
                    v.id.clone(),
                ]
            })
            .collect();

        let mut widths = HEADERS.map(|h| h.chars().count());
        for row in &rows {
            for (i, cell) in row.iter().enumerate() {
                widths[i] = widths[i].max(cell.chars().count());
            }
        }

        let header = HEADERS
            .iter()
            .enumerate()
            .map(|(i, h)| pad(h, widths[i]))
            .collect::<Vec<_>>()
            .join(" | ");
        let header = self.paint(&header, |t| t.bold());
        let separator = widths
            .iter()
            .map(|w| "-".repeat(*w))
            .collect::<Vec<_>>()
            .join("-+-");

        let mut lines = vec![header, separator];
        for row in &rows {
            let cells: Vec<String> = row
                .iter()
                .enumerate()
                .map(|(i, cell)| match i {
                    2 => self.paint(&pad(cell, widths[i]), |t| t.bold()),
                    6 => self.badge(cell, widths[i]),
                    7 => self.paint(&pad(cell, widths[i]), |t| t.dimmed()),
                    _ => pad(cell, widths[i]),
                })
                .collect();
            lines.push(cells.join(" | "));
        }

        self.emit(&lines.join("\n"));
    }

    fn show_form(&mut self, form: &FormState) {
        let mut lines = vec![self.paint(form.title(), |t| t.bright_cyan().bold())];
        for field in FormField::ALL {
            let value = form.values.get(field);
            let shown = if value.is_empty() { "-" } else { value };
            lines.push(format!("  {:<10} {}", field.name(), shown));
        }
        let mut buttons = format!("  [{}]", form.submit_label());
        if form.show_cancel() {
            buttons.push_str(" [Cancelar]");
        }
        lines.push(self.paint(&buttons, |t| t.bright_yellow()));
        self.emit(&lines.join("\n"));
    }

    fn show_notification(&mut self, notification: &Notification) {
        let line = match notification.kind {
            NotificationKind::Success => {
                self.paint(&format!("✅ {}", notification.message), |t| t.bright_green())
            }
            NotificationKind::Error => {
                self.paint(&format!("❌ {}", notification.message), |t| t.bright_red())
            }
            NotificationKind::Info => {
                self.paint(&format!("ℹ️  {}", notification.message), |t| t.bright_blue())
            }
        };
        self.emit(&line);
    }

    fn update_total(&mut self, total: usize) {
        let line = format!("🚗 Total vehículos: {}", total);
        self.emit(&line);
    }

    fn show_delete_prompt(&mut self, prompt: &DeletePrompt) {
        let line = self.paint(
            &format!("{} (si / no)", prompt.message()),
            |t| t.bright_yellow().bold(),
        );
        self.emit(&line);
    }

    fn close_delete_prompt(&mut self) {
        tracing::debug!("Confirmación de borrado cerrada");
    }

    fn show_statistics(&mut self, statistics: &VehicleStatistics) {
        let mut lines = vec![self.paint("📊 Estadísticas", |t| t.bright_cyan().bold())];
        lines.push(format!("  Total: {}", statistics.total));
        lines.push(format!(
            "  Precio promedio: {}",
            format_price(statistics.average_price)
        ));
        lines.push(format!("  Por marca: {}", format_counts(&statistics.by_brand)));
        lines.push(format!("  Por tipo: {}", format_counts(&statistics.by_category)));
        self.emit(&lines.join("\n"));
    }
}

fn pad(text: &str, width: usize) -> String {
    let len = text.chars().count();
    format!("{}{}", text, " ".repeat(width.saturating_sub(len)))
}

fn format_counts(counts: &std::collections::HashMap<String, u64>) -> String {
    let mut entries: Vec<(&String, &u64)> = counts.iter().collect();
    entries.sort_by(|a, b| b.1.cmp(a.1).then_with(|| a.0.cmp(b.0)));
    if entries.is_empty() {
        return "-".to_string();
    }
    entries
        .iter()
        .map(|(k, v)| format!("{} ({})", k, v))
        .collect::<Vec<_>>()
        .join(", ")
}

/// Precio en euros con separador de miles '.' y decimales con ','
pub fn format_price(price: f64) -> String {
    let cents = (price * 100.0).round() as i64;
    let sign = if cents < 0 { "-" } else { "" };
    let cents = cents.unsigned_abs();
    let units = cents / 100;
    let fraction = cents % 100;

    let digits = units.to_string();
    let mut grouped = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, ch) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            grouped.push('.');
        }
        grouped.push(ch);
    }

    let decimals = match fraction {
        0 => String::new(),
        f if f % 10 == 0 => format!(",{}", f / 10),
        f => format!(",{:02}", f),
    };

    format!("{}€{}{}", sign, grouped, decimals)
}
