use chrono::{DateTime, TimeZone};
use comfy_table::{Attribute, Cell, CellAlignment, Color, Table, modifiers, presets};
use fennec_triggers::{
    core::slot::{PriceLevel, PriceSlot},
    ops::Aggregate,
};

#[must_use]
pub fn build_slots_table<Z: TimeZone>(
    slots: &[PriceSlot],
    current: Option<&PriceSlot>,
    zone: &Z,
) -> Table
where
    Z::Offset: std::fmt::Display,
{
    let average = slots.iter().map(|slot| slot.total).mean();

    let mut table = Table::new();
    table.load_preset(presets::UTF8_FULL_CONDENSED).apply_modifier(modifiers::UTF8_ROUND_CORNERS);
    table.enforce_styling();
    table.set_header(vec!["Start", "End", "Total", "Energy", "Tax", "Level"]);
    for slot in slots {
        let is_current = current.is_some_and(|current| current.starts_at == slot.starts_at);
        let start = Cell::new(local_time(&slot.starts_at, zone));
        table.add_row(vec![
            if is_current { start.add_attribute(Attribute::Bold).fg(Color::Cyan) } else { start },
            Cell::new(local_time(&slot.ends_at(), zone)).add_attribute(Attribute::Dim),
            Cell::new(slot.total).set_alignment(CellAlignment::Right).fg(
                match average {
                    Some(average) if slot.total > average => Color::Red,
                    Some(_) => Color::Green,
                    None => Color::Reset,
                },
            ),
            Cell::new(slot.energy).set_alignment(CellAlignment::Right),
            Cell::new(slot.tax).set_alignment(CellAlignment::Right).add_attribute(Attribute::Dim),
            Cell::new(format!("{:?}", slot.level)).fg(match slot.level {
                PriceLevel::VeryCheap => Color::Green,
                PriceLevel::Cheap => Color::DarkGreen,
                PriceLevel::Normal => Color::Reset,
                PriceLevel::Expensive => Color::DarkYellow,
                PriceLevel::VeryExpensive => Color::Red,
            }),
        ]);
    }
    table
}

fn local_time<Z: TimeZone, Z2: TimeZone>(time: &DateTime<Z2>, zone: &Z) -> String
where
    Z::Offset: std::fmt::Display,
{
    time.with_timezone(zone).format("%H:%M").to_string()
}
