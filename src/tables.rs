use comfy_table::{Attribute, Cell, CellAlignment, Color, Table, modifiers, presets};

use crate::{
    core::{
        average::AverageConsumption,
        plant::Plant,
        week::{WINDOW, WeeklyConsumption, WeeklyConsumptionMap},
    },
    planner::OptimalSchedule,
    quantity::{cost::Cost, energy::KilowattHours},
};

fn new_table() -> Table {
    let mut table = Table::new();
    table
        .load_preset(presets::UTF8_FULL_CONDENSED)
        .apply_modifier(modifiers::UTF8_ROUND_CORNERS)
        .enforce_styling();
    table
}

pub fn build_averages_table(averages: &[AverageConsumption]) -> Table {
    let mut table = new_table();
    table.set_header(vec!["Plant", "Daily average"]);
    for entry in averages {
        table.add_row(vec![
            Cell::new(&entry.plant_name),
            Cell::new(entry.average).set_alignment(CellAlignment::Right).fg(
                if entry.average > KilowattHours::ZERO { Color::Reset } else { Color::DarkGrey },
            ),
        ]);
    }
    table
}

pub fn build_weekly_table(plants: &[Plant], weekly_consumption: &WeeklyConsumptionMap) -> Table {
    let mut table = new_table();
    let mut header = vec![Cell::new("Plant")];
    header.extend(WINDOW.map(|day| Cell::new(format!("Day {day}"))));
    header.push(Cell::new("Total"));
    table.set_header(header);

    for plant in plants {
        let week = weekly_consumption.get(plant.id).copied().unwrap_or(WeeklyConsumption::ZERO);
        let mut row = vec![Cell::new(&plant.name)];
        row.extend(week.iter().map(|amount| {
            let cell = Cell::new(amount).set_alignment(CellAlignment::Right);
            if amount > KilowattHours::ZERO { cell } else { cell.add_attribute(Attribute::Dim) }
        }));
        row.push(Cell::new(week.total()).set_alignment(CellAlignment::Right));
        table.add_row(row);
    }
    table
}

pub fn build_schedule_table(schedule: &OptimalSchedule) -> Table {
    let mut table = new_table();
    table.set_header(vec!["Day", "Plant", "Consumption", "Switching", "Cost"]);
    for day in &schedule.days {
        table.add_row(vec![
            Cell::new(day.day).add_attribute(Attribute::Dim),
            Cell::new(&day.plant.name),
            Cell::new(day.consumption).set_alignment(CellAlignment::Right),
            Cell::new(day.switching_penalty).set_alignment(CellAlignment::Right).fg(
                if day.switching_penalty > Cost::ZERO { Color::DarkYellow } else { Color::Green },
            ),
            Cell::new(day.consumption.as_cost() + day.switching_penalty)
                .set_alignment(CellAlignment::Right),
        ]);
    }
    table.add_row(vec![
        Cell::new("Total").add_attribute(Attribute::Bold),
        Cell::new(""),
        Cell::new(""),
        Cell::new(""),
        Cell::new(schedule.total_cost)
            .set_alignment(CellAlignment::Right)
            .add_attribute(Attribute::Bold),
    ]);
    table
}
