//! Plain-text views of the inventory. Styling is applied by the caller.

use zoo_core::Statistics;
use zoo_types::Animal;

const TABLE_HEADERS: [&str; 6] = ["ID", "Type", "Name", "Weight (kg)", "Food/day (kg)", "Extra"];

/// Column-aligned table of `animals` in the order given.
pub fn animal_table(animals: &[Animal]) -> String {
    if animals.is_empty() {
        return "No animals on record.\n".to_string();
    }

    let rows: Vec<[String; 6]> = animals
        .iter()
        .map(|a| {
            [
                a.id().to_string(),
                a.kind().to_string(),
                a.name().to_string(),
                a.weight().to_string(),
                format!("{:.2}", a.daily_food()),
                a.species().extra_cell(),
            ]
        })
        .collect();

    let mut widths = TABLE_HEADERS.map(str::len);
    for row in &rows {
        for (width, cell) in widths.iter_mut().zip(row) {
            *width = (*width).max(cell.chars().count());
        }
    }

    let mut out = String::new();
    push_row(&mut out, TABLE_HEADERS.as_slice(), &widths);
    let rule: Vec<String> = widths.iter().map(|w| "-".repeat(*w)).collect();
    push_row(&mut out, rule.as_slice(), &widths);
    for row in &rows {
        push_row(&mut out, row.as_slice(), &widths);
    }
    out
}

fn push_row<S: AsRef<str>>(out: &mut String, cells: &[S], widths: &[usize; 6]) {
    let line: Vec<String> = cells
        .iter()
        .zip(widths)
        .map(|(cell, &width)| format!("{:<width$}", cell.as_ref()))
        .collect();
    out.push_str(line.join(" | ").trim_end());
    out.push('\n');
}

pub fn statistics(stats: &Statistics) -> String {
    format!(
        "Animals: {}\nTotal weight: {:.2} kg\nTotal food per day: {:.2} kg\nAverage food per animal: {:.2} kg\n",
        stats.count, stats.total_weight, stats.total_daily_food, stats.average_daily_food
    )
}

/// One `name: sound` line per animal.
pub fn sounds(sounds: &[(String, &str)]) -> String {
    if sounds.is_empty() {
        return "The zoo is quiet.\n".to_string();
    }
    sounds
        .iter()
        .map(|(name, sound)| format!("{name}: {sound}\n"))
        .collect()
}
