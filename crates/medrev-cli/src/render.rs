//! Table rendering for list and detail surfaces.

use comfy_table::modifiers::UTF8_ROUND_CORNERS;
use comfy_table::presets::UTF8_FULL_CONDENSED;
use comfy_table::{Attribute, Cell, CellAlignment, Color, ContentArrangement, Table};

use medrev_model::{Medicine, MedicineStatus, SimilarityReport, User};

/// Employee list table. The viewer's own row, when present, carries a
/// "(You)" marker next to the name.
pub fn users_table(users: &[User], viewer: Option<&str>) -> Table {
    let mut table = Table::new();
    table.set_header(vec![
        header_cell("Id"),
        header_cell("Name"),
        header_cell("Email"),
        header_cell("Role"),
        header_cell("Created"),
    ]);
    apply_table_style(&mut table);
    for user in users {
        let name = if viewer == Some(user.id.as_str()) {
            format!("{} (You)", user.full_name())
        } else {
            user.full_name()
        };
        table.add_row(vec![
            Cell::new(&user.id),
            Cell::new(name),
            Cell::new(&user.email),
            Cell::new(user.role.label()),
            Cell::new(user.created_at.format("%Y-%m-%d").to_string()),
        ]);
    }
    table
}

pub fn user_detail(user: &User) -> Table {
    let mut table = Table::new();
    table.set_header(vec![header_cell("Field"), header_cell("Value")]);
    apply_table_style(&mut table);
    table.add_row(vec![Cell::new("Id"), Cell::new(&user.id)]);
    table.add_row(vec![Cell::new("Name"), Cell::new(user.full_name())]);
    table.add_row(vec![Cell::new("Email"), Cell::new(&user.email)]);
    table.add_row(vec![Cell::new("Role"), Cell::new(user.role.label())]);
    table.add_row(vec![
        Cell::new("Created"),
        Cell::new(user.created_at.format("%Y-%m-%d %H:%M").to_string()),
    ]);
    table.add_row(vec![
        Cell::new("Updated"),
        Cell::new(user.updated_at.format("%Y-%m-%d %H:%M").to_string()),
    ]);
    table
}

pub fn medicines_table(medicines: &[Medicine]) -> Table {
    let mut table = Table::new();
    table.set_header(vec![
        header_cell("Product"),
        header_cell("Category"),
        header_cell("Manufacturer"),
        header_cell("Barcode"),
        header_cell("Status"),
        header_cell("Created"),
    ]);
    apply_table_style(&mut table);
    for medicine in medicines {
        table.add_row(vec![
            Cell::new(&medicine.product_name),
            Cell::new(medicine.category_bucket()),
            Cell::new(&medicine.manufacturer),
            Cell::new(&medicine.barcode),
            status_cell(medicine.status),
            Cell::new(medicine.created_at.format("%Y-%m-%d").to_string()),
        ]);
    }
    table
}

pub fn medicine_detail(medicine: &Medicine) -> Table {
    let mut table = Table::new();
    table.set_header(vec![header_cell("Field"), header_cell("Value")]);
    apply_table_style(&mut table);
    let rows: Vec<(&str, String)> = vec![
        ("Product", medicine.product_name.clone()),
        ("Category", medicine.category_bucket().to_string()),
        ("Intake method", medicine.intake_method.clone()),
        ("Manufacturer", medicine.manufacturer.clone()),
        (
            "Manufacturing country",
            medicine.manufacturing_country.clone(),
        ),
        (
            "Country of registration",
            medicine.country_registration.clone(),
        ),
        ("Barcode", medicine.barcode.clone()),
        ("Packaging", medicine.type_packaging.clone()),
        ("Dosage", medicine.product_dosage.clone()),
        (
            "Active ingredient",
            medicine.product_active_ingredient.clone(),
        ),
        (
            "Created",
            medicine.created_at.format("%Y-%m-%d %H:%M").to_string(),
        ),
        ("Images", medicine.images_location.len().to_string()),
    ];
    for (field, value) in rows {
        let value_cell = if value.is_empty() {
            dim_cell("-")
        } else {
            Cell::new(value)
        };
        table.add_row(vec![Cell::new(field), value_cell]);
    }
    table.add_row(vec![Cell::new("Status"), status_cell(medicine.status)]);
    table
}

/// LASA report table, most similar candidate first.
pub fn similarity_table(report: &SimilarityReport) -> Table {
    let mut table = Table::new();
    table.set_header(vec![
        header_cell("Product"),
        header_cell("Total"),
        header_cell("Visual"),
        header_cell("Text"),
        header_cell("By Box"),
        header_cell("Risk"),
    ]);
    apply_table_style(&mut table);
    for index in 1..=5 {
        align_column(&mut table, index, CellAlignment::Right);
    }
    for candidate in report.ranked() {
        let risk = if candidate.is_high_risk() {
            Cell::new("HIGH")
                .fg(Color::Red)
                .add_attribute(Attribute::Bold)
        } else {
            dim_cell("-")
        };
        table.add_row(vec![
            Cell::new(&candidate.product_name),
            percent_cell(candidate.total_similarity),
            percent_cell(candidate.visual_similarity),
            percent_cell(candidate.text_similarity),
            percent_cell(candidate.size_similarity),
            risk,
        ]);
    }
    table
}

fn apply_table_style(table: &mut Table) {
    table
        .load_preset(UTF8_FULL_CONDENSED)
        .apply_modifier(UTF8_ROUND_CORNERS)
        .set_content_arrangement(ContentArrangement::Dynamic)
        .set_width(120);
}

fn align_column(table: &mut Table, index: usize, alignment: CellAlignment) {
    if let Some(column) = table.column_mut(index) {
        column.set_cell_alignment(alignment);
    }
}

fn status_cell(status: MedicineStatus) -> Cell {
    match status {
        MedicineStatus::Pending => Cell::new(status.label()).fg(Color::Yellow),
        MedicineStatus::Approved => Cell::new(status.label()).fg(Color::Green),
        MedicineStatus::Completed => Cell::new(status.label()).fg(Color::DarkGrey),
    }
}

fn percent_cell(value: f64) -> Cell {
    Cell::new(format!("{value:.1}%"))
}

fn header_cell(label: &str) -> Cell {
    Cell::new(label)
        .fg(Color::Cyan)
        .add_attribute(Attribute::Bold)
}

fn dim_cell<T: ToString>(value: T) -> Cell {
    Cell::new(value).fg(Color::DarkGrey)
}
