use crate::extraction::category::Category;
use crate::extraction::layout::Layout;
use crate::spreadsheet::CellGrid;

/// Column searched for the part name label.
const PART_NAME_COLUMN: usize = 2;

/// A known plant found on the sheet.
#[derive(Clone, Debug, PartialEq)]
pub struct PlantMatch {
    /// Plant name as spelled in the vocabulary
    pub name: String,
    /// Row of the first cell mentioning it
    pub row: usize,
}

/// Scans the whole grid, row by row, for the first text cell mentioning a
/// known plant (case-insensitive).
pub fn detect_plant(grid: &CellGrid, layout: &Layout) -> Option<PlantMatch> {
    let plants: Vec<(String, &String)> = layout
        .plants
        .iter()
        .map(|plant| (plant.to_lowercase(), plant))
        .filter(|(lowered, _)| !lowered.is_empty())
        .collect();
    for row in 1..=grid.max_row() {
        for column in 1..=grid.max_column() {
            let Some(text) = grid.text(row, column) else {
                continue;
            };
            let text = text.to_lowercase();
            if let Some((_, plant)) = plants.iter().find(|(lowered, _)| text.contains(lowered.as_str())) {
                return Some(PlantMatch {
                    name: plant.to_string(),
                    row,
                });
            }
        }
    }
    None
}

/// Looks upward from the first category row for a part name label: the first
/// text longer than three characters that is not a category letter.
pub fn detect_part_name(grid: &CellGrid, categories: &[Category], layout: &Layout) -> Option<String> {
    let first = categories.first()?;
    (1..first.row)
        .rev()
        .filter_map(|row| grid.text(row, PART_NAME_COLUMN))
        .find(|text| text.chars().count() > 3 && layout.category_name(text).is_none())
        .map(str::to_owned)
}
