use crate::extraction::category::Category;
use crate::extraction::layout::Layout;
use crate::spreadsheet::CellGrid;

/// Picks the column most likely to hold subcategory labels.
///
/// Candidates are the two columns right of the first category marker, then
/// columns 3 and 2. The candidate with the most text cells (two characters or
/// longer) in the first `layout.subcategory_rows` rows wins, the earliest
/// candidate on ties.
pub fn find_subcategory_column(grid: &CellGrid, categories: &[Category], layout: &Layout) -> usize {
    let Some(first) = categories.first() else {
        return layout.default_subcategory_column;
    };

    let mut candidates: Vec<usize> = Vec::with_capacity(4);
    for column in [first.column + 1, first.column + 2, 3, 2] {
        if (1..=grid.max_column()).contains(&column) && !candidates.contains(&column) {
            candidates.push(column);
        }
    }

    let rows = 1..=layout.subcategory_rows.min(grid.max_row());
    let mut best: Option<(usize, usize)> = None;
    for column in candidates {
        let density = rows
            .clone()
            .filter_map(|row| grid.text(row, column))
            .filter(|text| text.chars().count() >= 2)
            .count();
        if best.map_or(true, |(_, count)| density > count) {
            best = Some((column, density));
        }
    }
    best.map_or(layout.default_subcategory_column, |(column, _)| column)
}
