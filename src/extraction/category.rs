use crate::extraction::layout::Layout;
use crate::spreadsheet::CellGrid;
use std::ops::RangeInclusive;

/// A category marker found on the sheet.
#[derive(Clone, Debug, PartialEq)]
pub struct Category {
    pub row: usize,
    pub column: usize,
    pub letter: String,
    pub name: String,
}

/// Scans the category window for single-letter markers.
///
/// A cell matches when any of its lines, trimmed, is exactly a category
/// letter. Only the first occurrence of each letter is kept. The scan is
/// row-major, so the result is ordered by row ascending.
pub fn detect_categories(grid: &CellGrid, layout: &Layout) -> Vec<Category> {
    let mut categories: Vec<Category> = Vec::new();
    for row in layout.category_window.rows(grid) {
        for column in layout.category_window.columns(grid) {
            let Some(text) = grid.text(row, column) else {
                continue;
            };
            let marker = text
                .lines()
                .map(str::trim)
                .find_map(|line| layout.category_name(line).map(|name| (line, name)));
            if let Some((letter, name)) = marker {
                if categories.iter().all(|category| category.letter != letter) {
                    categories.push(Category {
                        row,
                        column,
                        letter: letter.to_owned(),
                        name: name.to_owned(),
                    });
                }
            }
        }
    }
    categories
}

/// Contiguous rows attributed to each category.
///
/// A band runs from its marker row to the row before the next marker; the last
/// band runs for `layout.last_band_rows` rows or to the end of the sheet.
/// Bands are ordered by row and never overlap.
pub fn category_bands<'a>(
    grid: &CellGrid,
    categories: &'a [Category],
    layout: &Layout,
) -> Vec<(&'a Category, RangeInclusive<usize>)> {
    categories
        .iter()
        .enumerate()
        .map(|(index, category)| {
            let end = match categories.get(index + 1) {
                Some(next) => next.row.saturating_sub(1),
                None => (category.row + layout.last_band_rows.saturating_sub(1)).min(grid.max_row()),
            };
            (category, category.row..=end)
        })
        .collect()
}

/// Category whose marker row is the greatest row not after `row`.
///
/// `categories` must be sorted by row ascending, which is how
/// [`detect_categories`] returns them; the lookup is a binary search.
pub fn category_at(categories: &[Category], row: usize) -> Option<&Category> {
    let index = categories.partition_point(|category| category.row <= row);
    index.checked_sub(1).map(|index| &categories[index])
}
