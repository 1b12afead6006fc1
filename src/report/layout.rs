//! Fixed geometry of the report worksheet.

use rust_xlsxwriter::{ColNum, RowNum};

/// Column of the first data field; the report title sits alone in column 0.
pub const START_COL: ColNum = 2;

/// Header labels written from [`START_COL`] onward. The last column holds the icon.
pub const HEADER_LABELS: [&str; 8] = [
    "Date",
    "Min temp [°C]",
    "Max temp [°C]",
    "Avg temp [°C]",
    "Precipitation [mm]",
    "Wind [m/s]",
    "Weather",
    "",
];

pub const DATA_COLUMN_WIDTH: f64 = 15.0;
/// Width of the condition-text column, which carries the longest values.
pub const CONDITION_COLUMN_WIDTH: f64 = 32.0;
pub const CONDITION_FIELD: usize = 6;

pub const DATA_ROW_HEIGHT: f64 = 20.0;
const DEFAULT_ROW_HEIGHT: f64 = 15.0;

pub const ICON_Y_OFFSET: i32 = -8;
pub const ICON_SCALE: f64 = 0.7;

/// Worksheet column of the `field`-th data value.
pub fn field_column(field: usize) -> ColNum {
    START_COL + field as ColNum
}

fn row_height_px(row: RowNum) -> u32 {
    let points = if row == 0 {
        DEFAULT_ROW_HEIGHT
    } else {
        DATA_ROW_HEIGHT
    };
    (points * 4.0 / 3.0) as u32
}

/// Resolves an image placed at `row` with a vertical pixel offset into the cell it
/// is actually anchored in, plus a non-negative offset within that cell.
///
/// A negative offset moves the anchor into the rows above. Offsets cannot move
/// an image above row 0.
pub fn image_anchor(row: RowNum, y_offset: i32) -> (RowNum, u32) {
    let mut row = row;
    let mut offset = i64::from(y_offset);
    while offset < 0 && row > 0 {
        row -= 1;
        offset += i64::from(row_height_px(row));
    }
    (row, u32::try_from(offset.max(0)).unwrap_or(u32::MAX))
}
