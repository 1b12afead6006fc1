//! Provides [`Report`], the spreadsheet that collects one row per observed day.
//!
//! Nothing reaches the disk until [`Report::close`]: the workbook is kept in memory,
//! saved to a temporary file next to the target and then renamed into place. A
//! report that is dropped without being closed leaves no file behind.

use crate::report::error::ReportError;
use crate::report::icon::IconFetcher;
use crate::report::layout::{
    field_column, image_anchor, CONDITION_COLUMN_WIDTH, CONDITION_FIELD, DATA_COLUMN_WIDTH,
    DATA_ROW_HEIGHT, HEADER_LABELS, ICON_SCALE, ICON_Y_OFFSET,
};
use crate::types::observation::{DailyObservation, IconRef};
use crate::types::units::{kph_to_mps, render_decimal};
use log::{debug, info};
use rust_xlsxwriter::{Format, Image, RowNum, Workbook};
use std::path::{Path, PathBuf};
use tempfile::NamedTempFile;

/// Mode of the finished report before the process umask is applied.
#[cfg(unix)]
const REPORT_FILE_MODE: u32 = 0o644;

/// A single rendered cell of a data row.
#[derive(Debug, PartialEq, Clone)]
pub enum Cell {
    Text(String),
    Image(IconRef),
    Empty,
}

/// A data row as it was written to the worksheet.
#[derive(Debug, PartialEq, Clone)]
pub struct ReportRow {
    pub row: RowNum,
    pub cells: Vec<Cell>,
}

impl ReportRow {
    /// Renders `observation` in header order.
    pub fn render(row: RowNum, observation: &DailyObservation) -> Self {
        let icon = match &observation.condition_icon {
            Some(icon) => Cell::Image(icon.clone()),
            None => Cell::Empty,
        };
        Self {
            row,
            cells: vec![
                Cell::Text(observation.date.format("%Y-%m-%d").to_string()),
                Cell::Text(render_decimal(observation.min_temp_c)),
                Cell::Text(render_decimal(observation.max_temp_c)),
                Cell::Text(render_decimal(observation.avg_temp_c)),
                Cell::Text(render_decimal(observation.precipitation_mm)),
                Cell::Text(kph_to_mps(observation.max_wind_kph)),
                Cell::Text(observation.condition_text.clone()),
                icon,
            ],
        }
    }

    /// Text of the date cell.
    pub fn date(&self) -> Option<&str> {
        match self.cells.first() {
            Some(Cell::Text(date)) => Some(date),
            _ => None,
        }
    }
}

/// An in-progress spreadsheet report.
///
/// # Examples
///
/// ```no_run
/// # use weather_report::{IconFetcher, Report, ReportError};
/// # use std::time::Duration;
/// # fn main() -> Result<(), ReportError> {
/// let icons = IconFetcher::new(Duration::from_secs(30))?;
/// let report = Report::create("Lublin", "Lublin_2023-06-08_2023-06-10.xlsx", icons)?;
/// // ... report.append_row(&observation).await? for every day ...
/// let path = report.close()?;
/// println!("Report written to {}", path.display());
/// # Ok(())
/// # }
/// ```
pub struct Report {
    workbook: Workbook,
    path: PathBuf,
    title: String,
    icons: IconFetcher,
    rows: Vec<ReportRow>,
}

impl Report {
    /// Starts a report titled `title` that will be saved to `path` on [`Report::close`].
    ///
    /// Writes the bold header row and sets the fixed column widths.
    pub fn create(
        title: &str,
        path: impl Into<PathBuf>,
        icons: IconFetcher,
    ) -> Result<Self, ReportError> {
        let mut workbook = Workbook::new();
        let bold = Format::new().set_bold();
        let sheet = workbook.add_worksheet();

        sheet.write_string_with_format(0, 0, title, &bold)?;
        sheet.set_column_width(0, DATA_COLUMN_WIDTH)?;
        for (field, label) in HEADER_LABELS.iter().enumerate() {
            let col = field_column(field);
            if !label.is_empty() {
                sheet.write_string_with_format(0, col, *label, &bold)?;
            }
            if field < CONDITION_FIELD {
                sheet.set_column_width(col, DATA_COLUMN_WIDTH)?;
            } else if field == CONDITION_FIELD {
                sheet.set_column_width(col, CONDITION_COLUMN_WIDTH)?;
            }
        }

        let path = path.into();
        debug!("Created report '{}' for {}", title, path.display());
        Ok(Self {
            workbook,
            path,
            title: title.to_string(),
            icons,
            rows: Vec::new(),
        })
    }

    pub fn title(&self) -> &str {
        &self.title
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Data rows written so far, in call order.
    pub fn rows(&self) -> &[ReportRow] {
        &self.rows
    }

    /// Rows in the worksheet, header included.
    pub fn row_count(&self) -> usize {
        self.rows.len() + 1
    }

    /// Header cells: the title in column 0 followed by the field labels.
    pub fn header(&self) -> Vec<String> {
        std::iter::once(self.title.clone())
            .chain(HEADER_LABELS.iter().map(|label| label.to_string()))
            .collect()
    }

    /// Appends `observation` as the next row.
    ///
    /// When the observation has an icon it is downloaded first and embedded, scaled,
    /// in the last column. A failed download aborts before anything of the row is
    /// written.
    pub async fn append_row(&mut self, observation: &DailyObservation) -> Result<(), ReportError> {
        let row = RowNum::try_from(self.row_count()).unwrap_or(RowNum::MAX);
        let rendered = ReportRow::render(row, observation);

        let mut icon_bytes = None;
        for cell in &rendered.cells {
            if let Cell::Image(icon) = cell {
                icon_bytes = Some(self.icons.fetch(icon).await?);
            }
        }

        let sheet = self.workbook.worksheet_from_index(0)?;
        for (field, cell) in rendered.cells.iter().enumerate() {
            let col = field_column(field);
            match cell {
                Cell::Text(text) => {
                    sheet.write_string(row, col, text)?;
                }
                Cell::Image(_) => {
                    if let Some(bytes) = icon_bytes.as_deref() {
                        let image = Image::new_from_buffer(bytes)?
                            .set_scale_width(ICON_SCALE)
                            .set_scale_height(ICON_SCALE);
                        let (anchor_row, y_offset) = image_anchor(row, ICON_Y_OFFSET);
                        sheet.insert_image_with_offset(anchor_row, col, &image, 0, y_offset)?;
                    }
                }
                Cell::Empty => {}
            }
        }
        sheet.set_row_height(row, DATA_ROW_HEIGHT)?;

        self.rows.push(rendered);
        Ok(())
    }

    /// Saves the workbook and returns the final path. Consumes the report, so it can
    /// only happen once.
    pub fn close(mut self) -> Result<PathBuf, ReportError> {
        let dir = match self.path.parent() {
            Some(parent) if !parent.as_os_str().is_empty() => parent.to_path_buf(),
            _ => PathBuf::from("."),
        };
        let temp = temp_file_in(&dir).map_err(|e| ReportError::TempFile(dir, e))?;

        self.workbook.save(temp.path())?;
        temp.persist(&self.path)
            .map_err(|e| ReportError::Persist(self.path.clone(), e.error))?;

        info!(
            "Saved report with {} day(s) to {}",
            self.rows.len(),
            self.path.display()
        );
        Ok(self.path)
    }
}

/// Temporary file that becomes the report. Created with the usual mode for new files
/// rather than tempfile's owner-only default, since `persist` keeps the mode.
fn temp_file_in(dir: &Path) -> std::io::Result<NamedTempFile> {
    let mut builder = tempfile::Builder::new();
    builder.prefix(".weather-report-").suffix(".xlsx");
    #[cfg(unix)]
    {
        use std::os::unix::fs::PermissionsExt;
        builder.permissions(std::fs::Permissions::from_mode(REPORT_FILE_MODE));
    }
    builder.tempfile_in(dir)
}
