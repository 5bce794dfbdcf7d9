pub mod csv;
pub mod traits;
pub mod workbook;

pub mod prelude {
    pub use super::csv::CsvSheet;
    pub use super::traits::SheetReader;
    pub use super::workbook::WorkbookSheet;
}
