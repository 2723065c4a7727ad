//! Writing datasets and rendering reports.

mod report;
mod writer;

pub use report::{render_html, render_text, ReportFormat, ReportSection, Reporter};
pub use writer::{filled_path, Writer, FILLED_PREFIX};
