pub mod metadata;
pub mod rename_target;
pub mod report_writer;

pub use report_writer::ReportWriter;
