pub mod anomaly_writer;
pub mod report_writer;

pub use anomaly_writer::AnomalyWriter;
pub use report_writer::ReportWriter;
