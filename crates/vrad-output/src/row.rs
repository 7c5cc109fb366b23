//! Text encoding of table rows.  Absent values become empty cells.

use vrad_sim::{ClassSummary, JobRow};

/// Column names of `class_summary.csv`, in order.
pub const CLASS_SUMMARY_COLUMNS: [&str; 7] = [
    "urgency",
    "completed",
    "unfinished",
    "sla_breaches",
    "mean_wait_time",
    "mean_total_time",
    "max_queue_len",
];

fn cell<T: ToString>(value: Option<T>) -> String {
    value.map(|v| v.to_string()).unwrap_or_default()
}

/// One job-table record, in `JOB_TABLE_COLUMNS` order.
pub fn job_record(row: &JobRow) -> [String; 9] {
    [
        row.img_id.to_string(),
        row.urgency.to_string(),
        cell(row.rad_id),
        row.time_created.to_string(),
        cell(row.time_rad_job_starts),
        cell(row.time_job_finished),
        cell(row.wait_time),
        cell(row.time_w_rad),
        cell(row.total_time),
    ]
}

/// One `class_summary.csv` record.  Urgency is written as its level (1–3).
pub fn class_record(class: &ClassSummary) -> [String; 7] {
    [
        class.urgency.level().to_string(),
        class.completed.to_string(),
        class.unfinished.to_string(),
        class.sla_breaches.to_string(),
        cell(class.mean_wait_time),
        cell(class.mean_total_time),
        class.max_queue_len.to_string(),
    ]
}
