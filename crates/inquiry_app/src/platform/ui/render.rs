use inquiry_core::{
    AppViewModel, BadgeColor, Category, HistoryRowView, InquiryRecord, JobStatus, NoticeLevel,
    Notification, PageWindow, PollerState, ResultRowView,
};

const BAR_WIDTH: usize = 30;
const RESPONSE_PREVIEW: usize = 60;

/// Terminal styling switch; `plain` strips all escape sequences.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Style {
    pub color: bool,
}

impl Style {
    pub fn plain() -> Self {
        Self { color: false }
    }

    fn paint(self, code: &str, text: &str) -> String {
        if self.color {
            format!("\x1b[{code}m{text}\x1b[0m")
        } else {
            text.to_string()
        }
    }

    fn bold(self, text: &str) -> String {
        self.paint("1", text)
    }
}

/// One-line summary of the poller and the active job.
pub fn status_line(view: &AppViewModel) -> String {
    if let Some(file_name) = &view.submitting {
        return format!("Uploading {file_name}...");
    }
    let Some(job) = &view.job else {
        return match view.poller {
            PollerState::Idle => "Idle".to_string(),
            other => format!("{other:?}"),
        };
    };
    match job.status {
        JobStatus::Pending => format!("{} queued as job {}", job.file_name, job.job_id),
        JobStatus::Processing => format!(
            "Processing {}: {} / {} inquiries",
            job.file_name, job.processed, job.total
        ),
        JobStatus::Completed => format!(
            "Completed {}: {} inquiries processed",
            job.file_name, view.results_count
        ),
        JobStatus::Failed => format!(
            "Failed {}: {}",
            job.file_name,
            job.error_message.as_deref().unwrap_or("Processing failed")
        ),
    }
}

pub fn progress_bar(percent: u8) -> String {
    let percent = usize::from(percent.min(100));
    let filled = percent * BAR_WIDTH / 100;
    format!(
        "[{}{}] {:>3}%",
        "#".repeat(filled),
        "-".repeat(BAR_WIDTH - filled),
        percent
    )
}

/// Live lines redrawn whenever the state changes.
pub fn render(view: &AppViewModel, style: Style) -> Vec<String> {
    let mut lines = vec![style.bold(&status_line(view))];
    if let Some(job) = &view.job {
        if matches!(job.status, JobStatus::Pending | JobStatus::Processing) {
            lines.push(progress_bar(job.progress_percent));
        }
    }
    if let Some(error) = &view.validation_error {
        lines.push(style.paint("31", &format!("Invalid file: {error}")));
    }
    if let Some(error) = &view.submit_error {
        lines.push(style.paint("31", &format!("Upload failed: {error}")));
    }
    lines
}

pub fn badge(row: &ResultRowView, style: Style) -> String {
    paint_badge(row.category, &row.category_label, style)
}

fn paint_badge(category: Category, label: &str, style: Style) -> String {
    let code = match category.badge_color() {
        BadgeColor::Blue => "34",
        BadgeColor::Green => "32",
        BadgeColor::Yellow => "33",
        BadgeColor::Gray => "90",
        BadgeColor::Purple => "35",
    };
    style.paint(code, &format!("[{label}]"))
}

/// Every field of one result, unabridged. Absent fields are skipped.
pub fn record_detail(position: usize, record: &InquiryRecord, style: Style) -> Vec<String> {
    let mut lines = vec![format!(
        "{} {}",
        style.bold(&format!("Result #{position}")),
        paint_badge(Category::from_label(&record.category), &record.category, style)
    )];
    let optional = [
        ("Inquiry", &record.inquiry_id),
        ("Listing", &record.listing_id),
        ("Name", &record.inquirer_name),
        ("Phone", &record.phone_number),
        ("Date", &record.date),
    ];
    lines.push(format!("  {:<9} {}", "Email", record.email));
    for (label, value) in optional {
        if let Some(value) = value {
            lines.push(format!("  {label:<9} {value}"));
        }
    }
    if let Some(message) = &record.original_message {
        lines.push("  Message:".to_string());
        lines.extend(message.lines().map(|line| format!("    {line}")));
    }
    lines.push("  Response:".to_string());
    lines.extend(record.response.lines().map(|line| format!("    {line}")));
    lines
}

/// Rows of the current page followed by the page controls.
pub fn results_table(view: &AppViewModel, style: Style) -> Vec<String> {
    if view.rows.is_empty() {
        return vec!["No results.".to_string()];
    }

    let email_width = view
        .rows
        .iter()
        .map(|row| row.email.chars().count())
        .max()
        .unwrap_or(0)
        .max("Email".len());

    let mut lines = vec![style.bold(&format!(
        "{:>4}  {:<email_width$}  {:<18}  Response",
        "#", "Email", "Category"
    ))];
    for row in &view.rows {
        // Pad on the unstyled label so escape codes do not skew the columns.
        let label_width = row.category_label.chars().count() + 2;
        let padding = " ".repeat(18usize.saturating_sub(label_width));
        lines.push(format!(
            "{:>4}  {:<email_width$}  {}{}  {}",
            row.position,
            row.email,
            badge(row, style),
            padding,
            preview(&row.response)
        ));
    }
    lines.push(String::new());
    lines.push(format!(
        "{}  ({} results)",
        page_controls(&view.window),
        view.results_count
    ));
    lines
}

/// Renders the control strip, e.g. `< 1 [2] 3 4 5 ... >`.
pub fn page_controls(window: &PageWindow) -> String {
    let mut parts = Vec::with_capacity(window.pages.len() + 3);
    parts.push(if window.has_previous() { "<" } else { " " }.to_string());
    for page in &window.pages {
        if *page == window.current_page {
            parts.push(format!("[{page}]"));
        } else {
            parts.push(page.to_string());
        }
    }
    if window.show_ellipsis {
        parts.push("...".to_string());
    }
    parts.push(if window.has_next() { ">" } else { " " }.to_string());
    parts.join(" ").trim().to_string()
}

pub fn history_list(view: &AppViewModel) -> Vec<String> {
    if view.history_loading {
        return vec!["Loading history...".to_string()];
    }
    if view.history.is_empty() {
        return vec!["No previous batches.".to_string()];
    }
    view.history.iter().map(history_line).collect()
}

fn history_line(row: &HistoryRowView) -> String {
    let mut line = format!("- {}", row.label);
    if let Some(detail) = &row.detail {
        line.push_str(&format!(" ({detail})"));
    }
    if let Some(timestamp) = &row.timestamp {
        line.push_str(&format!(" @ {timestamp}"));
    }
    line
}

pub fn notice(notification: &Notification, style: Style) -> String {
    let (code, marker) = match notification.level {
        NoticeLevel::Info => ("36", "i"),
        NoticeLevel::Success => ("32", "+"),
        NoticeLevel::Error => ("31", "!"),
    };
    format!(
        "{} {}: {}",
        style.paint(code, marker),
        style.bold(&notification.title),
        notification.message
    )
}

fn preview(text: &str) -> String {
    let single_line = text.split_whitespace().collect::<Vec<_>>().join(" ");
    if single_line.chars().count() <= RESPONSE_PREVIEW {
        return single_line;
    }
    let cut: String = single_line.chars().take(RESPONSE_PREVIEW - 3).collect();
    format!("{cut}...")
}
