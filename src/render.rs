//! Terminal rendering of a list screen

use bfp_admin_common::filter::FilterState;
use bfp_admin_common::{ListRecord, PageButton, PageControls, RecordList, SummaryCount};

const MAX_CELL: usize = 28;

/// Clip a cell to `MAX_CELL` characters.
fn truncate(value: &str) -> String {
    if value.chars().count() <= MAX_CELL {
        value.to_string()
    } else {
        let cut: String = value.chars().take(MAX_CELL - 1).collect();
        format!("{}…", cut)
    }
}

/// Summary cards on one line; the active card is starred.
pub fn render_summary(counts: &[SummaryCount], filter: &FilterState) -> String {
    counts
        .iter()
        .map(|c| {
            let active = if filter.card_is_total() {
                c.key == bfp_admin_common::kind::TOTAL_CARD
            } else {
                c.key.eq_ignore_ascii_case(filter.card.trim())
            };
            if active {
                format!("[*{}: {}*]", c.label, c.count)
            } else {
                format!("[{}: {}]", c.label, c.count)
            }
        })
        .collect::<Vec<_>>()
        .join(" ")
}

pub fn render_table<R: ListRecord>(rows: &[R]) -> String {
    let columns = R::KIND.columns();
    if rows.is_empty() {
        return format!("No {} found.", R::KIND.label().to_lowercase());
    }

    let mut header: Vec<String> = vec!["ID".to_string()];
    header.extend(columns.iter().map(|c| c.label.to_string()));
    let body: Vec<Vec<String>> = rows
        .iter()
        .map(|r| {
            let mut line = vec![r.id().unwrap_or("-").to_string()];
            line.extend(columns.iter().map(|c| truncate(&r.cell(c.key))));
            line
        })
        .collect();

    let widths: Vec<usize> = (0..header.len())
        .map(|i| {
            std::iter::once(&header)
                .chain(body.iter())
                .map(|line| line[i].chars().count())
                .max()
                .unwrap_or(0)
        })
        .collect();

    let fmt_line = |line: &[String]| {
        line.iter()
            .zip(&widths)
            .map(|(cell, w)| format!("{:<width$}", cell, width = w))
            .collect::<Vec<_>>()
            .join(" | ")
            .trim_end()
            .to_string()
    };

    let mut out = vec![fmt_line(&header)];
    out.push(widths.iter().map(|w| "-".repeat(*w)).collect::<Vec<_>>().join("-+-"));
    out.extend(body.iter().map(|line| fmt_line(line)));
    out.join("\n")
}

/// `‹ Prev  1 … 4 [5] 6 … 10  Next ›   6-10 of 48`; disabled controls are
/// shown in parentheses.
pub fn render_controls(controls: &PageControls) -> String {
    let prev = if controls.prev_disabled { "(‹ Prev)" } else { "‹ Prev" };
    let next = if controls.next_disabled { "(Next ›)" } else { "Next ›" };
    let buttons = controls
        .buttons
        .iter()
        .map(|b| match b {
            PageButton::Page(p) if *p == controls.page => format!("[{}]", p),
            PageButton::Page(p) => p.to_string(),
            PageButton::Ellipsis => "…".to_string(),
        })
        .collect::<Vec<_>>()
        .join(" ");
    format!(
        "{}  {}  {}   {}-{} of {}",
        prev, buttons, next, controls.first_row, controls.last_row, controls.total_rows
    )
}

/// Full screen: cards, table, controls.
pub fn render_screen<R: ListRecord>(list: &RecordList<R>) -> String {
    [
        format!("== {} ==", R::KIND.label()),
        render_summary(&list.summary(), list.filter()),
        String::new(),
        render_table(&list.visible()),
        String::new(),
        render_controls(&list.controls()),
    ]
    .join("\n")
}

#[cfg(test)]
mod tests {
    use super::*;
    use bfp_admin_common::status::EquipmentStatus;
    use bfp_admin_common::Equipment;

    fn gear(id: &str, name: &str) -> Equipment {
        Equipment {
            id: Some(id.into()),
            name: name.into(),
            category: "Hose".into(),
            status: EquipmentStatus::Operational,
            ..Default::default()
        }
    }

    #[test]
    fn test_table_has_header_and_placeholder() {
        let out = render_table(&[gear("1", "Fire hose 1.5in")]);
        let lines: Vec<&str> = out.lines().collect();
        assert!(lines[0].starts_with("ID"));
        assert!(lines[2].contains("Fire hose 1.5in"));
        assert!(lines[2].contains("N/A"));
    }

    #[test]
    fn test_empty_table_message() {
        assert_eq!(render_table::<Equipment>(&[]), "No equipment inventory found.");
    }

    #[test]
    fn test_long_cells_are_truncated() {
        let out = render_table(&[gear("1", &"x".repeat(60))]);
        assert!(!out.contains(&"x".repeat(40)));
        assert!(out.contains('…'));
    }

    #[test]
    fn test_controls_mark_current_and_disabled() {
        let c = PageControls::new(1, 5, 12);
        assert_eq!(render_controls(&c), "(‹ Prev)  [1] 2 3  Next ›   1-5 of 12");
        let empty = PageControls::new(1, 5, 0);
        assert_eq!(render_controls(&empty), "(‹ Prev)  [1]  (Next ›)   0-0 of 0");
    }

    #[test]
    fn test_summary_marks_active_card() {
        let mut list = RecordList::<Equipment>::new();
        list.finish_fetch(Ok(vec![gear("1", "a"), gear("2", "b")]));
        let line = render_summary(&list.summary(), list.filter());
        assert!(line.starts_with("[*"));
        list.set_card("operational");
        let line = render_summary(&list.summary(), list.filter());
        assert!(line.contains("[*Operational: 2*]"));
    }
}
