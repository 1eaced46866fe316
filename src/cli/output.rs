use anyhow::Result;

use locale_picker::session::SessionReport;

/// Render the report as indented plain text.
pub(crate) fn format_plain(report: &SessionReport) -> String {
    let page = &report.page;
    let mut lines = vec![
        format!("state: {}", page.state),
        format!("steps: {} ({} ms)", report.steps, report.elapsed_ms),
        format!("query: {:?}", page.query),
    ];

    let visible: Vec<&str> = page
        .visible
        .iter()
        .map(|country| country.value.as_str())
        .collect();
    lines.push(format!("visible ({}): {}", visible.len(), visible.join(" ")));
    lines.push(format!("selected: {}", report.selected().unwrap_or("-")));
    lines.push(format!("focused: {}", page.focused.as_deref().unwrap_or("-")));
    lines.push(format!("announcement: {}", page.announcement));

    if page.submissions.is_empty() {
        lines.push("submissions: none".to_string());
    } else {
        lines.push("submissions:".to_string());
        for submission in &page.submissions {
            let fields: Vec<String> = submission
                .fields
                .iter()
                .map(|(name, value)| format!("{name}={value}"))
                .collect();
            lines.push(format!("  {}", fields.join(" ")));
        }
    }
    lines.join("\n")
}

pub(crate) fn print_plain(report: &SessionReport) {
    println!("{}", format_plain(report));
}

pub(crate) fn format_report_json(report: &SessionReport) -> Result<String> {
    Ok(serde_json::to_string_pretty(report)?)
}

pub(crate) fn print_json(report: &SessionReport) -> Result<()> {
    println!("{}", format_report_json(report)?);
    Ok(())
}

#[cfg(test)]
mod tests {
    use serde_json::Value;

    use super::*;
    use locale_picker::catalog::Catalog;
    use locale_picker::page::PageOptions;
    use locale_picker::script;
    use locale_picker::session::Session;

    fn report(source: &str) -> SessionReport {
        let steps = script::parse(source).unwrap();
        Session::new(Catalog::builtin().unwrap(), PageOptions::default())
            .unwrap()
            .run(&steps)
            .unwrap()
    }

    #[test]
    fn plain_output_lists_submissions() {
        let text = format_plain(&report("toggle\nclick FR"));
        assert!(text.contains("state: opening"));
        assert!(text.contains("country_code=FR language_code=en"));
    }

    #[test]
    fn plain_output_without_submissions() {
        let text = format_plain(&report("toggle\ntype qqq"));
        assert!(text.contains("visible (0): "));
        assert!(text.contains("submissions: none"));
        assert!(text.contains("Found 0 country or region results."));
    }

    #[test]
    fn json_output_is_flat() {
        let json = format_report_json(&report("toggle\nwait 16\ntype japan\ndown")).unwrap();
        let value: Value = serde_json::from_str(&json).unwrap();
        assert_eq!(value["state"], "open");
        assert_eq!(value["visible"][0]["value"], "JP");
        assert_eq!(value["visible"][0]["selected"], true);
        assert_eq!(value["focused"], "country:JP");
    }
}
