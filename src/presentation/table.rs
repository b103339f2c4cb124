use crate::report::RepositorySummary;
use comfy_table::{Table, presets::UTF8_HORIZONTAL_ONLY};

/// Per-repository totals, one line each.
pub fn summary(repos: &[RepositorySummary]) -> String {
    let rows = repos
        .iter()
        .map(|r| {
            [
                r.repository.clone(),
                r.rows.to_string(),
                r.stop
                    .as_ref()
                    .map_or_else(|| "-".to_string(), |s| s.to_string()),
            ]
        })
        .collect();
    render(rows)
}

fn render(rows: Vec<[String; 3]>) -> String {
    let mut t = Table::new();
    t.load_preset(UTF8_HORIZONTAL_ONLY)
        .set_header(vec!["Repository", "Rows", "Stopped"]);
    for r in rows {
        t.add_row(r.to_vec());
    }
    t.to_string()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::walker::StopReason;

    #[test]
    fn lists_each_repository_with_its_stop() {
        let out = summary(&[
            RepositorySummary {
                repository: "infra".into(),
                rows: 12,
                stop: Some(StopReason::CountLimit),
            },
            RepositorySummary {
                repository: "docs".into(),
                rows: 0,
                stop: Some(StopReason::NoParent),
            },
        ]);
        assert!(out.contains("Repository"));
        assert!(out.contains("infra"));
        assert!(out.contains("count limit"));
        assert!(out.contains("root reached"));
    }
}
