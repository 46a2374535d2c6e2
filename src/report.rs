//! Output formatting for scan results.
//!
//! Supports two output formats:
//! - Pretty: colored terminal output for human readability
//! - JSON: the flat record list for downstream consumers

use colored::*;

use crate::analysis::{BatchSummary, FileOutcome, FileReport, Record, Role, TypeDeclaration};

// =============================================================================
// JSON Format
// =============================================================================

/// Flatten reports into the record list: one entry per top-level type of a
/// parsed file, one error entry per failed file, in report order.
pub fn records(reports: &[FileReport]) -> Vec<Record> {
    reports.iter().flat_map(FileReport::records).collect()
}

/// Render reports as a pretty-printed JSON array.
pub fn render_json(reports: &[FileReport]) -> anyhow::Result<String> {
    Ok(serde_json::to_string_pretty(&records(reports))?)
}

/// Write results in JSON format.
pub fn write_json(reports: &[FileReport]) -> anyhow::Result<()> {
    println!("{}", render_json(reports)?);
    Ok(())
}

// =============================================================================
// Pretty Format
// =============================================================================

/// Write results in human-readable colored format.
pub fn write_pretty(path: &str, reports: &[FileReport]) {
    print!("{}", render_pretty(path, reports));
}

/// Render results in human-readable format.
///
/// Color codes are emitted only when `colored` decides the terminal
/// supports them.
pub fn render_pretty(path: &str, reports: &[FileReport]) -> String {
    let mut out = String::new();

    out.push_str(&format!("{} {}\n\n", "rolecheck".bold(), path));

    for report in reports {
        match &report.outcome {
            FileOutcome::Parsed(types) => {
                out.push_str(&format!("{}\n", report.path.cyan()));
                if types.is_empty() {
                    out.push_str(&format!("  {}\n", "(no type declarations)".dimmed()));
                }
                for decl in types {
                    render_type(&mut out, decl, 1);
                }
            }
            FileOutcome::Failed(error) => {
                out.push_str(&format!("{} {}\n", report.path.red(), "FAILED".red().bold()));
                out.push_str(&format!("  {}\n", error.error.red()));
            }
        }
        out.push('\n');
    }

    render_summary(&mut out, &BatchSummary::from_reports(reports));
    out
}

fn render_type(out: &mut String, decl: &TypeDeclaration, depth: usize) {
    let indent = "  ".repeat(depth);
    let roles: Vec<String> = decl.roles.iter().map(role_label).collect();
    let name = if decl.has_role(Role::Unknown) {
        decl.name.dimmed()
    } else {
        decl.name.bold()
    };

    out.push_str(&format!(
        "{}{} {} [{}]\n",
        indent,
        decl.kind.as_str().dimmed(),
        name,
        roles.join(", ")
    ));

    for field in &decl.fields {
        out.push_str(&format!(
            "{}  {} {}: {}\n",
            indent,
            "-".dimmed(),
            field.name,
            field.field_type.as_deref().unwrap_or("<none>")
        ));
    }

    if !decl.methods.is_empty() {
        let names: Vec<&str> = decl.methods.iter().map(|m| m.name.as_str()).collect();
        out.push_str(&format!("{}  {} {}\n", indent, "methods:".dimmed(), names.join(", ")));
    }

    for nested in &decl.nested_types {
        render_type(out, nested, depth + 1);
    }
}

fn role_label(role: &Role) -> String {
    match role {
        Role::Unknown => role.as_str().dimmed().to_string(),
        _ => role.as_str().green().to_string(),
    }
}

fn render_summary(out: &mut String, summary: &BatchSummary) {
    let failed = if summary.files_failed > 0 {
        summary.files_failed.to_string().red().to_string()
    } else {
        summary.files_failed.to_string()
    };

    out.push_str(&format!(
        "{} {} parsed, {} failed, {} top-level types\n",
        "Summary:".bold(),
        summary.files_parsed,
        failed,
        summary.top_level_types
    ));

    for (role, count) in &summary.roles {
        out.push_str(&format!("  {:<20} {}\n", role, count));
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::analysis::AnalysisContext;

    fn sample_reports() -> Vec<FileReport> {
        let ctx = AnalysisContext::new(".");
        vec![
            ctx.analyze_source(
                "User.java",
                br#"
@Entity @Slf4j
public class User {
    private Map<String, List<Long>> index;
    public static class Address {}
}
class Helper {}
"#,
            ),
            ctx.analyze_source("Broken.java", b"class Broken {"),
        ]
    }

    #[test]
    fn test_json_is_flat_record_list() {
        let json = render_json(&sample_reports()).unwrap();
        let value: serde_json::Value = serde_json::from_str(&json).unwrap();
        let items = value.as_array().unwrap();

        assert_eq!(items.len(), 3);
        assert_eq!(items[0]["name"], "User");
        assert_eq!(items[0]["type"], serde_json::json!(["Entity", "Logging"]));
        assert_eq!(items[0]["fields"][0]["type"], "Map<String,List<Long>>");
        assert_eq!(items[0]["nested_types"][0]["name"], "Address");
        assert_eq!(items[1]["name"], "Helper");
        assert!(items[2]["error"].as_str().unwrap().contains("Broken.java"));
    }

    #[test]
    fn test_pretty_output() {
        colored::control::set_override(false);
        let text = render_pretty("src", &sample_reports());

        assert!(text.contains("class User [Entity, Logging]"));
        assert!(text.contains("index: Map<String,List<Long>>"));
        assert!(text.contains("    class Address [Unknown]"));
        assert!(text.contains("Broken.java FAILED"));
        assert!(text.contains("1 parsed, 1 failed, 2 top-level types"));
    }
}
