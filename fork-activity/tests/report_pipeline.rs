//! End-to-end dedup/render/write pipeline over the public API.

use fork_activity::{dedup_by_full_name, write_report, ForkActivity, ForkRef, ReportRenderer};
use std::fs;
use tempfile::TempDir;

fn record(full_name: &str, commits: usize) -> ForkActivity {
    let (owner, name) = full_name.split_once('/').unwrap();
    ForkActivity {
        fork: ForkRef {
            owner: owner.to_string(),
            name: name.to_string(),
            full_name: full_name.to_string(),
            html_url: format!("https://github.com/{full_name}"),
        },
        commits,
    }
}

#[test]
fn duplicate_records_render_as_a_single_entry() {
    let records = dedup_by_full_name(vec![
        record("alice/demo", 5),
        record("bob/demo", 2),
        record("alice/demo", 8),
    ]);

    let html = ReportRenderer::new().render(&records).unwrap();

    assert_eq!(html.matches("alice/demo").count(), 2); // href + link text
    assert!(html.contains(">alice/demo</a>: 8 commits"));
    assert!(html.contains(">bob/demo</a>: 2 commits"));
}

#[test]
fn report_file_lands_in_a_freshly_created_directory() {
    let temp = TempDir::new().unwrap();
    let path = temp.path().join("public/index.html");
    let records = vec![record("alice/demo", 5)];

    let html = ReportRenderer::new().render(&records).unwrap();
    write_report(&path, &html).unwrap();

    let written = fs::read_to_string(&path).unwrap();
    assert!(written.contains(
        "<li><a href=\"https://github.com/alice/demo\" target=\"_blank\">alice/demo</a>: \
         5 commits</li>"
    ));
    assert!(written.ends_with("</ul></body></html>"));
}
