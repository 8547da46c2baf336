//! Bot filtering and HTML table rendering.
//!
//! The fragment is a pure function of its inputs: the same records and
//! options always yield byte-identical markup, which is what makes the
//! merge stage's "no change" detection work.

use std::collections::BTreeSet;

use tracing::{debug, warn};

use crate::config::RenderOptions;
use crate::source::ContributorRecord;

const HEADER_LINES: &[&str] = &[
    "<h2>Contributors</h2>",
    "<table border='1' cellspacing='0' cellpadding='5'>",
    "  <thead>",
    "    <tr><th>Avatar</th><th>Username</th><th>Insights</th></tr>",
    "  </thead>",
    "  <tbody>",
];

const FOOTER_LINES: &[&str] = &["  </tbody>", "</table>"];

/// Chart emoji shown in the insights column.
const INSIGHTS_ICON: &str = "\u{1f4c8}";

/// Rendered contributors table.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RenderedFragment {
    html: String,
    rows: usize,
}

impl RenderedFragment {
    /// The HTML markup, without a trailing newline.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.html
    }

    /// Number of contributor rows in the table body.
    #[must_use]
    pub fn rows(&self) -> usize {
        self.rows
    }
}

/// Records whose login is not excluded, in input order.
pub fn filter_contributors<'a>(
    records: &'a [ContributorRecord],
    excluded: &'a BTreeSet<String>,
) -> impl Iterator<Item = &'a ContributorRecord> + 'a {
    records
        .iter()
        .filter(move |record| !excluded.contains(&record.login))
}

/// Insights page for `repository`; an absent repository leaves the segment empty.
#[must_use]
pub fn insights_url(repository: Option<&str>) -> String {
    format!(
        "https://github.com/{}/graphs/contributors",
        repository.unwrap_or_default()
    )
}

/// Render the contributors table for every non-excluded record.
#[must_use]
pub fn render_fragment(records: &[ContributorRecord], options: &RenderOptions) -> RenderedFragment {
    if options.repository.is_none() {
        warn!("repository is not set; insights links will be incomplete");
    }
    let insights = insights_url(options.repository.as_deref());
    let size = options.avatar_size;

    let mut lines: Vec<String> = HEADER_LINES.iter().map(|line| (*line).to_owned()).collect();
    let mut rows = 0;
    for record in filter_contributors(records, &options.excluded_logins) {
        lines.push(format!(
            concat!(
                "    <tr>",
                "<td><img src=\"{avatar}?s={size}\" alt=\"Avatar\" width=\"{size}\" height=\"{size}\"></td>",
                "<td><a href=\"{href}\">{login}</a></td>",
                "<td><a href=\"{insights}\">{icon}</a></td>",
                "</tr>"
            ),
            avatar = record.avatar_url,
            size = size,
            href = record.html_url,
            login = record.login,
            insights = insights,
            icon = INSIGHTS_ICON,
        ));
        rows += 1;
    }
    lines.extend(FOOTER_LINES.iter().map(|line| (*line).to_owned()));

    debug!(
        rows,
        skipped = records.len() - rows,
        "rendered contributors fragment"
    );
    RenderedFragment {
        html: lines.join("\n"),
        rows,
    }
}
