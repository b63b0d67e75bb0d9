//! A time-ordered series of summaries rendered as one static HTML page,
//! with a bar chart of each summary's histogram next to its text report.

use std::fs;
use std::path::{Path, PathBuf};

use chrono::{DateTime, Utc};
use tracing::info;

use crate::error::Result;
use crate::metrics::Summary;

/// A summary and the moment it was added to the timeline.
#[derive(Debug, Clone)]
pub struct TimelineEvent {
    pub summary: Summary,
    pub created: DateTime<Utc>,
}

#[derive(Debug, Clone, Default)]
pub struct Timeline {
    events: Vec<TimelineEvent>,
}

impl Timeline {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a summary stamped with the current time.
    pub fn add_event(&mut self, summary: Summary) {
        self.events.push(TimelineEvent {
            summary,
            created: Utc::now(),
        });
    }

    pub fn events(&self) -> &[TimelineEvent] {
        &self.events
    }

    pub fn len(&self) -> usize {
        self.events.len()
    }

    pub fn is_empty(&self) -> bool {
        self.events.is_empty()
    }

    /// Render every event, in insertion order, as a standalone page.
    pub fn render_html(&self) -> Result<String> {
        let mut page = String::from(HEAD);

        for (n, event) in self.events.iter().enumerate() {
            page.push_str(&format!(
                "  <div class=\"graph\">\n    <canvas id=\"canvas-{n}\"></canvas>\n  </div>\n"
            ));
            page.push_str(&format!(
                "  <div class=\"info\">\n    <h2>Iteration {}</h2>\n    <p class=\"created\">{}</p>\n    <pre>{}</pre>\n  </div>\n",
                n + 1,
                event.created.to_rfc3339(),
                event.summary,
            ));
        }

        for (n, event) in self.events.iter().enumerate() {
            page.push_str(&chart_script(n, &event.summary)?);
        }

        page.push_str(TAIL);
        Ok(page)
    }

    /// Write the page to `<dir>/latency-<unix seconds>.html` and return that path.
    pub fn write_html(&self, dir: impl AsRef<Path>) -> Result<PathBuf> {
        let dir = dir.as_ref();
        let path = dir.join(format!("latency-{}.html", Utc::now().timestamp()));

        fs::write(&path, self.render_html()?)?;
        info!(path = %path.display(), events = self.events.len(), "wrote timeline");
        Ok(path)
    }
}

/// Chart.js bar chart of one summary's histogram.
fn chart_script(id: usize, summary: &Summary) -> Result<String> {
    let (labels, counts): (Vec<String>, Vec<u64>) = summary
        .histogram
        .iter()
        .flat_map(|h| h.bins())
        .map(|bin| (bin.label(), bin.count))
        .unzip();

    let labels = serde_json::to_string(&labels)?;
    let counts = serde_json::to_string(&counts)?;

    Ok(GRAPH
        .replace("XCANVASID", &id.to_string())
        .replace("XKEYS", &labels)
        .replace("XVALUES", &counts))
}

const HEAD: &str = r#"<!DOCTYPE html>
<html>
<head>
  <meta charset="utf-8">
  <title>latency-sampler</title>
  <script src="https://cdn.jsdelivr.net/npm/chart.js@4"></script>
  <style>
    body { font-family: monospace; margin: 2em; }
    .graph { width: 60%; float: left; clear: both; }
    .info { width: 35%; float: left; padding-left: 2em; }
  </style>
</head>
<body>
"#;

const GRAPH: &str = r#"  <script>
    new Chart(document.getElementById("canvas-XCANVASID"), {
      type: "bar",
      data: {
        labels: XKEYS,
        datasets: [{ label: "events", data: XVALUES }]
      },
      options: { animation: false }
    });
  </script>
"#;

const TAIL: &str = "</body>\n</html>\n";
