//! Plain-text report formatting
//!
//! Renders retrieved openings into the text block returned through the
//! tool call. One numbered section per opening, in the order the
//! knowledge base ranked them.

use crate::kb::JobOpening;

/// Render retrieved openings as a human-readable report.
pub fn format_job_openings(openings: &[JobOpening]) -> String {
    if openings.is_empty() {
        return "No job openings found matching your query.".to_string();
    }

    let mut report = format!("Found {} job opening(s):\n", openings.len());

    for (i, opening) in openings.iter().enumerate() {
        report.push_str(&format!("\n--- Job Opening #{} ---\n", i + 1));

        if let Some(score) = opening.score {
            report.push_str(&format!("Relevance Score: {:.1}%\n", score * 100.0));
        }

        report.push_str(&format!("\n{}\n", opening.content));

        if !opening.metadata.is_empty() {
            report.push_str("\nMetadata:\n");
            for (key, value) in &opening.metadata {
                report.push_str(&format!("  - {}: {}\n", key, value));
            }
        }

        if let Some(source) = &opening.source {
            report.push_str(&format!("\nSource Type: {}\n", source.source_type));
            if let Some(location) = &source.location {
                report.push_str(&format!("Location: {}\n", location));
            }
        }
    }

    report
}
