//! Plain-text rendering of the evaluation dashboard.

use crate::case::TestCase;
use crate::metrics::EvaluationResults;
use crate::store::TestCaseStore;

const PLACEHOLDER_ACTUAL: &str = "(pending evaluation)";

/// Render every case followed by the overall results, if present.
pub fn render_text(store: &TestCaseStore) -> String {
    let mut output = String::new();

    output.push_str("\n\u{1F4CA} RAG Chatbot Evaluation Dashboard\n");
    output.push_str("══════════════════════════════════\n");
    output.push_str(&format!("Test Cases: {}\n", store.len()));

    for case in store {
        output.push('\n');
        render_case(&mut output, case);
    }

    if let Some(results) = store.results() {
        output.push('\n');
        render_results(&mut output, results);
    }

    output
}

fn render_case(output: &mut String, case: &TestCase) {
    output.push_str(&format!("Test Case {}\n", case.id));
    output.push_str(&format!("  Input Query: {}\n", case.input));
    output.push_str(&format!("  Expected Output: {}\n", case.expected_output));
    output.push_str("  Evaluation Metrics:\n");
    let m = &case.metrics;
    output.push_str(&format!("    Relevance: {:.2}\n", m.relevance));
    output.push_str(&format!("    Coherence: {:.2}\n", m.coherence));
    output.push_str(&format!("    Groundedness: {:.2}\n", m.groundedness));
    output.push_str(&format!("    Context Recall: {:.2}\n", m.context_recall));

    let actual = if case.actual_output.is_empty() {
        PLACEHOLDER_ACTUAL
    } else {
        case.actual_output.as_str()
    };
    output.push_str(&format!("  Actual Output: {}\n", actual));
}

fn render_results(output: &mut String, results: &EvaluationResults) {
    output.push_str("Overall Evaluation Results\n");
    output.push_str("──────────────────────────\n");
    for line in results.to_string().lines() {
        output.push_str(&format!("  {}\n", line));
    }
}
