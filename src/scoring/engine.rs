use crate::extract::PageFeatures;

use super::arch::arch_specific_quality;
use super::config::{ImportanceTier, ProfileTable, RequirementProfile};
use super::result::{Criterion, Issue, Outcome, RubricBuilder, ValidationResult};

/// Score one page's text against the profile for its importance tier.
pub fn evaluate_page(
    file: &str,
    text: &str,
    importance: ImportanceTier,
    profiles: &ProfileTable,
) -> ValidationResult {
    let features = PageFeatures::extract(text);
    let builder = score_features(&features, profiles.get(importance));
    let result = builder.finish(file, importance);
    tracing::debug!(
        file,
        importance = %importance,
        score = result.score,
        max_score = result.max_score,
        grade = %result.grade(),
        "scored page"
    );
    result
}

/// Apply all rubric criteria, in order, to already-extracted features.
pub fn score_features(features: &PageFeatures, profile: &RequirementProfile) -> RubricBuilder {
    let mut builder = RubricBuilder::new();
    builder
        .record(Criterion::WordCount, check_words(features.words, profile.min_words))
        .record(
            Criterion::DiagramCount,
            check_diagrams(features.diagrams, profile.min_diagrams),
        )
        .record(
            Criterion::DiagramTypes,
            check_diagram_types(features, profile.min_diagram_types),
        )
        .record(
            Criterion::SnippetCount,
            check_snippets(features.snippets, profile.min_snippets),
        )
        .record(
            Criterion::SnippetCitations,
            check_citations(features.citations, features.snippets),
        )
        .record(
            Criterion::SourcesLines,
            check_sources_lines(features.sources_lines, profile.min_sources_lines),
        )
        .record(
            Criterion::SourcesPrecision,
            check_sources_precision(features, profile.sources_need_line_numbers),
        )
        .record(
            Criterion::Sections,
            check_sections(features.sections, profile.min_sections),
        )
        .record(Criterion::Overview, check_overview(features.has_overview))
        .record(
            Criterion::RelatedLinks,
            check_related_links(features.has_related_links),
        )
        .record(Criterion::Tables, check_tables(features.tables, profile.min_tables));
    for (criterion, outcome) in arch_specific_quality(features) {
        builder.record(criterion, outcome);
    }
    builder
}

fn check_words(words: usize, min: usize) -> Outcome {
    const MAX: u32 = 15;
    if words >= min {
        Outcome::pass(MAX, MAX, format!("Words: {} (minimum {})", words, min))
    } else if words as f64 >= min as f64 * 0.7 {
        Outcome::issue(
            8,
            MAX,
            Issue::warning(format!("Too few words: {} (minimum {})", words, min)),
        )
    } else {
        Outcome::issue(
            0,
            MAX,
            Issue::critical(format!("Too few words: {} (minimum {})", words, min)),
        )
    }
}

fn check_diagrams(diagrams: usize, min: usize) -> Outcome {
    const MAX: u32 = 10;
    if diagrams >= min {
        Outcome::pass(MAX, MAX, format!("Diagrams: {} (minimum {})", diagrams, min))
    } else if diagrams > 0 {
        Outcome::issue(
            5,
            MAX,
            Issue::warning(format!("Too few diagrams: {} (minimum {})", diagrams, min)),
        )
    } else {
        Outcome::issue(
            0,
            MAX,
            Issue::critical(format!("No diagrams (minimum {})", min)),
        )
    }
}

fn check_diagram_types(features: &PageFeatures, min: usize) -> Outcome {
    const MAX: u32 = 5;
    let kinds = &features.diagram_kinds;
    let names = kinds
        .iter()
        .map(|k| k.as_str())
        .collect::<Vec<_>>()
        .join(", ");
    if kinds.len() >= min {
        Outcome::pass(
            MAX,
            MAX,
            format!("Diagram types: {} ({} kinds)", names, kinds.len()),
        )
    } else if !kinds.is_empty() {
        Outcome::issue(
            2,
            MAX,
            Issue::warning(format!(
                "Too few diagram types: {} ({} kinds, minimum {})",
                names,
                kinds.len(),
                min
            )),
        )
    } else {
        Outcome::issue(0, MAX, Issue::critical("No diagrams"))
    }
}

fn check_snippets(snippets: usize, min: usize) -> Outcome {
    const MAX: u32 = 15;
    const PARTIAL_CAP: u32 = 10;
    if snippets >= min {
        Outcome::pass(MAX, MAX, format!("Code snippets: {} (minimum {})", snippets, min))
    } else if snippets > 0 {
        // min > 0 here, since snippets < min.
        let proportional = (MAX as usize * snippets / min) as u32;
        Outcome::issue(
            proportional.min(PARTIAL_CAP),
            MAX,
            Issue::warning(format!("Too few code snippets: {} (minimum {})", snippets, min)),
        )
    } else {
        Outcome::issue(
            0,
            MAX,
            Issue::critical(format!(
                "No code snippets (minimum {}, quote the infrastructure definitions)",
                min
            )),
        )
    }
}

fn check_citations(citations: usize, snippets: usize) -> Outcome {
    const MAX: u32 = 5;
    if snippets == 0 {
        return Outcome::silent(0, MAX);
    }
    if citations as f64 >= snippets as f64 * 0.6 {
        Outcome::pass(
            MAX,
            MAX,
            format!("Snippet citations: {}/{} snippets cite a file", citations, snippets),
        )
    } else if citations > 0 {
        Outcome::issue(
            2,
            MAX,
            Issue::warning(format!(
                "Too few snippet citations: only {}/{}",
                citations, snippets
            )),
        )
    } else {
        Outcome::issue(
            0,
            MAX,
            Issue::critical("No snippet citations (add a `# path/to/file.yml` comment)"),
        )
    }
}

fn check_sources_lines(lines: usize, min: usize) -> Outcome {
    const MAX: u32 = 10;
    if lines >= min {
        Outcome::pass(MAX, MAX, format!("Sources lines: {}", lines))
    } else if lines > 0 {
        Outcome::issue(
            5,
            MAX,
            Issue::warning(format!("Too few Sources lines: {} (minimum {})", lines, min)),
        )
    } else {
        Outcome::issue(0, MAX, Issue::critical("No Sources lines"))
    }
}

fn check_sources_precision(features: &PageFeatures, required: bool) -> Outcome {
    use crate::extract::MAX_ACCEPTABLE_LINE_RANGE;

    const MAX: u32 = 10;
    if features.sources_lines == 0 {
        return Outcome::silent(0, MAX);
    }
    if !required {
        return Outcome::pass(5, MAX, "Sources line numbers: not required for this tier");
    }
    let counts = features.line_precision;
    if counts.precise > 0 && counts.imprecise == 0 && counts.without_line_numbers == 0 {
        Outcome::pass(
            MAX,
            MAX,
            format!("Sources line numbers: all {} lines precise", counts.precise),
        )
    } else if counts.precise > 0 {
        Outcome::issue(
            7,
            MAX,
            Issue::warning(format!(
                "Sources line numbers: {} precise, {} imprecise, {} without line numbers",
                counts.precise, counts.imprecise, counts.without_line_numbers
            )),
        )
    } else if counts.imprecise > 0 {
        Outcome::issue(
            3,
            MAX,
            Issue::warning(format!(
                "Sources line numbers imprecise: {} lines span more than {} lines",
                counts.imprecise, MAX_ACCEPTABLE_LINE_RANGE
            )),
        )
    } else {
        Outcome::issue(
            0,
            MAX,
            Issue::critical("Sources lines have no line numbers (use [docker-compose.yml:L1-L45])"),
        )
    }
}

fn check_sections(sections: usize, min: usize) -> Outcome {
    const MAX: u32 = 5;
    if sections >= min {
        Outcome::pass(MAX, MAX, format!("Sections: {}", sections))
    } else {
        let awarded = if sections > 0 { 2 } else { 0 };
        Outcome::issue(
            awarded,
            MAX,
            Issue::warning(format!("Too few sections: {} (minimum {})", sections, min)),
        )
    }
}

fn check_overview(present: bool) -> Outcome {
    if present {
        Outcome::pass(5, 5, "Overview paragraph present")
    } else {
        Outcome::issue(0, 5, Issue::critical("No overview paragraph"))
    }
}

fn check_related_links(present: bool) -> Outcome {
    if present {
        Outcome::pass(5, 5, "Related page links present")
    } else {
        Outcome::issue(0, 5, Issue::warning("No related page links"))
    }
}

fn check_tables(tables: usize, min: usize) -> Outcome {
    const MAX: u32 = 5;
    if min == 0 {
        return if tables > 0 {
            Outcome::pass(MAX, MAX, format!("Tables: {}", tables))
        } else {
            Outcome::pass(3, MAX, "Tables: none (optional for this tier)")
        };
    }
    if tables >= min {
        Outcome::pass(MAX, MAX, format!("Tables: {}", tables))
    } else if tables > 0 {
        Outcome::issue(
            2,
            MAX,
            Issue::warning(format!("Too few tables: {} (minimum {})", tables, min)),
        )
    } else {
        Outcome::issue(
            0,
            MAX,
            Issue::critical("No tables (list services and APIs in a table)"),
        )
    }
}
