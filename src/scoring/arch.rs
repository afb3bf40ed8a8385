//! Checks specific to architecture wikis: concrete service names in
//! diagrams and explicit communication protocols.

use crate::extract::{LabelTally, PageFeatures};

use super::result::{Criterion, Issue, Outcome};

const SERVICE_NAMES_WEIGHT: u32 = 5;
const PROTOCOLS_WEIGHT: u32 = 5;

pub fn check_service_names(labels: LabelTally) -> Outcome {
    let LabelTally { generic, specific } = labels;
    let max = SERVICE_NAMES_WEIGHT;
    if specific > 0 && generic == 0 {
        Outcome::pass(max, max, format!("Diagram service names are specific: {}", specific))
    } else if specific > 0 {
        Outcome::issue(
            3,
            max,
            Issue::warning(format!(
                "Generic names mixed into diagrams: {} specific, {} generic",
                specific, generic
            )),
        )
    } else if generic > 0 {
        Outcome::issue(
            0,
            max,
            Issue::critical(format!(
                "Diagram service names are generic: {} (use the real service names)",
                generic
            )),
        )
    } else {
        Outcome::pass(3, max, "Diagram label check: nothing to check")
    }
}

pub fn check_protocols(protocols: &[&str]) -> Outcome {
    let max = PROTOCOLS_WEIGHT;
    match protocols {
        [] => Outcome::issue(
            0,
            max,
            Issue::warning("No communication protocol named (REST/gRPC/Kafka etc.)"),
        ),
        [only] => Outcome::pass(3, max, format!("Protocol mentioned: {}", only)),
        many => {
            let shown: Vec<&str> = many.iter().take(3).copied().collect();
            Outcome::pass(max, max, format!("Protocols named: {} etc.", shown.join(", ")))
        }
    }
}

/// Both sub-checks, in order, ready to be folded into a page's rubric.
pub fn arch_specific_quality(features: &PageFeatures) -> [(Criterion, Outcome); 2] {
    [
        (Criterion::ServiceNames, check_service_names(features.labels)),
        (Criterion::Protocols, check_protocols(&features.protocols)),
    ]
}
