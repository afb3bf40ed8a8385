use regex::Regex;
use std::collections::BTreeSet;
use std::path::Path;
use std::sync::OnceLock;

/// Top-level topics every complete architecture wiki covers, by section number.
pub const REQUIRED_SECTIONS: [(u32, &str); 4] = [
    (1, "System Overview"),
    (2, "Service Communication"),
    (3, "Data Architecture"),
    (4, "Infrastructure & Deployment"),
];

fn leading_number_re() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"^([0-9]+)").expect("valid regex"))
}

/// Section number from a leading integer in the file name (`2.3-grpc.md` -> 2).
pub fn section_number(path: &str) -> Option<u32> {
    let name = Path::new(path).file_name()?.to_str()?;
    let caps = leading_number_re().captures(name)?;
    caps[1].parse().ok()
}

pub fn sections_found<'a>(paths: impl IntoIterator<Item = &'a str>) -> BTreeSet<u32> {
    paths.into_iter().filter_map(section_number).collect()
}

/// Required sections absent from `found`, in taxonomy order.
pub fn missing_sections(found: &BTreeSet<u32>) -> Vec<(u32, &'static str)> {
    REQUIRED_SECTIONS
        .iter()
        .filter(|(number, _)| !found.contains(number))
        .copied()
        .collect()
}
