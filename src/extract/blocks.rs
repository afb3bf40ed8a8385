use regex::Regex;
use std::sync::OnceLock;

/// Language tag reserved for diagram fences.
pub const DIAGRAM_TAG: &str = "mermaid";

/// A fenced block whose opening fence carries a language tag.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FencedBlock<'a> {
    pub lang: &'a str,
    pub body: &'a str,
}

impl FencedBlock<'_> {
    pub fn is_diagram(&self) -> bool {
        self.lang == DIAGRAM_TAG
    }
}

fn any_fence_re() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"```[\s\S]*?```").expect("valid regex"))
}

fn fence_tag_re() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"```(\w*)").expect("valid regex"))
}

fn tagged_block_re() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"```(\w+)\n([\s\S]*?)```").expect("valid regex"))
}

fn diagram_block_re() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"```mermaid\n([\s\S]*?)```").expect("valid regex"))
}

/// Remove every fenced region, pairing fences left to right.
/// An unpaired trailing fence is left in place.
pub fn strip_fenced(text: &str) -> String {
    any_fence_re().replace_all(text, "").into_owned()
}

/// Tags following every fence marker, closing fences included (as empty tags).
pub fn fence_tags(text: &str) -> impl Iterator<Item = &str> {
    fence_tag_re()
        .captures_iter(text)
        .filter_map(|caps| caps.get(1).map(|m| m.as_str()))
}

/// Blocks opened with a language tag immediately followed by a newline.
pub fn tagged_blocks(text: &str) -> Vec<FencedBlock<'_>> {
    tagged_block_re()
        .captures_iter(text)
        .filter_map(|caps| {
            Some(FencedBlock {
                lang: caps.get(1)?.as_str(),
                body: caps.get(2)?.as_str(),
            })
        })
        .collect()
}

/// Bodies of diagram blocks (opening tag line up to the closing fence).
pub fn diagram_bodies(text: &str) -> Vec<&str> {
    diagram_block_re()
        .captures_iter(text)
        .filter_map(|caps| caps.get(1).map(|m| m.as_str()))
        .collect()
}
