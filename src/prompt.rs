//! Free-text prompt to dress parameter mapping.
//!
//! Each parameter category has an ordered list of keyword rules. The prompt
//! is lower-cased and every category is scanned independently: the first
//! matching rule wins, and a category with no match keeps its prior value.

use std::sync::LazyLock;

use regex::Regex;

use crate::color::COLOR_WORDS;
use crate::dress::{DressParameters, Neckline, Pattern, Texture};

/// A keyword pattern and the value it selects.
struct Rule<T> {
    pattern: Regex,
    value: T,
}

fn rules<T: Copy>(table: &[(&str, T)]) -> Vec<Rule<T>> {
    table
        .iter()
        .map(|&(pattern, value)| Rule {
            pattern: Regex::new(pattern).expect("valid keyword pattern"),
            value,
        })
        .collect()
}

fn first_match<T: Copy>(rules: &[Rule<T>], text: &str) -> Option<T> {
    rules
        .iter()
        .find(|rule| rule.pattern.is_match(text))
        .map(|rule| rule.value)
}

static PATTERN_RULES: LazyLock<Vec<Rule<Pattern>>> = LazyLock::new(|| {
    rules(&[
        ("stripe|striped", Pattern::Stripes),
        ("polka|dots?", Pattern::Polka),
        ("floral", Pattern::Floral),
        ("lace", Pattern::Lace),
    ])
});

static SLEEVE_RULES: LazyLock<Vec<Rule<f64>>> = LazyLock::new(|| {
    rules(&[
        ("sleeveless|no sleeves", 5.0),
        ("short sleeves?", 35.0),
        ("long sleeves?", 85.0),
    ])
});

static NECKLINE_RULES: LazyLock<Vec<Rule<Neckline>>> = LazyLock::new(|| {
    rules(&[
        ("v[- ]?neck", Neckline::VNeck),
        ("scoop", Neckline::Scoop),
        ("off[- ]?shoulder", Neckline::OffShoulder),
        ("halter", Neckline::Halter),
        ("boat", Neckline::Boat),
    ])
});

static TRAIN_RULES: LazyLock<Vec<Rule<f64>>> =
    LazyLock::new(|| rules(&[("long train", 90.0), ("short train|no train|mini", 10.0)]));

static TEXTURE_RULES: LazyLock<Vec<Rule<Texture>>> = LazyLock::new(|| {
    rules(&[
        ("silk", Texture::Silk),
        ("satin", Texture::Satin),
        ("velvet", Texture::Velvet),
        ("chiffon", Texture::Chiffon),
        ("lace", Texture::Lace),
    ])
});

static VOLUME_RULES: LazyLock<Vec<Rule<f64>>> = LazyLock::new(|| {
    rules(&[
        ("ballgown|ball gown|princess", 90.0),
        ("a[- ]?line", 60.0),
        ("mermaid|slim|sheath", 30.0),
    ])
});

/// First colour word contained anywhere in the text, in table order.
fn match_color(text: &str) -> Option<&'static str> {
    COLOR_WORDS
        .iter()
        .find(|(name, _)| text.contains(name))
        .map(|(_, hex)| *hex)
}

/// Applies every keyword category found in `prompt` on top of `base`.
pub fn parse_prompt(prompt: &str, base: &DressParameters) -> DressParameters {
    let text = prompt.to_lowercase();
    let mut next = base.clone();

    if let Some(hex) = match_color(&text) {
        next.color = hex.to_string();
    }
    if let Some(pattern) = first_match(&PATTERN_RULES, &text) {
        next.pattern = pattern;
    }
    if let Some(length) = first_match(&SLEEVE_RULES, &text) {
        next.sleeve_length = length;
    }
    if let Some(neckline) = first_match(&NECKLINE_RULES, &text) {
        next.neckline = neckline;
    }
    if let Some(length) = first_match(&TRAIN_RULES, &text) {
        next.train_length = length;
    }
    if let Some(texture) = first_match(&TEXTURE_RULES, &text) {
        next.texture = texture;
    }
    if let Some(volume) = first_match(&VOLUME_RULES, &text) {
        next.skirt_volume = volume;
    }

    tracing::debug!(prompt, changed = next != *base, "parsed prompt");
    next
}
