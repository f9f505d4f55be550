//! Shorthand tables for line, draw and marker styles.
//!
//! Each table maps the short code stored on a line to a display name.
//! Several codes may name the same style; `prepare_choices` keeps a single
//! code per display name.

use crate::form::{Choice, ChoiceOption};
use indexmap::IndexMap;

pub type StyleTable = &'static [(&'static str, &'static str)];

pub const LINE_STYLES: StyleTable = &[
    ("-", "Solid"),
    ("--", "Dashed"),
    ("-.", "DashDot"),
    (":", "Dotted"),
    ("None", "None"),
];

pub const DRAW_STYLES: StyleTable = &[
    ("default", "Default"),
    ("steps-pre", "Steps (Pre)"),
    ("steps", "Steps (Pre)"),
    ("steps-mid", "Steps (Mid)"),
    ("steps-post", "Steps (Post)"),
];

/// Display name shared by every "no marker" code
pub const NO_MARKER: &str = "nothing";

pub const MARKERS: StyleTable = &[
    (".", "point"),
    (",", "pixel"),
    ("o", "circle"),
    ("v", "triangle_down"),
    ("^", "triangle_up"),
    ("<", "triangle_left"),
    (">", "triangle_right"),
    ("1", "tri_down"),
    ("2", "tri_up"),
    ("3", "tri_left"),
    ("4", "tri_right"),
    ("8", "octagon"),
    ("s", "square"),
    ("p", "pentagon"),
    ("*", "star"),
    ("h", "hexagon1"),
    ("H", "hexagon2"),
    ("+", "plus"),
    ("x", "x"),
    ("D", "diamond"),
    ("d", "thin_diamond"),
    ("|", "vline"),
    ("_", "hline"),
    ("P", "plus_filled"),
    ("X", "x_filled"),
    ("tickleft", "tickleft"),
    ("tickright", "tickright"),
    ("tickup", "tickup"),
    ("tickdown", "tickdown"),
    ("caretleft", "caretleft"),
    ("caretright", "caretright"),
    ("caretup", "caretup"),
    ("caretdown", "caretdown"),
    ("caretleftbase", "caretleftbase"),
    ("caretrightbase", "caretrightbase"),
    ("caretupbase", "caretupbase"),
    ("caretdownbase", "caretdownbase"),
    ("None", NO_MARKER),
    ("none", NO_MARKER),
    (" ", NO_MARKER),
    ("", NO_MARKER),
];

pub fn display_name(table: StyleTable, short: &str) -> Option<&'static str> {
    table
        .iter()
        .find(|(code, _)| *code == short)
        .map(|(_, name)| *name)
}

/// Whether the marker code means "draw no marker"
pub fn is_no_marker(short: &str) -> bool {
    display_name(MARKERS, short) == Some(NO_MARKER)
}

/// Build a choice over `table` with the style of `init` selected.
///
/// A code missing from the table is added under its own name. Synonyms
/// collapse onto one code per display name: `init` for its own style, the
/// last declared code otherwise. Options are sorted by display name and
/// `initial` is `init`, so confirming the choice unchanged keeps the code.
pub fn prepare_choices(table: StyleTable, init: &str) -> Choice {
    let mut name_to_code: IndexMap<String, String> = IndexMap::new();
    for (code, name) in table {
        name_to_code.insert(name.to_string(), code.to_string());
    }
    let init_name = display_name(table, init).unwrap_or(init);
    name_to_code.insert(init_name.to_string(), init.to_string());

    let mut options: Vec<ChoiceOption> = name_to_code
        .into_iter()
        .map(|(label, key)| ChoiceOption { key, label })
        .collect();
    options.sort_by(|a, b| a.label.cmp(&b.label));
    Choice::new(init, options)
}
