//! Property schema: which literal keywords, value classes and functions each
//! CSS property accepts.
//!
//! Entries are either a definition or an alias of another property; aliases
//! are resolved once on first lookup.

use std::collections::{HashMap, HashSet};
use std::sync::OnceLock;

use bitflags::bitflags;

bitflags! {
    /// Value classes a property admits beyond its literal keywords.
    #[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
    pub struct PropBits: u16 {
        /// Numbers, lengths, percentages.
        const QUANTITY = 1;
        /// `#rgb`, `#rrggbb` and the alpha forms.
        const HASH_VALUE = 2;
        const NEGATIVE_QUANTITY = 4;
        /// Quoted strings.
        const QSTRING = 8;
        /// Quoted strings and `url(...)` are URLs.
        const URL = 16;
        /// Bare words are quoted into a string (font families).
        const UNRESERVED_WORD = 64;
        const UNICODE_RANGE = 128;
        /// Identifiers name document-global things and get the id suffix.
        const GLOBAL_NAME = 512;
        /// Identifiers must themselves be property names.
        const PROPERTY_NAME = 1024;
    }
}

enum Entry {
    Def {
        bits: PropBits,
        literals: &'static [usize],
        functions: &'static [&'static str],
    },
    Alias(&'static str),
}

/// What one property (or function, keyed as `name()`) accepts.
#[derive(Debug)]
pub struct PropertySchema {
    pub bits: PropBits,
    literals: HashSet<&'static str>,
    functions: &'static [&'static str],
}

impl PropertySchema {
    pub fn allows_literal(&self, word: &str) -> bool {
        self.literals.contains(word)
    }

    /// Function signatures such as `rgb()` allowed inside the value.
    pub fn functions(&self) -> &'static [&'static str] {
        self.functions
    }
}

fn resolve_table() -> HashMap<&'static str, PropertySchema> {
    let defs: HashMap<&'static str, &Entry> = PROPERTIES.iter().map(|(name, entry)| (*name, entry)).collect();
    let mut table = HashMap::with_capacity(PROPERTIES.len());
    for (name, entry) in PROPERTIES {
        let mut current = entry;
        // Alias chains are one level deep; the bound only guards the table.
        for _ in 0..4 {
            match current {
                Entry::Alias(target) => match defs.get(target) {
                    Some(next) => current = next,
                    None => break,
                },
                Entry::Def { .. } => break,
            }
        }
        let Entry::Def { bits, literals, functions } = current else {
            log::warn!(target: "sanitizer.css", "property {name} aliases an unknown property");
            continue;
        };
        let literals = literals
            .iter()
            .filter_map(|group| LITERAL_GROUPS.get(*group))
            .flat_map(|group| group.iter().copied())
            .collect();
        table.insert(
            *name,
            PropertySchema {
                bits: *bits,
                literals,
                functions,
            },
        );
    }
    table
}

/// Looks up `name` (already lowercased, without vendor prefix).
pub fn property_schema(name: &str) -> Option<&'static PropertySchema> {
    static TABLE: OnceLock<HashMap<&'static str, PropertySchema>> = OnceLock::new();
    TABLE.get_or_init(resolve_table).get(name)
}

pub fn is_known_property(name: &str) -> bool {
    property_schema(name).is_some()
}

static LITERAL_GROUPS: &[&[&str]] = &[
    // 0
    &["aliceblue", "antiquewhite", "aqua", "aquamarine", "azure", "beige", "bisque", "black", "blanchedalmond", "blue", "blueviolet", "brown", "burlywood", "cadetblue", "chartreuse", "chocolate", "coral", "cornflowerblue", "cornsilk", "crimson", "currentcolor", "cyan", "darkblue", "darkcyan", "darkgoldenrod", "darkgray", "darkgreen", "darkgrey", "darkkhaki", "darkmagenta", "darkolivegreen", "darkorange", "darkorchid", "darkred", "darksalmon", "darkseagreen", "darkslateblue", "darkslategray", "darkslategrey", "darkturquoise", "darkviolet", "deeppink", "deepskyblue", "dimgray", "dimgrey", "dodgerblue", "firebrick", "floralwhite", "forestgreen", "fuchsia", "gainsboro", "ghostwhite", "gold", "goldenrod", "gray", "green", "greenyellow", "grey", "honeydew", "hotpink", "indianred", "indigo", "ivory", "khaki", "lavender", "lavenderblush", "lawngreen", "lemonchiffon", "lightblue", "lightcoral", "lightcyan", "lightgoldenrodyellow", "lightgray", "lightgreen", "lightgrey", "lightpink", "lightsalmon", "lightseagreen", "lightskyblue", "lightslategray", "lightslategrey", "lightsteelblue", "lightyellow", "lime", "limegreen", "linen", "magenta", "maroon", "mediumaquamarine", "mediumblue", "mediumorchid", "mediumpurple", "mediumseagreen", "mediumslateblue", "mediumspringgreen", "mediumturquoise", "mediumvioletred", "midnightblue", "mintcream", "mistyrose", "moccasin", "navajowhite", "navy", "oldlace", "olive", "olivedrab", "orange", "orangered", "orchid", "palegoldenrod", "palegreen", "paleturquoise", "palevioletred", "papayawhip", "peachpuff", "peru", "pink", "plum", "powderblue", "purple", "rebeccapurple", "red", "rosybrown", "royalblue", "saddlebrown", "salmon", "sandybrown", "seagreen", "seashell", "sienna", "silver", "skyblue", "slateblue", "slategray", "slategrey", "snow", "springgreen", "steelblue", "tan", "teal", "thistle", "tomato", "transparent", "turquoise", "violet", "wheat", "white", "whitesmoke", "yellow", "yellowgreen"],
    // 1
    &["all-scroll", "col-resize", "crosshair", "default", "e-resize", "hand", "help", "move", "n-resize", "ne-resize", "no-drop", "not-allowed", "nw-resize", "pointer", "progress", "row-resize", "s-resize", "se-resize", "sw-resize", "text", "vertical-text", "w-resize", "wait"],
    // 2
    &["color", "color-burn", "color-dodge", "darken", "difference", "exclusion", "hard-light", "hue", "lighten", "luminosity", "multiply", "overlay", "saturation", "screen", "soft-light"],
    // 3
    &["armenian", "decimal", "decimal-leading-zero", "disc", "georgian", "lower-alpha", "lower-greek", "lower-latin", "lower-roman", "square", "upper-alpha", "upper-latin", "upper-roman"],
    // 4
    &["100", "200", "300", "400", "500", "600", "700", "800", "900", "bold", "bolder", "lighter"],
    // 5
    &["block-level", "inline-level", "table-caption", "table-cell", "table-column", "table-column-group", "table-footer-group", "table-header-group", "table-row", "table-row-group"],
    // 6
    &["condensed", "expanded", "extra-condensed", "extra-expanded", "narrower", "semi-condensed", "semi-expanded", "ultra-condensed", "ultra-expanded", "wider"],
    // 7
    &["inherit", "inline", "inline-block", "inline-box", "inline-flex", "inline-grid", "inline-list-item", "inline-stack", "inline-table", "run-in"],
    // 8
    &["behind", "center-left", "center-right", "far-left", "far-right", "left-side", "leftwards", "right-side", "rightwards"],
    // 9
    &["large", "larger", "small", "smaller", "x-large", "x-small", "xx-large", "xx-small"],
    // 10
    &["dashed", "dotted", "double", "groove", "outset", "ridge", "solid"],
    // 11
    &["ease", "ease-in", "ease-in-out", "ease-out", "linear", "step-end", "step-start"],
    // 12
    &["at", "closest-corner", "closest-side", "ellipse", "farthest-corner", "farthest-side"],
    // 13
    &["baseline", "middle", "sub", "super", "text-bottom", "text-top"],
    // 14
    &["caption", "icon", "menu", "message-box", "small-caption", "status-bar"],
    // 15
    &["fast", "faster", "slow", "slower", "x-fast", "x-slow"],
    // 16
    &["above", "below", "higher", "level", "lower"],
    // 17
    &["cursive", "fantasy", "monospace", "sans-serif", "serif"],
    // 18
    &["loud", "silent", "soft", "x-loud", "x-soft"],
    // 19
    &["no-repeat", "repeat-x", "repeat-y", "round", "space"],
    // 20
    &["blink", "line-through", "overline", "underline"],
    // 21
    &["block", "flex", "grid", "table"],
    // 22
    &["high", "low", "x-high", "x-low"],
    // 23
    &["nowrap", "pre", "pre-line", "pre-wrap"],
    // 24
    &["absolute", "relative", "static"],
    // 25
    &["alternate", "alternate-reverse", "reverse"],
    // 26
    &["border-box", "content-box", "padding-box"],
    // 27
    &["capitalize", "lowercase", "uppercase"],
    // 28
    &["child", "female", "male"],
    // 29
    &["=", "opacity"],
    // 30
    &["backwards", "forwards"],
    // 31
    &["bidi-override", "embed"],
    // 32
    &["bottom", "top"],
    // 33
    &["break-all", "keep-all"],
    // 34
    &["clip", "ellipsis"],
    // 35
    &["contain", "cover"],
    // 36
    &["continuous", "digits"],
    // 37
    &["end", "start"],
    // 38
    &["flat", "preserve-3d"],
    // 39
    &["hide", "show"],
    // 40
    &["horizontal", "vertical"],
    // 41
    &["inside", "outside"],
    // 42
    &["italic", "oblique"],
    // 43
    &["left", "right"],
    // 44
    &["ltr", "rtl"],
    // 45
    &["no-content", "no-display"],
    // 46
    &["paused", "running"],
    // 47
    &["suppress", "unrestricted"],
    // 48
    &["thick", "thin"],
    // 49
    &[","],
    // 50
    &["/"],
    // 51
    &["all"],
    // 52
    &["always"],
    // 53
    &["auto"],
    // 54
    &["avoid"],
    // 55
    &["both"],
    // 56
    &["break-word"],
    // 57
    &["center"],
    // 58
    &["circle"],
    // 59
    &["code"],
    // 60
    &["collapse"],
    // 61
    &["contents"],
    // 62
    &["fixed"],
    // 63
    &["hidden"],
    // 64
    &["infinite"],
    // 65
    &["inset"],
    // 66
    &["invert"],
    // 67
    &["justify"],
    // 68
    &["list-item"],
    // 69
    &["local"],
    // 70
    &["medium"],
    // 71
    &["mix"],
    // 72
    &["none"],
    // 73
    &["normal"],
    // 74
    &["once"],
    // 75
    &["repeat"],
    // 76
    &["scroll"],
    // 77
    &["separate"],
    // 78
    &["small-caps"],
    // 79
    &["spell-out"],
    // 80
    &["to"],
    // 81
    &["visible"],
];

static PROPERTIES: &[(&str, Entry)] = &[
    (
        "animation",
        Entry::Def {
            bits: PropBits::QUANTITY.union(PropBits::NEGATIVE_QUANTITY).union(PropBits::GLOBAL_NAME),
            literals: &[11, 25, 30, 46, 49, 55, 64, 72, 73],
            functions: &["cubic-bezier()", "steps()"],
        },
    ),
    (
        "animation-delay",
        Entry::Def {
            bits: PropBits::QUANTITY.union(PropBits::NEGATIVE_QUANTITY),
            literals: &[49],
            functions: &[],
        },
    ),
    (
        "animation-direction",
        Entry::Def {
            bits: PropBits::empty(),
            literals: &[25, 49, 73],
            functions: &[],
        },
    ),
    ("animation-duration", Entry::Alias("animation-delay")),
    (
        "animation-fill-mode",
        Entry::Def {
            bits: PropBits::empty(),
            literals: &[30, 49, 55, 72],
            functions: &[],
        },
    ),
    (
        "animation-iteration-count",
        Entry::Def {
            bits: PropBits::QUANTITY.union(PropBits::NEGATIVE_QUANTITY),
            literals: &[49, 64],
            functions: &[],
        },
    ),
    (
        "animation-name",
        Entry::Def {
            bits: PropBits::GLOBAL_NAME,
            literals: &[49, 72],
            functions: &[],
        },
    ),
    (
        "animation-play-state",
        Entry::Def {
            bits: PropBits::empty(),
            literals: &[46, 49],
            functions: &[],
        },
    ),
    (
        "animation-timing-function",
        Entry::Def {
            bits: PropBits::empty(),
            literals: &[11, 49],
            functions: &["cubic-bezier()", "steps()"],
        },
    ),
    (
        "appearance",
        Entry::Def {
            bits: PropBits::empty(),
            literals: &[72],
            functions: &[],
        },
    ),
    (
        "azimuth",
        Entry::Def {
            bits: PropBits::QUANTITY.union(PropBits::NEGATIVE_QUANTITY),
            literals: &[8, 43, 57],
            functions: &[],
        },
    ),
    (
        "backface-visibility",
        Entry::Def {
            bits: PropBits::empty(),
            literals: &[60, 63, 81],
            functions: &[],
        },
    ),
    (
        "background",
        Entry::Def {
            bits: PropBits::QUANTITY.union(PropBits::HASH_VALUE).union(PropBits::NEGATIVE_QUANTITY).union(PropBits::URL),
            literals: &[0, 19, 26, 32, 35, 43, 49, 50, 53, 57, 62, 69, 72, 75, 76],
            functions: &["hsl()", "hsla()", "image()", "linear-gradient()", "radial-gradient()", "repeating-linear-gradient()", "repeating-radial-gradient()", "rgb()", "rgba()"],
        },
    ),
    (
        "background-attachment",
        Entry::Def {
            bits: PropBits::empty(),
            literals: &[49, 62, 69, 76],
            functions: &[],
        },
    ),
    (
        "background-color",
        Entry::Def {
            bits: PropBits::HASH_VALUE,
            literals: &[0],
            functions: &["hsl()", "hsla()", "rgb()", "rgba()"],
        },
    ),
    (
        "background-image",
        Entry::Def {
            bits: PropBits::URL,
            literals: &[49, 72],
            functions: &["image()", "linear-gradient()", "radial-gradient()", "repeating-linear-gradient()", "repeating-radial-gradient()"],
        },
    ),
    (
        "background-position",
        Entry::Def {
            bits: PropBits::QUANTITY.union(PropBits::NEGATIVE_QUANTITY),
            literals: &[32, 43, 49, 57],
            functions: &[],
        },
    ),
    (
        "background-repeat",
        Entry::Def {
            bits: PropBits::empty(),
            literals: &[19, 49, 75],
            functions: &[],
        },
    ),
    (
        "background-size",
        Entry::Def {
            bits: PropBits::QUANTITY.union(PropBits::NEGATIVE_QUANTITY),
            literals: &[35, 49, 53],
            functions: &[],
        },
    ),
    (
        "border",
        Entry::Def {
            bits: PropBits::QUANTITY.union(PropBits::HASH_VALUE).union(PropBits::NEGATIVE_QUANTITY),
            literals: &[0, 10, 48, 63, 65, 70, 72],
            functions: &["hsl()", "hsla()", "rgb()", "rgba()"],
        },
    ),
    ("border-bottom", Entry::Alias("border")),
    ("border-bottom-color", Entry::Alias("background-color")),
    (
        "border-bottom-left-radius",
        Entry::Def {
            bits: PropBits::QUANTITY.union(PropBits::NEGATIVE_QUANTITY),
            literals: &[],
            functions: &[],
        },
    ),
    ("border-bottom-right-radius", Entry::Alias("border-bottom-left-radius")),
    (
        "border-bottom-style",
        Entry::Def {
            bits: PropBits::empty(),
            literals: &[10, 63, 65, 72],
            functions: &[],
        },
    ),
    (
        "border-bottom-width",
        Entry::Def {
            bits: PropBits::QUANTITY.union(PropBits::NEGATIVE_QUANTITY),
            literals: &[48, 70],
            functions: &[],
        },
    ),
    (
        "border-collapse",
        Entry::Def {
            bits: PropBits::empty(),
            literals: &[60, 77],
            functions: &[],
        },
    ),
    ("border-color", Entry::Alias("background-color")),
    ("border-left", Entry::Alias("border")),
    ("border-left-color", Entry::Alias("background-color")),
    ("border-left-style", Entry::Alias("border-bottom-style")),
    ("border-left-width", Entry::Alias("border-bottom-width")),
    (
        "border-radius",
        Entry::Def {
            bits: PropBits::QUANTITY.union(PropBits::NEGATIVE_QUANTITY),
            literals: &[50],
            functions: &[],
        },
    ),
    ("border-right", Entry::Alias("border")),
    ("border-right-color", Entry::Alias("background-color")),
    ("border-right-style", Entry::Alias("border-bottom-style")),
    ("border-right-width", Entry::Alias("border-bottom-width")),
    ("border-spacing", Entry::Alias("border-bottom-left-radius")),
    ("border-style", Entry::Alias("border-bottom-style")),
    ("border-top", Entry::Alias("border")),
    ("border-top-color", Entry::Alias("background-color")),
    ("border-top-left-radius", Entry::Alias("border-bottom-left-radius")),
    ("border-top-right-radius", Entry::Alias("border-bottom-left-radius")),
    ("border-top-style", Entry::Alias("border-bottom-style")),
    ("border-top-width", Entry::Alias("border-bottom-width")),
    ("border-width", Entry::Alias("border-bottom-width")),
    (
        "bottom",
        Entry::Def {
            bits: PropBits::QUANTITY.union(PropBits::NEGATIVE_QUANTITY),
            literals: &[53],
            functions: &[],
        },
    ),
    (
        "box",
        Entry::Def {
            bits: PropBits::empty(),
            literals: &[61, 72, 73],
            functions: &[],
        },
    ),
    (
        "box-shadow",
        Entry::Def {
            bits: PropBits::QUANTITY.union(PropBits::HASH_VALUE).union(PropBits::NEGATIVE_QUANTITY),
            literals: &[0, 49, 65, 72],
            functions: &["hsl()", "hsla()", "rgb()", "rgba()"],
        },
    ),
    (
        "box-sizing",
        Entry::Def {
            bits: PropBits::empty(),
            literals: &[26],
            functions: &[],
        },
    ),
    (
        "caption-side",
        Entry::Def {
            bits: PropBits::empty(),
            literals: &[32],
            functions: &[],
        },
    ),
    (
        "clear",
        Entry::Def {
            bits: PropBits::empty(),
            literals: &[43, 55, 72],
            functions: &[],
        },
    ),
    (
        "clip",
        Entry::Def {
            bits: PropBits::empty(),
            literals: &[53],
            functions: &["rect()"],
        },
    ),
    ("color", Entry::Alias("background-color")),
    (
        "content",
        Entry::Def {
            bits: PropBits::QSTRING,
            literals: &[72, 73],
            functions: &[],
        },
    ),
    (
        "cue",
        Entry::Def {
            bits: PropBits::URL,
            literals: &[72],
            functions: &[],
        },
    ),
    ("cue-after", Entry::Alias("cue")),
    ("cue-before", Entry::Alias("cue")),
    (
        "cursor",
        Entry::Def {
            bits: PropBits::URL,
            literals: &[1, 49, 53],
            functions: &[],
        },
    ),
    (
        "direction",
        Entry::Def {
            bits: PropBits::empty(),
            literals: &[44],
            functions: &[],
        },
    ),
    (
        "display",
        Entry::Def {
            bits: PropBits::empty(),
            literals: &[5, 7, 21, 53, 68, 72],
            functions: &[],
        },
    ),
    (
        "display-extras",
        Entry::Def {
            bits: PropBits::empty(),
            literals: &[68, 72],
            functions: &[],
        },
    ),
    (
        "display-inside",
        Entry::Def {
            bits: PropBits::empty(),
            literals: &[21, 53],
            functions: &[],
        },
    ),
    (
        "display-outside",
        Entry::Def {
            bits: PropBits::empty(),
            literals: &[5, 72],
            functions: &[],
        },
    ),
    (
        "elevation",
        Entry::Def {
            bits: PropBits::QUANTITY.union(PropBits::NEGATIVE_QUANTITY),
            literals: &[16],
            functions: &[],
        },
    ),
    (
        "empty-cells",
        Entry::Def {
            bits: PropBits::empty(),
            literals: &[39],
            functions: &[],
        },
    ),
    (
        "filter",
        Entry::Def {
            bits: PropBits::empty(),
            literals: &[],
            functions: &["alpha()"],
        },
    ),
    (
        "float",
        Entry::Def {
            bits: PropBits::empty(),
            literals: &[43, 72],
            functions: &[],
        },
    ),
    (
        "font",
        Entry::Def {
            bits: PropBits::QUANTITY.union(PropBits::QSTRING).union(PropBits::UNRESERVED_WORD),
            literals: &[4, 9, 14, 17, 42, 49, 50, 70, 73, 78],
            functions: &[],
        },
    ),
    (
        "font-family",
        Entry::Def {
            bits: PropBits::QSTRING.union(PropBits::UNRESERVED_WORD),
            literals: &[17, 49],
            functions: &[],
        },
    ),
    (
        "font-size",
        Entry::Def {
            bits: PropBits::QUANTITY,
            literals: &[9, 70],
            functions: &[],
        },
    ),
    (
        "font-stretch",
        Entry::Def {
            bits: PropBits::empty(),
            literals: &[6, 73],
            functions: &[],
        },
    ),
    (
        "font-style",
        Entry::Def {
            bits: PropBits::empty(),
            literals: &[42, 73],
            functions: &[],
        },
    ),
    (
        "font-variant",
        Entry::Def {
            bits: PropBits::empty(),
            literals: &[73, 78],
            functions: &[],
        },
    ),
    (
        "font-weight",
        Entry::Def {
            bits: PropBits::empty(),
            literals: &[4, 73],
            functions: &[],
        },
    ),
    ("height", Entry::Alias("bottom")),
    ("left", Entry::Alias("bottom")),
    (
        "letter-spacing",
        Entry::Def {
            bits: PropBits::QUANTITY.union(PropBits::NEGATIVE_QUANTITY),
            literals: &[73],
            functions: &[],
        },
    ),
    (
        "line-height",
        Entry::Def {
            bits: PropBits::QUANTITY,
            literals: &[73],
            functions: &[],
        },
    ),
    (
        "list-style",
        Entry::Def {
            bits: PropBits::URL,
            literals: &[3, 41, 58, 72],
            functions: &["image()", "linear-gradient()", "radial-gradient()", "repeating-linear-gradient()", "repeating-radial-gradient()"],
        },
    ),
    (
        "list-style-image",
        Entry::Def {
            bits: PropBits::URL,
            literals: &[72],
            functions: &["image()", "linear-gradient()", "radial-gradient()", "repeating-linear-gradient()", "repeating-radial-gradient()"],
        },
    ),
    (
        "list-style-position",
        Entry::Def {
            bits: PropBits::empty(),
            literals: &[41],
            functions: &[],
        },
    ),
    (
        "list-style-type",
        Entry::Def {
            bits: PropBits::empty(),
            literals: &[3, 58, 72],
            functions: &[],
        },
    ),
    ("margin", Entry::Alias("bottom")),
    ("margin-bottom", Entry::Alias("bottom")),
    ("margin-left", Entry::Alias("bottom")),
    ("margin-right", Entry::Alias("bottom")),
    ("margin-top", Entry::Alias("bottom")),
    (
        "max-height",
        Entry::Def {
            bits: PropBits::QUANTITY,
            literals: &[53, 72],
            functions: &[],
        },
    ),
    ("max-width", Entry::Alias("max-height")),
    (
        "min-height",
        Entry::Def {
            bits: PropBits::QUANTITY,
            literals: &[53],
            functions: &[],
        },
    ),
    ("min-width", Entry::Alias("min-height")),
    (
        "mix-blend-mode",
        Entry::Def {
            bits: PropBits::empty(),
            literals: &[2, 73],
            functions: &[],
        },
    ),
    (
        "opacity",
        Entry::Def {
            bits: PropBits::QUANTITY,
            literals: &[],
            functions: &[],
        },
    ),
    (
        "outline",
        Entry::Def {
            bits: PropBits::QUANTITY.union(PropBits::HASH_VALUE).union(PropBits::NEGATIVE_QUANTITY),
            literals: &[0, 10, 48, 63, 65, 66, 70, 72],
            functions: &["hsl()", "hsla()", "rgb()", "rgba()"],
        },
    ),
    (
        "outline-color",
        Entry::Def {
            bits: PropBits::HASH_VALUE,
            literals: &[0, 66],
            functions: &["hsl()", "hsla()", "rgb()", "rgba()"],
        },
    ),
    ("outline-style", Entry::Alias("border-bottom-style")),
    ("outline-width", Entry::Alias("border-bottom-width")),
    (
        "overflow",
        Entry::Def {
            bits: PropBits::empty(),
            literals: &[53, 63, 76, 81],
            functions: &[],
        },
    ),
    (
        "overflow-wrap",
        Entry::Def {
            bits: PropBits::empty(),
            literals: &[56, 73],
            functions: &[],
        },
    ),
    (
        "overflow-x",
        Entry::Def {
            bits: PropBits::empty(),
            literals: &[45, 53, 63, 76, 81],
            functions: &[],
        },
    ),
    ("overflow-y", Entry::Alias("overflow-x")),
    ("padding", Entry::Alias("opacity")),
    ("padding-bottom", Entry::Alias("opacity")),
    ("padding-left", Entry::Alias("opacity")),
    ("padding-right", Entry::Alias("opacity")),
    ("padding-top", Entry::Alias("opacity")),
    (
        "page-break-after",
        Entry::Def {
            bits: PropBits::empty(),
            literals: &[43, 52, 53, 54],
            functions: &[],
        },
    ),
    ("page-break-before", Entry::Alias("page-break-after")),
    (
        "page-break-inside",
        Entry::Def {
            bits: PropBits::empty(),
            literals: &[53, 54],
            functions: &[],
        },
    ),
    ("pause", Entry::Alias("border-bottom-left-radius")),
    ("pause-after", Entry::Alias("border-bottom-left-radius")),
    ("pause-before", Entry::Alias("border-bottom-left-radius")),
    (
        "perspective",
        Entry::Def {
            bits: PropBits::QUANTITY.union(PropBits::NEGATIVE_QUANTITY),
            literals: &[72],
            functions: &[],
        },
    ),
    (
        "perspective-origin",
        Entry::Def {
            bits: PropBits::QUANTITY.union(PropBits::NEGATIVE_QUANTITY),
            literals: &[32, 43, 57],
            functions: &[],
        },
    ),
    (
        "pitch",
        Entry::Def {
            bits: PropBits::QUANTITY.union(PropBits::NEGATIVE_QUANTITY),
            literals: &[22, 70],
            functions: &[],
        },
    ),
    ("pitch-range", Entry::Alias("border-bottom-left-radius")),
    (
        "play-during",
        Entry::Def {
            bits: PropBits::URL,
            literals: &[53, 71, 72, 75],
            functions: &[],
        },
    ),
    (
        "position",
        Entry::Def {
            bits: PropBits::empty(),
            literals: &[24],
            functions: &[],
        },
    ),
    (
        "quotes",
        Entry::Def {
            bits: PropBits::QSTRING,
            literals: &[72],
            functions: &[],
        },
    ),
    (
        "resize",
        Entry::Def {
            bits: PropBits::empty(),
            literals: &[40, 55, 72],
            functions: &[],
        },
    ),
    ("richness", Entry::Alias("border-bottom-left-radius")),
    ("right", Entry::Alias("bottom")),
    (
        "speak",
        Entry::Def {
            bits: PropBits::empty(),
            literals: &[72, 73, 79],
            functions: &[],
        },
    ),
    (
        "speak-header",
        Entry::Def {
            bits: PropBits::empty(),
            literals: &[52, 74],
            functions: &[],
        },
    ),
    (
        "speak-numeral",
        Entry::Def {
            bits: PropBits::empty(),
            literals: &[36],
            functions: &[],
        },
    ),
    (
        "speak-punctuation",
        Entry::Def {
            bits: PropBits::empty(),
            literals: &[59, 72],
            functions: &[],
        },
    ),
    (
        "speech-rate",
        Entry::Def {
            bits: PropBits::QUANTITY.union(PropBits::NEGATIVE_QUANTITY),
            literals: &[15, 70],
            functions: &[],
        },
    ),
    ("stress", Entry::Alias("border-bottom-left-radius")),
    (
        "table-layout",
        Entry::Def {
            bits: PropBits::empty(),
            literals: &[53, 62],
            functions: &[],
        },
    ),
    (
        "text-align",
        Entry::Def {
            bits: PropBits::empty(),
            literals: &[43, 57, 67],
            functions: &[],
        },
    ),
    (
        "text-decoration",
        Entry::Def {
            bits: PropBits::empty(),
            literals: &[20, 72],
            functions: &[],
        },
    ),
    ("text-indent", Entry::Alias("border-bottom-left-radius")),
    (
        "text-overflow",
        Entry::Def {
            bits: PropBits::QSTRING,
            literals: &[34],
            functions: &[],
        },
    ),
    ("text-shadow", Entry::Alias("box-shadow")),
    (
        "text-transform",
        Entry::Def {
            bits: PropBits::empty(),
            literals: &[27, 72],
            functions: &[],
        },
    ),
    (
        "text-wrap",
        Entry::Def {
            bits: PropBits::empty(),
            literals: &[47, 72, 73],
            functions: &[],
        },
    ),
    ("top", Entry::Alias("bottom")),
    (
        "transform",
        Entry::Def {
            bits: PropBits::empty(),
            literals: &[72],
            functions: &["matrix()", "perspective()", "rotate()", "rotate3d()", "rotatex()", "rotatey()", "rotatez()", "scale()", "scale3d()", "scalex()", "scaley()", "scalez()", "skew()", "skewx()", "skewy()", "translate()", "translate3d()", "translatex()", "translatey()", "translatez()"],
        },
    ),
    ("transform-origin", Entry::Alias("perspective-origin")),
    (
        "transform-style",
        Entry::Def {
            bits: PropBits::empty(),
            literals: &[38],
            functions: &[],
        },
    ),
    (
        "transition",
        Entry::Def {
            bits: PropBits::QUANTITY.union(PropBits::NEGATIVE_QUANTITY).union(PropBits::PROPERTY_NAME),
            literals: &[11, 49, 51, 72],
            functions: &["cubic-bezier()", "steps()"],
        },
    ),
    ("transition-delay", Entry::Alias("animation-delay")),
    ("transition-duration", Entry::Alias("animation-delay")),
    (
        "transition-property",
        Entry::Def {
            bits: PropBits::PROPERTY_NAME,
            literals: &[49, 51],
            functions: &[],
        },
    ),
    ("transition-timing-function", Entry::Alias("animation-timing-function")),
    (
        "unicode-bidi",
        Entry::Def {
            bits: PropBits::empty(),
            literals: &[31, 73],
            functions: &[],
        },
    ),
    (
        "vertical-align",
        Entry::Def {
            bits: PropBits::QUANTITY.union(PropBits::NEGATIVE_QUANTITY),
            literals: &[13, 32],
            functions: &[],
        },
    ),
    ("visibility", Entry::Alias("backface-visibility")),
    (
        "voice-family",
        Entry::Def {
            bits: PropBits::QSTRING,
            literals: &[28, 49],
            functions: &[],
        },
    ),
    (
        "volume",
        Entry::Def {
            bits: PropBits::QUANTITY,
            literals: &[18, 70],
            functions: &[],
        },
    ),
    (
        "white-space",
        Entry::Def {
            bits: PropBits::empty(),
            literals: &[23, 73],
            functions: &[],
        },
    ),
    ("width", Entry::Alias("min-height")),
    (
        "word-break",
        Entry::Def {
            bits: PropBits::empty(),
            literals: &[33, 73],
            functions: &[],
        },
    ),
    ("word-spacing", Entry::Alias("letter-spacing")),
    ("word-wrap", Entry::Alias("overflow-wrap")),
    ("z-index", Entry::Alias("bottom")),
    ("zoom", Entry::Alias("line-height")),
    ("cubic-bezier()", Entry::Alias("animation-delay")),
    (
        "steps()",
        Entry::Def {
            bits: PropBits::QUANTITY.union(PropBits::NEGATIVE_QUANTITY),
            literals: &[37, 49],
            functions: &[],
        },
    ),
    ("hsl()", Entry::Alias("animation-delay")),
    ("hsla()", Entry::Alias("animation-delay")),
    (
        "image()",
        Entry::Def {
            bits: PropBits::HASH_VALUE.union(PropBits::URL),
            literals: &[0, 49],
            functions: &["hsl()", "hsla()", "rgb()", "rgba()"],
        },
    ),
    (
        "linear-gradient()",
        Entry::Def {
            bits: PropBits::QUANTITY.union(PropBits::HASH_VALUE).union(PropBits::NEGATIVE_QUANTITY),
            literals: &[0, 32, 43, 49, 80],
            functions: &["hsl()", "hsla()", "rgb()", "rgba()"],
        },
    ),
    (
        "radial-gradient()",
        Entry::Def {
            bits: PropBits::QUANTITY.union(PropBits::HASH_VALUE).union(PropBits::NEGATIVE_QUANTITY),
            literals: &[0, 12, 32, 43, 49, 57, 58],
            functions: &["hsl()", "hsla()", "rgb()", "rgba()"],
        },
    ),
    ("repeating-linear-gradient()", Entry::Alias("linear-gradient()")),
    ("repeating-radial-gradient()", Entry::Alias("radial-gradient()")),
    (
        "rgb()",
        Entry::Def {
            bits: PropBits::QUANTITY,
            literals: &[49],
            functions: &[],
        },
    ),
    ("rgba()", Entry::Alias("rgb()")),
    (
        "rect()",
        Entry::Def {
            bits: PropBits::QUANTITY.union(PropBits::NEGATIVE_QUANTITY),
            literals: &[49, 53],
            functions: &[],
        },
    ),
    (
        "alpha()",
        Entry::Def {
            bits: PropBits::QUANTITY,
            literals: &[29],
            functions: &[],
        },
    ),
    ("matrix()", Entry::Alias("animation-delay")),
    ("perspective()", Entry::Alias("border-bottom-left-radius")),
    ("rotate()", Entry::Alias("border-bottom-left-radius")),
    ("rotate3d()", Entry::Alias("animation-delay")),
    ("rotatex()", Entry::Alias("border-bottom-left-radius")),
    ("rotatey()", Entry::Alias("border-bottom-left-radius")),
    ("rotatez()", Entry::Alias("border-bottom-left-radius")),
    ("scale()", Entry::Alias("animation-delay")),
    ("scale3d()", Entry::Alias("animation-delay")),
    ("scalex()", Entry::Alias("border-bottom-left-radius")),
    ("scaley()", Entry::Alias("border-bottom-left-radius")),
    ("scalez()", Entry::Alias("border-bottom-left-radius")),
    ("skew()", Entry::Alias("animation-delay")),
    ("skewx()", Entry::Alias("border-bottom-left-radius")),
    ("skewy()", Entry::Alias("border-bottom-left-radius")),
    ("translate()", Entry::Alias("animation-delay")),
    ("translate3d()", Entry::Alias("animation-delay")),
    ("translatex()", Entry::Alias("border-bottom-left-radius")),
    ("translatey()", Entry::Alias("border-bottom-left-radius")),
    ("translatez()", Entry::Alias("border-bottom-left-radius")),
];
