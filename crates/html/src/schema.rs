//! Static element and attribute schema.
//!
//! Tables are plain data; the lookup maps are built on first use and shared
//! read-only afterwards.

use std::collections::HashMap;
use std::sync::OnceLock;

use bitflags::bitflags;

bitflags! {
    /// Per-element parsing and policy flags.
    #[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
    pub struct ElementFlags: u16 {
        /// End tag may be omitted (`<li>`, `<p>`, table parts).
        const OPTIONAL_ENDTAG = 1;
        /// Void element; never pushed on the open-tag stack.
        const EMPTY = 2;
        /// Raw text: content is not parsed until the matching end tag.
        const CDATA = 4;
        /// Escapable raw text: entities allowed, tags are not.
        const RCDATA = 8;
        /// Always rejected by the default policy.
        const UNSAFE = 16;
        /// Tag is elided but its children are kept.
        const FOLDABLE = 32;
        const SCRIPT = 64;
        const STYLE = 128;
        const VIRTUALIZED = 256;
    }
}

impl ElementFlags {
    /// Content of the element is scanned as a text block.
    pub fn is_text_block(self) -> bool {
        self.intersects(ElementFlags::CDATA | ElementFlags::RCDATA)
    }
}

/// How an attribute value is interpreted, and so which policy applies.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum AttributeType {
    None = 0,
    Uri = 1,
    Script = 2,
    Style = 3,
    Id = 4,
    IdRef = 5,
    IdRefs = 6,
    GlobalName = 7,
    LocalName = 8,
    Classes = 9,
    FrameTarget = 10,
    UriFragment = 11,
    Html = 12,
    MediaQuery = 13,
}

impl AttributeType {
    /// Values that are name tokens handed to a name-token policy.
    pub fn is_name_token(self) -> bool {
        matches!(
            self,
            AttributeType::Id
                | AttributeType::IdRef
                | AttributeType::IdRefs
                | AttributeType::GlobalName
                | AttributeType::LocalName
                | AttributeType::Classes
        )
    }
}

/// What following a URI-valued attribute does to the document.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum UriEffect {
    NotLoaded = 0,
    SameDocument = 1,
    NewDocument = 2,
}

/// Under which conditions the referenced resource is loaded.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum LoaderType {
    Data = 0,
    Sandboxed = 1,
    Unsandboxed = 2,
}

const O: u16 = ElementFlags::OPTIONAL_ENDTAG.bits();
const E: u16 = ElementFlags::EMPTY.bits();
const C: u16 = ElementFlags::CDATA.bits();
const R: u16 = ElementFlags::RCDATA.bits();
const U: u16 = ElementFlags::UNSAFE.bits();
const F: u16 = ElementFlags::FOLDABLE.bits();
const S: u16 = ElementFlags::SCRIPT.bits();
const ST: u16 = ElementFlags::STYLE.bits();
const V: u16 = ElementFlags::VIRTUALIZED.bits();

static ELEMENTS: &[(&str, u16)] = &[
    ("a", 0),
    ("abbr", 0),
    ("acronym", 0),
    ("address", 0),
    ("applet", U | V),
    ("area", E),
    ("article", 0),
    ("aside", 0),
    ("audio", 0),
    ("b", 0),
    ("base", E | U | V),
    ("basefont", E | U | V),
    ("bdi", 0),
    ("bdo", 0),
    ("big", 0),
    ("blockquote", 0),
    ("body", O | U | F | V),
    ("br", E),
    ("button", 0),
    ("canvas", 0),
    ("caption", 0),
    ("center", 0),
    ("cite", 0),
    ("code", 0),
    ("col", E),
    ("colgroup", O),
    ("command", E),
    ("data", 0),
    ("datalist", 0),
    ("dd", O),
    ("del", 0),
    ("details", 0),
    ("dfn", 0),
    ("dialog", U | V),
    ("dir", 0),
    ("div", 0),
    ("dl", 0),
    ("dt", O),
    ("em", 0),
    ("fieldset", 0),
    ("figcaption", 0),
    ("figure", 0),
    ("font", 0),
    ("footer", 0),
    ("form", 0),
    ("frame", E | U | V),
    ("frameset", U | V),
    ("h1", 0),
    ("h2", 0),
    ("h3", 0),
    ("h4", 0),
    ("h5", 0),
    ("h6", 0),
    ("head", O | U | F | V),
    ("header", 0),
    ("hgroup", 0),
    ("hr", E),
    ("html", O | U | F | V),
    ("i", 0),
    ("iframe", C),
    ("img", E),
    ("input", E),
    ("ins", 0),
    ("isindex", E | U | V),
    ("kbd", 0),
    ("keygen", E | U | V),
    ("label", 0),
    ("legend", 0),
    ("li", O),
    ("link", E | U | V),
    ("map", 0),
    ("mark", 0),
    ("menu", 0),
    ("meta", E | U | V),
    ("meter", 0),
    ("nav", 0),
    ("nobr", 0),
    ("noembed", C | U | V),
    ("noframes", C | U | V),
    ("noscript", C | U | V),
    ("object", U | V),
    ("ol", 0),
    ("optgroup", 0),
    ("option", O),
    ("output", 0),
    ("p", O),
    ("param", E | U | V),
    ("pre", 0),
    ("progress", 0),
    ("q", 0),
    ("s", 0),
    ("samp", 0),
    ("script", C | U | S),
    ("section", 0),
    ("select", 0),
    ("small", 0),
    ("source", E),
    ("span", 0),
    ("strike", 0),
    ("strong", 0),
    ("style", C | U | ST),
    ("sub", 0),
    ("summary", 0),
    ("sup", 0),
    ("table", 0),
    ("tbody", O),
    ("td", O),
    ("template", C),
    ("textarea", R),
    ("tfoot", O),
    ("th", O),
    ("thead", O),
    ("time", 0),
    ("title", R | U | V),
    ("tr", O),
    ("track", E),
    ("tt", 0),
    ("u", 0),
    ("ul", 0),
    ("var", 0),
    ("video", 0),
    ("wbr", E),
];

static ATTRIBUTES: &[((&str, &str), AttributeType)] = &[
    (("*", "class"), AttributeType::Classes),
    (("*", "dir"), AttributeType::None),
    (("*", "draggable"), AttributeType::None),
    (("*", "hidden"), AttributeType::None),
    (("*", "id"), AttributeType::Id),
    (("*", "inert"), AttributeType::None),
    (("*", "itemprop"), AttributeType::None),
    (("*", "itemref"), AttributeType::IdRefs),
    (("*", "itemscope"), AttributeType::None),
    (("*", "lang"), AttributeType::None),
    (("*", "onblur"), AttributeType::Script),
    (("*", "onchange"), AttributeType::Script),
    (("*", "onclick"), AttributeType::Script),
    (("*", "ondblclick"), AttributeType::Script),
    (("*", "onerror"), AttributeType::Script),
    (("*", "onfocus"), AttributeType::Script),
    (("*", "onkeydown"), AttributeType::Script),
    (("*", "onkeypress"), AttributeType::Script),
    (("*", "onkeyup"), AttributeType::Script),
    (("*", "onload"), AttributeType::Script),
    (("*", "onmousedown"), AttributeType::Script),
    (("*", "onmousemove"), AttributeType::Script),
    (("*", "onmouseout"), AttributeType::Script),
    (("*", "onmouseover"), AttributeType::Script),
    (("*", "onmouseup"), AttributeType::Script),
    (("*", "onreset"), AttributeType::Script),
    (("*", "onscroll"), AttributeType::Script),
    (("*", "onselect"), AttributeType::Script),
    (("*", "onsubmit"), AttributeType::Script),
    (("*", "ontouchcancel"), AttributeType::Script),
    (("*", "ontouchend"), AttributeType::Script),
    (("*", "ontouchenter"), AttributeType::Script),
    (("*", "ontouchleave"), AttributeType::Script),
    (("*", "ontouchmove"), AttributeType::Script),
    (("*", "ontouchstart"), AttributeType::Script),
    (("*", "onunload"), AttributeType::Script),
    (("*", "spellcheck"), AttributeType::None),
    (("*", "style"), AttributeType::Style),
    (("*", "tabindex"), AttributeType::None),
    (("*", "title"), AttributeType::None),
    (("*", "translate"), AttributeType::None),
    (("a", "accesskey"), AttributeType::None),
    (("a", "coords"), AttributeType::None),
    (("a", "href"), AttributeType::Uri),
    (("a", "hreflang"), AttributeType::None),
    (("a", "name"), AttributeType::GlobalName),
    (("a", "onblur"), AttributeType::Script),
    (("a", "onfocus"), AttributeType::Script),
    (("a", "shape"), AttributeType::None),
    (("a", "target"), AttributeType::FrameTarget),
    (("a", "type"), AttributeType::None),
    (("area", "accesskey"), AttributeType::None),
    (("area", "alt"), AttributeType::None),
    (("area", "coords"), AttributeType::None),
    (("area", "href"), AttributeType::Uri),
    (("area", "nohref"), AttributeType::None),
    (("area", "onblur"), AttributeType::Script),
    (("area", "onfocus"), AttributeType::Script),
    (("area", "shape"), AttributeType::None),
    (("area", "target"), AttributeType::FrameTarget),
    (("audio", "controls"), AttributeType::None),
    (("audio", "loop"), AttributeType::None),
    (("audio", "mediagroup"), AttributeType::IdRef),
    (("audio", "muted"), AttributeType::None),
    (("audio", "preload"), AttributeType::None),
    (("audio", "src"), AttributeType::Uri),
    (("bdo", "dir"), AttributeType::None),
    (("blockquote", "cite"), AttributeType::Uri),
    (("br", "clear"), AttributeType::None),
    (("button", "accesskey"), AttributeType::None),
    (("button", "disabled"), AttributeType::None),
    (("button", "name"), AttributeType::LocalName),
    (("button", "onblur"), AttributeType::Script),
    (("button", "onfocus"), AttributeType::Script),
    (("button", "type"), AttributeType::None),
    (("button", "value"), AttributeType::None),
    (("canvas", "height"), AttributeType::None),
    (("canvas", "width"), AttributeType::None),
    (("caption", "align"), AttributeType::None),
    (("col", "align"), AttributeType::None),
    (("col", "char"), AttributeType::None),
    (("col", "charoff"), AttributeType::None),
    (("col", "span"), AttributeType::None),
    (("col", "valign"), AttributeType::None),
    (("col", "width"), AttributeType::None),
    (("colgroup", "align"), AttributeType::None),
    (("colgroup", "char"), AttributeType::None),
    (("colgroup", "charoff"), AttributeType::None),
    (("colgroup", "span"), AttributeType::None),
    (("colgroup", "valign"), AttributeType::None),
    (("colgroup", "width"), AttributeType::None),
    (("command", "checked"), AttributeType::None),
    (("command", "command"), AttributeType::IdRef),
    (("command", "disabled"), AttributeType::None),
    (("command", "icon"), AttributeType::Uri),
    (("command", "label"), AttributeType::None),
    (("command", "radiogroup"), AttributeType::None),
    (("command", "type"), AttributeType::None),
    (("data", "value"), AttributeType::None),
    (("del", "cite"), AttributeType::Uri),
    (("del", "datetime"), AttributeType::None),
    (("details", "open"), AttributeType::None),
    (("dir", "compact"), AttributeType::None),
    (("div", "align"), AttributeType::None),
    (("dl", "compact"), AttributeType::None),
    (("fieldset", "disabled"), AttributeType::None),
    (("font", "color"), AttributeType::None),
    (("font", "face"), AttributeType::None),
    (("font", "size"), AttributeType::None),
    (("form", "accept"), AttributeType::None),
    (("form", "action"), AttributeType::Uri),
    (("form", "autocomplete"), AttributeType::None),
    (("form", "enctype"), AttributeType::None),
    (("form", "method"), AttributeType::None),
    (("form", "name"), AttributeType::GlobalName),
    (("form", "novalidate"), AttributeType::None),
    (("form", "onreset"), AttributeType::Script),
    (("form", "onsubmit"), AttributeType::Script),
    (("form", "target"), AttributeType::FrameTarget),
    (("h1", "align"), AttributeType::None),
    (("h2", "align"), AttributeType::None),
    (("h3", "align"), AttributeType::None),
    (("h4", "align"), AttributeType::None),
    (("h5", "align"), AttributeType::None),
    (("h6", "align"), AttributeType::None),
    (("hr", "align"), AttributeType::None),
    (("hr", "noshade"), AttributeType::None),
    (("hr", "size"), AttributeType::None),
    (("hr", "width"), AttributeType::None),
    (("iframe", "align"), AttributeType::None),
    (("iframe", "frameborder"), AttributeType::None),
    (("iframe", "height"), AttributeType::None),
    (("iframe", "marginheight"), AttributeType::None),
    (("iframe", "marginwidth"), AttributeType::None),
    (("iframe", "width"), AttributeType::None),
    (("img", "align"), AttributeType::None),
    (("img", "alt"), AttributeType::None),
    (("img", "border"), AttributeType::None),
    (("img", "height"), AttributeType::None),
    (("img", "hspace"), AttributeType::None),
    (("img", "ismap"), AttributeType::None),
    (("img", "name"), AttributeType::GlobalName),
    (("img", "src"), AttributeType::Uri),
    (("img", "usemap"), AttributeType::UriFragment),
    (("img", "vspace"), AttributeType::None),
    (("img", "width"), AttributeType::None),
    (("input", "accept"), AttributeType::None),
    (("input", "accesskey"), AttributeType::None),
    (("input", "align"), AttributeType::None),
    (("input", "alt"), AttributeType::None),
    (("input", "autocomplete"), AttributeType::None),
    (("input", "checked"), AttributeType::None),
    (("input", "disabled"), AttributeType::None),
    (("input", "inputmode"), AttributeType::None),
    (("input", "ismap"), AttributeType::None),
    (("input", "list"), AttributeType::IdRef),
    (("input", "max"), AttributeType::None),
    (("input", "maxlength"), AttributeType::None),
    (("input", "min"), AttributeType::None),
    (("input", "multiple"), AttributeType::None),
    (("input", "name"), AttributeType::LocalName),
    (("input", "onblur"), AttributeType::Script),
    (("input", "onchange"), AttributeType::Script),
    (("input", "onfocus"), AttributeType::Script),
    (("input", "onselect"), AttributeType::Script),
    (("input", "pattern"), AttributeType::None),
    (("input", "placeholder"), AttributeType::None),
    (("input", "readonly"), AttributeType::None),
    (("input", "required"), AttributeType::None),
    (("input", "size"), AttributeType::None),
    (("input", "src"), AttributeType::Uri),
    (("input", "step"), AttributeType::None),
    (("input", "type"), AttributeType::None),
    (("input", "usemap"), AttributeType::UriFragment),
    (("input", "value"), AttributeType::None),
    (("ins", "cite"), AttributeType::Uri),
    (("ins", "datetime"), AttributeType::None),
    (("label", "accesskey"), AttributeType::None),
    (("label", "for"), AttributeType::IdRef),
    (("label", "onblur"), AttributeType::Script),
    (("label", "onfocus"), AttributeType::Script),
    (("legend", "accesskey"), AttributeType::None),
    (("legend", "align"), AttributeType::None),
    (("li", "type"), AttributeType::None),
    (("li", "value"), AttributeType::None),
    (("map", "name"), AttributeType::GlobalName),
    (("menu", "compact"), AttributeType::None),
    (("menu", "label"), AttributeType::None),
    (("menu", "type"), AttributeType::None),
    (("meter", "high"), AttributeType::None),
    (("meter", "low"), AttributeType::None),
    (("meter", "max"), AttributeType::None),
    (("meter", "min"), AttributeType::None),
    (("meter", "optimum"), AttributeType::None),
    (("meter", "value"), AttributeType::None),
    (("ol", "compact"), AttributeType::None),
    (("ol", "reversed"), AttributeType::None),
    (("ol", "start"), AttributeType::None),
    (("ol", "type"), AttributeType::None),
    (("optgroup", "disabled"), AttributeType::None),
    (("optgroup", "label"), AttributeType::None),
    (("option", "disabled"), AttributeType::None),
    (("option", "label"), AttributeType::None),
    (("option", "selected"), AttributeType::None),
    (("option", "value"), AttributeType::None),
    (("output", "for"), AttributeType::IdRefs),
    (("output", "name"), AttributeType::LocalName),
    (("p", "align"), AttributeType::None),
    (("pre", "width"), AttributeType::None),
    (("progress", "max"), AttributeType::None),
    (("progress", "min"), AttributeType::None),
    (("progress", "value"), AttributeType::None),
    (("q", "cite"), AttributeType::Uri),
    (("select", "autocomplete"), AttributeType::None),
    (("select", "disabled"), AttributeType::None),
    (("select", "multiple"), AttributeType::None),
    (("select", "name"), AttributeType::LocalName),
    (("select", "onblur"), AttributeType::Script),
    (("select", "onchange"), AttributeType::Script),
    (("select", "onfocus"), AttributeType::Script),
    (("select", "required"), AttributeType::None),
    (("select", "size"), AttributeType::None),
    (("source", "type"), AttributeType::None),
    (("table", "align"), AttributeType::None),
    (("table", "bgcolor"), AttributeType::None),
    (("table", "border"), AttributeType::None),
    (("table", "cellpadding"), AttributeType::None),
    (("table", "cellspacing"), AttributeType::None),
    (("table", "frame"), AttributeType::None),
    (("table", "rules"), AttributeType::None),
    (("table", "summary"), AttributeType::None),
    (("table", "width"), AttributeType::None),
    (("tbody", "align"), AttributeType::None),
    (("tbody", "char"), AttributeType::None),
    (("tbody", "charoff"), AttributeType::None),
    (("tbody", "valign"), AttributeType::None),
    (("td", "abbr"), AttributeType::None),
    (("td", "align"), AttributeType::None),
    (("td", "axis"), AttributeType::None),
    (("td", "bgcolor"), AttributeType::None),
    (("td", "char"), AttributeType::None),
    (("td", "charoff"), AttributeType::None),
    (("td", "colspan"), AttributeType::None),
    (("td", "headers"), AttributeType::IdRefs),
    (("td", "height"), AttributeType::None),
    (("td", "nowrap"), AttributeType::None),
    (("td", "rowspan"), AttributeType::None),
    (("td", "scope"), AttributeType::None),
    (("td", "valign"), AttributeType::None),
    (("td", "width"), AttributeType::None),
    (("template", "type"), AttributeType::None),
    (("textarea", "accesskey"), AttributeType::None),
    (("textarea", "autocomplete"), AttributeType::None),
    (("textarea", "cols"), AttributeType::None),
    (("textarea", "disabled"), AttributeType::None),
    (("textarea", "inputmode"), AttributeType::None),
    (("textarea", "name"), AttributeType::LocalName),
    (("textarea", "onblur"), AttributeType::Script),
    (("textarea", "onchange"), AttributeType::Script),
    (("textarea", "onfocus"), AttributeType::Script),
    (("textarea", "onselect"), AttributeType::Script),
    (("textarea", "placeholder"), AttributeType::None),
    (("textarea", "readonly"), AttributeType::None),
    (("textarea", "required"), AttributeType::None),
    (("textarea", "rows"), AttributeType::None),
    (("textarea", "wrap"), AttributeType::None),
    (("tfoot", "align"), AttributeType::None),
    (("tfoot", "char"), AttributeType::None),
    (("tfoot", "charoff"), AttributeType::None),
    (("tfoot", "valign"), AttributeType::None),
    (("th", "abbr"), AttributeType::None),
    (("th", "align"), AttributeType::None),
    (("th", "axis"), AttributeType::None),
    (("th", "bgcolor"), AttributeType::None),
    (("th", "char"), AttributeType::None),
    (("th", "charoff"), AttributeType::None),
    (("th", "colspan"), AttributeType::None),
    (("th", "headers"), AttributeType::IdRefs),
    (("th", "height"), AttributeType::None),
    (("th", "nowrap"), AttributeType::None),
    (("th", "rowspan"), AttributeType::None),
    (("th", "scope"), AttributeType::None),
    (("th", "valign"), AttributeType::None),
    (("th", "width"), AttributeType::None),
    (("thead", "align"), AttributeType::None),
    (("thead", "char"), AttributeType::None),
    (("thead", "charoff"), AttributeType::None),
    (("thead", "valign"), AttributeType::None),
    (("tr", "align"), AttributeType::None),
    (("tr", "bgcolor"), AttributeType::None),
    (("tr", "char"), AttributeType::None),
    (("tr", "charoff"), AttributeType::None),
    (("tr", "valign"), AttributeType::None),
    (("track", "default"), AttributeType::None),
    (("track", "kind"), AttributeType::None),
    (("track", "label"), AttributeType::None),
    (("track", "srclang"), AttributeType::None),
    (("ul", "compact"), AttributeType::None),
    (("ul", "type"), AttributeType::None),
    (("video", "controls"), AttributeType::None),
    (("video", "height"), AttributeType::None),
    (("video", "loop"), AttributeType::None),
    (("video", "mediagroup"), AttributeType::IdRef),
    (("video", "muted"), AttributeType::None),
    (("video", "poster"), AttributeType::Uri),
    (("video", "preload"), AttributeType::None),
    (("video", "src"), AttributeType::Uri),
    (("video", "width"), AttributeType::None),
];

static URI_ANNOTATIONS: &[((&str, &str), UriEffect, LoaderType)] = &[
    (("a", "href"), UriEffect::NewDocument, LoaderType::Unsandboxed),
    (("area", "href"), UriEffect::NewDocument, LoaderType::Unsandboxed),
    (("audio", "src"), UriEffect::SameDocument, LoaderType::Unsandboxed),
    (("blockquote", "cite"), UriEffect::NotLoaded, LoaderType::Unsandboxed),
    (("command", "icon"), UriEffect::SameDocument, LoaderType::Sandboxed),
    (("del", "cite"), UriEffect::NotLoaded, LoaderType::Unsandboxed),
    (("form", "action"), UriEffect::NewDocument, LoaderType::Unsandboxed),
    (("img", "src"), UriEffect::SameDocument, LoaderType::Sandboxed),
    (("input", "src"), UriEffect::SameDocument, LoaderType::Sandboxed),
    (("ins", "cite"), UriEffect::NotLoaded, LoaderType::Unsandboxed),
    (("q", "cite"), UriEffect::NotLoaded, LoaderType::Unsandboxed),
    (("video", "poster"), UriEffect::SameDocument, LoaderType::Sandboxed),
    (("video", "src"), UriEffect::SameDocument, LoaderType::Unsandboxed),
];

type PairMap<T> = HashMap<&'static str, HashMap<&'static str, T>>;

fn pair_map<T: Copy>(entries: impl Iterator<Item = ((&'static str, &'static str), T)>) -> PairMap<T> {
    let mut map: PairMap<T> = HashMap::new();
    for ((tag, attr), value) in entries {
        map.entry(tag).or_default().insert(attr, value);
    }
    map
}

fn element_table() -> &'static HashMap<&'static str, ElementFlags> {
    static TABLE: OnceLock<HashMap<&'static str, ElementFlags>> = OnceLock::new();
    TABLE.get_or_init(|| {
        ELEMENTS
            .iter()
            .map(|&(name, bits)| (name, ElementFlags::from_bits_truncate(bits)))
            .collect()
    })
}

fn attribute_table() -> &'static PairMap<AttributeType> {
    static TABLE: OnceLock<PairMap<AttributeType>> = OnceLock::new();
    TABLE.get_or_init(|| pair_map(ATTRIBUTES.iter().copied()))
}

fn uri_table() -> &'static PairMap<(UriEffect, LoaderType)> {
    static TABLE: OnceLock<PairMap<(UriEffect, LoaderType)>> = OnceLock::new();
    TABLE.get_or_init(|| {
        pair_map(
            URI_ANNOTATIONS
                .iter()
                .map(|&(key, effect, loader)| (key, (effect, loader))),
        )
    })
}

fn lookup_pair<T: Copy>(map: &PairMap<T>, tag: &str, attr: &str) -> Option<T> {
    map.get(tag).and_then(|attrs| attrs.get(attr)).copied()
}

/// Flags for a lowercase element name; `None` for unknown elements.
pub fn element_flags(tag: &str) -> Option<ElementFlags> {
    element_table().get(tag).copied()
}

/// Type of `attr` on `tag`, falling back to the `*` wildcard entry.
pub fn attribute_type(tag: &str, attr: &str) -> Option<AttributeType> {
    let table = attribute_table();
    lookup_pair(table, tag, attr).or_else(|| lookup_pair(table, "*", attr))
}

pub fn uri_effect(tag: &str, attr: &str) -> Option<UriEffect> {
    lookup_pair(uri_table(), tag, attr).map(|(effect, _)| effect)
}

pub fn loader_type(tag: &str, attr: &str) -> Option<LoaderType> {
    lookup_pair(uri_table(), tag, attr).map(|(_, loader)| loader)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn element_flags_cover_structural_classes() {
        assert_eq!(element_flags("div"), Some(ElementFlags::empty()));
        assert_eq!(element_flags("img"), Some(ElementFlags::EMPTY));
        assert_eq!(element_flags("li"), Some(ElementFlags::OPTIONAL_ENDTAG));
        assert_eq!(element_flags("textarea"), Some(ElementFlags::RCDATA));
        assert_eq!(
            element_flags("script"),
            Some(ElementFlags::SCRIPT | ElementFlags::UNSAFE | ElementFlags::CDATA)
        );
        let body = element_flags("body").expect("body is known");
        assert!(body.contains(ElementFlags::FOLDABLE | ElementFlags::OPTIONAL_ENDTAG));
        assert!(element_flags("title").is_some_and(ElementFlags::is_text_block));
        assert_eq!(element_flags("blink"), None);
        assert_eq!(element_flags("DIV"), None);
    }

    #[test]
    fn attribute_lookup_prefers_element_specific_entries() {
        assert_eq!(attribute_type("a", "href"), Some(AttributeType::Uri));
        assert_eq!(attribute_type("img", "usemap"), Some(AttributeType::UriFragment));
        assert_eq!(attribute_type("label", "for"), Some(AttributeType::IdRef));
        assert_eq!(attribute_type("td", "headers"), Some(AttributeType::IdRefs));
        assert_eq!(attribute_type("span", "id"), Some(AttributeType::Id));
        assert_eq!(attribute_type("span", "class"), Some(AttributeType::Classes));
        assert_eq!(attribute_type("span", "style"), Some(AttributeType::Style));
        assert_eq!(attribute_type("span", "onclick"), Some(AttributeType::Script));
        assert_eq!(attribute_type("span", "href"), None);
        assert_eq!(attribute_type("span", "data-x"), None);
    }

    #[test]
    fn uri_attributes_carry_effect_and_loader() {
        assert_eq!(uri_effect("a", "href"), Some(UriEffect::NewDocument));
        assert_eq!(loader_type("img", "src"), Some(LoaderType::Sandboxed));
        assert_eq!(uri_effect("q", "cite"), Some(UriEffect::NotLoaded));
        assert_eq!(uri_effect("span", "title"), None);
    }

    #[test]
    fn every_uri_typed_attribute_is_annotated() {
        for &((tag, attr), kind) in ATTRIBUTES {
            if kind == AttributeType::Uri {
                assert!(
                    uri_effect(tag, attr).is_some() && loader_type(tag, attr).is_some(),
                    "missing URI annotation for {tag}::{attr}"
                );
            }
        }
    }
}
