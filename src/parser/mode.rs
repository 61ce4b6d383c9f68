//! Text modes controlling how element content is scanned

/// How raw characters are interpreted inside the current element
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum TextMode {
    /// Normal markup: tags, comments, interpolations and text
    #[default]
    Data,
    /// Text and interpolations only, never nested tags
    Rcdata,
    /// Literal text only
    Rawtext,
    /// Verbatim until `]]>`
    Cdata,
}

/// Tags whose content is not scanned in [`TextMode::Data`]
const TEXT_MODE_TABLE: &[(&str, TextMode)] = &[
    ("textarea", TextMode::Rcdata),
    ("title", TextMode::Rcdata),
    ("style", TextMode::Rawtext),
    ("script", TextMode::Rawtext),
    ("xmp", TextMode::Rawtext),
    ("iframe", TextMode::Rawtext),
    ("noembed", TextMode::Rawtext),
    ("noframes", TextMode::Rawtext),
    ("noscript", TextMode::Rawtext),
];

impl TextMode {
    /// Mode for the children of an element with the given tag
    pub fn for_tag(tag: &str) -> TextMode {
        TEXT_MODE_TABLE
            .iter()
            .find(|(name, _)| name.eq_ignore_ascii_case(tag))
            .map(|(_, mode)| *mode)
            .unwrap_or(TextMode::Data)
    }

    /// Whether `<` may start a tag, comment or CDATA section
    pub fn allows_markup(self) -> bool {
        self == TextMode::Data
    }

    /// Whether `{{` starts an interpolation
    pub fn allows_interpolation(self) -> bool {
        matches!(self, TextMode::Data | TextMode::Rcdata)
    }
}
