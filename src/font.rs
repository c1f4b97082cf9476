//! Glyph providers live outside the driver. A font only has to resolve a
//! character to a code and hand back the 8-row bitmap stored under it.

pub trait Font {
    /// Code of `ch` in this font's table, if the font covers it.
    fn encode(&self, ch: char) -> Option<u8>;

    /// Row bytes for `code`, top row first. At most 8 rows are used.
    fn glyph(&self, code: u8) -> Option<&[u8]>;

    fn pattern(&self, ch: char) -> Option<&[u8]> {
        self.encode(ch).and_then(|code| self.glyph(code))
    }
}
