use image::Rgba;

// Emoji lookup table
//------------------------------------------------------------------------------

#[derive(Debug, PartialEq, Eq, Copy, Clone)]
pub struct EmojiInfo {
    pub emoji: char,
    /// Readability penalty, 3 for simple high-contrast glyphs up to 10 for busy ones.
    pub penalty: i32,
    /// Fill color used when the glyph is drawn into a module.
    pub tint: Rgba<u8>,
}

const fn info(emoji: char, penalty: i32, r: u8, g: u8, b: u8) -> EmojiInfo {
    EmojiInfo { emoji, penalty, tint: Rgba([r, g, b, 255]) }
}

// Sorted by codepoint
static EMOJI_TABLE: [EmojiInfo; 28] = [
    info('\u{2600}', 6, 245, 166, 35),   // sun
    info('\u{26A1}', 5, 230, 170, 0),    // high voltage
    info('\u{26AB}', 3, 20, 20, 20),     // black circle
    info('\u{26BD}', 5, 30, 30, 30),     // soccer ball
    info('\u{2705}', 4, 40, 150, 60),    // check mark button
    info('\u{2728}', 8, 230, 180, 20),   // sparkles
    info('\u{2764}', 3, 200, 16, 46),    // red heart
    info('\u{1F308}', 10, 120, 80, 200), // rainbow
    info('\u{1F31F}', 7, 240, 180, 0),   // glowing star
    info('\u{1F338}', 8, 230, 120, 160), // cherry blossom
    info('\u{1F355}', 9, 210, 110, 40),  // pizza
    info('\u{1F389}', 10, 200, 60, 120), // party popper
    info('\u{1F431}', 9, 190, 120, 50),  // cat face
    info('\u{1F44D}', 6, 220, 150, 40),  // thumbs up
    info('\u{1F499}', 4, 30, 90, 200),   // blue heart
    info('\u{1F49A}', 4, 40, 150, 60),   // green heart
    info('\u{1F49B}', 6, 230, 190, 20),  // yellow heart
    info('\u{1F49C}', 4, 120, 50, 170),  // purple heart
    info('\u{1F4AF}', 5, 210, 30, 40),   // hundred points
    info('\u{1F525}', 6, 230, 90, 20),   // fire
    info('\u{1F534}', 3, 210, 30, 40),   // red circle
    info('\u{1F535}', 3, 30, 90, 200),   // blue circle
    info('\u{1F5A4}', 3, 20, 20, 20),    // black heart
    info('\u{1F600}', 6, 220, 160, 20),  // grinning face
    info('\u{1F602}', 7, 220, 160, 20),  // tears of joy
    info('\u{1F60D}', 7, 220, 160, 20),  // heart eyes
    info('\u{1F60E}', 6, 220, 160, 20),  // sunglasses
    info('\u{1F680}', 8, 90, 90, 110),   // rocket
];

/// Looks up a known emoji. Callers apply their own default for unknown glyphs.
pub fn lookup_emoji(emoji: char) -> Option<&'static EmojiInfo> {
    EMOJI_TABLE.binary_search_by_key(&emoji, |e| e.emoji).ok().map(|i| &EMOJI_TABLE[i])
}
