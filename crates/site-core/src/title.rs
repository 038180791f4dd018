use crate::constants::{
    TITLE_SCROLLING_PARTS, TITLE_SEPARATOR, TITLE_STATIC_PART, TITLE_UPDATE_MS,
    TITLE_VISIBLE_WIDTH,
};

/// Scrolling document title ("marquee") frames.
#[derive(Clone, Debug)]
pub struct TitleMarquee {
    frames: Vec<String>,
    index: usize,
    interval_ms: f64,
}

impl Default for TitleMarquee {
    fn default() -> Self {
        Self::new(
            TITLE_STATIC_PART,
            &TITLE_SCROLLING_PARTS,
            TITLE_SEPARATOR,
            TITLE_VISIBLE_WIDTH,
            TITLE_UPDATE_MS,
        )
    }
}

impl TitleMarquee {
    pub fn new(
        static_part: &str,
        parts: &[&str],
        separator: &str,
        visible_width: usize,
        interval_ms: f64,
    ) -> Self {
        Self {
            frames: build_frames(static_part, parts, separator, visible_width),
            index: 0,
            interval_ms,
        }
    }

    pub fn frames(&self) -> &[String] {
        &self.frames
    }

    #[inline]
    pub fn interval_ms(&self) -> f64 {
        self.interval_ms
    }

    /// Next title; call once every [`interval_ms`](Self::interval_ms).
    pub fn advance(&mut self) -> Option<&str> {
        if self.frames.is_empty() {
            return None;
        }
        let i = self.index;
        self.index = (self.index + 1) % self.frames.len();
        Some(&self.frames[i])
    }
}

// Rotation is by character, not byte: the parts contain accented letters.
pub fn build_frames(
    static_part: &str,
    parts: &[&str],
    separator: &str,
    visible_width: usize,
) -> Vec<String> {
    let mut content = parts.join(separator);
    content.push_str(separator);
    let chars: Vec<char> = content.chars().collect();
    (0..chars.len())
        .map(|i| {
            let rotated = chars[i..].iter().chain(chars[..i].iter());
            let mut frame = String::from(static_part);
            frame.extend(rotated.take(visible_width));
            frame
        })
        .collect()
}
