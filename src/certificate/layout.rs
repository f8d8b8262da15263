use time::Date;

/// Page size in millimetres (A4 portrait).
pub const PAGE_WIDTH: f32 = 210.0;
pub const PAGE_HEIGHT: f32 = 297.0;

/// 20pt inset and 5pt stroke for the page border.
pub const BORDER_INSET: f32 = 7.06;
pub const BORDER_THICKNESS_PT: f32 = 5.0;

pub const BACKGROUND: Rgb8 = Rgb8(0xfd, 0xfd, 0xfd);
pub const NAVY: Rgb8 = Rgb8(0x00, 0x33, 0x66);
pub const PASS_GREEN: Rgb8 = Rgb8(0x27, 0xae, 0x60);
pub const FAIL_RED: Rgb8 = Rgb8(0xc0, 0x39, 0x2b);
pub const BLACK: Rgb8 = Rgb8(0, 0, 0);
pub const GRAY: Rgb8 = Rgb8(0x80, 0x80, 0x80);

const PT_TO_MM: f32 = 0.352_778;
const LEFT_MARGIN: f32 = 17.64;
const FOOTER_Y: f32 = 35.28;
const SIGNATURE_X: f32 = PAGE_WIDTH - 70.56;
const TEXT_WIDTH: f32 = PAGE_WIDTH - 2.0 * LEFT_MARGIN;
const LINE_SPACING: f32 = 1.2;
const BLOCK_GAP: f32 = 9.0;
const ELLIPSIS: &str = "...";

/// Font sizes a wrapped block may shrink through, and its line cap.
#[derive(Debug, Clone, Copy)]
struct BlockStyle {
    max_size: f32,
    min_size: f32,
    max_lines: usize,
    weight: Weight,
}

const NAME_BLOCK: BlockStyle = BlockStyle {
    max_size: 26.0,
    min_size: 14.0,
    max_lines: 3,
    weight: Weight::Bold,
};

const SENTENCE_BLOCK: BlockStyle = BlockStyle {
    max_size: 16.0,
    min_size: 10.0,
    max_lines: 4,
    weight: Weight::Regular,
};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Outcome {
    Pass,
    Fail,
}

impl Outcome {
    /// "pass" in any case is a pass; anything else is a fail.
    pub fn parse(raw: Option<&str>) -> Self {
        match raw {
            Some(r) if r.trim().eq_ignore_ascii_case("pass") => Outcome::Pass,
            _ => Outcome::Fail,
        }
    }
}

#[derive(Debug, Clone)]
pub struct CertificateRequest {
    pub name: String,
    pub outcome: Outcome,
    pub score: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Rgb8(pub u8, pub u8, pub u8);

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Weight {
    Regular,
    Bold,
}

#[derive(Debug, Clone, PartialEq)]
pub struct TextItem {
    pub text: String,
    pub size: f32,
    pub weight: Weight,
    pub color: Rgb8,
    pub x: f32,
    pub y: f32,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Underline {
    pub x1: f32,
    pub x2: f32,
    pub y: f32,
}

/// Everything the renderer draws besides the background and border.
#[derive(Debug, Clone)]
pub struct CertificateLayout {
    pub texts: Vec<TextItem>,
    pub title_underline: Underline,
}

impl CertificateLayout {
    pub fn new(req: &CertificateRequest, date: Date) -> Self {
        let title = centered("Certificate of Achievement", 32.0, Weight::Bold, NAVY, 262.0);
        let title_underline = Underline {
            x1: title.x,
            x2: title.x + text_width(&title.text, title.size, title.weight),
            y: title.y - 2.0,
        };

        let name_color = match req.outcome {
            Outcome::Pass => PASS_GREEN,
            Outcome::Fail => FAIL_RED,
        };
        let sentence = match req.outcome {
            Outcome::Pass => format!(
                "For successfully completing the quiz with a score of {}.",
                req.score
            ),
            Outcome::Fail => "For attempting the quiz. Better luck next time!".to_string(),
        };

        let mut texts = vec![
            title,
            centered("This certificate is proudly presented to", 16.0, Weight::Regular, BLACK, 225.0),
        ];
        let next_y = push_block(&mut texts, &req.name, NAME_BLOCK, name_color, 205.0);
        push_block(&mut texts, &sentence, SENTENCE_BLOCK, BLACK, next_y - BLOCK_GAP);
        texts.push(TextItem {
            text: format!("Date: {date}"),
            size: 12.0,
            weight: Weight::Regular,
            color: GRAY,
            x: LEFT_MARGIN,
            y: FOOTER_Y,
        });
        texts.push(TextItem {
            text: "Authorized Signature".to_string(),
            size: 12.0,
            weight: Weight::Regular,
            color: BLACK,
            x: SIGNATURE_X,
            y: FOOTER_Y,
        });

        Self {
            texts,
            title_underline,
        }
    }

    pub fn contains_text(&self, needle: &str) -> bool {
        self.texts.iter().any(|t| t.text.contains(needle))
    }
}

// Built-in fonts carry no metrics here, so widths use Helvetica's average advance.
fn text_width(text: &str, size: f32, weight: Weight) -> f32 {
    let em = match weight {
        Weight::Regular => 0.50,
        Weight::Bold => 0.56,
    };
    text.chars().count() as f32 * size * em * PT_TO_MM
}

fn centered(text: &str, size: f32, weight: Weight, color: Rgb8, y: f32) -> TextItem {
    let width = text_width(text, size, weight);
    TextItem {
        text: text.to_string(),
        size,
        weight,
        color,
        x: ((PAGE_WIDTH - width) / 2.0).max(LEFT_MARGIN),
        y,
    }
}

fn line_height(size: f32) -> f32 {
    size * PT_TO_MM * LINE_SPACING
}

/// Lays out `text` as centered lines starting at baseline `y`.
/// Returns the baseline just below the last line.
fn push_block(texts: &mut Vec<TextItem>, text: &str, style: BlockStyle, color: Rgb8, y: f32) -> f32 {
    let (size, lines) = fit(text, style);
    let mut y = y;
    for line in lines {
        texts.push(centered(&line, size, style.weight, color, y));
        y -= line_height(size);
    }
    y
}

/// Largest size (in 2pt steps) at which `text` wraps into `max_lines`;
/// at the minimum size the overflow is cut and marked with an ellipsis.
fn fit(text: &str, style: BlockStyle) -> (f32, Vec<String>) {
    let mut size = style.max_size;
    loop {
        let lines = wrap(text, size, style.weight);
        if lines.len() <= style.max_lines {
            return (size, lines);
        }
        if size - 2.0 < style.min_size {
            return (size, truncate(lines, style.max_lines, size, style.weight));
        }
        size -= 2.0;
    }
}

/// Greedy word wrap to `TEXT_WIDTH`; words wider than a line are split.
fn wrap(text: &str, size: f32, weight: Weight) -> Vec<String> {
    let fits = |s: &str| text_width(s, size, weight) <= TEXT_WIDTH;
    let mut lines = Vec::new();
    let mut current = String::new();

    for word in text.split_whitespace() {
        let candidate = if current.is_empty() {
            word.to_string()
        } else {
            format!("{current} {word}")
        };
        if fits(&candidate) {
            current = candidate;
            continue;
        }
        if !current.is_empty() {
            lines.push(std::mem::take(&mut current));
        }
        for c in word.chars() {
            current.push(c);
            if !fits(&current) {
                current.pop();
                lines.push(std::mem::take(&mut current));
                current.push(c);
            }
        }
    }
    if !current.is_empty() || lines.is_empty() {
        lines.push(current);
    }
    lines
}

fn truncate(mut lines: Vec<String>, max_lines: usize, size: f32, weight: Weight) -> Vec<String> {
    lines.truncate(max_lines);
    if let Some(last) = lines.last_mut() {
        while !last.is_empty() && text_width(&format!("{last}{ELLIPSIS}"), size, weight) > TEXT_WIDTH {
            last.pop();
        }
        last.push_str(ELLIPSIS);
    }
    lines
}
