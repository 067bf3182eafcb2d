//! Minimal PDF 1.4 writer.
//!
//! Only what the assignment documents need: A4 pages, the two standard
//! Helvetica faces in WinAnsi encoding, text, stroked and filled rectangles.
//! Content streams are uncompressed and the file carries no dates or IDs, so
//! the same pages always serialize to the same bytes.
//!
//! Layout code works in millimetres from the top-left corner; conversion to
//! PDF points (bottom-left origin) happens here.

use std::fmt::Write as _;

pub(super) const PAGE_WIDTH_MM: f32 = 210.0;
pub(super) const PAGE_HEIGHT_MM: f32 = 297.0;

const PT_PER_MM: f32 = 72.0 / 25.4;

/// Substituted for any character WinAnsi cannot print.
pub(super) const PLACEHOLDER: char = '?';

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(super) enum Font {
    Regular,
    Bold,
}

impl Font {
    fn resource(self) -> &'static str {
        match self {
            Self::Regular => "F1",
            Self::Bold => "F2",
        }
    }
}

/// One drawing operation, in millimetres from the top-left corner.
#[derive(Debug, Clone, PartialEq)]
pub(super) enum Op {
    /// Text with its baseline at `y`. Must already be [`sanitize`]d.
    Text {
        x: f32,
        y: f32,
        font: Font,
        size: f32,
        text: String,
    },

    /// Stroked rectangle with its top-left corner at (`x`, `y`).
    Frame { x: f32, y: f32, w: f32, h: f32 },

    /// Filled rectangle in the given gray level (0 black, 1 white).
    Fill {
        x: f32,
        y: f32,
        w: f32,
        h: f32,
        gray: f32,
    },
}

/// A page is just its drawing operations, in paint order.
#[derive(Debug, Clone, Default, PartialEq)]
pub(super) struct Page {
    pub ops: Vec<Op>,
}

/// Serialize pages into a complete PDF file.
pub(super) fn write(pages: &[Page], title: &str) -> Vec<u8> {
    // Fixed objects: 1 catalog, 2 page tree, 3-4 fonts, 5 info.
    // Then each page takes two: the page and its content stream.
    const FIRST_PAGE_OBJ: usize = 6;

    let mut out: Vec<u8> = Vec::new();
    let mut offsets: Vec<usize> = Vec::new();
    out.extend_from_slice(b"%PDF-1.4\n%\xE2\xE3\xCF\xD3\n");

    let kids: Vec<String> = (0..pages.len())
        .map(|i| format!("{} 0 R", FIRST_PAGE_OBJ + 2 * i))
        .collect();

    push_object(
        &mut out,
        &mut offsets,
        b"<< /Type /Catalog /Pages 2 0 R >>".to_vec(),
    );
    push_object(
        &mut out,
        &mut offsets,
        format!(
            "<< /Type /Pages /Kids [{}] /Count {} >>",
            kids.join(" "),
            pages.len()
        )
        .into_bytes(),
    );
    for base in ["Helvetica", "Helvetica-Bold"] {
        push_object(
            &mut out,
            &mut offsets,
            format!(
                "<< /Type /Font /Subtype /Type1 /BaseFont /{base} /Encoding /WinAnsiEncoding >>"
            )
            .into_bytes(),
        );
    }
    let mut info = b"<< /Title ".to_vec();
    info.extend(string_literal(&sanitize(title)));
    info.extend_from_slice(b" /Producer (vmc) >>");
    push_object(&mut out, &mut offsets, info);

    for (i, page) in pages.iter().enumerate() {
        let content_obj = FIRST_PAGE_OBJ + 2 * i + 1;
        push_object(
            &mut out,
            &mut offsets,
            format!(
                "<< /Type /Page /Parent 2 0 R /MediaBox [0 0 {} {}] \
                 /Resources << /Font << /F1 3 0 R /F2 4 0 R >> >> /Contents {content_obj} 0 R >>",
                num(PAGE_WIDTH_MM * PT_PER_MM),
                num(PAGE_HEIGHT_MM * PT_PER_MM),
            )
            .into_bytes(),
        );

        let content = content_stream(page);
        let mut stream = format!("<< /Length {} >>\nstream\n", content.len()).into_bytes();
        stream.extend(content);
        stream.extend_from_slice(b"\nendstream");
        push_object(&mut out, &mut offsets, stream);
    }

    let xref_at = out.len();
    let mut xref = format!("xref\n0 {}\n0000000000 65535 f \n", offsets.len() + 1);
    for offset in &offsets {
        let _ = writeln!(xref, "{offset:010} 00000 n ");
    }
    let _ = write!(
        xref,
        "trailer\n<< /Size {} /Root 1 0 R /Info 5 0 R >>\nstartxref\n{xref_at}\n%%EOF\n",
        offsets.len() + 1
    );
    out.extend(xref.into_bytes());
    out
}

fn push_object(out: &mut Vec<u8>, offsets: &mut Vec<usize>, body: Vec<u8>) {
    offsets.push(out.len());
    out.extend(format!("{} 0 obj\n", offsets.len()).into_bytes());
    out.extend(body);
    out.extend_from_slice(b"\nendobj\n");
}

fn content_stream(page: &Page) -> Vec<u8> {
    let mut out = Vec::new();
    for op in &page.ops {
        match op {
            Op::Text {
                x,
                y,
                font,
                size,
                text,
            } => {
                out.extend(
                    format!(
                        "BT /{} {} Tf {} {} Td ",
                        font.resource(),
                        num(*size),
                        num(x * PT_PER_MM),
                        num((PAGE_HEIGHT_MM - y) * PT_PER_MM),
                    )
                    .into_bytes(),
                );
                out.extend(string_literal(text));
                out.extend_from_slice(b" Tj ET\n");
            }
            Op::Frame { x, y, w, h } => {
                out.extend(format!("{} re S\n", rect(*x, *y, *w, *h)).into_bytes());
            }
            Op::Fill { x, y, w, h, gray } => {
                out.extend(
                    format!("{} g {} re f 0 g\n", num(*gray), rect(*x, *y, *w, *h)).into_bytes(),
                );
            }
        }
    }
    out
}

fn rect(x: f32, y: f32, w: f32, h: f32) -> String {
    format!(
        "{} {} {} {}",
        num(x * PT_PER_MM),
        num((PAGE_HEIGHT_MM - y - h) * PT_PER_MM),
        num(w * PT_PER_MM),
        num(h * PT_PER_MM),
    )
}

/// Fixed two-decimal formatting keeps output stable.
fn num(v: f32) -> String {
    format!("{v:.2}")
}

/// A PDF string literal in WinAnsi bytes, with `(`, `)` and `\` escaped.
fn string_literal(text: &str) -> Vec<u8> {
    let mut out = vec![b'('];
    for c in text.chars() {
        let byte = encode(c).unwrap_or(PLACEHOLDER as u8);
        if matches!(byte, b'(' | b')' | b'\\') {
            out.push(b'\\');
        }
        out.push(byte);
    }
    out.push(b')');
    out
}

/// Replace every character WinAnsi cannot print with [`PLACEHOLDER`].
pub(super) fn sanitize(text: &str) -> String {
    text.chars()
        .map(|c| if encode(c).is_some() { c } else { PLACEHOLDER })
        .collect()
}

/// The WinAnsi byte for a printable character.
fn encode(c: char) -> Option<u8> {
    match c {
        ' '..='~' => Some(c as u8),
        '\u{a0}'..='\u{ff}' => Some(c as u8),
        '€' => Some(0x80),
        '‚' => Some(0x82),
        '„' => Some(0x84),
        '…' => Some(0x85),
        '‘' => Some(0x91),
        '’' => Some(0x92),
        '“' => Some(0x93),
        '”' => Some(0x94),
        '•' => Some(0x95),
        '–' => Some(0x96),
        '—' => Some(0x97),
        _ => None,
    }
}

/// Width of `text` in millimetres when set in `font` at `size` points.
///
/// Characters WinAnsi cannot print are measured as the placeholder.
pub(super) fn text_width(text: &str, font: Font, size: f32) -> f32 {
    let units: u32 = text.chars().map(|c| u32::from(char_width(c, font))).sum();
    units as f32 / 1000.0 * size / PT_PER_MM
}

/// Advance width in 1/1000 em, from the Helvetica AFM metrics.
fn char_width(c: char, font: Font) -> u16 {
    let c = if encode(c).is_some() { c } else { PLACEHOLDER };
    let (ascii, latin1) = match font {
        Font::Regular => (&HELVETICA, &HELVETICA_LATIN1),
        Font::Bold => (&HELVETICA_BOLD, &HELVETICA_BOLD_LATIN1),
    };
    match (c, font) {
        (' '..='~', _) => ascii[c as usize - 0x20],
        ('\u{a0}'..='\u{ff}', _) => latin1[c as usize - 0xA0],
        ('…' | '—', _) => 1000,
        ('€' | '–', _) => 556,
        ('‘' | '’' | '‚', Font::Regular) => 222,
        ('‘' | '’' | '‚', Font::Bold) => 278,
        ('“' | '”' | '„', Font::Regular) => 333,
        ('“' | '”' | '„', Font::Bold) => 500,
        ('•', _) => 350,
        _ => ascii[PLACEHOLDER as usize - 0x20],
    }
}

/// Helvetica widths for ASCII 32..=126.
const HELVETICA: [u16; 95] = [
    278, 278, 355, 556, 556, 889, 667, 191, 333, 333, 389, 584, 278, 333, 278, 278, // ' '../
    556, 556, 556, 556, 556, 556, 556, 556, 556, 556, 278, 278, 584, 584, 584, 556, // 0..?
    1015, 667, 667, 722, 722, 667, 611, 778, 722, 278, 500, 667, 556, 833, 722, 778, // @..O
    667, 778, 722, 667, 611, 722, 667, 944, 667, 667, 611, 278, 278, 278, 469, 556, // P.._
    333, 556, 556, 500, 556, 556, 278, 556, 556, 222, 222, 500, 222, 833, 556, 556, // `..o
    556, 556, 333, 500, 278, 556, 500, 722, 500, 500, 500, 334, 260, 334, 584, // p..~
];

/// Helvetica-Bold widths for ASCII 32..=126.
const HELVETICA_BOLD: [u16; 95] = [
    278, 333, 474, 556, 556, 889, 722, 238, 333, 333, 389, 584, 278, 333, 278, 278, // ' '../
    556, 556, 556, 556, 556, 556, 556, 556, 556, 556, 333, 333, 584, 584, 584, 611, // 0..?
    975, 722, 722, 722, 722, 667, 611, 778, 722, 278, 556, 722, 611, 833, 722, 778, // @..O
    667, 778, 722, 667, 611, 722, 667, 944, 667, 667, 611, 333, 278, 333, 584, 556, // P.._
    333, 556, 611, 556, 611, 556, 333, 611, 611, 278, 278, 556, 278, 889, 611, 611, // `..o
    611, 611, 389, 556, 333, 611, 556, 778, 556, 556, 500, 389, 280, 389, 584, // p..~
];

/// Helvetica widths for WinAnsi 0xA0..=0xFF.
const HELVETICA_LATIN1: [u16; 96] = [
    278, 333, 556, 556, 556, 556, 260, 556, 333, 737, 370, 556, 584, 333, 737, 333, // nbsp..¯
    400, 584, 333, 333, 333, 556, 537, 278, 333, 333, 365, 556, 834, 834, 834, 611, // °..¿
    667, 667, 667, 667, 667, 667, 1000, 722, 667, 667, 667, 667, 278, 278, 278, 278, // À..Ï
    722, 722, 778, 778, 778, 778, 778, 584, 778, 722, 722, 722, 722, 667, 667, 611, // Ð..ß
    556, 556, 556, 556, 556, 556, 889, 500, 556, 556, 556, 556, 278, 278, 278, 278, // à..ï
    556, 556, 556, 556, 556, 556, 556, 584, 611, 556, 556, 556, 556, 500, 556, 500, // ð..ÿ
];

/// Helvetica-Bold widths for WinAnsi 0xA0..=0xFF.
const HELVETICA_BOLD_LATIN1: [u16; 96] = [
    278, 333, 556, 556, 556, 556, 280, 556, 333, 737, 370, 556, 584, 333, 737, 333, // nbsp..¯
    400, 584, 333, 333, 333, 611, 556, 278, 333, 333, 365, 556, 834, 834, 834, 611, // °..¿
    722, 722, 722, 722, 722, 722, 1000, 722, 667, 667, 667, 667, 278, 278, 278, 278, // À..Ï
    722, 722, 778, 778, 778, 778, 778, 584, 778, 722, 722, 722, 722, 667, 667, 611, // Ð..ß
    556, 556, 556, 556, 556, 556, 889, 556, 556, 556, 556, 556, 278, 278, 278, 278, // à..ï
    611, 611, 611, 611, 611, 611, 611, 584, 611, 611, 611, 611, 611, 556, 611, 556, // ð..ÿ
];

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_page() -> Page {
        Page {
            ops: vec![
                Op::Fill {
                    x: 10.0,
                    y: 10.0,
                    w: 190.0,
                    h: 8.0,
                    gray: 0.85,
                },
                Op::Frame {
                    x: 10.0,
                    y: 18.0,
                    w: 190.0,
                    h: 7.0,
                },
                Op::Text {
                    x: 12.0,
                    y: 16.0,
                    font: Font::Bold,
                    size: 11.0,
                    text: "Oração (final)".into(),
                },
            ],
        }
    }

    #[test]
    fn sanitize_replaces_unprintable_characters() {
        assert_eq!(sanitize("João – 🙂\tok"), "João – ??ok");
        assert_eq!(sanitize("Łukasz"), "?ukasz");
    }

    #[test]
    fn string_literal_escapes_and_encodes() {
        assert_eq!(string_literal("a(b)\\"), b"(a\\(b\\)\\\\)".to_vec());
        assert_eq!(string_literal("ã"), vec![b'(', 0xE3, b')']);
    }

    #[test]
    fn widths_follow_helvetica_metrics() {
        let w = text_width("W", Font::Regular, 10.0);
        assert!((w - 9.44 / PT_PER_MM).abs() < 1e-4);
        assert_eq!(char_width('ã', Font::Regular), char_width('a', Font::Regular));
        assert_eq!(char_width('🙂', Font::Bold), char_width('?', Font::Bold));
        assert!(text_width("iiii", Font::Regular, 10.0) < text_width("MMMM", Font::Regular, 10.0));
    }

    #[test]
    fn latin1_symbols_use_their_own_widths() {
        assert_eq!(char_width('©', Font::Regular), 737);
        assert_eq!(char_width('®', Font::Bold), 737);
        for c in ['¼', '½', '¾'] {
            assert_eq!(char_width(c, Font::Regular), 834);
        }
        assert_eq!(char_width('×', Font::Regular), 584);
        assert_eq!(char_width('ç', Font::Regular), 500);
        assert_eq!(char_width('ç', Font::Bold), 556);
        assert_eq!(char_width('ñ', Font::Bold), 611);
        assert_eq!(char_width('\u{a0}', Font::Regular), 278);
    }

    #[test]
    fn document_structure_is_complete() {
        let bytes = write(&[sample_page(), Page::default()], "Title");
        let text = String::from_utf8_lossy(&bytes);

        assert!(text.starts_with("%PDF-1.4"));
        assert!(text.contains("/Count 2"));
        assert!(text.contains("/Kids [6 0 R 8 0 R]"));
        assert!(text.contains("/BaseFont /Helvetica-Bold"));
        assert!(text.contains("(Ora\u{FFFD}\u{FFFD}o \\(final\\)) Tj"));
        assert!(text.ends_with("%%EOF\n"));
    }

    #[test]
    fn xref_offsets_point_at_objects() {
        let bytes = write(&[sample_page()], "T");
        let marker = b"startxref\n";
        let at = bytes
            .windows(marker.len())
            .rposition(|w| w == marker)
            .unwrap();
        let tail = std::str::from_utf8(&bytes[at + marker.len()..]).unwrap();
        let xref_at: usize = tail.lines().next().unwrap().parse().unwrap();
        assert!(bytes[xref_at..].starts_with(b"xref"));

        let xref = std::str::from_utf8(&bytes[xref_at..]).unwrap();
        let entries: Vec<usize> = xref
            .lines()
            .skip(3)
            .take_while(|l| l.ends_with(" n "))
            .map(|l| l[..10].parse().unwrap())
            .collect();
        assert_eq!(entries.len(), 7);
        for (i, offset) in entries.iter().enumerate() {
            let expected = format!("{} 0 obj", i + 1);
            assert!(bytes[*offset..].starts_with(expected.as_bytes()));
        }
    }

    #[test]
    fn output_is_deterministic() {
        let pages = [sample_page()];
        assert_eq!(write(&pages, "Same"), write(&pages, "Same"));
    }
}
