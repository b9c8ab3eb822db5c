//! Hand-rolled LESS syntax highlighting for the editor layouter.
//!
//! Single pass over the source: comments, strings, `@` names, hex colors,
//! numbers with units, class/parent selectors, and rainbow braces. Enough to
//! keep the eye oriented; correctness of the language lives in the compiler.

use eframe::egui;

// VSCode-dark-ish palette.
const C_DEFAULT: egui::Color32 = egui::Color32::LIGHT_GRAY;
const C_COMMENT: egui::Color32 = egui::Color32::from_rgb(106, 153, 85);
const C_STRING: egui::Color32 = egui::Color32::from_rgb(206, 145, 120);
const C_AT_NAME: egui::Color32 = egui::Color32::from_rgb(156, 220, 254);
const C_AT_KEYWORD: egui::Color32 = egui::Color32::from_rgb(197, 134, 192);
const C_NUMBER: egui::Color32 = egui::Color32::from_rgb(181, 206, 168);
const C_HEX_COLOR: egui::Color32 = egui::Color32::from_rgb(220, 220, 170);
const C_SELECTOR: egui::Color32 = egui::Color32::from_rgb(78, 201, 176);
const C_OPERATOR: egui::Color32 = egui::Color32::from_rgb(212, 212, 212);

const RAINBOW: [egui::Color32; 6] = [
    egui::Color32::from_rgb(255, 200, 0),
    egui::Color32::from_rgb(200, 100, 255),
    egui::Color32::from_rgb(50, 200, 255),
    egui::Color32::from_rgb(50, 255, 50),
    egui::Color32::from_rgb(255, 100, 200),
    egui::Color32::from_rgb(255, 100, 100),
];

/// At-rules that are LESS/CSS keywords rather than user variables.
const AT_KEYWORDS: &[&str] = &[
    "media", "import", "keyframes", "supports", "charset", "font-face", "plugin",
];

pub fn highlight_less(job: &mut egui::text::LayoutJob, code: &str, font_size: f32) {
    let font_id = egui::FontId::monospace(font_size);
    let mut chars = code.char_indices().peekable();
    let mut last_idx = 0;
    let mut bracket_depth: usize = 0;

    while let Some((idx, c)) = chars.next() {
        // Line and block comments.
        if c == '/' {
            match chars.peek() {
                Some((_, '/')) => {
                    flush(job, &code[last_idx..idx], &font_id, C_DEFAULT);
                    let mut end = code.len();
                    for (i, nc) in chars.by_ref() {
                        if nc == '\n' {
                            end = i;
                            break;
                        }
                    }
                    flush(job, &code[idx..end], &font_id, C_COMMENT);
                    if end < code.len() {
                        flush(job, "\n", &font_id, C_DEFAULT);
                        last_idx = end + 1;
                    } else {
                        last_idx = end;
                    }
                    continue;
                }
                Some((_, '*')) => {
                    flush(job, &code[last_idx..idx], &font_id, C_DEFAULT);
                    let mut end = code.len();
                    let mut prev = ' ';
                    for (i, nc) in chars.by_ref() {
                        if prev == '*' && nc == '/' {
                            end = i + 1;
                            break;
                        }
                        prev = nc;
                    }
                    flush(job, &code[idx..end], &font_id, C_COMMENT);
                    last_idx = end;
                    continue;
                }
                _ => {}
            }
        }

        // Strings, either quote kind.
        if c == '"' || c == '\'' {
            flush(job, &code[last_idx..idx], &font_id, C_DEFAULT);
            let quote = c;
            let mut end = code.len();
            for (i, nc) in chars.by_ref() {
                if nc == quote {
                    end = i + 1;
                    break;
                }
            }
            flush(job, &code[idx..end], &font_id, C_STRING);
            last_idx = end;
            continue;
        }

        // `@variable` / `@media`.
        if c == '@' {
            flush(job, &code[last_idx..idx], &font_id, C_DEFAULT);
            let mut end = idx + 1;
            while let Some((i, nc)) = chars.peek() {
                if nc.is_alphanumeric() || *nc == '-' || *nc == '_' {
                    end = *i + nc.len_utf8();
                    chars.next();
                } else {
                    break;
                }
            }
            let name = &code[idx + 1..end];
            let color = if AT_KEYWORDS.contains(&name) {
                C_AT_KEYWORD
            } else {
                C_AT_NAME
            };
            flush(job, &code[idx..end], &font_id, color);
            last_idx = end;
            continue;
        }

        // Hex colors.
        if c == '#' {
            flush(job, &code[last_idx..idx], &font_id, C_DEFAULT);
            let mut end = idx + 1;
            while let Some((i, nc)) = chars.peek() {
                if nc.is_ascii_hexdigit() {
                    end = *i + 1;
                    chars.next();
                } else {
                    break;
                }
            }
            flush(job, &code[idx..end], &font_id, C_HEX_COLOR);
            last_idx = end;
            continue;
        }

        // Class selectors / mixin calls, and the parent combinator.
        if (c == '.' && chars.peek().map_or(false, |(_, n)| n.is_alphabetic())) || c == '&' {
            flush(job, &code[last_idx..idx], &font_id, C_DEFAULT);
            let mut end = idx + 1;
            while let Some((i, nc)) = chars.peek() {
                if nc.is_alphanumeric() || *nc == '-' || *nc == '_' {
                    end = *i + nc.len_utf8();
                    chars.next();
                } else {
                    break;
                }
            }
            flush(job, &code[idx..end], &font_id, C_SELECTOR);
            last_idx = end;
            continue;
        }

        // Numbers, with any trailing unit.
        if c.is_ascii_digit() {
            flush(job, &code[last_idx..idx], &font_id, C_DEFAULT);
            let mut end = idx + 1;
            while let Some((i, nc)) = chars.peek() {
                if nc.is_ascii_alphanumeric() || *nc == '.' || *nc == '%' {
                    end = *i + 1;
                    chars.next();
                } else {
                    break;
                }
            }
            flush(job, &code[idx..end], &font_id, C_NUMBER);
            last_idx = end;
            continue;
        }

        // Rainbow brackets.
        if "(){}[]".contains(c) {
            flush(job, &code[last_idx..idx], &font_id, C_DEFAULT);
            let color_idx = if ")}]".contains(c) {
                bracket_depth = bracket_depth.saturating_sub(1);
                bracket_depth
            } else {
                let d = bracket_depth;
                bracket_depth += 1;
                d
            };
            flush(
                job,
                &code[idx..idx + 1],
                &font_id,
                RAINBOW[color_idx % RAINBOW.len()],
            );
            last_idx = idx + 1;
            continue;
        }

        if ":;,>".contains(c) {
            flush(job, &code[last_idx..idx], &font_id, C_DEFAULT);
            flush(job, &code[idx..idx + 1], &font_id, C_OPERATOR);
            last_idx = idx + 1;
            continue;
        }
    }

    if last_idx < code.len() {
        flush(job, &code[last_idx..], &font_id, C_DEFAULT);
    }
}

fn flush(job: &mut egui::text::LayoutJob, text: &str, font_id: &egui::FontId, color: egui::Color32) {
    if text.is_empty() {
        return;
    }
    job.append(
        text,
        0.0,
        egui::text::TextFormat {
            font_id: font_id.clone(),
            color,
            ..Default::default()
        },
    );
}

#[cfg(test)]
mod tests {
    use super::*;

    fn job_text(code: &str) -> String {
        let mut job = egui::text::LayoutJob::default();
        highlight_less(&mut job, code, 14.0);
        job.text
    }

    #[test]
    fn layout_preserves_source_text() {
        let src = "@primary: #6366f1;\n\n// comment\n.btn {\n  padding: 0.5rem 1rem;\n  &:hover { color: @primary; }\n}\n";
        assert_eq!(job_text(src), src);
    }

    #[test]
    fn handles_unterminated_constructs() {
        // Must not panic or drop text while the user is mid-edit.
        for src in [
            "/* never closed",
            "\"open string",
            ".sel { color: #f",
            "@",
            "((((",
        ] {
            assert_eq!(job_text(src), src);
        }
    }

    #[test]
    fn handles_non_ascii_text() {
        let src = "// größe ☕\n.card { content: \"日本語\"; }\n";
        assert_eq!(job_text(src), src);
    }
}
