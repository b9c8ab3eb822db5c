//! Minimal scan of compiled CSS for the handful of declarations the preview
//! can paint. This is deliberately not a CSS engine: the input is the flat
//! output of the external compiler, and anything we don't recognize is simply
//! ignored.

use eframe::egui;

/// The paintable subset of a rule's declarations.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct RuleStyle {
    pub background: Option<egui::Color32>,
    pub color: Option<egui::Color32>,
    /// Corner rounding in points.
    pub border_radius: Option<f32>,
    /// Uniform inner margin in points (first value of the shorthand).
    pub padding: Option<f32>,
}

impl RuleStyle {
    /// Overlay `other` on top of `self`, later declarations winning.
    fn merge(&mut self, other: &RuleStyle) {
        if other.background.is_some() {
            self.background = other.background;
        }
        if other.color.is_some() {
            self.color = other.color;
        }
        if other.border_radius.is_some() {
            self.border_radius = other.border_radius;
        }
        if other.padding.is_some() {
            self.padding = other.padding;
        }
    }
}

/// All rules scanned out of one compiled stylesheet.
#[derive(Clone, Debug, Default)]
pub struct StyleSheet {
    rules: Vec<(String, RuleStyle)>,
}

impl StyleSheet {
    pub fn scan(css: &str) -> Self {
        let mut sheet = StyleSheet::default();
        scan_block(css, &mut sheet.rules);
        sheet
    }

    /// Resolve the merged style for elements carrying `class`, in source
    /// order. `class` is given without the leading dot.
    pub fn class(&self, class: &str) -> RuleStyle {
        let mut style = RuleStyle::default();
        for (selector, rule) in &self.rules {
            if selector_has_class(selector, class) {
                style.merge(rule);
            }
        }
        style
    }

    /// Style for a descendant element, e.g. `.hero-section h1`.
    pub fn descendant(&self, class: &str, element: &str) -> RuleStyle {
        let mut style = RuleStyle::default();
        for (selector, rule) in &self.rules {
            if selector_has_class(selector, class) && selector_mentions_element(selector, element) {
                style.merge(rule);
            }
        }
        style
    }
}

/// Walk `{}`-delimited blocks. At-rules (`@media`, `@supports`) recurse so
/// their inner rules still register; their conditions are not evaluated.
fn scan_block(css: &str, rules: &mut Vec<(String, RuleStyle)>) {
    let bytes = css.as_bytes();
    let mut cursor = 0;
    while let Some(open_rel) = css[cursor..].find('{') {
        let open = cursor + open_rel;
        let selector = css[cursor..open].trim();
        let Some(close) = find_matching_brace(css, open) else {
            break;
        };
        let body = &css[open + 1..close];
        if selector.starts_with('@') {
            if body.contains('{') {
                scan_block(body, rules);
            }
        } else if !selector.is_empty() {
            let style = parse_declarations(body);
            if style != RuleStyle::default() {
                rules.push((selector.to_string(), style));
            }
        }
        cursor = close + 1;
        if cursor >= bytes.len() {
            break;
        }
    }
}

/// Byte index of the `}` matching the `{` at `open`, honoring nesting.
fn find_matching_brace(s: &str, open: usize) -> Option<usize> {
    let mut depth = 0usize;
    for (i, ch) in s[open..].char_indices() {
        match ch {
            '{' => depth += 1,
            '}' => {
                depth -= 1;
                if depth == 0 {
                    return Some(open + i);
                }
            }
            _ => {}
        }
    }
    None
}

fn parse_declarations(body: &str) -> RuleStyle {
    let mut style = RuleStyle::default();
    for decl in split_declarations(body) {
        let Some((prop, value)) = decl.split_once(':') else {
            continue;
        };
        let prop = prop.trim().to_ascii_lowercase();
        let value = value.trim();
        match prop.as_str() {
            "background" | "background-color" => {
                if let Some(c) = parse_color_value(value) {
                    style.background = Some(c);
                }
            }
            "color" => {
                if let Some(c) = parse_color_value(value) {
                    style.color = Some(c);
                }
            }
            "border-radius" => style.border_radius = parse_length(value),
            "padding" => {
                style.padding = value.split_whitespace().next().and_then(parse_length)
            }
            _ => {}
        }
    }
    style
}

/// Split on `;` while ignoring semicolons inside parentheses (data URLs,
/// gradients with multiple stops).
fn split_declarations(body: &str) -> Vec<&str> {
    let mut out = Vec::new();
    let mut depth = 0usize;
    let mut start = 0;
    for (i, ch) in body.char_indices() {
        match ch {
            '(' => depth += 1,
            ')' => depth = depth.saturating_sub(1),
            ';' if depth == 0 => {
                out.push(&body[start..i]);
                start = i + 1;
            }
            _ => {}
        }
    }
    if start < body.len() {
        out.push(&body[start..]);
    }
    out
}

/// A color from a CSS value: hex, `rgb()`/`rgba()`, a keyword, or the first
/// color stop of a `linear-gradient(...)`.
pub fn parse_color_value(value: &str) -> Option<egui::Color32> {
    let value = value.trim();
    if let Some(rest) = value.strip_prefix("linear-gradient(") {
        let inner = rest.strip_suffix(')').unwrap_or(rest);
        // Skip the direction argument; take the first stop that parses.
        for part in split_gradient_args(inner) {
            let stop = part.trim();
            let color_part = stop.split_whitespace().next().unwrap_or(stop);
            if let Some(c) = parse_plain_color(color_part) {
                return Some(c);
            }
        }
        return None;
    }
    parse_plain_color(value)
}

fn parse_plain_color(value: &str) -> Option<egui::Color32> {
    let value = value.trim();
    if value.starts_with('#') {
        return parse_hex(value).map(|[r, g, b, a]| {
            egui::Color32::from_rgba_unmultiplied(r, g, b, a)
        });
    }
    if let Some(inner) = value
        .strip_prefix("rgba(")
        .or_else(|| value.strip_prefix("rgb("))
    {
        let inner = inner.strip_suffix(')').unwrap_or(inner);
        let parts: Vec<&str> = inner.split(',').map(str::trim).collect();
        if parts.len() < 3 {
            return None;
        }
        let r = parts[0].parse::<f32>().ok()?;
        let g = parts[1].parse::<f32>().ok()?;
        let b = parts[2].parse::<f32>().ok()?;
        let a = if parts.len() > 3 {
            (parts[3].parse::<f32>().ok()? * 255.0).round()
        } else {
            255.0
        };
        return Some(egui::Color32::from_rgba_unmultiplied(
            r.clamp(0.0, 255.0) as u8,
            g.clamp(0.0, 255.0) as u8,
            b.clamp(0.0, 255.0) as u8,
            a.clamp(0.0, 255.0) as u8,
        ));
    }
    match value.to_ascii_lowercase().as_str() {
        "white" => Some(egui::Color32::WHITE),
        "black" => Some(egui::Color32::BLACK),
        "red" => Some(egui::Color32::from_rgb(255, 0, 0)),
        "green" => Some(egui::Color32::from_rgb(0, 128, 0)),
        "blue" => Some(egui::Color32::from_rgb(0, 0, 255)),
        "gray" | "grey" => Some(egui::Color32::from_rgb(128, 128, 128)),
        "transparent" => Some(egui::Color32::TRANSPARENT),
        _ => None,
    }
}

/// Parse `"#rgb"`, `"#rrggbb"` or `"#rrggbbaa"` into RGBA bytes.
pub fn parse_hex(hex: &str) -> Option<[u8; 4]> {
    let s = hex.strip_prefix('#')?;
    match s.len() {
        3 => {
            let r = u8::from_str_radix(&s[0..1], 16).ok()?;
            let g = u8::from_str_radix(&s[1..2], 16).ok()?;
            let b = u8::from_str_radix(&s[2..3], 16).ok()?;
            Some([r * 17, g * 17, b * 17, 255])
        }
        6 => {
            let r = u8::from_str_radix(&s[0..2], 16).ok()?;
            let g = u8::from_str_radix(&s[2..4], 16).ok()?;
            let b = u8::from_str_radix(&s[4..6], 16).ok()?;
            Some([r, g, b, 255])
        }
        8 => {
            let r = u8::from_str_radix(&s[0..2], 16).ok()?;
            let g = u8::from_str_radix(&s[2..4], 16).ok()?;
            let b = u8::from_str_radix(&s[4..6], 16).ok()?;
            let a = u8::from_str_radix(&s[6..8], 16).ok()?;
            Some([r, g, b, a])
        }
        _ => None,
    }
}

/// px/rem/em to egui points. Percentages and keywords yield `None`.
fn parse_length(value: &str) -> Option<f32> {
    let value = value.trim();
    if let Some(px) = value.strip_suffix("px") {
        return px.trim().parse::<f32>().ok();
    }
    if let Some(rem) = value.strip_suffix("rem") {
        return rem.trim().parse::<f32>().ok().map(|v| v * 16.0);
    }
    if let Some(em) = value.strip_suffix("em") {
        return em.trim().parse::<f32>().ok().map(|v| v * 16.0);
    }
    value.parse::<f32>().ok()
}

/// Top-level commas of a gradient argument list (nested `rgba(...)` commas
/// don't split).
fn split_gradient_args(inner: &str) -> Vec<&str> {
    let mut out = Vec::new();
    let mut depth = 0usize;
    let mut start = 0;
    for (i, ch) in inner.char_indices() {
        match ch {
            '(' => depth += 1,
            ')' => depth = depth.saturating_sub(1),
            ',' if depth == 0 => {
                out.push(&inner[start..i]);
                start = i + 1;
            }
            _ => {}
        }
    }
    if start < inner.len() {
        out.push(&inner[start..]);
    }
    out
}

/// Does a selector list contain `.class` as a whole class token?
fn selector_has_class(selector: &str, class: &str) -> bool {
    let needle = format!(".{class}");
    let mut search = 0;
    while let Some(rel) = selector[search..].find(&needle) {
        let at = search + rel;
        let end = at + needle.len();
        let boundary = selector[end..]
            .chars()
            .next()
            .map_or(true, |c| !(c.is_alphanumeric() || c == '-' || c == '_'));
        if boundary {
            return true;
        }
        search = end;
    }
    false
}

fn selector_mentions_element(selector: &str, element: &str) -> bool {
    selector
        .split(|c: char| c.is_whitespace() || c == ',' || c == '>')
        .any(|part| part.eq_ignore_ascii_case(element))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn hex_parsing_all_widths() {
        assert_eq!(parse_hex("#fff"), Some([255, 255, 255, 255]));
        assert_eq!(parse_hex("#78c8ff"), Some([0x78, 0xc8, 0xff, 255]));
        assert_eq!(parse_hex("#11223344"), Some([0x11, 0x22, 0x33, 0x44]));
        assert_eq!(parse_hex("#1234"), None);
        assert_eq!(parse_hex("78c8ff"), None);
    }

    #[test]
    fn scans_solid_background_and_color() {
        let sheet = StyleSheet::scan(".btn-primary { background: #6366f1; color: white; }");
        let s = sheet.class("btn-primary");
        assert_eq!(s.background, Some(egui::Color32::from_rgb(0x63, 0x66, 0xf1)));
        assert_eq!(s.color, Some(egui::Color32::WHITE));
    }

    #[test]
    fn gradient_background_takes_first_stop() {
        let css = ".hero-section { background: linear-gradient(to right, #6366f1, #8b5cf6); }";
        let s = StyleSheet::scan(css).class("hero-section");
        assert_eq!(s.background, Some(egui::Color32::from_rgb(0x63, 0x66, 0xf1)));
    }

    #[test]
    fn rgba_values_and_lengths() {
        let css = ".glass-card {\n  background: rgba(255, 255, 255, 0.1);\n  border-radius: 16px;\n  padding: 2rem;\n}";
        let s = StyleSheet::scan(css).class("glass-card");
        assert_eq!(
            s.background,
            Some(egui::Color32::from_rgba_unmultiplied(255, 255, 255, 26))
        );
        assert_eq!(s.border_radius, Some(16.0));
        assert_eq!(s.padding, Some(32.0));
    }

    #[test]
    fn compound_selectors_merge_in_order() {
        let css = "\
.dashboard .widget { background: #ffffff; border-radius: 12px; }\n\
.dashboard .widget.highlight { background: #eeeeff; }\n";
        let sheet = StyleSheet::scan(css);
        let widget = sheet.class("widget");
        assert_eq!(widget.background, Some(egui::Color32::from_rgb(255, 255, 255)));
        let highlight = sheet.class("highlight");
        assert_eq!(highlight.background, Some(egui::Color32::from_rgb(0xee, 0xee, 0xff)));
    }

    #[test]
    fn media_blocks_are_walked_and_unknown_props_ignored() {
        let css = "\
@media (max-width: 768px) {\n  .hero-section { padding: 24px; }\n}\n\
.hero-section { backdrop-filter: blur(10px); color: #fff; }\n";
        let s = StyleSheet::scan(css).class("hero-section");
        assert_eq!(s.padding, Some(24.0));
        assert_eq!(s.color, Some(egui::Color32::WHITE));
        assert_eq!(s.background, None);
    }

    #[test]
    fn descendant_lookup() {
        let css = ".hero-section h1 { color: #06b6d4; }";
        let s = StyleSheet::scan(css).descendant("hero-section", "h1");
        assert_eq!(s.color, Some(egui::Color32::from_rgb(0x06, 0xb6, 0xd4)));
        assert_eq!(
            StyleSheet::scan(css).descendant("hero-section", "p"),
            RuleStyle::default()
        );
    }

    #[test]
    fn class_token_boundaries() {
        let css = ".widgets { color: #fff; }";
        let sheet = StyleSheet::scan(css);
        assert_eq!(sheet.class("widget"), RuleStyle::default());
        assert!(sheet.class("widgets").color.is_some());
    }

    #[test]
    fn malformed_css_does_not_panic() {
        let _ = StyleSheet::scan(".broken { color: #fff;");
        let _ = StyleSheet::scan("}}}{{{");
        let _ = StyleSheet::scan("");
    }
}
