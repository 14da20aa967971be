//! Markup normalization for commentary text.
//!
//! Raw verse text is either OSIS markup (SWORD modules) or HTML (scraped
//! commentaries). Each dialect has its own substitution pipeline that maps
//! emphasis to lightweight conventions and strips everything else; both
//! finish with the same whitespace collapse:
//!
//! | Markup                               | Output          |
//! |--------------------------------------|-----------------|
//! | paragraph / division / line break    | newline         |
//! | bold                                 | `**text**`      |
//! | italic                               | `*text*`        |
//! | numeric superscript                  | `[12]`          |
//! | small caps (OSIS)                    | `TEXT`          |
//! | reference / anchor                   | inner text      |
//! | any other tag                        | removed         |
//! | entity (HTML)                        | decoded         |

use std::borrow::Cow;
use std::sync::OnceLock;

use regex::{Captures, Regex};

use super::types::models::MarkupDialect;

struct OsisRules {
    paragraph: Regex,
    division: Regex,
    bold: Regex,
    italic: Regex,
    superscript: Regex,
    small_caps: Regex,
    reference: Regex,
}

struct HtmlRules {
    bold: Regex,
    italic: Regex,
    superscript: Regex,
    anchor: Regex,
    paragraph: Regex,
    entity: Regex,
}

struct WhitespaceRules {
    carriage_return: Regex,
    newline_run: Regex,
    horizontal_run: Regex,
}

static OSIS_RULES: OnceLock<OsisRules> = OnceLock::new();
static HTML_RULES: OnceLock<HtmlRules> = OnceLock::new();
static WHITESPACE_RULES: OnceLock<WhitespaceRules> = OnceLock::new();
static TAG: OnceLock<Regex> = OnceLock::new();

fn compile(pattern: &str) -> Regex {
    Regex::new(pattern).expect("Invalid markup regex pattern")
}

fn osis_rules() -> &'static OsisRules {
    OSIS_RULES.get_or_init(|| OsisRules {
        paragraph: compile(r#"<div[^>]*type="x-p"[^>]*/>|<lb\s*/>|</?p\b[^>]*>"#),
        division: compile(r"</?div[^>]*>"),
        bold: compile(r#"<hi type="bold">(.*?)</hi>"#),
        italic: compile(r#"<hi type="italic">(.*?)</hi>"#),
        superscript: compile(r#"<hi type="super">(\d+)</hi>"#),
        small_caps: compile(r#"<hi type="small-caps">(.*?)</hi>"#),
        reference: compile(r"<reference[^>]*>(.*?)</reference>"),
    })
}

fn html_rules() -> &'static HtmlRules {
    HTML_RULES.get_or_init(|| HtmlRules {
        bold: compile(r#"<span class=\s*"bld">(.*?)</span>|<(?:b|strong)>(.*?)</(?:b|strong)>"#),
        italic: compile(r#"<span class=\s*"ital">(.*?)</span>|<(?:i|em)>(.*?)</(?:i|em)>"#),
        superscript: compile(r"<sup>(\d+)</sup>"),
        anchor: compile(r"<a[^>]*>(.*?)</a>"),
        paragraph: compile(r"</?p\b[^>]*>|<br\s*/?>"),
        entity: compile(r"&(#[0-9]+|#[xX][0-9a-fA-F]+|[A-Za-z][A-Za-z0-9]*);"),
    })
}

fn whitespace_rules() -> &'static WhitespaceRules {
    WHITESPACE_RULES.get_or_init(|| WhitespaceRules {
        carriage_return: compile(r"\r\n?"),
        newline_run: compile(r"\n{3,}"),
        horizontal_run: compile(r"[ \t]+"),
    })
}

fn tag() -> &'static Regex {
    TAG.get_or_init(|| compile(r"<[^>]+>"))
}

/// Decodes raw verse bytes and normalizes them to plain text.
///
/// Invalid UTF-8 sequences become U+FFFD; this never fails.
pub fn normalize(raw: &[u8], dialect: MarkupDialect) -> String {
    let (text, _) = encoding_rs::UTF_8.decode_with_bom_removal(raw);
    normalize_str(text.trim_matches('\0'), dialect)
}

/// Normalizes already-decoded text.
pub fn normalize_str(text: &str, dialect: MarkupDialect) -> String {
    let stripped = match dialect {
        MarkupDialect::Osis => strip_osis(text),
        MarkupDialect::Html => clean_html(text),
    };
    collapse_whitespace(&stripped)
}

/// Applies the OSIS substitutions and removes all remaining tags.
pub fn strip_osis(text: &str) -> String {
    let rules = osis_rules();
    let text = rules.paragraph.replace_all(text, "\n");
    let text = rules.division.replace_all(&text, "");
    let text = rules.bold.replace_all(&text, "**$1**");
    let text = rules.italic.replace_all(&text, "*$1*");
    let text = rules.superscript.replace_all(&text, "[$1]");
    let text = rules
        .small_caps
        .replace_all(&text, |caps: &Captures| caps[1].to_uppercase());
    let text = rules.reference.replace_all(&text, "$1");
    tag().replace_all(&text, "").into_owned()
}

/// Decodes entities, applies the HTML substitutions and removes remaining tags.
///
/// Entities are decoded first, so escaped markup (`&lt;b&gt;`) is treated
/// like the markup it spells. The passes repeat until the text is stable;
/// every change shortens the text, so this terminates.
pub fn clean_html(text: &str) -> String {
    let mut current = text.to_string();
    loop {
        let next = clean_html_pass(&current);
        if next == current {
            return next;
        }
        current = next;
    }
}

fn clean_html_pass(text: &str) -> String {
    let rules = html_rules();
    let text = decode_entities(text);
    let text = rules.bold.replace_all(&text, |caps: &Captures| {
        format!("**{}**", either_group(caps))
    });
    let text = rules.italic.replace_all(&text, |caps: &Captures| {
        format!("*{}*", either_group(caps))
    });
    let text = rules.superscript.replace_all(&text, "[$1]");
    let text = rules.anchor.replace_all(&text, "$1");
    let text = rules.paragraph.replace_all(&text, "\n");
    tag().replace_all(&text, "").into_owned()
}

/// Decodes entities until none remain (`&amp;lt;` becomes `<`).
fn decode_entities(text: &str) -> String {
    let entity = &html_rules().entity;
    let mut current = text.to_string();
    while entity.is_match(&current) {
        current = entity
            .replace_all(&current, |caps: &Captures| decode_entity(&caps[1]))
            .into_owned();
    }
    current
}

fn either_group<'t>(caps: &Captures<'t>) -> &'t str {
    caps.get(1)
        .or_else(|| caps.get(2))
        .map_or("", |m| m.as_str())
}

/// Decodes one entity body (the part between `&` and `;`).
///
/// Unknown named entities and invalid code points decode to nothing.
fn decode_entity(body: &str) -> Cow<'static, str> {
    if let Some(number) = body.strip_prefix('#') {
        let code = match number.strip_prefix(['x', 'X']) {
            Some(hex) => u32::from_str_radix(hex, 16).ok(),
            None => number.parse::<u32>().ok(),
        };
        return code
            .and_then(char::from_u32)
            .map_or(Cow::Borrowed(""), |c| Cow::Owned(c.to_string()));
    }

    Cow::Borrowed(match body {
        "amp" => "&",
        "lt" => "<",
        "gt" => ">",
        "quot" => "\"",
        "apos" => "'",
        "nbsp" => " ",
        "mdash" => "--",
        "ndash" => "-",
        "hellip" => "...",
        "lsquo" | "rsquo" => "'",
        "ldquo" | "rdquo" => "\"",
        _ => "",
    })
}

/// Collapses 3+ newlines to 2, horizontal whitespace runs to one space, and trims.
pub fn collapse_whitespace(text: &str) -> String {
    let rules = whitespace_rules();
    let text = rules.carriage_return.replace_all(text, "\n");
    let text = rules.newline_run.replace_all(&text, "\n\n");
    let text = rules.horizontal_run.replace_all(&text, " ");
    text.trim().to_string()
}
