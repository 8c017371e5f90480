//! Synthesis markup for the speech provider
//!
//! Reply text comes from an understanding policy and may carry anything a
//! user said, so it is always escaped before it is embedded.

use crate::voices::UrgencyTone;

/// Escapes the five XML special characters
pub fn escape_xml(text: &str) -> String {
    let mut escaped = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '<' => escaped.push_str("&lt;"),
            '>' => escaped.push_str("&gt;"),
            '&' => escaped.push_str("&amp;"),
            '"' => escaped.push_str("&quot;"),
            '\'' => escaped.push_str("&apos;"),
            other => escaped.push(other),
        }
    }
    escaped
}

/// Inverse of [`escape_xml`], i.e. what a markup renderer shows
pub fn unescape_xml(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    let mut rest = text;
    while let Some(pos) = rest.find('&') {
        out.push_str(&rest[..pos]);
        let tail = &rest[pos..];
        let entity = [
            ("&lt;", '<'),
            ("&gt;", '>'),
            ("&amp;", '&'),
            ("&quot;", '"'),
            ("&apos;", '\''),
        ]
        .into_iter()
        .find(|(name, _)| tail.starts_with(name));

        match entity {
            Some((name, c)) => {
                out.push(c);
                rest = &tail[name.len()..];
            }
            None => {
                out.push('&');
                rest = &tail[1..];
            }
        }
    }
    out.push_str(rest);
    out
}

/// Builds the `<speak>` document for one reply
pub fn build_ssml(speech_tag: &str, voice: &str, tone: UrgencyTone, text: &str) -> String {
    format!(
        concat!(
            r#"<speak version="1.0" xmlns="http://www.w3.org/2001/10/synthesis" "#,
            r#"xmlns:mstts="http://www.w3.org/2001/mstts" xml:lang="{lang}">"#,
            r#"<voice name="{voice}">"#,
            r#"<mstts:express-as style="{style}" styledegree="2">"#,
            r#"<prosody rate="0%">{text}</prosody>"#,
            r#"</mstts:express-as></voice></speak>"#
        ),
        lang = escape_xml(speech_tag),
        voice = escape_xml(voice),
        style = tone.style(),
        text = escape_xml(text),
    )
}
