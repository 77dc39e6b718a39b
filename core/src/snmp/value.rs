//! Text rendering of varbind values.
//!
//! Records end up in a delimited text report, so every value that reaches a
//! text field passes through [`sanitize`] first.

use async_snmp::Value;

/// False for exception values (`noSuchObject`, `noSuchInstance`,
/// `endOfMibView`) and `NULL`: the agent had nothing for that OID.
pub fn is_usable(value: &Value) -> bool {
    !value.is_exception() && !matches!(value, Value::Null)
}

/// Renders a value as text. `None` when the value is not usable.
///
/// Octet strings decode as lossy UTF-8; numbers render in plain decimal
/// (`TimeTicks` included, unlike the library's `Display`).
pub fn render(value: &Value) -> Option<String> {
    if !is_usable(value) {
        return None;
    }

    let text = match value {
        Value::OctetString(bytes) => String::from_utf8_lossy(bytes).into_owned(),
        Value::Integer(v) => v.to_string(),
        Value::Counter32(v) | Value::Gauge32(v) | Value::TimeTicks(v) => v.to_string(),
        Value::Counter64(v) => v.to_string(),
        Value::IpAddress(octets) => std::net::Ipv4Addr::from(*octets).to_string(),
        Value::ObjectIdentifier(oid) => oid.to_string(),
        other => other.to_string(),
    };
    Some(text)
}

/// Replaces line breaks and the report delimiter with spaces.
///
/// `\n\r` counts as one break; every other `\n` or `\r` is replaced on its
/// own, so `\r\n` becomes two spaces.
pub fn sanitize(text: &str, delimiter: &str) -> String {
    let mut clean = text
        .replace("\n\r", " ")
        .replace('\n', " ")
        .replace('\r', " ");
    if !delimiter.is_empty() {
        clean = clean.replace(delimiter, " ");
    }
    clean
}

/// [`render`] then [`sanitize`]; empty results are `None`.
pub fn render_clean(value: &Value, delimiter: &str) -> Option<String> {
    let text = sanitize(&render(value)?, delimiter);
    if text.is_empty() { None } else { Some(text) }
}

// ╔════════════════════════════════════════════╗
// ║ ████████╗███████╗███████╗████████╗███████╗ ║
// ║ ╚══██╔══╝██╔════╝██╔════╝╚══██╔══╝██╔════╝ ║
// ║    ██║   █████╗  ███████╗   ██║   ███████╗ ║
// ║    ██║   ██╔══╝  ╚════██║   ██║   ╚════██║ ║
// ║    ██║   ███████╗███████║   ██║   ███████║ ║
// ║    ╚═╝   ╚══════╝╚══════╝   ╚═╝   ╚══════╝ ║
// ╚════════════════════════════════════════════╝
