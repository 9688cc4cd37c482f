//! User-visible command names.

/// Prefix carried by every Info command function.
const COMMAND_PREFIX: &[u8] = b"info_";

/// Abbreviation used by echo area commands.
const ECHO_AREA_ABBREV: &[u8] = b"ea_";
const ECHO_AREA_PREFIX: &[u8] = b"echo_area_";

/// Derive the hyphenated name users type from a function identifier.
///
/// `info_` is dropped, a leading `ea_` (after that) becomes `echo_area_`, and
/// underscores turn into hyphens. Bytes are otherwise copied unchanged.
pub fn visible_name(raw: &[u8]) -> Vec<u8> {
    let name = raw.strip_prefix(COMMAND_PREFIX).unwrap_or(raw);

    let mut out = Vec::with_capacity(name.len() + ECHO_AREA_PREFIX.len());
    let rest = match name.strip_prefix(ECHO_AREA_ABBREV) {
        Some(rest) => {
            out.extend_from_slice(ECHO_AREA_PREFIX);
            rest
        }
        None => name,
    };
    out.extend_from_slice(rest);

    for b in out.iter_mut() {
        if *b == b'_' {
            *b = b'-';
        }
    }
    out
}
