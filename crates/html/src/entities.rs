/// Decode the entity subset that shows up in hand-written page markup.
///
/// - Named: `&amp;`, `&lt;`, `&gt;`, `&quot;`, `&apos;`, `&nbsp;`, plus the Norwegian letters
///   `&aring;`, `&oslash;`, `&aelig;` (and their capitals) and a few typographic marks.
/// - Numeric, semicolon-terminated: `&#229;` and `&#xE5;`.
///
/// Anything else (unknown names, missing semicolons, invalid scalars) is left unchanged.
pub(crate) fn decode_entities(s: &str) -> String {
    const NAMED: &[(&str, char)] = &[
        ("amp", '&'),
        ("lt", '<'),
        ("gt", '>'),
        ("quot", '"'),
        ("apos", '\''),
        ("nbsp", '\u{00A0}'),
        ("aring", 'å'),
        ("Aring", 'Å'),
        ("oslash", 'ø'),
        ("Oslash", 'Ø'),
        ("aelig", 'æ'),
        ("AElig", 'Æ'),
        ("ndash", '\u{2013}'),
        ("mdash", '\u{2014}'),
        ("times", '\u{00D7}'),
        ("lsaquo", '\u{2039}'),
        ("rsaquo", '\u{203A}'),
    ];
    // longest name above plus room for `#x10FFFF`
    const MAX_ENTITY_LEN: usize = 10;

    if !s.contains('&') {
        return s.to_string();
    }

    let mut out = String::with_capacity(s.len());
    let mut rest = s;
    while let Some(amp) = rest.find('&') {
        out.push_str(&rest[..amp]);
        let after = &rest[amp + 1..];
        let decoded = after
            .find(';')
            .filter(|&end| end > 0 && end <= MAX_ENTITY_LEN)
            .and_then(|end| {
                let body = &after[..end];
                let ch = match body.strip_prefix('#') {
                    Some(num) => decode_numeric(num),
                    None => NAMED.iter().find(|(n, _)| *n == body).map(|(_, c)| *c),
                };
                ch.map(|c| (c, end))
            });
        match decoded {
            Some((ch, end)) => {
                out.push(ch);
                rest = &after[end + 1..];
            }
            None => {
                out.push('&');
                rest = after;
            }
        }
    }
    out.push_str(rest);
    out
}

fn decode_numeric(num: &str) -> Option<char> {
    let value = match num.strip_prefix(['x', 'X']) {
        Some(hex) if !hex.is_empty() && hex.bytes().all(|b| b.is_ascii_hexdigit()) => {
            u32::from_str_radix(hex, 16).ok()?
        }
        Some(_) => return None,
        None if !num.is_empty() && num.bytes().all(|b| b.is_ascii_digit()) => {
            num.parse::<u32>().ok()?
        }
        None => return None,
    };
    char::from_u32(value)
}
