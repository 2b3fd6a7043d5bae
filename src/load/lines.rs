/// What a physical line (or quoted multi-line run) of a CSV file holds.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LineKind {
    Blank,
    Record,
}

#[derive(Clone, Copy, PartialEq, Eq)]
enum State {
    StartField,
    InField,
    InQuoted,
    QuoteInQuoted,
}

/// Classify every logical CSV line as blank or record, in file order.
///
/// Quoting follows the `csv` crate defaults (`"` opens a quoted field only at
/// field start, `""` escapes), so line terminators inside quoted fields never
/// split a record. `\n`, `\r` and `\r\n` all terminate a line. The `csv`
/// reader silently skips blank lines; this scan lets the loader put them back.
pub fn scan_lines(text: &str) -> Vec<LineKind> {
    let bytes = text.as_bytes();
    let mut kinds = Vec::new();
    let mut state = State::StartField;
    let mut has_content = false;
    let mut i = 0;

    while i < bytes.len() {
        let b = bytes[i];
        i += 1;

        if state == State::InQuoted {
            if b == b'"' {
                state = State::QuoteInQuoted;
            }
            continue;
        }

        if b == b'\n' || b == b'\r' {
            if b == b'\r' && bytes.get(i) == Some(&b'\n') {
                i += 1;
            }
            kinds.push(if has_content {
                LineKind::Record
            } else {
                LineKind::Blank
            });
            has_content = false;
            state = State::StartField;
            continue;
        }

        has_content = true;
        state = match (state, b) {
            (State::StartField, b'"') => State::InQuoted,
            (State::QuoteInQuoted, b'"') => State::InQuoted,
            (_, b',') => State::StartField,
            _ => State::InField,
        };
    }

    if has_content {
        kinds.push(LineKind::Record);
    }
    kinds
}
