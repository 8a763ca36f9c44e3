//! Precedence table for boundaries between two families.
//!
//! When the characters left and right of a position belong to different
//! families, the table says which side owns the position. Only the
//! `Indent` lookup is defined. Any pair without an entry goes to the
//! right-hand family.

use crate::family::Family;

/// Which decision the table is consulted for.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum LookupType {
    /// Auto-indent after a newline or keypress.
    Indent,
}

/// A table cell.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FeudEntry {
    /// This family wins.
    Family(Family),
    /// Wildcard: the other (right-hand) family wins.
    Other,
}

/// Row of the table for one left-hand family.
#[derive(Debug, Clone, Copy)]
enum FeudRow {
    /// `{"*": entry}`: the same answer for every right-hand family.
    Any(FeudEntry),
    /// Explicit per right-hand family entries.
    Each(&'static [(Family, FeudEntry)]),
}

/// Which side of the boundary owns it.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Side {
    /// The family to the left of the position.
    Left,
    /// The family at the position.
    Right,
}

const INDENT_FEUDS: &[(Family, FeudRow)] = &[
    (
        Family::Markup,
        FeudRow::Each(&[
            (Family::Css, FeudEntry::Family(Family::Css)),
            (Family::Csl, FeudEntry::Family(Family::Csl)),
            (Family::Ssl, FeudEntry::Family(Family::Ssl)),
            (Family::Tpl, FeudEntry::Family(Family::Tpl)),
        ]),
    ),
    (Family::Css, FeudRow::Any(FeudEntry::Other)),
    (Family::Csl, FeudRow::Any(FeudEntry::Other)),
    (Family::Ssl, FeudRow::Any(FeudEntry::Family(Family::Ssl))),
    (Family::Tpl, FeudRow::Any(FeudEntry::Family(Family::Tpl))),
];

/// Looks up the raw table cell for a left/right family pair.
#[must_use]
pub fn feud(lookup: LookupType, left: Family, right: Family) -> Option<FeudEntry> {
    let rows = match lookup {
        LookupType::Indent => INDENT_FEUDS,
    };
    let (_, row) = rows.iter().find(|(family, _)| *family == left)?;
    match row {
        FeudRow::Any(entry) => Some(*entry),
        FeudRow::Each(cells) => cells
            .iter()
            .find(|(family, _)| *family == right)
            .map(|(_, entry)| *entry),
    }
}

/// Decides which side owns a boundary between two different families.
#[must_use]
pub fn winner(lookup: LookupType, left: Family, right: Family) -> Side {
    match feud(lookup, left, right) {
        Some(FeudEntry::Family(family)) if family == left && family != right => Side::Left,
        _ => Side::Right,
    }
}
