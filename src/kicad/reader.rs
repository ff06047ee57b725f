//! `.kicad_mod` pad reader.
//!
//! Reads pad records back from text produced by [`super::writer`]: a lone
//! pad line, several pad lines, or a whole footprint document.

use std::path::Path;

use super::error::{KicadError, KicadResult};
use super::sexp::{parse_all, SExp};
use crate::footprint::{LayerSet, MountType, PadId, PadRecord, PadShape, Point, Size};

/// Parses every pad found in `text`, in document order.
///
/// # Errors
///
/// Returns an error if the text is not valid S-expression syntax or a pad
/// is missing a field or uses an unsupported token.
pub fn parse_pads(text: &str) -> KicadResult<Vec<PadRecord>> {
    let mut pads = Vec::new();
    for root in parse_all(text)? {
        if root.head() == Some("pad") {
            pads.push(parse_pad(&root)?);
        } else {
            for pad in root.children("pad") {
                pads.push(parse_pad(pad)?);
            }
        }
    }
    Ok(pads)
}

/// Reads and parses the pads of a `.kicad_mod` file.
///
/// # Errors
///
/// Returns an error if the file cannot be read or parsed.
pub fn read_footprint_file(path: &Path) -> KicadResult<Vec<PadRecord>> {
    let text = std::fs::read_to_string(path).map_err(|e| KicadError::file_read(path, e))?;
    parse_pads(&text)
}

/// Parses one `(pad ...)` expression.
///
/// # Errors
///
/// Returns an error if a required field is missing or malformed.
pub fn parse_pad(sexp: &SExp) -> KicadResult<PadRecord> {
    let items = sexp.as_list().unwrap_or_default();
    let atom_at = |index: usize, field: &str| {
        items
            .get(index)
            .and_then(SExp::as_atom)
            .ok_or_else(|| KicadError::missing_field(field, sexp.to_string()))
    };

    let id = match atom_at(1, "number")? {
        "" => PadId::Anonymous,
        n => PadId::Number(
            n.parse()
                .map_err(|_| KicadError::unexpected_token("pad number", n))?,
        ),
    };
    let context = format!("pad {id}");

    let mount = atom_at(2, "type")?;
    let mount_type = MountType::from_token(mount)
        .ok_or_else(|| KicadError::unexpected_token(context.clone(), mount))?;

    let shape = atom_at(3, "shape")?;
    let shape = PadShape::from_token(shape)
        .ok_or_else(|| KicadError::unexpected_token(context.clone(), shape))?;

    let [x, y] = numbers::<2>(sexp, "at", &context)?;
    let [width, height] = numbers::<2>(sexp, "size", &context)?;
    let drill = match sexp.child("drill") {
        Some(_) => {
            let [d] = numbers::<1>(sexp, "drill", &context)?;
            Some(d)
        }
        None => None,
    };

    let layer_names: Vec<&str> = sexp
        .child("layers")
        .and_then(SExp::as_list)
        .ok_or_else(|| KicadError::missing_field("layers", context.clone()))?
        .iter()
        .skip(1)
        .filter_map(SExp::as_atom)
        .collect();
    let layers = LayerSet::from_layer_names(layer_names.as_slice())
        .ok_or_else(|| KicadError::unexpected_token(context.clone(), layer_names.join(" ")))?;

    Ok(PadRecord {
        id,
        mount_type,
        shape,
        position: Point::new(x, y),
        size: Size::new(width, height),
        drill,
        layers,
    })
}

/// Reads the first `N` numeric arguments of the child list `key`.
fn numbers<const N: usize>(sexp: &SExp, key: &str, context: &str) -> KicadResult<[f64; N]> {
    let items = sexp
        .child(key)
        .and_then(SExp::as_list)
        .ok_or_else(|| KicadError::missing_field(key, context))?;

    let mut values = [0.0; N];
    for (i, value) in values.iter_mut().enumerate() {
        let token = items
            .get(i + 1)
            .and_then(SExp::as_atom)
            .ok_or_else(|| KicadError::missing_field(key, context))?;
        *value = token
            .parse()
            .map_err(|_| KicadError::unexpected_token(format!("{context} {key}"), token))?;
    }
    Ok(values)
}
