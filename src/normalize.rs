//! Metadata normalization built on top of `lopdf`.
//!
//! The PDF writer stamps every document with the current time and a random identifier.  Both are
//! replaced with fixed values so identical input always yields identical bytes.

use lopdf::{Dictionary, Document, Object, StringFormat};

use crate::error::{RenderError, Result};

/// Timestamp written to `/CreationDate` and `/ModDate`.
pub const FIXED_TIMESTAMP: &str = "D:20000101000000Z";

/// Identifier written to both halves of the trailer `/ID` array.
pub const FIXED_DOCUMENT_ID: &[u8] = b"resume_render-document-identifier";

fn build_error(action: &str, err: impl std::fmt::Display) -> RenderError {
    RenderError::DocumentBuild(format!("{action}: {err}"))
}

/// Returns `pdf_bytes` with creation dates and the document identifier pinned.
pub fn pin_metadata(pdf_bytes: &[u8]) -> Result<Vec<u8>> {
    let mut document = Document::load_mem(pdf_bytes)
        .map_err(|err| build_error("failed to reopen rendered PDF", err))?;

    let identifier = Object::String(FIXED_DOCUMENT_ID.to_vec(), StringFormat::Hexadecimal);
    document
        .trailer
        .set("ID", Object::Array(vec![identifier.clone(), identifier]));

    let info_id = document
        .trailer
        .get(b"Info")
        .and_then(Object::as_reference)
        .ok();
    match info_id {
        Some(info_id) => {
            let info = document
                .get_object_mut(info_id)
                .and_then(Object::as_dict_mut)
                .map_err(|err| build_error("PDF info entry is not a dictionary", err))?;
            pin_dates(info);
        }
        None => {
            if let Ok(Object::Dictionary(info)) = document.trailer.get_mut(b"Info") {
                pin_dates(info);
            }
        }
    }

    let mut buffer = Vec::new();
    document
        .save_to(&mut buffer)
        .map_err(|err| build_error("failed to serialize normalized PDF", err))?;
    Ok(buffer)
}

fn pin_dates(info: &mut Dictionary) {
    for key in ["CreationDate", "ModDate"] {
        if info.has(key.as_bytes()) {
            info.set(key, Object::string_literal(FIXED_TIMESTAMP));
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use lopdf::dictionary;

    fn sample_pdf(created: &str, id: &[u8]) -> Vec<u8> {
        let mut document = Document::with_version("1.5");
        let pages_id = document.new_object_id();
        let page_id = document.add_object(dictionary! {
            "Type" => "Page",
            "Parent" => pages_id,
            "MediaBox" => vec![0.into(), 0.into(), 612.into(), 792.into()],
        });
        document.objects.insert(
            pages_id,
            Object::Dictionary(dictionary! {
                "Type" => "Pages",
                "Kids" => vec![page_id.into()],
                "Count" => 1,
            }),
        );
        let catalog_id = document.add_object(dictionary! {
            "Type" => "Catalog",
            "Pages" => pages_id,
        });
        let info_id = document.add_object(dictionary! {
            "Producer" => Object::string_literal("test"),
            "CreationDate" => Object::string_literal(created),
            "ModDate" => Object::string_literal(created),
        });
        document.trailer.set("Root", catalog_id);
        document.trailer.set("Info", info_id);
        document.trailer.set(
            "ID",
            Object::Array(vec![
                Object::String(id.to_vec(), StringFormat::Hexadecimal),
                Object::String(id.to_vec(), StringFormat::Hexadecimal),
            ]),
        );

        let mut bytes = Vec::new();
        document.save_to(&mut bytes).expect("save sample pdf");
        bytes
    }

    #[test]
    fn documents_differing_only_in_metadata_become_identical() {
        let first = pin_metadata(&sample_pdf("D:20240101120000Z", b"aaaa")).expect("normalize");
        let second = pin_metadata(&sample_pdf("D:20250607080910Z", b"bbbb")).expect("normalize");
        assert_eq!(first, second);
    }

    #[test]
    fn dates_are_replaced() {
        let normalized = pin_metadata(&sample_pdf("D:20240101120000Z", b"aaaa")).expect("normalize");
        let document = Document::load_mem(&normalized).expect("reload");
        let info_id = document
            .trailer
            .get(b"Info")
            .and_then(Object::as_reference)
            .expect("info reference");
        let info = document
            .get_object(info_id)
            .and_then(Object::as_dict)
            .expect("info dictionary");
        let created = info.get(b"CreationDate").expect("creation date");
        assert_eq!(created.as_str().expect("string"), FIXED_TIMESTAMP.as_bytes());
    }

    #[test]
    fn garbage_input_is_a_build_error() {
        let err = pin_metadata(b"not a pdf").unwrap_err();
        assert!(matches!(err, RenderError::DocumentBuild(_)));
    }
}
