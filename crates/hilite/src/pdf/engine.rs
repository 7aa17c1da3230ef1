//! [`Document`] implementation over [`lopdf`].

use camino::Utf8Path;
use hilite_core::engine::{Document, Rect, TextSpan};
use hilite_core::error::{EngineError, EngineResult};
use hilite_core::palette::Color;
use lopdf::{dictionary, Document as PdfFile, Object, ObjectId};
use tracing::debug;

use super::locate;

/// An open PDF document.
pub struct PdfDocument {
    doc: PdfFile,
    /// `(page number, page object id)` in page order.
    pages: Vec<(u32, ObjectId)>,
}

impl PdfDocument {
    /// Load a PDF from disk.
    pub fn open(path: &Utf8Path) -> EngineResult<Self> {
        let doc = PdfFile::load(path.as_std_path()).map_err(to_engine)?;
        let pages: Vec<(u32, ObjectId)> = doc.get_pages().into_iter().collect();
        debug!(path = %path, pages = pages.len(), "opened document");
        Ok(Self { doc, pages })
    }

    fn page_entry(&self, page: usize) -> EngineResult<(u32, ObjectId)> {
        self.pages
            .get(page)
            .copied()
            .ok_or(EngineError::PageOutOfRange(page))
    }

    /// Append an annotation reference to the page's `Annots` array, which may
    /// be absent, direct, or a reference to an array object.
    fn append_annotation(&mut self, page_id: ObjectId, annot_id: ObjectId) -> EngineResult<()> {
        let annots_ref = self
            .doc
            .get_dictionary(page_id)
            .map_err(to_engine)?
            .get(b"Annots")
            .ok()
            .and_then(|entry| entry.as_reference().ok());
        if let Some(array_id) = annots_ref {
            let array = self
                .doc
                .get_object_mut(array_id)
                .and_then(Object::as_array_mut)
                .map_err(to_engine)?;
            array.push(Object::Reference(annot_id));
            return Ok(());
        }
        let page = self
            .doc
            .get_object_mut(page_id)
            .and_then(Object::as_dict_mut)
            .map_err(to_engine)?;
        if let Ok(array) = page.get_mut(b"Annots").and_then(Object::as_array_mut) {
            array.push(Object::Reference(annot_id));
        } else {
            page.set("Annots", vec![Object::Reference(annot_id)]);
        }
        Ok(())
    }
}

impl Document for PdfDocument {
    fn page_count(&self) -> usize {
        self.pages.len()
    }

    fn page_text(&self, page: usize) -> EngineResult<String> {
        let (number, _) = self.page_entry(page)?;
        self.doc.extract_text(&[number]).map_err(to_engine)
    }

    fn search(&self, word: &str) -> EngineResult<Vec<TextSpan>> {
        let mut spans = Vec::new();
        for (index, &(_, page_id)) in self.pages.iter().enumerate() {
            let glyphs = locate::page_glyphs(&self.doc, page_id).map_err(to_engine)?;
            for rect in locate::find_word(&glyphs, word) {
                spans.push(TextSpan { page: index, rect });
            }
        }
        Ok(spans)
    }

    fn highlight(&mut self, span: &TextSpan, color: Color) -> EngineResult<()> {
        let (_, page_id) = self.page_entry(span.page)?;
        let Rect { x0, y0, x1, y1 } = span.rect;
        let annot = dictionary! {
            "Type" => "Annot",
            "Subtype" => "Highlight",
            "Rect" => reals(&[x0, y0, x1, y1]),
            // quad order: upper-left, upper-right, lower-left, lower-right
            "QuadPoints" => reals(&[x0, y1, x1, y1, x0, y0, x1, y0]),
            "C" => reals(&[color.r, color.g, color.b]),
            "F" => 4,
        };
        let annot_id = self.doc.add_object(annot);
        self.append_annotation(page_id, annot_id)
    }

    fn clear_annotations(&mut self) -> EngineResult<usize> {
        let mut removed = 0;
        let pages = self.pages.clone();
        for (_, page_id) in pages {
            let mut array_id = None;
            let mut annot_ids = Vec::new();
            let mut count = 0;
            {
                let page = self.doc.get_dictionary(page_id).map_err(to_engine)?;
                let Ok(entry) = page.get(b"Annots") else {
                    continue;
                };
                let array_obj = match entry.as_reference() {
                    Ok(id) => {
                        array_id = Some(id);
                        self.doc.get_object(id).map_err(to_engine)?
                    }
                    Err(_) => entry,
                };
                if let Ok(array) = array_obj.as_array() {
                    count = array.len();
                    annot_ids = array
                        .iter()
                        .filter_map(|obj| obj.as_reference().ok())
                        .collect();
                }
            }
            for id in annot_ids {
                self.doc.objects.remove(&id);
            }
            if let Some(id) = array_id {
                self.doc.objects.remove(&id);
            }
            let page = self
                .doc
                .get_object_mut(page_id)
                .and_then(Object::as_dict_mut)
                .map_err(to_engine)?;
            page.remove(b"Annots");
            removed += count;
        }
        debug!(removed, "cleared annotations");
        Ok(removed)
    }

    fn save(&mut self, path: &Utf8Path) -> EngineResult<()> {
        self.doc
            .save(path.as_std_path())
            .map_err(|err| EngineError::Backend(err.to_string()))?;
        Ok(())
    }
}

fn reals(values: &[f64]) -> Vec<Object> {
    values.iter().map(|v| Object::Real(*v as f32)).collect()
}

fn to_engine(err: lopdf::Error) -> EngineError {
    EngineError::Backend(err.to_string())
}
