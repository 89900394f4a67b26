//! Display sink writing counts into the page's statistic elements.

use wasm_bindgen::JsValue;
use web_sys::{Document, Element};
use wordtally_core::{format_count, DisplaySink, MetricField};

/// Writes each field's value into the element with the field's id.
#[derive(Debug)]
pub struct DomSink {
    /// Indexed by [`MetricField::index`]
    elements: Vec<Element>,
    grouped: bool,
}

impl DomSink {
    /// Look up the six statistic elements in `document`.
    pub fn new(document: &Document) -> Result<Self, JsValue> {
        let elements = MetricField::ALL
            .iter()
            .map(|field| {
                document.get_element_by_id(field.element_id()).ok_or_else(|| {
                    JsValue::from_str(&format!("Element '{}' not found", field.element_id()))
                })
            })
            .collect::<Result<Vec<_>, _>>()?;
        Ok(Self {
            elements,
            grouped: false,
        })
    }

    /// Show values with thousands separators.
    #[must_use]
    pub fn grouped(mut self, grouped: bool) -> Self {
        self.grouped = grouped;
        self
    }
}

impl DisplaySink for DomSink {
    fn set_display(&mut self, field: MetricField, value: usize) {
        let text = if self.grouped {
            format_count(value)
        } else {
            value.to_string()
        };
        self.elements[field.index()].set_text_content(Some(&text));
    }
}
