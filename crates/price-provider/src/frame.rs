use crate::error::ProviderError;
use crate::field::PriceField;
use core_types::{AssetFrame, PriceMatrix};
use tracing::warn;

/// A multi-field download: one `AssetFrame` per price field, each with one
/// column per ticker.
#[derive(Debug, Clone, Default)]
pub struct FieldFrame {
    fields: Vec<(PriceField, AssetFrame)>,
}

impl FieldFrame {
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds or replaces the frame for `field`.
    pub fn insert(&mut self, field: PriceField, frame: AssetFrame) {
        match self.fields.iter_mut().find(|(f, _)| *f == field) {
            Some(slot) => slot.1 = frame,
            None => self.fields.push((field, frame)),
        }
    }

    pub fn with_field(mut self, field: PriceField, frame: AssetFrame) -> Self {
        self.insert(field, frame);
        self
    }

    pub fn get(&self, field: PriceField) -> Option<&AssetFrame> {
        self.fields
            .iter()
            .find(|(f, _)| *f == field)
            .map(|(_, frame)| frame)
    }

    pub fn fields(&self) -> impl Iterator<Item = PriceField> + '_ {
        self.fields.iter().map(|(f, _)| *f)
    }

    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }

    /// The prices to analyse: `requested` when present, otherwise `Close`.
    ///
    /// # Errors
    ///
    /// `MissingField` when neither is available.
    pub fn select_price_field(&self, requested: PriceField) -> Result<PriceMatrix, ProviderError> {
        if let Some(frame) = self.get(requested) {
            return Ok(frame.clone());
        }
        if let Some(frame) = self.get(PriceField::Close) {
            warn!(
                requested = %requested,
                "Requested price field missing, falling back to Close"
            );
            return Ok(frame.clone());
        }
        Err(ProviderError::MissingField(requested))
    }
}
