//! Schema export for refinement types.
//!
//! A type's schema starts from its ancestor's, then records its own title
//! and description, then applies the entries given on the definition.
//! Descendants add to or override keys; they never drop inherited ones.

use crate::phantom::RefinementType;

/// A JSON-schema style object.
pub type Schema = serde_json::Map<String, serde_json::Value>;

impl RefinementType {
    /// The merged schema of this type and its ancestors.
    pub fn schema(&self) -> Schema {
        let mut schema = self
            .ancestor()
            .map(|ancestor| ancestor.schema())
            .unwrap_or_default();
        schema.insert("title".into(), self.short_name().into());
        match self.description() {
            Some(description) => {
                schema.insert("description".into(), description.into());
            }
            None => {
                schema.remove("description");
            }
        }
        for (key, value) in &self.schema {
            schema.insert(key.clone(), value.clone());
        }
        schema
    }
}
