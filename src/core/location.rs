use crate::domain::model::{LocationInput, LocationKind, LocationSpecifier};

/// Infers the location kind from the caller's descriptor key.
///
/// Unknown keys are not an error: they fall back to `Subdistrict`.
pub struct LocationResolver;

impl LocationResolver {
    /// 起點只分 city 與 subdistrict
    pub fn origin(input: &LocationInput) -> LocationSpecifier {
        let kind = match input.key.to_lowercase().as_str() {
            "city" => LocationKind::City,
            _ => LocationKind::Subdistrict,
        };
        LocationSpecifier {
            kind,
            id: input.id.clone(),
        }
    }

    /// 終點可以是 city、country 或 subdistrict
    pub fn destination(input: &LocationInput) -> LocationSpecifier {
        let kind = match input.key.to_lowercase().as_str() {
            "city" => LocationKind::City,
            "country" => LocationKind::Country,
            _ => LocationKind::Subdistrict,
        };
        LocationSpecifier {
            kind,
            id: input.id.clone(),
        }
    }
}
