//! Categories Data

use smallvec::SmallVec;

use crate::{
    domain::categories::records::{CategoryId, CategoryRecord},
    patch::{merge, merge_nullable},
    validation::{ValidationError, required_text},
};

/// Longest accepted category name, in characters.
pub const CATEGORY_NAME_MAX_CHARS: usize = 15;

/// New Category Data
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewCategory {
    pub name: String,
    pub description: Option<String>,
    pub picture: Option<Vec<u8>>,
}

impl NewCategory {
    /// Check the payload before it reaches the store.
    ///
    /// # Errors
    ///
    /// Returns an error if the name is blank or too long.
    pub fn validate(&self) -> Result<(), ValidationError> {
        validate_name(&self.name)
    }
}

/// Nullable category fields that an update may clear.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CategoryField {
    Description,
    Picture,
}

/// Category Update Data
///
/// `None` leaves the stored value untouched; fields listed in `clear` are set to null.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CategoryUpdate {
    pub id: CategoryId,
    pub name: Option<String>,
    pub description: Option<String>,
    pub picture: Option<Vec<u8>>,
    pub clear: SmallVec<[CategoryField; 2]>,
}

impl CategoryUpdate {
    /// Merge the supplied fields onto `record` and re-validate the result.
    ///
    /// # Errors
    ///
    /// Returns an error if a field is both supplied and cleared, or the merged record is invalid.
    pub fn apply_to(self, record: &mut CategoryRecord) -> Result<(), ValidationError> {
        let mut merged = record.clone();

        merge(&mut merged.name, self.name);

        merge_nullable(
            "Description",
            &mut merged.description,
            self.description,
            self.clear.contains(&CategoryField::Description),
        )?;

        merge_nullable(
            "Picture",
            &mut merged.picture,
            self.picture,
            self.clear.contains(&CategoryField::Picture),
        )?;

        validate_name(&merged.name)?;

        *record = merged;

        Ok(())
    }
}

fn validate_name(name: &str) -> Result<(), ValidationError> {
    required_text("CategoryName", name, CATEGORY_NAME_MAX_CHARS)
}

#[cfg(test)]
mod tests {
    use smallvec::smallvec;

    use super::*;

    fn beverages() -> CategoryRecord {
        CategoryRecord {
            id: CategoryId::new(1),
            name: "Beverages".to_string(),
            description: Some("Soft drinks, coffees, teas".to_string()),
            picture: Some(vec![0xFF, 0xD8]),
            version: 3,
        }
    }

    fn update(id: i32) -> CategoryUpdate {
        CategoryUpdate {
            id: CategoryId::new(id),
            name: None,
            description: None,
            picture: None,
            clear: smallvec![],
        }
    }

    #[test]
    fn name_only_update_keeps_other_fields() -> Result<(), ValidationError> {
        let mut record = beverages();

        update(1)
            .with_name("Drinks")
            .apply_to(&mut record)?;

        assert_eq!(record.name, "Drinks");
        assert_eq!(record.description.as_deref(), Some("Soft drinks, coffees, teas"));
        assert_eq!(record.picture, Some(vec![0xFF, 0xD8]));
        assert_eq!(record.version, 3, "merging never touches the version");

        Ok(())
    }

    #[test]
    fn full_update_replaces_every_field() -> Result<(), ValidationError> {
        let mut record = beverages();

        CategoryUpdate {
            id: CategoryId::new(1),
            name: Some("Condiments".to_string()),
            description: Some("Sweet and savory sauces".to_string()),
            picture: Some(vec![0x47, 0x49, 0x46]),
            clear: smallvec![],
        }
        .apply_to(&mut record)?;

        assert_eq!(
            record,
            CategoryRecord {
                id: CategoryId::new(1),
                name: "Condiments".to_string(),
                description: Some("Sweet and savory sauces".to_string()),
                picture: Some(vec![0x47, 0x49, 0x46]),
                version: 3,
            }
        );

        Ok(())
    }

    #[test]
    fn clear_list_empties_nullable_fields() -> Result<(), ValidationError> {
        let mut record = beverages();
        let mut patch = update(1);

        patch.clear = smallvec![CategoryField::Description, CategoryField::Picture];
        patch.apply_to(&mut record)?;

        assert_eq!(record.description, None);
        assert_eq!(record.picture, None);
        assert_eq!(record.name, "Beverages");

        Ok(())
    }

    #[test]
    fn invalid_merge_leaves_record_untouched() {
        let mut record = beverages();

        let result = update(1)
            .with_name("A name that is far too long")
            .apply_to(&mut record);

        assert!(
            matches!(result, Err(ValidationError::TooLong { .. })),
            "expected TooLong, got {result:?}"
        );
        assert_eq!(record, beverages());
    }

    #[test]
    fn new_category_requires_name() {
        let category = NewCategory {
            name: String::new(),
            description: None,
            picture: None,
        };

        assert_eq!(
            category.validate(),
            Err(ValidationError::Required {
                field: "CategoryName"
            })
        );
    }

    impl CategoryUpdate {
        fn with_name(mut self, name: &str) -> Self {
            self.name = Some(name.to_string());
            self
        }
    }
}
