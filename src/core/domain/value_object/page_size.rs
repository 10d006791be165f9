use crate::core::domain::error::ValidationError;

/// Page lengths the node table offers.
pub const PAGE_SIZE_OPTIONS: [usize; 4] = [10, 25, 50, 100];

/// A validated node-table page length.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct PageSize(usize);

impl PageSize {
    /// Creates a page size, rejecting values the table does not offer.
    pub fn new(size: usize) -> Result<Self, ValidationError> {
        validate_page_size(size)?;
        Ok(Self(size))
    }

    /// Returns the number of rows per page.
    #[must_use]
    pub fn get(&self) -> usize {
        self.0
    }
}

impl Default for PageSize {
    fn default() -> Self {
        Self(25)
    }
}

/// Validates a page length against [`PAGE_SIZE_OPTIONS`].
pub(crate) fn validate_page_size(size: usize) -> Result<(), ValidationError> {
    if !PAGE_SIZE_OPTIONS.contains(&size) {
        return Err(ValidationError::Field {
            field: "page_size".to_string(),
            message: format!("Page size must be one of {:?}", PAGE_SIZE_OPTIONS),
        });
    }
    Ok(())
}
