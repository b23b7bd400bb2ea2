//! Filter state shared by the facade and the forward-geocode capability.
//!
//! Categories and countries are capped lists validated against the closed
//! enumerations in `geoplaces-core`. The spatial filter is a single tagged
//! value: a bounding box and a bias position are never active together.

use std::sync::{Arc, PoisonError, RwLock};

use geoplaces_core::{
    BoundingBox, Category, Country, Position, MAX_CATEGORY_FILTERS, MAX_COUNTRY_FILTERS,
};

use crate::error::FilterError;

/// The spatial constraint applied to forward searches.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub enum SpatialFilter {
    #[default]
    None,
    BoundingBox(BoundingBox),
    BiasPosition(Position),
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct FilterState {
    categories: Vec<Category>,
    countries: Vec<Country>,
    spatial: SpatialFilter,
}

impl FilterState {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn categories(&self) -> &[Category] {
        &self.categories
    }

    #[must_use]
    pub fn countries(&self) -> &[Country] {
        &self.countries
    }

    #[must_use]
    pub fn spatial(&self) -> SpatialFilter {
        self.spatial
    }

    #[must_use]
    pub fn bounding_box(&self) -> Option<BoundingBox> {
        match self.spatial {
            SpatialFilter::BoundingBox(bbox) => Some(bbox),
            _ => None,
        }
    }

    #[must_use]
    pub fn bias_position(&self) -> Option<Position> {
        match self.spatial {
            SpatialFilter::BiasPosition(position) => Some(position),
            _ => None,
        }
    }

    /// Replaces the category filter.
    ///
    /// # Errors
    ///
    /// [`FilterError::TooManyCategories`] if the list is over the cap. The
    /// current filter is kept.
    pub fn set_categories(&mut self, categories: Vec<Category>) -> Result<(), FilterError> {
        if categories.len() > MAX_CATEGORY_FILTERS {
            return Err(FilterError::TooManyCategories {
                count: categories.len(),
                max: MAX_CATEGORY_FILTERS,
            });
        }
        self.categories = categories;
        Ok(())
    }

    /// Resolves `name` and appends it to the category filter. Duplicates are
    /// not collapsed.
    ///
    /// # Errors
    ///
    /// [`FilterError::TooManyCategories`] when the filter is already full,
    /// [`FilterError::UnknownCategory`] when `name` matches no category.
    pub fn add_category(&mut self, name: &str) -> Result<Category, FilterError> {
        if self.categories.len() >= MAX_CATEGORY_FILTERS {
            return Err(FilterError::TooManyCategories {
                count: self.categories.len() + 1,
                max: MAX_CATEGORY_FILTERS,
            });
        }
        let category: Category = name
            .parse()
            .map_err(|_| FilterError::UnknownCategory(name.to_string()))?;
        self.categories.push(category);
        Ok(category)
    }

    pub fn clear_categories(&mut self) {
        self.categories.clear();
    }

    /// Replaces the country filter.
    ///
    /// # Errors
    ///
    /// [`FilterError::TooManyCountries`] if the list is over the cap. The
    /// current filter is kept.
    pub fn set_countries(&mut self, countries: Vec<Country>) -> Result<(), FilterError> {
        if countries.len() > MAX_COUNTRY_FILTERS {
            return Err(FilterError::TooManyCountries {
                count: countries.len(),
                max: MAX_COUNTRY_FILTERS,
            });
        }
        self.countries = countries;
        Ok(())
    }

    /// Resolves an alpha-3 `code` and appends it to the country filter.
    ///
    /// # Errors
    ///
    /// [`FilterError::TooManyCountries`] when the filter is already full,
    /// [`FilterError::UnknownCountry`] when `code` is not an alpha-3 code.
    pub fn add_country(&mut self, code: &str) -> Result<Country, FilterError> {
        if self.countries.len() >= MAX_COUNTRY_FILTERS {
            return Err(FilterError::TooManyCountries {
                count: self.countries.len() + 1,
                max: MAX_COUNTRY_FILTERS,
            });
        }
        let country: Country = code
            .parse()
            .map_err(|_| FilterError::UnknownCountry(code.to_string()))?;
        self.countries.push(country);
        Ok(country)
    }

    pub fn clear_countries(&mut self) {
        self.countries.clear();
    }

    /// Filters to `bbox`, dropping any bias position.
    pub fn set_bounding_box(&mut self, bbox: BoundingBox) {
        self.spatial = SpatialFilter::BoundingBox(bbox);
    }

    /// Resets the spatial filter, whichever variant is active.
    pub fn clear_bounding_box(&mut self) {
        self.spatial = SpatialFilter::None;
    }

    /// Biases towards `position`, dropping any bounding box.
    pub fn set_bias_position(&mut self, position: Position) {
        self.spatial = SpatialFilter::BiasPosition(position);
    }

    /// Resets the spatial filter, whichever variant is active.
    pub fn clear_bias_position(&mut self) {
        self.spatial = SpatialFilter::None;
    }

    pub fn clear_all_filters(&mut self) {
        *self = Self::default();
    }

    /// Category tokens joined with commas, as mirrored into the control.
    #[must_use]
    pub fn categories_token(&self) -> String {
        join_tokens(self.categories.iter().map(|c| c.as_str()))
    }

    /// Alpha-3 codes joined with commas, as mirrored into the control.
    #[must_use]
    pub fn countries_token(&self) -> String {
        join_tokens(self.countries.iter().map(|c| c.code()))
    }
}

fn join_tokens<'a>(tokens: impl Iterator<Item = &'a str>) -> String {
    tokens.collect::<Vec<_>>().join(",")
}

/// Handle to a [`FilterState`] shared between the facade and the
/// capabilities it wired. Clones point at the same state.
///
/// Locks are only held inside [`read`](Self::read) and
/// [`update`](Self::update), never across an `.await`.
#[derive(Debug, Clone, Default)]
pub struct FilterStore {
    inner: Arc<RwLock<FilterState>>,
}

impl FilterStore {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    pub fn read<R>(&self, f: impl FnOnce(&FilterState) -> R) -> R {
        let guard = self.inner.read().unwrap_or_else(PoisonError::into_inner);
        f(&guard)
    }

    pub fn update<R>(&self, f: impl FnOnce(&mut FilterState) -> R) -> R {
        let mut guard = self.inner.write().unwrap_or_else(PoisonError::into_inner);
        f(&mut guard)
    }

    #[must_use]
    pub fn snapshot(&self) -> FilterState {
        self.read(FilterState::clone)
    }
}

#[cfg(test)]
#[path = "filters_test.rs"]
mod tests;
