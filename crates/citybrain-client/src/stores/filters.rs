// SPDX-License-Identifier: Apache-2.0

/// Cross-page filter selection shared by the dashboard views.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct GlobalFilters {
    pub district: Option<String>,
    pub timespan: Option<String>,
    pub layers: Option<Vec<String>>,
}

impl GlobalFilters {
    #[must_use]
    pub fn as_query(&self) -> Vec<(String, String)> {
        let mut query = Vec::new();
        if let Some(district) = &self.district {
            query.push(("district".to_string(), district.clone()));
        }
        if let Some(timespan) = &self.timespan {
            query.push(("timespan".to_string(), timespan.clone()));
        }
        if let Some(layers) = &self.layers {
            query.push(("layers".to_string(), layers.join(",")));
        }
        query
    }
}

#[derive(Debug, Default)]
pub struct FiltersStore {
    filters: GlobalFilters,
}

impl FiltersStore {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn filters(&self) -> &GlobalFilters {
        &self.filters
    }

    pub fn set_district(&mut self, district: Option<String>) {
        self.filters.district = district;
    }

    pub fn set_timespan(&mut self, timespan: Option<String>) {
        self.filters.timespan = timespan;
    }

    pub fn set_layers(&mut self, layers: Option<Vec<String>>) {
        self.filters.layers = layers;
    }

    pub fn reset(&mut self) {
        self.filters = GlobalFilters::default();
    }
}
